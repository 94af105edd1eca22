use serde_json::{Value, json};

/// Build a discovery-scan result with `count` candidates, ids `h0..`,
/// the way the in-page script reports them.
pub fn discovery_result(count: usize) -> Value {
    let items: Vec<Value> = (0..count)
        .map(|i| json!({ "id": format!("h{}", i), "text": format!("link {}", i) }))
        .collect();
    Value::Array(items)
}
