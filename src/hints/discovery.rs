use serde_json::Value;

use crate::hints::session::Candidate;

/// Hard cap on candidates per scan; the scan stops once it is reached,
/// so first-encountered elements in document order win.
pub const MAX_CANDIDATES: usize = 400;

/// Session-scoped attribute stamped onto candidate elements so later
/// scripts can find them. The value namespace is opaque and never stable
/// across sessions or reloads.
pub const HINT_ATTRIBUTE: &str = "data-kite-hint";

/// Build the in-page scan script.
///
/// The script enumerates interactive elements (links with a destination,
/// buttons, submit/reset/image inputs, ARIA buttons, click-handler
/// elements, disclosure elements, bound labels, image-map areas), drops
/// anything detached, collapsed, off-screen, or invisible, stamps each
/// survivor with [`HINT_ATTRIBUTE`], and returns `[{id, text}]` in
/// document order. Any failure inside the page resolves to an empty list.
pub fn discovery_script() -> String {
    format!(
        r#"(function () {{
  try {{
    var selector = 'a[href], button, input[type="submit"], input[type="button"], input[type="reset"], input[type="image"], [role="button"], [onclick], summary, label[for], area[href]';
    var viewportWidth = window.innerWidth || document.documentElement.clientWidth;
    var viewportHeight = window.innerHeight || document.documentElement.clientHeight;
    var nodes = document.querySelectorAll(selector);
    var out = [];
    for (var i = 0; i < nodes.length && out.length < {max}; i++) {{
      var el = nodes[i];
      if (!el.isConnected) {{ continue; }}
      var rect = el.getBoundingClientRect();
      if (rect.width <= 1 || rect.height <= 1) {{ continue; }}
      if (rect.bottom < 0 || rect.right < 0 || rect.top > viewportHeight || rect.left > viewportWidth) {{ continue; }}
      var style = window.getComputedStyle(el);
      if (style.visibility === 'hidden' || style.display === 'none' || parseFloat(style.opacity) === 0) {{ continue; }}
      var id = 'h' + out.length;
      el.setAttribute('{attr}', id);
      var text = el.getAttribute('aria-label') || el.getAttribute('title') || el.getAttribute('alt') || (el.textContent || '').trim() || '';
      out.push({{ id: id, text: text.slice(0, 80) }});
    }}
    return out;
  }} catch (err) {{
    return [];
  }}
}})();"#,
        max = MAX_CANDIDATES,
        attr = HINT_ATTRIBUTE,
    )
}

/// Parse a discovery result into candidates.
///
/// A non-list result (including the null produced by an in-page error) is
/// treated as zero candidates; malformed items are skipped and the cap is
/// re-applied defensively.
pub fn parse_candidates(value: &Value) -> Vec<Candidate> {
    let Some(items) = value.as_array() else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| serde_json::from_value(item.clone()).ok())
        .take(MAX_CANDIDATES)
        .collect()
}
