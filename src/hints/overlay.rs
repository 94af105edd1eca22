use crate::hints::discovery::HINT_ATTRIBUTE;

/// DOM id of the overlay container that holds every hint marker.
pub const OVERLAY_ID: &str = "kite-hint-overlay";

/// Build the projection script for a set of (element_id, label) pairs.
///
/// Markers are positioned at each element's bounding-box top-left in
/// document coordinates (scroll offset folded in), so they stay put when
/// the page scrolls. Any previous overlay is removed first: re-projection
/// replaces, never accumulates.
pub fn show_script(pairs: &[(&str, &str)]) -> String {
    let data = serde_json::to_string(pairs).unwrap_or_else(|_| "[]".to_string());
    format!(
        r#"(function () {{
  try {{
    var data = {data};
    var old = document.getElementById('{overlay}');
    if (old) {{ old.remove(); }}
    var overlay = document.createElement('div');
    overlay.id = '{overlay}';
    overlay.style.cssText = 'position:absolute;top:0;left:0;z-index:2147483647;pointer-events:none;';
    for (var i = 0; i < data.length; i++) {{
      var el = document.querySelector('[{attr}="' + data[i][0] + '"]');
      if (!el) {{ continue; }}
      var rect = el.getBoundingClientRect();
      var mark = document.createElement('span');
      mark.textContent = data[i][1];
      mark.setAttribute('data-hint-label', data[i][1]);
      mark.style.cssText = 'position:absolute;left:' + (rect.left + window.scrollX) + 'px;top:' + (rect.top + window.scrollY) + 'px;background:#1c2a41;color:#f8fafc;border:1px solid #3b82f6;border-radius:3px;padding:1px 3px;font:bold 11px monospace;';
      overlay.appendChild(mark);
    }}
    document.body.appendChild(overlay);
    return data.length;
  }} catch (err) {{
    return null;
  }}
}})();"#,
        data = data,
        overlay = OVERLAY_ID,
        attr = HINT_ATTRIBUTE,
    )
}

/// Build the filter script for a typed prefix.
///
/// Labels that do not start with the prefix are hidden, labels that equal
/// it exactly are highlighted, everything else shows normally. An empty
/// prefix shows every label normally.
pub fn filter_script(prefix: &str) -> String {
    let prefix = serde_json::to_string(prefix).unwrap_or_else(|_| "\"\"".to_string());
    format!(
        r#"(function () {{
  try {{
    var prefix = {prefix};
    var overlay = document.getElementById('{overlay}');
    if (!overlay) {{ return false; }}
    var marks = overlay.querySelectorAll('span[data-hint-label]');
    for (var i = 0; i < marks.length; i++) {{
      var label = marks[i].getAttribute('data-hint-label');
      if (prefix && label.indexOf(prefix) !== 0) {{
        marks[i].style.display = 'none';
        continue;
      }}
      marks[i].style.display = '';
      if (prefix && label === prefix) {{
        marks[i].style.background = '#3b82f6';
        marks[i].style.color = '#020617';
      }} else {{
        marks[i].style.background = '#1c2a41';
        marks[i].style.color = '#f8fafc';
      }}
    }}
    return true;
  }} catch (err) {{
    return false;
  }}
}})();"#,
        prefix = prefix,
        overlay = OVERLAY_ID,
    )
}

/// Build the teardown script: removes the overlay and every marker
/// attribute. Safe to run when nothing is shown.
pub fn clear_script() -> String {
    format!(
        r#"(function () {{
  try {{
    var overlay = document.getElementById('{overlay}');
    if (overlay) {{ overlay.remove(); }}
    var marked = document.querySelectorAll('[{attr}]');
    for (var i = 0; i < marked.length; i++) {{
      marked[i].removeAttribute('{attr}');
    }}
    return true;
  }} catch (err) {{
    return false;
  }}
}})();"#,
        overlay = OVERLAY_ID,
        attr = HINT_ATTRIBUTE,
    )
}

/// Build the activation script for a resolved element.
///
/// Focus is best-effort; the synthetic click is a primary-button
/// MouseEvent. Resolves to false when the element has vanished since the
/// scan.
pub fn activate_script(element_id: &str) -> String {
    let id = serde_json::to_string(element_id).unwrap_or_else(|_| "\"\"".to_string());
    format!(
        r#"(function () {{
  try {{
    var id = {id};
    var el = document.querySelector('[{attr}="' + id + '"]');
    if (!el) {{ return false; }}
    if (typeof el.focus === 'function') {{
      try {{ el.focus(); }} catch (focusErr) {{}}
    }}
    var click = new MouseEvent('click', {{ bubbles: true, cancelable: true, view: window, button: 0 }});
    el.dispatchEvent(click);
    return true;
  }} catch (err) {{
    return false;
  }}
}})();"#,
        id = id,
        attr = HINT_ATTRIBUTE,
    )
}
