pub const SEARCH_URL_PREFIX: &str = "https://duckduckgo.com/?q=";

const MEDIA_EXTENSIONS: [&str; 3] = [".mp4", ".m4v", ".mov"];
const MEDIA_SCHEMES: [&str; 3] = ["http", "https", "file"];

/// Heuristic for deciding whether address-bar text is a URL or a search
/// query: anything with a space searches, an explicit scheme or a dot
/// navigates.
pub fn looks_like_url(text: &str) -> bool {
    if text.contains(' ') {
        return false;
    }
    if text.starts_with("http://") || text.starts_with("https://") {
        return true;
    }
    text.contains('.')
}

/// Resolve address-bar input to the URL that should be loaded.
pub fn resolve_address(text: &str) -> Option<String> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if looks_like_url(text) {
        if text.contains("://") || text.starts_with("about:") {
            Some(text.to_string())
        } else {
            Some(format!("https://{}", text))
        }
    } else {
        Some(format!("{}{}", SEARCH_URL_PREFIX, percent_encode(text)))
    }
}

/// Percent-encode a query string (RFC 3986 unreserved characters pass
/// through).
pub fn percent_encode(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for byte in text.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(byte as char);
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

fn url_scheme(url: &str) -> Option<&str> {
    url.split_once("://").map(|(scheme, _)| scheme)
}

fn url_file_name(url: &str) -> Option<&str> {
    let rest = url.split_once("://").map(|(_, rest)| rest).unwrap_or(url);
    let path = rest.split(['?', '#']).next().unwrap_or("");
    path.rsplit('/').next().filter(|name| !name.is_empty())
}

/// True for direct navigations to a playable media file.
pub fn is_media_url(url: &str) -> bool {
    let Some(scheme) = url_scheme(url) else {
        return false;
    };
    if !MEDIA_SCHEMES.contains(&scheme.to_lowercase().as_str()) {
        return false;
    }
    let rest = match url.split_once("://") {
        Some((_, rest)) => rest,
        None => return false,
    };
    let path = match rest.find('/') {
        Some(idx) => rest[idx..].split(['?', '#']).next().unwrap_or(""),
        None => return false,
    };
    let path = path.to_lowercase();
    MEDIA_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}

pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Build the inline-player document shown instead of a raw media file.
/// Returns `None` for non-media URLs.
pub fn build_media_wrapper(url: &str) -> Option<String> {
    if !is_media_url(url) {
        return None;
    }

    let safe_title = escape_html(url_file_name(url).unwrap_or("MP4 Video"));
    let safe_src = escape_html(url);
    Some(format!(
        r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="utf-8">
    <title>{title}</title>
    <style>
      :root {{ color-scheme: dark; }}
      body {{
        margin: 0;
        background: #111;
        color: #eee;
        font-family: system-ui, sans-serif;
        display: flex;
        align-items: center;
        justify-content: center;
        min-height: 100vh;
      }}
      main {{ width: 100%; padding: 1rem; box-sizing: border-box; }}
      video {{
        display: block;
        margin: 0 auto;
        max-width: 100%;
        max-height: calc(100vh - 2rem);
        background: #000;
      }}
      p {{ text-align: center; margin-top: 1rem; font-size: 0.95rem; }}
      a {{ color: #8ab4f8; }}
    </style>
  </head>
  <body>
    <main>
      <video controls autoplay playsinline preload="metadata">
        <source src="{src}" type="video/mp4">
        <p>Your system cannot play this file. <a href="{src}">Download the video</a> instead.</p>
      </video>
    </main>
  </body>
</html>"#,
        title = safe_title,
        src = safe_src,
    ))
}

/// Generated start page shown in fresh tabs.
pub fn start_page_html() -> String {
    r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="utf-8">
    <title>New Tab</title>
    <style>
      :root { color-scheme: dark; }
      body {
        margin: 0;
        background: #070f1f;
        color: #e2e8f0;
        font-family: system-ui, sans-serif;
        display: flex;
        align-items: center;
        justify-content: center;
        min-height: 100vh;
      }
      main { text-align: center; }
      h1 { font-weight: 600; letter-spacing: 0.08em; color: #38bdf8; }
      p { color: #9aa8c4; font-size: 0.95rem; }
      kbd {
        background: #141f33;
        border: 1px solid #324059;
        border-radius: 4px;
        padding: 1px 5px;
        font-size: 0.85rem;
      }
    </style>
  </head>
  <body>
    <main>
      <h1>kite</h1>
      <p><kbd>o</kbd> address bar &middot; <kbd>f</kbd> follow link &middot; <kbd>j</kbd>/<kbd>k</kbd> scroll</p>
    </main>
  </body>
</html>"#
        .to_string()
}
