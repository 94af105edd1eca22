use std::path::{Path, PathBuf};

/// Best-effort filename for a download, derived from the suggested name
/// or the URL's last path segment.
pub fn download_file_name(suggested: &str, url: &str) -> String {
    let suggested = sanitize_file_name(suggested);
    if !suggested.is_empty() {
        return suggested;
    }
    let rest = url.split_once("://").map(|(_, rest)| rest).unwrap_or(url);
    let from_url = rest
        .split(['?', '#'])
        .next()
        .and_then(|path| path.rsplit('/').next())
        .map(sanitize_file_name)
        .unwrap_or_default();
    if from_url.is_empty() {
        "download".to_string()
    } else {
        from_url
    }
}

/// Strip path separators and leading dots so a hostile suggested name
/// cannot escape the download directory.
fn sanitize_file_name(name: &str) -> String {
    let name = name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or("")
        .trim()
        .trim_start_matches('.');
    name.to_string()
}

/// Pick a non-clobbering target path inside `dir`, appending ` (n)`
/// before the extension while the name is taken.
pub fn resolve_download_path(dir: &Path, file_name: &str) -> PathBuf {
    let candidate = dir.join(file_name);
    if !candidate.exists() {
        return candidate;
    }

    let (stem, extension) = match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem.to_string(), format!(".{}", ext)),
        _ => (file_name.to_string(), String::new()),
    };

    let mut n: u32 = 1;
    loop {
        let candidate = dir.join(format!("{} ({}){}", stem, n, extension));
        if !candidate.exists() {
            return candidate;
        }
        n += 1;
    }
}
