// Path Utilities
//
// Slash-separated path helpers used when naming rendered files and source
// maps. Paths are treated as plain strings so that rendering stays
// independent of the host platform.

/// Get basename from path.
pub fn get_basename(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Get directory name from path.
pub fn get_dirname(path: &str) -> &str {
    match path.rfind('/') {
        Some(0) => "/",
        Some(pos) => &path[..pos],
        None => ".",
    }
}

/// Compute the path of `to` relative to the directory `from`.
///
/// Both paths are interpreted relative to the same root; `.` segments are
/// dropped and `..` segments cancel the preceding one. `from` must not climb
/// above that root further than `to` does: the names of the directories it
/// would leave are unknown, so any `..` of `from` not shared with `to` is
/// answered with `None`.
pub fn relative(from: &str, to: &str) -> Option<String> {
    let from = normalize(from);
    let to = normalize(to);

    let common = from
        .iter()
        .zip(to.iter())
        .take_while(|(a, b)| a == b)
        .count();
    if from[common..].contains(&"..") {
        return None;
    }

    let mut segments: Vec<&str> = vec![".."; from.len() - common];
    segments.extend(to[common..].iter().copied());

    Some(if segments.is_empty() {
        ".".to_string()
    } else {
        segments.join("/")
    })
}

/// Where the rendering of `input` goes below `out_dir`.
///
/// The input path is mirrored with its root, `.` and `..` segments dropped,
/// so `../lib/a.js` and `/lib/a.js` both land on `<out_dir>/lib/a.js`.
pub fn output_path(out_dir: &str, input: &str) -> String {
    let segments: Vec<&str> = input
        .split('/')
        .filter(|segment| !matches!(*segment, "" | "." | ".."))
        .collect();
    format!("{}/{}", out_dir.trim_end_matches('/'), segments.join("/"))
}

fn normalize(path: &str) -> Vec<&str> {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if matches!(segments.last(), Some(last) if *last != "..") {
                    segments.pop();
                } else {
                    segments.push("..");
                }
            }
            other => segments.push(other),
        }
    }
    segments
}

/// Check if identifier is valid.
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' || first == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}
