//! Pure path-string transforms.
//!
//! Everything here treats the separator as a literal character; callers must
//! unify a path to forward slashes before handing it to the relative /
//! segment-stripping helpers.

/// Replace every backslash with a forward slash.
pub fn unify_separators(path: &str) -> String {
    path.replace('\\', "/")
}

/// Collapse `..`-style project-relative paths: every literal `..` becomes
/// `base`.
pub fn rebase_pardir(path: &str, base: &str) -> String {
    path.replace("..", base)
}

/// Strip a `base/` prefix; paths outside `base` come back unchanged.
pub fn to_relative(path: &str, base: &str) -> String {
    let prefix = format!("{base}/");
    match path.strip_prefix(&prefix) {
        Some(rest) => rest.to_string(),
        None => path.to_string(),
    }
}

/// Drop the last `levels` separator-delimited segments: `levels == 1` removes
/// the file name, `levels == 2` additionally removes its directory.
pub fn strip_trailing_segments(path: &str, sep: char, levels: usize) -> String {
    let mut kept = String::new();
    let mut seen = 0;
    for ch in path.chars().rev() {
        if seen >= levels {
            kept.push(ch);
        } else if ch == sep {
            seen += 1;
        }
    }
    kept.chars().rev().collect()
}

/// Remove every path that still carries `.h` anywhere in it. Must run before
/// the list is split into the C / C++ / assembly buckets, else headers leak
/// into the source list.
pub fn remove_headers(paths: &mut Vec<String>) {
    paths.retain(|p| !p.contains(".h"));
}

pub fn cpp_sources(paths: &[String]) -> Vec<String> {
    paths.iter().filter(|p| p.contains(".cpp")).cloned().collect()
}

pub fn c_sources(paths: &[String]) -> Vec<String> {
    paths
        .iter()
        .filter(|p| p.contains(".c") && !p.contains(".cpp"))
        .cloned()
        .collect()
}

pub fn asm_sources(paths: &[String]) -> Vec<String> {
    paths
        .iter()
        .filter(|p| p.contains(".asm") || p.contains(".s"))
        .cloned()
        .collect()
}
