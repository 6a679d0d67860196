//! Config extraction: substring scraping of the Keil project description and
//! the preference file.
//!
//! Deliberately not a real XML/YAML parser. Both dialects put one concept per
//! line, and the generated output must not diverge from the established tag /
//! key match semantics for inputs with repeated tags (see DESIGN.md), so the
//! capture rules below stay substring-based.

use std::fs;
use std::path::Path;

use crate::error::Error;
use crate::model::{BuildPreferences, GenerateMode, ProjectConfig};
use crate::processor::paths;

/// Capture the text between `<tag>` and `</tag>` on every line carrying the
/// tag. One capture per matching line; empty captures are dropped; order is
/// preserved. An absent tag is an empty result, not an error.
pub fn tag_values(text: &str, tag: &str) -> Vec<String> {
    let open = format!("<{tag}>");
    let close = format!("</{tag}>");
    let mut values = Vec::new();
    for line in text.lines() {
        let Some(start) = line.find(&open) else {
            continue;
        };
        let rest = &line[start + open.len()..];
        let Some(end) = rest.find(&close) else {
            continue;
        };
        if !rest[..end].is_empty() {
            values.push(rest[..end].to_string());
        }
    }
    values
}

/// Value of `key: value` on the first line containing the key token.
/// Everything after the last colon on that line counts; spaces are stripped
/// wholesale.
pub fn key_value(text: &str, key: &str) -> Option<String> {
    for line in text.lines() {
        if line.contains(key) {
            if let Some(colon) = line.rfind(':') {
                return Some(line[colon + 1..].replace(' ', ""));
            }
        }
    }
    None
}

fn read(path: &Path) -> Result<String, Error> {
    fs::read_to_string(path).map_err(|source| Error::ConfigRead {
        path: path.to_path_buf(),
        source,
    })
}

/// Load the preference file. Missing keys fall back to empty strings (the
/// parameter pass then writes an empty value, which is visible and easy to
/// fix) except for the mode and asm switches, which default to the safe side.
pub fn load_preferences(path: &Path) -> Result<BuildPreferences, Error> {
    let text = read(path)?;
    let lookup = |key: &str| key_value(&text, key).unwrap_or_default();

    let generate_mode = match lookup("generate_mode").as_str() {
        "force_regenerate" => GenerateMode::ForceRegenerate,
        "update" => GenerateMode::Update,
        _ => GenerateMode::Create,
    };

    Ok(BuildPreferences {
        optimization: lookup("optimization"),
        generate_mode,
        debug_build: lookup("debug_build"),
        auto_add_file: lookup("auto_add_file"),
        build_dir: lookup("build_dir"),
        modify_asm: lookup("modify_asm") != "0",
    })
}

/// Scrape the `.uvprojx` description and normalize every captured path:
/// slash-delimited, `..` rebased against the project file's grandparent
/// directory, then made relative to the build root. `parent` and `root` must
/// already be slash-delimited absolutes.
pub fn load_project_config(
    path: &Path,
    parent: &str,
    root: &str,
) -> Result<ProjectConfig, Error> {
    let text = read(path)?;

    let device = tag_values(&text, "Device")
        .into_iter()
        .next()
        .unwrap_or_default();

    let defines = first_split(&tag_values(&text, "Define"), ',');
    let misc_controls = first_split(&tag_values(&text, "MiscControls"), ' ');

    let include_paths = first_split(&tag_values(&text, "IncludePath"), ';')
        .into_iter()
        .map(|p| normalize(&p, parent, root))
        .collect();

    let mut source_paths: Vec<String> = tag_values(&text, "FilePath")
        .into_iter()
        .map(|p| normalize(&p, parent, root))
        .collect();
    paths::remove_headers(&mut source_paths);

    // make(1) chokes on unescaped spaces in the target position
    let target_name = tag_values(&text, "TargetName")
        .into_iter()
        .next()
        .unwrap_or_default()
        .replace(' ', "_");

    Ok(ProjectConfig {
        device,
        defines,
        misc_controls,
        include_paths,
        source_paths,
        target_name,
    })
}

/// The project dialect stores a whole delimited list inside a single tag, so
/// only the first captured string is split.
fn first_split(values: &[String], sep: char) -> Vec<String> {
    match values.first() {
        Some(raw) => raw.split(sep).map(str::to_string).collect(),
        None => Vec::new(),
    }
}

fn normalize(path: &str, parent: &str, root: &str) -> String {
    let rebased = paths::rebase_pardir(&paths::unify_separators(path), parent);
    paths::to_relative(&rebased, root)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_capture_per_line_drops_empties() {
        let text = "\
<Device>STM32F407VGTx</Device>\n\
  <FilePath>..\\Core\\Src\\main.c</FilePath>\n\
  <FilePath></FilePath>\n\
  <FilePath>..\\Core\\Src\\util.cpp</FilePath>\n\
no tags on this line\n";

        assert_eq!(tag_values(text, "Device"), vec!["STM32F407VGTx"]);
        assert_eq!(
            tag_values(text, "FilePath"),
            vec!["..\\Core\\Src\\main.c", "..\\Core\\Src\\util.cpp"]
        );
        assert!(tag_values(text, "TargetName").is_empty());
    }

    #[test]
    fn key_lookup_first_line_wins_and_spaces_go() {
        let text = "# comment\noptimization: -O g\noptimization: -O3\n";
        assert_eq!(key_value(text, "optimization"), Some("-Og".to_string()));
        assert_eq!(key_value(text, "missing"), None);
    }

    #[test]
    fn key_lookup_takes_text_after_last_colon() {
        let text = "build_dir: out:dir\n";
        assert_eq!(key_value(text, "build_dir"), Some("dir".to_string()));
    }

    #[test]
    fn first_split_only_consumes_first_capture() {
        let values = vec!["A,B,C".to_string(), "D,E".to_string()];
        assert_eq!(first_split(&values, ','), vec!["A", "B", "C"]);
        assert!(first_split(&[], ';').is_empty());
    }
}
