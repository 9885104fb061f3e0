//! Parser for project includes in `settings.gradle` / `settings.gradle.kts`.
//!
//! Regex-based extraction of `include` statements, both Groovy
//! (`include ':a', ':b'`) and Kotlin (`include(":a", ":b")`) forms.
//! Custom `projectDir` assignments are not evaluated; every project is
//! assumed to live in the directory named after its path.

use regex::Regex;
use std::path::PathBuf;
use std::sync::OnceLock;

/// File names checked for project includes, in order.
pub const SETTINGS_FILES: &[&str] = &["settings.gradle.kts", "settings.gradle"];

/// Matches: include ( ... or include ... (rest of line)
static RE_INCLUDE: OnceLock<Regex> = OnceLock::new();
/// Matches: 'path' or "path"
static RE_QUOTED: OnceLock<Regex> = OnceLock::new();

fn re_include() -> &'static Regex {
    RE_INCLUDE.get_or_init(|| Regex::new(r"^\s*include\b\s*(\()?(.*)$").unwrap())
}

fn re_quoted() -> &'static Regex {
    RE_QUOTED.get_or_init(|| Regex::new(r#"['"]([^'"]+)['"]"#).unwrap())
}

fn strip_line_comment(line: &str) -> &str {
    match line.find("//") {
        Some(idx) => &line[..idx],
        None => line,
    }
}

/// Returns the included project paths, normalized to start with `:`.
///
/// An `include` may span several lines: a parenthesized call runs to its
/// closing `)`, a Groovy argument list continues while a line ends with `,`.
/// Duplicates are dropped, first occurrence order is kept.
pub fn parse_settings_includes(content: &str) -> Vec<String> {
    let mut projects: Vec<String> = Vec::new();
    let mut lines = content.lines().map(strip_line_comment);

    while let Some(code) = lines.next() {
        let Some(caps) = re_include().captures(code) else {
            continue;
        };
        let parenthesized = caps.get(1).is_some();
        let mut args = caps.get(2).map_or("", |m| m.as_str()).to_string();

        if parenthesized {
            while !args.contains(')') {
                let Some(next) = lines.next() else { break };
                args.push('\n');
                args.push_str(next);
            }
            if let Some(end) = args.find(')') {
                args.truncate(end);
            }
        } else {
            while args.trim_end().ends_with(',') {
                let Some(next) = lines.next() else { break };
                args.push('\n');
                args.push_str(next);
            }
        }

        for quoted in re_quoted().captures_iter(&args) {
            let raw = quoted.get(1).map_or("", |m| m.as_str()).trim();
            if raw.is_empty() || raw == ":" {
                continue;
            }
            let path = if raw.starts_with(':') {
                raw.to_string()
            } else {
                format!(":{raw}")
            };
            if !projects.contains(&path) {
                projects.push(path);
            }
        }
    }

    projects
}

/// Maps a project path to its directory relative to the build root.
///
/// `:` is the root itself, `:core:impl` is `core/impl`.
pub fn project_dir(project_path: &str) -> PathBuf {
    project_path
        .split(':')
        .filter(|segment| !segment.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_groovy_includes() {
        let content = "rootProject.name = 'platform'\n\ninclude ':api', ':core:impl'\ninclude 'app'\n";
        assert_eq!(
            parse_settings_includes(content),
            vec![":api", ":core:impl", ":app"]
        );
    }

    #[test]
    fn test_kotlin_includes() {
        let content = "rootProject.name = \"platform\"\ninclude(\":api\", \":cli\")\ninclude(\"web\")\n";
        assert_eq!(parse_settings_includes(content), vec![":api", ":cli", ":web"]);
    }

    #[test]
    fn test_kotlin_multiline_include() {
        let content = "include(\n    \":api\",\n    \":server\", // HTTP entry point\n)\ninclude(\":cli\")\n";
        assert_eq!(parse_settings_includes(content), vec![":api", ":server", ":cli"]);
    }

    #[test]
    fn test_groovy_continuation_include() {
        let content = "include ':api',\n        ':server',\n        ':tools:codegen'\nrootProject.name = 'platform'\n";
        assert_eq!(
            parse_settings_includes(content),
            vec![":api", ":server", ":tools:codegen"]
        );
    }

    #[test]
    fn test_include_call_stops_at_closing_paren() {
        let content = "include(':api') ; println('not-a-project')\n";
        assert_eq!(parse_settings_includes(content), vec![":api"]);
    }

    #[test]
    fn test_commented_include_ignored() {
        let content = "// include ':legacy'\ninclude ':api' // ':not-this'\n";
        assert_eq!(parse_settings_includes(content), vec![":api"]);
    }

    #[test]
    fn test_duplicates_dropped() {
        let content = "include ':api'\ninclude(':api')\n";
        assert_eq!(parse_settings_includes(content), vec![":api"]);
    }

    #[test]
    fn test_include_build_not_matched() {
        let content = "includeBuild '../other'\n";
        assert!(parse_settings_includes(content).is_empty());
    }

    #[test]
    fn test_project_dir() {
        assert_eq!(project_dir(":"), PathBuf::new());
        assert_eq!(project_dir(":api"), Path::new("api"));
        assert_eq!(project_dir(":core:impl"), Path::new("core").join("impl"));
    }
}
