//! Maven BOM parsing.
//!
//! Uses quick-xml SAX reader to extract `<dependencyManagement>` entries
//! from a BOM pom. `${...}` placeholders are resolved from `<properties>`
//! and the project (or parent) version. Nested BOM imports
//! (`<scope>import</scope>`) are not followed.

use crate::error::{GradleError, Result};
use pinlint_core::{PinError, RecommendationProvider, Recommendations};
use quick_xml::Reader;
use quick_xml::events::Event;
use regex::Regex;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::OnceLock;

/// Matches: ${property.name}
static RE_PLACEHOLDER: OnceLock<Regex> = OnceLock::new();

fn re_placeholder() -> &'static Regex {
    RE_PLACEHOLDER.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").unwrap())
}

const PLACEHOLDER_PASSES: usize = 8;

/// Accumulator for a single managed dependency being parsed.
#[derive(Default)]
struct ManagedAccum {
    group_id: Option<String>,
    artifact_id: Option<String>,
    version: Option<String>,
    scope: Option<String>,
}

/// Element paths the parser cares about, relative to `<project>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    ProjectVersion,
    ProjectGroupId,
    ParentVersion,
    Property,
    Managed,
    ManagedField,
    Other,
}

fn classify(path: &[String]) -> Slot {
    let names: Vec<&str> = path.iter().map(String::as_str).collect();
    match names.as_slice() {
        ["project", "version"] => Slot::ProjectVersion,
        ["project", "groupId"] => Slot::ProjectGroupId,
        ["project", "parent", "version"] => Slot::ParentVersion,
        ["project", "properties", _] => Slot::Property,
        ["project", "dependencyManagement", "dependencies", "dependency"] => Slot::Managed,
        ["project", "dependencyManagement", "dependencies", "dependency", _] => Slot::ManagedField,
        _ => Slot::Other,
    }
}

/// Parses a BOM pom into `group:name -> version` recommendations.
///
/// Entries whose version is missing or references an unknown property are
/// skipped.
///
/// # Errors
///
/// Returns `GradleError::InvalidBom` if the XML is malformed.
pub fn parse_bom(content: &str, file: &str) -> Result<Recommendations> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut path: Vec<String> = Vec::new();
    let mut properties: HashMap<String, String> = HashMap::new();
    let mut managed: Vec<ManagedAccum> = Vec::new();
    let mut current: Option<ManagedAccum> = None;
    let mut project_version: Option<String> = None;
    let mut parent_version: Option<String> = None;

    loop {
        let event = reader.read_event().map_err(|e| GradleError::InvalidBom {
            file: file.to_string(),
            message: e.to_string(),
        })?;

        match event {
            Event::Start(ref e) => {
                let tag = String::from_utf8_lossy(e.local_name().as_ref()).to_string();
                path.push(tag);
                if classify(&path) == Slot::Managed {
                    current = Some(ManagedAccum::default());
                }
            }
            Event::Text(ref e) => {
                let text = match e.decode() {
                    Ok(cow) => {
                        let s = cow.trim().to_string();
                        quick_xml::escape::unescape(&s)
                            .map(|c| c.into_owned())
                            .unwrap_or(s)
                    }
                    Err(_) => String::from_utf8_lossy(e.as_ref()).trim().to_string(),
                };

                match classify(&path) {
                    Slot::ProjectVersion => project_version = Some(text),
                    Slot::ParentVersion => parent_version = Some(text),
                    Slot::ProjectGroupId => {
                        properties.insert("project.groupId".to_string(), text);
                    }
                    Slot::Property => {
                        if let Some(key) = path.last() {
                            properties.insert(key.clone(), text);
                        }
                    }
                    Slot::ManagedField => {
                        if let (Some(field), Some(dep)) = (path.last(), current.as_mut()) {
                            match field.as_str() {
                                "groupId" => dep.group_id = Some(text),
                                "artifactId" => dep.artifact_id = Some(text),
                                "version" => dep.version = Some(text),
                                "scope" => dep.scope = Some(text),
                                _ => {}
                            }
                        }
                    }
                    Slot::Managed | Slot::Other => {}
                }
            }
            Event::End(_) => {
                if classify(&path) == Slot::Managed
                    && let Some(dep) = current.take()
                {
                    managed.push(dep);
                }
                path.pop();
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(version) = project_version.or(parent_version) {
        properties.insert("project.version".to_string(), version.clone());
        properties.insert("version".to_string(), version);
    }

    let mut recommendations = Recommendations::new();
    for dep in managed {
        if let Some((artifact, version)) = finalize_managed(dep, &properties, file) {
            recommendations.entry(artifact).or_insert(version);
        }
    }

    tracing::debug!("Parsed BOM {}: {} recommendations", file, recommendations.len());
    Ok(recommendations)
}

fn finalize_managed(
    dep: ManagedAccum,
    properties: &HashMap<String, String>,
    file: &str,
) -> Option<(String, String)> {
    let group_id = resolve_placeholders(&dep.group_id?, properties)?;
    let artifact_id = resolve_placeholders(&dep.artifact_id?, properties)?;
    let artifact = format!("{group_id}:{artifact_id}");

    if dep.scope.as_deref() == Some("import") {
        tracing::debug!("{}: not following nested BOM import {}", file, artifact);
        return None;
    }

    let Some(raw_version) = dep.version else {
        tracing::debug!("{}: {} has no version", file, artifact);
        return None;
    };

    match resolve_placeholders(&raw_version, properties) {
        Some(version) => Some((artifact, version)),
        None => {
            tracing::debug!("{}: unresolved version '{}' for {}", file, raw_version, artifact);
            None
        }
    }
}

/// Substitutes `${name}` placeholders, following property chains.
///
/// Returns `None` if a placeholder cannot be resolved.
fn resolve_placeholders(value: &str, properties: &HashMap<String, String>) -> Option<String> {
    let mut current = value.to_string();

    for _ in 0..PLACEHOLDER_PASSES {
        if !current.contains("${") {
            return Some(current);
        }

        let mut missing = false;
        let replaced = re_placeholder().replace_all(&current, |caps: &regex::Captures<'_>| {
            let key = caps.get(1).map_or("", |m| m.as_str());
            match properties.get(key) {
                Some(v) => v.clone(),
                None => {
                    missing = true;
                    String::new()
                }
            }
        });

        if missing {
            return None;
        }
        current = replaced.into_owned();
    }

    (!current.contains("${")).then_some(current)
}

/// A BOM pom on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PomBom {
    pub path: PathBuf,
}

impl PomBom {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RecommendationProvider for PomBom {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    fn recommendations(&self) -> pinlint_core::Result<Recommendations> {
        let content =
            std::fs::read_to_string(&self.path).map_err(|e| PinError::Recommendation {
                source_name: self.name(),
                message: e.to_string(),
            })?;

        Ok(parse_bom(&content, &self.name())?)
    }
}
