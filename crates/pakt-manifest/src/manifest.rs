//! package.json shapes: the emitted manifest and the template it is based on.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Top-level keys that never reach an emitted manifest.
pub const STRIPPED_KEYS: [&str; 1] = ["devDependencies"];

/// The runtime-only manifest written next to the build output.
///
/// There is no `devDependencies` field; template fields of that name are
/// dropped before a manifest is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageManifest {
    pub name: String,
    pub version: String,
    pub main: String,
    /// Package name to version range, sorted by name
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub peer_dependencies: BTreeMap<String, String>,
    /// Other top-level template fields, in template order
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PackageManifest {
    /// Serialize the way npm tooling writes package.json: two-space indent
    /// and a trailing newline.
    pub fn to_json_string(&self) -> Result<String> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }
}

/// A project's own package.json, used as the base of the generated manifest.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestTemplate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub main: Option<String>,
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,
    #[serde(default)]
    pub peer_dependencies: BTreeMap<String, String>,
    #[serde(default)]
    pub dev_dependencies: BTreeMap<String, String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ManifestTemplate {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Malformed(format!("cannot read template {}: {e}", path.display()))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            Error::Malformed(format!("invalid template {}: {e}", path.display()))
        })
    }

    /// Template fields carried into the manifest verbatim.
    pub fn passthrough_fields(&self) -> Map<String, Value> {
        self.extra
            .iter()
            .filter(|(key, _)| !STRIPPED_KEYS.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_template_keeps_unknown_fields_in_order() {
        let template = ManifestTemplate::from_json_str(
            r#"{
                "name": "@acme/api",
                "license": "MIT",
                "type": "commonjs",
                "devDependencies": { "jest": "29.0.0" },
                "engines": { "node": ">=18" }
            }"#,
        )
        .unwrap();

        assert_eq!(template.name.as_deref(), Some("@acme/api"));
        assert_eq!(template.dev_dependencies.len(), 1);
        let keys: Vec<_> = template.passthrough_fields().keys().cloned().collect();
        assert_eq!(keys, vec!["license", "type", "engines"]);
    }

    #[test]
    fn test_passthrough_drops_dev_dependencies_set_in_code() {
        let mut template = ManifestTemplate::default();
        template.extra.insert("devDependencies".into(), json!({ "jest": "29.0.0" }));
        template.extra.insert("license".into(), json!("MIT"));

        let fields = template.passthrough_fields();
        assert!(!fields.contains_key("devDependencies"));
        assert_eq!(fields["license"], "MIT");
    }

    #[test]
    fn test_manifest_serialization() {
        let mut manifest = PackageManifest {
            name: "api".into(),
            version: "1.0.0".into(),
            main: "main.js".into(),
            dependencies: BTreeMap::new(),
            peer_dependencies: BTreeMap::new(),
            extra: Map::new(),
        };
        manifest.dependencies.insert("zod".into(), "3.22.0".into());
        manifest.dependencies.insert("axios".into(), "1.6.0".into());

        let text = manifest.to_json_string().unwrap();
        assert!(text.ends_with("}\n"));
        assert!(text.find("axios").unwrap() < text.find("zod").unwrap());

        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "api",
                "version": "1.0.0",
                "main": "main.js",
                "dependencies": { "axios": "1.6.0", "zod": "3.22.0" }
            })
        );
    }

    #[test]
    fn test_template_from_missing_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = ManifestTemplate::from_path(&dir.path().join("package.json")).unwrap_err();
        assert!(matches!(err, Error::Malformed(_)));
    }
}
