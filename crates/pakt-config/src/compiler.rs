//! TypeScript compiler settings (tsconfig.json).
//!
//! Only `compilerOptions` matter for manifest synthesis. Files are read the
//! way `tsc` reads them: comments and trailing commas are allowed, and
//! `extends` chains are followed with child options overriding the parent.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use path_clean::PathClean;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{ConfigError, Result};

/// Guards against pathological `extends` chains.
const MAX_EXTENDS_DEPTH: usize = 32;

/// Resolved `compilerOptions` of a tsconfig and its `extends` chain.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompilerSettings {
    /// File the settings were loaded from
    pub path: PathBuf,
    /// Merged `compilerOptions`
    pub compiler_options: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTsConfig {
    #[serde(default)]
    extends: Option<Extends>,
    #[serde(default)]
    compiler_options: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Extends {
    One(String),
    Many(Vec<String>),
}

impl Extends {
    fn into_vec(self) -> Vec<String> {
        match self {
            Extends::One(specifier) => vec![specifier],
            Extends::Many(specifiers) => specifiers,
        }
    }
}

impl CompilerSettings {
    /// Settings with the given `compilerOptions`, for hosts that already
    /// parsed their compiler configuration.
    pub fn from_options(compiler_options: Map<String, Value>) -> Self {
        Self {
            path: PathBuf::new(),
            compiler_options,
        }
    }

    /// Read `path` and every config it extends.
    pub fn load(path: &Path) -> Result<Self> {
        let path = path.to_path_buf().clean();
        let mut visiting = HashSet::new();
        let compiler_options = load_options(&path, &mut visiting, 0)?;
        debug!(
            path = %path.display(),
            options = compiler_options.len(),
            "loaded compiler settings"
        );
        Ok(Self {
            path,
            compiler_options,
        })
    }

    /// Whether `tsc` emits `tslib` imports instead of inline helpers.
    pub fn import_helpers(&self) -> bool {
        self.bool_option("importHelpers").unwrap_or(false)
    }

    /// A boolean compiler option, if set to a boolean.
    pub fn bool_option(&self, name: &str) -> Option<bool> {
        self.compiler_options.get(name).and_then(Value::as_bool)
    }

    pub fn option(&self, name: &str) -> Option<&Value> {
        self.compiler_options.get(name)
    }
}

fn load_options(
    path: &Path,
    visiting: &mut HashSet<PathBuf>,
    depth: usize,
) -> Result<Map<String, Value>> {
    if depth > MAX_EXTENDS_DEPTH || !visiting.insert(path.to_path_buf()) {
        return Err(ConfigError::ExtendsCycle(path.to_path_buf()));
    }

    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    // tsc accepts a leading byte order mark.
    let content = content.trim_start_matches('\u{feff}');
    let raw: RawTsConfig = serde_json::from_str(&strip_jsonc(content)).map_err(|e| {
        ConfigError::InvalidCompilerSettings {
            path: path.to_path_buf(),
            message: e.to_string(),
        }
    })?;

    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut merged = Map::new();
    for specifier in raw.extends.map(Extends::into_vec).unwrap_or_default() {
        let parent = resolve_extends(&specifier, base_dir)?;
        for (key, value) in load_options(&parent, visiting, depth + 1)? {
            merged.insert(key, value);
        }
    }
    for (key, value) in raw.compiler_options {
        merged.insert(key, value);
    }

    visiting.remove(path);
    Ok(merged)
}

/// Resolve an `extends` specifier relative to the extending file's directory.
///
/// Relative and absolute paths are taken as-is (with `.json` appended when
/// missing); bare specifiers are looked up in `node_modules` directories from
/// `base_dir` upwards.
fn resolve_extends(specifier: &str, base_dir: &Path) -> Result<PathBuf> {
    let not_found = || ConfigError::ExtendsNotFound {
        specifier: specifier.to_string(),
        from: base_dir.to_path_buf(),
    };

    let is_path = specifier.starts_with("./")
        || specifier.starts_with("../")
        || Path::new(specifier).is_absolute();

    if is_path {
        let candidate = base_dir.join(specifier).clean();
        return with_json_fallback(&candidate).ok_or_else(not_found);
    }

    for dir in base_dir.ancestors() {
        let candidate = dir.join("node_modules").join(specifier);
        if let Some(found) = with_json_fallback(&candidate) {
            return Ok(found);
        }
        let nested = candidate.join("tsconfig.json");
        if nested.is_file() {
            return Ok(nested);
        }
    }

    Err(not_found())
}

fn with_json_fallback(candidate: &Path) -> Option<PathBuf> {
    if candidate.is_file() {
        return Some(candidate.to_path_buf());
    }
    let mut with_ext = candidate.as_os_str().to_owned();
    with_ext.push(".json");
    let with_ext = PathBuf::from(with_ext);
    with_ext.is_file().then_some(with_ext)
}

/// Strip `//` and `/* */` comments and trailing commas from JSON text.
///
/// String literals are copied verbatim, including escaped quotes.
pub fn strip_jsonc(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut in_string = false;

    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            match c {
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                }
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match c {
            '"' => {
                in_string = true;
                out.push(c);
            }
            '/' if chars.peek() == Some(&'/') => {
                for next in chars.by_ref() {
                    if next == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut prev = '\0';
                for next in chars.by_ref() {
                    if prev == '*' && next == '/' {
                        break;
                    }
                    if next == '\n' {
                        out.push('\n');
                    }
                    prev = next;
                }
            }
            _ => out.push(c),
        }
    }

    remove_trailing_commas(&out)
}

fn remove_trailing_commas(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len());
    let mut in_string = false;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if in_string {
            out.push(c);
            if c == '\\' && i + 1 < chars.len() {
                out.push(chars[i + 1]);
                i += 2;
                continue;
            }
            if c == '"' {
                in_string = false;
            }
            i += 1;
            continue;
        }

        if c == '"' {
            in_string = true;
        } else if c == ',' {
            let next = chars[i + 1..].iter().find(|ch| !ch.is_whitespace());
            if matches!(next, Some('}') | Some(']')) {
                i += 1;
                continue;
            }
        }
        out.push(c);
        i += 1;
    }

    out
}
