//! Configuration resolution with a fixed candidate chain
//!
//! Precedence (first hit wins):
//! 1. Explicit path passed on the command line
//! 2. Install-relative: `<exe_dir>/km_config.json`
//! 3. User dotfile: `~/.km_config.json`
//! 4. Install-relative alternate: `<exe_dir>/config/km_config.json`
//! 5. Freshly materialized default file at location 2
//! 6. Compiled defaults (when the default file cannot be persisted)
//!
//! All failures degrade: a malformed or unpersistable configuration emits a
//! warning and the chain continues, it never aborts the run.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::errors::TemplateError;

/// Canonical config file name, relative to the install directory.
pub const CONFIG_FILE_NAME: &str = "km_config.json";

/// User-home dotfile candidate.
pub const DOTFILE_NAME: &str = ".km_config.json";

/// Section layout for generated documents.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TemplateStructure {
    /// Prefix prepended to the root node title
    pub root_prefix: String,
    /// Top-level section titles, in document order
    pub default_children: Vec<String>,
}

impl Default for TemplateStructure {
    fn default() -> Self {
        Self {
            root_prefix: "依頼：".into(),
            default_children: vec![
                "コンテキスト：".into(),
                "詳細指示".into(),
                "出力形式".into(),
                "補足".into(),
            ],
        }
    }
}

/// Resolved settings for one invocation.
///
/// Loaded once, immutable afterwards, passed by reference to the tree
/// builder and path resolver. Never shared across invocations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub version: String,
    pub install_path: PathBuf,
    /// Root of the date-partitioned output tree
    pub flow_base_path: PathBuf,
    pub default_theme: String,
    pub auto_open_editor: bool,
    /// Editor commands to try, highest priority first
    pub editor_priority: Vec<String>,
    pub template_structure: TemplateStructure,
    /// Raw configuration document, kept for dotted-key lookups
    #[serde(skip)]
    pub raw: Value,
}

impl Default for Settings {
    fn default() -> Self {
        let flow_base_path = directories::BaseDirs::new()
            .map(|dirs| dirs.home_dir().join("aipm_v3").join("Flow"))
            .unwrap_or_else(|| PathBuf::from("~/aipm_v3/Flow"));

        let mut settings = Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            install_path: default_install_dir(),
            flow_base_path,
            default_theme: "fresh-blue".into(),
            auto_open_editor: true,
            editor_priority: vec!["code".into(), "cursor".into(), "subl".into()],
            template_structure: TemplateStructure::default(),
            raw: Value::Null,
        };
        settings.raw = serde_json::to_value(&settings).unwrap_or(Value::Null);
        settings
    }
}

/// Directory of the running executable, falling back to the cwd.
pub fn default_install_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Location where a default config file is materialized on first run.
pub fn canonical_config_path() -> PathBuf {
    default_install_dir().join(CONFIG_FILE_NAME)
}

/// Fixed candidate file locations, highest priority first.
pub fn candidate_paths() -> Vec<PathBuf> {
    let install = default_install_dir();
    let mut candidates = vec![install.join(CONFIG_FILE_NAME)];
    if let Some(dirs) = directories::BaseDirs::new() {
        candidates.push(dirs.home_dir().join(DOTFILE_NAME));
    }
    candidates.push(install.join("config").join(CONFIG_FILE_NAME));
    candidates
}

/// Expand `~`, `$VAR` and `${VAR}` in a path-like string.
/// Undefined variables leave the input untouched.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|expanded| expanded.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

/// Descend a dotted key path (`"a.b.c"`) through a JSON document.
/// Returns `None` if any segment is absent or an intermediate value is not
/// an object.
pub fn lookup<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    let (head, rest) = match path.split_once('.') {
        Some((head, rest)) => (head, Some(rest)),
        None => (path, None),
    };
    let child = root.as_object()?.get(head)?;
    match rest {
        Some(rest) => lookup(child, rest),
        None => Some(child),
    }
}

impl Settings {
    /// Resolve settings for this invocation.
    ///
    /// Never fails: every broken link in the chain is reported as a warning
    /// and resolution continues with the next fallback.
    pub fn resolve(explicit: Option<&Path>) -> Self {
        Self::resolve_from(explicit, &candidate_paths(), &canonical_config_path())
    }

    /// Resolution against an explicit candidate chain. `canonical` is where
    /// the default file is written when no candidate exists.
    pub fn resolve_from(explicit: Option<&Path>, candidates: &[PathBuf], canonical: &Path) -> Self {
        if let Some(path) = explicit {
            match Self::load_file(path) {
                Ok(settings) => {
                    debug!("configuration loaded from explicit path {}", path.display());
                    return settings;
                }
                // Malformed or unreadable explicit config falls through to
                // the candidate chain.
                Err(e) => warn!("{e}"),
            }
        }

        if let Some(path) = candidates.iter().find(|candidate| candidate.exists()) {
            return match Self::load_file(path) {
                Ok(settings) => {
                    debug!("configuration loaded from {}", path.display());
                    settings
                }
                Err(e) => {
                    warn!("{e}, using built-in defaults");
                    Self::default()
                }
            };
        }

        match Self::persist_default(canonical) {
            Ok(settings) => {
                debug!("default configuration written to {}", canonical.display());
                settings
            }
            Err(e) => {
                warn!("{e}, using built-in defaults");
                Self::default()
            }
        }
    }

    /// Look up a dotted key path in the raw configuration document,
    /// returning `default` when the value is missing or not deserializable
    /// as `T`.
    pub fn get_or<T: serde::de::DeserializeOwned>(&self, path: &str, default: T) -> T {
        lookup(&self.raw, path)
            .and_then(|value| serde_json::from_value(value.clone()).ok())
            .unwrap_or(default)
    }

    fn load_file(path: &Path) -> Result<Self, TemplateError> {
        let content = fs::read_to_string(path).map_err(|e| TemplateError::ConfigLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_json(&content).map_err(|e| TemplateError::ConfigLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(content)?;
        let mut settings: Settings = serde_json::from_value(value.clone())?;
        settings.raw = value;
        settings.expand_paths();
        Ok(settings)
    }

    /// Write the compiled defaults to `path` and return them.
    fn persist_default(path: &Path) -> Result<Self, TemplateError> {
        let settings = Self::default();
        let persist_err = |reason: String| TemplateError::ConfigPersist {
            path: path.to_path_buf(),
            reason,
        };

        let mut body =
            serde_json::to_string_pretty(&settings).map_err(|e| persist_err(e.to_string()))?;
        body.push('\n');

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| persist_err(e.to_string()))?;
        }
        fs::write(path, body).map_err(|e| persist_err(e.to_string()))?;
        Ok(settings)
    }

    /// Expand shell variables and tilde in path-like fields.
    fn expand_paths(&mut self) {
        let expanded = expand_env_vars(self.flow_base_path.to_string_lossy().as_ref());
        self.flow_base_path = PathBuf::from(expanded);

        let expanded = expand_env_vars(self.install_path.to_string_lossy().as_ref());
        self.install_path = PathBuf::from(expanded);
    }
}
