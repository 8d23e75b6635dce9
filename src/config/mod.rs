pub mod schema;

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde_yml::Value;

use crate::cop::CopConfig;
use crate::diagnostic::Severity;

/// Keys with framework-level meaning inside a cop section; everything else
/// lands in `CopConfig::options` for the cop itself.
const RESERVED_KEYS: &[&str] = &["Enabled", "Severity", "Exclude", "Include"];

/// Resolved configuration from .playcop.yml.
#[derive(Debug)]
pub struct ResolvedConfig {
    /// Per-cop configs keyed by cop name (e.g. "Playwright/NoSkippedTest")
    cop_configs: HashMap<String, CopConfig>,
    global_excludes: Vec<String>,
}

impl ResolvedConfig {
    fn empty() -> Self {
        Self {
            cop_configs: HashMap::new(),
            global_excludes: Vec::new(),
        }
    }

    /// Check if a cop is enabled.
    pub fn is_cop_enabled(&self, name: &str) -> bool {
        match self.cop_configs.get(name) {
            Some(config) => config.enabled,
            None => true, // enabled by default
        }
    }

    /// Get the resolved config for a specific cop.
    pub fn cop_config(&self, name: &str) -> CopConfig {
        self.cop_configs.get(name).cloned().unwrap_or_default()
    }

    /// Global exclude patterns from AllCops.Exclude.
    pub fn global_excludes(&self) -> &[String] {
        &self.global_excludes
    }

    /// All per-cop sections present in the config file.
    pub fn cop_sections(&self) -> impl Iterator<Item = (&str, &CopConfig)> {
        self.cop_configs.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Load config from the given path, or look for `.playcop.yml` in the
/// current directory. Returns an empty config if the file doesn't exist.
pub fn load_config(path: Option<&Path>) -> Result<ResolvedConfig> {
    let config_path = match path {
        Some(p) => p.to_path_buf(),
        None => Path::new(".playcop.yml").to_path_buf(),
    };

    if !config_path.exists() {
        return Ok(ResolvedConfig::empty());
    }

    let contents = std::fs::read_to_string(&config_path)
        .with_context(|| format!("failed to read config {}", config_path.display()))?;
    parse_config(&contents)
}

fn parse_config(contents: &str) -> Result<ResolvedConfig> {
    let raw: Value = serde_yml::from_str(contents).context("failed to parse .playcop.yml")?;

    let mut cop_configs = HashMap::new();
    let mut global_excludes = Vec::new();

    if let Value::Mapping(map) = &raw {
        for (key, value) in map {
            let key_str = match key.as_str() {
                Some(s) => s,
                None => continue,
            };

            if key_str == "AllCops" {
                if let Some(excludes) = extract_string_list(value, "Exclude") {
                    global_excludes = excludes;
                }
                continue;
            }

            // Cop names contain "/" (e.g. "Playwright/NoSkippedTest")
            if key_str.contains('/') {
                cop_configs.insert(key_str.to_string(), parse_cop_config(value));
            }
        }
    }

    Ok(ResolvedConfig {
        cop_configs,
        global_excludes,
    })
}

fn parse_cop_config(value: &Value) -> CopConfig {
    let mut config = CopConfig::default();

    let Value::Mapping(map) = value else {
        return config;
    };

    for (key, val) in map {
        let Some(key_str) = key.as_str() else {
            continue;
        };
        match key_str {
            "Enabled" => {
                if let Some(b) = val.as_bool() {
                    config.enabled = b;
                }
            }
            "Severity" => {
                config.severity = val.as_str().and_then(Severity::from_str);
            }
            "Exclude" => {
                if let Some(list) = string_list(val) {
                    config.exclude = list;
                }
            }
            "Include" => {
                if let Some(list) = string_list(val) {
                    config.include = list;
                }
            }
            _ => {
                config.options.insert(key_str.to_string(), val.clone());
            }
        }
    }

    config
}

fn extract_string_list(value: &Value, key: &str) -> Option<Vec<String>> {
    if let Value::Mapping(map) = value {
        for (k, v) in map {
            if k.as_str() == Some(key) {
                return string_list(v);
            }
        }
    }
    None
}

fn string_list(value: &Value) -> Option<Vec<String>> {
    let Value::Sequence(seq) = value else {
        return None;
    };
    Some(
        seq.iter()
            .filter_map(|v| v.as_str().map(|s| s.to_string()))
            .collect(),
    )
}
