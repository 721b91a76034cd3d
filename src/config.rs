use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::Severity;

/// Maximum config file size (1 MB) - prevents memory exhaustion from malformed files
const MAX_CONFIG_SIZE: u64 = 1024 * 1024;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub rules: HashMap<String, RuleSeverity>,

    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RuleSeverity {
    Deny,
    Warn,
    Allow,
}

impl From<RuleSeverity> for Option<Severity> {
    fn from(rs: RuleSeverity) -> Option<Severity> {
        match rs {
            RuleSeverity::Deny => Some(Severity::Error),
            RuleSeverity::Warn => Some(Severity::Warning),
            RuleSeverity::Allow => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_format")]
    pub format: String,

    #[serde(default = "default_color")]
    pub color: String,
}

fn default_format() -> String {
    "console".to_string()
}

fn default_color() -> String {
    "auto".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            color: default_color(),
        }
    }
}

impl Config {
    /// Load config from renderlint.toml in the given path, or return default.
    ///
    /// If `path` is a file, its parent directory is searched. Rule IDs are
    /// validated later, at catalog construction, where an unknown or
    /// duplicate ID is a hard configuration error.
    ///
    /// # Errors
    ///
    /// Returns an error if the path doesn't exist or if the config file
    /// exists but cannot be parsed.
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            anyhow::bail!("Path does not exist: {}", path.display());
        }

        let dir_path = if path.is_file() {
            path.parent().unwrap_or(path)
        } else {
            path
        };

        let config_path = dir_path.join("renderlint.toml");
        if config_path.exists() {
            // Check file size before reading to prevent memory exhaustion
            let metadata = std::fs::metadata(&config_path)?;
            if metadata.len() > MAX_CONFIG_SIZE {
                anyhow::bail!(
                    "Config file too large ({} bytes, max {} bytes): {}",
                    metadata.len(),
                    MAX_CONFIG_SIZE,
                    config_path.display()
                );
            }

            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Get the effective severity for a rule.
    ///
    /// `None` means the rule is disabled. An explicit `deny`/`warn` entry
    /// overrides whatever severity the rule itself assigned.
    pub fn rule_severity(&self, rule_id: &str, default: Severity) -> Option<Severity> {
        match self.rules.get(rule_id) {
            Some(RuleSeverity::Allow) => None,
            Some(RuleSeverity::Warn) => Some(Severity::Warning),
            Some(RuleSeverity::Deny) => Some(Severity::Error),
            None => Some(default),
        }
    }

    /// True when the config carries an explicit override for this rule.
    pub fn has_override(&self, rule_id: &str) -> bool {
        matches!(
            self.rules.get(rule_id),
            Some(RuleSeverity::Deny) | Some(RuleSeverity::Warn)
        )
    }

    /// Generate default TOML config
    pub fn default_toml() -> &'static str {
        r#"# renderlint configuration
# Docs: https://github.com/renderlint/renderlint

[rules]
# Set rule severity: "deny" (error), "warn" (warning), "allow" (ignore)
# missing-list-key = "deny"
# unmemoized-list-component = "warn"
# unstable-callback = "warn"
# unstable-literal-prop = "allow"

[output]
format = "console"  # "console", "json"
color = "auto"      # "auto", "always", "never"
"#
    }
}
