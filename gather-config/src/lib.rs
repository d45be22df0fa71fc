//! Loader for gather configuration with YAML + environment overlays.
//!
//! Sources are merged in order: optional YAML file, inline YAML snippets,
//! then `GATHER__`-prefixed environment variables (`GATHER__TARGET__URL`,
//! `GATHER__OUTPUT__PATH`, ...). String values may reference other
//! environment variables as `${VAR}`; those are expanded after merging.
//! Every field has a default, so an empty configuration is valid.
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::format::{Item, StrftimeItems};
use config::{Config, ConfigError, Environment, File};
use gather_common::observability::{LogConfig, LogFormat};
use serde::Deserialize;
use serde_json::Value;
use url::Url;

const MAXIMUM_ENV_EXPANSION_DEPTH: usize = 8;

pub const DEFAULT_TARGET_URL: &str = "https://www.meetup.com/find/?location=hk--Hong+Kong";
pub const DEFAULT_WEBDRIVER_URL: &str = "http://localhost:9515";
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) Chrome/91.0.4472.124 Safari/537.36";
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%I:%M %p %Z on %A, %B %-d, %Y";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GatherConfig {
    pub version: Option<String>,
    pub target: TargetConfig,
    pub browser: BrowserConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

/// Which page to load and how long to let it settle before reading it.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TargetConfig {
    pub url: Url,
    pub settle_secs: u64,
}

impl TargetConfig {
    pub fn settle(&self) -> Duration {
        Duration::from_secs(self.settle_secs)
    }
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            url: default_url(DEFAULT_TARGET_URL),
            settle_secs: 10,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// WebDriver endpoint (chromedriver by default).
    pub webdriver_url: Url,
    pub headless: bool,
    pub user_agent: String,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            webdriver_url: default_url(DEFAULT_WEBDRIVER_URL),
            headless: true,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub path: PathBuf,
    /// Write a snapshot even when the page had no event containers at all.
    pub write_empty: bool,
    /// `strftime` pattern for `scraped_at`.
    pub timestamp_format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("events.json"),
            write_empty: false,
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub format: LogFormat,
    pub emit_stderr: bool,
    pub filter: String,
    pub dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Text,
            emit_stderr: true,
            filter: "info".to_string(),
            dir: None,
        }
    }
}

impl LoggingConfig {
    pub fn to_log_config(&self, app_name: &'static str) -> LogConfig {
        LogConfig {
            app_name,
            log_dir: self.dir.clone(),
            emit_stderr: self.emit_stderr,
            format: self.format,
            default_filter: self.filter.clone(),
        }
    }
}

// Only ever called with the constants above.
fn default_url(raw: &str) -> Url {
    Url::parse(raw).expect("built-in URL constants are valid")
}

/// Expand `${VAR}` / `$VAR` in one string, following references up to
/// [`MAXIMUM_ENV_EXPANSION_DEPTH`] hops. Unknown variables stay literal.
fn expand_placeholders(raw: &str) -> String {
    let mut cur = raw.to_string();
    for _ in 0..MAXIMUM_ENV_EXPANSION_DEPTH {
        let Ok(expanded) = shellexpand::env(&cur) else {
            break;
        };
        if expanded == cur {
            break;
        }
        cur = expanded.into_owned();
    }
    cur
}

/// Apply [`expand_placeholders`] to every string in the merged config tree.
fn expand_env_in_value(v: &mut Value) {
    match v {
        Value::String(s) if s.contains('$') => *s = expand_placeholders(s),
        Value::Array(arr) => arr.iter_mut().for_each(expand_env_in_value),
        Value::Object(obj) => obj.values_mut().for_each(expand_env_in_value),
        _ => {}
    }
}

fn validate(cfg: &GatherConfig) -> Result<(), ConfigError> {
    let scheme = cfg.target.url.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(ConfigError::Message(format!(
            "target.url must be http(s), got `{scheme}`"
        )));
    }
    if cfg.output.timestamp_format.trim().is_empty() {
        return Err(ConfigError::Message(
            "output.timestamp_format must not be empty".into(),
        ));
    }
    if StrftimeItems::new(&cfg.output.timestamp_format).any(|item| matches!(item, Item::Error)) {
        return Err(ConfigError::Message(format!(
            "output.timestamp_format `{}` is not a valid strftime pattern",
            cfg.output.timestamp_format
        )));
    }
    Ok(())
}

/// Builder hides the `config` crate wiring (YAML + env overrides).
pub struct GatherConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
}

impl Default for GatherConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl GatherConfigLoader {
    /// Start with no files; only `GATHER__` env overrides are attached.
    ///
    /// ```
    /// use gather_config::GatherConfigLoader;
    ///
    /// let config = GatherConfigLoader::new()
    ///     .with_yaml_str("version: '1'")
    ///     .load()
    ///     .expect("valid config");
    ///
    /// assert_eq!(config.version.as_deref(), Some("1"));
    /// assert_eq!(config.target.settle_secs, 10);
    /// assert_eq!(config.output.path.to_str(), Some("events.json"));
    /// ```
    pub fn new() -> Self {
        Self {
            builder: Config::builder(),
        }
    }

    /// Attach a YAML/TOML/JSON file that must exist; format is inferred by suffix.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(true));
        self
    }

    /// Attach a file that is silently skipped when missing.
    pub fn with_optional_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(false));
        self
    }

    /// Merge an inline YAML snippet.
    ///
    /// ```
    /// use gather_config::GatherConfigLoader;
    ///
    /// let cfg = GatherConfigLoader::new()
    ///     .with_yaml_str(
    ///         r#"
    /// target:
    ///   url: "https://example.com/events"
    ///   settle_secs: 3
    /// browser:
    ///   headless: false
    /// "#,
    ///     )
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(cfg.target.url.as_str(), "https://example.com/events");
    /// assert_eq!(cfg.target.settle_secs, 3);
    /// assert!(!cfg.browser.headless);
    /// assert_eq!(cfg.browser.webdriver_url.as_str(), "http://localhost:9515/");
    /// ```
    pub fn with_yaml_str(mut self, yaml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(yaml, config::FileFormat::Yaml));
        self
    }

    /// Consume the builder and deserialize the merged sources.
    ///
    /// Environment variables are layered last so they win over files, then
    /// `${VAR}` placeholders are expanded and the result is validated.
    ///
    /// ```
    /// use gather_config::GatherConfigLoader;
    ///
    /// unsafe { std::env::set_var("GATHER_DOC_OUT_DIR", "/tmp/snapshots"); }
    ///
    /// let config = GatherConfigLoader::new()
    ///     .with_yaml_str(r#"
    /// output:
    ///   path: "${GATHER_DOC_OUT_DIR}/events.json"
    /// "#)
    ///     .load()
    ///     .expect("valid configuration");
    ///
    /// assert_eq!(config.output.path.to_str(), Some("/tmp/snapshots/events.json"));
    ///
    /// unsafe { std::env::remove_var("GATHER_DOC_OUT_DIR"); }
    /// ```
    pub fn load(self) -> Result<GatherConfig, ConfigError> {
        let cfg = self
            .builder
            .add_source(
                Environment::with_prefix("GATHER")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut v: Value = cfg.try_deserialize()?;
        expand_env_in_value(&mut v);

        let typed: GatherConfig =
            serde_json::from_value(v).map_err(|e| ConfigError::Message(e.to_string()))?;
        validate(&typed)?;

        Ok(typed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn expands_output_path_and_target_url() {
        temp_env::with_vars(
            [
                ("GATHER_T_OUT", Some("/srv/gather")),
                ("GATHER_T_CITY", Some("hk--Hong+Kong")),
            ],
            || {
                let cfg = GatherConfigLoader::new()
                    .with_yaml_str(
                        r#"
target:
  url: "https://www.meetup.com/find/?location=${GATHER_T_CITY}"
output:
  path: "${GATHER_T_OUT}/events.json"
"#,
                    )
                    .load()
                    .unwrap();
                assert_eq!(cfg.target.url.as_str(), DEFAULT_TARGET_URL);
                assert_eq!(cfg.output.path, PathBuf::from("/srv/gather/events.json"));
            },
        );
    }

    #[test]
    fn user_agent_follows_chained_variables() {
        temp_env::with_vars(
            [
                ("GATHER_T_CHROME", Some("Chrome/124.0")),
                ("GATHER_T_UA", Some("Mozilla/5.0 gather ${GATHER_T_CHROME}")),
            ],
            || {
                assert_eq!(
                    expand_placeholders("${GATHER_T_UA}"),
                    "Mozilla/5.0 gather Chrome/124.0"
                );
            },
        );
    }

    #[test]
    fn cyclic_log_dir_terminates() {
        temp_env::with_vars(
            [
                ("GATHER_T_A", Some("${GATHER_T_B}")),
                ("GATHER_T_B", Some("${GATHER_T_A}")),
            ],
            || {
                let out = expand_placeholders("/var/log/${GATHER_T_A}/gather");
                assert!(out.starts_with("/var/log/") && out.ends_with("/gather"));
                assert!(out.contains("${"));
            },
        );
    }

    #[test]
    fn unset_variable_stays_in_output_path() {
        let cfg = GatherConfigLoader::new()
            .with_yaml_str("output:\n  path: \"${GATHER_T_NEVER_SET}/events.json\"\n")
            .load()
            .unwrap();
        assert_eq!(
            cfg.output.path,
            PathBuf::from("${GATHER_T_NEVER_SET}/events.json")
        );
    }

    #[test]
    fn only_strings_are_rewritten() {
        temp_env::with_var("GATHER_T_SECS", Some("30"), || {
            let mut v = json!({
                "target": { "settle_secs": 5, "url": "https://example.com/$GATHER_T_SECS" },
                "browser": { "headless": true },
                "logging": { "dir": null }
            });
            expand_env_in_value(&mut v);
            assert_eq!(
                v,
                json!({
                    "target": { "settle_secs": 5, "url": "https://example.com/30" },
                    "browser": { "headless": true },
                    "logging": { "dir": null }
                })
            );
        });
    }

    #[test]
    fn defaults_match_the_hong_kong_listing() {
        let cfg = GatherConfig::default();
        assert_eq!(cfg.target.url.as_str(), DEFAULT_TARGET_URL);
        assert_eq!(cfg.target.settle(), Duration::from_secs(10));
        assert!(cfg.browser.headless);
        assert!(!cfg.output.write_empty);
        assert!(validate(&cfg).is_ok());
    }

    #[test]
    fn rejects_non_http_targets() {
        let mut cfg = GatherConfig::default();
        cfg.target.url = Url::parse("file:///tmp/page.html").unwrap();
        assert!(validate(&cfg).is_err());
    }

    #[test]
    fn rejects_broken_timestamp_patterns() {
        let mut cfg = GatherConfig::default();
        cfg.output.timestamp_format = "%Q nonsense".into();
        assert!(validate(&cfg).is_err());
    }
}
