use std::collections::BTreeMap;
use std::path::PathBuf;

/// Prefix of the env vars that populate [`RegistrarConfig::domains`].
pub const DOMAIN_VAR_PREFIX: &str = "ROUTE_DOMAIN_";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be {expected}, got `{value}`")]
    Invalid {
        var: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Registrar configuration loaded from environment variables.
///
/// All fields have defaults suitable for registering every controller in
/// the catalog without scanning the file system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrarConfig {
    /// When `false`, no routes are registered at all.
    pub enabled: bool,
    /// Directories to scan. Empty means "register the whole catalog".
    pub directories: Vec<PathBuf>,
    /// Stripped from scanned file paths before mapping them to modules.
    pub base_path: PathBuf,
    /// Module path prepended to every scanned file's module path.
    pub root_namespace: String,
    /// Extension of the source files considered during a scan.
    pub extension: String,
    /// Middleware prepended to every registered route.
    pub middleware: Vec<String>,
    /// Scoped bindings for controllers that do not say either way.
    pub scope_bindings: bool,
    /// Domains addressable from `DomainFromConfig`, keyed by lowercase name.
    pub domains: BTreeMap<String, String>,
}

impl Default for RegistrarConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            directories: Vec::new(),
            base_path: PathBuf::from("src"),
            root_namespace: "crate".to_string(),
            extension: "rs".to_string(),
            middleware: Vec::new(),
            scope_bindings: false,
            domains: BTreeMap::new(),
        }
    }
}

impl RegistrarConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                           | Default |
    /// |-----------------------------------|---------|
    /// | `ROUTE_ATTRIBUTES_ENABLED`        | `true`  |
    /// | `ROUTE_ATTRIBUTES_DIRECTORIES`    | (none)  |
    /// | `ROUTE_ATTRIBUTES_BASE_PATH`      | `src`   |
    /// | `ROUTE_ATTRIBUTES_ROOT_NAMESPACE` | `crate` |
    /// | `ROUTE_ATTRIBUTES_EXTENSION`      | `rs`    |
    /// | `ROUTE_ATTRIBUTES_MIDDLEWARE`     | (none)  |
    /// | `ROUTE_ATTRIBUTES_SCOPE_BINDINGS` | `false` |
    /// | `ROUTE_DOMAIN_<KEY>`              | (none)  |
    ///
    /// List values are comma-separated.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(std::env::vars())
    }

    /// Build configuration from an explicit set of variables.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars: BTreeMap<String, String> = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        let mut config = Self::default();

        if let Some(value) = vars.get("ROUTE_ATTRIBUTES_ENABLED") {
            config.enabled = parse_bool("ROUTE_ATTRIBUTES_ENABLED", value)?;
        }
        if let Some(value) = vars.get("ROUTE_ATTRIBUTES_DIRECTORIES") {
            config.directories = split_list(value).into_iter().map(PathBuf::from).collect();
        }
        if let Some(value) = vars.get("ROUTE_ATTRIBUTES_BASE_PATH") {
            config.base_path = PathBuf::from(value);
        }
        if let Some(value) = vars.get("ROUTE_ATTRIBUTES_ROOT_NAMESPACE") {
            config.root_namespace = value.trim().to_string();
        }
        if let Some(value) = vars.get("ROUTE_ATTRIBUTES_EXTENSION") {
            let ext = value.trim().trim_start_matches('.');
            if ext.is_empty() {
                return Err(ConfigError::Invalid {
                    var: "ROUTE_ATTRIBUTES_EXTENSION",
                    expected: "a non-empty file extension",
                    value: value.clone(),
                });
            }
            config.extension = ext.to_string();
        }
        if let Some(value) = vars.get("ROUTE_ATTRIBUTES_MIDDLEWARE") {
            config.middleware = split_list(value);
        }
        if let Some(value) = vars.get("ROUTE_ATTRIBUTES_SCOPE_BINDINGS") {
            config.scope_bindings = parse_bool("ROUTE_ATTRIBUTES_SCOPE_BINDINGS", value)?;
        }

        config.domains = vars
            .iter()
            .filter_map(|(k, v)| {
                let key = k.strip_prefix(DOMAIN_VAR_PREFIX)?;
                (!key.is_empty()).then(|| (key.to_ascii_lowercase(), v.trim().to_string()))
            })
            .collect();

        Ok(config)
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn parse_bool(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            var,
            expected: "a boolean",
            value: value.to_string(),
        }),
    }
}
