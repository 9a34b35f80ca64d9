// crates/apiforge-config/src/config.rs
// ============================================================================
// Module: Apiforge Configuration
// Description: Configuration loading and validation for apiforge.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: apiforge-sdk-gen, serde, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! The path comes from the caller, then `APIFORGE_CONFIG`, then
//! `./apiforge.toml`. Only the last of these may be absent, in which case the
//! defaults apply. Language ids are normalized to their canonical form during
//! validation so callers never see aliases.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use apiforge_sdk_gen::EmitterRegistry;
use apiforge_sdk_gen::SdkGenError;
use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "apiforge.toml";
/// Environment variable used to override the config path.
pub(crate) const CONFIG_ENV_VAR: &str = "APIFORGE_CONFIG";
/// Maximum size of a config file in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum length of a full path string.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Smallest accepted sync timeout.
pub(crate) const MIN_SYNC_TIMEOUT_MS: u64 = 100;
/// Largest accepted sync timeout.
pub(crate) const MAX_SYNC_TIMEOUT_MS: u64 = 120_000;
/// Maximum length of a sync URL.
pub(crate) const MAX_URL_LENGTH: usize = 2048;
/// Maximum length of a service or package name override.
pub(crate) const MAX_NAME_LENGTH: usize = 128;
/// Maximum number of skip patterns per guardrail rule.
pub(crate) const MAX_SKIP_PATTERNS_PER_RULE: usize = 64;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error while reading config.
    #[error("config io error: {0}")]
    Io(String),
    /// Parse error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Root Config
// ============================================================================

/// Top-level `apiforge.toml` model.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiforgeConfig {
    /// Contract location and sync settings.
    #[serde(default)]
    pub contract: ContractConfig,
    /// Client generation settings.
    #[serde(default)]
    pub generate: GenerateConfig,
    /// Plan persistence settings.
    #[serde(default)]
    pub plan: PlanConfig,
    /// Guardrail rule adjustments.
    #[serde(default)]
    pub guardrail: GuardrailConfig,
    /// File the config was read from; `None` when defaults were used.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl ApiforgeConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails. A missing
    /// file is an error unless the path fell back to `./apiforge.toml`.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (resolved, explicit) = resolve_path(path)?;
        validate_path(&resolved)?;
        let bytes = match fs::read(&resolved) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound && !explicit => {
                let mut config = Self::default();
                config.validate()?;
                return Ok(config);
            }
            Err(err) => {
                return Err(ConfigError::Io(format!("{}: {err}", resolved.display())));
            }
        };
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        let mut config = Self::from_toml(content)?;
        config.source = Some(resolved);
        Ok(config)
    }

    /// Parses and validates configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML and
    /// [`ConfigError::Invalid`] when validation fails.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let mut config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration and normalizes language ids.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        self.contract.validate()?;
        self.generate.validate()?;
        self.plan.validate()?;
        self.guardrail.validate()?;
        Ok(())
    }
}

// ============================================================================
// SECTION: Contract
// ============================================================================

/// Contract location and sync settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ContractConfig {
    /// Local contract path.
    #[serde(default = "default_contract_path")]
    pub path: String,
    /// Optional URL the contract is synced from.
    #[serde(default)]
    pub sync_url: Option<String>,
    /// Sync request timeout in milliseconds.
    #[serde(default = "default_sync_timeout_ms")]
    pub sync_timeout_ms: u64,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            path: default_contract_path(),
            sync_url: None,
            sync_timeout_ms: default_sync_timeout_ms(),
        }
    }
}

impl ContractConfig {
    /// Returns the sync timeout as a [`Duration`].
    #[must_use]
    pub const fn sync_timeout(&self) -> Duration {
        Duration::from_millis(self.sync_timeout_ms)
    }

    /// Validates contract settings.
    fn validate(&self) -> Result<(), ConfigError> {
        validate_path_string("contract.path", &self.path)?;
        if !(MIN_SYNC_TIMEOUT_MS ..= MAX_SYNC_TIMEOUT_MS).contains(&self.sync_timeout_ms) {
            return Err(ConfigError::Invalid(format!(
                "contract.sync_timeout_ms must be within \
                 {MIN_SYNC_TIMEOUT_MS}..={MAX_SYNC_TIMEOUT_MS}"
            )));
        }
        if let Some(url) = &self.sync_url {
            let trimmed = url.trim();
            if trimmed.is_empty() {
                return Err(ConfigError::Invalid("contract.sync_url must be non-empty".to_string()));
            }
            if trimmed.len() > MAX_URL_LENGTH {
                return Err(ConfigError::Invalid("contract.sync_url exceeds max length".to_string()));
            }
            if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
                return Err(ConfigError::Invalid(
                    "contract.sync_url must use http or https".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Default contract path.
pub(crate) fn default_contract_path() -> String {
    "openapi.yaml".to_string()
}

/// Default sync timeout.
pub(crate) const fn default_sync_timeout_ms() -> u64 {
    10_000
}

// ============================================================================
// SECTION: Generate
// ============================================================================

/// Client generation settings.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateConfig {
    /// Root directory for generated projects.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    /// Target languages; canonical ids after validation.
    #[serde(default = "default_languages")]
    pub languages: Vec<String>,
    /// Service name override.
    #[serde(default)]
    pub service_name: Option<String>,
    /// Package name override.
    #[serde(default)]
    pub package_name: Option<String>,
    /// Base URL override.
    #[serde(default)]
    pub base_url: Option<String>,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            languages: default_languages(),
            service_name: None,
            package_name: None,
            base_url: None,
        }
    }
}

impl GenerateConfig {
    /// Validates generation settings and canonicalizes languages.
    fn validate(&mut self) -> Result<(), ConfigError> {
        validate_path_string("generate.output_dir", &self.output_dir)?;
        if self.languages.is_empty() {
            return Err(ConfigError::Invalid("generate.languages must be non-empty".to_string()));
        }
        self.languages = canonical_languages(&self.languages)?;
        validate_optional_name("generate.service_name", self.service_name.as_deref())?;
        validate_optional_name("generate.package_name", self.package_name.as_deref())?;
        if let Some(url) = &self.base_url
            && url.trim().is_empty()
        {
            return Err(ConfigError::Invalid("generate.base_url must be non-empty".to_string()));
        }
        Ok(())
    }
}

/// Default output directory.
pub(crate) fn default_output_dir() -> String {
    "generated".to_string()
}

/// Default target languages.
pub(crate) fn default_languages() -> Vec<String> {
    vec!["typescript".to_string(), "python".to_string()]
}

/// Resolves language ids and aliases to deduplicated canonical ids.
///
/// # Errors
///
/// Returns [`ConfigError::Invalid`] for unknown languages.
pub fn canonical_languages(languages: &[String]) -> Result<Vec<String>, ConfigError> {
    let registry = EmitterRegistry::shared()
        .map_err(|err| ConfigError::Invalid(format!("emitter registry: {err}")))?;
    let resolved = registry.canonical(languages).map_err(|err| match err {
        SdkGenError::UnsupportedLanguage(language) => {
            let known = registry.languages().collect::<Vec<_>>().join(", ");
            ConfigError::Invalid(format!(
                "generate.languages contains unknown language {language} (known: {known})"
            ))
        }
        other => ConfigError::Invalid(format!("generate.languages: {other}")),
    })?;
    Ok(resolved.into_iter().map(str::to_string).collect())
}

/// Validates an optional name override.
fn validate_optional_name(field: &str, value: Option<&str>) -> Result<(), ConfigError> {
    let Some(value) = value else {
        return Ok(());
    };
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if trimmed.len() > MAX_NAME_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    Ok(())
}

// ============================================================================
// SECTION: Plan
// ============================================================================

/// Plan persistence settings.
#[derive(Debug, Clone, Deserialize)]
pub struct PlanConfig {
    /// Plan document path.
    #[serde(default = "default_plan_path")]
    pub path: String,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            path: default_plan_path(),
        }
    }
}

impl PlanConfig {
    /// Validates plan settings.
    fn validate(&self) -> Result<(), ConfigError> {
        validate_path_string("plan.path", &self.path)
    }
}

/// Default plan path.
pub(crate) fn default_plan_path() -> String {
    "apiforge-plan.json".to_string()
}

// ============================================================================
// SECTION: Guardrail
// ============================================================================

/// Guardrail rule adjustments.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GuardrailConfig {
    /// Rule names to disable.
    #[serde(default)]
    pub disabled_rules: Vec<String>,
    /// Extra regex skip patterns keyed by rule name.
    #[serde(default)]
    pub extra_skip_patterns: BTreeMap<String, Vec<String>>,
}

impl GuardrailConfig {
    /// Validates guardrail settings.
    ///
    /// Rule names are not checked against the rule set here; the guardrail
    /// engine warns about unknown names when it is built.
    fn validate(&self) -> Result<(), ConfigError> {
        for name in &self.disabled_rules {
            if name.trim().is_empty() {
                return Err(ConfigError::Invalid(
                    "guardrail.disabled_rules entries must be non-empty".to_string(),
                ));
            }
        }
        for (rule, patterns) in &self.extra_skip_patterns {
            if rule.trim().is_empty() {
                return Err(ConfigError::Invalid(
                    "guardrail.extra_skip_patterns keys must be non-empty".to_string(),
                ));
            }
            if patterns.len() > MAX_SKIP_PATTERNS_PER_RULE {
                return Err(ConfigError::Invalid(format!(
                    "guardrail.extra_skip_patterns.{rule} exceeds {MAX_SKIP_PATTERNS_PER_RULE} \
                     entries"
                )));
            }
            if patterns.iter().any(|pattern| pattern.is_empty()) {
                return Err(ConfigError::Invalid(format!(
                    "guardrail.extra_skip_patterns.{rule} entries must be non-empty"
                )));
            }
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from CLI or environment defaults.
///
/// The flag is true when the path was named explicitly.
fn resolve_path(path: Option<&Path>) -> Result<(PathBuf, bool), ConfigError> {
    if let Some(path) = path {
        return Ok((path.to_path_buf(), true));
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok((PathBuf::from(env_path), true));
    }
    Ok((PathBuf::from(DEFAULT_CONFIG_NAME), false))
}

/// Validates the resolved path against security limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a path string against length constraints.
fn validate_path_string(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if trimmed.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    for component in Path::new(trimmed).components() {
        if component.as_os_str().len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid(format!("{field} path component too long")));
        }
    }
    Ok(())
}
