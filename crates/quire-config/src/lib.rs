//! Configuration management for Quire.
//!
//! Parses `quire.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `title`
//! - `description`
//! - `theme.footer.message`
//! - `theme.footer.copyright`

mod expand;
mod theme;

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use serde::Deserialize;

pub use theme::{
    FooterConfig, NavItem, OutlineConfig, OutlineLevel, SearchConfig, SidebarConfig,
    SidebarSection, ThemeConfig,
};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override markdown source directory.
    pub source_dir: Option<PathBuf>,
    /// Override output directory.
    pub out_dir: Option<PathBuf>,
    /// Override clean URL generation.
    pub clean_urls: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "quire.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site title.
    pub title: String,
    /// Site description for `<meta name="description">`.
    pub description: String,
    /// Value of `<html lang>`.
    pub lang: String,
    /// Extra tags injected into every page's `<head>`.
    pub head: Vec<HeadTag>,
    /// Build configuration (paths are relative strings from TOML).
    build: BuildConfigRaw,
    /// Markdown rendering options.
    pub markdown: MarkdownConfig,
    /// Theme configuration.
    pub theme: ThemeConfig,

    /// Resolved build configuration (set after loading).
    #[serde(skip)]
    pub build_resolved: BuildConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Tag injected into `<head>`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HeadTag {
    /// Element name (`meta`, `link`, `script`, ...).
    pub tag: String,
    /// Attributes, rendered in key order.
    #[serde(default)]
    pub attrs: BTreeMap<String, String>,
    /// Inner content. Tags without content render as void elements.
    #[serde(default)]
    pub content: Option<String>,
}

/// Raw build configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct BuildConfigRaw {
    source_dir: Option<String>,
    out_dir: Option<String>,
    clean_urls: Option<bool>,
}

/// Resolved build configuration with absolute paths.
#[derive(Debug, Default)]
pub struct BuildConfig {
    /// Directory containing markdown pages.
    pub source_dir: PathBuf,
    /// Directory the static site is written to.
    pub out_dir: PathBuf,
    /// Emit links without the `.html` suffix.
    pub clean_urls: bool,
}

/// Markdown rendering options.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct MarkdownConfig {
    /// Enable GitHub-flavored extensions (tables, task lists, alerts).
    pub gfm: bool,
    /// Fence languages rendered as theme components.
    pub fence_components: Vec<FenceComponentConfig>,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            gfm: true,
            fence_components: vec![FenceComponentConfig::mermaid()],
        }
    }
}

/// Mapping from a fence language to a component element.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FenceComponentConfig {
    /// Fence language (exact, case-sensitive).
    pub lang: String,
    /// Component name, in `PascalCase`.
    pub component: String,
    /// Attribute that carries the block content.
    pub attribute: String,
}

impl FenceComponentConfig {
    fn mermaid() -> Self {
        Self {
            lang: "mermaid".to_owned(),
            component: "Mermaid".to_owned(),
            attribute: "graph".to_owned(),
        }
    }

    fn validate(&self, index: usize) -> Result<(), ConfigError> {
        let field = |name: &str| format!("markdown.fence_components[{index}].{name}");
        require_non_empty(&self.lang, &field("lang"))?;
        require_non_empty(&self.component, &field("component"))?;
        require_non_empty(&self.attribute, &field("attribute"))?;

        if !is_component_name(&self.component) {
            return Err(ConfigError::Validation(format!(
                "{} must be PascalCase alphanumeric, got \"{}\"",
                field("component"),
                self.component
            )));
        }
        if !is_attribute_name(&self.attribute) {
            return Err(ConfigError::Validation(format!(
                "{} is not a valid attribute name: \"{}\"",
                field("attribute"),
                self.attribute
            )));
        }
        Ok(())
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`theme.footer.copyright`").
        field: String,
        /// Error message (e.g., "${`YEAR`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// `PascalCase` identifier: ASCII uppercase first, alphanumerics after.
fn is_component_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_uppercase())
        && chars.all(|c| c.is_ascii_alphanumeric())
}

/// Attribute name: ASCII letter first, then letters, digits, `-` or `_`.
fn is_attribute_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `quire.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// an environment variable is missing, or validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Title shown in the nav bar: `theme.site_title` or the site title.
    #[must_use]
    pub fn site_title(&self) -> &str {
        self.theme.site_title.as_deref().unwrap_or(&self.title)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.build_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(out_dir) = &settings.out_dir {
            self.build_resolved.out_dir.clone_from(out_dir);
        }
        if let Some(clean_urls) = settings.clean_urls {
            self.build_resolved.clean_urls = clean_urls;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;
        Self::discover_config_from(&current)
    }

    fn discover_config_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    #[must_use]
    pub fn default_with_base(base: &Path) -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            lang: "en-US".to_owned(),
            head: Vec::new(),
            build: BuildConfigRaw::default(),
            markdown: MarkdownConfig::default(),
            theme: ThemeConfig::default(),
            build_resolved: BuildConfig {
                source_dir: base.join("docs"),
                out_dir: base.join(".quire").join("dist"),
                clean_urls: false,
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file. Navigation link quality
    /// is not checked here; see the site crate's lint.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.lang, "lang")?;
        for (i, tag) in self.head.iter().enumerate() {
            require_non_empty(&tag.tag, &format!("head[{i}].tag"))?;
        }
        self.validate_fence_components()?;
        self.validate_search()?;
        Ok(())
    }

    fn validate_fence_components(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for (i, component) in self.markdown.fence_components.iter().enumerate() {
            component.validate(i)?;
            if !seen.insert(component.lang.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "markdown.fence_components: duplicate lang \"{}\"",
                    component.lang
                )));
            }
        }
        Ok(())
    }

    fn validate_search(&self) -> Result<(), ConfigError> {
        if let SearchConfig::Algolia {
            app_id,
            api_key,
            index_name,
        } = &self.theme.search
        {
            require_non_empty(app_id, "theme.search.app_id")?;
            require_non_empty(api_key, "theme.search.api_key")?;
            require_non_empty(index_name, "theme.search.index_name")?;
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.title = expand::expand_env(&self.title, "title")?;
        self.description = expand::expand_env(&self.description, "description")?;

        if let Some(ref mut footer) = self.theme.footer {
            if let Some(ref message) = footer.message {
                footer.message = Some(expand::expand_env(message, "theme.footer.message")?);
            }
            if let Some(ref copyright) = footer.copyright {
                footer.copyright = Some(expand::expand_env(copyright, "theme.footer.copyright")?);
            }
        }

        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.build_resolved = BuildConfig {
            source_dir: resolve(self.build.source_dir.as_deref(), "docs"),
            out_dir: resolve(self.build.out_dir.as_deref(), ".quire/dist"),
            clean_urls: self.build.clean_urls.unwrap_or(false),
        };
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/project"));

        assert_eq!(config.lang, "en-US");
        assert!(config.markdown.gfm);
        assert_eq!(
            config.markdown.fence_components,
            vec![FenceComponentConfig::mermaid()]
        );
        assert_eq!(config.build_resolved.source_dir, PathBuf::from("/project/docs"));
        assert_eq!(
            config.build_resolved.out_dir,
            PathBuf::from("/project/.quire/dist")
        );
        assert!(!config.build_resolved.clean_urls);
        assert!(config.theme.nav.is_empty());
        assert_eq!(config.theme.search, SearchConfig::None);
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.lang, "en-US");
        assert_eq!(config.markdown.fence_components.len(), 1);
    }

    #[test]
    fn test_parse_site_config() {
        let toml = r#"
title = "Quire"
description = "Static docs"
lang = "de-DE"

[[head]]
tag = "link"
attrs = { rel = "icon", href = "/favicon.svg" }

[[head]]
tag = "script"
content = "window.analytics = true"

[theme]
logo = "/logo.svg"
site_title = "Quire Docs"
nav = [{ text = "Guide", link = "/guide/" }]

[theme.footer]
message = "Released under the MIT License."
"#;
        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(config.title, "Quire");
        assert_eq!(config.description, "Static docs");
        assert_eq!(config.lang, "de-DE");
        assert_eq!(config.head.len(), 2);
        assert_eq!(config.head[0].attrs["rel"], "icon");
        assert_eq!(config.head[1].content.as_deref(), Some("window.analytics = true"));
        assert_eq!(config.site_title(), "Quire Docs");
        assert_eq!(config.theme.logo.as_deref(), Some("/logo.svg"));
        assert_eq!(
            config.theme.footer.as_ref().unwrap().message.as_deref(),
            Some("Released under the MIT License.")
        );
    }

    #[test]
    fn test_site_title_falls_back_to_title() {
        let config: Config = toml::from_str("title = \"Handbook\"").unwrap();
        assert_eq!(config.site_title(), "Handbook");
    }

    #[test]
    fn test_custom_fence_components_replace_default() {
        let toml = r#"
[[markdown.fence_components]]
lang = "plot"
component = "Plot"
attribute = "spec"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.markdown.fence_components.len(), 1);
        assert_eq!(config.markdown.fence_components[0].component, "Plot");
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[build]
source_dir = "content"
out_dir = "public"
clean_urls = true
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.build_resolved.source_dir,
            PathBuf::from("/project/content")
        );
        assert_eq!(config.build_resolved.out_dir, PathBuf::from("/project/public"));
        assert!(config.build_resolved.clean_urls);
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            out_dir: Some(PathBuf::from("/tmp/site")),
            clean_urls: Some(true),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.build_resolved.source_dir, PathBuf::from("/test/docs"));
        assert_eq!(config.build_resolved.out_dir, PathBuf::from("/tmp/site"));
        assert!(config.build_resolved.clean_urls);
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.apply_cli_settings(&CliSettings::default());

        assert_eq!(config.build_resolved.source_dir, PathBuf::from("/test/docs"));
        assert!(!config.build_resolved.clean_urls);
    }

    #[test]
    fn test_expand_env_vars() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("QUIRE_TEST_ORG", "Acme");
        }
        let toml = r#"
title = "${QUIRE_TEST_ORG} Docs"

[theme.footer]
copyright = "Copyright ${QUIRE_TEST_ORG}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();

        assert_eq!(config.title, "Acme Docs");
        assert_eq!(
            config.theme.footer.unwrap().copyright.as_deref(),
            Some("Copyright Acme")
        );
        unsafe {
            std::env::remove_var("QUIRE_TEST_ORG");
        }
    }

    #[test]
    fn test_expand_env_vars_missing_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("QUIRE_TEST_NO_SUCH_VAR");
        }
        let mut config: Config =
            toml::from_str("description = \"${QUIRE_TEST_NO_SUCH_VAR}\"").unwrap();
        let err = config.expand_env_vars().unwrap_err();

        assert!(matches!(err, ConfigError::EnvVar { ref field, .. } if field == "description"));
    }

    fn assert_validation_error(toml: &str, expected: &str) {
        let config: Config = toml::from_str(toml).unwrap();
        let err = config.validate().unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(_)),
            "Expected ConfigError::Validation, got {err:?}"
        );
        assert!(
            err.to_string().contains(expected),
            "Expected '{expected}' in: {err}"
        );
    }

    #[test]
    fn test_validate_default_config_passes() {
        Config::default_with_base(Path::new("/test")).validate().unwrap();
    }

    #[test]
    fn test_validate_fence_component_empty_lang() {
        assert_validation_error(
            "[[markdown.fence_components]]\nlang = \"\"\ncomponent = \"Mermaid\"\nattribute = \"graph\"",
            "markdown.fence_components[0].lang cannot be empty",
        );
    }

    #[test]
    fn test_validate_fence_component_name() {
        assert_validation_error(
            "[[markdown.fence_components]]\nlang = \"mermaid\"\ncomponent = \"mermaid\"\nattribute = \"graph\"",
            "PascalCase",
        );
    }

    #[test]
    fn test_validate_fence_component_attribute() {
        assert_validation_error(
            "[[markdown.fence_components]]\nlang = \"mermaid\"\ncomponent = \"Mermaid\"\nattribute = \"a b\"",
            "not a valid attribute name",
        );
    }

    #[test]
    fn test_validate_duplicate_fence_lang() {
        let toml = r#"
[[markdown.fence_components]]
lang = "mermaid"
component = "Mermaid"
attribute = "graph"

[[markdown.fence_components]]
lang = "mermaid"
component = "Diagram"
attribute = "source"
"#;
        assert_validation_error(toml, "duplicate lang \"mermaid\"");
    }

    #[test]
    fn test_validate_algolia_requires_fields() {
        let toml = r#"
[theme.search]
provider = "algolia"
app_id = "APP"
api_key = ""
index_name = "docs"
"#;
        assert_validation_error(toml, "theme.search.api_key cannot be empty");
    }

    #[test]
    fn test_validate_empty_head_tag() {
        assert_validation_error("[[head]]\ntag = \"\"", "head[0].tag cannot be empty");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "title = \"Quire\"\n[build]\nsource_dir = \"pages\"\n").unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.title, "Quire");
        assert_eq!(config.build_resolved.source_dir, dir.path().join("pages"));
        assert_eq!(config.build_resolved.out_dir, dir.path().join(".quire/dist"));
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_with_cli_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "").unwrap();
        let settings = CliSettings {
            source_dir: Some(PathBuf::from("/elsewhere")),
            ..Default::default()
        };

        let config = Config::load(Some(&path), Some(&settings)).unwrap();

        assert_eq!(config.build_resolved.source_dir, PathBuf::from("/elsewhere"));
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(Some(&dir.path().join("missing.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "title = ").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_discover_config_in_parent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "").unwrap();
        let nested = dir.path().join("docs/guide");
        std::fs::create_dir_all(&nested).unwrap();

        assert_eq!(Config::discover_config_from(&nested), Some(path));
    }
}
