//! Configuration loading
//!
//! `defaults/brs.default.toml` is embedded into every binary so that docs and runtime
//! behavior stay in sync. Applications layer user-specific files on top of those defaults via
//! [`Loader`] before deserializing into [`BrsConfig`].

use crate::brs::keywords::{KeywordLists, KeywordTables, TableError};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../../defaults/brs.default.toml");

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BrsConfig {
    pub lexer: LexerConfig,
    /// Replacement keyword lists; unnamed lists keep their defaults.
    #[serde(default)]
    pub tables: Option<KeywordLists>,
}

/// Options the classifier and the indentation engine read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexerConfig {
    /// Style an unterminated single-line string as an error rather than closing it.
    pub treat_unterminated_string_as_error: bool,
    /// Columns per nesting level.
    pub indent_unit: usize,
}

impl Default for LexerConfig {
    fn default() -> Self {
        LexerConfig {
            treat_unterminated_string_as_error: false,
            indent_unit: 4,
        }
    }
}

impl BrsConfig {
    /// The tables this configuration asks for: the shared BrightScript set, or a freshly
    /// compiled custom set.
    pub fn tables(&self) -> Result<Cow<'static, KeywordTables>, TableError> {
        match &self.tables {
            Some(lists) => Ok(Cow::Owned(KeywordTables::compile(lists)?)),
            None => Ok(Cow::Borrowed(KeywordTables::brightscript())),
        }
    }
}

/// Builds a [BrsConfig] from the embedded defaults plus whatever the caller layers on top.
/// Later layers win key by key.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        Loader {
            builder: Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml)),
        }
    }

    /// Layer a TOML file. The file must exist.
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        log::debug!("layering config file {}", path.display());
        self.layer(File::from(path).format(FileFormat::Toml).required(true))
    }

    /// Layer TOML text, such as an editor's settings blob.
    pub fn with_toml(self, text: &str) -> Self {
        self.layer(File::from_str(text, FileFormat::Toml))
    }

    pub fn strict_strings(self, strict: bool) -> Result<Self, ConfigError> {
        self.set("lexer.treat_unterminated_string_as_error", strict)
    }

    pub fn indent_unit(self, width: usize) -> Result<Self, ConfigError> {
        let width = i64::try_from(width)
            .map_err(|_| ConfigError::Message(format!("indent unit {} is too large", width)))?;
        self.set("lexer.indent_unit", width)
    }

    pub fn build(self) -> Result<BrsConfig, ConfigError> {
        let config: BrsConfig = self.builder.build()?.try_deserialize()?;
        log::debug!("loaded config {:?}", config.lexer);
        Ok(config)
    }

    fn layer<S>(mut self, source: S) -> Self
    where
        S: config::Source + Send + Sync + 'static,
    {
        self.builder = self.builder.add_source(source);
        self
    }

    fn set(mut self, key: &str, value: impl Into<ValueKind>) -> Result<Self, ConfigError> {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// The embedded defaults alone.
pub fn load_defaults() -> Result<BrsConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_defaults_match_lexer_defaults() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.lexer, LexerConfig::default());
        assert!(config.tables.is_none());
    }

    #[test]
    fn test_cli_overrides_win_over_defaults() {
        let config = Loader::new()
            .with_toml("[lexer]\nindent_unit = 8\n")
            .strict_strings(true)
            .expect("override to apply")
            .indent_unit(2)
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert!(config.lexer.treat_unterminated_string_as_error);
        assert_eq!(config.lexer.indent_unit, 2);
    }

    #[test]
    fn test_partial_tables_keep_unnamed_lists() {
        let config = Loader::new()
            .with_toml("[tables]\nknown_members = [\"count\"]\n")
            .build()
            .expect("config to build");
        let lists = config.tables.clone().expect("tables section");
        assert_eq!(lists.known_members, vec!["count".to_string()]);
        assert_eq!(lists.openers, KeywordLists::brightscript().openers);

        let tables = config.tables().expect("tables to compile");
        assert!(tables.is_known_member("Count"));
        assert!(!tables.is_known_member("push"));
    }

    #[test]
    fn test_default_tables_are_borrowed() {
        let config = load_defaults().unwrap();
        assert!(matches!(config.tables().unwrap(), Cow::Borrowed(_)));
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let result = Loader::new()
            .with_file("/nonexistent/brs-lexer.toml")
            .build();
        assert!(result.is_err());
    }
}
