//! Minimal configuration abstraction.
//!
//! Sources describe where configuration comes from, providers load it into
//! a flat key/value map, and [`Configuration`] answers key and section
//! queries across all providers. Later providers override earlier ones and
//! key lookups ignore ASCII case.
//!
//! # Example
//!
//! ```
//! use configfile::{ConfigFileConfigurationExt, ConfigurationBuilder};
//!
//! let configuration = ConfigurationBuilder::new()
//!     .add_config_text(r#"<configuration><appSettings><add key="Mode" value="fast"/></appSettings></configuration>"#)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(configuration.get("appSettings:mode"), Some("fast"));
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::parsers::ConfigData;
use crate::path::{child_segment, combine, section_key};

/// Trait for configuration providers.
///
/// A provider owns one flat map. [`load`](ConfigurationProvider::load) must
/// fully populate it before any lookup; [`data`](ConfigurationProvider::data)
/// is the read-only snapshot afterwards.
pub trait ConfigurationProvider: Send + Sync {
    /// Load (or reload) the provider's entries.
    ///
    /// # Errors
    /// Returns an error if the underlying source cannot be read or parsed.
    fn load(&mut self) -> Result<()>;

    /// The loaded entries.
    fn data(&self) -> &ConfigData;

    /// Look up a key, ignoring ASCII case.
    ///
    /// Returns `None` if the key is absent and `Some(None)` if it is present
    /// without a value.
    fn try_get(&self, key: &str) -> Option<Option<&str>> {
        let data = self.data();
        if let Some(value) = data.get(key) {
            return Some(value.as_deref());
        }
        data.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_deref())
    }

    /// Immediate child segments below `parent` (`None` for the root).
    ///
    /// May contain duplicates when several keys share a prefix.
    fn child_keys(&self, parent: Option<&str>) -> Vec<String> {
        self.data()
            .keys()
            .filter_map(|key| child_segment(key, parent))
            .map(str::to_string)
            .collect()
    }
}

/// Trait for configuration sources.
pub trait ConfigurationSource {
    /// Create the provider described by this source.
    fn build(&self, builder: &ConfigurationBuilder) -> Box<dyn ConfigurationProvider>;
}

/// Collects sources and loads them into a [`Configuration`].
#[derive(Default)]
pub struct ConfigurationBuilder {
    sources: Vec<Box<dyn ConfigurationSource>>,
    base_path: Option<PathBuf>,
}

impl ConfigurationBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a source. Sources added later take precedence.
    #[must_use]
    pub fn add(mut self, source: impl ConfigurationSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Set the directory relative file paths are resolved against.
    #[must_use]
    pub fn set_base_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.base_path = Some(path.into());
        self
    }

    /// The configured base path, if any.
    #[must_use]
    pub fn base_path(&self) -> Option<&Path> {
        self.base_path.as_deref()
    }

    /// Number of registered sources.
    #[must_use]
    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    /// Build and load every provider in registration order.
    ///
    /// # Errors
    /// Returns the first load failure; no configuration is produced then.
    pub fn build(&self) -> Result<Configuration> {
        let mut providers = Vec::with_capacity(self.sources.len());

        for source in &self.sources {
            let mut provider = source.build(self);
            provider.load()?;
            providers.push(provider);
        }

        tracing::debug!(providers = providers.len(), "Configuration built");
        Ok(Configuration { providers })
    }
}

impl fmt::Debug for ConfigurationBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigurationBuilder")
            .field("sources", &self.sources.len())
            .field("base_path", &self.base_path)
            .finish()
    }
}

/// Loaded configuration backed by one or more providers.
pub struct Configuration {
    providers: Vec<Box<dyn ConfigurationProvider>>,
}

impl Configuration {
    /// Create a configuration from already loaded providers.
    #[must_use]
    pub fn from_providers(providers: Vec<Box<dyn ConfigurationProvider>>) -> Self {
        Self { providers }
    }

    /// The providers, lowest precedence first.
    #[must_use]
    pub fn providers(&self) -> &[Box<dyn ConfigurationProvider>] {
        &self.providers
    }

    /// Get the value at `key`. The last provider holding the key wins.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.providers
            .iter()
            .rev()
            .find_map(|p| p.try_get(key))
            .flatten()
    }

    /// Get the section at `key`. Always succeeds; check
    /// [`ConfigurationSection::exists`] to see whether anything is there.
    #[must_use]
    pub fn get_section(&self, key: &str) -> ConfigurationSection<'_> {
        ConfigurationSection {
            root: self,
            path: key.to_string(),
        }
    }

    /// Top-level sections.
    #[must_use]
    pub fn get_children(&self) -> Vec<ConfigurationSection<'_>> {
        self.children_of(None)
    }

    fn children_of(&self, parent: Option<&str>) -> Vec<ConfigurationSection<'_>> {
        let mut segments: Vec<String> = Vec::new();
        for provider in &self.providers {
            for segment in provider.child_keys(parent) {
                if !segments.iter().any(|s| s.eq_ignore_ascii_case(&segment)) {
                    segments.push(segment);
                }
            }
        }
        segments.sort_by_key(|s| s.to_ascii_lowercase());

        segments
            .into_iter()
            .map(|segment| match parent {
                Some(parent) => self.get_section(&combine([parent, segment.as_str()])),
                None => self.get_section(&segment),
            })
            .collect()
    }
}

impl fmt::Debug for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Configuration")
            .field("providers", &self.providers.len())
            .finish()
    }
}

/// A view of the configuration at a key path.
#[derive(Clone)]
pub struct ConfigurationSection<'a> {
    root: &'a Configuration,
    path: String,
}

impl<'a> ConfigurationSection<'a> {
    /// Last segment of the path.
    #[must_use]
    pub fn key(&self) -> &str {
        section_key(&self.path)
    }

    /// Full key path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Value stored at this exact path.
    #[must_use]
    pub fn value(&self) -> Option<&'a str> {
        self.root.get(&self.path)
    }

    /// Value at a path relative to this section.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&'a str> {
        self.root.get(&combine([self.path.as_str(), key]))
    }

    /// Subsection at a path relative to this section.
    #[must_use]
    pub fn get_section(&self, key: &str) -> ConfigurationSection<'a> {
        self.root.get_section(&combine([self.path.as_str(), key]))
    }

    /// Immediate children, ordered by key ignoring case.
    #[must_use]
    pub fn get_children(&self) -> Vec<ConfigurationSection<'a>> {
        self.root.children_of(Some(&self.path))
    }

    /// Whether the section has a value or any children.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.value().is_some() || !self.get_children().is_empty()
    }
}

impl fmt::Debug for ConfigurationSection<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigurationSection")
            .field("path", &self.path)
            .field("value", &self.value())
            .finish()
    }
}
