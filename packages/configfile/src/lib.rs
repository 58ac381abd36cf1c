//! configfile - flatten legacy `.config` XML documents into configuration keys.
//!
//! `web.config` and `app.config` files store settings as nested XML. This
//! crate turns such a document into a flat map of colon-delimited keys
//! (`appSettings:ClientValidationEnabled`, `connectionStrings:DefaultConnection`)
//! and exposes it through a small layered configuration API.
//!
//! # Example
//!
//! ```
//! use configfile::{ConfigFileConfigurationExt, ConfigurationBuilder, ConfigurationExt};
//!
//! let xml = r#"<configuration>
//!     <appSettings><add key="Mode" value="fast"/></appSettings>
//!     <connectionStrings><add name="Main" connectionString="Server=."/></connectionStrings>
//! </configuration>"#;
//!
//! let configuration = ConfigurationBuilder::new()
//!     .add_config_text(xml)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(configuration.get_app_setting("Mode"), Some("fast"));
//! assert_eq!(configuration.get("connectionStrings:Main"), Some("Server=."));
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Attribute names, deny-lists and validation
//! - [`error`]: Error types and Result alias
//! - [`path`]: Composite key helpers
//! - [`xml`]: XML utilities and element-to-JSON conversion
//! - [`parsers`]: Element parsers, the parser chain and the flatten engine
//! - [`provider`]: Provider loading one document
//! - [`source`]: Source descriptor and builder extensions
//! - [`configuration`]: Builder, layered configuration and sections
//! - [`extensions`]: Query helpers
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod config;
pub mod configuration;
pub mod error;
pub mod extensions;
pub mod parsers;
pub mod path;
pub mod provider;
pub mod source;
pub mod xml;

// Re-export commonly used items
pub use configuration::{
    Configuration, ConfigurationBuilder, ConfigurationProvider, ConfigurationSection,
    ConfigurationSource,
};
pub use error::{ConfigFileError, Result};
pub use extensions::ConfigurationExt;
pub use parsers::{
    create_default_chain, ConfigData, Diagnostic, DiagnosticLevel, ElementParser, FlattenEngine,
    FlattenResult, KeyValueParser, ParseContext, ParserChain, ParserKind, SubtreeParser,
};
pub use provider::{ConfigFileProvider, DocumentInput};
pub use source::{ConfigFileConfigurationExt, ConfigFileSource};
