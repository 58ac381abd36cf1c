//! Configuration source for `.config` documents.

use std::path::PathBuf;
use std::sync::Arc;

use crate::configuration::{ConfigurationBuilder, ConfigurationProvider, ConfigurationSource};
use crate::parsers::{create_default_chain, ElementParser, ParserChain};
use crate::provider::{ConfigFileProvider, DocumentInput};

/// Describes a `.config` document and the parsers used to flatten it.
///
/// The parser chain always starts with the default chain (see
/// [`create_default_chain`]); caller parsers are appended after it.
#[derive(Debug, Clone)]
pub struct ConfigFileSource {
    input: DocumentInput,
    parsers: ParserChain,
}

impl ConfigFileSource {
    /// Create a source with the default chain followed by `parsers`.
    #[must_use]
    pub fn new(
        input: DocumentInput,
        parsers: impl IntoIterator<Item = Arc<dyn ElementParser>>,
    ) -> Self {
        let mut chain = create_default_chain();
        chain.extend(parsers);
        Self {
            input,
            parsers: chain,
        }
    }

    /// Source reading document text.
    #[must_use]
    pub fn from_text(text: impl Into<String>) -> Self {
        Self::new(DocumentInput::Text(text.into()), [])
    }

    /// Source reading a file.
    #[must_use]
    pub fn from_file(path: impl Into<PathBuf>, optional: bool) -> Self {
        Self::new(
            DocumentInput::File {
                path: path.into(),
                optional,
            },
            [],
        )
    }

    /// Append a parser after the ones already in the chain.
    #[must_use]
    pub fn with_parser(mut self, parser: impl ElementParser + 'static) -> Self {
        self.parsers.register(parser);
        self
    }

    /// The document input.
    #[must_use]
    pub fn input(&self) -> &DocumentInput {
        &self.input
    }

    /// The parser chain.
    #[must_use]
    pub fn parsers(&self) -> &ParserChain {
        &self.parsers
    }
}

impl ConfigurationSource for ConfigFileSource {
    fn build(&self, builder: &ConfigurationBuilder) -> Box<dyn ConfigurationProvider> {
        let input = match (&self.input, builder.base_path()) {
            (DocumentInput::File { path, optional }, Some(base)) if path.is_relative() => {
                DocumentInput::File {
                    path: base.join(path),
                    optional: *optional,
                }
            }
            (input, _) => input.clone(),
        };

        Box::new(ConfigFileProvider::new(input, self.parsers.clone()))
    }
}

/// Builder methods for adding `.config` sources.
pub trait ConfigFileConfigurationExt: Sized {
    /// Add a required `.config` file.
    #[must_use]
    fn add_config_file(self, path: impl Into<PathBuf>) -> Self {
        self.add_config_file_with(path, false, [])
    }

    /// Add a `.config` file with an optional flag and extra parsers.
    #[must_use]
    fn add_config_file_with(
        self,
        path: impl Into<PathBuf>,
        optional: bool,
        parsers: impl IntoIterator<Item = Arc<dyn ElementParser>>,
    ) -> Self;

    /// Add `.config` document text.
    #[must_use]
    fn add_config_text(self, text: impl Into<String>) -> Self;
}

impl ConfigFileConfigurationExt for ConfigurationBuilder {
    fn add_config_file_with(
        self,
        path: impl Into<PathBuf>,
        optional: bool,
        parsers: impl IntoIterator<Item = Arc<dyn ElementParser>>,
    ) -> Self {
        self.add(ConfigFileSource::new(
            DocumentInput::File {
                path: path.into(),
                optional,
            },
            parsers,
        ))
    }

    fn add_config_text(self, text: impl Into<String>) -> Self {
        self.add(ConfigFileSource::from_text(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConfigFileError, Result};
    use crate::parsers::{ConfigData, KeyValueParser, ParseContext, ParserKind};
    use crate::xml::get_tag_name;
    use roxmltree::Node;

    struct FeatureParser;

    impl ElementParser for FeatureParser {
        fn kind(&self) -> ParserKind {
            ParserKind::Custom
        }

        fn can_parse(&self, node: Node<'_, '_>) -> bool {
            get_tag_name(node) == "system.web"
        }

        fn parse(
            &self,
            _node: Node<'_, '_>,
            context: &mut ParseContext,
            results: &mut ConfigData,
        ) -> Result<()> {
            results.insert(context.key("system.web:seen"), Some("true".to_string()));
            Ok(())
        }
    }

    #[test]
    fn test_default_chain_then_caller_parsers() {
        let source = ConfigFileSource::from_text("<configuration/>").with_parser(FeatureParser);
        assert_eq!(
            source.parsers().kinds(),
            vec![
                ParserKind::KeyValue,
                ParserKind::KeyValue,
                ParserKind::Subtree,
                ParserKind::Custom
            ]
        );
    }

    #[test]
    fn test_caller_parser_claims_unhandled_section() {
        let configuration = ConfigurationBuilder::new()
            .add(
                ConfigFileSource::from_text(
                    r#"<configuration><system.web><compilation debug="true"/></system.web></configuration>"#,
                )
                .with_parser(FeatureParser),
            )
            .build()
            .unwrap();

        assert_eq!(configuration.get("system.web:seen"), Some("true"));
    }

    #[test]
    fn test_relative_path_uses_base_path() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("Web.config"),
            r#"<configuration><appSettings><add key="Mode" value="fast"/></appSettings></configuration>"#,
        )
        .unwrap();

        let builder = ConfigurationBuilder::new().set_base_path(dir.path());
        let mut provider = ConfigFileSource::from_file("Web.config", false).build(&builder);
        provider.load().unwrap();

        assert_eq!(provider.try_get("appSettings:Mode"), Some(Some("fast")));
    }

    #[test]
    fn test_absolute_path_ignores_base_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.config");
        let builder = ConfigurationBuilder::new().set_base_path("/does/not/matter");

        let err = builder
            .add(ConfigFileSource::from_file(&path, false))
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigFileError::FileNotFound(ref p) if *p == path));
    }

    #[test]
    fn test_add_config_file_missing_required() {
        let dir = tempfile::tempdir().unwrap();
        let err = ConfigurationBuilder::new()
            .set_base_path(dir.path())
            .add_config_file("Web.config")
            .build()
            .unwrap_err();

        assert!(matches!(err, ConfigFileError::FileNotFound(ref p) if *p == dir.path().join("Web.config")));
    }

    #[test]
    fn test_add_config_file_with_extra_parser() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("App.config"),
            r#"<configuration><appSettings><add id="Mode" data="fast"/></appSettings></configuration>"#,
        )
        .unwrap();

        let extra: Arc<dyn ElementParser> =
            Arc::new(KeyValueParser::with_attributes("id", "data").unwrap());
        let configuration = ConfigurationBuilder::new()
            .set_base_path(dir.path())
            .add_config_file_with("App.config", false, [extra])
            .build()
            .unwrap();

        assert_eq!(configuration.get("appSettings:Mode"), Some("fast"));
    }

    #[test]
    fn test_add_config_text() {
        let configuration = ConfigurationBuilder::new()
            .add_config_text(r#"<configuration><svc><endpoint url="x"/></svc></configuration>"#)
            .build()
            .unwrap();

        assert_eq!(
            configuration.get("svc:endpoint"),
            Some(r#"{"endpoint":{"@url":"x"}}"#)
        );
    }
}
