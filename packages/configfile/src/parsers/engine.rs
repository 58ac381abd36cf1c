//! Flatten engine that drives a full document through the parser chain.

use roxmltree::Document;

use super::chain::ParserChain;
use super::types::{ConfigData, FlattenResult, ParseContext};
use crate::error::Result;
use crate::xml::{element_children, get_tag_name, outer_xml};

/// Engine that flattens documents using a parser chain.
///
/// Each top-level section (element child of the document root) is handed
/// to the first parser in the chain that accepts it. Sections no parser
/// accepts are skipped with a warning diagnostic.
#[derive(Debug, Clone)]
pub struct FlattenEngine {
    chain: ParserChain,
}

impl FlattenEngine {
    /// Create a new engine with the given chain.
    #[must_use]
    pub fn new(chain: ParserChain) -> Self {
        Self { chain }
    }

    /// Get a reference to the underlying chain.
    #[must_use]
    pub fn chain(&self) -> &ParserChain {
        &self.chain
    }

    /// Parse and flatten XML text.
    ///
    /// # Errors
    /// Returns `XmlParse` for malformed markup, or the first fatal parser error.
    pub fn flatten_str(&self, text: &str) -> Result<FlattenResult> {
        let document = Document::parse(text)?;
        self.flatten(&document)
    }

    /// Flatten a parsed document.
    ///
    /// The context path and result map are created fresh for every call,
    /// and nothing is returned if any parser fails.
    ///
    /// # Errors
    /// Returns the first fatal error raised by a parser.
    pub fn flatten(&self, document: &Document<'_>) -> Result<FlattenResult> {
        let mut context = ParseContext::new();
        let mut data = ConfigData::new();

        for section in element_children(document.root_element()) {
            let Some(parser) = self.chain.find(section) else {
                context.warn(format!(
                    "No parser supports element <{}>, skipping. [{}]",
                    get_tag_name(section),
                    outer_xml(section)
                ));
                continue;
            };

            tracing::debug!(
                section = %get_tag_name(section),
                kind = ?parser.kind(),
                "Parsing section"
            );
            parser.parse(section, &mut context, &mut data)?;
        }

        Ok(FlattenResult {
            data,
            diagnostics: context.into_diagnostics(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigFileError;
    use crate::parsers::create_default_chain;
    use crate::parsers::handlers::KeyValueParser;
    use pretty_assertions::assert_eq;

    fn engine() -> FlattenEngine {
        FlattenEngine::new(create_default_chain())
    }

    #[test]
    fn test_flatten_add() {
        let result = engine()
            .flatten_str(r#"<configuration><a><add key="X" value="Y"/></a></configuration>"#)
            .unwrap();

        assert_eq!(result.data.len(), 1);
        assert_eq!(result.data["a:X"].as_deref(), Some("Y"));
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn test_no_actions_gives_empty_map() {
        let chain = ParserChain::new().with(KeyValueParser::new());
        let result = FlattenEngine::new(chain)
            .flatten_str(r#"<configuration><a><b/></a><c x="1"/></configuration>"#)
            .unwrap();

        assert!(result.data.is_empty());
    }

    #[test]
    fn test_unclaimed_section_gives_one_diagnostic() {
        let result = engine()
            .flatten_str(
                r#"<configuration>
                    <configSections><section name="x" type="y"/></configSections>
                </configuration>"#,
            )
            .unwrap();

        assert!(result.data.is_empty());
        assert_eq!(result.diagnostics.len(), 1);
        assert!(result.diagnostics[0].message.contains("<configSections>"));
    }

    #[test]
    fn test_denied_section_with_key_attributes_contributes_nothing() {
        let result = engine()
            .flatten_str(
                r#"<configuration>
                    <system.webServer><handlers><remove name="h"/><add name="h" key="k" value="v"/></handlers></system.webServer>
                    <runtime><add key="k" value="v"/></runtime>
                </configuration>"#,
            )
            .unwrap();

        assert!(result.data.is_empty());
        assert_eq!(result.diagnostics.len(), 2);
    }

    #[test]
    fn test_flatten_is_idempotent() {
        let xml = r#"<configuration>
            <appSettings><add key="a" value="1"/></appSettings>
            <svc><endpoint url="x"/></svc>
        </configuration>"#;
        let engine = engine();

        assert_eq!(engine.flatten_str(xml).unwrap(), engine.flatten_str(xml).unwrap());
    }

    #[test]
    fn test_parser_failure_aborts() {
        let err = engine()
            .flatten_str(
                r#"<configuration>
                    <appSettings><add key="a" value="1"/></appSettings>
                    <svc><item/><item/></svc>
                </configuration>"#,
            )
            .unwrap_err();
        assert!(matches!(err, ConfigFileError::DuplicateKey(ref key) if key == "svc:item"));
    }

    #[test]
    fn test_unknown_flat_leaf_does_not_abort() {
        let result = engine()
            .flatten_str(
                r#"<configuration>
                    <setting key="legacy" value="x"/>
                    <appSettings><add key="Mode" value="fast"/></appSettings>
                </configuration>"#,
            )
            .unwrap();

        assert_eq!(result.data.len(), 1);
        assert_eq!(result.data["appSettings:Mode"].as_deref(), Some("fast"));
        assert_eq!(result.diagnostics.len(), 1);
    }

    #[test]
    fn test_malformed_xml() {
        let err = engine().flatten_str("<configuration>").unwrap_err();
        assert!(matches!(err, ConfigFileError::XmlParse(_)));
    }
}
