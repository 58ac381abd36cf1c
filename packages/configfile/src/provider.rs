//! Configuration provider for `.config` documents.

use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

use crate::configuration::ConfigurationProvider;
use crate::error::{ConfigFileError, Result};
use crate::parsers::{ConfigData, Diagnostic, FlattenEngine, ParserChain};

/// Where a provider reads its document from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentInput {
    /// The document text itself.
    Text(String),
    /// A file on disk. A missing optional file loads as an empty map.
    File { path: PathBuf, optional: bool },
}

/// Provider that flattens one `.config` document.
///
/// Until [`load`](ConfigurationProvider::load) succeeds the map is empty. A
/// failed load keeps whatever the previous successful load produced.
#[derive(Debug, Clone)]
pub struct ConfigFileProvider {
    input: DocumentInput,
    engine: FlattenEngine,
    data: ConfigData,
    diagnostics: Vec<Diagnostic>,
}

impl ConfigFileProvider {
    /// Create a provider for the given input and parser chain.
    #[must_use]
    pub fn new(input: DocumentInput, chain: ParserChain) -> Self {
        Self {
            input,
            engine: FlattenEngine::new(chain),
            data: ConfigData::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Create a provider reading document text.
    #[must_use]
    pub fn from_text(text: impl Into<String>, chain: ParserChain) -> Self {
        Self::new(DocumentInput::Text(text.into()), chain)
    }

    /// Create a provider reading a file.
    #[must_use]
    pub fn from_file(path: impl Into<PathBuf>, optional: bool, chain: ParserChain) -> Self {
        Self::new(
            DocumentInput::File {
                path: path.into(),
                optional,
            },
            chain,
        )
    }

    /// The input this provider reads.
    #[must_use]
    pub fn input(&self) -> &DocumentInput {
        &self.input
    }

    /// The file path, for file-backed providers.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match &self.input {
            DocumentInput::File { path, .. } => Some(path),
            DocumentInput::Text(_) => None,
        }
    }

    /// Diagnostics from the last successful load.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Read the document text. `None` means an optional file is missing.
    fn read_document(&self) -> Result<Option<Cow<'_, str>>> {
        match &self.input {
            DocumentInput::Text(text) => Ok(Some(Cow::Borrowed(text.as_str()))),
            DocumentInput::File { path, optional } => {
                if path.is_file() {
                    Ok(Some(Cow::Owned(fs::read_to_string(path)?)))
                } else if *optional {
                    tracing::debug!(path = %path.display(), "Optional configuration file not found");
                    Ok(None)
                } else {
                    Err(ConfigFileError::FileNotFound(path.clone()))
                }
            }
        }
    }
}

impl ConfigurationProvider for ConfigFileProvider {
    fn load(&mut self) -> Result<()> {
        let result = match self.read_document()? {
            Some(text) => self.engine.flatten_str(&text)?,
            None => Default::default(),
        };

        tracing::debug!(
            entries = result.data.len(),
            diagnostics = result.diagnostics.len(),
            "Loaded configuration document"
        );

        self.data = result.data;
        self.diagnostics = result.diagnostics;
        Ok(())
    }

    fn data(&self) -> &ConfigData {
        &self.data
    }
}
