//! Types for the element parser system.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::path::{combine, compose_key};

/// Flattened configuration entries, sorted by key.
///
/// `None` marks a key that was added without a value.
pub type ConfigData = BTreeMap<String, Option<String>>;

/// Classification of element parsers, used when logging dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserKind {
    /// `<add>`/`<remove>` attribute pairs.
    KeyValue,
    /// Leaf elements captured as serialized blobs.
    Subtree,
    /// Caller-supplied parser.
    Custom,
}

/// Mutation verb carried by an element name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigurationAction {
    Add,
    Remove,
}

impl ConfigurationAction {
    /// All recognized actions.
    pub const ALL: [ConfigurationAction; 2] = [Self::Add, Self::Remove];

    /// The element name for this action.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Remove => "remove",
        }
    }

    /// Check whether `name` is an action keyword, ignoring ASCII case.
    #[must_use]
    pub fn is_keyword(name: &str) -> bool {
        name.parse::<Self>().is_ok()
    }
}

impl FromStr for ConfigurationAction {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|action| action.as_str().eq_ignore_ascii_case(s))
            .ok_or(())
    }
}

impl fmt::Display for ConfigurationAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticLevel {
    Info,
    Warning,
}

/// A message recorded while flattening a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.level {
            DiagnosticLevel::Info => "info",
            DiagnosticLevel::Warning => "warning",
        };
        write!(f, "{level}: {}", self.message)
    }
}

/// Context passed through parsing operations.
///
/// Holds the stack of ancestor element names used to build composite keys
/// and collects diagnostics. Each recorded diagnostic is also emitted via
/// `tracing`.
#[derive(Debug, Default)]
pub struct ParseContext {
    path: Vec<String>,
    diagnostics: Vec<Diagnostic>,
}

impl ParseContext {
    /// Create an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter an element.
    pub fn push(&mut self, name: impl Into<String>) {
        self.path.push(name.into());
    }

    /// Leave the most recently entered element.
    pub fn pop(&mut self) -> Option<String> {
        self.path.pop()
    }

    /// Ancestor names, root first.
    #[must_use]
    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// Number of elements currently entered.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.path.len()
    }

    /// Composite key for `name` at the current position.
    #[must_use]
    pub fn key(&self, name: &str) -> String {
        compose_key(&self.path, name)
    }

    /// Record an informational diagnostic.
    pub fn info(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::info!(path = %combine(&self.path), "{message}");
        self.diagnostics.push(Diagnostic {
            level: DiagnosticLevel::Info,
            message,
        });
    }

    /// Record a warning diagnostic.
    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(path = %combine(&self.path), "{message}");
        self.diagnostics.push(Diagnostic {
            level: DiagnosticLevel::Warning,
            message,
        });
    }

    /// Diagnostics recorded so far.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Take ownership of the recorded diagnostics.
    #[must_use]
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

/// Outcome of flattening one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlattenResult {
    /// The flattened entries.
    pub data: ConfigData,
    /// Diagnostics in the order they were recorded.
    pub diagnostics: Vec<Diagnostic>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_parse_ignores_case() {
        assert_eq!("add".parse::<ConfigurationAction>(), Ok(ConfigurationAction::Add));
        assert_eq!("ADD".parse::<ConfigurationAction>(), Ok(ConfigurationAction::Add));
        assert_eq!("Remove".parse::<ConfigurationAction>(), Ok(ConfigurationAction::Remove));
        assert!("clear".parse::<ConfigurationAction>().is_err());
    }

    #[test]
    fn test_action_is_keyword() {
        assert!(ConfigurationAction::is_keyword("Add"));
        assert!(!ConfigurationAction::is_keyword("appSettings"));
    }

    #[test]
    fn test_context_push_pop_and_key() {
        let mut ctx = ParseContext::new();
        assert_eq!(ctx.key("X"), "X");

        ctx.push("b");
        ctx.push("c");
        assert_eq!(ctx.depth(), 2);
        assert_eq!(ctx.key("N1"), "b:c:N1");

        assert_eq!(ctx.pop(), Some("c".to_string()));
        assert_eq!(ctx.key("N1"), "b:N1");
    }

    #[test]
    fn test_context_collects_diagnostics() {
        let mut ctx = ParseContext::new();
        ctx.info("first");
        ctx.warn("second");

        let diagnostics = ctx.into_diagnostics();
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics[0].level, DiagnosticLevel::Info);
        assert_eq!(diagnostics[1].to_string(), "warning: second");
    }
}
