//! Configuration constants and validation functions.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{ConfigFileError, Result};

/// Attribute holding the entry key on `<add>`/`<remove>` elements.
pub const DEFAULT_KEY_ATTRIBUTE: &str = "key";

/// Attribute holding the entry value on `<add>` elements.
pub const DEFAULT_VALUE_ATTRIBUTE: &str = "value";

/// Key attribute used by `<connectionStrings>` entries.
pub const CONNECTION_STRING_KEY_ATTRIBUTE: &str = "name";

/// Value attribute used by `<connectionStrings>` entries.
pub const CONNECTION_STRING_VALUE_ATTRIBUTE: &str = "connectionString";

/// Section holding application settings.
pub const APP_SETTINGS_SECTION: &str = "appSettings";

/// Framework sections the key/value parser never reads.
///
/// These blocks use `<add>`/`<remove>` for framework-native registrations
/// (handlers, modules, providers) that are not application settings.
pub const KEY_VALUE_UNSUPPORTED_ELEMENTS: &[&str] = &[
    "configSections",
    "system.web",
    "system.webServer",
    "entityFramework",
    "runtime",
];

/// Sections the subtree parser never serializes.
///
/// Includes `appSettings`, which is always read as key/value pairs.
pub const SUBTREE_UNSUPPORTED_ELEMENTS: &[&str] = &[
    "configSections",
    "appSettings",
    "system.web",
    "system.webServer",
    "entityFramework",
    "runtime",
];

/// Attribute name pattern: XML name start char followed by name chars, no prefix.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static ATTRIBUTE_NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_.\-]*$").expect("valid regex"));

/// Validate an attribute name used to configure a parser.
///
/// # Examples
/// ```
/// use configfile::config::validate_attribute_name;
///
/// assert!(validate_attribute_name("connectionString").is_ok());
/// assert!(validate_attribute_name("").is_err());
/// assert!(validate_attribute_name("two words").is_err());
/// ```
pub fn validate_attribute_name(name: &str) -> Result<()> {
    if ATTRIBUTE_NAME_PATTERN.is_match(name) {
        Ok(())
    } else {
        Err(ConfigFileError::InvalidAttributeName(name.to_string()))
    }
}
