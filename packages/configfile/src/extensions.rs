//! Query helpers over a loaded [`Configuration`].

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::config::APP_SETTINGS_SECTION;
use crate::configuration::{Configuration, ConfigurationSection};
use crate::error::{ConfigFileError, Result};
use crate::path::combine;
use crate::xml::ATTRIBUTE_PREFIX;

/// Convenience lookups for `.config` shaped configuration.
pub trait ConfigurationExt {
    /// Value of `<appSettings><add key="name" .../>`.
    fn get_app_setting(&self, name: &str) -> Option<&str>;

    /// Children of the section at the joined `names`, keyed by child key.
    fn get_sections(&self, names: &[&str]) -> BTreeMap<String, ConfigurationSection<'_>>;

    /// Value at the joined `keys`.
    ///
    /// # Errors
    /// Returns `EmptyKeys` if `keys` is empty.
    fn get_value(&self, keys: &[&str]) -> Result<Option<&str>>;

    /// Read a serialized element back as JSON, with attribute markers removed.
    ///
    /// `{"app":{"@endpoint":"x"}}` yields `{"endpoint":"x"}`.
    ///
    /// # Errors
    /// Returns `EmptyKeys`, `MissingValue`, `Json` or `UnexpectedShape`.
    fn get_value_dynamic(&self, keys: &[&str]) -> Result<Value>;

    /// Like [`get_value_dynamic`](ConfigurationExt::get_value_dynamic), then
    /// deserialized into `T`.
    ///
    /// Field names match attribute names exactly. Use `#[serde(rename)]` or
    /// `#[serde(rename_all)]` on `T` when the casing differs.
    ///
    /// # Errors
    /// Same as `get_value_dynamic`, plus `Json` if `T` does not fit.
    fn get_value_as<T: DeserializeOwned>(&self, keys: &[&str]) -> Result<T> {
        Ok(serde_json::from_value(self.get_value_dynamic(keys)?)?)
    }
}

impl ConfigurationExt for Configuration {
    fn get_app_setting(&self, name: &str) -> Option<&str> {
        self.get(&combine([APP_SETTINGS_SECTION, name]))
    }

    fn get_sections(&self, names: &[&str]) -> BTreeMap<String, ConfigurationSection<'_>> {
        if names.is_empty() {
            return BTreeMap::new();
        }

        self.get_section(&combine(names))
            .get_children()
            .into_iter()
            .map(|section| (section.key().to_string(), section))
            .collect()
    }

    fn get_value(&self, keys: &[&str]) -> Result<Option<&str>> {
        if keys.is_empty() {
            return Err(ConfigFileError::EmptyKeys);
        }
        Ok(self.get(&combine(keys)))
    }

    fn get_value_dynamic(&self, keys: &[&str]) -> Result<Value> {
        if keys.is_empty() {
            return Err(ConfigFileError::EmptyKeys);
        }

        let key = combine(keys);
        let raw = self
            .get(&key)
            .ok_or_else(|| ConfigFileError::MissingValue(key.clone()))?;

        match serde_json::from_str::<Value>(raw)? {
            Value::Object(members) => members
                .into_iter()
                .next()
                .map(|(_, value)| strip_attribute_prefix(value))
                .ok_or(ConfigFileError::UnexpectedShape(key)),
            _ => Err(ConfigFileError::UnexpectedShape(key)),
        }
    }
}

fn strip_attribute_prefix(value: Value) -> Value {
    match value {
        Value::Object(members) => Value::Object(
            members
                .into_iter()
                .map(|(name, value)| {
                    let name = match name.strip_prefix(ATTRIBUTE_PREFIX) {
                        Some(stripped) => stripped.to_string(),
                        None => name,
                    };
                    (name, strip_attribute_prefix(value))
                })
                .collect::<Map<String, Value>>(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(strip_attribute_prefix).collect()),
        other => other,
    }
}
