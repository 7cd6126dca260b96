use std::collections::BTreeMap;

use log::debug;

use crate::document::{Declaration, Document};
use crate::encoding::CharacterEncoding;
use crate::error::{Error, Result};
use crate::serialize::SerializeOptions;

/// A tidy option value.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum TidyValue {
    Bool(bool),
    Int(i64),
    Str(String),
}

impl From<bool> for TidyValue {
    fn from(value: bool) -> Self {
        TidyValue::Bool(value)
    }
}

impl From<i64> for TidyValue {
    fn from(value: i64) -> Self {
        TidyValue::Int(value)
    }
}

impl From<&str> for TidyValue {
    fn from(value: &str) -> Self {
        TidyValue::Str(value.to_string())
    }
}

impl TidyValue {
    fn as_bool(&self) -> Option<bool> {
        match self {
            TidyValue::Bool(value) => Some(*value),
            TidyValue::Int(value) => Some(*value != 0),
            TidyValue::Str(value) => match value.as_str() {
                "yes" | "true" | "1" => Some(true),
                "no" | "false" | "0" => Some(false),
                _ => None,
            },
        }
    }

    fn as_int(&self) -> Option<i64> {
        match self {
            TidyValue::Int(value) => Some(*value),
            TidyValue::Str(value) => value.parse().ok(),
            TidyValue::Bool(_) => None,
        }
    }
}

/// Options for the tidy pass, keyed by tidy option name.
///
/// Defaults to `indent`, four `indent-spaces`, XML input and output, and a
/// `wrap` column of 1000.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct TidyConfig {
    options: BTreeMap<String, TidyValue>,
}

impl Default for TidyConfig {
    fn default() -> Self {
        let mut config = TidyConfig::empty();
        config
            .set("indent", true)
            .set("indent-spaces", 4i64)
            .set("output-xml", true)
            .set("input-xml", true)
            .set("wrap", 1000i64);
        config
    }
}

impl TidyConfig {
    /// A configuration without any options set.
    pub fn empty() -> Self {
        TidyConfig {
            options: BTreeMap::new(),
        }
    }

    pub fn set<V: Into<TidyValue>>(&mut self, name: &str, value: V) -> &mut Self {
        self.options.insert(name.to_string(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&TidyValue> {
        self.options.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TidyValue)> + '_ {
        self.options
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    fn get_bool(&self, name: &str, default: bool) -> bool {
        self.get(name).and_then(TidyValue::as_bool).unwrap_or(default)
    }

    fn get_int(&self, name: &str, default: i64) -> i64 {
        self.get(name).and_then(TidyValue::as_int).unwrap_or(default)
    }

    pub fn indent(&self) -> bool {
        self.get_bool("indent", false)
    }

    pub fn indent_spaces(&self) -> usize {
        self.get_int("indent-spaces", 2).max(0) as usize
    }

    pub fn input_xml(&self) -> bool {
        self.get_bool("input-xml", true)
    }

    pub fn output_xml(&self) -> bool {
        self.get_bool("output-xml", true)
    }

    /// The line wrap column; 0 means no wrapping.
    pub fn wrap(&self) -> usize {
        self.get_int("wrap", 0).max(0) as usize
    }
}

/// A reformatting and repair service for XML text.
pub trait Tidy {
    /// Reformat `xml` according to `config`, for output in `encoding`.
    fn repair(&self, xml: &str, config: &TidyConfig, encoding: CharacterEncoding)
        -> Result<String>;
}

/// The built-in [`Tidy`]: re-serializes a well-formed document with
/// indentation.
///
/// The encoding label of an existing XML declaration is rewritten to the
/// output encoding. Without a declaration one is added, unless the output
/// is `utf8` or `raw`.
///
/// It can not repair malformed input; that fails as a parse error. The
/// `wrap` option is accepted but lines are not wrapped.
#[derive(Debug, Clone, Copy, Default)]
pub struct Reformatter;

impl Tidy for Reformatter {
    fn repair(
        &self,
        xml: &str,
        config: &TidyConfig,
        encoding: CharacterEncoding,
    ) -> Result<String> {
        if !config.input_xml() || !config.output_xml() {
            return Err(Error::TidyFailed(
                "only XML input and output are supported".to_string(),
            ));
        }
        let mut document = Document::parse(xml)?;
        if let Some(label) = encoding.label() {
            match document.declaration_mut() {
                Some(declaration) => declaration.encoding = Some(label.to_string()),
                // UTF-8 is what a reader assumes without a declaration
                None if encoding != CharacterEncoding::Utf8 => {
                    document.declaration = Some(Declaration {
                        version: "1.0".to_string(),
                        encoding: Some(label.to_string()),
                        standalone: None,
                    });
                }
                None => {}
            }
        }
        let indent = config.indent().then(|| config.indent_spaces());
        debug!("reformatting with indent {:?} for {}", indent, encoding);
        Ok(document.serialize_with(SerializeOptions { indent }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TidyConfig::default();
        assert!(config.indent());
        assert_eq!(config.indent_spaces(), 4);
        assert!(config.input_xml());
        assert!(config.output_xml());
        assert_eq!(config.wrap(), 1000);
    }

    #[test]
    fn test_string_values() {
        let mut config = TidyConfig::empty();
        config.set("indent", "yes").set("indent-spaces", "3");
        assert!(config.indent());
        assert_eq!(config.indent_spaces(), 3);
    }

    #[test]
    fn test_rejects_non_xml_output() {
        let mut config = TidyConfig::default();
        config.set("output-xml", false);
        let err = Reformatter
            .repair("<a/>", &config, CharacterEncoding::Utf8)
            .unwrap_err();
        assert!(matches!(err, Error::TidyFailed(_)));
    }

    #[test]
    fn test_adds_declaration_for_non_utf8() {
        let output = Reformatter
            .repair("<a/>", &TidyConfig::default(), CharacterEncoding::Latin1)
            .unwrap();
        assert_eq!(
            output,
            "<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?>\n<a/>\n"
        );
        let output = Reformatter
            .repair("<a/>", &TidyConfig::default(), CharacterEncoding::Utf8)
            .unwrap();
        assert_eq!(output, "<a/>\n");
    }

    #[test]
    fn test_rewrites_declared_encoding() {
        let xml = "<?xml version=\"1.0\" encoding=\"utf-8\"?><a><b/></a>";
        let output = Reformatter
            .repair(xml, &TidyConfig::default(), CharacterEncoding::Latin1)
            .unwrap();
        assert_eq!(
            output,
            "<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?>\n<a>\n    <b/>\n</a>\n"
        );
    }
}
