use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::EditError;
use crate::parse::{PatternMode, parse_hex_bytes, parse_hex_usize};

/// Named string arguments for one operation
///
/// Numbers are hexadecimal text; byte payloads are hex byte strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OpArgs(BTreeMap<String, String>);

impl OpArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, name: &str, value: impl Into<String>) -> Self {
        self.0.insert(name.to_string(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    fn require(&self, name: &str) -> Result<&str, EditError> {
        self.get(name).ok_or_else(|| EditError::MissingArgument {
            name: name.to_string(),
        })
    }

    /// Required hexadecimal integer
    pub fn offset(&self, name: &str) -> Result<usize, EditError> {
        parse_hex_usize(name, self.require(name)?)
    }

    /// Optional hexadecimal integer, `default` when absent
    pub fn offset_or(&self, name: &str, default: usize) -> Result<usize, EditError> {
        match self.get(name) {
            Some(text) => parse_hex_usize(name, text),
            None => Ok(default),
        }
    }

    /// Required hexadecimal length; zero is allowed, bounds are the caller's concern
    pub fn length(&self, name: &str) -> Result<usize, EditError> {
        self.offset(name)
    }

    /// Required byte value in `0..=0xFF`
    pub fn byte(&self, name: &str) -> Result<u8, EditError> {
        let value = self.offset(name)?;
        u8::try_from(value)
            .map_err(|_| EditError::invalid(name, format!("0x{:X} does not fit in a byte", value)))
    }

    /// Required hex byte payload, possibly empty
    pub fn bytes(&self, name: &str) -> Result<Vec<u8>, EditError> {
        parse_hex_bytes(self.require(name)?)
    }

    /// Required free-form text
    pub fn text(&self, name: &str) -> Result<&str, EditError> {
        self.require(name)
    }

    pub fn pattern_mode(&self) -> Result<PatternMode, EditError> {
        self.get("mode").unwrap_or("auto").parse()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for OpArgs {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
