// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Salsa parameter serialization
//!
//! Salsa does not understand `key[]=` array-bracket encoding: a key with
//! multiple values must be repeated verbatim, once per value. `Params`
//! keeps insertion order and serializes with that convention.

/// A single parameter value: a scalar, a positional sequence, or a set of
/// named sub-keys that override the outer key entirely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    /// One value under the outer key
    Scalar(String),
    /// Repeated values, each emitted under the outer key
    List(Vec<String>),
    /// Named values, each emitted under its own sub-key
    Pairs(Vec<(String, String)>),
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Scalar(v.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        ParamValue::Scalar(v)
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        ParamValue::Scalar(v.to_string())
    }
}

impl From<u64> for ParamValue {
    fn from(v: u64) -> Self {
        ParamValue::Scalar(v.to_string())
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(v: Vec<String>) -> Self {
        ParamValue::List(v)
    }
}

impl From<Vec<&str>> for ParamValue {
    fn from(v: Vec<&str>) -> Self {
        ParamValue::List(v.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<(String, String)>> for ParamValue {
    fn from(v: Vec<(String, String)>) -> Self {
        ParamValue::Pairs(v)
    }
}

/// An ordered parameter list for a single request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    entries: Vec<(String, ParamValue)>,
}

impl Params {
    /// Create an empty parameter list
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        self.entries.push((key.into(), value.into()));
    }

    /// Append a parameter, builder style
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.push(key, value);
        self
    }

    /// Append all entries from another list
    pub fn extend(&mut self, other: Params) {
        self.entries.extend(other.entries);
    }

    /// Number of entries (not emitted pairs)
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no parameters have been added
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First value recorded under a key, if any
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Iterate entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &(String, ParamValue)> {
        self.entries.iter()
    }

    /// Serialize into a URL-encoded query string.
    ///
    /// Keys are emitted as-is; only values are percent-encoded. Sequence
    /// values repeat the key without bracket suffixes; named pairs emit
    /// their sub-key instead of the outer key.
    pub fn serialize(&self) -> String {
        let mut pairs = Vec::new();
        for (key, value) in &self.entries {
            match value {
                ParamValue::Scalar(v) => pairs.push(format!("{}={}", key, urlencode(v))),
                ParamValue::List(vs) => {
                    for v in vs {
                        pairs.push(format!("{}={}", key, urlencode(v)));
                    }
                }
                ParamValue::Pairs(ps) => {
                    for (sub_key, v) in ps {
                        pairs.push(format!("{}={}", sub_key, urlencode(v)));
                    }
                }
            }
        }
        pairs.join("&")
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for Params {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut params = Params::new();
        for (key, value) in iter {
            params.push(key, value);
        }
        params
    }
}

/// URL encode a value (space as `+`, unreserved characters untouched)
pub fn urlencode(s: &str) -> String {
    let mut result = String::new();
    for c in s.chars() {
        match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_' | '.' | '~' => result.push(c),
            ' ' => result.push('+'),
            _ => {
                for byte in c.to_string().bytes() {
                    result.push_str(&format!("%{:02X}", byte));
                }
            }
        }
    }
    result
}
