// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Generic record mapping
//!
//! `SalsaObject` is the seam between parsed responses and table records:
//! each table type maps an `<item>` element into itself and flattens back
//! into save parameters. `Record` is the untyped variant for tables the
//! crate has no dedicated type for.

use crate::http::{Params, XmlElement};

use super::connector::Connector;

/// A record tied to a Salsa table
pub trait SalsaObject: Sized {
    /// The table this record belongs to
    fn object_name(&self) -> &str;

    /// Unique key within the table; 0 means unsaved
    fn key(&self) -> u64;

    /// Map a response `<item>` element into a record.
    ///
    /// `object` is the table the element was fetched from; typed
    /// implementations with a fixed table may ignore it.
    fn from_element(object: &str, element: &XmlElement) -> Self;

    /// Flatten the record's fields into save parameters
    fn to_params(&self) -> Params;
}

/// An untyped record: ordered field names and text values
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    object: String,
    key: u64,
    fields: Vec<(String, String)>,
}

impl Record {
    /// Create an empty, unsaved record for a table
    pub fn new(object: impl Into<String>) -> Self {
        Self {
            object: object.into(),
            key: 0,
            fields: Vec::new(),
        }
    }

    /// Build a record from plain key/value pairs
    pub fn from_pairs<K, V>(
        object: impl Into<String>,
        pairs: impl IntoIterator<Item = (K, V)>,
    ) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut record = Record::new(object);
        for (name, value) in pairs {
            record.set(name, value);
        }
        record
    }

    /// The record's key; 0 means unsaved
    pub fn key(&self) -> u64 {
        self.key
    }

    /// Set the record's key
    pub fn set_key(&mut self, key: u64) {
        self.key = key;
    }

    /// Value of a field, if set
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Set a field, replacing any existing value under the same name.
    /// A field named `key` updates the record key instead.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if name == "key" {
            self.key = value.trim().parse().unwrap_or(0);
            return;
        }
        if let Some(entry) = self.fields.iter_mut().find(|(k, _)| *k == name) {
            entry.1 = value;
        } else {
            self.fields.push((name, value));
        }
    }

    /// Set a field, builder style
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// The record's fields in insertion order
    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    /// Save this record through a connector.
    ///
    /// Returns true when the server acknowledged without an error marker.
    pub async fn save(&self, connector: &Connector) -> bool {
        let response = connector.save_object(&self.object, self).await;
        connector.success(response.as_ref())
    }
}

impl SalsaObject for Record {
    fn object_name(&self) -> &str {
        &self.object
    }

    fn key(&self) -> u64 {
        self.key
    }

    fn from_element(object: &str, element: &XmlElement) -> Self {
        let mut record = Record::new(object);
        for child in &element.children {
            record.set(child.name.clone(), child.text.trim().to_string());
        }
        record
    }

    fn to_params(&self) -> Params {
        let mut params = Params::new();
        if self.key > 0 {
            params.push("key", self.key);
        }
        for (name, value) in &self.fields {
            params.push(name.clone(), value.clone());
        }
        params
    }
}
