// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Typed `supporter` record
//!
//! The one table this crate works with directly. Well-known columns get
//! struct fields; anything else the server returns rides along in `extra`
//! so a fetched supporter can be saved back without losing columns.

use crate::error::{Error, Result};
use crate::http::{Params, XmlElement};

use super::connector::Connector;
use super::record::SalsaObject;

/// Table name for supporter records
pub const SUPPORTER_OBJECT: &str = "supporter";

/// A Salsa supporter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Supporter {
    /// `supporter_KEY`; 0 means unsaved
    pub key: u64,
    /// Email address, the column Salsa deduplicates on
    pub email: String,
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    /// Remaining columns, in response order
    pub extra: Vec<(String, String)>,
}

impl Supporter {
    /// Create an unsaved supporter with an email address
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            ..Self::default()
        }
    }

    /// Set the first name, builder style
    pub fn first_name(mut self, name: impl Into<String>) -> Self {
        self.first_name = name.into();
        self
    }

    /// Set the last name, builder style
    pub fn last_name(mut self, name: impl Into<String>) -> Self {
        self.last_name = name.into();
        self
    }

    /// Add a pass-through column, builder style
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.push((name.into(), value.into()));
        self
    }

    /// Validate the record at the boundary before saving.
    ///
    /// Salsa keys supporters on email; saving without one silently creates
    /// an unusable row, so it is rejected here instead.
    pub fn validated(self) -> Result<Self> {
        if self.email.trim().is_empty() {
            return Err(Error::invalid_record("supporter requires an email address"));
        }
        Ok(self)
    }

    /// Save this supporter through a connector.
    ///
    /// Returns true when the server acknowledged without an error marker.
    pub async fn save(&self, connector: &Connector) -> bool {
        let response = connector.save_object(SUPPORTER_OBJECT, self).await;
        connector.success(response.as_ref())
    }
}

impl SalsaObject for Supporter {
    fn object_name(&self) -> &str {
        SUPPORTER_OBJECT
    }

    fn key(&self) -> u64 {
        self.key
    }

    fn from_element(_object: &str, element: &XmlElement) -> Self {
        let mut supporter = Supporter::default();
        for child in &element.children {
            let value = child.text.trim().to_string();
            match child.name.as_str() {
                "supporter_KEY" | "key" => {
                    supporter.key = value.parse().unwrap_or(0);
                }
                "Email" => supporter.email = value,
                "First_Name" => supporter.first_name = value,
                "Last_Name" => supporter.last_name = value,
                _ => supporter.extra.push((child.name.clone(), value)),
            }
        }
        supporter
    }

    fn to_params(&self) -> Params {
        let mut params = Params::new();
        if self.key > 0 {
            params.push("key", self.key);
        }
        params.push("Email", self.email.clone());
        if !self.first_name.is_empty() {
            params.push("First_Name", self.first_name.clone());
        }
        if !self.last_name.is_empty() {
            params.push("Last_Name", self.last_name.clone());
        }
        for (name, value) in &self.extra {
            params.push(name.clone(), value.clone());
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_element() {
        let xml = XmlElement::parse(
            "<item>\
               <supporter_KEY>42</supporter_KEY>\
               <Email>a@b.com</Email>\
               <First_Name>Jo</First_Name>\
               <Last_Name>Bloggs</Last_Name>\
               <Zip>00100</Zip>\
             </item>",
        )
        .unwrap();
        let supporter = Supporter::from_element(SUPPORTER_OBJECT, &xml);
        assert_eq!(supporter.key, 42);
        assert_eq!(supporter.email, "a@b.com");
        assert_eq!(supporter.first_name, "Jo");
        assert_eq!(supporter.extra, vec![("Zip".to_string(), "00100".to_string())]);
    }

    #[test]
    fn test_to_params_round() {
        let supporter = Supporter::new("a@b.com")
            .first_name("Jo")
            .field("Zip", "00100");
        assert_eq!(
            supporter.to_params().serialize(),
            "Email=a%40b.com&First_Name=Jo&Zip=00100"
        );
    }

    #[test]
    fn test_validated_requires_email() {
        assert!(Supporter::new("a@b.com").validated().is_ok());
        let err = Supporter::default().validated().unwrap_err();
        assert!(matches!(err, Error::InvalidRecord(_)));
    }
}
