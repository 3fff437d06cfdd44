// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! XML response model
//!
//! Salsa's API answers with small XML documents. Responses are event-parsed
//! into a plain element tree: name, attributes, text and children. The
//! server signals failures in-band with an `<error>` child on the root
//! element, surfaced here as the error marker.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{Error, Result};

/// A parsed XML element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    /// Element name (namespace prefix stripped)
    pub name: String,
    /// Attributes in document order
    pub attributes: Vec<(String, String)>,
    /// Concatenated text content of this element
    pub text: String,
    /// Child elements in document order
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    /// Parse a response body into an element tree.
    ///
    /// Returns the root element; anything after the first root is ignored.
    pub fn parse(input: &str) -> Result<Self> {
        let mut reader = Reader::from_str(input);
        reader.config_mut().trim_text(true);

        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root: Option<XmlElement> = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) => stack.push(Self::from_start(e)),
                Ok(Event::Empty(ref e)) => {
                    let element = Self::from_start(e);
                    Self::attach(&mut stack, &mut root, element);
                }
                Ok(Event::Text(ref e)) => {
                    if let Some(top) = stack.last_mut() {
                        top.text.push_str(&e.unescape().unwrap_or_default());
                    }
                }
                Ok(Event::CData(ref e)) => {
                    if let Some(top) = stack.last_mut() {
                        top.text.push_str(&String::from_utf8_lossy(e));
                    }
                }
                Ok(Event::End(_)) => {
                    if let Some(element) = stack.pop() {
                        Self::attach(&mut stack, &mut root, element);
                    }
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => {
                    return Err(Error::invalid_response(format!("malformed XML: {e}")));
                }
            }
        }

        root.ok_or_else(|| Error::invalid_response("document has no root element"))
    }

    fn from_start(e: &BytesStart<'_>) -> XmlElement {
        let name = String::from_utf8_lossy(e.local_name().into_inner()).to_string();
        let mut attributes = Vec::new();
        for attr in e.attributes().flatten() {
            let key = String::from_utf8_lossy(attr.key.local_name().into_inner()).to_string();
            let value = String::from_utf8_lossy(&attr.value).to_string();
            attributes.push((key, value));
        }
        XmlElement {
            name,
            attributes,
            text: String::new(),
            children: Vec::new(),
        }
    }

    fn attach(stack: &mut Vec<XmlElement>, root: &mut Option<XmlElement>, element: XmlElement) {
        match stack.last_mut() {
            Some(parent) => parent.children.push(element),
            None => {
                if root.is_none() {
                    *root = Some(element);
                }
            }
        }
    }

    /// Value of an attribute, if present
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// First child element with the given name
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.name == name)
    }

    /// All child elements with the given name, in document order
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// The server's error marker, if this response carries one
    pub fn error_message(&self) -> Option<&str> {
        self.child("error").map(|e| e.text.trim())
    }

    /// True when an error marker is present
    pub fn has_error(&self) -> bool {
        self.error_message().is_some()
    }
}
