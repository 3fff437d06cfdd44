// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP layer for the Salsa client
//!
//! Provides the always-POST transport with session cookies, Salsa's
//! repeated-key parameter serialization, and the XML response model.

mod params;
mod transport;
mod xml;

pub use params::{urlencode, ParamValue, Params};
pub use transport::{Transport, TransportConfig};
pub use xml::XmlElement;

/// Default user agent string
pub const DEFAULT_USER_AGENT: &str = concat!("salsa-bridge/", env!("CARGO_PKG_VERSION"));
