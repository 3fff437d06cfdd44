// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Salsa API surface: connector, query options and record types

mod connector;
mod record;
mod supporter;

pub use connector::{Connector, QueryOptions};
pub use record::{Record, SalsaObject};
pub use supporter::{Supporter, SUPPORTER_OBJECT};

/// API endpoint paths, resolved against the configured host
pub mod endpoints {
    pub const AUTHENTICATE: &str = "/api/authenticate.sjs";
    pub const GET_COUNT: &str = "/api/getCount.sjs";
    pub const GET_OBJECTS: &str = "/api/getObjects.sjs";
    pub const GET_OBJECT: &str = "/api/getObject.sjs";
    pub const SAVE: &str = "/save";
}
