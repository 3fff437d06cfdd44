// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! # salsa-bridge - Salsa constituent API client
//!
//! A pure Rust client for the Salsa (Democracy In Action) API with a bridge
//! that forwards form submissions into supporter records.
//!
//! ## Features
//!
//! - Session-aware: one cookie-bearing client per connector, login handshake
//!   performed once at construction
//! - Salsa wire format: repeated-key parameter encoding without array
//!   brackets, XML responses parsed into a plain element tree
//! - Generic object operations: count, fetch, fetch-by-key, save - raw or
//!   mapped into typed records
//! - Non-fatal error model: failures accumulate as drainable messages and
//!   calls return `None` instead of panicking
//! - Form bridging: admin-labelled fields map onto supporter columns, gated
//!   by an enabled-forms list
//!
//! ## Example
//!
//! ```rust,no_run
//! use salsa_bridge::{Connector, FormDefinition, FormField, SalsaConfig, SubmissionBridge};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = SalsaConfig::new(
//!         "http://salsa.wiredforchange.com",
//!         "user@example.org",
//!         "hunter2",
//!     )
//!     .enabled_forms("3,7,9");
//!
//!     let connector = Connector::connect(config).await;
//!     let bridge = SubmissionBridge::new(connector);
//!
//!     let form = FormDefinition::new("7").field(FormField::labeled(1, "Email"));
//!     let entry = [(1, "a@b.com".to_string())].into_iter().collect();
//!
//!     let outcome = bridge.handle_submission(&form, &entry).await;
//!     println!("submission: {:?}", outcome);
//! }
//! ```

pub mod bridge;
pub mod config;
pub mod error;
pub mod http;
pub mod salsa;

// Re-exports for convenience

// Bridge
pub use bridge::{
    FormDefinition, FormField, SubmissionBridge, SubmissionEntry, SubmissionOutcome,
    GENERIC_FAILURE_MESSAGE,
};

// Configuration
pub use config::{SalsaConfig, DEFAULT_TIMEOUT};

// Errors
pub use error::{Error, Result};

// HTTP
pub use http::{ParamValue, Params, Transport, TransportConfig, XmlElement};

// Salsa API
pub use salsa::{Connector, QueryOptions, Record, SalsaObject, Supporter};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
