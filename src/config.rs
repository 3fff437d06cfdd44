// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Connector and bridge configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default request timeout, matching the short window the Salsa endpoints
/// are expected to answer within.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Configuration for a Salsa connection.
///
/// Credentials are held as plain strings; encrypted storage is the hosting
/// application's concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalsaConfig {
    /// Base URL of the Salsa server
    pub host: String,
    /// Account email used for the login handshake
    pub username: String,
    /// Account password
    pub password: String,
    /// Comma-separated list of form identifiers the bridge will forward
    #[serde(default)]
    pub enabled_forms: String,
    /// Per-request timeout
    #[serde(default = "default_timeout")]
    pub timeout: Duration,
    /// Force the https scheme on API calls
    #[serde(default = "default_true")]
    pub use_tls: bool,
    /// Skip certificate verification; the hosted Salsa endpoints have a
    /// long history of misconfigured chains
    #[serde(default = "default_true")]
    pub accept_invalid_certs: bool,
}

fn default_timeout() -> Duration {
    DEFAULT_TIMEOUT
}

fn default_true() -> bool {
    true
}

impl Default for SalsaConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            username: String::new(),
            password: String::new(),
            enabled_forms: String::new(),
            timeout: DEFAULT_TIMEOUT,
            use_tls: true,
            accept_invalid_certs: true,
        }
    }
}

impl SalsaConfig {
    /// Create a config with the three required connection values
    pub fn new(
        host: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            username: username.into(),
            password: password.into(),
            ..Self::default()
        }
    }

    /// Set the enabled-forms list (comma-separated identifiers)
    pub fn enabled_forms(mut self, forms: impl Into<String>) -> Self {
        self.enabled_forms = forms.into();
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set whether API calls are forced onto https
    pub fn use_tls(mut self, use_tls: bool) -> Self {
        self.use_tls = use_tls;
        self
    }

    /// Set whether invalid certificates are accepted
    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    /// True when host, username and password are all present
    pub fn is_complete(&self) -> bool {
        !self.host.trim().is_empty()
            && !self.username.trim().is_empty()
            && !self.password.trim().is_empty()
    }

    /// The host with the scheme normalized to `http://`.
    ///
    /// TLS requests re-upgrade the scheme at send time, so the stored base
    /// stays plain and a host pasted with either scheme behaves the same.
    pub fn normalized_host(&self) -> String {
        let host = self.host.trim().trim_end_matches('/');
        if let Some(rest) = host.strip_prefix("https://") {
            format!("http://{rest}")
        } else if host.starts_with("http://") {
            host.to_string()
        } else {
            format!("http://{host}")
        }
    }

    /// Parse the enabled-forms list into individual identifiers
    pub fn enabled_form_ids(&self) -> Vec<String> {
        self.enabled_forms
            .split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Check whether a form identifier is in the enabled list
    pub fn is_form_enabled(&self, form_id: &str) -> bool {
        self.enabled_form_ids().iter().any(|id| id == form_id)
    }
}
