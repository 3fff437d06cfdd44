// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Salsa API connector
//!
//! Owns one transport (and with it one cookie session), performs the login
//! handshake on construction, and exposes the generic object operations.
//! Expected failures never panic and never abort construction: they are
//! recorded into the error list and the failing call returns `None`.

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::config::SalsaConfig;
use crate::error::{Error, MSG_AUTH_FAILED};
use crate::http::{Params, Transport, TransportConfig, XmlElement};

use super::endpoints;
use super::record::SalsaObject;

/// Ordering, paging and field-selection options for object queries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryOptions {
    /// Fields to sort by
    pub order_by: Vec<String>,
    /// Maximum number of results
    pub limit: Option<u32>,
    /// Starting offset of the results
    pub offset: Option<u32>,
    /// Fields to include in the results
    pub include: Vec<String>,
}

impl QueryOptions {
    /// Create empty options
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sort field
    pub fn order_by(mut self, field: impl Into<String>) -> Self {
        self.order_by.push(field.into());
        self
    }

    /// Set the result limit
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set the result offset
    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Add a field to include in the results
    pub fn include(mut self, field: impl Into<String>) -> Self {
        self.include.push(field.into());
        self
    }

    fn apply(&self, params: &mut Params) {
        if !self.order_by.is_empty() {
            params.push("orderBy", self.order_by.clone());
        }
        if let Some(limit) = self.limit {
            params.push("limit", limit.to_string());
        }
        if let Some(offset) = self.offset {
            params.push("offset", offset.to_string());
        }
        if !self.include.is_empty() {
            params.push("include", self.include.clone());
        }
    }
}

/// Connection to a Salsa server.
///
/// Constructed explicitly from a [`SalsaConfig`] and passed to whatever
/// needs it; there is no global instance.
pub struct Connector {
    config: SalsaConfig,
    transport: Option<Transport>,
    organization_key: Option<String>,
    errors: Mutex<Vec<String>>,
}

impl Connector {
    /// Connect and authenticate.
    ///
    /// Always returns a connector. With incomplete credentials no request
    /// is attempted: a configuration error is recorded and the transport
    /// is left unopened, so later calls fail gracefully. A rejected or
    /// failed handshake is likewise recorded and leaves the connector
    /// unauthenticated.
    pub async fn connect(config: SalsaConfig) -> Self {
        let mut conn = Self {
            config,
            transport: None,
            organization_key: None,
            errors: Mutex::new(Vec::new()),
        };

        if !conn.config.is_complete() {
            warn!("host or credentials missing; connector left unconfigured");
            conn.record(Error::config("host, username and password are all required"));
            return conn;
        }

        let transport_config = TransportConfig {
            timeout: conn.config.timeout,
            accept_invalid_certs: conn.config.accept_invalid_certs,
            ..TransportConfig::default()
        };
        let transport = match Transport::open(conn.config.normalized_host(), &transport_config) {
            Ok(transport) => transport,
            Err(e) => {
                conn.record(e);
                return conn;
            }
        };

        let params = Params::new()
            .with("email", conn.config.username.clone())
            .with("password", conn.config.password.clone());
        match transport
            .post(endpoints::AUTHENTICATE, &params, conn.config.use_tls)
            .await
        {
            Ok(auth) => {
                if let Some(message) = auth.error_message() {
                    warn!(message, "authentication rejected");
                    conn.push_error(MSG_AUTH_FAILED);
                } else {
                    conn.organization_key =
                        auth.attribute("organization_KEY").map(str::to_string);
                    info!(
                        organization_key = conn.organization_key.as_deref().unwrap_or(""),
                        "authenticated with Salsa"
                    );
                }
            }
            Err(e) => conn.record(e),
        }

        conn.transport = Some(transport);
        conn
    }

    /// The configuration this connector was built from
    pub fn config(&self) -> &SalsaConfig {
        &self.config
    }

    /// The organization key returned at login, if authenticated
    pub fn organization_key(&self) -> Option<&str> {
        self.organization_key.as_deref()
    }

    /// True when the login handshake succeeded
    pub fn is_authenticated(&self) -> bool {
        self.organization_key.is_some()
    }

    /// True iff the response exists and carries no error marker
    pub fn success(&self, response: Option<&XmlElement>) -> bool {
        matches!(response, Some(xml) if !xml.has_error())
    }

    /// Append error messages to the accumulated list
    pub fn add_errors<I, S>(&self, errors: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut list = self.errors.lock();
        list.extend(errors.into_iter().map(Into::into));
    }

    /// The accumulated error messages. With `reset`, the list is drained;
    /// otherwise it is left unchanged.
    pub fn get_errors(&self, reset: bool) -> Vec<String> {
        let mut list = self.errors.lock();
        if reset {
            std::mem::take(&mut *list)
        } else {
            list.clone()
        }
    }

    /// True when any errors have accumulated
    pub fn has_errors(&self) -> bool {
        !self.errors.lock().is_empty()
    }

    fn push_error(&self, message: impl Into<String>) {
        self.errors.lock().push(message.into());
    }

    fn record(&self, err: Error) {
        warn!(error = %err, "salsa operation failed");
        self.push_error(err.user_message());
    }

    /// POST to an API path and parse the XML response.
    ///
    /// A response with an error marker is returned as-is after the marker's
    /// message is recorded; transport and parse failures are recorded and
    /// yield `None`.
    pub async fn post(&self, path: &str, params: &Params) -> Option<XmlElement> {
        let Some(transport) = &self.transport else {
            self.record(Error::config("connector is not configured"));
            return None;
        };
        match transport.post(path, params, self.config.use_tls).await {
            Ok(xml) => {
                if let Some(message) = xml.error_message() {
                    warn!(path, message, "server reported an error");
                    self.push_error(message.to_string());
                }
                Some(xml)
            }
            Err(e) => {
                self.record(e);
                None
            }
        }
    }

    /// POST to an API path and parse the JSON response
    pub async fn post_json(&self, path: &str, params: &Params) -> Option<serde_json::Value> {
        let Some(transport) = &self.transport else {
            self.record(Error::config("connector is not configured"));
            return None;
        };
        match transport.post_json(path, params).await {
            Ok(value) => Some(value),
            Err(e) => {
                self.record(e);
                None
            }
        }
    }

    /// POST to a non-API form endpoint and return the raw body
    pub async fn submit_form(&self, path: &str, params: &Params) -> Option<String> {
        let Some(transport) = &self.transport else {
            self.record(Error::config("connector is not configured"));
            return None;
        };
        match transport.submit_form(path, params).await {
            Ok(body) => Some(body),
            Err(e) => {
                self.record(e);
                None
            }
        }
    }

    fn query_params(table: &str, conditions: &[&str], options: &QueryOptions) -> Params {
        let mut params = Params::new();
        params.push("object", table);
        if !conditions.is_empty() {
            params.push("condition", conditions.to_vec());
        }
        options.apply(&mut params);
        params
    }

    /// Count the objects in a table matching the given conditions
    pub async fn get_count(
        &self,
        table: &str,
        conditions: &[&str],
        options: &QueryOptions,
    ) -> Option<u64> {
        let params = Self::query_params(table, conditions, options);
        let xml = self.post(endpoints::GET_COUNT, &params).await?;
        if xml.has_error() {
            return None;
        }
        let count = xml.child(table)?.child("count")?;
        match count.text.trim().parse() {
            Ok(n) => Some(n),
            Err(_) => {
                self.record(Error::invalid_response(format!(
                    "non-numeric count for table {table}"
                )));
                None
            }
        }
    }

    /// Fetch matching objects and return the raw response tree
    pub async fn get_objects_raw(
        &self,
        table: &str,
        conditions: &[&str],
        options: &QueryOptions,
    ) -> Option<XmlElement> {
        let params = Self::query_params(table, conditions, options);
        let xml = self.post(endpoints::GET_OBJECTS, &params).await?;
        if xml.has_error() {
            return None;
        }
        Some(xml)
    }

    /// Fetch matching objects mapped into records
    pub async fn get_objects<T: SalsaObject>(
        &self,
        table: &str,
        conditions: &[&str],
        options: &QueryOptions,
    ) -> Option<Vec<T>> {
        let xml = self.get_objects_raw(table, conditions, options).await?;
        let Some(list) = xml.child(table) else {
            return Some(Vec::new());
        };
        let records = list
            .children_named("item")
            .map(|item| T::from_element(table, item))
            .collect::<Vec<_>>();
        debug!(table, count = records.len(), "objects fetched");
        Some(records)
    }

    /// Fetch one object by key and return the raw response tree
    pub async fn get_object_raw(&self, table: &str, key: u64) -> Option<XmlElement> {
        let params = Params::new().with("object", table).with("key", key);
        let xml = self.post(endpoints::GET_OBJECT, &params).await?;
        if xml.has_error() {
            return None;
        }
        Some(xml)
    }

    /// Fetch one object by key, mapped into a record
    pub async fn get_object<T: SalsaObject>(&self, table: &str, key: u64) -> Option<T> {
        let xml = self.get_object_raw(table, key).await?;
        let item = xml.child(table)?.child("item")?;
        Some(T::from_element(table, item))
    }

    /// Save a record's flattened fields, tagged with the target table.
    ///
    /// Errors accumulate rather than abort; the response is returned for
    /// callers that want to inspect the acknowledgement.
    pub async fn save_object<T: SalsaObject>(
        &self,
        table: &str,
        object: &T,
    ) -> Option<XmlElement> {
        self.save_params(table, object.to_params()).await
    }

    /// Save an already-flat parameter map, tagged with the target table
    pub async fn save_params(&self, table: &str, fields: Params) -> Option<XmlElement> {
        let mut params = Params::new();
        params.push("table", table);
        params.extend(fields);
        self.post(endpoints::SAVE, &params).await
    }
}
