// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Form-submission bridge
//!
//! Forwards form submissions into Salsa: fields carrying an admin-assigned
//! label map onto supporter columns under that label, everything else is
//! dropped. Only forms listed in the configured enabled-forms list are
//! forwarded at all. The submitter only ever sees a generic failure
//! message; error detail stays in the connector's list and the log.

use std::collections::HashMap;

use tracing::{debug, info};

use crate::http::Params;
use crate::salsa::{endpoints, Connector, SUPPORTER_OBJECT};

/// Failure message surfaced to the person who submitted the form
pub const GENERIC_FAILURE_MESSAGE: &str =
    "Sorry, your details couldn't be saved. Please contact the site owner to report this problem.";

/// A field of a form definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    /// Field identifier within the form
    pub id: u32,
    /// Admin-assigned label naming the Salsa column this field feeds
    pub admin_label: Option<String>,
}

impl FormField {
    /// A field mapped to a Salsa column
    pub fn labeled(id: u32, admin_label: impl Into<String>) -> Self {
        Self {
            id,
            admin_label: Some(admin_label.into()),
        }
    }

    /// A field with no admin label; never forwarded
    pub fn unlabeled(id: u32) -> Self {
        Self {
            id,
            admin_label: None,
        }
    }
}

/// A form definition: identifier plus ordered field list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormDefinition {
    /// Form identifier, matched against the enabled-forms list
    pub id: String,
    /// Fields in form order
    pub fields: Vec<FormField>,
}

impl FormDefinition {
    /// Create a form definition
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: Vec::new(),
        }
    }

    /// Append a field, builder style
    pub fn field(mut self, field: FormField) -> Self {
        self.fields.push(field);
        self
    }
}

/// Submitted values, keyed by field identifier
pub type SubmissionEntry = HashMap<u32, String>;

/// What became of one submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// The form is not in the enabled list; nothing was sent
    Skipped,
    /// The supporter was saved
    Saved,
    /// The save failed; the message is safe to show the submitter
    Failed(String),
}

/// Bridge from form submissions to Salsa supporter saves
pub struct SubmissionBridge {
    connector: Connector,
    enabled_forms: Vec<String>,
}

impl SubmissionBridge {
    /// Create a bridge around a connector.
    ///
    /// The enabled-forms list comes from the connector's configuration.
    pub fn new(connector: Connector) -> Self {
        let enabled_forms = connector.config().enabled_form_ids();
        Self {
            connector,
            enabled_forms,
        }
    }

    /// The connector this bridge forwards through
    pub fn connector(&self) -> &Connector {
        &self.connector
    }

    /// Check whether a form is enabled for forwarding
    pub fn is_enabled(&self, form_id: &str) -> bool {
        self.enabled_forms.iter().any(|id| id == form_id)
    }

    /// Build the save parameters for one submission.
    ///
    /// Every field with a non-empty admin label contributes its submitted
    /// value under that label, in form order; the fixed `object` and `xml`
    /// parameters mark the target type and request an XML response.
    pub fn build_params(form: &FormDefinition, entry: &SubmissionEntry) -> Params {
        let mut params = Params::new();
        for field in &form.fields {
            let Some(label) = field.admin_label.as_deref() else {
                continue;
            };
            if label.is_empty() {
                continue;
            }
            if let Some(value) = entry.get(&field.id) {
                params.push(label, value.clone());
            }
        }
        params.push("object", SUPPORTER_OBJECT);
        params.push("xml", true);
        params
    }

    /// Handle one form submission.
    ///
    /// Forms outside the enabled list are skipped without any HTTP
    /// traffic. Group assignment after a successful save is not performed.
    pub async fn handle_submission(
        &self,
        form: &FormDefinition,
        entry: &SubmissionEntry,
    ) -> SubmissionOutcome {
        if !self.is_enabled(&form.id) {
            debug!(form_id = %form.id, "form not enabled for Salsa; skipping");
            return SubmissionOutcome::Skipped;
        }

        let params = Self::build_params(form, entry);
        match self.connector.post(endpoints::SAVE, &params).await {
            Some(xml) if !xml.has_error() => {
                info!(form_id = %form.id, "supporter forwarded to Salsa");
                SubmissionOutcome::Saved
            }
            _ => SubmissionOutcome::Failed(GENERIC_FAILURE_MESSAGE.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SalsaConfig;

    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const AUTH_OK: &str = r#"<data organization_KEY="1234">Successful Login</data>"#;

    async fn mock_auth(server: &MockServer) {
        Mock::given(method("POST"))
            .and(path("/api/authenticate.sjs"))
            .respond_with(ResponseTemplate::new(200).set_body_string(AUTH_OK))
            .mount(server)
            .await;
    }

    async fn bridge_for(server: &MockServer, enabled: &str) -> SubmissionBridge {
        let config = SalsaConfig::new(server.uri(), "user@example.org", "hunter2")
            .enabled_forms(enabled)
            .use_tls(false);
        SubmissionBridge::new(Connector::connect(config).await)
    }

    fn sample_form() -> FormDefinition {
        FormDefinition::new("7")
            .field(FormField::labeled(1, "email"))
            .field(FormField::labeled(2, ""))
    }

    fn sample_entry() -> SubmissionEntry {
        SubmissionEntry::from([(1, "a@b.com".to_string()), (2, "ignored".to_string())])
    }

    #[test]
    fn test_build_params_drops_unlabeled_fields() {
        let params = SubmissionBridge::build_params(&sample_form(), &sample_entry());
        assert_eq!(params.serialize(), "email=a%40b.com&object=supporter&xml=true");
    }

    #[test]
    fn test_build_params_keeps_form_order() {
        let form = FormDefinition::new("3")
            .field(FormField::labeled(2, "Last_Name"))
            .field(FormField::labeled(1, "First_Name"))
            .field(FormField::unlabeled(3));
        let entry = SubmissionEntry::from([
            (1, "Jo".to_string()),
            (2, "Bloggs".to_string()),
            (3, "dropped".to_string()),
        ]);
        let params = SubmissionBridge::build_params(&form, &entry);
        assert_eq!(
            params.serialize(),
            "Last_Name=Bloggs&First_Name=Jo&object=supporter&xml=true"
        );
    }

    #[tokio::test]
    async fn test_enabled_form_is_forwarded() {
        let server = MockServer::start().await;
        mock_auth(&server).await;
        Mock::given(method("POST"))
            .and(path("/save"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<data>ok</data>"))
            .mount(&server)
            .await;

        let bridge = bridge_for(&server, "3,7,9").await;
        let outcome = bridge.handle_submission(&sample_form(), &sample_entry()).await;
        assert_eq!(outcome, SubmissionOutcome::Saved);

        let requests = server.received_requests().await.unwrap();
        let save = requests
            .iter()
            .find(|r| r.url.path() == "/save")
            .expect("save request sent");
        let body = String::from_utf8(save.body.clone()).unwrap();
        assert_eq!(body, "email=a%40b.com&object=supporter&xml=true");
    }

    #[tokio::test]
    async fn test_disabled_form_sends_nothing() {
        let server = MockServer::start().await;
        mock_auth(&server).await;

        let bridge = bridge_for(&server, "3,9").await;
        let outcome = bridge.handle_submission(&sample_form(), &sample_entry()).await;
        assert_eq!(outcome, SubmissionOutcome::Skipped);

        // Only the login handshake reached the server.
        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url.path(), "/api/authenticate.sjs");
    }

    #[tokio::test]
    async fn test_remote_error_yields_generic_message() {
        let server = MockServer::start().await;
        mock_auth(&server).await;
        Mock::given(method("POST"))
            .and(path("/save"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("<data><error>Missing required field.</error></data>"),
            )
            .mount(&server)
            .await;

        let bridge = bridge_for(&server, "7").await;
        let outcome = bridge.handle_submission(&sample_form(), &sample_entry()).await;
        assert_eq!(
            outcome,
            SubmissionOutcome::Failed(GENERIC_FAILURE_MESSAGE.to_string())
        );
        // The detail is recorded for the operator, not the submitter.
        assert!(bridge
            .connector()
            .get_errors(true)
            .contains(&"Missing required field.".to_string()));
    }

    #[tokio::test]
    async fn test_connection_failure_yields_generic_message() {
        let server = MockServer::start().await;
        mock_auth(&server).await;
        Mock::given(method("POST"))
            .and(path("/save"))
            .respond_with(ResponseTemplate::new(200).set_body_string(""))
            .mount(&server)
            .await;

        let bridge = bridge_for(&server, "7").await;
        let outcome = bridge.handle_submission(&sample_form(), &sample_entry()).await;
        assert!(matches!(outcome, SubmissionOutcome::Failed(_)));
    }
}
