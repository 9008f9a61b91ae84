use std::time::Duration;

use netrecon_core::SpeedAuditRecord;

use crate::reshape::{reshape, validate_date};

/// Error type for audit operations.
#[derive(Debug)]
pub enum AuditError {
    /// Credential exchange failed (non-success status from the token issuer)
    Auth(u16, String),
    /// Network error
    Network(String),
    /// HTTP error with status code on the snapshot call
    Http(u16, String),
    /// Malformed response body
    Parse(String),
    /// Response item missing a required field
    Schema { field: &'static str, index: usize },
    /// Date parameter does not match YYYY.MM.DD
    InvalidDate(String),
}

impl std::fmt::Display for AuditError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuditError::Auth(code, msg) => write!(f, "Auth failed ({}): {}", code, msg),
            AuditError::Network(msg) => write!(f, "Network error: {}", msg),
            AuditError::Http(code, msg) => write!(f, "HTTP {}: {}", code, msg),
            AuditError::Parse(msg) => write!(f, "Parse error: {}", msg),
            AuditError::Schema { field, index } => {
                write!(f, "Snapshot item {} missing required field '{}'", index, field)
            }
            AuditError::InvalidDate(value) => {
                write!(f, "Invalid date '{}', expected YYYY.MM.DD", value)
            }
        }
    }
}

impl std::error::Error for AuditError {}

/// Speed-audit API client (blocking).
#[derive(Clone)]
pub struct AuditClient {
    http: reqwest::blocking::Client,
    base_url: String,
}

impl AuditClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let http = reqwest::blocking::Client::builder()
            .user_agent(concat!("netrecon/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(60))
            .build()
            .expect("failed to build HTTP client");

        Self {
            http,
            base_url: base_url.into(),
        }
    }

    /// Exchange identity credentials for a bearer token.
    pub fn sign_in(&self, email: &str, password: &str) -> Result<String, AuditError> {
        let url = format!("{}/auth/sign-in", self.base_url);
        let response = self
            .http
            .post(&url)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .map_err(|e| AuditError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            let body = response.text().unwrap_or_default();
            return Err(AuditError::Auth(status, body));
        }

        let body: serde_json::Value = response
            .json()
            .map_err(|e| AuditError::Parse(e.to_string()))?;
        body["token"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| AuditError::Parse("missing 'token' in sign-in response".into()))
    }

    /// Fetch one day's interface snapshot and reshape it into the flat
    /// audit table. The date is validated before any request goes out.
    pub fn fetch_snapshot(
        &self,
        token: &str,
        date: &str,
    ) -> Result<Vec<SpeedAuditRecord>, AuditError> {
        validate_date(date)?;

        let url = format!("{}/api/router/speeds", self.base_url);
        let response = self
            .http
            .get(&url)
            .bearer_auth(token)
            .query(&[("date", date), ("ip_interface", ""), ("router_name", "")])
            .send()
            .map_err(|e| AuditError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            let body = response.text().unwrap_or_default();
            return Err(AuditError::Http(status, body));
        }

        let body: serde_json::Value = response
            .json()
            .map_err(|e| AuditError::Parse(e.to_string()))?;
        reshape(&body)
    }
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;

    use super::*;

    fn snapshot_item(interface: &str, router: &str) -> serde_json::Value {
        serde_json::json!({
            "insert_datetime": "2026-08-25 04:00:00",
            "branch": "ALM",
            "router_name": router,
            "interface_name": "ae0.100",
            "interface_description": "customer uplink",
            "in_policy_router": 50,
            "in_speed_router": 48.5,
            "out_policy_router": 50,
            "out_speed_router": 49,
            "ip_interface": interface,
            "account": "700400",
            "company_name": "Example LLP",
            "in_speed_billing": 50,
            "out_speed_billing": 50,
            "business_unit": "enterprise"
        })
    }

    #[test]
    fn sign_in_returns_token() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/auth/sign-in")
                .json_body(serde_json::json!({
                    "email": "ops@example.net",
                    "password": "secret"
                }));
            then.status(200)
                .json_body(serde_json::json!({ "token": "tok-123" }));
        });

        let client = AuditClient::new(server.base_url());
        let token = client.sign_in("ops@example.net", "secret").unwrap();

        mock.assert();
        assert_eq!(token, "tok-123");
    }

    #[test]
    fn sign_in_rejection_is_auth_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/auth/sign-in");
            then.status(401).body("bad credentials");
        });

        let client = AuditClient::new(server.base_url());
        let err = client.sign_in("ops@example.net", "wrong").unwrap_err();
        match err {
            AuditError::Auth(code, body) => {
                assert_eq!(code, 401);
                assert!(body.contains("bad credentials"));
            }
            other => panic!("expected Auth error, got {other:?}"),
        }
    }

    #[test]
    fn sign_in_without_token_field_is_parse_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/auth/sign-in");
            then.status(200).json_body(serde_json::json!({ "ok": true }));
        });

        let client = AuditClient::new(server.base_url());
        assert!(matches!(
            client.sign_in("a", "b").unwrap_err(),
            AuditError::Parse(_),
        ));
    }

    #[test]
    fn fetch_snapshot_reshapes_items() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/api/router/speeds")
                .header("authorization", "Bearer tok-123")
                .query_param("date", "2026.08.25");
            then.status(200).json_body(serde_json::json!({
                "data": [
                    snapshot_item("10.0.0.5", "bb1.alm1"),
                    snapshot_item("10.0.1.9", "bb0.alm1"),
                ]
            }));
        });

        let client = AuditClient::new(server.base_url());
        let records = client.fetch_snapshot("tok-123", "2026.08.25").unwrap();

        mock.assert();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].interface, "10.0.0.5");
        assert_eq!(records[0].router_name, "bb1.alm1");
        // Numeric speeds are stringified
        assert_eq!(records[0].in_speed, "48.5");
        assert_eq!(records[0].in_policy, "50");
    }

    #[test]
    fn invalid_date_issues_no_request() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/api/router/speeds");
            then.status(200).json_body(serde_json::json!({ "data": [] }));
        });

        let client = AuditClient::new(server.base_url());
        let err = client.fetch_snapshot("tok-123", "25-08-2026").unwrap_err();

        assert!(matches!(err, AuditError::InvalidDate(_)));
        mock.assert_calls(0);
    }

    #[test]
    fn snapshot_http_failure_is_http_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/router/speeds");
            then.status(500).body("boom");
        });

        let client = AuditClient::new(server.base_url());
        assert!(matches!(
            client.fetch_snapshot("tok-123", "2026.08.25").unwrap_err(),
            AuditError::Http(500, _),
        ));
    }

    #[test]
    fn one_malformed_item_fails_the_snapshot() {
        let server = MockServer::start();
        let mut bad = snapshot_item("10.0.1.9", "bb0.alm1");
        bad.as_object_mut().unwrap().remove("router_name");

        server.mock(|when, then| {
            when.method(GET).path("/api/router/speeds");
            then.status(200).json_body(serde_json::json!({
                "data": [snapshot_item("10.0.0.5", "bb1.alm1"), bad]
            }));
        });

        let client = AuditClient::new(server.base_url());
        let err = client.fetch_snapshot("tok-123", "2026.08.25").unwrap_err();
        match err {
            AuditError::Schema { field, index } => {
                assert_eq!(field, "router_name");
                assert_eq!(index, 1);
            }
            other => panic!("expected Schema error, got {other:?}"),
        }
    }
}
