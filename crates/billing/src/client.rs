//! Paged query client.
//!
//! Each request posts one XML envelope with credentials plus
//! `rows_limit`/`rows_skip`; each response is a tree of `row` elements whose
//! children carry allowlisted field codes. The service has no "has more"
//! flag, so fetching stops after the first batch shorter than the page size.

use std::collections::HashMap;
use std::time::Duration;

use quick_xml::events::{BytesRef, Event};
use quick_xml::Reader;

use netrecon_core::InventoryRecord;

use crate::schema::column_for_tag;

/// Error type for billing fetch operations.
#[derive(Debug)]
pub enum BillingError {
    /// Network error
    Network(String),
    /// HTTP error with status code
    Http(u16, String),
    /// Malformed XML response
    Parse(String),
}

impl std::fmt::Display for BillingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BillingError::Network(msg) => write!(f, "Network error: {}", msg),
            BillingError::Http(code, msg) => write!(f, "HTTP {}: {}", code, msg),
            BillingError::Parse(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for BillingError {}

/// Billing query API client (blocking).
#[derive(Clone)]
pub struct BillingClient {
    http: reqwest::blocking::Client,
    endpoint: String,
    username: String,
    password: String,
}

impl BillingClient {
    pub fn new(
        endpoint: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        let http = reqwest::blocking::Client::builder()
            .user_agent(concat!("netrecon/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(60))
            .build()
            .expect("failed to build HTTP client");

        Self {
            http,
            endpoint: endpoint.into(),
            username: username.into(),
            password: password.into(),
        }
    }

    /// Fetch the whole inventory export, one page at a time.
    ///
    /// Termination: the first batch with fewer than `page_size` records
    /// (including zero) is the last one; its records are kept. Any failure
    /// aborts the fetch; there is no resume-from-offset, a retry restarts
    /// at skip 0.
    pub fn fetch_all(&self, page_size: usize) -> Result<Vec<InventoryRecord>, BillingError> {
        if page_size == 0 {
            // A zero limit would never reach the short-page signal.
            return Ok(Vec::new());
        }

        let mut all = Vec::new();
        let mut skip = 0usize;

        loop {
            let batch = self.fetch_page(page_size, skip)?;
            let fetched = batch.len();
            all.extend(batch);

            if fetched < page_size {
                break;
            }
            skip += page_size;
        }

        Ok(all)
    }

    fn fetch_page(&self, limit: usize, skip: usize) -> Result<Vec<InventoryRecord>, BillingError> {
        let response = self
            .http
            .post(&self.endpoint)
            .header("Content-Type", "application/xml")
            .body(self.envelope(limit, skip))
            .send()
            .map_err(|e| BillingError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            let body = response.text().unwrap_or_default();
            return Err(BillingError::Http(status, body));
        }

        let body = response
            .text()
            .map_err(|e| BillingError::Network(e.to_string()))?;
        parse_rows(&body)
    }

    /// Request envelope with credentials and the batch window.
    fn envelope(&self, limit: usize, skip: usize) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<soapenv:Envelope xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/">
    <soapenv:Header>
        <credentials>
            <username>{}</username>
            <password>{}</password>
        </credentials>
    </soapenv:Header>
    <soapenv:Body>
        <inventory_query>
            <rows_limit>{}</rows_limit>
            <rows_skip>{}</rows_skip>
        </inventory_query>
    </soapenv:Body>
</soapenv:Envelope>
"#,
            quick_xml::escape::escape(&self.username),
            quick_xml::escape::escape(&self.password),
            limit,
            skip,
        )
    }
}

/// Parse the `row` elements of a query response into inventory records.
///
/// Only child tags in the field allowlist are extracted; unrecognized tags
/// and self-closing (empty) fields are skipped, leaving the column absent.
/// A field value arrives fragmented: literal text runs, CDATA sections, and
/// entity references are separate events, so fragments accumulate in a
/// buffer and the joined value is stored when the field tag closes.
pub fn parse_rows(xml: &str) -> Result<Vec<InventoryRecord>, BillingError> {
    let mut reader = Reader::from_str(xml);
    // No trim_text: per-fragment trimming would eat the spaces around an
    // embedded entity. The assembled value is trimmed once instead.

    let mut records = Vec::new();
    let mut fields: Option<HashMap<String, String>> = None;
    let mut current_column: Option<&'static str> = None;
    let mut text = String::new();

    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                if e.name().as_ref() == b"row" {
                    fields = Some(HashMap::new());
                    current_column = None;
                } else if fields.is_some() {
                    current_column = column_for_tag(e.name().as_ref());
                    text.clear();
                }
            }
            Ok(Event::Text(ref e)) if current_column.is_some() => {
                text.push_str(&String::from_utf8_lossy(e.as_ref()));
            }
            Ok(Event::CData(ref e)) if current_column.is_some() => {
                text.push_str(&String::from_utf8_lossy(e.as_ref()));
            }
            Ok(Event::GeneralRef(ref e)) if current_column.is_some() => {
                text.push_str(&resolve_entity(e)?);
            }
            Ok(Event::End(ref e)) => {
                if e.name().as_ref() == b"row" {
                    if let Some(fields) = fields.take() {
                        records.push(InventoryRecord::from_fields(fields));
                    }
                } else if let Some(column) = current_column.take() {
                    let value = text.trim();
                    if !value.is_empty() {
                        if let Some(fields) = fields.as_mut() {
                            fields.insert(column.to_string(), value.to_string());
                        }
                    }
                    text.clear();
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(BillingError::Parse(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    Ok(records)
}

/// Expand one entity reference: character references (`&#38;`, `&#x26;`)
/// and the five predefined XML entities. Anything else is a parse error,
/// the response carries no DTD to define custom entities.
fn resolve_entity(entity: &BytesRef<'_>) -> Result<String, BillingError> {
    if let Some(ch) = entity
        .resolve_char_ref()
        .map_err(|e| BillingError::Parse(e.to_string()))?
    {
        return Ok(ch.to_string());
    }
    let name = entity
        .decode()
        .map_err(|e| BillingError::Parse(e.to_string()))?;
    quick_xml::escape::resolve_predefined_entity(&name)
        .map(str::to_string)
        .ok_or_else(|| BillingError::Parse(format!("unresolvable entity reference '&{};'", name)))
}
