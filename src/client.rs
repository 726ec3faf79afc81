//! Blocking HTTP session against the case-management application.
//!
//! [`SessionClient`] logs in once and reuses the resulting cookie session for
//! every later call. Transport problems surface as [`ClientError`]; a server
//! that answers with something other than the expected status is an ordinary
//! [`Outcome::Rejected`], not an error.

use reqwest::blocking::{Client, Request, Response};
use reqwest::cookie::Jar;
use reqwest::redirect::Policy;
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::models::{BulkCreated, BulkPayload, CaseCreated, CaseRecord, RequestRecord};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("transport: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("login failed ({status}): {body}")]
    LoginRejected { status: u16, body: String },
}

/// Why the server's answer did not count as success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    UnexpectedStatus,
    InvalidJson(String),
    MissingField(&'static str),
    UnexpectedShape(String),
}

/// An unsuccessful application response, kept verbatim for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub status: u16,
    pub body: String,
    pub reason: RejectReason,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reason {
            RejectReason::UnexpectedStatus => write!(f, "status {}", self.status),
            RejectReason::InvalidJson(e) => write!(f, "status {}, body is not JSON: {}", self.status, e),
            RejectReason::MissingField(field) => {
                write!(f, "status {}, response has no '{}'", self.status, field)
            }
            RejectReason::UnexpectedShape(e) => {
                write!(f, "status {}, unexpected response: {}", self.status, e)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Accepted(T),
    Rejected(Rejection),
}

impl<T> Outcome<T> {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Outcome::Accepted(_))
    }

    pub fn accepted(self) -> Option<T> {
        match self {
            Outcome::Accepted(value) => Some(value),
            Outcome::Rejected(_) => None,
        }
    }

    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Outcome::Accepted(_) => None,
            Outcome::Rejected(rejection) => Some(rejection),
        }
    }
}

/// One authenticated session bound to one base URL.
pub struct SessionClient {
    base: String,
    base_url: Url,
    http: Client,
    // Form endpoints answer 302 after a create; following it would hide that.
    no_redirect: Client,
    email: String,
    password: String,
}

impl SessionClient {
    /// Build the client and log in. Fails if the server refuses the login.
    pub fn connect(base_url: &str, email: &str, password: &str) -> Result<Self, ClientError> {
        let base = base_url.trim_end_matches('/').to_string();
        let parsed = Url::parse(&base).map_err(|e| ClientError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: "URL cannot carry a path".to_string(),
            });
        }

        let jar = Arc::new(Jar::default());
        let http = Client::builder().cookie_provider(Arc::clone(&jar)).build()?;
        let no_redirect = Client::builder()
            .cookie_provider(jar)
            .redirect(Policy::none())
            .build()?;

        let client = SessionClient {
            base,
            base_url: parsed,
            http,
            no_redirect,
            email: email.to_string(),
            password: password.to_string(),
        };

        match client.login()? {
            Outcome::Accepted(()) => Ok(client),
            Outcome::Rejected(rejection) => Err(ClientError::LoginRejected {
                status: rejection.status,
                body: rejection.body,
            }),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base
    }

    pub fn login(&self) -> Result<Outcome<()>, ClientError> {
        let credentials = [("email", self.email.as_str()), ("password", self.password.as_str())];
        let request = self
            .http
            .post(self.endpoint(&["login"]))
            .form(&credentials)
            .build()?;
        let response = self.execute(&self.http, request)?;
        expect_status(response, &[StatusCode::OK])
    }

    /// Submit the case form. A 302 counts as success and is not followed.
    pub fn create_case(&self, case: &CaseRecord) -> Result<Outcome<()>, ClientError> {
        let request = self
            .no_redirect
            .post(self.endpoint(&["case", "create"]))
            .form(case)
            .build()?;
        let response = self.execute(&self.no_redirect, request)?;
        expect_status(response, &[StatusCode::OK, StatusCode::FOUND])
    }

    pub fn create_case_via_api(&self, case: &CaseRecord) -> Result<Outcome<CaseCreated>, ClientError> {
        let request = self
            .http
            .post(self.endpoint(&["api", "cases"]))
            .json(case)
            .build()?;
        let response = self.execute(&self.http, request)?;
        expect_created(response, Some("case_id"))
    }

    /// Submit the request form for `case_id`. The id becomes a single
    /// escaped path segment.
    pub fn create_request(
        &self,
        case_id: &str,
        request: &RequestRecord,
    ) -> Result<Outcome<()>, ClientError> {
        let built = self
            .no_redirect
            .post(self.endpoint(&["case", case_id, "request", "create"]))
            .form(request)
            .build()?;
        let response = self.execute(&self.no_redirect, built)?;
        expect_status(response, &[StatusCode::OK, StatusCode::FOUND])
    }

    pub fn bulk_create_cases(&self, cases: &[CaseRecord]) -> Result<Outcome<BulkCreated>, ClientError> {
        let request = self
            .http
            .post(self.endpoint(&["api", "cases", "bulk"]))
            .json(&BulkPayload { cases })
            .build()?;
        let response = self.execute(&self.http, request)?;
        expect_created(response, None)
    }

    /// Availability check only; the listing is an HTML page and is not read.
    pub fn get_active_cases(&self) -> Result<Outcome<()>, ClientError> {
        let request = self.http.get(self.endpoint(&["cases", "active"])).build()?;
        let response = self.execute(&self.http, request)?;
        expect_status(response, &[StatusCode::OK])
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // cannot_be_a_base was ruled out in connect
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn execute(&self, client: &Client, request: Request) -> Result<Response, ClientError> {
        debug!(method = %request.method(), url = %request.url(), "sending request");
        let response = client.execute(request)?;
        debug!(status = response.status().as_u16(), "received response");
        Ok(response)
    }
}

fn expect_status(response: Response, accepted: &[StatusCode]) -> Result<Outcome<()>, ClientError> {
    let status = response.status();
    if accepted.contains(&status) {
        return Ok(Outcome::Accepted(()));
    }
    let body = response.text()?;
    warn!(status = status.as_u16(), "request rejected");
    Ok(Outcome::Rejected(Rejection {
        status: status.as_u16(),
        body,
        reason: RejectReason::UnexpectedStatus,
    }))
}

fn expect_created<T: DeserializeOwned>(
    response: Response,
    required: Option<&'static str>,
) -> Result<Outcome<T>, ClientError> {
    let status = response.status();
    let body = response.text()?;
    if status != StatusCode::CREATED {
        warn!(status = status.as_u16(), "request rejected");
        return Ok(Outcome::Rejected(Rejection {
            status: status.as_u16(),
            body,
            reason: RejectReason::UnexpectedStatus,
        }));
    }
    let outcome = decode_json(status.as_u16(), body, required);
    if let Some(rejection) = outcome.rejection() {
        warn!(status = rejection.status, reason = ?rejection.reason, "response body rejected");
    }
    Ok(outcome)
}

/// Decode a creation response body, requiring `required` to be present as a
/// top-level key when given.
pub fn decode_json<T: DeserializeOwned>(
    status: u16,
    body: String,
    required: Option<&'static str>,
) -> Outcome<T> {
    let reject = |body: String, reason: RejectReason| Outcome::Rejected(Rejection { status, body, reason });

    let value: serde_json::Value = match serde_json::from_str(&body) {
        Ok(v) => v,
        Err(e) => return reject(body, RejectReason::InvalidJson(e.to_string())),
    };
    if let Some(field) = required {
        if value.get(field).is_none() {
            return reject(body, RejectReason::MissingField(field));
        }
    }
    match serde_json::from_value(value) {
        Ok(decoded) => Outcome::Accepted(decoded),
        Err(e) => reject(body, RejectReason::UnexpectedShape(e.to_string())),
    }
}
