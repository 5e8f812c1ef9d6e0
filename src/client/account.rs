//! Token-issuing endpoints.

use serde::Serialize;
use serde_json::Value;

use super::inner::map_status_error;
use super::Client;
use crate::auth::{Credentials, Registration, Session, REGISTER_PATH, SIGN_IN_PATH};
use crate::error::Error;
use crate::transport::{ApiRequest, ApiResponse, Method};
use crate::validation::ValidationReport;

impl Client {
    /// Exchanges credentials for a session.
    ///
    /// The returned [`Session`] carries the issued token only. Role claims
    /// and the subject id are not read from the token; attach them with
    /// [`Session::with_role`] and [`Session::with_subject_id`] when known.
    ///
    /// ```rust,ignore
    /// let session = client.sign_in(&Credentials::new(email, password)).await?;
    /// let client = client.with_session(session);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidArgument`](crate::ErrorKind::InvalidArgument)
    /// without sending a request when the credentials fail validation, and
    /// the mapped server error (typically `Unauthorized`) when rejected.
    pub async fn sign_in(&self, credentials: &Credentials) -> Result<Session, Error> {
        check(credentials.validate())?;
        let token = self.issue_token(SIGN_IN_PATH, credentials).await?;
        tracing::debug!(email = %credentials.email, "signed in");
        Ok(Session::new(token))
    }

    /// Creates a member account and returns a session for it.
    ///
    /// # Errors
    ///
    /// Same as [`sign_in`](Self::sign_in); an email already in use surfaces
    /// as the server's rejection.
    pub async fn register(&self, registration: &Registration) -> Result<Session, Error> {
        check(registration.validate())?;
        let token = self.issue_token(REGISTER_PATH, registration).await?;
        tracing::debug!(email = %registration.email, "account registered");
        Ok(Session::new(token))
    }

    async fn issue_token<T: Serialize>(&self, path: &str, body: &T) -> Result<String, Error> {
        let body = serde_json::to_value(body).map_err(|e| {
            Error::invalid_argument(format!("Failed to encode request body: {}", e))
        })?;
        let response = self
            .inner()
            .send(ApiRequest::new(Method::Post, path).with_body(body))
            .await?;
        if !response.is_success() {
            return Err(map_status_error(&response));
        }
        token_from(&response)
    }
}

fn check(report: ValidationReport) -> Result<(), Error> {
    if report.is_valid() {
        Ok(())
    } else {
        Err(Error::invalid_argument(report.to_string()))
    }
}

/// Reads the token from a plain-text, JSON string, or `{"token": ...}` body.
fn token_from(response: &ApiResponse) -> Result<String, Error> {
    let text = response.text();
    let text = text.trim();
    let token = match serde_json::from_str::<Value>(text) {
        Ok(Value::String(token)) => token,
        Ok(Value::Object(fields)) => fields
            .get("token")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_owned(),
        _ => text.to_owned(),
    };
    let token = token.trim();
    if token.is_empty() {
        return Err(Error::invalid_response("authentication response carried no token"));
    }
    Ok(token.to_owned())
}
