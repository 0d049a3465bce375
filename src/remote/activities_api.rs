use reqwest::{StatusCode, Url};
use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

use crate::models::Roster;

/// Failure classes at the store boundary. `Http` carries the store's own
/// detail text so the UI can show it verbatim; `Network` and `Parse` get a
/// generic message at the call site.
#[derive(Debug, Error)]
pub enum RosterApiError {
    #[error("roster store unreachable: {0}")]
    Network(#[source] reqwest::Error),
    #[error("roster store returned {status}: {detail}")]
    Http { status: StatusCode, detail: String },
    #[error("roster store response had an unexpected shape: {0}")]
    Parse(#[source] reqwest::Error),
}

/// Success payload of a signup. Older store builds return only `message`,
/// so both fields stay optional and callers fall back to what they sent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignupReceipt {
    pub message: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

/// The roster store as the controller sees it. The mutation services are
/// generic over this so tests can script outcomes without a server.
#[allow(async_fn_in_trait)]
pub trait RosterStore {
    async fn fetch_activities(&self) -> Result<Roster, RosterApiError>;
    async fn signup(&self, activity: &str, email: &str) -> Result<SignupReceipt, RosterApiError>;
    async fn unregister(&self, activity: &str, email: &str) -> Result<(), RosterApiError>;
}

fn activities_api_base_url() -> String {
    std::env::var("ACTIVITIES_API_URL").unwrap_or_else(|_| "http://127.0.0.1:8000".to_string())
}

#[derive(Debug, Clone)]
pub struct HttpRosterStore {
    client: reqwest::Client,
    base: Url,
}

impl HttpRosterStore {
    pub fn new(base: Url) -> Self {
        HttpRosterStore {
            client: reqwest::Client::new(),
            base,
        }
    }

    pub fn from_env() -> Self {
        let raw = activities_api_base_url();
        let base = Url::parse(&raw).expect("ACTIVITIES_API_URL must be a valid URL");
        Self::new(base)
    }

    fn activities_url(&self) -> Url {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .expect("base URL must accept path segments")
            .pop_if_empty()
            .push("activities");
        url
    }

    /// `/activities/{name}/signup?email={id}`, with the activity name
    /// percent-encoded as a path segment and the email as a query pair.
    fn signup_url(&self, activity: &str, email: &str) -> Url {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .expect("base URL must accept path segments")
            .pop_if_empty()
            .extend(["activities", activity, "signup"]);
        url.query_pairs_mut().append_pair("email", email);
        url
    }
}

impl RosterStore for HttpRosterStore {
    async fn fetch_activities(&self) -> Result<Roster, RosterApiError> {
        let resp = self
            .client
            .get(self.activities_url())
            .send()
            .await
            .map_err(RosterApiError::Network)?;
        let status = resp.status();
        if !status.is_success() {
            let detail = failure_detail(resp).await;
            warn!("roster fetch returned {}: {}", status, detail);
            return Err(RosterApiError::Http { status, detail });
        }
        resp.json::<Roster>().await.map_err(RosterApiError::Parse)
    }

    async fn signup(&self, activity: &str, email: &str) -> Result<SignupReceipt, RosterApiError> {
        let resp = self
            .client
            .post(self.signup_url(activity, email))
            .send()
            .await
            .map_err(RosterApiError::Network)?;
        let status = resp.status();
        if !status.is_success() {
            let detail = failure_detail(resp).await;
            warn!("signup for {} in {:?} returned {}: {}", email, activity, status, detail);
            return Err(RosterApiError::Http { status, detail });
        }
        resp.json::<SignupReceipt>()
            .await
            .map_err(RosterApiError::Parse)
    }

    async fn unregister(&self, activity: &str, email: &str) -> Result<(), RosterApiError> {
        let resp = self
            .client
            .delete(self.signup_url(activity, email))
            .send()
            .await
            .map_err(RosterApiError::Network)?;
        let status = resp.status();
        if !status.is_success() {
            let detail = failure_detail(resp).await;
            warn!(
                "unregister of {} from {:?} returned {}: {}",
                email, activity, status, detail
            );
            return Err(RosterApiError::Http { status, detail });
        }
        Ok(())
    }
}

// The store answers failures with {"detail": ...} JSON, but some paths send
// plain text. Take the detail field when it parses, the raw body otherwise.
async fn failure_detail(resp: reqwest::Response) -> String {
    let text = resp.text().await.unwrap_or_default();
    if let Ok(body) = serde_json::from_str::<ErrorBody>(&text) {
        if let Some(detail) = body.detail {
            return detail;
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> HttpRosterStore {
        HttpRosterStore::new(Url::parse("http://127.0.0.1:8000").unwrap())
    }

    #[test]
    fn signup_url_encodes_activity_and_email() {
        let url = store().signup_url("Chess Club", "test+pytest@example.com");
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:8000/activities/Chess%20Club/signup?email=test%2Bpytest%40example.com"
        );
    }

    #[test]
    fn activities_url_joins_cleanly() {
        assert_eq!(store().activities_url().as_str(), "http://127.0.0.1:8000/activities");
    }

    #[test]
    fn receipt_tolerates_missing_email() {
        let receipt: SignupReceipt =
            serde_json::from_str(r#"{"message": "Signed up a@x.com for Chess Club"}"#).unwrap();
        assert!(receipt.email.is_none());
        assert_eq!(receipt.message.as_deref(), Some("Signed up a@x.com for Chess Club"));
    }
}
