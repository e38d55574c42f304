//! HTTP client for pushing stage changes to the remote lead service.

use leadflow_shared::{LeadId, LeadflowError, Result, StageId};
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, instrument};
use url::Url;

/// User-Agent string for sync requests.
const USER_AGENT: &str = concat!("Leadflow/", env!("CARGO_PKG_VERSION"));

/// Request body for a status update.
#[derive(Debug, Serialize)]
struct StatusBody {
    status: StageId,
}

// ---------------------------------------------------------------------------
// StatusSync
// ---------------------------------------------------------------------------

/// Client for the remote lead service's status endpoint.
///
/// One instance is built at startup and shared for the life of the app;
/// the underlying connection pool is reused across updates.
#[derive(Debug, Clone)]
pub struct StatusSync {
    client: Client,
    base: Url,
}

impl StatusSync {
    /// Build a sync client against `base`.
    ///
    /// No request timeout is set: a dispatched update resolves or rejects
    /// at the HTTP layer's own timing, and nothing locally waits on it.
    pub fn new(base: Url) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| LeadflowError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, base })
    }

    /// `PUT /leads/{id}/status` with body `{"status": "<stage>"}`.
    ///
    /// Any 2xx is success; a non-2xx or transport error is returned as
    /// [`LeadflowError::Network`]. The caller decides what a failure means;
    /// this client never retries.
    #[instrument(skip(self), fields(lead = %id, status = %status))]
    pub async fn push_status(&self, id: &LeadId, status: StageId) -> Result<()> {
        let url = status_url(&self.base, id)?;

        let response = self
            .client
            .put(url.clone())
            .json(&StatusBody { status })
            .send()
            .await
            .map_err(|e| LeadflowError::Network(format!("{url}: {e}")))?;

        let code = response.status();
        if !code.is_success() {
            return Err(LeadflowError::Network(format!("{url}: HTTP {code}")));
        }

        debug!("status synced");
        Ok(())
    }
}

/// Build `<base>/leads/{id}/status`, tolerating a trailing slash on `base`.
fn status_url(base: &Url, id: &LeadId) -> Result<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| LeadflowError::config(format!("sync endpoint '{base}' cannot take a path")))?
        .pop_if_empty()
        .extend(["leads", id.as_str(), "status"]);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_url_appends_the_lead_path() {
        let base = Url::parse("https://crm.example.com/api").unwrap();
        let url = status_url(&base, &LeadId::from("L1")).unwrap();
        assert_eq!(url.as_str(), "https://crm.example.com/api/leads/L1/status");
    }

    #[test]
    fn status_url_tolerates_trailing_slash() {
        let base = Url::parse("https://crm.example.com/api/").unwrap();
        let url = status_url(&base, &LeadId::from("L1")).unwrap();
        assert_eq!(url.as_str(), "https://crm.example.com/api/leads/L1/status");
    }

    #[tokio::test]
    async fn push_status_puts_the_stage_json() {
        let server = wiremock::MockServer::start().await;

        wiremock::Mock::given(wiremock::matchers::method("PUT"))
            .and(wiremock::matchers::path("/leads/L1/status"))
            .and(wiremock::matchers::body_json(
                serde_json::json!({"status": "qualified"}),
            ))
            .respond_with(wiremock::ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let base = Url::parse(&server.uri()).unwrap();
        let sync = StatusSync::new(base).unwrap();
        sync.push_status(&LeadId::from("L1"), StageId::Qualified)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn push_status_accepts_any_2xx() {
        let server = wiremock::MockServer::start().await;

        wiremock::Mock::given(wiremock::matchers::method("PUT"))
            .respond_with(wiremock::ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let base = Url::parse(&server.uri()).unwrap();
        let sync = StatusSync::new(base).unwrap();
        let result = sync.push_status(&LeadId::from("L2"), StageId::ClosedWon).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn push_status_reports_http_errors() {
        let server = wiremock::MockServer::start().await;

        wiremock::Mock::given(wiremock::matchers::method("PUT"))
            .respond_with(wiremock::ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let base = Url::parse(&server.uri()).unwrap();
        let sync = StatusSync::new(base).unwrap();
        let err = sync
            .push_status(&LeadId::from("L1"), StageId::Contacted)
            .await
            .unwrap_err();
        assert!(matches!(err, LeadflowError::Network(_)));
        assert!(err.to_string().contains("HTTP 500"));
    }

    #[tokio::test]
    async fn push_status_reports_transport_errors() {
        // Take an address from a server, then shut it down.
        let server = wiremock::MockServer::start().await;
        let base = Url::parse(&server.uri()).unwrap();
        drop(server);

        let sync = StatusSync::new(base).unwrap();
        let err = sync
            .push_status(&LeadId::from("L1"), StageId::New)
            .await
            .unwrap_err();
        assert!(matches!(err, LeadflowError::Network(_)));
    }
}
