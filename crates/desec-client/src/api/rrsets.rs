//! RRset API endpoints.

use crate::DesecClient;
use desec_core::{DesecError, RecordGroup, Result};
use tracing::{debug, info};

/// How [`RrsetApi::apply`] brought the remote RRset in line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// An existing RRset was replaced
    Replaced,
    /// The RRset did not exist and was created
    Created,
}

/// RRset API endpoints
pub struct RrsetApi<'a> {
    client: &'a DesecClient,
}

impl<'a> RrsetApi<'a> {
    pub(crate) const fn new(client: &'a DesecClient) -> Self {
        Self { client }
    }

    /// Replace the RRset at `(subname, type)` with the group's records
    pub async fn replace(&self, group: &RecordGroup) -> Result<()> {
        let url = self.client.zone_url(&[
            "rrsets",
            group.subname.as_str(),
            group.record_type.as_str(),
        ])?;
        self.client.put(url, group).await
    }

    /// Create the RRset through the bulk collection endpoint
    pub async fn create(&self, group: &RecordGroup) -> Result<()> {
        let url = self.client.zone_url(&["rrsets"])?;
        self.client.post(url, std::slice::from_ref(group)).await
    }

    /// Make the remote RRset equal to `group`.
    ///
    /// Tries [`replace`](Self::replace) first and falls back to
    /// [`create`](Self::create) only when the replace answers 404. Any other
    /// failure, or a failed create, becomes [`DesecError::ApplyFailed`].
    /// Transport errors pass through unchanged.
    pub async fn apply(&self, group: &RecordGroup) -> Result<ApplyOutcome> {
        let fqdn = group.fqdn(self.client.domain());

        match self.replace(group).await {
            Ok(()) => {
                debug!(name = %fqdn, rtype = %group.record_type, "RRset replaced");
                Ok(ApplyOutcome::Replaced)
            }
            Err(e) if e.is_not_found() => {
                info!(name = %fqdn, rtype = %group.record_type, "PUT returned 404, creating RRset");
                match self.create(group).await {
                    Ok(()) => Ok(ApplyOutcome::Created),
                    Err(e) => Err(apply_failed(group, fqdn, e)),
                }
            }
            Err(e) => Err(apply_failed(group, fqdn, e)),
        }
    }
}

fn apply_failed(group: &RecordGroup, fqdn: String, err: DesecError) -> DesecError {
    let (Some(status), Some(body)) = (err.status_code(), err.response_body().map(str::to_string))
    else {
        return err;
    };

    DesecError::ApplyFailed {
        record_type: group.record_type.to_string(),
        fqdn,
        status,
        body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use desec_core::normalize_group;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client_for(server: &MockServer) -> DesecClient {
        DesecClient::builder("secret", "is-dev.me")
            .base_url(server.uri())
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_replace_success_skips_create() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/domains/is-dev.me/rrsets/api/A/"))
            .and(body_json(json!({
                "subname": "api",
                "type": "A",
                "records": ["203.0.113.5"],
                "ttl": 3600
            })))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let group = normalize_group("api", "a", ["203.0.113.5"]).unwrap();
        let outcome = client.rrsets().apply(&group).await.unwrap();
        assert_eq!(outcome, ApplyOutcome::Replaced);
    }

    #[tokio::test]
    async fn test_not_found_falls_back_to_create() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/domains/is-dev.me/rrsets/www/CNAME/"))
            .respond_with(ResponseTemplate::new(404).set_body_string(r#"{"detail":"Not found."}"#))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/domains/is-dev.me/rrsets/"))
            .and(body_json(json!([{
                "subname": "www",
                "type": "CNAME",
                "records": ["target.example.com."],
                "ttl": 3600
            }])))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let group = normalize_group("www", "cname", ["target.example.com"]).unwrap();
        let outcome = client.rrsets().apply(&group).await.unwrap();
        assert_eq!(outcome, ApplyOutcome::Created);
    }

    #[tokio::test]
    async fn test_other_replace_failure_is_fatal_without_create() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .respond_with(
                ResponseTemplate::new(400).set_body_string(r#"{"records":["Invalid IPv4"]}"#),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let group = normalize_group("api", "a", ["999.0.0.1"]).unwrap();
        let err = client.rrsets().apply(&group).await.unwrap_err();
        match err {
            DesecError::ApplyFailed {
                record_type,
                fqdn,
                status,
                body,
            } => {
                assert_eq!(record_type, "A");
                assert_eq!(fqdn, "api.is-dev.me");
                assert_eq!(status, 400);
                assert!(body.contains("Invalid IPv4"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_failed_create_reports_create_response() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(409).set_body_string("conflict detail"))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let group = normalize_group("sub", "ns", ["ns1.example.com"]).unwrap();
        let err = client.rrsets().apply(&group).await.unwrap_err();
        assert!(matches!(
            err,
            DesecError::ApplyFailed { status: 409, ref body, ref fqdn, .. }
                if body == "conflict detail" && fqdn == "sub.is-dev.me"
        ));
    }

    #[tokio::test]
    async fn test_unauthorized_keeps_server_response() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .respond_with(
                ResponseTemplate::new(401).set_body_string(r#"{"detail":"Invalid token."}"#),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let group = normalize_group("api", "a", ["203.0.113.5"]).unwrap();
        let err = client.rrsets().apply(&group).await.unwrap_err();
        assert!(matches!(
            err,
            DesecError::ApplyFailed { status: 401, ref body, .. } if body.contains("Invalid token.")
        ));
        assert!(err.to_string().contains(r#"{"detail":"Invalid token."}"#));
    }

    #[tokio::test]
    async fn test_rate_limited_keeps_server_response() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .respond_with(
                ResponseTemplate::new(429)
                    .insert_header("Retry-After", "30")
                    .set_body_string("Request was throttled."),
            )
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let group = normalize_group("api", "a", ["203.0.113.5"]).unwrap();
        let err = client.rrsets().apply(&group).await.unwrap_err();
        assert!(matches!(
            err,
            DesecError::ApplyFailed { status: 429, ref body, .. } if body == "Request was throttled."
        ));
    }

    #[tokio::test]
    async fn test_apply_twice_is_idempotent() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/domains/is-dev.me/rrsets/api/TXT/"))
            .respond_with(ResponseTemplate::new(200))
            .expect(2)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let group = normalize_group("api", "txt", ["\"hello\""]).unwrap();
        for _ in 0..2 {
            assert_eq!(
                client.rrsets().apply(&group).await.unwrap(),
                ApplyOutcome::Replaced
            );
        }
        assert_eq!(server.received_requests().await.unwrap().len(), 2);
    }
}
