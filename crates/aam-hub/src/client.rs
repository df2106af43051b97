// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Hub HTTP client.

use std::time::Duration;

use aam_common_secret::SecretString;
use reqwest::header::{ACCEPT, ORIGIN};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, error, instrument, warn};
use url::Url;

use crate::document::PolicyDocument;
use crate::endpoint::{addon_url, policy_url};
use crate::error::HubError;

const ACCEPT_ZIP: &str = "application/zip";
const ACCEPT_JSON: &str = "application/json";

/// Client for the hub's download and policy endpoints.
#[derive(Debug, Clone)]
pub struct HubClient {
	http_client: Client,
	api_endpoint: Url,
	policy_endpoint: Url,
	origin: String,
}

impl HubClient {
	/// `site_url` is sent as the `Origin` of every request.
	pub fn new(
		api_endpoint: Url,
		policy_endpoint: Url,
		site_url: &Url,
		timeout: Duration,
	) -> Result<Self, HubError> {
		let http_client =
			aam_common_http::client_with_timeout(timeout).map_err(HubError::transport)?;

		Ok(Self {
			http_client,
			api_endpoint,
			policy_endpoint,
			origin: site_url.as_str().trim_end_matches('/').to_string(),
		})
	}

	/// Download the add-on package registered to `license`.
	#[instrument(skip_all)]
	pub async fn download_addon(&self, license: &SecretString) -> Result<Vec<u8>, HubError> {
		let url = addon_url(&self.api_endpoint, license)?;
		self.get(url, ACCEPT_ZIP, "download").await
	}

	/// Fetch policy `id`. Returns `None` when the hub answers 200 with no
	/// document.
	#[instrument(skip(self, license), fields(policy = %id))]
	pub async fn fetch_policy(
		&self,
		id: &str,
		license: Option<&SecretString>,
	) -> Result<Option<PolicyDocument>, HubError> {
		let url = policy_url(&self.policy_endpoint, id, license)?;
		let body = self.get(url, ACCEPT_JSON, "policy").await?;
		PolicyDocument::parse(&body)
	}

	/// `url` may embed a license key in its path or query, so only the host
	/// and `resource` are logged and transport errors are stripped of it.
	async fn get(&self, url: Url, accept: &str, resource: &str) -> Result<Vec<u8>, HubError> {
		debug!(host = url.host_str().unwrap_or_default(), resource, "sending hub request");

		let response = self
			.http_client
			.get(url)
			.header(ACCEPT, accept)
			.header(ORIGIN, &self.origin)
			.send()
			.await
			.map_err(|e| {
				let err = HubError::transport(e);
				error!(error = %err, resource, "hub request failed");
				err
			})?;

		let status = response.status();
		let body = response.bytes().await.map_err(HubError::transport)?;
		debug!(status = %status, bytes = body.len(), "received hub response");

		if status != StatusCode::OK {
			let reason = rejection_reason(status, &body);
			warn!(status = %status, reason = %reason, "hub rejected request");
			return Err(HubError::RemoteRejection {
				status: status.as_u16(),
				reason,
			});
		}

		Ok(body.to_vec())
	}
}

/// The `reason` of a JSON rejection body, or `HTTP <code>` when there is none.
fn rejection_reason(status: StatusCode, body: &[u8]) -> String {
	serde_json::from_slice::<Value>(body)
		.ok()
		.and_then(|v| v.get("reason").and_then(Value::as_str).map(str::to_string))
		.unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;
	use wiremock::matchers::{header, method, path, query_param};
	use wiremock::{Mock, MockServer, ResponseTemplate};

	fn client(server: &MockServer) -> HubClient {
		let base = Url::parse(&server.uri()).unwrap();
		let site = Url::parse("https://site.example.com/wp/").unwrap();
		HubClient::new(base.clone(), base, &site, Duration::from_secs(5)).unwrap()
	}

	#[test]
	fn origin_is_site_url_without_trailing_slash() {
		let base = Url::parse("https://api.aamplugin.com/v2").unwrap();
		let timeout = Duration::from_secs(5);

		let site = Url::parse("https://site.example.com/wp/").unwrap();
		let hub = HubClient::new(base.clone(), base.clone(), &site, timeout).unwrap();
		assert_eq!(hub.origin, "https://site.example.com/wp");

		let site = Url::parse("http://localhost").unwrap();
		let hub = HubClient::new(base.clone(), base, &site, timeout).unwrap();
		assert_eq!(hub.origin, "http://localhost");
	}

	#[test]
	fn reason_falls_back_to_status_code() {
		assert_eq!(
			rejection_reason(StatusCode::NOT_FOUND, br#"{"reason":"not found"}"#),
			"not found"
		);
		assert_eq!(rejection_reason(StatusCode::BAD_GATEWAY, b"<html>"), "HTTP 502");
		assert_eq!(
			rejection_reason(StatusCode::FORBIDDEN, br#"{"error":"nope"}"#),
			"HTTP 403"
		);
	}

	#[tokio::test]
	async fn downloads_addon_bytes() {
		let server = MockServer::start().await;
		Mock::given(method("GET"))
			.and(path("/download/LIC-1"))
			.and(header("accept", "application/zip"))
			.and(header("origin", "https://site.example.com/wp"))
			.respond_with(ResponseTemplate::new(200).set_body_bytes(b"PK\x03\x04".to_vec()))
			.expect(1)
			.mount(&server)
			.await;

		let bytes = client(&server)
			.download_addon(&SecretString::new("LIC-1".into()))
			.await
			.unwrap();
		assert_eq!(bytes, b"PK\x03\x04");
	}

	#[tokio::test]
	async fn rejected_download_reports_reason() {
		let server = MockServer::start().await;
		Mock::given(method("GET"))
			.and(path("/download/expired"))
			.respond_with(
				ResponseTemplate::new(410).set_body_json(json!({"reason": "License expired"})),
			)
			.mount(&server)
			.await;

		let err = client(&server)
			.download_addon(&SecretString::new("expired".into()))
			.await
			.unwrap_err();
		assert!(matches!(err, HubError::RemoteRejection { status: 410, .. }));
		assert_eq!(err.to_string(), "License expired");
	}

	#[tokio::test]
	async fn fetches_policy_with_license() {
		let server = MockServer::start().await;
		Mock::given(method("GET"))
			.and(path("/policy/9"))
			.and(query_param("license", "KEY"))
			.and(header("accept", "application/json"))
			.respond_with(ResponseTemplate::new(200).set_body_json(json!({
				"metadata": {"title": "Lock down"},
				"policy": {"Statement": []}
			})))
			.mount(&server)
			.await;

		let doc = client(&server)
			.fetch_policy("9", Some(&SecretString::new("KEY".into())))
			.await
			.unwrap()
			.unwrap();
		assert_eq!(doc.metadata.title.as_deref(), Some("Lock down"));
	}

	#[tokio::test]
	async fn policy_not_found_reason_is_verbatim() {
		let server = MockServer::start().await;
		Mock::given(method("GET"))
			.and(path("/policy/404"))
			.respond_with(ResponseTemplate::new(404).set_body_json(json!({"reason": "not found"})))
			.mount(&server)
			.await;

		let err = client(&server).fetch_policy("404", None).await.unwrap_err();
		assert_eq!(err.to_string(), "not found");
	}

	#[tokio::test]
	async fn empty_policy_body_is_none() {
		let server = MockServer::start().await;
		Mock::given(method("GET"))
			.and(path("/policy/3"))
			.respond_with(ResponseTemplate::new(200).set_body_string("null"))
			.mount(&server)
			.await;

		assert!(client(&server).fetch_policy("3", None).await.unwrap().is_none());
	}

	fn unreachable_hub() -> HubClient {
		// Nothing listens on the tcpmux port
		let base = Url::parse("http://127.0.0.1:1").unwrap();
		let site = Url::parse("http://localhost").unwrap();
		HubClient::new(base.clone(), base, &site, Duration::from_secs(2)).unwrap()
	}

	#[tokio::test]
	async fn unreachable_hub_is_transport_error() {
		let err = unreachable_hub().fetch_policy("1", None).await.unwrap_err();
		assert!(matches!(err, HubError::Transport(_)));
	}

	#[tokio::test]
	async fn transport_errors_do_not_leak_license() {
		let hub = unreachable_hub();

		let err = hub
			.fetch_policy("1", Some(&SecretString::new("TOPSECRETKEY".into())))
			.await
			.unwrap_err();
		assert!(matches!(err, HubError::Transport(_)));
		assert!(!err.to_string().contains("TOPSECRETKEY"));

		let err = hub
			.download_addon(&SecretString::new("ADDONSECRET".into()))
			.await
			.unwrap_err();
		assert!(matches!(err, HubError::Transport(_)));
		assert!(!err.to_string().contains("ADDONSECRET"));
		assert!(!format!("{err:?}").contains("ADDONSECRET"));
	}
}
