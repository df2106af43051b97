// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::io::Write;
use std::path::Path;
use std::time::Duration;

use aam_cli::commands::install_addon::{install, run, InstallAddonArgs, DOWNLOAD_FAILED, INSTALLED};
use aam_cli::{RecordingReporter, Severity};
use aam_cli_config::layer::{ConfigLayer, HubLayer, SiteLayer};
use aam_cli_config::{AamConfig, PathsConfig};
use aam_common_secret::SecretString;
use aam_host::{MemoryExtractor, ZipExtractor};
use aam_hub::HubClient;
use serde_json::json;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn hub(server: &MockServer) -> HubClient {
	let base = Url::parse(&server.uri()).unwrap();
	let site = Url::parse("http://localhost").unwrap();
	HubClient::new(base.clone(), base, &site, Duration::from_secs(5)).unwrap()
}

fn license(key: &str) -> SecretString {
	SecretString::new(key.to_string())
}

fn zip_bytes() -> Vec<u8> {
	let mut writer = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
	writer
		.start_file("aam-ip-check/bootstrap.php", zip::write::SimpleFileOptions::default())
		.unwrap();
	writer.write_all(b"<?php return true;").unwrap();
	writer.finish().unwrap().into_inner()
}

async fn serve_package(server: &MockServer, key: &str, body: Vec<u8>) {
	Mock::given(method("GET"))
		.and(path(format!("/download/{key}")))
		.respond_with(ResponseTemplate::new(200).set_body_bytes(body))
		.mount(server)
		.await;
}

#[tokio::test]
async fn extracts_package_into_plugin_dir() {
	let server = MockServer::start().await;
	serve_package(&server, "LIC", zip_bytes()).await;
	let plugins = tempfile::tempdir().unwrap();
	let mut reporter = RecordingReporter::new();

	install(
		&hub(&server),
		&ZipExtractor,
		&license("LIC"),
		plugins.path(),
		&mut reporter,
	)
	.await
	.unwrap();

	assert_eq!(reporter.messages(Severity::Success), vec![INSTALLED]);
	let installed = plugins.path().join("aam-ip-check/bootstrap.php");
	assert_eq!(std::fs::read_to_string(installed).unwrap(), "<?php return true;");
}

#[tokio::test]
async fn extraction_error_is_verbatim_and_not_a_success() {
	let server = MockServer::start().await;
	serve_package(&server, "LIC", b"PK\x03\x04".to_vec()).await;
	let extractor = MemoryExtractor::failing("Could not copy file. wp-content/plugins/aam");
	let plugins = tempfile::tempdir().unwrap();
	let mut reporter = RecordingReporter::new();

	let err = install(
		&hub(&server),
		&extractor,
		&license("LIC"),
		plugins.path(),
		&mut reporter,
	)
	.await
	.unwrap_err();

	assert_eq!(err.to_string(), "Could not copy file. wp-content/plugins/aam");
	assert!(reporter.lines().is_empty());

	let calls = extractor.calls().await;
	assert_eq!(calls.len(), 1);
	assert_eq!(calls[0].0, b"PK\x03\x04");
	assert_eq!(calls[0].1, plugins.path());
}

#[tokio::test]
async fn rejected_license_stops_before_extraction() {
	let server = MockServer::start().await;
	Mock::given(method("GET"))
		.and(path("/download/BAD"))
		.respond_with(ResponseTemplate::new(403).set_body_json(json!({"reason": "Invalid license"})))
		.mount(&server)
		.await;
	let extractor = MemoryExtractor::new();
	let mut reporter = RecordingReporter::new();

	let err = install(
		&hub(&server),
		&extractor,
		&license("BAD"),
		std::path::Path::new("/nonexistent"),
		&mut reporter,
	)
	.await
	.unwrap_err();

	assert_eq!(err.to_string(), "Invalid license");
	assert!(extractor.calls().await.is_empty());
}

#[tokio::test]
async fn empty_package_is_a_download_failure() {
	let server = MockServer::start().await;
	serve_package(&server, "LIC", Vec::new()).await;
	let extractor = MemoryExtractor::new();
	let mut reporter = RecordingReporter::new();

	let err = install(
		&hub(&server),
		&extractor,
		&license("LIC"),
		std::path::Path::new("/nonexistent"),
		&mut reporter,
	)
	.await
	.unwrap_err();

	assert_eq!(err.to_string(), DOWNLOAD_FAILED);
	assert!(extractor.calls().await.is_empty());
}

fn config_for(data_dir: &Path, api_endpoint: &str) -> AamConfig {
	let layer = ConfigLayer {
		hub: Some(HubLayer {
			api_endpoint: Some(api_endpoint.to_string()),
			..Default::default()
		}),
		site: Some(SiteLayer {
			data_dir: Some(data_dir.to_path_buf()),
			plugin_dir: Some(data_dir.join("plugins")),
			..Default::default()
		}),
		..Default::default()
	};
	let paths = PathsConfig {
		user_config_file: data_dir.join("config.toml"),
		system_config_file: "/etc/aam/config.toml".into(),
		data_dir: data_dir.to_path_buf(),
	};
	AamConfig::from_layer(layer, paths).unwrap()
}

#[tokio::test]
async fn outdated_host_is_refused_before_download() {
	let server = MockServer::start().await;
	Mock::given(method("GET"))
		.respond_with(ResponseTemplate::new(200).set_body_bytes(zip_bytes()))
		.expect(0)
		.mount(&server)
		.await;
	let site = tempfile::tempdir().unwrap();
	std::fs::write(site.path().join("host.json"), r#"{"version": "6.3.2"}"#).unwrap();
	let mut reporter = RecordingReporter::new();

	let args = InstallAddonArgs {
		license: license("LIC"),
	};
	let err = run(args, &config_for(site.path(), &server.uri()), &mut reporter)
		.await
		.unwrap_err();

	assert_eq!(
		err.to_string(),
		"Advanced Access Manager 6.3.3 or higher is required."
	);
	assert!(!site.path().join("plugins").exists());
	assert!(reporter.lines().is_empty());
}

#[tokio::test]
async fn compatible_host_installs_through_run() {
	let server = MockServer::start().await;
	serve_package(&server, "LIC", zip_bytes()).await;
	let site = tempfile::tempdir().unwrap();
	std::fs::write(site.path().join("host.json"), r#"{"version": "6.9.0"}"#).unwrap();
	let mut reporter = RecordingReporter::new();

	let args = InstallAddonArgs {
		license: license("LIC"),
	};
	run(args, &config_for(site.path(), &server.uri()), &mut reporter)
		.await
		.unwrap();

	assert!(site.path().join("plugins/aam-ip-check/bootstrap.php").exists());
	assert_eq!(reporter.messages(Severity::Success), vec![INSTALLED]);
}
