// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! `aam install-addon <license>`

use std::io::Write;
use std::path::Path;

use aam_cli_config::AamConfig;
use aam_common_secret::SecretString;
use aam_host::{HostError, PackageExtractor, ZipExtractor};
use aam_hub::HubClient;
use anyhow::Context;
use tempfile::NamedTempFile;
use tracing::{info, instrument, warn};

use crate::commands::{open_host, Completion};
use crate::reporter::Reporter;

pub const INSTALLED: &str = "AAM add-on installed successfully";
pub const DOWNLOAD_FAILED: &str = "Failed to download the package";

#[derive(Debug, Clone, clap::Args)]
pub struct InstallAddonArgs {
	/// License key the add-on is registered to
	pub license: SecretString,
}

pub async fn run(
	args: InstallAddonArgs,
	config: &AamConfig,
	reporter: &mut dyn Reporter,
) -> anyhow::Result<Completion> {
	open_host(config).await?;

	let hub = HubClient::new(
		config.hub.api_endpoint.clone(),
		config.hub.policy_endpoint.clone(),
		&config.site.url,
		config.http.timeout,
	)
	.context("failed to build HTTP client")?;

	install(
		&hub,
		&ZipExtractor,
		&args.license,
		&config.site.plugin_dir,
		reporter,
	)
	.await?;
	Ok(Completion::Clean)
}

/// Download the package for `license` and unpack it under `plugin_dir`.
///
/// Errors are returned unchanged so their message reaches the operator
/// as-is.
#[instrument(skip_all, fields(plugin_dir = %plugin_dir.display()))]
pub async fn install(
	hub: &HubClient,
	extractor: &dyn PackageExtractor,
	license: &SecretString,
	plugin_dir: &Path,
	reporter: &mut dyn Reporter,
) -> anyhow::Result<()> {
	let package = hub.download_addon(license).await?;
	let archive = persist_package(package).await?;

	let files = extractor.extract(archive.path(), plugin_dir).await?;
	info!(files, "add-on installed");

	reporter.success(INSTALLED);
	Ok(())
}

/// Write the package to an `aam_`-prefixed temp file, removed on drop.
async fn persist_package(package: Vec<u8>) -> Result<NamedTempFile, HostError> {
	if package.is_empty() {
		warn!("hub returned an empty package");
		return Err(HostError::WriteFailure(DOWNLOAD_FAILED.to_string()));
	}

	let write = move || -> std::io::Result<NamedTempFile> {
		let mut file = tempfile::Builder::new()
			.prefix("aam_")
			.suffix(".zip")
			.tempfile()?;
		file.write_all(&package)?;
		file.flush()?;
		Ok(file)
	};

	tokio::task::spawn_blocking(write)
		.await
		.map_err(std::io::Error::other)
		.and_then(|written| written)
		.map_err(|e| {
			warn!(error = %e, "failed to persist package");
			HostError::WriteFailure(DOWNLOAD_FAILED.to_string())
		})
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn empty_package_is_a_download_failure() {
		let err = persist_package(Vec::new()).await.unwrap_err();
		assert_eq!(err.to_string(), DOWNLOAD_FAILED);
	}

	#[tokio::test]
	async fn package_lands_in_prefixed_temp_file() {
		let file = persist_package(b"PK\x03\x04".to_vec()).await.unwrap();
		let name = file.path().file_name().unwrap().to_string_lossy().to_string();
		assert!(name.starts_with("aam_"));
		assert_eq!(std::fs::read(file.path()).unwrap(), b"PK\x03\x04");
	}
}
