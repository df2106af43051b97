// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Runtime configuration types with resolved defaults.

use std::path::PathBuf;
use std::time::Duration;

use aam_common_secret::SecretString;
use serde::{Deserialize, Serialize};
use tracing::warn;
use url::Url;

use crate::layer::*;
use crate::paths::PathsConfig;
use crate::ConfigError;

pub const DEFAULT_API_ENDPOINT: &str = "https://api.aamplugin.com/v2";
pub const DEFAULT_SITE_URL: &str = "http://localhost";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// The final, validated configuration.
#[derive(Debug, Clone)]
pub struct AamConfig {
	pub hub: HubConfig,
	pub site: SiteConfig,
	pub http: HttpConfig,
	pub logging: LoggingConfig,
	pub paths: PathsConfig,
}

/// Remote package registry and policy hub.
#[derive(Debug, Clone)]
pub struct HubConfig {
	/// Base for `/download/<id>`.
	pub api_endpoint: Url,
	/// Base for `/policy/<id>`. Falls back to `api_endpoint`.
	pub policy_endpoint: Url,
	/// License used for policy downloads when none is given on the command line.
	pub license: Option<SecretString>,
}

#[derive(Debug, Clone)]
pub struct SiteConfig {
	/// Sent as the `Origin` header on every hub request.
	pub url: Url,
	/// Root of the file-backed host store.
	pub data_dir: PathBuf,
	/// Add-on packages are extracted here.
	pub plugin_dir: PathBuf,
}

#[derive(Debug, Clone)]
pub struct HttpConfig {
	pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
	pub level: LogLevel,
	pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
	Error,
	Warn,
	#[default]
	Info,
	Debug,
	Trace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
	Pretty,
	Json,
	#[default]
	Compact,
}

impl AamConfig {
	/// Build runtime config from a merged layer and paths.
	pub fn from_layer(layer: ConfigLayer, paths: PathsConfig) -> Result<Self, ConfigError> {
		let hub = build_hub_config(layer.hub)?;
		let site = build_site_config(layer.site, &paths)?;
		let http = build_http_config(layer.http)?;
		let logging = build_logging_config(layer.logging);

		Ok(Self {
			hub,
			site,
			http,
			logging,
			paths,
		})
	}
}

fn parse_url(field: &str, raw: &str) -> Result<Url, ConfigError> {
	let url = Url::parse(raw).map_err(|e| ConfigError::invalid_value(field, e.to_string()))?;
	if !matches!(url.scheme(), "http" | "https") {
		return Err(ConfigError::invalid_value(
			field,
			format!("unsupported scheme '{}'", url.scheme()),
		));
	}
	if url.cannot_be_a_base() {
		return Err(ConfigError::invalid_value(field, "URL cannot be used as a base"));
	}
	Ok(url)
}

fn build_hub_config(layer: Option<HubLayer>) -> Result<HubConfig, ConfigError> {
	let layer = layer.unwrap_or_default();

	let api_endpoint = parse_url(
		"hub.api_endpoint",
		layer.api_endpoint.as_deref().unwrap_or(DEFAULT_API_ENDPOINT),
	)?;
	let policy_endpoint = match layer.policy_endpoint.as_deref() {
		Some(raw) => parse_url("hub.policy_endpoint", raw)?,
		None => api_endpoint.clone(),
	};

	Ok(HubConfig {
		api_endpoint,
		policy_endpoint,
		license: layer.license.filter(|l| !l.is_blank()),
	})
}

fn build_site_config(layer: Option<SiteLayer>, paths: &PathsConfig) -> Result<SiteConfig, ConfigError> {
	let layer = layer.unwrap_or_default();

	let url = parse_url("site.url", layer.url.as_deref().unwrap_or(DEFAULT_SITE_URL))?;
	let data_dir = layer.data_dir.unwrap_or_else(|| paths.data_dir.clone());
	let plugin_dir = layer.plugin_dir.unwrap_or_else(|| data_dir.join("plugins"));

	Ok(SiteConfig {
		url,
		data_dir,
		plugin_dir,
	})
}

fn build_http_config(layer: Option<HttpLayer>) -> Result<HttpConfig, ConfigError> {
	let secs = layer
		.and_then(|l| l.timeout_secs)
		.unwrap_or(DEFAULT_TIMEOUT_SECS);
	if secs == 0 {
		return Err(ConfigError::invalid_value(
			"http.timeout_secs",
			"timeout must be at least one second",
		));
	}
	Ok(HttpConfig {
		timeout: Duration::from_secs(secs),
	})
}

fn build_logging_config(layer: Option<LoggingLayer>) -> LoggingConfig {
	let layer = layer.unwrap_or_default();
	LoggingConfig {
		level: parse_log_level(layer.level.as_deref()),
		format: parse_log_format(layer.format.as_deref()),
	}
}

fn parse_log_level(s: Option<&str>) -> LogLevel {
	match s {
		Some("error") => LogLevel::Error,
		Some("warn") => LogLevel::Warn,
		Some("info") | None => LogLevel::Info,
		Some("debug") => LogLevel::Debug,
		Some("trace") => LogLevel::Trace,
		Some(other) => {
			warn!(level = %other, "unknown log level, using info");
			LogLevel::Info
		}
	}
}

fn parse_log_format(s: Option<&str>) -> LogFormat {
	match s {
		Some("json") => LogFormat::Json,
		Some("compact") | None => LogFormat::Compact,
		Some("pretty") => LogFormat::Pretty,
		Some(other) => {
			warn!(format = %other, "unknown log format, using compact");
			LogFormat::Compact
		}
	}
}
