// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sources: files, environment, CLI, defaults.

use std::path::PathBuf;

use tracing::{debug, trace, warn};

use crate::layer::*;
use crate::paths::PathsConfig;
use crate::secret_env::load_secret_env;
use crate::ConfigError;

/// Source precedence levels (higher = overrides lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
	Defaults = 10,
	SystemFile = 20,
	UserFile = 30,
	ExplicitFile = 40,
	Environment = 50,
	Cli = 60,
}

/// Trait for configuration sources.
pub trait ConfigSource: Send + Sync {
	/// Name for logging
	fn name(&self) -> &'static str;

	/// Precedence level
	fn precedence(&self) -> Precedence;

	/// Load configuration layer from this source
	fn load(&self) -> Result<ConfigLayer, ConfigError>;

	/// Whether a load failure aborts configuration instead of skipping the
	/// source.
	fn required(&self) -> bool {
		true
	}
}

/// Built-in defaults source.
pub struct DefaultsSource;

impl ConfigSource for DefaultsSource {
	fn name(&self) -> &'static str {
		"defaults"
	}
	fn precedence(&self) -> Precedence {
		Precedence::Defaults
	}

	fn load(&self) -> Result<ConfigLayer, ConfigError> {
		// Defaults are applied during finalization
		Ok(ConfigLayer::default())
	}
}

/// File-based configuration source (TOML).
pub struct FileSource {
	path: PathBuf,
	precedence: Precedence,
	name: &'static str,
}

impl FileSource {
	/// System config: /etc/aam/config.toml
	pub fn system() -> Self {
		Self {
			path: PathBuf::from(crate::paths::SYSTEM_CONFIG_FILE),
			precedence: Precedence::SystemFile,
			name: "system-config",
		}
	}

	/// User config: ~/.config/aam/config.toml
	pub fn user(paths: &PathsConfig) -> Self {
		Self {
			path: paths.user_config_file.clone(),
			precedence: Precedence::UserFile,
			name: "user-config",
		}
	}

	/// File passed with `--config`
	pub fn explicit(path: PathBuf) -> Self {
		Self {
			path,
			precedence: Precedence::ExplicitFile,
			name: "explicit-config",
		}
	}
}

impl ConfigSource for FileSource {
	fn name(&self) -> &'static str {
		self.name
	}
	fn precedence(&self) -> Precedence {
		self.precedence
	}

	/// Only the system-wide file may be unreadable without stopping the run.
	fn required(&self) -> bool {
		self.precedence != Precedence::SystemFile
	}

	fn load(&self) -> Result<ConfigLayer, ConfigError> {
		if !self.path.exists() {
			if self.precedence == Precedence::ExplicitFile {
				return Err(ConfigError::invalid_value(
					"config",
					format!("{} does not exist", self.path.display()),
				));
			}
			debug!(path = %self.path.display(), source = self.name, "config file not found, skipping");
			return Ok(ConfigLayer::default());
		}

		debug!(path = %self.path.display(), source = self.name, "loading config file");

		let content = std::fs::read_to_string(&self.path)?;
		let layer: ConfigLayer = toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
			path: self.path.clone(),
			source: e,
		})?;

		trace!(source = self.name, "parsed config layer");
		Ok(layer)
	}
}

/// Environment variable source.
///
/// Convention: `AAM_<FIELD>`. The license key also honours `AAM_LICENSE_FILE`.
pub struct EnvSource;

impl ConfigSource for EnvSource {
	fn name(&self) -> &'static str {
		"environment"
	}
	fn precedence(&self) -> Precedence {
		Precedence::Environment
	}

	fn load(&self) -> Result<ConfigLayer, ConfigError> {
		debug!("loading environment variables");
		let mut layer = layer_from_vars(std::env::vars());

		if let Some(license) = load_secret_env("AAM_LICENSE")? {
			trace!("loaded license key from environment");
			layer.hub.get_or_insert_with(HubLayer::default).license = Some(license);
		}

		Ok(layer)
	}
}

/// Build a layer from non-secret `AAM_*` variables.
pub(crate) fn layer_from_vars<I>(vars: I) -> ConfigLayer
where
	I: IntoIterator<Item = (String, String)>,
{
	let mut layer = ConfigLayer::default();

	for (key, value) in vars {
		if !key.starts_with("AAM_") {
			continue;
		}

		let value = value.trim().to_string();
		if value.is_empty() {
			continue;
		}

		trace!(key = %key, "processing env var");

		match key.as_str() {
			"AAM_API_ENDPOINT" => {
				layer.hub.get_or_insert_with(HubLayer::default).api_endpoint = Some(value);
			}
			"AAM_POLICY_ENDPOINT" => {
				layer
					.hub
					.get_or_insert_with(HubLayer::default)
					.policy_endpoint = Some(value);
			}
			"AAM_SITE_URL" => {
				layer.site.get_or_insert_with(SiteLayer::default).url = Some(value);
			}
			"AAM_DATA_DIR" => {
				layer.site.get_or_insert_with(SiteLayer::default).data_dir = Some(PathBuf::from(value));
			}
			"AAM_PLUGIN_DIR" => {
				layer.site.get_or_insert_with(SiteLayer::default).plugin_dir =
					Some(PathBuf::from(value));
			}
			"AAM_HTTP_TIMEOUT_SECS" => match value.parse() {
				Ok(v) => {
					layer.http.get_or_insert_with(HttpLayer::default).timeout_secs = Some(v);
				}
				Err(_) => warn!(value = %value, "ignoring non-numeric AAM_HTTP_TIMEOUT_SECS"),
			},
			"AAM_LOG_LEVEL" => {
				layer.logging.get_or_insert_with(LoggingLayer::default).level = Some(value);
			}
			"AAM_LOG_FORMAT" => {
				layer.logging.get_or_insert_with(LoggingLayer::default).format = Some(value);
			}
			_ => {}
		}
	}

	layer
}

/// CLI override source.
pub struct CliSource {
	overrides: CliOverrides,
}

/// CLI argument overrides.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
	pub config_file: Option<PathBuf>,
	pub log_level: Option<String>,
	pub log_format: Option<String>,
	pub site_url: Option<String>,
	pub data_dir: Option<PathBuf>,
	pub plugin_dir: Option<PathBuf>,
}

impl CliSource {
	pub fn new(overrides: CliOverrides) -> Self {
		Self { overrides }
	}
}

impl ConfigSource for CliSource {
	fn name(&self) -> &'static str {
		"cli"
	}
	fn precedence(&self) -> Precedence {
		Precedence::Cli
	}

	fn load(&self) -> Result<ConfigLayer, ConfigError> {
		debug!("loading CLI overrides");
		let mut layer = ConfigLayer::default();

		if let Some(ref url) = self.overrides.site_url {
			layer.site.get_or_insert_with(SiteLayer::default).url = Some(url.clone());
		}

		if let Some(ref dir) = self.overrides.data_dir {
			layer.site.get_or_insert_with(SiteLayer::default).data_dir = Some(dir.clone());
		}

		if let Some(ref dir) = self.overrides.plugin_dir {
			layer.site.get_or_insert_with(SiteLayer::default).plugin_dir = Some(dir.clone());
		}

		if let Some(ref level) = self.overrides.log_level {
			layer.logging.get_or_insert_with(LoggingLayer::default).level = Some(level.clone());
		}

		if let Some(ref format) = self.overrides.log_format {
			layer.logging.get_or_insert_with(LoggingLayer::default).format = Some(format.clone());
		}

		Ok(layer)
	}
}
