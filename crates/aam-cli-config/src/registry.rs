// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration registry - manages sources and merges layers.

use tracing::{debug, info, warn};

use crate::layer::ConfigLayer;
use crate::paths::PathsConfig;
use crate::runtime::AamConfig;
use crate::sources::ConfigSource;
use crate::ConfigError;

/// Registry that manages configuration sources and merges them.
pub struct ConfigRegistry {
	sources: Vec<Box<dyn ConfigSource>>,
}

impl ConfigRegistry {
	pub fn new() -> Self {
		Self {
			sources: Vec::new(),
		}
	}

	pub fn register(&mut self, source: Box<dyn ConfigSource>) {
		debug!(source = source.name(), precedence = ?source.precedence(), "registering config source");
		self.sources.push(source);
	}

	/// Load configuration from all sources, merge, and validate.
	///
	/// Sources are sorted by precedence (lowest first) and merged so higher
	/// precedence sources override lower ones. A failing source aborts the
	/// load unless it is optional, in which case it is logged and skipped.
	/// Validation errors of the merged result are fatal.
	pub fn load(&self, paths: PathsConfig) -> Result<AamConfig, ConfigError> {
		let mut sorted_sources: Vec<_> = self.sources.iter().collect();
		sorted_sources.sort_by_key(|s| s.precedence());

		debug!(
			source_count = sorted_sources.len(),
			"loading configuration from sources"
		);

		let mut merged = ConfigLayer::default();
		for source in &sorted_sources {
			match source.load() {
				Ok(layer) => {
					debug!(source = source.name(), "merging config layer");
					merged.merge(layer);
				}
				Err(e) if !source.required() => {
					warn!(source = source.name(), error = %e, "failed to load config source, skipping");
				}
				Err(e) => return Err(e),
			}
		}

		let config = AamConfig::from_layer(merged, paths)?;

		info!(
			api_endpoint = %config.hub.api_endpoint,
			policy_endpoint = %config.hub.policy_endpoint,
			site_url = %config.site.url,
			data_dir = %config.site.data_dir.display(),
			"configuration loaded"
		);

		Ok(config)
	}

	pub fn source_count(&self) -> usize {
		self.sources.len()
	}
}

impl Default for ConfigRegistry {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::layer::SiteLayer;
	use crate::sources::{DefaultsSource, EnvSource, FileSource, Precedence};

	struct FixedSource {
		name: &'static str,
		precedence: Precedence,
		site_url: Option<&'static str>,
		required: bool,
	}

	impl ConfigSource for FixedSource {
		fn name(&self) -> &'static str {
			self.name
		}
		fn precedence(&self) -> Precedence {
			self.precedence
		}
		fn required(&self) -> bool {
			self.required
		}

		fn load(&self) -> Result<ConfigLayer, ConfigError> {
			match self.site_url {
				Some(url) => Ok(ConfigLayer {
					site: Some(SiteLayer {
						url: Some(url.to_string()),
						..Default::default()
					}),
					..Default::default()
				}),
				None => Err(ConfigError::invalid_value("site.url", "unreadable")),
			}
		}
	}

	fn test_paths() -> PathsConfig {
		PathsConfig {
			user_config_file: "/tmp/aam-test/config.toml".into(),
			system_config_file: "/etc/aam/config.toml".into(),
			data_dir: "/tmp/aam-test/data".into(),
		}
	}

	#[test]
	fn test_registry_registers_sources() {
		let mut registry = ConfigRegistry::new();
		assert_eq!(registry.source_count(), 0);

		registry.register(Box::new(DefaultsSource));
		assert_eq!(registry.source_count(), 1);
	}

	#[test]
	fn test_precedence_merge_order() {
		let mut registry = ConfigRegistry::new();

		// Registered out of order; the registry sorts
		registry.register(Box::new(FixedSource {
			name: "cli",
			precedence: Precedence::Cli,
			site_url: Some("https://cli.example.com"),
			required: true,
		}));
		registry.register(Box::new(FixedSource {
			name: "user",
			precedence: Precedence::UserFile,
			site_url: Some("https://user.example.com"),
			required: true,
		}));

		let config = registry.load(test_paths()).unwrap();
		assert_eq!(config.site.url.as_str(), "https://cli.example.com/");
	}

	#[test]
	fn test_optional_failing_source_is_skipped() {
		let mut registry = ConfigRegistry::new();
		registry.register(Box::new(FixedSource {
			name: "system",
			precedence: Precedence::SystemFile,
			site_url: None,
			required: false,
		}));
		registry.register(Box::new(FixedSource {
			name: "user",
			precedence: Precedence::UserFile,
			site_url: Some("https://user.example.com"),
			required: true,
		}));

		let config = registry.load(test_paths()).unwrap();
		assert_eq!(config.site.url.as_str(), "https://user.example.com/");
	}

	#[test]
	fn test_required_failing_source_aborts() {
		let mut registry = ConfigRegistry::new();
		registry.register(Box::new(FixedSource {
			name: "user",
			precedence: Precedence::UserFile,
			site_url: Some("https://user.example.com"),
			required: true,
		}));
		registry.register(Box::new(FixedSource {
			name: "environment",
			precedence: Precedence::Environment,
			site_url: None,
			required: true,
		}));

		let err = registry.load(test_paths()).unwrap_err();
		assert!(matches!(err, ConfigError::InvalidValue { .. }));
	}

	#[test]
	fn test_broken_explicit_file_aborts() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("aam.toml");
		std::fs::write(&path, "[site\ndata_dir = ").unwrap();

		let mut registry = ConfigRegistry::new();
		registry.register(Box::new(DefaultsSource));
		registry.register(Box::new(FileSource::explicit(path)));

		let err = registry.load(test_paths()).unwrap_err();
		assert!(matches!(err, ConfigError::TomlParse { .. }));
	}

	#[test]
	fn test_unreadable_license_file_aborts_environment() {
		std::env::set_var("AAM_DATA_DIR", "/srv/site-data");
		std::env::set_var("AAM_LICENSE_FILE", "/nonexistent/aam/license");

		let mut registry = ConfigRegistry::new();
		registry.register(Box::new(DefaultsSource));
		registry.register(Box::new(EnvSource));
		let result = registry.load(test_paths());

		std::env::remove_var("AAM_DATA_DIR");
		std::env::remove_var("AAM_LICENSE_FILE");

		assert!(matches!(result, Err(ConfigError::SecretEnv(_))));
	}
}
