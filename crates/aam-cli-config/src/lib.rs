// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration management for the aam command line.
//!
//! This crate provides:
//! - XDG Base Directory compliant path resolution
//! - Layered configuration from multiple sources
//! - TOML configuration file parsing
//! - Environment variable overrides (`AAM_*`)
//! - Validation of hub endpoints and site identity

pub mod error;
pub mod layer;
pub mod paths;
pub mod registry;
pub mod runtime;
pub mod secret_env;
pub mod sources;

pub use error::ConfigError;
pub use layer::ConfigLayer;
pub use paths::PathsConfig;
pub use registry::ConfigRegistry;
pub use runtime::{AamConfig, HttpConfig, HubConfig, LogFormat, LogLevel, LoggingConfig, SiteConfig};
pub use secret_env::{load_secret_env, SecretEnvError};
pub use sources::{CliOverrides, ConfigSource, Precedence};

/// Load configuration from every source, with CLI overrides applied last.
///
/// Precedence (lowest first): defaults, `/etc/aam/config.toml`, the user
/// config file, an explicit `--config` file, `AAM_*` environment variables,
/// command-line flags.
pub fn load_config_with_cli(cli: CliOverrides) -> Result<AamConfig, ConfigError> {
	let paths = paths::resolve_xdg_paths()?;

	let mut registry = ConfigRegistry::new();

	registry.register(Box::new(sources::DefaultsSource));
	registry.register(Box::new(sources::FileSource::system()));
	registry.register(Box::new(sources::FileSource::user(&paths)));
	if let Some(ref path) = cli.config_file {
		registry.register(Box::new(sources::FileSource::explicit(path.clone())));
	}
	registry.register(Box::new(sources::EnvSource));
	registry.register(Box::new(sources::CliSource::new(cli)));

	registry.load(paths)
}
