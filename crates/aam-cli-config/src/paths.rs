// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! XDG Base Directory compliant path resolution.

use std::path::PathBuf;

use crate::ConfigError;

pub const SYSTEM_CONFIG_FILE: &str = "/etc/aam/config.toml";

/// Resolved XDG paths for aam.
#[derive(Debug, Clone)]
pub struct PathsConfig {
	/// User config file: ~/.config/aam/config.toml
	pub user_config_file: PathBuf,
	/// System config file: /etc/aam/config.toml
	pub system_config_file: PathBuf,
	/// Default host data directory: ~/.local/share/aam/
	pub data_dir: PathBuf,
}

impl Default for PathsConfig {
	fn default() -> Self {
		Self {
			user_config_file: PathBuf::from("~/.config/aam/config.toml"),
			system_config_file: PathBuf::from(SYSTEM_CONFIG_FILE),
			data_dir: PathBuf::from("~/.local/share/aam"),
		}
	}
}

/// Resolve XDG paths according to the Base Directory Specification.
///
/// Uses `XDG_CONFIG_HOME` / `XDG_DATA_HOME` if set, otherwise `~/.config`
/// and `~/.local/share`.
pub fn resolve_xdg_paths() -> Result<PathsConfig, ConfigError> {
	let home = dirs::home_dir().ok_or(ConfigError::HomeDirNotFound)?;

	let config_home = std::env::var_os("XDG_CONFIG_HOME")
		.map(PathBuf::from)
		.unwrap_or_else(|| home.join(".config"));

	let data_home = std::env::var_os("XDG_DATA_HOME")
		.map(PathBuf::from)
		.unwrap_or_else(|| home.join(".local/share"));

	tracing::debug!(
		config_home = %config_home.display(),
		data_home = %data_home.display(),
		"resolved XDG paths"
	);

	Ok(PathsConfig {
		user_config_file: config_home.join("aam/config.toml"),
		system_config_file: PathBuf::from(SYSTEM_CONFIG_FILE),
		data_dir: data_home.join("aam"),
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_resolve_xdg_paths_succeeds() {
		let paths = resolve_xdg_paths().unwrap();
		assert!(paths.user_config_file.ends_with("aam/config.toml"));
		assert!(paths.data_dir.ends_with("aam"));
	}

	#[test]
	fn test_system_config_is_etc() {
		let paths = resolve_xdg_paths().unwrap();
		assert_eq!(paths.system_config_file, PathBuf::from("/etc/aam/config.toml"));
	}
}
