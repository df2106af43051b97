// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Loading secrets from environment variables.
//!
//! Supports the `VAR` / `VAR_FILE` convention, so a license key can be
//! mounted as a file (Docker or Kubernetes secrets) instead of living in the
//! process environment.

use std::path::PathBuf;
use std::{env, fs};

use aam_common_secret::SecretString;
use thiserror::Error;

/// Errors that can occur when loading secrets from environment variables.
#[derive(Debug, Error)]
pub enum SecretEnvError {
	#[error("failed to read secret file at {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("secret file path in {var} is empty")]
	EmptyPath { var: String },
}

/// Load a secret using the `VAR` / `VAR_FILE` convention.
///
/// `{var}_FILE` wins over `{var}`. A single trailing newline is stripped from
/// file contents. Returns `Ok(None)` when neither is set.
pub fn load_secret_env(var: &str) -> Result<Option<SecretString>, SecretEnvError> {
	let file_var = format!("{var}_FILE");

	if let Ok(path_str) = env::var(&file_var) {
		return read_secret_file(&file_var, &path_str).map(Some);
	}

	if let Ok(value) = env::var(var) {
		return Ok(Some(SecretString::new(value)));
	}

	Ok(None)
}

fn read_secret_file(file_var: &str, path_str: &str) -> Result<SecretString, SecretEnvError> {
	if path_str.is_empty() {
		return Err(SecretEnvError::EmptyPath {
			var: file_var.to_string(),
		});
	}

	let path = PathBuf::from(path_str);
	let content = fs::read_to_string(&path).map_err(|e| SecretEnvError::Io {
		path: path.clone(),
		source: e,
	})?;

	let secret = content.strip_suffix('\n').unwrap_or(&content).to_string();
	Ok(SecretString::new(secret))
}
