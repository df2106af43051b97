// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Host compatibility check.

use serde::{Deserialize, Serialize};

use crate::error::HostError;

/// Oldest access-manager release whose storage layout the commands understand.
pub const MIN_HOST_VERSION: &str = "6.3.3";

/// `host.json` at the root of a host data directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostManifest {
	pub version: String,
}

/// Fail when the host declares a version older than [`MIN_HOST_VERSION`].
///
/// A host without a manifest is accepted.
pub fn ensure_compatible(manifest: Option<&HostManifest>) -> Result<(), HostError> {
	let Some(manifest) = manifest else {
		return Ok(());
	};

	if compare_versions(&manifest.version, MIN_HOST_VERSION) == std::cmp::Ordering::Less {
		return Err(HostError::Incompatible {
			required: MIN_HOST_VERSION.to_string(),
			found: manifest.version.clone(),
		});
	}

	Ok(())
}

/// Compare dotted numeric versions component by component.
///
/// Missing components count as zero and non-numeric suffixes
/// (`6.9.0-beta`) are ignored, so `6.3` equals `6.3.0`.
fn compare_versions(a: &str, b: &str) -> std::cmp::Ordering {
	let parse = |v: &str| -> Vec<u64> {
		v.trim()
			.split('.')
			.map(|part| {
				part.chars()
					.take_while(|c| c.is_ascii_digit())
					.collect::<String>()
					.parse()
					.unwrap_or(0)
			})
			.collect()
	};

	let (a, b) = (parse(a), parse(b));
	let len = a.len().max(b.len());
	for i in 0..len {
		let (x, y) = (a.get(i).copied().unwrap_or(0), b.get(i).copied().unwrap_or(0));
		match x.cmp(&y) {
			std::cmp::Ordering::Equal => continue,
			other => return other,
		}
	}
	std::cmp::Ordering::Equal
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::cmp::Ordering;

	fn manifest(version: &str) -> HostManifest {
		HostManifest {
			version: version.to_string(),
		}
	}

	#[test]
	fn missing_manifest_is_accepted() {
		assert!(ensure_compatible(None).is_ok());
	}

	#[test]
	fn newer_and_equal_versions_pass() {
		assert!(ensure_compatible(Some(&manifest("6.3.3"))).is_ok());
		assert!(ensure_compatible(Some(&manifest("6.9.12"))).is_ok());
		assert!(ensure_compatible(Some(&manifest("7"))).is_ok());
	}

	#[test]
	fn older_version_is_rejected_with_requirement() {
		let err = ensure_compatible(Some(&manifest("6.3.2"))).unwrap_err();
		assert_eq!(
			err.to_string(),
			"Advanced Access Manager 6.3.3 or higher is required."
		);
	}

	#[test]
	fn version_comparison_pads_and_ignores_suffixes() {
		assert_eq!(compare_versions("6.3", "6.3.0"), Ordering::Equal);
		assert_eq!(compare_versions("6.10.0", "6.9.9"), Ordering::Greater);
		assert_eq!(compare_versions("6.4.0-beta", "6.4.0"), Ordering::Equal);
	}
}
