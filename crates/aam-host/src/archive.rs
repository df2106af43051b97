// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Zip extraction of add-on packages.

use std::fs;
use std::path::Path;

use async_trait::async_trait;
use tracing::debug;

use crate::error::HostError;
use crate::traits::PackageExtractor;

/// Extracts zip archives, refusing entries that would land outside the
/// destination directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZipExtractor;

#[async_trait]
impl PackageExtractor for ZipExtractor {
	async fn extract(&self, archive: &Path, destination: &Path) -> Result<usize, HostError> {
		let archive = archive.to_path_buf();
		let destination = destination.to_path_buf();

		tokio::task::spawn_blocking(move || extract_zip(&archive, &destination))
			.await
			.map_err(|e| HostError::Extraction(format!("extraction task failed: {e}")))?
	}
}

fn extract_zip(archive: &Path, destination: &Path) -> Result<usize, HostError> {
	let file = fs::File::open(archive).map_err(|e| HostError::io(archive, e))?;
	let mut zip = zip::ZipArchive::new(file)
		.map_err(|e| HostError::Extraction(format!("Incompatible archive: {e}")))?;

	fs::create_dir_all(destination).map_err(|e| HostError::io(destination, e))?;

	let mut written = 0;
	for index in 0..zip.len() {
		let mut entry = zip
			.by_index(index)
			.map_err(|e| HostError::Extraction(format!("Could not read archive entry: {e}")))?;

		let Some(relative) = entry.enclosed_name() else {
			return Err(HostError::Extraction(format!(
				"Archive entry {} escapes the plugin directory",
				entry.name()
			)));
		};
		let target = destination.join(relative);

		if entry.is_dir() {
			fs::create_dir_all(&target).map_err(|e| HostError::io(&target, e))?;
			continue;
		}

		if let Some(parent) = target.parent() {
			fs::create_dir_all(parent).map_err(|e| HostError::io(parent, e))?;
		}

		let mut out = fs::File::create(&target).map_err(|e| HostError::io(&target, e))?;
		std::io::copy(&mut entry, &mut out).map_err(|e| HostError::io(&target, e))?;

		#[cfg(unix)]
		if let Some(mode) = entry.unix_mode() {
			use std::os::unix::fs::PermissionsExt;
			// Keep the rwx bits only
			let perms = fs::Permissions::from_mode(mode & 0o777);
			fs::set_permissions(&target, perms).map_err(|e| HostError::io(&target, e))?;
		}

		written += 1;
	}

	debug!(files = written, destination = %destination.display(), "archive extracted");
	Ok(written)
}
