// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

pub mod install_addon;
pub mod install_policy;

use std::process::ExitCode;

use aam_cli_config::AamConfig;
use aam_host::{ensure_compatible, FileHost, HostError};

/// How a command that did not fail outright finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
	Clean,
	/// Some per-subject steps failed and were reported.
	WithFailures,
}

impl Completion {
	pub fn exit_code(self) -> ExitCode {
		match self {
			Completion::Clean => ExitCode::SUCCESS,
			Completion::WithFailures => ExitCode::FAILURE,
		}
	}
}

/// Open the configured host, refusing versions older than the supported
/// minimum. Every command goes through here before touching the network.
pub(crate) async fn open_host(config: &AamConfig) -> Result<FileHost, HostError> {
	let host = FileHost::new(config.site.data_dir.clone());
	ensure_compatible(host.manifest().await?.as_ref())?;
	Ok(host)
}
