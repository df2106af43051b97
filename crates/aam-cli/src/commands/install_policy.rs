// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! `aam install-policy <id>`

use aam_cli_config::AamConfig;
use aam_common_secret::SecretString;
use aam_host::{PolicyRepository, SettingsStore, SubjectDirectory};
use aam_hub::HubClient;
use aam_policy::{assign_policy, AssignmentFlags, AssignmentOutcome};
use anyhow::Context;
use tracing::{info, instrument};

use crate::commands::{open_host, Completion};
use crate::reporter::Reporter;

#[derive(Debug, Clone, clap::Args)]
pub struct InstallPolicyArgs {
	/// Hub identifier of the policy
	pub id: String,

	/// Comma-separated user IDs or emails to attach the policy to
	#[arg(long, value_name = "LIST")]
	pub users: Option<String>,

	/// Comma-separated role slugs to attach the policy to
	#[arg(long, value_name = "LIST")]
	pub roles: Option<String>,

	/// Attach the policy to unauthenticated visitors
	#[arg(long)]
	pub visitors: bool,

	/// Attach the policy to everybody
	#[arg(long)]
	pub default: bool,

	/// Comma-separated user IDs or emails to exclude from the policy
	#[arg(long, value_name = "LIST")]
	pub exclude_users: Option<String>,

	/// Comma-separated role slugs to exclude from the policy
	#[arg(long, value_name = "LIST")]
	pub exclude_roles: Option<String>,

	/// Exclude unauthenticated visitors from the policy
	#[arg(long)]
	pub exclude_visitors: bool,

	/// License key for premium policies (falls back to the configured one)
	#[arg(long)]
	pub license: Option<SecretString>,
}

impl InstallPolicyArgs {
	pub fn flags(&self) -> AssignmentFlags {
		AssignmentFlags {
			users: self.users.clone(),
			roles: self.roles.clone(),
			visitors: self.visitors,
			default: self.default,
			exclude_users: self.exclude_users.clone(),
			exclude_roles: self.exclude_roles.clone(),
			exclude_visitors: self.exclude_visitors,
		}
	}
}

pub async fn run(
	args: InstallPolicyArgs,
	config: &AamConfig,
	reporter: &mut dyn Reporter,
) -> anyhow::Result<Completion> {
	let host = open_host(config).await?;

	let hub = HubClient::new(
		config.hub.api_endpoint.clone(),
		config.hub.policy_endpoint.clone(),
		&config.site.url,
		config.http.timeout,
	)
	.context("failed to build HTTP client")?;

	let license = args.license.as_ref().or(config.hub.license.as_ref());
	install(&hub, &host, &args.id, license, &args.flags(), reporter).await
}

/// Fetch policy `id`, persist it and attach it per `flags`.
///
/// Fetch and persistence errors are returned; assignment failures are
/// reported line by line and turn the result into
/// [`Completion::WithFailures`].
#[instrument(skip_all, fields(policy = %id))]
pub async fn install<H>(
	hub: &HubClient,
	host: &H,
	id: &str,
	license: Option<&SecretString>,
	flags: &AssignmentFlags,
	reporter: &mut dyn Reporter,
) -> anyhow::Result<Completion>
where
	H: PolicyRepository + SubjectDirectory + SettingsStore,
{
	let Some(document) = hub.fetch_policy(id, license).await? else {
		reporter.warning(&format!("Policy {id} has no content, nothing was installed"));
		return Ok(Completion::Clean);
	};

	let policy_id = host.create_policy(document.into_new_policy(id)?).await?;
	info!(policy_id = %policy_id, "policy stored");

	let report = assign_policy(policy_id, flags, host, host).await;
	let completion = if report.has_failures() {
		Completion::WithFailures
	} else {
		Completion::Clean
	};

	for outcome in report {
		match &outcome {
			AssignmentOutcome::Attached { .. } => reporter.success(&outcome.message()),
			AssignmentOutcome::Failed { .. } => reporter.error(&outcome.message()),
		}
	}

	Ok(completion)
}
