// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Assignment execution.

use aam_host::{PolicyId, SettingsStore, Subject, SubjectDirectory};
use tracing::{debug, instrument, warn};

use crate::error::AssignmentError;
use crate::flags::{plan, AssignmentFlags, Target};
use crate::report::{AssignmentOutcome, AssignmentReport};
use crate::resolver::SubjectResolver;

/// Attach `policy_id` to the subjects named by `flags`.
///
/// Steps run one at a time in plan order. Failures are collected into the
/// report and never stop later steps.
#[instrument(skip_all, fields(policy_id = %policy_id))]
pub async fn assign_policy(
	policy_id: PolicyId,
	flags: &AssignmentFlags,
	directory: &dyn SubjectDirectory,
	settings: &dyn SettingsStore,
) -> AssignmentReport {
	let resolver = SubjectResolver::new(directory);
	let mut report = AssignmentReport::default();

	for step in plan(flags) {
		let outcome = match resolve(&resolver, step.target).await {
			Ok((subject, label)) => write(settings, policy_id, subject, label, step.effect).await,
			Err(error) => AssignmentOutcome::Failed { error },
		};

		match &outcome {
			AssignmentOutcome::Attached { subject, effect, .. } => {
				debug!(subject = %subject, effect, "policy option written");
			}
			AssignmentOutcome::Failed { error } => {
				warn!(error = %error, "assignment step failed");
			}
		}
		report.push(outcome);
	}

	report
}

async fn resolve(
	resolver: &SubjectResolver<'_>,
	target: Target,
) -> Result<(Subject, String), AssignmentError> {
	match target {
		Target::User(token) => {
			let user = resolver.resolve_user(&token).await?;
			Ok((Subject::User(user.id), user.email))
		}
		Target::Role(slug) => {
			let slug = resolver.resolve_role(&slug).await?;
			let label = format!("role {slug}");
			Ok((Subject::Role(slug), label))
		}
		Target::Visitor => Ok((Subject::Visitor, "visitors".to_string())),
		Target::Default => Ok((Subject::Default, "everybody".to_string())),
	}
}

async fn write(
	settings: &dyn SettingsStore,
	policy_id: PolicyId,
	subject: Subject,
	label: String,
	effect: bool,
) -> AssignmentOutcome {
	let handle = settings.for_subject(subject.clone());
	match handle.update_policy(policy_id, effect).await {
		Ok(()) => AssignmentOutcome::Attached {
			subject,
			label,
			effect,
		},
		Err(source) => AssignmentOutcome::Failed {
			error: AssignmentError::WriteFailure { label, source },
		},
	}
}
