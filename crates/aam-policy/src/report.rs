// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use aam_host::Subject;

use crate::error::AssignmentError;

/// Result of one assignment step.
#[derive(Debug)]
pub enum AssignmentOutcome {
	Attached {
		subject: Subject,
		/// Operator-facing name: the user's email, `role <slug>`, `visitors`
		/// or `everybody`.
		label: String,
		effect: bool,
	},
	Failed {
		error: AssignmentError,
	},
}

impl AssignmentOutcome {
	pub fn message(&self) -> String {
		match self {
			AssignmentOutcome::Attached { label, .. } => format!("Policy attached to {label}"),
			AssignmentOutcome::Failed { error } => error.to_string(),
		}
	}

	pub fn is_failure(&self) -> bool {
		matches!(self, AssignmentOutcome::Failed { .. })
	}
}

/// Outcomes of an assignment run, in execution order.
#[derive(Debug, Default)]
pub struct AssignmentReport {
	outcomes: Vec<AssignmentOutcome>,
}

impl AssignmentReport {
	pub fn push(&mut self, outcome: AssignmentOutcome) {
		self.outcomes.push(outcome);
	}

	pub fn outcomes(&self) -> &[AssignmentOutcome] {
		&self.outcomes
	}

	pub fn is_empty(&self) -> bool {
		self.outcomes.is_empty()
	}

	pub fn has_failures(&self) -> bool {
		self.outcomes.iter().any(AssignmentOutcome::is_failure)
	}

	pub fn attached_count(&self) -> usize {
		self.outcomes.iter().filter(|o| !o.is_failure()).count()
	}

	pub fn failure_count(&self) -> usize {
		self.outcomes.iter().filter(|o| o.is_failure()).count()
	}
}

impl IntoIterator for AssignmentReport {
	type Item = AssignmentOutcome;
	type IntoIter = std::vec::IntoIter<AssignmentOutcome>;

	fn into_iter(self) -> Self::IntoIter {
		self.outcomes.into_iter()
	}
}
