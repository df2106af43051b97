// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Assignment flags and the write plan derived from them.

/// Assignment options of `install-policy`.
///
/// User and role lists are kept as the raw comma-separated strings the
/// operator typed; [`plan`] splits them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssignmentFlags {
	pub users: Option<String>,
	pub roles: Option<String>,
	pub visitors: bool,
	pub default: bool,
	pub exclude_users: Option<String>,
	pub exclude_roles: Option<String>,
	pub exclude_visitors: bool,
}

impl AssignmentFlags {
	/// True when no assignment was requested at all.
	pub fn is_empty(&self) -> bool {
		plan(self).is_empty()
	}
}

/// What a single step writes to, before resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
	User(String),
	Role(String),
	Visitor,
	Default,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
	pub target: Target,
	pub effect: bool,
}

/// Split a comma-separated list and trim each token.
///
/// Empty tokens are kept so that `1,,2` reports the blank entry instead of
/// dropping it silently.
pub fn split_tokens(list: &str) -> impl Iterator<Item = &str> {
	list.split(',').map(str::trim)
}

/// Ordered steps for `flags`: users, roles, visitors and default with effect
/// `true`, then users, roles and visitors with effect `false`.
pub fn plan(flags: &AssignmentFlags) -> Vec<Step> {
	let mut steps = Vec::new();

	push_list(&mut steps, flags.users.as_deref(), Target::User, true);
	push_list(&mut steps, flags.roles.as_deref(), Target::Role, true);
	if flags.visitors {
		steps.push(Step {
			target: Target::Visitor,
			effect: true,
		});
	}
	if flags.default {
		steps.push(Step {
			target: Target::Default,
			effect: true,
		});
	}

	push_list(&mut steps, flags.exclude_users.as_deref(), Target::User, false);
	push_list(&mut steps, flags.exclude_roles.as_deref(), Target::Role, false);
	if flags.exclude_visitors {
		steps.push(Step {
			target: Target::Visitor,
			effect: false,
		});
	}

	steps
}

fn push_list(steps: &mut Vec<Step>, list: Option<&str>, target: fn(String) -> Target, effect: bool) {
	let Some(list) = list else {
		return;
	};
	steps.extend(split_tokens(list).map(|token| Step {
		target: target(token.to_string()),
		effect,
	}));
}
