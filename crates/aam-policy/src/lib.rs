// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Policy assignment for aam.
//!
//! Turns the assignment flags of `install-policy` into an ordered plan of
//! option-list writes and executes it against the host:
//!
//! 1. users, roles, visitors and default are included (effect `true`)
//! 2. users, roles and visitors are then excluded (effect `false`)
//!
//! Inclusions always run before exclusions, so a subject named on both sides
//! ends up excluded. Every step is independent: a token that cannot be
//! resolved or a write the host refuses is recorded in the
//! [`AssignmentReport`] and the remaining steps still run.

pub mod assign;
pub mod error;
pub mod flags;
pub mod report;
pub mod resolver;

pub use assign::assign_policy;
pub use error::AssignmentError;
pub use flags::{plan, split_tokens, AssignmentFlags, Step, Target};
pub use report::{AssignmentOutcome, AssignmentReport};
pub use resolver::{classify_user_token, SubjectKind, SubjectResolver, UserToken};
