// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Collaborator traits the commands are written against.

use std::path::Path;

use async_trait::async_trait;

use crate::error::HostError;
use crate::policy::{NewPolicy, PolicyId, PolicyList, PolicyRecord};
use crate::subject::{Subject, User, UserId};

/// Lookup of users and roles on the managed site.
#[async_trait]
pub trait SubjectDirectory: Send + Sync {
	async fn user_by_id(&self, id: UserId) -> Result<Option<User>, HostError>;

	/// Email comparison is case-insensitive.
	async fn user_by_email(&self, email: &str) -> Result<Option<User>, HostError>;

	async fn role_exists(&self, slug: &str) -> Result<bool, HostError>;
}

/// Persistence for policy documents.
#[async_trait]
pub trait PolicyRepository: Send + Sync {
	/// Store a policy and return its identifier.
	///
	/// Records are immutable once created: if a record already exists for
	/// `policy.source`, its identifier is returned and nothing is written.
	async fn create_policy(&self, policy: NewPolicy) -> Result<PolicyId, HostError>;

	async fn policy(&self, id: PolicyId) -> Result<Option<PolicyRecord>, HostError>;
}

/// Settings of a single subject, scoped to the policy object type.
#[async_trait]
pub trait SubjectSettings: Send + Sync {
	fn subject(&self) -> &Subject;

	async fn read_policy_list(&self) -> Result<PolicyList, HostError>;

	async fn write_policy_list(&self, list: &PolicyList) -> Result<(), HostError>;

	/// Read-modify-write of a single entry.
	async fn update_policy(&self, id: PolicyId, effect: bool) -> Result<(), HostError> {
		let mut list = self.read_policy_list().await?;
		list.set(id, effect);
		self.write_policy_list(&list).await
	}
}

/// Per-subject key-value settings.
pub trait SettingsStore: Send + Sync {
	fn for_subject(&self, subject: Subject) -> Box<dyn SubjectSettings + '_>;

	fn for_user(&self, id: UserId) -> Box<dyn SubjectSettings + '_> {
		self.for_subject(Subject::User(id))
	}

	fn for_role(&self, slug: &str) -> Box<dyn SubjectSettings + '_> {
		self.for_subject(Subject::Role(slug.to_string()))
	}

	fn for_visitor(&self) -> Box<dyn SubjectSettings + '_> {
		self.for_subject(Subject::Visitor)
	}

	fn for_default(&self) -> Box<dyn SubjectSettings + '_> {
		self.for_subject(Subject::Default)
	}
}

/// Unpacks add-on archives into the plugin directory.
#[async_trait]
pub trait PackageExtractor: Send + Sync {
	/// Extract `archive` under `destination`, returning the number of files
	/// written.
	async fn extract(&self, archive: &Path, destination: &Path) -> Result<usize, HostError>;
}
