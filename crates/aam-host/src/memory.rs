// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! In-memory host for tests.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::HostError;
use crate::policy::{NewPolicy, PolicyId, PolicyList, PolicyRecord};
use crate::subject::{Subject, User, UserId};
use crate::traits::{
	PackageExtractor, PolicyRepository, SettingsStore, SubjectDirectory, SubjectSettings,
};

#[derive(Debug, Default)]
struct State {
	users: Vec<User>,
	roles: HashSet<String>,
	policies: Vec<PolicyRecord>,
	settings: HashMap<Subject, PolicyList>,
	write_log: Vec<Subject>,
	failing_subjects: HashSet<Subject>,
	fail_policy_create: bool,
}

/// Host that keeps everything in process memory.
///
/// Writes can be made to fail per subject, and every successful settings
/// write is logged so tests can assert which subjects were touched.
#[derive(Debug, Default)]
pub struct MemoryHost {
	state: RwLock<State>,
}

impl MemoryHost {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_user(mut self, id: u64, email: &str) -> Self {
		self.state.get_mut().users.push(User {
			id: UserId(id),
			email: email.to_string(),
			login: email.split('@').next().unwrap_or_default().to_string(),
		});
		self
	}

	pub fn with_role(mut self, slug: &str) -> Self {
		self.state.get_mut().roles.insert(slug.to_string());
		self
	}

	/// Make every settings write for `subject` fail.
	pub fn failing_writes_for(mut self, subject: Subject) -> Self {
		self.state.get_mut().failing_subjects.insert(subject);
		self
	}

	/// Make policy creation fail.
	pub fn failing_policy_create(mut self) -> Self {
		self.state.get_mut().fail_policy_create = true;
		self
	}

	/// Current policy list of a subject, empty if never written.
	pub async fn policy_list(&self, subject: &Subject) -> PolicyList {
		self.state
			.read()
			.await
			.settings
			.get(subject)
			.cloned()
			.unwrap_or_default()
	}

	/// Subjects in the order their settings were written.
	pub async fn write_log(&self) -> Vec<Subject> {
		self.state.read().await.write_log.clone()
	}

	pub async fn policy_count(&self) -> usize {
		self.state.read().await.policies.len()
	}
}

#[async_trait]
impl SubjectDirectory for MemoryHost {
	async fn user_by_id(&self, id: UserId) -> Result<Option<User>, HostError> {
		let state = self.state.read().await;
		Ok(state.users.iter().find(|u| u.id == id).cloned())
	}

	async fn user_by_email(&self, email: &str) -> Result<Option<User>, HostError> {
		let state = self.state.read().await;
		Ok(state
			.users
			.iter()
			.find(|u| u.email.eq_ignore_ascii_case(email))
			.cloned())
	}

	async fn role_exists(&self, slug: &str) -> Result<bool, HostError> {
		Ok(self.state.read().await.roles.contains(slug))
	}
}

#[async_trait]
impl PolicyRepository for MemoryHost {
	async fn create_policy(&self, policy: NewPolicy) -> Result<PolicyId, HostError> {
		let mut state = self.state.write().await;
		if state.fail_policy_create {
			return Err(HostError::WriteFailure("Failed to create policy".to_string()));
		}

		if let Some(existing) = state.policies.iter().find(|r| r.source == policy.source) {
			return Ok(existing.id);
		}

		let id = PolicyId(state.policies.len() as u64 + 1);
		state.policies.push(PolicyRecord::from_new(id, policy));
		Ok(id)
	}

	async fn policy(&self, id: PolicyId) -> Result<Option<PolicyRecord>, HostError> {
		let state = self.state.read().await;
		Ok(state.policies.iter().find(|r| r.id == id).cloned())
	}
}

impl SettingsStore for MemoryHost {
	fn for_subject(&self, subject: Subject) -> Box<dyn SubjectSettings + '_> {
		Box::new(MemorySubjectSettings {
			host: self,
			subject,
		})
	}
}

struct MemorySubjectSettings<'a> {
	host: &'a MemoryHost,
	subject: Subject,
}

#[async_trait]
impl SubjectSettings for MemorySubjectSettings<'_> {
	fn subject(&self) -> &Subject {
		&self.subject
	}

	async fn read_policy_list(&self) -> Result<PolicyList, HostError> {
		Ok(self.host.policy_list(&self.subject).await)
	}

	async fn write_policy_list(&self, list: &PolicyList) -> Result<(), HostError> {
		let mut state = self.host.state.write().await;
		if state.failing_subjects.contains(&self.subject) {
			return Err(HostError::WriteFailure(format!(
				"settings for {} are read-only",
				self.subject
			)));
		}
		state.settings.insert(self.subject.clone(), list.clone());
		state.write_log.push(self.subject.clone());
		Ok(())
	}
}

/// Extractor that records calls instead of touching the filesystem.
#[derive(Debug, Default)]
pub struct MemoryExtractor {
	failure: Option<String>,
	calls: RwLock<Vec<(Vec<u8>, PathBuf)>>,
}

impl MemoryExtractor {
	pub fn new() -> Self {
		Self::default()
	}

	/// Extractor whose every call fails with `message`.
	pub fn failing(message: impl Into<String>) -> Self {
		Self {
			failure: Some(message.into()),
			calls: RwLock::default(),
		}
	}

	/// Archive bytes and destination of every call so far.
	pub async fn calls(&self) -> Vec<(Vec<u8>, PathBuf)> {
		self.calls.read().await.clone()
	}
}

#[async_trait]
impl PackageExtractor for MemoryExtractor {
	async fn extract(&self, archive: &Path, destination: &Path) -> Result<usize, HostError> {
		let bytes = tokio::fs::read(archive)
			.await
			.map_err(|e| HostError::io(archive, e))?;
		self.calls
			.write()
			.await
			.push((bytes, destination.to_path_buf()));

		match &self.failure {
			Some(message) => Err(HostError::Extraction(message.clone())),
			None => Ok(1),
		}
	}
}
