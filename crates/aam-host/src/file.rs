// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! File-backed host.
//!
//! Layout under the data directory:
//!
//! ```text
//! host.json              {"version": "6.9.0"}
//! users.json             [{"id": 1, "email": "...", "login": "..."}]
//! roles.json             ["administrator", "editor", ...]
//! policies.json          {"next_id": 3, "records": [...]}
//! settings/<key>.json    {"policy": {"2": true}, ...}
//! ```
//!
//! Settings documents may carry other object types next to `policy`; they
//! are preserved on rewrite.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::HostError;
use crate::policy::{NewPolicy, PolicyId, PolicyList, PolicyRecord, POLICY_OBJECT_TYPE};
use crate::subject::{Subject, User, UserId};
use crate::traits::{PolicyRepository, SettingsStore, SubjectDirectory, SubjectSettings};
use crate::version::HostManifest;

#[derive(Debug, Default, Serialize, Deserialize)]
struct PolicyTable {
	next_id: u64,
	records: Vec<PolicyRecord>,
}

type SettingsDocument = serde_json::Map<String, serde_json::Value>;

/// Host whose data lives in JSON documents under a directory.
#[derive(Debug)]
pub struct FileHost {
	root: PathBuf,
	// Serializes read-modify-write of policies.json within this process.
	policy_lock: Mutex<()>,
}

impl FileHost {
	pub fn new(root: impl Into<PathBuf>) -> Self {
		Self {
			root: root.into(),
			policy_lock: Mutex::new(()),
		}
	}

	pub fn root(&self) -> &Path {
		&self.root
	}

	/// The host manifest, if the data directory has one.
	pub async fn manifest(&self) -> Result<Option<HostManifest>, HostError> {
		read_json(&self.root.join("host.json")).await
	}

	fn settings_path(&self, subject: &Subject) -> PathBuf {
		self.root
			.join("settings")
			.join(format!("{}.json", subject.storage_key()))
	}

	async fn users(&self) -> Result<Vec<User>, HostError> {
		Ok(read_json(&self.root.join("users.json"))
			.await?
			.unwrap_or_default())
	}
}

#[async_trait]
impl SubjectDirectory for FileHost {
	async fn user_by_id(&self, id: UserId) -> Result<Option<User>, HostError> {
		Ok(self.users().await?.into_iter().find(|u| u.id == id))
	}

	async fn user_by_email(&self, email: &str) -> Result<Option<User>, HostError> {
		Ok(self
			.users()
			.await?
			.into_iter()
			.find(|u| u.email.eq_ignore_ascii_case(email)))
	}

	async fn role_exists(&self, slug: &str) -> Result<bool, HostError> {
		let roles: Vec<String> = read_json(&self.root.join("roles.json"))
			.await?
			.unwrap_or_default();
		Ok(roles.iter().any(|r| r == slug))
	}
}

#[async_trait]
impl PolicyRepository for FileHost {
	async fn create_policy(&self, policy: NewPolicy) -> Result<PolicyId, HostError> {
		let _guard = self.policy_lock.lock().await;
		let path = self.root.join("policies.json");
		let mut table: PolicyTable = read_json(&path).await?.unwrap_or_default();

		if let Some(existing) = table.records.iter().find(|r| r.source == policy.source) {
			debug!(id = %existing.id, source = %policy.source, "policy already stored");
			return Ok(existing.id);
		}

		let id = PolicyId(table.next_id.max(1));
		table.next_id = id.0 + 1;
		table.records.push(PolicyRecord::from_new(id, policy));
		write_json(&path, &table).await?;

		debug!(id = %id, "policy record created");
		Ok(id)
	}

	async fn policy(&self, id: PolicyId) -> Result<Option<PolicyRecord>, HostError> {
		let table: PolicyTable = read_json(&self.root.join("policies.json"))
			.await?
			.unwrap_or_default();
		Ok(table.records.into_iter().find(|r| r.id == id))
	}
}

impl SettingsStore for FileHost {
	fn for_subject(&self, subject: Subject) -> Box<dyn SubjectSettings + '_> {
		Box::new(FileSubjectSettings {
			path: self.settings_path(&subject),
			subject,
		})
	}
}

struct FileSubjectSettings {
	subject: Subject,
	path: PathBuf,
}

impl FileSubjectSettings {
	async fn document(&self) -> Result<SettingsDocument, HostError> {
		Ok(read_json(&self.path).await?.unwrap_or_default())
	}
}

#[async_trait]
impl SubjectSettings for FileSubjectSettings {
	fn subject(&self) -> &Subject {
		&self.subject
	}

	async fn read_policy_list(&self) -> Result<PolicyList, HostError> {
		match self.document().await?.remove(POLICY_OBJECT_TYPE) {
			Some(value) => {
				serde_json::from_value(value).map_err(|e| HostError::serialization(&self.path, e))
			}
			None => Ok(PolicyList::new()),
		}
	}

	async fn write_policy_list(&self, list: &PolicyList) -> Result<(), HostError> {
		let mut document = self.document().await?;
		let value = serde_json::to_value(list).map_err(|e| HostError::serialization(&self.path, e))?;
		document.insert(POLICY_OBJECT_TYPE.to_string(), value);

		write_json(&self.path, &document).await.map_err(|e| {
			HostError::WriteFailure(format!(
				"failed to save settings for {}: {e}",
				self.subject
			))
		})?;

		debug!(subject = %self.subject, entries = list.len(), "policy list saved");
		Ok(())
	}
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, HostError> {
	let contents = match fs::read_to_string(path).await {
		Ok(contents) => contents,
		Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
		Err(e) => return Err(HostError::io(path, e)),
	};

	serde_json::from_str(&contents)
		.map(Some)
		.map_err(|e| HostError::serialization(path, e))
}

async fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), HostError> {
	if let Some(parent) = path.parent() {
		fs::create_dir_all(parent)
			.await
			.map_err(|e| HostError::io(parent, e))?;
	}

	let contents = serde_json::to_string_pretty(value).map_err(|e| HostError::serialization(path, e))?;

	let temp_path = path.with_extension("tmp");
	let mut file = fs::File::create(&temp_path)
		.await
		.map_err(|e| HostError::io(&temp_path, e))?;
	file.write_all(contents.as_bytes())
		.await
		.map_err(|e| HostError::io(&temp_path, e))?;
	file.sync_all()
		.await
		.map_err(|e| HostError::io(&temp_path, e))?;
	drop(file);

	fs::rename(&temp_path, path)
		.await
		.map_err(|e| HostError::io(path, e))
}

#[cfg(test)]
mod tests {
	use super::*;

	async fn seeded_host() -> (tempfile::TempDir, FileHost) {
		let dir = tempfile::tempdir().unwrap();
		std::fs::write(
			dir.path().join("users.json"),
			r#"[
				{"id": 1, "email": "admin@example.com", "login": "admin"},
				{"id": 34, "email": "John@Example.com", "login": "john"}
			]"#,
		)
		.unwrap();
		std::fs::write(dir.path().join("roles.json"), r#"["administrator", "editor"]"#).unwrap();
		let host = FileHost::new(dir.path());
		(dir, host)
	}

	fn new_policy(source: &str) -> NewPolicy {
		NewPolicy {
			source: source.to_string(),
			title: "Deny REST API".to_string(),
			excerpt: "Blocks anonymous REST calls".to_string(),
			content: "{}".to_string(),
		}
	}

	#[tokio::test]
	async fn looks_up_users_by_id_and_email() {
		let (_dir, host) = seeded_host().await;

		let by_id = host.user_by_id(UserId(34)).await.unwrap().unwrap();
		assert_eq!(by_id.login, "john");

		let by_email = host.user_by_email("john@example.com").await.unwrap().unwrap();
		assert_eq!(by_email.id, UserId(34));

		assert!(host.user_by_id(UserId(99)).await.unwrap().is_none());
	}

	#[tokio::test]
	async fn checks_role_slugs() {
		let (_dir, host) = seeded_host().await;
		assert!(host.role_exists("editor").await.unwrap());
		assert!(!host.role_exists("Editor").await.unwrap());
	}

	#[tokio::test]
	async fn empty_data_dir_has_no_subjects() {
		let dir = tempfile::tempdir().unwrap();
		let host = FileHost::new(dir.path().join("missing"));

		assert!(host.user_by_id(UserId(1)).await.unwrap().is_none());
		assert!(!host.role_exists("editor").await.unwrap());
		assert!(host.manifest().await.unwrap().is_none());
	}

	#[tokio::test]
	async fn allocates_policy_ids_and_reuses_by_source() {
		let (_dir, host) = seeded_host().await;

		let first = host.create_policy(new_policy("AAM000005")).await.unwrap();
		let second = host.create_policy(new_policy("AAM000007")).await.unwrap();
		let again = host.create_policy(new_policy("AAM000005")).await.unwrap();

		assert_eq!(first, PolicyId(1));
		assert_eq!(second, PolicyId(2));
		assert_eq!(again, first);

		let record = host.policy(second).await.unwrap().unwrap();
		assert_eq!(record.source, "AAM000007");
		assert_eq!(record.status, crate::policy::PolicyStatus::Published);
	}

	#[tokio::test]
	async fn settings_update_preserves_other_object_types() {
		let (dir, host) = seeded_host().await;
		let settings_dir = dir.path().join("settings");
		std::fs::create_dir_all(&settings_dir).unwrap();
		std::fs::write(
			settings_dir.join("role-editor.json"),
			r#"{"menu": {"index.php": true}, "policy": {"3": false}}"#,
		)
		.unwrap();

		let settings = host.for_role("editor");
		settings.update_policy(PolicyId(3), true).await.unwrap();
		settings.update_policy(PolicyId(5), false).await.unwrap();

		let list = settings.read_policy_list().await.unwrap();
		assert_eq!(list.len(), 2);
		assert_eq!(list.effect(PolicyId(3)), Some(true));
		assert_eq!(list.effect(PolicyId(5)), Some(false));

		let raw: serde_json::Value = serde_json::from_str(
			&std::fs::read_to_string(settings_dir.join("role-editor.json")).unwrap(),
		)
		.unwrap();
		assert_eq!(raw["menu"]["index.php"], serde_json::json!(true));
	}

	#[tokio::test]
	async fn corrupt_settings_surface_serialization_error() {
		let (dir, host) = seeded_host().await;
		let settings_dir = dir.path().join("settings");
		std::fs::create_dir_all(&settings_dir).unwrap();
		std::fs::write(settings_dir.join("visitor.json"), "not json").unwrap();

		let err = host.for_visitor().read_policy_list().await.unwrap_err();
		assert!(matches!(err, HostError::Serialization { .. }));
	}

	#[tokio::test]
	async fn reads_manifest() {
		let (dir, host) = seeded_host().await;
		std::fs::write(dir.path().join("host.json"), r#"{"version": "6.9.0"}"#).unwrap();

		let manifest = host.manifest().await.unwrap().unwrap();
		assert_eq!(manifest.version, "6.9.0");
	}
}
