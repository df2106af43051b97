// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Host-site collaborators for the aam command line.
//!
//! The commands never talk to the managed site directly. Everything they
//! need from it sits behind the traits in [`traits`]:
//!
//! - [`SubjectDirectory`]: look users up by ID or email, check role slugs
//! - [`PolicyRepository`]: persist fetched policy documents
//! - [`SettingsStore`]: per-subject option lists, one handle per subject
//! - [`PackageExtractor`]: unpack a downloaded add-on archive
//!
//! Two implementations ship with the crate: [`FileHost`], which keeps the
//! site's data as JSON documents under a data directory, and [`MemoryHost`],
//! an in-process host for tests.

pub mod archive;
pub mod error;
pub mod file;
pub mod memory;
pub mod policy;
pub mod subject;
pub mod traits;
pub mod version;

pub use archive::ZipExtractor;
pub use error::HostError;
pub use file::FileHost;
pub use memory::{MemoryExtractor, MemoryHost};
pub use policy::{NewPolicy, PolicyId, PolicyList, PolicyRecord, PolicyStatus, POLICY_OBJECT_TYPE};
pub use subject::{Subject, User, UserId};
pub use traits::{PackageExtractor, PolicyRepository, SettingsStore, SubjectDirectory, SubjectSettings};
pub use version::{ensure_compatible, HostManifest, MIN_HOST_VERSION};
