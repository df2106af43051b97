// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Commands behind the `aam` binary.
//!
//! Each command takes its collaborators explicitly (hub client, host,
//! extractor, reporter) so the binary wires the real ones and tests wire
//! in-memory ones.

pub mod commands;
pub mod reporter;

pub use commands::Completion;
pub use reporter::{Line, RecordingReporter, Reporter, Severity, TerminalReporter};
