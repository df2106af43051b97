// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Operator-facing status output.

use colored::Colorize;

/// Where command status lines go.
pub trait Reporter {
	fn success(&mut self, message: &str);

	fn warning(&mut self, message: &str);

	fn error(&mut self, message: &str);
}

/// Writes `Success: ...` to stdout and warnings and errors to stderr.
#[derive(Debug, Default)]
pub struct TerminalReporter;

impl TerminalReporter {
	pub fn new() -> Self {
		Self
	}
}

impl Reporter for TerminalReporter {
	fn success(&mut self, message: &str) {
		println!("{} {message}", "Success:".green().bold());
	}

	fn warning(&mut self, message: &str) {
		eprintln!("{} {message}", "Warning:".yellow().bold());
	}

	fn error(&mut self, message: &str) {
		eprintln!("{} {message}", "Error:".red().bold());
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
	Success,
	Warning,
	Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
	pub severity: Severity,
	pub message: String,
}

/// Keeps every line in memory, for tests.
#[derive(Debug, Default)]
pub struct RecordingReporter {
	lines: Vec<Line>,
}

impl RecordingReporter {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn lines(&self) -> &[Line] {
		&self.lines
	}

	pub fn messages(&self, severity: Severity) -> Vec<&str> {
		self.lines
			.iter()
			.filter(|l| l.severity == severity)
			.map(|l| l.message.as_str())
			.collect()
	}

	fn push(&mut self, severity: Severity, message: &str) {
		self.lines.push(Line {
			severity,
			message: message.to_string(),
		});
	}
}

impl Reporter for RecordingReporter {
	fn success(&mut self, message: &str) {
		self.push(Severity::Success, message);
	}

	fn warning(&mut self, message: &str) {
		self.push(Severity::Warning, message);
	}

	fn error(&mut self, message: &str) {
		self.push(Severity::Error, message);
	}
}
