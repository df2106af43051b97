// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Partial configuration layer for merging from multiple sources.

use aam_common_secret::SecretString;
use serde::Deserialize;
use std::path::PathBuf;

/// Partial configuration layer - all fields are Option for merging.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigLayer {
	#[serde(default)]
	pub hub: Option<HubLayer>,
	#[serde(default)]
	pub site: Option<SiteLayer>,
	#[serde(default)]
	pub http: Option<HttpLayer>,
	#[serde(default)]
	pub logging: Option<LoggingLayer>,
}

/// Remote endpoints and the license used against them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HubLayer {
	#[serde(default)]
	pub api_endpoint: Option<String>,
	#[serde(default)]
	pub policy_endpoint: Option<String>,
	#[serde(default)]
	pub license: Option<SecretString>,
}

/// Identity and on-disk layout of the managed site.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SiteLayer {
	#[serde(default)]
	pub url: Option<String>,
	#[serde(default)]
	pub data_dir: Option<PathBuf>,
	#[serde(default)]
	pub plugin_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HttpLayer {
	#[serde(default)]
	pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingLayer {
	#[serde(default)]
	pub level: Option<String>,
	#[serde(default)]
	pub format: Option<String>,
}

impl ConfigLayer {
	/// Merge another layer into this one. Other layer takes precedence.
	pub fn merge(&mut self, other: ConfigLayer) {
		merge_option(&mut self.hub, other.hub, HubLayer::merge);
		merge_option(&mut self.site, other.site, SiteLayer::merge);
		merge_option(&mut self.http, other.http, HttpLayer::merge);
		merge_option(&mut self.logging, other.logging, LoggingLayer::merge);
	}
}

fn merge_option<T, F>(target: &mut Option<T>, source: Option<T>, merge_fn: F)
where
	F: FnOnce(&mut T, T),
{
	match (target.as_mut(), source) {
		(Some(t), Some(s)) => merge_fn(t, s),
		(None, Some(s)) => *target = Some(s),
		_ => {}
	}
}

impl HubLayer {
	fn merge(&mut self, other: HubLayer) {
		if other.api_endpoint.is_some() {
			self.api_endpoint = other.api_endpoint;
		}
		if other.policy_endpoint.is_some() {
			self.policy_endpoint = other.policy_endpoint;
		}
		if other.license.is_some() {
			self.license = other.license;
		}
	}
}

impl SiteLayer {
	fn merge(&mut self, other: SiteLayer) {
		if other.url.is_some() {
			self.url = other.url;
		}
		if other.data_dir.is_some() {
			self.data_dir = other.data_dir;
		}
		if other.plugin_dir.is_some() {
			self.plugin_dir = other.plugin_dir;
		}
	}
}

impl HttpLayer {
	fn merge(&mut self, other: HttpLayer) {
		if other.timeout_secs.is_some() {
			self.timeout_secs = other.timeout_secs;
		}
	}
}

impl LoggingLayer {
	fn merge(&mut self, other: LoggingLayer) {
		if other.level.is_some() {
			self.level = other.level;
		}
		if other.format.is_some() {
			self.format = other.format;
		}
	}
}
