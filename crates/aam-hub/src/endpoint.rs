// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Hub URL construction.

use aam_common_secret::SecretString;
use url::Url;

use crate::error::HubError;

/// `<base>/download/<license>`
pub fn addon_url(base: &Url, license: &SecretString) -> Result<Url, HubError> {
	with_segments(base, &["download", license.expose().trim()])
}

/// `<base>/policy/<id>`, plus `?license=<key>` when a non-blank key is given.
pub fn policy_url(base: &Url, id: &str, license: Option<&SecretString>) -> Result<Url, HubError> {
	let mut url = with_segments(base, &["policy", id.trim()])?;
	if let Some(license) = license.filter(|l| !l.is_blank()) {
		url.query_pairs_mut()
			.append_pair("license", license.expose().trim());
	}
	Ok(url)
}

fn with_segments(base: &Url, segments: &[&str]) -> Result<Url, HubError> {
	let mut url = base.clone();
	url.set_query(None);
	url.path_segments_mut()
		.map_err(|()| HubError::InvalidEndpoint {
			endpoint: base.to_string(),
			message: "cannot be used as a base URL".to_string(),
		})?
		.pop_if_empty()
		.extend(segments);
	Ok(url)
}
