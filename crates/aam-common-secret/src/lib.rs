// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! License key wrapper.
//!
//! Add-on and policy license keys arrive on the command line, from the
//! environment or from a config file, and end up in hub URLs. A
//! [`SecretString`] formats as [`REDACTED`], is wiped on drop and hands out
//! its value only through [`SecretString::expose`].
//!
//! ```
//! use aam_common_secret::SecretString;
//!
//! let license: SecretString = "AAM000000000000001".parse().unwrap();
//! assert_eq!(format!("{license}"), "[REDACTED]");
//! assert_eq!(license.expose(), "AAM000000000000001");
//! ```

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use zeroize::Zeroize;

pub const REDACTED: &str = "[REDACTED]";

#[derive(Clone, Zeroize)]
#[zeroize(drop)]
pub struct SecretString {
	inner: String,
}

impl SecretString {
	pub fn new(inner: String) -> Self {
		Self { inner }
	}

	pub fn expose(&self) -> &str {
		&self.inner
	}

	/// A blank key counts as no key: the hub gets no `license` parameter.
	pub fn is_blank(&self) -> bool {
		self.inner.trim().is_empty()
	}
}

impl fmt::Debug for SecretString {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("SecretString").field(&REDACTED).finish()
	}
}

impl fmt::Display for SecretString {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(REDACTED)
	}
}

impl FromStr for SecretString {
	type Err = Infallible;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Ok(Self::new(s.to_string()))
	}
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for SecretString {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		<String as serde::Deserialize>::deserialize(deserializer).map(Self::new)
	}
}
