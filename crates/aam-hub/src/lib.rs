// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Client for the AAM hub.
//!
//! The hub serves two resources:
//!
//! - `GET <api>/download/<license>`: an add-on package as a zip archive
//! - `GET <policy>/policy/<id>[?license=<key>]`: a policy document as JSON
//!
//! Any status other than 200 is a rejection; the hub explains it in the
//! `reason` field of a JSON body. Nothing is retried.

mod client;
mod document;
mod endpoint;
mod error;

pub use client::HubClient;
pub use document::{escape_field, PolicyDocument, PolicyMetadata};
pub use endpoint::{addon_url, policy_url};
pub use error::HubError;
