// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Shared HTTP utilities for the aam command line.
//!
//! Every outbound request to the package registry and the policy hub goes
//! through a client built here, so they all carry the same User-Agent and
//! honour the configured timeout. There is no retry layer:
//! a failed request is terminal for the command that issued it.

mod client;

pub use client::{builder, client_with_timeout, user_agent, DEFAULT_TIMEOUT};
