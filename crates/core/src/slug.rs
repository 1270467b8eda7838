//! Page identifiers and the production page list.

use std::fmt;

use serde::Serialize;

use crate::error::{Error, Result};

/// Pages staged by a batch run when no slugs are given, in deploy order.
pub const DEFAULT_PAGES: &[&str] = &[
	"ai-recruiter",
	"ai-recruiting",
	"resume-screening",
	"ai-sourcing",
	"compare",
	"dubai",
	"automation",
	"small-business",
	"agencies",
	"demo",
	"diversity",
	"ats",
	"job-description",
];

/// One landing page, named by the path segment it lives under.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PageSlug(String);

impl PageSlug {
	/// Validates and wraps a raw identifier. Slugs become URL path
	/// segments, so only ASCII alphanumerics, `-` and `_` are accepted.
	pub fn new(raw: impl Into<String>) -> Result<Self> {
		let raw = raw.into();
		let valid = !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');
		if !valid {
			return Err(Error::InvalidSlug(raw));
		}
		Ok(Self(raw))
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// The full production page set.
	pub fn default_pages() -> Vec<PageSlug> {
		DEFAULT_PAGES.iter().map(|s| PageSlug((*s).to_string())).collect()
	}
}

impl fmt::Display for PageSlug {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}
