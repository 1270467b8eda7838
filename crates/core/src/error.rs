//! Error taxonomy for the staging pipeline.

use std::fmt;

use thiserror::Error;

use crate::report::FailureKind;

/// Which extraction rule came up empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingFragment {
	Head,
	Body,
	Both,
}

impl fmt::Display for MissingFragment {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			MissingFragment::Head => write!(f, "head fragment"),
			MissingFragment::Body => write!(f, "body fragment"),
			MissingFragment::Both => write!(f, "head and body fragments"),
		}
	}
}

#[derive(Debug, Error)]
pub enum Error {
	/// The content host answered with a non-success status.
	#[error("fetch failed: HTTP {status}")]
	Fetch { status: u16 },

	/// The document request never completed. Timeouts land here too.
	#[error("network error: {0}")]
	Network(String),

	/// The document arrived but did not match the expected shape.
	#[error("document shape unexpected: {missing} not found (head={head_found} body={body_found})")]
	Extraction {
		missing: MissingFragment,
		head_found: bool,
		body_found: bool,
	},

	/// The builder page exposes fewer editor fields than the layout needs.
	#[error("editor surface not ready: found {found} editor field(s), need {required}")]
	Surface { found: usize, required: usize },

	/// A remote evaluation failed, timed out, or threw inside the page.
	#[error("remote call failed: {0}")]
	Remote(String),

	/// Malformed traffic on the debug connection.
	#[error("protocol error: {0}")]
	Protocol(String),

	/// Identifier not usable as a URL path segment.
	#[error("invalid slug {0:?}: use lowercase letters, digits, '-' or '_'")]
	InvalidSlug(String),
}

impl Error {
	/// Failure class recorded in batch reports.
	pub fn kind(&self) -> FailureKind {
		match self {
			Error::Fetch { .. } => FailureKind::Fetch,
			Error::Network(_) => FailureKind::Network,
			Error::Extraction { .. } => FailureKind::Extraction,
			Error::Surface { .. } => FailureKind::Surface,
			Error::Remote(_) | Error::Protocol(_) => FailureKind::Remote,
			Error::InvalidSlug(_) => FailureKind::Invalid,
		}
	}
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn kind_classifies_every_variant() {
		assert_eq!(Error::Fetch { status: 404 }.kind(), FailureKind::Fetch);
		assert_eq!(Error::Network("timed out".into()).kind(), FailureKind::Network);
		let extraction = Error::Extraction {
			missing: MissingFragment::Head,
			head_found: false,
			body_found: true,
		};
		assert_eq!(extraction.kind(), FailureKind::Extraction);
		assert_eq!(Error::Surface { found: 1, required: 3 }.kind(), FailureKind::Surface);
		assert_eq!(Error::Remote("boom".into()).kind(), FailureKind::Remote);
		assert_eq!(Error::Protocol("bad frame".into()).kind(), FailureKind::Remote);
		assert_eq!(Error::InvalidSlug("x y".into()).kind(), FailureKind::Invalid);
	}

	#[test]
	fn extraction_message_carries_match_booleans() {
		let err = Error::Extraction {
			missing: MissingFragment::Body,
			head_found: true,
			body_found: false,
		};
		let message = err.to_string();
		assert!(message.contains("body fragment"));
		assert!(message.contains("head=true"));
		assert!(message.contains("body=false"));
	}

	#[test]
	fn fetch_message_names_the_status() {
		assert_eq!(Error::Fetch { status: 404 }.to_string(), "fetch failed: HTTP 404");
	}
}
