//! Per-page outcomes and the batch report.

use std::fmt;
use std::time::Duration;

use serde::{Serialize, Serializer};

use crate::slug::PageSlug;

/// Failure class for one page attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
	Fetch,
	Network,
	Extraction,
	Surface,
	Remote,
	Invalid,
}

impl fmt::Display for FailureKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let code = match self {
			FailureKind::Fetch => "FETCH_ERROR",
			FailureKind::Network => "NETWORK_ERROR",
			FailureKind::Extraction => "EXTRACT_ERROR",
			FailureKind::Surface => "SURFACE_ERROR",
			FailureKind::Remote => "REMOTE_ERROR",
			FailureKind::Invalid => "INVALID_SLUG",
		};
		f.write_str(code)
	}
}

/// Result of one page's staging attempt. Staged means the editor fields
/// hold the new fragments; nothing is published until a human does it in
/// the builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum Outcome {
	Staged {
		#[serde(skip_serializing_if = "Option::is_none")]
		head_bytes: Option<usize>,
		#[serde(skip_serializing_if = "Option::is_none")]
		body_bytes: Option<usize>,
	},
	Failed { kind: FailureKind, detail: String },
}

impl Outcome {
	pub fn is_staged(&self) -> bool {
		matches!(self, Outcome::Staged { .. })
	}
}

/// One batch entry.
#[derive(Debug, Clone, Serialize)]
pub struct PageResult {
	pub slug: PageSlug,
	#[serde(flatten)]
	pub outcome: Outcome,
	#[serde(rename = "elapsed_ms", serialize_with = "as_millis")]
	pub elapsed: Duration,
}

fn as_millis<S: Serializer>(elapsed: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
	serializer.serialize_u64(elapsed.as_millis() as u64)
}

/// Ordered outcomes for one batch run. Entry order always matches the
/// order the slugs were given.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
	pub results: Vec<PageResult>,
}

impl BatchReport {
	pub fn push(&mut self, result: PageResult) {
		self.results.push(result);
	}

	pub fn total(&self) -> usize {
		self.results.len()
	}

	pub fn staged_count(&self) -> usize {
		self.results.iter().filter(|r| r.outcome.is_staged()).count()
	}

	pub fn failed(&self) -> impl Iterator<Item = &PageResult> {
		self.results.iter().filter(|r| !r.outcome.is_staged())
	}

	/// Sum of per-page attempt times.
	pub fn total_elapsed(&self) -> Duration {
		self.results.iter().map(|r| r.elapsed).sum()
	}
}
