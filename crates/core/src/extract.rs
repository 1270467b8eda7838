//! Fragment extraction over the fetched page document.
//!
//! The builder templates are stable enough that two fixed patterns cover
//! every production page. The head rule matches from a known start marker
//! through the first closing `</style>` after it, byte for byte. The body
//! rule captures everything between the opening `<body>` tag and the last
//! `</body>` in the document, trimmed.

use std::sync::LazyLock;

use regex::Regex;

static HEAD_ROBOTS_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r#"(?s)<meta name="robots"[^>]*>.*?</style>"#).expect("HEAD_ROBOTS_RE should compile"));
static HEAD_FONT_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r#"(?s)<link rel="preload"[^>]*>.*?</style>"#).expect("HEAD_FONT_RE should compile"));
static BODY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<body[^>]*>(.*)</body>").expect("BODY_RE should compile"));

/// Start marker for the head rule. The variants come from different
/// template revisions and match different spans, so callers pick one
/// explicitly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HeadMarker {
	/// From `<meta name="robots" ...>` to the first following `</style>`.
	#[default]
	RobotsMeta,
	/// From `<link rel="preload" ...>` to the first following `</style>`.
	FontPreload,
}

/// Fragments pulled from one document. Each field is `None` when its
/// rule found no match; the two rules never affect each other.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
	pub head: Option<String>,
	pub body: Option<String>,
}

/// Applies the head rule. The match is returned exactly as it appears in
/// the document, untrimmed.
pub fn extract_head(document: &str, marker: HeadMarker) -> Option<String> {
	let re = match marker {
		HeadMarker::RobotsMeta => &HEAD_ROBOTS_RE,
		HeadMarker::FontPreload => &HEAD_FONT_RE,
	};
	re.find(document).map(|m| m.as_str().to_string())
}

/// Applies the body rule. Leading and trailing whitespace is trimmed from
/// the captured span.
pub fn extract_body(document: &str) -> Option<String> {
	BODY_RE.captures(document).and_then(|c| c.get(1)).map(|m| m.as_str().trim().to_string())
}

/// Runs both rules over `document`.
pub fn extract(document: &str, marker: HeadMarker) -> Extraction {
	Extraction {
		head: extract_head(document, marker),
		body: extract_body(document),
	}
}
