//! CLI error type. Anything that errors here aborts the run before or
//! outside the batch; per-page failures live in the batch report instead.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
	#[error(transparent)]
	Pipeline(#[from] landfall::Error),

	/// No usable debug browser answered on the discovery port.
	#[error("could not reach a debug browser on port {port}: {source}")]
	Discovery { port: u16, source: anyhow::Error },

	/// No open tab matched the designer-target substring.
	#[error("no open tab matches {needle:?}; open the designer and its page settings, then re-run")]
	NoDesignerTab { needle: String },

	/// The builder page is open but the custom-code panel is not.
	#[error("editor surface not ready: found {found} editor field(s), need {required}; open the page's custom-code panel in the designer")]
	Surface { found: usize, required: usize },
}

pub type Result<T> = std::result::Result<T, CliError>;
