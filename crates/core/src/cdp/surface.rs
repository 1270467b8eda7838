//! Editor surface backed by in-page evaluation.

use async_trait::async_trait;
use tracing::debug;

use crate::cdp::CdpClient;
use crate::error::{Error, Result};
use crate::inject::EditorSurface;
use crate::script::js_string;

/// The builder's code editors, addressed by DOM selector through a live
/// debug session. Each matched element is expected to carry a `CodeMirror`
/// state object; that object performs the actual write.
pub struct CdpSurface<'a> {
	client: &'a CdpClient,
	selector: String,
}

impl<'a> CdpSurface<'a> {
	/// `selector` matches each editor widget, `.CodeMirror` in practice.
	pub fn new(client: &'a CdpClient, selector: &str) -> Self {
		Self { client, selector: selector.to_string() }
	}
}

#[async_trait]
impl EditorSurface for CdpSurface<'_> {
	async fn slot_count(&self) -> Result<usize> {
		let expression = format!("document.querySelectorAll({}).length", js_string(&self.selector));
		let value = self.client.evaluate(&expression).await?;
		let count = value
			.as_u64()
			.ok_or_else(|| Error::Protocol(format!("editor count query returned {value}")))?;
		debug!(target = "landfall.cdp", count, "counted editor widgets");
		Ok(count as usize)
	}

	async fn set_slot(&self, slot: usize, value: &str) -> Result<()> {
		let expression = format!(
			"(() => {{ const eds = document.querySelectorAll({sel}); if (eds.length <= {slot}) throw new Error('editor {slot} missing'); eds[{slot}].CodeMirror.setValue({text}); return true; }})()",
			sel = js_string(&self.selector),
			slot = slot,
			text = js_string(value),
		);
		self.client.evaluate(&expression).await?;
		debug!(target = "landfall.cdp", slot, bytes = value.len(), "wrote editor slot");
		Ok(())
	}
}
