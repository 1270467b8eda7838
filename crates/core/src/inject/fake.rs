//! In-memory editor surface for exercising injection without a browser.

use tokio::sync::Mutex;

use crate::error::{Error, Result};

use super::EditorSurface;

/// Editor surface backed by plain strings. Records every write so tests
/// can assert ordering, and can be told to reject writes to one slot.
pub struct FakeSurface {
	slots: Mutex<Vec<String>>,
	writes: Mutex<Vec<(usize, String)>>,
	fail_slot: Option<usize>,
}

impl FakeSurface {
	pub fn with_slots(count: usize) -> Self {
		Self {
			slots: Mutex::new(vec![String::new(); count]),
			writes: Mutex::new(Vec::new()),
			fail_slot: None,
		}
	}

	/// Makes every write to `slot` fail with a remote error.
	pub fn failing_slot(mut self, slot: usize) -> Self {
		self.fail_slot = Some(slot);
		self
	}

	/// Current slot values, in slot order.
	pub async fn values(&self) -> Vec<String> {
		self.slots.lock().await.clone()
	}

	/// Writes in arrival order as `(slot, value)` pairs.
	pub async fn write_log(&self) -> Vec<(usize, String)> {
		self.writes.lock().await.clone()
	}
}

#[async_trait::async_trait]
impl EditorSurface for FakeSurface {
	async fn slot_count(&self) -> Result<usize> {
		Ok(self.slots.lock().await.len())
	}

	async fn set_slot(&self, slot: usize, value: &str) -> Result<()> {
		if self.fail_slot == Some(slot) {
			return Err(Error::Remote(format!("write to editor {slot} rejected")));
		}

		let mut slots = self.slots.lock().await;
		let found = slots.len();
		let Some(cell) = slots.get_mut(slot) else {
			return Err(Error::Surface { found, required: slot + 1 });
		};
		*cell = value.to_string();
		self.writes.lock().await.push((slot, value.to_string()));
		Ok(())
	}
}
