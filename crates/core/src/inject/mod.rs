//! Writing fragments into the builder's editor fields.

mod fake;

pub use fake::FakeSurface;

use async_trait::async_trait;

use crate::error::{Error, MissingFragment, Result};
use crate::extract::Extraction;

/// How many editor fields the builder page exposes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SurfaceLayout {
	/// Schema, head and body fields, top to bottom. The current panel.
	#[default]
	ThreeField,
	/// Legacy panel with head and body fields only.
	TwoField,
}

impl SurfaceLayout {
	/// Fields the surface must expose before any write happens.
	pub fn required_slots(self) -> usize {
		match self {
			SurfaceLayout::ThreeField => 3,
			SurfaceLayout::TwoField => 2,
		}
	}
}

/// Which fragments one run writes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InjectionScope {
	#[default]
	Full,
	HeadOnly,
	BodyOnly,
}

/// One editor write: the slot index and the exact value it receives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotWrite {
	pub slot: usize,
	pub value: String,
}

/// The ordered writes for one page.
///
/// Slot order is fixed by the panel: the schema field is cleared before
/// the head fragment lands, and the body fragment goes last. Two-field
/// panels have no schema slot, so head and body shift up.
#[derive(Debug, Clone)]
pub struct InjectionPlan {
	layout: SurfaceLayout,
	writes: Vec<SlotWrite>,
	head_bytes: Option<usize>,
	body_bytes: Option<usize>,
}

impl InjectionPlan {
	/// Validates `extraction` against `scope` and lays out the writes.
	/// A fragment the scope needs but the extraction lacks fails the
	/// whole plan; nothing is ever written for an invalid document.
	pub fn build(extraction: &Extraction, layout: SurfaceLayout, scope: InjectionScope) -> Result<Self> {
		let need_head = matches!(scope, InjectionScope::Full | InjectionScope::HeadOnly);
		let need_body = matches!(scope, InjectionScope::Full | InjectionScope::BodyOnly);
		let head_found = extraction.head.is_some();
		let body_found = extraction.body.is_some();

		let missing = match (need_head && !head_found, need_body && !body_found) {
			(true, true) => Some(MissingFragment::Both),
			(true, false) => Some(MissingFragment::Head),
			(false, true) => Some(MissingFragment::Body),
			(false, false) => None,
		};
		if let Some(missing) = missing {
			return Err(Error::Extraction { missing, head_found, body_found });
		}

		let (schema_slot, head_slot, body_slot) = match layout {
			SurfaceLayout::ThreeField => (Some(0), 1, 2),
			SurfaceLayout::TwoField => (None, 0, 1),
		};

		let mut writes = Vec::new();
		let mut head_bytes = None;
		let mut body_bytes = None;

		if need_head {
			let Some(head) = extraction.head.as_deref() else {
				return Err(Error::Extraction { missing: MissingFragment::Head, head_found, body_found });
			};
			if let Some(slot) = schema_slot {
				writes.push(SlotWrite { slot, value: String::new() });
			}
			writes.push(SlotWrite { slot: head_slot, value: head.to_string() });
			head_bytes = Some(head.len());
		}
		if need_body {
			let Some(body) = extraction.body.as_deref() else {
				return Err(Error::Extraction { missing: MissingFragment::Body, head_found, body_found });
			};
			writes.push(SlotWrite { slot: body_slot, value: body.to_string() });
			body_bytes = Some(body.len());
		}

		Ok(Self { layout, writes, head_bytes, body_bytes })
	}

	pub fn layout(&self) -> SurfaceLayout {
		self.layout
	}

	pub fn writes(&self) -> &[SlotWrite] {
		&self.writes
	}

	/// Byte length of the staged head fragment, when the scope covers it.
	pub fn head_bytes(&self) -> Option<usize> {
		self.head_bytes
	}

	/// Byte length of the staged body fragment, when the scope covers it.
	pub fn body_bytes(&self) -> Option<usize> {
		self.body_bytes
	}
}

/// One addressable group of code editors on the builder page.
///
/// Implementations write through to widget state owned by the page, and
/// every write replaces the slot's whole value. Writing the same plan
/// twice leaves the same editor state.
#[async_trait]
pub trait EditorSurface: Send + Sync {
	/// Number of editor widgets currently on the page.
	async fn slot_count(&self) -> Result<usize>;

	/// Overwrites the value of the editor at `slot`.
	async fn set_slot(&self, slot: usize, value: &str) -> Result<()>;
}

/// Checks the surface shape, then performs the plan's writes in order.
///
/// The shape check happens before the first write, so an undersized
/// surface never receives a partial update. A write failing mid-plan
/// does leave earlier slots written; there is no rollback.
pub async fn inject(surface: &dyn EditorSurface, plan: &InjectionPlan) -> Result<()> {
	let found = surface.slot_count().await?;
	let required = plan.layout().required_slots();
	if found < required {
		return Err(Error::Surface { found, required });
	}

	for write in plan.writes() {
		surface.set_slot(write.slot, &write.value).await?;
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	fn full_extraction() -> Extraction {
		Extraction {
			head: Some("<meta name=\"robots\"><style>h{}</style>".to_string()),
			body: Some("<main>content</main>".to_string()),
		}
	}

	#[test]
	fn full_plan_clears_schema_then_writes_head_and_body() {
		let plan = InjectionPlan::build(&full_extraction(), SurfaceLayout::ThreeField, InjectionScope::Full).unwrap();
		let writes = plan.writes();
		assert_eq!(writes.len(), 3);
		assert_eq!((writes[0].slot, writes[0].value.as_str()), (0, ""));
		assert_eq!(writes[1].slot, 1);
		assert!(writes[1].value.contains("robots"));
		assert_eq!(writes[2].slot, 2);
		assert!(writes[2].value.contains("content"));
		assert_eq!(plan.head_bytes(), Some(writes[1].value.len()));
		assert_eq!(plan.body_bytes(), Some(writes[2].value.len()));
	}

	#[test]
	fn two_field_plan_shifts_slots_up() {
		let plan = InjectionPlan::build(&full_extraction(), SurfaceLayout::TwoField, InjectionScope::Full).unwrap();
		let slots: Vec<usize> = plan.writes().iter().map(|w| w.slot).collect();
		assert_eq!(slots, vec![0, 1]);
		assert!(plan.writes()[0].value.contains("robots"));
	}

	#[test]
	fn head_only_scope_skips_the_body_slot() {
		let plan = InjectionPlan::build(&full_extraction(), SurfaceLayout::ThreeField, InjectionScope::HeadOnly).unwrap();
		let slots: Vec<usize> = plan.writes().iter().map(|w| w.slot).collect();
		assert_eq!(slots, vec![0, 1]);
		assert_eq!(plan.body_bytes(), None);
	}

	#[test]
	fn body_only_scope_writes_one_slot_and_keeps_schema() {
		let plan = InjectionPlan::build(&full_extraction(), SurfaceLayout::ThreeField, InjectionScope::BodyOnly).unwrap();
		let slots: Vec<usize> = plan.writes().iter().map(|w| w.slot).collect();
		assert_eq!(slots, vec![2]);
		assert_eq!(plan.head_bytes(), None);
	}

	#[test]
	fn missing_needed_fragment_fails_the_plan() {
		let headless = Extraction { head: None, body: Some("b".to_string()) };
		let err = InjectionPlan::build(&headless, SurfaceLayout::ThreeField, InjectionScope::Full).unwrap_err();
		match err {
			Error::Extraction { missing, head_found, body_found } => {
				assert_eq!(missing, MissingFragment::Head);
				assert!(!head_found);
				assert!(body_found);
			}
			other => panic!("unexpected error: {other:?}"),
		}

		let empty = Extraction::default();
		let err = InjectionPlan::build(&empty, SurfaceLayout::ThreeField, InjectionScope::Full).unwrap_err();
		assert!(matches!(err, Error::Extraction { missing: MissingFragment::Both, .. }));
	}

	#[test]
	fn missing_unneeded_fragment_is_fine() {
		let headless = Extraction { head: None, body: Some("b".to_string()) };
		let plan = InjectionPlan::build(&headless, SurfaceLayout::ThreeField, InjectionScope::BodyOnly).unwrap();
		assert_eq!(plan.writes().len(), 1);
	}

	#[tokio::test]
	async fn inject_writes_in_plan_order() {
		let surface = FakeSurface::with_slots(3);
		let plan = InjectionPlan::build(&full_extraction(), SurfaceLayout::ThreeField, InjectionScope::Full).unwrap();
		inject(&surface, &plan).await.unwrap();

		let log = surface.write_log().await;
		let slots: Vec<usize> = log.iter().map(|(slot, _)| *slot).collect();
		assert_eq!(slots, vec![0, 1, 2]);
		let values = surface.values().await;
		assert_eq!(values[0], "");
		assert!(values[1].contains("robots"));
		assert!(values[2].contains("content"));
	}

	#[tokio::test]
	async fn undersized_surface_gets_no_writes_at_all() {
		let surface = FakeSurface::with_slots(2);
		let plan = InjectionPlan::build(&full_extraction(), SurfaceLayout::ThreeField, InjectionScope::Full).unwrap();
		let err = inject(&surface, &plan).await.unwrap_err();
		assert!(matches!(err, Error::Surface { found: 2, required: 3 }));
		assert!(surface.write_log().await.is_empty());
	}

	#[tokio::test]
	async fn mid_plan_failure_leaves_earlier_writes_in_place() {
		let surface = FakeSurface::with_slots(3).failing_slot(2);
		let plan = InjectionPlan::build(&full_extraction(), SurfaceLayout::ThreeField, InjectionScope::Full).unwrap();
		let err = inject(&surface, &plan).await.unwrap_err();
		assert!(matches!(err, Error::Remote(_)));

		let log = surface.write_log().await;
		assert_eq!(log.len(), 2);
		assert!(surface.values().await[1].contains("robots"));
	}

	#[tokio::test]
	async fn repeating_a_plan_is_idempotent() {
		let surface = FakeSurface::with_slots(3);
		let plan = InjectionPlan::build(&full_extraction(), SurfaceLayout::ThreeField, InjectionScope::Full).unwrap();
		inject(&surface, &plan).await.unwrap();
		let first = surface.values().await;
		inject(&surface, &plan).await.unwrap();
		assert_eq!(surface.values().await, first);
	}
}
