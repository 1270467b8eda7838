//! The page-staging pipeline and its batch driver.

use std::time::Instant;

use tracing::{debug, info, warn};

use crate::config::DeployConfig;
use crate::error::Result;
use crate::extract;
use crate::fetch::PageFetcher;
use crate::inject::{self, EditorSurface, InjectionPlan};
use crate::report::{BatchReport, Outcome, PageResult};
use crate::slug::PageSlug;

/// Stages pages through one fetcher/surface pair.
///
/// Control flows strictly forward for each page: fetch, extract, plan,
/// inject. There are no retries anywhere; a failed page simply records
/// its failure.
pub struct Deployer<'a> {
	config: &'a DeployConfig,
	fetcher: &'a PageFetcher,
	surface: &'a dyn EditorSurface,
}

impl<'a> Deployer<'a> {
	pub fn new(config: &'a DeployConfig, fetcher: &'a PageFetcher, surface: &'a dyn EditorSurface) -> Self {
		Self { config, fetcher, surface }
	}

	/// Stages one page. Every pipeline error becomes a `Failed` outcome
	/// here, so callers can keep going regardless of what went wrong.
	pub async fn deploy_page(&self, slug: &PageSlug) -> Outcome {
		match self.try_deploy(slug).await {
			Ok(outcome) => outcome,
			Err(err) => {
				warn!(target = "landfall.deploy", %slug, error = %err, "page staging failed");
				Outcome::Failed { kind: err.kind(), detail: err.to_string() }
			}
		}
	}

	async fn try_deploy(&self, slug: &PageSlug) -> Result<Outcome> {
		let document = self.fetcher.fetch_document(slug).await?;
		let extraction = extract::extract(&document, self.config.marker);
		debug!(
			target = "landfall.deploy",
			%slug,
			document_bytes = document.len(),
			head = extraction.head.is_some(),
			body = extraction.body.is_some(),
			"extraction finished"
		);

		let plan = InjectionPlan::build(&extraction, self.config.layout, self.config.scope)?;
		inject::inject(self.surface, &plan).await?;

		info!(
			target = "landfall.deploy",
			%slug,
			head_bytes = plan.head_bytes(),
			body_bytes = plan.body_bytes(),
			"page staged"
		);
		Ok(Outcome::Staged { head_bytes: plan.head_bytes(), body_bytes: plan.body_bytes() })
	}

	/// Runs the pipeline once per slug, in the order given, timing each
	/// attempt. The report keeps that order and records every outcome.
	pub async fn deploy_batch(&self, slugs: &[PageSlug]) -> BatchReport {
		let mut report = BatchReport::default();
		for slug in slugs {
			let started = Instant::now();
			let outcome = self.deploy_page(slug).await;
			report.push(PageResult { slug: slug.clone(), outcome, elapsed: started.elapsed() });
		}
		report
	}
}
