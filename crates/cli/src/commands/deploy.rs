//! The deploy command: batch staging over a live debug session.

use std::io::{self, Write};
use std::time::Instant;

use colored::Colorize;
use landfall::cdp::{self, CdpClient, CdpSurface};
use landfall::{BatchReport, DeployConfig, Deployer, EditorSurface, Outcome, PageFetcher, PageResult, PageSlug};
use tracing::info;

use crate::cli::{DeployArgs, SiteArgs};
use crate::error::{CliError, Result};

pub async fn execute(
	slugs: Vec<String>,
	port: u16,
	endpoint: Option<String>,
	target: &str,
	site: &SiteArgs,
	tune: &DeployArgs,
) -> Result<()> {
	let slugs = resolve_slugs(slugs)?;
	let config = tune.to_config();
	let fetcher = PageFetcher::new(site.to_config(), config.fetch_timeout)?;

	let endpoint = match endpoint {
		Some(endpoint) => endpoint,
		None => discover_endpoint(port, target).await?,
	};
	let client = CdpClient::connect(&endpoint, config.rpc_timeout).await?;

	let result = run_batch(&client, &config, &fetcher, &slugs).await;
	client.close().await;
	let report = result?;

	print_summary(&report);
	Ok(())
}

/// No slugs on the command line means the full known set.
fn resolve_slugs(slugs: Vec<String>) -> Result<Vec<PageSlug>> {
	if slugs.is_empty() {
		return Ok(PageSlug::default_pages());
	}
	slugs.into_iter().map(|s| Ok(PageSlug::new(s)?)).collect()
}

async fn discover_endpoint(port: u16, needle: &str) -> Result<String> {
	let targets = cdp::list_targets(port)
		.await
		.map_err(|err| CliError::Discovery { port, source: anyhow::Error::new(err) })?;
	let Some(tab) = cdp::find_target(&targets, needle) else {
		return Err(CliError::NoDesignerTab { needle: needle.to_string() });
	};
	let Some(url) = tab.web_socket_debugger_url.clone() else {
		return Err(CliError::NoDesignerTab { needle: needle.to_string() });
	};
	info!(target = "landfall", title = %tab.title, "designer tab found");
	Ok(url)
}

async fn run_batch(
	client: &CdpClient,
	config: &DeployConfig,
	fetcher: &PageFetcher,
	slugs: &[PageSlug],
) -> Result<BatchReport> {
	let surface = CdpSurface::new(client, &config.editor_selector);

	// One surface check up front; pages are never attempted against a
	// missing custom-code panel.
	let found = surface.slot_count().await?;
	let required = config.layout.required_slots();
	if found < required {
		return Err(CliError::Surface { found, required });
	}
	println!("{} {found} editor field(s) on the designer tab", "✓".green());
	println!("Staging {} page(s)\n", slugs.len());

	let deployer = Deployer::new(config, fetcher, &surface);
	let mut report = BatchReport::default();
	for slug in slugs {
		print!("  {:<18} ", slug.as_str());
		io::stdout().flush().ok();

		let started = Instant::now();
		let outcome = deployer.deploy_page(slug).await;
		let elapsed = started.elapsed();
		println!("{} {}", render_outcome(&outcome), format!("{}ms", elapsed.as_millis()).dimmed());
		report.push(PageResult { slug: slug.clone(), outcome, elapsed });
	}
	Ok(report)
}

fn render_outcome(outcome: &Outcome) -> String {
	match outcome {
		Outcome::Staged { head_bytes, body_bytes } => {
			let mut line = "staged".green().to_string();
			if let Some(n) = head_bytes {
				line.push_str(&format!(" head={n}B"));
			}
			if let Some(n) = body_bytes {
				line.push_str(&format!(" body={n}B"));
			}
			line
		}
		Outcome::Failed { kind, detail } => format!("{} {detail}", kind.to_string().red()),
	}
}

fn print_summary(report: &BatchReport) {
	let staged = report.staged_count();
	let total = report.total();
	let secs = report.total_elapsed().as_secs_f64();
	println!();
	if staged == total {
		println!("{} staged {staged}/{total} page(s) in {secs:.1}s", "✓".green());
	} else {
		println!("{} staged {staged}/{total} page(s) in {secs:.1}s", "!".yellow());
		let failing: Vec<&str> = report.failed().map(|r| r.slug.as_str()).collect();
		println!("{} failed: {}", "✗".red(), failing.join(", "));
	}
	println!("{}", "Staged fields are not live; publish from the designer when ready.".dimmed());
}
