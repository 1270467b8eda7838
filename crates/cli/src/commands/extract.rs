//! The extract command: fetch one page and show what would be staged.

use std::time::Duration;

use colored::Colorize;
use landfall::{Error, MissingFragment, PageFetcher, PageSlug, extract};

use crate::cli::{MarkerArg, PartArg, SiteArgs};
use crate::error::Result;

pub async fn execute(
	slug: &str,
	part: Option<PartArg>,
	dump: bool,
	marker: MarkerArg,
	timeout_ms: u64,
	site: &SiteArgs,
) -> Result<()> {
	let slug = PageSlug::new(slug)?;
	let site = site.to_config();
	let url = site.page_url(&slug);
	let fetcher = PageFetcher::new(site, Duration::from_millis(timeout_ms))?;
	let document = fetcher.fetch_document(&slug).await?;
	let extraction = extract::extract(&document, marker.into());

	if dump {
		// clap guarantees --part came with --dump.
		let fragment = match part {
			Some(PartArg::Head) => extraction.head.as_deref(),
			Some(PartArg::Body) => extraction.body.as_deref(),
			None => None,
		};
		let Some(text) = fragment else {
			let missing = match part {
				Some(PartArg::Body) => MissingFragment::Body,
				_ => MissingFragment::Head,
			};
			return Err(Error::Extraction {
				missing,
				head_found: extraction.head.is_some(),
				body_found: extraction.body.is_some(),
			}
			.into());
		};
		println!("{text}");
		return Ok(());
	}

	println!("{url}: {} bytes", document.len());
	match part {
		Some(PartArg::Head) => print_fragment("head", extraction.head.as_deref()),
		Some(PartArg::Body) => print_fragment("body", extraction.body.as_deref()),
		None => {
			print_fragment("head", extraction.head.as_deref());
			print_fragment("body", extraction.body.as_deref());
		}
	}
	Ok(())
}

fn print_fragment(name: &str, fragment: Option<&str>) {
	match fragment {
		Some(text) => println!("  {} {name}: {} bytes", "✓".green(), text.len()),
		None => println!("  {} {name}: no match", "✗".red()),
	}
}
