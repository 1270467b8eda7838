//! The script command: print the copy-paste fallback for the browser console.

use landfall::{PageSlug, script};

use crate::cli::{DeployArgs, SiteArgs};
use crate::error::Result;

pub fn execute(slug: &str, site: &SiteArgs, tune: &DeployArgs) -> Result<()> {
	let slug = PageSlug::new(slug)?;
	println!("{}", script::inline_deploy_script(&site.to_config(), &tune.to_config(), &slug));
	Ok(())
}
