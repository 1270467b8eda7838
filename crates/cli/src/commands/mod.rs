mod deploy;
mod extract;
mod script;
mod targets;

use crate::cli::Commands;
use crate::error::Result;

pub async fn dispatch(command: Commands) -> Result<()> {
	match command {
		Commands::Deploy { slugs, port, endpoint, target, site, tune } => deploy::execute(slugs, port, endpoint, &target, &site, &tune).await,
		Commands::Targets { port } => targets::execute(port).await,
		Commands::Extract { slug, part, dump, marker, timeout_ms, site } => extract::execute(&slug, part, dump, marker, timeout_ms, &site).await,
		Commands::Script { slug, site, tune } => script::execute(&slug, &site, &tune),
	}
}
