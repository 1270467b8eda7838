//! The targets command: list the debuggable pages a browser exposes.

use colored::Colorize;
use landfall::cdp;

use crate::error::{CliError, Result};

pub async fn execute(port: u16) -> Result<()> {
	let targets = cdp::list_targets(port)
		.await
		.map_err(|err| CliError::Discovery { port, source: anyhow::Error::new(err) })?;
	if targets.is_empty() {
		println!("No debuggable pages on port {port}");
		return Ok(());
	}

	for (index, target) in targets.iter().enumerate() {
		// Pages without a websocket URL are already claimed by another client.
		let mark = if target.web_socket_debugger_url.is_some() { "✓".green() } else { "-".dimmed() };
		let title = if target.title.is_empty() { "(untitled)" } else { target.title.as_str() };
		println!("{index:>3} {mark} {title}");
		if !target.url.is_empty() {
			println!("      {}", target.url.dimmed());
		}
		if let Some(ws) = &target.web_socket_debugger_url {
			println!("      {}", ws.dimmed());
		}
	}
	Ok(())
}
