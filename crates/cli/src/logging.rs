//! Logging initialization.

use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. Quiet by default, `-v` for info,
/// `-vv` for debug; an explicit `RUST_LOG` wins over the flag. Output
/// goes to stderr so stdout stays clean for reports and scripts.
pub fn init_logging(verbose: u8) {
	let default_level = match verbose {
		0 => "warn",
		1 => "info",
		_ => "debug",
	};
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_target(false)
		.with_writer(std::io::stderr)
		.init();
}
