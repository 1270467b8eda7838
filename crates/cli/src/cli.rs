//! Command-line definition.

use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};
use landfall::cdp::{DEFAULT_DEBUG_PORT, DESIGNER_TARGET};
use landfall::config::{DEFAULT_BRANCH, DEFAULT_HOST, DEFAULT_OWNER, DEFAULT_REPO};
use landfall::{DeployConfig, HeadMarker, InjectionScope, SiteConfig, SurfaceLayout};
use url::Url;

#[derive(Parser, Debug)]
#[command(name = "landfall")]
#[command(about = "Stage landing pages into the site builder's custom-code editors")]
#[command(version)]
pub struct Cli {
	/// Increase verbosity (-v info, -vv debug)
	#[arg(short, long, global = true, action = clap::ArgAction::Count)]
	pub verbose: u8,

	#[command(subcommand)]
	pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
	/// Stage pages into the builder (all known pages when none given)
	Deploy {
		/// Page slugs to stage
		slugs: Vec<String>,

		/// Remote-debugging port to discover the designer tab on
		#[arg(long, default_value_t = DEFAULT_DEBUG_PORT)]
		port: u16,

		/// Explicit debugger endpoint, skipping discovery
		#[arg(long, value_name = "WS_URL")]
		endpoint: Option<String>,

		/// Substring identifying the designer tab
		#[arg(long, default_value = DESIGNER_TARGET)]
		target: String,

		#[command(flatten)]
		site: SiteArgs,

		#[command(flatten)]
		tune: DeployArgs,
	},

	/// List debuggable pages on the remote-debugging port
	Targets {
		#[arg(long, default_value_t = DEFAULT_DEBUG_PORT)]
		port: u16,
	},

	/// Fetch one page and report what the extraction rules find
	Extract {
		slug: String,

		/// Fragment to inspect
		#[arg(long, value_enum)]
		part: Option<PartArg>,

		/// Print the raw fragment instead of the summary
		#[arg(long, requires = "part")]
		dump: bool,

		/// Head-extraction start marker
		#[arg(long, value_enum, default_value = "robots")]
		marker: MarkerArg,

		/// Fetch timeout in milliseconds
		#[arg(long, value_name = "MS", default_value_t = 30_000)]
		timeout_ms: u64,

		#[command(flatten)]
		site: SiteArgs,
	},

	/// Print the self-contained in-page deploy script for one page
	Script {
		slug: String,

		#[command(flatten)]
		site: SiteArgs,

		#[command(flatten)]
		tune: DeployArgs,
	},
}

/// Where the published page documents are served from.
#[derive(Args, Debug)]
pub struct SiteArgs {
	/// Content host serving the published documents
	#[arg(long, default_value = DEFAULT_HOST)]
	pub host: Url,

	/// Repository owner on the content host
	#[arg(long, default_value = DEFAULT_OWNER)]
	pub owner: String,

	/// Repository name
	#[arg(long, default_value = DEFAULT_REPO)]
	pub repo: String,

	/// Branch the published documents live on
	#[arg(long, default_value = DEFAULT_BRANCH)]
	pub branch: String,
}

impl SiteArgs {
	pub fn to_config(&self) -> SiteConfig {
		SiteConfig {
			host: self.host.clone(),
			owner: self.owner.clone(),
			repo: self.repo.clone(),
			branch: self.branch.clone(),
		}
	}
}

/// Pipeline knobs shared by deploy and script.
#[derive(Args, Debug)]
pub struct DeployArgs {
	/// Head-extraction start marker
	#[arg(long, value_enum, default_value = "robots")]
	pub marker: MarkerArg,

	/// Target the legacy two-field custom-code panel
	#[arg(long)]
	pub two_field: bool,

	/// Stage only one fragment
	#[arg(long, value_enum, value_name = "PART")]
	pub only: Option<PartArg>,

	/// DOM selector matching each editor widget
	#[arg(long, value_name = "SELECTOR", default_value = ".CodeMirror")]
	pub editor_selector: String,

	/// Fetch and remote-call timeout in milliseconds
	#[arg(long, value_name = "MS", default_value_t = 30_000)]
	pub timeout_ms: u64,
}

impl DeployArgs {
	pub fn to_config(&self) -> DeployConfig {
		DeployConfig {
			marker: self.marker.into(),
			layout: if self.two_field { SurfaceLayout::TwoField } else { SurfaceLayout::ThreeField },
			scope: match self.only {
				None => InjectionScope::Full,
				Some(PartArg::Head) => InjectionScope::HeadOnly,
				Some(PartArg::Body) => InjectionScope::BodyOnly,
			},
			editor_selector: self.editor_selector.clone(),
			fetch_timeout: Duration::from_millis(self.timeout_ms),
			rpc_timeout: Duration::from_millis(self.timeout_ms),
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum MarkerArg {
	/// Match from the robots meta tag
	Robots,
	/// Match from the font preload link
	Font,
}

impl From<MarkerArg> for HeadMarker {
	fn from(marker: MarkerArg) -> Self {
		match marker {
			MarkerArg::Robots => HeadMarker::RobotsMeta,
			MarkerArg::Font => HeadMarker::FontPreload,
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PartArg {
	Head,
	Body,
}
