//! Staging pipeline for landing pages.
//!
//! Fetches each published page document, splits it into head and body
//! fragments with two fixed extraction rules, and writes the fragments
//! into the site builder's custom-code editors over the browser's remote
//! debugging session. Everything lands in the editors only; publishing
//! stays a manual step in the builder.

pub mod cdp;
pub mod config;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod inject;
pub mod pipeline;
pub mod report;
pub mod script;
pub mod slug;

pub use config::{DeployConfig, SiteConfig};
pub use error::{Error, MissingFragment, Result};
pub use extract::{Extraction, HeadMarker};
pub use fetch::PageFetcher;
pub use inject::{EditorSurface, FakeSurface, InjectionPlan, InjectionScope, SurfaceLayout};
pub use pipeline::Deployer;
pub use report::{BatchReport, FailureKind, Outcome, PageResult};
pub use slug::{DEFAULT_PAGES, PageSlug};
