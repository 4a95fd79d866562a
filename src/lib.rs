pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::CliConfig;

pub use crate::config::{storage::LocalStorage, PlannerConfig};
pub use crate::core::{catalog::CatalogClient, planner::Planner, session::PlannerSession};
pub use crate::utils::error::{PlannerError, Result};
