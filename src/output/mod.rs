//! Output module for persisting harvested products
//!
//! This module handles:
//! - Writing the product collection as a JSON file
//! - Summarizing a harvest run for the console

mod json_output;
mod stats;
mod traits;

pub use json_output::{write_json, JsonFileOutput};
pub use stats::{print_summary, HarvestSummary};
pub use traits::{OutputError, OutputResult, ProductWriter};
