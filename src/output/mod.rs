//! Output formatting for A/B test reports.

mod json;
mod terminal;

pub use json::{from_json, to_json, to_json_pretty};
pub use terminal::{format_report, format_statistic};
