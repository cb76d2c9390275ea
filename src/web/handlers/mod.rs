//! HTML template rendering handlers for the web dashboard.

mod dashboard;
mod links;
mod pages;
mod stats;

pub use dashboard::{create_link_form_handler, dashboard_handler};
pub use links::delete_link_form_handler;
pub use pages::{error_page, fallback_handler, not_found_page};
pub use stats::stats_handler;
