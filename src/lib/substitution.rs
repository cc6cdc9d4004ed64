pub mod api_error;
pub mod dsb_source;
pub mod entry_source;
pub mod errors;
pub mod helpers;
pub mod models;
pub mod plan_parser;
pub mod portal_scraper;
pub mod run_tool;
pub mod server;
