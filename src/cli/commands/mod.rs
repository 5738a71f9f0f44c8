//! CLI command implementations.

mod config;
mod doctor;
mod download;
mod init;
mod overview;
mod preview;
mod sentences;
mod summary;

pub use config::run_config;
pub use doctor::run_doctor;
pub use download::run_download;
pub use init::run_init;
pub use overview::run_overview;
pub use preview::run_preview;
pub use sentences::run_sentences;
pub use summary::run_summary;
