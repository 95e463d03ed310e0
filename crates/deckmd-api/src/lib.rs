pub mod api_doc;
pub mod archive;
pub mod error;
pub mod handlers;
pub mod setup;
pub mod state;
pub mod telemetry;
pub mod utils;
pub mod workspace;
