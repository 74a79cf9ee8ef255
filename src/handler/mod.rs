//! Request handler module
//!
//! Responsible for request routing dispatch and the static homepage.

pub mod homepage;
pub mod router;

// Re-export main entry point
pub use router::handle_request;
