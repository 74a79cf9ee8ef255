//! HTTP protocol layer module
//!
//! Provides HTTP protocol-related base functionality, decoupled from specific business logic.

pub mod response;

// Re-export commonly used types
pub use response::{
    apply_common_headers, build_400_response, build_404_response, build_405_response,
    build_413_response, build_html_response, build_json_response, build_options_response,
    strip_body,
};
