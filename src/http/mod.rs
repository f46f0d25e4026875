//! HTTP protocol layer module
//!
//! Protocol-related base functionality, decoupled from the package
//! delivery business logic.

pub mod cache;
pub mod mime;
pub mod percent;
pub mod response;

// Re-export commonly used types
pub use response::{
    build_304_response, build_404_response, build_405_response, build_error_response,
    build_file_response, build_options_response, Body,
};
