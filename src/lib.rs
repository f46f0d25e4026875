//! Package delivery HTTP server.
//!
//! Serves named files (software and firmware images) out of a single
//! configured directory over plain HTTP, so network devices and automation
//! can pull them with a `GET /packages/{name}` request.

pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;
