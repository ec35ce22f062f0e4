//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod health;
pub mod minify;
pub mod redirect;
pub mod resolve;

pub use health::{
    cache_data_handler, cache_health_handler, cache_rw_health_handler, health_handler,
    psql_health_handler,
};
pub use minify::minify_handler;
pub use redirect::redirect_handler;
pub use resolve::resolve_handler;
