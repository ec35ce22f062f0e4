//! Core domain entities.
//!
//! Entities are plain data structures. Following the usual split, creation
//! input lives in a separate `New*` struct:
//!
//! - [`UrlRecord`] - a stored alias → URL mapping with its click counter
//! - [`NewUrlRecord`] - the fields a caller supplies on insert

pub mod url_record;

pub use url_record::{MAX_DESCRIPTION_LEN, NewUrlRecord, UrlRecord};
