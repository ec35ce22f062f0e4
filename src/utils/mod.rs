//! Utility functions for alias generation, URL processing and error mapping.
//!
//! - [`alias_generator`] - Random alias generation and preferred-alias validation
//! - [`url_normalizer`] - URL validation and normalization
//! - [`db_error`] - Database error classification

pub mod alias_generator;
pub mod db_error;
pub mod url_normalizer;
