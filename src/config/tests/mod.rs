//! Unit tests for configuration loading and validation.
//!
//! Tests are organised into modules by functional area:
//! - `helpers`: Shared test utilities
//! - `precedence`: Layer precedence tests
//! - `field_resolution`: Token and cookie key fallback tests
//! - `settings`: Validation into `ServerSettings`

mod helpers;
