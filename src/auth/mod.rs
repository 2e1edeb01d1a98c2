//! Caller identity, cookie token decryption and the permission evaluator.

pub mod permissions;
pub mod token;
pub mod viewer;

pub use permissions::{PermissionDecision, PermissionLevel, authorize, evaluate};
pub use token::{AesGcmTokenDecryptor, COOKIE_KEY_LENGTH, TokenDecryptor};
pub use viewer::Viewer;
