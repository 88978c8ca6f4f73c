//! # Quill Core
//!
//! The domain layer of the Quill blog backend.
//! Entities, ports and the account/post services live here; this crate performs no I/O itself.

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

pub use error::DomainError;
pub use services::{AccountService, PostService};
