//! # StudyTrack Core Library
//!
//! This crate contains the domain logic for StudyTrack: user identity,
//! session management, task storage, and the account/task flow controllers
//! consumed by the web server.
//!
//! ## Module Organization
//!
//! - `models`: Database models and view projections
//! - `identity`: Credential hashing, sessions, and the identity service
//! - `store`: Task persistence behind the `TaskStore` trait
//! - `flows`: Account and task flow controllers producing render/redirect outcomes
//! - `db`: PostgreSQL connection pooling and migrations
//! - `error`: Shared error and field-error types

pub mod db;
pub mod error;
pub mod flows;
pub mod identity;
pub mod models;
pub mod store;

/// Current version of the StudyTrack core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
