//! # StudyTrack Web Server Library
//!
//! This library provides the HTTP layer of StudyTrack: route handlers,
//! HTML rendering, session cookie plumbing, and server wiring on top of
//! the flows in `studytrack-core`.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `extract`: Session cookie plumbing
//! - `middleware`: Security headers
//! - `routes`: Route handlers
//! - `views`: HTML rendering

pub mod app;
pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;
pub mod views;
