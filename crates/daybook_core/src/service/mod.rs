//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate archive calls into caller-facing APIs.
//! - Keep external layers decoupled from persistence details.

pub mod day_service;
