//! Use-case services.
//!
//! # Responsibility
//! - Orchestrate source, normalizer and dataset calls into use-case APIs.
//! - Keep CLI and embedding callers decoupled from module wiring.

pub mod build_service;
