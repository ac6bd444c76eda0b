//! Conversion use-case services.
//!
//! # Responsibility
//! - Orchestrate reader and repository calls into the full import pipeline.
//! - Keep the CLI decoupled from parsing and storage details.

pub mod import_service;
