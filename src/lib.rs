//! Forgeplan - CI build-plan generator
//!
//! This library maps logical build targets (operating system, compiler,
//! architecture) to the ordered step sequences a build-orchestration
//! framework executes: source checkout, dependency linking, CMake
//! configuration and compilation.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`cli`] - Command-line interface parsing and output formatting
//! - [`core`] - Plan computation (no process execution)
//! - [`config`] - Configuration and constants
//! - [`error`] - Error types and handling

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
