//! Waypoint - a graph validation and path-query engine.
//!
//! This crate provides both a CLI application and a library for validating
//! graph descriptions and answering shortest-path, all-simple-paths,
//! cheapest-path, and cycle queries against them.

#![forbid(unsafe_code)]

// Public modules for library usage
pub mod cycles;
pub mod domain;
pub mod engine;
pub mod error;
pub mod index;
pub mod paths;
pub mod storage;
pub mod validate;

// Public CLI module (needed by binary)
pub mod app;
pub mod cli;

// Command implementations
pub mod commands;

// Output rendering
pub mod output;
