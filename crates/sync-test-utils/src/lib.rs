//! Shared test utilities for the sync-files workspace.
//!
//! This crate provides standardised test fixtures to eliminate duplication
//! across crate test suites. It is a dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`git`]: real git source repositories built with the `git` CLI
//! - [`repo`]: [`ConsumerRepo`](repo::ConsumerRepo) builder for consumer working trees

pub mod git;
pub mod repo;
