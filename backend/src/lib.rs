//! # Estate Rust Backend
//!
//! Backend for managing plantation estates, the trees planted on them and the
//! surveillance drone route that flies over them.
//!
//! An estate is a grid of 10x10 meter plots. Trees are planted on individual
//! plots, and the backend reports height statistics per estate together with
//! the total distance a monitoring drone travels to sweep every plot.
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`api`]: Identifiers and the result types returned by estate queries
//! - [`models`]: Plain domain records and creation inputs
//! - [`services`]: Pure computations (placement, stats, drone plan)
//! - [`db`]: Repository pattern, persistence backends and orchestration
//! - [`http`]: Axum-based HTTP server and request handlers

// Allow large error types - RepositoryError contains rich context for debugging
#![allow(clippy::result_large_err)]

pub mod api;

pub mod db;
pub mod models;

pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
