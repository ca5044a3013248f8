//! Core library for bggtools
//!
//! This crate implements the **Functional Core** of the bggtools application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! - **`bggtools_core`** (this crate): Pure transformation functions with zero I/O
//! - **`bggtools`**: HTTP requests, CLI, batch execution and the MCP server
//!   (the Imperative Shell)
//!
//! Every function here takes raw data (an XML response body, a list of
//! threads, a parameter set) and returns owned, serializable records. Nothing
//! here knows where the XML came from, so every mapping is tested against
//! fixture documents without mocking.
//!
//! # Module Organization
//!
//! - [`xml`]: Parses XML into an owned tree with defensive field lookups
//! - [`bgg`]: BoardGameGeek XML API2 request building, response mapping,
//!   thread sorting and the per-item error boundary
//! - [`error`]: The [`BggError`] type shared by both
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use bggtools_core::bgg::{parse_game, BggRequest, BGG_API_BASE};
//!
//! let url = BggRequest::thing("13")?.url(BGG_API_BASE);
//! // ... fetch `url` ...
//! let game = parse_game(&body)?;
//! assert_eq!(game.name, "CATAN");
//! ```

pub mod bgg;
pub mod error;
pub mod xml;

pub use error::BggError;
