//! Core library for coderelay
//!
//! This crate implements the **Functional Core** of the coderelay proxy,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! - **`coderelay_core`** (this crate): Pure transformation functions with zero I/O
//! - **`coderelay`**: HTTP client, HTTP server and CLI (the Imperative Shell)
//!
//! Nothing in here talks to the network. The shell fetches upstream bytes and
//! hands them to these functions, which makes every decision testable with
//! plain fixture strings.
//!
//! # Module Organization
//!
//! - [`error`]: The failure taxonomy and upstream status classification
//! - [`generate`]: Request/response types, prompt templating and the response
//!   normalizer that unifies single-object and newline-delimited replies
//! - [`health`]: Transformation of the upstream model listing into a health status
//!
//! # Example Usage
//!
//! ```rust
//! use coderelay_core::generate::normalize_response;
//!
//! let body = "{\"response\":\"ab\"}\n{\"response\":\"cd\",\"done\":true}\n{\"response\":\"ef\"}";
//! assert_eq!(normalize_response(body).unwrap(), "abcd");
//! ```

pub mod error;
pub mod generate;
pub mod health;

pub use error::CodegenError;
