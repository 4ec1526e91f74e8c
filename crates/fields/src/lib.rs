#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! # Lambda Fields
//!
//! AWS Lambda invocation metadata as ordered, typed structured-log fields.
//!
//! This crate provides:
//! - [`Extractor`] -- turns the process environment and a per-invocation
//!   context into log fields
//! - [`InvocationContext`] -- the per-invocation metadata, built by the caller
//! - [`Field`], [`FieldKind`], [`FieldValue`] -- the typed field model and
//!   its fixed emission order
//! - [`invocation_span`] / [`record_fields`] -- `tracing` integration
//!
//! Extraction is total: a missing source value drops its field from the
//! output (unless a fallback is configured) instead of emitting a
//! placeholder, and no extraction path can fail. The only fallible step is
//! [`ExtractorBuilder::build`], which rejects contradictory configuration.
//!
//! # Quick start
//!
//! ```
//! use lambda_fields::{Extractor, FunctionEnv, InvocationContext};
//!
//! // On Lambda, `Extractor::new()` reads the function identity from the
//! // process environment; harnesses inject it explicitly.
//! let extractor = Extractor::builder()
//!     .env(
//!         FunctionEnv::new()
//!             .with_function_name("checkout")
//!             .with_function_version("12"),
//!     )
//!     .build()?;
//!
//! let ctx = InvocationContext::new()
//!     .with_request_id("8476a536-e9f4-11e8-9739-2dfe598c3fcd")
//!     .with_memory_limit_mb(128);
//!
//! for field in extractor.all_values(&ctx) {
//!     println!("{field}");
//! }
//! # Ok::<(), lambda_fields::ConfigError>(())
//! ```
//!
//! The extractor is immutable after construction and safe to share: build
//! it once (a `LazyLock` static or an `Arc` both work) and call it from
//! every invocation.

mod config;
mod context;
mod env;
mod extractor;
mod field;
mod span;

pub use config::{Config, ConfigError};
pub use context::{ClientApplication, ClientContext, CognitoIdentity, InvocationContext};
pub use env::{ENV_FUNCTION_NAME, ENV_FUNCTION_VERSION, FunctionEnv};
pub use extractor::{Extractor, ExtractorBuilder};
pub use field::{Field, FieldKind, FieldValue, to_json_map};
pub use span::{invocation_span, record_fields};
