//! Core types and traits for RestModel Rust.
//!
//! This crate provides the foundational abstractions for declarative REST
//! resources:
//!
//! - `Resource` trait for mapping structs to remote collections
//! - `FieldInfo` / `FieldKind` for field registries and coercion
//! - `Value` for dynamically-typed payload values
//! - Envelope parsing for the ok/fail response protocol

pub mod datetime;
pub mod envelope;
pub mod error;
pub mod field;
pub mod resource;
pub mod validate;
pub mod value;

pub use envelope::parse_envelope;
pub use error::{ConfigError, CoercionError, Error, FailResponse, Result, TransportError};
pub use field::{ArrayElement, FieldInfo, FieldKind};
pub use resource::{Resource, resources_from_array};
pub use validate::{matches_pattern, validate_pattern};
pub use value::{JsonMap, Value};
