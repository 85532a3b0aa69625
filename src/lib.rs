//! Generate fake data for protobuf-style messages.
//!
//! `proto-faker` produces populated, semantically plausible instances of
//! message types declared in a JSON schema: named typed fields, nested
//! messages, enumerations, and repeated fields. It is meant for tests and
//! load fixtures, not production data.
//!
//! # Features
//!
//! - Per-kind scalar synthesis for the full proto3 scalar set
//! - Context-aware strings: a field named `email_address` gets an email,
//!   `city` gets a city, `company` gets a company name
//! - Enum selection that skips a leading `UNKNOWN` sentinel when
//!   alternatives exist
//! - Recursive nested-message generation through an explicit type registry,
//!   with a depth ceiling so self-referential schemas stay finite
//! - Field overrides and repeated-count bounds, chainable per faker
//! - Template merge: generate fresh data, then overlay caller-supplied
//!   fields (singular replace, repeated append)
//! - Seedable RNG for reproducible fixtures
//!
//! # Usage
//!
//! ```no_run
//! use std::path::Path;
//!
//! use proto_faker::faker::ProtoFaker;
//!
//! let schema = proto_faker::schema::load_schema(Path::new("schema.json"))?;
//! let mut faker = ProtoFaker::new(&schema, "user_profile")?;
//! let user = faker.fake()?;
//! let batch = faker.fakes(25)?;
//! eprintln!("Generated {} instances", 1 + batch.len());
//! # Ok::<(), proto_faker::error::Error>(())
//! ```

pub mod context;
pub mod error;
pub mod faker;
pub mod schema;
pub mod value;

// Re-exports for convenience
pub use error::{Error, Result};
pub use faker::ProtoFaker;
pub use schema::{FieldDescriptor, FieldKind, MessageDescriptor, Schema};
pub use value::{DynamicMessage, MessageBuilder, Value};
