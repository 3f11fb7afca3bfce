//! Client-side schema model for the load balancer controller REST API.
//!
//! Every resource is a plain serde record paired with a static [`schema::ObjectSchema`]
//! side-table describing wire names, optionality, enum tokens, edition gates and
//! introduction versions. The codec uses the side-table for structural checks, the
//! validator for advisory pre-flight checks.

pub mod catalog;
pub mod codec;
mod collection;
pub mod edition;
pub mod json_schema;
mod model;
pub mod nullable;
mod refs;
pub mod schema;
pub mod validate;
pub mod version;

pub use codec::{
    CodecError, DecodeError, EncodeError, decode, decode_collection, decode_value, encode,
    encode_collection, encode_for_write, encode_value,
};
pub use collection::Collection;
pub use edition::Edition;
pub use model::*;
pub use refs::Ref;
pub use schema::{Resource, Schema};
pub use validate::{ValidateOptions, Violation, validate, validate_value};
pub use version::ApiVersion;

#[cfg(test)]
mod tests;
