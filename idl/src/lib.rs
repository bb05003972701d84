//! Cap'n Proto schema generation for meshcodec catalogs.
//!
//! Walks a [`schema::Catalog`] and writes one struct per reachable layout,
//! one per variant set, one per message family and a root `AccessMessage`
//! union, so decoded messages can be exchanged with other languages.
//!
//! Field names are converted with [`case`]; interchange types come from the
//! classifier in `schema`.

pub mod case;
mod capnp;
mod error;

pub use capnp::{generate, SchemaId};
pub use error::{IdlError, IdlResult};
