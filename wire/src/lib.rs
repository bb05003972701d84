//! Opcode encoding and access message framing for the meshcodec message codec.
//!
//! This crate handles the outermost structure of a Mesh access message: the
//! variable-length opcode and the parameter bytes that follow it. It does not
//! know about model layouts, only where the parameters begin.
//!
//! # Design Principles
//!
//! - **Bounded decoding** - Message size is validated against limits before parsing.
//! - **Borrowed parameters** - Decoding never copies the parameter bytes.
//! - **No domain knowledge** - This crate handles framing, not model semantics.

mod error;
mod frame;
mod limits;
mod opcode;

pub use error::{DecodeError, EncodeError, LimitKind, WireResult};
pub use frame::{decode_access, encode_access, AccessFrame};
pub use limits::Limits;
pub use opcode::{decode_opcode, encode_opcode, Opcode, MAX_OPCODE_LEN};
