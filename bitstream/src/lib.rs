//! Bit and byte cursor primitives for the meshcodec message codec.
//!
//! This crate provides [`BitWriter`] and [`BitReader`] for mixed bit-packed and
//! byte-aligned encoding. Mesh parameters are mostly whole bytes, with the odd
//! sub-byte group (transition time, flags) packed most-significant bit first.
//!
//! # Design Principles
//!
//! - **No unsafe code** - Safety is paramount.
//! - **Bounded operations** - All reads/writes are bounds-checked.
//! - **No domain knowledge** - This crate knows nothing about opcodes, layouts, or models.
//! - **Explicit errors** - All failures return structured errors, never panic.
//!
//! # Example
//!
//! ```
//! use bitstream::{BitReader, BitWriter};
//!
//! let mut writer = BitWriter::new();
//! writer.write_bits(1, 2).unwrap();
//! writer.write_bits(10, 6).unwrap();
//! writer.write_bytes_aligned(&[0x22]).unwrap();
//!
//! let bytes = writer.finish();
//!
//! let mut reader = BitReader::new(&bytes);
//! assert_eq!(reader.read_bits(2).unwrap(), 1);
//! assert_eq!(reader.read_bits(6).unwrap(), 10);
//! assert_eq!(reader.read_bytes_aligned(1).unwrap(), &[0x22]);
//! ```

mod error;
mod reader;
mod writer;

pub use error::{BitError, BitResult};
pub use reader::BitReader;
pub use writer::BitWriter;
