//! Access message framing: opcode followed by parameters.

use crate::error::{DecodeError, EncodeError, LimitKind, WireResult};
use crate::limits::Limits;
use crate::opcode::{decode_opcode, encode_opcode, Opcode};

/// A framed access message, parameters borrowed from the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessFrame<'a> {
    pub opcode: Opcode,
    /// Number of bytes the opcode occupied.
    pub opcode_len: usize,
    /// Everything after the opcode.
    pub params: &'a [u8],
}

/// Splits an access message into opcode and parameter bytes.
pub fn decode_access<'a>(buf: &'a [u8], limits: &Limits) -> WireResult<AccessFrame<'a>> {
    if buf.len() > limits.max_access_payload {
        return Err(DecodeError::LimitsExceeded {
            kind: LimitKind::AccessPayload,
            limit: limits.max_access_payload,
            actual: buf.len(),
        });
    }
    let (opcode, opcode_len) = decode_opcode(buf)?;
    Ok(AccessFrame {
        opcode,
        opcode_len,
        params: &buf[opcode_len..],
    })
}

/// Appends an access message to `out`, returning the bytes written.
pub fn encode_access(
    opcode: Opcode,
    params: &[u8],
    limits: &Limits,
    out: &mut Vec<u8>,
) -> Result<usize, EncodeError> {
    let total = opcode.len() + params.len();
    if total > limits.max_access_payload {
        return Err(EncodeError::LimitsExceeded {
            kind: LimitKind::AccessPayload,
            limit: limits.max_access_payload,
            actual: total,
        });
    }
    out.reserve(total);
    encode_opcode(opcode, out);
    out.extend_from_slice(params);
    Ok(total)
}
