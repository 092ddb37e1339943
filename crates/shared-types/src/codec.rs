//! # Fixed-Width Name Codec
//!
//! Company names cross the registry boundary as 32-byte, zero-padded values.
//! Internally they are ordinary `String`s; these helpers are the only place
//! the padding convention lives.
//!
//! ```text
//! "Acme" ──encode──▶ 41 63 6d 65 00 00 … 00   (32 bytes)
//!        ◀─decode──  trailing 0x00 trimmed, UTF-8 checked
//! ```

use crate::errors::CodecError;

/// Fixed byte width of an encoded name.
pub const BYTES32_WIDTH: usize = 32;

/// Right-pad `name` with zero bytes to 32 bytes.
pub fn encode_bytes32(name: &str) -> Result<[u8; BYTES32_WIDTH], CodecError> {
    let raw = name.as_bytes();
    if raw.len() > BYTES32_WIDTH {
        return Err(CodecError::TooLong {
            len: raw.len(),
            max: BYTES32_WIDTH,
        });
    }
    let mut out = [0u8; BYTES32_WIDTH];
    out[..raw.len()].copy_from_slice(raw);
    Ok(out)
}

/// Trim trailing zero padding and decode as UTF-8.
pub fn decode_bytes32(raw: &[u8; BYTES32_WIDTH]) -> Result<String, CodecError> {
    let end = raw.iter().rposition(|b| *b != 0).map_or(0, |i| i + 1);
    String::from_utf8(raw[..end].to_vec()).map_err(|_| CodecError::InvalidUtf8)
}

/// Encode to the `0x`-prefixed, 64-hex-digit wire form.
pub fn to_bytes32_hex(name: &str) -> Result<String, CodecError> {
    Ok(format!("0x{}", hex::encode(encode_bytes32(name)?)))
}

/// Decode from the `0x`-prefixed hex wire form.
///
/// Shorter hex input is accepted and treated as right-padded.
pub fn from_bytes32_hex(text: &str) -> Result<String, CodecError> {
    decode_bytes32(&bytes32_from_hex(text)?)
}

/// Parse hex into a padded 32-byte array without decoding it as text.
pub fn bytes32_from_hex(text: &str) -> Result<[u8; BYTES32_WIDTH], CodecError> {
    let digits = text.strip_prefix("0x").unwrap_or(text);
    let bytes = hex::decode(digits).map_err(|e| CodecError::InvalidHex(e.to_string()))?;
    if bytes.len() > BYTES32_WIDTH {
        return Err(CodecError::TooLong {
            len: bytes.len(),
            max: BYTES32_WIDTH,
        });
    }
    let mut out = [0u8; BYTES32_WIDTH];
    out[..bytes.len()].copy_from_slice(&bytes);
    Ok(out)
}
