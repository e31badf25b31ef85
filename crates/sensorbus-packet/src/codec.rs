//! Packet encoding and decoding.
//!
//! This module serializes a fully-populated [`PacketBuilder`] to wire bytes
//! and decodes wire bytes back into a [`SensorPacket`]. Both directions agree
//! bit-for-bit on the layout below; the decoder validates every invariant the
//! builder enforces, since it cannot trust its input.
//!
//! ## Packet Format
//!
//! | Field           | Size (bytes)           | Description                                  |
//! |-----------------|------------------------|----------------------------------------------|
//! | slave_address   | 1                      | Address of the producing slave device.       |
//! | data_type       | 1                      | Element type code (see [`DataType`]).        |
//! | variable_count  | 1                      | Number of payload elements (1-255).          |
//! | payload         | variable_count * width | Elements in push order, little-endian.       |
//!
//! There is no delimiter, length prefix, or checksum at this layer. Framing
//! packets out of a continuous byte stream is the transport's job; a decode
//! call expects exactly one complete packet's bytes.

use bytes::Buf;

use crate::builder::PacketBuilder;
use crate::constants::HEADER_SIZE;
use crate::error::PacketError;
use crate::types::{DataType, SensorPacket, SensorValues};

// ============================================================================
// Encoding
// ============================================================================

/// Serialize a fully-populated builder to wire bytes.
///
/// The payload must contain exactly the declared number of elements; a
/// partially-filled builder fails with [`PacketError::IncompletePacket`]
/// rather than serializing a short packet. The builder is left untouched.
pub fn encode_packet(builder: &PacketBuilder) -> Result<Vec<u8>, PacketError> {
    let expected = builder.variable_count() as usize * builder.data_type().width();
    if builder.payload().len() != expected {
        return Err(PacketError::IncompletePacket {
            filled: builder.filled_elements(),
            declared: builder.variable_count(),
        });
    }

    let mut buf = Vec::with_capacity(HEADER_SIZE + expected);
    buf.push(builder.slave_address());
    buf.push(builder.data_type().code());
    buf.push(builder.variable_count());
    buf.extend_from_slice(builder.payload());

    log::trace!(
        "encoded packet: slave={} type={} count={}",
        builder.slave_address(),
        builder.data_type(),
        builder.variable_count()
    );

    Ok(buf)
}

// ============================================================================
// Decoding
// ============================================================================

/// Decode a packet from wire bytes.
///
/// Pure and total: every input yields either a packet or a specific error.
/// The byte count must match the header exactly, with no tolerance for
/// trailing or missing bytes.
pub fn decode_packet(data: &[u8]) -> Result<SensorPacket, PacketError> {
    if data.len() < HEADER_SIZE {
        return Err(PacketError::PacketTooShort {
            expected: HEADER_SIZE,
            actual: data.len(),
        });
    }

    let slave_address = data[0];
    let data_type = DataType::try_from(data[1])?;
    let variable_count = data[2];

    if variable_count == 0 {
        return Err(PacketError::InvalidVariableCount {
            count: variable_count,
        });
    }

    let payload = &data[HEADER_SIZE..];
    let expected = variable_count as usize * data_type.width();
    if payload.len() != expected {
        return Err(PacketError::PayloadSizeMismatch {
            expected,
            actual: payload.len(),
        });
    }

    let count = variable_count as usize;
    let values = match data_type {
        DataType::Int8 => SensorValues::Int8(payload.to_vec()),
        DataType::Float32 => {
            let mut buf = payload;
            let mut values = Vec::with_capacity(count);
            for _ in 0..count {
                values.push(buf.get_f32_le());
            }
            SensorValues::Float32(values)
        }
        DataType::Float64 => {
            let mut buf = payload;
            let mut values = Vec::with_capacity(count);
            for _ in 0..count {
                values.push(buf.get_f64_le());
            }
            SensorValues::Float64(values)
        }
    };

    log::trace!(
        "decoded packet: slave={} type={} count={}",
        slave_address,
        data_type,
        count
    );

    Ok(SensorPacket {
        slave_address,
        values,
    })
}

/// Decode a packet from a hex string.
///
/// Accepts case-insensitive pairs of hex digits with no separators, e.g.
/// `"01011903071e1c"`. Malformed hex (odd length, non-hex characters) fails
/// with [`PacketError::InvalidHex`] before any packet-level validation runs;
/// valid hex continues through [`decode_packet`].
pub fn decode_hex(text: &str) -> Result<SensorPacket, PacketError> {
    let data = hex::decode(text)?;
    decode_packet(&data)
}
