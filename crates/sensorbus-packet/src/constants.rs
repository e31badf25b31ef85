//! Protocol constants
//!
//! These constants define the data type codes and size limits of the
//! SensorBus wire format. Multi-byte payload elements are always
//! little-endian, regardless of host byte order.

// ============================================================================
// Data Type Codes (header byte 1)
// ============================================================================

/// Unsigned 8-bit integer elements, 1 byte each.
pub const TYPE_CODE_INT8: u8 = 0x01;
/// IEEE-754 single-precision float elements, 4 bytes each.
pub const TYPE_CODE_FLOAT32: u8 = 0x02;
/// IEEE-754 double-precision float elements, 8 bytes each.
pub const TYPE_CODE_FLOAT64: u8 = 0x03;

// ============================================================================
// Size Limits
// ============================================================================

/// Fixed packet header size: slave address, type code, variable count.
pub const HEADER_SIZE: usize = 3;

/// Maximum number of elements a packet can declare (the count is one byte).
pub const MAX_VARIABLE_COUNT: usize = 255;

/// Widest element type supported (float64).
pub const MAX_ELEMENT_WIDTH: usize = 8;

/// Absolute payload ceiling in bytes.
pub const MAX_PAYLOAD_SIZE: usize = MAX_VARIABLE_COUNT * MAX_ELEMENT_WIDTH;

/// Largest possible serialized packet.
pub const MAX_PACKET_SIZE: usize = HEADER_SIZE + MAX_PAYLOAD_SIZE;
