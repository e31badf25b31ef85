//! Incremental builder for outgoing sensor packets.

use bytes::{BufMut, BytesMut};

use crate::codec::encode_packet;
use crate::constants::MAX_VARIABLE_COUNT;
use crate::error::PacketError;
use crate::types::DataType;

/// Accumulator for a single outgoing packet.
///
/// The header fields are fixed at construction; the payload is filled one
/// element at a time with the push operation matching the declared type, then
/// handed to [`PacketBuilder::serialize`]. The payload buffer is allocated
/// once at construction, sized exactly for the declared element count, and
/// never grows past it.
///
/// A builder is exclusively owned by the caller constructing one packet; push
/// operations take `&mut self` and are not atomic with respect to each other.
#[derive(Debug, Clone)]
pub struct PacketBuilder {
    slave_address: u8,
    data_type: DataType,
    variable_count: u8,
    payload: BytesMut,
}

impl PacketBuilder {
    /// Create a builder for a packet of `variable_count` elements of
    /// `data_type` from the device at `slave_address`.
    ///
    /// Fails with [`PacketError::InvalidVariableCount`] when the count is
    /// zero. Counts above 255 are unrepresentable in the count byte.
    pub fn new(
        slave_address: u8,
        data_type: DataType,
        variable_count: u8,
    ) -> Result<Self, PacketError> {
        if variable_count == 0 {
            return Err(PacketError::InvalidVariableCount {
                count: variable_count,
            });
        }

        Ok(PacketBuilder {
            slave_address,
            data_type,
            variable_count,
            payload: BytesMut::with_capacity(variable_count as usize * data_type.width()),
        })
    }

    /// Append an unsigned 8-bit integer element.
    pub fn push_int8(&mut self, value: u8) -> Result<(), PacketError> {
        self.check_push(DataType::Int8)?;
        self.payload.put_u8(value);
        Ok(())
    }

    /// Append a single-precision float element (little-endian on the wire).
    pub fn push_float32(&mut self, value: f32) -> Result<(), PacketError> {
        self.check_push(DataType::Float32)?;
        self.payload.put_f32_le(value);
        Ok(())
    }

    /// Append a double-precision float element (little-endian on the wire).
    pub fn push_float64(&mut self, value: f64) -> Result<(), PacketError> {
        self.check_push(DataType::Float64)?;
        self.payload.put_f64_le(value);
        Ok(())
    }

    /// Validate one push of `pushed` type against the declared type, the
    /// declared element count, and the absolute payload ceiling.
    ///
    /// No bytes are written unless every check passes, so a failed push
    /// leaves the payload untouched.
    fn check_push(&self, pushed: DataType) -> Result<(), PacketError> {
        if pushed != self.data_type {
            return Err(PacketError::TypeMismatch {
                expected: self.data_type,
                actual: pushed,
            });
        }

        // Capacity is the declared count, not the physical buffer limit, so
        // an under-declared packet rejects extra pushes despite headroom.
        let filled = self.filled_elements();
        if filled >= self.variable_count as usize {
            return Err(PacketError::CapacityExceeded {
                filled,
                capacity: self.variable_count as usize,
            });
        }

        // Absolute payload ceiling, bounded independently of the count check.
        if self.payload.len() + self.data_type.width() > MAX_VARIABLE_COUNT * self.data_type.width()
        {
            return Err(PacketError::CapacityExceeded {
                filled,
                capacity: MAX_VARIABLE_COUNT,
            });
        }

        Ok(())
    }

    /// Slave address stamped into the header.
    pub fn slave_address(&self) -> u8 {
        self.slave_address
    }

    /// Declared element type.
    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    /// Declared element count.
    pub fn variable_count(&self) -> u8 {
        self.variable_count
    }

    /// Number of complete elements pushed so far.
    pub fn filled_elements(&self) -> usize {
        self.payload.len() / self.data_type.width()
    }

    /// Number of elements still needed to fill the packet.
    pub fn remaining(&self) -> usize {
        self.variable_count as usize - self.filled_elements()
    }

    /// Whether every declared element has been pushed.
    pub fn is_full(&self) -> bool {
        self.filled_elements() == self.variable_count as usize
    }

    /// Raw payload bytes pushed so far.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Serialize the fully-populated packet to wire bytes.
    ///
    /// Equivalent to [`encode_packet`]; fails with
    /// [`PacketError::IncompletePacket`] until every declared element has
    /// been pushed. Does not consume or mutate the builder.
    pub fn serialize(&self) -> Result<Vec<u8>, PacketError> {
        encode_packet(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_zero_count() {
        let err = PacketBuilder::new(1, DataType::Int8, 0).unwrap_err();
        assert_eq!(err, PacketError::InvalidVariableCount { count: 0 });
    }

    #[test]
    fn test_push_fills_in_order() {
        let mut builder = PacketBuilder::new(7, DataType::Int8, 3).unwrap();
        assert_eq!(builder.filled_elements(), 0);
        assert_eq!(builder.remaining(), 3);
        assert!(!builder.is_full());

        builder.push_int8(10).unwrap();
        builder.push_int8(20).unwrap();
        assert_eq!(builder.filled_elements(), 2);
        assert_eq!(builder.remaining(), 1);

        builder.push_int8(30).unwrap();
        assert!(builder.is_full());
        assert_eq!(builder.payload(), &[10, 20, 30]);
    }

    #[test]
    fn test_type_mismatch_all_combinations() {
        let mut builder = PacketBuilder::new(1, DataType::Int8, 2).unwrap();
        assert!(matches!(
            builder.push_float32(1.0),
            Err(PacketError::TypeMismatch {
                expected: DataType::Int8,
                actual: DataType::Float32,
            })
        ));
        assert!(matches!(
            builder.push_float64(1.0),
            Err(PacketError::TypeMismatch { .. })
        ));

        let mut builder = PacketBuilder::new(1, DataType::Float32, 2).unwrap();
        assert!(matches!(
            builder.push_int8(1),
            Err(PacketError::TypeMismatch {
                expected: DataType::Float32,
                actual: DataType::Int8,
            })
        ));
        assert!(matches!(
            builder.push_float64(1.0),
            Err(PacketError::TypeMismatch { .. })
        ));

        let mut builder = PacketBuilder::new(1, DataType::Float64, 2).unwrap();
        assert!(matches!(
            builder.push_int8(1),
            Err(PacketError::TypeMismatch { .. })
        ));
        assert!(matches!(
            builder.push_float32(1.0),
            Err(PacketError::TypeMismatch {
                expected: DataType::Float64,
                actual: DataType::Float32,
            })
        ));
    }

    #[test]
    fn test_capacity_uses_declared_count() {
        // Two declared elements leave plenty of physical headroom; the third
        // push must still be rejected.
        let mut builder = PacketBuilder::new(1, DataType::Float32, 2).unwrap();
        builder.push_float32(1.0).unwrap();
        builder.push_float32(2.0).unwrap();

        let err = builder.push_float32(3.0).unwrap_err();
        assert_eq!(
            err,
            PacketError::CapacityExceeded {
                filled: 2,
                capacity: 2,
            }
        );
    }

    #[test]
    fn test_failed_push_leaves_state_unchanged() {
        let mut builder = PacketBuilder::new(1, DataType::Int8, 1).unwrap();
        builder.push_int8(42).unwrap();

        builder.push_int8(43).unwrap_err();
        builder.push_float32(1.0).unwrap_err();

        assert_eq!(builder.filled_elements(), 1);
        assert_eq!(builder.payload(), &[42]);
        assert_eq!(builder.serialize().unwrap(), vec![1, 0x01, 1, 42]);
    }

    #[test]
    fn test_serialize_incomplete() {
        let mut builder = PacketBuilder::new(1, DataType::Float64, 2).unwrap();
        builder.push_float64(1.0).unwrap();

        let err = builder.serialize().unwrap_err();
        assert_eq!(
            err,
            PacketError::IncompletePacket {
                filled: 1,
                declared: 2,
            }
        );
    }

    #[test]
    fn test_serialize_does_not_mutate() {
        let mut builder = PacketBuilder::new(9, DataType::Int8, 1).unwrap();
        builder.push_int8(5).unwrap();

        let first = builder.serialize().unwrap();
        let second = builder.serialize().unwrap();
        assert_eq!(first, second);
        assert_eq!(builder.filled_elements(), 1);
    }

    #[test]
    fn test_full_count_builder() {
        let mut builder = PacketBuilder::new(1, DataType::Int8, 255).unwrap();
        for i in 0..255u8 {
            builder.push_int8(i).unwrap();
        }
        assert!(builder.is_full());

        let err = builder.push_int8(0).unwrap_err();
        assert_eq!(
            err,
            PacketError::CapacityExceeded {
                filled: 255,
                capacity: 255,
            }
        );
    }
}
