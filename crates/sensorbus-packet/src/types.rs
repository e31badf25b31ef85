//! Common types used in the protocol.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::PacketError;

/// Element type carried by a sensor packet.
///
/// Every packet holds a homogeneous array of one of these types; the
/// discriminant is the type code transmitted in the packet header. The
/// element width is a pure function of the type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum DataType {
    /// Unsigned 8-bit integer, 1 byte per element.
    Int8 = TYPE_CODE_INT8,
    /// IEEE-754 single-precision float, 4 bytes per element.
    Float32 = TYPE_CODE_FLOAT32,
    /// IEEE-754 double-precision float, 8 bytes per element.
    Float64 = TYPE_CODE_FLOAT64,
}

impl DataType {
    /// Number of payload bytes one element of this type occupies.
    pub const fn width(self) -> usize {
        match self {
            DataType::Int8 => 1,
            DataType::Float32 => 4,
            DataType::Float64 => 8,
        }
    }

    /// The type code transmitted in the packet header.
    pub const fn code(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for DataType {
    type Error = PacketError;

    /// Convert a raw header byte into the closed type set.
    ///
    /// This is the only place a wire byte becomes a [`DataType`]; any code
    /// outside the set is rejected here, never treated as a zero-width type.
    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            TYPE_CODE_INT8 => Ok(DataType::Int8),
            TYPE_CODE_FLOAT32 => Ok(DataType::Float32),
            TYPE_CODE_FLOAT64 => Ok(DataType::Float64),
            _ => Err(PacketError::UnknownTypeCode(code)),
        }
    }
}

impl From<DataType> for u8 {
    fn from(value: DataType) -> Self {
        value.code()
    }
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataType::Int8 => write!(f, "int8"),
            DataType::Float32 => write!(f, "float32"),
            DataType::Float64 => write!(f, "float64"),
        }
    }
}

/// Decoded element values of a packet, homogeneous by construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SensorValues {
    /// Unsigned 8-bit integer readings.
    Int8(Vec<u8>),
    /// Single-precision float readings.
    Float32(Vec<f32>),
    /// Double-precision float readings.
    Float64(Vec<f64>),
}

impl SensorValues {
    /// Element type of the contained values.
    pub fn data_type(&self) -> DataType {
        match self {
            SensorValues::Int8(_) => DataType::Int8,
            SensorValues::Float32(_) => DataType::Float32,
            SensorValues::Float64(_) => DataType::Float64,
        }
    }

    /// Number of contained values.
    pub fn len(&self) -> usize {
        match self {
            SensorValues::Int8(v) => v.len(),
            SensorValues::Float32(v) => v.len(),
            SensorValues::Float64(v) => v.len(),
        }
    }

    /// Whether there are no values.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A decoded sensor packet.
///
/// Produced atomically by a successful decode; a failed decode yields an
/// error and no partial packet. The element type and count are derived from
/// [`SensorPacket::values`], so a decoded packet cannot disagree with its own
/// payload about either.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorPacket {
    /// Address of the slave device that produced the readings.
    pub slave_address: u8,
    /// Decoded readings, in wire order.
    pub values: SensorValues,
}

impl SensorPacket {
    /// Element type of the payload.
    pub fn data_type(&self) -> DataType {
        self.values.data_type()
    }

    /// Number of decoded elements.
    pub fn variable_count(&self) -> usize {
        self.values.len()
    }
}

impl std::fmt::Display for SensorPacket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Slave Address: {}", self.slave_address)?;
        writeln!(f, "Data Type: {}", self.data_type())?;
        writeln!(f, "Variable Count: {}", self.variable_count())?;
        match &self.values {
            SensorValues::Int8(v) => write!(f, "Values: {:?}", v),
            SensorValues::Float32(v) => write!(f, "Values: {:?}", v),
            SensorValues::Float64(v) => write!(f, "Values: {:?}", v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_widths() {
        assert_eq!(DataType::Int8.width(), 1);
        assert_eq!(DataType::Float32.width(), 4);
        assert_eq!(DataType::Float64.width(), 8);
    }

    #[test]
    fn test_type_code_roundtrip() {
        for ty in [DataType::Int8, DataType::Float32, DataType::Float64] {
            assert_eq!(DataType::try_from(ty.code()).unwrap(), ty);
            assert_eq!(u8::from(ty), ty.code());
        }

        assert_eq!(DataType::Int8.code(), 0x01);
        assert_eq!(DataType::Float32.code(), 0x02);
        assert_eq!(DataType::Float64.code(), 0x03);
    }

    #[test]
    fn test_unknown_type_codes_rejected() {
        for code in [0x00, 0x04, 0x09, 0xFF] {
            let err = DataType::try_from(code).unwrap_err();
            assert_eq!(err, PacketError::UnknownTypeCode(code));
        }
    }

    #[test]
    fn test_data_type_display() {
        assert_eq!(DataType::Int8.to_string(), "int8");
        assert_eq!(DataType::Float32.to_string(), "float32");
        assert_eq!(DataType::Float64.to_string(), "float64");
    }

    #[test]
    fn test_values_accessors() {
        let values = SensorValues::Float32(vec![1.0, 2.0]);
        assert_eq!(values.data_type(), DataType::Float32);
        assert_eq!(values.len(), 2);
        assert!(!values.is_empty());
    }

    #[test]
    fn test_packet_display() {
        let packet = SensorPacket {
            slave_address: 1,
            values: SensorValues::Int8(vec![25, 60, 99]),
        };

        let text = packet.to_string();
        assert_eq!(
            text,
            "Slave Address: 1\nData Type: int8\nVariable Count: 3\nValues: [25, 60, 99]"
        );
    }
}
