//! SensorBus Packet Protocol
//!
//! This crate provides the binary wire format used to carry arrays of
//! homogeneously-typed sensor readings from a slave device to a host, and
//! both halves of its codec: an incremental [`PacketBuilder`] for the
//! producing side and pure decode functions for the consuming side.
//!
//! # Protocol Overview
//!
//! Each packet is a 3-byte header followed by a payload of little-endian
//! encoded elements:
//!
//! - **slave_address** (1 byte): opaque identifier of the producing device
//! - **data_type** (1 byte): element type code, see [`DataType`]
//! - **variable_count** (1 byte): number of payload elements, 1-255
//! - **payload**: `variable_count * width` bytes of element data
//!
//! The format carries no delimiter, length prefix, or checksum. Splitting a
//! continuous byte stream into discrete packets is the transport's
//! responsibility; [`decode_packet`] expects exactly one complete packet's
//! bytes per call.
//!
//! # Example
//!
//! ```rust,ignore
//! use sensorbus_packet::{decode_packet, DataType, PacketBuilder};
//!
//! // Producer side: build and serialize a packet of three int8 readings.
//! let mut builder = PacketBuilder::new(1, DataType::Int8, 3)?;
//! builder.push_int8(25)?;
//! builder.push_int8(60)?;
//! builder.push_int8(99)?;
//! let bytes = builder.serialize()?;
//!
//! // Consumer side: recover the structured packet.
//! let packet = decode_packet(&bytes)?;
//! println!("{}", packet);
//! ```

mod builder;
mod codec;
mod constants;
mod error;
mod types;

pub use builder::*;
pub use codec::*;
pub use constants::*;
pub use error::*;
pub use types::*;
