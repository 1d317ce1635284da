//! Barco projector control protocol core library (no-std compatible)
//!
//! Builds the fixed-format binary command frames understood by Barco DP and
//! HDX projectors on their TCP control port. No I/O and no async runtime:
//! actions are resolved to commands, commands are encoded to frames, and the
//! caller decides how to transmit them.
//!
//! ## Features
//!
//! - `std`: Implement `std::error::Error` for [`Error`]
//!
//! ## Example
//!
//! ```
//! use barco_projector_core::{FrameEncoder, Parameter, ProtocolVariant};
//!
//! let frame = FrameEncoder::encode(
//!     &[0x00, 0x03, 0x02, 0x76, 0x1a],
//!     Some(&Parameter::parse("1").unwrap()),
//!     ProtocolVariant::DpSeries2,
//! )
//! .unwrap();
//! assert_eq!(frame.as_bytes().last(), Some(&0xff));
//! ```

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod action;
pub mod catalog;
pub mod command;
pub mod error;
pub mod frame;
pub mod variant;

pub use action::{Action, ActionDispatcher, Rule};
pub use catalog::{ActionDefinition, Choice, ConfigField, OptionDefinition, OptionKind};
pub use command::CommandSpec;
pub use error::{Error, Result};
pub use frame::{checksum, Frame, FrameEncoder, Parameter};
pub use variant::{Footer, OptionNotation, ProtocolVariant, ShutterStyle, VariantDescriptor};
