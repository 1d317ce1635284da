//! Command frame encoding
//!
//! Frame layout by variant family:
//!
//! ```text
//! DP,  parameterized:   FE 00 <opcodes> <parameter> <checksum> FF
//! DP,  unparameterized: FE 00 <opcodes> 00 <checksum> FF
//! HDX:                  FE 00 00 03 02 <opcodes> <parameter> 00 <checksum> FF
//! ```
//!
//! The checksum is the 8-bit wrapping sum of the opcode and parameter bytes,
//! starting from the variant's seed.

use alloc::vec::Vec;
use core::fmt;

use crate::error::{Error, Result};
use crate::variant::{Footer, ProtocolVariant, FILLER, TERMINATOR};

/// Parameter carried after the opcode bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parameter {
    /// Single byte value, e.g. `1` for lamp on
    Byte(u8),
    /// Raw text bytes, used verbatim
    Text(Vec<u8>),
}

impl Parameter {
    /// Normalize an option string to the byte it denotes
    ///
    /// Accepts a decimal number (`"1"`) or a hexadecimal literal (`"0x01"`).
    /// The result is the value itself, not its character code.
    pub fn parse(value: &str) -> Result<Self> {
        let value = value.trim();
        let invalid = Error::InvalidParameter("expected a decimal or 0x-prefixed byte value");
        let (digits, radix) = match value
            .strip_prefix("0x")
            .or_else(|| value.strip_prefix("0X"))
        {
            Some(hex) => (hex, 16),
            None => (value, 10),
        };
        // from_str_radix tolerates a leading '+'
        if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
            return Err(invalid);
        }
        u8::from_str_radix(digits, radix)
            .map(Parameter::Byte)
            .map_err(|_| invalid)
    }

    /// Raw text parameter, one byte per UTF-8 code unit
    pub fn text(value: &str) -> Self {
        Parameter::Text(value.as_bytes().to_vec())
    }

    /// Bytes placed into the frame
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Parameter::Byte(b) => core::slice::from_ref(b),
            Parameter::Text(bytes) => bytes,
        }
    }
}

/// A complete, checksummed command frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame(Vec<u8>);

impl Frame {
    /// Wrap a pre-baked frame
    pub fn from_literal(bytes: &[u8]) -> Self {
        Frame(bytes.to_vec())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Checksum byte, located just before the terminator
    pub fn checksum(&self) -> Option<u8> {
        self.0.len().checked_sub(2).map(|i| self.0[i])
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }
}

impl AsRef<[u8]> for Frame {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::LowerHex for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in &self.0 {
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}

/// Sum `parts` onto `seed`, modulo 256
pub fn checksum(seed: u8, parts: &[&[u8]]) -> u8 {
    parts
        .iter()
        .flat_map(|part| part.iter())
        .fold(seed, |acc, &b| acc.wrapping_add(b))
}

/// Stateless frame encoder
pub struct FrameEncoder;

impl FrameEncoder {
    /// Build a frame for `opcodes` and an optional parameter
    pub fn encode(
        opcodes: &[u8],
        parameter: Option<&Parameter>,
        variant: ProtocolVariant,
    ) -> Result<Frame> {
        let desc = variant.descriptor();
        if desc.parameter_required && parameter.is_none() {
            return Err(Error::MissingParameter);
        }

        let param = parameter.map(Parameter::as_bytes).unwrap_or(&[]);
        let sum = checksum(desc.seed, &[opcodes, param]);

        let mut buffer = Vec::with_capacity(desc.header.len() + opcodes.len() + param.len() + 3);
        buffer.extend_from_slice(desc.header);
        buffer.extend_from_slice(opcodes);
        buffer.extend_from_slice(param);

        let filler = match desc.footer {
            Footer::AlwaysFiller => true,
            Footer::FillerWhenUnparameterized => parameter.is_none(),
        };
        if filler {
            buffer.push(FILLER);
        }

        buffer.push(sum);
        buffer.push(TERMINATOR);

        Ok(Frame(buffer))
    }
}
