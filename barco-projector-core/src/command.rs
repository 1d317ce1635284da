//! Resolved commands, ready to be framed

use alloc::vec::Vec;

use crate::error::Result;
use crate::frame::{Frame, FrameEncoder, Parameter};
use crate::variant::ProtocolVariant;

/// A command resolved from an action, either pre-baked or computed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandSpec {
    /// Complete frame sent as-is, no runtime checksum
    Literal(&'static [u8]),
    /// Opcodes and optional parameter run through the encoder
    Encoded {
        opcodes: Vec<u8>,
        parameter: Option<Parameter>,
    },
}

impl CommandSpec {
    pub fn encoded(opcodes: &[u8], parameter: Option<Parameter>) -> Self {
        CommandSpec::Encoded {
            opcodes: opcodes.to_vec(),
            parameter,
        }
    }

    /// Opcode bytes, if this command is computed
    pub fn opcodes(&self) -> Option<&[u8]> {
        match self {
            CommandSpec::Literal(_) => None,
            CommandSpec::Encoded { opcodes, .. } => Some(opcodes),
        }
    }

    /// Build the frame for `variant`
    pub fn to_frame(&self, variant: ProtocolVariant) -> Result<Frame> {
        match self {
            CommandSpec::Literal(bytes) => Ok(Frame::from_literal(bytes)),
            CommandSpec::Encoded { opcodes, parameter } => {
                FrameEncoder::encode(opcodes, parameter.as_ref(), variant)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_is_passed_through() {
        static BYTES: [u8; 7] = [0xfe, 0x00, 0x23, 0x42, 0x00, 0x65, 0xff];
        let command = CommandSpec::Literal(&BYTES);
        for variant in ProtocolVariant::ALL {
            assert_eq!(command.to_frame(variant).unwrap().as_bytes(), &BYTES);
        }
        assert_eq!(command.opcodes(), None);
    }

    #[test]
    fn test_encoded_follows_variant() {
        let command = CommandSpec::encoded(&[0x22, 0x42], Some(Parameter::Byte(0)));
        let dp = command.to_frame(ProtocolVariant::DpSeries2).unwrap();
        let hdx = command.to_frame(ProtocolVariant::Hdx).unwrap();
        assert_eq!(dp.as_bytes(), &[0xfe, 0x00, 0x22, 0x42, 0x00, 0x64, 0xff]);
        assert_eq!(
            hdx.as_bytes(),
            &[0xfe, 0x00, 0x00, 0x03, 0x02, 0x22, 0x42, 0x00, 0x00, 0x69, 0xff]
        );
    }
}
