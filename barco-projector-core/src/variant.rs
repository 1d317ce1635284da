//! Protocol variants for the supported projector families
//!
//! Every variant shares the same frame skeleton (`0xFE 0x00` start, checksum,
//! `0xFF` terminator) but differs in header prefix, checksum seed, whether a
//! parameter is mandatory and where the zero filler byte goes.

use core::fmt;
use core::str::FromStr;

use crate::error::Error;

/// Frame header used by the DP series
pub const DP_HEADER: [u8; 2] = [0xfe, 0x00];

/// Frame header used by the HDX series
pub const HDX_HEADER: [u8; 5] = [0xfe, 0x00, 0x00, 0x03, 0x02];

/// Frame terminator
pub const TERMINATOR: u8 = 0xff;

/// Zero byte placed before the checksum
pub const FILLER: u8 = 0x00;

/// Control port used by Series 2 firmware
pub const SERIES2_PORT: u16 = 43728;

/// Control port used by older firmware
pub const LEGACY_PORT: u16 = 43680;

/// Projector family and protocol generation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ProtocolVariant {
    /// DP series, first protocol generation
    DpLegacy,
    /// DP series, Series 2 protocol
    #[default]
    DpSeries2,
    /// HDX series, first protocol generation
    Hdx,
    /// HDX series, Series 2 protocol
    HdxSeries2,
}

/// Position of the zero filler byte in the footer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Footer {
    /// Filler stands in for an absent parameter only
    FillerWhenUnparameterized,
    /// Filler always precedes the checksum
    AlwaysFiller,
}

/// How the shutter action is framed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutterStyle {
    /// Pre-baked 7-byte frames
    Literal {
        open: [u8; 7],
        close: [u8; 7],
    },
    /// Opcodes run through the encoder with parameter `0`
    Encoded,
}

/// Textual form used for enumerated lens option values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionNotation {
    /// `"0"`, `"1"`, ...
    Decimal,
    /// `"0x00"`, `"0x01"`, ...
    Hexadecimal,
}

/// Static description of a protocol variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantDescriptor {
    pub header: &'static [u8],
    pub seed: u8,
    pub parameter_required: bool,
    pub footer: Footer,
    pub default_port: u16,
    pub port_selectable: bool,
    pub shutter: ShutterStyle,
    pub notation: OptionNotation,
}

const SHUTTER_OPEN: [u8; 7] = [0xfe, 0x00, 0x22, 0x42, 0x00, 0x64, 0xff];
const SHUTTER_CLOSE: [u8; 7] = [0xfe, 0x00, 0x23, 0x42, 0x00, 0x65, 0xff];
// Shipped with a checksum byte copied from SHUTTER_OPEN; kept as-is for
// compatibility with deployed firmware.
const SHUTTER_CLOSE_LEGACY: [u8; 7] = [0xfe, 0x00, 0x23, 0x42, 0x00, 0x64, 0xff];

const DP_LEGACY: VariantDescriptor = VariantDescriptor {
    header: &DP_HEADER,
    seed: 0,
    parameter_required: false,
    footer: Footer::FillerWhenUnparameterized,
    default_port: LEGACY_PORT,
    port_selectable: false,
    shutter: ShutterStyle::Literal {
        open: SHUTTER_OPEN,
        close: SHUTTER_CLOSE_LEGACY,
    },
    notation: OptionNotation::Hexadecimal,
};

const DP_SERIES2: VariantDescriptor = VariantDescriptor {
    header: &DP_HEADER,
    seed: 0,
    parameter_required: false,
    footer: Footer::FillerWhenUnparameterized,
    default_port: SERIES2_PORT,
    port_selectable: true,
    shutter: ShutterStyle::Literal {
        open: SHUTTER_OPEN,
        close: SHUTTER_CLOSE,
    },
    notation: OptionNotation::Decimal,
};

const HDX: VariantDescriptor = VariantDescriptor {
    header: &HDX_HEADER,
    seed: 5,
    parameter_required: true,
    footer: Footer::AlwaysFiller,
    default_port: LEGACY_PORT,
    port_selectable: false,
    shutter: ShutterStyle::Encoded,
    notation: OptionNotation::Decimal,
};

const HDX_SERIES2: VariantDescriptor = VariantDescriptor {
    header: &HDX_HEADER,
    seed: 5,
    parameter_required: true,
    footer: Footer::AlwaysFiller,
    default_port: SERIES2_PORT,
    port_selectable: true,
    shutter: ShutterStyle::Encoded,
    notation: OptionNotation::Hexadecimal,
};

impl ProtocolVariant {
    /// All supported variants
    pub const ALL: [ProtocolVariant; 4] = [
        ProtocolVariant::DpLegacy,
        ProtocolVariant::DpSeries2,
        ProtocolVariant::Hdx,
        ProtocolVariant::HdxSeries2,
    ];

    /// Descriptor for this variant
    pub const fn descriptor(self) -> &'static VariantDescriptor {
        match self {
            ProtocolVariant::DpLegacy => &DP_LEGACY,
            ProtocolVariant::DpSeries2 => &DP_SERIES2,
            ProtocolVariant::Hdx => &HDX,
            ProtocolVariant::HdxSeries2 => &HDX_SERIES2,
        }
    }

    /// True for the HDX family
    pub const fn is_hdx(self) -> bool {
        matches!(self, ProtocolVariant::Hdx | ProtocolVariant::HdxSeries2)
    }

    /// Model identifier used in configuration files
    pub const fn as_str(self) -> &'static str {
        match self {
            ProtocolVariant::DpLegacy => "dp-legacy",
            ProtocolVariant::DpSeries2 => "dp-series2",
            ProtocolVariant::Hdx => "hdx",
            ProtocolVariant::HdxSeries2 => "hdx-series2",
        }
    }

    /// Human readable model name
    pub const fn label(self) -> &'static str {
        match self {
            ProtocolVariant::DpLegacy => "Barco DP (legacy protocol)",
            ProtocolVariant::DpSeries2 => "Barco DP Series 2",
            ProtocolVariant::Hdx => "Barco HDX",
            ProtocolVariant::HdxSeries2 => "Barco HDX Series 2",
        }
    }
}

impl fmt::Display for ProtocolVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProtocolVariant {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProtocolVariant::ALL
            .iter()
            .copied()
            .find(|v| v.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or(Error::UnknownVariant)
    }
}
