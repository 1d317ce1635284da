//! Action dispatch
//!
//! Maps a logical action and its option values to a [`CommandSpec`]. The
//! mapping is a static table of [`Rule`]s; unknown actions and unusable
//! option values resolve to `None` rather than an error.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use crate::catalog;
use crate::command::CommandSpec;
use crate::frame::{Frame, Parameter};
use crate::variant::{ProtocolVariant, ShutterStyle};

/// Logical projector operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Lamp,
    Shutter,
    LensShift,
    LensZoom,
    LensFocus,
    Macro,
}

impl Action {
    pub const ALL: [Action; 6] = [
        Action::Lamp,
        Action::Shutter,
        Action::LensShift,
        Action::LensZoom,
        Action::LensFocus,
        Action::Macro,
    ];

    /// Identifier used by the invocation surface
    pub const fn id(self) -> &'static str {
        match self {
            Action::Lamp => "lamp",
            Action::Shutter => "shutter",
            Action::LensShift => "lensShift",
            Action::LensZoom => "lensZoom",
            Action::LensFocus => "lensFocus",
            Action::Macro => "macro",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Action::ALL.into_iter().find(|a| a.id() == id)
    }
}

/// Opcodes for lamp control on DP projectors
pub const LAMP_DP: [u8; 5] = [0x00, 0x03, 0x02, 0x76, 0x1a];
/// Opcodes for lamp control on HDX projectors, the header supplies the rest
pub const LAMP_HDX: [u8; 2] = [0x76, 0x1a];
pub const SHUTTER_OPEN: [u8; 2] = [0x22, 0x42];
pub const SHUTTER_CLOSE: [u8; 2] = [0x23, 0x42];
pub const LENS_SHIFT: [u8; 2] = [0xf4, 0x81];
pub const LENS_ZOOM: [u8; 2] = [0xf4, 0x82];
pub const LENS_FOCUS: [u8; 2] = [0xf4, 0x83];
pub const MACRO_EXECUTE: [u8; 2] = [0xe8, 0x81];

/// How an action's option value becomes a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Two-state switch, each choice maps to a digit parameter
    Switch {
        dp_opcodes: &'static [u8],
        hdx_opcodes: &'static [u8],
        choices: [(&'static str, &'static str); 2],
    },
    /// Shutter open/close, framed per the variant's [`ShutterStyle`]
    Shutter {
        open: &'static str,
        close: &'static str,
    },
    /// One of `count` enumerated values, given in decimal or hex
    Enumerated {
        opcodes: &'static [u8],
        count: u8,
    },
    /// Free text appended as raw bytes
    Text { opcodes: &'static [u8] },
}

const DISPATCH: [(Action, Rule); Action::ALL.len()] = [
    (
        Action::Lamp,
        Rule::Switch {
            dp_opcodes: &LAMP_DP,
            hdx_opcodes: &LAMP_HDX,
            choices: [("lamp_on", "1"), ("lamp_off", "0")],
        },
    ),
    (
        Action::Shutter,
        Rule::Shutter {
            open: "shutter_open",
            close: "shutter_close",
        },
    ),
    (
        Action::LensShift,
        Rule::Enumerated {
            opcodes: &LENS_SHIFT,
            count: 4,
        },
    ),
    (
        Action::LensZoom,
        Rule::Enumerated {
            opcodes: &LENS_ZOOM,
            count: 2,
        },
    ),
    (
        Action::LensFocus,
        Rule::Enumerated {
            opcodes: &LENS_FOCUS,
            count: 2,
        },
    ),
    (
        Action::Macro,
        Rule::Text {
            opcodes: &MACRO_EXECUTE,
        },
    ),
];

/// Rule for `action`
pub fn rule(action: Action) -> Rule {
    // DISPATCH is ordered like the Action discriminants
    DISPATCH[action as usize].1
}

/// Resolves actions for one protocol variant
#[derive(Debug, Clone, Copy)]
pub struct ActionDispatcher {
    variant: ProtocolVariant,
}

impl ActionDispatcher {
    pub fn new(variant: ProtocolVariant) -> Self {
        Self { variant }
    }

    pub fn variant(&self) -> ProtocolVariant {
        self.variant
    }

    /// Resolve `action_id` with `options` to a command
    ///
    /// Returns `None` for unknown actions, missing options, unknown choices,
    /// out-of-range values and empty macro names.
    pub fn resolve(&self, action_id: &str, options: &BTreeMap<String, String>) -> Option<CommandSpec> {
        let action = Action::from_id(action_id)?;
        let option = catalog::definition(action, self.variant).option;
        let value = options.get(option.id).map(String::as_str)?;

        match rule(action) {
            Rule::Switch {
                dp_opcodes,
                hdx_opcodes,
                choices,
            } => {
                let (_, digit) = choices.iter().find(|(id, _)| *id == value)?;
                let parameter = Parameter::parse(digit).ok()?;
                let opcodes = if self.variant.is_hdx() {
                    hdx_opcodes
                } else {
                    dp_opcodes
                };
                Some(CommandSpec::encoded(opcodes, Some(parameter)))
            }
            Rule::Shutter {
                open: open_choice,
                close: close_choice,
            } => {
                let opening = if value == open_choice {
                    true
                } else if value == close_choice {
                    false
                } else {
                    return None;
                };
                match &self.variant.descriptor().shutter {
                    ShutterStyle::Literal { open, close } => {
                        Some(CommandSpec::Literal(if opening { open } else { close }))
                    }
                    ShutterStyle::Encoded => {
                        let opcodes = if opening { &SHUTTER_OPEN } else { &SHUTTER_CLOSE };
                        Some(CommandSpec::encoded(opcodes, Some(Parameter::Byte(0))))
                    }
                }
            }
            Rule::Enumerated { opcodes, count } => match Parameter::parse(value).ok()? {
                Parameter::Byte(b) if b < count => {
                    Some(CommandSpec::encoded(opcodes, Some(Parameter::Byte(b))))
                }
                _ => None,
            },
            Rule::Text { opcodes } => {
                if value.is_empty() {
                    return None;
                }
                if self.variant.descriptor().parameter_required {
                    Some(CommandSpec::encoded(opcodes, Some(Parameter::text(value))))
                } else {
                    let mut bytes = Vec::with_capacity(opcodes.len() + value.len());
                    bytes.extend_from_slice(opcodes);
                    bytes.extend_from_slice(value.as_bytes());
                    Some(CommandSpec::Encoded {
                        opcodes: bytes,
                        parameter: None,
                    })
                }
            }
        }
    }

    /// Resolve and encode in one step
    pub fn dispatch(&self, action_id: &str, options: &BTreeMap<String, String>) -> Option<Frame> {
        self.resolve(action_id, options)?.to_frame(self.variant).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    fn opts(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_every_action_has_a_rule() {
        for action in Action::ALL {
            assert_eq!(DISPATCH[action as usize].0, action);
            assert_eq!(Action::from_id(action.id()), Some(action));
        }
    }

    #[test]
    fn test_unknown_action_resolves_to_none() {
        let d = ActionDispatcher::new(ProtocolVariant::DpSeries2);
        assert_eq!(d.resolve("powerCycle", &opts(&[])), None);
        assert_eq!(d.resolve("Lamp", &opts(&[("lamp", "lamp_on")])), None);
    }

    #[test]
    fn test_lamp_resolves_per_family() {
        let on = opts(&[("lamp", "lamp_on")]);
        let dp = ActionDispatcher::new(ProtocolVariant::DpSeries2).resolve("lamp", &on);
        assert_eq!(dp, Some(CommandSpec::encoded(&LAMP_DP, Some(Parameter::Byte(1)))));
        let hdx = ActionDispatcher::new(ProtocolVariant::Hdx).resolve("lamp", &opts(&[("lamp", "lamp_off")]));
        assert_eq!(hdx, Some(CommandSpec::encoded(&LAMP_HDX, Some(Parameter::Byte(0)))));
    }

    #[test]
    fn test_missing_option_resolves_to_none() {
        for variant in ProtocolVariant::ALL {
            let d = ActionDispatcher::new(variant);
            for action in Action::ALL {
                assert_eq!(d.resolve(action.id(), &opts(&[])), None, "{} on {}", action.id(), variant);
            }
            // Option present under another action's id
            assert_eq!(d.resolve("lamp", &opts(&[("shutter", "shutter_open")])), None);
            assert_eq!(d.resolve("lensZoom", &opts(&[("side", "0")])), None);
        }
    }

    #[test]
    fn test_unknown_choice_resolves_to_none() {
        let d = ActionDispatcher::new(ProtocolVariant::DpSeries2);
        assert_eq!(d.resolve("lamp", &opts(&[("lamp", "lamp_dim")])), None);
        assert_eq!(d.resolve("shutter", &opts(&[("shutter", "ajar")])), None);
    }

    #[test]
    fn test_lens_accepts_both_notations() {
        for variant in ProtocolVariant::ALL {
            let d = ActionDispatcher::new(variant);
            let dec = d.resolve("lensShift", &opts(&[("side", "3")]));
            let hex = d.resolve("lensShift", &opts(&[("side", "0x03")]));
            assert_eq!(dec, hex);
            assert_eq!(dec, Some(CommandSpec::encoded(&LENS_SHIFT, Some(Parameter::Byte(3)))));
        }
    }

    #[test]
    fn test_lens_value_out_of_range() {
        let d = ActionDispatcher::new(ProtocolVariant::DpSeries2);
        assert_eq!(d.resolve("lensZoom", &opts(&[("zoom", "2")])), None);
        assert_eq!(d.resolve("lensFocus", &opts(&[("focus", "far")])), None);
        assert!(d.resolve("lensShift", &opts(&[("side", "3")])).is_some());
    }

    #[test]
    fn test_macro_framing() {
        let m = opts(&[("macro", "A")]);
        let dp = ActionDispatcher::new(ProtocolVariant::DpSeries2).dispatch("macro", &m).unwrap();
        assert_eq!(dp.as_bytes(), &[0xfe, 0x00, 0xe8, 0x81, 0x41, 0x00, 0xaa, 0xff]);

        let hdx = ActionDispatcher::new(ProtocolVariant::Hdx).dispatch("macro", &m).unwrap();
        assert_eq!(
            hdx.as_bytes(),
            &[0xfe, 0x00, 0x00, 0x03, 0x02, 0xe8, 0x81, 0x41, 0x00, 0xaf, 0xff]
        );
    }

    #[test]
    fn test_empty_macro_resolves_to_none() {
        let d = ActionDispatcher::new(ProtocolVariant::DpSeries2);
        assert_eq!(d.resolve("macro", &opts(&[("macro", "")])), None);
        assert_eq!(d.resolve("macro", &opts(&[])), None);
    }

    #[test]
    fn test_hdx_shutter_is_encoded() {
        let d = ActionDispatcher::new(ProtocolVariant::HdxSeries2);
        let command = d.resolve("shutter", &opts(&[("shutter", "shutter_close")])).unwrap();
        assert_eq!(command.opcodes(), Some(&SHUTTER_CLOSE[..]));
        let frame = command.to_frame(d.variant()).unwrap();
        // 5 + 0x23 + 0x42 = 0x6a
        assert_eq!(frame.checksum(), Some(0x6a));
    }
}
