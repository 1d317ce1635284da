//! User-facing action and configuration field definitions

use crate::action::Action;
use crate::variant::{OptionNotation, ProtocolVariant};

/// One selectable value of a dropdown option
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Choice {
    pub id: &'static str,
    pub label: &'static str,
}

/// Kind of input an option takes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    Dropdown {
        choices: &'static [Choice],
        default: &'static str,
    },
    TextInput,
}

/// Option shown for an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionDefinition {
    pub id: &'static str,
    pub label: &'static str,
    pub kind: OptionKind,
}

impl OptionDefinition {
    /// Default choice id, if this is a dropdown
    pub fn default_value(&self) -> Option<&'static str> {
        match self.kind {
            OptionKind::Dropdown { default, .. } => Some(default),
            OptionKind::TextInput => None,
        }
    }

    /// Choice id whose label matches `label`, ignoring case
    pub fn choice_by_label(&self, label: &str) -> Option<&'static str> {
        match self.kind {
            OptionKind::Dropdown { choices, .. } => choices
                .iter()
                .find(|c| c.label.eq_ignore_ascii_case(label))
                .map(|c| c.id),
            OptionKind::TextInput => None,
        }
    }
}

/// Action as presented to the operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionDefinition {
    pub action: Action,
    pub name: &'static str,
    pub option: OptionDefinition,
}

const LAMP_CHOICES: [Choice; 2] = [
    Choice { id: "lamp_on", label: "On" },
    Choice { id: "lamp_off", label: "Off" },
];

const SHUTTER_CHOICES: [Choice; 2] = [
    Choice { id: "shutter_close", label: "Close" },
    Choice { id: "shutter_open", label: "Open" },
];

const SHIFT_DECIMAL: [Choice; 4] = [
    Choice { id: "0", label: "Up" },
    Choice { id: "1", label: "Down" },
    Choice { id: "2", label: "Left" },
    Choice { id: "3", label: "Right" },
];

const SHIFT_HEX: [Choice; 4] = [
    Choice { id: "0x00", label: "Up" },
    Choice { id: "0x01", label: "Down" },
    Choice { id: "0x02", label: "Left" },
    Choice { id: "0x03", label: "Right" },
];

const ZOOM_DECIMAL: [Choice; 2] = [
    Choice { id: "0", label: "In" },
    Choice { id: "1", label: "Out" },
];

const ZOOM_HEX: [Choice; 2] = [
    Choice { id: "0x00", label: "In" },
    Choice { id: "0x01", label: "Out" },
];

const FOCUS_DECIMAL: [Choice; 2] = [
    Choice { id: "0", label: "Near" },
    Choice { id: "1", label: "Far" },
];

const FOCUS_HEX: [Choice; 2] = [
    Choice { id: "0x00", label: "Near" },
    Choice { id: "0x01", label: "Far" },
];

fn lens_option(
    id: &'static str,
    label: &'static str,
    notation: OptionNotation,
    decimal: &'static [Choice],
    hex: &'static [Choice],
) -> OptionDefinition {
    let choices = match notation {
        OptionNotation::Decimal => decimal,
        OptionNotation::Hexadecimal => hex,
    };
    OptionDefinition {
        id,
        label,
        kind: OptionKind::Dropdown {
            choices,
            default: choices[0].id,
        },
    }
}

/// Definition of `action` as shown for `variant`
pub fn definition(action: Action, variant: ProtocolVariant) -> ActionDefinition {
    let notation = variant.descriptor().notation;
    let (name, option) = match action {
        Action::Lamp => (
            "Lamp control",
            OptionDefinition {
                id: "lamp",
                label: "On/Off",
                kind: OptionKind::Dropdown {
                    choices: &LAMP_CHOICES,
                    default: "lamp_on",
                },
            },
        ),
        Action::Shutter => (
            "Shutter",
            OptionDefinition {
                id: "shutter",
                label: "Open/Close",
                kind: OptionKind::Dropdown {
                    choices: &SHUTTER_CHOICES,
                    default: "shutter_close",
                },
            },
        ),
        Action::LensShift => (
            "Lens Shift",
            lens_option("side", "Shift Direction", notation, &SHIFT_DECIMAL, &SHIFT_HEX),
        ),
        Action::LensZoom => (
            "Lens Zoom",
            lens_option("zoom", "Zoom", notation, &ZOOM_DECIMAL, &ZOOM_HEX),
        ),
        Action::LensFocus => (
            "Lens Focus",
            lens_option("focus", "Focus", notation, &FOCUS_DECIMAL, &FOCUS_HEX),
        ),
        Action::Macro => (
            "Execute Macro",
            OptionDefinition {
                id: "macro",
                label: "Macro Name",
                kind: OptionKind::TextInput,
            },
        ),
    };
    ActionDefinition {
        action,
        name,
        option,
    }
}

/// Every action available on `variant`
pub fn definitions(variant: ProtocolVariant) -> impl Iterator<Item = ActionDefinition> {
    Action::ALL.into_iter().map(move |a| definition(a, variant))
}

/// Configuration field shown to the operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigField {
    pub id: &'static str,
    pub label: &'static str,
    pub default: &'static str,
    pub tooltip: Option<&'static str>,
    pub editable: bool,
}

/// Default projector address
pub const DEFAULT_HOST: &str = "192.168.0.100";

const SERIES2_PORT_TEXT: &str = "43728";
const LEGACY_PORT_TEXT: &str = "43680";

/// Configuration fields for `variant`
pub fn config_fields(variant: ProtocolVariant) -> [ConfigField; 2] {
    let desc = variant.descriptor();
    let port_default = if desc.default_port == crate::variant::SERIES2_PORT {
        SERIES2_PORT_TEXT
    } else {
        LEGACY_PORT_TEXT
    };
    [
        ConfigField {
            id: "host",
            label: "Target IP",
            default: DEFAULT_HOST,
            tooltip: None,
            editable: true,
        },
        ConfigField {
            id: "port",
            label: "Port",
            default: port_default,
            tooltip: if desc.port_selectable {
                Some("Port 43728 for Series 2")
            } else {
                Some("Fixed control port for this model")
            },
            editable: desc.port_selectable,
        },
    ]
}
