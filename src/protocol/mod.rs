//! Protocol re-exports from core library

pub use barco_projector_core::{
    catalog, checksum, Action, ActionDefinition, ActionDispatcher, CommandSpec, Frame, FrameEncoder,
    OptionKind, Parameter, ProtocolVariant, Rule, VariantDescriptor,
};
