//! Barco projector instance

use crate::config::ProjectorConfig;
use crate::connection::{ConnectionStatus, Connector, StatusReceiver, TcpConnector};
use crate::session::Session;
use barco_projector_core::{Action, ActionDispatcher, Frame, ProtocolVariant};
use std::collections::BTreeMap;

/// Lens axis and direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LensMove {
    ShiftUp,
    ShiftDown,
    ShiftLeft,
    ShiftRight,
    ZoomIn,
    ZoomOut,
    FocusNear,
    FocusFar,
}

impl LensMove {
    fn action_and_option(self) -> (Action, &'static str, &'static str) {
        match self {
            LensMove::ShiftUp => (Action::LensShift, "side", "0"),
            LensMove::ShiftDown => (Action::LensShift, "side", "1"),
            LensMove::ShiftLeft => (Action::LensShift, "side", "2"),
            LensMove::ShiftRight => (Action::LensShift, "side", "3"),
            LensMove::ZoomIn => (Action::LensZoom, "zoom", "0"),
            LensMove::ZoomOut => (Action::LensZoom, "zoom", "1"),
            LensMove::FocusNear => (Action::LensFocus, "focus", "0"),
            LensMove::FocusFar => (Action::LensFocus, "focus", "1"),
        }
    }
}

/// A configured projector: dispatcher plus connection session
///
/// Methods take `&mut self` for lifecycle changes and `&self` for commands,
/// so the owner serializes configuration updates against command calls.
pub struct Projector<C: Connector = TcpConnector> {
    config: Option<ProjectorConfig>,
    dispatcher: ActionDispatcher,
    session: Session<C>,
}

impl Projector<TcpConnector> {
    /// Create an unconfigured projector using TCP sockets
    ///
    /// # Example
    /// ```no_run
    /// use barco_projector::{Projector, ProjectorConfig, ProtocolVariant};
    ///
    /// # async fn example() {
    /// let (mut projector, _status) = Projector::new();
    /// projector.init(ProjectorConfig::new("192.168.0.100", ProtocolVariant::DpSeries2));
    /// projector.set_lamp(true);
    /// # }
    /// ```
    pub fn new() -> (Self, StatusReceiver) {
        Self::with_connector(TcpConnector)
    }
}

impl<C: Connector> Projector<C> {
    pub fn with_connector(connector: C) -> (Self, StatusReceiver) {
        let (session, status) = Session::with_connector(connector);
        let projector = Self {
            config: None,
            dispatcher: ActionDispatcher::new(ProtocolVariant::default()),
            session,
        };
        (projector, status)
    }

    /// Apply the initial configuration and start connecting
    pub fn init(&mut self, config: ProjectorConfig) {
        self.apply(config);
    }

    /// Replace the configuration, recreating the connection
    pub fn config_updated(&mut self, config: ProjectorConfig) {
        self.apply(config);
    }

    fn apply(&mut self, config: ProjectorConfig) {
        self.session.close();
        self.dispatcher = ActionDispatcher::new(config.model);

        if config.has_host() {
            self.session.open(config.host.trim(), config.effective_port());
        } else {
            log::warn!("No host configured, not connecting");
            self.session
                .report(ConnectionStatus::Error("No host configured".to_string()));
        }
        self.config = Some(config);
    }

    /// Close the connection for shutdown
    pub fn destroy(&mut self) {
        self.session.close();
    }

    pub fn config(&self) -> Option<&ProjectorConfig> {
        self.config.as_ref()
    }

    pub fn variant(&self) -> ProtocolVariant {
        self.dispatcher.variant()
    }

    pub fn is_connected(&self) -> bool {
        self.session.is_connected()
    }

    /// Run `action_id` with `options`
    ///
    /// Unknown actions and unusable options are skipped; frames are dropped
    /// while disconnected. Returns `true` if a frame was sent.
    pub fn run_action(&self, action_id: &str, options: &BTreeMap<String, String>) -> bool {
        match self.frame_for(action_id, options) {
            Some(frame) => self.session.send(&frame),
            None => {
                log::debug!("Action {} with {:?} resolved to no command", action_id, options);
                false
            }
        }
    }

    /// Frame `action_id` would produce, without sending it
    pub fn frame_for(&self, action_id: &str, options: &BTreeMap<String, String>) -> Option<Frame> {
        self.dispatcher.dispatch(action_id, options)
    }

    pub fn set_lamp(&self, on: bool) -> bool {
        let choice = if on { "lamp_on" } else { "lamp_off" };
        self.run(Action::Lamp, "lamp", choice)
    }

    pub fn set_shutter(&self, open: bool) -> bool {
        let choice = if open { "shutter_open" } else { "shutter_close" };
        self.run(Action::Shutter, "shutter", choice)
    }

    pub fn move_lens(&self, lens: LensMove) -> bool {
        let (action, option, value) = lens.action_and_option();
        self.run(action, option, value)
    }

    pub fn execute_macro(&self, name: &str) -> bool {
        self.run(Action::Macro, "macro", name)
    }

    fn run(&self, action: Action, option: &str, value: &str) -> bool {
        let mut options = BTreeMap::new();
        options.insert(option.to_string(), value.to_string());
        self.run_action(action.id(), &options)
    }
}
