//! Connection session: at most one live socket per configured projector

use crate::connection::{ConnectionStatus, Connector, StatusReceiver, StatusSender, TcpConnector, Transport};
use barco_projector_core::Frame;
use tokio::sync::mpsc;

/// Owns the socket to one projector and forwards frames to it
pub struct Session<C: Connector = TcpConnector> {
    connector: C,
    transport: Option<C::Transport>,
    status: StatusSender,
}

impl Session<TcpConnector> {
    /// Create a session using real TCP sockets
    pub fn new() -> (Self, StatusReceiver) {
        Self::with_connector(TcpConnector)
    }
}

impl<C: Connector> Session<C> {
    /// Create a session with a custom connector
    ///
    /// Status changes of every socket this session opens are delivered on the
    /// returned receiver.
    pub fn with_connector(connector: C) -> (Self, StatusReceiver) {
        let (status, rx) = mpsc::unbounded_channel();
        let session = Self {
            connector,
            transport: None,
            status,
        };
        (session, rx)
    }

    /// Connect to `host:port`, closing any existing socket first
    ///
    /// Returns immediately; progress is reported as status events.
    pub fn open(&mut self, host: &str, port: u16) {
        self.close();
        log::debug!("Opening connection to {}:{}", host, port);
        self.transport = Some(self.connector.connect(host, port, self.status.clone()));
    }

    /// Send `frame` if connected, otherwise drop it
    ///
    /// Returns `true` if the frame was handed to the socket.
    pub fn send(&self, frame: &Frame) -> bool {
        match &self.transport {
            Some(transport) if transport.is_connected() => {
                log::debug!("Sending command: {:x}", frame);
                let sent = transport.send(frame.as_bytes());
                if !sent {
                    log::debug!("Connection went away, dropping frame {:x}", frame);
                }
                sent
            }
            _ => {
                log::debug!("No connection, dropping frame {:x}", frame);
                false
            }
        }
    }

    /// Release the socket, if any
    pub fn close(&mut self) {
        if let Some(mut transport) = self.transport.take() {
            transport.destroy();
            let _ = self.status.send(ConnectionStatus::Unknown);
        }
    }

    /// Whether a socket exists, connected or not
    pub fn is_open(&self) -> bool {
        self.transport.is_some()
    }

    /// Whether a socket exists and is connected
    pub fn is_connected(&self) -> bool {
        self.transport.as_ref().is_some_and(|t| t.is_connected())
    }

    /// Report a status not originating from a socket
    pub(crate) fn report(&self, status: ConnectionStatus) {
        let _ = self.status.send(status);
    }
}

impl<C: Connector> Drop for Session<C> {
    fn drop(&mut self) {
        self.close();
    }
}
