//! TCP connection management

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::timeout;

/// Timeout for establishing the TCP connection
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Size of the buffer used to drain inbound bytes
const READ_BUFFER_SIZE: usize = 1024;

/// Connectivity state reported to the operator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionStatus {
    Unknown,
    Connecting,
    Connected,
    Error(String),
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionStatus::Unknown => write!(f, "unknown"),
            ConnectionStatus::Connecting => write!(f, "connecting"),
            ConnectionStatus::Connected => write!(f, "connected"),
            ConnectionStatus::Error(msg) => write!(f, "error: {}", msg),
        }
    }
}

/// Sending half of the status event channel
pub type StatusSender = mpsc::UnboundedSender<ConnectionStatus>;

/// Receiving half of the status event channel
pub type StatusReceiver = mpsc::UnboundedReceiver<ConnectionStatus>;

/// A single outbound socket to a projector
pub trait Transport {
    /// Queue `frame` for writing. Returns `false` if the socket is not
    /// connected, in which case the frame is dropped.
    fn send(&self, frame: &[u8]) -> bool;

    /// Whether the socket is currently connected
    fn is_connected(&self) -> bool;

    /// Release the socket. Later sends are dropped.
    fn destroy(&mut self);
}

/// Creates transports for a host and port
pub trait Connector {
    type Transport: Transport;

    /// Start connecting to `host:port`. Must return immediately; status
    /// changes are reported on `status`.
    fn connect(&self, host: &str, port: u16, status: StatusSender) -> Self::Transport;
}

/// Status sender shared with a transport's background task
///
/// Closing the gate happens under the same lock as sending, so once
/// `close` returns the task can no longer emit events.
#[derive(Clone)]
struct StatusGate(Arc<Mutex<Option<StatusSender>>>);

impl StatusGate {
    fn new(status: StatusSender) -> Self {
        Self(Arc::new(Mutex::new(Some(status))))
    }

    fn send(&self, status: ConnectionStatus) {
        if let Ok(guard) = self.0.lock() {
            if let Some(sender) = guard.as_ref() {
                let _ = sender.send(status);
            }
        }
    }

    fn close(&self) {
        if let Ok(mut guard) = self.0.lock() {
            guard.take();
        }
    }
}

/// Connector producing [`TcpHelper`] transports
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpConnector;

impl Connector for TcpConnector {
    type Transport = TcpHelper;

    fn connect(&self, host: &str, port: u16, status: StatusSender) -> TcpHelper {
        TcpHelper::connect(host, port, status)
    }
}

/// Tokio-backed TCP transport
///
/// Connecting and writing happen on a background task. `send` never blocks:
/// frames go through an unbounded channel to the task that owns the socket.
/// Inbound bytes are read and discarded so the peer never stalls on a full
/// window.
pub struct TcpHelper {
    addr: String,
    frames: mpsc::UnboundedSender<Vec<u8>>,
    connected: Arc<AtomicBool>,
    status: StatusGate,
    task: Option<JoinHandle<()>>,
}

impl TcpHelper {
    /// Start connecting to `host:port`
    ///
    /// Must be called from within a tokio runtime.
    pub fn connect(host: &str, port: u16, status: StatusSender) -> Self {
        let addr = format!("{}:{}", host, port);
        let (frames, rx) = mpsc::unbounded_channel();
        let connected = Arc::new(AtomicBool::new(false));

        let status = StatusGate::new(status);
        status.send(ConnectionStatus::Connecting);
        let task = tokio::spawn(run(addr.clone(), rx, Arc::clone(&connected), status.clone()));

        Self {
            addr,
            frames,
            connected,
            status,
            task: Some(task),
        }
    }

    /// Address in format "host:port"
    pub fn addr(&self) -> &str {
        &self.addr
    }
}

impl Transport for TcpHelper {
    fn send(&self, frame: &[u8]) -> bool {
        if !self.is_connected() {
            return false;
        }
        self.frames.send(frame.to_vec()).is_ok()
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Acquire)
    }

    fn destroy(&mut self) {
        // Silence the task before the session reports anything newer
        self.status.close();
        self.connected.store(false, Ordering::Release);
        if let Some(task) = self.task.take() {
            task.abort();
            log::debug!("Closed connection to {}", self.addr);
        }
    }
}

impl Drop for TcpHelper {
    fn drop(&mut self) {
        self.destroy();
    }
}

/// Background task owning the socket
async fn run(
    addr: String,
    mut frames: mpsc::UnboundedReceiver<Vec<u8>>,
    connected: Arc<AtomicBool>,
    status: StatusGate,
) {
    let stream = match timeout(CONNECT_TIMEOUT, TcpStream::connect(&addr)).await {
        Ok(Ok(stream)) => stream,
        Ok(Err(e)) => {
            report_error(&status, format!("Failed to connect to {}: {}", addr, e));
            return;
        }
        Err(_) => {
            report_error(
                &status,
                format!("Failed to connect to {}: timed out after {:?}", addr, CONNECT_TIMEOUT),
            );
            return;
        }
    };

    let _ = stream.set_nodelay(true);
    let (mut reader, mut writer) = stream.into_split();
    connected.store(true, Ordering::Release);
    status.send(ConnectionStatus::Connected);

    let mut buffer = [0u8; READ_BUFFER_SIZE];
    let reason = loop {
        tokio::select! {
            frame = frames.recv() => {
                let Some(frame) = frame else {
                    // Helper dropped
                    break None;
                };
                if let Err(e) = writer.write_all(&frame).await {
                    break Some(format!("Write error: {}", e));
                }
                if let Err(e) = writer.flush().await {
                    break Some(format!("Write error: {}", e));
                }
            }
            read = reader.read(&mut buffer) => match read {
                Ok(0) => break Some("Connection closed by peer".to_string()),
                Ok(n) => log::debug!("Ignoring {} bytes from {}", n, addr),
                Err(e) => break Some(format!("Read error: {}", e)),
            },
        }
    };

    connected.store(false, Ordering::Release);
    if let Some(reason) = reason {
        report_error(&status, reason);
    }
}

fn report_error(status: &StatusGate, message: String) {
    log::error!("TCP Error: {}", message);
    status.send(ConnectionStatus::Error(message));
}
