//! Barco Projector TCP Control Library
//!
//! This library controls Barco DP and HDX series projectors over their TCP
//! control port. Logical actions (lamp, shutter, lens, macros) are turned into
//! fixed-format binary frames by [`barco_projector_core`] and written to a
//! single persistent socket. Frames are fire-and-forget: no responses are
//! parsed and nothing is queued while disconnected.
//!
//! ## Example
//!
//! ```no_run
//! use barco_projector::{Projector, ProjectorConfig, ProtocolVariant};
//!
//! #[tokio::main]
//! async fn main() {
//!     let (mut projector, mut status) = Projector::new();
//!     projector.init(ProjectorConfig::new("192.168.0.100", ProtocolVariant::DpSeries2));
//!
//!     while let Some(s) = status.recv().await {
//!         if s == barco_projector::ConnectionStatus::Connected {
//!             projector.set_shutter(true);
//!             break;
//!         }
//!     }
//! }
//! ```

pub mod config;
pub mod connection;
pub mod device;
pub mod error;
pub mod protocol;
pub mod session;

pub use barco_projector_core::ProtocolVariant;
pub use config::ProjectorConfig;
pub use connection::{ConnectionStatus, Connector, StatusReceiver, TcpConnector, TcpHelper, Transport};
pub use device::projector::LensMove;
pub use device::Projector;
pub use error::{Error, Result};
pub use session::Session;
