//! Simple client example for a Barco projector

use barco_projector::{ConnectionStatus, LensMove, Projector, ProjectorConfig, ProtocolVariant};
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Replace with your projector's address, or point it at the mock_projector example
    let config = ProjectorConfig::from_address("127.0.0.1:43728", ProtocolVariant::DpSeries2)?;

    let (mut projector, mut status) = Projector::new();
    projector.init(config);

    // Wait for the connection
    loop {
        match status.recv().await {
            Some(ConnectionStatus::Connected) => break,
            Some(ConnectionStatus::Error(msg)) => return Err(msg.into()),
            Some(other) => println!("Status: {}", other),
            None => return Ok(()),
        }
    }
    println!("Connected");

    println!("Lamp on...");
    projector.set_lamp(true);
    tokio::time::sleep(Duration::from_secs(1)).await;

    println!("Opening shutter...");
    projector.set_shutter(true);

    println!("Zooming in...");
    projector.move_lens(LensMove::ZoomIn);

    println!("Running macro 'Intro'...");
    projector.execute_macro("Intro");

    tokio::time::sleep(Duration::from_secs(1)).await;
    projector.destroy();
    println!("Done!");

    Ok(())
}
