//! Mock projector
//!
//! Listens on the control port and prints every frame it receives, with a
//! checksum check. Handy for trying the client without hardware.
//!
//! Usage: cargo run --example mock_projector [PORT]

use tokio::io::AsyncReadExt;
use tokio::net::{TcpListener, TcpStream};

const DEFAULT_PORT: u16 = 43728;

/// Split complete frames off the front of `buffer`
///
/// A frame runs from `FE 00` to the first `FF` whose preceding byte is a
/// valid checksum, so a checksum equal to `FF` does not cut it short. Bytes
/// that never check out are handed over as one frame once the next `FE 00`
/// arrives.
fn take_frames(buffer: &mut Vec<u8>) -> Vec<Vec<u8>> {
    let mut frames = Vec::new();
    loop {
        match buffer.windows(2).position(|w| w == [0xfe, 0x00]) {
            Some(0) => {}
            Some(start) => {
                buffer.drain(..start);
            }
            None => break,
        }

        let end = (4..buffer.len()).find(|&end| buffer[end] == 0xff && checksum_ok(&buffer[..=end]));
        let end = match end.or_else(|| next_frame_start(buffer).map(|next| next - 1)) {
            Some(end) => end,
            None => break, // incomplete
        };
        frames.push(buffer.drain(..=end).collect());
    }
    frames
}

/// Offset of the next `FE 00` that follows an `FF`
fn next_frame_start(buffer: &[u8]) -> Option<usize> {
    (3..buffer.len().saturating_sub(1))
        .find(|&i| buffer[i - 1] == 0xff && buffer[i] == 0xfe && buffer[i + 1] == 0x00)
}

/// Verify the checksum byte
///
/// Summing everything between the `FE 00` start and the checksum covers both
/// families: on HDX frames the `00 03 02` header tail adds up to the seed.
fn checksum_ok(frame: &[u8]) -> bool {
    if frame.len() < 5 || frame[0] != 0xfe {
        return false;
    }
    let checksum = frame[frame.len() - 2];
    let body = &frame[2..frame.len() - 2];
    body.iter().fold(0u8, |acc, &b| acc.wrapping_add(b)) == checksum
}

async fn handle_client(mut stream: TcpStream) -> std::io::Result<()> {
    let peer = stream.peer_addr()?;
    println!("[Projector] Client connected: {}", peer);

    let mut chunk = [0u8; 1024];
    let mut buffer = Vec::new();
    loop {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            println!("[Projector] Connection closed by {}", peer);
            return Ok(());
        }
        buffer.extend_from_slice(&chunk[..n]);

        for frame in take_frames(&mut buffer) {
            let hex: Vec<String> = frame.iter().map(|b| format!("{:02X}", b)).collect();
            if checksum_ok(&frame) {
                println!("[Projector] Frame: {}", hex.join(" "));
            } else {
                println!("[Projector] Frame: {} (bad checksum)", hex.join(" "));
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let port = std::env::args()
        .nth(1)
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT);

    let listener = TcpListener::bind(("0.0.0.0", port)).await?;
    println!("[Projector] Listening on port {}", port);

    loop {
        let (stream, _) = listener.accept().await?;
        tokio::spawn(async move {
            if let Err(e) = handle_client(stream).await {
                eprintln!("[Projector] Client error: {}", e);
            }
        });
    }
}
