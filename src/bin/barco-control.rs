//! Interactive CUI client for Barco projectors
//!
//! Usage:
//!   barco-control --config projector.toml
//!   barco-control HOST[:PORT] [MODEL]
//!
//! MODEL is one of dp-legacy, dp-series2 (default), hdx, hdx-series2.

use barco_projector::protocol::{catalog, OptionKind};
use barco_projector::{LensMove, Projector, ProjectorConfig, ProtocolVariant};
use std::collections::BTreeMap;
use std::io::{self, Write};
use tokio::io::{AsyncBufReadExt, BufReader};

fn usage() {
    let program = std::env::args().next().unwrap_or_else(|| "barco-control".to_string());
    eprintln!("Usage: {} --config FILE", program);
    eprintln!("       {} HOST[:PORT] [MODEL]", program);
    eprintln!("Example: {} 192.168.0.100:43728 dp-series2", program);
}

fn load_config() -> barco_projector::Result<ProjectorConfig> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.as_slice() {
        [flag, path] if flag == "--config" || flag == "-c" => ProjectorConfig::load(path),
        [address] => ProjectorConfig::from_address(address, ProtocolVariant::default()),
        [address, model] => ProjectorConfig::from_address(address, model.parse()?),
        [] => Ok(ProjectorConfig::default()),
        _ => Err(barco_projector::Error::Config("Unexpected arguments".to_string())),
    }
}

fn print_help() {
    println!("Commands:");
    println!("  lamp on|off");
    println!("  shutter open|close");
    println!("  shift up|down|left|right");
    println!("  zoom in|out");
    println!("  focus near|far");
    println!("  macro <name>");
    println!("  raw <actionId> [option=value ...]");
    println!("  actions  - List actions for this model");
    println!("  status   - Show connection status");
    println!("  help");
    println!("  quit");
}

fn print_actions(variant: ProtocolVariant) {
    println!("Actions for {}:", variant.label());
    for def in catalog::definitions(variant) {
        match def.option.kind {
            OptionKind::Dropdown { choices, default } => {
                let list: Vec<String> = choices
                    .iter()
                    .map(|c| format!("{}={}", c.label, c.id))
                    .collect();
                println!(
                    "  {:<10} {:<14} {}: {} (default {})",
                    def.action.id(),
                    def.name,
                    def.option.id,
                    list.join(", "),
                    default
                );
            }
            OptionKind::TextInput => {
                println!("  {:<10} {:<14} {}: <text>", def.action.id(), def.name, def.option.id);
            }
        }
    }
}

fn lens_move(axis: &str, direction: &str) -> Option<LensMove> {
    match (axis, direction) {
        ("shift", "up") => Some(LensMove::ShiftUp),
        ("shift", "down") => Some(LensMove::ShiftDown),
        ("shift", "left") => Some(LensMove::ShiftLeft),
        ("shift", "right") => Some(LensMove::ShiftRight),
        ("zoom", "in") => Some(LensMove::ZoomIn),
        ("zoom", "out") => Some(LensMove::ZoomOut),
        ("focus", "near") => Some(LensMove::FocusNear),
        ("focus", "far") => Some(LensMove::FocusFar),
        _ => None,
    }
}

fn report(sent: bool) {
    if sent {
        println!("✓ Sent");
    } else {
        println!("✗ Not sent (not connected or invalid command)");
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            usage();
            return Err(e.into());
        }
    };

    println!(
        "Connecting to {} at {}:{}...",
        config.model.label(),
        config.host,
        config.effective_port()
    );

    let (mut projector, mut status) = Projector::new();
    projector.init(config);

    // Print status changes as they arrive
    tokio::spawn(async move {
        while let Some(s) = status.recv().await {
            log::info!("Connection status: {}", s);
            println!("[status] {}", s);
        }
    });

    print_help();
    println!();

    let stdin = tokio::io::stdin();
    let mut reader = BufReader::new(stdin);
    let mut line = String::new();

    loop {
        print!("barco> ");
        io::stdout().flush()?;
        line.clear();

        if reader.read_line(&mut line).await? == 0 {
            break; // EOF
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.is_empty() {
            continue;
        }

        match parts[0] {
            "quit" | "exit" | "q" => {
                println!("Goodbye!");
                break;
            }

            "help" | "h" => print_help(),

            "actions" => print_actions(projector.variant()),

            "status" => {
                if projector.is_connected() {
                    println!("connected");
                } else {
                    println!("not connected");
                }
            }

            "lamp" => match parts.get(1) {
                Some(&"on") => report(projector.set_lamp(true)),
                Some(&"off") => report(projector.set_lamp(false)),
                _ => println!("Usage: lamp on|off"),
            },

            "shutter" => match parts.get(1) {
                Some(&"open") => report(projector.set_shutter(true)),
                Some(&"close") => report(projector.set_shutter(false)),
                _ => println!("Usage: shutter open|close"),
            },

            axis @ ("shift" | "zoom" | "focus") => {
                match parts.get(1).and_then(|d| lens_move(axis, d)) {
                    Some(lens) => report(projector.move_lens(lens)),
                    None => println!("Unknown direction, see 'help'"),
                }
            }

            "macro" => {
                // Macro names may contain spaces
                let name = line.trim().strip_prefix("macro").unwrap_or_default().trim();
                if name.is_empty() {
                    println!("Usage: macro <name>");
                } else {
                    report(projector.execute_macro(name));
                }
            }

            "raw" => {
                let Some(action_id) = parts.get(1) else {
                    println!("Usage: raw <actionId> [option=value ...]");
                    continue;
                };
                let options: BTreeMap<String, String> = parts[2..]
                    .iter()
                    .filter_map(|kv| kv.split_once('='))
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect();
                match projector.frame_for(action_id, &options) {
                    Some(frame) => println!("Frame: {:x}", frame),
                    None => println!("No command for {}", action_id),
                }
                report(projector.run_action(action_id, &options));
            }

            other => println!("Unknown command: {} (type 'help')", other),
        }
    }

    projector.destroy();
    Ok(())
}
