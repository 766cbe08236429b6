mod config;
mod console;

use std::sync::Arc;

use clap::Parser;
use common::games::SessionRng;
use common::games::tictactoe::GameController;
use common::logger::{self, LogTarget};
use common::log;
use common::network::{InMemoryDocumentStore, NetworkClient};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio_stream::StreamExt;
use tokio_stream::wrappers::LinesStream;

use console::{parse_line, ConsoleBroadcaster, ConsoleInput, HELP_TEXT};

const SEAT_COUNT: usize = 2;
const COMMAND_BUFFER_SIZE: usize = 32;

#[derive(Parser)]
#[command(name = "tictactoe_client")]
struct Args {
    /// YAML config path; defaults to tictactoe_client_config.yaml next to the binary
    #[arg(long)]
    config: Option<String>,
    /// Seed for room ids and bot randomness
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    use_log_prefix: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Client".to_string())
    } else {
        None
    };
    logger::init_logger(prefix, LogTarget::Stderr);

    let config = config::get_config_manager(args.config.as_deref()).get_config()?;
    let seed = args.seed.unwrap_or_else(rand::random);
    log!("Starting with seed {}, online play {}", seed, if config.network.enabled { "enabled" } else { "disabled" });

    // Both seats share one store so a room created on one can be joined from the other.
    let store = config.network.enabled.then(|| Arc::new(InMemoryDocumentStore::new()));

    let mut seats = Vec::with_capacity(SEAT_COUNT);
    let mut handles = Vec::with_capacity(SEAT_COUNT);
    for seat in 1..=SEAT_COUNT {
        let (command_tx, command_rx) = mpsc::channel(COMMAND_BUFFER_SIZE);
        let network = NetworkClient::new(
            store.clone(),
            config.network.collection.clone(),
            config.network.auto_reset_delay(),
        );
        let controller = GameController::new(
            config.bot.single_player_mode(),
            network,
            SessionRng::new(seed.wrapping_add(seat as u64)),
            ConsoleBroadcaster::new(format!("Seat {}", seat)),
            config.bot.timing(),
        );
        handles.push(tokio::spawn(controller.run(command_rx)));
        seats.push(command_tx);
    }

    println!("{}\n", HELP_TEXT);

    let mut active_seat = 0;
    let mut lines = LinesStream::new(BufReader::new(tokio::io::stdin()).lines());
    while let Some(line) = lines.next().await {
        let line = line?;
        match parse_line(&line, &config.bot) {
            Ok(None) => {}
            Ok(Some(ConsoleInput::Command(command))) => {
                if seats[active_seat].send(command).await.is_err() {
                    log!("Seat {} stopped accepting commands", active_seat + 1);
                    break;
                }
            }
            Ok(Some(ConsoleInput::SelectSeat(seat))) if seat <= seats.len() => {
                active_seat = seat - 1;
                println!("Commands now go to seat {}.", seat);
            }
            Ok(Some(ConsoleInput::SelectSeat(seat))) => println!("There is no seat {}.", seat),
            Ok(Some(ConsoleInput::Help)) => println!("{}", HELP_TEXT),
            Ok(Some(ConsoleInput::Quit)) => break,
            Err(e) => println!("{}", e),
        }
    }

    drop(seats);
    for handle in handles {
        if let Err(e) = handle.await {
            log!("Seat task failed: {}", e);
        }
    }
    log!("Client shut down");

    Ok(())
}
