mod config;
mod input;
mod terminal_view;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use common::engine::session::TicTacToeSession;
use common::log;
use common::logger::{self, LogTarget};
use tokio::io::{AsyncBufReadExt, BufReader};

use config::get_config_manager;
use input::{Command, HELP_TEXT, describe_rejection, parse_command};
use terminal_view::TerminalView;

#[derive(Parser)]
#[command(name = "tictactoe", about = "Tic-tac-toe against a random bot")]
struct Args {
    /// Path of the YAML config file; defaults to one next to the executable.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    think_delay_ms: Option<u32>,

    #[arg(long)]
    highlight_delay_ms: Option<u32>,

    #[arg(long)]
    use_log_prefix: bool,

    /// Append frames instead of clearing the screen.
    #[arg(long)]
    plain: bool,
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

    let config = get_config_manager(args.config.clone()).get_or_create_config()?;
    let mut settings = config.to_session_settings();
    if args.seed.is_some() {
        settings.seed = args.seed;
    }
    if let Some(ms) = args.think_delay_ms {
        settings.timings.think_delay = Duration::from_millis(u64::from(ms));
    }
    if let Some(ms) = args.highlight_delay_ms {
        settings.timings.highlight_delay = Duration::from_millis(u64::from(ms));
    }

    let session_id = format!("local_{}", std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0));

    let view = Arc::new(TerminalView::new(!args.plain));
    let session = TicTacToeSession::new(session_id, settings, view.clone());

    log!("Session {} started with seed {}", session.session_id(), session.seed());
    session.start().await;
    view.show_notice(HELP_TEXT);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => {
                log!("Interrupted");
                break;
            }
        };

        let Some(line) = line else {
            break;
        };

        match parse_command(&line) {
            Ok(Some(Command::Play(position))) => {
                if let Err(e) = session.play(position).await {
                    view.show_notice(&describe_rejection(&e));
                }
            }
            Ok(Some(Command::Restart)) => session.reset_game().await,
            Ok(Some(Command::ResetScores)) => session.reset_scores().await,
            Ok(Some(Command::Help)) => view.show_notice(HELP_TEXT),
            Ok(Some(Command::Quit)) => break,
            Ok(None) => {}
            Err(e) => view.show_notice(&e),
        }
    }

    session.shutdown().await;
    log!("Session {} closed", session.session_id());

    Ok(())
}
