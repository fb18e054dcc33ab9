use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};

use ludo_bet::commentary::{Commentator, ScriptedCommentator, SilentCommentator};
use ludo_bet::core::{Color, GameConfig, RollPhase, TokenRef};
use ludo_bet::session::{GameSession, SessionHandle, SessionSnapshot};

/// Play one automated game with a side wager.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// RNG seed. Random if omitted.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Color to back.
    #[arg(short, long, default_value = "red")]
    bet: Color,

    /// Wager amount.
    #[arg(short, long, default_value_t = 100)]
    amount: u64,

    /// Skip the pacing delays.
    #[arg(long)]
    fast: bool,

    /// Disable commentary.
    #[arg(long)]
    quiet: bool,

    /// Optional JSON config file.
    #[arg(long)]
    config: Option<std::path::PathBuf>,

    /// Log level.
    #[arg(long, default_value = "info")]
    log_level: tracing::Level,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .init();

    let mut config = match &args.config {
        Some(path) => GameConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => GameConfig::default(),
    };
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    if args.fast {
        config = config.with_delays(Duration::ZERO, Duration::ZERO);
    }

    let commentator: Arc<dyn Commentator> = if args.quiet {
        Arc::new(SilentCommentator)
    } else {
        Arc::new(ScriptedCommentator)
    };

    let (handle, task) = GameSession::spawn(config, commentator)?;
    let mut updates = handle.subscribe();
    let printer = tokio::spawn(async move {
        loop {
            match updates.recv().await {
                Ok(event) => info!("{event}"),
                Err(RecvError::Lagged(skipped)) => warn!(skipped, "event printer lagged"),
                Err(RecvError::Closed) => break,
            }
        }
    });

    let wager = handle.place_wager(args.bet, args.amount).await?;
    info!(backed = %wager.backed, amount = wager.amount, "wager placed");

    let snapshot = play(&handle).await?;
    if let Some(settlement) = snapshot.last_settlement {
        info!("{settlement}");
    }
    info!(balance = snapshot.wallet.balance, "final balance");
    if let Some(line) = snapshot.commentary {
        info!(commentary = %line);
    }

    handle.shutdown().await?;
    task.await?;
    drop(handle);
    printer.abort();
    Ok(())
}

/// Drive the table until someone wins.
async fn play(handle: &SessionHandle) -> Result<SessionSnapshot, Box<dyn std::error::Error>> {
    loop {
        let snapshot = handle.snapshot().await?;
        if snapshot.game.winner.is_some() {
            return Ok(snapshot);
        }

        match snapshot.game.phase {
            RollPhase::Idle => {
                handle.roll().await?;
            }
            RollPhase::AwaitingMove => {
                if let Some(token) = choose(&snapshot) {
                    handle.move_token(token).await?;
                }
            }
            RollPhase::Rolling => tokio::time::sleep(Duration::from_millis(10)).await,
        }
    }
}

/// Pick the legal token furthest along; ties go to the lower ID.
fn choose(snapshot: &SessionSnapshot) -> Option<TokenRef> {
    snapshot
        .legal_tokens
        .iter()
        .copied()
        .max_by_key(|&token| {
            let steps = snapshot.game.token(token).map_or(0, |t| t.steps_taken);
            (steps, std::cmp::Reverse(token.id))
        })
}
