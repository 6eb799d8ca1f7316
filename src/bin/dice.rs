//! `dice`: play rounds against the computer from a terminal.
//!
//! Scores go to a JSON-file leaderboard under `--data-dir`, shared with any
//! other `dice` process pointed at the same directory.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::error;
use tracing_subscriber::EnvFilter;

use dice_duel::{
    DiceConfig, DiceError, DieFace, FileIdentityStore, Identity, IdentityStore,
    JsonFileLeaderboard, LeaderboardStore, Result, RoundEvent, RuleMode, Seat, SeatMap,
    Session, SessionBuilder, SyncStatus,
};

#[derive(Parser, Debug)]
#[command(name = "dice", version, about = "Roll against the computer and climb the shared leaderboard")]
struct Args {
    /// Directory holding leaderboards and the remembered player name.
    #[arg(long, default_value = ".dice")]
    data_dir: PathBuf,

    /// JSON config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Player name. Prompts when omitted and none is remembered.
    #[arg(long)]
    name: Option<String>,

    /// Rule for this run: "high" or "low".
    #[arg(long)]
    mode: Option<RuleMode>,

    /// Rounds to play.
    #[arg(long, default_value_t = 1)]
    rounds: u32,

    /// Forget the player after playing.
    #[arg(long)]
    switch_player: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    match run(Args::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "dice failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<()> {
    let config = match &args.config {
        Some(path) => DiceConfig::from_json_file(path)?,
        None => DiceConfig::default(),
    };
    let identities: Arc<dyn IdentityStore> =
        Arc::new(FileIdentityStore::new(args.data_dir.join("identity.json")));
    let leaderboard: Arc<dyn LeaderboardStore> =
        Arc::new(JsonFileLeaderboard::new(args.data_dir.join("leaderboards")));

    let name = match args.name {
        Some(name) => Some(name),
        None if identities.load()?.is_none() => Some(prompt_name()?),
        None => None,
    };

    let (events, rx) = mpsc::unbounded_channel();
    let printer = tokio::spawn(render(rx));
    let builder = SessionBuilder::new()
        .config(config)
        .leaderboard(leaderboard)
        .identity_store(Arc::clone(&identities))
        .events(events);
    let mut session = match name {
        Some(name) => builder.sign_in(&name).await?,
        None => builder.restore().await?.ok_or(DiceError::EmptyIdentity)?,
    };
    if let Some(mode) = args.mode {
        session.set_mode(mode);
    }

    println!("Welcome, {} ({})", session.identity(), session.mode());
    for _ in 0..args.rounds {
        let Some(report) = session.play_round().await else {
            break;
        };
        tokio::task::yield_now().await;
        if let SyncStatus::Stale { reason } = &report.sync {
            println!("(leaderboard not updated: {reason})");
        }
        println!("🏆 Wins: {}  💥 Losses: {}", report.record.wins, report.record.losses);
    }

    print_leaderboard(&session);

    if args.switch_player {
        session.switch_player()?;
        println!("Player forgotten.");
    } else {
        drop(session);
    }
    if let Err(err) = printer.await {
        error!(error = %err, "event renderer stopped");
    }
    Ok(())
}

fn prompt_name() -> Result<String> {
    let stdin = std::io::stdin();
    loop {
        print!("Enter your name: ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            return Err(DiceError::EmptyIdentity);
        }
        match Identity::parse(&line) {
            Ok(identity) => return Ok(identity.to_string()),
            Err(err) => println!("{err}"),
        }
    }
}

fn glyph(face: Option<DieFace>) -> char {
    face.map_or('-', DieFace::glyph)
}

fn dice_line(faces: &SeatMap<Option<DieFace>>) -> String {
    format!(
        "You rolled: {}   Computer rolled: {}",
        glyph(faces[Seat::Player]),
        glyph(faces[Seat::Opponent])
    )
}

async fn render(mut rx: UnboundedReceiver<RoundEvent>) {
    let mut faces: SeatMap<Option<DieFace>> = SeatMap::default();
    while let Some(event) = rx.recv().await {
        match event {
            RoundEvent::Started { mode } => {
                faces = SeatMap::default();
                println!("Rolling... ({mode})");
            }
            RoundEvent::Tick { seat, face } => {
                faces[seat] = Some(face);
                print!("\r{}", dice_line(&faces));
                let _ = std::io::stdout().flush();
            }
            RoundEvent::Settled { .. } => {}
            RoundEvent::Resolved(outcome) => {
                println!("\r{}", dice_line(&faces));
                println!("{}", outcome.message());
            }
        }
    }
}

fn print_leaderboard(session: &Session) {
    println!();
    println!("🌍 Global Leaderboard");
    for record in session.snapshot().ranked() {
        println!(
            "{}: {}W / {}L (Net: {})",
            record.identity,
            record.wins,
            record.losses,
            record.net()
        );
    }
}
