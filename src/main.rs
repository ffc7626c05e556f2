use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use clap::Parser;
use crossterm::event::{self, Event};
use rand::SeedableRng;
use rand::rngs::StdRng;
use snake_sim::app::App;
use snake_sim::audio::TerminalBell;
use snake_sim::config::{DEFAULT_GRID_SIZE, FRAME_INTERVAL_MS};
use snake_sim::grid::GridSize;
use snake_sim::renderer;
use snake_sim::scheduler::DeadlineScheduler;
use snake_sim::score::{ScoreError, ScoreStore, scores_path};
use snake_sim::session::Session;
use snake_sim::terminal_runtime::TerminalGuard;

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Side length of the square play grid, in cells.
    #[arg(
        long,
        default_value_t = DEFAULT_GRID_SIZE,
        value_parser = clap::value_parser!(u16).range(2..=100)
    )]
    grid_size: u16,

    /// Seed for food placement; random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Start with sound off.
    #[arg(long)]
    mute: bool,

    /// Leaderboard file. Defaults to the platform data directory.
    #[arg(long, value_name = "PATH")]
    scores_file: Option<PathBuf>,

    /// Write logs to this file. Filter with `RUST_LOG` (default: info).
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

type TerminalApp = App<DeadlineScheduler, TerminalBell>;

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_ref())?;

    let scores = open_scores(cli.scores_file.clone());
    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let session = Session::new(GridSize::new(cli.grid_size), DeadlineScheduler::new(), rng);
    let app = App::new(session, TerminalBell::stdout(!cli.mute), scores);

    log::info!("starting on a {0}x{0} grid", cli.grid_size);
    run(app)
}

fn run(mut app: TerminalApp) -> io::Result<()> {
    let mut guard = TerminalGuard::enter()?;
    let frame_interval = Duration::from_millis(FRAME_INTERVAL_MS);

    while !app.quitting() {
        let now = unix_now();
        guard
            .terminal_mut()
            .draw(|frame| renderer::render(frame, app.view(now)))?;

        let timeout = app
            .session()
            .scheduler()
            .time_until_due(Instant::now())
            .map_or(frame_interval, |due| due.min(frame_interval));
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key);
            }
        }

        if app.scheduler_mut().fire_if_due(Instant::now()) {
            app.tick();
        }
    }

    Ok(())
}

/// Opens the leaderboard, reporting problems before the screen is taken over.
fn open_scores(path: Option<PathBuf>) -> ScoreStore {
    let path = match path.map_or_else(scores_path, Ok) {
        Ok(path) => path,
        Err(error) => {
            log::warn!("{error}; scores will not be saved");
            eprintln!("Warning: {error}; scores will not be saved");
            return ScoreStore::in_memory();
        }
    };

    match ScoreStore::open(path.clone()) {
        Ok(store) => store,
        Err(error) => {
            report_score_error(&error);
            ScoreStore::empty(path)
        }
    }
}

fn report_score_error(error: &ScoreError) {
    let cause = std::error::Error::source(error)
        .map(|source| format!(": {source}"))
        .unwrap_or_default();
    log::warn!("{error}{cause}");
    eprintln!("Warning: {error}{cause}; starting with an empty leaderboard");
}

/// Logs go to a file or nowhere: stderr would scribble over the game screen.
fn init_logging(log_file: Option<&PathBuf>) -> io::Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };

    let file = File::create(path)?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_secs())
}
