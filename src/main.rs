//! lifeboard terminal front-end
//!
//! `run` plays a board in real time; `repl` edits and plays it from typed
//! commands.

use std::cell::RefCell;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::rc::Rc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lifeboard::input::{self, Command, Flow};
use lifeboard::{Engine, Pattern, Playback, Settings, presets, rendering};
use rand::{SeedableRng, rngs::StdRng};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Host loop frame time
const FRAME: Duration = Duration::from_millis(16);

#[derive(Parser, Debug)]
#[command(name = "lifeboard")]
#[command(about = "Conway's Game of Life with a board editor and save slots", long_about = None)]
struct Args {
    /// Board rows
    #[arg(short, long, default_value = "40", global = true)]
    rows: usize,

    /// Board columns
    #[arg(short, long, default_value = "40", global = true)]
    cols: usize,

    /// Milliseconds per generation
    #[arg(short, long, default_value = "200", global = true)]
    speed: u64,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Subcommand, Debug)]
enum Mode {
    /// Play a board in real time, printing every generation
    Run {
        /// Catalog pattern to center on the board
        #[arg(short, long, conflicts_with_all = ["file", "random"])]
        pattern: Option<String>,

        /// Plaintext pattern file (`O`/`#` alive, `.` dead, `!` comments)
        #[arg(short, long, conflicts_with = "random")]
        file: Option<PathBuf>,

        /// Start from a random board
        #[arg(long)]
        random: bool,

        /// Seed for --random
        #[arg(long)]
        seed: Option<u64>,

        /// Stop after this many generations (default: run until interrupted)
        #[arg(short = 'n', long)]
        generations: Option<u64>,

        /// Clear the terminal before each frame
        #[arg(long)]
        clear_screen: bool,
    },
    /// Edit and play a board from typed commands
    Repl,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging; RUST_LOG overrides the level flag
    let level = if args.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    let settings = Settings::new(args.rows, args.cols, args.speed);
    let mut playback = Playback::new(
        Engine::new(settings, presets::all_patterns()).context("invalid board settings")?,
    );
    info!(rows = settings.rows, cols = settings.cols, speed = settings.speed, "lifeboard ready");

    match args.mode.unwrap_or(Mode::Repl) {
        Mode::Run {
            pattern,
            file,
            random,
            seed,
            generations,
            clear_screen,
        } => {
            if let Some(path) = file {
                let text = std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read {}", path.display()))?;
                let name = path
                    .file_stem()
                    .map_or_else(|| "file".to_string(), |stem| stem.to_string_lossy().into_owned());
                let loaded = Pattern::from_plaintext(name, &text)
                    .with_context(|| format!("failed to parse {}", path.display()))?;
                playback.select_pattern(&loaded);
            } else if random {
                match seed {
                    Some(seed) => playback.randomize_with(&mut StdRng::seed_from_u64(seed)),
                    None => playback.randomize(),
                }
            } else {
                let name = pattern.as_deref().unwrap_or(presets::DEFAULT_PATTERN);
                playback.select_pattern_named(name)?;
            }
            run(&mut playback, generations, clear_screen);
        }
        Mode::Repl => {
            playback.select_pattern_named(presets::DEFAULT_PATTERN)?;
            repl(&mut playback)?
        }
    }

    Ok(())
}

/// Real-time host loop: feed frame time to playback until the generation
/// limit is reached.
fn run(playback: &mut Playback, generations: Option<u64>, clear_screen: bool) {
    playback.subscribe(move |board, settings| {
        if clear_screen {
            print!("{}", rendering::CLEAR_SCREEN);
        }
        println!("{}\n", rendering::draw_frame(board, settings));
    });

    playback.start();
    let mut ticks = 0;
    let mut last = Instant::now();
    while generations.is_none_or(|limit| ticks < limit) {
        thread::sleep(playback.next_frame(FRAME));
        let now = Instant::now();
        if playback.advance(now - last) {
            ticks += 1;
        }
        last = now;
    }
    playback.stop();
    info!(generations = ticks, "run finished");
}

/// Interactive editor: read commands, run them, print the latest frame.
fn repl(playback: &mut Playback) -> Result<()> {
    let latest: Rc<RefCell<Option<String>>> = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&latest);
    playback.subscribe(move |board, settings| {
        *sink.borrow_mut() = Some(rendering::draw_frame(board, settings));
    });

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    println!("type 'help' for commands");

    loop {
        if let Some(frame) = latest.borrow_mut().take() {
            println!("{frame}");
        }
        write!(stdout, "> ")?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                eprintln!("error: {err}");
                continue;
            }
        };
        debug!(?command, "command");

        match input::execute(playback, command) {
            Ok(Flow::Quit) => break,
            Ok(Flow::Continue(Some(reply))) => println!("{}", reply.trim_end()),
            Ok(Flow::Continue(None)) => {}
            Err(err) => eprintln!("error: {err}"),
        }
    }

    Ok(())
}
