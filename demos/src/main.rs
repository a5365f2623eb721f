//! Grid A* visualizer.
//!
//! Run: cargo run --bin gridpath             (interactive terminal)
//!      cargo run --bin gridpath -- --headless --seed 7

use std::time::{Duration, Instant};

use clap::Parser;
use gridpath_demos::error::Result;
use gridpath_demos::term::Terminal;
use gridpath_demos::{App, Config, Control, DemoError, Editor, Frame};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Redraw interval while a path is being revealed.
const TICK: Duration = Duration::from_millis(16);

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("error")).init();

    let config = Config::parse();
    let result = config
        .validate()
        .map_err(DemoError::from)
        .and_then(|()| if config.headless { headless(&config) } else { interactive(&config) });

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn seeded_rng(config: &Config) -> StdRng {
    let seed = config.seed.unwrap_or_else(rand::random);
    log::info!("obstacle seed: {seed}");
    StdRng::seed_from_u64(seed)
}

/// Randomize a board, search once between the configured endpoints and print
/// the fully revealed result.
fn headless(config: &Config) -> Result<()> {
    let mut rng = seeded_rng(config);
    let (start, goal) = config.endpoints();

    let mut editor = Editor::new(config.rows, config.cols);
    editor.click(start)?;
    editor.click(goal)?;
    editor.randomize_obstacles(&mut rng, config.density);
    editor.generate_path()?;

    print!("{}", Frame::new(&editor, usize::MAX, None).to_text());
    Ok(())
}

fn interactive(config: &Config) -> Result<()> {
    let mut app = App::new(config, seeded_rng(config));
    let mut term = Terminal::new().with_mouse(!config.no_mouse);
    term.init()?;

    loop {
        let now = Instant::now();
        term.draw(&app.frame(now))?;

        let timeout = if app.animating(now) {
            TICK
        } else {
            Duration::from_millis(250)
        };
        let grid = app.editor().grid();
        let (rows, cols) = (grid.rows(), grid.cols());
        if let Some(input) = term.poll(timeout, rows, cols)? {
            if app.handle(input, Instant::now()) == Control::Quit {
                break;
            }
        }
    }

    term.close();
    Ok(())
}
