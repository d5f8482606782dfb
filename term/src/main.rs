//! Terminal Minesweeper.
//!
//! Reads keys with crossterm, drives the engine from `kaboom-core` and redraws the whole board
//! whenever an event changed what is on screen.

mod app;
mod config;
mod input;
mod terminal;
mod view;

use std::fs::File;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use kaboom_core::GameEngine;
use simplelog::{ConfigBuilder, WriteLogger};

use app::{App, Step};
use config::Args;
use input::handle_key_event;
use terminal::{TerminalRenderer, install_panic_hook};

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args)?;

    let config = args.game_config()?;
    let seed = args.seed();
    log::info!(
        "Starting {}x{} game with {} mines, seed {}",
        config.rows(),
        config.columns(),
        config.mines(),
        seed
    );

    let mut app = App::new(GameEngine::new(config, seed));
    let mut term = TerminalRenderer::new();
    install_panic_hook();
    term.enter().context("Could not set up the terminal")?;

    let result = run(&mut term, &mut app);

    if let Err(err) = term.exit() {
        log::warn!("Could not restore the terminal: {err:#}");
    }
    log::info!("Exiting in state {:?}", app.engine().state());
    result
}

fn init_logging(args: &Args) -> Result<()> {
    let Some(path) = &args.log_file else {
        return Ok(());
    };

    let file = File::create(path)
        .with_context(|| format!("Could not create log file {}", path.display()))?;
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    WriteLogger::init(args.verbose.log_level_filter(), log_config, file)
        .context("Error initializing logger")?;
    Ok(())
}

fn run(term: &mut TerminalRenderer, app: &mut App) -> Result<()> {
    let mut dirty = true;
    loop {
        if dirty {
            let (width, _) = crossterm::terminal::size().unwrap_or((80, 24));
            term.draw(&app.lines(), width)?;
        }

        dirty = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                match handle_key_event(key).map(|command| app.handle(command)) {
                    Some(Step::Quit) => return Ok(()),
                    Some(Step::Redraw) => true,
                    Some(Step::Unchanged) | None => false,
                }
            }
            Event::Resize(..) => {
                log::trace!("Terminal resized");
                true
            }
            _ => false,
        };
    }
}
