use std::io::{self, BufRead, Write};
use std::path::Path;
use std::thread;

use anyhow::{Context, Result};
use engine_logging::{engine_debug, engine_info, engine_warn, set_generation};
use life_core::game::GameInput;
use life_core::root::{RootInput, RootState};
use life_engine::{launch, RootHarvester};
use tokio::runtime::{Handle, Runtime};
use tokio::sync::mpsc;

use super::config::{AppConfig, CONFIG_FILENAME};
use super::logging;
use super::ui::commands::{self, Command, HELP};
use super::ui::render;

pub fn run_app() -> Result<()> {
    let config = AppConfig::load(Path::new(CONFIG_FILENAME))
        .with_context(|| format!("loading {CONFIG_FILENAME}"))?;
    logging::initialize(config.log_destination);
    engine_info!("starting life_app with {:?}", config);

    let runtime = Runtime::new().context("starting the tokio runtime")?;
    runtime.block_on(run(config))
}

/// Main loop: applies typed commands and delivered effect inputs one at a
/// time, redrawing after each.
async fn run(config: AppConfig) -> Result<()> {
    let mut harvester = launch(&config.engine_config(), Handle::current());
    dispatch(
        &mut harvester,
        RootInput::Game(GameInput::UpdateBoardSize {
            width: config.viewport_width,
            height: config.viewport_height,
        }),
    );

    let mut lines = spawn_stdin_reader();
    let mut out = io::stdout();
    writeln!(out, "{HELP}")?;
    draw(&mut out, harvester.state())?;

    loop {
        tokio::select! {
            line = lines.recv() => {
                let Some(line) = line else {
                    engine_info!("stdin closed");
                    break;
                };
                match commands::parse(&line, harvester.state()) {
                    Ok(Command::Quit) => break,
                    Ok(Command::Help) => writeln!(out, "{HELP}")?,
                    Ok(Command::Show) => {}
                    Ok(Command::Dispatch(inputs)) => {
                        for input in inputs {
                            dispatch(&mut harvester, input);
                        }
                    }
                    Err(err) => {
                        writeln!(out, "{err}")?;
                        continue;
                    }
                }
                draw(&mut out, harvester.state())?;
            }
            applied = harvester.process_next() => {
                if !applied {
                    break;
                }
                set_generation(harvester.state().game.generation());
                draw(&mut out, harvester.state())?;
            }
        }
    }

    engine_info!("quitting at generation {}", harvester.state().game.generation());
    Ok(())
}

fn dispatch(harvester: &mut RootHarvester, input: RootInput) {
    if !harvester.dispatch(input) {
        engine_debug!("input had no effect on the current screen");
    }
    set_generation(harvester.state().game.generation());
}

fn draw(out: &mut impl Write, state: &RootState) -> io::Result<()> {
    let view = state.game.view();
    write!(out, "{}", render::render_game(&view, state.is_favorite_pattern()))?;
    if let Some(picker) = &state.pattern_select {
        write!(out, "{}", render::render_picker(picker))?;
    }
    out.flush()
}

/// Stdin is read on its own thread; lines arrive on the returned channel.
fn spawn_stdin_reader() -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(err) => {
                    engine_warn!("reading stdin failed: {}", err);
                    break;
                }
            }
        }
    });
    rx
}
