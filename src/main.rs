//! Terminal falling-blocks runner (default binary).
//!
//! One frame per tick: render the snapshot, wait for input until the tick is due, then
//! advance the game and play the sounds it emitted.

use std::fs::File;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};

use falling_blocks::audio::AudioTrigger;
use falling_blocks::config::Args;
use falling_blocks::core::{GameSnapshot, GameState};
use falling_blocks::high_score::{HighScoreGuard, HighScoreStore};
use falling_blocks::input::{should_quit, InputHandler};
use falling_blocks::shutdown::ShutdownFlag;
use falling_blocks::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use falling_blocks::types::{GameAction, TICK_MS};

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args)?;

    let store = HighScoreStore::new(&args.high_score_file);
    let high_score = store.load_or_default();
    let mut high_score = HighScoreGuard::new(store, high_score);

    let seed = args.seed_or_clock();
    log::info!("starting with seed {seed}");
    let mut game_state = GameState::new(seed).with_high_score(high_score.best());
    let mut audio = AudioTrigger::open(args.mute);
    audio.restart_music();

    let shutdown = ShutdownFlag::install().context("installing signal handlers")?;
    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut game_state, &mut audio, &mut high_score, &shutdown);

    // Always try to restore terminal state.
    let _ = term.exit();
    high_score.record(game_state.high_score());
    high_score.finish().context("saving the high score")?;
    result
}

fn init_logging(args: &Args) -> Result<()> {
    let Some(path) = &args.log_file else {
        return Ok(());
    };
    let file =
        File::create(path).with_context(|| format!("creating log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn run(
    term: &mut TerminalRenderer,
    game_state: &mut GameState,
    audio: &mut AudioTrigger,
    high_score: &mut HighScoreGuard,
    shutdown: &ShutdownFlag,
) -> Result<()> {
    let view = GameView::default();
    let mut input_handler = InputHandler::new().with_key_releases(term.reports_key_releases());
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        if shutdown.is_set() {
            log::info!("terminated by signal");
            return Ok(());
        }

        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        game_state.snapshot_into(&mut snap);
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.present(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        log::info!("quit requested");
                        return Ok(());
                    }
                    if let Some(action) = input_handler.handle_key(key) {
                        if game_state.apply_action(action) && action == GameAction::Restart {
                            input_handler.reset();
                            audio.restart_music();
                        }
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();

            input_handler.update(TICK_MS);
            game_state.tick(TICK_MS, input_handler.soft_drop_held());
            high_score.record(game_state.high_score());
        }

        audio.trigger_all(game_state.take_sound_events());
    }
}
