//! Terminal runner for the two-player duel (default binary).
//!
//! Both players share one keyboard: player one answers with `Q W E R`,
//! player two with `U I O P`.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{bail, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use log::{debug, info};

use speed_duel::core::{DuelError, RoundSnapshot};
use speed_duel::engine::{DirectorySource, GameConfig, GameSetup, QuestionSource, Session};
use speed_duel::input::{is_back_key, is_rematch_key, route_key, should_quit};
use speed_duel::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use speed_duel::types::{Difficulty, DEFAULT_PLAYER_COLORS, DEFAULT_PLAYER_NAMES, TICK_MS};

#[derive(Parser, Debug)]
#[command(name = "speed-duel", about = "Two-player math quiz duel on one keyboard")]
struct Cli {
    /// Skill id to play (a file under <data-dir>/questions/)
    #[arg(long)]
    skill: Option<String>,
    /// easy, medium or hard
    #[arg(long, default_value = "medium")]
    difficulty: String,
    #[arg(long, default_value = DEFAULT_PLAYER_NAMES[0])]
    p1: String,
    #[arg(long, default_value = DEFAULT_PLAYER_NAMES[1])]
    p2: String,
    #[arg(long, default_value = DEFAULT_PLAYER_COLORS[0])]
    p1_color: String,
    #[arg(long, default_value = DEFAULT_PLAYER_COLORS[1])]
    p2_color: String,
    /// Overrides SPEED_DUEL_DATA_DIR
    #[arg(long)]
    data_dir: Option<PathBuf>,
    /// Overrides SPEED_DUEL_SEED
    #[arg(long)]
    seed: Option<u64>,
    /// Print the skills of a group and exit
    #[arg(long, value_name = "GROUP")]
    list: Option<String>,
}

enum Flow {
    Continue,
    Quit,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = GameConfig::from_env();
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    let source = DirectorySource::new(config.data_dir.clone());

    if let Some(group) = cli.list {
        return list_skills(&source, &group);
    }

    let Some(skill) = cli.skill else {
        bail!("no skill given; pass --skill <id> (see --list <group>)");
    };
    let difficulty = Difficulty::from_str(&cli.difficulty)
        .ok_or_else(|| DuelError::UnknownDifficulty(cli.difficulty.clone()))?;
    let setup = GameSetup::new(skill, difficulty)
        .with_names(cli.p1, cli.p2)
        .with_colors(cli.p1_color, cli.p2_color);

    let mut session = Session::new(source, config);
    // Start before touching the terminal so feed errors print normally.
    session.start(setup)?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut session);

    // Always try to restore terminal state.
    let _ = term.exit();
    session.back_to_setup();
    result
}

fn list_skills(source: &DirectorySource, group: &str) -> Result<()> {
    let catalog = source.load_catalog()?;
    match catalog.skills(group) {
        Some(skills) => {
            for skill in skills {
                println!("{}", skill);
            }
            Ok(())
        }
        None => {
            let known: Vec<&str> = catalog.groups().collect();
            bail!("unknown group {:?}; known groups: {}", group, known.join(", "))
        }
    }
}

fn run<S: QuestionSource>(term: &mut TerminalRenderer, session: &mut Session<S>) -> Result<()> {
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = RoundSnapshot::default();

    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();

    loop {
        let Some(round) = session.round() else {
            return Ok(());
        };

        // Render.
        round.snapshot_into(&mut snap);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snap, session.title(), Viewport::new(w, h), &mut fb);
        term.present(&fb)?;

        // Input with timeout until next tick; drain whatever else arrived.
        let mut timeout = tick_duration.saturating_sub(last_tick.elapsed());
        while event::poll(timeout)? {
            timeout = Duration::ZERO;
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if let Flow::Quit = handle_key(session, key)? {
                        return Ok(());
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            if let Some(round) = session.round_mut() {
                for event in round.tick(TICK_MS) {
                    debug!("{:?}", event);
                }
            }
        }
    }
}

fn handle_key<S: QuestionSource>(session: &mut Session<S>, key: KeyEvent) -> Result<Flow> {
    if should_quit(key) {
        return Ok(Flow::Quit);
    }
    if is_back_key(key) {
        session.back_to_setup();
        return Ok(Flow::Quit);
    }

    let finished = session
        .round()
        .map_or(true, |round| round.status().is_finished());
    if finished {
        if is_rematch_key(key) {
            info!("rematch");
            session.rematch()?;
        }
        return Ok(Flow::Continue);
    }

    if let (Some(submission), Some(round)) = (route_key(key), session.round_mut()) {
        let outcome = round.submit(submission.player, submission.option);
        debug!("{:?} -> {:?}", submission, outcome);
    }
    Ok(Flow::Continue)
}
