//! Terminal tile-swap runner (default binary).
//!
//! crossterm supplies keyboard and mouse input; frames go through the
//! framebuffer renderer in `tile-swap-term`. Diagnostics use `log` and are off
//! unless `RUST_LOG` is set (redirect stderr, the screen is in raw mode).

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};

use tile_swap::config::AppConfig;
use tile_swap::core::{Catalog, GameSnapshot, GameState, RestoreOutcome};
use tile_swap::input::{handle_key_event, should_quit};
use tile_swap::store::{EventLog, JsonFileStore, Leaderboard, LeaderboardEntry};
use tile_swap::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use tile_swap::types::{CoreEvent, PuzzleAction};

const FRAME_MS: u64 = 50;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = AppConfig::from_env().apply_args(&args)?;
    let mut app = App::new(config)?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = app.run(&mut term);

    // Always try to restore terminal state.
    let _ = term.exit();
    app.save();
    result
}

struct App {
    config: AppConfig,
    game: GameState,
    store: Option<JsonFileStore>,
    leaderboard: Leaderboard,
    event_log: EventLog,
    dropped_seen: u32,
}

impl App {
    fn new(config: AppConfig) -> Result<Self> {
        let game_config = config.game_config();
        let mut store = config.save_path.as_ref().map(JsonFileStore::new);

        let (mut game, outcome) = match store.as_mut() {
            Some(store) => GameState::load_from(game_config, Catalog::builtin(), store)?,
            None => (GameState::new(game_config)?, RestoreOutcome::Fresh),
        };
        match outcome {
            RestoreOutcome::Fresh => log::info!("starting a fresh run"),
            RestoreOutcome::Restored { board_kept } => log::info!(
                "restored run at level {} (board kept: {})",
                game.run().level,
                board_kept
            ),
            RestoreOutcome::Discarded(err) => log::warn!("discarded saved run: {}", err),
            RestoreOutcome::LoadFailed(err) => log::warn!("could not load saved run: {}", err),
        }
        game.start();

        let leaderboard = match &config.leaderboard_path {
            Some(path) => Leaderboard::open(path).unwrap_or_else(|e| {
                log::warn!("leaderboard unavailable: {:#}", e);
                Leaderboard::new()
            }),
            None => Leaderboard::new(),
        };

        let event_log = match &config.log_path {
            Some(path) => EventLog::open(path).unwrap_or_else(|e| {
                log::warn!("event log unavailable: {:#}", e);
                EventLog::disabled()
            }),
            None => EventLog::disabled(),
        };

        Ok(Self {
            config,
            game,
            store,
            leaderboard,
            event_log,
            dropped_seen: 0,
        })
    }

    fn run(&mut self, term: &mut TerminalRenderer) -> Result<()> {
        let view = GameView::default();
        let mut snap = GameSnapshot::default();
        let mut fb = FrameBuffer::new(0, 0);
        let mut last_tick = Instant::now();

        loop {
            // Render.
            let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
            let viewport = Viewport::new(w, h);
            self.game.snapshot_into(&mut snap);
            view.render_into(&snap, viewport, &mut fb);
            term.draw_swap(&mut fb)?;

            if event::poll(Duration::from_millis(FRAME_MS))? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        if should_quit(key) {
                            return Ok(());
                        }
                        if let Some(action) = handle_key_event(key) {
                            self.apply(action);
                        }
                    }
                    Event::Mouse(mouse) => {
                        let position = view.layout(&snap, viewport).position_at(mouse.column, mouse.row);
                        self.pointer(mouse, position);
                    }
                    Event::Resize(_, _) => term.invalidate(),
                    _ => {}
                }
            }

            // Tick.
            let elapsed = last_tick.elapsed();
            last_tick = Instant::now();
            self.game.tick(elapsed.as_millis().min(u32::MAX as u128) as u32);

            self.drain_events();
        }
    }

    fn apply(&mut self, action: PuzzleAction) {
        // Select doubles as "continue" on result screens.
        let action = match action {
            PuzzleAction::Select if self.game.run().status.is_result() => PuzzleAction::Continue,
            other => other,
        };
        if self.game.apply_action(action) && action == PuzzleAction::Restart {
            log::info!("run restarted (episode {})", self.game.episode_id());
            self.save();
        }
    }

    /// Press picks a tile up (or drops a held one), release over another slot
    /// drops it. Releasing over the tile's own slot keeps it held, so click then
    /// click works as well as dragging.
    fn pointer(&mut self, mouse: MouseEvent, position: Option<u16>) {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => match (self.game.held_piece(), position) {
                (Some(_), Some(target)) => {
                    self.game.drop_at(target);
                }
                (Some(_), None) => {
                    self.game.cancel_drag();
                }
                (None, Some(at)) => {
                    self.game.pick_up_at(at);
                }
                (None, None) => {}
            },
            MouseEventKind::Up(MouseButton::Left) => {
                let Some(held) = self.game.held_piece() else {
                    return;
                };
                let origin = self.game.board().piece(held).map(|p| p.current_position);
                match position {
                    Some(target) if Some(target) != origin => {
                        self.game.drop_at(target);
                    }
                    Some(_) => {}
                    None => {
                        self.game.cancel_drag();
                    }
                }
            }
            MouseEventKind::Down(MouseButton::Right) => {
                self.game.cancel_drag();
            }
            _ => {}
        }
    }

    fn drain_events(&mut self) {
        let dropped = self.game.dropped_events();
        if dropped > self.dropped_seen {
            log::warn!("{} events lost to a full queue", dropped - self.dropped_seen);
            self.dropped_seen = dropped;
        }

        let events = self.game.take_events();
        if events.is_empty() {
            return;
        }

        let ts = now_ms();
        for event in &events {
            self.event_log.append(event, ts);
            match *event {
                CoreEvent::LevelCompleted {
                    score,
                    level,
                    completion_time,
                    rating,
                } => {
                    log::info!(
                        "level {} solved in {}s: {} ({} points)",
                        level,
                        completion_time,
                        rating.as_str(),
                        score
                    );
                    self.record_score(event, ts);
                }
                CoreEvent::LevelFailed {
                    level,
                    consecutive_failures,
                    timed_out,
                } => log::info!(
                    "level {} failed (timed out: {}, {} in a row)",
                    level,
                    timed_out,
                    consecutive_failures
                ),
                CoreEvent::ProgressReset { reached_level } => {
                    log::info!("progress reset after reaching level {}", reached_level)
                }
                CoreEvent::PuzzleCompleted { .. } => log::debug!("{}", event.kind()),
            }
        }
        self.save();
    }

    fn record_score(&mut self, event: &CoreEvent, ts: u64) {
        let Some(entry) = LeaderboardEntry::from_event(&self.config.player, event, ts) else {
            return;
        };
        if let Some(rank) = self.leaderboard.submit(entry) {
            log::info!("leaderboard rank {}", rank + 1);
            if let Err(e) = self.leaderboard.save() {
                log::warn!("failed to save leaderboard: {:#}", e);
            }
        }
    }

    fn save(&mut self) {
        let Some(store) = self.store.as_mut() else {
            return;
        };
        if let Err(e) = self.game.save_to(store) {
            log::warn!("failed to save run: {:#}", e);
        }
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
