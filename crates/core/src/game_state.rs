//! Game state module - the run state machine
//!
//! Ties together the board, the RNG, the image catalog and the scoring rules. It
//! owns the drag phase, the per-second countdown, the preview window and level
//! progression. All mutation goes through `&mut self`, so moves, ticks and
//! previews never interleave.

use arrayvec::ArrayVec;

use crate::board::{Board, MoveResult};
use crate::catalog::{Catalog, ImageProvider};
use crate::config::GameConfig;
use crate::error::PuzzleError;
use crate::persist::{RestoreOutcome, RunStore, SavedRun};
use crate::rng::SimpleRng;
use crate::scoring::{evaluate, time_budget_for_level, ScoreResult};
use crate::snapshot::{GameSnapshot, TileSnapshot};
use crate::types::*;

/// Pending events kept before the oldest is dropped.
const EVENT_CAPACITY: usize = 16;

/// Reshuffles attempted when a shuffle happens to come out solved.
const MAX_RESHUFFLES: usize = 16;

/// Pointer interaction phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragPhase {
    #[default]
    Idle,
    /// A piece is held and follows the pointer.
    Dragging { piece_id: u16 },
    /// The board was just completed and waits for [`GameState::resolve_level`].
    Resolving,
}

/// Persisted progress of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunState {
    /// 1-based.
    pub level: u32,
    pub time_budget: u32,
    pub time_remaining: u32,
    pub incorrect_moves: u32,
    /// Moves made on the current board.
    pub moves: u32,
    pub preview_points: u32,
    pub previews_used: u32,
    /// Leaderboard score of the last resolved level.
    pub level_score: u32,
    /// Sum of score deltas over the run.
    pub total_score: u32,
    pub consecutive_failures: u32,
    /// Cyclic index into the image provider.
    pub image_index: usize,
    pub status: Status,
    pub last_rating: Option<Rating>,
}

impl RunState {
    pub fn new(base_time_secs: u32, first_image: usize) -> Self {
        let budget = time_budget_for_level(base_time_secs, 1);
        Self {
            level: 1,
            time_budget: budget,
            time_remaining: budget,
            incorrect_moves: 0,
            moves: 0,
            preview_points: INITIAL_PREVIEW_POINTS,
            previews_used: 0,
            level_score: 0,
            total_score: 0,
            consecutive_failures: 0,
            image_index: first_image,
            status: Status::Playing,
            last_rating: None,
        }
    }

    fn validate(&self) -> Result<(), PuzzleError> {
        if self.level == 0 {
            return Err(PuzzleError::corrupt("level must be at least 1"));
        }
        if self.time_budget == 0 {
            return Err(PuzzleError::corrupt("time budget is zero"));
        }
        if self.time_remaining > self.time_budget {
            return Err(PuzzleError::corrupt(format!(
                "time remaining {} exceeds budget {}",
                self.time_remaining, self.time_budget
            )));
        }
        Ok(())
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState<P: ImageProvider = Catalog> {
    config: GameConfig,
    images: P,
    rng: SimpleRng,
    run: RunState,
    board: Board,
    drag: DragPhase,
    /// Keyboard selection, a board position.
    cursor: u16,
    started: bool,
    paused: bool,
    /// Milliseconds not yet converted into a countdown second.
    tick_accum_ms: u32,
    preview_ms_left: u32,
    /// Monotonic run id (increments on restart).
    episode_id: u32,
    events: ArrayVec<CoreEvent, EVENT_CAPACITY>,
    /// Events pushed out of a full queue before the host drained them.
    dropped_events: u32,
}

impl GameState<Catalog> {
    /// New run over the built-in image catalog.
    pub fn new(config: GameConfig) -> Result<Self, PuzzleError> {
        Self::with_images(config, Catalog::builtin())
    }
}

impl<P: ImageProvider> GameState<P> {
    pub fn with_images(config: GameConfig, images: P) -> Result<Self, PuzzleError> {
        config.validate()?;
        if images.is_empty() {
            return Err(PuzzleError::config("image provider has no images"));
        }

        let mut rng = SimpleRng::new(config.seed);
        let run = RunState::new(config.base_time_secs, config.first_image % images.len());
        let board = deal_board(&config, images.image_at(run.image_index), &mut rng)?;

        Ok(Self {
            config,
            images,
            rng,
            run,
            board,
            drag: DragPhase::Idle,
            cursor: 0,
            started: false,
            paused: false,
            tick_accum_ms: 0,
            preview_ms_left: 0,
            episode_id: 0,
            events: ArrayVec::new(),
            dropped_events: 0,
        })
    }

    /// Start from `saved` if it is usable, otherwise from a fresh run.
    ///
    /// Only a bad `config` is an error. A corrupted save is reported through
    /// [`RestoreOutcome::Discarded`] and the fresh run is returned.
    pub fn restore(
        config: GameConfig,
        images: P,
        saved: Option<SavedRun>,
    ) -> Result<(Self, RestoreOutcome), PuzzleError> {
        let mut game = Self::with_images(config, images)?;
        let Some(saved) = saved else {
            return Ok((game, RestoreOutcome::Fresh));
        };

        let outcome = match game.adopt(saved) {
            Ok(board_kept) => RestoreOutcome::Restored { board_kept },
            Err(err) => RestoreOutcome::Discarded(err),
        };
        Ok((game, outcome))
    }

    /// Like [`GameState::restore`], reading the save from `store`. A failing
    /// store counts as "nothing saved".
    pub fn load_from<S: RunStore>(
        config: GameConfig,
        images: P,
        store: &mut S,
    ) -> Result<(Self, RestoreOutcome), PuzzleError> {
        match store.load() {
            Ok(saved) => Self::restore(config, images, saved),
            Err(err) => {
                let game = Self::with_images(config, images)?;
                Ok((game, RestoreOutcome::LoadFailed(err.to_string())))
            }
        }
    }

    /// Validate and install a saved run. Leaves `self` untouched on error.
    fn adopt(&mut self, saved: SavedRun) -> Result<bool, PuzzleError> {
        let mut run = saved.run;
        run.validate()?;
        run.image_index %= self.images.len();

        let board_kept = saved.grid_size == self.config.grid_size;
        let board = if board_kept {
            let board = Board::from_pieces(saved.grid_size, &saved.pieces)?;
            match run.status {
                Status::Completed if !board.is_complete() => {
                    return Err(PuzzleError::corrupt("completed run with an unsolved board"));
                }
                Status::Playing if board.is_complete() => {
                    return Err(PuzzleError::corrupt("playing run with a solved board"));
                }
                _ => {}
            }
            board
        } else {
            let image = self.images.image_at(run.image_index);
            deal_board(&self.config, image, &mut self.rng)?
        };

        self.run = run;
        self.board = board;
        self.drag = if run.status == Status::Completed {
            DragPhase::Resolving
        } else {
            DragPhase::Idle
        };
        self.cursor = 0;
        self.tick_accum_ms = 0;
        self.preview_ms_left = 0;
        self.paused = false;

        if self.run.status == Status::Playing && self.run.time_remaining == 0 {
            self.fail_level(true);
        }
        Ok(board_kept)
    }

    /// Start the countdown.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        self.tick_accum_ms = 0;
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    /// Total events lost to a full queue since the game was built.
    pub fn dropped_events(&self) -> u32 {
        self.dropped_events
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn images(&self) -> &P {
        &self.images
    }

    pub fn run(&self) -> &RunState {
        &self.run
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn drag(&self) -> DragPhase {
        self.drag
    }

    pub fn held_piece(&self) -> Option<u16> {
        match self.drag {
            DragPhase::Dragging { piece_id } => Some(piece_id),
            _ => None,
        }
    }

    pub fn cursor(&self) -> u16 {
        self.cursor
    }

    pub fn preview_active(&self) -> bool {
        self.preview_ms_left > 0
    }

    pub fn preview_ms_left(&self) -> u32 {
        self.preview_ms_left
    }

    /// Moves, drags and previews are only honoured while this holds.
    pub fn accepts_input(&self) -> bool {
        self.started
            && !self.paused
            && self.run.status == Status::Playing
            && self.drag != DragPhase::Resolving
    }

    #[cfg(test)]
    pub(crate) fn run_mut(&mut self) -> &mut RunState {
        &mut self.run
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        let len = self.board.len();
        for position in 0..len {
            out.tiles[position] = match self.board.piece_at(position as u16) {
                Some(piece) => TileSnapshot {
                    piece_id: piece.id,
                    correct_position: piece.correct_position,
                    correct: piece.is_correct(),
                },
                None => TileSnapshot::default(),
            };
        }
        for tile in &mut out.tiles[len..] {
            *tile = TileSnapshot::default();
        }

        out.grid_size = self.board.grid_size();
        out.tile_count = len as u16;
        out.correct_count = self.board.correct_count();
        out.cursor = self.cursor;
        out.held = self.held_piece();
        out.resolving = self.drag == DragPhase::Resolving;
        out.image = self.board.image();
        out.image_index = self.run.image_index;
        out.level = self.run.level;
        out.time_budget = self.run.time_budget;
        out.time_remaining = self.run.time_remaining;
        out.incorrect_moves = self.run.incorrect_moves;
        out.moves = self.run.moves;
        out.preview_points = self.run.preview_points;
        out.previews_used = self.run.previews_used;
        out.preview_ms_left = self.preview_ms_left;
        out.level_score = self.run.level_score;
        out.total_score = self.run.total_score;
        out.consecutive_failures = self.run.consecutive_failures;
        out.status = self.run.status;
        out.last_rating = self.run.last_rating;
        out.started = self.started;
        out.paused = self.paused;
        out.episode_id = self.episode_id;
        out.dropped_events = self.dropped_events;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Drain queued events, oldest first.
    pub fn take_events(&mut self) -> ArrayVec<CoreEvent, EVENT_CAPACITY> {
        std::mem::take(&mut self.events)
    }

    fn push_event(&mut self, event: CoreEvent) {
        if self.events.is_full() {
            self.events.remove(0);
            self.dropped_events = self.dropped_events.saturating_add(1);
        }
        self.events.push(event);
    }

    /// Begin dragging `piece_id`. No board mutation.
    pub fn pick_up(&mut self, piece_id: u16) -> bool {
        if !self.accepts_input() || self.drag != DragPhase::Idle {
            return false;
        }
        if self.board.piece(piece_id).is_none() {
            return false;
        }
        self.drag = DragPhase::Dragging { piece_id };
        true
    }

    /// Begin dragging whatever sits at `position`.
    pub fn pick_up_at(&mut self, position: u16) -> bool {
        match self.board.piece_at(position) {
            Some(piece) => {
                let id = piece.id;
                self.pick_up(id)
            }
            None => false,
        }
    }

    /// Release the held piece over `target`. The drag always ends; the move is
    /// applied only if it is valid.
    pub fn drop_at(&mut self, target: u16) -> Option<MoveResult> {
        let DragPhase::Dragging { piece_id } = self.drag else {
            return None;
        };
        self.drag = DragPhase::Idle;
        self.apply_move(piece_id, target)
    }

    pub fn cancel_drag(&mut self) -> bool {
        if matches!(self.drag, DragPhase::Dragging { .. }) {
            self.drag = DragPhase::Idle;
            return true;
        }
        false
    }

    /// Swap `piece_id` with the occupant of `target` and account for it.
    ///
    /// An incorrect placement costs a mistake and 10 seconds. A penalty that
    /// empties the clock fails the level as a timeout.
    pub fn apply_move(&mut self, piece_id: u16, target: u16) -> Option<MoveResult> {
        if !self.accepts_input() {
            return None;
        }
        let result = self.board.apply_move(piece_id, target)?;
        if matches!(self.drag, DragPhase::Dragging { .. }) {
            self.drag = DragPhase::Idle;
        }

        self.run.moves += 1;
        if !result.was_correct {
            self.run.incorrect_moves += 1;
            self.run.time_remaining = self.run.time_remaining.saturating_sub(TIME_PENALTY_SECS);
        }

        if result.completed {
            self.drag = DragPhase::Resolving;
            self.run.status = Status::Completed;
            self.tick_accum_ms = 0;
            self.preview_ms_left = 0;
            self.push_event(CoreEvent::PuzzleCompleted {
                level: self.run.level,
                moves: self.run.moves,
            });
        } else if self.run.time_remaining == 0 {
            self.fail_level(true);
        }

        Some(result)
    }

    /// Score a completed board and move the run on.
    ///
    /// Returns `None` when no completion is pending.
    pub fn resolve_level(&mut self) -> Option<ScoreResult> {
        if self.drag != DragPhase::Resolving {
            return None;
        }
        self.drag = DragPhase::Idle;

        let result = evaluate(
            self.run.time_remaining,
            self.run.time_budget,
            self.run.incorrect_moves,
        );
        self.run.last_rating = Some(result.rating);
        self.run.level_score = result.level_score;
        self.push_event(CoreEvent::LevelCompleted {
            score: result.level_score,
            level: self.run.level,
            completion_time: self.run.time_budget.saturating_sub(self.run.time_remaining),
            rating: result.rating,
        });

        if result.rating.is_pass() {
            self.advance_level(&result);
        } else {
            self.fail_level(false);
        }
        Some(result)
    }

    fn advance_level(&mut self, result: &ScoreResult) {
        let run = &mut self.run;
        run.level += 1;
        run.incorrect_moves = 0;
        run.moves = 0;
        run.time_budget = time_budget_for_level(self.config.base_time_secs, run.level);
        run.time_remaining = run.time_budget;
        run.consecutive_failures = 0;
        run.total_score = run.total_score.saturating_add(result.score_delta);
        run.image_index = self.images.next_image(run.image_index);
        run.status = Status::from(result.rating);

        self.deal_next_board();
    }

    /// Record a failed level. Three in a row wipe the run.
    fn fail_level(&mut self, timed_out: bool) {
        self.run.consecutive_failures += 1;
        let level = self.run.level;
        self.push_event(CoreEvent::LevelFailed {
            level,
            consecutive_failures: self.run.consecutive_failures,
            timed_out,
        });

        let status = if timed_out {
            Status::Failed
        } else {
            Status::TryAgain
        };

        if self.run.consecutive_failures >= MAX_CONSECUTIVE_FAILURES {
            let last_rating = self.run.last_rating;
            self.run = RunState::new(
                self.config.base_time_secs,
                self.config.first_image % self.images.len(),
            );
            self.run.last_rating = last_rating;
            self.push_event(CoreEvent::ProgressReset {
                reached_level: level,
            });
        } else {
            self.run.incorrect_moves = 0;
            self.run.moves = 0;
            self.run.time_remaining = self.run.time_budget;
        }
        self.run.status = status;

        self.deal_next_board();
    }

    fn deal_next_board(&mut self) {
        let image = self.images.image_at(self.run.image_index);
        // The grid was validated at construction, so dealing cannot fail.
        if let Ok(board) = deal_board(&self.config, image, &mut self.rng) {
            self.board = board;
        }
        self.drag = DragPhase::Idle;
        self.tick_accum_ms = 0;
        self.preview_ms_left = 0;
    }

    /// Advance the clock by `elapsed_ms`.
    ///
    /// A pending completion is resolved first. The countdown only runs while the
    /// run is started, unpaused and playing. Returns whether anything visible
    /// changed.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if !self.started || self.paused {
            return false;
        }
        if self.drag == DragPhase::Resolving {
            self.resolve_level();
            return true;
        }
        if self.run.status != Status::Playing {
            return false;
        }

        let mut changed = false;
        if self.preview_ms_left > 0 {
            self.preview_ms_left = self.preview_ms_left.saturating_sub(elapsed_ms);
            changed |= self.preview_ms_left == 0;
        }

        self.tick_accum_ms = self.tick_accum_ms.saturating_add(elapsed_ms);
        while self.tick_accum_ms >= TICK_MS {
            self.tick_accum_ms -= TICK_MS;
            self.run.time_remaining = self.run.time_remaining.saturating_sub(1);
            changed = true;
            if self.run.time_remaining == 0 {
                self.fail_level(true);
                break;
            }
        }
        changed
    }

    /// Spend a preview point to show the solved image for five seconds.
    pub fn request_preview(&mut self) -> bool {
        if !self.accepts_input() || self.preview_ms_left > 0 || self.run.preview_points == 0 {
            return false;
        }
        self.run.preview_points -= 1;
        self.run.previews_used += 1;
        self.preview_ms_left = PREVIEW_DURATION_MS;
        true
    }

    /// Leave a result screen and play the prepared board.
    pub fn continue_run(&mut self) -> bool {
        if !self.run.status.is_result() {
            return false;
        }
        self.run.status = Status::Playing;
        self.tick_accum_ms = 0;
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        if !self.started {
            return false;
        }
        self.paused = !self.paused;
        self.tick_accum_ms = 0;
        true
    }

    /// Throw the run away and start over at level 1.
    pub fn restart(&mut self) {
        self.run = RunState::new(
            self.config.base_time_secs,
            self.config.first_image % self.images.len(),
        );
        self.deal_next_board();
        self.cursor = 0;
        self.paused = false;
        self.events.clear();
        self.episode_id = self.episode_id.wrapping_add(1);
        self.start();
    }

    fn move_cursor(&mut self, dx: i8, dy: i8) -> bool {
        let grid = self.board.grid_size() as i16;
        let col = self.cursor as i16 % grid + dx as i16;
        let row = self.cursor as i16 / grid + dy as i16;
        if col < 0 || col >= grid || row < 0 || row >= grid {
            return false;
        }
        self.cursor = (row * grid + col) as u16;
        true
    }

    /// Apply one discrete action. Returns whether it had an effect.
    pub fn apply_action(&mut self, action: PuzzleAction) -> bool {
        match action {
            PuzzleAction::CursorLeft => self.move_cursor(-1, 0),
            PuzzleAction::CursorRight => self.move_cursor(1, 0),
            PuzzleAction::CursorUp => self.move_cursor(0, -1),
            PuzzleAction::CursorDown => self.move_cursor(0, 1),
            PuzzleAction::Select => {
                if self.held_piece().is_some() {
                    self.drop_at(self.cursor);
                    true
                } else {
                    self.pick_up_at(self.cursor)
                }
            }
            PuzzleAction::CancelDrag => self.cancel_drag(),
            PuzzleAction::Preview => self.request_preview(),
            PuzzleAction::Pause => self.toggle_pause(),
            PuzzleAction::Continue => self.continue_run(),
            PuzzleAction::Restart => {
                self.restart();
                true
            }
        }
    }

    pub fn saved_run(&self) -> SavedRun {
        SavedRun {
            grid_size: self.board.grid_size(),
            run: self.run,
            pieces: self.board.pieces().to_vec(),
        }
    }

    pub fn save_to<S: RunStore>(&self, store: &mut S) -> Result<(), S::Error> {
        store.save(&self.saved_run())
    }
}

/// Shuffle a new board for `image`, avoiding an already solved layout.
fn deal_board(
    config: &GameConfig,
    image: ImageRef,
    rng: &mut SimpleRng,
) -> Result<Board, PuzzleError> {
    let mut board = Board::shuffled(config.grid_size, image, rng, config.policy)?;
    for _ in 0..MAX_RESHUFFLES {
        if !board.is_complete() {
            break;
        }
        board = Board::shuffled(config.grid_size, image, rng, config.policy)?;
    }
    Ok(board)
}
