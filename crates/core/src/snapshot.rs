use crate::types::{ImageRef, Rating, Status, MAX_PIECES};

/// One board slot as seen by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TileSnapshot {
    pub piece_id: u16,
    /// Where the occupying piece belongs (selects the image tile to draw).
    pub correct_position: u16,
    pub correct: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub grid_size: u8,
    /// Indexed by position; only the first `tile_count` entries are meaningful.
    pub tiles: [TileSnapshot; MAX_PIECES],
    pub tile_count: u16,
    pub correct_count: u16,
    pub cursor: u16,
    pub held: Option<u16>,
    pub resolving: bool,
    pub image: ImageRef,
    pub image_index: usize,
    pub level: u32,
    pub time_budget: u32,
    pub time_remaining: u32,
    pub incorrect_moves: u32,
    pub moves: u32,
    pub preview_points: u32,
    pub previews_used: u32,
    pub preview_ms_left: u32,
    pub level_score: u32,
    pub total_score: u32,
    pub consecutive_failures: u32,
    pub status: Status,
    pub last_rating: Option<Rating>,
    pub started: bool,
    pub paused: bool,
    pub episode_id: u32,
    /// Events lost to a full queue; nonzero means the host drains too rarely.
    pub dropped_events: u32,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.grid_size = 0;
        self.tiles = [TileSnapshot::default(); MAX_PIECES];
        self.tile_count = 0;
        self.correct_count = 0;
        self.cursor = 0;
        self.held = None;
        self.resolving = false;
        self.image = ImageRef::default();
        self.image_index = 0;
        self.level = 1;
        self.time_budget = 0;
        self.time_remaining = 0;
        self.incorrect_moves = 0;
        self.moves = 0;
        self.preview_points = 0;
        self.previews_used = 0;
        self.preview_ms_left = 0;
        self.level_score = 0;
        self.total_score = 0;
        self.consecutive_failures = 0;
        self.status = Status::Playing;
        self.last_rating = None;
        self.started = false;
        self.paused = false;
        self.episode_id = 0;
        self.dropped_events = 0;
    }

    pub fn tiles(&self) -> &[TileSnapshot] {
        &self.tiles[..self.tile_count as usize]
    }

    pub fn tile_at(&self, position: u16) -> Option<&TileSnapshot> {
        self.tiles().get(position as usize)
    }

    pub fn preview_active(&self) -> bool {
        self.preview_ms_left > 0
    }

    pub fn playable(&self) -> bool {
        self.started && !self.paused && self.status.is_active() && !self.resolving
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let mut s = Self {
            grid_size: 0,
            tiles: [TileSnapshot::default(); MAX_PIECES],
            tile_count: 0,
            correct_count: 0,
            cursor: 0,
            held: None,
            resolving: false,
            image: ImageRef::default(),
            image_index: 0,
            level: 1,
            time_budget: 0,
            time_remaining: 0,
            incorrect_moves: 0,
            moves: 0,
            preview_points: 0,
            previews_used: 0,
            preview_ms_left: 0,
            level_score: 0,
            total_score: 0,
            consecutive_failures: 0,
            status: Status::Playing,
            last_rating: None,
            started: false,
            paused: false,
            episode_id: 0,
            dropped_events: 0,
        };
        s.clear();
        s
    }
}
