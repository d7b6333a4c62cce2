/// Game entity types. Plain data with geometry accessors and no game logic.
///
/// Coordinates are play-area units with the origin at the top-left corner
/// and `y` growing downward.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the first action.
    Idle,
    Playing,
    /// Halted until the next action restarts play.
    GameOver,
}

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Rect { x, y, width, height }
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Edge-exclusive AABB test: rectangles that merely touch do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

// ── Bird ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Bird {
    /// Fixed for the life of the bird; the pipes move, not the bird.
    pub x: f32,
    pub y: f32,
    /// Positive = falling.
    pub velocity_y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bird {
    /// A bird at rest, vertically centred in a play area of `play_height`.
    pub fn centered(x: f32, width: f32, height: f32, play_height: f32) -> Self {
        Bird {
            x,
            y: (play_height - height) / 2.0,
            velocity_y: 0.0,
            width,
            height,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

// ── Obstacles ─────────────────────────────────────────────────────────────────

/// A top/bottom pipe pair with a fixed-height gap between them.
#[derive(Clone, Debug, PartialEq)]
pub struct Obstacle {
    /// Left edge.
    pub x: f32,
    pub width: f32,
    /// Bottom edge of the top pipe.
    pub gap_top: f32,
    /// Top edge of the bottom pipe.
    pub gap_bottom: f32,
    /// Set once the pipe is fully behind the bird.
    pub passed: bool,
}

impl Obstacle {
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn gap_height(&self) -> f32 {
        self.gap_bottom - self.gap_top
    }

    /// The top pipe, from the ceiling down to the gap.
    pub fn top_rect(&self) -> Rect {
        Rect::new(self.x, 0.0, self.width, self.gap_top)
    }

    /// The bottom pipe, from the gap down to the floor.
    pub fn bottom_rect(&self, play_height: f32) -> Rect {
        Rect::new(
            self.x,
            self.gap_bottom,
            self.width,
            play_height - self.gap_bottom,
        )
    }
}

// ── Render view ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct ObstacleView {
    pub top: Rect,
    pub bottom: Rect,
    pub passed: bool,
}

/// Owned, read-only copy of everything a renderer needs for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub phase: Phase,
    pub score: u32,
    /// Best score seen since the process started (memory only).
    pub best_score: u32,
    pub bird: Rect,
    /// Wing animation frame, 0..3.
    pub wing_frame: u8,
    /// Left-to-right, same order as the stream.
    pub obstacles: Vec<ObstacleView>,
    pub play_width: f32,
    pub play_height: f32,
}
