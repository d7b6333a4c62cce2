/// Terminal rendering. Every piece of terminal I/O in the game lives here.
///
/// Each function receives a mutable writer and a read-only [`Snapshot`].
/// No game logic is performed; this module only scales play-area
/// rectangles onto terminal cells and queues the drawing commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use flappy_game::entities::{Phase, Rect, Snapshot};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_BEST: Color = Color::DarkYellow;
const C_BIRD: Color = Color::Yellow;
const C_PIPE: Color = Color::Green;
const C_PIPE_PASSED: Color = Color::DarkGreen;
const C_HINT: Color = Color::DarkGrey;

/// Terminal cells are roughly twice as tall as they are wide.
const CELL_ASPECT: f32 = 2.0;

/// Wing glyphs, indexed by `Snapshot::wing_frame`.
const WING_GLYPHS: [char; 3] = ['^', '-', 'v'];

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Maps play-area units onto a block of terminal cells, preserving the
/// play area's aspect ratio.
struct Viewport {
    left: u16,
    top: u16,
    cols: u16,
    rows: u16,
    units_per_row: f32,
}

impl Viewport {
    /// Fit the play area below the HUD row and above the hint row.
    fn fit(snapshot: &Snapshot, term_width: u16, term_height: u16) -> Self {
        let avail_cols = term_width.saturating_sub(2).max(1) as f32;
        let avail_rows = term_height.saturating_sub(4).max(1) as f32;
        let units_per_row = (snapshot.play_height / avail_rows)
            .max(snapshot.play_width * CELL_ASPECT / avail_cols);
        let cols = (snapshot.play_width * CELL_ASPECT / units_per_row).floor() as u16;
        let rows = (snapshot.play_height / units_per_row).floor() as u16;
        Viewport {
            left: 1 + (avail_cols as u16).saturating_sub(cols) / 2,
            top: 2,
            cols: cols.max(1),
            rows: rows.max(1),
            units_per_row,
        }
    }

    fn col(&self, x: f32) -> i32 {
        (x * CELL_ASPECT / self.units_per_row).round() as i32
    }

    fn row(&self, y: f32) -> i32 {
        (y / self.units_per_row).round() as i32
    }

    /// Cell span `(col, row, width, height)` covered by `rect`, clipped to
    /// the viewport.  `None` when nothing is visible.
    fn cells(&self, rect: &Rect) -> Option<(u16, u16, u16, u16)> {
        let c0 = self.col(rect.left()).max(0);
        let c1 = self.col(rect.right()).min(self.cols as i32);
        let r0 = self.row(rect.top()).max(0);
        let r1 = self.row(rect.bottom()).min(self.rows as i32);
        if c1 <= c0 || r1 <= r0 {
            return None;
        }
        Some((
            self.left + c0 as u16,
            self.top + r0 as u16,
            (c1 - c0) as u16,
            (r1 - r0) as u16,
        ))
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame into a `term_width` x `term_height` terminal.
pub fn render<W: Write>(
    out: &mut W,
    snapshot: &Snapshot,
    term_width: u16,
    term_height: u16,
) -> std::io::Result<()> {
    let view = Viewport::fit(snapshot, term_width, term_height);

    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, &view)?;
    draw_hud(out, snapshot, term_width)?;

    for obstacle in &snapshot.obstacles {
        let color = if obstacle.passed { C_PIPE_PASSED } else { C_PIPE };
        fill_rect(out, &view, &obstacle.top, '█', color)?;
        fill_rect(out, &view, &obstacle.bottom, '█', color)?;
    }
    draw_bird(out, &view, snapshot)?;
    draw_controls_hint(out, term_height)?;

    match snapshot.phase {
        Phase::Idle => draw_start_prompt(out, &view)?,
        Phase::GameOver => draw_game_over(out, &view, snapshot)?,
        Phase::Playing => {}
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, term_height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let w = view.cols as usize;
    let left = view.left - 1;
    let right = view.left + view.cols;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(left, view.top - 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w))))?;

    out.queue(cursor::MoveTo(left, view.top + view.rows))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w))))?;

    for row in view.top..view.top + view.rows {
        out.queue(cursor::MoveTo(left, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(right, row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, snapshot: &Snapshot, term_width: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score:{:>5}", snapshot.score)))?;

    let best = format!("Best:{:>5}", snapshot.best_score);
    let bx = term_width.saturating_sub(best.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(bx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_BEST))?;
    out.queue(Print(&best))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn fill_rect<W: Write>(
    out: &mut W,
    view: &Viewport,
    rect: &Rect,
    glyph: char,
    color: Color,
) -> std::io::Result<()> {
    let Some((col, row, width, height)) = view.cells(rect) else {
        return Ok(());
    };
    let line: String = std::iter::repeat(glyph).take(width as usize).collect();
    out.queue(style::SetForegroundColor(color))?;
    for r in row..row + height {
        out.queue(cursor::MoveTo(col, r))?;
        out.queue(Print(&line))?;
    }
    Ok(())
}

fn draw_bird<W: Write>(out: &mut W, view: &Viewport, snapshot: &Snapshot) -> std::io::Result<()> {
    let Some((col, row, width, height)) = view.cells(&snapshot.bird) else {
        return Ok(());
    };
    let wing = WING_GLYPHS[snapshot.wing_frame as usize % WING_GLYPHS.len()];

    out.queue(style::SetForegroundColor(C_BIRD))?;
    for r in 0..height {
        let mut line: String = std::iter::repeat('▓').take(width as usize).collect();
        // Middle row carries the wing and the beak.
        if r == height / 2 {
            line = std::iter::once(wing)
                .chain(std::iter::repeat('▓').take((width as usize).saturating_sub(2)))
                .chain(std::iter::once('>'))
                .take(width as usize)
                .collect();
        }
        out.queue(cursor::MoveTo(col, row + r))?;
        out.queue(Print(&line))?;
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, term_height: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, term_height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("SPACE / ↑ : Flap   Q : Quit"))?;
    Ok(())
}

// ── Overlays ──────────────────────────────────────────────────────────────────

fn print_centered<W: Write>(
    out: &mut W,
    view: &Viewport,
    row: u16,
    text: &str,
    color: Color,
) -> std::io::Result<()> {
    let cx = view.left + view.cols / 2;
    let col = cx.saturating_sub(text.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

fn draw_start_prompt<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let cy = view.top + view.rows / 2;
    print_centered(out, view, cy.saturating_sub(1), "FLAPPY", Color::Cyan)?;
    print_centered(out, view, cy + 1, "Press SPACE to start", Color::White)?;
    Ok(())
}

fn draw_game_over<W: Write>(
    out: &mut W,
    view: &Viewport,
    snapshot: &Snapshot,
) -> std::io::Result<()> {
    let score_line = format!("Final Score: {:>5}", snapshot.score);
    let new_best = snapshot.score > 0 && snapshot.score >= snapshot.best_score;
    let best_line = if new_best {
        format!("★ NEW BEST: {:>5} ★", snapshot.best_score)
    } else {
        format!("Best Score:  {:>5}", snapshot.best_score)
    };
    let best_color = if new_best { Color::Yellow } else { Color::DarkGrey };

    let lines: &[(&str, Color)] = &[
        ("╔══════════════════╗", Color::Red),
        ("║    GAME  OVER    ║", Color::Red),
        ("╚══════════════════╝", Color::Red),
    ];
    let total_rows = lines.len() as u16 + 3;
    let start_row = (view.top + view.rows / 2).saturating_sub(total_rows / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        print_centered(out, view, start_row + i as u16, msg, *color)?;
    }
    let score_row = start_row + lines.len() as u16;
    print_centered(out, view, score_row, &score_line, Color::Yellow)?;
    print_centered(out, view, score_row + 1, &best_line, best_color)?;
    print_centered(out, view, score_row + 2, "SPACE - Play Again  Q - Quit", Color::White)?;

    Ok(())
}
