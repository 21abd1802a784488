/// Rendering layer — all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// session.  No game logic is performed; world coordinates are scaled onto
/// the play area inside the border and translated into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use glam::Vec2;

use asteroids::compute::Session;
use asteroids::config::GameConfig;
use asteroids::entities::{Asteroid, AsteroidTier, Player, PlayerSlot, Shot};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_TIME: Color = Color::Cyan;
const C_HUD_SHIPS: Color = Color::Red;
const C_PLAYER_ONE: Color = Color::White;
const C_PLAYER_TWO: Color = Color::Green;
const C_ASTEROID_LARGE: Color = Color::Grey;
const C_ASTEROID_MEDIUM: Color = Color::DarkYellow;
const C_ASTEROID_SMALL: Color = Color::Red;
const C_SHOT: Color = Color::Cyan;
const C_HINT: Color = Color::DarkGrey;

/// Terminal cells are roughly twice as tall as wide.
const CELL_ASPECT: f32 = 2.0;

// ── World → terminal mapping ─────────────────────────────────────────────────

/// Cells strictly inside the border: columns `1..width-1`, rows `2..height-2`.
struct PlayArea {
    left: u16,
    top: u16,
    cols: u16,
    rows: u16,
    world_w: f32,
    world_h: f32,
}

impl PlayArea {
    fn new(width: u16, height: u16, config: &GameConfig) -> Self {
        Self {
            left: 1,
            top: 2,
            cols: width.saturating_sub(2),
            rows: height.saturating_sub(4),
            world_w: config.screen_width,
            world_h: config.screen_height,
        }
    }

    /// `None` when the point lies off-screen.
    fn cell(&self, p: Vec2) -> Option<(u16, u16)> {
        if p.x < 0.0 || p.y < 0.0 || p.x >= self.world_w || p.y >= self.world_h {
            return None;
        }
        let col = (p.x / self.world_w * self.cols as f32) as u16;
        let row = (p.y / self.world_h * self.rows as f32) as u16;
        if col >= self.cols || row >= self.rows {
            return None;
        }
        Some((self.left + col, self.top + row))
    }

    /// World units spanned by one column.
    fn cell_width(&self) -> f32 {
        self.world_w / self.cols.max(1) as f32
    }
}

fn plot<W: Write>(out: &mut W, area: &PlayArea, p: Vec2, glyph: &str) -> std::io::Result<()> {
    if let Some((col, row)) = area.cell(p) {
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(Print(glyph))?;
    }
    Ok(())
}

fn plot_line<W: Write>(
    out: &mut W,
    area: &PlayArea,
    a: Vec2,
    b: Vec2,
    glyph: &str,
) -> std::io::Result<()> {
    let steps = ((b - a).length() / area.cell_width() * CELL_ASPECT).ceil().max(1.0) as u32;
    for i in 0..=steps {
        plot(out, area, a.lerp(b, i as f32 / steps as f32), glyph)?;
    }
    Ok(())
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, session: &Session) -> std::io::Result<()> {
    let (width, height) = terminal::size()?;
    let area = PlayArea::new(width, height, &session.config);

    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, width, height)?;
    draw_hud(out, session, width)?;

    for asteroid in &session.state.asteroids {
        draw_asteroid(out, &area, asteroid, &session.config)?;
    }
    for shot in &session.state.shots {
        draw_shot(out, &area, shot)?;
    }
    for player in &session.state.players {
        draw_player(out, &area, player)?;
    }

    draw_controls_hint(out, session, height)?;

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, width: u16, height: u16) -> std::io::Result<()> {
    let w = width as usize;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    // Row 1 — top bar
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    // Row h-2 — bottom bar
    out.queue(cursor::MoveTo(0, height.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..height.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, session: &Session, width: u16) -> std::io::Result<()> {
    let state = &session.state;

    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score:{:>6}", state.total_score())))?;

    let time_str = format!("[ {:>6.1}s  rocks:{:>3} ]", state.elapsed, state.asteroids.len());
    let tx = (width / 2).saturating_sub(time_str.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(tx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_TIME))?;
    out.queue(Print(&time_str))?;

    let ships_str = format!("Ships:{}", "▲".repeat(state.players.len()));
    let sx = width.saturating_sub(ships_str.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(sx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SHIPS))?;
    out.queue(Print(&ships_str))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_asteroid<W: Write>(
    out: &mut W,
    area: &PlayArea,
    asteroid: &Asteroid,
    config: &GameConfig,
) -> std::io::Result<()> {
    let (color, glyph) = match asteroid.tier(config.asteroid_min_radius) {
        Ok(AsteroidTier::Large) => (C_ASTEROID_LARGE, "#"),
        Ok(AsteroidTier::Medium) => (C_ASTEROID_MEDIUM, "*"),
        Ok(AsteroidTier::Small) | Err(_) => (C_ASTEROID_SMALL, "+"),
    };
    out.queue(style::SetForegroundColor(color))?;

    // Enough samples to close the outline at the current scale
    let body = &asteroid.body;
    let circumference = std::f32::consts::TAU * body.radius / area.cell_width() * CELL_ASPECT;
    let samples = circumference.ceil().max(6.0) as u32;
    for i in 0..samples {
        let theta = i as f32 / samples as f32 * std::f32::consts::TAU;
        let p = body.position + Vec2::from_angle(theta) * body.radius;
        plot(out, area, p, glyph)?;
    }
    Ok(())
}

fn draw_shot<W: Write>(out: &mut W, area: &PlayArea, shot: &Shot) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(C_SHOT))?;
    plot(out, area, shot.body.position, "•")
}

fn draw_player<W: Write>(out: &mut W, area: &PlayArea, player: &Player) -> std::io::Result<()> {
    let color = match player.slot {
        PlayerSlot::One => C_PLAYER_ONE,
        PlayerSlot::Two => C_PLAYER_TWO,
    };
    out.queue(style::SetForegroundColor(color))?;

    let [nose, left, right] = player.triangle();
    plot_line(out, area, nose, left, "·")?;
    plot_line(out, area, left, right, "·")?;
    plot_line(out, area, right, nose, "·")?;
    plot(out, area, nose, "█")
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, session: &Session, height: u16) -> std::io::Result<()> {
    let hint = if session.config.multiplayer {
        "P1 W A S D / SPACE   P2 ← ↑ → ↓ / ENTER   Q : Quit"
    } else {
        "W S : Thrust   A D : Rotate   SPACE : Shoot   Q : Quit"
    };
    out.queue(cursor::MoveTo(1, height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(hint))?;
    Ok(())
}
