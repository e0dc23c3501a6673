//! Terminal renderer for every scene.
//!
//! The core works in an 800×600 logical playfield; every draw call scales
//! those coordinates onto whatever the terminal currently measures. No game
//! logic is performed here.

use std::io::{self, Write};

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};
use space_invaders::entities::{Bullet, BulletOwner, Enemy, Rect};
use space_invaders::play::PlayState;
use space_invaders::scene::{GameOverState, LeaderboardState, Scene};
use space_invaders::tuning::{LEADERBOARD_DISPLAY_ROWS, PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};
use space_invaders::{DrawContext, RenderSurface};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_TITLE: Color = Color::Green;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_LIVES: Color = Color::Red;
const C_PLAYER: Color = Color::Green;
const C_ENEMY: Color = Color::Red;
const C_BULLET_PLAYER: Color = Color::Cyan;
const C_BULLET_ENEMY: Color = Color::Magenta;
const C_HINT: Color = Color::DarkGrey;

fn format_score(score: u32) -> String {
    format!("{:06}", score)
}

/// Maps logical playfield coordinates onto terminal cells inside the border.
#[derive(Clone, Copy)]
struct Viewport {
    width: u16,
    height: u16,
}

impl Viewport {
    fn col(&self, x: i32) -> u16 {
        let inner = self.width.saturating_sub(2) as i32;
        let c = 1 + x.clamp(0, PLAYFIELD_WIDTH) * inner / PLAYFIELD_WIDTH;
        c.clamp(1, inner.max(1)) as u16
    }

    fn row(&self, y: i32) -> u16 {
        let inner = self.height.saturating_sub(4) as i32;
        let r = 2 + y.clamp(0, PLAYFIELD_HEIGHT) * inner / PLAYFIELD_HEIGHT;
        r.clamp(2, (inner + 1).max(2)) as u16
    }

    /// Cell span for a rectangle, at least one cell wide.
    fn span(&self, rect: &Rect) -> (u16, u16, u16) {
        let left = self.col(rect.x);
        let right = self.col(rect.x + rect.width).max(left + 1);
        (left, self.row(rect.y), right - left)
    }

    fn centre_col(&self, text: &str) -> u16 {
        (self.width / 2).saturating_sub(text.chars().count() as u16 / 2)
    }
}

pub struct TerminalSurface<W: Write> {
    out: W,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> RenderSurface for TerminalSurface<W> {
    fn draw(&mut self, ctx: &DrawContext<'_>) -> io::Result<()> {
        let (width, height) = terminal::size()?;
        let view = Viewport { width, height };
        let out = &mut self.out;

        out.queue(terminal::Clear(terminal::ClearType::All))?;

        match ctx.scene {
            Scene::Start => draw_menu(out, view)?,
            Scene::Playing(play) => draw_playing(out, view, play, ctx.player_name)?,
            Scene::GameOver(result) => draw_game_over(out, view, result, ctx)?,
            Scene::Leaderboard(board) => draw_leaderboard(out, view, board)?,
        }

        // Cursor parked on the hint row.
        out.queue(style::ResetColor)?;
        out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
        out.flush()
    }
}

fn print_centred<W: Write>(
    out: &mut W,
    view: Viewport,
    row: u16,
    color: Color,
    text: &str,
) -> io::Result<()> {
    out.queue(cursor::MoveTo(view.centre_col(text), row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

// ── Menu ──────────────────────────────────────────────────────────────────────

fn draw_menu<W: Write>(out: &mut W, view: Viewport) -> io::Result<()> {
    let cy = view.height / 2;
    print_centred(out, view, cy.saturating_sub(6), C_TITLE, "★  SPACE  INVADERS  ★")?;
    print_centred(out, view, cy.saturating_sub(5), C_TITLE, &"─".repeat(30))?;
    print_centred(out, view, cy.saturating_sub(3), C_ENEMY, "«▼»  «▼»  «▼»  «▼»  «▼»")?;
    print_centred(out, view, cy.saturating_sub(1), C_PLAYER, "/█\\")?;
    print_centred(out, view, cy + 1, Color::White, "[SPACE] Play")?;
    print_centred(out, view, cy + 2, Color::White, "[ENTER] Leaderboard")?;
    print_centred(out, view, cy + 4, C_HINT, "← → / A D : Move   SPACE : Shoot   Q : Quit")?;
    Ok(())
}

// ── Playing ───────────────────────────────────────────────────────────────────

fn draw_playing<W: Write>(
    out: &mut W,
    view: Viewport,
    play: &PlayState,
    player_name: &str,
) -> io::Result<()> {
    draw_border(out, view)?;
    draw_hud(out, view, play, player_name)?;

    for enemy in play.enemies.iter().filter(|e| e.alive) {
        draw_enemy(out, view, enemy)?;
    }
    for bullet in play.bullets.iter().chain(play.enemy_bullets.iter()) {
        draw_bullet(out, view, bullet)?;
    }
    if play.player.alive {
        let (col, row, w) = view.span(&play.player.rect());
        out.queue(style::SetForegroundColor(C_PLAYER))?;
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(Print(format!("/{}\\", "█".repeat(w.saturating_sub(2) as usize))))?;
    }

    draw_controls_hint(out, view)?;

    if play.is_ended() {
        let (text, color) = if play.won() {
            ("¡ VICTORY !", Color::Green)
        } else {
            ("GAME  OVER", Color::Red)
        };
        print_centred(out, view, view.height / 2, color, text)?;
    }
    Ok(())
}

fn draw_border<W: Write>(out: &mut W, view: Viewport) -> io::Result<()> {
    let w = view.width as usize;
    let h = view.height;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(view.width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

fn draw_hud<W: Write>(
    out: &mut W,
    view: Viewport,
    play: &PlayState,
    player_name: &str,
) -> io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("SCORE: {}", format_score(play.score))))?;

    out.queue(cursor::MoveTo(view.centre_col(player_name), 0))?;
    out.queue(style::SetForegroundColor(C_TITLE))?;
    out.queue(Print(player_name))?;

    let lives_text = format!("LIVES: {}", "♥".repeat(play.player.lives as usize));
    let rx = view
        .width
        .saturating_sub(lives_text.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(&lives_text))?;

    Ok(())
}

fn draw_enemy<W: Write>(out: &mut W, view: Viewport, enemy: &Enemy) -> io::Result<()> {
    let (col, row, w) = view.span(&enemy.rect());
    let body = if w >= 3 {
        format!("«{}»", "▼".repeat(w as usize - 2))
    } else {
        "▼".repeat(w as usize)
    };
    out.queue(style::SetForegroundColor(C_ENEMY))?;
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(Print(body))?;
    Ok(())
}

fn draw_bullet<W: Write>(out: &mut W, view: Viewport, bullet: &Bullet) -> io::Result<()> {
    let (col, row, _) = view.span(&bullet.rect());
    out.queue(cursor::MoveTo(col, row))?;
    match bullet.owner {
        BulletOwner::Player => {
            out.queue(style::SetForegroundColor(C_BULLET_PLAYER))?;
            out.queue(Print("║"))?;
        }
        BulletOwner::Enemy => {
            out.queue(style::SetForegroundColor(C_BULLET_ENEMY))?;
            out.queue(Print("↓"))?;
        }
    }
    Ok(())
}

fn draw_controls_hint<W: Write>(out: &mut W, view: Viewport) -> io::Result<()> {
    out.queue(cursor::MoveTo(1, view.height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → / A D : Move   SPACE : Shoot   ESC : Menu   Q : Quit"))?;
    Ok(())
}

// ── Result screen ─────────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(
    out: &mut W,
    view: Viewport,
    result: &GameOverState,
    ctx: &DrawContext<'_>,
) -> io::Result<()> {
    let (banner, banner_color) = if result.won {
        ("║    ¡ VICTORY !     ║", Color::Green)
    } else {
        ("║    GAME  OVER      ║", Color::Red)
    };
    let score_line = format!("SCORE: {}", format_score(result.score));
    let player_line = format!("PLAYER: {}", ctx.player_name);
    let (saved_line, saved_color) = match ctx.score_saved {
        Some(true) => ("SCORE SAVED", Color::Green),
        Some(false) => ("SCORE NOT SAVED", Color::Red),
        None => ("SAVING SCORE...", C_HINT),
    };

    let start = (view.height / 2).saturating_sub(4);
    print_centred(out, view, start, banner_color, "╔════════════════════╗")?;
    print_centred(out, view, start + 1, banner_color, banner)?;
    print_centred(out, view, start + 2, banner_color, "╚════════════════════╝")?;
    print_centred(out, view, start + 4, C_HUD_SCORE, &score_line)?;
    print_centred(out, view, start + 5, C_TITLE, &player_line)?;
    print_centred(out, view, start + 6, saved_color, saved_line)?;
    print_centred(out, view, start + 8, Color::White, "[ENTER] Back to menu   Q : Quit")?;
    Ok(())
}

// ── Leaderboard ───────────────────────────────────────────────────────────────

fn draw_leaderboard<W: Write>(
    out: &mut W,
    view: Viewport,
    board: &LeaderboardState,
) -> io::Result<()> {
    print_centred(out, view, 1, C_TITLE, "RANKING - TOP 10")?;

    if board.loading {
        print_centred(out, view, view.height / 2, C_HINT, "LOADING...")?;
    } else if board.entries.is_empty() {
        print_centred(out, view, view.height / 2, C_TITLE, "NO SCORES YET")?;
        print_centred(out, view, view.height / 2 + 1, C_HINT, "The server may be unavailable")?;
    } else {
        let left = view.centre_col(&" ".repeat(34));
        out.queue(cursor::MoveTo(left, 3))?;
        out.queue(style::SetForegroundColor(C_TITLE))?;
        out.queue(Print(format!("{:<4}{:<20}{:>10}", "#", "PLAYER", "SCORE")))?;

        for (i, entry) in board.entries.iter().take(LEADERBOARD_DISPLAY_ROWS).enumerate() {
            out.queue(cursor::MoveTo(left, 5 + i as u16))?;
            out.queue(style::SetForegroundColor(C_TITLE))?;
            out.queue(Print(format!("{:<4}", format!("{}.", i + 1))))?;
            out.queue(style::SetForegroundColor(Color::White))?;
            out.queue(Print(format!("{:<20}", entry.player_name)))?;
            out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
            out.queue(Print(format!("{:>10}", format_score(entry.score))))?;
        }
    }

    print_centred(
        out,
        view,
        view.height.saturating_sub(2),
        C_TITLE,
        "[ENTER] Back to menu",
    )?;
    Ok(())
}
