//! Terminal front end: keyboard input, frame pacing, and drawing snapshots.
//!
//! Nothing here simulates. Keys become [`GameCommand`]s, and each frame draws the
//! [`Snapshot`] the game produced.

use std::io::{self, Stdout, Write};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{ExecutableCommand, QueueableCommand};
use glam::IVec2;
use thousands::Separable;
use tracing::{debug, info, warn};

use crate::constants::{ui, MapTile};
use crate::error::GameResult;
use crate::events::GameCommand;
use crate::formatter;
use crate::game::Game;
use crate::map::direction::Direction;
use crate::snapshot::Snapshot;
use crate::systems::GameStage;

const C_WALL: Color = Color::DarkBlue;
const C_PELLET: Color = Color::Grey;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_LIVES: Color = Color::Red;
const C_HUD_POWER: Color = Color::Magenta;
const C_OVERLAY: Color = Color::White;
const C_HINT: Color = Color::DarkGrey;

/// Maps a key to the command it triggers: arrows or WASD steer, R restarts, Q or Esc quits.
pub fn map_key(code: KeyCode) -> Option<GameCommand> {
    let command = match code {
        KeyCode::Left | KeyCode::Char('a' | 'A') => GameCommand::MovePlayer(Direction::Left),
        KeyCode::Right | KeyCode::Char('d' | 'D') => GameCommand::MovePlayer(Direction::Right),
        KeyCode::Up | KeyCode::Char('w' | 'W') => GameCommand::MovePlayer(Direction::Up),
        KeyCode::Down | KeyCode::Char('s' | 'S') => GameCommand::MovePlayer(Direction::Down),
        KeyCode::Char('r' | 'R') => GameCommand::Restart,
        KeyCode::Char('q' | 'Q') | KeyCode::Esc => GameCommand::Exit,
        _ => return None,
    };
    Some(command)
}

/// Raw mode and the alternate screen, restored on drop even when the loop errors out.
struct TerminalGuard;

impl TerminalGuard {
    fn enter(out: &mut Stdout) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        out.execute(EnterAlternateScreen)?;
        out.execute(Hide)?;
        out.execute(Clear(ClearType::All))?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut out = io::stdout();
        let _ = out.execute(Show);
        let _ = out.execute(LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

pub struct App {
    game: Game,
    out: Stdout,
    frame_time: Duration,
}

impl App {
    pub fn new(game: Game, frame_time: Duration) -> Self {
        Self {
            game,
            out: io::stdout(),
            frame_time,
        }
    }

    /// Runs the game until an exit command, one tick per frame.
    pub fn run(&mut self) -> GameResult<()> {
        let _guard = TerminalGuard::enter(&mut self.out)?;
        info!("Starting game loop ({:.3}ms)", self.frame_time.as_secs_f32() * 1000.0);

        loop {
            let start = Instant::now();

            while event::poll(Duration::ZERO)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if let Some(command) = map_key(key.code) {
                        debug!(?command, "Key pressed");
                        self.game.send(command);
                    }
                }
            }

            formatter::set_tick(self.game.ticks() + 1);
            if self.game.tick() {
                info!("Exit requested. Exiting...");
                return Ok(());
            }

            let snapshot = self.game.snapshot()?;
            render(&mut self.out, &snapshot)?;

            let elapsed = start.elapsed();
            if elapsed < self.frame_time {
                spin_sleep::sleep(self.frame_time - elapsed);
            } else {
                warn!("Game loop behind schedule by: {:?}", elapsed - self.frame_time);
            }
        }
    }
}

/// Draws one complete frame.
pub fn render<W: Write>(out: &mut W, snapshot: &Snapshot) -> io::Result<()> {
    draw_hud(out, snapshot)?;
    draw_board(out, snapshot)?;

    if snapshot.stage.is_terminal() {
        draw_overlay(out, snapshot)?;
    }

    out.queue(ResetColor)?;
    out.queue(MoveTo(0, ui::HUD_ROWS + snapshot.height as u16))?;
    out.flush()
}

fn draw_hud<W: Write>(out: &mut W, snapshot: &Snapshot) -> io::Result<()> {
    out.queue(MoveTo(0, 0))?;
    out.queue(Clear(ClearType::CurrentLine))?;

    out.queue(SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score: {}  ", snapshot.score.separate_with_commas())))?;

    out.queue(SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(format!("Lives: {}  ", "♥".repeat(snapshot.lives as usize))))?;

    if snapshot.player.powered {
        out.queue(SetForegroundColor(C_HUD_POWER))?;
        out.queue(Print(format!("Power: {:.1}s", snapshot.power_remaining.as_secs_f32())))?;
    }
    Ok(())
}

/// The glyph and color for a cell, entities drawn over tiles.
fn cell(snapshot: &Snapshot, pos: IVec2) -> (&'static str, Color) {
    if snapshot.player.position == pos {
        return if snapshot.player.powered {
            ("😍", Color::Yellow)
        } else {
            ("😀", Color::Yellow)
        };
    }
    if snapshot.ghosts.contains(&pos) {
        return ("👻", Color::White);
    }
    if snapshot.hearts.contains(&pos) {
        return ("💖", Color::Magenta);
    }
    if snapshot.rose == Some(pos) {
        return ("🌹", Color::Red);
    }

    match snapshot.tile(pos) {
        Some(MapTile::Wall) | None => ("██", C_WALL),
        Some(MapTile::Pellet) => ("· ", C_PELLET),
        Some(MapTile::Floor) => ("  ", C_PELLET),
    }
}

fn draw_board<W: Write>(out: &mut W, snapshot: &Snapshot) -> io::Result<()> {
    for y in 0..snapshot.height as i32 {
        out.queue(MoveTo(0, ui::HUD_ROWS + y as u16))?;
        for x in 0..snapshot.width as i32 {
            let (glyph, color) = cell(snapshot, IVec2::new(x, y));
            out.queue(SetForegroundColor(color))?;
            out.queue(Print(glyph))?;
        }
    }
    Ok(())
}

fn draw_overlay<W: Write>(out: &mut W, snapshot: &Snapshot) -> io::Result<()> {
    let title = match snapshot.stage {
        GameStage::Won => "You Win",
        GameStage::Lost => "Game Over",
        GameStage::Playing => return Ok(()),
    };
    let hint = "Press R to restart";

    let board_columns = snapshot.width as u16 * ui::CELL_WIDTH;
    let middle = ui::HUD_ROWS + snapshot.height as u16 / 2;
    let centered = |text: &str| board_columns.saturating_sub(text.chars().count() as u16) / 2;

    out.queue(MoveTo(centered(title), middle - 1))?;
    out.queue(SetForegroundColor(C_OVERLAY))?;
    out.queue(Print(title))?;

    out.queue(MoveTo(centered(hint), middle + 1))?;
    out.queue(SetForegroundColor(C_HINT))?;
    out.queue(Print(hint))?;
    Ok(())
}
