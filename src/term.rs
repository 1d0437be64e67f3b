use std::{io::{Stdout, Write, stdout}, time::Duration};

use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{Event, KeyEvent, read, poll};

use crate::error::Result;
use crate::grid::Coordinate;
use crate::state::Snapshot;

const SNAKE_BODY_CELL: &str = "██";
const DEAD_SNAKE_CELL: &str = "XX";
const CANDY_CELL: &str = "()";
const EMPTY_CELL: &str = "  ";

/// Terminal columns used per grid cell; two keeps cells roughly square.
pub const CELL_WIDTH: u16 = 2;

pub struct TermManager {
    stdout: Stdout,
}

impl TermManager {
    pub fn new() -> Self {
        TermManager { stdout: stdout() }
    }

    pub fn setup(&mut self) -> Result<()> {
        execute!(self.stdout, EnterAlternateScreen)?;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking, terminal::Clear(ClearType::All))?;
        Ok(())
    }

    pub fn restore(&mut self) -> Result<()> {
        terminal::disable_raw_mode()?;
        execute!(self.stdout, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)?;
        Ok(())
    }

    /// Collects every key event that arrives within `wait`, then drains
    /// whatever else is already queued.
    pub fn read_key_events_queue(&self, wait: Duration) -> Result<Vec<KeyEvent>> {
        let mut events = vec![];
        let mut timeout = wait;

        while poll(timeout)? {
            if let Event::Key(ev) = read()? {
                events.push(ev);
            }
            timeout = Duration::from_millis(0);
        }

        Ok(events)
    }

    pub fn get_terminal_size(&self) -> Result<(u16, u16)> {
        Ok(terminal::size()?)
    }

    pub fn draw(&mut self, snapshot: &Snapshot, footer: &str) -> Result<()> {
        let mut lines = render_lines(snapshot);
        lines.push(String::new());
        lines.push(footer.to_string());

        for (y, line) in lines.iter().enumerate() {
            queue!(
                self.stdout,
                cursor::MoveTo(0, y as u16),
                style::Print(line),
                terminal::Clear(ClearType::UntilNewLine)
            )?;
        }
        queue!(self.stdout, terminal::Clear(ClearType::FromCursorDown))?;

        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for TermManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Columns and rows needed to draw a grid of `grid_size` plus the status
/// and footer lines. `None` when the frame is too large for any terminal.
pub fn required_size(grid_size: i32) -> Option<(u16, u16)> {
    let n = u16::try_from(grid_size.max(0)).ok()?;
    let width = n.checked_mul(CELL_WIDTH)?.checked_add(2)?;
    let height = n.checked_add(5)?;
    Some((width, height))
}

/// Whether a grid of `grid_size` can be drawn in a terminal of `size`.
pub fn fits(grid_size: i32, size: (u16, u16)) -> bool {
    match required_size(grid_size) {
        Some((w, h)) => w <= size.0 && h <= size.1,
        None => false,
    }
}

/// Frame for `snapshot`: bordered grid, optional banner and status line.
pub fn render_lines(snapshot: &Snapshot) -> Vec<String> {
    let n = snapshot.config.grid_size;
    let inner = n as usize * CELL_WIDTH as usize;
    let border = format!("+{}+", "-".repeat(inner));

    let head = snapshot.head();
    let head_cell: String = std::iter::repeat(snapshot.direction.head_char()).take(CELL_WIDTH as usize).collect();

    let mut lines = Vec::with_capacity(n as usize + 3);
    lines.push(border.clone());

    for y in 0..n {
        let mut row = String::with_capacity(inner + 2);
        row.push('|');
        for x in 0..n {
            let cell = Coordinate::new(x, y);
            let text = if snapshot.is_snake_at(&cell) {
                if snapshot.game_over {
                    DEAD_SNAKE_CELL
                } else if Some(cell) == head {
                    head_cell.as_str()
                } else {
                    SNAKE_BODY_CELL
                }
            } else if cell == snapshot.item_cell {
                CANDY_CELL
            } else {
                EMPTY_CELL
            };
            row.push_str(text);
        }
        row.push('|');
        lines.push(row);
    }

    let banner = if snapshot.game_over {
        Some("Game Over")
    } else if snapshot.paused {
        Some("Paused")
    } else {
        None
    };

    if let Some(text) = banner {
        let mid = 1 + n as usize / 2;
        lines[mid] = format!("|{:^width$}|", text, width = inner);
    }

    lines.push(border);
    lines.push(status_line(snapshot));
    lines
}

pub fn status_line(snapshot: &Snapshot) -> String {
    format!("Speed: {} | Length: {} | P: Pause | N: New game", snapshot.speed_ms, snapshot.length)
}
