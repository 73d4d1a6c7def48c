//! Interactive shortlist picker.
//!
//! [`Selector`] is a pure state machine driven by [`Key`] values, so its
//! behavior is testable without a terminal. [`pick`] is the terminal driver:
//! it holds raw mode through [`RawModeGuard`], renders on stderr (stdout is
//! reserved for the chosen path) and blocks on key reads until the selector
//! leaves the `Browsing` state.

use crate::core::error::EzjumpError;
use colored::Colorize;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::{cursor, execute, queue, terminal};
use std::io::{self, Write};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Delete,
    Confirm,
    Cancel,
    Other,
}

impl From<&KeyEvent> for Key {
    fn from(ev: &KeyEvent) -> Self {
        if ev.modifiers.contains(KeyModifiers::CONTROL) {
            return match ev.code {
                KeyCode::Char('c') | KeyCode::Char('d') => Key::Cancel,
                KeyCode::Char('p') => Key::Up,
                KeyCode::Char('n') => Key::Down,
                _ => Key::Other,
            };
        }
        match ev.code {
            KeyCode::Up | KeyCode::Char('k') | KeyCode::BackTab => Key::Up,
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => Key::Down,
            KeyCode::Delete | KeyCode::Char('d') => Key::Delete,
            KeyCode::Enter => Key::Confirm,
            KeyCode::Esc | KeyCode::Char('q') => Key::Cancel,
            _ => Key::Other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorState {
    Browsing,
    Confirmed(String),
    Cancelled,
}

#[derive(Debug, Clone)]
pub struct Selector {
    items: Vec<String>,
    cursor: usize,
    state: SelectorState,
}

impl Selector {
    pub fn new(items: Vec<String>) -> Self {
        let state = if items.is_empty() {
            SelectorState::Cancelled
        } else {
            SelectorState::Browsing
        };
        Self {
            items,
            cursor: 0,
            state,
        }
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn state(&self) -> &SelectorState {
        &self.state
    }

    pub fn is_browsing(&self) -> bool {
        self.state == SelectorState::Browsing
    }

    /// Apply one key. Returns the entry removed by a delete, which the caller
    /// must forget in the store right away.
    pub fn handle(&mut self, key: Key) -> Option<String> {
        if !self.is_browsing() {
            return None;
        }
        match key {
            Key::Up => {
                self.cursor = self.cursor.saturating_sub(1);
                None
            }
            Key::Down => {
                if self.cursor + 1 < self.items.len() {
                    self.cursor += 1;
                }
                None
            }
            Key::Delete => {
                let removed = self.items.remove(self.cursor);
                if self.items.is_empty() {
                    self.state = SelectorState::Cancelled;
                } else if self.cursor >= self.items.len() {
                    self.cursor = self.items.len() - 1;
                }
                Some(removed)
            }
            Key::Confirm => {
                self.state = SelectorState::Confirmed(self.items[self.cursor].clone());
                None
            }
            Key::Cancel => {
                self.state = SelectorState::Cancelled;
                None
            }
            Key::Other => None,
        }
    }
}

/// Raw mode plus hidden cursor for as long as the guard lives.
pub struct RawModeGuard {
    _private: (),
}

impl RawModeGuard {
    pub fn acquire() -> Result<Self, EzjumpError> {
        terminal::enable_raw_mode().map_err(terminal_err)?;
        let guard = Self { _private: () };
        execute!(io::stderr(), cursor::Hide).map_err(terminal_err)?;
        Ok(guard)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stderr(), cursor::Show);
        let _ = terminal::disable_raw_mode();
    }
}

fn terminal_err(e: io::Error) -> EzjumpError {
    EzjumpError::Terminal(e.to_string())
}

/// Shorten `text` to at most `width` columns so every item stays on one row.
pub fn fit(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let tail: String = {
        let chars: Vec<char> = text.chars().collect();
        chars[chars.len() - (width - 1)..].iter().collect()
    };
    format!("…{}", tail)
}

fn render(
    out: &mut impl Write,
    selector: &Selector,
    width: usize,
    drawn: usize,
) -> io::Result<usize> {
    if drawn > 0 {
        queue!(out, cursor::MoveToPreviousLine(drawn as u16))?;
    }
    queue!(
        out,
        cursor::MoveToColumn(0),
        terminal::Clear(terminal::ClearType::FromCursorDown)
    )?;

    // two columns of marker, one spare so the cursor never wraps
    let room = width.saturating_sub(3);
    let hint = fit("↑/↓ move · enter jump · d forget · esc cancel", room);
    write!(out, "{}\r\n", hint.bright_black())?;
    for (i, item) in selector.items().iter().enumerate() {
        let item = fit(item, room);
        if i == selector.cursor() {
            write!(
                out,
                "{} {}\r\n",
                "›".bright_cyan().bold(),
                item.bright_white().bold()
            )?;
        } else {
            write!(out, "  {}\r\n", item)?;
        }
    }
    out.flush()?;
    Ok(selector.items().len() + 1)
}

fn clear(out: &mut impl Write, drawn: usize) -> io::Result<()> {
    if drawn > 0 {
        queue!(out, cursor::MoveToPreviousLine(drawn as u16))?;
    }
    queue!(
        out,
        cursor::MoveToColumn(0),
        terminal::Clear(terminal::ClearType::FromCursorDown)
    )?;
    out.flush()
}

/// Next key from the terminal; blocks without timeout.
pub fn read_key() -> Result<Key, EzjumpError> {
    loop {
        match event::read().map_err(terminal_err)? {
            Event::Key(ev) if ev.kind != KeyEventKind::Release => return Ok(Key::from(&ev)),
            _ => continue,
        }
    }
}

/// Drive a [`Selector`] over `items` until it confirms or cancels.
///
/// Keys come from `next_key` and the list is drawn to `out`, `width` columns
/// wide. `on_delete` runs for every deleted entry before the next key is read.
pub fn run<W, K, F>(
    items: Vec<String>,
    out: &mut W,
    width: usize,
    mut next_key: K,
    mut on_delete: F,
) -> Result<Option<String>, EzjumpError>
where
    W: Write,
    K: FnMut() -> Result<Key, EzjumpError>,
    F: FnMut(&str) -> Result<(), EzjumpError>,
{
    let mut selector = Selector::new(items);
    let mut drawn = 0;

    while selector.is_browsing() {
        drawn = render(out, &selector, width, drawn).map_err(terminal_err)?;
        let key = next_key()?;
        if let Some(removed) = selector.handle(key) {
            debug!(path = %removed, "forgetting from picker");
            on_delete(&removed)?;
        }
    }
    clear(out, drawn).map_err(terminal_err)?;

    match selector.state() {
        SelectorState::Confirmed(path) => Ok(Some(path.clone())),
        _ => Ok(None),
    }
}

/// Terminal picker: raw mode for the duration, rendering on stderr, keys from
/// the terminal. Returns the confirmed path, or `None` on cancel.
pub fn pick<F>(items: Vec<String>, on_delete: F) -> Result<Option<String>, EzjumpError>
where
    F: FnMut(&str) -> Result<(), EzjumpError>,
{
    if items.is_empty() {
        return Ok(None);
    }

    let _guard = RawModeGuard::acquire()?;
    let width = terminal::size().map(|(cols, _)| cols as usize).unwrap_or(80);
    run(items, &mut io::stderr(), width, read_key, on_delete)
}
