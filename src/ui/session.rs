//! Interactive browse session: a line-oriented loop over stdin/stdout.
//!
//! One command per line; the session owns the presentation state
//! (cursor row, privacy flag) while every view change goes through the
//! pure navigation machine. The loop never holds a DB transaction open
//! across a prompt, so a quit at any point leaves committed data intact.

use crate::config::Config;
use crate::core::nav::NavState;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::views;
use crate::utils::date;
use std::io::{BufRead, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Left,
    Right,
    Up,
    Down,
    Enter,
    Escape,
    Today,
    TogglePrivacy,
    Quit,
    Unknown,
}

fn parse_action(line: &str) -> Action {
    match line.trim().to_lowercase().as_str() {
        "left" | "l" | "prev" => Action::Left,
        "right" | "r" | "next" => Action::Right,
        "up" | "k" => Action::Up,
        "down" | "j" => Action::Down,
        "enter" | "e" | "" => Action::Enter,
        "esc" | "escape" | "b" | "back" => Action::Escape,
        "t" | "today" => Action::Today,
        "$" | "privacy" => Action::TogglePrivacy,
        "q" | "quit" | "exit" => Action::Quit,
        _ => Action::Unknown,
    }
}

pub struct Session {
    nav: NavState,
    cursor: usize,
    privacy: bool,
}

impl Session {
    pub fn new(nav: NavState) -> Self {
        Self {
            nav,
            cursor: 0,
            privacy: false,
        }
    }

    fn clamp_cursor(&mut self) {
        let rows = views::row_count(&self.nav);
        if rows == 0 {
            self.cursor = 0;
        } else if self.cursor >= rows {
            self.cursor = rows - 1;
        }
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::Left => self.nav = self.nav.left(),
            Action::Right => self.nav = self.nav.right(),
            Action::Up => self.cursor = self.cursor.saturating_sub(1),
            Action::Down => self.cursor += 1,
            Action::Enter => {
                let next = self.nav.enter(Some(self.cursor));
                if next != self.nav {
                    self.nav = next;
                    self.cursor = 0;
                }
            }
            Action::Escape => {
                self.nav = self.nav.escape();
                self.cursor = 0;
            }
            Action::Today => self.nav = self.nav.goto_today(date::today()),
            Action::TogglePrivacy => self.privacy = !self.privacy,
            Action::Quit | Action::Unknown => {}
        }
        self.clamp_cursor();
    }
}

/// Run the session until `q` or end of input.
pub fn run<R: BufRead, W: Write>(
    pool: &mut DbPool,
    cfg: &Config,
    input: R,
    output: &mut W,
) -> AppResult<()> {
    let mut session = Session::new(NavState::initial(date::today()));

    render(&session, pool, cfg, output)?;

    for line in input.lines() {
        let line = line?;
        let action = parse_action(&line);

        if action == Action::Quit {
            break;
        }
        if action == Action::Unknown {
            writeln!(
                output,
                "commands: left right up down enter esc t $ q"
            )?;
            continue;
        }

        session.apply(action);
        render(&session, pool, cfg, output)?;
    }

    Ok(())
}

fn render<W: Write>(
    session: &Session,
    pool: &mut DbPool,
    cfg: &Config,
    output: &mut W,
) -> AppResult<()> {
    let cursor = if views::row_count(&session.nav) > 0 {
        Some(session.cursor)
    } else {
        None
    };
    let view = views::render_state(&pool.conn, cfg, &session.nav, cursor, session.privacy)?;
    writeln!(output, "{view}")?;
    write!(output, "> ")?;
    output.flush()?;
    Ok(())
}
