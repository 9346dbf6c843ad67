//! # Terminal Renderer
//!
//! Draws the screen state into a [`RenderStream`]:
//!
//! ```text
//! row 0        Exchange rates (base GBP, 2024-01-02)
//! rows 1..h-2  list rows | "Loading exchange rates..." | empty message
//! row h-1      status bar
//! ```

use super::format::{centre_offset, format_row, header_text, truncate};
use crate::app::events::ViewEvent;
use crate::app::io::RenderStream;
use crate::app::view_models::ScreenState;
use anyhow::Result;
use crossterm::queue;
use crossterm::style::{Attribute, Print, SetAttribute};

/// Shown in the body while a load cycle is running
pub const PROGRESS_TEXT: &str = "Loading exchange rates...";

const KEY_HINTS: &str = " q quit  r reload  j/k scroll";

/// Rows taken by the header and the status bar
const CHROME_ROWS: u16 = 2;

/// Trait for rendering views
pub trait ViewRenderer {
    /// Prepare the terminal for full-screen drawing
    fn initialize(&mut self) -> Result<()>;

    fn render_full(&mut self, screen: &ScreenState) -> Result<()>;

    /// Redraw the body rows only
    fn render_list(&mut self, screen: &ScreenState) -> Result<()>;

    fn render_status_bar(&mut self, screen: &ScreenState) -> Result<()>;

    fn handle_view_event(&mut self, event: &ViewEvent, screen: &ScreenState) -> Result<()>;

    /// Restore the terminal on exit
    fn cleanup(&mut self) -> Result<()>;
}

pub struct TerminalRenderer<RS: RenderStream> {
    render_stream: RS,
    terminal_size: (u16, u16),
    requested_base: String,
}

impl<RS: RenderStream> TerminalRenderer<RS> {
    pub fn with_render_stream(render_stream: RS, requested_base: impl Into<String>) -> Result<Self> {
        let terminal_size = render_stream.get_size()?;
        Ok(Self {
            render_stream,
            terminal_size,
            requested_base: requested_base.into(),
        })
    }

    pub fn update_size(&mut self, width: u16, height: u16) {
        self.terminal_size = (width, height);
    }

    /// Number of list rows that fit between header and status bar
    pub fn viewport_height(&self) -> usize {
        self.terminal_size.1.saturating_sub(CHROME_ROWS).max(1) as usize
    }

    fn width(&self) -> usize {
        self.terminal_size.0 as usize
    }

    fn status_row(&self) -> u16 {
        self.terminal_size.1.saturating_sub(1)
    }

    fn write_line(&mut self, row: u16, column: usize, text: &str) -> Result<()> {
        let width = self.width();
        self.render_stream.move_cursor(0, row)?;
        self.render_stream.clear_line()?;
        let text = truncate(text, width.saturating_sub(column));
        queue!(
            self.render_stream,
            Print(" ".repeat(column.min(width))),
            Print(text)
        )?;
        Ok(())
    }

    fn render_header(&mut self, screen: &ScreenState) -> Result<()> {
        let header = truncate(
            &header_text(screen.rates(), &self.requested_base),
            self.width(),
        );
        self.render_stream.move_cursor(0, 0)?;
        self.render_stream.clear_line()?;
        queue!(
            self.render_stream,
            SetAttribute(Attribute::Bold),
            Print(header),
            SetAttribute(Attribute::Reset)
        )?;
        Ok(())
    }

    /// Body with a single centred message (progress or empty state)
    fn render_message(&mut self, message: &str) -> Result<()> {
        let viewport = self.viewport_height() as u16;
        let middle = 1 + viewport / 2;
        for row in 1..=viewport {
            if row == middle {
                let column = centre_offset(message, self.width());
                self.write_line(row, column, message)?;
            } else {
                self.write_line(row, 0, "")?;
            }
        }
        Ok(())
    }

    fn position_text(screen: &ScreenState) -> String {
        if !screen.list_visible() {
            return screen.load_state().name().to_string();
        }
        let total = screen.rows().len();
        let first = screen.scroll_offset() + 1;
        let last = screen.scroll_offset() + screen.visible_rows().len();
        format!("{first}-{last}/{total}")
    }
}

impl<RS: RenderStream> ViewRenderer for TerminalRenderer<RS> {
    fn initialize(&mut self) -> Result<()> {
        self.render_stream.enable_raw_mode()?;
        self.render_stream.enter_alternate_screen()?;
        self.render_stream.hide_cursor()?;
        self.render_stream.clear_screen()?;
        Ok(())
    }

    fn render_full(&mut self, screen: &ScreenState) -> Result<()> {
        self.render_stream.clear_screen()?;
        self.render_header(screen)?;
        self.render_list(screen)?;
        self.render_status_bar(screen)?;
        self.render_stream.flush()?;
        Ok(())
    }

    fn render_list(&mut self, screen: &ScreenState) -> Result<()> {
        if screen.progress_visible() {
            return self.render_message(PROGRESS_TEXT);
        }
        if let Some(message) = screen.empty_message() {
            return self.render_message(message);
        }

        let lines: Vec<String> = screen.visible_rows().iter().map(format_row).collect();
        let viewport = self.viewport_height();
        for index in 0..viewport {
            let row = index as u16 + 1;
            match lines.get(index) {
                Some(line) => self.write_line(row, 1, line)?,
                None => self.write_line(row, 0, "")?,
            }
        }
        Ok(())
    }

    fn render_status_bar(&mut self, screen: &ScreenState) -> Result<()> {
        let width = self.width();
        let position = Self::position_text(screen);
        let padding = width.saturating_sub(KEY_HINTS.len() + position.len() + 1);
        let line = truncate(&format!("{KEY_HINTS}{}{position} ", " ".repeat(padding)), width);

        let row = self.status_row();
        self.render_stream.move_cursor(0, row)?;
        self.render_stream.clear_line()?;
        queue!(
            self.render_stream,
            SetAttribute(Attribute::Reverse),
            Print(line),
            SetAttribute(Attribute::Reset)
        )?;
        Ok(())
    }

    fn handle_view_event(&mut self, event: &ViewEvent, screen: &ScreenState) -> Result<()> {
        match event {
            ViewEvent::FullRedrawRequired => self.render_full(screen)?,
            ViewEvent::ListRedrawRequired => {
                self.render_list(screen)?;
                self.render_stream.flush()?;
            }
            ViewEvent::StatusBarUpdateRequired => {
                self.render_status_bar(screen)?;
                self.render_stream.flush()?;
            }
        }
        Ok(())
    }

    fn cleanup(&mut self) -> Result<()> {
        self.render_stream.show_cursor()?;
        self.render_stream.leave_alternate_screen()?;
        self.render_stream.disable_raw_mode()?;
        self.render_stream.flush()?;
        Ok(())
    }
}
