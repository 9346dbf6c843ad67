//! Plain-text output for pipes and `--plain`.

use super::format::{format_row, header_text};
use crate::app::view_models::ScreenState;
use anyhow::Result;
use std::io::Write;

/// Write the settled screen as text: header plus one line per row, or the
/// empty-state message on its own.
pub fn print_screen(writer: &mut impl Write, screen: &ScreenState, requested_base: &str) -> Result<()> {
    if let Some(message) = screen.empty_message() {
        writeln!(writer, "{message}")?;
        return Ok(());
    }

    writeln!(writer, "{}", header_text(screen.rates(), requested_base))?;
    for record in screen.rows() {
        writeln!(writer, "{}", format_row(record))?;
    }
    writer.flush()?;
    Ok(())
}
