//! Plain table rendering for non-interactive output.

use std::io::{self, Write};

use super::palette::Palette;
use crate::data::{Cell, Row, Section};

/// Gap between columns.
const GUTTER: usize = 2;

/// Column widths from the header and the raw (undecorated) cell text.
pub fn column_widths(columns: &[&str], rows: &[Row]) -> Vec<usize> {
    let mut widths: Vec<usize> = columns.iter().map(|c| c.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(cell.width());
            }
        }
    }
    widths
}

fn write_line<W: Write>(
    out: &mut W,
    cells: &[Cell],
    widths: &[usize],
    palette: &dyn Palette,
) -> io::Result<()> {
    let mut line = String::new();
    let last = cells.len().saturating_sub(1);
    for (i, cell) in cells.iter().enumerate() {
        for (text, tier) in cell.runs() {
            line.push_str(&palette.paint(text, tier));
        }
        if i < last {
            let width = widths.get(i).copied().unwrap_or(0);
            let pad = width.saturating_sub(cell.width()) + GUTTER;
            line.extend(std::iter::repeat(' ').take(pad));
        }
    }
    writeln!(out, "{}", line.trim_end())
}

/// Write one section as an aligned table.
///
/// Padding is computed from raw text so escape sequences added by the
/// palette do not skew alignment.
pub fn render_section<W: Write>(
    out: &mut W,
    section: Section,
    rows: &[Row],
    palette: &dyn Palette,
) -> io::Result<()> {
    let columns = section.columns();
    let widths = column_widths(columns, rows);
    let header: Vec<Cell> = columns.iter().map(|c| Cell::plain(*c)).collect();

    write_line(out, &header, &widths, palette)?;
    for row in rows {
        write_line(out, row, &widths, palette)?;
    }
    Ok(())
}
