//! Section table view.
//!
//! Renders the projected rows of the current section with tier styling.

use ratatui::{
    layout::{Constraint, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame,
};

use crate::app::App;
use crate::ui::table::column_widths;

/// Render the current section as a table.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let section = app.current_section;
    let all_rows = app.rows(section);
    let rows = app.visible_rows();

    let header = Row::new(section.columns().iter().map(|c| Cell::from(*c)))
        .height(1)
        .style(app.theme.header);

    let body: Vec<Row> = rows
        .iter()
        .map(|row| {
            Row::new(row.iter().map(|cell| {
                let spans: Vec<Span> = cell
                    .runs()
                    .into_iter()
                    .map(|(text, tier)| Span::styled(text.to_string(), app.theme.tier_style(tier)))
                    .collect();
                Cell::from(Line::from(spans))
            }))
        })
        .collect();

    // Size columns to their content, measured over every row so the layout
    // does not jump while filtering.
    let widths: Vec<Constraint> = column_widths(section.columns(), all_rows)
        .into_iter()
        .map(|w| Constraint::Min(u16::try_from(w).unwrap_or(u16::MAX)))
        .collect();

    let selected = app.selected_index();

    let filter_info = if app.filter_active {
        format!(" /{}_", app.filter_text)
    } else if !app.filter_text.is_empty() {
        format!(" /{}/ [c:clear]", app.filter_text)
    } else {
        String::new()
    };

    let position_info = if !rows.is_empty() {
        format!(" [{}/{}]", selected + 1, rows.len())
    } else {
        String::new()
    };

    let title = format!(
        " {} ({}/{}){}{} ",
        section.label(),
        rows.len(),
        all_rows.len(),
        filter_info,
        position_info
    );

    let table = Table::new(body, widths)
        .header(header)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .row_highlight_style(app.theme.selected)
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    if !rows.is_empty() {
        state.select(Some(selected));
    }

    frame.render_stateful_widget(table, area, &mut state);
}
