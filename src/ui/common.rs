//! Common UI components shared across sections.
//!
//! This module contains the header bar, tab bar, status bar, and help overlay.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
    Frame,
};

use crate::app::App;
use crate::data::{Section, Tier, TierSummary};

fn summary(app: &App) -> TierSummary {
    let mut summary = TierSummary::default();
    for section in Section::ALL {
        for tier in app.rows(section).iter().flatten().flat_map(|cell| cell.tiers()) {
            summary.record(tier);
        }
    }
    summary
}

/// Symbol of the worst tier on screen, `--` when nothing is decorated.
fn worst_marker(worst: Option<Tier>) -> String {
    format!(" {} ", worst.as_ref().map_or("--", Tier::symbol))
}

/// Render the header bar with the model overview.
///
/// Displays: worst tier, model name, canonical timestamp, cell counts per tier.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let counts = summary(app);
    let worst = counts.worst();
    let authority = app.snapshot.timestamp();
    let timestamp = if authority.is_seeded() {
        authority.clock_label()
    } else {
        "guessed".to_string()
    };

    let count_span = |count: usize, tier: Tier| {
        if count > 0 {
            Span::styled(count.to_string(), app.theme.tier_style(Some(tier)))
        } else {
            Span::styled("0", Style::default().add_modifier(Modifier::DIM))
        }
    };

    let line = Line::from(vec![
        Span::styled(worst_marker(worst), app.theme.tier_style(worst)),
        Span::styled(
            format!("{} ", app.snapshot.model.name),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!("│ {} │ {} │ ", app.snapshot.model.controller, timestamp)),
        count_span(counts.nominal, Tier::Nominal),
        Span::raw(" ok "),
        count_span(counts.informational, Tier::Informational),
        Span::raw(" info "),
        count_span(counts.degraded, Tier::Degraded),
        Span::raw(" warn "),
        count_span(counts.critical, Tier::Critical),
        Span::raw(" crit"),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

/// Render the tab bar, one tab per section.
pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = Section::ALL
        .iter()
        .enumerate()
        .map(|(i, section)| Line::from(format!(" {}:{} ", i + 1, section.label())))
        .collect();

    let selected = Section::ALL
        .iter()
        .position(|s| *s == app.current_section)
        .unwrap_or_default();

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(app.theme.tab_inactive)
        .highlight_style(app.theme.tab_active)
        .divider("|");

    frame.render_widget(tabs, area);
}

/// Render the status bar at the bottom.
///
/// Shows the source, available controls, or a temporary status message.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let controls = if app.filter_active {
        "Type to search | Enter:apply Esc:cancel"
    } else {
        "/:search Tab:switch e:export ?:help q:quit"
    };
    let status = format!(" {} | {}", app.source_description(), controls);

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));
    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the current section.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        Line::from(vec![Span::styled(" Navigation", bold)]),
        Line::from("  ←/→ h/l     Switch sections"),
        Line::from("  1-5         Jump to section"),
        Line::from("  ↑/↓ j/k     Navigate rows"),
        Line::from("  PgUp/PgDn   Jump 10 rows"),
        Line::from("  Home/End    Jump to first/last"),
        Line::from(""),
        Line::from(vec![Span::styled(" Filter", bold)]),
        Line::from("  /           Start filter/search"),
        Line::from("  c/Esc       Clear filter"),
        Line::from(""),
        Line::from(vec![Span::styled(" General", bold)]),
        Line::from("  e           Export to JSON"),
        Line::from("  q           Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    let help_width = 42u16.min(area.width.saturating_sub(4));
    let help_height = 20u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    frame.render_widget(Clear, help_area);
    frame.render_widget(paragraph, help_area);
}
