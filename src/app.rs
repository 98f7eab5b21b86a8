//! Interactive viewer state and navigation logic.

use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::Result;

use crate::data::{Baseline, Report, Row, Section, Snapshot};
use crate::ui::Theme;

/// How long a status message stays visible.
const STATUS_MESSAGE_TTL: Duration = Duration::from_secs(3);

/// Main application state.
///
/// The snapshot is projected once at construction; navigation and filtering
/// only select among the projected rows.
pub struct App {
    pub running: bool,
    pub current_section: Section,
    pub show_help: bool,

    pub snapshot: Snapshot,
    pub baseline: Baseline,
    source_description: String,
    tables: Vec<(Section, Vec<Row>)>,

    /// Selected visual row, per section in `Section::ALL` order.
    selected: [usize; Section::ALL.len()],

    // Search/filter
    pub filter_text: String,
    pub filter_active: bool,

    pub theme: Theme,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    pub fn new(snapshot: Snapshot, baseline: Baseline, source_description: String) -> Self {
        let tables = Section::ALL
            .iter()
            .map(|section| (*section, section.rows(&snapshot, &baseline, true)))
            .collect();
        Self {
            running: true,
            current_section: Section::Model,
            show_help: false,
            snapshot,
            baseline,
            source_description,
            tables,
            selected: [0; Section::ALL.len()],
            filter_text: String::new(),
            filter_active: false,
            theme: Theme::auto_detect(),
            status_message: None,
        }
    }

    /// Returns a description of where the snapshot came from.
    pub fn source_description(&self) -> &str {
        &self.source_description
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired.
    pub fn get_status_message(&self) -> Option<&str> {
        match &self.status_message {
            Some((msg, time)) if time.elapsed() < STATUS_MESSAGE_TTL => Some(msg),
            _ => None,
        }
    }

    fn section_index(section: Section) -> usize {
        Section::ALL
            .iter()
            .position(|s| *s == section)
            .unwrap_or_default()
    }

    /// All projected rows of a section.
    pub fn rows(&self, section: Section) -> &[Row] {
        self.tables
            .iter()
            .find(|(s, _)| *s == section)
            .map(|(_, rows)| rows.as_slice())
            .unwrap_or_default()
    }

    /// Rows of the current section that match the filter.
    pub fn visible_rows(&self) -> Vec<&Row> {
        self.rows(self.current_section)
            .iter()
            .filter(|row| self.matches_filter(row))
            .collect()
    }

    /// The selected visual index in the current section.
    pub fn selected_index(&self) -> usize {
        let count = self.visible_rows().len();
        self.selected[Self::section_index(self.current_section)].min(count.saturating_sub(1))
    }

    fn set_selected(&mut self, index: usize) {
        self.selected[Self::section_index(self.current_section)] = index;
    }

    /// Switch to the next section.
    pub fn next_section(&mut self) {
        self.current_section = self.current_section.next();
    }

    /// Switch to the previous section.
    pub fn prev_section(&mut self) {
        self.current_section = self.current_section.prev();
    }

    /// Switch to a specific section.
    pub fn set_section(&mut self, section: Section) {
        self.current_section = section;
    }

    /// Move selection down by one row.
    pub fn select_next(&mut self) {
        self.select_next_n(1);
    }

    /// Move selection up by one row.
    pub fn select_prev(&mut self) {
        self.select_prev_n(1);
    }

    /// Move selection down by n rows.
    pub fn select_next_n(&mut self, n: usize) {
        let max = self.visible_rows().len().saturating_sub(1);
        let index = (self.selected_index() + n).min(max);
        self.set_selected(index);
    }

    /// Move selection up by n rows.
    pub fn select_prev_n(&mut self, n: usize) {
        let index = self.selected_index().saturating_sub(n);
        self.set_selected(index);
    }

    /// Jump to the first row.
    pub fn select_first(&mut self) {
        self.set_selected(0);
    }

    /// Jump to the last row.
    pub fn select_last(&mut self) {
        let last = self.visible_rows().len().saturating_sub(1);
        self.set_selected(last);
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Enter filter input mode (starts capturing keystrokes for search).
    pub fn start_filter(&mut self) {
        self.filter_active = true;
    }

    /// Exit filter input mode without clearing the filter text.
    pub fn cancel_filter(&mut self) {
        self.filter_active = false;
    }

    /// Clear the filter text and exit filter mode.
    pub fn clear_filter(&mut self) {
        self.filter_text.clear();
        self.filter_active = false;
    }

    /// Append a character to the filter text.
    pub fn filter_push(&mut self, c: char) {
        self.filter_text.push(c);
        self.select_first();
    }

    /// Remove the last character from the filter text.
    pub fn filter_pop(&mut self) {
        self.filter_text.pop();
    }

    /// A row matches when any of its cells contains the filter text.
    pub fn matches_filter(&self, row: &Row) -> bool {
        if self.filter_text.is_empty() {
            return true;
        }
        let search = self.filter_text.to_lowercase();
        row.iter()
            .any(|cell| cell.text.to_lowercase().contains(&search))
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Export every section to a JSON file.
    pub fn export_state(&self, path: &Path) -> Result<()> {
        Report::build(&self.snapshot, &self.baseline).write(path)
    }
}
