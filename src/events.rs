use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};

use crate::app::App;
use crate::data::Section;

/// Default file written by the export key.
pub const EXPORT_FILE: &str = "jujulens_export.json";

/// Poll for events with a timeout
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // If help is shown, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    if app.filter_active {
        handle_filter_input(app, key);
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit(),

        // Section switching
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.prev_section();
            } else {
                app.next_section();
            }
        }
        KeyCode::BackTab => app.prev_section(),
        KeyCode::Char(c @ '1'..='5') => {
            let index = c as usize - '1' as usize;
            if let Some(section) = Section::ALL.get(index) {
                app.set_section(*section);
            }
        }

        // Navigation (up/down for rows, left/right for tabs)
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Left | KeyCode::Char('h') => app.prev_section(),
        KeyCode::Right | KeyCode::Char('l') => app.next_section(),
        KeyCode::PageUp => app.select_prev_n(10),
        KeyCode::PageDown => app.select_next_n(10),
        KeyCode::Home => app.select_first(),
        KeyCode::End => app.select_last(),

        KeyCode::Char('?') => app.toggle_help(),

        KeyCode::Char('/') => app.start_filter(),
        KeyCode::Char('c') | KeyCode::Esc => {
            if !app.filter_text.is_empty() {
                app.clear_filter();
            }
        }

        KeyCode::Char('e') => {
            let export_path = PathBuf::from(EXPORT_FILE);
            match app.export_state(&export_path) {
                Ok(()) => {
                    app.set_status_message(format!("Exported to {}", export_path.display()));
                }
                Err(e) => {
                    app.set_status_message(format!("Export failed: {}", e));
                }
            }
        }

        _ => {}
    }
}

/// Handle key input while filter is active
fn handle_filter_input(app: &mut App, key: KeyEvent) {
    match key.code {
        // Confirm filter
        KeyCode::Enter => {
            app.filter_active = false;
        }

        // Cancel filter (keep text but exit input mode)
        KeyCode::Esc => {
            app.cancel_filter();
        }

        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.clear_filter();
        }

        KeyCode::Backspace => {
            app.filter_pop();
            if app.filter_text.is_empty() {
                app.filter_active = false;
            }
        }

        KeyCode::Char(c) => {
            app.filter_push(c);
        }

        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Baseline, Format, Snapshot};

    const STATUS: &str = r#"
model:
  name: default
  type: iaas
  controller: ctl
  cloud: aws
  version: 2.5.1
  sla: unsupported
  model-status: {current: available, since: "01 Jan 2020 10:00:00Z"}
"#;

    fn app() -> App {
        let snapshot = Snapshot::parse(STATUS, Format::Yaml).unwrap();
        App::new(snapshot, Baseline::default(), "test".to_string())
    }

    fn press(app: &mut App, code: KeyCode) {
        handle_key_event(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_quit() {
        let mut app = app();
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.running);
    }

    #[test]
    fn test_number_keys_select_section() {
        let mut app = app();
        press(&mut app, KeyCode::Char('4'));
        assert_eq!(app.current_section, Section::Machines);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.current_section, Section::Interfaces);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.current_section, Section::Machines);
    }

    #[test]
    fn test_filter_input_mode() {
        let mut app = app();
        press(&mut app, KeyCode::Char('/'));
        assert!(app.filter_active);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.running, "typing q while filtering must not quit");
        assert_eq!(app.filter_text, "q");
        press(&mut app, KeyCode::Enter);
        assert!(!app.filter_active);
        assert_eq!(app.filter_text, "q");
        press(&mut app, KeyCode::Esc);
        assert!(app.filter_text.is_empty());
    }

    #[test]
    fn test_any_key_closes_help() {
        let mut app = app();
        press(&mut app, KeyCode::Char('?'));
        assert!(app.show_help);
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.show_help);
        assert!(app.running);
    }
}
