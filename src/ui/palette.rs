//! Tier decoration for plain-text output.

use crossterm::style::{style, Color, Stylize};

use crate::data::Tier;

/// Turns a cell's text and tier into the string written to the terminal.
pub trait Palette {
    fn paint(&self, text: &str, tier: Option<Tier>) -> String;
}

/// Emits text unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Monochrome;

impl Palette for Monochrome {
    fn paint(&self, text: &str, _tier: Option<Tier>) -> String {
        text.to_string()
    }
}

/// ANSI foreground colors per tier.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ansi;

impl Ansi {
    pub fn color(tier: Tier) -> Color {
        match tier {
            Tier::Nominal => Color::Green,
            Tier::Informational => Color::Yellow,
            // 256-color orange
            Tier::Degraded => Color::AnsiValue(208),
            Tier::Critical => Color::Red,
        }
    }
}

impl Palette for Ansi {
    fn paint(&self, text: &str, tier: Option<Tier>) -> String {
        match tier {
            Some(tier) => style(text).with(Self::color(tier)).to_string(),
            None => text.to_string(),
        }
    }
}
