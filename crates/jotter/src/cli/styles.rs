//! Terminal styles for the jotter CLI.
//!
//! Output code refers to styles by what the text *is* (a title, a timestamp,
//! a folder name), never by color. Changing the look means editing this file
//! only. All styles are registered once through `once_cell::sync::Lazy`.

use console::Style;
use once_cell::sync::Lazy;

pub static INDEX: Lazy<Style> = Lazy::new(|| Style::new().yellow());
pub static TITLE: Lazy<Style> = Lazy::new(|| Style::new().bold());
pub static ACTIVE: Lazy<Style> = Lazy::new(|| Style::new().cyan().bold());
pub static FOLDER: Lazy<Style> = Lazy::new(|| Style::new().blue());
pub static TAG: Lazy<Style> = Lazy::new(|| Style::new().magenta());
pub static TIME: Lazy<Style> = Lazy::new(|| Style::new().color256(246).italic());
pub static MUTED: Lazy<Style> = Lazy::new(|| Style::new().dim());
pub static SUCCESS: Lazy<Style> = Lazy::new(|| Style::new().green());
pub static WARNING: Lazy<Style> = Lazy::new(|| Style::new().yellow());
pub static ERROR: Lazy<Style> = Lazy::new(|| Style::new().red());

/// Applies `style`. `Some(_)` forces styling on or off, `None` defers to
/// console's terminal detection.
pub fn paint(style: &Style, text: &str, use_color: Option<bool>) -> String {
    match use_color {
        Some(enabled) => style
            .clone()
            .force_styling(enabled)
            .apply_to(text)
            .to_string(),
        None => style.apply_to(text).to_string(),
    }
}
