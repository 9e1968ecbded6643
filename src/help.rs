//! Key hints shown under the dial.
//!
//! Anything with key bindings implements [`KeyMap`] and hands itself to
//! [`Model::view`]. The short form is one line of `key desc` pairs; the full
//! form lays the groups out as columns. Disabled bindings are skipped.
//!
//! ```rust
//! use dial_timer::help::{self, KeyMap};
//! use dial_timer::key::Binding;
//! use crossterm::event::KeyCode;
//!
//! struct Keys {
//!     quit: Binding,
//! }
//!
//! impl KeyMap for Keys {
//!     fn short_help(&self) -> Vec<&Binding> {
//!         vec![&self.quit]
//!     }
//!     fn full_help(&self) -> Vec<Vec<&Binding>> {
//!         vec![vec![&self.quit]]
//!     }
//! }
//!
//! let keys = Keys { quit: Binding::new(vec![KeyCode::Char('q')]).with_help("q", "quit") };
//! let view = help::Model::new().view(&keys);
//! assert!(view.contains("quit"));
//! ```

use crate::key;
use lipgloss_extras::lipgloss;
use lipgloss_extras::prelude::*;

/// Supplies the bindings to show.
pub trait KeyMap {
    /// Bindings for the one-line form.
    fn short_help(&self) -> Vec<&key::Binding>;
    /// Binding groups for the column form.
    fn full_help(&self) -> Vec<Vec<&key::Binding>>;
}

/// Styles for the help view.
#[derive(Debug, Clone)]
pub struct Styles {
    /// Key names.
    pub key: Style,
    /// Descriptions.
    pub desc: Style,
    /// Separators between items and columns.
    pub separator: Style,
}

impl Default for Styles {
    fn default() -> Self {
        use lipgloss::AdaptiveColor;

        Self {
            key: Style::new().foreground(AdaptiveColor {
                Light: "#909090",
                Dark: "#626262",
            }),
            desc: Style::new().foreground(AdaptiveColor {
                Light: "#B2B2B2",
                Dark: "#4A4A4A",
            }),
            separator: Style::new().foreground(AdaptiveColor {
                Light: "#DDDADA",
                Dark: "#3C3C3C",
            }),
        }
    }
}

/// The help view.
#[derive(Debug, Clone)]
pub struct Model {
    /// Show the column form instead of the single line.
    pub show_all: bool,
    /// Maximum width in columns; zero means unlimited.
    pub width: usize,
    /// Separator between items of the short form.
    pub short_separator: String,
    /// Separator between columns of the full form.
    pub full_separator: String,
    /// Marker appended when items were cut.
    pub ellipsis: String,
    /// Styles.
    pub styles: Styles,
}

impl Default for Model {
    fn default() -> Self {
        Self {
            show_all: false,
            width: 0,
            short_separator: " • ".to_string(),
            full_separator: "    ".to_string(),
            ellipsis: "…".to_string(),
            styles: Styles::default(),
        }
    }
}

impl Model {
    /// Creates a help view in the short form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum width.
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Renders the bindings of `keymap` in the current form.
    pub fn view<K: KeyMap>(&self, keymap: &K) -> String {
        if self.show_all {
            self.full_view(keymap.full_help())
        } else {
            self.short_view(keymap.short_help())
        }
    }

    fn item(&self, binding: &key::Binding) -> String {
        let help = binding.help();
        format!(
            "{} {}",
            self.styles.key.clone().inline(true).render(&help.key),
            self.styles.desc.clone().inline(true).render(&help.desc)
        )
    }

    /// Renders bindings on one line, cutting with an ellipsis when too wide.
    pub fn short_view(&self, bindings: Vec<&key::Binding>) -> String {
        let separator = self
            .styles
            .separator
            .clone()
            .inline(true)
            .render(&self.short_separator);

        let mut out = String::new();
        let mut used = 0;
        for binding in bindings.into_iter().filter(|b| b.enabled()) {
            let sep = if used > 0 { separator.as_str() } else { "" };
            let item = format!("{}{}", sep, self.item(binding));
            let width = lipgloss::width_visible(&item);
            if !self.fits(used, width) {
                out.push_str(&self.tail(used));
                break;
            }
            used += width;
            out.push_str(&item);
        }
        out
    }

    /// Renders each group as a column.
    pub fn full_view(&self, groups: Vec<Vec<&key::Binding>>) -> String {
        let separator = self
            .styles
            .separator
            .clone()
            .inline(true)
            .render(&self.full_separator);
        let separator_width = lipgloss::width_visible(&separator);

        let mut columns: Vec<String> = Vec::new();
        let mut used = 0;
        for group in groups {
            let rows: Vec<String> = group
                .into_iter()
                .filter(|b| b.enabled())
                .map(|b| self.item(b))
                .collect();
            if rows.is_empty() {
                continue;
            }
            let column = rows.join("\n");
            let mut width = lipgloss::width_visible(&column);
            if !columns.is_empty() {
                width += separator_width;
            }
            if !self.fits(used, width) {
                let tail = self.tail(used);
                if !tail.is_empty() {
                    columns.push(tail);
                }
                break;
            }
            used += width;
            columns.push(column);
        }

        let mut parts: Vec<&str> = Vec::new();
        for (i, column) in columns.iter().enumerate() {
            if i > 0 {
                parts.push(separator.as_str());
            }
            parts.push(column.as_str());
        }
        lipgloss::join_horizontal(lipgloss::TOP, &parts)
    }

    fn fits(&self, used: usize, width: usize) -> bool {
        self.width == 0 || used + width <= self.width
    }

    // The ellipsis, or nothing if even that does not fit.
    fn tail(&self, used: usize) -> String {
        let tail = format!(
            " {}",
            self.styles
                .separator
                .clone()
                .inline(true)
                .render(&self.ellipsis)
        );
        if self.fits(used, lipgloss::width_visible(&tail)) {
            tail
        } else {
            String::new()
        }
    }
}
