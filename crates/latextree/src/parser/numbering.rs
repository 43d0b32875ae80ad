//! Counters and the numbering of sections, floats, theorems and list items.

use super::Parser;
use crate::numeral;
use crate::token::{lexer, CatCode, Token};
use crate::tree::Command;

/// Maximum nesting of `\the<counter>` inside marker formats.
const MAX_FORMAT_DEPTH: usize = 8;

impl Parser {
    /// Steps the counter of a numbered species and records the number and marker on the command.
    ///
    /// Items with an explicit marker, as in `\item[(a)]`, use the marker and step no counter.
    pub(super) fn set_number(&mut self, command: &mut Command) {
        if command.genus == "Item" {
            if let Some(marker) = command.arg("marker") {
                command.marker = Some(self.tree.text(marker));
                return;
            }
        }
        let counter = if self.registry.is_numbered(&command.species) {
            command.species.clone()
        } else if let Some(counter) = self.registry.numbered_like(&command.species) {
            counter.to_string()
        } else if command.genus == "Item" {
            match self.item_counter() {
                Some(counter) => counter.to_string(),
                None => return,
            }
        } else {
            return;
        };
        let value = self.counters.entry(counter.clone()).or_insert(0);
        *value = value.saturating_add(1);
        command.number = Some(*value);
        let format = self.marker_format(&counter);
        command.marker = Some(self.render_format(&format, 0));
        let resets: Vec<String> = self
            .registry
            .resets(&counter)
            .into_iter()
            .map(str::to_string)
            .collect();
        for reset in resets {
            self.counters.insert(reset, 0);
        }
    }

    /// The marker format of a counter, `\arabic{counter}` if none is registered.
    pub(super) fn marker_format(&self, counter: &str) -> String {
        match self.registry.marker_format(counter) {
            Some(format) => format.to_string(),
            None => format!("\\arabic{{{counter}}}"),
        }
    }

    /// Renders a marker format with the current counter values.
    ///
    /// Numeral commands like `\alph{enumii}` are replaced by the formatted counter value
    ///     and `\the<counter>` by that counter's own marker.
    /// Everything else is copied literally.
    pub(super) fn render_format(&self, format: &str, depth: usize) -> String {
        let tokens = lexer::lex(format);
        let mut marker = String::new();
        let mut i = 0;
        while i < tokens.len() {
            let token = &tokens[i];
            i += 1;
            let Some(name) = token.control_sequence_name() else {
                marker.push_str(token.value());
                continue;
            };
            if self.registry.is_genus(name, "Numeral") {
                if let Some((counter, next)) = braced_text(&tokens, i) {
                    i = next;
                    let value = self.counter(&counter).unwrap_or(0);
                    match numeral::format(name, value) {
                        Some(s) => marker.push_str(&s),
                        None => {
                            log::warn!("unknown numeral style `\\{name}`; using arabic numerals");
                            marker.push_str(&value.to_string());
                        }
                    }
                    continue;
                }
            }
            match name.strip_prefix("the") {
                Some(counter) if depth < MAX_FORMAT_DEPTH && self.counter(counter).is_some() => {
                    let format = self.marker_format(counter);
                    marker.push_str(&self.render_format(&format, depth + 1));
                }
                _ => marker.push_str(&token.to_string()),
            }
        }
        marker
    }

    /// Applies `\newcounter`, `\setcounter` and the other counter declarations.
    pub(super) fn update_counters(&mut self, command: &Command) {
        let text = |name: &str| {
            command
                .arg(name)
                .map(|id| self.tree.text(id).trim().to_string())
        };
        match command.species.as_str() {
            "newcounter" => {
                let Some(name) = text("name") else {
                    return;
                };
                let master = text("master").filter(|m| self.registry.is_numbered(m));
                self.registry.add_numbered(&name, master.as_deref());
                self.counters.insert(name, 0);
            }
            "setcounter" | "addtocounter" => {
                let (Some(counter), Some(value)) = (text("counter"), text("value")) else {
                    return;
                };
                let Ok(value) = value.parse::<i64>() else {
                    log::warn!("`\\{}`: `{value}` is not a number", command.species);
                    return;
                };
                if self.counter(&counter).is_none() {
                    log::warn!("`\\{}`: no counter `{counter}`", command.species);
                }
                let current = self.counters.entry(counter).or_insert(0);
                if command.species == "setcounter" {
                    *current = value;
                } else {
                    *current = current.saturating_add(value);
                }
            }
            "counterwithin" => {
                if let (Some(name), Some(master)) = (text("name"), text("master")) {
                    self.registry.add_numbered(&name, Some(&master));
                }
            }
            "counterwithout" => {
                if let Some(name) = text("name") {
                    self.registry.add_numbered(&name, None);
                }
            }
            _ => {}
        }
    }
}

/// Reads `{text}` starting at the given index.
///
/// Returns the text and the index after the closing brace.
fn braced_text(tokens: &[Token], start: usize) -> Option<(String, usize)> {
    if tokens.get(start)?.cat_code() != CatCode::BeginGroup {
        return None;
    }
    let mut text = String::new();
    for (i, token) in tokens.iter().enumerate().skip(start + 1) {
        if token.cat_code() == CatCode::EndGroup {
            return Some((text.trim().to_string(), i + 1));
        }
        text.push_str(token.value());
    }
    None
}
