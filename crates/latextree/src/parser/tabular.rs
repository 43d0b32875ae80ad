//! Parsing the body of a `tabular` environment into rows and cells.

use super::Parser;
use crate::error::Result;
use crate::registry::Family;
use crate::token::{CatCode, Token, TokenStream};
use crate::tree::{Command, NodeId, NodeKind};

/// Splits a column specification like `|l|c||r|` into one format per column.
///
/// Each format is the column letter preceded by an `L` for every rule on its left.
/// Rules after the last column add an `R` to its format.
/// Braced arguments such as the width in `p{3cm}` are kept with their column.
pub(crate) fn column_formats(colspec: &str) -> Vec<String> {
    let mut formats: Vec<String> = vec![];
    let mut rules = String::new();
    let mut depth = 0_usize;
    for c in colspec.chars() {
        match c {
            '{' | '}' => {
                if c == '{' {
                    depth += 1;
                } else {
                    depth = depth.saturating_sub(1);
                }
                if let Some(last) = formats.last_mut() {
                    last.push(c);
                }
            }
            _ if depth > 0 => {
                if let Some(last) = formats.last_mut() {
                    last.push(c);
                }
            }
            '|' => rules.push('L'),
            c if c.is_whitespace() => {}
            c => {
                rules.push(c);
                formats.push(std::mem::take(&mut rules));
            }
        }
    }
    if let Some(last) = formats.last_mut() {
        last.extend(rules.chars().map(|_| 'R'));
    }
    formats
}

impl Parser {
    /// Parses rows until the end of the table.
    ///
    /// `\hline` commands are kept as siblings of the rows and recorded in the row format:
    ///     a `T` on the row below the rule, or a `B` on the last row for a closing rule.
    /// The returned nodes are the children of the environment.
    /// The stop token that ends the table is left in the stream.
    pub(super) fn parse_tabular(
        &mut self,
        colspec: &str,
        tokens: &mut TokenStream,
        stops: &[Token],
    ) -> Result<Vec<NodeId>> {
        let formats = column_formats(colspec);
        let row_end = Token::new_control_sequence("\\");
        let mut cell_stops = stops.to_vec();
        cell_stops.push(Token::new_alignment_tab("&"));
        cell_stops.push(row_end.clone());

        let mut nodes = vec![];
        let mut last_row: Option<NodeId> = None;
        loop {
            let mut whitespace = String::new();
            while let Some(token) = tokens.next_if(|t| t.cat_code().is_whitespace()) {
                whitespace.push_str(token.value());
            }
            if !whitespace.is_empty() {
                nodes.push(self.add_text(whitespace));
            }

            let mut row_format = String::new();
            while let Some(hline) = tokens.next_if(|t| t.is_control_sequence("hline")) {
                nodes.push(self.parse_hline(hline, tokens));
                row_format.push('T');
            }

            let mut cells = vec![];
            loop {
                let format = formats.get(cells.len()).cloned().unwrap_or_default();
                let (children, stop) = self.parse_until(tokens, &cell_stops)?;
                cells.push(self.tree.add_with_children(NodeKind::Cell { format }, children));
                match stop {
                    Some(token) if token.cat_code() == CatCode::AlignmentTab => continue,
                    Some(token) => {
                        tokens.push(token);
                        break;
                    }
                    None => break,
                }
            }

            let end = match tokens.next_if(|t| *t == row_end) {
                Some(token) => Some(self.parse_command(token, tokens)?),
                None => None,
            };
            // A row without content is folded into the rules of the row above.
            // Its cells and row end stay in the environment so that the source is kept.
            let empty = cells.iter().all(|cell| self.tree[*cell].children().is_empty());
            if empty && (last_row.is_some() || row_format.is_empty()) {
                if let Some(row) = last_row {
                    if let NodeKind::Row { format } = self.tree.kind_mut(row) {
                        format.extend(row_format.chars().map(|_| 'B'));
                    }
                }
                for (i, cell) in cells.into_iter().enumerate() {
                    if i > 0 {
                        nodes.push(self.add_text("&".to_string()));
                    }
                    nodes.push(cell);
                }
                nodes.extend(end);
            } else {
                cells.extend(end);
                let row = self.tree.add_with_children(NodeKind::Row { format: row_format }, cells);
                nodes.push(row);
                last_row = Some(row);
            }
            if end.is_none() {
                return Ok(nodes);
            }
        }
    }

    fn parse_hline(&mut self, token: Token, tokens: &mut TokenStream) -> NodeId {
        let species = self.registry.species_or_register(token.value(), Family::Command);
        let mut command = Command::new(token.value(), species.genus.clone(), species.family);
        if let Some(space) =
            tokens.next_if(|t| matches!(t.cat_code(), CatCode::Space | CatCode::IgnoredSpace))
        {
            command.post_space = space.value().to_string();
        }
        self.tree.add(NodeKind::Command(command))
    }
}
