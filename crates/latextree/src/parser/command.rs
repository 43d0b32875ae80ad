//! Parsing commands.

use super::{Parser, MAX_EXPANSION_DEPTH};
use crate::error::{Error, LoadError, Result};
use crate::loader::with_default_extension;
use crate::registry::{Custom, Family};
use crate::token::{CatCode, Token, TokenStream};
use crate::tree::{Command, Math, MathDelimiter, NoExpand, NodeId, NodeKind};
use std::path::PathBuf;

impl Parser {
    /// Parses a command whose control sequence token has just been read.
    pub(super) fn parse_command(&mut self, token: Token, tokens: &mut TokenStream) -> Result<NodeId> {
        let name = token.value().to_string();
        if name == "(" || name == "[" {
            return self.parse_latex_math(token, tokens);
        }
        let starred = tokens.next_if(|t| t.is_other('*')).is_some();
        let species = self.registry.species_or_register(&name, Family::Command);
        let mut command = Command::new(name.as_str(), species.genus.clone(), species.family);
        command.starred = starred;
        while let Some(space) = tokens.next_if(|t| {
            t.cat_code() == CatCode::IgnoredSpace || (starred && t.cat_code() == CatCode::Space)
        }) {
            command.post_space.push_str(space.value());
        }
        let no_expand = command.genus == "Macro";
        command.args = self.parse_arguments(&name, tokens, no_expand, true)?;
        if !starred {
            self.set_number(&mut command);
        }

        let mut children = vec![];
        if command.genus == "Numeral" {
            command.no_expand = NoExpand::SuppressChildren;
            if let Some(arg) = command.arg("counter") {
                let counter = self.tree.text(arg).trim().to_string();
                if let Some(value) = self.counter(&counter) {
                    children.push(self.tree.add(NodeKind::Number(value)));
                }
            }
        } else if let Some(format) = self.counter_format(&name) {
            command.no_expand = NoExpand::SuppressChildren;
            children = self.parse_fragment(&format)?;
        }

        let mut error = None;
        if self.registry.is_block_command(&name) {
            let stops = self.registry.block_command_stops(&name);
            children.extend(self.parse_block(tokens, &stops)?);
        } else if self.registry.is_block_declaration(&name) {
            let stops = self.registry.block_declaration_stops(&name);
            children.extend(self.parse_block(tokens, &stops)?);
        } else if command.genus == "Macro" {
            self.parse_macro(&command);
        } else if command.genus == "Counters" {
            self.update_counters(&command);
        } else if let Some(Custom::Command { body, default }) = self.registry.custom(&name).cloned()
        {
            command.no_expand = NoExpand::SuppressChildren;
            children = self.expand_command(&token, &command, &body, default.as_deref())?;
        } else if command.genus == "Input" {
            command.no_expand = NoExpand::SuppressChildren;
            let (included, load_error) = self.parse_input(&command)?;
            children = included;
            error = load_error;
        }

        let id = self.tree.add_with_children(NodeKind::Command(command), children);
        if let Some(error) = error {
            self.tree.set_error(id, error);
        }
        Ok(id)
    }

    /// Parses the body of a block command or declaration.
    ///
    /// The stop token that ends the block is returned to the stream for the enclosing level.
    fn parse_block(&mut self, tokens: &mut TokenStream, stops: &[Token]) -> Result<Vec<NodeId>> {
        let (children, stop) = self.parse_until(tokens, stops)?;
        if let Some(stop) = stop {
            tokens.push(stop);
        }
        Ok(children)
    }

    /// `\(...\)` and `\[...\]`.
    fn parse_latex_math(&mut self, open: Token, tokens: &mut TokenStream) -> Result<NodeId> {
        let display = open.value() == "[";
        let close = Token::new_control_sequence(if display { "]" } else { ")" });
        let mut math = Math::new(MathDelimiter::Latex);
        if let Some(space) = tokens.next_if(|t| t.cat_code() == CatCode::IgnoredSpace) {
            math.pre_space = space.value().to_string();
        }
        let (children, stop) = self.parse_until(tokens, &[close])?;
        if stop.is_none() {
            return Err(Error::UnterminatedMath { token: open });
        }
        if let Some(space) = tokens.next_if(|t| t.cat_code() == CatCode::IgnoredSpace) {
            math.post_space = space.value().to_string();
        }
        let kind = if display {
            NodeKind::Display(math)
        } else {
            NodeKind::Inline(math)
        };
        Ok(self.tree.add_with_children(kind, children))
    }

    /// The marker format shown by `\the<counter>`, if the name is of that form.
    fn counter_format(&self, name: &str) -> Option<String> {
        let counter = name.strip_prefix("the")?;
        if self.registry.custom(name).is_some() || self.counter(counter).is_none() {
            return None;
        }
        Some(self.marker_format(counter))
    }

    /// Substitutes the arguments into the body of a macro and parses the result.
    fn expand_command(
        &mut self,
        token: &Token,
        command: &Command,
        body: &str,
        default: Option<&str>,
    ) -> Result<Vec<NodeId>> {
        if self.expansion_depth >= MAX_EXPANSION_DEPTH {
            return Err(Error::ExpansionDepthExceeded {
                name: command.species.clone(),
                token: token.clone(),
                max: MAX_EXPANSION_DEPTH,
            });
        }
        let args: Vec<Option<String>> = command
            .args
            .values()
            .map(|arg| arg.map(|id| self.tree.text(id)))
            .collect();
        let expansion = super::macros::substitute(body, &args, default);
        log::trace!("expanding \\{} to {:?}", command.species, expansion);
        self.expansion_depth += 1;
        let result = self.parse_user_code(&expansion);
        self.expansion_depth -= 1;
        result
    }

    /// Parses code written by the document author, like a macro body.
    ///
    /// Code that does not parse on its own, such as the `\begin{center}` half of an environment
    ///     definition, is kept as text.
    pub(super) fn parse_user_code(&mut self, code: &str) -> Result<Vec<NodeId>> {
        if code.is_empty() {
            return Ok(vec![]);
        }
        let checkpoint = self.tree.checkpoint();
        let counters = self.counters.clone();
        match self.parse_fragment(code) {
            Ok(nodes) => Ok(nodes),
            Err(err @ Error::ExpansionDepthExceeded { .. }) => Err(err),
            Err(err) => {
                log::debug!("keeping {code:?} as text: {err}");
                self.tree.rollback(checkpoint);
                self.counters = counters;
                Ok(vec![self.add_text(code.to_string())])
            }
        }
    }

    /// Loads and parses the file named by `\input`, `\include` or `\bibliography`.
    ///
    /// Unless resources are strict, a file that cannot be loaded is returned as an error
    ///     to record on the node and the parse continues.
    fn parse_input(&mut self, command: &Command) -> Result<(Vec<NodeId>, Option<LoadError>)> {
        let Some(arg) = command.args.values().flatten().next() else {
            return Ok((vec![], None));
        };
        let name = self.tree.text(*arg).trim().to_string();
        let extension = if command.species == "bibliography" {
            "bbl"
        } else {
            "tex"
        };
        let file = with_default_extension(&name, extension);
        let path = match &self.root {
            Some(root) => root.join(&file),
            None => PathBuf::from(&file),
        };
        let result = if self.include_depth >= self.options.max_include_depth {
            Err(LoadError::DepthExceeded {
                path: path.display().to_string(),
                max: self.options.max_include_depth,
            })
        } else {
            self.loader
                .read_to_string(&path)
                .map_err(|err| LoadError::NotFound {
                    path: path.display().to_string(),
                    message: err.to_string(),
                })
        };
        match result {
            Ok(source) => {
                log::debug!("including {}", path.display());
                self.include_depth += 1;
                let included = self.parse_fragment(&source);
                self.include_depth -= 1;
                Ok((included?, None))
            }
            Err(err) if self.options.strict_resources => Err(err.into()),
            Err(err) => {
                log::warn!("{err}");
                Ok((vec![], Some(err)))
            }
        }
    }
}
