//! Parsing environments.
//!
//! An environment is opened either LaTeX style with `\begin{name}` or TeX style with `\name`,
//!     and closed with `\end{name}` or `\endname`.
//! The two styles may be mixed and the tree records which were used.

use super::Parser;
use crate::error::{Error, Result};
use crate::registry::{Custom, Family};
use crate::token::{CatCode, Token, TokenStream};
use crate::tree::{Command, Environment, NoExpand, NodeId, NodeKind};

const ENUMERATE_COUNTERS: [&str; 4] = ["enumi", "enumii", "enumiii", "enumiv"];

impl Parser {
    /// Parses an environment whose opening control sequence has just been read.
    pub(super) fn parse_environment(
        &mut self,
        token: Token,
        tokens: &mut TokenStream,
        tex_style: bool,
    ) -> Result<NodeId> {
        let mut pre_space = String::new();
        let (name, starred) = if tex_style {
            let starred = tokens.next_if(|t| t.is_other('*')).is_some();
            if let Some(space) = tokens.next_if(|t| t.cat_code() == CatCode::IgnoredSpace) {
                pre_space = space.value().to_string();
            }
            (token.value().to_string(), starred)
        } else {
            if let Some(space) = tokens.next_if(|t| t.cat_code() == CatCode::IgnoredSpace) {
                pre_space = space.value().to_string();
            }
            let name = self.read_environment_name(tokens, "\\begin")?;
            match name.strip_suffix('*') {
                Some(base) if self.registry.get(&name).is_none() && !base.is_empty() => {
                    (base.to_string(), true)
                }
                _ => (name, false),
            }
        };
        log::trace!("environment `{name}` at byte {}", token.position());

        let species = self.registry.species_or_register(&name, Family::Environment);
        let mut command = Command::new(name.as_str(), species.genus.clone(), species.family);
        command.starred = starred;
        command.args = self.parse_arguments(&name, tokens, false, false)?;
        if !starred {
            self.set_number(&mut command);
        }

        let mut stops = vec![Token::new_control_sequence("end")];
        if tex_style {
            stops.push(Token::new_control_sequence(format!("end{name}")));
        }
        let mut pre_children = vec![];
        let mut post_children = vec![];
        let (children, stop) = match command.genus.as_str() {
            "List" => self.parse_list_body(&name, tokens, &stops)?,
            "Tabular" => {
                let colspec = command
                    .arg("cols")
                    .map(|id| self.tree.text(id))
                    .unwrap_or_default();
                let children = self.parse_tabular(&colspec, tokens, &stops)?;
                (children, tokens.next_token())
            }
            "Verbatim" => {
                command.no_expand = NoExpand::VerbatimChildren;
                let (text, stop) = self.capture_verbatim(tokens, &stops);
                let children = if text.is_empty() {
                    vec![]
                } else {
                    vec![self.add_text(text)]
                };
                (children, stop)
            }
            _ => {
                if let Some(Custom::Environment { begin, end }) =
                    self.registry.custom(&name).cloned()
                {
                    let args: Vec<Option<String>> = command
                        .args
                        .values()
                        .map(|arg| arg.map(|id| self.tree.text(id)))
                        .collect();
                    let begin = super::macros::substitute(&begin, &args, None);
                    pre_children = self.parse_user_code(&begin)?;
                    post_children = self.parse_user_code(&end)?;
                }
                self.parse_until(tokens, &stops)?
            }
        };
        let Some(stop) = stop else {
            return Err(Error::MalformedEnvironment {
                token: Some(token),
                message: format!("`{name}` is never closed"),
            });
        };

        let tex_style_end = !stop.is_control_sequence("end");
        if tex_style_end {
            if starred && tokens.next_if(|t| t.is_other('*')).is_none() {
                return Err(Error::MalformedEnvironment {
                    token: tokens.peek_token().cloned(),
                    message: format!("expected `*` after `{stop}`"),
                });
            }
            if let Some(space) = tokens.next_if(|t| t.cat_code() == CatCode::IgnoredSpace) {
                command.post_space = space.value().to_string();
            }
        } else {
            if let Some(space) = tokens.next_if(|t| t.cat_code() == CatCode::IgnoredSpace) {
                command.post_space = space.value().to_string();
            }
            let end_name = self.read_environment_name(tokens, "\\end")?;
            let expected = if starred {
                format!("{name}*")
            } else {
                name.clone()
            };
            if end_name != expected {
                return Err(Error::MalformedEnvironment {
                    token: Some(stop),
                    message: format!("`{expected}` is ended by `\\end{{{end_name}}}`"),
                });
            }
        }

        let environment = Environment {
            command,
            tex_style,
            tex_style_end,
            pre_space,
            pre_children,
            post_children,
        };
        Ok(self
            .tree
            .add_with_children(NodeKind::Environment(environment), children))
    }

    /// Reads `{name}` after `\begin` or `\end`.
    fn read_environment_name(&mut self, tokens: &mut TokenStream, after: &str) -> Result<String> {
        if tokens
            .next_if(|t| t.cat_code() == CatCode::BeginGroup)
            .is_none()
        {
            return Err(Error::MalformedEnvironment {
                token: tokens.peek_token().cloned(),
                message: format!("expected `{{` after `{after}`"),
            });
        }
        let mut name = String::new();
        loop {
            match tokens.next_token() {
                None => {
                    return Err(Error::MalformedEnvironment {
                        token: None,
                        message: format!("unterminated environment name `{name}`"),
                    })
                }
                Some(t) if t.cat_code() == CatCode::EndGroup => break,
                Some(t) if matches!(t.cat_code(), CatCode::Letter | CatCode::Other) => {
                    name.push_str(t.value())
                }
                Some(t) => {
                    return Err(Error::MalformedEnvironment {
                        token: Some(t),
                        message: "environment names may only contain letters and symbols".into(),
                    })
                }
            }
        }
        if name.is_empty() {
            return Err(Error::MalformedEnvironment {
                token: None,
                message: format!("empty environment name after `{after}`"),
            });
        }
        Ok(name)
    }

    /// Parses the body of a list, tracking the nesting of enumerations for item numbering.
    fn parse_list_body(
        &mut self,
        name: &str,
        tokens: &mut TokenStream,
        stops: &[Token],
    ) -> Result<(Vec<NodeId>, Option<Token>)> {
        let enumerate = name == "enumerate";
        self.lists.push(name.to_string());
        if enumerate {
            self.enum_depth += 1;
        }
        let result = self.parse_until(tokens, stops);
        self.lists.pop();
        if enumerate {
            self.enum_depth -= 1;
            for counter in ENUMERATE_COUNTERS.iter().skip(self.enum_depth) {
                self.counters.insert(counter.to_string(), 0);
            }
        }
        result
    }

    /// The counter numbering `\item` at the current position, if any.
    pub(super) fn item_counter(&self) -> Option<&'static str> {
        if self.lists.last().map(String::as_str) != Some("enumerate") {
            return None;
        }
        ENUMERATE_COUNTERS
            .get(self.enum_depth.checked_sub(1)?)
            .copied()
    }
}
