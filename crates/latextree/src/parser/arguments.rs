//! Parsing the arguments of commands and environments.

use super::Parser;
use crate::error::{Error, Result};
use crate::registry::{Family, ParamKind};
use crate::token::{CatCode, Token, TokenStream};
use crate::tree::{ArgTable, Command, NodeId, NodeKind};

impl Parser {
    /// Parses the arguments of a species in parameter order.
    ///
    /// With `no_expand` set, mandatory arguments are captured as raw text instead of parsed.
    /// This is how the bodies of macro definitions are read.
    /// With `undelimited` set, a mandatory argument may be a single token without braces,
    ///     as in `\textbf1`; otherwise a missing mandatory argument is recorded as absent.
    pub(super) fn parse_arguments(
        &mut self,
        name: &str,
        tokens: &mut TokenStream,
        no_expand: bool,
        undelimited: bool,
    ) -> Result<ArgTable> {
        let params = self.registry.params(name).to_vec();
        let mut args = ArgTable::new();
        for param in params {
            let arg = match param.kind {
                ParamKind::Starred => continue,
                ParamKind::Optional => self.parse_optional_argument(tokens)?,
                ParamKind::Mandatory => {
                    self.parse_mandatory_argument(name, tokens, no_expand, undelimited)?
                }
            };
            args.insert(param.name, arg);
        }
        Ok(args)
    }

    fn parse_optional_argument(&mut self, tokens: &mut TokenStream) -> Result<Option<NodeId>> {
        let Some(open) = tokens.next_if(|t| t.is_other('[')) else {
            return Ok(None);
        };
        let (children, stop) = self.parse_until(tokens, &[Token::new_other("]")])?;
        if stop.is_none() {
            return Err(Error::UnterminatedOptionalArgument { token: open });
        }
        Ok(Some(self.tree.add_with_children(NodeKind::OptArg, children)))
    }

    pub(super) fn parse_mandatory_argument(
        &mut self,
        command: &str,
        tokens: &mut TokenStream,
        no_expand: bool,
        undelimited: bool,
    ) -> Result<Option<NodeId>> {
        if let Some(open) = tokens.next_if(|t| t.cat_code() == CatCode::BeginGroup) {
            let group = if no_expand {
                self.capture_group(open, tokens)?
            } else {
                self.parse_group(open, tokens)?
            };
            return Ok(Some(group));
        }
        if !undelimited {
            return Ok(None);
        }
        let Some(token) = tokens.next_token() else {
            return Err(Error::InvalidArgument {
                command: command.to_string(),
                token: None,
            });
        };
        let node = match token.cat_code() {
            CatCode::Escape => {
                let post_space = tokens
                    .next_if(|t| t.cat_code() == CatCode::IgnoredSpace)
                    .map(|t| t.value().to_string())
                    .unwrap_or_default();
                if no_expand {
                    self.add_text(format!("{token}{post_space}"))
                } else {
                    let species = self
                        .registry
                        .species_or_register(token.value(), Family::Command);
                    let mut argument =
                        Command::new(token.value(), species.genus.clone(), species.family);
                    argument.post_space = post_space;
                    self.tree.add(NodeKind::Command(argument))
                }
            }
            CatCode::Letter | CatCode::Other => self.add_text(token.value().to_string()),
            _ => {
                return Err(Error::InvalidArgument {
                    command: command.to_string(),
                    token: Some(token),
                })
            }
        };
        Ok(Some(node))
    }

    /// Reads a brace-delimited argument without interpreting it.
    ///
    /// The result is a group holding a single text node with the source between the braces.
    fn capture_group(&mut self, open: Token, tokens: &mut TokenStream) -> Result<NodeId> {
        let mut text = String::new();
        let mut depth = 1_usize;
        loop {
            let Some(token) = tokens.next_token() else {
                return Err(Error::UnbalancedGroup { token: open });
            };
            match token.cat_code() {
                CatCode::BeginGroup => depth += 1,
                CatCode::EndGroup => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
                _ => {}
            }
            text.push_str(&token.to_string());
        }
        let children = if text.is_empty() {
            vec![]
        } else {
            vec![self.add_text(text)]
        };
        Ok(self.tree.add_with_children(NodeKind::Group, children))
    }

    /// Reads tokens as literal text until a stop token.
    ///
    /// Returns the text and the stop token, which is consumed.
    pub(super) fn capture_verbatim(
        &mut self,
        tokens: &mut TokenStream,
        stops: &[Token],
    ) -> (String, Option<Token>) {
        let mut text = String::new();
        while let Some(token) = tokens.next_token() {
            if stops.contains(&token) {
                return (text, Some(token));
            }
            text.push_str(&token.to_string());
        }
        (text, None)
    }
}
