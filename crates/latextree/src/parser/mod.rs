//! The recursive-descent parser
//!
//! The parser reads a [TokenStream] and builds a [Tree].
//! Parsing happens at levels: each group, environment body, argument and block-structured
//!     command reads tokens until it reaches one of its stop tokens or the end of the input.
//! A stop token that belongs to an enclosing level (for example the `\section` that ends the
//!     previous section) is pushed back so that the enclosing level sees it too.
//!
//! The parser owns a working copy of its [Registry].
//! Definitions made inside a document (`\newcommand`, `\newtheorem`, ...) and counter values
//!     last for one parse only; each call to [Parser::parse] starts from the registry as it was
//!     configured with [Parser::load_definitions].

mod arguments;
mod command;
mod environment;
mod macros;
mod numbering;
mod tabular;

use crate::error::{Error, Result};
use crate::loader::{FileLoader, RealFileSystem};
use crate::registry::{Definitions, Family, Registry};
use crate::token::{lexer, CatCode, Token, TokenStream};
use crate::tree::{Command, Math, MathDelimiter, NodeId, NodeKind, Tree};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Maximum number of nested expansions of document-defined macros.
pub const MAX_EXPANSION_DEPTH: usize = 64;

/// Options controlling how a document is parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Directory that `\input`, `\include` and `\bibliography` paths are relative to.
    ///
    /// When unset, paths are relative to the directory of the file passed to
    ///     [Parser::parse_file], or to the working directory.
    pub root: Option<PathBuf>,
    /// Maximum nesting of included files.
    pub max_include_depth: usize,
    /// Abort the parse when a file cannot be loaded instead of recording the error on the node.
    pub strict_resources: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            root: None,
            max_include_depth: 4,
            strict_resources: false,
        }
    }
}

impl ParseOptions {
    pub fn root<P: Into<PathBuf>>(mut self, root: P) -> Self {
        self.root = Some(root.into());
        self
    }

    pub fn max_include_depth(mut self, max: usize) -> Self {
        self.max_include_depth = max;
        self
    }

    pub fn strict_resources(mut self, strict: bool) -> Self {
        self.strict_resources = strict;
        self
    }
}

/// How a parse level ended.
#[derive(Debug)]
enum Exit {
    /// One of the level's stop tokens was reached. It has been consumed.
    Stop(Token),
    EndOfInput,
    /// An invalid character was reached. It has been consumed.
    Invalid(Token),
}

pub struct Parser {
    base: Registry,
    registry: Registry,
    counters: HashMap<String, i64>,
    lists: Vec<String>,
    enum_depth: usize,
    loader: Box<dyn FileLoader>,
    options: ParseOptions,
    root: Option<PathBuf>,
    include_depth: usize,
    expansion_depth: usize,
    tree: Tree,
}

impl Default for Parser {
    fn default() -> Self {
        Parser::new()
    }
}

impl Parser {
    /// Returns a parser with the built-in definitions that reads included files from disk.
    pub fn new() -> Parser {
        Parser::with_options(ParseOptions::default())
    }

    pub fn with_options(options: ParseOptions) -> Parser {
        let base = Registry::default();
        Parser {
            registry: base.clone(),
            base,
            counters: Default::default(),
            lists: vec![],
            enum_depth: 0,
            loader: Box::new(RealFileSystem),
            root: options.root.clone(),
            options,
            include_depth: 0,
            expansion_depth: 0,
            tree: Tree::new(),
        }
    }

    /// Replaces the file loader used for included files and definition files.
    pub fn with_loader(mut self, loader: Box<dyn FileLoader>) -> Parser {
        self.loader = loader;
        self
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Extends the registry used by subsequent parses.
    pub fn load_definitions(&mut self, defs: &Definitions) {
        self.base.load(defs);
        self.registry = self.base.clone();
        self.counters.clear();
    }

    /// Reads a JSON definitions overlay and extends the registry with it.
    pub fn load_definitions_file(&mut self, path: &Path) -> Result<()> {
        let json = self
            .loader
            .read_to_string(path)
            .map_err(|source| Error::Io {
                path: path.display().to_string(),
                source,
            })?;
        let defs = Definitions::from_json(&json)?;
        self.load_definitions(&defs);
        Ok(())
    }

    /// The registry as it stands after the most recent parse.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The current value of a counter.
    ///
    /// Returns [None] if the name is not a counter.
    pub fn counter(&self, name: &str) -> Option<i64> {
        match self.counters.get(name) {
            Some(value) => Some(*value),
            None if self.registry.is_numbered(name) => Some(0),
            None => None,
        }
    }

    /// Parses a complete document.
    pub fn parse(&mut self, source: &str) -> Result<Tree> {
        self.root = self.options.root.clone();
        self.parse_source(source)
    }

    /// Reads and parses a document.
    ///
    /// Unless a root is set in the options, included files are resolved relative to the
    ///     directory containing the document.
    pub fn parse_file(&mut self, path: &Path) -> Result<Tree> {
        let source = self
            .loader
            .read_to_string(path)
            .map_err(|source| Error::Io {
                path: path.display().to_string(),
                source,
            })?;
        self.root = self
            .options
            .root
            .clone()
            .or_else(|| path.parent().map(Path::to_path_buf));
        self.parse_source(&source)
    }

    fn parse_source(&mut self, source: &str) -> Result<Tree> {
        log::info!("parsing {} bytes", source.len());
        self.registry = self.base.clone();
        self.counters.clear();
        self.lists.clear();
        self.enum_depth = 0;
        self.include_depth = 0;
        self.expansion_depth = 0;
        self.tree = Tree::new();
        let mut tokens = lexer::tokenize(source);
        let result = self.parse_until(&mut tokens, &[]);
        let mut tree = std::mem::take(&mut self.tree);
        let (children, _) = result?;
        let root = tree.root();
        tree.append_children(root, children);
        log::info!(
            "parsed {} nodes with {} resource errors",
            tree.len(),
            tree.resource_errors().len()
        );
        Ok(tree)
    }

    /// Parses a piece of source text that is not part of the main token stream,
    ///     like a macro expansion or an included file.
    fn parse_fragment(&mut self, source: &str) -> Result<Vec<NodeId>> {
        let mut tokens = lexer::tokenize(source);
        let (nodes, _) = self.parse_until(&mut tokens, &[])?;
        Ok(nodes)
    }

    fn add_text(&mut self, text: String) -> NodeId {
        self.tree.add(NodeKind::Text(text))
    }

    /// Parses until a stop token or the end of the input.
    ///
    /// Invalid characters end a parse level; they are kept as text and parsing resumes after them.
    /// Returns the stop token if one was reached.
    fn parse_until(
        &mut self,
        tokens: &mut TokenStream,
        stops: &[Token],
    ) -> Result<(Vec<NodeId>, Option<Token>)> {
        let mut nodes = vec![];
        loop {
            let (mut more, exit) = self.parse_tokens(tokens, stops)?;
            nodes.append(&mut more);
            match exit {
                Exit::Stop(token) => return Ok((nodes, Some(token))),
                Exit::EndOfInput => return Ok((nodes, None)),
                Exit::Invalid(token) => nodes.push(self.add_text(token.value().to_string())),
            }
        }
    }

    fn parse_tokens(
        &mut self,
        tokens: &mut TokenStream,
        stops: &[Token],
    ) -> Result<(Vec<NodeId>, Exit)> {
        let mut nodes = vec![];
        let mut text = String::new();
        let exit = loop {
            let Some(token) = tokens.next_token() else {
                break Exit::EndOfInput;
            };
            if stops.contains(&token) {
                break Exit::Stop(token);
            }
            let node = match token.cat_code() {
                CatCode::Space
                | CatCode::Letter
                | CatCode::Other
                | CatCode::IgnoredSpace
                | CatCode::AlignmentTab
                | CatCode::Parameter => {
                    text.push_str(token.value());
                    continue;
                }
                CatCode::Ignored => continue,
                CatCode::EndOfLine => {
                    let mut spaces = String::new();
                    while let Some(space) = tokens.next_if(|t| t.cat_code() == CatCode::Space) {
                        spaces.push_str(space.value());
                    }
                    if tokens.next_if(|t| t.cat_code() == CatCode::EndOfLine).is_none() {
                        text.push_str(token.value());
                        text.push_str(&spaces);
                        continue;
                    }
                    self.tree.add(NodeKind::ParagraphBreak(spaces))
                }
                CatCode::Escape => {
                    if token.is_control_sequence("begin") {
                        self.parse_environment(token, tokens, false)?
                    } else if self.registry.is_environment(token.value()) {
                        self.parse_environment(token, tokens, true)?
                    } else {
                        self.parse_command(token, tokens)?
                    }
                }
                CatCode::BeginGroup => self.parse_group(token, tokens)?,
                CatCode::EndGroup => return Err(Error::UnexpectedEndGroup { token }),
                CatCode::MathShift => self.parse_math_shift(token, tokens)?,
                CatCode::Superscript | CatCode::Subscript => self.parse_script(token, tokens)?,
                CatCode::Active => self.parse_active_character(token)?,
                CatCode::Comment => self.parse_comment(tokens),
                CatCode::Invalid => {
                    log::warn!(
                        "invalid character {:?} at byte {}",
                        token.value(),
                        token.position()
                    );
                    break Exit::Invalid(token);
                }
            };
            if !text.is_empty() {
                nodes.push(self.add_text(std::mem::take(&mut text)));
            }
            nodes.push(node);
        };
        if !text.is_empty() {
            nodes.push(self.add_text(text));
        }
        Ok((nodes, exit))
    }

    fn parse_group(&mut self, open: Token, tokens: &mut TokenStream) -> Result<NodeId> {
        let (children, stop) = self.parse_until(tokens, &[Token::new_end_group("}")])?;
        if stop.is_none() {
            return Err(Error::UnbalancedGroup { token: open });
        }
        Ok(self.tree.add_with_children(NodeKind::Group, children))
    }

    fn parse_math_shift(&mut self, open: Token, tokens: &mut TokenStream) -> Result<NodeId> {
        let dollar = Token::new_math_shift("$");
        let display = tokens.next_if(|t| t.cat_code() == CatCode::MathShift).is_some();
        let (children, stop) = self.parse_until(tokens, &[dollar])?;
        if stop.is_none() {
            return Err(Error::UnterminatedMath { token: open });
        }
        let math = Math::new(MathDelimiter::Tex);
        let kind = if display {
            if tokens.next_if(|t| t.cat_code() == CatCode::MathShift).is_none() {
                return Err(Error::MismatchedDisplayMath { token: open });
            }
            NodeKind::Display(math)
        } else {
            NodeKind::Inline(math)
        };
        Ok(self.tree.add_with_children(kind, children))
    }

    fn parse_script(&mut self, token: Token, tokens: &mut TokenStream) -> Result<NodeId> {
        let superscript = token.cat_code() == CatCode::Superscript;
        let name = if superscript { "Superscript" } else { "Subscript" };
        let mut command = Command::new(name, "Command", Family::Command);
        while let Some(space) = tokens.next_if(|t| t.cat_code() == CatCode::Space) {
            command.post_space.push_str(space.value());
        }
        let contents = self.parse_mandatory_argument(token.value(), tokens, false, true)?;
        command.args.insert("contents".to_string(), contents);
        let kind = if superscript {
            NodeKind::Superscript(command)
        } else {
            NodeKind::Subscript(command)
        };
        Ok(self.tree.add(kind))
    }

    fn parse_active_character(&mut self, token: Token) -> Result<NodeId> {
        let mut chars = token.value().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii() && !c.is_ascii_alphanumeric() => {
                if !self.registry.is_active(token.value()) {
                    log::debug!("active character `{c}` is not registered");
                }
                Ok(self.tree.add(NodeKind::ActiveCharacter(c)))
            }
            _ => Err(Error::InvalidActiveCharacter { token }),
        }
    }

    /// Reads a comment up to and including the end of the line.
    ///
    /// The lexer attaches a newline that follows a control sequence to the whitespace token
    ///     after it; that token is split and the text after the newline is returned to the stream.
    fn parse_comment(&mut self, tokens: &mut TokenStream) -> NodeId {
        let mut text = String::new();
        let mut newline = false;
        while let Some(token) = tokens.next_token() {
            match token.cat_code() {
                CatCode::EndOfLine => {
                    newline = true;
                    break;
                }
                CatCode::Escape => {
                    text.push_str(&token.to_string());
                    let Some(space) = tokens.next_if(|t| t.cat_code() == CatCode::IgnoredSpace)
                    else {
                        continue;
                    };
                    let Some(i) = space.value().find('\n') else {
                        text.push_str(space.value());
                        continue;
                    };
                    text.push_str(&space.value()[..i]);
                    let offset = space.position() + i + 1;
                    let rest = lexer::lex(&space.value()[i + 1..])
                        .into_iter()
                        .map(|t| Token::new(t.cat_code(), t.value(), t.position() + offset))
                        .collect();
                    tokens.splice(TokenStream::new(rest));
                    newline = true;
                    break;
                }
                _ => text.push_str(token.value()),
            }
        }
        self.tree.add(NodeKind::Comment { text, newline })
    }
}
