//! The document tree
//!
//! The tree is an arena: every [Node] lives in one vector owned by the [Tree]
//!     and nodes refer to their parent, children and arguments by [NodeId].
//! Nodes are created by the parser and are not modified after the parse finishes.
//!
//! Every node can be converted back to the source text it was parsed from;
//!     see [Tree::chars].
//! The tree can also be printed for debugging ([Tree::pretty_print])
//!     and projected to XML ([Tree::xml]).

mod query;
mod render;

pub use query::{Preamble, TocEntry};

use crate::error::LoadError;
use crate::registry::Family;
use latextree_stdext::collections::orderedmap::OrderedMap;

/// Index of a node in its tree.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// What happens to a node's children when the node is converted back to source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum NoExpand {
    /// The children are the parsed source and are written out.
    #[default]
    Expand,
    /// The children were generated by the parser (a macro expansion, an included file,
    ///     a counter value) and are not part of the source.
    SuppressChildren,
    /// The children hold source text that was captured without being interpreted.
    VerbatimChildren,
}

/// Arguments of a command, keyed on parameter name in declaration order.
///
/// An optional argument that was not given has the value [None].
pub type ArgTable = OrderedMap<String, Option<NodeId>>;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Command {
    pub species: String,
    pub genus: String,
    pub family: Family,
    pub args: ArgTable,
    pub starred: bool,
    pub no_expand: NoExpand,
    /// Whitespace between the command name (or its star) and what follows.
    pub post_space: String,
    pub number: Option<i64>,
    pub marker: Option<String>,
}

impl Command {
    pub fn new<S: Into<String>, G: Into<String>>(species: S, genus: G, family: Family) -> Command {
        Command {
            species: species.into(),
            genus: genus.into(),
            family,
            args: ArgTable::new(),
            starred: false,
            no_expand: NoExpand::Expand,
            post_space: String::new(),
            number: None,
            marker: None,
        }
    }

    /// Returns the argument with the given name, if it was given.
    pub fn arg(&self, name: &str) -> Option<NodeId> {
        self.args.get(name).copied().flatten()
    }

    /// Whether the species is a control symbol like `\$` rather than a control word.
    pub fn is_control_symbol(&self) -> bool {
        let mut chars = self.species.chars();
        matches!((chars.next(), chars.next()), (Some(c), None) if !c.is_alphanumeric())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Environment {
    /// The opening command. Its `post_space` is the whitespace inside the closing command.
    pub command: Command,
    /// Opened with `\name` rather than `\begin{name}`.
    pub tex_style: bool,
    /// Closed with `\endname` rather than `\end{name}`.
    pub tex_style_end: bool,
    /// Whitespace after `\begin` or `\name`.
    pub pre_space: String,
    /// Expansion of the begin code of a user-defined environment.
    pub pre_children: Vec<NodeId>,
    /// Expansion of the end code of a user-defined environment.
    pub post_children: Vec<NodeId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum MathDelimiter {
    /// `$...$` and `$$...$$`.
    Tex,
    /// `\(...\)` and `\[...\]`.
    Latex,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Math {
    pub delimiter: MathDelimiter,
    pub pre_space: String,
    pub post_space: String,
}

impl Math {
    pub fn new(delimiter: MathDelimiter) -> Math {
        Math {
            delimiter,
            pre_space: String::new(),
            post_space: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum NodeKind {
    Root,
    Text(String),
    /// A counter value. It has no source text.
    Number(i64),
    Group,
    OptArg,
    Command(Command),
    Environment(Environment),
    Inline(Math),
    Display(Math),
    Superscript(Command),
    Subscript(Command),
    ActiveCharacter(char),
    Comment {
        text: String,
        /// Whether the comment was ended by a newline rather than the end of the input.
        newline: bool,
    },
    /// Whitespace between the two newlines of a blank line.
    ParagraphBreak(String),
    /// A table row. The format has one letter per horizontal rule below or above the row.
    Row {
        format: String,
    },
    /// A table cell. The format records vertical rules: `L` on the left, `R` on the right.
    Cell {
        format: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    kind: NodeKind,
    error: Option<LoadError>,
}

impl Node {
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// The error raised while loading the file requested by this node, if any.
    pub fn error(&self) -> Option<&LoadError> {
        self.error.as_ref()
    }

    /// The command data of commands, environments and scripts.
    pub fn command(&self) -> Option<&Command> {
        match &self.kind {
            NodeKind::Command(c) | NodeKind::Superscript(c) | NodeKind::Subscript(c) => Some(c),
            NodeKind::Environment(e) => Some(&e.command),
            _ => None,
        }
    }

    pub fn arg(&self, name: &str) -> Option<NodeId> {
        self.command()?.arg(name)
    }

    pub fn species(&self) -> &str {
        match &self.kind {
            NodeKind::Root => "Root",
            NodeKind::Text(_) => "Text",
            NodeKind::Number(_) => "Number",
            NodeKind::Group => "Group",
            NodeKind::OptArg => "OptArg",
            NodeKind::Command(c) | NodeKind::Superscript(c) | NodeKind::Subscript(c) => {
                &c.species
            }
            NodeKind::Environment(e) => &e.command.species,
            NodeKind::Inline(_) => "Inline",
            NodeKind::Display(_) => "Display",
            NodeKind::ActiveCharacter(_) => "ActiveCharacter",
            NodeKind::Comment { .. } => "Comment",
            NodeKind::ParagraphBreak(_) => "Par",
            NodeKind::Row { .. } => "Row",
            NodeKind::Cell { .. } => "Cell",
        }
    }

    pub fn genus(&self) -> &str {
        match &self.kind {
            NodeKind::Command(c) => &c.genus,
            NodeKind::Environment(e) => &e.command.genus,
            NodeKind::Text(_) | NodeKind::Number(_) => "Content",
            NodeKind::Inline(_) => "Group",
            NodeKind::Display(_) => "MathEnv",
            NodeKind::Superscript(_) | NodeKind::Subscript(_) | NodeKind::ActiveCharacter(_) => {
                "Command"
            }
            NodeKind::ParagraphBreak(_) => "Break",
            NodeKind::Root
            | NodeKind::Group
            | NodeKind::OptArg
            | NodeKind::Comment { .. }
            | NodeKind::Row { .. }
            | NodeKind::Cell { .. } => "Node",
        }
    }

    pub fn family(&self) -> Option<Family> {
        self.command().map(|c| c.family)
    }
}

/// A parsed document.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Tree {
    nodes: Vec<Node>,
    root: NodeId,
    resource_errors: Vec<LoadError>,
}

impl Default for Tree {
    fn default() -> Self {
        Tree::new()
    }
}

impl std::ops::Index<NodeId> for Tree {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }
}

impl Tree {
    /// Returns a tree containing only the root node.
    pub fn new() -> Tree {
        Tree {
            nodes: vec![Node {
                parent: None,
                children: vec![],
                kind: NodeKind::Root,
                error: None,
            }],
            root: NodeId(0),
            resource_errors: vec![],
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Number of nodes in the arena, including the root.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// All errors raised by the file loader during the parse, in the order they occurred.
    pub fn resource_errors(&self) -> &[LoadError] {
        &self.resource_errors
    }

    /// Adds a detached node. Argument and expansion nodes referenced by the kind are attached to it.
    pub(crate) fn add(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        let mut owned: Vec<NodeId> = match &kind {
            NodeKind::Command(c) | NodeKind::Superscript(c) | NodeKind::Subscript(c) => {
                c.args.values().flatten().copied().collect()
            }
            NodeKind::Environment(e) => e.command.args.values().flatten().copied().collect(),
            _ => vec![],
        };
        if let NodeKind::Environment(e) = &kind {
            owned.extend(e.pre_children.iter().chain(e.post_children.iter()));
        }
        for child in owned {
            self.nodes[child.0].parent = Some(id);
        }
        self.nodes.push(Node {
            parent: None,
            children: vec![],
            kind,
            error: None,
        });
        id
    }

    pub(crate) fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    pub(crate) fn append_children<I: IntoIterator<Item = NodeId>>(
        &mut self,
        parent: NodeId,
        children: I,
    ) {
        for child in children {
            self.append_child(parent, child);
        }
    }

    /// Adds a node and makes the given nodes its children.
    pub(crate) fn add_with_children(&mut self, kind: NodeKind, children: Vec<NodeId>) -> NodeId {
        let id = self.add(kind);
        self.append_children(id, children);
        id
    }

    pub(crate) fn kind_mut(&mut self, id: NodeId) -> &mut NodeKind {
        &mut self.nodes[id.0].kind
    }

    /// Marks the current end of the arena for [Tree::rollback].
    pub(crate) fn checkpoint(&self) -> (usize, usize) {
        (self.nodes.len(), self.resource_errors.len())
    }

    /// Drops every node and resource error added since the checkpoint.
    ///
    /// The dropped nodes must not be referenced by nodes that are kept.
    pub(crate) fn rollback(&mut self, (nodes, resource_errors): (usize, usize)) {
        self.nodes.truncate(nodes);
        self.resource_errors.truncate(resource_errors);
    }

    pub(crate) fn set_error(&mut self, id: NodeId, error: LoadError) {
        self.resource_errors.push(error.clone());
        self.nodes[id.0].error = Some(error);
    }

    /// The species name of the node.
    pub fn species(&self, id: NodeId) -> &str {
        self[id].species()
    }

    pub fn genus(&self, id: NodeId) -> &str {
        self[id].genus()
    }

    /// Top-level nodes of the document.
    pub fn top_level(&self) -> &[NodeId] {
        self[self.root].children()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_attaches_arguments() {
        let mut tree = Tree::new();
        let text = tree.add(NodeKind::Text("Hello".into()));
        let group = tree.add_with_children(NodeKind::Group, vec![text]);
        let mut command = Command::new("textbf", "FontStyle", Family::Command);
        command.args.insert("text".into(), Some(group));
        let id = tree.add(NodeKind::Command(command));
        tree.append_child(tree.root(), id);

        assert_eq!(tree[group].parent(), Some(id));
        assert_eq!(tree[text].parent(), Some(group));
        assert_eq!(tree[id].parent(), Some(tree.root()));
        assert_eq!(tree[id].arg("text"), Some(group));
        assert_eq!(tree.species(id), "textbf");
        assert_eq!(tree.genus(text), "Content");
        assert_eq!(tree.top_level(), &[id]);
    }

    #[test]
    fn control_symbols() {
        assert!(Command::new("$", "Special", Family::Command).is_control_symbol());
        assert!(Command::new("\\", "Tabular", Family::Command).is_control_symbol());
        assert!(!Command::new("S", "Symbol", Family::Command).is_control_symbol());
        assert!(!Command::new("textbf", "FontStyle", Family::Command).is_control_symbol());
    }

    #[test]
    fn resource_errors_are_collected() {
        let mut tree = Tree::new();
        let id = tree.add(NodeKind::Command(Command::new("input", "Input", Family::Command)));
        let error = LoadError::NotFound {
            path: "a.tex".into(),
            message: "not found".into(),
        };
        tree.set_error(id, error.clone());
        assert_eq!(tree[id].error(), Some(&error));
        assert_eq!(tree.resource_errors(), &[error]);
    }

    #[test]
    fn rollback_drops_later_nodes() {
        let mut tree = Tree::new();
        let kept = tree.add(NodeKind::Text("kept".into()));
        let checkpoint = tree.checkpoint();
        let id = tree.add(NodeKind::Command(Command::new("input", "Input", Family::Command)));
        tree.set_error(
            id,
            LoadError::NotFound {
                path: "a.tex".into(),
                message: "not found".into(),
            },
        );
        tree.rollback(checkpoint);
        assert_eq!(tree.len(), checkpoint.0);
        assert!(tree.resource_errors().is_empty());
        assert_eq!(tree[kept].kind(), &NodeKind::Text("kept".into()));
    }
}
