//! Serializations of the tree: source text, debug listing and XML.

use super::{Command, Environment, Math, MathDelimiter, NoExpand, NodeId, NodeKind, Tree};
use crate::registry::coredefs::character_name;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

const INDENT: &str = "----";

impl Tree {
    /// Reconstructs the source text of the whole document.
    pub fn chars(&self) -> String {
        self.node_chars(self.root)
    }

    /// Reconstructs the source text of one node.
    pub fn node_chars(&self, id: NodeId) -> String {
        let mut s = String::new();
        self.write_chars(id, &mut s);
        s
    }

    /// The source text inside a node's delimiters.
    ///
    /// For groups, optional arguments, cells and the root this is the source of the children.
    /// For every other node it is the node's own source.
    pub fn text(&self, id: NodeId) -> String {
        match self[id].kind() {
            NodeKind::Group | NodeKind::OptArg | NodeKind::Root | NodeKind::Cell { .. } => {
                let mut s = String::new();
                self.write_children(id, &mut s);
                s
            }
            _ => self.node_chars(id),
        }
    }

    fn write_children(&self, id: NodeId, s: &mut String) {
        for child in self[id].children() {
            self.write_chars(*child, s);
        }
    }

    fn write_args(&self, command: &Command, s: &mut String) {
        for id in command.args.values().flatten() {
            self.write_chars(*id, s);
        }
    }

    fn write_command_body(&self, id: NodeId, command: &Command, s: &mut String) {
        self.write_args(command, s);
        if command.no_expand != NoExpand::SuppressChildren {
            self.write_children(id, s);
        }
    }

    fn write_chars(&self, id: NodeId, s: &mut String) {
        match self[id].kind() {
            NodeKind::Root => self.write_children(id, s),
            NodeKind::Text(text) => s.push_str(text),
            NodeKind::Number(_) => {}
            NodeKind::Group => {
                s.push('{');
                self.write_children(id, s);
                s.push('}');
            }
            NodeKind::OptArg => {
                s.push('[');
                self.write_children(id, s);
                s.push(']');
            }
            NodeKind::Command(command) => {
                s.push('\\');
                s.push_str(&command.species);
                if command.starred {
                    s.push('*');
                }
                s.push_str(&command.post_space);
                self.write_command_body(id, command, s);
            }
            NodeKind::Environment(environment) => self.write_environment(id, environment, s),
            NodeKind::Inline(math) => self.write_math(id, math, ("$", "$"), ("\\(", "\\)"), s),
            NodeKind::Display(math) => {
                self.write_math(id, math, ("$$", "$$"), ("\\[", "\\]"), s)
            }
            NodeKind::Superscript(command) => self.write_script('^', id, command, s),
            NodeKind::Subscript(command) => self.write_script('_', id, command, s),
            NodeKind::ActiveCharacter(c) => s.push(*c),
            NodeKind::Comment { text, newline } => {
                s.push('%');
                s.push_str(text);
                if *newline {
                    s.push('\n');
                }
            }
            NodeKind::ParagraphBreak(space) => {
                s.push('\n');
                s.push_str(space);
                s.push('\n');
            }
            NodeKind::Row { .. } => {
                let mut first_cell = true;
                for child in self[id].children() {
                    if matches!(self[*child].kind(), NodeKind::Cell { .. }) {
                        if !first_cell {
                            s.push('&');
                        }
                        first_cell = false;
                    }
                    self.write_chars(*child, s);
                }
            }
            NodeKind::Cell { .. } => self.write_children(id, s),
        }
    }

    fn write_script(&self, symbol: char, id: NodeId, command: &Command, s: &mut String) {
        s.push(symbol);
        s.push_str(&command.post_space);
        self.write_command_body(id, command, s);
    }

    fn write_environment(&self, id: NodeId, environment: &Environment, s: &mut String) {
        let command = &environment.command;
        let name = match command.starred {
            true => format!("{}*", command.species),
            false => command.species.clone(),
        };
        if environment.tex_style {
            s.push('\\');
            s.push_str(&name);
            s.push_str(&environment.pre_space);
        } else {
            s.push_str("\\begin");
            s.push_str(&environment.pre_space);
            s.push('{');
            s.push_str(&name);
            s.push('}');
        }
        self.write_command_body(id, command, s);
        if environment.tex_style_end {
            s.push_str("\\end");
            s.push_str(&name);
            s.push_str(&command.post_space);
        } else {
            s.push_str("\\end");
            s.push_str(&command.post_space);
            s.push('{');
            s.push_str(&name);
            s.push('}');
        }
    }

    fn write_math(
        &self,
        id: NodeId,
        math: &Math,
        tex: (&str, &str),
        latex: (&str, &str),
        s: &mut String,
    ) {
        let (open, close) = match math.delimiter {
            MathDelimiter::Tex => tex,
            MathDelimiter::Latex => latex,
        };
        s.push_str(open);
        s.push_str(&math.pre_space);
        self.write_children(id, s);
        s.push_str(close);
        s.push_str(&math.post_space);
    }
}

/// Label and detail shown for a node in the debug listing and the XML projection.
struct Description {
    name: String,
    symbol: Option<String>,
    detail: Option<String>,
}

fn describe_command(command: &Command) -> Description {
    if command.is_control_symbol() {
        let symbol = command.species.clone();
        let name = symbol
            .chars()
            .next()
            .and_then(character_name)
            .unwrap_or("symbol")
            .to_string();
        return Description {
            name,
            symbol: Some(symbol),
            detail: None,
        };
    }
    let mut name = command.species.clone();
    if command.starred {
        name.push('*');
    }
    let detail = match (&command.marker, command.number) {
        (Some(marker), _) if !marker.is_empty() => Some(marker.clone()),
        (_, Some(number)) => Some(number.to_string()),
        _ => None,
    };
    Description {
        name,
        symbol: None,
        detail,
    }
}

fn delimiter_name(math: &Math) -> &'static str {
    match math.delimiter {
        MathDelimiter::Tex => "tex",
        MathDelimiter::Latex => "latex",
    }
}

impl Tree {
    /// Indented listing of the whole tree, one node per line.
    pub fn pretty_print(&self) -> String {
        self.node_pretty_print(self.root)
    }

    pub fn node_pretty_print(&self, id: NodeId) -> String {
        let mut lines = vec![];
        self.pretty_print_lines(id, 0, &mut lines);
        lines.join("\n")
    }

    fn pretty_print_line(&self, id: NodeId) -> String {
        let node = &self[id];
        let genus = node.genus();
        let (name, detail) = match node.kind() {
            NodeKind::Command(command) | NodeKind::Environment(Environment { command, .. }) => {
                let description = describe_command(command);
                let detail = description.symbol.or(description.detail);
                (description.name, detail)
            }
            NodeKind::Text(text) => ("Text".into(), Some(text.trim_matches('\n').to_string())),
            NodeKind::Number(n) => ("Number".into(), Some(n.to_string())),
            NodeKind::Inline(math) | NodeKind::Display(math) => (
                node.species().to_string(),
                Some(format!("delim='{}'", delimiter_name(math))),
            ),
            NodeKind::ActiveCharacter(c) => (node.species().to_string(), Some(c.to_string())),
            NodeKind::Comment { text, .. } => (node.species().to_string(), Some(text.clone())),
            NodeKind::Row { format } | NodeKind::Cell { format } if !format.is_empty() => {
                (node.species().to_string(), Some(format.clone()))
            }
            _ => (node.species().to_string(), None),
        };
        match detail {
            None => format!("{genus}:{name}"),
            Some(detail) => format!("{genus}:{name}({detail})"),
        }
    }

    fn pretty_print_lines(&self, id: NodeId, depth: usize, lines: &mut Vec<String>) {
        lines.push(format!("{}{}", INDENT.repeat(depth), self.pretty_print_line(id)));
        if let Some(command) = self[id].command() {
            for (name, arg) in command.args.iter() {
                if let Some(arg) = arg {
                    lines.push(format!("{}arg:{name}", INDENT.repeat(depth + 1)));
                    self.pretty_print_lines(*arg, depth + 2, lines);
                }
            }
        }
        for child in self[id].children() {
            self.pretty_print_lines(*child, depth + 1, lines);
        }
    }
}

fn is_xml_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

fn xml_element_name(name: &str) -> String {
    match name.strip_suffix('*') {
        Some(stem) => format!("{stem}star"),
        None => name.to_string(),
    }
}

impl Tree {
    /// XML projection of the whole tree.
    pub fn xml(&self) -> crate::Result<String> {
        self.node_xml(self.root)
    }

    pub fn node_xml(&self, id: NodeId) -> crate::Result<String> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
        self.write_xml(id, &mut writer)?;
        Ok(String::from_utf8_lossy(&writer.into_inner()).into_owned())
    }

    fn write_xml(&self, id: NodeId, writer: &mut Writer<Vec<u8>>) -> quick_xml::Result<()> {
        let node = &self[id];
        let mut attributes: Vec<(&str, String)> = vec![];
        let mut text = None;
        let name = match node.kind() {
            NodeKind::Command(command)
            | NodeKind::Environment(Environment { command, .. })
            | NodeKind::Superscript(command)
            | NodeKind::Subscript(command) => {
                let description = describe_command(command);
                if let Some(symbol) = description.symbol {
                    attributes.push(("symbol", symbol));
                }
                if command.starred {
                    attributes.push(("starred", "True".into()));
                }
                if let Some(number) = command.number {
                    attributes.push(("number", number.to_string()));
                }
                if let Some(marker) = &command.marker {
                    attributes.push(("marker", marker.clone()));
                }
                let name = xml_element_name(&command.species);
                if command.is_control_symbol() {
                    description.name
                } else if is_xml_name(&name) {
                    name
                } else {
                    attributes.push(("species", command.species.clone()));
                    command.family.to_string()
                }
            }
            NodeKind::Text(s) => {
                text = Some(s.trim_matches('\n').to_string());
                "Text".into()
            }
            NodeKind::Number(n) => {
                text = Some(n.to_string());
                "Number".into()
            }
            NodeKind::Inline(math) | NodeKind::Display(math) => {
                attributes.push(("delim", delimiter_name(math).into()));
                node.species().into()
            }
            NodeKind::ActiveCharacter(c) => {
                attributes.push(("symbol", c.to_string()));
                node.species().into()
            }
            NodeKind::Comment { text: comment, .. } => {
                text = Some(comment.clone());
                node.species().into()
            }
            NodeKind::Row { format } | NodeKind::Cell { format } => {
                if !format.is_empty() {
                    attributes.push(("format", format.clone()));
                }
                node.species().into()
            }
            _ => node.species().to_string(),
        };
        let mut start = BytesStart::new(name.as_str());
        for (key, value) in &attributes {
            start.push_attribute((*key, value.as_str()));
        }
        let args: Vec<(&String, NodeId)> = match node.command() {
            None => vec![],
            Some(command) => command
                .args
                .iter()
                .filter_map(|(name, arg)| arg.map(|arg| (name, arg)))
                .collect(),
        };
        let text = text.filter(|t| !t.is_empty());
        if args.is_empty() && node.children().is_empty() && text.is_none() {
            writer.write_event(Event::Empty(start))?;
            return Ok(());
        }
        writer.write_event(Event::Start(start))?;
        if let Some(text) = &text {
            writer.write_event(Event::Text(BytesText::new(text)))?;
        }
        if !args.is_empty() {
            writer.write_event(Event::Start(BytesStart::new("args")))?;
            for (arg_name, arg) in args {
                let arg_name = match is_xml_name(arg_name) {
                    true => arg_name.as_str(),
                    false => "arg",
                };
                writer.write_event(Event::Start(BytesStart::new(arg_name)))?;
                self.write_xml(arg, writer)?;
                writer.write_event(Event::End(BytesEnd::new(arg_name)))?;
            }
            writer.write_event(Event::End(BytesEnd::new("args")))?;
        }
        for child in node.children() {
            self.write_xml(*child, writer)?;
        }
        writer.write_event(Event::End(BytesEnd::new(name.as_str())))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Family;

    fn textbf(tree: &mut Tree, text: &str) -> NodeId {
        let text = tree.add(NodeKind::Text(text.into()));
        let group = tree.add_with_children(NodeKind::Group, vec![text]);
        let mut command = Command::new("textbf", "FontStyle", Family::Command);
        command.args.insert("text".into(), Some(group));
        tree.add(NodeKind::Command(command))
    }

    #[test]
    fn chars_of_command() {
        let mut tree = Tree::new();
        let pre = tree.add(NodeKind::Text("pre ".into()));
        let bold = textbf(&mut tree, "Hello");
        let post = tree.add(NodeKind::Text(" post".into()));
        tree.append_children(tree.root(), [pre, bold, post]);
        assert_eq!(tree.chars(), "pre \\textbf{Hello} post");
        assert_eq!(tree.node_chars(bold), "\\textbf{Hello}");
        let group = tree[bold].arg("text").unwrap();
        assert_eq!(tree.text(group), "Hello");
    }

    #[test]
    fn chars_of_environment_styles() {
        let mut tree = Tree::new();
        let body = tree.add(NodeKind::Text(" inside ".into()));
        let mut command = Command::new("center", "Align", Family::Environment);
        command.post_space = " ".into();
        let env = tree.add_with_children(
            NodeKind::Environment(Environment {
                command,
                tex_style: true,
                tex_style_end: true,
                pre_space: String::new(),
                pre_children: vec![],
                post_children: vec![],
            }),
            vec![body],
        );
        assert_eq!(tree.node_chars(env), "\\center inside \\endcenter ");
        if let NodeKind::Environment(e) = tree.kind_mut(env) {
            e.tex_style = false;
            e.tex_style_end = false;
            e.command.starred = true;
        }
        assert_eq!(tree.node_chars(env), "\\begin{center*} inside \\end {center*}");
    }

    #[test]
    fn suppressed_children() {
        let mut tree = Tree::new();
        let number = tree.add(NodeKind::Number(3));
        let arg_text = tree.add(NodeKind::Text("section".into()));
        let group = tree.add_with_children(NodeKind::Group, vec![arg_text]);
        let mut command = Command::new("arabic", "Numeral", Family::Command);
        command.args.insert("counter".into(), Some(group));
        command.no_expand = NoExpand::SuppressChildren;
        let id = tree.add_with_children(NodeKind::Command(command), vec![number]);
        assert_eq!(tree.node_chars(id), "\\arabic{section}");
    }

    #[test]
    fn chars_of_row() {
        let mut tree = Tree::new();
        let cells: Vec<NodeId> = ["a ", " b "]
            .iter()
            .map(|t| {
                let text = tree.add(NodeKind::Text(t.to_string()));
                tree.add_with_children(NodeKind::Cell { format: "".into() }, vec![text])
            })
            .collect();
        let row_end = tree.add(NodeKind::Command(Command::new("\\", "Tabular", Family::Command)));
        let mut children = cells;
        children.push(row_end);
        let row = tree.add_with_children(NodeKind::Row { format: "T".into() }, children);
        assert_eq!(tree.node_chars(row), "a & b \\\\");
    }

    #[test]
    fn chars_of_math_and_comments() {
        let mut tree = Tree::new();
        let x = tree.add(NodeKind::Text("x".into()));
        let mut math = Math::new(MathDelimiter::Latex);
        math.pre_space = " ".into();
        let inline = tree.add_with_children(NodeKind::Inline(math), vec![x]);
        assert_eq!(tree.node_chars(inline), "\\( x\\)");
        let comment = tree.add(NodeKind::Comment {
            text: " note".into(),
            newline: true,
        });
        assert_eq!(tree.node_chars(comment), "% note\n");
        let par = tree.add(NodeKind::ParagraphBreak("  ".into()));
        assert_eq!(tree.node_chars(par), "\n  \n");
    }

    #[test]
    fn pretty_print() {
        let mut tree = Tree::new();
        let bold = textbf(&mut tree, "Hello");
        let dollar = tree.add(NodeKind::Command(Command::new("$", "Special", Family::Command)));
        tree.append_children(tree.root(), [bold, dollar]);
        assert_eq!(
            tree.pretty_print(),
            "Node:Root\n\
             ----FontStyle:textbf\n\
             --------arg:text\n\
             ------------Node:Group\n\
             ----------------Content:Text(Hello)\n\
             ----Special:Dollar($)"
        );
    }

    #[test]
    fn pretty_print_marker() {
        let mut tree = Tree::new();
        let mut command = Command::new("section", "Section", Family::Command);
        command.number = Some(2);
        command.marker = Some("1.2".into());
        let id = tree.add(NodeKind::Command(command));
        assert_eq!(tree.node_pretty_print(id), "Section:section(1.2)");
    }

    #[test]
    fn xml() {
        let mut tree = Tree::new();
        let bold = textbf(&mut tree, "a < b");
        let dollar = tree.add(NodeKind::Command(Command::new("$", "Special", Family::Command)));
        let mut figure = Command::new("figure", "Float", Family::Environment);
        figure.starred = true;
        let figure = tree.add(NodeKind::Environment(Environment {
            command: figure,
            tex_style: false,
            tex_style_end: false,
            pre_space: String::new(),
            pre_children: vec![],
            post_children: vec![],
        }));
        tree.append_children(tree.root(), [bold, dollar, figure]);
        let xml = tree.xml().unwrap();
        assert!(xml.starts_with("<Root>"));
        assert!(xml.contains("<textbf>"));
        assert!(xml.contains("<args>"));
        assert!(xml.contains("<text>"));
        assert!(xml.contains("a &lt; b"));
        assert!(xml.contains("<Dollar symbol=\"$\"/>"));
        assert!(xml.contains("<figure starred=\"True\"/>"));
        assert!(xml.trim_end().ends_with("</Root>"));
    }

    #[test]
    fn xml_names() {
        assert!(is_xml_name("textbf"));
        assert!(is_xml_name("short-title"));
        assert!(!is_xml_name("1x"));
        assert!(!is_xml_name("a:b"));
        assert_eq!(xml_element_name("tabular*"), "tabularstar");
    }
}
