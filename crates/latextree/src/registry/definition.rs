//! Compact definition strings
//!
//! A definition string names a species and lists its parameters in order,
//!     for example `chapter[*][short-title]{title}`.
//! Each `[name]` is an optional parameter and each `{name}` is a mandatory parameter.
//! The optional parameter `[*]` is special: it declares that the species has a starred form.
//!
//! If the first character is not alphanumeric, the species is that single character
//!     (a control symbol like `\\` or `\$`) and the parameter list starts immediately after it.

/// The way a parameter is written in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ParamKind {
    /// A `*` immediately after the command name.
    Starred,
    /// An argument in square brackets that may be omitted.
    Optional,
    /// An argument in braces, or a single token.
    Mandatory,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Param {
    pub kind: ParamKind,
    pub name: String,
}

impl Param {
    pub fn new<S: Into<String>>(kind: ParamKind, name: S) -> Param {
        Param {
            kind,
            name: name.into(),
        }
    }

    pub fn mandatory<S: Into<String>>(name: S) -> Param {
        Param::new(ParamKind::Mandatory, name)
    }

    pub fn optional<S: Into<String>>(name: S) -> Param {
        Param::new(ParamKind::Optional, name)
    }
}

impl std::fmt::Display for Param {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            ParamKind::Starred => write!(f, "[*]"),
            ParamKind::Optional => write!(f, "[{}]", self.name),
            ParamKind::Mandatory => write!(f, "{{{}}}", self.name),
        }
    }
}

/// Splits a definition string into the species name and its parameters.
///
/// Returns [None] if the string has no name or its brackets are malformed.
pub fn parse_definition(definition: &str) -> Option<(String, Vec<Param>)> {
    let definition = definition.trim();
    let mut chars = definition.chars().peekable();
    let first = *chars.peek()?;
    let mut name = String::new();
    if first.is_alphanumeric() {
        while let Some(c) = chars.next_if(|c| c.is_alphabetic() || *c == '*') {
            name.push(c);
        }
    } else {
        name.push(first);
        chars.next();
    }
    if name.is_empty() {
        return None;
    }
    let mut params = Vec::new();
    while let Some(open) = chars.next() {
        let (close, kind) = match open {
            '[' => (']', ParamKind::Optional),
            '{' => ('}', ParamKind::Mandatory),
            _ => return None,
        };
        let mut param_name = String::new();
        loop {
            match chars.next() {
                None => return None,
                Some(c) if c == close => break,
                Some('[' | ']' | '{' | '}') => return None,
                Some(c) => param_name.push(c),
            }
        }
        let param = if kind == ParamKind::Optional && param_name == "*" {
            Param::new(ParamKind::Starred, "starred")
        } else {
            Param::new(kind, param_name)
        };
        params.push(param);
    }
    Some((name, params))
}
