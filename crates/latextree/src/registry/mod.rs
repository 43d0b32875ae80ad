//! The definition registry
//!
//! The registry maps each species (a command or environment name such as `section` or `itemize`)
//!     to its family, its genus and its parameters.
//! It also holds the numbering rules for numbered species,
//!     the stop tokens of block-structured species,
//!     and the bodies of macros and environments defined inside the document.
//!
//! A registry is seeded from the built-in [definition set](coredefs::definitions)
//!     and may be extended with further [Definitions] before or during a parse.
//! Loading is additive: later definitions override earlier ones but nothing is removed.
//!
//! Names that are not registered are never an error.
//! The parser registers them on first use with no parameters;
//!     see [Registry::species_or_register].

pub mod coredefs;
pub mod definition;
pub mod overlay;

pub use definition::{parse_definition, Param, ParamKind};
pub use overlay::Definitions;

use crate::token::Token;
use latextree_stdext::algorithms::spellcheck;
use latextree_stdext::collections::orderedmap::OrderedMap;
use std::collections::HashMap;
use std::collections::HashSet;

/// The broadest tier of the taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Family {
    Command,
    Environment,
    Declaration,
}

impl std::fmt::Display for Family {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Family::Command => "Command",
            Family::Environment => "Environment",
            Family::Declaration => "Declaration",
        };
        write!(f, "{s}")
    }
}

/// Description of a registered species.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Species {
    pub name: String,
    pub family: Family,
    pub genus: String,
    pub params: Vec<Param>,
    /// Whether the species was registered automatically because it was used without a definition.
    pub auto: bool,
}

/// A definition made inside the document that is expanded when the species is used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Custom {
    /// Body of `\newcommand` or `\def`, with an optional default for the first argument.
    Command {
        body: String,
        default: Option<String>,
    },
    /// Begin and end code of `\newenvironment`.
    Environment { begin: String, end: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Counter {
    master: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Registry {
    species: HashMap<String, Species>,
    declaration_genera: OrderedMap<String, Vec<String>>,
    block_commands: HashMap<String, Vec<String>>,
    block_declarations: HashMap<String, Vec<String>>,
    numbered: OrderedMap<String, Counter>,
    numbered_like: HashMap<String, String>,
    marker_formats: OrderedMap<String, String>,
    names: OrderedMap<String, OrderedMap<String, String>>,
    custom: HashMap<String, Custom>,
    theorem_names: HashMap<String, String>,
    active: HashSet<String>,
}

impl Default for Registry {
    fn default() -> Self {
        let mut registry = Registry::empty();
        registry.load(&coredefs::definitions());
        registry
    }
}

impl Registry {
    /// Returns a registry with no definitions at all.
    pub fn empty() -> Registry {
        Registry {
            species: Default::default(),
            declaration_genera: Default::default(),
            block_commands: Default::default(),
            block_declarations: Default::default(),
            numbered: Default::default(),
            numbered_like: Default::default(),
            marker_formats: Default::default(),
            names: Default::default(),
            custom: Default::default(),
            theorem_names: Default::default(),
            active: Default::default(),
        }
    }

    /// Applies a definition set to the registry.
    pub fn load(&mut self, defs: &Definitions) {
        for (family, table) in [
            (Family::Command, &defs.commands),
            (Family::Environment, &defs.environments),
            (Family::Declaration, &defs.declarations),
        ] {
            for (genus, strings) in table.iter() {
                for s in strings {
                    let Some((name, params)) = parse_definition(s) else {
                        log::warn!("ignoring malformed definition `{s}` in genus {genus}");
                        continue;
                    };
                    if family == Family::Declaration {
                        match self.declaration_genera.get_mut(genus) {
                            Some(members) => {
                                if !members.contains(&name) {
                                    members.push(name.clone());
                                }
                            }
                            None => {
                                self.declaration_genera
                                    .insert(genus.clone(), vec![name.clone()]);
                            }
                        }
                    }
                    self.register(Species {
                        name,
                        family,
                        genus: genus.clone(),
                        params,
                        auto: false,
                    });
                }
            }
        }
        for chars in defs.active.values() {
            for c in chars {
                self.active.insert(c.clone());
            }
        }
        for (name, ancestors) in defs.block_commands.iter() {
            if !self.species.contains_key(name) {
                log::warn!("block command `{name}` is not defined; stop tokens ignored");
                continue;
            }
            self.block_commands.insert(name.clone(), ancestors.clone());
        }
        for genus in &defs.block_declarations {
            let Some(members) = self.declaration_genera.get(genus) else {
                log::warn!("block declaration genus `{genus}` is not defined; stop tokens ignored");
                continue;
            };
            for member in members {
                let siblings = members.iter().filter(|s| *s != member).cloned().collect();
                self.block_declarations.insert(member.clone(), siblings);
            }
        }
        for (counter, master) in defs.numbered.iter() {
            self.add_numbered(counter, Some(master));
        }
        for (name, counter) in defs.numbered_like.iter() {
            if !self.is_numbered(counter) {
                log::warn!("`{name}` cannot share counter `{counter}`: it is not numbered");
                continue;
            }
            self.numbered_like.insert(name.clone(), counter.clone());
        }
        for (counter, format) in defs.marker_formats.iter() {
            if !self.is_numbered(counter) {
                log::warn!("marker format for `{counter}` ignored: it is not numbered");
                continue;
            }
            let mut format = format.clone();
            for (other, other_format) in self.marker_formats.iter() {
                format = format.replace(&format!("\\the{other}"), other_format);
            }
            self.marker_formats.insert(counter.clone(), format);
        }
        for (key, translations) in defs.names.iter() {
            if key.len() <= 4 || !key.ends_with("name") {
                log::warn!("name `{key}` ignored: names must end in `name`");
                continue;
            }
            if self.names.get(key).is_none() {
                self.names.insert(key.clone(), OrderedMap::new());
            }
            if let Some(entry) = self.names.get_mut(key) {
                for (iso, text) in translations.iter() {
                    entry.insert(iso.clone(), text.clone());
                }
            }
        }
        log::info!(
            "loaded definitions: {} species, {} counters",
            self.species.len(),
            self.numbered.len()
        );
    }

    /// Adds or replaces a species.
    pub fn register(&mut self, species: Species) {
        self.species.insert(species.name.clone(), species);
    }

    pub fn get(&self, name: &str) -> Option<&Species> {
        self.species.get(name)
    }

    /// All registered species, in no particular order.
    pub fn species(&self) -> impl Iterator<Item = &Species> {
        self.species.values()
    }

    /// Returns the species with the given name, registering it with no parameters if it is unknown.
    pub fn species_or_register(&mut self, name: &str, family: Family) -> &Species {
        if !self.species.contains_key(name) {
            let suggestions = self.suggest(name);
            if suggestions.is_empty() {
                log::debug!("registering unknown {family} `{name}`");
            } else {
                log::debug!(
                    "registering unknown {family} `{name}` (did you mean `{}`?)",
                    suggestions.join("`, `")
                );
            }
            let genus = match family {
                Family::Environment => "Environment",
                _ => "Command",
            };
            self.register(Species {
                name: name.to_string(),
                family,
                genus: genus.to_string(),
                params: vec![],
                auto: true,
            });
        }
        &self.species[name]
    }

    /// Whether the name is a registered environment that may be used in the `\name ... \endname` form.
    pub fn is_environment(&self, name: &str) -> bool {
        matches!(self.species.get(name), Some(s) if s.family == Family::Environment && !s.auto)
    }

    pub fn is_genus(&self, name: &str, genus: &str) -> bool {
        matches!(self.species.get(name), Some(s) if s.genus == genus)
    }

    pub fn params(&self, name: &str) -> &[Param] {
        match self.species.get(name) {
            None => &[],
            Some(s) => &s.params,
        }
    }

    /// Registered names close to the given one, for "did you mean" messages.
    pub fn suggest(&self, name: &str) -> Vec<&str> {
        let mut words =
            spellcheck::closest_words(self.species.keys().map(String::as_str), name, 2);
        words.sort();
        words
    }

    pub fn is_block_command(&self, name: &str) -> bool {
        self.block_commands.contains_key(name)
    }

    pub fn is_block_declaration(&self, name: &str) -> bool {
        self.block_declarations.contains_key(name)
    }

    /// Tokens that end the body of a block command such as `\section` or `\item`.
    ///
    /// These are the command itself, `\end`, and every enclosing species in both the
    ///     `\name` and `\endname` forms.
    pub fn block_command_stops(&self, name: &str) -> Vec<Token> {
        let mut stops = vec![
            Token::new_control_sequence(name),
            Token::new_control_sequence("end"),
        ];
        if let Some(ancestors) = self.block_commands.get(name) {
            for ancestor in ancestors {
                stops.push(Token::new_control_sequence(ancestor.as_str()));
                stops.push(Token::new_control_sequence(format!("end{ancestor}")));
            }
        }
        stops
    }

    /// Tokens that end the scope of a block declaration such as `\bf`.
    pub fn block_declaration_stops(&self, name: &str) -> Vec<Token> {
        let mut stops = vec![
            Token::new_control_sequence("end"),
            Token::new_end_group("}"),
            Token::new_other("]"),
            Token::new_control_sequence("item"),
        ];
        if let Some(siblings) = self.block_declarations.get(name) {
            for sibling in siblings {
                stops.push(Token::new_control_sequence(sibling.as_str()));
            }
        }
        stops
    }

    /// Whether the name is a counter.
    pub fn is_numbered(&self, counter: &str) -> bool {
        self.numbered.contains_key(counter)
    }

    /// The counter shared by the species, if it does not have its own.
    pub fn numbered_like(&self, name: &str) -> Option<&str> {
        self.numbered_like.get(name).map(String::as_str)
    }

    /// Shares the counter of another species.
    pub fn set_numbered_like(&mut self, name: &str, counter: &str) {
        self.numbered_like
            .insert(name.to_string(), counter.to_string());
    }

    /// Adds a counter or changes its master. A counter is reset whenever its master is incremented.
    pub fn add_numbered(&mut self, counter: &str, master: Option<&str>) {
        let master = master.filter(|m| !m.is_empty()).map(str::to_string);
        self.numbered.insert(counter.to_string(), Counter { master });
    }

    /// The counter whose increments reset the given counter.
    pub fn master(&self, counter: &str) -> Option<&str> {
        self.numbered.get(counter)?.master.as_deref()
    }

    /// Counters reset when the given counter is incremented, in definition order.
    pub fn resets(&self, counter: &str) -> Vec<&str> {
        self.numbered
            .iter()
            .filter(|(_, c)| c.master.as_deref() == Some(counter))
            .map(|(name, _)| name.as_str())
            .collect()
    }

    pub fn counters(&self) -> impl Iterator<Item = &str> {
        self.numbered.keys().map(String::as_str)
    }

    /// The template used to render the marker of the counter.
    pub fn marker_format(&self, counter: &str) -> Option<&str> {
        self.marker_formats.get(counter).map(String::as_str)
    }

    /// Looks up a name such as `figurename` in the given language.
    pub fn name(&self, key: &str, iso: &str) -> Option<&str> {
        self.names.get(key)?.get(iso).map(String::as_str)
    }

    pub fn custom(&self, name: &str) -> Option<&Custom> {
        self.custom.get(name)
    }

    pub fn set_custom(&mut self, name: &str, custom: Custom) {
        self.custom.insert(name.to_string(), custom);
    }

    /// The caption given to a theorem environment by `\newtheorem`.
    pub fn theorem_name(&self, name: &str) -> Option<&str> {
        self.theorem_names.get(name).map(String::as_str)
    }

    pub fn set_theorem_name(&mut self, name: &str, caption: &str) {
        self.theorem_names
            .insert(name.to_string(), caption.to_string());
    }

    pub fn is_active(&self, c: &str) -> bool {
        self.active.contains(c)
    }
}
