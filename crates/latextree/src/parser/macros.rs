//! Definitions made inside the document.
//!
//! `\newcommand`, `\def` and friends register a species whose uses are expanded by
//!     substituting the arguments into the body.
//! `\newenvironment` does the same for the begin and end code of an environment,
//!     and `\newtheorem` registers a numbered theorem-like environment.

use super::Parser;
use crate::registry::{Custom, Family, Param, Species};
use crate::tree::Command;

impl Parser {
    /// Registers the definition made by a macro-defining command.
    pub(super) fn parse_macro(&mut self, command: &Command) {
        let raw = |name: &str| command.arg(name).map(|id| self.tree.text(id));
        let trimmed = |name: &str| raw(name).map(|s| s.trim().to_string());
        let Some(name) = trimmed("name") else {
            log::warn!("`\\{}` without a name", command.species);
            return;
        };
        let name = name.strip_prefix('\\').unwrap_or(&name).to_string();
        let numargs = trimmed("numargs").map_or(0, |n| match n.parse::<usize>() {
            Ok(n) => n,
            Err(_) => {
                log::warn!("`\\{}{{{name}}}`: `{n}` is not a number of arguments", command.species);
                0
            }
        });
        match command.species.as_str() {
            "newtheorem" => {
                let caption = trimmed("caption");
                let numbered_like = trimmed("numbered_like");
                let numbered_within = trimmed("numbered_within");
                self.define_theorem(&name, caption, numbered_like, numbered_within);
            }
            "newenvironment" | "renewenvironment" => {
                let params = (1..=numargs)
                    .map(|i| Param::mandatory(format!("arg{i}")))
                    .collect();
                self.registry.register(Species {
                    name: name.clone(),
                    family: Family::Environment,
                    genus: "UserDefined".into(),
                    params,
                    auto: false,
                });
                let custom = Custom::Environment {
                    begin: raw("begdef").unwrap_or_default(),
                    end: raw("enddef").unwrap_or_default(),
                };
                self.registry.set_custom(&name, custom);
                log::debug!("defined environment `{name}` with {numargs} arguments");
            }
            species => {
                if species == "providecommand"
                    && self.registry.get(&name).is_some_and(|s| !s.auto)
                {
                    log::debug!("`\\{name}` is already defined");
                    return;
                }
                let default = raw("opt");
                let mut params = vec![];
                let mut mandatory = numargs;
                if default.is_some() && numargs > 0 {
                    params.push(Param::optional("opt"));
                    mandatory -= 1;
                }
                for i in params.len() + 1..=params.len() + mandatory {
                    params.push(Param::mandatory(format!("arg{i}")));
                }
                self.registry.register(Species {
                    name: name.clone(),
                    family: Family::Command,
                    genus: "UserDefined".into(),
                    params,
                    auto: false,
                });
                let custom = Custom::Command {
                    body: raw("def").unwrap_or_default(),
                    default,
                };
                self.registry.set_custom(&name, custom);
                log::debug!("defined `\\{name}` with {numargs} arguments");
            }
        }
    }

    fn define_theorem(
        &mut self,
        name: &str,
        caption: Option<String>,
        numbered_like: Option<String>,
        numbered_within: Option<String>,
    ) {
        self.registry.register(Species {
            name: name.to_string(),
            family: Family::Environment,
            genus: "Theorem".into(),
            params: vec![Param::optional("title")],
            auto: false,
        });
        if let Some(caption) = caption {
            self.registry.set_theorem_name(name, &caption);
        }
        match numbered_like {
            Some(counter) if self.counter(&counter).is_some() => {
                self.registry.set_numbered_like(name, &counter);
            }
            Some(counter) => {
                log::warn!("theorem `{name}` cannot share counter `{counter}`: no such counter");
            }
            None => {
                let master = numbered_within.filter(|m| self.counter(m).is_some());
                self.registry.add_numbered(name, master.as_deref());
                self.counters.insert(name.to_string(), 0);
            }
        }
        log::debug!("defined theorem `{name}`");
    }
}

/// Replaces the parameters `#1` to `#9` in a macro body with the arguments.
///
/// A missing first argument is replaced by the default, if there is one.
/// Other missing arguments and parameters beyond the arguments are replaced by nothing.
pub(super) fn substitute(body: &str, args: &[Option<String>], default: Option<&str>) -> String {
    let mut result = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();
    while let Some(c) = chars.next() {
        let digit = match chars.peek() {
            Some(d @ '1'..='9') if c == '#' => *d as usize - '0' as usize,
            _ => {
                result.push(c);
                continue;
            }
        };
        chars.next();
        match args.get(digit - 1) {
            Some(Some(arg)) => result.push_str(arg),
            Some(None) if digit == 1 => result.push_str(default.unwrap_or_default()),
            _ => {}
        }
    }
    result
}
