//! Searches over a parsed tree used by renderers.

use super::{NodeId, NodeKind, Tree};
use crate::registry::{Family, Registry};
use std::collections::BTreeMap;

/// An entry in the table of contents: a sectioning node and the entries nested inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocEntry {
    pub node: NodeId,
    pub children: Vec<TocEntry>,
}

/// Arguments of the document properties set in the preamble.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preamble {
    pub title: Option<NodeId>,
    pub author: Option<NodeId>,
    pub date: Option<NodeId>,
    pub documentclass: Option<NodeId>,
    pub graphicspath: Option<NodeId>,
}

impl Tree {
    /// All nodes of the given species in depth-first order.
    ///
    /// The arguments of a node are searched before its children.
    pub fn find_all(&self, species: &str) -> Vec<NodeId> {
        let mut found = vec![];
        self.find_all_under(self.root, species, &mut found);
        found
    }

    fn find_all_under(&self, id: NodeId, species: &str, found: &mut Vec<NodeId>) {
        let node = &self[id];
        if node.species() == species {
            found.push(id);
        }
        if let Some(command) = node.command() {
            for arg in command.args.values().flatten() {
                self.find_all_under(*arg, species, found);
            }
        }
        for child in node.children() {
            self.find_all_under(*child, species, found);
        }
    }

    /// The closest node of the given species on the path from the node to the root,
    ///     including the node itself.
    pub fn ancestor(&self, id: NodeId, species: &str) -> Option<NodeId> {
        let mut current = Some(id);
        while let Some(id) = current {
            if self[id].species() == species {
                return Some(id);
            }
            current = self[id].parent();
        }
        None
    }

    /// The closest enclosing environment or numbered node, including the node itself.
    pub fn container(&self, id: NodeId, registry: &Registry) -> Option<NodeId> {
        let mut current = id;
        while let Some(parent) = self[current].parent() {
            let node = &self[current];
            if node.family() == Some(Family::Environment) {
                return Some(current);
            }
            let species = node.species();
            if node.command().is_some()
                && (registry.is_numbered(species) || registry.numbered_like(species).is_some())
            {
                return Some(current);
            }
            current = parent;
        }
        None
    }

    /// The top-level `document` environment.
    pub fn document(&self) -> Option<NodeId> {
        self.top_level()
            .iter()
            .copied()
            .find(|id| self[*id].species() == "document")
    }

    fn key(&self, id: NodeId) -> Option<String> {
        let key = self[id].arg("key")?;
        Some(self.text(key).trim().to_string())
    }

    /// Map from label key to the labelled node.
    ///
    /// A `\label` labels its closest numbered or block-structured ancestor.
    /// Bibliography items are labelled by their own key.
    pub fn labels(&self, registry: &Registry) -> BTreeMap<String, NodeId> {
        let mut labels = BTreeMap::new();
        for label in self.find_all("label") {
            let Some(key) = self.key(label) else {
                continue;
            };
            let mut target = label;
            while let Some(parent) = self[target].parent() {
                let node = &self[target];
                let numbered = node.command().and_then(|c| c.number).is_some();
                if numbered || registry.is_block_command(node.species()) {
                    break;
                }
                target = parent;
            }
            labels.insert(key, target);
        }
        labels.extend(self.citations());
        labels
    }

    /// Map from bibliography key to `\bibitem` node.
    pub fn citations(&self) -> BTreeMap<String, NodeId> {
        self.find_all("bibitem")
            .into_iter()
            .filter_map(|id| self.key(id).map(|key| (key, id)))
            .collect()
    }

    /// The sectioning structure of the document body.
    ///
    /// The root entry is the `document` environment.
    /// The contents of included files are searched as if they were written in place.
    pub fn toc(&self) -> Option<TocEntry> {
        let document = self.document()?;
        Some(TocEntry {
            node: document,
            children: self.toc_entries_under(document),
        })
    }

    fn toc_entries_under(&self, id: NodeId) -> Vec<TocEntry> {
        let mut entries = vec![];
        for child in self[id].children() {
            let children = self.toc_entries_under(*child);
            if self.genus(*child) == "Section" {
                entries.push(TocEntry {
                    node: *child,
                    children,
                });
            } else {
                entries.extend(children);
            }
        }
        entries
    }

    /// Properties of the document set by top-level commands outside the `document` environment.
    pub fn preamble(&self) -> Preamble {
        let mut preamble = Preamble::default();
        for id in self.top_level() {
            let node = &self[*id];
            let (slot, arg) = match node.species() {
                "title" => (&mut preamble.title, "title"),
                "author" => (&mut preamble.author, "names"),
                "date" => (&mut preamble.date, "date"),
                "documentclass" => (&mut preamble.documentclass, "name"),
                "graphicspath" => (&mut preamble.graphicspath, "paths"),
                _ => continue,
            };
            if let Some(arg) = node.arg(arg) {
                *slot = Some(arg);
            }
        }
        preamble
    }

    /// The argument of a node with the given parameter name, if it was given.
    pub fn arg(&self, id: NodeId, name: &str) -> Option<NodeId> {
        self[id].arg(name)
    }

    /// The counter value captured by a numbered node.
    pub fn number(&self, id: NodeId) -> Option<i64> {
        match self[id].kind() {
            NodeKind::Number(n) => Some(*n),
            _ => self[id].command()?.number,
        }
    }

    /// The rendered marker of a numbered node.
    pub fn marker(&self, id: NodeId) -> Option<&str> {
        self[id].command()?.marker.as_deref()
    }
}
