//! Definition sets
//!
//! A definition set describes species and their numbering.
//! The built-in set is returned by [coredefs::definitions](super::coredefs::definitions);
//!     further sets (overlays) are usually read from JSON files.
//! Every field may be omitted.
//!
//! ```
//! # use latextree::registry::Definitions;
//! let overlay = Definitions::from_json(r#"{
//!     "commands": {"Xref": ["cref{key}"]},
//!     "numbered": {"exercise": "section"}
//! }"#).unwrap();
//! assert_eq!(overlay.commands.get("Xref").unwrap(), &vec!["cref{key}".to_string()]);
//! ```

use latextree_stdext::collections::orderedmap::OrderedMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Definitions {
    /// Group name to active characters.
    pub active: OrderedMap<String, Vec<String>>,
    /// Genus to definition strings of commands.
    pub commands: OrderedMap<String, Vec<String>>,
    /// Genus to definition strings of environments.
    pub environments: OrderedMap<String, Vec<String>>,
    /// Genus to definition strings of declarations.
    pub declarations: OrderedMap<String, Vec<String>>,
    /// Species to the species that end it, besides itself.
    pub block_commands: OrderedMap<String, Vec<String>>,
    /// Declaration genera whose members end one another.
    pub block_declarations: Vec<String>,
    /// Counter to the counter that resets it.
    pub numbered: OrderedMap<String, String>,
    /// Species to the counter it shares.
    pub numbered_like: OrderedMap<String, String>,
    /// Counter to the template used to render its marker.
    pub marker_formats: OrderedMap<String, String>,
    /// Name key (ending in `name`) to language code to text.
    pub names: OrderedMap<String, OrderedMap<String, String>>,
}

impl Definitions {
    pub fn from_json(json: &str) -> crate::Result<Definitions> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_default() {
        let defs = Definitions::from_json("{}").unwrap();
        assert_eq!(defs, Definitions::default());
    }

    #[test]
    fn document_order_is_kept() {
        let defs = Definitions::from_json(
            r#"{"marker_formats": {"z": "\\arabic{z}", "a": "\\thez.\\arabic{a}"}}"#,
        )
        .unwrap();
        let keys: Vec<&String> = defs.marker_formats.keys().collect();
        assert_eq!(keys, vec!["z", "a"]);
    }

    #[test]
    fn names() {
        let defs =
            Definitions::from_json(r#"{"names": {"figurename": {"en": "Figure", "cy": "Ffigur"}}}"#)
                .unwrap();
        assert_eq!(
            defs.names.get("figurename").unwrap().get("cy").map(String::as_str),
            Some("Ffigur")
        );
    }

    #[test]
    fn malformed_json() {
        let err = Definitions::from_json(r#"{"numbered": []}"#).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Definitions);
    }
}
