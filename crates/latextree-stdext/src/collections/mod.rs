//! Collections

pub mod orderedmap;
