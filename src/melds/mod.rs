//! Melds (pers) opened onto the table.
//!
//! - `classify`: pure structural classification of a stone group
//! - `Per`: an opened meld whose kind is derived from its stones
//! - `ExtensionRule`: how candidates are checked when extending a meld

pub mod per;

pub use per::{classify, meld_value, ExtensionRule, MeldKind, Per};
