//! Interned strings addressed by integer ids.

use std::collections::HashMap;

/// Identifier of an atom.
///
/// Non-negative ids come from the source text. Negative ids are minted by the
/// decoder for literal values written inline in a row.
pub type AtomId = i32;

/// Starting point of the synthetic id counter. Every minted id is strictly
/// below it.
pub const SYNTHETIC_ID_START: AtomId = 0x7FFF_FFFF;

/// Map from [`AtomId`] to its string.
///
/// A decode session owns two of these: one for column names and one for
/// values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AtomTable {
    atoms: HashMap<AtomId, String>,
}

impl AtomTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` under `id`, replacing any earlier atom with that id.
    pub fn insert(&mut self, id: AtomId, value: impl Into<String>) {
        self.atoms.insert(id, value.into());
    }

    /// Returns the atom stored under `id`.
    #[must_use]
    pub fn lookup(&self, id: AtomId) -> Option<&str> {
        self.atoms.get(&id).map(String::as_str)
    }

    /// Number of atoms in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    /// Returns `true` if the table holds no atoms.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }
}
