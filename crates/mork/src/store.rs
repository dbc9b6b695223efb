//! Row storage addressed by table and row coordinates.

use std::collections::BTreeMap;
use std::collections::btree_map;
use std::fmt;

use crate::atom::AtomId;

/// Scope used when a table or row reference omits one.
pub const DEFAULT_SCOPE: i32 = 0x80;

/// Absolute address of one row.
///
/// Every component is stored as an absolute value: Mork negates ids to mark
/// removed rows, and this decoder treats those the same as positive ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RowKey {
    /// Scope of the enclosing table.
    pub table_scope: i32,
    /// Id of the enclosing table.
    pub table_id: i32,
    /// Scope of the row.
    pub row_scope: i32,
    /// Id of the row.
    pub row_id: i32,
}

impl RowKey {
    /// Builds a key, normalizing every component to its absolute value.
    #[must_use]
    pub fn new(table_scope: i32, table_id: i32, row_scope: i32, row_id: i32) -> Self {
        Self {
            table_scope: table_scope.wrapping_abs(),
            table_id: table_id.wrapping_abs(),
            row_scope: row_scope.wrapping_abs(),
            row_id: row_id.wrapping_abs(),
        }
    }
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:X}:{:X}] in {{{:X}:{:X}}}",
            self.row_id, self.row_scope, self.table_id, self.table_scope
        )
    }
}

/// The cells of one row: column atom id to value atom id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CellMap {
    cells: BTreeMap<AtomId, AtomId>,
}

impl CellMap {
    /// Sets the value of `column`, replacing any earlier value.
    pub fn insert(&mut self, column: AtomId, value: AtomId) {
        self.cells.insert(column, value);
    }

    /// Value atom stored for `column`.
    #[must_use]
    pub fn get(&self, column: AtomId) -> Option<AtomId> {
        self.cells.get(&column).copied()
    }

    /// Iterates `(column, value)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (AtomId, AtomId)> + '_ {
        self.cells.iter().map(|(&column, &value)| (column, value))
    }

    /// Number of cells in the row.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` if the row has no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// All rows of a decoded document, ordered by [`RowKey`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Store {
    rows: BTreeMap<RowKey, CellMap>,
}

impl Store {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the row at `key`, creating an empty one if needed.
    pub fn row_mut(&mut self, key: RowKey) -> &mut CellMap {
        self.rows.entry(key).or_default()
    }

    /// Returns the row at `key`.
    #[must_use]
    pub fn get(&self, key: &RowKey) -> Option<&CellMap> {
        self.rows.get(key)
    }

    /// Iterates all rows in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, RowKey, CellMap> {
        self.rows.iter()
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if no row has been addressed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<'a> IntoIterator for &'a Store {
    type Item = (&'a RowKey, &'a CellMap);
    type IntoIter = btree_map::Iter<'a, RowKey, CellMap>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
