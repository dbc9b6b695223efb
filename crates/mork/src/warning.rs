//! Non-fatal problems found while projecting rows.
//!
//! A cell whose column or value id has no atom cannot contribute to a
//! contact. The cell is skipped, the rest of the row is still used, and a
//! [`Warning`] is pushed onto the caller's list so it can report how much
//! was lost. See [`project_collecting`](crate::projector::project_collecting).

use crate::atom::AtomId;
use crate::store::RowKey;

/// A cell that was dropped during projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// The column id has no entry in the column dictionary.
    UnresolvableColumn {
        /// Row holding the cell.
        row: RowKey,
        /// Unknown column atom id.
        column: AtomId,
    },

    /// The value id has no entry in the value dictionary.
    UnresolvableValue {
        /// Row holding the cell.
        row: RowKey,
        /// Column atom id of the cell.
        column: AtomId,
        /// Unknown value atom id.
        value: AtomId,
    },
}

impl Warning {
    /// Row the dropped cell belonged to.
    #[must_use]
    pub fn row(&self) -> RowKey {
        match self {
            Self::UnresolvableColumn { row, .. } | Self::UnresolvableValue { row, .. } => *row,
        }
    }

    /// Human-readable description of the warning.
    ///
    /// # Examples
    ///
    /// ```
    /// use mork::warning::Warning;
    /// use mork::RowKey;
    ///
    /// let warning = Warning::UnresolvableValue {
    ///     row: RowKey::new(0x80, 1, 0x80, 2),
    ///     column: 0x81,
    ///     value: 0xA0,
    /// };
    /// assert_eq!(
    ///     warning.description(),
    ///     "row [2:80] in {1:80}: column 81 refers to unknown value A0"
    /// );
    /// ```
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::UnresolvableColumn { row, column } => {
                format!("row {row}: unknown column {column:X}")
            }
            Self::UnresolvableValue { row, column, value } => {
                format!("row {row}: column {column:X} refers to unknown value {value:X}")
            }
        }
    }

    /// Static identifier of the warning kind, for grouping.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnresolvableColumn { .. } => "unresolvable_column",
            Self::UnresolvableValue { .. } => "unresolvable_value",
        }
    }
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

impl std::error::Error for Warning {}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> RowKey {
        RowKey::new(0x80, 1, 0x80, 7)
    }

    #[test]
    fn row_is_reported_for_both_kinds() {
        let column = Warning::UnresolvableColumn {
            row: key(),
            column: 1,
        };
        let value = Warning::UnresolvableValue {
            row: key(),
            column: 1,
            value: 2,
        };
        assert_eq!(column.row(), key());
        assert_eq!(value.row(), key());
        assert_eq!(value.kind(), "unresolvable_value");
    }

    #[test]
    fn display_matches_description() {
        let warning = Warning::UnresolvableColumn {
            row: key(),
            column: 0xC1,
        };
        assert_eq!(warning.to_string(), "row [7:80] in {1:80}: unknown column C1");
    }
}
