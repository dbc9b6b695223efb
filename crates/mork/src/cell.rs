//! Decoding of a single `(column=value)` cell.
//!
//! The cell body is read byte by byte up to the closing `)`. Three escapes
//! apply in both the column and the value part:
//!
//! - `$XX` inserts the byte with hex code `XX`.
//! - `\c` inserts `c` literally. A backslash before a line break folds the
//!   line: the break and the byte after it are dropped.
//! - Carets mark references. The first one is silent, the second ends the
//!   column part and flags the value as a hex atom id, any further caret is
//!   literal text.

use crate::address::parse_hex;
use crate::atom::AtomId;
use crate::scanner::Scanner;

/// What the decoder is building while it reads cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseMode {
    /// Inside a `<(a=c)>` dictionary: cells declare column names.
    BuildingColumnsDict,
    /// Inside any other dictionary: cells declare shared values.
    BuildingValuesDict,
    /// Inside a row: cells attach values to columns.
    ParsingRow,
}

/// The meaning of one decoded cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellResult {
    /// The cell carried no value and has no effect.
    Empty,
    /// Dictionary entry for the column table.
    ColumnAtom {
        /// Atom id declared by the cell.
        id: AtomId,
        /// Column name.
        text: String,
    },
    /// Dictionary entry for the value table.
    ValueAtom {
        /// Atom id declared by the cell.
        id: AtomId,
        /// Value text.
        text: String,
    },
    /// Row cell whose value is the id of an existing value atom.
    Reference {
        /// Column atom id.
        column: AtomId,
        /// Value atom id.
        value: AtomId,
    },
    /// Row cell whose value is written inline.
    Literal {
        /// Column atom id.
        column: AtomId,
        /// Value text, still to be interned.
        text: String,
    },
}

#[derive(Debug, Default)]
struct RawCell {
    column: Vec<u8>,
    value: Vec<u8>,
    in_column_phase: bool,
    is_value_oid: bool,
    carets: usize,
}

impl RawCell {
    fn push(&mut self, byte: u8) {
        if self.in_column_phase {
            self.column.push(byte);
        } else {
            self.value.push(byte);
        }
    }
}

/// Reads one cell body from `scanner` and interprets it for `mode`.
///
/// The opening `(` must already be consumed. Reading stops after the closing
/// `)` or at end of input.
pub fn parse_cell(scanner: &mut Scanner<'_>, mode: ParseMode) -> CellResult {
    let mut cell = RawCell {
        in_column_phase: true,
        ..RawCell::default()
    };

    loop {
        let cur = scanner.next_char();
        match cur {
            0 | b')' => break,
            b'=' if cell.in_column_phase => cell.in_column_phase = false,
            b'$' => {
                let hex = [scanner.next_char(), scanner.next_char()];
                if let Some(byte) = decode_hex_pair(hex) {
                    cell.push(byte);
                }
            }
            b'\\' => match scanner.next_char() {
                b'\r' | b'\n' => {
                    scanner.next_char();
                }
                0 => {}
                escaped => cell.push(escaped),
            },
            b'^' => {
                cell.carets += 1;
                match cell.carets {
                    1 => {}
                    2 => {
                        cell.in_column_phase = false;
                        cell.is_value_oid = true;
                    }
                    _ => cell.push(cur),
                }
            }
            _ => cell.push(cur),
        }
    }

    if cell.value.is_empty() {
        return CellResult::Empty;
    }

    let column = parse_hex(&String::from_utf8_lossy(&cell.column));
    let text = String::from_utf8_lossy(&cell.value).into_owned();

    match mode {
        ParseMode::BuildingColumnsDict => CellResult::ColumnAtom { id: column, text },
        ParseMode::BuildingValuesDict => CellResult::ValueAtom { id: column, text },
        ParseMode::ParsingRow if cell.is_value_oid => CellResult::Reference {
            column,
            value: parse_hex(&text),
        },
        ParseMode::ParsingRow => CellResult::Literal { column, text },
    }
}

/// Decodes the two bytes after a `$`.
///
/// Leading hex digits are used and the rest ignored, so `$4z` gives `0x04`.
/// A result of zero is dropped since the format has no NUL bytes.
fn decode_hex_pair(hex: [u8; 2]) -> Option<u8> {
    let byte = hex
        .iter()
        .map_while(|&b| char::from(b).to_digit(16))
        .fold(0u8, |acc, digit| {
            // A digit is below 16, so it always fits.
            #[allow(clippy::cast_possible_truncation)]
            let digit = digit as u8;
            acc * 16 + digit
        });
    (byte != 0).then_some(byte)
}
