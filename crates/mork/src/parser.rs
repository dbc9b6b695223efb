//! The Mork grammar driver.
//!
//! A Mork file is a sequence of top-level items:
//!
//! | Opener | Item | Effect |
//! |--------|------|--------|
//! | `/` | comment | skipped to end of line |
//! | `<` | dictionary | cells declare value atoms, or column atoms after a `<(a=c)>` marker |
//! | `{` | table | holds rows, bare row references and a `{...}` meta block |
//! | `[` | row | cells attach values to columns |
//! | `@` | group | the `@...@` markers are skipped, their content is parsed normally |
//!
//! Anything else in a structural position is fatal. Running out of input
//! inside an item ends it silently.

use crate::address::parse_scope_id;
use crate::atom::{AtomId, AtomTable, SYNTHETIC_ID_START};
use crate::cell::{CellResult, ParseMode, parse_cell};
use crate::error::{Error, Result};
use crate::scanner::{Scanner, is_whitespace};
use crate::store::{DEFAULT_SCOPE, RowKey, Store};

/// Dictionary marker switching a `<...>` block to column names.
const COLUMN_DICT_MARKER: &[u8] = b"(a=c)>";

/// Everything a decode produced: both atom dictionaries and the rows.
#[derive(Debug, Clone, Default)]
pub struct MorkDocument {
    /// Column names by atom id.
    pub columns: AtomTable,
    /// Values by atom id, including the synthetic ids of inline literals.
    pub values: AtomTable,
    /// Rows by absolute address.
    pub store: Store,
}

/// Decodes a complete Mork buffer.
///
/// # Errors
///
/// Returns [`Error::UnexpectedCharacter`] when a structural position holds a
/// character the grammar does not allow.
///
/// # Examples
///
/// ```
/// use mork::{decode, RowKey};
///
/// let doc = decode(b"< <(a=c)> (80=DisplayName)> [1(^80=Ann)]").unwrap();
///
/// let row = doc.store.get(&RowKey::new(0x80, 1, 0x80, 1)).unwrap();
/// let value = row.get(0x80).unwrap();
/// assert_eq!(doc.values.lookup(value), Some("Ann"));
/// ```
pub fn decode(data: &[u8]) -> Result<MorkDocument> {
    ParseSession::new(data).run()
}

/// State of one decode call.
///
/// A session is created per buffer and consumed by [`run`](Self::run);
/// nothing is shared between sessions.
#[derive(Debug)]
pub struct ParseSession<'a> {
    scanner: Scanner<'a>,
    mode: ParseMode,
    document: MorkDocument,
    current_row: Option<RowKey>,
    default_table_id: i32,
    synthetic_counter: i32,
}

impl<'a> ParseSession<'a> {
    /// Creates a session over `data`.
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            scanner: Scanner::new(data),
            mode: ParseMode::BuildingValuesDict,
            document: MorkDocument::default(),
            current_row: None,
            default_table_id: 1,
            synthetic_counter: SYNTHETIC_ID_START,
        }
    }

    /// Parses the whole buffer and returns the decoded document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnexpectedCharacter`] on a grammar violation.
    pub fn run(mut self) -> Result<MorkDocument> {
        loop {
            match self.scanner.next_char() {
                0 => break,
                cur if is_whitespace(cur) => {}
                b'/' => self.parse_comment(),
                b'<' => self.parse_dict()?,
                b'{' => self.parse_table()?,
                b'[' => self.parse_row(0, 0)?,
                b'@' => self.skip_meta(b'@'),
                cur => return Err(self.unexpected(cur)),
            }
        }

        tracing::debug!(
            rows = self.document.store.len(),
            columns = self.document.columns.len(),
            values = self.document.values.len(),
            "Decoded Mork document"
        );
        Ok(self.document)
    }

    fn parse_comment(&mut self) {
        loop {
            match self.scanner.next_char() {
                0 | b'\r' | b'\n' => break,
                _ => {}
            }
        }
    }

    fn parse_dict(&mut self) -> Result<()> {
        self.mode = ParseMode::BuildingValuesDict;
        self.match_column_marker();

        loop {
            match self.scanner.next_char() {
                0 | b'>' => break,
                cur if is_whitespace(cur) => {}
                b'<' if self.match_column_marker() => {}
                b'/' => self.parse_comment(),
                b'(' => self.read_cell(),
                cur => return Err(self.unexpected(cur)),
            }
        }

        Ok(())
    }

    /// Switches to column mode if the column marker follows the cursor.
    fn match_column_marker(&mut self) -> bool {
        if !self.scanner.starts_with(COLUMN_DICT_MARKER) {
            return false;
        }
        self.mode = ParseMode::BuildingColumnsDict;
        self.scanner.skip(COLUMN_DICT_MARKER.len());
        true
    }

    fn parse_table(&mut self) -> Result<()> {
        let mut text = Vec::new();
        let mut cur = self.scanner.next_char();
        while !matches!(cur, 0 | b'{' | b'[' | b'}') {
            if !is_whitespace(cur) {
                text.push(cur);
            }
            cur = self.scanner.next_char();
        }
        let (table_id, table_scope) = parse_scope_id(&String::from_utf8_lossy(&text));

        loop {
            match cur {
                0 | b'}' => break,
                c if is_whitespace(c) => {}
                b'{' => self.skip_meta(b'}'),
                b'[' => self.parse_row(table_id, table_scope)?,
                b'-' | b'+' => {}
                c if c.is_ascii_hexdigit() => {
                    // Bare row reference: the row is listed by id only.
                    let mut token = Vec::new();
                    while cur != 0 && !is_whitespace(cur) {
                        token.push(cur);
                        cur = self.scanner.next_char();
                        if cur == b'}' {
                            return Ok(());
                        }
                    }
                    let (row_id, row_scope) = parse_scope_id(&String::from_utf8_lossy(&token));
                    self.set_current_row(table_scope, table_id, row_scope, row_id);
                    if cur == 0 {
                        break;
                    }
                }
                c => return Err(self.unexpected(c)),
            }
            cur = self.scanner.next_char();
        }

        Ok(())
    }

    fn parse_row(&mut self, table_id: i32, table_scope: i32) -> Result<()> {
        self.mode = ParseMode::ParsingRow;

        let mut text = Vec::new();
        let mut cur = self.scanner.next_char();
        while !matches!(cur, 0 | b'(' | b'[' | b']') {
            if !is_whitespace(cur) {
                text.push(cur);
            }
            cur = self.scanner.next_char();
        }
        let (row_id, row_scope) = parse_scope_id(&String::from_utf8_lossy(&text));
        self.set_current_row(table_scope, table_id, row_scope, row_id);

        loop {
            match cur {
                0 | b']' => break,
                c if is_whitespace(c) => {}
                b'(' => self.read_cell(),
                b'[' => self.skip_meta(b']'),
                c => return Err(self.unexpected(c)),
            }
            cur = self.scanner.next_char();
        }

        Ok(())
    }

    /// Skips to `closer`. Backslash escapes are honored so that an escaped
    /// closer inside meta cells does not end the block.
    fn skip_meta(&mut self, closer: u8) {
        loop {
            match self.scanner.next_char() {
                0 => break,
                b'\\' => {
                    self.scanner.next_char();
                }
                cur if cur == closer => break,
                _ => {}
            }
        }
    }

    /// Makes the row at the given address the target of subsequent cells.
    ///
    /// Zero scopes become [`DEFAULT_SCOPE`]. A zero table id means the last
    /// non-zero table id seen in this session.
    fn set_current_row(&mut self, table_scope: i32, table_id: i32, row_scope: i32, row_id: i32) {
        let table_scope = if table_scope == 0 { DEFAULT_SCOPE } else { table_scope };
        let row_scope = if row_scope == 0 { DEFAULT_SCOPE } else { row_scope };
        let table_id = if table_id == 0 {
            self.default_table_id
        } else {
            self.default_table_id = table_id;
            table_id
        };

        let key = RowKey::new(table_scope, table_id, row_scope, row_id);
        tracing::trace!(row = %key, "Selected row");
        self.document.store.row_mut(key);
        self.current_row = Some(key);
    }

    fn read_cell(&mut self) {
        match parse_cell(&mut self.scanner, self.mode) {
            CellResult::Empty => {}
            CellResult::ColumnAtom { id, text } => self.document.columns.insert(id, text),
            CellResult::ValueAtom { id, text } => self.document.values.insert(id, text),
            CellResult::Reference { column, value } => self.insert_cell(column, value),
            CellResult::Literal { column, text } => {
                let id = self.mint_synthetic_id();
                self.document.values.insert(id, text);
                self.insert_cell(column, id);
            }
        }
    }

    fn insert_cell(&mut self, column: AtomId, value: AtomId) {
        if let Some(key) = self.current_row {
            self.document.store.row_mut(key).insert(column, value);
        }
    }

    /// Returns a fresh negative id for an inline literal.
    fn mint_synthetic_id(&mut self) -> AtomId {
        self.synthetic_counter = self.synthetic_counter.wrapping_sub(1);
        self.synthetic_counter.wrapping_neg()
    }

    fn unexpected(&self, found: u8) -> Error {
        let at = self.scanner.position().saturating_sub(1);
        tracing::warn!(offset = at, character = %char::from(found), "Unexpected character in Mork data");
        Error::UnexpectedCharacter { at, found }
    }
}
