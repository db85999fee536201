//! Field tokenizer
//!
//! Splits a command line into alphabetic and numeric fields in one
//! left-to-right pass. A change of character class starts a new field even
//! without a delimiter, so `level30` tokenizes as `level`, `30`.

use heapless::Vec;

use crate::line::InputLine;

/// Maximum number of fields (keyword + arguments) in one line
pub const MAX_FIELDS: usize = 6;

/// Character class of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FieldKind {
    /// Letters `A-Z`, `a-z`
    Alpha,
    /// Digits `0-9`
    Numeric,
}

impl FieldKind {
    /// Classify a byte; `None` for delimiters
    pub fn of(byte: u8) -> Option<Self> {
        if byte.is_ascii_alphabetic() {
            Some(FieldKind::Alpha)
        } else if byte.is_ascii_digit() {
            Some(FieldKind::Numeric)
        } else {
            None
        }
    }

    /// One-letter tag used in the diagnostic field table
    pub fn tag(self) -> char {
        match self {
            FieldKind::Alpha => 'a',
            FieldKind::Numeric => 'n',
        }
    }
}

/// A field span inside the line buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Field {
    /// Offset of the first byte
    pub start: usize,
    /// Number of bytes
    pub len: usize,
    /// Character class
    pub kind: FieldKind,
}

impl Field {
    /// Offset one past the last byte
    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

/// Ordered, non-overlapping field spans
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldTable {
    fields: Vec<Field, MAX_FIELDS>,
}

impl FieldTable {
    /// Scan `bytes` and return the field spans
    ///
    /// The currently open field is tracked as an `Option`; `None` means no
    /// field is open, which is also the state before the first field.
    /// Scanning stops when a seventh field would be opened.
    pub fn scan(bytes: &[u8]) -> Self {
        let mut fields: Vec<Field, MAX_FIELDS> = Vec::new();
        let mut open: Option<FieldKind> = None;

        for (offset, &byte) in bytes.iter().enumerate() {
            match (FieldKind::of(byte), open) {
                (Some(kind), Some(current)) if kind == current => {
                    if let Some(field) = fields.last_mut() {
                        field.len += 1;
                    }
                }
                (Some(kind), _) => {
                    let field = Field {
                        start: offset,
                        len: 1,
                        kind,
                    };
                    if fields.push(field).is_err() {
                        break;
                    }
                    open = Some(kind);
                }
                (None, _) => open = None,
            }
        }

        Self { fields }
    }

    /// Number of fields, keyword included
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the line held no fields at all
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of fields after the keyword
    pub fn argument_count(&self) -> usize {
        self.fields.len().saturating_sub(1)
    }

    /// Get a field by index
    pub fn get(&self, index: usize) -> Option<&Field> {
        self.fields.get(index)
    }

    /// Iterate fields in line order
    pub fn iter(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter()
    }

    /// Check whether `offset` lies inside any field
    fn covers(&self, offset: usize) -> bool {
        self.fields
            .iter()
            .any(|f| offset >= f.start && offset < f.end())
    }
}

/// A tokenized line: the field table plus the line it indexes into
#[derive(Debug, Clone, Copy)]
pub struct Tokens<'a> {
    line: &'a InputLine,
    table: &'a FieldTable,
}

impl InputLine {
    /// Tokenize this line in place
    ///
    /// Every byte outside a field span is overwritten with NUL, so each
    /// field is independently terminated inside the buffer. Echo the raw
    /// line before calling this.
    pub fn tokenize(&mut self) -> FieldTable {
        let table = FieldTable::scan(self.as_bytes());
        for (offset, byte) in self.bytes_mut().iter_mut().enumerate() {
            if !table.covers(offset) {
                *byte = 0;
            }
        }
        table
    }
}

impl<'a> Tokens<'a> {
    /// Pair a field table with the line it was produced from
    pub fn new(line: &'a InputLine, table: &'a FieldTable) -> Self {
        Self { line, table }
    }

    /// The underlying field table
    pub fn table(&self) -> &'a FieldTable {
        self.table
    }

    /// Number of fields, keyword included
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Check if the line held no fields
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Number of fields after the keyword
    pub fn argument_count(&self) -> usize {
        self.table.argument_count()
    }

    /// Kind of the field at `index`
    pub fn kind(&self, index: usize) -> Option<FieldKind> {
        self.table.get(index).map(|f| f.kind)
    }

    /// Text of the field at `index`, borrowed from the line
    pub fn field_str(&self, index: usize) -> Option<&'a str> {
        let field = self.table.get(index)?;
        let bytes = self.line.as_bytes().get(field.start..field.end())?;
        core::str::from_utf8(bytes).ok()
    }

    /// Value of the numeric field at `index`
    ///
    /// Returns `None` for missing or alphabetic fields and for values that
    /// do not fit in a `u32`.
    pub fn field_integer(&self, index: usize) -> Option<u32> {
        if self.kind(index)? != FieldKind::Numeric {
            return None;
        }
        self.field_str(index)?
            .bytes()
            .try_fold(0u32, |acc, digit| {
                acc.checked_mul(10)?.checked_add(u32::from(digit - b'0'))
            })
    }

    /// Check whether this line is `keyword` with at least `min_args`
    /// arguments
    ///
    /// The keyword comparison is exact and case-sensitive.
    pub fn is_command(&self, keyword: &str, min_args: usize) -> bool {
        self.field_str(0) == Some(keyword) && self.argument_count() >= min_args
    }
}
