//! Raw cell records

/// Cell type tag, as carried by the SpreadsheetML `t` attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellType {
    /// Index into the shared strings table (`s`)
    SharedString,
    /// Inline rich string (`inlineStr`)
    InlineString,
    /// String result of a formula (`str`)
    FormulaString,
    /// Boolean stored as 0/1 (`b`)
    Boolean,
    /// Number (`n`, the default)
    Number,
    /// Error literal such as `#N/A` (`e`)
    Error,
    /// ISO 8601 date (`d`)
    Date,
}

impl CellType {
    /// Parse the value of a `t` attribute; unknown tags yield `None`
    pub fn from_xlsx(tag: &str) -> Option<Self> {
        match tag {
            "s" => Some(CellType::SharedString),
            "inlineStr" => Some(CellType::InlineString),
            "str" => Some(CellType::FormulaString),
            "b" => Some(CellType::Boolean),
            "n" => Some(CellType::Number),
            "e" => Some(CellType::Error),
            "d" => Some(CellType::Date),
            _ => None,
        }
    }
}

/// A cell as yielded by a document source
///
/// `inner_text` is the stored text of the cell: the value of a number, the
/// index of a shared string, or the text of an inline string. It is empty
/// for cells that only carry formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCell {
    /// A1-style reference (e.g., "B7")
    pub reference: String,
    /// Type tag, if the source declared a known one
    pub cell_type: Option<CellType>,
    /// Stored text
    pub inner_text: String,
}

impl RawCell {
    /// Create a new raw cell
    pub fn new<R, T>(reference: R, cell_type: Option<CellType>, inner_text: T) -> Self
    where
        R: Into<String>,
        T: Into<String>,
    {
        Self {
            reference: reference.into(),
            cell_type,
            inner_text: inner_text.into(),
        }
    }

    /// Whether the inner text is an index into the shared strings table
    pub fn is_shared_string(&self) -> bool {
        self.cell_type == Some(CellType::SharedString)
    }
}
