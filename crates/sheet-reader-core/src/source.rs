//! Document sources
//!
//! A [`DocumentSource`] is the package/XML layer underneath a [`Document`](crate::Document):
//! it reports the declared worksheets, materializes one worksheet's cells and,
//! on demand, the shared strings table.

use crate::cell::RawCell;
use crate::error::{Error, Result};
use crate::options::DateSystem;

/// A worksheet as declared by the workbook
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetInfo {
    /// Sheet name
    pub name: String,
    /// Location of the sheet content within the source, if it could be resolved
    pub part: Option<String>,
}

impl SheetInfo {
    /// Create a sheet declaration
    pub fn new<S: Into<String>>(name: S, part: Option<String>) -> Self {
        Self {
            name: name.into(),
            part,
        }
    }
}

/// Ordered table of strings referenced by 0-based index from shared-string cells
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SharedStringTable {
    strings: Vec<String>,
}

impl SharedStringTable {
    /// Create a table from its strings
    pub fn new(strings: Vec<String>) -> Self {
        Self { strings }
    }

    /// Get the string at `index`
    pub fn get(&self, index: usize) -> Option<&str> {
        self.strings.get(index).map(String::as_str)
    }

    /// Number of strings
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Whether the table has no strings
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// Iterate over the strings in table order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.strings.iter().map(String::as_str)
    }
}

impl From<Vec<String>> for SharedStringTable {
    fn from(strings: Vec<String>) -> Self {
        Self::new(strings)
    }
}

/// The package/XML layer a [`Document`](crate::Document) reads from
pub trait DocumentSource {
    /// Worksheets declared by the workbook, in workbook order
    fn worksheets(&self) -> &[SheetInfo];

    /// All cells of `sheet` in document order
    ///
    /// Fails with [`Error::WorksheetNotFound`] when the sheet content cannot be located.
    fn read_cells(&mut self, sheet: &SheetInfo) -> Result<Vec<RawCell>>;

    /// Whether the document carries a shared strings table
    fn has_shared_strings(&self) -> bool;

    /// Parse the shared strings table
    fn read_shared_strings(&mut self) -> Result<SharedStringTable>;

    /// Date system declared by the workbook
    fn date_system(&self) -> DateSystem {
        DateSystem::Excel1900
    }
}

/// An in-memory document source
///
/// # Example
///
/// ```rust
/// use sheet_reader_core::{MemorySource, RawCell};
///
/// let source = MemorySource::new()
///     .sheet("Data", vec![RawCell::new("A1", None, "1")])
///     .shared_strings(vec!["first".into(), "second".into()]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    sheets: Vec<SheetInfo>,
    contents: Vec<Option<Vec<RawCell>>>,
    shared_strings: Option<SharedStringTable>,
    date_system: DateSystem,
}

impl MemorySource {
    /// Create an empty source with no worksheets
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a worksheet with its cells
    pub fn sheet<S: Into<String>>(mut self, name: S, cells: Vec<RawCell>) -> Self {
        let name = name.into();
        self.sheets.push(SheetInfo::new(name.clone(), Some(name)));
        self.contents.push(Some(cells));
        self
    }

    /// Add a worksheet that is declared but whose content is missing
    pub fn dangling_sheet<S: Into<String>>(mut self, name: S) -> Self {
        self.sheets.push(SheetInfo::new(name, None));
        self.contents.push(None);
        self
    }

    /// Attach a shared strings table
    pub fn shared_strings(mut self, strings: Vec<String>) -> Self {
        self.shared_strings = Some(SharedStringTable::new(strings));
        self
    }

    /// Declare the 1904 date system
    pub fn date_1904(mut self) -> Self {
        self.date_system = DateSystem::Excel1904;
        self
    }
}

impl DocumentSource for MemorySource {
    fn worksheets(&self) -> &[SheetInfo] {
        &self.sheets
    }

    fn read_cells(&mut self, sheet: &SheetInfo) -> Result<Vec<RawCell>> {
        self.sheets
            .iter()
            .position(|s| s == sheet)
            .and_then(|idx| self.contents.get(idx).cloned().flatten())
            .ok_or_else(|| Error::WorksheetNotFound(sheet.name.clone()))
    }

    fn has_shared_strings(&self) -> bool {
        self.shared_strings.is_some()
    }

    fn read_shared_strings(&mut self) -> Result<SharedStringTable> {
        self.shared_strings
            .clone()
            .ok_or_else(|| Error::SharedStringResolution("no shared string table loaded".into()))
    }

    fn date_system(&self) -> DateSystem {
        self.date_system
    }
}
