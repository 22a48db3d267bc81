//! Reference lookup over a worksheet's cells

use ahash::AHashMap;

use crate::cell::RawCell;
use crate::error::{Error, Result};
use crate::source::{DocumentSource, SheetInfo};

/// Immutable snapshot of the single worksheet's cells, indexed by reference
#[derive(Debug, Clone)]
pub struct CellIndex {
    sheet: SheetInfo,
    cells: Vec<RawCell>,
    /// Reference -> position in `cells` of its first occurrence
    by_reference: AHashMap<String, usize>,
}

impl CellIndex {
    /// Build the index from a source that declares exactly one worksheet
    pub fn build<S: DocumentSource + ?Sized>(source: &mut S) -> Result<Self> {
        let sheet = match source.worksheets() {
            [] => {
                return Err(Error::WorksheetNotFound(
                    "workbook declares no worksheets".into(),
                ))
            }
            [sheet] => sheet.clone(),
            sheets => return Err(Error::MultipleSheetsUnsupported(sheets.len())),
        };

        let cells = source.read_cells(&sheet)?;
        Ok(Self::from_cells(sheet, cells))
    }

    /// Index an already materialized list of cells
    pub fn from_cells(sheet: SheetInfo, cells: Vec<RawCell>) -> Self {
        let mut by_reference = AHashMap::with_capacity(cells.len());
        for (pos, cell) in cells.iter().enumerate() {
            by_reference.entry(cell.reference.clone()).or_insert(pos);
        }

        Self {
            sheet,
            cells,
            by_reference,
        }
    }

    /// The indexed worksheet
    pub fn sheet(&self) -> &SheetInfo {
        &self.sheet
    }

    /// Find a cell by exact reference; the first one in document order wins
    pub fn find_cell(&self, reference: &str) -> Option<&RawCell> {
        self.by_reference
            .get(reference)
            .and_then(|&pos| self.cells.get(pos))
    }

    /// All cells in document order
    pub fn cells(&self) -> std::slice::Iter<'_, RawCell> {
        self.cells.iter()
    }

    /// Number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the worksheet has no cells
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
