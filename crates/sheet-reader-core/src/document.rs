//! An open single-worksheet document

use std::cell::RefCell;

use once_cell::unsync::OnceCell;

use crate::cell::RawCell;
use crate::column::{CellRef, IntoColumn};
use crate::error::{Error, Result};
use crate::index::CellIndex;
use crate::options::{CoercionPolicy, DateSystem, ReadOptions};
use crate::source::{DocumentSource, SharedStringTable, SheetInfo};
use crate::value::{convert, FromCell, TypedValue, ValueKind};

/// A document opened from a [`DocumentSource`]
///
/// The worksheet's cells are materialized when the document is opened; the
/// shared strings table is parsed on the first shared-string lookup and cached
/// for the lifetime of the document.
pub struct Document<S> {
    source: RefCell<S>,
    index: CellIndex,
    has_shared_strings: bool,
    shared_strings: OnceCell<SharedStringTable>,
    date_system: DateSystem,
    options: ReadOptions,
}

impl<S: DocumentSource> Document<S> {
    /// Open a document, failing if it does not have exactly one worksheet
    pub fn open(mut source: S, options: ReadOptions) -> Result<Self> {
        let index = CellIndex::build(&mut source)?;
        let has_shared_strings = source.has_shared_strings();
        let date_system = options.date_system.unwrap_or_else(|| source.date_system());

        log::debug!(
            "Opened worksheet '{}' with {} cells (shared strings: {}, {:?})",
            index.sheet().name,
            index.len(),
            has_shared_strings,
            date_system
        );

        Ok(Self {
            source: RefCell::new(source),
            index,
            has_shared_strings,
            shared_strings: OnceCell::new(),
            date_system,
            options,
        })
    }

    /// The worksheet being read
    pub fn sheet(&self) -> &SheetInfo {
        self.index.sheet()
    }

    /// The cell index
    pub fn index(&self) -> &CellIndex {
        &self.index
    }

    /// Date system used for date and duration conversions
    pub fn date_system(&self) -> DateSystem {
        self.date_system
    }

    /// Options the document was opened with
    pub fn options(&self) -> &ReadOptions {
        &self.options
    }

    /// Find a cell by its A1-style reference
    pub fn get_cell(&self, reference: &str) -> Option<&RawCell> {
        self.index.find_cell(reference)
    }

    /// All cells in document order
    pub fn cells(&self) -> std::slice::Iter<'_, RawCell> {
        self.index.cells()
    }

    /// Raw text of a cell, with shared strings resolved
    ///
    /// Returns `Ok(None)` when no cell exists at the address.
    pub fn raw_value(&self, column: impl IntoColumn, row: u32) -> Result<Option<&str>> {
        let cell_ref = CellRef::new(column, row)?;
        self.raw_value_at(&cell_ref)
    }

    /// Convert a cell to `T`
    ///
    /// Blank cells read as `None` for `Option<T>` and as the zero value for plain `T`.
    pub fn typed_value<T: FromCell>(&self, column: impl IntoColumn, row: u32) -> Result<T> {
        let cell_ref = CellRef::new(column, row)?;
        self.value_at(&cell_ref, T::KIND).map(T::from_value)
    }

    /// Convert a cell to a kind chosen at runtime
    pub fn value_as(
        &self,
        column: impl IntoColumn,
        row: u32,
        kind: ValueKind,
    ) -> Result<TypedValue> {
        let cell_ref = CellRef::new(column, row)?;
        self.value_at(&cell_ref, kind)
    }

    /// Release the document and hand back its source
    pub fn into_source(self) -> S {
        self.source.into_inner()
    }

    fn raw_value_at(&self, cell_ref: &CellRef) -> Result<Option<&str>> {
        let reference = cell_ref.to_string();
        let cell = match self.index.find_cell(&reference) {
            Some(cell) => cell,
            None => return Ok(None),
        };

        if !cell.is_shared_string() {
            return Ok(Some(cell.inner_text.as_str()));
        }

        let position: usize = cell.inner_text.trim().parse().map_err(|_| {
            Error::SharedStringResolution(format!(
                "cell {} has invalid shared string index '{}'",
                reference, cell.inner_text
            ))
        })?;

        let table = self.shared_strings()?;
        table.get(position).map(Some).ok_or_else(|| {
            Error::SharedStringResolution(format!(
                "cell {} references shared string {} but the table has {}",
                reference,
                position,
                table.len()
            ))
        })
    }

    fn value_at(&self, cell_ref: &CellRef, kind: ValueKind) -> Result<TypedValue> {
        let text = match self.raw_value_at(cell_ref)? {
            Some(text) if !text.is_empty() => text,
            _ => return Ok(TypedValue::Empty),
        };

        if let Some(value) = convert(text, kind.scalar, self.date_system) {
            return Ok(value);
        }

        match self.options.policy {
            CoercionPolicy::Strict => Err(Error::MalformedValue {
                reference: cell_ref.to_string(),
                kind: kind.scalar.name(),
                text: text.to_string(),
            }),
            CoercionPolicy::Lenient => {
                log::debug!(
                    "Cell {}: '{}' is not a valid {}, reading as blank",
                    cell_ref,
                    text,
                    kind
                );
                Ok(TypedValue::Empty)
            }
        }
    }

    fn shared_strings(&self) -> Result<&SharedStringTable> {
        if !self.has_shared_strings {
            return Err(Error::SharedStringResolution(
                "no shared string table loaded".into(),
            ));
        }

        self.shared_strings.get_or_try_init(|| {
            let table = self
                .source
                .borrow_mut()
                .read_shared_strings()
                .map_err(|err| match err {
                    Error::DocumentOpen(source) => Error::SharedStringResolution(format!(
                        "shared strings table could not be read: {source}"
                    )),
                    other => other,
                })?;
            log::trace!("Loaded shared strings table ({} entries)", table.len());
            Ok(table)
        })
    }
}
