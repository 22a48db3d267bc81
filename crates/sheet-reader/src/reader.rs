//! The `SheetReader` facade

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use sheet_reader_core::{
    Document, Error, FromCell, IntoColumn, RawCell, ReadOptions, Result, TypedValue, ValueKind,
};
use sheet_reader_xlsx::XlsxSource;

/// Who is responsible for the underlying stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamOwnership {
    /// The reader opened the file and drops it on close
    Owned,
    /// The caller supplied the stream; close hands it back
    Borrowed,
}

/// Reader over a single-worksheet XLSX document
///
/// Opening parses the workbook and materializes the worksheet's cells. The
/// shared strings table is loaded on the first lookup that needs it.
///
/// A reader built with [`SheetReader::from_reader`] takes the stream by value.
/// [`SheetReader::close`] hands it back, but dropping the reader without
/// closing it drops the stream too (closing a `File`). A failed open drops it
/// as well. To keep ownership in every case, pass `&mut stream`, which is
/// itself `Read + Seek`.
///
/// # Example
///
/// ```rust,no_run
/// use sheet_reader::SheetReader;
/// use std::fs::File;
///
/// let file = File::open("report.xlsx").unwrap();
/// let mut reader = SheetReader::from_reader(file).unwrap();
/// let total: Option<f64> = reader.get_typed_value("C", 10).unwrap();
/// let file = reader.close().unwrap();
/// ```
pub struct SheetReader<R: Read + Seek> {
    document: Option<Document<XlsxSource<R>>>,
    ownership: StreamOwnership,
}

impl SheetReader<BufReader<File>> {
    /// Open a file by path, with default options
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ReadOptions::default())
    }

    /// Open a file by path
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ReadOptions) -> Result<Self> {
        let source = XlsxSource::open_file(path)?;
        Self::build(source, options, StreamOwnership::Owned)
    }
}

impl<R: Read + Seek> SheetReader<R> {
    /// Read from a caller-supplied stream, with default options
    pub fn from_reader(reader: R) -> Result<Self> {
        Self::from_reader_with_options(reader, ReadOptions::default())
    }

    /// Read from a caller-supplied stream
    pub fn from_reader_with_options(reader: R, options: ReadOptions) -> Result<Self> {
        let source = XlsxSource::new(reader)?;
        Self::build(source, options, StreamOwnership::Borrowed)
    }

    fn build(source: XlsxSource<R>, options: ReadOptions, ownership: StreamOwnership) -> Result<Self> {
        let document = Document::open(source, options)?;
        Ok(Self {
            document: Some(document),
            ownership,
        })
    }

    /// Who owns the underlying stream
    pub fn ownership(&self) -> StreamOwnership {
        self.ownership
    }

    /// Whether [`SheetReader::close`] has been called
    pub fn is_closed(&self) -> bool {
        self.document.is_none()
    }

    /// Name of the worksheet being read
    pub fn sheet_name(&self) -> Result<&str> {
        Ok(self.document()?.sheet().name.as_str())
    }

    /// Find a cell by its exact A1-style reference
    pub fn get_cell(&self, reference: &str) -> Result<Option<&RawCell>> {
        Ok(self.document()?.get_cell(reference))
    }

    /// All cells of the worksheet in document order
    pub fn cells(&self) -> Result<std::slice::Iter<'_, RawCell>> {
        Ok(self.document()?.cells())
    }

    /// Raw text of a cell, with shared strings resolved
    ///
    /// `Ok(None)` means no cell exists at the address.
    pub fn get_value(&self, column: impl IntoColumn, row: u32) -> Result<Option<&str>> {
        self.document()?.raw_value(column, row)
    }

    /// Read a cell converted to `T`
    ///
    /// Missing, empty and unconvertible cells read as `None` for `Option<T>`
    /// and as the zero value for plain `T` (under the lenient policy).
    pub fn get_typed_value<T: FromCell>(&self, column: impl IntoColumn, row: u32) -> Result<T> {
        self.document()?.typed_value(column, row)
    }

    /// Read a cell converted to a kind named at runtime, e.g. `"int?"` or `"DateTime"`
    pub fn get_value_as(
        &self,
        column: impl IntoColumn,
        row: u32,
        type_name: &str,
    ) -> Result<TypedValue> {
        let kind = ValueKind::from_type_name(type_name)?;
        self.document()?.value_as(column, row, kind)
    }

    /// Release the document
    ///
    /// A caller-supplied stream is handed back on the first call. An owned
    /// file is dropped and `None` returned. Later calls do nothing and return
    /// `None`.
    pub fn close(&mut self) -> Option<R> {
        let document = self.document.take()?;
        log::debug!("Closing worksheet '{}'", document.sheet().name);

        let reader = document.into_source().into_inner();
        match self.ownership {
            StreamOwnership::Borrowed => Some(reader),
            StreamOwnership::Owned => None,
        }
    }

    fn document(&self) -> Result<&Document<XlsxSource<R>>> {
        self.document.as_ref().ok_or(Error::Closed)
    }
}

impl<R: Read + Seek> std::fmt::Debug for SheetReader<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SheetReader")
            .field("sheet", &self.document.as_ref().map(|d| d.sheet().name.as_str()))
            .field("ownership", &self.ownership)
            .field("closed", &self.is_closed())
            .finish()
    }
}
