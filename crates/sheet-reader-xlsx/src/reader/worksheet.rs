//! Worksheet part: flat list of cells in document order

use std::io::BufRead;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use super::decode_excel_escapes;
use crate::error::{XlsxError, XlsxResult};
use sheet_reader_core::{CellRef, CellType, RawCell};

/// Position of the parser within `sheetData`, used to infer missing references
#[derive(Debug, Default)]
struct Cursor {
    row: u32,
    col: u32,
}

impl Cursor {
    fn start_row(&mut self, e: &BytesStart) {
        let declared = e
            .attributes()
            .flatten()
            .find(|attr| attr.key.as_ref() == b"r")
            .and_then(|attr| attr.unescape_value().ok().and_then(|s| s.parse::<u32>().ok()));

        self.row = declared.unwrap_or(self.row + 1);
        self.col = 0;
    }

    /// Reference and type tag of a `<c>` element
    fn start_cell(&mut self, e: &BytesStart) -> (String, Option<CellType>) {
        let mut reference = None;
        let mut cell_type = None;

        for attr in e.attributes().flatten() {
            match attr.key.as_ref() {
                b"r" => {
                    reference = attr.unescape_value().ok().map(|s| s.to_string());
                }
                b"t" => {
                    cell_type = attr
                        .unescape_value()
                        .ok()
                        .and_then(|s| CellType::from_xlsx(&s));
                }
                _ => {}
            }
        }

        let reference = match reference {
            Some(reference) => {
                match CellRef::parse(&reference) {
                    Ok(cell_ref) => {
                        self.row = cell_ref.row;
                        self.col = cell_ref.column.index();
                    }
                    Err(e) => log::warn!("Keeping cell with malformed reference '{reference}': {e}"),
                }
                reference
            }
            None => {
                self.col += 1;
                CellRef::new(self.col, self.row.max(1))
                    .map(|cell_ref| cell_ref.to_string())
                    .unwrap_or_default()
            }
        };

        (reference, cell_type)
    }
}

/// Read every `<c>` of a worksheet part
///
/// The inner text of a cell is its `<v>` text, or the text of its inline string.
/// Formula text is not included.
pub(super) fn read_cells<B: BufRead>(reader: B) -> XlsxResult<Vec<RawCell>> {
    let mut xml_reader = Reader::from_reader(reader);
    xml_reader.trim_text(false);

    let mut buf = Vec::new();
    let mut cells = Vec::new();
    let mut cursor = Cursor::default();

    // Current cell state
    let mut current: Option<RawCell> = None;
    let mut in_value = false;
    let mut in_inline_str = false;
    let mut in_inline_text = false;
    let mut in_phonetic = false;

    loop {
        match xml_reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"row" => cursor.start_row(&e),
                b"c" => {
                    let (reference, cell_type) = cursor.start_cell(&e);
                    current = Some(RawCell::new(reference, cell_type, String::new()));
                }
                b"v" if current.is_some() => in_value = true,
                b"is" if current.is_some() => in_inline_str = true,
                b"t" if in_inline_str => in_inline_text = true,
                b"rPh" if in_inline_str => in_phonetic = true,
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.name().as_ref() {
                b"row" => cursor.start_row(&e),
                b"c" => {
                    let (reference, cell_type) = cursor.start_cell(&e);
                    cells.push(RawCell::new(reference, cell_type, String::new()));
                }
                _ => {}
            },
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"c" => {
                    if let Some(mut cell) = current.take() {
                        if cell.cell_type == Some(CellType::InlineString) {
                            cell.inner_text = decode_excel_escapes(&cell.inner_text);
                        }
                        cells.push(cell);
                    }
                    in_value = false;
                    in_inline_str = false;
                    in_inline_text = false;
                    in_phonetic = false;
                }
                b"v" => in_value = false,
                b"is" => in_inline_str = false,
                b"t" => in_inline_text = false,
                b"rPh" => in_phonetic = false,
                _ => {}
            },
            Ok(Event::Text(e)) if in_value || (in_inline_text && !in_phonetic) => {
                if let Some(cell) = current.as_mut() {
                    cell.inner_text.push_str(&e.unescape()?);
                }
            }
            Ok(Event::CData(e)) if in_value || (in_inline_text && !in_phonetic) => {
                if let Some(cell) = current.as_mut() {
                    cell.inner_text.push_str(&xml_reader.decoder().decode(&e)?);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(XlsxError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(cells)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(sheet_data: &str) -> Vec<RawCell> {
        let xml = format!(
            r#"<?xml version="1.0"?><worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>{sheet_data}</sheetData></worksheet>"#
        );
        read_cells(xml.as_bytes()).unwrap()
    }

    #[test]
    fn test_value_cells() {
        let cells = parse(
            r#"<row r="2"><c r="B2" t="s"><v>0</v></c><c r="C2"><v>12.5</v></c></row>"#,
        );
        assert_eq!(
            cells,
            vec![
                RawCell::new("B2", Some(CellType::SharedString), "0"),
                RawCell::new("C2", None, "12.5"),
            ]
        );
    }

    #[test]
    fn test_formula_text_excluded() {
        let cells = parse(r#"<row r="1"><c r="A1"><f>SUM(B1:B3)</f><v>6</v></c></row>"#);
        assert_eq!(cells, vec![RawCell::new("A1", None, "6")]);
    }

    #[test]
    fn test_inline_string() {
        let cells = parse(
            r#"<row r="1"><c r="A1" t="inlineStr"><is><r><t>Hello </t></r><r><t>World</t></r><rPh><t>ignored</t></rPh></is></c></row>"#,
        );
        assert_eq!(
            cells,
            vec![RawCell::new("A1", Some(CellType::InlineString), "Hello World")]
        );
    }

    #[test]
    fn test_empty_cells_and_escapes() {
        let cells = parse(
            r#"<row r="3"><c r="A3" s="1"/><c r="B3" t="inlineStr"><is><t>a_x000d_b &amp; c</t></is></c></row>"#,
        );
        assert_eq!(
            cells,
            vec![
                RawCell::new("A3", None, ""),
                RawCell::new("B3", Some(CellType::InlineString), "a\rb & c"),
            ]
        );
    }

    #[test]
    fn test_inferred_references() {
        let cells = parse(
            r#"<row r="4"><c><v>1</v></c><c><v>2</v></c><c r="E4"><v>3</v></c><c><v>4</v></c></row><row><c><v>5</v></c></row>"#,
        );
        let refs: Vec<_> = cells.iter().map(|c| c.reference.as_str()).collect();
        assert_eq!(refs, vec!["A4", "B4", "E4", "F4", "A5"]);
    }

    #[test]
    fn test_document_order_with_duplicates() {
        let cells = parse(r#"<row r="1"><c r="A1"><v>first</v></c><c r="A1"><v>second</v></c></row>"#);
        assert_eq!(cells.len(), 2);
        assert_eq!(cells[0].inner_text, "first");
        assert_eq!(cells[1].inner_text, "second");
    }

    #[test]
    fn test_cdata_text() {
        let cells = parse(
            r#"<row r="1"><c r="A1"><v><![CDATA[42]]></v></c><c r="B1" t="inlineStr"><is><t>x </t><t><![CDATA[<y>]]></t></is></c></row>"#,
        );
        assert_eq!(
            cells,
            vec![
                RawCell::new("A1", None, "42"),
                RawCell::new("B1", Some(CellType::InlineString), "x <y>"),
            ]
        );
    }
}
