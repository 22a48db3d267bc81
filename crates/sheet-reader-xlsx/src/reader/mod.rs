//! XLSX document source

mod shared_strings;
mod worksheet;

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::reader::Reader;

use crate::error::{XlsxError, XlsxResult};
use sheet_reader_core::{DateSystem, DocumentSource, RawCell, SharedStringTable, SheetInfo};

const WORKBOOK_PART: &str = "xl/workbook.xml";
const WORKBOOK_RELS_PART: &str = "xl/_rels/workbook.xml.rels";
const DEFAULT_SHARED_STRINGS_PART: &str = "xl/sharedStrings.xml";

/// Relationships of the workbook part we care about
#[derive(Debug, Default)]
struct WorkbookRels {
    /// Relationship id -> worksheet part path
    worksheets: HashMap<String, String>,
    /// Shared strings part path
    shared_strings: Option<String>,
}

/// Document source over an XLSX package
///
/// Opening reads `xl/workbook.xml` and its relationships only. Worksheet cells
/// are parsed by [`DocumentSource::read_cells`], the shared strings table by
/// [`DocumentSource::read_shared_strings`].
pub struct XlsxSource<R> {
    archive: zip::ZipArchive<R>,
    sheets: Vec<SheetInfo>,
    shared_strings_part: Option<String>,
    date_system: DateSystem,
}

impl XlsxSource<BufReader<File>> {
    /// Open a package from a file path
    pub fn open_file<P: AsRef<Path>>(path: P) -> XlsxResult<Self> {
        let file = File::open(path)?;
        Self::new(BufReader::new(file))
    }
}

impl<R: Read + Seek> XlsxSource<R> {
    /// Open a package from a reader
    pub fn new(reader: R) -> XlsxResult<Self> {
        let mut archive = zip::ZipArchive::new(reader)?;

        // Verify this is an XLSX file
        if archive.by_name("[Content_Types].xml").is_err() {
            return Err(XlsxError::InvalidFormat(
                "Missing [Content_Types].xml".into(),
            ));
        }

        let (declared, date_1904) = Self::read_workbook_xml(&mut archive)?;
        let rels = Self::read_workbook_rels(&mut archive)?;

        let sheets = declared
            .into_iter()
            .map(|(name, r_id)| {
                let part = r_id.and_then(|id| rels.worksheets.get(&id).cloned());
                SheetInfo::new(name, part)
            })
            .collect();

        let has_part = |path: &str| archive.file_names().any(|name| name == path);
        let shared_strings_part = rels
            .shared_strings
            .filter(|path| has_part(path.as_str()))
            .or_else(|| {
                has_part(DEFAULT_SHARED_STRINGS_PART)
                    .then(|| DEFAULT_SHARED_STRINGS_PART.to_string())
            });

        Ok(Self {
            archive,
            sheets,
            shared_strings_part,
            date_system: if date_1904 {
                DateSystem::Excel1904
            } else {
                DateSystem::Excel1900
            },
        })
    }

    /// Release the package and hand back the underlying reader
    pub fn into_inner(self) -> R {
        self.archive.into_inner()
    }

    /// Read workbook.xml: sheet names with their relationship ids, and the date system
    fn read_workbook_xml(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<(Vec<(String, Option<String>)>, bool)> {
        let file = archive
            .by_name(WORKBOOK_PART)
            .map_err(|_| XlsxError::MissingPart(WORKBOOK_PART.into()))?;

        let reader = BufReader::new(file);
        let mut xml_reader = Reader::from_reader(reader);
        xml_reader.trim_text(true);

        let mut buf = Vec::new();
        let mut sheets = Vec::new();
        let mut date_1904 = false;

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Empty(e)) | Ok(Event::Start(e)) => match e.name().as_ref() {
                    b"sheet" => {
                        let mut name = None;
                        let mut r_id = None;

                        for attr in e.attributes().flatten() {
                            match attr.key.as_ref() {
                                b"name" => {
                                    name = attr.unescape_value().ok().map(|s| s.to_string());
                                }
                                b"r:id" => {
                                    r_id = attr.unescape_value().ok().map(|s| s.to_string());
                                }
                                _ => {}
                            }
                        }

                        if let Some(name) = name {
                            sheets.push((name, r_id));
                        }
                    }
                    b"workbookPr" => {
                        for attr in e.attributes().flatten() {
                            if attr.key.as_ref() == b"date1904" {
                                date_1904 = attr
                                    .unescape_value()
                                    .map_or(false, |s| matches!(&*s, "1" | "true"));
                            }
                        }
                    }
                    _ => {}
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok((sheets, date_1904))
    }

    /// Read workbook.xml.rels to get worksheet and shared strings paths
    fn read_workbook_rels(archive: &mut zip::ZipArchive<R>) -> XlsxResult<WorkbookRels> {
        let file = archive
            .by_name(WORKBOOK_RELS_PART)
            .map_err(|_| XlsxError::MissingPart(WORKBOOK_RELS_PART.into()))?;

        let reader = BufReader::new(file);
        let mut xml_reader = Reader::from_reader(reader);
        xml_reader.trim_text(true);

        let mut buf = Vec::new();
        let mut rels = WorkbookRels::default();

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Empty(e)) | Ok(Event::Start(e))
                    if e.name().as_ref() == b"Relationship" =>
                {
                    let mut id = None;
                    let mut target = None;
                    let mut rel_type = None;

                    for attr in e.attributes().flatten() {
                        match attr.key.as_ref() {
                            b"Id" => {
                                id = attr.unescape_value().ok().map(|s| s.to_string());
                            }
                            b"Target" => {
                                target = attr.unescape_value().ok().map(|s| s.to_string());
                            }
                            b"Type" => {
                                rel_type = attr.unescape_value().ok().map(|s| s.to_string());
                            }
                            _ => {}
                        }
                    }

                    if let (Some(id), Some(target), Some(rel_type)) = (id, target, rel_type) {
                        if rel_type.ends_with("/worksheet") {
                            rels.worksheets.insert(id, resolve_target(&target));
                        } else if rel_type.ends_with("/sharedStrings")
                            && rels.shared_strings.is_none()
                        {
                            rels.shared_strings = Some(resolve_target(&target));
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(rels)
    }
}

impl<R: Read + Seek> DocumentSource for XlsxSource<R> {
    fn worksheets(&self) -> &[SheetInfo] {
        &self.sheets
    }

    fn read_cells(&mut self, sheet: &SheetInfo) -> sheet_reader_core::Result<Vec<RawCell>> {
        let part = sheet
            .part
            .as_deref()
            .ok_or_else(|| XlsxError::MissingWorksheet(sheet.name.clone()))?;

        let file = self
            .archive
            .by_name(part)
            .map_err(|_| XlsxError::MissingWorksheet(sheet.name.clone()))?;

        Ok(worksheet::read_cells(BufReader::new(file))?)
    }

    fn has_shared_strings(&self) -> bool {
        self.shared_strings_part.is_some()
    }

    fn read_shared_strings(&mut self) -> sheet_reader_core::Result<SharedStringTable> {
        let part = self.shared_strings_part.as_deref().ok_or_else(|| {
            sheet_reader_core::Error::SharedStringResolution("no shared string table loaded".into())
        })?;

        let file = self
            .archive
            .by_name(part)
            .map_err(|_| XlsxError::MissingPart(part.to_string()))?;

        let strings = shared_strings::read_shared_strings(BufReader::new(file))?;
        Ok(SharedStringTable::new(strings))
    }

    fn date_system(&self) -> DateSystem {
        self.date_system
    }
}

/// Resolve a relationship target of the workbook part to a package path
///
/// Targets are relative to `xl/` unless they start with `/`.
fn resolve_target(target: &str) -> String {
    if let Some(absolute) = target.strip_prefix('/') {
        return absolute.to_string();
    }

    let mut segments: Vec<&str> = vec!["xl"];
    for segment in target.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    segments.join("/")
}

/// Decode Excel's `_xHHHH_` escape sequences (e.g. `_x000d_` for CR)
pub(crate) fn decode_excel_escapes(s: &str) -> String {
    if !s.contains("_x") {
        return s.to_string();
    }

    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(pos) = rest.find("_x") {
        result.push_str(&rest[..pos]);
        let candidate = &rest[pos..];
        match decode_escape(candidate) {
            Some(c) => {
                result.push(c);
                rest = &candidate[7..];
            }
            None => {
                result.push('_');
                rest = &candidate[1..];
            }
        }
    }
    result.push_str(rest);
    result
}

/// Decode one `_xHHHH_` sequence at the start of `s`
fn decode_escape(s: &str) -> Option<char> {
    if s.as_bytes().get(6) != Some(&b'_') {
        return None;
    }
    let hex = s.get(2..6)?;
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    char::from_u32(u32::from_str_radix(hex, 16).ok()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::{Cursor, Write};

    const CONTENT_TYPES: &str = r#"<?xml version="1.0"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="xml" ContentType="application/xml"/></Types>"#;

    fn workbook(sheets: &str, workbook_pr: &str) -> String {
        format!(
            r#"<?xml version="1.0"?><workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">{workbook_pr}<sheets>{sheets}</sheets></workbook>"#
        )
    }

    fn rels(relationships: &str) -> String {
        format!(
            r#"<?xml version="1.0"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{relationships}</Relationships>"#
        )
    }

    fn worksheet_rel(id: &str, target: &str) -> String {
        format!(
            r#"<Relationship Id="{id}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="{target}"/>"#
        )
    }

    fn shared_strings_rel(id: &str, target: &str) -> String {
        format!(
            r#"<Relationship Id="{id}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/sharedStrings" Target="{target}"/>"#
        )
    }

    fn package(parts: &[(&str, &str)]) -> Cursor<Vec<u8>> {
        let mut buf = Vec::new();
        {
            let mut zip = zip::ZipWriter::new(Cursor::new(&mut buf));
            let options = zip::write::SimpleFileOptions::default();
            for (name, content) in parts {
                zip.start_file(*name, options).unwrap();
                zip.write_all(content.as_bytes()).unwrap();
            }
            zip.finish().unwrap();
        }
        Cursor::new(buf)
    }

    fn single_sheet(sheet_data: &str, with_shared_strings: bool) -> Cursor<Vec<u8>> {
        let mut relationships = worksheet_rel("rId1", "worksheets/sheet1.xml");
        if with_shared_strings {
            relationships.push_str(&shared_strings_rel("rId2", "sharedStrings.xml"));
        }
        let workbook = workbook(r#"<sheet name="Planilha1" sheetId="1" r:id="rId1"/>"#, "");
        let rels = rels(&relationships);
        let sheet = format!(
            r#"<?xml version="1.0"?><worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>{sheet_data}</sheetData></worksheet>"#
        );
        let sst = r#"<?xml version="1.0"?><sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><si><t>geral</t></si><si><t>texto</t></si></sst>"#;

        let mut parts = vec![
            ("[Content_Types].xml", CONTENT_TYPES),
            ("xl/workbook.xml", workbook.as_str()),
            ("xl/_rels/workbook.xml.rels", rels.as_str()),
            ("xl/worksheets/sheet1.xml", sheet.as_str()),
        ];
        if with_shared_strings {
            parts.push(("xl/sharedStrings.xml", sst));
        }
        package(&parts)
    }

    #[test]
    fn test_open_single_sheet() {
        let mut source = XlsxSource::new(single_sheet(
            r#"<row r="2"><c r="B2" t="s"><v>1</v></c><c r="C2"><v>42</v></c></row>"#,
            true,
        ))
        .unwrap();

        assert_eq!(source.worksheets().len(), 1);
        let sheet = source.worksheets()[0].clone();
        assert_eq!(sheet.name, "Planilha1");
        assert_eq!(sheet.part.as_deref(), Some("xl/worksheets/sheet1.xml"));
        assert_eq!(source.date_system(), DateSystem::Excel1900);

        let cells = source.read_cells(&sheet).unwrap();
        assert_eq!(cells.len(), 2);
        assert_eq!(cells[0].reference, "B2");
        assert!(cells[0].is_shared_string());
        assert_eq!(cells[1].inner_text, "42");

        assert!(source.has_shared_strings());
        let table = source.read_shared_strings().unwrap();
        assert_eq!(table.get(1), Some("texto"));
    }

    #[test]
    fn test_without_shared_strings() {
        let mut source = XlsxSource::new(single_sheet("", false)).unwrap();
        assert!(!source.has_shared_strings());
        assert!(matches!(
            source.read_shared_strings(),
            Err(sheet_reader_core::Error::SharedStringResolution(_))
        ));
    }

    #[test]
    fn test_default_shared_strings_part_without_relationship() {
        let workbook = workbook(r#"<sheet name="Sheet1" sheetId="1" r:id="rId1"/>"#, "");
        let rels = rels(&worksheet_rel("rId1", "worksheets/sheet1.xml"));
        let sst = r#"<sst><si><t>only</t></si></sst>"#;
        let mut source = XlsxSource::new(package(&[
            ("[Content_Types].xml", CONTENT_TYPES),
            ("xl/workbook.xml", workbook.as_str()),
            ("xl/_rels/workbook.xml.rels", rels.as_str()),
            ("xl/worksheets/sheet1.xml", "<worksheet><sheetData/></worksheet>"),
            ("xl/sharedStrings.xml", sst),
        ]))
        .unwrap();

        assert!(source.has_shared_strings());
        assert_eq!(source.read_shared_strings().unwrap().get(0), Some("only"));
    }

    #[test]
    fn test_date_1904_and_multiple_sheets() {
        let workbook = workbook(
            r#"<sheet name="A" sheetId="1" r:id="rId1"/><sheet name="B" sheetId="2" r:id="rId2"/>"#,
            r#"<workbookPr date1904="1"/>"#,
        );
        let rels = rels(&format!(
            "{}{}",
            worksheet_rel("rId1", "worksheets/sheet1.xml"),
            worksheet_rel("rId2", "/xl/worksheets/sheet2.xml")
        ));
        let source = XlsxSource::new(package(&[
            ("[Content_Types].xml", CONTENT_TYPES),
            ("xl/workbook.xml", workbook.as_str()),
            ("xl/_rels/workbook.xml.rels", rels.as_str()),
        ]))
        .unwrap();

        assert_eq!(source.date_system(), DateSystem::Excel1904);
        let names: Vec<_> = source.worksheets().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
        assert_eq!(
            source.worksheets()[1].part.as_deref(),
            Some("xl/worksheets/sheet2.xml")
        );
    }

    #[test]
    fn test_missing_worksheet_part() {
        let workbook = workbook(r#"<sheet name="Ghost" sheetId="1" r:id="rId9"/>"#, "");
        let rels = rels(&worksheet_rel("rId1", "worksheets/sheet1.xml"));
        let mut source = XlsxSource::new(package(&[
            ("[Content_Types].xml", CONTENT_TYPES),
            ("xl/workbook.xml", workbook.as_str()),
            ("xl/_rels/workbook.xml.rels", rels.as_str()),
        ]))
        .unwrap();

        let sheet = source.worksheets()[0].clone();
        assert_eq!(sheet.part, None);
        assert!(matches!(
            source.read_cells(&sheet),
            Err(sheet_reader_core::Error::WorksheetNotFound(name)) if name == "Ghost"
        ));
    }

    #[test]
    fn test_not_an_xlsx_package() {
        let missing_types = package(&[("xl/workbook.xml", "<workbook/>")]);
        assert!(matches!(
            XlsxSource::new(missing_types),
            Err(XlsxError::InvalidFormat(_))
        ));

        let not_zip = Cursor::new(b"plain text, not a zip".to_vec());
        assert!(matches!(XlsxSource::new(not_zip), Err(XlsxError::Zip(_))));
    }

    #[test]
    fn test_into_inner_returns_reader() {
        let cursor = single_sheet("", false);
        let len = cursor.get_ref().len();
        let source = XlsxSource::new(cursor).unwrap();
        assert_eq!(source.into_inner().get_ref().len(), len);
    }

    #[test]
    fn test_resolve_target() {
        assert_eq!(resolve_target("worksheets/sheet1.xml"), "xl/worksheets/sheet1.xml");
        assert_eq!(resolve_target("/xl/worksheets/sheet1.xml"), "xl/worksheets/sheet1.xml");
        assert_eq!(resolve_target("./sharedStrings.xml"), "xl/sharedStrings.xml");
        assert_eq!(resolve_target("../xl/sharedStrings.xml"), "xl/sharedStrings.xml");
    }

    #[test]
    fn test_decode_excel_escapes() {
        assert_eq!(decode_excel_escapes("hello_x000d_world"), "hello\rworld");
        assert_eq!(decode_excel_escapes("col1_x0009_col2"), "col1\tcol2");
        assert_eq!(
            decode_excel_escapes("line1_x000D__x000A_line2"),
            "line1\r\nline2"
        );
        assert_eq!(decode_excel_escapes("under_x005f_score"), "under_score");
        assert_eq!(decode_excel_escapes("plain text"), "plain text");
    }

    #[test]
    fn test_decode_excel_escapes_incomplete() {
        assert_eq!(decode_excel_escapes("_x00"), "_x00");
        assert_eq!(decode_excel_escapes("_x000d"), "_x000d");
        assert_eq!(decode_excel_escapes("_xzzzz_"), "_xzzzz_");
        assert_eq!(decode_excel_escapes("a__x0041_"), "a_A");
    }
}
