//! In-memory XLSX packages for integration tests

#![allow(dead_code)]

use std::io::{Cursor, Write};

/// Builds a minimal XLSX package
#[derive(Debug, Default)]
pub struct XlsxBuilder {
    sheets: Vec<(String, String)>,
    shared_strings: Option<Vec<String>>,
    date_1904: bool,
    content_types: bool,
}

impl XlsxBuilder {
    pub fn new() -> Self {
        Self {
            content_types: true,
            ..Self::default()
        }
    }

    /// Add a worksheet with the given `<sheetData>` content
    pub fn sheet(mut self, name: &str, sheet_data: &str) -> Self {
        self.sheets.push((name.to_string(), sheet_data.to_string()));
        self
    }

    pub fn shared_strings(mut self, strings: &[&str]) -> Self {
        self.shared_strings = Some(strings.iter().map(|s| s.to_string()).collect());
        self
    }

    pub fn date_1904(mut self) -> Self {
        self.date_1904 = true;
        self
    }

    pub fn without_content_types(mut self) -> Self {
        self.content_types = false;
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        {
            let mut zip = zip::ZipWriter::new(Cursor::new(&mut buf));
            let options = zip::write::SimpleFileOptions::default();

            if self.content_types {
                zip.start_file("[Content_Types].xml", options).unwrap();
                zip.write_all(br#"<?xml version="1.0"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="xml" ContentType="application/xml"/><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/></Types>"#).unwrap();
            }

            zip.start_file("_rels/.rels", options).unwrap();
            zip.write_all(br#"<?xml version="1.0"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#).unwrap();

            let mut sheets = String::new();
            let mut rels = String::new();
            for (i, (name, _)) in self.sheets.iter().enumerate() {
                let n = i + 1;
                sheets.push_str(&format!(
                    r#"<sheet name="{name}" sheetId="{n}" r:id="rId{n}"/>"#
                ));
                rels.push_str(&format!(
                    r#"<Relationship Id="rId{n}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{n}.xml"/>"#
                ));
            }
            if self.shared_strings.is_some() {
                rels.push_str(r#"<Relationship Id="rIdSst" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/sharedStrings" Target="sharedStrings.xml"/>"#);
            }

            let workbook_pr = if self.date_1904 {
                r#"<workbookPr date1904="1"/>"#
            } else {
                ""
            };

            zip.start_file("xl/workbook.xml", options).unwrap();
            zip.write_all(format!(
                r#"<?xml version="1.0"?><workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">{workbook_pr}<sheets>{sheets}</sheets></workbook>"#
            ).as_bytes()).unwrap();

            zip.start_file("xl/_rels/workbook.xml.rels", options).unwrap();
            zip.write_all(format!(
                r#"<?xml version="1.0"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{rels}</Relationships>"#
            ).as_bytes()).unwrap();

            for (i, (_, sheet_data)) in self.sheets.iter().enumerate() {
                zip.start_file(format!("xl/worksheets/sheet{}.xml", i + 1), options)
                    .unwrap();
                zip.write_all(format!(
                    r#"<?xml version="1.0"?><worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>{sheet_data}</sheetData></worksheet>"#
                ).as_bytes()).unwrap();
            }

            if let Some(strings) = &self.shared_strings {
                let items: String = strings
                    .iter()
                    .map(|s| format!("<si><t>{s}</t></si>"))
                    .collect();
                zip.start_file("xl/sharedStrings.xml", options).unwrap();
                zip.write_all(format!(
                    r#"<?xml version="1.0"?><sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="{0}" uniqueCount="{0}">{items}</sst>"#,
                    strings.len()
                ).as_bytes()).unwrap();
            }

            zip.finish().unwrap();
        }
        buf
    }
}

/// A one-sheet workbook with a value of each kind in column B
///
/// Column A holds inline-string labels. B1 is left empty.
pub fn all_types() -> Vec<u8> {
    XlsxBuilder::new()
        .sheet(
            "Planilha1",
            concat!(
                r#"<row r="1"><c r="A1" t="inlineStr"><is><t>tipo</t></is></c></row>"#,
                r#"<row r="2"><c r="A2" t="inlineStr"><is><t>geral</t></is></c><c r="B2" t="s"><v>0</v></c></row>"#,
                r#"<row r="3"><c r="B3"><v>12.4568</v></c></row>"#,
                r#"<row r="4"><c r="B4" s="2"><v>45.25</v></c></row>"#,
                r#"<row r="5"><c r="B5" s="3"><v>18.5599</v></c></row>"#,
                r#"<row r="6"><c r="B6" s="4"><v>32408</v></c></row>"#,
                r#"<row r="7"><c r="B7" s="4"><v>42952</v></c></row>"#,
                r#"<row r="8"><c r="B8" s="5"><v>0.489594</v></c></row>"#,
                r#"<row r="9"><c r="B9" s="6"><v>0.1845</v></c></row>"#,
                r#"<row r="10"><c r="B10" s="7"><v>0.2</v></c></row>"#,
                r#"<row r="11"><c r="B11"><v>10500000</v></c></row>"#,
                r#"<row r="12"><c r="B12" t="s"><v>1</v></c></row>"#,
                r#"<row r="13"><c r="B13" t="s"><v>2</v></c></row>"#,
                r#"<row r="14"><c r="B14" t="s"><v>1</v></c></row>"#,
                r#"<row r="15"><c r="B15" t="str"><f>B13</f><v>texto2</v></c></row>"#,
                r#"<row r="16"><c r="B16" t="s"><v>3</v></c></row>"#,
                r#"<row r="17"><c r="B17" t="b"><v>1</v></c></row>"#,
            ),
        )
        .shared_strings(&["geral", "texto", "texto2", "a"])
        .build()
}

pub fn single_sheet(sheet_data: &str) -> Vec<u8> {
    XlsxBuilder::new().sheet("Sheet1", sheet_data).build()
}
