//! Shared strings part

use std::io::BufRead;

use quick_xml::events::Event;
use quick_xml::reader::Reader;

use super::decode_excel_escapes;
use crate::error::{XlsxError, XlsxResult};

/// Read the `<si>` items of a shared strings part, in order
///
/// Rich text runs are concatenated. Phonetic runs (`<rPh>`) are skipped.
pub(super) fn read_shared_strings<B: BufRead>(reader: B) -> XlsxResult<Vec<String>> {
    let mut xml_reader = Reader::from_reader(reader);
    xml_reader.trim_text(false);

    let mut buf = Vec::new();
    let mut strings = Vec::new();
    let mut current = String::new();
    let mut in_si = false;
    let mut in_t = false;
    let mut in_phonetic = false;

    loop {
        match xml_reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"si" => {
                    in_si = true;
                    current.clear();
                }
                b"t" if in_si => in_t = true,
                b"rPh" => in_phonetic = true,
                _ => {}
            },
            Ok(Event::Empty(e)) if e.name().as_ref() == b"si" => {
                strings.push(String::new());
            }
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"si" => {
                    strings.push(decode_excel_escapes(&current));
                    in_si = false;
                }
                b"t" => in_t = false,
                b"rPh" => in_phonetic = false,
                _ => {}
            },
            Ok(Event::Text(e)) if in_t && !in_phonetic => {
                current.push_str(&e.unescape()?);
            }
            Ok(Event::CData(e)) if in_t && !in_phonetic => {
                current.push_str(&xml_reader.decoder().decode(&e)?);
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(XlsxError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    log::trace!("Read {} shared strings", strings.len());
    Ok(strings)
}
