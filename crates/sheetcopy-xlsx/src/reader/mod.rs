//! XLSX reader

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, ErrorKind, Read, Seek};
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::{XlsxError, XlsxResult};
use crate::part::{kind_from_type_attr, CellRecord, SheetPart};
use sheetcopy_core::{CellAddress, SharedStrings, Workbook};

/// Decode Excel's `_xHHHH_` escape sequences in strings.
///
/// Excel uses this format to encode special characters in XML:
/// - `_x000d_` = CR (carriage return)
/// - `_x000a_` = LF (line feed)
/// - `_x005f_` = Underscore (escaped underscore)
fn decode_excel_escapes(s: &str) -> String {
    if !s.contains("_x") {
        return s.to_string();
    }

    let mut result = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(start) = rest.find("_x") {
        result.push_str(&rest[..start]);
        let candidate = &rest[start..];
        let decoded = candidate
            .get(2..6)
            .filter(|hex| hex.bytes().all(|b| b.is_ascii_hexdigit()))
            .filter(|_| candidate.as_bytes().get(6) == Some(&b'_'))
            .and_then(|hex| u32::from_str_radix(hex, 16).ok())
            .and_then(char::from_u32);

        match decoded {
            Some(c) => {
                result.push(c);
                rest = &candidate[7..];
            }
            None => {
                result.push_str("_x");
                rest = &candidate[2..];
            }
        }
    }
    result.push_str(rest);

    result
}

/// Everything read from a package
#[derive(Debug, Clone)]
pub struct Package {
    /// Sheet directory and row/cell store built from the parts
    pub workbook: Workbook,
    /// Worksheet parts in sheet order, cells in document order
    pub sheet_parts: Vec<SheetPart>,
    /// Shared string table, if the package has one
    pub shared_strings: Option<SharedStrings>,
}

impl Package {
    /// Assemble a package, loading every part into the workbook's row/cell store
    ///
    /// Cells whose reference is not a valid address stay in their part but are
    /// left out of the store.
    pub fn from_parts(
        mut workbook: Workbook,
        sheet_parts: Vec<SheetPart>,
        shared_strings: Option<SharedStrings>,
    ) -> Self {
        for part in &sheet_parts {
            let Some(sheet) = workbook.sheet_by_id_mut(part.sheet_id) else {
                continue;
            };
            for record in &part.cells {
                match CellAddress::parse(&record.reference) {
                    Ok(address) => {
                        sheet.upsert(&address, &record.raw_value, record.kind);
                    }
                    Err(e) => log::warn!("Skipping cell in sheet '{}': {}", sheet.name(), e),
                }
            }
        }

        Self {
            workbook,
            sheet_parts,
            shared_strings,
        }
    }

    /// Get the part backing a sheet
    pub fn sheet_part(&self, sheet_id: u32) -> Option<&SheetPart> {
        self.sheet_parts.iter().find(|p| p.sheet_id == sheet_id)
    }
}

/// A workbook relationship
#[derive(Debug, Clone)]
struct Relationship {
    rel_type: String,
    /// Archive path of the target
    path: String,
}

impl Relationship {
    fn is(&self, kind: &str) -> bool {
        self.rel_type
            .rsplit('/')
            .next()
            .map_or(false, |t| t == kind)
    }
}

/// Cell being assembled while scanning a worksheet
struct PendingCell {
    reference: String,
    type_attr: Option<String>,
    value: String,
}

impl PendingCell {
    fn finish(self) -> CellRecord {
        let kind = kind_from_type_attr(self.type_attr.as_deref());
        let value = if self.type_attr.as_deref() == Some("inlineStr") {
            decode_excel_escapes(&self.value)
        } else {
            self.value
        };
        CellRecord::new(self.reference, kind, value)
    }
}

/// XLSX file reader
pub struct XlsxReader;

impl XlsxReader {
    /// Read a package from a file path
    pub fn read_file<P: AsRef<Path>>(path: P) -> XlsxResult<Package> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => XlsxError::DocumentNotFound(path.to_path_buf()),
            _ => XlsxError::Io(e),
        })?;
        Self::read(BufReader::new(file))
    }

    /// Read a package from a reader
    ///
    /// Any zip, XML or structural problem is reported as
    /// [`XlsxError::DocumentCorrupt`].
    pub fn read<R: Read + Seek>(reader: R) -> XlsxResult<Package> {
        let mut archive = zip::ZipArchive::new(reader)
            .map_err(|e| XlsxError::corrupt(format!("not a zip package: {}", e)))?;

        Self::read_archive(&mut archive).map_err(|e| match e {
            XlsxError::Zip(e) => XlsxError::corrupt(format!("ZIP error: {}", e)),
            XlsxError::Xml(e) => XlsxError::corrupt(format!("XML error: {}", e)),
            XlsxError::Core(e) => XlsxError::corrupt(e.to_string()),
            other => other,
        })
    }

    fn read_archive<R: Read + Seek>(archive: &mut zip::ZipArchive<R>) -> XlsxResult<Package> {
        // Verify this is an XLSX file
        if archive.by_name("[Content_Types].xml").is_err() {
            return Err(XlsxError::corrupt("Missing [Content_Types].xml"));
        }

        let sheet_info = Self::read_workbook_xml(archive)?;
        let rels = Self::read_workbook_rels(archive)?;

        let shared_strings = match rels.values().find(|r| r.is("sharedStrings")) {
            Some(rel) => {
                let path = rel.path.clone();
                Some(Self::read_shared_strings(archive, &path)?)
            }
            None => None,
        };

        let mut workbook = Workbook::empty();
        let mut sheet_parts = Vec::with_capacity(sheet_info.len());

        for (name, sheet_id, r_id) in sheet_info {
            let path = rels
                .get(&r_id)
                .filter(|r| r.is("worksheet"))
                .map(|r| r.path.clone())
                .ok_or_else(|| {
                    XlsxError::corrupt(format!("no worksheet part for sheet '{}'", name))
                })?;

            workbook.push_sheet(sheet_id, name)?;
            sheet_parts.push(Self::read_worksheet(archive, &path, sheet_id)?);
        }

        log::debug!(
            "Read package with {} sheets (shared strings: {})",
            workbook.sheet_count(),
            shared_strings.as_ref().map_or(0, SharedStrings::len)
        );

        Ok(Package::from_parts(workbook, sheet_parts, shared_strings))
    }

    /// Read the shared strings table
    fn read_shared_strings<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
        path: &str,
    ) -> XlsxResult<SharedStrings> {
        let file = archive
            .by_name(path)
            .map_err(|_| XlsxError::corrupt(format!("Missing shared strings part {}", path)))?;

        let mut xml_reader = Reader::from_reader(BufReader::new(file));

        let mut buf = Vec::new();
        let mut strings = Vec::new();
        let mut current_string = String::new();
        let mut in_si = false;
        let mut in_t = false;
        let mut in_phonetic = false;

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => match e.local_name().as_ref() {
                    b"si" => {
                        in_si = true;
                        current_string.clear();
                    }
                    b"rPh" => in_phonetic = true,
                    b"t" if in_si && !in_phonetic => in_t = true,
                    _ => {}
                },
                Ok(Event::Empty(e)) if e.local_name().as_ref() == b"si" => {
                    strings.push(String::new());
                }
                Ok(Event::End(e)) => match e.local_name().as_ref() {
                    b"si" => {
                        strings.push(decode_excel_escapes(&current_string));
                        in_si = false;
                    }
                    b"rPh" => in_phonetic = false,
                    b"t" => in_t = false,
                    _ => {}
                },
                Ok(Event::Text(e)) if in_t => {
                    current_string.push_str(&e.unescape()?);
                }
                Ok(Event::CData(e)) if in_t => {
                    current_string
                        .push_str(std::str::from_utf8(&e).map_err(quick_xml::Error::from)?);
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(SharedStrings::from_vec(strings))
    }

    /// Read workbook.xml to get sheet names, ids and rIds
    fn read_workbook_xml<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<Vec<(String, u32, String)>> {
        let file = archive
            .by_name("xl/workbook.xml")
            .map_err(|_| XlsxError::corrupt("Missing xl/workbook.xml"))?;

        let mut xml_reader = Reader::from_reader(BufReader::new(file));

        let mut buf = Vec::new();
        let mut sheets = Vec::new();

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Empty(e)) | Ok(Event::Start(e))
                    if e.local_name().as_ref() == b"sheet" =>
                {
                    let mut name = None;
                    let mut sheet_id = None;
                    let mut r_id = None;

                    for attr in e.attributes().flatten() {
                        let value = attr.unescape_value()?.to_string();
                        match attr.key.local_name().as_ref() {
                            b"name" => name = Some(value),
                            b"sheetId" => sheet_id = value.parse::<u32>().ok(),
                            b"id" => r_id = Some(value),
                            _ => {}
                        }
                    }

                    match (name, sheet_id, r_id) {
                        (Some(name), Some(sheet_id), Some(r_id)) => {
                            sheets.push((name, sheet_id, r_id))
                        }
                        _ => {
                            return Err(XlsxError::corrupt(
                                "sheet entry without name, sheetId or r:id",
                            ))
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(sheets)
    }

    /// Read workbook.xml.rels to get part paths
    fn read_workbook_rels<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<HashMap<String, Relationship>> {
        let file = archive
            .by_name("xl/_rels/workbook.xml.rels")
            .map_err(|_| XlsxError::corrupt("Missing xl/_rels/workbook.xml.rels"))?;

        let mut xml_reader = Reader::from_reader(BufReader::new(file));

        let mut buf = Vec::new();
        let mut rels = HashMap::new();

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Empty(e)) | Ok(Event::Start(e))
                    if e.local_name().as_ref() == b"Relationship" =>
                {
                    let mut id = None;
                    let mut target = None;
                    let mut rel_type = None;

                    for attr in e.attributes().flatten() {
                        let value = attr.unescape_value()?.to_string();
                        match attr.key.as_ref() {
                            b"Id" => id = Some(value),
                            b"Target" => target = Some(value),
                            b"Type" => rel_type = Some(value),
                            _ => {}
                        }
                    }

                    if let (Some(id), Some(target), Some(rel_type)) = (id, target, rel_type) {
                        // Target is relative to xl/ folder
                        let path = match target.strip_prefix('/') {
                            Some(absolute) => absolute.to_string(),
                            None => format!("xl/{}", target),
                        };
                        rels.insert(id, Relationship { rel_type, path });
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

    /// Read a worksheet part, keeping cells in document order
    fn read_worksheet<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
        path: &str,
        sheet_id: u32,
    ) -> XlsxResult<SheetPart> {
        let file = archive
            .by_name(path)
            .map_err(|_| XlsxError::corrupt(format!("Missing worksheet part {}", path)))?;

        let mut xml_reader = Reader::from_reader(BufReader::new(file));

        let mut buf = Vec::new();
        let mut part = SheetPart::new(sheet_id);

        let mut current: Option<PendingCell> = None;
        let mut in_value = false;
        let mut in_inline_str = false;
        let mut in_inline_text = false;
        let mut in_phonetic = false;

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => match e.local_name().as_ref() {
                    b"c" => current = Some(Self::start_cell(&e, path)?),
                    b"v" if current.is_some() => in_value = true,
                    b"is" if current.is_some() => in_inline_str = true,
                    b"rPh" if in_inline_str => in_phonetic = true,
                    b"t" if in_inline_str && !in_phonetic => in_inline_text = true,
                    _ => {}
                },
                Ok(Event::Empty(e)) if e.local_name().as_ref() == b"c" => {
                    part.cells.push(Self::start_cell(&e, path)?.finish());
                }
                Ok(Event::Text(e)) if in_value || in_inline_text => {
                    if let Some(cell) = current.as_mut() {
                        cell.value.push_str(&e.unescape()?);
                    }
                }
                Ok(Event::CData(e)) if in_value || in_inline_text => {
                    if let Some(cell) = current.as_mut() {
                        cell.value
                            .push_str(std::str::from_utf8(&e).map_err(quick_xml::Error::from)?);
                    }
                }
                Ok(Event::End(e)) => match e.local_name().as_ref() {
                    b"c" => {
                        if let Some(cell) = current.take() {
                            part.cells.push(cell.finish());
                        }
                        in_value = false;
                        in_inline_str = false;
                        in_inline_text = false;
                        in_phonetic = false;
                    }
                    b"v" => in_value = false,
                    b"is" => in_inline_str = false,
                    b"rPh" => in_phonetic = false,
                    b"t" => in_inline_text = false,
                    _ => {}
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(part)
    }

    fn start_cell(e: &BytesStart<'_>, path: &str) -> XlsxResult<PendingCell> {
        let mut reference = None;
        let mut type_attr = None;

        for attr in e.attributes().flatten() {
            match attr.key.as_ref() {
                b"r" => reference = Some(attr.unescape_value()?.to_string()),
                b"t" => type_attr = Some(attr.unescape_value()?.to_string()),
                _ => {}
            }
        }

        let reference = reference
            .ok_or_else(|| XlsxError::corrupt(format!("cell without reference in {}", path)))?;

        Ok(PendingCell {
            reference,
            type_attr,
            value: String::new(),
        })
    }
}
