//! XLSX writer

use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use std::path::Path;

use crate::error::{XlsxError, XlsxResult};
use sheetcopy_core::{CellKind, SharedStrings, Sheet, Workbook};

/// XLSX file writer
pub struct XlsxWriter;

impl XlsxWriter {
    /// Write a workbook to a file path
    ///
    /// Fails with [`XlsxError::PathUnwritable`] when the file cannot be created.
    pub fn write_file<P: AsRef<Path>>(
        workbook: &Workbook,
        shared_strings: Option<&SharedStrings>,
        path: P,
    ) -> XlsxResult<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| XlsxError::PathUnwritable {
            path: path.to_path_buf(),
            source,
        })?;
        let mut writer = BufWriter::new(file);
        Self::write(workbook, shared_strings, &mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Write a workbook to a writer
    pub fn write<W: Write + Seek>(
        workbook: &Workbook,
        shared_strings: Option<&SharedStrings>,
        writer: W,
    ) -> XlsxResult<()> {
        let mut zip = zip::ZipWriter::new(writer);

        // Write [Content_Types].xml
        Self::write_content_types(&mut zip, workbook, shared_strings.is_some())?;

        // Write _rels/.rels
        Self::write_root_rels(&mut zip)?;

        // Write xl/workbook.xml
        Self::write_workbook_xml(&mut zip, workbook)?;

        // Write xl/_rels/workbook.xml.rels
        Self::write_workbook_rels(&mut zip, workbook, shared_strings.is_some())?;

        // Write worksheets
        for sheet in workbook.sheets() {
            Self::write_worksheet(&mut zip, sheet)?;
        }

        if let Some(table) = shared_strings {
            Self::write_shared_strings(&mut zip, table)?;
        }

        zip.finish()?;
        Ok(())
    }

    fn worksheet_path(sheet: &Sheet) -> String {
        format!("xl/worksheets/sheet{}.xml", sheet.id())
    }

    fn write_content_types<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        workbook: &Workbook,
        has_shared_strings: bool,
    ) -> XlsxResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("[Content_Types].xml", options)?;

        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
    <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
    <Default Extension="xml" ContentType="application/xml"/>
    <Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>"#,
        );

        // Add an override for each worksheet
        for sheet in workbook.sheets() {
            content.push_str(&format!(
                r#"
    <Override PartName="/{}" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#,
                Self::worksheet_path(sheet)
            ));
        }

        if has_shared_strings {
            content.push_str(
                r#"
    <Override PartName="/xl/sharedStrings.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sharedStrings+xml"/>"#,
            );
        }

        content.push_str("\n</Types>");

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_root_rels<W: Write + Seek>(zip: &mut zip::ZipWriter<W>) -> XlsxResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("_rels/.rels", options)?;

        let content = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#;

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_workbook_xml<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        workbook: &Workbook,
    ) -> XlsxResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("xl/workbook.xml", options)?;

        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
    <sheets>"#,
        );

        for (i, sheet) in workbook.sheets().enumerate() {
            content.push_str(&format!(
                r#"
        <sheet name="{}" sheetId="{}" r:id="rId{}"/>"#,
                Self::escape_xml(sheet.name()),
                sheet.id(),
                i + 1
            ));
        }

        content.push_str(
            r#"
    </sheets>
</workbook>"#,
        );

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_workbook_rels<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        workbook: &Workbook,
        has_shared_strings: bool,
    ) -> XlsxResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("xl/_rels/workbook.xml.rels", options)?;

        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
        );

        for (i, sheet) in workbook.sheets().enumerate() {
            content.push_str(&format!(
                r#"
    <Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{}.xml"/>"#,
                i + 1,
                sheet.id()
            ));
        }

        if has_shared_strings {
            content.push_str(&format!(
                r#"
    <Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/sharedStrings" Target="sharedStrings.xml"/>"#,
                workbook.sheet_count() + 1
            ));
        }

        content.push_str(
            r#"
</Relationships>"#,
        );

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_worksheet<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        sheet: &Sheet,
    ) -> XlsxResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file(Self::worksheet_path(sheet), options)?;

        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
    <sheetData>"#,
        );

        // Rows and cells in store order
        for row in sheet.rows() {
            content.push_str(&format!("\n        <row r=\"{}\">", row.index()));

            for cell in row.cells() {
                let cell_ref = cell.address().to_a1_string();
                let value = match cell.kind() {
                    CellKind::Text => Self::escape_xml(&Self::escape_excel(cell.raw_value())),
                    _ => Self::escape_xml(cell.raw_value()),
                };

                match cell.kind() {
                    CellKind::Text => {
                        content.push_str(&format!(
                            "\n            <c r=\"{}\" t=\"inlineStr\"><is><t xml:space=\"preserve\">{}</t></is></c>",
                            cell_ref, value
                        ));
                    }
                    CellKind::SharedText => {
                        content.push_str(&format!(
                            "\n            <c r=\"{}\" t=\"s\"><v>{}</v></c>",
                            cell_ref, value
                        ));
                    }
                    CellKind::Boolean => {
                        content.push_str(&format!(
                            "\n            <c r=\"{}\" t=\"b\"><v>{}</v></c>",
                            cell_ref, value
                        ));
                    }
                    CellKind::Number => {
                        content.push_str(&format!(
                            "\n            <c r=\"{}\"><v>{}</v></c>",
                            cell_ref, value
                        ));
                    }
                }
            }

            content.push_str("\n        </row>");
        }

        content.push_str("\n    </sheetData>\n</worksheet>");

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_shared_strings<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        table: &SharedStrings,
    ) -> XlsxResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("xl/sharedStrings.xml", options)?;

        let mut content = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="{0}" uniqueCount="{0}">"#,
            table.len()
        );

        for s in table.iter() {
            content.push_str(&format!(
                "\n    <si><t xml:space=\"preserve\">{}</t></si>",
                Self::escape_xml(&Self::escape_excel(s))
            ));
        }

        content.push_str("\n</sst>");

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    /// Protect literal `_xHHHH_`-looking text from being decoded on read
    fn escape_excel(s: &str) -> String {
        s.replace("_x", "_x005F_x")
    }

    fn escape_xml(s: &str) -> String {
        s.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&apos;")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::XlsxReader;
    use pretty_assertions::assert_eq;
    use sheetcopy_core::CellAddress;
    use std::io::Cursor;

    fn addr(s: &str) -> CellAddress {
        CellAddress::parse(s).unwrap()
    }

    #[test]
    fn test_roundtrip_kinds_and_order() {
        let mut wb = Workbook::new();
        let mut table = SharedStrings::new();
        let hello = table.intern("hello & <bye>");

        let sheet = wb.sheet_by_name_mut("Sheet1").unwrap();
        sheet.upsert(&addr("C2"), "Special: <>&\"'", CellKind::Text);
        sheet.upsert(&addr("A2"), "1", CellKind::Boolean);
        sheet.upsert(&addr("B1"), "3.5", CellKind::Number);
        sheet.upsert(&addr("A1"), &hello.to_string(), CellKind::SharedText);
        wb.add_sheet().unwrap();

        let mut buf = Vec::new();
        XlsxWriter::write(&wb, Some(&table), Cursor::new(&mut buf)).unwrap();
        let package = XlsxReader::read(Cursor::new(&buf)).unwrap();

        assert_eq!(package.workbook, wb);
        assert_eq!(package.shared_strings.as_ref(), Some(&table));

        let part = package.sheet_part(1).unwrap();
        assert_eq!(part.references().collect::<Vec<_>>(), ["A1", "B1", "A2", "C2"]);
        assert_eq!(part.find("C2").unwrap().raw_value, "Special: <>&\"'");
        assert!(package.sheet_part(2).unwrap().is_empty());
    }

    #[test]
    fn test_roundtrip_escape_lookalikes() {
        let mut wb = Workbook::new();
        let mut table = SharedStrings::new();
        let index = table.intern("line_x000a_break");

        let sheet = wb.sheet_by_name_mut("Sheet1").unwrap();
        sheet.upsert(&addr("A1"), "a_x000a_b", CellKind::Text);
        sheet.upsert(&addr("B1"), "end_x", CellKind::Text);
        sheet.upsert(&addr("C1"), &index.to_string(), CellKind::SharedText);

        let mut buf = Vec::new();
        XlsxWriter::write(&wb, Some(&table), Cursor::new(&mut buf)).unwrap();
        let package = XlsxReader::read(Cursor::new(&buf)).unwrap();

        let part = package.sheet_part(1).unwrap();
        assert_eq!(part.find("A1").unwrap().raw_value, "a_x000a_b");
        assert_eq!(part.find("B1").unwrap().raw_value, "end_x");
        assert_eq!(
            package.shared_strings.unwrap().get(index as usize),
            Some("line_x000a_break")
        );
    }

    #[test]
    fn test_no_shared_strings_part_without_table() {
        let wb = Workbook::new();
        let mut buf = Vec::new();
        XlsxWriter::write(&wb, None, Cursor::new(&mut buf)).unwrap();

        let package = XlsxReader::read(Cursor::new(&buf)).unwrap();
        assert!(package.shared_strings.is_none());
    }

    #[test]
    fn test_escaped_sheet_name() {
        let mut wb = Workbook::empty();
        wb.push_sheet(1, "R&D").unwrap();

        let mut buf = Vec::new();
        XlsxWriter::write(&wb, None, Cursor::new(&mut buf)).unwrap();

        let package = XlsxReader::read(Cursor::new(&buf)).unwrap();
        assert_eq!(package.workbook.sheet_list(), vec![(1, "R&D".to_string())]);
    }
}
