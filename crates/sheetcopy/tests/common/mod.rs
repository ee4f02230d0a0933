//! Fixture packages for integration tests.
//!
//! The writer only produces well-ordered documents, so fixtures that need
//! unusual content (no sheets, unsorted cells, dangling shared-text indices)
//! are assembled here part by part.

#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use sheetcopy::{CellAddress, CellKind, XlsxDocument};

/// One sheet of a fixture: name, sheetId and the `<sheetData>` body
pub struct FixtureSheet<'a> {
    pub name: &'a str,
    pub id: u32,
    pub cells: &'a str,
}

/// Write a package with the given sheets and optional shared strings
pub fn write_package(path: &Path, sheets: &[FixtureSheet<'_>], shared: Option<&[&str]>) {
    let file = File::create(path).unwrap();
    let mut zip = zip::ZipWriter::new(file);
    let options = zip::write::SimpleFileOptions::default();

    zip.start_file("[Content_Types].xml", options).unwrap();
    zip.write_all(
        br#"<?xml version="1.0" encoding="UTF-8"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
    <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
    <Default Extension="xml" ContentType="application/xml"/>
</Types>"#,
    )
    .unwrap();

    let mut workbook = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets>"#,
    );
    let mut rels = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    );
    for (i, sheet) in sheets.iter().enumerate() {
        workbook.push_str(&format!(
            r#"<sheet name="{}" sheetId="{}" r:id="rId{}"/>"#,
            sheet.name,
            sheet.id,
            i + 1
        ));
        rels.push_str(&format!(
            r#"<Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{}.xml"/>"#,
            i + 1,
            i + 1
        ));
    }
    if shared.is_some() {
        rels.push_str(
            r#"<Relationship Id="rIdSst" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/sharedStrings" Target="sharedStrings.xml"/>"#,
        );
    }
    workbook.push_str("</sheets></workbook>");
    rels.push_str("</Relationships>");

    zip.start_file("xl/workbook.xml", options).unwrap();
    zip.write_all(workbook.as_bytes()).unwrap();
    zip.start_file("xl/_rels/workbook.xml.rels", options).unwrap();
    zip.write_all(rels.as_bytes()).unwrap();

    for (i, sheet) in sheets.iter().enumerate() {
        zip.start_file(format!("xl/worksheets/sheet{}.xml", i + 1), options)
            .unwrap();
        zip.write_all(
            format!(
                r#"<?xml version="1.0" encoding="UTF-8"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>{}</sheetData></worksheet>"#,
                sheet.cells
            )
            .as_bytes(),
        )
        .unwrap();
    }

    if let Some(strings) = shared {
        let mut sst = String::from(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
        );
        for s in strings {
            sst.push_str(&format!("<si><t>{}</t></si>", s));
        }
        sst.push_str("</sst>");
        zip.start_file("xl/sharedStrings.xml", options).unwrap();
        zip.write_all(sst.as_bytes()).unwrap();
    }

    zip.finish().unwrap();
}

/// Build the two-sheet source document through the library itself:
/// `Sheet1` A1="x", B1=shared "hello"; `Sheet2` A1=boolean "0"
pub fn write_hello_source(path: &Path) {
    let mut doc = XlsxDocument::create(path).unwrap();
    let hello = doc.intern("hello");

    let sheet1 = doc.workbook_mut().sheet_by_name_mut("Sheet1").unwrap();
    sheet1.upsert(&addr("A1"), "x", CellKind::Text);
    sheet1.upsert(&addr("B1"), &hello.to_string(), CellKind::SharedText);

    let sheet2 = doc.workbook_mut().add_sheet().unwrap();
    sheet2.upsert(&addr("A1"), "0", CellKind::Boolean);

    doc.save().unwrap();
}

pub fn addr(s: &str) -> CellAddress {
    CellAddress::parse(s).unwrap()
}

pub fn temp_path(dir: &tempfile::TempDir, name: &str) -> PathBuf {
    dir.path().join(name)
}
