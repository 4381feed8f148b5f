//! Workbook export via [`rust_xlsxwriter`].
//!
//! One sheet: a bold header row with the export columns, then one row per
//! lead. Empty values are left as blank cells.

use std::io::{Seek, Write};

use crash_leads_lead_models::{COLUMNS, LeadRow};
use rust_xlsxwriter::{Format, Workbook};

use crate::ExportError;

/// Writes `rows` as a workbook with one sheet named `sheet_name`.
///
/// Returns `writer` once the workbook bytes are written.
///
/// # Errors
///
/// Returns [`ExportError::Xlsx`] if the sheet name is rejected or the
/// workbook cannot be assembled, or [`ExportError::Io`] if writing fails.
pub fn write_workbook<W: Write + Seek>(
    mut writer: W,
    sheet_name: &str,
    rows: &[LeadRow],
) -> Result<W, ExportError> {
    let mut workbook = build_workbook(sheet_name, rows)?;
    writer.write_all(&workbook.save_to_buffer()?)?;

    log::debug!("Wrote workbook sheet '{sheet_name}' with {} row(s)", rows.len());
    Ok(writer)
}

fn build_workbook(sheet_name: &str, rows: &[LeadRow]) -> Result<Workbook, ExportError> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();

    let sheet = workbook.add_worksheet();
    sheet.set_name(sheet_name)?;

    for (col, title) in (0u16..).zip(COLUMNS) {
        sheet.write_string_with_format(0, col, title, &header)?;
    }

    for (row_num, row) in (1u32..).zip(rows) {
        for (col, value) in (0u16..).zip(row.cells()) {
            if !value.is_empty() {
                sheet.write_string(row_num, col, value)?;
            }
        }
    }

    Ok(workbook)
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Read as _};

    use crash_leads_lead_models::{Flag, NO_OCCUPANTS_PLACEHOLDER, NotAtFault};

    use super::*;

    fn rows() -> Vec<LeadRow> {
        vec![
            LeadRow {
                case_number: "ABC123".to_string(),
                police_dept: "SMITH & SONS TWP".to_string(),
                crash_date: "01/02/23".to_string(),
                name: "JOHN <SMITH>".to_string(),
                not_at_fault: NotAtFault::Yes,
                commercial_vehicle: Flag::No,
                fatal: Flag::No,
            },
            LeadRow {
                case_number: String::new(),
                police_dept: String::new(),
                crash_date: String::new(),
                name: NO_OCCUPANTS_PLACEHOLDER.to_string(),
                not_at_fault: NotAtFault::Unknown,
                commercial_vehicle: Flag::Yes,
                fatal: Flag::No,
            },
        ]
    }

    fn workbook_bytes(rows: &[LeadRow]) -> Vec<u8> {
        write_workbook(Cursor::new(Vec::new()), "Leads", rows)
            .unwrap()
            .into_inner()
    }

    fn read_part(bytes: &[u8], name: &str) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut file = archive.by_name(name).unwrap();
        let mut contents = String::new();
        file.read_to_string(&mut contents).unwrap();
        contents
    }

    #[test]
    fn writes_workbook_package_parts() {
        let bytes = workbook_bytes(&rows());
        let archive = zip::ZipArchive::new(Cursor::new(bytes.as_slice())).unwrap();
        let names: Vec<&str> = archive.file_names().collect();
        for part in [
            "[Content_Types].xml",
            "_rels/.rels",
            "xl/workbook.xml",
            "xl/_rels/workbook.xml.rels",
            "xl/styles.xml",
            "xl/worksheets/sheet1.xml",
        ] {
            assert!(names.contains(&part), "missing {part}");
        }
    }

    #[test]
    fn sheet_is_named_and_header_comes_first() {
        let bytes = workbook_bytes(&rows());

        let workbook = read_part(&bytes, "xl/workbook.xml");
        assert!(workbook.contains(r#"<sheet name="Leads""#));

        let strings = read_part(&bytes, "xl/sharedStrings.xml");
        let header = strings.find("Case Number").unwrap();
        let last_header = strings.find("FatalFlag").unwrap();
        let first_value = strings.find("ABC123").unwrap();
        assert!(header < last_header && last_header < first_value);
        assert!(strings.contains("SMITH &amp; SONS TWP"));
        assert!(strings.contains("JOHN &lt;SMITH&gt;"));

        let sheet = read_part(&bytes, "xl/worksheets/sheet1.xml");
        assert!(sheet.contains(r#"<c r="A1""#));
        assert!(sheet.contains(r#"<c r="G1""#));
        assert!(sheet.contains(r#"<row r="3""#));
        // The empty not-at-fault label of the placeholder row is left blank.
        assert!(sheet.contains(r#"<c r="D3""#));
        assert!(!sheet.contains(r#"<c r="E3""#));
    }

    #[test]
    fn header_only_workbook_for_no_rows() {
        let bytes = workbook_bytes(&[]);
        let sheet = read_part(&bytes, "xl/worksheets/sheet1.xml");
        assert!(sheet.contains(r#"<row r="1""#));
        assert!(!sheet.contains(r#"<row r="2""#));
    }

    #[test]
    fn rejects_invalid_sheet_names() {
        for name in ["", "a/b", "[x]", "this sheet name is far too long to use"] {
            let err = write_workbook(Cursor::new(Vec::new()), name, &[]).unwrap_err();
            assert!(matches!(err, ExportError::Xlsx(_)), "{name}");
        }
    }
}
