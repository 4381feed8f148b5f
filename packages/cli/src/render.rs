//! Plain-text rendering of batch results.

use crash_leads_ingest::DocumentReport;
use crash_leads_lead_models::{COLUMNS, LeadRow, LeadSummary};

/// Widest a table column is allowed to grow.
const MAX_COLUMN_WIDTH: usize = 40;

/// Prints one line per processed document.
pub fn print_documents(documents: &[DocumentReport]) {
    println!("{:<32} {:<8} {:>5} {:>9}  NOTES", "FILE", "METHOD", "PAGES", "OCCUPANTS");
    println!("{}", "-".repeat(72));
    for doc in documents {
        println!(
            "{:<32} {:<8} {:>5} {:>9}  {}",
            truncate(&doc.name, 32),
            doc.method.as_ref(),
            doc.pages,
            doc.occupants,
            notes(doc)
        );
    }
}

/// The notes column: the failure of an unreadable document, otherwise the
/// charged-driver hint.
fn notes(doc: &DocumentReport) -> String {
    match (&doc.error, &doc.charged_driver_hint) {
        (Some(error), _) => format!("error: {error}"),
        (None, Some(hint)) => format!("charged: {hint}"),
        (None, None) => String::new(),
    }
}

/// Prints the lead table with the export column headers.
pub fn print_rows(rows: &[LeadRow]) {
    let widths = column_widths(rows);

    print_line(&COLUMNS, &widths);
    println!(
        "{}",
        "-".repeat(widths.iter().sum::<usize>() + 2 * (widths.len() - 1))
    );
    for row in rows {
        print_line(&row.cells(), &widths);
    }
}

/// Prints the success line and the three summary metrics.
pub fn print_summary(summary: &LeadSummary) {
    println!(
        "Parsed {} file(s), {} row(s).",
        summary.documents, summary.rows
    );
    println!("Likely Not-At-Fault (rows): {}", summary.likely_not_at_fault);
    println!("Commercial flagged: {}", summary.commercial);
    println!("Fatal flagged: {}", summary.fatal);
}

fn print_line(cells: &[&str], widths: &[usize]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{:<width$}", truncate(cell, width)))
        .collect::<Vec<_>>()
        .join("  ");
    println!("{}", line.trim_end());
}

fn column_widths(rows: &[LeadRow]) -> Vec<usize> {
    COLUMNS
        .iter()
        .enumerate()
        .map(|(idx, header)| {
            rows.iter()
                .map(|row| row.cells()[idx].chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
                .min(MAX_COLUMN_WIDTH)
        })
        .collect()
}

/// Shortens `value` to at most `width` characters, marking the cut with `~`.
fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let mut out: String = value.chars().take(width.saturating_sub(1)).collect();
    out.push('~');
    out
}

#[cfg(test)]
mod tests {
    use crash_leads_lead_models::{Flag, NotAtFault};
    use crash_leads_pdf::ExtractionMethod;

    use super::*;

    #[test]
    fn widths_fit_headers_and_values() {
        let rows = vec![LeadRow {
            case_number: "ABC123".to_string(),
            police_dept: "A VERY LONG POLICE DEPARTMENT NAME THAT KEEPS GOING".to_string(),
            crash_date: "01/02/23".to_string(),
            name: "JOHN SMITH".to_string(),
            not_at_fault: NotAtFault::Yes,
            commercial_vehicle: Flag::No,
            fatal: Flag::No,
        }];

        let widths = column_widths(&rows);
        assert_eq!(widths[0], "Case Number".len());
        assert_eq!(widths[1], MAX_COLUMN_WIDTH);
        assert_eq!(widths[3], "JOHN SMITH".len());
        assert_eq!(widths[4], "NotAtFault (heuristic)".len());
    }

    fn report(error: Option<&str>, hint: Option<&str>) -> DocumentReport {
        DocumentReport {
            name: "a.pdf".to_string(),
            method: ExtractionMethod::None,
            pages: 0,
            text_chars: 0,
            occupants: 0,
            charged_driver_hint: hint.map(str::to_string),
            error: error.map(str::to_string),
        }
    }

    #[test]
    fn notes_distinguish_errors_from_charged_driver() {
        assert_eq!(
            notes(&report(Some("Failed to read a.pdf"), None)),
            "error: Failed to read a.pdf"
        );
        assert_eq!(notes(&report(None, Some("JOHN SMITH"))), "charged: JOHN SMITH");
        assert_eq!(
            notes(&report(Some("worker failed"), Some("JOHN SMITH"))),
            "error: worker failed"
        );
        assert_eq!(notes(&report(None, None)), "");
    }

    #[test]
    fn truncate_marks_cut() {
        assert_eq!(truncate("JOHN", 10), "JOHN");
        assert_eq!(truncate("JOHN SMITH", 5), "JOHN~");
    }
}
