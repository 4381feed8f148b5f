//! Row assembly: one lead row per occupant, or a single placeholder row.

use crash_leads_lead_models::{Flag, LeadRow, NO_OCCUPANTS_PLACEHOLDER, NotAtFault};

use crate::ParsedReport;
use crate::profile::NotAtFaultRules;

/// Builds the lead rows of one parsed report.
///
/// Every row carries the document-level fields and flags. A report without
/// occupants yields exactly one row named [`NO_OCCUPANTS_PLACEHOLDER`] with
/// an empty not-at-fault label.
#[must_use]
pub fn assemble_rows(report: &ParsedReport, rules: NotAtFaultRules) -> Vec<LeadRow> {
    let row = |name: &str, not_at_fault: NotAtFault| LeadRow {
        case_number: report.fields.case_number.clone().unwrap_or_default(),
        police_dept: report.fields.police_dept.clone().unwrap_or_default(),
        crash_date: report.fields.crash_date.clone().unwrap_or_default(),
        name: name.to_string(),
        not_at_fault,
        commercial_vehicle: Flag::from(report.commercial),
        fatal: Flag::from(report.fatal),
    };

    if report.occupants.is_empty() {
        return vec![row(NO_OCCUPANTS_PLACEHOLDER, NotAtFault::Unknown)];
    }

    report
        .occupants
        .iter()
        .map(|name| {
            row(
                name,
                not_at_fault(name, report.charged_driver_hint.as_deref(), rules),
            )
        })
        .collect()
}

/// Labels an occupant "No" when the charged-driver hint is a
/// case-insensitive substring of their name, "Yes" otherwise.
///
/// Without a hint the label is "Yes", or empty when
/// [`NotAtFaultRules::unknown_without_charge_hint`] is set.
#[must_use]
pub fn not_at_fault(name: &str, hint: Option<&str>, rules: NotAtFaultRules) -> NotAtFault {
    match hint {
        Some(hint) if name.to_uppercase().contains(&hint.to_uppercase()) => NotAtFault::No,
        Some(_) => NotAtFault::Yes,
        None if rules.unknown_without_charge_hint => NotAtFault::Unknown,
        None => NotAtFault::Yes,
    }
}

#[cfg(test)]
mod tests {
    use crash_leads_lead_models::ExtractedFields;

    use super::*;

    fn report(occupants: &[&str], hint: Option<&str>) -> ParsedReport {
        ParsedReport {
            fields: ExtractedFields {
                case_number: Some("ABC123".to_string()),
                police_dept: None,
                crash_date: Some("01/02/23".to_string()),
            },
            occupants: occupants.iter().map(ToString::to_string).collect(),
            charged_driver_hint: hint.map(ToString::to_string),
            commercial: true,
            fatal: false,
        }
    }

    #[test]
    fn one_row_per_occupant() {
        let rows = assemble_rows(
            &report(&["JOHN SMITH", "JANE DOE"], None),
            NotAtFaultRules::default(),
        );
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "JOHN SMITH");
        assert_eq!(rows[1].name, "JANE DOE");
        for row in &rows {
            assert_eq!(row.case_number, "ABC123");
            assert_eq!(row.police_dept, "");
            assert_eq!(row.not_at_fault, NotAtFault::Yes);
            assert_eq!(row.commercial_vehicle, Flag::Yes);
            assert_eq!(row.fatal, Flag::No);
        }
    }

    #[test]
    fn placeholder_row_without_occupants() {
        let rows = assemble_rows(&report(&[], Some("JOHN SMITH")), NotAtFaultRules::default());
        assert_eq!(rows.len(), 1);
        assert!(rows[0].is_placeholder());
        assert_eq!(rows[0].not_at_fault, NotAtFault::Unknown);
        assert_eq!(rows[0].commercial_vehicle, Flag::Yes);
    }

    #[test]
    fn charged_driver_is_not_not_at_fault() {
        let rows = assemble_rows(
            &report(&["JOHN Q SMITH JR", "JANE DOE"], Some("john q smith")),
            NotAtFaultRules::default(),
        );
        assert_eq!(rows[0].not_at_fault, NotAtFault::No);
        assert_eq!(rows[1].not_at_fault, NotAtFault::Yes);
    }

    #[test]
    fn optional_unknown_default_without_hint() {
        let rules = NotAtFaultRules {
            unknown_without_charge_hint: true,
        };
        assert_eq!(not_at_fault("JOHN SMITH", None, rules), NotAtFault::Unknown);
        assert_eq!(
            not_at_fault("JOHN SMITH", Some("JANE DOE"), rules),
            NotAtFault::Yes
        );
        assert_eq!(
            not_at_fault("JOHN SMITH", None, NotAtFaultRules::default()),
            NotAtFault::Yes
        );
    }
}
