//! Built-in picklist catalogs used when a dataset does not carry its own.

use crate::model::{FilterField, PicklistValue};

const TYPES: &[&str] = &[
    "40 C.F.R. 1.25(e)",
    "Administrative Order",
    "ADR",
    "CAFO (using 22.13(b) to simultaneously commence and conclude)",
    "CERCLA 106(b)",
    "CERCLA 107(r) Agreement",
    "CERCLA 122(h) Cost Recovery Settlement",
    "CERCLA Lien – 107(l)",
    "CERCLA Prospective Purchaser Agreement",
    "Complaint",
    "EAJA",
    "EEO",
    "Enforcement Appeals",
    "Federal Facility Compliance Agreement",
    "Field Citation (RCRA – RUST/LUST)",
    "Improper Practice",
    "Judicial Stipulated Penalty",
    "Notice of Determination (NOD)",
    "Notice of Noncompliance (NON)",
    "Notice of Refusal of Admission (FIFRA)",
    "Notice of Violation (NOV)",
    "Other (Type)",
    "Permit Appeals",
    "Quick Resolution",
    "Specially delegated by Administrator",
    "Stop Sale, Use or Removal Order (SSURO) - FIFRA",
    "Sua Sponte",
];

const SUBTYPES: &[&str] = &[
    "CAFO",
    "CAFO w/Compliance Order",
    "CAFO w/SEP",
    "CAFO w/Injunctive Relief",
    "no penalty",
    "ESA",
    "ESA w/ Compliance",
    "On Consent (AOC) Plan",
    "Unilateral (UAO)",
    "Emergency",
    "Penalty only (w/proposed amount)",
    "Penalty only (notice pleading)",
    "Penalty (proposed amount) w/ Compliance Order",
    "Penalty (notice pleading) w/ Compliance Order",
    "CAA (not 112(r))",
    "CAA 112(r)",
    "CWA",
    "CERCLA",
    "RCRA",
    "SDWA",
    "TSCA 207",
];

const STATUTES: &[&str] = &[
    "Clean Air Act",
    "Clean Water Act",
    "Comprehensive Environmental Response Compensation and Liability Act",
    "Emergency Planning and Community Right-to-Know Act",
    "Equal Access to Justice",
    "Equal Employment Opportunity",
    "Federal Insecticide Act",
];

/// Built-in catalog for `field`, if there is one. Stage values only come
/// from the dataset.
pub fn builtin_catalog(field: FilterField) -> Option<Vec<PicklistValue>> {
    let values = match field {
        FilterField::Type => TYPES,
        FilterField::Subtype => SUBTYPES,
        FilterField::Statute => STATUTES,
        FilterField::Stage => return None,
    };
    Some(values.iter().map(|v| PicklistValue::new(*v, *v)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_has_no_builtin_catalog() {
        assert!(builtin_catalog(FilterField::Stage).is_none());
    }

    #[test]
    fn test_builtin_values_are_unique() {
        for field in [FilterField::Type, FilterField::Subtype, FilterField::Statute] {
            let values = builtin_catalog(field).unwrap();
            let unique: std::collections::BTreeSet<_> = values.iter().map(|v| v.value.as_str()).collect();
            assert_eq!(unique.len(), values.len(), "duplicate values in {field}");
        }
    }
}
