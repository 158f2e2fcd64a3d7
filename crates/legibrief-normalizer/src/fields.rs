//! The candidate-key and placeholder table.
//!
//! Every spelling the normalizer will accept for a logical field, and
//! every fallback string it will emit, is declared here so the coercion
//! behavior is auditable in one place and testable without a provider.

/// Default for identity and attribution fields the provider omitted.
pub const NOT_SPECIFIED: &str = "Not specified";

/// Accepted spellings for the bill number.
pub const BILL_NUMBER_KEYS: &[&str] = &["billNumber", "bill_number", "BillNumber", "Bill Number"];

/// Accepted spellings for the bill name.
pub const BILL_NAME_KEYS: &[&str] = &["billName", "bill_name", "BillName", "Bill Name"];

/// Accepted spellings for the jurisdiction.
pub const STATE_KEYS: &[&str] = &["state", "State"];

/// Accepted spellings for the year of introduction.
pub const YEAR_INTRODUCED_KEYS: &[&str] = &[
    "yearIntroduced",
    "year_introduced",
    "YearIntroduced",
    "Year Introduced",
];

/// Accepted spellings for primary sponsors, including the free-form
/// variants providers have actually produced.
pub const SPONSORS_KEYS: &[&str] = &[
    "sponsors",
    "Sponsors",
    "bill_sponsors",
    "BillSponsor",
    "Bill Sponsor",
    "Bill Sponsor(s)",
];

/// Accepted spellings for cosponsors.
pub const COSPONSORS_KEYS: &[&str] = &[
    "cosponsors",
    "Cosponsors",
    "bill_cosponsors",
    "BillCosponsors",
    "Bill Cosponsors",
    "Bill Cosponsor(s)",
];

/// Accepted spellings for the committee of referral.
pub const COMMITTEE_KEYS: &[&str] = &[
    "committee",
    "Committee",
    "committee_referred_to",
    "CommitteeReferredTo",
    "Committee Referred To",
];

/// Accepted spellings for the summary field.
pub const SUMMARY_KEYS: &[&str] = &["summary", "Summary"];

/// Inner keys tried when the summary arrives as a nested object.
pub const SUMMARY_INNER_KEYS: &[&str] = &["description", "Purpose"];

/// Accepted spellings for the sections array.
pub const SECTIONS_KEYS: &[&str] = &["sections", "Sections"];

/// Inner keys tried for a section element's title slot.
pub const SECTION_TITLE_KEYS: &[&str] = &["title", "number"];

/// Inner keys tried for a section element's body slot.
pub const SECTION_BODY_KEYS: &[&str] = &["content", "description", "Description"];

/// Accepted spellings for the citations array.
pub const CITATIONS_KEYS: &[&str] = &["citations", "Citations"];

/// The six research narrative fields, by canonical camelCase name.
/// Casing variants are derived with [`crate::coerce::key_variants`].
pub const NARRATIVE_FIELDS: &[&str] = &[
    "financialImplications",
    "ideologicalLeaning",
    "advocacyGroupPositions",
    "changesTo",
    "similarLaws",
    "otherFactors",
];

/// Minimum summary length (in characters) considered informative.
pub const SUMMARY_FLOOR_CHARS: usize = 200;

/// Advisory suffix appended to a non-empty summary below the floor.
pub const SUMMARY_MINIMAL_SUFFIX: &str = " (Note: This summary is minimal and should be expanded \
with a more comprehensive analysis of at least 200 words that fully explains the bill's purpose, \
provisions, and implications.)";

/// Replacement text for an absent or empty summary.
pub const SUMMARY_MISSING: &str = "No adequate summary available. A comprehensive summary of at \
least 200 words should be provided that fully explains the bill's purpose, provisions, and \
implications.";

/// Placeholder for a field the provider omitted entirely.
pub fn missing_placeholder(field: &str) -> String {
    format!(
        "Information about {} is not available at this time.",
        crate::coerce::humanize(field)
    )
}

/// Placeholder for a field the provider sent as a nested object.
///
/// Distinct wording from [`missing_placeholder`] so logs and tests can
/// tell "missing" from "malformed" apart.
pub fn malformed_placeholder(field: &str) -> String {
    format!(
        "Information about {} is not properly formatted. Please review the bill text for details.",
        crate::coerce::humanize(field)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholders_are_distinct() {
        let field = "financialImplications";
        assert_ne!(missing_placeholder(field), malformed_placeholder(field));
    }

    #[test]
    fn test_placeholders_humanize_the_field_name() {
        assert_eq!(
            missing_placeholder("changesTo"),
            "Information about changes to is not available at this time."
        );
        assert_eq!(
            malformed_placeholder("similarLaws"),
            "Information about similar laws is not properly formatted. \
             Please review the bill text for details."
        );
    }

    #[test]
    fn test_narrative_fields_are_camel_case() {
        for field in NARRATIVE_FIELDS {
            assert!(!field.contains('_'), "{field} should be camelCase");
            assert!(
                field.chars().next().unwrap().is_lowercase(),
                "{field} should start lowercase"
            );
        }
    }
}
