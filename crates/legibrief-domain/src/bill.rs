//! Bill record module - the canonical output of every analysis workflow

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sponsors or cosponsors as reported by the generation provider.
///
/// Providers return either a single comma-separated string or an array
/// of names. Both are acceptable on the wire; an arbitrary object is
/// not, and the normalizer replaces one with its textual default before
/// a `SponsorList` is ever constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SponsorList {
    /// A single name, or a pre-joined list of names
    One(String),
    /// An ordered list of names
    Many(Vec<String>),
}

impl fmt::Display for SponsorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SponsorList::One(s) => f.write_str(s),
            SponsorList::Many(names) => f.write_str(&names.join(", ")),
        }
    }
}

/// The year a bill was introduced.
///
/// Deliberately loosely typed: legislative sources disagree on whether a
/// year is a number or a string, and the record preserves whichever
/// representation arrived rather than guessing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum YearIntroduced {
    /// Numeric year, e.g. `2023`
    Number(i64),
    /// Textual year, e.g. `"2023"` or `"2023-2024 session"`
    Text(String),
}

impl fmt::Display for YearIntroduced {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            YearIntroduced::Number(n) => write!(f, "{}", n),
            YearIntroduced::Text(s) => f.write_str(s),
        }
    }
}

/// One section of a bill: a number or title, and what it does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillSection {
    /// Section number or heading, e.g. `"Sec. 3"` or `"Definitions"`
    pub title: String,
    /// Prose description of the section's effect
    pub description: String,
}

/// The canonical analysis of one legislative bill.
///
/// Every field is rendering-safe after normalization: narrative fields
/// are always present strings (placeholder text when the provider
/// omitted or mangled them), and `sections`/`citations` are always
/// arrays. A client never observes a partially populated record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillRecord {
    /// Exact bill number as it appears in the source, e.g. `"HB 1234"`
    pub bill_number: String,
    /// Full title of the bill
    pub bill_name: String,
    /// State or federal jurisdiction the bill was proposed in
    pub state: String,
    /// Year the bill was introduced
    pub year_introduced: YearIntroduced,
    /// Primary sponsors
    pub sponsors: SponsorList,
    /// Cosponsors
    pub cosponsors: SponsorList,
    /// Committee the bill was referred to
    pub committee: String,
    /// Purpose and main provisions, requested at 300+ words
    pub summary: String,
    /// Cost of implementation, appropriations, funding mechanisms
    pub financial_implications: String,
    /// Conservative / progressive / moderate alignment analysis
    pub ideological_leaning: String,
    /// Positions taken by advocacy groups, for and against
    pub advocacy_group_positions: String,
    /// How the bill modifies, replaces, or adds to existing law
    pub changes_to: String,
    /// Comparable legislation in other states
    pub similar_laws: String,
    /// Implementation challenges, legal concerns, other considerations
    pub other_factors: String,
    /// Per-section breakdown; empty when the source provided none
    pub sections: Vec<BillSection>,
    /// Sources cited by the research stage; empty when none were given
    pub citations: Vec<String>,
}
