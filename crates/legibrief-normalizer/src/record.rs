//! Per-field normalization of a raw provider payload into a
//! [`BillRecord`].

use crate::{coerce, fields};
use legibrief_domain::{BillRecord, BillSection, SponsorList, YearIntroduced};
use serde_json::{Map, Value};
use tracing::debug;

/// Normalize a raw decoded payload into the canonical record.
///
/// Total and deterministic: any JSON value produces a full record, with
/// placeholder text standing in for unresolvable fields. A payload that
/// is not even an object normalizes as if every field were absent.
pub fn normalize(raw: Value) -> BillRecord {
    let bag = match raw {
        Value::Object(map) => map,
        other => {
            debug!(kind = %json_kind(&other), "payload is not an object, normalizing empty");
            Map::new()
        }
    };

    let summary = apply_summary_floor(resolve_summary_text(&bag));
    let sections = normalize_sections(resolve_sections(&bag));

    BillRecord {
        bill_number: identity_string(&bag, fields::BILL_NUMBER_KEYS),
        bill_name: identity_string(&bag, fields::BILL_NAME_KEYS),
        state: identity_string(&bag, fields::STATE_KEYS),
        year_introduced: resolve_year(&bag),
        sponsors: sponsor_list(&bag, fields::SPONSORS_KEYS),
        cosponsors: sponsor_list(&bag, fields::COSPONSORS_KEYS),
        committee: identity_string(&bag, fields::COMMITTEE_KEYS),
        summary,
        financial_implications: narrative(&bag, "financialImplications"),
        ideological_leaning: narrative(&bag, "ideologicalLeaning"),
        advocacy_group_positions: narrative(&bag, "advocacyGroupPositions"),
        changes_to: narrative(&bag, "changesTo"),
        similar_laws: narrative(&bag, "similarLaws"),
        other_factors: narrative(&bag, "otherFactors"),
        sections,
        citations: coerce::string_array(coerce::resolve(&bag, fields::CITATIONS_KEYS)),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Identity and attribution fields must come out as scalars; objects and
/// arrays degrade to the default rather than leaking structure.
fn identity_string(bag: &Map<String, Value>, keys: &[&str]) -> String {
    match coerce::resolve(bag, keys) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => fields::NOT_SPECIFIED.to_string(),
    }
}

fn resolve_year(bag: &Map<String, Value>) -> YearIntroduced {
    match coerce::resolve(bag, fields::YEAR_INTRODUCED_KEYS) {
        Some(Value::Number(n)) => n
            .as_i64()
            .map(YearIntroduced::Number)
            .unwrap_or_else(|| YearIntroduced::Text(n.to_string())),
        Some(Value::String(s)) => YearIntroduced::Text(s.clone()),
        _ => YearIntroduced::Text(fields::NOT_SPECIFIED.to_string()),
    }
}

fn sponsor_list(bag: &Map<String, Value>, keys: &[&str]) -> SponsorList {
    match coerce::resolve(bag, keys) {
        Some(Value::String(s)) => SponsorList::One(s.clone()),
        Some(Value::Array(items)) => {
            SponsorList::Many(items.iter().map(coerce::scalar_text).collect())
        }
        _ => SponsorList::One(fields::NOT_SPECIFIED.to_string()),
    }
}

fn narrative(bag: &Map<String, Value>, field: &'static str) -> String {
    let variants = coerce::key_variants(field);
    coerce::flat_string(coerce::resolve(bag, &variants), field)
}

/// The summary may be a flat string or nested one level under
/// `summary`/`Summary` with an inner `description` or `Purpose` key.
/// Returns an empty string when nothing usable is present; the floor is
/// applied by the caller.
fn resolve_summary_text(bag: &Map<String, Value>) -> String {
    match coerce::resolve(bag, fields::SUMMARY_KEYS) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Object(inner)) => fields::SUMMARY_INNER_KEYS
            .iter()
            .filter_map(|key| inner.get(*key))
            .find_map(|value| value.as_str())
            .map(str::to_string)
            .unwrap_or_default(),
        _ => String::new(),
    }
}

/// Heuristic informativeness floor, not a validation failure: short
/// summaries gain an advisory note, empty ones are replaced outright.
fn apply_summary_floor(text: String) -> String {
    if text.is_empty() {
        fields::SUMMARY_MISSING.to_string()
    } else if text.len() < fields::SUMMARY_FLOOR_CHARS {
        let mut noted = text;
        noted.push_str(fields::SUMMARY_MINIMAL_SUFFIX);
        noted
    } else {
        text
    }
}

/// Sections may live at the top level or one level under the summary
/// object, depending on how literally the provider took the schema.
fn resolve_sections(bag: &Map<String, Value>) -> Option<&Value> {
    if let Some(value) = coerce::resolve(bag, fields::SECTIONS_KEYS) {
        return Some(value);
    }
    match coerce::resolve(bag, fields::SUMMARY_KEYS) {
        Some(Value::Object(inner)) => coerce::resolve(inner, fields::SECTIONS_KEYS),
        _ => None,
    }
}

fn normalize_sections(value: Option<&Value>) -> Vec<BillSection> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(index, element)| section_from_element(index, element))
            .collect(),
        Some(Value::Object(map)) => map
            .iter()
            .map(|(key, value)| BillSection {
                title: key.clone(),
                description: section_body(value),
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn section_from_element(index: usize, element: &Value) -> BillSection {
    match element {
        Value::Object(obj) => {
            let title = fields::SECTION_TITLE_KEYS
                .iter()
                .filter_map(|key| obj.get(*key))
                .find(|value| !value.is_null())
                .map(coerce::scalar_text)
                .unwrap_or_else(|| format!("Section {}", index + 1));
            let description = fields::SECTION_BODY_KEYS
                .iter()
                .filter_map(|key| obj.get(*key))
                .find(|value| !value.is_null())
                .map(coerce::scalar_text)
                .unwrap_or_else(|| element.to_string());
            BillSection { title, description }
        }
        other => BillSection {
            title: format!("Section {}", index + 1),
            description: coerce::scalar_text(other),
        },
    }
}

fn section_body(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Object(obj) => fields::SECTION_BODY_KEYS
            .iter()
            .filter_map(|key| obj.get(*key))
            .find_map(|inner| inner.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| value.to_string()),
        other => other.to_string(),
    }
}
