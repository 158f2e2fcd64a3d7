//! Prompt engineering for the generation provider
//!
//! Each workflow stage has a fixed instruction block and a builder that
//! attaches the stage's inputs. Field names requested here must stay in
//! step with the candidate-key table in `legibrief-normalizer`; the
//! normalizer tolerates drift, but the prompts should not invite it.

use crate::types::SearchQuery;
use serde_json::Value;

/// Truncate to a character count without splitting a code point
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

/// Build the yes/no classification prompt from a bounded document prefix
pub fn classification_prompt(text: &str, prefix_chars: usize) -> String {
    format!(
        "You are a helpful assistant that can identify whether a document is a legislative \
         bill or law. Provide a clear yes or no answer.\n\n\
         Is the following document a legislative bill or law? Respond with only \"Yes\" or \
         \"No\".\n\n{}",
        truncate_chars(text, prefix_chars)
    )
}

const EXTRACTION_INSTRUCTIONS: &str = r#"You are a legislative analyst. Analyze the provided bill or law and extract the following information:

1. Bill Number (billNumber) - include the exact bill number as shown in the document
2. Bill Name (billName) - include the full title as shown in the document
3. State (state) - the state the legislation has been proposed in
4. Year Introduced (yearIntroduced) - the year the bill was introduced
5. Sponsors (sponsors) - list all primary sponsors
6. Cosponsors (cosponsors) - list all cosponsors, if many, include all names
7. Committee (committee) - committee referred to
8. Summary (summary) - write at least 300 words summarizing the purpose and main provisions
   - Include a detailed breakdown of each section of the bill
   - Ensure the summary is comprehensive enough for a legislator to speak knowledgeably about the bill
   - Highlight key provisions, requirements, and implications
9. Sections (sections) - array of objects, each with 'number' and 'description' properties

Base your analysis ONLY on the text provided, without any external research.
Provide the information in a JSON format with the exact field names shown in parentheses above.
Make sure the summary is thorough and detailed, at least 300 words long.
Do not use snake_case for field names - use the exact field names provided above."#;

/// Build the initial structured-extraction prompt over the full text
pub fn extraction_prompt(text: &str) -> String {
    format!("{}\n\nBill text:\n{}", EXTRACTION_INSTRUCTIONS, text)
}

const ENRICHMENT_INSTRUCTIONS: &str = r#"You are a legislative analyst. You have been provided with the text of a bill or law and some initial analysis.

CONDUCT THOROUGH RESEARCH to provide the following additional information:

1. Financial implications or appropriations of the bill (financialImplications):
   - Provide detailed information about the cost of implementation
   - Include specific dollar amounts if available
   - Describe funding mechanisms or sources mentioned
   - Write at least 150 words on this topic

2. Ideological leaning of the bill (ideologicalLeaning):
   - Analyze whether the bill aligns with conservative, progressive, or moderate positions
   - Explain the reasoning behind your analysis
   - Identify the political philosophy or values reflected in the bill
   - Write at least 150 words on this topic

3. Different advocacy groups' positions on the bill (advocacyGroupPositions):
   - Research specific advocacy groups that have taken positions on this bill
   - For state bills, focus on relevant state-level advocacy groups
   - Include both supporters and opponents of the bill when available
   - Explain each group's reasoning for their position
   - Write at least 200 words on this topic

4. What the bill changes about existing law (changesTo):
   - Describe the current legal status quo
   - Explain specifically how this bill modifies, replaces, or adds to existing law
   - Identify key changes and their significance
   - Write at least 150 words on this topic

5. Other states with similar laws on their books (similarLaws):
   - Identify at least 3-5 states with similar legislation if they exist
   - Include specific statute citations whenever possible
   - Describe key similarities and differences between those laws and this bill
   - Write at least 150 words on this topic

6. Other factors to consider (otherFactors):
   - Include any relevant information not covered in the above categories
   - Discuss implementation challenges, legal concerns, or potential unintended consequences
   - Address any controversial aspects of the bill
   - Write at least 150 words on this topic

Add "(AI)" at the end of any sentence that contains information from your research.

Provide the information in a JSON format with the following fields:
- financialImplications (string)
- ideologicalLeaning (string)
- advocacyGroupPositions (string)
- changesTo (string)
- similarLaws (string)
- otherFactors (string)
- citations (an array of sources you used)

Each string field should be a detailed paragraph of at least 150-200 words, NOT an object or nested structure."#;

/// Build the research-enrichment prompt from the initial extraction and a
/// bounded prefix of the original text
pub fn enrichment_prompt(initial: &Value, text: &str, prefix_chars: usize) -> String {
    let initial_json =
        serde_json::to_string_pretty(initial).unwrap_or_else(|_| initial.to_string());

    format!(
        "{}\n\nBill information:\n{}\n\nOriginal Bill Text:\n{}\n\n\
         IMPORTANT: Each of the strings in your response (financialImplications, \
         ideologicalLeaning, etc.) should be a detailed paragraph of at least 150-200 words, \
         NOT an object or nested structure. Make sure your response is properly formatted as \
         a flat JSON object with string values, not nested objects.",
        ENRICHMENT_INSTRUCTIONS,
        initial_json,
        truncate_chars(text, prefix_chars)
    )
}

const SEARCH_INSTRUCTIONS: &str = r#"You are a legislative research assistant. Your task is to search for information about a legislative bill based on the details provided.

FIND AND RESEARCH A SPECIFIC BILL matching the criteria provided. Then provide the following information:

1. Basic bill information:
   - Bill Number (billNumber) - exact bill number
   - Bill Name (billName) - full title
   - State (state) - the state or federal jurisdiction
   - Year Introduced (yearIntroduced) - the year the bill was introduced
   - Sponsors (sponsors) - list all primary sponsors
   - Cosponsors (cosponsors) - list all cosponsors
   - Committee (committee) - committee referred to

2. Bill summary:
   - Write at least 300 words summarizing the bill's purpose and provisions
   - Include a detailed breakdown of each section
   - Ensure the summary is comprehensive enough for a legislator to speak knowledgeably about it
   - Highlight key provisions, requirements, and implications

3. Financial implications (write at least 150 words)

4. Ideological leaning (write at least 150 words)

5. Advocacy group positions (write at least 200 words)

6. Changes to existing law (write at least 150 words)

7. Similar laws in other states (write at least 150 words)

8. Other factors to consider (write at least 150 words)

For basic information (items #1-2), RESTRICT your research to:
- Official state legislature websites
- Congress.gov
- U.S. House and Senate websites
- Legiscan.com
- Billtrack50.com

For items #3-8, you may use any reliable source.

Include citations for all information. Format your response as a JSON object with the following fields:
- billNumber (string)
- billName (string)
- state (string)
- yearIntroduced (string or number)
- sponsors (string or array of strings)
- cosponsors (string or array of strings)
- committee (string)
- summary (string, at least 300 words)
- financialImplications (string, at least 150 words)
- ideologicalLeaning (string, at least 150 words)
- advocacyGroupPositions (string, at least 200 words)
- changesTo (string, at least 150 words)
- similarLaws (string, at least 150 words)
- otherFactors (string, at least 150 words)
- citations (array of strings)

IMPORTANT: Each of the string fields should be a detailed paragraph, NOT an object or nested structure."#;

/// Build the single-pass search prompt from a validated query.
///
/// Only the fields the client actually supplied appear in the criteria
/// block; an empty line for an absent field reads as a constraint.
pub fn search_prompt(query: &SearchQuery) -> String {
    let mut criteria = String::new();

    if let Some(name) = query.bill_name() {
        criteria.push_str(&format!("Bill Name: {}\n", name));
    }
    if let Some(number) = query.bill_number() {
        criteria.push_str(&format!("Bill Number: {}\n", number));
    }

    let jurisdiction = match query.state() {
        Some(state) if state.eq_ignore_ascii_case("federal") => "Federal (United States)".to_string(),
        Some(state) => state.to_string(),
        None => String::new(),
    };
    criteria.push_str(&format!("Jurisdiction: {}\n", jurisdiction));

    if let Some(year) = query.year() {
        criteria.push_str(&format!("Year Introduced: {}\n", year));
    }
    if let Some(info) = query.additional_info() {
        criteria.push_str(&format!("Additional Information: {}\n", info));
    }

    let year_restriction = match query.year() {
        Some(year) => format!(
            "\nIMPORTANT: Only return results for bills introduced in {}. Do not include \
             bills from other years.\n",
            year
        ),
        None => String::new(),
    };

    format!(
        "{}\n\nPlease search for information about the following bill:\n\n{}{}\n\
         Provide comprehensive information as specified in the instructions.",
        SEARCH_INSTRUCTIONS, criteria, year_restriction
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_truncate_chars_is_boundary_safe() {
        assert_eq!(truncate_chars("hello", 10), "hello");
        assert_eq!(truncate_chars("hello", 3), "hel");
        // Multibyte: each section sign is 2 bytes
        assert_eq!(truncate_chars("§§§§", 2), "§§");
    }

    #[test]
    fn test_classification_prompt_bounds_text() {
        let text = "x".repeat(20_000);
        let prompt = classification_prompt(&text, 9_000);
        assert!(prompt.contains("Respond with only \"Yes\" or \"No\""));
        assert!(prompt.len() < 10_000);
    }

    #[test]
    fn test_extraction_prompt_carries_full_text_and_schema() {
        let prompt = extraction_prompt("AN ACT relating to water quality.");
        assert!(prompt.contains("AN ACT relating to water quality."));
        assert!(prompt.contains("billNumber"));
        assert!(prompt.contains("yearIntroduced"));
        assert!(prompt.contains("at least 300 words"));
        assert!(prompt.contains("Do not use snake_case"));
    }

    #[test]
    fn test_enrichment_prompt_embeds_initial_analysis() {
        let initial = json!({"billNumber": "HB 1", "summary": "does things"});
        let prompt = enrichment_prompt(&initial, "full bill text here", 8_000);
        assert!(prompt.contains(r#""billNumber": "HB 1""#));
        assert!(prompt.contains("full bill text here"));
        assert!(prompt.contains("financialImplications"));
        assert!(prompt.contains("(AI)"));
        assert!(prompt.contains("not nested objects"));
    }

    #[test]
    fn test_enrichment_prompt_bounds_original_text() {
        let initial = json!({});
        let text = "y".repeat(20_000);
        let prompt = enrichment_prompt(&initial, &text, 8_000);
        assert!(!prompt.contains(&"y".repeat(8_001)));
    }

    #[test]
    fn test_search_prompt_includes_only_supplied_criteria() {
        let query = SearchQuery {
            bill_number: Some("SB 42".to_string()),
            state: Some("Texas".to_string()),
            ..SearchQuery::default()
        };
        let prompt = search_prompt(&query);
        assert!(prompt.contains("Bill Number: SB 42"));
        assert!(prompt.contains("Jurisdiction: Texas"));
        assert!(!prompt.contains("Bill Name:"));
        assert!(!prompt.contains("Additional Information:"));
        assert!(!prompt.contains("IMPORTANT: Only return results"));
    }

    #[test]
    fn test_search_prompt_spells_out_federal_jurisdiction() {
        let query = SearchQuery {
            bill_name: Some("Infrastructure Act".to_string()),
            state: Some("federal".to_string()),
            ..SearchQuery::default()
        };
        let prompt = search_prompt(&query);
        assert!(prompt.contains("Jurisdiction: Federal (United States)"));
    }

    #[test]
    fn test_search_prompt_year_restriction() {
        let query = SearchQuery {
            bill_name: Some("Act".to_string()),
            state: Some("Maine".to_string()),
            year: Some("2023".to_string()),
            ..SearchQuery::default()
        };
        let prompt = search_prompt(&query);
        assert!(prompt.contains("Year Introduced: 2023"));
        assert!(prompt.contains("Only return results for bills introduced in 2023"));
    }

    #[test]
    fn test_search_prompt_restricts_basic_info_sources() {
        let query = SearchQuery {
            bill_name: Some("Act".to_string()),
            state: Some("Maine".to_string()),
            ..SearchQuery::default()
        };
        let prompt = search_prompt(&query);
        assert!(prompt.contains("Congress.gov"));
        assert!(prompt.contains("Legiscan.com"));
        assert!(prompt.contains("Billtrack50.com"));
    }
}
