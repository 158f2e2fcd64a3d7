//! Integration tests for the analysis workflows

#[cfg(test)]
mod tests {
    use crate::{AnalystConfig, AnalystError, BillSearcher, DocumentAnalyst, SearchQuery};
    use legibrief_domain::{SponsorList, YearIntroduced};
    use legibrief_llm::MockProvider;
    use legibrief_normalizer::fields;
    use serde_json::json;
    use std::sync::Arc;

    const BILL_TEXT: &str = "HOUSE BILL 1234. AN ACT relating to water quality standards.";

    fn extraction_response() -> String {
        json!({
            "billNumber": "HB 1234",
            "billName": "An Act Relating to Water Quality Standards",
            "state": "Vermont",
            "yearIntroduced": 2023,
            "sponsors": ["Rep. Smith"],
            "cosponsors": ["Rep. Jones", "Rep. Lee"],
            "committee": "Natural Resources",
            "summary": "This bill revises water quality standards. ".repeat(10),
            "sections": [
                {"number": "1", "description": "Definitions"},
                {"number": "2", "description": "Standards"}
            ]
        })
        .to_string()
    }

    fn enrichment_response() -> String {
        json!({
            "financialImplications": "Implementation costs about two million dollars. (AI)",
            "ideologicalLeaning": "Broadly bipartisan environmental measure. (AI)",
            "advocacyGroupPositions": "Conservation groups support it. (AI)",
            "changesTo": "Amends Title 10 standards. (AI)",
            "similarLaws": "Maine and New Hampshire have comparable statutes. (AI)",
            "otherFactors": "Rulemaking must finish within a year. (AI)",
            "citations": ["https://legislature.vermont.gov"]
        })
        .to_string()
    }

    fn analyst(mock: &MockProvider) -> DocumentAnalyst<MockProvider> {
        DocumentAnalyst::new(Arc::new(mock.clone()), AnalystConfig::default())
    }

    fn searcher(mock: &MockProvider) -> BillSearcher<MockProvider> {
        BillSearcher::new(Arc::new(mock.clone()), AnalystConfig::default())
    }

    #[tokio::test]
    async fn test_full_analysis_flow() {
        let mut mock = MockProvider::default();
        mock.push_response("Yes");
        mock.push_response(extraction_response());
        mock.push_response(enrichment_response());

        let record = analyst(&mock).analyze(BILL_TEXT).await.unwrap();

        assert_eq!(record.bill_number, "HB 1234");
        assert_eq!(record.state, "Vermont");
        assert_eq!(record.year_introduced, YearIntroduced::Number(2023));
        assert_eq!(record.sponsors, SponsorList::Many(vec!["Rep. Smith".into()]));
        assert!(record.summary.starts_with("This bill revises water quality"));
        assert!(record
            .financial_implications
            .contains("two million dollars"));
        assert_eq!(record.sections.len(), 2);
        assert_eq!(record.sections[0].title, "1");
        assert_eq!(record.citations, vec!["https://legislature.vermont.gov"]);

        assert_eq!(mock.call_count(), 3);
    }

    #[tokio::test]
    async fn test_non_legislation_stops_before_extraction() {
        let mock = MockProvider::new("No, this is a memo");

        let result = analyst(&mock).analyze("MEMO: lunch orders").await;

        assert!(matches!(result, Err(AnalystError::NotLegislation)));
        // Exactly one call: classification only
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn test_classification_provider_failure_is_fatal() {
        let mut mock = MockProvider::default();
        mock.push_error("provider unavailable");

        let result = analyst(&mock).analyze(BILL_TEXT).await;
        assert!(matches!(result, Err(AnalystError::Generation(_))));
    }

    #[tokio::test]
    async fn test_extraction_decode_failure_is_fatal() {
        let mut mock = MockProvider::default();
        mock.push_response("Yes");
        mock.push_response("I am unable to analyze this document.");

        let result = analyst(&mock).analyze(BILL_TEXT).await;

        assert!(matches!(result, Err(AnalystError::Decode(_))));
        assert_eq!(mock.call_count(), 2);
    }

    #[tokio::test]
    async fn test_enrichment_decode_failure_degrades_to_placeholders() {
        let mut mock = MockProvider::default();
        mock.push_response("Yes");
        mock.push_response(extraction_response());
        mock.push_response("Sorry, something went wrong with my research.");

        let record = analyst(&mock).analyze(BILL_TEXT).await.unwrap();

        // Extraction output survives intact
        assert_eq!(record.bill_number, "HB 1234");
        assert_eq!(record.state, "Vermont");
        assert!(record.summary.starts_with("This bill revises water quality"));
        assert_eq!(record.sections.len(), 2);

        // Research fields are the fixed fallback sentences
        assert_eq!(
            record.financial_implications,
            "The financial implications could not be determined at this time."
        );
        assert_eq!(
            record.similar_laws,
            "Information on similar laws in other states could not be determined at this time."
        );
        assert!(record.citations.is_empty());

        assert_eq!(mock.call_count(), 3);
    }

    #[tokio::test]
    async fn test_enrichment_provider_failure_is_fatal() {
        let mut mock = MockProvider::default();
        mock.push_response("Yes");
        mock.push_response(extraction_response());
        mock.push_error("connection reset");

        let result = analyst(&mock).analyze(BILL_TEXT).await;
        assert!(matches!(result, Err(AnalystError::Generation(_))));
    }

    #[tokio::test]
    async fn test_analysis_accepts_markdown_fenced_json() {
        let mut mock = MockProvider::default();
        mock.push_response("Yes");
        mock.push_response(format!("```json\n{}\n```", extraction_response()));
        mock.push_response(enrichment_response());

        let record = analyst(&mock).analyze(BILL_TEXT).await.unwrap();
        assert_eq!(record.bill_number, "HB 1234");
    }

    #[tokio::test]
    async fn test_analysis_with_sparse_extraction_normalizes_defaults() {
        let mut mock = MockProvider::default();
        mock.push_response("Yes");
        mock.push_response(json!({"billNumber": "HB 7"}).to_string());
        mock.push_response("{}".to_string());

        let record = analyst(&mock).analyze(BILL_TEXT).await.unwrap();

        assert_eq!(record.bill_number, "HB 7");
        assert_eq!(record.bill_name, fields::NOT_SPECIFIED);
        assert_eq!(record.summary, fields::SUMMARY_MISSING);
        assert_eq!(
            record.changes_to,
            fields::missing_placeholder("changesTo")
        );
        assert!(record.sections.is_empty());
    }

    fn full_search_query() -> SearchQuery {
        SearchQuery {
            bill_name: Some("An Act Relating to Water Quality Standards".to_string()),
            bill_number: Some("HB 1234".to_string()),
            state: Some("Vermont".to_string()),
            year: Some("2023".to_string()),
            additional_info: None,
        }
    }

    fn search_response(year: serde_json::Value) -> String {
        json!({
            "billNumber": "HB 1234",
            "billName": "An Act Relating to Water Quality Standards",
            "state": "Vermont",
            "yearIntroduced": year,
            "sponsors": "Rep. Smith",
            "cosponsors": ["Rep. Jones"],
            "committee": "Natural Resources",
            "summary": "A thorough summary of the bill's provisions. ".repeat(10),
            "financialImplications": "About two million dollars. (AI)",
            "ideologicalLeaning": "Bipartisan. (AI)",
            "advocacyGroupPositions": "Supported by conservation groups. (AI)",
            "changesTo": "Amends Title 10. (AI)",
            "similarLaws": "Maine LD 489 is comparable. (AI)",
            "otherFactors": "None of note. (AI)",
            "citations": ["https://legiscan.com"]
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_search_happy_path() {
        let mock = MockProvider::new(search_response(json!("2023")));

        let record = searcher(&mock).search(&full_search_query()).await.unwrap();

        assert_eq!(record.bill_number, "HB 1234");
        assert_eq!(record.year_introduced, YearIntroduced::Text("2023".into()));
        assert_eq!(record.sponsors, SponsorList::One("Rep. Smith".into()));
        assert_eq!(record.citations, vec!["https://legiscan.com"]);
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn test_search_validation_never_calls_provider() {
        let mock = MockProvider::default();
        let s = searcher(&mock);

        let no_state = SearchQuery {
            bill_name: Some("Act".to_string()),
            ..SearchQuery::default()
        };
        assert!(matches!(
            s.search(&no_state).await,
            Err(AnalystError::MissingJurisdiction)
        ));

        let state_only = SearchQuery {
            state: Some("Vermont".to_string()),
            ..SearchQuery::default()
        };
        assert!(matches!(
            s.search(&state_only).await,
            Err(AnalystError::InsufficientQuery)
        ));

        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_search_year_mismatch_rejects_record() {
        let mock = MockProvider::new(search_response(json!(2022)));

        let result = searcher(&mock).search(&full_search_query()).await;

        match result {
            Err(AnalystError::YearMismatch { requested, found }) => {
                assert_eq!(requested, "2023");
                assert_eq!(found, "2022");
            }
            other => panic!("expected YearMismatch, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_search_numeric_year_matches_requested_string() {
        let mock = MockProvider::new(search_response(json!(2023)));

        let record = searcher(&mock).search(&full_search_query()).await.unwrap();
        assert_eq!(record.year_introduced, YearIntroduced::Number(2023));
    }

    #[tokio::test]
    async fn test_search_decode_failure_is_fatal() {
        let mock = MockProvider::new("I could not find any such bill.");

        let result = searcher(&mock).search(&full_search_query()).await;

        // No placeholder substitution on this path: the whole response
        // is suspect when there is no earlier good fragment to keep.
        assert!(matches!(result, Err(AnalystError::Decode(_))));
    }

    #[tokio::test]
    async fn test_search_provider_failure_is_fatal() {
        let mut mock = MockProvider::default();
        mock.push_error("rate limited");

        let result = searcher(&mock).search(&full_search_query()).await;
        assert!(matches!(result, Err(AnalystError::Generation(_))));
    }

    #[tokio::test]
    async fn test_search_missing_fields_normalize_to_placeholders() {
        let mock = MockProvider::new(
            json!({
                "billNumber": "SB 9",
                "state": "Texas"
            })
            .to_string(),
        );

        let query = SearchQuery {
            bill_number: Some("SB 9".to_string()),
            state: Some("Texas".to_string()),
            ..SearchQuery::default()
        };

        let record = searcher(&mock).search(&query).await.unwrap();
        assert_eq!(record.bill_number, "SB 9");
        assert_eq!(record.committee, fields::NOT_SPECIFIED);
        assert_eq!(record.summary, fields::SUMMARY_MISSING);
        assert_eq!(
            record.advocacy_group_positions,
            fields::missing_placeholder("advocacyGroupPositions")
        );
    }
}
