use crate::domain::model::{MatchRecord, MatchSource, Question, QuestionId, Year};

const RESERVED_KEYS: [&str; 2] = ["matchedIn", "matchedAlternatives"];

fn contains_keyword(field: Option<&str>, normalized_keyword: &str) -> bool {
    field
        .map(|text| text.to_lowercase().contains(normalized_keyword))
        .unwrap_or(false)
}

/// Applies the keyword to one question. `normalized_keyword` must already be
/// lowercased. Returns `None` when neither the body nor any alternative matches.
pub fn match_question(
    year: Year,
    question_id: QuestionId,
    mut question: Question,
    normalized_keyword: &str,
) -> Option<MatchRecord> {
    let mut matched_in = Vec::with_capacity(2);

    // context and alternativesIntroduction both count as the question body
    if contains_keyword(question.context.as_deref(), normalized_keyword)
        || contains_keyword(question.alternatives_introduction.as_deref(), normalized_keyword)
    {
        matched_in.push(MatchSource::Context);
    }

    let matched_alternatives: Vec<String> = question
        .alternatives
        .iter()
        .filter(|alternative| contains_keyword(alternative.text.as_deref(), normalized_keyword))
        .map(|alternative| alternative.letter.clone())
        .collect();

    if !matched_alternatives.is_empty() {
        matched_in.push(MatchSource::Alternative);
    }

    if matched_in.is_empty() {
        return None;
    }

    // the record's own provenance fields replace any stored under the same names
    for key in RESERVED_KEYS {
        question.extra.remove(key);
    }

    Some(MatchRecord {
        year,
        question_id,
        question,
        matched_in,
        matched_alternatives: if matched_alternatives.is_empty() {
            None
        } else {
            Some(matched_alternatives)
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn question(value: serde_json::Value) -> Question {
        serde_json::from_value(value).unwrap()
    }

    fn run(value: serde_json::Value, keyword: &str) -> Option<MatchRecord> {
        match_question(
            Year(2023),
            QuestionId("1".to_string()),
            question(value),
            &keyword.to_lowercase(),
        )
    }

    #[test]
    fn test_context_match() {
        let record = run(
            json!({"context": "the study of genetics", "alternatives": []}),
            "genetics",
        )
        .unwrap();

        assert_eq!(record.matched_in, vec![MatchSource::Context]);
        assert_eq!(record.matched_alternatives, None);
    }

    #[test]
    fn test_alternatives_introduction_counts_as_context_once() {
        let record = run(
            json!({
                "context": "Sobre a fotossíntese",
                "alternativesIntroduction": "A fotossíntese ocorre",
                "alternatives": []
            }),
            "FOTOSSÍNTESE",
        )
        .unwrap();

        assert_eq!(record.matched_in, vec![MatchSource::Context]);
    }

    #[test]
    fn test_only_introduction_matches() {
        let record = run(
            json!({
                "context": null,
                "alternativesIntroduction": "Assinale a alternativa correta",
                "alternatives": [{"letter": "A", "text": "nada"}]
            }),
            "assinale",
        )
        .unwrap();

        assert_eq!(record.matched_in, vec![MatchSource::Context]);
        assert!(record.matched_alternatives.is_none());
    }

    #[test]
    fn test_alternative_letters_in_document_order() {
        let record = run(
            json!({
                "context": "Qual o efeito?",
                "alternatives": [
                    {"letter": "A", "text": "increase"},
                    {"letter": "B", "text": "decrease"},
                    {"letter": "C", "text": "stable"}
                ]
            }),
            "crease",
        )
        .unwrap();

        assert_eq!(record.matched_in, vec![MatchSource::Alternative]);
        assert_eq!(
            record.matched_alternatives,
            Some(vec!["A".to_string(), "B".to_string()])
        );
    }

    #[test]
    fn test_context_listed_before_alternative() {
        let record = run(
            json!({
                "context": "energia solar",
                "alternatives": [
                    {"letter": "A", "text": "eólica"},
                    {"letter": "B", "text": "Solar térmica"}
                ]
            }),
            "solar",
        )
        .unwrap();

        assert_eq!(
            record.matched_in,
            vec![MatchSource::Context, MatchSource::Alternative]
        );
        assert_eq!(record.matched_alternatives, Some(vec!["B".to_string()]));
    }

    #[test]
    fn test_no_match_and_missing_text() {
        assert!(run(
            json!({
                "context": null,
                "alternatives": [{"letter": "A", "text": null}, {"letter": "B"}]
            }),
            "x",
        )
        .is_none());
    }

    #[test]
    fn test_stored_provenance_fields_are_replaced() {
        let record = run(
            json!({
                "context": "dna",
                "alternatives": [],
                "matchedIn": ["alternative"],
                "matchedAlternatives": ["Z"]
            }),
            "dna",
        )
        .unwrap();

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["matchedIn"], json!(["context"]));
        assert!(value.get("matchedAlternatives").is_none());

        let serialized = serde_json::to_string(&record).unwrap();
        assert_eq!(serialized.matches("\"matchedIn\"").count(), 1);
    }

    #[test]
    fn test_punctuation_and_diacritics_compared_verbatim() {
        let value = json!({"context": "ação e reação", "alternatives": []});
        assert!(run(value.clone(), "acao").is_none());
        assert!(run(value, "AÇÃO").is_some());
    }
}
