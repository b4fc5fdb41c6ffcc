use async_trait::async_trait;
use serde::Deserialize;

use crate::ai::client::OpenRouterClient;
use crate::error::ContentError;
use crate::logger;
use crate::models::Question;

/// Source of question batches.
#[async_trait]
pub trait ContentProvider: Send + Sync {
    async fn generate_quiz(&self, count: usize) -> Result<Vec<Question>, ContentError>;
}

#[async_trait]
impl ContentProvider for OpenRouterClient {
    async fn generate_quiz(&self, count: usize) -> Result<Vec<Question>, ContentError> {
        logger::log(&format!(
            "Requesting {} questions from {}",
            count,
            self.model()
        ));
        let raw = self.request_quiz(count).await?;
        logger::log(&format!("Raw AI response: {}", raw));
        parse_quiz_response(&raw, count)
    }
}

/// Strip markdown fences and any prose around the outermost JSON object.
fn clean_json_response(response: &str) -> String {
    let mut cleaned = response.trim().to_string();

    if cleaned.starts_with("```") {
        let lines: Vec<&str> = cleaned.lines().collect();
        if lines.len() > 2 {
            cleaned = lines[1..lines.len() - 1].join("\n");
        }
    }

    if let Some(start) = cleaned.find('{')
        && let Some(end) = cleaned.rfind('}')
        && start < end
    {
        cleaned = cleaned[start..=end].to_string();
    }

    cleaned.trim().to_string()
}

#[derive(Debug, Deserialize)]
struct QuizPayload {
    questions: Vec<Question>,
}

/// Every generated question offers exactly this many choices.
pub const OPTION_COUNT: usize = 4;

/// Parse and validate a model response into exactly `count` questions.
///
/// One malformed record or a short batch rejects the whole response.
pub fn parse_quiz_response(response: &str, count: usize) -> Result<Vec<Question>, ContentError> {
    let cleaned = clean_json_response(response);
    logger::log(&format!("Cleaned AI response: {}", cleaned));

    let payload: QuizPayload = serde_json::from_str(&cleaned).map_err(|e| {
        ContentError::Malformed(format!("{}\nRaw: {}\nCleaned: {}", e, response, cleaned))
    })?;

    let mut questions = payload.questions;
    if questions.is_empty() {
        return Err(ContentError::NoQuestions);
    }

    for (index, question) in questions.iter().enumerate() {
        validate_question(question).map_err(|reason| ContentError::InvalidQuestion {
            index: index + 1,
            reason,
        })?;
    }

    if questions.len() < count {
        return Err(ContentError::ShortBatch {
            expected: count,
            got: questions.len(),
        });
    }
    if questions.len() > count {
        logger::log(&format!(
            "Provider returned {} questions, keeping the first {}",
            questions.len(),
            count
        ));
        questions.truncate(count);
    }

    Ok(questions)
}

pub fn validate_question(question: &Question) -> Result<(), String> {
    if question.word.trim().is_empty() {
        return Err("word is empty".to_string());
    }
    if question.translation.trim().is_empty() {
        return Err("translation is empty".to_string());
    }
    if question.options.len() != OPTION_COUNT {
        return Err(format!(
            "expected {} options, got {}",
            OPTION_COUNT,
            question.options.len()
        ));
    }

    let matches = question
        .options
        .iter()
        .filter(|o| question.is_correct(o))
        .count();
    if matches != 1 {
        return Err(format!(
            "options contain {:?} {} times",
            question.word, matches
        ));
    }

    for (i, option) in question.options.iter().enumerate() {
        if option.trim().is_empty() {
            return Err("an option is empty".to_string());
        }
        if question.options[..i].contains(option) {
            return Err(format!("option {:?} is repeated", option));
        }
    }

    Ok(())
}

#[cfg(test)]
use std::sync::Mutex;
#[cfg(test)]
use std::time::Duration;

/// Provider returning canned batches in order, for tests.
#[cfg(test)]
pub struct MockContentProvider {
    responses: Mutex<Vec<Result<Vec<Question>, ContentError>>>,
    delay: Duration,
}

#[cfg(test)]
impl MockContentProvider {
    pub fn new(responses: Vec<Result<Vec<Question>, ContentError>>) -> Self {
        Self {
            responses: Mutex::new(responses),
            delay: Duration::ZERO,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[cfg(test)]
#[async_trait]
impl ContentProvider for MockContentProvider {
    async fn generate_quiz(&self, count: usize) -> Result<Vec<Question>, ContentError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let next = {
            let mut responses = self.responses.lock().unwrap();
            if responses.is_empty() {
                None
            } else {
                Some(responses.remove(0))
            }
        };
        match next {
            Some(response) => response.map(|mut q| {
                q.truncate(count);
                q
            }),
            None => Err(ContentError::NoQuestions),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_response() -> &'static str {
        r#"{
            "questions": [
                {"word": "Cat", "translation": "แมว", "options": ["Dog", "Cat", "Ant", "Lion"]},
                {"word": "Dog", "translation": "สุนัข", "options": ["Dog", "Bird", "Fish", "Cow"]}
            ]
        }"#
    }

    #[test]
    fn test_clean_json_response_simple() {
        let json = r#"{"questions":[]}"#;
        assert_eq!(clean_json_response(json), r#"{"questions":[]}"#);
    }

    #[test]
    fn test_clean_json_response_markdown() {
        let json = "```json\n{\"questions\": []}\n```";
        assert_eq!(clean_json_response(json), r#"{"questions": []}"#);
    }

    #[test]
    fn test_clean_json_response_with_text() {
        let json = r#"Here you go: {"questions": []} have fun"#;
        assert_eq!(clean_json_response(json), r#"{"questions": []}"#);
    }

    #[test]
    fn test_parse_valid_response() {
        let questions = parse_quiz_response(sample_response(), 2).unwrap();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].word, "Cat");
        assert_eq!(questions[1].translation, "สุนัข");
        assert_eq!(questions[0].options, vec!["Dog", "Cat", "Ant", "Lion"]);
    }

    #[test]
    fn test_parse_truncates_to_requested_count() {
        let questions = parse_quiz_response(sample_response(), 1).unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].word, "Cat");
    }

    #[test]
    fn test_parse_accepts_thai_field() {
        let json = r#"{"questions": [{"word": "Ant", "thai": "มด", "options": ["Ant", "Bee", "Cat", "Owl"]}]}"#;
        let questions = parse_quiz_response(json, 1).unwrap();
        assert_eq!(questions[0].translation, "มด");
    }

    #[test]
    fn test_parse_empty_list_fails() {
        let result = parse_quiz_response(r#"{"questions": []}"#, 5);
        assert_eq!(result.unwrap_err(), ContentError::NoQuestions);
    }

    #[test]
    fn test_parse_garbage_fails() {
        let result = parse_quiz_response("sorry, I cannot help with that", 5);
        assert!(matches!(result, Err(ContentError::Malformed(_))));
    }

    #[test]
    fn test_parse_missing_field_fails() {
        let json = r#"{"questions": [{"word": "Cat", "options": ["Cat", "Dog"]}]}"#;
        assert!(matches!(
            parse_quiz_response(json, 5),
            Err(ContentError::Malformed(_))
        ));
    }

    #[test]
    fn test_parse_rejects_batch_with_one_bad_record() {
        let json = r#"{"questions": [
            {"word": "Cat", "translation": "แมว", "options": ["Dog", "Cat", "Ant", "Lion"]},
            {"word": "Dog", "translation": "สุนัข", "options": ["Bird", "Fish", "Cow", "Pig"]}
        ]}"#;
        let err = parse_quiz_response(json, 5).unwrap_err();
        assert!(matches!(err, ContentError::InvalidQuestion { index: 2, .. }));
    }

    #[test]
    fn test_parse_rejects_short_batch() {
        let err = parse_quiz_response(sample_response(), 10).unwrap_err();
        assert_eq!(err, ContentError::ShortBatch { expected: 10, got: 2 });
    }

    #[test]
    fn test_parse_rejects_record_with_two_options() {
        let json = r#"{"questions":[{"word":"Cat","translation":"แมว","options":["Cat","Dog"]}]}"#;
        let err = parse_quiz_response(json, 1).unwrap_err();
        assert!(matches!(err, ContentError::InvalidQuestion { index: 1, .. }));
    }

    #[test]
    fn test_validate_question_rules() {
        assert!(validate_question(&Question::new("Cat", "แมว", &["Cat", "Dog", "Ant", "Owl"])).is_ok());
        assert!(validate_question(&Question::new("", "แมว", &["Cat", "Dog"])).is_err());
        assert!(validate_question(&Question::new("Cat", " ", &["Cat", "Dog"])).is_err());
        assert!(validate_question(&Question::new("Cat", "แมว", &["Cat"])).is_err());
        assert!(validate_question(&Question::new("Cat", "แมว", &["Cat", "Dog", "Ant"])).is_err());
        assert!(validate_question(&Question::new("Cat", "แมว", &["Cat", "Cat", "Dog", "Ant"])).is_err());
        assert!(validate_question(&Question::new("Cat", "แมว", &["Cat", "Dog", "Dog", "Ant"])).is_err());
        assert!(
            validate_question(&Question::new("Cat", "แมว", &["Cat", "Dog", "Ant", "Owl", "Bee"]))
                .is_err()
        );
    }

    #[tokio::test]
    async fn test_mock_provider_replays_responses() {
        let provider = MockContentProvider::new(vec![
            Err(ContentError::EmptyResponse),
            Ok(vec![
                Question::new("Cat", "แมว", &["Cat", "Dog"]),
                Question::new("Dog", "สุนัข", &["Cat", "Dog"]),
            ]),
        ]);

        assert_eq!(
            provider.generate_quiz(2).await.unwrap_err(),
            ContentError::EmptyResponse
        );
        assert_eq!(provider.generate_quiz(1).await.unwrap().len(), 1);
        assert_eq!(
            provider.generate_quiz(1).await.unwrap_err(),
            ContentError::NoQuestions
        );
    }
}
