use std::fmt;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

pub const QUIZ_QUESTION_COUNT: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizType {
    MultipleChoice,
    ShortAnswer,
}

impl QuizType {
    pub const ALL: [QuizType; 2] = [QuizType::MultipleChoice, QuizType::ShortAnswer];

    pub fn as_str(&self) -> &'static str {
        match self {
            QuizType::MultipleChoice => "multiple_choice",
            QuizType::ShortAnswer => "short_answer",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            QuizType::MultipleChoice => "multiple choice",
            QuizType::ShortAnswer => "short answer",
        }
    }
}

impl fmt::Display for QuizType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizItem {
    pub question: String,
    #[serde(rename = "type")]
    pub kind: QuizType,
    pub correct_answer: String,
}

/// Learning aids generated for one piece of input text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AarohOutput {
    pub simplified_text: String,
    pub analogy: String,
    pub quiz_questions: Vec<QuizItem>,
}

impl AarohOutput {
    /// Decodes the model's JSON text and checks the parts the schema cannot
    /// guarantee on its own.
    pub fn from_json(text: &str) -> Result<Self> {
        let output: AarohOutput = serde_json::from_str(text)
            .context("Model response did not match the expected JSON structure")?;
        output.validate()?;
        Ok(output)
    }

    pub fn validate(&self) -> Result<()> {
        if self.simplified_text.trim().is_empty() {
            bail!("Model response has an empty simplified_text");
        }
        if self.analogy.trim().is_empty() {
            bail!("Model response has an empty analogy");
        }
        if self.quiz_questions.len() != QUIZ_QUESTION_COUNT {
            bail!(
                "Expected exactly {} quiz questions, got {}",
                QUIZ_QUESTION_COUNT,
                self.quiz_questions.len()
            );
        }
        for (idx, item) in self.quiz_questions.iter().enumerate() {
            if item.question.trim().is_empty() {
                bail!("Quiz question {} is empty", idx + 1);
            }
            if item.correct_answer.trim().is_empty() {
                bail!("Quiz question {} has no correct answer", idx + 1);
            }
        }
        Ok(())
    }

    /// Response schema in the OpenAPI subset accepted by Gemini's
    /// `responseSchema` field.
    pub fn response_schema() -> Value {
        let quiz_types: Vec<&str> = QuizType::ALL.iter().map(QuizType::as_str).collect();

        json!({
            "type": "OBJECT",
            "properties": {
                "simplified_text": {
                    "type": "STRING",
                    "description": "The complex text rewritten using simple, accessible language for a high school student."
                },
                "analogy": {
                    "type": "STRING",
                    "description": "A single, highly memorable, real-world analogy to make the core concept 'sticky'."
                },
                "quiz_questions": {
                    "type": "ARRAY",
                    "description": "A list of exactly 3 high-quality quiz questions.",
                    "minItems": QUIZ_QUESTION_COUNT,
                    "maxItems": QUIZ_QUESTION_COUNT,
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "question": {
                                "type": "STRING",
                                "description": "A clear comprehension question based on the input text."
                            },
                            "type": {
                                "type": "STRING",
                                "format": "enum",
                                "enum": quiz_types,
                                "description": "The question format, must be 'multiple_choice' or 'short_answer'."
                            },
                            "correct_answer": {
                                "type": "STRING",
                                "description": "The correct answer to the question."
                            }
                        },
                        "required": ["question", "type", "correct_answer"],
                        "propertyOrdering": ["question", "type", "correct_answer"]
                    }
                }
            },
            "required": ["simplified_text", "analogy", "quiz_questions"],
            "propertyOrdering": ["simplified_text", "analogy", "quiz_questions"]
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn item(question: &str, kind: &str, answer: &str) -> Value {
        json!({ "question": question, "type": kind, "correct_answer": answer })
    }

    fn response_with(items: Vec<Value>) -> String {
        json!({
            "simplified_text": "Plants eat sunlight to make food.",
            "analogy": "A leaf is like a tiny kitchen that cooks with light.",
            "quiz_questions": items,
        })
        .to_string()
    }

    fn three_items() -> Vec<Value> {
        vec![
            item("What do plants use to make food?", "short_answer", "Sunlight"),
            item(
                "Where does it happen? a) roots b) leaves",
                "multiple_choice",
                "b) leaves",
            ),
            item("What gas do plants give off?", "short_answer", "Oxygen"),
        ]
    }

    #[test]
    fn parses_valid_response() {
        let output = AarohOutput::from_json(&response_with(three_items())).unwrap();
        assert_eq!(output.quiz_questions.len(), 3);
        assert_eq!(output.quiz_questions[1].kind, QuizType::MultipleChoice);
        assert_eq!(output.quiz_questions[2].correct_answer, "Oxygen");
    }

    #[test]
    fn serializes_type_field_with_wire_name() {
        let output = AarohOutput::from_json(&response_with(three_items())).unwrap();
        let value = serde_json::to_value(&output).unwrap();
        assert_eq!(value["quiz_questions"][0]["type"], "short_answer");
        assert!(value["quiz_questions"][0].get("kind").is_none());
    }

    #[test]
    fn rejects_unknown_quiz_type() {
        let mut items = three_items();
        items[0] = item("Is it green?", "true_false", "Yes");
        let err = AarohOutput::from_json(&response_with(items)).unwrap_err();
        assert!(format!("{err:#}").contains("expected JSON structure"));
    }

    #[test]
    fn rejects_missing_field() {
        let text = json!({
            "simplified_text": "Plants eat sunlight.",
            "quiz_questions": three_items(),
        })
        .to_string();
        assert!(AarohOutput::from_json(&text).is_err());
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(AarohOutput::from_json("{\"simplified_text\": ").is_err());
        assert!(AarohOutput::from_json("not json at all").is_err());
    }

    #[test]
    fn rejects_blank_analogy() {
        let text = json!({
            "simplified_text": "Plants eat sunlight.",
            "analogy": "   ",
            "quiz_questions": three_items(),
        })
        .to_string();
        let err = AarohOutput::from_json(&text).unwrap_err();
        assert!(err.to_string().contains("analogy"));
    }

    #[test]
    fn rejects_blank_answer() {
        let mut items = three_items();
        items[2] = item("What gas do plants give off?", "short_answer", "");
        let err = AarohOutput::from_json(&response_with(items)).unwrap_err();
        assert_eq!(err.to_string(), "Quiz question 3 has no correct answer");
    }

    #[test]
    fn schema_lists_both_quiz_types() {
        let schema = AarohOutput::response_schema();
        let kinds = &schema["properties"]["quiz_questions"]["items"]["properties"]["type"]["enum"];
        assert_eq!(kinds, &json!(["multiple_choice", "short_answer"]));
        assert_eq!(schema["properties"]["quiz_questions"]["minItems"], 3);
        assert_eq!(schema["properties"]["quiz_questions"]["maxItems"], 3);
    }

    #[test]
    fn quiz_type_display_matches_wire_literal() {
        for kind in QuizType::ALL {
            let wire = serde_json::to_value(kind).unwrap();
            assert_eq!(wire, json!(kind.to_string()));
        }
    }

    proptest! {
        #[test]
        fn only_three_questions_are_accepted(count in 0usize..8) {
            let items: Vec<Value> = (0..count)
                .map(|n| item(&format!("Question {n}?"), "short_answer", "Answer"))
                .collect();
            let parsed = AarohOutput::from_json(&response_with(items));
            prop_assert_eq!(parsed.is_ok(), count == QUIZ_QUESTION_COUNT);
        }
    }
}
