use std::{
    fs,
    io::{self, IsTerminal, Read},
    path::PathBuf,
};

use anyhow::{Context, Result, bail};
use tracing::debug;

use crate::{
    commands::quiz,
    lesson::AarohOutput,
    palette::Palette,
    processor::{ProcessResult, process},
    utils::trim_line,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Pretty,
    Json,
    Quiz,
}

pub async fn run(text: Option<String>, file: Option<PathBuf>, mode: OutputMode) -> Result<()> {
    let input = read_input(text, file)?;
    let Some(complex_text) = trim_line(&input) else {
        bail!("Input text is empty; nothing to explain.");
    };
    debug!(chars = complex_text.chars().count(), "Explaining input text");

    let (result, success) = process(complex_text).await;
    let lesson = match (result, success) {
        (ProcessResult::Lesson(lesson), true) => lesson,
        (ProcessResult::Error(message), _) => bail!(message),
        (ProcessResult::Lesson(_), false) => bail!("Processing reported failure"),
    };

    match mode {
        OutputMode::Json => {
            let rendered = serde_json::to_string_pretty(&ProcessResult::Lesson(lesson))?;
            println!("{rendered}");
        }
        OutputMode::Pretty => print!("{}", render_lesson(&lesson, true)),
        OutputMode::Quiz => {
            print!("{}", render_lesson(&lesson, false));
            quiz::run(&lesson)?;
        }
    }

    Ok(())
}

fn read_input(text: Option<String>, file: Option<PathBuf>) -> Result<String> {
    if let Some(text) = text {
        return Ok(text);
    }

    if let Some(path) = file {
        return fs::read_to_string(&path)
            .with_context(|| format!("Failed to read input file {}", path.display()));
    }

    let mut stdin = io::stdin();
    if stdin.is_terminal() {
        bail!("No input text provided. Pass TEXT, use --file, or pipe text on stdin.");
    }
    let mut buffer = String::new();
    stdin
        .read_to_string(&mut buffer)
        .context("Failed to read input from stdin")?;
    Ok(buffer)
}

pub fn render_lesson(lesson: &AarohOutput, show_answers: bool) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "\n{}\n{}\n",
        Palette::paint(Palette::INFO, Palette::bold("Simple explanation")),
        lesson.simplified_text.trim()
    ));
    out.push_str(&format!(
        "\n{}\n{}\n",
        Palette::paint(Palette::INFO, Palette::bold("Analogy")),
        lesson.analogy.trim()
    ));

    if show_answers {
        out.push_str(&format!(
            "\n{}\n",
            Palette::paint(Palette::INFO, Palette::bold("Quiz"))
        ));
        for (idx, item) in lesson.quiz_questions.iter().enumerate() {
            out.push_str(&format!(
                "{}. {} {}\n   {} {}\n",
                idx + 1,
                item.question.trim(),
                Palette::dim(format!("[{}]", item.kind.label())),
                Palette::dim("Answer:"),
                Palette::paint(Palette::SUCCESS, item.correct_answer.trim())
            ));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lesson::{QuizItem, QuizType};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn lesson() -> AarohOutput {
        AarohOutput {
            simplified_text: "Plants make food from sunlight.".to_string(),
            analogy: "A leaf is a tiny kitchen.".to_string(),
            quiz_questions: vec![
                QuizItem {
                    question: "What do plants eat?".to_string(),
                    kind: QuizType::ShortAnswer,
                    correct_answer: "Sunlight".to_string(),
                },
                QuizItem {
                    question: "Where is the kitchen? a) leaf b) root".to_string(),
                    kind: QuizType::MultipleChoice,
                    correct_answer: "a) leaf".to_string(),
                },
                QuizItem {
                    question: "Is sunlight needed?".to_string(),
                    kind: QuizType::ShortAnswer,
                    correct_answer: "Yes".to_string(),
                },
            ],
        }
    }

    #[test]
    fn render_includes_answers_when_requested() {
        let rendered = render_lesson(&lesson(), true);
        assert!(rendered.contains("Plants make food from sunlight."));
        assert!(rendered.contains("A leaf is a tiny kitchen."));
        assert!(rendered.contains("1. What do plants eat?"));
        assert!(rendered.contains("3. Is sunlight needed?"));
        assert!(rendered.contains("\u{1b}[2m[multiple choice]\u{1b}[0m"));
        assert!(rendered.contains("\u{1b}[32mSunlight\u{1b}[0m"));
    }

    #[test]
    fn render_hides_quiz_for_interactive_mode() {
        let rendered = render_lesson(&lesson(), false);
        assert!(rendered.contains("A leaf is a tiny kitchen."));
        assert!(!rendered.contains("What do plants eat?"));
        assert!(!rendered.contains("Sunlight\u{1b}"));
    }

    #[test]
    fn argument_text_wins_over_file() {
        let input = read_input(
            Some("from argument".to_string()),
            Some(PathBuf::from("/does/not/exist")),
        )
        .unwrap();
        assert_eq!(input, "from argument");
    }

    #[test]
    fn reads_input_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "Mitochondria are the powerhouse of the cell.").unwrap();

        let input = read_input(None, Some(file.path().to_path_buf())).unwrap();
        assert_eq!(
            trim_line(&input),
            Some("Mitochondria are the powerhouse of the cell.")
        );
    }

    #[test]
    fn missing_file_names_path() {
        let err = read_input(None, Some(PathBuf::from("/does/not/exist.txt"))).unwrap_err();
        assert!(err.to_string().contains("/does/not/exist.txt"));
    }

    #[tokio::test]
    async fn blank_input_is_rejected_before_any_request() {
        let err = run(Some("   \n".to_string()), None, OutputMode::Json)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Input text is empty; nothing to explain.");
    }
}
