use anyhow::Result;

use crate::{
    lesson::AarohOutput,
    palette::Palette,
    utils::{ask_line, ask_yn, pluralize, trim_line},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizScore {
    pub correct: usize,
    pub total: usize,
}

impl QuizScore {
    pub fn is_perfect(&self) -> bool {
        self.total > 0 && self.correct == self.total
    }
}

/// Walks through the quiz one question at a time; the learner grades
/// themselves against the revealed answer.
pub fn run(lesson: &AarohOutput) -> Result<QuizScore> {
    let total = lesson.quiz_questions.len();
    let mut correct = 0;

    println!("\n{}", Palette::paint(Palette::INFO, Palette::bold("Quiz time")));
    for (idx, item) in lesson.quiz_questions.iter().enumerate() {
        println!(
            "\n{} {}\n{}",
            Palette::paint(Palette::WARNING, format!("Question {} of {total}", idx + 1)),
            Palette::dim(format!("({})", item.kind.label())),
            item.question.trim()
        );

        let answer = ask_line("Your answer")?;
        println!("{}", reveal_answer(&answer, &item.correct_answer));

        if ask_yn("Did you get it right?")? {
            correct += 1;
        }
    }

    let score = QuizScore { correct, total };
    println!("\n{}", score_line(&score));
    Ok(score)
}

pub fn reveal_answer(answer: &str, correct_answer: &str) -> String {
    let given = match trim_line(answer) {
        Some(answer) => answer.to_string(),
        None => Palette::dim("(no answer)"),
    };
    format!(
        "{} {}\n{} {}",
        Palette::dim("You said:      "),
        given,
        Palette::dim("Correct answer:"),
        Palette::paint(Palette::SUCCESS, correct_answer.trim())
    )
}

pub fn score_line(score: &QuizScore) -> String {
    let summary = format!(
        "You got {} of {} right.",
        score.correct,
        pluralize("question", score.total)
    );
    if score.is_perfect() {
        Palette::paint(Palette::SUCCESS, format!("{summary} Great job!"))
    } else if score.correct == 0 {
        Palette::paint(
            Palette::DANGER,
            format!("{summary} Read the explanation again and give it another go."),
        )
    } else {
        Palette::paint(Palette::WARNING, summary)
    }
}
