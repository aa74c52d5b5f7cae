pub mod commands;
pub mod lesson;
pub mod llm;
pub mod palette;
pub mod processor;
pub mod utils;

pub use lesson::{AarohOutput, QuizItem, QuizType};
pub use processor::{AarohError, ProcessResult, process, process_with, try_process};
