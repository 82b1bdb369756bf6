//! Interactive career quiz.
//!
//! Walks every section with a `Select` prompt per question, then sends the
//! answers for analysis and prints the suggested careers. Prompts go to
//! stderr so `--json` output stays clean.

use anyhow::Result;
use comfy_table::{presets, Cell, Color, ContentArrangement, Table};
use console::style;
use dialoguer::Select;

use compass_core::quiz::catalog::{total_questions, QUIZ_SECTIONS};
use compass_types::quiz::{AnswerValue, CareerAnalysis, QuizAnswers};

use super::spinner;
use crate::state::AppState;

pub async fn run_quiz(state: &AppState, json: bool) -> Result<()> {
    // Fail before asking nine questions.
    let provider = state.llm()?;

    let answers = ask_all()?;

    let spinner = spinner("Analyzing your answers...");
    let result = state.quiz_analyzer.analyze(&provider, &answers).await;
    spinner.finish_and_clear();
    let analysis = result?;

    if json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        print_analysis(&analysis);
    }
    Ok(())
}

fn ask_all() -> Result<QuizAnswers> {
    let total = total_questions();
    let mut answers = QuizAnswers::new();
    let mut number = 0;

    for (s, section) in QUIZ_SECTIONS.iter().enumerate() {
        eprintln!();
        eprintln!("  {}", style(section.title).cyan().bold());
        eprintln!("  {}", style(section.description).dim());
        eprintln!();

        for (q, question) in section.questions.iter().enumerate() {
            number += 1;
            let choice = Select::new()
                .with_prompt(format!("[{number}/{total}] {}", question.question))
                .items(question.options)
                .default(0)
                .interact()?;
            answers.insert(quiz_key(s, q), AnswerValue::Index(choice as i64));
        }
    }
    Ok(answers)
}

fn quiz_key(section: usize, question: usize) -> String {
    format!("{section}-{question}")
}

fn print_analysis(analysis: &CareerAnalysis) {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Match").fg(Color::White),
        Cell::new("Career").fg(Color::White),
        Cell::new("Salary").fg(Color::White),
        Cell::new("Outlook").fg(Color::White),
        Cell::new("Why").fg(Color::White),
    ]);

    for career in &analysis.careers {
        let score = Cell::new(format!("{:.0}%", career.match_score));
        let score = if career.match_score >= 85.0 {
            score.fg(Color::Green)
        } else {
            score.fg(Color::Yellow)
        };
        table.add_row(vec![
            score,
            Cell::new(&career.title).fg(Color::Cyan),
            Cell::new(&career.salary_range),
            Cell::new(&career.growth_outlook),
            Cell::new(&career.reasoning).fg(Color::DarkGrey),
        ]);
    }

    println!();
    println!("  {}", style("Your career matches").bold());
    println!();
    println!("{table}");
    println!();
}
