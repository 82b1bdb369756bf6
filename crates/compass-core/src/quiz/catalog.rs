//! The fixed three-section career quiz and answer validation.
//!
//! Option positions carry meaning: within every question, option 1 leans
//! analytical/technical, option 2 social/communication, option 3
//! creative/innovation and option 4 practical/organizational.

use compass_types::error::QuizError;
use compass_types::quiz::{QuizAnswer, QuizAnswers, QuizQuestion, QuizSection};

pub static QUIZ_SECTIONS: &[QuizSection] = &[
    QuizSection {
        title: "Interests",
        description: "What activities and subjects excite you?",
        questions: &[
            QuizQuestion {
                question: "Which activity sounds most appealing to you?",
                options: &[
                    "Analyzing data and finding patterns",
                    "Creating visual designs and artwork",
                    "Helping people solve their problems",
                    "Building and fixing things with your hands",
                ],
            },
            QuizQuestion {
                question: "In your free time, you prefer to:",
                options: &[
                    "Read about new technologies and innovations",
                    "Attend social events and meet new people",
                    "Work on creative projects or hobbies",
                    "Spend time outdoors and stay active",
                ],
            },
            QuizQuestion {
                question: "What type of content do you enjoy most?",
                options: &[
                    "Scientific articles and research papers",
                    "Art galleries and design showcases",
                    "Documentaries about social issues",
                    "DIY tutorials and how-to guides",
                ],
            },
        ],
    },
    QuizSection {
        title: "Skills",
        description: "What are your natural strengths?",
        questions: &[
            QuizQuestion {
                question: "Which skill comes most naturally to you?",
                options: &[
                    "Problem-solving and logical thinking",
                    "Communication and public speaking",
                    "Creative thinking and innovation",
                    "Organization and attention to detail",
                ],
            },
            QuizQuestion {
                question: "In group projects, you typically:",
                options: &[
                    "Take charge and lead the team",
                    "Focus on research and analysis",
                    "Handle the creative and design aspects",
                    "Ensure everything runs smoothly and on time",
                ],
            },
            QuizQuestion {
                question: "Your friends would describe you as:",
                options: &[
                    "The analytical thinker",
                    "The natural leader",
                    "The creative visionary",
                    "The reliable organizer",
                ],
            },
        ],
    },
    QuizSection {
        title: "Personality",
        description: "What work environment suits you best?",
        questions: &[
            QuizQuestion {
                question: "Your ideal work environment is:",
                options: &[
                    "A quiet space where you can focus deeply",
                    "A collaborative office with lots of interaction",
                    "A flexible space where you can be creative",
                    "A structured environment with clear processes",
                ],
            },
            QuizQuestion {
                question: "When facing a challenge, you:",
                options: &[
                    "Research thoroughly before taking action",
                    "Brainstorm with others to find solutions",
                    "Think outside the box for creative solutions",
                    "Break it down into manageable steps",
                ],
            },
            QuizQuestion {
                question: "You feel most energized when:",
                options: &[
                    "Solving complex problems independently",
                    "Collaborating with a diverse team",
                    "Working on innovative projects",
                    "Completing tasks efficiently and accurately",
                ],
            },
        ],
    },
];

/// Total number of questions across all sections.
pub fn total_questions() -> usize {
    QUIZ_SECTIONS.iter().map(|s| s.questions.len()).sum()
}

/// Validate raw answers against the catalog.
///
/// Keys are `"<section>-<question>"` and values option indices, all 0-based.
/// Returned answers are ordered by section, then question.
pub fn validate_answers(answers: &QuizAnswers) -> Result<Vec<QuizAnswer>, QuizError> {
    if answers.is_empty() {
        return Err(QuizError::InvalidAnswers("no answers submitted".to_string()));
    }

    let mut parsed = Vec::with_capacity(answers.len());
    for (key, value) in answers {
        let (section, question) = parse_key(key)
            .ok_or_else(|| QuizError::InvalidAnswers(format!("malformed answer key '{key}'")))?;

        let question_def = QUIZ_SECTIONS
            .get(section)
            .and_then(|s| s.questions.get(question))
            .ok_or_else(|| QuizError::InvalidAnswers(format!("unknown question '{key}'")))?;

        let option = value
            .as_index()
            .and_then(|i| usize::try_from(i).ok())
            .filter(|i| *i < question_def.options.len())
            .ok_or_else(|| {
                QuizError::InvalidAnswers(format!("invalid option for question '{key}'"))
            })?;

        parsed.push(QuizAnswer {
            section,
            question,
            option,
        });
    }

    parsed.sort();
    Ok(parsed)
}

fn parse_key(key: &str) -> Option<(usize, usize)> {
    let (section, question) = key.split_once('-')?;
    Some((section.trim().parse().ok()?, question.trim().parse().ok()?))
}

/// One line per answer: `Section S, Question Q: Option O` (1-based).
pub fn summarize_answers(answers: &[QuizAnswer]) -> String {
    answers
        .iter()
        .map(|a| {
            format!(
                "Section {}, Question {}: Option {}",
                a.section + 1,
                a.question + 1,
                a.option + 1
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
