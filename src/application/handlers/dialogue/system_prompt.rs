//! System prompt for the live reply provider.

use crate::domain::dialogue::{Language, Phase, Scenario, UserContext};

const PHASES: [Phase; 5] = [
    Phase::Recap,
    Phase::Articulation,
    Phase::Patterns,
    Phase::FitFear,
    Phase::Closing,
];

/// Builds the coaching system prompt for one student.
pub fn build_system_prompt(ctx: &UserContext, scenario: Scenario, language: Language) -> String {
    let mut prompt = format!(
        "You are a warm, curious reflection coach talking with a student named {name}. \
        Help them understand why they {situation}: {courses}.\n\n",
        name = ctx.name,
        situation = situation(scenario),
        courses = ctx.course_list(Language::En),
    );

    if let Some(interests) = ctx.interest_list(Language::En) {
        prompt.push_str(&format!("They have said they are interested in {interests}.\n"));
    }
    if let Some(strengths) = ctx.strengths.as_ref().filter(|s| !s.energizers.is_empty()) {
        prompt.push_str(&format!(
            "They feel energized by {}.\n",
            strengths.energizers.join(", ")
        ));
    }

    prompt.push_str("\nMove through these phases, one short message at a time:\n");
    for (index, phase) in PHASES.iter().enumerate() {
        prompt.push_str(&format!("{}. {}: {}\n", index + 1, phase.label(), phase_goal(*phase)));
    }

    prompt.push_str(
        "\nA student message of exactly START means the conversation is just beginning. \
        Ask one question per message. Keep replies under three sentences. \
        Never choose courses for the student and never judge their reasons.\n",
    );
    prompt.push_str(match language {
        Language::Ko => "Reply only in Korean, using polite speech (해요체).",
        Language::En => "Reply only in English.",
    });

    prompt
}

fn situation(scenario: Scenario) -> &'static str {
    match scenario {
        Scenario::PreSelection => "are leaning toward some courses over others",
        Scenario::PostSelection => "picked their courses",
        Scenario::Reconsidering => "are having second thoughts about their courses",
    }
}

fn phase_goal(phase: Phase) -> &'static str {
    match phase {
        Phase::Recap => "greet them and restate the courses",
        Phase::Articulation => "ask what draws them to one specific course",
        Phase::Patterns => "point out what connects their choices",
        Phase::FitFear => "gently find out whether interest or pressure drives the choice",
        Phase::Closing => "thank them and summarize what they discovered",
    }
}
