//! English scripts.

use crate::domain::dialogue::classifier::MotivationReplies;
use crate::domain::dialogue::context::UserContext;
use crate::domain::dialogue::language::{Language, Scenario};
use crate::domain::dialogue::phase::Phase;
use crate::domain::dialogue::script::{
    ConversationScript, ConversationTurn, ScriptError, START_SENTINEL,
};

use super::LanguagePack;

const LANG: Language = Language::En;

/// Replies to the fit/fear question. The first five entries are the ones
/// clients rely on.
const MOTIVATION_PATTERNS: &[&str] = &[
    "interested",
    "fun",
    "like",
    "need",
    "worry",
    "interest",
    "enjoy",
    "curious",
    "excited",
    "have to",
    "should",
    "behind",
    "pressure",
    "nervous",
    "both",
    "must",
];

const CONFIRM_PATTERNS: &[&str] = &[
    "yes",
    "yeah",
    "yep",
    "right",
    "true",
    "thank",
    "sound",
    "okay",
    "exactly",
    "agree",
    "help",
    "ready",
    "makes sense",
    "sure",
    "try",
    "will",
    "could",
    "maybe",
    "project",
];

pub(super) static PACK: LanguagePack = LanguagePack {
    motivation: MotivationReplies {
        fit: fit_reply,
        fear: fear_reply,
        both: both_reply,
    },
    generic_replies: &[
        "I hear you. Could you tell me a little more about that?",
        "Interesting! What makes you say that?",
        "Thanks for sharing. How does that connect to your courses?",
    ],
    apology: "Sorry, I'm having a little trouble right now. Could you try saying that again in a moment?",
};

pub(super) fn scripts() -> Result<Vec<(Scenario, ConversationScript)>, ScriptError> {
    Ok(vec![
        (Scenario::PostSelection, post_selection()?),
        (Scenario::PreSelection, pre_selection()?),
        (Scenario::Reconsidering, reconsidering()?),
    ])
}

fn interest_clause(ctx: &UserContext, lead: &str) -> String {
    ctx.interest_list(LANG)
        .map(|interests| format!("{lead}{interests}"))
        .unwrap_or_default()
}

fn fit_reply(ctx: &UserContext) -> String {
    format!(
        "It sounds like real interest is driving your choices, {}. That curiosity is a strong sign of fit with {}. Hold on to it when the workload picks up. Does that sound right?",
        ctx.name,
        ctx.course_list(LANG)
    )
}

fn fear_reply(ctx: &UserContext) -> String {
    format!(
        "It sounds like part of this choice comes from pressure, {}, and that's really common. Needing a course doesn't mean you can't enjoy it. Could you find one small thing in {} to look forward to?",
        ctx.name,
        ctx.first_course()
    )
}

fn both_reply(ctx: &UserContext) -> String {
    format!(
        "It sounds like a bit of both, {}: real interest mixed with some pressure. That's an honest mix, and you can lean on the curiosity when {} gets stressful. Does that feel true?",
        ctx.name,
        ctx.last_course()
    )
}

fn post_selection() -> Result<ConversationScript, ScriptError> {
    ConversationScript::new(vec![
        ConversationTurn::new(1, Phase::Recap, |ctx| {
            format!(
                "Hi {}! You've signed up for {}. Nice lineup. To start, what made you pick these courses?",
                ctx.name,
                ctx.course_list(LANG)
            )
        })
        .with_triggers(&[START_SENTINEL])
        .expecting(&[
            "because", "interest", "want", "like", "love", "need", "think", "sound", "fun",
            "career", "major", "friend", "recommend", "good", "useful", "enjoy",
        ])
        .on_vague(|ctx| {
            format!(
                "That's okay, {}, it doesn't have to be a big reason. If you could keep only one of {}, which would you keep and why?",
                ctx.name,
                ctx.course_list(LANG)
            )
        })
        .on_question(|ctx| {
            format!(
                "Good question! I'm here to help you think about why you chose {}. There are no wrong answers. What drew you to them?",
                ctx.course_list(LANG)
            )
        }),
        ConversationTurn::new(2, Phase::Articulation, |ctx| {
            format!(
                "Thanks for sharing that. Let's zoom in on {}. What part of it are you most looking forward to?",
                ctx.first_course()
            )
        })
        .expecting(&[
            "because", "learn", "project", "topic", "skill", "class", "teacher", "professor",
            "look", "excit", "interest", "like", "want", "practical", "team",
        ])
        .on_vague(|ctx| {
            format!(
                "No pressure. Even something small counts: a topic, an assignment, or how the class is taught. What comes to mind first about {}?",
                ctx.first_course()
            )
        })
        .on_question(|ctx| {
            format!(
                "I ask because putting what you look forward to into words makes it easier to stay motivated later. What stands out to you about {}?",
                ctx.first_course()
            )
        }),
        ConversationTurn::new(3, Phase::Patterns, |ctx| {
            format!(
                "I'm noticing a thread across {}{}. Be honest with me: when you think about {}, does it feel more like something fun and interesting, or more like something you need so you don't fall behind?",
                ctx.course_list(LANG),
                interest_clause(ctx, " and your interest in "),
                ctx.last_course()
            )
        })
        .expecting(MOTIVATION_PATTERNS)
        .on_vague(|ctx| {
            format!(
                "That's fair, reasons are often mixed. Picture your first week in {}: do you feel more curious or more nervous?",
                ctx.last_course()
            )
        })
        .on_question(|ctx| {
            format!(
                "I ask because knowing whether a class pulls you in or pushes you helps you plan for it. So for {}: more fun, or more need?",
                ctx.last_course()
            )
        }),
        ConversationTurn::new(4, Phase::FitFear, |ctx| {
            format!(
                "Thanks for being honest about {}, {}. Knowing why you chose it will help when the semester gets busy. Does that sound right?",
                ctx.last_course(),
                ctx.name
            )
        })
        .expecting(CONFIRM_PATTERNS)
        .on_question(|_| {
            "Fair question. Courses you enjoy tend to stick, and courses taken under pressure go better with a plan. Shall we wrap up?".to_string()
        })
        .as_decision_point(),
        ConversationTurn::new(5, Phase::Closing, |ctx| {
            format!(
                "Thanks for reflecting with me, {}! You've thought carefully about {}. Come back whenever you want to check in on how the semester is going.",
                ctx.name,
                ctx.course_list(LANG)
            )
        }),
    ])
}

fn pre_selection() -> Result<ConversationScript, ScriptError> {
    ConversationScript::new(vec![
        ConversationTurn::new(1, Phase::Recap, |ctx| {
            format!(
                "Hi {}! You're weighing {}. Choosing is the hard part, so let's think it through together. Which one are you leaning toward right now, and why?",
                ctx.name,
                ctx.course_list(LANG)
            )
        })
        .with_triggers(&[START_SENTINEL])
        .expecting(&[
            "because", "lean", "interest", "like", "want", "think", "prefer", "sound", "fun",
            "need", "career", "probably", "enjoy",
        ])
        .on_vague(|_| {
            "That's completely normal at this stage. Quick gut check: if registration closed in five minutes, which course would you click first?".to_string()
        })
        .on_question(|ctx| {
            format!(
                "Good question. I won't pick for you, but I can help you notice what matters to you. Which of {} are you leaning toward?",
                ctx.course_list(LANG)
            )
        }),
        ConversationTurn::new(2, Phase::Articulation, |_| {
            "What is it about that course that draws you in? Try to name one specific thing.".to_string()
        })
        .expecting(&[
            "because", "topic", "learn", "project", "skill", "teacher", "professor", "friend",
            "schedule", "time", "interest", "like", "want", "useful", "career",
        ])
        .on_vague(|_| {
            "Take your time. It could be the subject, the professor, the schedule, or even who else is taking it. What's one thing?".to_string()
        })
        .on_question(|_| {
            "I'm asking so you can compare courses on what actually matters to you. What draws you to it?".to_string()
        }),
        ConversationTurn::new(3, Phase::Patterns, |ctx| {
            format!(
                "Let's look at the bigger picture{}. If you imagine taking {}, does it feel like something you'd enjoy, or something you feel you should take?",
                interest_clause(ctx, ", keeping in mind your interest in "),
                ctx.last_course()
            )
        })
        .expecting(MOTIVATION_PATTERNS)
        .on_vague(|ctx| {
            format!(
                "It's okay to feel torn. Quick test: if {} had no grade attached, would you still want to take it?",
                ctx.last_course()
            )
        })
        .on_question(|ctx| {
            format!(
                "I'm asking because a course you enjoy and a course you feel you should take call for different plans. For {}, which is it?",
                ctx.last_course()
            )
        }),
        ConversationTurn::new(4, Phase::FitFear, |ctx| {
            format!(
                "That's really useful to know as you decide, {}. Does that help you see your choice more clearly?",
                ctx.name
            )
        })
        .expecting(CONFIRM_PATTERNS)
        .on_question(|_| {
            "Good question. There's no right answer, only what fits you. Shall we wrap up?"
                .to_string()
        })
        .as_decision_point(),
        ConversationTurn::new(5, Phase::Closing, |ctx| {
            format!(
                "Thanks, {}! Whatever you choose between {}, you now know a bit more about why. Good luck with registration!",
                ctx.name,
                ctx.course_list(LANG)
            )
        }),
    ])
}

fn reconsidering() -> Result<ConversationScript, ScriptError> {
    ConversationScript::new(vec![
        ConversationTurn::new(1, Phase::Recap, |ctx| {
            format!(
                "Hi {}. Sounds like you're having second thoughts about {}. That's more common than you'd think. What's making you reconsider?",
                ctx.name,
                ctx.course_list(LANG)
            )
        })
        .with_triggers(&[START_SENTINEL])
        .expecting(&[
            "because", "too hard", "difficult", "boring", "not what", "expected", "schedule",
            "grade", "workload", "interest", "like", "friend", "change", "drop", "switch",
            "worry", "stress",
        ])
        .on_vague(|_| {
            "That's okay, sometimes it's just a feeling. When you think about the class, what's the first word that comes to mind?".to_string()
        })
        .on_question(|_| {
            "Good question. I'm not here to tell you to stay or switch, just to help you sort out your reasons. What's making you reconsider?".to_string()
        }),
        ConversationTurn::new(2, Phase::Articulation, |ctx| {
            format!(
                "When you first picked {}, what were you hoping to get out of it?",
                ctx.first_course()
            )
        })
        .expecting(&[
            "because", "learn", "hope", "wanted", "skill", "career", "credit", "interest",
            "like", "friend", "requirement", "thought",
        ])
        .on_vague(|ctx| {
            format!(
                "Think back to registration day. Was there a moment when {} looked like a good idea? What was it?",
                ctx.first_course()
            )
        })
        .on_question(|_| {
            "I'm asking because comparing what you hoped for with what you got makes the decision clearer. What were you hoping for?".to_string()
        }),
        ConversationTurn::new(3, Phase::Patterns, |ctx| {
            format!(
                "So, thinking about {} now{}: is it still something you find interesting, or has it turned into something you feel you need to get through?",
                ctx.last_course(),
                interest_clause(ctx, " and your interest in ")
            )
        })
        .expecting(MOTIVATION_PATTERNS)
        .on_vague(|ctx| {
            format!(
                "Mixed feelings make sense here. On a good day in {}, do you feel curious, or just relieved when it's over?",
                ctx.last_course()
            )
        })
        .on_question(|ctx| {
            format!(
                "I ask because leaving a course you're curious about is different from leaving one you only feel pressured by. Which is {} for you?",
                ctx.last_course()
            )
        }),
        ConversationTurn::new(4, Phase::FitFear, |ctx| {
            format!(
                "Thanks for thinking that through, {}. Does that make the decision feel a bit clearer?",
                ctx.name
            )
        })
        .expecting(CONFIRM_PATTERNS)
        .on_question(|_| {
            "Fair. Only you can decide, but naming the reason is half the work. Shall we wrap up?"
                .to_string()
        })
        .as_decision_point(),
        ConversationTurn::new(5, Phase::Closing, |ctx| {
            format!(
                "Thanks for being honest, {}. Whether you stay in {} or switch, you'll be deciding for reasons you understand. Check in with your advisor before any deadlines!",
                ctx.name,
                ctx.course_list(LANG)
            )
        }),
    ])
}
