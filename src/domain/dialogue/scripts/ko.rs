//! Korean scripts.
//!
//! There is no reconsidering script yet; lookups for it resolve to the
//! post-selection script.

use crate::domain::dialogue::classifier::MotivationReplies;
use crate::domain::dialogue::context::UserContext;
use crate::domain::dialogue::language::{Language, Scenario};
use crate::domain::dialogue::phase::Phase;
use crate::domain::dialogue::script::{
    ConversationScript, ConversationTurn, ScriptError, START_SENTINEL,
};

use super::LanguagePack;

const LANG: Language = Language::Ko;

const TRIGGERS: &[&str] = &[START_SENTINEL, "시작"];

const MOTIVATION_PATTERNS: &[&str] = &[
    "흥미", "재미", "좋아", "필요", "걱정", "관심", "궁금", "즐거", "설레", "신나", "싶", "해야",
    "뒤처", "압박", "불안", "둘 다",
];

const CONFIRM_PATTERNS: &[&str] = &[
    "네", "응", "맞아", "맞는", "그래", "좋아요", "감사", "고마", "도움", "알겠", "할게", "해볼",
    "그럴", "아마", "프로젝트",
];

pub(super) static PACK: LanguagePack = LanguagePack {
    motivation: MotivationReplies {
        fit: fit_reply,
        fear: fear_reply,
        both: both_reply,
    },
    generic_replies: &[
        "그렇군요. 조금 더 이야기해 줄 수 있어요?",
        "흥미롭네요! 왜 그렇게 생각하세요?",
        "이야기해 줘서 고마워요. 그게 수업과 어떻게 연결될까요?",
    ],
    apology: "죄송해요, 지금 잠시 문제가 생겼어요. 조금 뒤에 다시 말씀해 주시겠어요?",
};

pub(super) fn scripts() -> Result<Vec<(Scenario, ConversationScript)>, ScriptError> {
    Ok(vec![
        (Scenario::PostSelection, post_selection()?),
        (Scenario::PreSelection, pre_selection()?),
    ])
}

fn interest_clause(ctx: &UserContext, lead: &str, tail: &str) -> String {
    ctx.interest_list(LANG)
        .map(|interests| format!("{lead}{interests}{tail}"))
        .unwrap_or_default()
}

fn fit_reply(ctx: &UserContext) -> String {
    format!(
        "{}님은 진짜 흥미가 선택을 이끌고 있는 것 같아요. 그 호기심은 {} 수업과 잘 맞는다는 강한 신호예요. 과제가 많아질 때 그 마음을 꼭 기억하세요. 맞는 것 같나요?",
        ctx.name,
        ctx.course_list(LANG)
    )
}

fn fear_reply(ctx: &UserContext) -> String {
    format!(
        "{}님, 이번 선택에는 부담감도 조금 섞여 있는 것 같아요. 아주 흔한 일이에요. 필요해서 듣는 수업이라도 즐길 수 있어요. {} 수업에서 기대되는 작은 것 하나를 찾아볼 수 있을까요?",
        ctx.name,
        ctx.first_course()
    )
}

fn both_reply(ctx: &UserContext) -> String {
    format!(
        "{}님은 흥미와 부담이 함께 있는 것 같아요. 솔직한 마음이에요. {} 수업이 힘들어질 때는 궁금했던 마음에 기대 보세요. 맞는 것 같나요?",
        ctx.name,
        ctx.last_course()
    )
}

fn post_selection() -> Result<ConversationScript, ScriptError> {
    ConversationScript::new(vec![
        ConversationTurn::new(1, Phase::Recap, |ctx| {
            format!(
                "안녕하세요, {}님! {} 수업을 신청하셨네요. 먼저, 이 수업들을 고른 이유가 무엇인가요?",
                ctx.name,
                ctx.course_list(LANG)
            )
        })
        .with_triggers(TRIGGERS)
        .expecting(&[
            "때문", "관심", "재미", "좋아", "흥미", "필요", "진로", "전공", "친구", "추천", "배우",
            "싶", "유용",
        ])
        .on_vague(|ctx| {
            format!(
                "괜찮아요, {}님. 거창한 이유가 아니어도 돼요. {} 중에 하나만 남길 수 있다면 어떤 수업을 남기고 싶으세요?",
                ctx.name,
                ctx.course_list(LANG)
            )
        })
        .on_question(|ctx| {
            format!(
                "좋은 질문이에요! 저는 {} 수업을 고른 이유를 함께 생각해 보려고 해요. 정답은 없어요. 어떤 점에 끌리셨나요?",
                ctx.course_list(LANG)
            )
        }),
        ConversationTurn::new(2, Phase::Articulation, |ctx| {
            format!(
                "이야기해 줘서 고마워요. {} 수업을 조금 더 들여다볼까요? 어떤 부분이 가장 기대되나요?",
                ctx.first_course()
            )
        })
        .expecting(&[
            "때문", "배우", "프로젝트", "주제", "기술", "교수", "선생", "기대", "관심", "좋아",
            "재미", "실용", "팀",
        ])
        .on_vague(|ctx| {
            format!(
                "부담 갖지 마세요. 주제, 과제, 수업 방식처럼 작은 것도 괜찮아요. {} 하면 가장 먼저 떠오르는 게 뭐예요?",
                ctx.first_course()
            )
        })
        .on_question(|ctx| {
            format!(
                "기대되는 점을 말로 표현해 두면 나중에 동기를 유지하기 쉬워서 여쭤봤어요. {} 수업에서 눈에 띄는 점이 있나요?",
                ctx.first_course()
            )
        }),
        ConversationTurn::new(3, Phase::Patterns, |ctx| {
            format!(
                "{}{} 사이에 공통점이 보여요. 솔직하게 말해 주세요. {} 수업은 재미있고 흥미로운 쪽에 가까운가요, 아니면 뒤처지지 않으려고 필요한 쪽에 가까운가요?",
                ctx.course_list(LANG),
                interest_clause(ctx, ", 그리고 ", "에 대한 관심"),
                ctx.last_course()
            )
        })
        .expecting(MOTIVATION_PATTERNS)
        .on_vague(|ctx| {
            format!(
                "그럴 수 있어요. 이유는 섞여 있기 마련이죠. {} 수업 첫 주를 떠올려 보면, 설레는 쪽인가요, 불안한 쪽인가요?",
                ctx.last_course()
            )
        })
        .on_question(|ctx| {
            format!(
                "수업이 나를 끌어당기는지, 떠밀고 있는지 알면 계획을 세우기 쉬워서 여쭤봤어요. {} 수업은 재미 쪽인가요, 필요 쪽인가요?",
                ctx.last_course()
            )
        }),
        ConversationTurn::new(4, Phase::FitFear, |ctx| {
            format!(
                "{} 수업에 대해 솔직하게 이야기해 줘서 고마워요, {}님. 이유를 알고 있으면 학기가 바빠져도 도움이 될 거예요. 맞는 것 같나요?",
                ctx.last_course(),
                ctx.name
            )
        })
        .expecting(CONFIRM_PATTERNS)
        .on_question(|_| {
            "좋은 질문이에요. 즐거운 수업은 오래가고, 부담으로 듣는 수업은 계획이 있으면 훨씬 수월해요. 이제 마무리해 볼까요?".to_string()
        })
        .as_decision_point(),
        ConversationTurn::new(5, Phase::Closing, |ctx| {
            format!(
                "함께 돌아봐 줘서 고마워요, {}님! {} 수업에 대해 깊이 생각해 보셨네요. 학기 중에 언제든 다시 이야기하러 오세요.",
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
                "안녕하세요, {}님! {} 수업 사이에서 고민 중이시군요. 고르는 게 제일 어렵죠. 함께 생각해 봐요. 지금은 어떤 수업에 마음이 더 가나요? 이유도 알려 주세요.",
                ctx.name,
                ctx.course_list(LANG)
            )
        })
        .with_triggers(TRIGGERS)
        .expecting(&[
            "때문", "관심", "재미", "좋아", "흥미", "필요", "진로", "끌", "마음", "싶",
        ])
        .on_vague(|_| {
            "이 단계에서는 당연한 일이에요. 직감으로 골라 볼까요? 수강신청이 5분 뒤에 마감된다면 어떤 수업을 먼저 누르시겠어요?".to_string()
        })
        .on_question(|ctx| {
            format!(
                "좋은 질문이에요. 제가 대신 골라 드릴 수는 없지만, {}님에게 무엇이 중요한지 찾는 걸 도울 수 있어요. {} 중 어떤 수업에 마음이 가나요?",
                ctx.name,
                ctx.course_list(LANG)
            )
        }),
        ConversationTurn::new(2, Phase::Articulation, |_| {
            "그 수업의 어떤 점이 끌리나요? 구체적인 것 하나만 말해 주세요.".to_string()
        })
        .expecting(&[
            "때문", "주제", "배우", "프로젝트", "기술", "교수", "친구", "시간", "관심", "좋아",
            "재미", "유용", "진로",
        ])
        .on_vague(|_| {
            "천천히 생각해도 돼요. 과목 내용, 교수님, 시간표, 같이 듣는 친구 중 무엇이든 괜찮아요. 하나만 꼽는다면요?".to_string()
        })
        .on_question(|_| {
            "나에게 정말 중요한 기준으로 수업을 비교할 수 있도록 여쭤봤어요. 어떤 점이 끌리나요?"
                .to_string()
        }),
        ConversationTurn::new(3, Phase::Patterns, |ctx| {
            format!(
                "조금 넓게 볼까요? {}{} 수업을 듣는다고 상상하면, 즐거울 것 같은 쪽인가요, 들어야 할 것 같은 쪽인가요?",
                interest_clause(ctx, "", "에 대한 관심도 함께 떠올리면서, "),
                ctx.last_course()
            )
        })
        .expecting(MOTIVATION_PATTERNS)
        .on_vague(|ctx| {
            format!(
                "마음이 갈리는 건 자연스러워요. {} 수업에 학점이 없다면 그래도 듣고 싶을까요?",
                ctx.last_course()
            )
        })
        .on_question(|ctx| {
            format!(
                "즐거워서 듣는 수업과 들어야 해서 듣는 수업은 준비 방법이 달라서 여쭤봤어요. {} 수업은 어느 쪽인가요?",
                ctx.last_course()
            )
        }),
        ConversationTurn::new(4, Phase::FitFear, |ctx| {
            format!(
                "결정하는 데 정말 도움이 되는 이야기예요, {}님. 선택이 조금 더 분명해졌나요?",
                ctx.name
            )
        })
        .expecting(CONFIRM_PATTERNS)
        .on_question(|ctx| {
            format!(
                "좋은 질문이에요. 정답은 없고, {}님에게 맞는 선택만 있어요. 이제 마무리해 볼까요?",
                ctx.name
            )
        })
        .as_decision_point(),
        ConversationTurn::new(5, Phase::Closing, |ctx| {
            format!(
                "고마워요, {}님! {} 중 무엇을 고르든, 이제 그 이유를 조금 더 알게 되었어요. 수강신청 잘 하세요!",
                ctx.name,
                ctx.course_list(LANG)
            )
        }),
    ])
}
