//! Статистика по записям CountCheck: доля недавних промахов и итоги сессии.

use crate::domain::count_check::{CountCheck, PromptType, SessionSummary};

/// Доля промахов среди последних `window` промптов на счёт.
/// Проверки решений (BestAction) не учитываются. Без данных — 0.
pub fn recent_miss_rate(checks: &[CountCheck], window: usize) -> f64 {
    let recent: Vec<&CountCheck> = checks
        .iter()
        .rev()
        .filter(|c| c.prompt_type != PromptType::BestAction)
        .take(window)
        .collect();

    if recent.is_empty() {
        return 0.0;
    }
    let misses = recent.iter().filter(|c| !c.is_correct).count();
    misses as f64 / recent.len() as f64
}

pub fn summarize(checks: &[CountCheck]) -> SessionSummary {
    let mut summary = SessionSummary::default();
    let mut streak = 0u32;
    let mut total_ms = 0u64;

    for check in checks {
        if check.prompt_type == PromptType::BestAction {
            summary.total_decisions += 1;
            if check.is_correct {
                summary.correct_decisions += 1;
            }
            continue;
        }

        summary.total_prompts += 1;
        total_ms += check.response_ms;
        if check.is_correct {
            summary.correct_prompts += 1;
            streak += 1;
            summary.longest_streak = summary.longest_streak.max(streak);
        } else {
            streak = 0;
        }
    }

    if summary.total_prompts > 0 {
        summary.accuracy = summary.correct_prompts as f64 / summary.total_prompts as f64;
        summary.avg_response_ms = total_ms / summary.total_prompts as u64;
    }
    if summary.total_decisions > 0 {
        summary.decision_accuracy =
            summary.correct_decisions as f64 / summary.total_decisions as f64;
    }
    summary
}
