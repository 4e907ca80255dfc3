//! Headless-прогон тренажёра: бот играет по рекомендациям и
//! иногда ошибается в счёте, чтобы было видно адаптацию каденса.
//!
//! Запуск: `trainer_sim [hands] [seed]`, уровень логов — через RUST_LOG.

use blackjack_trainer::api::{execute_command, Command, CommandResponse};
use blackjack_trainer::domain::hand::Decision;
use blackjack_trainer::domain::rules::SessionConfig;
use blackjack_trainer::engine::{RandomSource, SessionPhase, TrainingSession};
use blackjack_trainer::infra::{InMemorySessionStorage, RngSeed, SessionStorage};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let hands: u32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(200);
    let seed: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);

    println!("trainer_sim: {} рук, seed = {}", hands, seed);

    let base = RngSeed::from_u64(seed);
    let mut jitter = base.derive(0, 0).to_rng();
    // Отдельный поток случайности для ошибок бота, чтобы не сбивать шуз.
    let mut mistakes = base.derive(0, 1).to_rng();

    let rng = base.derive(1, 0).to_rng();
    let mut session = match TrainingSession::new(SessionConfig::default(), rng) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("[SIM] не удалось создать сессию: {}", e);
            return;
        }
    };
    let mut storage = InMemorySessionStorage::new();
    let mut now_ms: u64 = 0;

    if let Err(e) = execute_command(&mut session, Command::Start, now_ms) {
        eprintln!("[SIM] start: {:?}", e);
        return;
    }

    while session.hands_played() < hands {
        now_ms += 1_000;
        let command = next_command(&session, &mut mistakes, &mut jitter);
        if let Err(e) = execute_command(&mut session, command.clone(), now_ms) {
            eprintln!("[SIM] команда {:?} отклонена: {:?}", command, e);
            break;
        }
        if session.hands_played() % 50 == 0 && session.phase() == SessionPhase::HandResolved {
            storage.save_snapshot(&session.snapshot(now_ms));
        }
    }

    let record = match execute_command(&mut session, Command::End, now_ms) {
        Ok(CommandResponse::Ended(record)) => record,
        Ok(other) => {
            eprintln!("[SIM] неожиданный ответ на End: {:?}", other);
            return;
        }
        Err(e) => {
            eprintln!("[SIM] end: {:?}", e);
            return;
        }
    };
    storage.clear_snapshot(&record.session_id);
    storage.append_record(&record);

    let s = &record.summary;
    println!("==================== ИТОГ ====================");
    println!("Рук сыграно:        {}", record.hands_played);
    println!(
        "Промптов на счёт:   {} (верно {}, точность {:.1}%)",
        s.total_prompts,
        s.correct_prompts,
        s.accuracy * 100.0
    );
    println!("Лучшая серия:       {}", s.longest_streak);
    println!("Среднее время, мс:  {}", s.avg_response_ms);
    println!(
        "Решений:            {} (верно {}, точность {:.1}%)",
        s.total_decisions,
        s.correct_decisions,
        s.decision_accuracy * 100.0
    );
    println!("Записей в истории:  {}", storage.records().len());
}

/// Что бот делает в текущей фазе.
fn next_command<R: RandomSource>(
    session: &TrainingSession<R>,
    mistakes: &mut impl RandomSource,
    jitter: &mut impl RandomSource,
) -> Command {
    match session.phase() {
        SessionPhase::AwaitingPlayerAction => match session.advice() {
            Ok(advice) => Command::Act(advice.action),
            Err(_) => Command::Act(Decision::Stand),
        },
        SessionPhase::CountPromptOpen => {
            // Примерно каждый четвёртый ответ — мимо на ±1.
            let truth = session.running_count();
            if mistakes.next_f64() < 0.25 {
                let off = if jitter.next_f64() < 0.5 { -1 } else { 1 };
                Command::SubmitCount(truth + off)
            } else {
                Command::SubmitCount(truth)
            }
        }
        _ => Command::DealHand,
    }
}
