use serde::{Deserialize, Serialize};

use crate::api::dto::SessionViewDto;
use crate::api::errors::ApiError;
use crate::api::queries::build_session_view;
use crate::domain::count_check::CountCheck;
use crate::domain::hand::Decision;
use crate::engine::{RandomSource, TrainingSession};
use crate::state::SessionRecord;

/// Команда верхнего уровня от UI.
///
/// Каждая команда проверяется автоматом фаз до изменения состояния.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum Command {
    /// Idle → Ready.
    Start,
    /// Новая раздача.
    DealHand,
    /// Действие игрока по активной руке.
    Act(Decision),
    /// Ответ на промпт счёта. Нечисловой ввод отсекается UI до ядра.
    SubmitCount(i32),
    DismissPrompt,
    Pause,
    Resume,
    End,
    /// Completed → Idle.
    Reset,
}

/// Ответ API на команду.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum CommandResponse {
    /// Успешно, вот новое состояние для отрисовки.
    View(SessionViewDto),
    /// Ответ на промпт записан.
    CountChecked {
        check: CountCheck,
        view: SessionViewDto,
    },
    /// Сессия завершена, запись для истории.
    Ended(SessionRecord),
}

/// Выполнить команду над сессией.
pub fn execute_command<R: RandomSource>(
    session: &mut TrainingSession<R>,
    command: Command,
    now_ms: u64,
) -> Result<CommandResponse, ApiError> {
    match command {
        Command::Start => session.start(now_ms)?,
        Command::DealHand => session.deal_hand(now_ms)?,
        Command::Act(decision) => match decision {
            Decision::Hit => session.hit(now_ms)?,
            Decision::Stand => session.stand(now_ms)?,
            Decision::Double => session.double(now_ms)?,
            Decision::Split => session.split(now_ms)?,
            Decision::Surrender => session.surrender(now_ms)?,
        },
        Command::SubmitCount(entered) => {
            let check = session.submit_count(entered, now_ms)?;
            return Ok(CommandResponse::CountChecked {
                check,
                view: build_session_view(session),
            });
        }
        Command::DismissPrompt => session.dismiss_prompt()?,
        Command::Pause => session.pause(now_ms)?,
        Command::Resume => session.resume(now_ms)?,
        Command::End => return Ok(CommandResponse::Ended(session.end_session(now_ms)?)),
        Command::Reset => session.reset()?,
    }
    Ok(CommandResponse::View(build_session_view(session)))
}
