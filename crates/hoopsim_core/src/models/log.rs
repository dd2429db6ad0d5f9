use serde::{Deserialize, Serialize};

/// Machine-readable classification of a play-by-play entry. The wording of
/// `text` is canonical but presentation-oriented; downstream consumers
/// should dispatch on this kind.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
#[serde(rename_all = "snake_case")]
pub enum LogEventKind {
    JumpBall,
    ShotAttempt,
    ShotMade,
    ShotMissed,
    Block,
    OffensiveRebound,
    DefensiveRebound,
    Steal,
    Turnover,
    ShootingFoul,
    FreeThrowMade,
    FreeThrowMissed,
    Violation,
    PeriodStart,
    PeriodEnd,
    FinalBuzzer,
}

/// One play-by-play line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameLogEntry {
    pub quarter: u8,
    /// Game clock as "MM:SS" remaining in the quarter.
    pub time: String,
    pub kind: LogEventKind,
    pub text: String,
    pub score_home: u32,
    pub score_away: u32,
}
