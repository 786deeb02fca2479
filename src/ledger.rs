//! Gamification ledger.
//!
//! Progress is never stored directly. The ledger keeps an append-only list of
//! events and the current XP and belt are derived by replaying it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::sync::RwLock;
use tracing::debug;

use crate::models::decision::Verdict;
use crate::models::market::Horizon;

pub const ANALYSIS_XP: u64 = 10;
pub const PAUSE_XP: u64 = 25;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LedgerEvent {
    AnalysisPerformed {
        ticker: String,
        horizon: Horizon,
        verdict: Verdict,
    },
    /// The user looked at a verdict and chose not to trade.
    PauseChosen { ticker: String },
}

impl LedgerEvent {
    pub fn xp(&self) -> u64 {
        match self {
            LedgerEvent::AnalysisPerformed { .. } => ANALYSIS_XP,
            LedgerEvent::PauseChosen { .. } => PAUSE_XP,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedEvent {
    pub sequence: u64,
    pub recorded_at: DateTime<Utc>,
    #[serde(flatten)]
    pub event: LedgerEvent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Belt {
    White,
    Yellow,
    Green,
    Blue,
    Brown,
    Black,
}

impl Belt {
    const LADDER: [(Belt, u64); 6] = [
        (Belt::Black, 2000),
        (Belt::Brown, 1000),
        (Belt::Blue, 500),
        (Belt::Green, 250),
        (Belt::Yellow, 100),
        (Belt::White, 0),
    ];

    pub fn for_xp(xp: u64) -> Self {
        Self::LADDER
            .iter()
            .find(|(_, min)| xp >= *min)
            .map_or(Belt::White, |(belt, _)| *belt)
    }

    pub fn min_xp(&self) -> u64 {
        Self::LADDER
            .iter()
            .find(|(belt, _)| belt == self)
            .map_or(0, |(_, min)| *min)
    }

    pub fn next(&self) -> Option<Belt> {
        match self {
            Belt::White => Some(Belt::Yellow),
            Belt::Yellow => Some(Belt::Green),
            Belt::Green => Some(Belt::Blue),
            Belt::Blue => Some(Belt::Brown),
            Belt::Brown => Some(Belt::Black),
            Belt::Black => None,
        }
    }
}

impl fmt::Display for Belt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerProjection {
    pub xp: u64,
    pub belt: Belt,
    pub analyses: u64,
    pub pauses: u64,
    /// XP still needed for the next belt, `None` at Black.
    pub xp_to_next_belt: Option<u64>,
}

impl LedgerProjection {
    pub fn replay<'a, I>(events: I) -> Self
    where
        I: IntoIterator<Item = &'a LedgerEvent>,
    {
        let (mut xp, mut analyses, mut pauses) = (0u64, 0u64, 0u64);
        for event in events {
            xp += event.xp();
            match event {
                LedgerEvent::AnalysisPerformed { .. } => analyses += 1,
                LedgerEvent::PauseChosen { .. } => pauses += 1,
            }
        }

        let belt = Belt::for_xp(xp);
        Self {
            xp,
            belt,
            analyses,
            pauses,
            xp_to_next_belt: belt.next().map(|next| next.min_xp() - xp),
        }
    }
}

#[derive(Debug, Default)]
pub struct Ledger {
    events: RwLock<Vec<RecordedEvent>>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn append(&self, event: LedgerEvent) -> RecordedEvent {
        let mut events = self.events.write().await;
        let recorded = RecordedEvent {
            sequence: events.len() as u64 + 1,
            recorded_at: Utc::now(),
            event,
        };
        debug!(sequence = recorded.sequence, xp = recorded.event.xp(), "ledger event appended");
        events.push(recorded.clone());
        recorded
    }

    pub async fn events(&self) -> Vec<RecordedEvent> {
        self.events.read().await.clone()
    }

    pub async fn projection(&self) -> LedgerProjection {
        let events = self.events.read().await;
        LedgerProjection::replay(events.iter().map(|recorded| &recorded.event))
    }
}
