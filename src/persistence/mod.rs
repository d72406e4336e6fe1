use uuid::Uuid;

use crate::domain::{GameSummary, MoveRecord};

/// External storage for finished matches and their move logs.
///
/// Gameplay never depends on a recorder succeeding; callers log failures
/// and carry on.
#[async_trait::async_trait]
pub trait GameRecorder: Send + Sync {
    /// Store one move as soon as it resolves.
    async fn save_move(&mut self, match_id: Uuid, record: MoveRecord) -> anyhow::Result<()>;
    /// Store the summary once the match is over.
    async fn save_summary(&mut self, match_id: Uuid, summary: GameSummary) -> anyhow::Result<()>;
}

/// Recorder that drops everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRecorder;

#[async_trait::async_trait]
impl GameRecorder for NullRecorder {
    async fn save_move(&mut self, _match_id: Uuid, _record: MoveRecord) -> anyhow::Result<()> {
        Ok(())
    }

    async fn save_summary(&mut self, _match_id: Uuid, _summary: GameSummary) -> anyhow::Result<()> {
        Ok(())
    }
}

pub mod file;
pub mod memory;

pub use file::{read_history, FileRecorder};
pub use memory::MemoryRecorder;
