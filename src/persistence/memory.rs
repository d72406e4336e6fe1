use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::vec::Vec;

use uuid::Uuid;

use crate::domain::{GameSummary, MatchRecord, MoveRecord};
use crate::persistence::GameRecorder;

#[derive(Default)]
struct Inner {
    moves: HashMap<Uuid, Vec<MoveRecord>>,
    finished: Vec<MatchRecord>,
}

/// In-process recorder. Clones share the same storage, so a test can keep one
/// handle and give another to the controller.
#[derive(Clone, Default)]
pub struct MemoryRecorder {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves recorded so far for `match_id`, in arrival order.
    pub fn moves(&self, match_id: Uuid) -> Vec<MoveRecord> {
        let inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.moves.get(&match_id).cloned().unwrap_or_default()
    }

    /// Every match whose summary has been saved.
    pub fn finished(&self) -> Vec<MatchRecord> {
        let inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.finished.clone()
    }
}

#[async_trait::async_trait]
impl GameRecorder for MemoryRecorder {
    async fn save_move(&mut self, match_id: Uuid, record: MoveRecord) -> anyhow::Result<()> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|_| anyhow::anyhow!("recorder lock poisoned"))?;
        inner.moves.entry(match_id).or_default().push(record);
        Ok(())
    }

    async fn save_summary(&mut self, match_id: Uuid, summary: GameSummary) -> anyhow::Result<()> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|_| anyhow::anyhow!("recorder lock poisoned"))?;
        let moves = inner.moves.get(&match_id).cloned().unwrap_or_default();
        inner.finished.push(MatchRecord {
            match_id,
            summary,
            moves,
        });
        Ok(())
    }
}
