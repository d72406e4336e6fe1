use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::vec::Vec;

use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::domain::{GameSummary, MatchRecord, MoveRecord};
use crate::persistence::GameRecorder;

/// Maximum size of one stored match frame (1 MB).
const MAX_RECORD_SIZE: u32 = 1_000_000;

/// Appends each finished match to a file as a length-prefixed bincode frame.
///
/// Moves are buffered per match until its summary arrives, so the file
/// only ever holds complete matches. Only one match is in flight at a time:
/// the first move of a new match discards whatever an abandoned one left.
pub struct FileRecorder {
    path: PathBuf,
    pending: HashMap<Uuid, Vec<MoveRecord>>,
}

impl FileRecorder {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            pending: HashMap::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of matches with buffered moves and no summary yet.
    pub fn pending_matches(&self) -> usize {
        self.pending.len()
    }
}

/// Encode one match as `[u32 big-endian length][bincode payload]`.
pub fn encode_record(record: &MatchRecord) -> anyhow::Result<Vec<u8>> {
    let data = bincode::serialize(record).map_err(|e| anyhow::anyhow!("Serialization error: {}", e))?;
    if data.len() as u32 > MAX_RECORD_SIZE {
        return Err(anyhow::anyhow!(
            "Record too large: {} bytes (max: {})",
            data.len(),
            MAX_RECORD_SIZE
        ));
    }
    let mut frame = Vec::with_capacity(4 + data.len());
    frame.extend_from_slice(&(data.len() as u32).to_be_bytes());
    frame.extend_from_slice(&data);
    Ok(frame)
}

/// Decode every frame in `bytes`.
pub fn decode_records(mut bytes: &[u8]) -> anyhow::Result<Vec<MatchRecord>> {
    let mut records = Vec::new();
    while !bytes.is_empty() {
        if bytes.len() < 4 {
            return Err(anyhow::anyhow!("Truncated record header"));
        }
        let len = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        if len == 0 || len > MAX_RECORD_SIZE {
            return Err(anyhow::anyhow!("Invalid record length: {}", len));
        }
        let end = 4 + len as usize;
        if bytes.len() < end {
            return Err(anyhow::anyhow!("Truncated record: expected {} bytes", len));
        }
        let record = bincode::deserialize(&bytes[4..end])
            .map_err(|e| anyhow::anyhow!("Deserialization error: {}", e))?;
        records.push(record);
        bytes = &bytes[end..];
    }
    Ok(records)
}

/// Read back every match stored at `path`. A missing file holds no matches.
pub async fn read_history(path: impl AsRef<Path>) -> anyhow::Result<Vec<MatchRecord>> {
    match tokio::fs::read(path.as_ref()).await {
        Ok(bytes) => decode_records(&bytes),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(anyhow::anyhow!("Read error: {}", e)),
    }
}

#[async_trait::async_trait]
impl GameRecorder for FileRecorder {
    async fn save_move(&mut self, match_id: Uuid, record: MoveRecord) -> anyhow::Result<()> {
        if !self.pending.contains_key(&match_id) && !self.pending.is_empty() {
            log::debug!("dropping {} abandoned match(es)", self.pending.len());
            self.pending.clear();
        }
        self.pending.entry(match_id).or_default().push(record);
        Ok(())
    }

    async fn save_summary(&mut self, match_id: Uuid, summary: GameSummary) -> anyhow::Result<()> {
        let moves = self.pending.remove(&match_id).unwrap_or_default();
        let frame = encode_record(&MatchRecord {
            match_id,
            summary,
            moves,
        })?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| anyhow::anyhow!("Open error for {}: {}", self.path.display(), e))?;
        file.write_all(&frame)
            .await
            .map_err(|e| anyhow::anyhow!("Write error: {}", e))?;
        file.flush().await?;
        Ok(())
    }
}
