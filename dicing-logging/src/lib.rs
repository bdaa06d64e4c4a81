//! dicing-logging: session snapshots + NDJSON round logs.
//!
//! Two host-facing concerns live here: a versioned on-disk snapshot giving
//! sessions a simple state round-trip, and append-only NDJSON round records
//! for post-mortems of a session.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use dicing_core::{Phase, RoundOutcome, SessionState, Side};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Session snapshot schema version.
pub const SNAPSHOT_VERSION: u32 = 1;

pub fn now_ms() -> u64 {
    let d = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    d.as_millis() as u64
}

#[derive(Debug)]
pub enum LogError {
    Io(io::Error),
    Json(serde_json::Error),
    /// The snapshot on disk carries a schema version this build cannot read.
    SnapshotVersion(u32),
}

impl From<io::Error> for LogError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for LogError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

/// Versioned on-disk session snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshotV1 {
    pub snapshot_version: u32,
    pub saved_ts_ms: u64,
    pub state: SessionState,
}

/// Read a snapshot back into the session state it captured.
pub fn read_snapshot(path: impl AsRef<Path>) -> Result<SessionState, LogError> {
    let bytes = std::fs::read(path)?;
    let snap = serde_json::from_slice::<SessionSnapshotV1>(&bytes)?;
    if snap.snapshot_version != SNAPSHOT_VERSION {
        return Err(LogError::SnapshotVersion(snap.snapshot_version));
    }
    Ok(snap.state)
}

/// Write a snapshot via a temp file + rename, so a crash mid-write never
/// leaves a torn snapshot behind.
pub fn write_snapshot_atomic(path: impl AsRef<Path>, state: &SessionState) -> Result<(), LogError> {
    let path = path.as_ref();
    let tmp = path.with_extension("json.tmp");
    let snap = SessionSnapshotV1 {
        snapshot_version: SNAPSHOT_VERSION,
        saved_ts_ms: now_ms(),
        state: *state,
    };
    let bytes = serde_json::to_vec_pretty(&snap)?;
    std::fs::write(&tmp, bytes)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}

/// One NDJSON record per scored round: the post-transition state dump.
///
/// Totals are authoritative (a continued round has already re-rolled the
/// hands); per-round deltas fall out of diffing consecutive records.
#[derive(Debug, Clone, Serialize)]
pub struct RoundEventV1 {
    pub event: &'static str,
    pub ts_ms: u64,
    pub player_hand: [u8; 5],
    pub computer_hand: [u8; 5],
    pub player_total: u32,
    pub computer_total: u32,
    /// "continues", "tie_breaker_pending", "tied", "player_won",
    /// "computer_won", or "finished".
    pub outcome: &'static str,
}

impl RoundEventV1 {
    /// Build the record for a session state, typically right after `Score`.
    pub fn from_state(state: &SessionState) -> Self {
        let outcome = match state.phase {
            Phase::Rolling => "continues",
            Phase::Resolved { outcome } => match outcome {
                RoundOutcome::TieBreakerPending => "tie_breaker_pending",
                RoundOutcome::Tied => "tied",
                RoundOutcome::Won { side: Side::Player } => "player_won",
                RoundOutcome::Won {
                    side: Side::Computer,
                } => "computer_won",
            },
            Phase::Finished => "finished",
        };
        Self {
            event: "round_scored",
            ts_ms: now_ms(),
            player_hand: state.player.hand,
            computer_hand: state.computer.hand,
            player_total: state.player.total,
            computer_total: state.computer.total,
            outcome,
        }
    }
}

/// Append-only NDJSON writer.
///
/// Contract: each call writes exactly one JSON object followed by a newline.
pub struct NdjsonWriter {
    w: BufWriter<File>,
    lines_since_flush: u64,
    flush_every_lines: u64,
}

impl NdjsonWriter {
    /// Open a file for append. Creates it if it doesn't exist.
    pub fn open_append(path: impl AsRef<Path>) -> Result<Self, LogError> {
        Self::open_append_with_flush(path, 0)
    }

    /// `flush_every_lines=0` disables periodic flushing.
    pub fn open_append_with_flush(
        path: impl AsRef<Path>,
        flush_every_lines: u64,
    ) -> Result<Self, LogError> {
        let f = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            w: BufWriter::new(f),
            lines_since_flush: 0,
            flush_every_lines,
        })
    }

    pub fn write_event<T: Serialize>(&mut self, event: &T) -> Result<(), LogError> {
        let mut buf = serde_json::to_vec(event)?;
        buf.push(b'\n');
        self.w.write_all(&buf)?;
        self.lines_since_flush += 1;
        if self.flush_every_lines > 0 && self.lines_since_flush >= self.flush_every_lines {
            self.flush()?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), LogError> {
        self.w.flush()?;
        self.lines_since_flush = 0;
        Ok(())
    }
}
