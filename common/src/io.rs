use anyhow::{Context, Result};
use std::{fs, path::Path};

use crate::protocol::SimSnapshot;

// ============================================================================
// Snapshot Encoding
// ============================================================================

// JSON wins when both encodings are compiled in, so `--features json` needs no
// `--no-default-features`.

#[cfg(feature = "json")]
pub fn encode_snapshot(snapshot: &SimSnapshot) -> Result<Vec<u8>> {
    serde_json::to_vec_pretty(snapshot).context("Failed to encode snapshot as JSON")
}

#[cfg(all(feature = "bincode", not(feature = "json")))]
pub fn encode_snapshot(snapshot: &SimSnapshot) -> Result<Vec<u8>> {
    bincode::encode_to_vec(snapshot, bincode::config::standard()).context("Failed to encode snapshot")
}

#[cfg(feature = "json")]
pub fn decode_snapshot(data: &[u8]) -> Result<SimSnapshot> {
    serde_json::from_slice(data).context("Failed to decode JSON snapshot")
}

#[cfg(all(feature = "bincode", not(feature = "json")))]
pub fn decode_snapshot(data: &[u8]) -> Result<SimSnapshot> {
    let (snapshot, _) =
        bincode::decode_from_slice(data, bincode::config::standard()).context("Failed to decode snapshot")?;
    Ok(snapshot)
}

#[cfg(any(feature = "json", feature = "bincode"))]
pub fn write_snapshot(path: &Path, snapshot: &SimSnapshot) -> Result<()> {
    let data = encode_snapshot(snapshot)?;
    fs::write(path, data).with_context(|| format!("Failed to write snapshot to {}", path.display()))
}

#[cfg(any(feature = "json", feature = "bincode"))]
pub fn read_snapshot(path: &Path) -> Result<SimSnapshot> {
    let data = fs::read(path).with_context(|| format!("Failed to read snapshot from {}", path.display()))?;
    decode_snapshot(&data)
}

#[cfg(all(test, any(feature = "json", feature = "bincode")))]
mod tests {
    use super::*;
    use crate::{
        level::LevelPhaseKind,
        protocol::{MissileId, MissileSnapshot, PlayerSnapshot, Position, SentinelId, SentinelSnapshot},
        sentinel::SentinelState,
    };

    fn sample() -> SimSnapshot {
        SimSnapshot {
            tick: 420,
            cycle: 2,
            phase: LevelPhaseKind::Playing,
            player: PlayerSnapshot {
                pos: Position::new(500.0, 340.0),
                mass_integrity: 0.7,
                infected: true,
                stunned: false,
                dead: false,
            },
            sentinels: vec![SentinelSnapshot {
                id: SentinelId(0),
                pos: Position::new(140.0, 100.0),
                awareness: 0.8,
                state: SentinelState::Critical,
            }],
            missiles: vec![MissileSnapshot {
                id: MissileId(3),
                pos: Position::new(300.0, 200.0),
            }],
            food: 4,
        }
    }

    #[test]
    fn snapshot_file_reads_back() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("snapshot.bin");
        let snapshot = sample();

        write_snapshot(&path, &snapshot).expect("write");
        assert_eq!(read_snapshot(&path).expect("read"), snapshot);
    }

    #[test]
    fn garbage_is_an_error_not_a_panic() {
        assert!(decode_snapshot(&[0xff, 0xfe, 0x00]).is_err());
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = read_snapshot(Path::new("/nonexistent/snapshot.bin")).expect_err("missing file");
        assert!(err.to_string().contains("/nonexistent/snapshot.bin"));
    }
}
