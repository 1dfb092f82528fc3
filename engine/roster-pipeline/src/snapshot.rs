//! Durable roster snapshot file

use crate::error::Result;
use franchise_registry::RosterSnapshot;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write the snapshot to a temp file next to `path`, then rename it into
/// place so readers never see a partial file
pub fn write_snapshot(path: impl AsRef<Path>, snapshot: &RosterSnapshot) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let tmp = temp_path(path);
    {
        let file = File::create(&tmp)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, snapshot)?;
        writer.flush()?;
        writer.get_ref().sync_all()?;
    }
    std::fs::rename(&tmp, path)?;

    info!("Wrote snapshot with {} players to {:?}", snapshot.player_count(), path);
    Ok(())
}

/// Read a snapshot file
pub fn read_snapshot(path: impl AsRef<Path>) -> Result<RosterSnapshot> {
    let file = File::open(path.as_ref())?;
    let snapshot = serde_json::from_reader(BufReader::new(file))?;
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use franchise_registry::{CategoryRaw, RosterPlayer, Slot};
    use std::collections::BTreeMap;

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested").join("rosters.json");

        let mut franchises = BTreeMap::new();
        franchises.insert(
            "CHI".to_string(),
            vec![RosterPlayer {
                name: "Scottie Pippen".to_string(),
                years_with_team_label: "1987-1998".to_string(),
                years_with_team: 11,
                eligible_positions: vec![Slot::SF, Slot::PF],
                career_years: 17,
                championships: 6,
                category_raw: CategoryRaw::new(40.0, 110.0, 30000.0, 60.0),
            }],
        );
        let snapshot = RosterSnapshot::new(franchises);

        write_snapshot(&path, &snapshot).unwrap();
        assert!(!temp_path(&path).exists());

        let read = read_snapshot(&path).unwrap();
        assert_eq!(read.player_count(), 1);
        assert_eq!(read.franchises["CHI"][0].championships, 6);
    }

    #[test]
    fn test_missing_file_is_error() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(read_snapshot(dir.path().join("absent.json")).is_err());
    }
}
