//! Slot-indexed save files.
//!
//! Each slot is a single JSON file `slot_{n}.json` wrapping the full game
//! state with a save id and timestamp. Listing reads every slot file, so
//! keep slot counts small (this is a save menu, not a database).

use anyhow::{Context, Result};
use burgeria_core::GameState;
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Save id in the form `save_{uuid}`. The uuid bytes come from the run's
/// rng, so a fixed seed yields a reproducible id.
fn new_save_id(rng: &mut impl Rng) -> String {
    let bytes: [u8; 16] = rng.gen();
    let uuid = uuid::Builder::from_random_bytes(bytes).into_uuid();
    format!("save_{uuid}")
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveSlot {
    pub save_id: String,
    pub saved_at: DateTime<Utc>,
    pub state: GameState,
}

/// What a save menu shows without deserializing the whole state twice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveSummary {
    pub slot: u32,
    pub save_id: String,
    pub saved_at: DateTime<Utc>,
    pub day: u32,
    pub balance: i64,
}

fn slot_path(dir: &Path, slot: u32) -> PathBuf {
    dir.join(format!("slot_{slot}.json"))
}

fn summarize(slot: u32, save: &SaveSlot) -> SaveSummary {
    SaveSummary {
        slot,
        save_id: save.save_id.clone(),
        saved_at: save.saved_at,
        day: save.state.day,
        balance: save.state.balance,
    }
}

pub fn save_state(
    dir: &Path,
    slot: u32,
    state: &GameState,
    rng: &mut impl Rng,
) -> Result<SaveSummary> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("creating save directory {}", dir.display()))?;
    let save = SaveSlot {
        save_id: new_save_id(rng),
        saved_at: Utc::now(),
        state: state.clone(),
    };
    let path = slot_path(dir, slot);
    let json = serde_json::to_string_pretty(&save).context("serializing save")?;
    std::fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
    Ok(summarize(slot, &save))
}

pub fn load_save(dir: &Path, slot: u32) -> Result<SaveSlot> {
    let path = slot_path(dir, slot);
    let json = std::fs::read_to_string(&path)
        .with_context(|| format!("reading save slot {slot} at {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("parsing {}", path.display()))
}

/// Summaries for every readable slot file, ordered by slot number.
pub fn list_saves(dir: &Path) -> Result<Vec<SaveSummary>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }
    let mut summaries = Vec::new();
    let entries =
        std::fs::read_dir(dir).with_context(|| format!("listing saves in {}", dir.display()))?;
    for entry in entries {
        let entry = entry.with_context(|| format!("listing saves in {}", dir.display()))?;
        let name = entry.file_name();
        let Some(slot) = name
            .to_str()
            .and_then(|n| n.strip_prefix("slot_"))
            .and_then(|n| n.strip_suffix(".json"))
            .and_then(|n| n.parse::<u32>().ok())
        else {
            continue;
        };
        let save = load_save(dir, slot)?;
        summaries.push(summarize(slot, &save));
    }
    summaries.sort_by_key(|s| s.slot);
    Ok(summaries)
}

/// Removes a slot file. Returns false when the slot was already empty.
pub fn delete_save(dir: &Path, slot: u32) -> Result<bool> {
    let path = slot_path(dir, slot);
    if !path.exists() {
        return Ok(false);
    }
    std::fs::remove_file(&path).with_context(|| format!("deleting {}", path.display()))?;
    Ok(true)
}
