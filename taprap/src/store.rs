//! Локальный распределитель RAP-идентичностей: JSON-файл состояния со
//! счётчиками и параметрами версий вместо хранимой процедуры БД.

use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tapraplib::{
    error::{Result, TapRapError},
    rap::ReturnBatch,
    traits::{FileStatus, RapAllocation, RapStore},
};

#[derive(Debug, Serialize, Deserialize)]
struct StoreState {
    next_file_id: i64,
    next_sequence_num: i64,
    mobile_network_id: i64,
    roaming_hub_id: i64,
    roaming_hub_name: String,
    utc_offset: String,
    tap_version: i64,
    tap_release: i64,
    rap_version: i64,
    rap_release: i64,
    tap_decimal_places: i64,
    #[serde(default)]
    files: Vec<FileRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
struct FileRecord {
    file_id: i64,
    filename: String,
    status: String,
    return_details_count: i64,
}

impl Default for StoreState {
    fn default() -> Self {
        StoreState {
            next_file_id: 1,
            next_sequence_num: 1,
            mobile_network_id: 1,
            roaming_hub_id: 1,
            roaming_hub_name: String::new(),
            utc_offset: "+0000".into(),
            tap_version: 3,
            tap_release: 12,
            rap_version: 1,
            rap_release: 5,
            tap_decimal_places: 6,
            files: Vec::new(),
        }
    }
}

pub struct LocalRapStore {
    path: PathBuf,
    state: StoreState,
}

impl LocalRapStore {
    pub fn open(path: &Path) -> Result<LocalRapStore> {
        let state = match fs::read_to_string(path) {
            Ok(text) => serde_json::from_str(&text)
                .map_err(|e| TapRapError::Store(format!("state file {}: {e}", path.display())))?,
            Err(_) => StoreState::default(),
        };
        Ok(LocalRapStore {
            path: path.to_path_buf(),
            state,
        })
    }

    fn persist(&self) -> Result<()> {
        let text = serde_json::to_string_pretty(&self.state)
            .map_err(|e| TapRapError::Store(e.to_string()))?;
        fs::write(&self.path, text)?;
        Ok(())
    }
}

impl RapStore for LocalRapStore {
    fn create_rap_file(
        &mut self,
        recipient_tap_code: &str,
        is_test: bool,
        _tap_available_stamp: &str,
    ) -> Result<RapAllocation> {
        let file_id = self.state.next_file_id;
        let sequence = self.state.next_sequence_num;
        self.state.next_file_id += 1;
        self.state.next_sequence_num += 1;

        let sequence_num = format!("{sequence:05}");
        let prefix = if is_test { "RT" } else { "RC" };
        let filename = format!("{prefix}{recipient_tap_code}{sequence_num}");
        self.persist()?;

        Ok(RapAllocation {
            filename,
            sequence_num,
            mobile_network_id: self.state.mobile_network_id,
            roaming_hub_id: self.state.roaming_hub_id,
            roaming_hub_name: self.state.roaming_hub_name.clone(),
            timestamp: Local::now().format("%Y%m%d%H%M%S").to_string(),
            utc_offset: self.state.utc_offset.clone(),
            tap_version: self.state.tap_version,
            tap_release: self.state.tap_release,
            rap_version: self.state.rap_version,
            rap_release: self.state.rap_release,
            tap_decimal_places: self.state.tap_decimal_places,
            file_id,
        })
    }

    fn load_return_batch(
        &mut self,
        batch: &ReturnBatch,
        file_id: i64,
        filename: &str,
        status: FileStatus,
    ) -> Result<()> {
        let status = match status {
            FileStatus::Created => "CREATED",
            FileStatus::CreatedAndSent => "CREATED_AND_SENT",
        };
        self.state.files.push(FileRecord {
            file_id,
            filename: filename.to_string(),
            status: status.to_string(),
            return_details_count: batch.return_details.len() as i64,
        });
        self.persist()
    }
}
