//! Сборка и выпуск RAP-файла: идентичность из шлюза БД, заголовок с
//! обменом ролей, регистрация, DER-кодирование, выгрузка на FTP.
//!
//! Порядок шагов фиксирован: запись в БД предшествует кодированию;
//! неудачная выгрузка не откатывает ни запись, ни локальный файл.

use crate::config::Config;
use crate::error::{Result, TapRapError};
use crate::formats::der::RapDer;
use crate::formats::octets::encode_int64_as_octets;
use crate::model::DateTimeStamp;
use crate::rap::{RapAuditControlInfo, RapBatchControlInfo, ReturnBatch, ReturnDetail};
use crate::traits::{FileStatus, RapStore, RapUpload, WriteFormat};
use std::fs::File;
use tracing::{error, info};

/// Идентичность выпущенного RAP-файла, наблюдаемая после валидации.
#[derive(Debug, Clone, PartialEq)]
pub struct RapIdentity {
    pub file_id: i64,
    pub sequence_num: String,
}

pub struct RapFile<'a, S: RapStore, U: RapUpload> {
    store: &'a mut S,
    upload: &'a U,
    config: &'a Config,
}

impl<'a, S: RapStore, U: RapUpload> RapFile<'a, S, U> {
    pub fn new(store: &'a mut S, upload: &'a U, config: &'a Config) -> Self {
        RapFile {
            store,
            upload,
            config,
        }
    }

    /// Выпускает Return Batch с единственной записью `return_detail`.
    ///
    /// `sender`/`recipient` — роли из входного файла; в заголовке RAP они
    /// меняются местами ровно один раз.
    pub fn build_and_emit(
        &mut self,
        return_detail: ReturnDetail,
        sender: &str,
        recipient: &str,
        tap_available_stamp: &str,
        file_type_indicator: Option<&str>,
    ) -> Result<RapIdentity> {
        let is_test = file_type_indicator.is_some_and(|v| !v.is_empty());
        let alloc = self
            .store
            .create_rap_file(recipient, is_test, tap_available_stamp)?;

        let stamp = DateTimeStamp::new(&alloc.timestamp, &alloc.utc_offset);
        let batch = ReturnBatch {
            rap_batch_control_info: RapBatchControlInfo {
                // отправитель и получатель меняются местами
                sender: recipient.to_string(),
                recipient: sender.to_string(),
                rap_file_sequence_number: alloc.sequence_num.clone(),
                rap_file_creation_time_stamp: stamp.clone(),
                rap_file_available_time_stamp: stamp,
                rap_specification_version_number: alloc.rap_version,
                rap_release_version_number: alloc.rap_release,
                specification_version_number: Some(alloc.tap_version),
                release_version_number: Some(alloc.tap_release),
                file_type_indicator: file_type_indicator
                    .filter(|v| !v.is_empty())
                    .map(str::to_string),
                tap_decimal_places: Some(alloc.tap_decimal_places),
                operator_spec_information: None,
            },
            return_details: vec![return_detail],
            rap_audit_control_info: RapAuditControlInfo {
                total_severe_return_value: encode_int64_as_octets(0)?,
                // для фатальных ошибок запись всегда одна
                return_details_count: 1,
                operator_spec_information: None,
            },
        };

        self.store.load_return_batch(
            &batch,
            alloc.file_id,
            &alloc.filename,
            FileStatus::CreatedAndSent,
        )?;

        let full_path = self.config.output_directory().join(&alloc.filename);
        let out = File::create(&full_path).map_err(|e| {
            TapRapError::File(format!(
                "unable to open file {} for writing: {e}",
                full_path.display()
            ))
        })?;
        RapDer::write(out, &batch)?;
        info!(
            filename = %alloc.filename,
            "RAP file successfully created for roaming hub {}",
            alloc.roaming_hub_name
        );

        match self.config.ftp_setting(&alloc.roaming_hub_name) {
            Some(setting) => {
                match self.upload.upload(&alloc.filename, &full_path, setting) {
                    Ok(()) => info!(
                        filename = %alloc.filename,
                        "successful upload to FTP server {}",
                        setting.server
                    ),
                    // запись в БД и локальный файл остаются
                    Err(e) => error!(
                        filename = %alloc.filename,
                        "error while uploading to FTP server {}: {e}",
                        setting.server
                    ),
                }
            }
            None => info!(
                filename = %alloc.filename,
                "FTP server is not set in config for roaming hub {}, no uploading done",
                alloc.roaming_hub_name
            ),
        }

        Ok(RapIdentity {
            file_id: alloc.file_id,
            sequence_num: alloc.sequence_num,
        })
    }
}
