//! Швы к внешним участникам: форматы ввода/вывода, шлюз БД, транспорт.

use crate::{config::FtpSetting, error::Result, model::DataInterchange, rap::ReturnBatch};
use std::io::{BufRead, Write};
use std::path::Path;

pub trait ReadFormat {
    fn read<R: BufRead>(r: R) -> Result<DataInterchange>;
}

pub trait WriteFormat {
    fn write<W: Write>(w: W, batch: &ReturnBatch) -> Result<()>;
}

/// Результат хранимой процедуры выделения RAP-идентичности.
#[derive(Debug, Clone, PartialEq)]
pub struct RapAllocation {
    pub filename: String,
    pub sequence_num: String,
    pub mobile_network_id: i64,
    pub roaming_hub_id: i64,
    pub roaming_hub_name: String,
    pub timestamp: String,
    pub utc_offset: String,
    pub tap_version: i64,
    pub tap_release: i64,
    pub rap_version: i64,
    pub rap_release: i64,
    pub tap_decimal_places: i64,
    pub file_id: i64,
}

/// Статус исходящего файла в учётной записи шлюза.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    Created,
    CreatedAndSent,
}

/// Шлюз БД: выделение RAP-идентичности и регистрация выпущенного файла.
pub trait RapStore {
    /// Выделяет имя файла, номера и параметры версий для нового RAP-файла.
    fn create_rap_file(
        &mut self,
        recipient_tap_code: &str,
        is_test: bool,
        tap_available_stamp: &str,
    ) -> Result<RapAllocation>;

    /// Регистрирует сформированный Return Batch за выделенной идентичностью.
    fn load_return_batch(
        &mut self,
        batch: &ReturnBatch,
        file_id: i64,
        filename: &str,
        status: FileStatus,
    ) -> Result<()>;
}

/// Исходящий транспорт готового RAP-файла.
pub trait RapUpload {
    fn upload(&self, filename: &str, local_path: &Path, setting: &FtpSetting) -> Result<()>;
}
