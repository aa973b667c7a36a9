//! Чтение декодированного Data Interchange из JSON.
//!
//! BER-декодер TAP-файлов живёт выше по конвейеру; сюда приходит уже
//! разобранное дерево.

use crate::{error::TapRapError, error::Result, model::DataInterchange, traits::ReadFormat};
use std::io::BufRead;

pub struct Json;

impl ReadFormat for Json {
    fn read<R: BufRead>(r: R) -> Result<DataInterchange> {
        serde_json::from_reader(r).map_err(|e| TapRapError::Json(e.to_string()))
    }
}
