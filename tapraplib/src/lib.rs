//! tapraplib — структурная проверка TAP-файлов (GSMA TD.57) и формирование
//! возвратных RAP-файлов (TD.32): валидатор, пробы контента, сборщик
//! Return Batch, DER-кодек.

pub mod asn;
pub mod codes;
pub mod config;
pub mod error;
pub mod model;
pub mod probes;
pub mod rap;
pub mod rapfile;
pub mod traits;
pub mod validate;

pub mod formats {
    pub mod der;
    pub mod json;
    pub mod octets;
}

pub use config::{Config, FtpSetting};
pub use error::{Result, TapRapError};
pub use rapfile::{RapFile, RapIdentity};
pub use traits::{FileStatus, RapAllocation, RapStore, RapUpload, ReadFormat, WriteFormat};
pub use validate::{TapValidator, ValidationResult};
