//! Доменные модели стороны RAP: дерево Return Batch по TD.32.
//!
//! Копии ошибочного контекста — глубокие клоны входных групп, поэтому
//! Return Batch владеет своими данными целиком.

use serde::{Deserialize, Serialize};

use crate::model::{
    AccountingInfo, AuditControlInfo, BatchControlInfo, DateTimeStamp, NetworkInfo, OctetString,
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReturnBatch {
    pub rap_batch_control_info: RapBatchControlInfo,
    pub return_details: Vec<ReturnDetail>,
    pub rap_audit_control_info: RapAuditControlInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RapBatchControlInfo {
    pub sender: String,
    pub recipient: String,
    pub rap_file_sequence_number: String,
    pub rap_file_creation_time_stamp: DateTimeStamp,
    pub rap_file_available_time_stamp: DateTimeStamp,
    pub rap_specification_version_number: i64,
    pub rap_release_version_number: i64,
    pub specification_version_number: Option<i64>,
    pub release_version_number: Option<i64>,
    pub file_type_indicator: Option<String>,
    pub tap_decimal_places: Option<i64>,
    pub operator_spec_information: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum ReturnDetail {
    Fatal(FatalReturn),
    Severe(SevereReturn),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FatalReturn {
    pub file_sequence_number: String,
    pub error: FatalError,
}

/// Где именно в дереве Transfer Batch найдена фатальная ошибка.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum FatalError {
    TransferBatch(TransferBatchError),
    BatchControl(BatchControlError),
    Accounting(AccountingInfoError),
    Network(NetworkInfoError),
    AuditControl(AuditControlInfoError),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransferBatchError {
    pub error_detail: Vec<ErrorDetail>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BatchControlError {
    pub batch_control_info: BatchControlInfo,
    pub error_detail: Vec<ErrorDetail>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccountingInfoError {
    pub accounting_info: AccountingInfo,
    pub error_detail: Vec<ErrorDetail>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NetworkInfoError {
    pub network_info: NetworkInfo,
    pub error_detail: Vec<ErrorDetail>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuditControlInfoError {
    pub audit_control_info: AuditControlInfo,
    pub error_detail: Vec<ErrorDetail>,
}

/// Заготовка Severe-возврата: валидатор её пока не порождает, но тип и
/// кодек её поддерживают (TD.52 требует Operator Specific Information для
/// IOT-ошибок).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SevereReturn {
    pub file_sequence_number: String,
    pub operator_spec_information: Option<Vec<String>>,
    pub error_detail: Vec<ErrorDetail>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorDetail {
    pub error_code: i64,
    pub error_context: Vec<ErrorContext>,
}

/// Шаг пути от корня Transfer Batch к ошибочному элементу.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorContext {
    pub path_item_id: u32,
    pub item_level: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RapAuditControlInfo {
    pub total_severe_return_value: OctetString,
    pub return_details_count: i64,
    pub operator_spec_information: Option<Vec<String>>,
}
