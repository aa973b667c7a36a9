//! Структурный валидатор Data Interchange по требованиям TD.57.
//!
//! Обход детерминированный и короткозамкнутый: первая фатальная находка
//! формирует RAP-файл и завершает проверку. Порядок проверок на каждом
//! уровне фиксирован и является частью контракта — от него зависит, какой
//! код ошибки будет сообщён при нескольких дефектах сразу.

use crate::asn::{tag, Tag};
use crate::codes;
use crate::config::Config;
use crate::model::{CurrencyConversion, DataInterchange, Notification, TransferBatch};
use crate::probes;
use crate::rap::{
    AccountingInfoError, AuditControlInfoError, BatchControlError, ErrorContext, ErrorDetail,
    FatalError, FatalReturn, NetworkInfoError, ReturnDetail, TransferBatchError,
};
use crate::rapfile::RapFile;
use crate::traits::{RapStore, RapUpload};
use std::collections::HashSet;
use tracing::{error, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationResult {
    TapValid,
    FatalError,
    ValidationImpossible,
    WrongAddressee,
}

/// Уровень дерева, на котором найден дефект: выбирает структуру записи об
/// ошибке и элемент второго уровня в Error Context List.
#[derive(Debug, Clone, Copy)]
enum FaultScope {
    TransferBatch,
    BatchControl,
    Accounting,
    Network,
    AuditControl,
}

impl FaultScope {
    fn title(self) -> &'static str {
        match self {
            FaultScope::TransferBatch => "Transfer Batch",
            FaultScope::BatchControl => "Batch Control Info",
            FaultScope::Accounting => "Accounting Info",
            FaultScope::Network => "Network Info",
            FaultScope::AuditControl => "Audit Control Info",
        }
    }

    fn level2(self) -> Option<Tag> {
        match self {
            FaultScope::TransferBatch => None,
            FaultScope::BatchControl => Some(tag::BATCH_CONTROL_INFO),
            FaultScope::Accounting => Some(tag::ACCOUNTING_INFO),
            FaultScope::Network => Some(tag::NETWORK_INFO),
            FaultScope::AuditControl => Some(tag::AUDIT_CONTROL_INFO),
        }
    }
}

pub struct TapValidator<'a, S: RapStore, U: RapUpload> {
    store: &'a mut S,
    upload: &'a U,
    config: &'a Config,
    rap_file_id: i64,
    rap_sequence_num: String,
}

impl<'a, S: RapStore, U: RapUpload> TapValidator<'a, S, U> {
    pub fn new(store: &'a mut S, upload: &'a U, config: &'a Config) -> Self {
        TapValidator {
            store,
            upload,
            config,
            rap_file_id: 0,
            rap_sequence_num: String::new(),
        }
    }

    /// Диспетчер: выбирает путь проверки по варианту Data Interchange.
    pub fn validate(&mut self, interchange: &DataInterchange) -> ValidationResult {
        match interchange {
            DataInterchange::TransferBatch(batch) => self.validate_transfer_batch(batch),
            DataInterchange::Notification(notification) => {
                self.validate_notification(notification)
            }
        }
    }

    /// Идентичность выпущенного RAP-файла; 0 — файл не выпускался.
    pub fn rap_file_id(&self) -> i64 {
        self.rap_file_id
    }

    pub fn rap_sequence_num(&self) -> &str {
        &self.rap_sequence_num
    }

    fn validate_transfer_batch(&mut self, batch: &TransferBatch) -> ValidationResult {
        // без отправителя, получателя и номера файла RAP адресовать некому
        let Some(control) = batch.batch_control_info.as_ref() else {
            error!(
                "validation: Batch Control Info is missing in Transfer Batch, \
                 unable to create RAP file"
            );
            return ValidationResult::ValidationImpossible;
        };
        if control.sender.is_none()
            || control.recipient.is_none()
            || control.file_sequence_number.is_none()
        {
            error!(
                "validation: Sender, Recipient or FileSequenceNumber is missing \
                 in Batch Control Info, unable to create RAP file"
            );
            return ValidationResult::ValidationImpossible;
        }
        if let Some(recipient) = control.recipient.as_deref() {
            if !self.config.is_local_recipient(recipient) {
                warn!("validation: recipient {recipient} is not served by this network");
                return ValidationResult::WrongAddressee;
            }
        }

        if batch.accounting_info.is_none() {
            return self.fatal(
                batch,
                FaultScope::TransferBatch,
                codes::TF_BATCH_ACCOUNTING_INFO_MISSING,
                None,
                "Accounting Info missing in Transfer Batch",
            );
        }
        if batch.network_info.is_none() {
            return self.fatal(
                batch,
                FaultScope::TransferBatch,
                codes::TF_BATCH_NETWORK_INFO_MISSING,
                None,
                "Network Info missing in Transfer Batch",
            );
        }
        if batch.audit_control_info.is_none() {
            return self.fatal(
                batch,
                FaultScope::TransferBatch,
                codes::TF_BATCH_AUDIT_CONTROL_INFO_MISSING,
                None,
                "Audit Control Info missing in Transfer Batch",
            );
        }

        let result = self.validate_batch_control_info(batch);
        if result != ValidationResult::TapValid {
            return result;
        }
        let result = self.validate_accounting_info(batch);
        if result != ValidationResult::TapValid {
            return result;
        }
        let result = self.validate_network_info(batch);
        if result != ValidationResult::TapValid {
            return result;
        }
        let result = self.validate_audit_control_info(batch);
        if result != ValidationResult::TapValid {
            return result;
        }

        ValidationResult::TapValid
    }

    fn validate_batch_control_info(&mut self, batch: &TransferBatch) -> ValidationResult {
        let Some(control) = batch.batch_control_info.as_ref() else {
            return ValidationResult::ValidationImpossible;
        };
        if control.file_available_time_stamp.is_none() {
            return self.fatal(
                batch,
                FaultScope::BatchControl,
                codes::BATCH_CTRL_FILE_AVAIL_TIMESTAMP_MISSING,
                None,
                "fileAvailableTimeStamp is missing in Batch Control Info",
            );
        }
        if control.specification_version_number.is_none() {
            return self.fatal(
                batch,
                FaultScope::BatchControl,
                codes::BATCH_CTRL_SPEC_VERSION_MISSING,
                None,
                "specificationVersionNumber is missing in Batch Control Info",
            );
        }
        if control.transfer_cut_off_time_stamp.is_none() {
            return self.fatal(
                batch,
                FaultScope::BatchControl,
                codes::BATCH_CTRL_TRANSFER_CUTOFF_MISSING,
                None,
                "transferCutOffTimeStamp is missing in Batch Control Info",
            );
        }
        ValidationResult::TapValid
    }

    fn validate_accounting_info(&mut self, batch: &TransferBatch) -> ValidationResult {
        let Some(accounting) = batch.accounting_info.as_ref() else {
            return ValidationResult::ValidationImpossible;
        };
        if accounting.local_currency.is_none() {
            return self.fatal(
                batch,
                FaultScope::Accounting,
                codes::ACCOUNTING_LOCAL_CURRENCY_MISSING,
                None,
                "localCurrency is missing in Accounting Info",
            );
        }
        if accounting.tap_decimal_places.is_none() {
            return self.fatal(
                batch,
                FaultScope::Accounting,
                codes::ACCOUNTING_TAP_DECIMAL_PLACES_MISSING,
                None,
                "tapDecimalPlaces is missing in Accounting Info",
            );
        }
        if accounting.taxation.is_none() && probes::contains_taxes(batch) {
            return self.fatal(
                batch,
                FaultScope::Accounting,
                codes::ACCOUNTING_TAXATION_MISSING,
                None,
                "taxation group is missing in Accounting Info and batch contains taxes",
            );
        }
        if accounting.discounting.is_none() && probes::contains_discounts(batch) {
            return self.fatal(
                batch,
                FaultScope::Accounting,
                codes::ACCOUNTING_DISCOUNTING_MISSING,
                None,
                "discounting group is missing in Accounting Info and batch contains discounts",
            );
        }
        if accounting.currency_conversion_info.is_none()
            && probes::contains_positive_charges(batch)
        {
            return self.fatal(
                batch,
                FaultScope::Accounting,
                codes::ACCOUNTING_CURRENCY_CONVERSION_MISSING,
                None,
                "currencyConversion group is missing in Accounting Info and batch \
                 contains charges greater than 0",
            );
        }
        if let Some(conversions) = accounting.currency_conversion_info.as_ref() {
            return self.validate_currency_conversion(batch, conversions);
        }
        ValidationResult::TapValid
    }

    fn validate_currency_conversion(
        &mut self,
        batch: &TransferBatch,
        conversions: &[CurrencyConversion],
    ) -> ValidationResult {
        let mut exchange_rate_codes = HashSet::new();
        for row in conversions {
            let Some(code) = row.exchange_rate_code else {
                return self.fatal(
                    batch,
                    FaultScope::Accounting,
                    codes::CURRENCY_CONVERSION_EXRATE_CODE_MISSING,
                    Some(tag::CURRENCY_CONVERSION_LIST),
                    "mandatory item Exchange Rate Code missing within group \
                     Currency Conversion",
                );
            };
            if row.number_of_decimal_places.is_none() {
                return self.fatal(
                    batch,
                    FaultScope::Accounting,
                    codes::CURRENCY_CONVERSION_NUM_OF_DEC_PLACES_MISSING,
                    Some(tag::CURRENCY_CONVERSION_LIST),
                    "mandatory item Number Of Decimal Places missing within group \
                     Currency Conversion",
                );
            }
            if row.exchange_rate.is_none() {
                return self.fatal(
                    batch,
                    FaultScope::Accounting,
                    codes::CURRENCY_CONVERSION_EXCHANGE_RATE_MISSING,
                    Some(tag::CURRENCY_CONVERSION_LIST),
                    "mandatory item Exchange Rate missing within group Currency Conversion",
                );
            }
            if !exchange_rate_codes.insert(code) {
                return self.fatal(
                    batch,
                    FaultScope::Accounting,
                    codes::CURRENCY_CONVERSION_EXRATE_CODE_DUPLICATION,
                    Some(tag::CURRENCY_CONVERSION_LIST),
                    "more than one occurrence of group with same Exchange Rate Code \
                     within group Currency Conversion",
                );
            }
        }
        ValidationResult::TapValid
    }

    fn validate_network_info(&mut self, batch: &TransferBatch) -> ValidationResult {
        let Some(network) = batch.network_info.as_ref() else {
            return ValidationResult::ValidationImpossible;
        };
        if network.utc_time_offset_info.is_none() {
            return self.fatal(
                batch,
                FaultScope::Network,
                codes::NETWORK_UTC_TIMEOFFSET_MISSING,
                None,
                "utcTimeOffsetInfo is missing in Network Info",
            );
        }
        if network.rec_entity_info.is_none() {
            return self.fatal(
                batch,
                FaultScope::Network,
                codes::NETWORK_REC_ENTITY_MISSING,
                None,
                "recEntityInfo is missing in Network Info",
            );
        }
        ValidationResult::TapValid
    }

    fn validate_audit_control_info(&mut self, batch: &TransferBatch) -> ValidationResult {
        let Some(audit) = batch.audit_control_info.as_ref() else {
            return ValidationResult::ValidationImpossible;
        };
        if audit.total_charge.is_none() {
            return self.fatal(
                batch,
                FaultScope::AuditControl,
                codes::AUDIT_CTRL_TOTAL_CHARGE_MISSING,
                None,
                "totalCharge is missing in Audit Control Info",
            );
        }
        if audit.total_tax_value.is_none() {
            return self.fatal(
                batch,
                FaultScope::AuditControl,
                codes::AUDIT_CTRL_TOTAL_TAX_VALUE_MISSING,
                None,
                "totalTaxValue is missing in Audit Control Info",
            );
        }
        if audit.total_discount_value.is_none() {
            return self.fatal(
                batch,
                FaultScope::AuditControl,
                codes::AUDIT_CTRL_TOTAL_DISCOUNT_MISSING,
                None,
                "totalDiscountValue is missing in Audit Control Info",
            );
        }
        let Some(count) = audit.call_event_details_count else {
            return self.fatal(
                batch,
                FaultScope::AuditControl,
                codes::AUDIT_CTRL_CALL_COUNT_MISSING,
                None,
                "callEventDetailsCount is missing in Audit Control Info",
            );
        };
        if count != batch.call_event_details.len() as i64 {
            return self.fatal(
                batch,
                FaultScope::AuditControl,
                codes::CALL_COUNT_MISMATCH,
                Some(tag::CALL_EVENT_DETAILS_COUNT),
                "callEventDetailsCount does not match the count of Call Event Details",
            );
        }
        ValidationResult::TapValid
    }

    fn validate_notification(&mut self, notification: &Notification) -> ValidationResult {
        if notification.sender.is_none()
            || notification.recipient.is_none()
            || notification.file_sequence_number.is_none()
        {
            error!(
                "validation: Sender, Recipient or FileSequenceNumber is missing \
                 in Notification, unable to create RAP file"
            );
            return ValidationResult::ValidationImpossible;
        }
        if let Some(recipient) = notification.recipient.as_deref() {
            if !self.config.is_local_recipient(recipient) {
                warn!("validation: recipient {recipient} is not served by this network");
                return ValidationResult::WrongAddressee;
            }
        }
        ValidationResult::TapValid
    }

    /// Оформляет фатальную находку: запись об ошибке с путём из тегов схемы,
    /// выпуск RAP-файла, фиксация идентичности.
    fn fatal(
        &mut self,
        batch: &TransferBatch,
        scope: FaultScope,
        error_code: i64,
        level3: Option<Tag>,
        message: &str,
    ) -> ValidationResult {
        error!("validating {}: {message}, creating RAP file", scope.title());

        let Some(control) = batch.batch_control_info.as_ref() else {
            return ValidationResult::ValidationImpossible;
        };
        let detail = ReturnDetail::Fatal(FatalReturn {
            file_sequence_number: control.file_sequence_number.clone().unwrap_or_default(),
            error: fault_record(batch, scope, error_code, level3),
        });

        let sender = control.sender.as_deref().unwrap_or_default();
        let recipient = control.recipient.as_deref().unwrap_or_default();
        let available_stamp = control
            .file_available_time_stamp
            .as_ref()
            .and_then(|stamp| stamp.local_time_stamp.as_deref())
            .unwrap_or_default();

        let mut rap_file = RapFile::new(&mut *self.store, self.upload, self.config);
        match rap_file.build_and_emit(
            detail,
            sender,
            recipient,
            available_stamp,
            control.file_type_indicator.as_deref(),
        ) {
            Ok(identity) => {
                self.rap_file_id = identity.file_id;
                self.rap_sequence_num = identity.sequence_num;
                ValidationResult::FatalError
            }
            Err(e) => {
                error!("RAP file creation failed: {e}");
                ValidationResult::ValidationImpossible
            }
        }
    }
}

/// Запись об ошибке: глубокая копия ошибочного контекста плюс Error Detail
/// с путём `(path_item_id, item_level)` от корня Transfer Batch.
fn fault_record(
    batch: &TransferBatch,
    scope: FaultScope,
    error_code: i64,
    level3: Option<Tag>,
) -> FatalError {
    let mut context = vec![ErrorContext {
        path_item_id: tag::TRANSFER_BATCH.path_item_id(),
        item_level: 1,
    }];
    if let Some(level2) = scope.level2() {
        context.push(ErrorContext {
            path_item_id: level2.path_item_id(),
            item_level: 2,
        });
    }
    if let Some(level3) = level3 {
        context.push(ErrorContext {
            path_item_id: level3.path_item_id(),
            item_level: 3,
        });
    }
    let error_detail = vec![ErrorDetail {
        error_code,
        error_context: context,
    }];

    match scope {
        FaultScope::TransferBatch => FatalError::TransferBatch(TransferBatchError { error_detail }),
        FaultScope::BatchControl => FatalError::BatchControl(BatchControlError {
            batch_control_info: clone_or_default(&batch.batch_control_info),
            error_detail,
        }),
        FaultScope::Accounting => FatalError::Accounting(AccountingInfoError {
            accounting_info: clone_or_default(&batch.accounting_info),
            error_detail,
        }),
        FaultScope::Network => FatalError::Network(NetworkInfoError {
            network_info: clone_or_default(&batch.network_info),
            error_detail,
        }),
        FaultScope::AuditControl => FatalError::AuditControl(AuditControlInfoError {
            audit_control_info: clone_or_default(&batch.audit_control_info),
            error_detail,
        }),
    }
}

fn clone_or_default<T: Clone + Default>(value: &Option<T>) -> T {
    value.clone().unwrap_or_default()
}
