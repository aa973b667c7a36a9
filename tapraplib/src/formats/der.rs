//! Запись Return Batch в ASN.1 DER по TD.32.
//!
//! Длины только определённые, INTEGER — кратчайшее two's-complement
//! (общий кодек с `octets`), номера тегов выше 30 пишутся длинной формой.

use crate::asn::{tag, Tag};
use crate::error::Result;
use crate::formats::octets::encode_int64_as_octets;
use crate::model::{
    AccountingInfo, AdvisedChargeValue, AuditControlInfo, BatchControlInfo, CurrencyConversion,
    DateTimeStamp, Discounting, NetworkInfo, OctetString, RecEntityInformation, Taxation,
    UtcTimeOffsetInfo,
};
use crate::rap::{
    AccountingInfoError, AuditControlInfoError, BatchControlError, ErrorContext, ErrorDetail,
    FatalError, FatalReturn, NetworkInfoError, RapAuditControlInfo, RapBatchControlInfo,
    ReturnBatch, ReturnDetail, SevereReturn, TransferBatchError,
};
use crate::traits::WriteFormat;
use std::io::Write;

pub struct RapDer;

impl WriteFormat for RapDer {
    fn write<W: Write>(mut w: W, batch: &ReturnBatch) -> Result<()> {
        let bytes = encode_return_batch(batch)?;
        w.write_all(&bytes)?;
        Ok(())
    }
}

/// Полный DER-образ Return Batch.
pub fn encode_return_batch(batch: &ReturnBatch) -> Result<Vec<u8>> {
    let mut content = Vec::new();
    rap_batch_control_info(&mut content, &batch.rap_batch_control_info)?;

    let mut details = Vec::new();
    for detail in &batch.return_details {
        return_detail(&mut details, detail)?;
    }
    field(&mut content, tag::RETURN_DETAIL_LIST, true, &details);

    rap_audit_control_info(&mut content, &batch.rap_audit_control_info)?;

    let mut out = Vec::new();
    field(&mut out, tag::RETURN_BATCH, true, &content);
    Ok(out)
}

// --- TLV-примитивы ---

fn field(out: &mut Vec<u8>, tag: Tag, constructed: bool, content: &[u8]) {
    identifier(out, tag, constructed);
    length(out, content.len());
    out.extend_from_slice(content);
}

fn identifier(out: &mut Vec<u8>, tag: Tag, constructed: bool) {
    let leading = tag.class.bits() | if constructed { 0x20 } else { 0x00 };
    if tag.number < 31 {
        out.push(leading | tag.number as u8);
        return;
    }
    out.push(leading | 0x1F);
    // base-128, старшие группы первыми, бит продолжения во всех кроме последней
    let mut groups = [0u8; 5];
    let mut n = tag.number;
    let mut count = 0;
    loop {
        groups[count] = (n & 0x7F) as u8;
        count += 1;
        n >>= 7;
        if n == 0 {
            break;
        }
    }
    for i in (1..count).rev() {
        out.push(groups[i] | 0x80);
    }
    out.push(groups[0]);
}

fn length(out: &mut Vec<u8>, len: usize) {
    if len < 128 {
        out.push(len as u8);
        return;
    }
    let bytes = len.to_be_bytes();
    let skip = bytes.iter().take_while(|&&b| b == 0).count();
    out.push(0x80 | (bytes.len() - skip) as u8);
    out.extend_from_slice(&bytes[skip..]);
}

fn str_field(out: &mut Vec<u8>, tag: Tag, value: &str) {
    field(out, tag, false, value.as_bytes());
}

fn int_field(out: &mut Vec<u8>, tag: Tag, value: i64) -> Result<()> {
    field(out, tag, false, &encode_int64_as_octets(value)?);
    Ok(())
}

fn opt_str_field(out: &mut Vec<u8>, tag: Tag, value: &Option<String>) {
    if let Some(v) = value {
        str_field(out, tag, v);
    }
}

fn opt_int_field(out: &mut Vec<u8>, tag: Tag, value: Option<i64>) -> Result<()> {
    if let Some(v) = value {
        int_field(out, tag, v)?;
    }
    Ok(())
}

fn opt_bytes_field(out: &mut Vec<u8>, tag: Tag, value: &Option<OctetString>) {
    if let Some(v) = value {
        field(out, tag, false, v);
    }
}

fn stamp_field(out: &mut Vec<u8>, outer: Tag, stamp: &DateTimeStamp) {
    let mut content = Vec::new();
    opt_str_field(&mut content, tag::LOCAL_TIME_STAMP, &stamp.local_time_stamp);
    opt_str_field(&mut content, tag::UTC_TIME_OFFSET, &stamp.utc_time_offset);
    field(out, outer, true, &content);
}

fn opt_stamp_field(out: &mut Vec<u8>, outer: Tag, stamp: &Option<DateTimeStamp>) {
    if let Some(s) = stamp {
        stamp_field(out, outer, s);
    }
}

fn opt_operator_spec(out: &mut Vec<u8>, value: &Option<Vec<String>>) {
    if let Some(lines) = value {
        let mut content = Vec::new();
        for line in lines {
            str_field(&mut content, tag::OPERATOR_SPEC_INFORMATION, line);
        }
        field(out, tag::OPERATOR_SPEC_INFO_LIST, true, &content);
    }
}

// --- RAP-заголовок и итоги ---

fn rap_batch_control_info(out: &mut Vec<u8>, info: &RapBatchControlInfo) -> Result<()> {
    let mut content = Vec::new();
    str_field(&mut content, tag::SENDER, &info.sender);
    str_field(&mut content, tag::RECIPIENT, &info.recipient);
    str_field(
        &mut content,
        tag::RAP_FILE_SEQUENCE_NUMBER,
        &info.rap_file_sequence_number,
    );
    stamp_field(
        &mut content,
        tag::RAP_FILE_CREATION_TIME_STAMP,
        &info.rap_file_creation_time_stamp,
    );
    stamp_field(
        &mut content,
        tag::RAP_FILE_AVAILABLE_TIME_STAMP,
        &info.rap_file_available_time_stamp,
    );
    int_field(
        &mut content,
        tag::RAP_SPECIFICATION_VERSION_NUMBER,
        info.rap_specification_version_number,
    )?;
    int_field(
        &mut content,
        tag::RAP_RELEASE_VERSION_NUMBER,
        info.rap_release_version_number,
    )?;
    opt_int_field(
        &mut content,
        tag::SPECIFICATION_VERSION_NUMBER,
        info.specification_version_number,
    )?;
    opt_int_field(
        &mut content,
        tag::RELEASE_VERSION_NUMBER,
        info.release_version_number,
    )?;
    opt_str_field(&mut content, tag::FILE_TYPE_INDICATOR, &info.file_type_indicator);
    opt_int_field(&mut content, tag::TAP_DECIMAL_PLACES, info.tap_decimal_places)?;
    opt_operator_spec(&mut content, &info.operator_spec_information);
    field(out, tag::RAP_BATCH_CONTROL_INFO, true, &content);
    Ok(())
}

fn rap_audit_control_info(out: &mut Vec<u8>, info: &RapAuditControlInfo) -> Result<()> {
    let mut content = Vec::new();
    field(
        &mut content,
        tag::TOTAL_SEVERE_RETURN_VALUE,
        false,
        &info.total_severe_return_value,
    );
    int_field(&mut content, tag::RETURN_DETAILS_COUNT, info.return_details_count)?;
    opt_operator_spec(&mut content, &info.operator_spec_information);
    field(out, tag::RAP_AUDIT_CONTROL_INFO, true, &content);
    Ok(())
}

// --- Return Detail ---

fn return_detail(out: &mut Vec<u8>, detail: &ReturnDetail) -> Result<()> {
    // CHOICE кодируется тегом выбранной альтернативы
    match detail {
        ReturnDetail::Fatal(fatal) => fatal_return(out, fatal),
        ReturnDetail::Severe(severe) => severe_return(out, severe),
    }
}

fn fatal_return(out: &mut Vec<u8>, fatal: &FatalReturn) -> Result<()> {
    let mut content = Vec::new();
    str_field(
        &mut content,
        tag::FILE_SEQUENCE_NUMBER,
        &fatal.file_sequence_number,
    );
    match &fatal.error {
        FatalError::TransferBatch(e) => transfer_batch_error(&mut content, e)?,
        FatalError::BatchControl(e) => batch_control_error(&mut content, e)?,
        FatalError::Accounting(e) => accounting_info_error(&mut content, e)?,
        FatalError::Network(e) => network_info_error(&mut content, e)?,
        FatalError::AuditControl(e) => audit_control_info_error(&mut content, e)?,
    }
    field(out, tag::FATAL_RETURN, true, &content);
    Ok(())
}

fn severe_return(out: &mut Vec<u8>, severe: &SevereReturn) -> Result<()> {
    let mut content = Vec::new();
    str_field(
        &mut content,
        tag::FILE_SEQUENCE_NUMBER,
        &severe.file_sequence_number,
    );
    opt_operator_spec(&mut content, &severe.operator_spec_information);
    error_detail_list(&mut content, &severe.error_detail)?;
    field(out, tag::SEVERE_RETURN, true, &content);
    Ok(())
}

fn transfer_batch_error(out: &mut Vec<u8>, error: &TransferBatchError) -> Result<()> {
    let mut content = Vec::new();
    error_detail_list(&mut content, &error.error_detail)?;
    field(out, tag::TRANSFER_BATCH_ERROR, true, &content);
    Ok(())
}

fn batch_control_error(out: &mut Vec<u8>, error: &BatchControlError) -> Result<()> {
    let mut content = Vec::new();
    batch_control_info(&mut content, &error.batch_control_info)?;
    error_detail_list(&mut content, &error.error_detail)?;
    field(out, tag::BATCH_CONTROL_ERROR, true, &content);
    Ok(())
}

fn accounting_info_error(out: &mut Vec<u8>, error: &AccountingInfoError) -> Result<()> {
    let mut content = Vec::new();
    accounting_info(&mut content, &error.accounting_info)?;
    error_detail_list(&mut content, &error.error_detail)?;
    field(out, tag::ACCOUNTING_INFO_ERROR, true, &content);
    Ok(())
}

fn network_info_error(out: &mut Vec<u8>, error: &NetworkInfoError) -> Result<()> {
    let mut content = Vec::new();
    network_info(&mut content, &error.network_info)?;
    error_detail_list(&mut content, &error.error_detail)?;
    field(out, tag::NETWORK_INFO_ERROR, true, &content);
    Ok(())
}

fn audit_control_info_error(out: &mut Vec<u8>, error: &AuditControlInfoError) -> Result<()> {
    let mut content = Vec::new();
    audit_control_info(&mut content, &error.audit_control_info)?;
    error_detail_list(&mut content, &error.error_detail)?;
    field(out, tag::AUDIT_CONTROL_INFO_ERROR, true, &content);
    Ok(())
}

fn error_detail_list(out: &mut Vec<u8>, details: &[ErrorDetail]) -> Result<()> {
    let mut content = Vec::new();
    for detail in details {
        error_detail(&mut content, detail)?;
    }
    field(out, tag::ERROR_DETAIL_LIST, true, &content);
    Ok(())
}

fn error_detail(out: &mut Vec<u8>, detail: &ErrorDetail) -> Result<()> {
    let mut content = Vec::new();
    int_field(&mut content, tag::ERROR_CODE, detail.error_code)?;
    let mut contexts = Vec::new();
    for context in &detail.error_context {
        error_context(&mut contexts, context)?;
    }
    field(&mut content, tag::ERROR_CONTEXT_LIST, true, &contexts);
    field(out, tag::ERROR_DETAIL, true, &content);
    Ok(())
}

fn error_context(out: &mut Vec<u8>, context: &ErrorContext) -> Result<()> {
    let mut content = Vec::new();
    int_field(&mut content, tag::PATH_ITEM_ID, i64::from(context.path_item_id))?;
    int_field(&mut content, tag::ITEM_LEVEL, context.item_level)?;
    field(out, tag::ERROR_CONTEXT, true, &content);
    Ok(())
}

// --- Копии групп TAP внутри записей об ошибках ---

fn batch_control_info(out: &mut Vec<u8>, info: &BatchControlInfo) -> Result<()> {
    let mut content = Vec::new();
    opt_str_field(&mut content, tag::SENDER, &info.sender);
    opt_str_field(&mut content, tag::RECIPIENT, &info.recipient);
    opt_str_field(&mut content, tag::FILE_SEQUENCE_NUMBER, &info.file_sequence_number);
    opt_stamp_field(
        &mut content,
        tag::FILE_CREATION_TIME_STAMP,
        &info.file_creation_time_stamp,
    );
    opt_stamp_field(
        &mut content,
        tag::TRANSFER_CUT_OFF_TIME_STAMP,
        &info.transfer_cut_off_time_stamp,
    );
    opt_stamp_field(
        &mut content,
        tag::FILE_AVAILABLE_TIME_STAMP,
        &info.file_available_time_stamp,
    );
    opt_int_field(
        &mut content,
        tag::SPECIFICATION_VERSION_NUMBER,
        info.specification_version_number,
    )?;
    opt_int_field(
        &mut content,
        tag::RELEASE_VERSION_NUMBER,
        info.release_version_number,
    )?;
    opt_str_field(&mut content, tag::FILE_TYPE_INDICATOR, &info.file_type_indicator);
    opt_str_field(
        &mut content,
        tag::RAP_FILE_SEQUENCE_NUMBER,
        &info.rap_file_sequence_number,
    );
    opt_operator_spec(&mut content, &info.operator_spec_information);
    field(out, tag::BATCH_CONTROL_INFO, true, &content);
    Ok(())
}

fn accounting_info(out: &mut Vec<u8>, info: &AccountingInfo) -> Result<()> {
    let mut content = Vec::new();
    if let Some(taxation) = &info.taxation {
        let mut rows = Vec::new();
        for tax in taxation {
            taxation_row(&mut rows, tax)?;
        }
        field(&mut content, tag::TAXATION_LIST, true, &rows);
    }
    if let Some(discounting) = &info.discounting {
        let mut rows = Vec::new();
        for discount in discounting {
            discounting_row(&mut rows, discount)?;
        }
        field(&mut content, tag::DISCOUNTING_LIST, true, &rows);
    }
    opt_str_field(&mut content, tag::LOCAL_CURRENCY, &info.local_currency);
    opt_str_field(&mut content, tag::TAP_CURRENCY, &info.tap_currency);
    if let Some(conversions) = &info.currency_conversion_info {
        let mut rows = Vec::new();
        for conversion in conversions {
            currency_conversion_row(&mut rows, conversion)?;
        }
        field(&mut content, tag::CURRENCY_CONVERSION_LIST, true, &rows);
    }
    opt_int_field(&mut content, tag::TAP_DECIMAL_PLACES, info.tap_decimal_places)?;
    field(out, tag::ACCOUNTING_INFO, true, &content);
    Ok(())
}

fn taxation_row(out: &mut Vec<u8>, tax: &Taxation) -> Result<()> {
    let mut content = Vec::new();
    opt_int_field(&mut content, tag::TAX_CODE, tax.tax_code)?;
    opt_str_field(&mut content, tag::TAX_TYPE, &tax.tax_type);
    opt_str_field(&mut content, tag::TAX_RATE, &tax.tax_rate);
    field(out, tag::TAXATION, true, &content);
    Ok(())
}

fn discounting_row(out: &mut Vec<u8>, discount: &Discounting) -> Result<()> {
    let mut content = Vec::new();
    opt_int_field(&mut content, tag::DISCOUNT_CODE, discount.discount_code)?;
    opt_str_field(&mut content, tag::DISCOUNT_RATE, &discount.discount_rate);
    field(out, tag::DISCOUNTING, true, &content);
    Ok(())
}

fn currency_conversion_row(out: &mut Vec<u8>, row: &CurrencyConversion) -> Result<()> {
    let mut content = Vec::new();
    opt_int_field(&mut content, tag::EXCHANGE_RATE_CODE, row.exchange_rate_code)?;
    opt_int_field(
        &mut content,
        tag::NUMBER_OF_DECIMAL_PLACES,
        row.number_of_decimal_places,
    )?;
    opt_int_field(&mut content, tag::EXCHANGE_RATE, row.exchange_rate)?;
    field(out, tag::CURRENCY_CONVERSION, true, &content);
    Ok(())
}

fn network_info(out: &mut Vec<u8>, info: &NetworkInfo) -> Result<()> {
    let mut content = Vec::new();
    if let Some(offsets) = &info.utc_time_offset_info {
        let mut rows = Vec::new();
        for offset in offsets {
            utc_time_offset_row(&mut rows, offset)?;
        }
        field(&mut content, tag::UTC_TIME_OFFSET_INFO_LIST, true, &rows);
    }
    if let Some(entities) = &info.rec_entity_info {
        let mut rows = Vec::new();
        for entity in entities {
            rec_entity_row(&mut rows, entity)?;
        }
        field(&mut content, tag::REC_ENTITY_INFO_LIST, true, &rows);
    }
    field(out, tag::NETWORK_INFO, true, &content);
    Ok(())
}

fn utc_time_offset_row(out: &mut Vec<u8>, row: &UtcTimeOffsetInfo) -> Result<()> {
    let mut content = Vec::new();
    opt_int_field(&mut content, tag::UTC_TIME_OFFSET_CODE, row.utc_time_offset_code)?;
    opt_str_field(&mut content, tag::UTC_TIME_OFFSET, &row.utc_time_offset);
    field(out, tag::UTC_TIME_OFFSET_INFO, true, &content);
    Ok(())
}

fn rec_entity_row(out: &mut Vec<u8>, row: &RecEntityInformation) -> Result<()> {
    let mut content = Vec::new();
    opt_int_field(&mut content, tag::REC_ENTITY_CODE, row.rec_entity_code)?;
    opt_int_field(&mut content, tag::REC_ENTITY_TYPE, row.rec_entity_type)?;
    opt_str_field(&mut content, tag::REC_ENTITY_ID, &row.rec_entity_id);
    field(out, tag::REC_ENTITY_INFORMATION, true, &content);
    Ok(())
}

fn audit_control_info(out: &mut Vec<u8>, info: &AuditControlInfo) -> Result<()> {
    let mut content = Vec::new();
    opt_stamp_field(
        &mut content,
        tag::EARLIEST_CALL_TIME_STAMP,
        &info.earliest_call_time_stamp,
    );
    opt_stamp_field(
        &mut content,
        tag::LATEST_CALL_TIME_STAMP,
        &info.latest_call_time_stamp,
    );
    opt_bytes_field(&mut content, tag::TOTAL_CHARGE, &info.total_charge);
    opt_bytes_field(&mut content, tag::TOTAL_CHARGE_REFUND, &info.total_charge_refund);
    opt_bytes_field(&mut content, tag::TOTAL_TAX_REFUND, &info.total_tax_refund);
    opt_bytes_field(&mut content, tag::TOTAL_TAX_VALUE, &info.total_tax_value);
    opt_bytes_field(
        &mut content,
        tag::TOTAL_DISCOUNT_REFUND,
        &info.total_discount_refund,
    );
    opt_bytes_field(
        &mut content,
        tag::TOTAL_DISCOUNT_VALUE,
        &info.total_discount_value,
    );
    if let Some(advised) = &info.total_advised_charge_value_list {
        let mut rows = Vec::new();
        for value in advised {
            advised_charge_row(&mut rows, value)?;
        }
        field(&mut content, tag::TOTAL_ADVISED_CHARGE_VALUE_LIST, true, &rows);
    }
    opt_int_field(
        &mut content,
        tag::CALL_EVENT_DETAILS_COUNT,
        info.call_event_details_count,
    )?;
    opt_operator_spec(&mut content, &info.operator_spec_information);
    field(out, tag::AUDIT_CONTROL_INFO, true, &content);
    Ok(())
}

fn advised_charge_row(out: &mut Vec<u8>, row: &AdvisedChargeValue) -> Result<()> {
    let mut content = Vec::new();
    opt_str_field(&mut content, tag::CHARGE_TYPE, &row.charge_type);
    opt_bytes_field(&mut content, tag::ADVISED_CHARGE, &row.advised_charge);
    opt_bytes_field(&mut content, tag::COMMISSION, &row.commission);
    field(out, tag::ADVISED_CHARGE_VALUE, true, &content);
    Ok(())
}
