//! Доменные модели стороны TAP: дерево Data Interchange по TD.57.
//!
//! Все поля групп опциональны, как в wire-схеме; обязательность проверяет
//! валидатор. Байтовые денежные значения хранятся октет-строками и
//! декодируются через `formats::octets`.

use serde::{Deserialize, Serialize};

/// Октет-строка TAP (например, числитель суммы по `tap_decimal_places`).
pub type OctetString = Vec<u8>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum DataInterchange {
    TransferBatch(TransferBatch),
    Notification(Notification),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TransferBatch {
    pub batch_control_info: Option<BatchControlInfo>,
    pub accounting_info: Option<AccountingInfo>,
    pub network_info: Option<NetworkInfo>,
    #[serde(default)]
    pub call_event_details: Vec<CallEventDetail>,
    pub audit_control_info: Option<AuditControlInfo>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BatchControlInfo {
    pub sender: Option<String>,
    pub recipient: Option<String>,
    pub file_sequence_number: Option<String>,
    pub file_creation_time_stamp: Option<DateTimeStamp>,
    pub transfer_cut_off_time_stamp: Option<DateTimeStamp>,
    pub file_available_time_stamp: Option<DateTimeStamp>,
    pub specification_version_number: Option<i64>,
    pub release_version_number: Option<i64>,
    pub file_type_indicator: Option<String>,
    pub rap_file_sequence_number: Option<String>,
    pub operator_spec_information: Option<Vec<String>>,
}

/// Локальная метка времени вместе со смещением UTC.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DateTimeStamp {
    pub local_time_stamp: Option<String>,
    pub utc_time_offset: Option<String>,
}

impl DateTimeStamp {
    pub fn new(local_time_stamp: &str, utc_time_offset: &str) -> DateTimeStamp {
        DateTimeStamp {
            local_time_stamp: Some(local_time_stamp.to_string()),
            utc_time_offset: Some(utc_time_offset.to_string()),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AccountingInfo {
    pub taxation: Option<Vec<Taxation>>,
    pub discounting: Option<Vec<Discounting>>,
    pub local_currency: Option<String>,
    pub tap_currency: Option<String>,
    pub currency_conversion_info: Option<Vec<CurrencyConversion>>,
    pub tap_decimal_places: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Taxation {
    pub tax_code: Option<i64>,
    pub tax_type: Option<String>,
    pub tax_rate: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Discounting {
    pub discount_code: Option<i64>,
    pub discount_rate: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CurrencyConversion {
    pub exchange_rate_code: Option<i64>,
    pub number_of_decimal_places: Option<i64>,
    pub exchange_rate: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NetworkInfo {
    pub utc_time_offset_info: Option<Vec<UtcTimeOffsetInfo>>,
    pub rec_entity_info: Option<Vec<RecEntityInformation>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UtcTimeOffsetInfo {
    pub utc_time_offset_code: Option<i64>,
    pub utc_time_offset: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RecEntityInformation {
    pub rec_entity_code: Option<i64>,
    pub rec_entity_type: Option<i64>,
    pub rec_entity_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AuditControlInfo {
    pub earliest_call_time_stamp: Option<DateTimeStamp>,
    pub latest_call_time_stamp: Option<DateTimeStamp>,
    pub total_charge: Option<OctetString>,
    pub total_charge_refund: Option<OctetString>,
    pub total_tax_refund: Option<OctetString>,
    pub total_tax_value: Option<OctetString>,
    pub total_discount_refund: Option<OctetString>,
    pub total_discount_value: Option<OctetString>,
    pub total_advised_charge_value_list: Option<Vec<AdvisedChargeValue>>,
    pub call_event_details_count: Option<i64>,
    pub operator_spec_information: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AdvisedChargeValue {
    pub charge_type: Option<String>,
    pub advised_charge: Option<OctetString>,
    pub commission: Option<OctetString>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum CallEventDetail {
    MobileOriginatedCall(MobileOriginatedCall),
    MobileTerminatedCall(MobileTerminatedCall),
    GprsCall(GprsCall),
}

impl CallEventDetail {
    /// Общий экстрактор: все записи Charge Information данного звонка.
    ///
    /// MO/MT дают их через список basic-service-used, GPRS — напрямую из
    /// gprs-service-used.
    pub fn charge_information(&self) -> Box<dyn Iterator<Item = &ChargeInformation> + '_> {
        match self {
            CallEventDetail::MobileOriginatedCall(call) => {
                Box::new(basic_service_charges(&call.basic_service_used_list))
            }
            CallEventDetail::MobileTerminatedCall(call) => {
                Box::new(basic_service_charges(&call.basic_service_used_list))
            }
            CallEventDetail::GprsCall(call) => Box::new(
                call.gprs_service_used
                    .iter()
                    .flat_map(|used| used.charge_information_list.iter().flatten()),
            ),
        }
    }
}

fn basic_service_charges(
    list: &Option<Vec<BasicServiceUsed>>,
) -> impl Iterator<Item = &ChargeInformation> {
    list.iter()
        .flatten()
        .flat_map(|used| used.charge_information_list.iter().flatten())
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MobileOriginatedCall {
    pub basic_service_used_list: Option<Vec<BasicServiceUsed>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MobileTerminatedCall {
    pub basic_service_used_list: Option<Vec<BasicServiceUsed>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GprsCall {
    pub gprs_service_used: Option<GprsServiceUsed>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BasicServiceUsed {
    pub basic_service_code: Option<i64>,
    pub charge_information_list: Option<Vec<ChargeInformation>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GprsServiceUsed {
    pub charge_information_list: Option<Vec<ChargeInformation>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ChargeInformation {
    pub charged_item: Option<String>,
    pub exchange_rate_code: Option<i64>,
    pub charge_detail_list: Option<Vec<ChargeDetail>>,
    pub tax_information: Option<Vec<TaxInformation>>,
    pub discount_information: Option<DiscountInformation>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ChargeDetail {
    pub charge_type: Option<String>,
    pub charge: Option<OctetString>,
    pub chargeable_units: Option<i64>,
    pub charged_units: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TaxInformation {
    pub tax_code: Option<i64>,
    pub tax_value: Option<OctetString>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DiscountInformation {
    pub discount_code: Option<i64>,
    pub discount: Option<OctetString>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Notification {
    pub sender: Option<String>,
    pub recipient: Option<String>,
    pub file_sequence_number: Option<String>,
    pub file_creation_time_stamp: Option<DateTimeStamp>,
    pub file_available_time_stamp: Option<DateTimeStamp>,
    pub specification_version_number: Option<i64>,
    pub release_version_number: Option<i64>,
    pub file_type_indicator: Option<String>,
    pub rap_file_sequence_number: Option<String>,
    pub operator_spec_information: Option<Vec<String>>,
}
