//! Контентные пробы по Transfer Batch: предикаты без побочных эффектов.
//!
//! Каждая проба обходит дерево звонков через общий экстрактор и
//! останавливается на первом свидетеле; порядок звонков не влияет на
//! результат.

use crate::formats::octets::decode_octets_as_int64;
use crate::model::{ChargeInformation, TransferBatch};
use rust_decimal::Decimal;

/// Есть ли хоть одна запись Charge Information с Tax Information.
pub fn contains_taxes(batch: &TransferBatch) -> bool {
    charge_information(batch).any(|info| info.tax_information.is_some())
}

/// Есть ли хоть одна запись Charge Information с Discount Information.
pub fn contains_discounts(batch: &TransferBatch) -> bool {
    charge_information(batch).any(|info| info.discount_information.is_some())
}

/// Есть ли хоть одна строго положительная сумма: числитель из октет-строки
/// `charge`, масштаб — батчевый `tap_decimal_places`.
pub fn contains_positive_charges(batch: &TransferBatch) -> bool {
    let places = batch
        .accounting_info
        .as_ref()
        .and_then(|info| info.tap_decimal_places)
        .unwrap_or(0);
    charge_information(batch).any(|info| has_positive_charge(info, places))
}

fn has_positive_charge(info: &ChargeInformation, places: i64) -> bool {
    let scale = places.clamp(0, 28) as u32;
    info.charge_detail_list.iter().flatten().any(|detail| {
        detail
            .charge
            .as_deref()
            .and_then(|octets| decode_octets_as_int64(octets).ok())
            .map(|numerator| Decimal::new(numerator, scale) > Decimal::ZERO)
            .unwrap_or(false)
    })
}

fn charge_information(batch: &TransferBatch) -> impl Iterator<Item = &ChargeInformation> {
    batch
        .call_event_details
        .iter()
        .flat_map(|call| call.charge_information())
}
