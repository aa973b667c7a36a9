//! Числовые коды ошибок валидации по приложениям TD.57/TD.32.

// Transfer Batch: отсутствие обязательных групп
pub const TF_BATCH_BATCH_CONTROL_INFO_MISSING: i64 = 30;
pub const TF_BATCH_ACCOUNTING_INFO_MISSING: i64 = 31;
pub const TF_BATCH_NETWORK_INFO_MISSING: i64 = 32;
pub const TF_BATCH_AUDIT_CONTROL_INFO_MISSING: i64 = 33;

// Batch Control Info: отсутствие обязательных полей
pub const BATCH_CTRL_FILE_AVAIL_TIMESTAMP_MISSING: i64 = 40;
pub const BATCH_CTRL_SPEC_VERSION_MISSING: i64 = 41;
pub const BATCH_CTRL_TRANSFER_CUTOFF_MISSING: i64 = 42;

// Accounting Info
pub const ACCOUNTING_LOCAL_CURRENCY_MISSING: i64 = 50;
pub const ACCOUNTING_TAP_DECIMAL_PLACES_MISSING: i64 = 51;
pub const ACCOUNTING_TAXATION_MISSING: i64 = 52;
pub const ACCOUNTING_DISCOUNTING_MISSING: i64 = 53;
pub const ACCOUNTING_CURRENCY_CONVERSION_MISSING: i64 = 54;

// Currency Conversion: построчные проверки
pub const CURRENCY_CONVERSION_EXRATE_CODE_MISSING: i64 = 60;
pub const CURRENCY_CONVERSION_NUM_OF_DEC_PLACES_MISSING: i64 = 61;
pub const CURRENCY_CONVERSION_EXCHANGE_RATE_MISSING: i64 = 62;
pub const CURRENCY_CONVERSION_EXRATE_CODE_DUPLICATION: i64 = 63;

// Network Info
pub const NETWORK_UTC_TIMEOFFSET_MISSING: i64 = 70;
pub const NETWORK_REC_ENTITY_MISSING: i64 = 71;

// Audit Control Info
pub const AUDIT_CTRL_TOTAL_CHARGE_MISSING: i64 = 80;
pub const AUDIT_CTRL_TOTAL_TAX_VALUE_MISSING: i64 = 81;
pub const AUDIT_CTRL_TOTAL_DISCOUNT_MISSING: i64 = 82;
pub const AUDIT_CTRL_CALL_COUNT_MISSING: i64 = 83;
pub const CALL_COUNT_MISMATCH: i64 = 84;
