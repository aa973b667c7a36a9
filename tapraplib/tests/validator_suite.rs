use std::cell::RefCell;
use std::path::Path;

use tapraplib::asn::tag;
use tapraplib::codes;
use tapraplib::formats::octets::encode_int64_as_octets;
use tapraplib::model::{
    AccountingInfo, AuditControlInfo, BasicServiceUsed, BatchControlInfo, CallEventDetail,
    ChargeDetail, ChargeInformation, CurrencyConversion, DataInterchange, DateTimeStamp,
    MobileOriginatedCall, NetworkInfo, Notification, RecEntityInformation, TaxInformation,
    TransferBatch, UtcTimeOffsetInfo,
};
use tapraplib::rap::{ErrorDetail, FatalError, FatalReturn, ReturnBatch, ReturnDetail};
use tapraplib::traits::{FileStatus, RapAllocation, RapStore, RapUpload};
use tapraplib::{Config, FtpSetting, Result, TapRapError, TapValidator, ValidationResult};

// --- заглушки шлюза БД и транспорта ---

#[derive(Default)]
struct MemStore {
    created: Vec<(String, bool, String)>,
    loaded: Vec<(ReturnBatch, i64, String, FileStatus)>,
}

impl RapStore for MemStore {
    fn create_rap_file(
        &mut self,
        recipient_tap_code: &str,
        is_test: bool,
        tap_available_stamp: &str,
    ) -> Result<RapAllocation> {
        self.created.push((
            recipient_tap_code.to_string(),
            is_test,
            tap_available_stamp.to_string(),
        ));
        Ok(RapAllocation {
            filename: format!("RC{recipient_tap_code}00007"),
            sequence_num: "00007".into(),
            mobile_network_id: 25,
            roaming_hub_id: 3,
            roaming_hub_name: "TESTHUB".into(),
            timestamp: "20260801120000".into(),
            utc_offset: "+0300".into(),
            tap_version: 3,
            tap_release: 12,
            rap_version: 1,
            rap_release: 5,
            tap_decimal_places: 6,
            file_id: 77,
        })
    }

    fn load_return_batch(
        &mut self,
        batch: &ReturnBatch,
        file_id: i64,
        filename: &str,
        status: FileStatus,
    ) -> Result<()> {
        self.loaded
            .push((batch.clone(), file_id, filename.to_string(), status));
        Ok(())
    }
}

struct FailingStore;

impl RapStore for FailingStore {
    fn create_rap_file(&mut self, _: &str, _: bool, _: &str) -> Result<RapAllocation> {
        Err(TapRapError::Store("connection lost".into()))
    }

    fn load_return_batch(
        &mut self,
        _: &ReturnBatch,
        _: i64,
        _: &str,
        _: FileStatus,
    ) -> Result<()> {
        Err(TapRapError::Store("connection lost".into()))
    }
}

#[derive(Default)]
struct MemUpload {
    uploads: RefCell<Vec<String>>,
}

impl RapUpload for MemUpload {
    fn upload(&self, filename: &str, _path: &Path, _setting: &FtpSetting) -> Result<()> {
        self.uploads.borrow_mut().push(filename.to_string());
        Ok(())
    }
}

struct FailingUpload;

impl RapUpload for FailingUpload {
    fn upload(&self, _: &str, _: &Path, _: &FtpSetting) -> Result<()> {
        Err(TapRapError::Upload("530 login incorrect".into()))
    }
}

// --- фикстуры ---

fn stamp(local: &str) -> DateTimeStamp {
    DateTimeStamp::new(local, "+0300")
}

fn conversion(code: i64) -> CurrencyConversion {
    CurrencyConversion {
        exchange_rate_code: Some(code),
        number_of_decimal_places: Some(5),
        exchange_rate: Some(152_000),
    }
}

fn charged_call(charge: i64, taxed: bool) -> CallEventDetail {
    CallEventDetail::MobileOriginatedCall(MobileOriginatedCall {
        basic_service_used_list: Some(vec![BasicServiceUsed {
            basic_service_code: Some(11),
            charge_information_list: Some(vec![ChargeInformation {
                charge_detail_list: Some(vec![ChargeDetail {
                    charge: Some(encode_int64_as_octets(charge).expect("charge")),
                    ..Default::default()
                }]),
                tax_information: taxed.then(|| vec![TaxInformation::default()]),
                ..Default::default()
            }]),
        }]),
    })
}

fn valid_batch() -> TransferBatch {
    TransferBatch {
        batch_control_info: Some(BatchControlInfo {
            sender: Some("OP1".into()),
            recipient: Some("OP2".into()),
            file_sequence_number: Some("00042".into()),
            file_creation_time_stamp: Some(stamp("20260714210000")),
            transfer_cut_off_time_stamp: Some(stamp("20260715000000")),
            file_available_time_stamp: Some(stamp("20260715093000")),
            specification_version_number: Some(3),
            release_version_number: Some(12),
            file_type_indicator: None,
            rap_file_sequence_number: None,
            operator_spec_information: None,
        }),
        accounting_info: Some(AccountingInfo {
            taxation: None,
            discounting: None,
            local_currency: Some("RUB".into()),
            tap_currency: Some("SDR".into()),
            currency_conversion_info: Some(vec![conversion(1), conversion(2)]),
            tap_decimal_places: Some(6),
        }),
        network_info: Some(NetworkInfo {
            utc_time_offset_info: Some(vec![UtcTimeOffsetInfo {
                utc_time_offset_code: Some(1),
                utc_time_offset: Some("+0300".into()),
            }]),
            rec_entity_info: Some(vec![RecEntityInformation {
                rec_entity_code: Some(1),
                rec_entity_type: Some(1),
                rec_entity_id: Some("mscid01".into()),
            }]),
        }),
        call_event_details: vec![charged_call(100, false)],
        audit_control_info: Some(AuditControlInfo {
            earliest_call_time_stamp: Some(stamp("20260714200100")),
            latest_call_time_stamp: Some(stamp("20260714235900")),
            total_charge: Some(encode_int64_as_octets(100).expect("total")),
            total_tax_value: Some(encode_int64_as_octets(0).expect("total")),
            total_discount_value: Some(encode_int64_as_octets(0).expect("total")),
            call_event_details_count: Some(1),
            ..Default::default()
        }),
    }
}

fn valid_notification() -> Notification {
    Notification {
        sender: Some("OP1".into()),
        recipient: Some("OP2".into()),
        file_sequence_number: Some("00043".into()),
        file_available_time_stamp: Some(stamp("20260715093000")),
        specification_version_number: Some(3),
        release_version_number: Some(12),
        ..Default::default()
    }
}

fn validate(
    config: &Config,
    interchange: &DataInterchange,
) -> (ValidationResult, MemStore, MemUpload, i64, String) {
    let mut store = MemStore::default();
    let upload = MemUpload::default();
    let result;
    let file_id;
    let sequence;
    {
        let mut validator = TapValidator::new(&mut store, &upload, config);
        result = validator.validate(interchange);
        file_id = validator.rap_file_id();
        sequence = validator.rap_sequence_num().to_string();
    }
    (result, store, upload, file_id, sequence)
}

fn dir_config(dir: &Path) -> Config {
    Config {
        output_directory: Some(dir.to_path_buf()),
        ..Default::default()
    }
}

fn fatal_return(batch: &ReturnBatch) -> &FatalReturn {
    assert_eq!(batch.return_details.len(), 1, "exactly one return detail");
    match &batch.return_details[0] {
        ReturnDetail::Fatal(fatal) => fatal,
        other => panic!("expected fatal return, got {other:?}"),
    }
}

fn single_detail(details: &[ErrorDetail]) -> &ErrorDetail {
    assert_eq!(details.len(), 1);
    &details[0]
}

fn context_path(detail: &ErrorDetail) -> Vec<(u32, i64)> {
    detail
        .error_context
        .iter()
        .map(|c| (c.path_item_id, c.item_level))
        .collect()
}

// --- сценарии ---

#[test]
fn valid_batch_passes_without_side_effects() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = dir_config(dir.path());
    let interchange = DataInterchange::TransferBatch(valid_batch());

    let (result, store, upload, file_id, sequence) = validate(&config, &interchange);
    assert_eq!(result, ValidationResult::TapValid);
    assert!(store.created.is_empty());
    assert!(store.loaded.is_empty());
    assert!(upload.uploads.borrow().is_empty());
    assert_eq!(file_id, 0);
    assert_eq!(sequence, "");
    assert_eq!(std::fs::read_dir(dir.path()).expect("read dir").count(), 0);
}

#[test]
fn missing_accounting_info_builds_transfer_batch_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = dir_config(dir.path());
    let mut batch = valid_batch();
    batch.accounting_info = None;
    let interchange = DataInterchange::TransferBatch(batch);

    let (result, store, _upload, file_id, sequence) = validate(&config, &interchange);
    assert_eq!(result, ValidationResult::FatalError);
    assert_eq!(file_id, 77);
    assert_eq!(sequence, "00007");
    assert_eq!(store.created.len(), 1);
    assert_eq!(
        store.created[0],
        ("OP2".to_string(), false, "20260715093000".to_string())
    );

    let (rap, loaded_id, filename, status) = &store.loaded[0];
    assert_eq!(*loaded_id, 77);
    assert_eq!(filename, "RCOP200007");
    assert_eq!(*status, FileStatus::CreatedAndSent);

    // роли поменялись местами ровно один раз
    assert_eq!(rap.rap_batch_control_info.sender, "OP2");
    assert_eq!(rap.rap_batch_control_info.recipient, "OP1");
    assert_eq!(rap.rap_batch_control_info.rap_file_sequence_number, "00007");
    assert_eq!(rap.rap_audit_control_info.return_details_count, 1);
    assert_eq!(rap.rap_audit_control_info.total_severe_return_value, vec![0x00]);

    let fatal = fatal_return(rap);
    assert_eq!(fatal.file_sequence_number, "00042");
    let FatalError::TransferBatch(error) = &fatal.error else {
        panic!("expected transfer batch error");
    };
    let detail = single_detail(&error.error_detail);
    assert_eq!(detail.error_code, codes::TF_BATCH_ACCOUNTING_INFO_MISSING);
    assert_eq!(
        context_path(detail),
        vec![(tag::TRANSFER_BATCH.path_item_id(), 1)]
    );

    let written = dir.path().join("RCOP200007");
    let bytes = std::fs::read(written).expect("rap file on disk");
    assert!(!bytes.is_empty());
}

#[test]
fn taxation_missing_while_batch_contains_taxes() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = dir_config(dir.path());
    let mut batch = valid_batch();
    batch.call_event_details = vec![charged_call(100, true)];
    let accounting_copy = batch.accounting_info.clone().expect("accounting");
    let interchange = DataInterchange::TransferBatch(batch);

    let (result, store, _upload, _file_id, _sequence) = validate(&config, &interchange);
    assert_eq!(result, ValidationResult::FatalError);

    let fatal = fatal_return(&store.loaded[0].0);
    let FatalError::Accounting(error) = &fatal.error else {
        panic!("expected accounting info error");
    };
    assert_eq!(error.accounting_info, accounting_copy);
    let detail = single_detail(&error.error_detail);
    assert_eq!(detail.error_code, codes::ACCOUNTING_TAXATION_MISSING);
    assert_eq!(
        context_path(detail),
        vec![
            (tag::TRANSFER_BATCH.path_item_id(), 1),
            (tag::ACCOUNTING_INFO.path_item_id(), 2),
        ]
    );
}

#[test]
fn duplicated_exchange_rate_code() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = dir_config(dir.path());
    let mut batch = valid_batch();
    batch
        .accounting_info
        .as_mut()
        .expect("accounting")
        .currency_conversion_info = Some(vec![conversion(1), conversion(1)]);
    let interchange = DataInterchange::TransferBatch(batch);

    let (result, store, _upload, _file_id, _sequence) = validate(&config, &interchange);
    assert_eq!(result, ValidationResult::FatalError);

    let fatal = fatal_return(&store.loaded[0].0);
    let FatalError::Accounting(error) = &fatal.error else {
        panic!("expected accounting info error");
    };
    let detail = single_detail(&error.error_detail);
    assert_eq!(
        detail.error_code,
        codes::CURRENCY_CONVERSION_EXRATE_CODE_DUPLICATION
    );
    assert_eq!(
        context_path(detail),
        vec![
            (tag::TRANSFER_BATCH.path_item_id(), 1),
            (tag::ACCOUNTING_INFO.path_item_id(), 2),
            (tag::CURRENCY_CONVERSION_LIST.path_item_id(), 3),
        ]
    );
}

#[test]
fn currency_conversion_row_field_checks_in_order() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = dir_config(dir.path());

    let mut row_without_places = conversion(1);
    row_without_places.number_of_decimal_places = None;
    let mut batch = valid_batch();
    batch
        .accounting_info
        .as_mut()
        .expect("accounting")
        .currency_conversion_info = Some(vec![row_without_places]);
    let (result, store, _upload, _file_id, _sequence) =
        validate(&config, &DataInterchange::TransferBatch(batch));
    assert_eq!(result, ValidationResult::FatalError);
    let fatal = fatal_return(&store.loaded[0].0);
    let FatalError::Accounting(error) = &fatal.error else {
        panic!("expected accounting info error");
    };
    assert_eq!(
        single_detail(&error.error_detail).error_code,
        codes::CURRENCY_CONVERSION_NUM_OF_DEC_PLACES_MISSING
    );

    let mut row_without_rate = conversion(1);
    row_without_rate.exchange_rate = None;
    let mut batch = valid_batch();
    batch
        .accounting_info
        .as_mut()
        .expect("accounting")
        .currency_conversion_info = Some(vec![row_without_rate]);
    let (result, store, _upload, _file_id, _sequence) =
        validate(&config, &DataInterchange::TransferBatch(batch));
    assert_eq!(result, ValidationResult::FatalError);
    let fatal = fatal_return(&store.loaded[0].0);
    let FatalError::Accounting(error) = &fatal.error else {
        panic!("expected accounting info error");
    };
    assert_eq!(
        single_detail(&error.error_detail).error_code,
        codes::CURRENCY_CONVERSION_EXCHANGE_RATE_MISSING
    );

    // пропуск кода в первой строке важнее дубликата во второй
    let mut row_without_code = conversion(1);
    row_without_code.exchange_rate_code = None;
    let mut batch = valid_batch();
    batch
        .accounting_info
        .as_mut()
        .expect("accounting")
        .currency_conversion_info = Some(vec![row_without_code, conversion(1)]);
    let (result, store, _upload, _file_id, _sequence) =
        validate(&config, &DataInterchange::TransferBatch(batch));
    assert_eq!(result, ValidationResult::FatalError);
    let fatal = fatal_return(&store.loaded[0].0);
    let FatalError::Accounting(error) = &fatal.error else {
        panic!("expected accounting info error");
    };
    assert_eq!(
        single_detail(&error.error_detail).error_code,
        codes::CURRENCY_CONVERSION_EXRATE_CODE_MISSING
    );
}

#[test]
fn call_count_mismatch() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = dir_config(dir.path());
    let mut batch = valid_batch();
    batch.call_event_details = (0..9).map(|_| charged_call(10, false)).collect();
    batch
        .audit_control_info
        .as_mut()
        .expect("audit")
        .call_event_details_count = Some(10);
    let audit_copy = batch.audit_control_info.clone().expect("audit");
    let interchange = DataInterchange::TransferBatch(batch);

    let (result, store, _upload, _file_id, _sequence) = validate(&config, &interchange);
    assert_eq!(result, ValidationResult::FatalError);

    let fatal = fatal_return(&store.loaded[0].0);
    let FatalError::AuditControl(error) = &fatal.error else {
        panic!("expected audit control info error");
    };
    assert_eq!(error.audit_control_info, audit_copy);
    let detail = single_detail(&error.error_detail);
    assert_eq!(detail.error_code, codes::CALL_COUNT_MISMATCH);
    assert_eq!(
        context_path(detail),
        vec![
            (tag::TRANSFER_BATCH.path_item_id(), 1),
            (tag::AUDIT_CONTROL_INFO.path_item_id(), 2),
            (tag::CALL_EVENT_DETAILS_COUNT.path_item_id(), 3),
        ]
    );
}

#[test]
fn valid_notification_passes_without_side_effects() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = dir_config(dir.path());
    let interchange = DataInterchange::Notification(valid_notification());

    let (result, store, upload, file_id, _sequence) = validate(&config, &interchange);
    assert_eq!(result, ValidationResult::TapValid);
    assert!(store.created.is_empty());
    assert!(store.loaded.is_empty());
    assert!(upload.uploads.borrow().is_empty());
    assert_eq!(file_id, 0);
    assert_eq!(std::fs::read_dir(dir.path()).expect("read dir").count(), 0);
}

#[test]
fn missing_sender_is_validation_impossible() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = dir_config(dir.path());
    let mut batch = valid_batch();
    batch.batch_control_info.as_mut().expect("control").sender = None;
    let interchange = DataInterchange::TransferBatch(batch);

    let (result, store, _upload, file_id, sequence) = validate(&config, &interchange);
    assert_eq!(result, ValidationResult::ValidationImpossible);
    assert!(store.created.is_empty());
    assert!(store.loaded.is_empty());
    assert_eq!(file_id, 0);
    assert_eq!(sequence, "");
    assert_eq!(std::fs::read_dir(dir.path()).expect("read dir").count(), 0);
}

#[test]
fn missing_batch_control_info_is_validation_impossible() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = dir_config(dir.path());
    let mut batch = valid_batch();
    batch.batch_control_info = None;
    let interchange = DataInterchange::TransferBatch(batch);

    let (result, store, _upload, file_id, _sequence) = validate(&config, &interchange);
    assert_eq!(result, ValidationResult::ValidationImpossible);
    assert!(store.created.is_empty());
    assert_eq!(file_id, 0);
}

#[test]
fn foreign_recipient_is_wrong_addressee() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut config = dir_config(dir.path());
    config.local_tap_codes = vec!["OP9".into()];

    let (result, store, _upload, file_id, _sequence) =
        validate(&config, &DataInterchange::TransferBatch(valid_batch()));
    assert_eq!(result, ValidationResult::WrongAddressee);
    assert!(store.created.is_empty());
    assert_eq!(file_id, 0);

    let (result, store, _upload, _file_id, _sequence) =
        validate(&config, &DataInterchange::Notification(valid_notification()));
    assert_eq!(result, ValidationResult::WrongAddressee);
    assert!(store.created.is_empty());

    // свой получатель проходит фильтр
    config.local_tap_codes = vec!["OP2".into(), "OP9".into()];
    let (result, _store, _upload, _file_id, _sequence) =
        validate(&config, &DataInterchange::TransferBatch(valid_batch()));
    assert_eq!(result, ValidationResult::TapValid);
}

#[test]
fn check_order_is_fixed() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = dir_config(dir.path());

    // дефект в Accounting Info важнее дефекта в Network Info
    let mut batch = valid_batch();
    batch.accounting_info.as_mut().expect("accounting").local_currency = None;
    batch.network_info.as_mut().expect("network").utc_time_offset_info = None;
    let (result, store, _upload, _file_id, _sequence) =
        validate(&config, &DataInterchange::TransferBatch(batch));
    assert_eq!(result, ValidationResult::FatalError);
    let fatal = fatal_return(&store.loaded[0].0);
    let FatalError::Accounting(error) = &fatal.error else {
        panic!("expected accounting info error");
    };
    assert_eq!(
        single_detail(&error.error_detail).error_code,
        codes::ACCOUNTING_LOCAL_CURRENCY_MISSING
    );

    // проверки наличия групп важнее проверок полей
    let mut batch = valid_batch();
    batch.network_info = None;
    batch.audit_control_info.as_mut().expect("audit").total_charge = None;
    let (result, store, _upload, _file_id, _sequence) =
        validate(&config, &DataInterchange::TransferBatch(batch));
    assert_eq!(result, ValidationResult::FatalError);
    let fatal = fatal_return(&store.loaded[0].0);
    let FatalError::TransferBatch(error) = &fatal.error else {
        panic!("expected transfer batch error");
    };
    assert_eq!(
        single_detail(&error.error_detail).error_code,
        codes::TF_BATCH_NETWORK_INFO_MISSING
    );

    // внутри Batch Control Info: fileAvailableTimeStamp раньше cutoff
    let mut batch = valid_batch();
    let control = batch.batch_control_info.as_mut().expect("control");
    control.file_available_time_stamp = None;
    control.transfer_cut_off_time_stamp = None;
    let (result, store, _upload, _file_id, _sequence) =
        validate(&config, &DataInterchange::TransferBatch(batch));
    assert_eq!(result, ValidationResult::FatalError);
    let fatal = fatal_return(&store.loaded[0].0);
    let FatalError::BatchControl(error) = &fatal.error else {
        panic!("expected batch control error");
    };
    let detail = single_detail(&error.error_detail);
    assert_eq!(detail.error_code, codes::BATCH_CTRL_FILE_AVAIL_TIMESTAMP_MISSING);
    assert_eq!(
        context_path(detail),
        vec![
            (tag::TRANSFER_BATCH.path_item_id(), 1),
            (tag::BATCH_CONTROL_INFO.path_item_id(), 2),
        ]
    );
    // без fileAvailableTimeStamp метка доступности уходит в шлюз пустой
    assert_eq!(store.created[0].2, "");
}

#[test]
fn positive_charges_require_currency_conversion() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = dir_config(dir.path());
    let mut batch = valid_batch();
    batch
        .accounting_info
        .as_mut()
        .expect("accounting")
        .currency_conversion_info = None;
    let (result, store, _upload, _file_id, _sequence) =
        validate(&config, &DataInterchange::TransferBatch(batch));
    assert_eq!(result, ValidationResult::FatalError);
    let fatal = fatal_return(&store.loaded[0].0);
    let FatalError::Accounting(error) = &fatal.error else {
        panic!("expected accounting info error");
    };
    assert_eq!(
        single_detail(&error.error_detail).error_code,
        codes::ACCOUNTING_CURRENCY_CONVERSION_MISSING
    );

    // нулевые суммы не требуют таблицы конверсии
    let mut batch = valid_batch();
    batch.call_event_details = vec![charged_call(0, false)];
    batch
        .accounting_info
        .as_mut()
        .expect("accounting")
        .currency_conversion_info = None;
    let (result, _store, _upload, _file_id, _sequence) =
        validate(&config, &DataInterchange::TransferBatch(batch));
    assert_eq!(result, ValidationResult::TapValid);
}

#[test]
fn upload_runs_when_hub_is_configured() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut config = dir_config(dir.path());
    config.ftp.insert(
        "TESTHUB".into(),
        FtpSetting {
            server: "ftp.hub.example".into(),
            port: 21,
            username: "rap".into(),
            password: "secret".into(),
            directory: "incoming".into(),
        },
    );
    let mut batch = valid_batch();
    batch.accounting_info = None;

    let (result, _store, upload, _file_id, _sequence) =
        validate(&config, &DataInterchange::TransferBatch(batch));
    assert_eq!(result, ValidationResult::FatalError);
    assert_eq!(upload.uploads.borrow().as_slice(), ["RCOP200007"]);
}

#[test]
fn upload_failure_still_reports_fatal_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut config = dir_config(dir.path());
    config.ftp.insert(
        "TESTHUB".into(),
        FtpSetting {
            server: "ftp.hub.example".into(),
            port: 21,
            username: "rap".into(),
            password: "bad".into(),
            directory: "incoming".into(),
        },
    );
    let mut batch = valid_batch();
    batch.accounting_info = None;

    let mut store = MemStore::default();
    let upload = FailingUpload;
    let result;
    let file_id;
    {
        let mut validator = TapValidator::new(&mut store, &upload, &config);
        result = validator.validate(&DataInterchange::TransferBatch(batch));
        file_id = validator.rap_file_id();
    }
    // запись в БД и локальный файл остаются
    assert_eq!(result, ValidationResult::FatalError);
    assert_eq!(file_id, 77);
    assert_eq!(store.loaded.len(), 1);
    assert!(dir.path().join("RCOP200007").is_file());
}

#[test]
fn store_failure_is_validation_impossible() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = dir_config(dir.path());
    let mut batch = valid_batch();
    batch.accounting_info = None;

    let mut store = FailingStore;
    let upload = MemUpload::default();
    let result;
    let file_id;
    {
        let mut validator = TapValidator::new(&mut store, &upload, &config);
        result = validator.validate(&DataInterchange::TransferBatch(batch));
        file_id = validator.rap_file_id();
    }
    assert_eq!(result, ValidationResult::ValidationImpossible);
    assert_eq!(file_id, 0);
    assert!(upload.uploads.borrow().is_empty());
    assert_eq!(std::fs::read_dir(dir.path()).expect("read dir").count(), 0);
}

#[test]
fn test_file_type_indicator_marks_test_rap() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = dir_config(dir.path());
    let mut batch = valid_batch();
    batch
        .batch_control_info
        .as_mut()
        .expect("control")
        .file_type_indicator = Some("T".into());
    batch.accounting_info = None;

    let (result, store, _upload, _file_id, _sequence) =
        validate(&config, &DataInterchange::TransferBatch(batch));
    assert_eq!(result, ValidationResult::FatalError);
    assert!(store.created[0].1, "is_test flag");
    assert_eq!(
        store.loaded[0].0.rap_batch_control_info.file_type_indicator,
        Some("T".into())
    );
}
