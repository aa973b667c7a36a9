use tapraplib::{
    formats::json::Json,
    traits::ReadFormat,
    Config, TapValidator,
};

mod common {
    use tapraplib::{
        error::Result,
        rap::ReturnBatch,
        traits::{FileStatus, RapAllocation, RapStore, RapUpload},
        FtpSetting,
    };
    use std::path::Path;

    /// Распределитель идентичностей в памяти — только для примера.
    #[derive(Default)]
    pub struct MemStore {
        next: i64,
    }

    impl RapStore for MemStore {
        fn create_rap_file(
            &mut self,
            recipient_tap_code: &str,
            is_test: bool,
            _tap_available_stamp: &str,
        ) -> Result<RapAllocation> {
            self.next += 1;
            let prefix = if is_test { "RT" } else { "RC" };
            Ok(RapAllocation {
                filename: format!("{prefix}{recipient_tap_code}{:05}", self.next),
                sequence_num: format!("{:05}", self.next),
                mobile_network_id: 1,
                roaming_hub_id: 1,
                roaming_hub_name: "EXAMPLEHUB".into(),
                timestamp: "20260801120000".into(),
                utc_offset: "+0300".into(),
                tap_version: 3,
                tap_release: 12,
                rap_version: 1,
                rap_release: 5,
                tap_decimal_places: 6,
                file_id: self.next,
            })
        }

        fn load_return_batch(
            &mut self,
            _batch: &ReturnBatch,
            _file_id: i64,
            _filename: &str,
            _status: FileStatus,
        ) -> Result<()> {
            Ok(())
        }
    }

    pub struct NoUpload;

    impl RapUpload for NoUpload {
        fn upload(&self, _filename: &str, _path: &Path, _setting: &FtpSetting) -> Result<()> {
            Ok(())
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Пример: читаем декодированный Data Interchange из stdin (JSON) и проверяем
    let interchange = Json::read(std::io::BufReader::new(std::io::stdin()))?;
    let config = Config::default();
    let mut store = common::MemStore::default();
    let upload = common::NoUpload;
    let mut validator = TapValidator::new(&mut store, &upload, &config);
    println!("{:?}", validator.validate(&interchange));
    Ok(())
}
