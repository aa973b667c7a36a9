//! Выгрузка готового RAP-файла через внешний ncftpput.

use std::path::Path;
use std::process::Command;
use tapraplib::{
    error::{Result, TapRapError},
    traits::RapUpload,
    FtpSetting,
};
use tracing::info;

pub struct NcftpUpload;

impl RapUpload for NcftpUpload {
    fn upload(&self, filename: &str, local_path: &Path, setting: &FtpSetting) -> Result<()> {
        info!("uploading {filename} to FTP server {}", setting.server);
        let output = Command::new("ncftpput")
            .arg("-u")
            .arg(&setting.username)
            .arg("-p")
            .arg(&setting.password)
            .arg("-P")
            .arg(setting.port.to_string())
            .arg(&setting.server)
            .arg(&setting.directory)
            .arg(local_path)
            .output()
            .map_err(|e| TapRapError::Upload(format!("ncftpput: {e}")))?;
        if !output.status.success() {
            return Err(TapRapError::Upload(format!(
                "ncftpput exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        Ok(())
    }
}
