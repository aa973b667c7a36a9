use clap::Parser;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;
use tapraplib::{
    formats::json::Json,
    traits::ReadFormat,
    Config, Result, TapValidator, ValidationResult,
};

mod ftp;
mod store;

use ftp::NcftpUpload;
use store::LocalRapStore;

#[derive(Parser, Debug)]
#[command(name = "taprap", version, about = "Проверка TAP-файлов и выпуск RAP")]
struct Cli {
    /// Входной файл с декодированным Data Interchange, JSON (по умолчанию stdin)
    #[arg(short = 'i', long = "input")]
    input: Option<String>,

    /// Файл конфигурации (TOML)
    #[arg(short = 'c', long = "config")]
    config: Option<String>,

    /// Файл состояния локального распределителя RAP-идентичностей
    #[arg(long = "state", default_value = "taprap_state.json")]
    state: String,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_target(false).init();
    let cli = Cli::parse();

    let config = match cli.config {
        Some(path) => Config::load(Path::new(&path))?,
        None => Config::default(),
    };

    let reader: Box<dyn io::Read> = match cli.input {
        Some(path) => Box::new(File::open(path)?),
        None => Box::new(io::stdin()),
    };
    let interchange = Json::read(BufReader::new(reader))?;

    let mut store = LocalRapStore::open(Path::new(&cli.state))?;
    let upload = NcftpUpload;
    let mut validator = TapValidator::new(&mut store, &upload, &config);

    match validator.validate(&interchange) {
        ValidationResult::TapValid => println!("TAP_VALID"),
        ValidationResult::FatalError => println!(
            "FATAL_ERROR rap_file_id={} rap_sequence_num={}",
            validator.rap_file_id(),
            validator.rap_sequence_num()
        ),
        ValidationResult::ValidationImpossible => println!("VALIDATION_IMPOSSIBLE"),
        ValidationResult::WrongAddressee => println!("WRONG_ADDRESSEE"),
    }
    Ok(())
}
