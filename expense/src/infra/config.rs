use anyhow::Context;
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Directory holding `expenses.json` and `holidays.json`.
    pub data_dir: PathBuf,
    /// Receipts live under `<storage_root>/receipts`.
    pub storage_root: PathBuf,
    pub public_dir: PathBuf,
    pub currency_label: String,
    pub max_receipt_bytes: usize,
    pub cors_origin: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: "127.0.0.1".to_string(),
            port: 4000,
            data_dir: PathBuf::from("data"),
            storage_root: PathBuf::from("."),
            public_dir: PathBuf::from("public"),
            currency_label: "RM".to_string(),
            max_receipt_bytes: 10 * 1024 * 1024,
            cors_origin: None,
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Config> {
        dotenv().ok();
        Config::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Ok(Config {
            host: get("HTTP_HOST").unwrap_or(defaults.host),
            port: parse(get("HTTP_PORT"), "HTTP_PORT")?.unwrap_or(defaults.port),
            data_dir: get("DATA_DIR").map(PathBuf::from).unwrap_or(defaults.data_dir),
            storage_root: get("STORAGE_ROOT")
                .map(PathBuf::from)
                .unwrap_or(defaults.storage_root),
            public_dir: get("PUBLIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.public_dir),
            currency_label: get("CURRENCY_LABEL").unwrap_or(defaults.currency_label),
            max_receipt_bytes: parse(get("MAX_RECEIPT_BYTES"), "MAX_RECEIPT_BYTES")?
                .unwrap_or(defaults.max_receipt_bytes),
            cors_origin: get("CORS_ORIGIN"),
        })
    }

    pub fn expenses_file(&self) -> PathBuf {
        self.data_dir.join("expenses.json")
    }

    pub fn holidays_file(&self) -> PathBuf {
        self.data_dir.join("holidays.json")
    }
}

fn parse<T>(value: Option<String>, key: &str) -> anyhow::Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .map(|v| v.trim().parse::<T>())
        .transpose()
        .with_context(|| format!("invalid {key}"))
}
