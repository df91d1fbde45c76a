use crate::utils::logging::*;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::fs;
use tokio::sync::RwLock;

lazy_static! {
    static ref CONFIG: RwLock<Config> = RwLock::new(Config::new());
}

#[derive(Debug, Deserialize)]
struct ConfigTable {
    #[serde(rename = "Config")]
    config: Config,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Config {
    pub http_server_bind_port: u16, //port
    pub bind_retry_duration: u64, //seconds
    pub upload_folder: String, //path
    pub database_path: String, //path
    pub python_interpreter: String, //executable
    pub predictor_script: String, //path
}

impl Config {
    pub fn new() -> Self {
        // Nothing can run without a configuration, so failing here ends the process.
        let toml_string = match fs::read_to_string("./diagnosis.toml") {
            Ok(toml_string) => toml_string,
            Err(err) => {
                logging_console!(emergency_entry!(SystemEntry::ConfigNotFound, format!("Err: {err}")));
                panic!("{}", SystemEntry::ConfigNotFound);
            }
        };
        match Self::parse(&toml_string) {
            Ok(config) => config,
            Err(entry) => {
                logging_console!(emergency_entry!(entry.to_string()));
                panic!("{entry}");
            }
        }
    }

    pub fn parse(toml_string: &str) -> Result<Self, SystemEntry> {
        let config_table = toml::from_str::<ConfigTable>(toml_string).map_err(|_| SystemEntry::ConfigParseError)?;
        let config = config_table.config;
        if !Self::validate(&config) {
            return Err(SystemEntry::InvalidConfig);
        }
        Ok(config)
    }

    pub async fn now() -> Config {
        CONFIG.read().await.clone()
    }

    pub fn validate(config: &Config) -> bool {
        Config::validate_second(config.bind_retry_duration)
            && Config::validate_path(&config.upload_folder)
            && Config::validate_path(&config.database_path)
            && Config::validate_path(&config.python_interpreter)
            && Config::validate_path(&config.predictor_script)
    }

    fn validate_second(second: u64) -> bool {
        second <= 3600
    }

    fn validate_path(path: &str) -> bool {
        !path.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[Config]
http_server_bind_port = 5000
bind_retry_duration = 10
upload_folder = "uploads"
database_path = "plant_diagnoses.db"
python_interpreter = "python3"
predictor_script = "Script/gpdcnn/predict.py"
"#;

    #[test]
    fn parses_config_table() {
        let config = Config::parse(SAMPLE).unwrap();
        assert_eq!(config.http_server_bind_port, 5000);
        assert_eq!(config.upload_folder, "uploads");
        assert_eq!(config.predictor_script, "Script/gpdcnn/predict.py");
    }

    #[test]
    fn rejects_long_retry_duration() {
        let toml_string = SAMPLE.replace("bind_retry_duration = 10", "bind_retry_duration = 7200");
        assert!(matches!(Config::parse(&toml_string), Err(SystemEntry::InvalidConfig)));
    }

    #[test]
    fn rejects_empty_paths() {
        let toml_string = SAMPLE.replace("upload_folder = \"uploads\"", "upload_folder = \" \"");
        assert!(matches!(Config::parse(&toml_string), Err(SystemEntry::InvalidConfig)));
    }

    #[test]
    fn rejects_missing_table() {
        assert!(matches!(Config::parse("http_server_bind_port = 5000"), Err(SystemEntry::ConfigParseError)));
    }
}
