//! INI file configuration adapter.

use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

#[derive(Debug)]
pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let mut config = Ini::new();
        config.load(path).map_err(std::io::Error::other)?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, String> {
        let mut config = Ini::new();
        config.read(content.to_string())?;
        Ok(Self { config })
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.config
            .getint(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn from_string_parses_config() {
        let content = r#"
[exchange]
name = Global Beverage Corporation Exchange
vwsp_max_age = 600
stocks_file = stocks.csv
"#;
        let adapter = FileConfigAdapter::from_string(content).unwrap();
        assert_eq!(
            adapter.get_string("exchange", "name"),
            Some("Global Beverage Corporation Exchange".to_string())
        );
        assert_eq!(
            adapter.get_string("exchange", "stocks_file"),
            Some("stocks.csv".to_string())
        );
    }

    #[test]
    fn get_string_returns_none_for_missing_key() {
        let adapter = FileConfigAdapter::from_string("[exchange]\nname = X\n").unwrap();
        assert_eq!(adapter.get_string("exchange", "missing"), None);
        assert_eq!(adapter.get_string("missing_section", "name"), None);
    }

    #[test]
    fn keys_are_case_insensitive() {
        let adapter = FileConfigAdapter::from_string("[Exchange]\nVWSP_Max_Age = 60\n").unwrap();
        assert_eq!(adapter.get_int("exchange", "vwsp_max_age", 0), 60);
    }

    #[test]
    fn values_keep_their_case() {
        let adapter = FileConfigAdapter::from_string("[exchange]\nsymbols = tea,POP\n").unwrap();
        assert_eq!(
            adapter.get_string("exchange", "symbols"),
            Some("tea,POP".to_string())
        );
    }

    #[test]
    fn get_int_returns_value() {
        let adapter = FileConfigAdapter::from_string("[exchange]\nvwsp_max_age = 300\n").unwrap();
        assert_eq!(adapter.get_int("exchange", "vwsp_max_age", 900), 300);
    }

    #[test]
    fn get_int_returns_default_for_missing() {
        let adapter = FileConfigAdapter::from_string("[exchange]\n").unwrap();
        assert_eq!(adapter.get_int("exchange", "vwsp_max_age", 900), 900);
    }

    #[test]
    fn get_int_returns_default_for_non_numeric() {
        let adapter = FileConfigAdapter::from_string("[exchange]\nvwsp_max_age = soon\n").unwrap();
        assert_eq!(adapter.get_int("exchange", "vwsp_max_age", 900), 900);
    }

    #[test]
    fn from_file_reads_config() {
        let file = create_temp_config("[exchange]\nname = Test Exchange\n");
        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();
        assert_eq!(
            adapter.get_string("exchange", "name"),
            Some("Test Exchange".to_string())
        );
    }

    #[test]
    fn from_file_returns_error_for_missing_file() {
        let result = FileConfigAdapter::from_file("/nonexistent/path/config.ini");
        assert!(result.is_err());
    }
}
