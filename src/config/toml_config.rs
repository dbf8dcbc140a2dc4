use crate::config::ServiceConfig;
use crate::domain::model::DiamondGroup;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{DiamondError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

/// 批次規格表：服務設定與各組鑽石
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub groups: Vec<DiamondGroup>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(DiamondError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| DiamondError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${PRICING_API_URL})；未設定的變數保留原文
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| DiamondError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl ConfigProvider for TomlConfig {
    fn base_url(&self) -> &str {
        self.service.base_url()
    }

    fn timeout(&self) -> Option<Duration> {
        self.service.timeout()
    }

    fn headers(&self) -> &HashMap<String, String> {
        self.service.headers()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.service.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Certification, Clarity, Color, Cut};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_lot_sheet() {
        let toml_content = r#"
[service]
base_url = "https://pricing.example.com"
timeout_seconds = 15

[service.headers]
X-Client = "lot-desk"

[[groups]]
carat = 1.5
quantity = 2
cut = "very-good"
color = "F"
clarity = "VS1"
certification = "AGS"

[[groups]]
carat = 0.5
quantity = 10
cut = "good"
color = "H"
clarity = "SI2"
certification = "uncertified"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.base_url(), "https://pricing.example.com");
        assert_eq!(config.timeout(), Some(Duration::from_secs(15)));
        assert_eq!(config.headers().get("X-Client").map(String::as_str), Some("lot-desk"));
        assert_eq!(config.groups.len(), 2);
        assert_eq!(config.groups[0].cut, Cut::VeryGood);
        assert_eq!(config.groups[0].certification, Certification::Ags);
        assert_eq!(config.groups[1].clarity, Clarity::Si2);
        assert_eq!(config.groups[1].certification, Certification::Uncertified);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_group_fields_take_defaults() {
        let toml_content = r#"
[[groups]]
carat = 2.0

[[groups]]
color = "J"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.service, ServiceConfig::default());
        assert_eq!(config.groups[0].carat, 2.0);
        assert_eq!(config.groups[0].quantity, 1);
        assert_eq!(config.groups[0].color, Color::D);
        assert_eq!(config.groups[1].carat, 1.0);
        assert_eq!(config.groups[1].color, Color::J);
    }

    #[test]
    fn test_unknown_grade_rejected() {
        let toml_content = r#"
[[groups]]
clarity = "I1"
"#;

        let err = TomlConfig::from_toml_str(toml_content).unwrap_err();
        assert!(matches!(err, DiamondError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("DIAMOND_CALC_TEST_BASE_URL", "https://test.pricing.com");

        let toml_content = r#"
[service]
base_url = "${DIAMOND_CALC_TEST_BASE_URL}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.service.base_url, "https://test.pricing.com");

        std::env::remove_var("DIAMOND_CALC_TEST_BASE_URL");
    }

    #[test]
    fn test_unset_env_var_left_in_place() {
        let toml_content = r#"
[service]
base_url = "${DIAMOND_CALC_TEST_UNSET_VAR}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.service.base_url, "${DIAMOND_CALC_TEST_UNSET_VAR}");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[service]
base_url = "http://127.0.0.1:9000"

[[groups]]
carat = 0.9
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.base_url(), "http://127.0.0.1:9000");
        assert_eq!(config.groups.len(), 1);
    }

    #[test]
    fn test_missing_file() {
        let err = TomlConfig::from_file("/nonexistent/lot-sheet.toml").unwrap_err();
        assert!(matches!(err, DiamondError::IoError(_)));
    }
}
