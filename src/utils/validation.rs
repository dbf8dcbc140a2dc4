use crate::domain::model::{DiamondGroup, MIN_CARAT, MIN_QUANTITY};
use crate::utils::error::{DiamondError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(DiamondError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(DiamondError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(DiamondError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(DiamondError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(DiamondError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_minimum<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
) -> Result<()> {
    if value < min {
        return Err(DiamondError::ValidationError {
            message: format!("{} must be at least {} (got {})", field_name, min, value),
        });
    }
    Ok(())
}

/// 與輸入元件相同的下限檢查；只用於提示，不阻擋送出
pub fn group_warnings(groups: &[DiamondGroup]) -> Vec<String> {
    let mut warnings = Vec::new();
    for (index, group) in groups.iter().enumerate() {
        let label = format!("groups[{}]", index);
        if !group.carat.is_finite() {
            warnings.push(format!("{}.carat is not a number", label));
        } else if let Err(e) =
            validate_minimum(&format!("{}.carat", label), group.carat, MIN_CARAT)
        {
            warnings.push(e.user_friendly_message());
        }
        if let Err(e) =
            validate_minimum(&format!("{}.quantity", label), group.quantity, MIN_QUANTITY)
        {
            warnings.push(e.user_friendly_message());
        }
    }
    warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("service.base_url", "https://example.com").is_ok());
        assert!(validate_url("service.base_url", "http://localhost:8000").is_ok());
        assert!(validate_url("service.base_url", "").is_err());
        assert!(validate_url("service.base_url", "invalid-url").is_err());
        assert!(validate_url("service.base_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("service.timeout_seconds", 5, 1).is_ok());
        assert!(validate_positive_number("service.timeout_seconds", 0, 1).is_err());
    }

    #[test]
    fn test_group_warnings_flag_values_below_widget_minimums() {
        let ok = DiamondGroup::default();
        assert!(group_warnings(&[ok.clone()]).is_empty());

        let light = DiamondGroup {
            carat: 0.05,
            ..DiamondGroup::default()
        };
        let empty = DiamondGroup {
            quantity: 0,
            ..DiamondGroup::default()
        };
        let warnings = group_warnings(&[ok, light, empty]);
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("groups[1].carat"));
        assert!(warnings[1].contains("groups[2].quantity"));
    }

    #[test]
    fn test_group_warnings_flag_nan_carat() {
        let group = DiamondGroup {
            carat: f64::NAN,
            ..DiamondGroup::default()
        };
        assert_eq!(group_warnings(&[group]), vec!["groups[0].carat is not a number"]);
    }
}
