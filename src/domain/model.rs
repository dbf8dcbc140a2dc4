use crate::utils::error::{DiamondError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 輸入元件允許的最小克拉數
pub const MIN_CARAT: f64 = 0.1;
/// 輸入元件允許的最小數量
pub const MIN_QUANTITY: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Cut {
    #[default]
    Excellent,
    VeryGood,
    Good,
    Fair,
    Poor,
}

impl Cut {
    pub const ALL: [Cut; 5] = [Cut::Excellent, Cut::VeryGood, Cut::Good, Cut::Fair, Cut::Poor];

    pub fn as_str(&self) -> &'static str {
        match self {
            Cut::Excellent => "excellent",
            Cut::VeryGood => "very-good",
            Cut::Good => "good",
            Cut::Fair => "fair",
            Cut::Poor => "poor",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Color {
    #[default]
    D,
    E,
    F,
    G,
    H,
    I,
    J,
}

impl Color {
    pub const ALL: [Color; 7] = [
        Color::D,
        Color::E,
        Color::F,
        Color::G,
        Color::H,
        Color::I,
        Color::J,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Color::D => "D",
            Color::E => "E",
            Color::F => "F",
            Color::G => "G",
            Color::H => "H",
            Color::I => "I",
            Color::J => "J",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Clarity {
    #[default]
    #[serde(rename = "FL")]
    Flawless,
    #[serde(rename = "IF")]
    InternallyFlawless,
    #[serde(rename = "VVS1")]
    Vvs1,
    #[serde(rename = "VVS2")]
    Vvs2,
    #[serde(rename = "VS1")]
    Vs1,
    #[serde(rename = "VS2")]
    Vs2,
    #[serde(rename = "SI1")]
    Si1,
    #[serde(rename = "SI2")]
    Si2,
}

impl Clarity {
    pub const ALL: [Clarity; 8] = [
        Clarity::Flawless,
        Clarity::InternallyFlawless,
        Clarity::Vvs1,
        Clarity::Vvs2,
        Clarity::Vs1,
        Clarity::Vs2,
        Clarity::Si1,
        Clarity::Si2,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Clarity::Flawless => "FL",
            Clarity::InternallyFlawless => "IF",
            Clarity::Vvs1 => "VVS1",
            Clarity::Vvs2 => "VVS2",
            Clarity::Vs1 => "VS1",
            Clarity::Vs2 => "VS2",
            Clarity::Si1 => "SI1",
            Clarity::Si2 => "SI2",
        }
    }
}

/// 鑑定機構；`Uncertified` 表示無證書
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Certification {
    #[default]
    #[serde(rename = "GIA")]
    Gia,
    #[serde(rename = "AGS")]
    Ags,
    #[serde(rename = "IGI")]
    Igi,
    #[serde(rename = "HRD")]
    Hrd,
    #[serde(rename = "uncertified")]
    Uncertified,
}

impl Certification {
    pub const ALL: [Certification; 5] = [
        Certification::Gia,
        Certification::Ags,
        Certification::Igi,
        Certification::Hrd,
        Certification::Uncertified,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Certification::Gia => "GIA",
            Certification::Ags => "AGS",
            Certification::Igi => "IGI",
            Certification::Hrd => "HRD",
            Certification::Uncertified => "uncertified",
        }
    }
}

fn unknown_grade(axis: &str, value: &str, allowed: Vec<&str>) -> DiamondError {
    DiamondError::ValidationError {
        message: format!(
            "Unknown {} '{}'. Allowed values: {}",
            axis,
            value,
            allowed.join(", ")
        ),
    }
}

impl FromStr for Cut {
    type Err = DiamondError;

    // 服務端會先轉小寫再比對，這裡同樣不分大小寫
    fn from_str(s: &str) -> Result<Self> {
        let lowered = s.trim().to_lowercase();
        Cut::ALL
            .into_iter()
            .find(|c| c.as_str() == lowered)
            .ok_or_else(|| unknown_grade("cut", s, Cut::ALL.iter().map(Cut::as_str).collect()))
    }
}

impl FromStr for Color {
    type Err = DiamondError;

    fn from_str(s: &str) -> Result<Self> {
        Color::ALL
            .into_iter()
            .find(|c| c.as_str() == s.trim())
            .ok_or_else(|| {
                unknown_grade("color", s, Color::ALL.iter().map(Color::as_str).collect())
            })
    }
}

impl FromStr for Clarity {
    type Err = DiamondError;

    fn from_str(s: &str) -> Result<Self> {
        Clarity::ALL
            .into_iter()
            .find(|c| c.as_str() == s.trim())
            .ok_or_else(|| {
                unknown_grade(
                    "clarity",
                    s,
                    Clarity::ALL.iter().map(Clarity::as_str).collect(),
                )
            })
    }
}

impl FromStr for Certification {
    type Err = DiamondError;

    fn from_str(s: &str) -> Result<Self> {
        Certification::ALL
            .into_iter()
            .find(|c| c.as_str() == s.trim())
            .ok_or_else(|| {
                unknown_grade(
                    "certification",
                    s,
                    Certification::ALL.iter().map(Certification::as_str).collect(),
                )
            })
    }
}

impl fmt::Display for Cut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl fmt::Display for Clarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl fmt::Display for Certification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// 一組規格相同的鑽石
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiamondGroup {
    pub carat: f64,
    pub quantity: u32,
    pub cut: Cut,
    pub color: Color,
    pub clarity: Clarity,
    pub certification: Certification,
}

impl Default for DiamondGroup {
    fn default() -> Self {
        Self {
            carat: 1.0,
            quantity: 1,
            cut: Cut::default(),
            color: Color::default(),
            clarity: Clarity::default(),
            certification: Certification::default(),
        }
    }
}

impl DiamondGroup {
    /// 套用單一欄位更新，回傳新的群組，原值不變
    pub fn with_update(&self, update: GroupUpdate) -> Self {
        let mut next = self.clone();
        match update {
            GroupUpdate::Carat(v) => next.carat = v,
            GroupUpdate::Quantity(v) => next.quantity = v,
            GroupUpdate::Cut(v) => next.cut = v,
            GroupUpdate::Color(v) => next.color = v,
            GroupUpdate::Clarity(v) => next.clarity = v,
            GroupUpdate::Certification(v) => next.certification = v,
        }
        next
    }

    /// 解析 `carat=1.2,quantity=3,cut=good` 形式的規格字串；未指定欄位使用預設值
    pub fn parse_spec(spec: &str) -> Result<Self> {
        let mut group = DiamondGroup::default();
        for pair in spec.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (key, value) = pair
                .split_once('=')
                .ok_or_else(|| DiamondError::ValidationError {
                    message: format!("Expected field=value, got '{}'", pair),
                })?;
            let field: GroupField = key.parse()?;
            group = group.with_update(GroupUpdate::parse(field, value)?);
        }
        Ok(group)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupField {
    Carat,
    Quantity,
    Cut,
    Color,
    Clarity,
    Certification,
}

impl GroupField {
    pub const ALL: [GroupField; 6] = [
        GroupField::Carat,
        GroupField::Quantity,
        GroupField::Cut,
        GroupField::Color,
        GroupField::Clarity,
        GroupField::Certification,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GroupField::Carat => "carat",
            GroupField::Quantity => "quantity",
            GroupField::Cut => "cut",
            GroupField::Color => "color",
            GroupField::Clarity => "clarity",
            GroupField::Certification => "certification",
        }
    }
}

impl FromStr for GroupField {
    type Err = DiamondError;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim().to_lowercase();
        GroupField::ALL
            .into_iter()
            .find(|f| f.as_str() == key)
            .ok_or_else(|| {
                unknown_grade(
                    "field",
                    s,
                    GroupField::ALL.iter().map(GroupField::as_str).collect(),
                )
            })
    }
}

impl fmt::Display for GroupField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// 一個欄位與該欄位型別的值
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GroupUpdate {
    Carat(f64),
    Quantity(u32),
    Cut(Cut),
    Color(Color),
    Clarity(Clarity),
    Certification(Certification),
}

impl GroupUpdate {
    pub fn field(&self) -> GroupField {
        match self {
            GroupUpdate::Carat(_) => GroupField::Carat,
            GroupUpdate::Quantity(_) => GroupField::Quantity,
            GroupUpdate::Cut(_) => GroupField::Cut,
            GroupUpdate::Color(_) => GroupField::Color,
            GroupUpdate::Clarity(_) => GroupField::Clarity,
            GroupUpdate::Certification(_) => GroupField::Certification,
        }
    }

    /// 將輸入框文字轉為更新；數值不做範圍檢查
    pub fn parse(field: GroupField, raw: &str) -> Result<Self> {
        let raw = raw.trim();
        let update = match field {
            GroupField::Carat => {
                let carat = raw
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| DiamondError::ValidationError {
                        message: format!("carat must be a number, got '{}'", raw),
                    })?;
                GroupUpdate::Carat(carat)
            }
            GroupField::Quantity => {
                GroupUpdate::Quantity(raw.parse().map_err(|_| DiamondError::ValidationError {
                    message: format!("quantity must be a whole number, got '{}'", raw),
                })?)
            }
            GroupField::Cut => GroupUpdate::Cut(raw.parse()?),
            GroupField::Color => GroupUpdate::Color(raw.parse()?),
            GroupField::Clarity => GroupUpdate::Clarity(raw.parse()?),
            GroupField::Certification => GroupUpdate::Certification(raw.parse()?),
        };
        Ok(update)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationRequest {
    pub groups: Vec<DiamondGroup>,
}

/// 服務回傳的群組識別碼；參考服務使用從 1 起算的整數
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GroupId {
    Index(u64),
    Label(String),
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupId::Index(i) => write!(f, "{}", i),
            GroupId::Label(s) => f.pad(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupDetails {
    pub quantity: u32,
    pub carat: f64,
    pub color: String,
    pub clarity: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cut: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certification: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupResult {
    pub group_id: GroupId,
    pub per_diamond: f64,
    pub total: f64,
    pub details: GroupDetails,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub results: Vec<GroupResult>,
    pub grand_total: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceStatus {
    pub status: String,
}

impl ServiceStatus {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}
