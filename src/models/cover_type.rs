use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator, IntoStaticStr};

/// Dominant forest vegetation on a land patch.
///
/// Discriminants are the integer classes the classifier was trained on.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, IntoStaticStr,
)]
pub enum CoverType {
    #[strum(serialize = "Spruce/Fir")]
    #[serde(rename = "Spruce/Fir")]
    SpruceFir = 1,

    #[strum(serialize = "Lodgepole Pine")]
    #[serde(rename = "Lodgepole Pine")]
    LodgepolePine = 2,

    #[strum(serialize = "Ponderosa Pine")]
    #[serde(rename = "Ponderosa Pine")]
    PonderosaPine = 3,

    #[strum(serialize = "Cottonwood/Willow")]
    #[serde(rename = "Cottonwood/Willow")]
    CottonwoodWillow = 4,

    #[strum(serialize = "Aspen")]
    #[serde(rename = "Aspen")]
    Aspen = 5,

    #[strum(serialize = "Douglas-fir")]
    #[serde(rename = "Douglas-fir")]
    DouglasFir = 6,

    #[strum(serialize = "Krummholz")]
    #[serde(rename = "Krummholz")]
    Krummholz = 7,
}

impl CoverType {
    /// Look up the cover type for a classifier output.
    pub fn from_class(class: i64) -> Result<Self> {
        match class {
            1 => Ok(CoverType::SpruceFir),
            2 => Ok(CoverType::LodgepolePine),
            3 => Ok(CoverType::PonderosaPine),
            4 => Ok(CoverType::CottonwoodWillow),
            5 => Ok(CoverType::Aspen),
            6 => Ok(CoverType::DouglasFir),
            7 => Ok(CoverType::Krummholz),
            other => Err(AppError::UnknownClass(other)),
        }
    }

    /// Integer class (1-7)
    pub fn class(&self) -> u8 {
        *self as u8
    }

    /// Display name
    pub fn label(&self) -> &'static str {
        self.into()
    }

    /// The full label table in class order
    pub fn all() -> Vec<CoverType> {
        CoverType::iter().collect()
    }
}

impl TryFrom<i64> for CoverType {
    type Error = AppError;

    fn try_from(class: i64) -> Result<Self> {
        CoverType::from_class(class)
    }
}
