use serde::{Deserialize, Serialize};

/// Qualitative bucket derived from the overall percentage.
///
/// Lower bounds are inclusive: 90 and 70 land in the higher tier. A zero
/// percentage means nothing has been rated yet and carries no rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ranking {
    Unranked,
    Excellent,
    Satisfactory,
    Failing,
}

impl Ranking {
    pub fn from_percent(percent: f64) -> Self {
        if percent <= 0.0 {
            Self::Unranked
        } else if percent >= 90.0 {
            Self::Excellent
        } else if percent >= 70.0 {
            Self::Satisfactory
        } else {
            Self::Failing
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Unranked => "---",
            Self::Excellent => "Xuất Sắc",
            Self::Satisfactory => "Đạt Yêu Cầu",
            Self::Failing => "Không Đạt",
        }
    }
}
