use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
pub enum AdjustKind {
    PublicHoliday,
    Leave,
    Sick,
    Training,
}

impl AdjustKind {
    pub fn ak_from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "P" | "HOLIDAY" | "PUBLIC-HOLIDAY" => Some(Self::PublicHoliday),
            "L" | "LEAVE" => Some(Self::Leave),
            "S" | "SICK" => Some(Self::Sick),
            "T" | "TRAINING" => Some(Self::Training),
            _ => None,
        }
    }

    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            AdjustKind::PublicHoliday => "P",
            AdjustKind::Leave => "L",
            AdjustKind::Sick => "S",
            AdjustKind::Training => "T",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "P" => Some(AdjustKind::PublicHoliday),
            "L" => Some(AdjustKind::Leave),
            "S" => Some(AdjustKind::Sick),
            "T" => Some(AdjustKind::Training),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AdjustKind::PublicHoliday => "Public Holiday",
            AdjustKind::Leave => "Leave",
            AdjustKind::Sick => "Sick",
            AdjustKind::Training => "Training",
        }
    }

    pub fn all() -> [AdjustKind; 4] {
        [
            AdjustKind::PublicHoliday,
            AdjustKind::Leave,
            AdjustKind::Sick,
            AdjustKind::Training,
        ]
    }

    pub fn is_public_holiday(&self) -> bool {
        matches!(self, AdjustKind::PublicHoliday)
    }
}
