use serde::Serialize;

/// Attendance status of a day record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DayStatus {
    Present,
    Absent,
    Leave,
    Late,
}

impl DayStatus {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            DayStatus::Present => "present",
            DayStatus::Absent => "absent",
            DayStatus::Leave => "leave",
            DayStatus::Late => "late",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "present" => Some(DayStatus::Present),
            "absent" => Some(DayStatus::Absent),
            "leave" => Some(DayStatus::Leave),
            "late" => Some(DayStatus::Late),
            _ => None,
        }
    }

    /// Helper: convert input code from CLI (lowercase or uppercase)
    pub fn from_code(code: &str) -> Option<Self> {
        DayStatus::from_db_str(&code.to_lowercase())
    }

    /// Whether the day earns salary. Only worked statuses do.
    pub fn is_payable(&self) -> bool {
        matches!(self, DayStatus::Present | DayStatus::Late)
    }
}
