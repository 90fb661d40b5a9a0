//! Daily status codes and the sparse per-month status map.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A per-day attendance exception for one staff member.
///
/// The sparse map never stores an "empty" value; absence of a key means a
/// normal working day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayStatus {
    /// Full day off.
    FullDayOff,
    /// Half day off.
    HalfDayOff,
    /// On leave.
    OnLeave,
    /// Returned from leave.
    Returned,
    /// Unpaid leave.
    UnpaidLeave,
    /// Free department-specific code.
    Custom(String),
}

impl DayStatus {
    /// Wire/display code for the status.
    pub fn code(&self) -> &str {
        match self {
            DayStatus::FullDayOff => "off",
            DayStatus::HalfDayOff => "off/2",
            DayStatus::OnLeave => "leave",
            DayStatus::Returned => "back",
            DayStatus::UnpaidLeave => "unpaid",
            DayStatus::Custom(code) => code,
        }
    }

    /// Parse a wire code. Unrecognized non-empty codes become `Custom`;
    /// an empty code is None (cleared cell).
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "" => None,
            "off" => Some(DayStatus::FullDayOff),
            "off/2" => Some(DayStatus::HalfDayOff),
            "leave" => Some(DayStatus::OnLeave),
            "back" => Some(DayStatus::Returned),
            "unpaid" => Some(DayStatus::UnpaidLeave),
            other => Some(DayStatus::Custom(other.to_string())),
        }
    }

    /// The fixed choices offered by the status cell editor.
    pub fn fixed_choices() -> &'static [DayStatus] {
        const CHOICES: &[DayStatus] = &[
            DayStatus::FullDayOff,
            DayStatus::HalfDayOff,
            DayStatus::OnLeave,
            DayStatus::Returned,
            DayStatus::UnpaidLeave,
        ];
        CHOICES
    }

    /// Fixed status -> color table used by the exporter and the grid,
    /// as 0xRRGGBB.
    pub fn color_rgb(&self) -> u32 {
        match self {
            DayStatus::FullDayOff => 0xE06666,
            DayStatus::HalfDayOff => 0xF6B26B,
            DayStatus::OnLeave => 0x6FA8DC,
            DayStatus::Returned => 0x93C47D,
            DayStatus::UnpaidLeave => 0xB7B7B7,
            DayStatus::Custom(_) => 0xD9D2E9,
        }
    }
}

impl Serialize for DayStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for DayStatus {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        DayStatus::from_code(&code).ok_or_else(|| serde::de::Error::custom("empty status code"))
    }
}

/// Sparse (staff id -> day-of-month -> status) map for one month.
pub type StatusMap = BTreeMap<String, BTreeMap<u32, DayStatus>>;

/// Look up a status cell.
pub fn get_status<'a>(map: &'a StatusMap, staff_id: &str, day: u32) -> Option<&'a DayStatus> {
    map.get(staff_id).and_then(|days| days.get(&day))
}

/// Set or clear a status cell, keeping the map sparse. Returns the prior
/// value, which the optimistic write path keeps for rollback.
pub fn set_status(map: &mut StatusMap, staff_id: &str, day: u32, value: Option<DayStatus>) -> Option<DayStatus> {
    match value {
        Some(status) => map.entry(staff_id.to_string()).or_default().insert(day, status),
        None => {
            let prior = map.get_mut(staff_id).and_then(|days| days.remove(&day));
            if map.get(staff_id).is_some_and(|days| days.is_empty()) {
                map.remove(staff_id);
            }
            prior
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_round_trip() {
        for status in DayStatus::fixed_choices() {
            assert_eq!(DayStatus::from_code(status.code()), Some(status.clone()));
        }
    }

    #[test]
    fn test_custom_code() {
        let status = DayStatus::from_code("WFH").unwrap();
        assert_eq!(status, DayStatus::Custom("WFH".to_string()));
        assert_eq!(status.code(), "WFH");
    }

    #[test]
    fn test_empty_code_is_none() {
        assert_eq!(DayStatus::from_code(""), None);
        assert_eq!(DayStatus::from_code("  "), None);
    }

    #[test]
    fn test_set_returns_prior() {
        let mut map = StatusMap::new();

        assert_eq!(set_status(&mut map, "u-1", 3, Some(DayStatus::OnLeave)), None);
        let prior = set_status(&mut map, "u-1", 3, Some(DayStatus::FullDayOff));
        assert_eq!(prior, Some(DayStatus::OnLeave));
    }

    #[test]
    fn test_clear_prunes_empty_staff_entry() {
        let mut map = StatusMap::new();
        set_status(&mut map, "u-1", 3, Some(DayStatus::OnLeave));

        set_status(&mut map, "u-1", 3, None);
        assert!(!map.contains_key("u-1"));
    }

    #[test]
    fn test_clear_keeps_remaining_days() {
        let mut map = StatusMap::new();
        set_status(&mut map, "u-1", 3, Some(DayStatus::OnLeave));
        set_status(&mut map, "u-1", 4, Some(DayStatus::Returned));

        set_status(&mut map, "u-1", 3, None);
        assert_eq!(get_status(&map, "u-1", 4), Some(&DayStatus::Returned));
    }

    #[test]
    fn test_serde_as_code_string() {
        let json = serde_json::to_string(&DayStatus::HalfDayOff).unwrap();
        assert_eq!(json, "\"off/2\"");

        let back: DayStatus = serde_json::from_str("\"off/2\"").unwrap();
        assert_eq!(back, DayStatus::HalfDayOff);
    }
}
