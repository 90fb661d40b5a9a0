//! Sparse per-(staff, day) note overlay, independent of daily statuses.

use std::collections::BTreeMap;

/// Sparse (staff id -> day-of-month -> note text) map for one month.
pub type NoteMap = BTreeMap<String, BTreeMap<u32, String>>;

/// Read the note for a cell, if any.
pub fn get_note<'a>(map: &'a NoteMap, staff_id: &str, day: u32) -> Option<&'a str> {
    map.get(staff_id).and_then(|days| days.get(&day)).map(String::as_str)
}

/// Create or update the note for a cell. Blank text deletes instead, so the
/// map never holds empty strings.
pub fn set_note(map: &mut NoteMap, staff_id: &str, day: u32, text: &str) {
    let text = text.trim();
    if text.is_empty() {
        remove_note(map, staff_id, day);
        return;
    }
    map.entry(staff_id.to_string()).or_default().insert(day, text.to_string());
}

/// Delete the note for a cell, pruning the staff entry entirely once its
/// last day-note is removed.
pub fn remove_note(map: &mut NoteMap, staff_id: &str, day: u32) {
    if let Some(days) = map.get_mut(staff_id) {
        days.remove(&day);
        if days.is_empty() {
            map.remove(staff_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let mut map = NoteMap::new();
        set_note(&mut map, "u-1", 12, "covering for u-2");

        assert_eq!(get_note(&map, "u-1", 12), Some("covering for u-2"));
        assert_eq!(get_note(&map, "u-1", 13), None);
    }

    #[test]
    fn test_removing_last_note_prunes_staff_key() {
        let mut map = NoteMap::new();
        set_note(&mut map, "u-1", 12, "late start");

        remove_note(&mut map, "u-1", 12);
        assert!(!map.contains_key("u-1"));
    }

    #[test]
    fn test_remove_keeps_other_days() {
        let mut map = NoteMap::new();
        set_note(&mut map, "u-1", 12, "late start");
        set_note(&mut map, "u-1", 20, "early leave");

        remove_note(&mut map, "u-1", 12);
        assert_eq!(get_note(&map, "u-1", 20), Some("early leave"));
        assert!(map.contains_key("u-1"));
    }

    #[test]
    fn test_blank_text_deletes() {
        let mut map = NoteMap::new();
        set_note(&mut map, "u-1", 12, "late start");

        set_note(&mut map, "u-1", 12, "   ");
        assert!(!map.contains_key("u-1"));
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut map = NoteMap::new();
        remove_note(&mut map, "u-9", 1);
        assert!(map.is_empty());
    }
}
