//! Staff directory types.
//!
//! The directory is owned by the external user service; records are
//! read-only here and referenced everywhere else by plain string id.

use serde::{Deserialize, Serialize};

/// A person in the staff directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Staff {
    pub id: String,
    pub username: String,
    pub department: String,
}

/// A staff reference as it appears on the wire.
///
/// The backend returns bare identifiers in some payloads and expanded
/// sub-objects in others. Lookups assume string equality, so every
/// reference is normalized to the plain id before it reaches local state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StaffRef {
    Id(String),
    Expanded { id: String, username: Option<String> },
}

impl StaffRef {
    /// Collapse the reference to its plain string id.
    pub fn into_id(self) -> String {
        match self {
            StaffRef::Id(id) => id,
            StaffRef::Expanded { id, .. } => id,
        }
    }

    /// Borrow the plain string id.
    pub fn id(&self) -> &str {
        match self {
            StaffRef::Id(id) => id,
            StaffRef::Expanded { id, .. } => id,
        }
    }
}

impl Staff {
    /// Find a staff member by id in a directory slice.
    pub fn find<'a>(directory: &'a [Staff], id: &str) -> Option<&'a Staff> {
        directory.iter().find(|s| s.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_ref_deserializes() {
        let r: StaffRef = serde_json::from_str("\"u-17\"").unwrap();
        assert_eq!(r.into_id(), "u-17");
    }

    #[test]
    fn test_expanded_ref_deserializes() {
        let r: StaffRef = serde_json::from_str(r#"{"id": "u-17", "username": "lan.tran"}"#).unwrap();
        assert_eq!(r.id(), "u-17");
    }

    #[test]
    fn test_expanded_ref_without_username() {
        let r: StaffRef = serde_json::from_str(r#"{"id": "u-42"}"#).unwrap();
        assert_eq!(r.into_id(), "u-42");
    }

    #[test]
    fn test_find_in_directory() {
        let directory = vec![
            Staff {
                id: "u-1".to_string(),
                username: "an.ngo".to_string(),
                department: "customer-service".to_string(),
            },
            Staff {
                id: "u-2".to_string(),
                username: "binh.le".to_string(),
                department: "import-export".to_string(),
            },
        ];

        assert_eq!(Staff::find(&directory, "u-2").unwrap().username, "binh.le");
        assert!(Staff::find(&directory, "u-9").is_none());
    }
}
