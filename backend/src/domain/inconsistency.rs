//! Classified differences between the per-user and global folder views.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{Email, FolderId, FolderName};

/// Discriminant of an [`Inconsistency`], used as the grouping key of reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InconsistencyKind {
    /// Both views know the folder but disagree on its name.
    NameMismatch,
    /// The user's view has the folder; the global view does not.
    MissingInGlobal,
    /// The global view has the folder; the user's view does not.
    MissingInUserFolders,
}

impl InconsistencyKind {
    /// Every kind in declaration order.
    pub const ALL: [Self; 3] = [
        Self::NameMismatch,
        Self::MissingInGlobal,
        Self::MissingInUserFolders,
    ];

    /// Stable wire name, e.g. `NAME_MISMATCH`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NameMismatch => "NAME_MISMATCH",
            Self::MissingInGlobal => "MISSING_IN_GLOBAL",
            Self::MissingInUserFolders => "MISSING_IN_USER_FOLDERS",
        }
    }
}

impl fmt::Display for InconsistencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One discrepancy for an owner-qualified folder.
///
/// Each variant carries exactly the names its kind can know about: a
/// mismatch has both, a missing folder only has the side that exists.
///
/// # Examples
/// ```
/// use folder_consistency::domain::{
///     Email, FolderId, FolderName, Inconsistency, InconsistencyKind,
/// };
///
/// let record = Inconsistency::MissingInGlobal {
///     folder_id: FolderId::new("550e8400-e29b-41d4-a716-446655440000").unwrap(),
///     owner: Email::new("bob@example.com").unwrap(),
///     user_name: FolderName::new("Draft").unwrap(),
/// };
/// assert_eq!(record.kind(), InconsistencyKind::MissingInGlobal);
/// assert!(record.global_name().is_none());
/// assert_eq!(record.user_name().map(AsRef::as_ref), Some("Draft"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inconsistency {
    NameMismatch {
        folder_id: FolderId,
        owner: Email,
        global_name: FolderName,
        user_name: FolderName,
    },
    MissingInGlobal {
        folder_id: FolderId,
        owner: Email,
        user_name: FolderName,
    },
    MissingInUserFolders {
        folder_id: FolderId,
        owner: Email,
        global_name: FolderName,
    },
}

impl Inconsistency {
    pub fn kind(&self) -> InconsistencyKind {
        match self {
            Self::NameMismatch { .. } => InconsistencyKind::NameMismatch,
            Self::MissingInGlobal { .. } => InconsistencyKind::MissingInGlobal,
            Self::MissingInUserFolders { .. } => InconsistencyKind::MissingInUserFolders,
        }
    }

    pub fn folder_id(&self) -> &FolderId {
        match self {
            Self::NameMismatch { folder_id, .. }
            | Self::MissingInGlobal { folder_id, .. }
            | Self::MissingInUserFolders { folder_id, .. } => folder_id,
        }
    }

    pub fn owner(&self) -> &Email {
        match self {
            Self::NameMismatch { owner, .. }
            | Self::MissingInGlobal { owner, .. }
            | Self::MissingInUserFolders { owner, .. } => owner,
        }
    }

    /// Name recorded by the global view, when it has the folder.
    pub fn global_name(&self) -> Option<&FolderName> {
        match self {
            Self::NameMismatch { global_name, .. }
            | Self::MissingInUserFolders { global_name, .. } => Some(global_name),
            Self::MissingInGlobal { .. } => None,
        }
    }

    /// Name recorded by the user's view, when it has the folder.
    pub fn user_name(&self) -> Option<&FolderName> {
        match self {
            Self::NameMismatch { user_name, .. } | Self::MissingInGlobal { user_name, .. } => {
                Some(user_name)
            }
            Self::MissingInUserFolders { .. } => None,
        }
    }
}

impl fmt::Display for Inconsistency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{kind} folder={folder} owner={owner} global={global} user={user}",
            kind = self.kind(),
            folder = self.folder_id(),
            owner = self.owner(),
            global = self.global_name().map_or("N/A", AsRef::as_ref),
            user = self.user_name().map_or("N/A", AsRef::as_ref),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn folder_id() -> FolderId {
        FolderId::new("550e8400-e29b-41d4-a716-446655440000").expect("folder id")
    }

    #[fixture]
    fn owner() -> Email {
        Email::new("alice@example.com").expect("email")
    }

    fn name(raw: &str) -> FolderName {
        FolderName::new(raw).expect("folder name")
    }

    #[rstest]
    fn name_mismatch_carries_both_names(folder_id: FolderId, owner: Email) {
        let record = Inconsistency::NameMismatch {
            folder_id,
            owner,
            global_name: name("INBOX_WRONG"),
            user_name: name("Inbox"),
        };
        assert_eq!(record.kind(), InconsistencyKind::NameMismatch);
        assert_eq!(record.global_name(), Some(&name("INBOX_WRONG")));
        assert_eq!(record.user_name(), Some(&name("Inbox")));
    }

    #[rstest]
    fn missing_in_user_folders_only_has_global_name(folder_id: FolderId, owner: Email) {
        let record = Inconsistency::MissingInUserFolders {
            folder_id: folder_id.clone(),
            owner: owner.clone(),
            global_name: name("Sent"),
        };
        assert_eq!(record.kind(), InconsistencyKind::MissingInUserFolders);
        assert_eq!(record.folder_id(), &folder_id);
        assert_eq!(record.owner(), &owner);
        assert_eq!(record.global_name(), Some(&name("Sent")));
        assert!(record.user_name().is_none());
    }

    #[rstest]
    fn display_marks_absent_names(folder_id: FolderId, owner: Email) {
        let record = Inconsistency::MissingInGlobal {
            folder_id,
            owner,
            user_name: name("Draft"),
        };
        assert_eq!(
            record.to_string(),
            "MISSING_IN_GLOBAL folder=550e8400-e29b-41d4-a716-446655440000 \
             owner=alice@example.com global=N/A user=Draft"
        );
    }

    #[rstest]
    #[case(InconsistencyKind::NameMismatch, "\"NAME_MISMATCH\"")]
    #[case(InconsistencyKind::MissingInGlobal, "\"MISSING_IN_GLOBAL\"")]
    #[case(InconsistencyKind::MissingInUserFolders, "\"MISSING_IN_USER_FOLDERS\"")]
    fn kind_serialises_to_wire_name(#[case] kind: InconsistencyKind, #[case] expected: &str) {
        let json = serde_json::to_string(&kind).expect("serialise kind");
        assert_eq!(json, expected);
        assert_eq!(format!("\"{kind}\""), expected);
    }
}
