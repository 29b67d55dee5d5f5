//! Folder ownership data model.
//!
//! Value objects (`Email`, `FolderId`, `FolderName`) validate raw strings once
//! at the boundary; entities built from them (`GlobalFolder`, `UserFolder`,
//! `UserFolders`) are immutable snapshots of one retrieval.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Validation errors returned by the folder value-object constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FolderValidationError {
    #[error("email must not be empty")]
    EmptyEmail,
    #[error("email must contain '@': {value}")]
    InvalidEmail { value: String },
    #[error("folder id must not be empty")]
    EmptyFolderId,
    #[error("folder id must be a valid UUID: {value}")]
    InvalidFolderId { value: String },
    #[error("folder name must not be empty")]
    EmptyFolderName,
}

/// Email address identifying the user that owns a set of folders.
///
/// ## Invariants
/// - non-blank once trimmed of whitespace.
/// - contains an `@`.
///
/// # Examples
/// ```
/// use folder_consistency::domain::Email;
///
/// let email = Email::new("john@example.com").expect("valid email");
/// assert_eq!(email.as_ref(), "john@example.com");
/// assert!(Email::new("not-an-email").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Validate and construct an [`Email`] from owned input.
    pub fn new(value: impl Into<String>) -> Result<Self, FolderValidationError> {
        Self::from_owned(value.into())
    }

    fn from_owned(value: String) -> Result<Self, FolderValidationError> {
        if value.trim().is_empty() {
            return Err(FolderValidationError::EmptyEmail);
        }
        if !value.contains('@') {
            return Err(FolderValidationError::InvalidEmail { value });
        }
        Ok(Self(value))
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

impl TryFrom<String> for Email {
    type Error = FolderValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Folder identifier, unique only within the scope of one owning user.
///
/// Equality and hashing use the raw string as supplied, so two spellings of
/// the same UUID (for example upper and lower case) are distinct identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FolderId(Uuid, String);

impl FolderId {
    /// Validate and construct a [`FolderId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, FolderValidationError> {
        Self::from_owned(id.as_ref().to_owned())
    }

    fn from_owned(id: String) -> Result<Self, FolderValidationError> {
        if id.trim().is_empty() {
            return Err(FolderValidationError::EmptyFolderId);
        }
        if id.trim() != id {
            return Err(FolderValidationError::InvalidFolderId { value: id });
        }

        match Uuid::parse_str(&id) {
            Ok(parsed) => Ok(Self(parsed, id)),
            Err(_) => Err(FolderValidationError::InvalidFolderId { value: id }),
        }
    }

    /// Access the parsed UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl AsRef<str> for FolderId {
    fn as_ref(&self) -> &str {
        self.1.as_str()
    }
}

impl fmt::Display for FolderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<FolderId> for String {
    fn from(value: FolderId) -> Self {
        let FolderId(_, raw) = value;
        raw
    }
}

impl TryFrom<String> for FolderId {
    type Error = FolderValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Human readable folder label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FolderName(String);

impl FolderName {
    /// Validate and construct a [`FolderName`] from owned input.
    pub fn new(name: impl Into<String>) -> Result<Self, FolderValidationError> {
        Self::from_owned(name.into())
    }

    fn from_owned(name: String) -> Result<Self, FolderValidationError> {
        if name.trim().is_empty() {
            return Err(FolderValidationError::EmptyFolderName);
        }
        Ok(Self(name))
    }
}

impl AsRef<str> for FolderName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for FolderName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<FolderName> for String {
    fn from(value: FolderName) -> Self {
        value.0
    }
}

impl TryFrom<String> for FolderName {
    type Error = FolderValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// One row of the global folder listing, qualified by its owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalFolder {
    id: FolderId,
    owner: Email,
    name: FolderName,
}

impl GlobalFolder {
    /// Build a global folder from validated components.
    pub fn new(id: FolderId, owner: Email, name: FolderName) -> Self {
        Self { id, owner, name }
    }

    /// Fallible constructor validating raw strings.
    pub fn try_from_strings(
        id: impl AsRef<str>,
        owner: impl Into<String>,
        name: impl Into<String>,
    ) -> Result<Self, FolderValidationError> {
        Ok(Self::new(
            FolderId::new(id)?,
            Email::new(owner)?,
            FolderName::new(name)?,
        ))
    }

    pub fn id(&self) -> &FolderId {
        &self.id
    }

    pub fn owner(&self) -> &Email {
        &self.owner
    }

    pub fn name(&self) -> &FolderName {
        &self.name
    }
}

/// One row of a single user's folder listing; the owner is implicit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserFolder {
    id: FolderId,
    name: FolderName,
}

impl UserFolder {
    /// Build a user folder from validated components.
    pub fn new(id: FolderId, name: FolderName) -> Self {
        Self { id, name }
    }

    /// Fallible constructor validating raw strings.
    pub fn try_from_strings(
        id: impl AsRef<str>,
        name: impl Into<String>,
    ) -> Result<Self, FolderValidationError> {
        Ok(Self::new(FolderId::new(id)?, FolderName::new(name)?))
    }

    pub fn id(&self) -> &FolderId {
        &self.id
    }

    pub fn name(&self) -> &FolderName {
        &self.name
    }
}

/// Complete per-user folder view as returned by one retrieval call.
///
/// Folder order is retrieval order and is preserved by every consumer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserFolders {
    owner: Email,
    folders: Vec<UserFolder>,
}

impl UserFolders {
    /// Bundle an owner with the folders retrieved for them.
    pub fn new(owner: Email, folders: Vec<UserFolder>) -> Self {
        Self { owner, folders }
    }

    /// An owner with no folders at all.
    pub fn empty(owner: Email) -> Self {
        Self::new(owner, Vec::new())
    }

    pub fn owner(&self) -> &Email {
        &self.owner
    }

    pub fn folders(&self) -> &[UserFolder] {
        &self.folders
    }
}
