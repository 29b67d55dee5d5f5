//! DTOs for decoding the upstream folder API.
//!
//! Responses decode into these transport shapes first and are then converted
//! into validated domain values in one pass.

use serde::Deserialize;

use crate::domain::{Email, FolderValidationError, GlobalFolder, UserFolder, UserFolders};

/// Row of `GET /users/{email}/folders`.
#[derive(Debug, Deserialize)]
pub(super) struct UserFolderDto {
    pub(super) id: String,
    pub(super) name: String,
}

/// Row of `GET /folders`. `user` is the owner's email.
#[derive(Debug, Deserialize)]
pub(super) struct GlobalFolderDto {
    pub(super) id: String,
    pub(super) user: String,
    pub(super) name: String,
}

pub(super) fn users_into_domain(raw: Vec<String>) -> Result<Vec<Email>, FolderValidationError> {
    raw.into_iter().map(Email::new).collect()
}

pub(super) fn user_folders_into_domain(
    owner: &Email,
    rows: Vec<UserFolderDto>,
) -> Result<UserFolders, FolderValidationError> {
    let folders = rows
        .into_iter()
        .map(|row| UserFolder::try_from_strings(row.id, row.name))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(UserFolders::new(owner.clone(), folders))
}

pub(super) fn global_folders_into_domain(
    rows: Vec<GlobalFolderDto>,
) -> Result<Vec<GlobalFolder>, FolderValidationError> {
    rows.into_iter()
        .map(|row| GlobalFolder::try_from_strings(row.id, row.user, row.name))
        .collect()
}
