//! Reconciliation of per-user folder views against the global folder view.
//!
//! The global listing is indexed once by `(owner, folder id)`; every user's
//! folders are then scanned against their owner's slice of that index. This
//! keeps the comparison linear in the number of folders on both sides.
//!
//! The index is built before the scan and only read afterwards, and the scan
//! itself is sequential, so no synchronisation is involved.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

use crate::domain::{Email, FolderId, GlobalFolder, Inconsistency, UserFolders};

/// Global folders of a single owner.
///
/// `in_order` keeps first-seen encounter order so leftover folders are
/// reported deterministically.
#[derive(Debug, Default)]
struct OwnerFolders<'a> {
    by_id: HashMap<&'a FolderId, &'a GlobalFolder>,
    in_order: Vec<&'a GlobalFolder>,
}

impl<'a> OwnerFolders<'a> {
    /// Insert unless the id is already present; the first folder seen wins.
    fn insert_first(&mut self, folder: &'a GlobalFolder) {
        if let Entry::Vacant(slot) = self.by_id.entry(folder.id()) {
            slot.insert(folder);
            self.in_order.push(folder);
        }
    }

    fn get(&self, id: &FolderId) -> Option<&'a GlobalFolder> {
        self.by_id.get(id).copied()
    }
}

/// Owner-qualified lookup over the global folder listing.
#[derive(Debug, Default)]
struct GlobalFolderIndex<'a> {
    owners: HashMap<&'a Email, OwnerFolders<'a>>,
}

impl<'a> GlobalFolderIndex<'a> {
    fn build(global_folders: &'a [GlobalFolder]) -> Self {
        let mut owners: HashMap<&'a Email, OwnerFolders<'a>> = HashMap::new();
        for folder in global_folders {
            owners.entry(folder.owner()).or_default().insert_first(folder);
        }
        Self { owners }
    }

    fn for_owner(&self, owner: &Email) -> Option<&OwnerFolders<'a>> {
        self.owners.get(owner)
    }
}

/// Compare every user's folders with the global listing and classify the
/// differences.
///
/// Output order: one block per entry of `all_user_folders`, in input order.
/// Within a block, records derived from the user's folders come first (in the
/// user's folder order), followed by the owner's global folders the user did
/// not list (in global-listing order). Owners that only appear in
/// `global_folders` are not examined.
///
/// When the global listing repeats an `(owner, folder id)` pair, the first
/// occurrence is used and later ones are ignored.
///
/// # Examples
/// ```
/// use folder_consistency::domain::{
///     reconcile, Email, GlobalFolder, InconsistencyKind, UserFolder, UserFolders,
/// };
///
/// let id = "550e8400-e29b-41d4-a716-446655440000";
/// let owner = Email::new("alice@example.com").unwrap();
/// let user = UserFolders::new(
///     owner,
///     vec![UserFolder::try_from_strings(id, "Inbox").unwrap()],
/// );
/// let global = vec![
///     GlobalFolder::try_from_strings(id, "alice@example.com", "INBOX_WRONG").unwrap(),
/// ];
///
/// let found = reconcile(&[user], &global);
/// assert_eq!(found.len(), 1);
/// assert_eq!(found[0].kind(), InconsistencyKind::NameMismatch);
/// ```
pub fn reconcile(
    all_user_folders: &[UserFolders],
    global_folders: &[GlobalFolder],
) -> Vec<Inconsistency> {
    let index = GlobalFolderIndex::build(global_folders);
    let mut inconsistencies = Vec::new();
    for user_folders in all_user_folders {
        reconcile_owner(
            user_folders,
            index.for_owner(user_folders.owner()),
            &mut inconsistencies,
        );
    }
    inconsistencies
}

fn reconcile_owner(
    user_folders: &UserFolders,
    global: Option<&OwnerFolders<'_>>,
    out: &mut Vec<Inconsistency>,
) {
    let owner = user_folders.owner();
    let mut checked: HashSet<&FolderId> = HashSet::new();

    for folder in user_folders.folders() {
        checked.insert(folder.id());
        match global.and_then(|owned| owned.get(folder.id())) {
            None => out.push(Inconsistency::MissingInGlobal {
                folder_id: folder.id().clone(),
                owner: owner.clone(),
                user_name: folder.name().clone(),
            }),
            Some(global_folder) if global_folder.name() != folder.name() => {
                out.push(Inconsistency::NameMismatch {
                    folder_id: folder.id().clone(),
                    owner: owner.clone(),
                    global_name: global_folder.name().clone(),
                    user_name: folder.name().clone(),
                });
            }
            Some(_) => {}
        }
    }

    let Some(global) = global else {
        return;
    };
    out.extend(
        global
            .in_order
            .iter()
            .filter(|global_folder| !checked.contains(global_folder.id()))
            .map(|global_folder| Inconsistency::MissingInUserFolders {
                folder_id: global_folder.id().clone(),
                owner: owner.clone(),
                global_name: global_folder.name().clone(),
            }),
    );
}

#[cfg(test)]
#[path = "reconciliation_tests.rs"]
mod tests;
