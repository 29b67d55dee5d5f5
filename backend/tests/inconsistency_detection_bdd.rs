//! Behaviour tests for the inconsistency detection use-case.
//!
//! Each scenario seeds in-memory sources, runs a full detection pass through
//! [`InconsistencyDetectionService`], and inspects the resulting report.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use folder_consistency::domain::ports::{
    DetectionError, GlobalFoldersSource, InconsistencyDetection, RetrievalError,
    UserFoldersSource, UsersSource,
};
use folder_consistency::domain::{
    DetectionConfig, DetectionSources, Email, GlobalFolder, Inconsistency,
    InconsistencyDetectionService, InconsistencyKind, InconsistencyReport, UserFolder,
    UserFolders,
};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

/// Map the short labels used in the feature file onto valid folder ids.
fn folder_id_for(label: &str) -> String {
    let digits: String = label.chars().filter(char::is_ascii_digit).collect();
    let number: u64 = digits.parse().expect("folder label should end in a number");
    format!("00000000-0000-0000-0000-{number:012}")
}

fn email(value: &str) -> Email {
    Email::new(value).expect("valid email")
}

#[derive(Default)]
struct InMemorySources {
    users: Vec<Email>,
    folders: HashMap<Email, Vec<UserFolder>>,
    global: Vec<GlobalFolder>,
    failing: HashSet<Email>,
}

#[async_trait]
impl UsersSource for InMemorySources {
    async fn retrieve_all_users(&self) -> Result<Vec<Email>, RetrievalError> {
        Ok(self.users.clone())
    }
}

#[async_trait]
impl GlobalFoldersSource for InMemorySources {
    async fn retrieve_all_global_folders(&self) -> Result<Vec<GlobalFolder>, RetrievalError> {
        Ok(self.global.clone())
    }
}

#[async_trait]
impl UserFoldersSource for InMemorySources {
    async fn retrieve_folders_for_user(
        &self,
        owner: &Email,
    ) -> Result<UserFolders, RetrievalError> {
        if self.failing.contains(owner) {
            return Err(RetrievalError::upstream_status(500_u16, "Internal Server Error"));
        }
        let folders = self.folders.get(owner).cloned().unwrap_or_default();
        Ok(UserFolders::new(owner.clone(), folders))
    }
}

struct DetectionWorld {
    sources: RefCell<InMemorySources>,
    outcome: RefCell<Option<Result<InconsistencyReport, DetectionError>>>,
    focus: RefCell<Option<Inconsistency>>,
}

impl DetectionWorld {
    fn new() -> Self {
        Self {
            sources: RefCell::new(InMemorySources::default()),
            outcome: RefCell::new(None),
            focus: RefCell::new(None),
        }
    }

    fn ensure_user(&self, owner: &Email) {
        let mut sources = self.sources.borrow_mut();
        if !sources.users.contains(owner) {
            sources.users.push(owner.clone());
            sources.folders.entry(owner.clone()).or_default();
        }
    }

    fn detect(&self) {
        let sources = Arc::new(self.sources.replace(InMemorySources::default()));
        let service = InconsistencyDetectionService::new(
            DetectionSources::new(sources.clone(), sources.clone(), sources),
            DetectionConfig {
                max_concurrent_fetches: 2,
            },
        );
        let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
        let result = runtime.block_on(service.detect());
        *self.outcome.borrow_mut() = Some(result);
    }

    fn with_report<F>(&self, f: F)
    where
        F: FnOnce(&InconsistencyReport),
    {
        let outcome = self.outcome.borrow();
        let report = outcome
            .as_ref()
            .expect("detection result")
            .as_ref()
            .expect("expected detection to succeed");
        f(report);
    }

    fn with_focus<F>(&self, f: F)
    where
        F: FnOnce(&Inconsistency),
    {
        let focus = self.focus.borrow();
        f(focus.as_ref().expect("a record should have been selected"));
    }
}

#[fixture]
fn world() -> DetectionWorld {
    DetectionWorld::new()
}

#[given("no users are registered")]
fn no_users_are_registered(world: &DetectionWorld) {
    world.sources.borrow_mut().users.clear();
}

#[given("the global listing is empty")]
fn the_global_listing_is_empty(world: &DetectionWorld) {
    world.sources.borrow_mut().global.clear();
}

#[given("user {owner} owns folder {label} named {name}")]
fn user_owns_folder(world: &DetectionWorld, owner: String, label: String, name: String) {
    let owner = email(&owner);
    world.ensure_user(&owner);
    let folder =
        UserFolder::try_from_strings(folder_id_for(&label), name).expect("valid user folder");
    world
        .sources
        .borrow_mut()
        .folders
        .entry(owner)
        .or_default()
        .push(folder);
}

#[given("user {owner} owns no folders")]
fn user_owns_no_folders(world: &DetectionWorld, owner: String) {
    world.ensure_user(&email(&owner));
}

#[given("the global listing maps folder {label} to {owner} named {name}")]
fn the_global_listing_maps_folder(
    world: &DetectionWorld,
    label: String,
    owner: String,
    name: String,
) {
    let folder = GlobalFolder::try_from_strings(folder_id_for(&label), owner, name)
        .expect("valid global folder");
    world.sources.borrow_mut().global.push(folder);
}

#[given("retrieving folders for {owner} fails")]
fn retrieving_folders_fails(world: &DetectionWorld, owner: String) {
    world.sources.borrow_mut().failing.insert(email(&owner));
}

#[when("inconsistencies are detected")]
fn inconsistencies_are_detected(world: &DetectionWorld) {
    world.detect();
}

#[then("the report holds {count} inconsistencies")]
fn the_report_holds_count(world: &DetectionWorld, count: usize) {
    world.with_report(|report| {
        assert_eq!(report.total_count(), count);
        assert_eq!(report.inconsistencies().len(), count);
        assert_eq!(report.counts_by_kind().values().sum::<usize>(), count);
    });
}

#[then("the report holds a {kind} record for folder {label}")]
fn the_report_holds_record(world: &DetectionWorld, kind: String, label: String) {
    let kind = InconsistencyKind::ALL
        .into_iter()
        .find(|candidate| candidate.as_str() == kind)
        .expect("known inconsistency kind");
    let folder_id = folder_id_for(&label);
    world.with_report(|report| {
        let record = report
            .inconsistencies()
            .iter()
            .find(|record| record.kind() == kind && record.folder_id().to_string() == folder_id)
            .expect("matching record");
        assert_eq!(report.count_of(kind), 1);
        *world.focus.borrow_mut() = Some(record.clone());
    });
}

#[then("that record has user folder name {name}")]
fn that_record_has_user_folder_name(world: &DetectionWorld, name: String) {
    world.with_focus(|record| {
        assert_eq!(record.user_name().map(AsRef::as_ref), Some(name.as_str()));
    });
}

#[then("that record has global folder name {name}")]
fn that_record_has_global_folder_name(world: &DetectionWorld, name: String) {
    world.with_focus(|record| {
        assert_eq!(record.global_name().map(AsRef::as_ref), Some(name.as_str()));
    });
}

#[then("that record has no user folder name")]
fn that_record_has_no_user_folder_name(world: &DetectionWorld) {
    world.with_focus(|record| assert!(record.user_name().is_none()));
}

#[then("that record has no global folder name")]
fn that_record_has_no_global_folder_name(world: &DetectionWorld) {
    world.with_focus(|record| assert!(record.global_name().is_none()));
}

#[then("detection fails while retrieving folders for {owner}")]
fn detection_fails_for_user(world: &DetectionWorld, owner: String) {
    let outcome = world.outcome.borrow();
    match outcome.as_ref().expect("detection result") {
        Ok(report) => panic!("expected detection to fail, got {report:?}"),
        Err(DetectionError::UserFolders { owner: failed, source }) => {
            assert_eq!(failed.to_string(), owner);
            assert!(matches!(source, RetrievalError::UpstreamStatus { status: 500, .. }));
        }
        Err(other) => panic!("unexpected failure: {other}"),
    }
}

#[scenario(
    path = "tests/features/inconsistency_detection.feature",
    name = "Empty universe yields an empty report"
)]
fn empty_universe_yields_an_empty_report(world: DetectionWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/inconsistency_detection.feature",
    name = "Consistent folders yield an empty report"
)]
fn consistent_folders_yield_an_empty_report(world: DetectionWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/inconsistency_detection.feature",
    name = "Diverging names are reported as a mismatch"
)]
fn diverging_names_are_reported_as_a_mismatch(world: DetectionWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/inconsistency_detection.feature",
    name = "A folder unknown to the global listing is reported"
)]
fn a_folder_unknown_to_the_global_listing_is_reported(world: DetectionWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/inconsistency_detection.feature",
    name = "A folder absent from the user's listing is reported"
)]
fn a_folder_absent_from_the_users_listing_is_reported(world: DetectionWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/inconsistency_detection.feature",
    name = "One failed per-user retrieval fails the whole run"
)]
fn one_failed_per_user_retrieval_fails_the_whole_run(world: DetectionWorld) {
    drop(world);
}
