//! Developer-facing view: create, edit, publish and delete changelogs.
//!
//! The controller owns one [`ChangelogListStore`] for the lifetime of a view
//! session. Intent methods take `&self`, so a driver may issue a second intent
//! while an earlier one is still awaiting the server; each response is applied
//! when it arrives and reconciled by changelog id, never by whatever happens to
//! be selected at that moment.
//!
//! State lives behind a `std::sync::Mutex` that is never held across an
//! `.await`.

use crate::repository::ChangelogRepository;
use crate::store::ChangelogListStore;
use changelog_core::{
    validate, Changelog, ChangelogFilter, ChangelogId, ChangelogInput, Error, Result,
    ValidationReport,
};
use std::sync::{Mutex, MutexGuard};
use tokio::sync::watch;
use tracing::{info, warn};

/// Where the dashboard is in its edit cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Idle,
    Creating,
    Editing(ChangelogId),
}

/// Immutable view of the dashboard for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSnapshot {
    pub mode: Mode,
    pub changelogs: Vec<Changelog>,
    /// Always equal to the list entry with the same id.
    pub selected: Option<Changelog>,
    /// Unsaved contents of the open form: what was typed into the create form,
    /// or the last submission for the entry being edited until it is saved.
    pub form: Option<ChangelogInput>,
    pub field_errors: ValidationReport,
    /// Advisory: at least one repository call is outstanding.
    pub busy: bool,
    pub error: Option<String>,
}

/// Outcome of a delete intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// The user declined; no request was issued.
    Cancelled,
}

/// The confirmation step that must pass before a delete request is sent.
///
/// Receives the id and, when it is listed, the entry about to be deleted.
pub trait Confirm {
    fn confirm(self, id: ChangelogId, changelog: Option<&Changelog>) -> bool;
}

impl<F> Confirm for F
where
    F: FnOnce(ChangelogId, Option<&Changelog>) -> bool,
{
    fn confirm(self, id: ChangelogId, changelog: Option<&Changelog>) -> bool {
        self(id, changelog)
    }
}

#[derive(Debug)]
struct DashboardState {
    mode: Mode,
    store: ChangelogListStore,
    form: Option<ChangelogInput>,
    field_errors: ValidationReport,
    in_flight: usize,
    error: Option<String>,
}

impl DashboardState {
    fn new() -> Self {
        Self {
            mode: Mode::Idle,
            store: ChangelogListStore::new(),
            form: None,
            field_errors: ValidationReport::default(),
            in_flight: 0,
            error: None,
        }
    }

    fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot {
            mode: self.mode,
            changelogs: self.store.items().to_vec(),
            selected: self.store.selected().cloned(),
            form: self.form.clone(),
            field_errors: self.field_errors.clone(),
            busy: self.in_flight > 0,
            error: self.error.clone(),
        }
    }

    fn fail(&mut self, err: &Error) {
        warn!(error = %err, "Dashboard operation failed");
        self.error = Some(err.to_string());
    }

    /// Editing a changelog that has left the list falls back to idle and
    /// drops its unsaved form.
    fn sync_mode(&mut self) {
        if let Mode::Editing(id) = self.mode {
            if self.store.selected_id() != Some(id) {
                self.mode = Mode::Idle;
                self.form = None;
            }
        }
    }
}

pub struct DashboardController<R> {
    repository: R,
    state: Mutex<DashboardState>,
    updates: watch::Sender<DashboardSnapshot>,
}

/// Marks one outstanding repository call. Dropping it without `complete`
/// (the awaiting future was dropped) still clears the busy count.
struct InFlight<'a, R> {
    controller: &'a DashboardController<R>,
    done: bool,
}

impl<R> InFlight<'_, R> {
    fn complete(mut self, reconcile: impl FnOnce(&mut DashboardState)) {
        self.done = true;
        let mut state = self.controller.lock();
        state.in_flight = state.in_flight.saturating_sub(1);
        reconcile(&mut state);
        state.sync_mode();
        self.controller.publish(&state);
    }
}

impl<R> Drop for InFlight<'_, R> {
    fn drop(&mut self) {
        if !self.done {
            let mut state = self.controller.lock();
            state.in_flight = state.in_flight.saturating_sub(1);
            self.controller.publish(&state);
        }
    }
}

impl<R> DashboardController<R> {
    fn lock(&self) -> MutexGuard<'_, DashboardState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn publish(&self, state: &DashboardState) {
        self.updates.send_replace(state.snapshot());
    }

    fn update_state(&self, change: impl FnOnce(&mut DashboardState)) {
        let mut state = self.lock();
        change(&mut state);
        self.publish(&state);
    }

    fn begin(&self) -> InFlight<'_, R> {
        self.update_state(|state| state.in_flight += 1);
        InFlight {
            controller: self,
            done: false,
        }
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        self.lock().snapshot()
    }

    /// Receives a fresh snapshot after every state change.
    pub fn subscribe(&self) -> watch::Receiver<DashboardSnapshot> {
        self.updates.subscribe()
    }

    pub fn mode(&self) -> Mode {
        self.lock().mode
    }

    pub fn is_busy(&self) -> bool {
        self.lock().in_flight > 0
    }

    pub fn selected(&self) -> Option<Changelog> {
        self.lock().store.selected().cloned()
    }

    pub fn changelogs(&self) -> Vec<Changelog> {
        self.lock().store.items().to_vec()
    }

    /// "New changelog": clears the selection and opens an empty form.
    pub fn new_changelog(&self) {
        self.update_state(|state| {
            state.mode = Mode::Creating;
            state.store.clear_selection();
            state.form = Some(ChangelogInput::default());
            state.field_errors = ValidationReport::default();
            state.error = None;
        });
    }

    /// Opens a listed changelog for editing, abandoning any unsaved create form.
    pub fn select(&self, id: ChangelogId) -> Result<()> {
        let mut state = self.lock();
        if !state.store.select(id) {
            return Err(Error::NotFound(id.to_string()));
        }

        state.mode = Mode::Editing(id);
        state.form = None;
        state.field_errors = ValidationReport::default();
        state.error = None;
        self.publish(&state);
        Ok(())
    }

    /// Runs the form checks. A failing report is recorded for display, and the
    /// form opened in `owner` mode keeps what the user typed.
    fn check_form(&self, owner: Mode, input: &ChangelogInput) -> Result<()> {
        let report = validate(input);
        self.update_state(|state| {
            if state.mode == owner {
                state.form = Some(input.clone());
            }
            state.field_errors = report.clone();
        });
        report.into_result()
    }
}

impl<R: ChangelogRepository> DashboardController<R> {
    pub fn new(repository: R) -> Self {
        let state = DashboardState::new();
        let (updates, _) = watch::channel(state.snapshot());

        Self {
            repository,
            state: Mutex::new(state),
            updates,
        }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Fetches the developer list (drafts included) into the store.
    pub async fn load(&self) -> Result<()> {
        let call = self.begin();
        let result = self.repository.list(ChangelogFilter::all()).await;

        call.complete(|state| match &result {
            Ok(changelogs) => {
                info!(count = changelogs.len(), "Dashboard loaded");
                state.store.replace_all(changelogs.clone());
                state.error = None;
            }
            Err(e) => state.fail(e),
        });

        result.map(|_| ())
    }

    /// Form submission: creates while `Creating`, updates while `Editing`.
    pub async fn submit(&self, input: ChangelogInput) -> Result<Changelog> {
        match self.mode() {
            Mode::Creating => self.create(input).await,
            Mode::Editing(id) => self.update(id, input).await,
            Mode::Idle => Err(Error::InvalidOperation(
                "no changelog is open; select one or start a new one".to_string(),
            )),
        }
    }

    /// On success the new entry is prepended and, if the create form is still
    /// open, selected for editing. On failure the form contents are kept.
    pub async fn create(&self, input: ChangelogInput) -> Result<Changelog> {
        self.check_form(Mode::Creating, &input)?;

        let call = self.begin();
        let result = self.repository.create(input.clone()).await;

        call.complete(|state| match &result {
            Ok(changelog) => {
                info!(id = %changelog.id, version = %changelog.version, "Changelog created");
                if state.mode == Mode::Creating {
                    state.store.insert_created(changelog.clone());
                    state.mode = Mode::Editing(changelog.id);
                    state.form = None;
                } else {
                    state.store.insert(changelog.clone());
                }
                state.field_errors = ValidationReport::default();
                state.error = None;
            }
            Err(e) => {
                if state.mode == Mode::Creating {
                    state.form = Some(input);
                }
                state.fail(e);
            }
        });

        result
    }

    /// On success the list entry is replaced in place. On failure the
    /// submitted contents stay in the form while `id` is still open.
    pub async fn update(&self, id: ChangelogId, input: ChangelogInput) -> Result<Changelog> {
        let owner = Mode::Editing(id);
        self.check_form(owner, &input)?;

        let call = self.begin();
        let result = self.repository.update(id, input.clone()).await;

        call.complete(|state| match &result {
            Ok(changelog) => {
                info!(id = %changelog.id, "Changelog updated");
                state.store.replace(changelog.clone());
                if state.mode == owner {
                    state.form = None;
                }
                state.field_errors = ValidationReport::default();
                state.error = None;
            }
            Err(e) => {
                if state.mode == owner {
                    state.form = Some(input);
                }
                state.fail(e);
            }
        });

        result
    }

    pub async fn set_published(&self, id: ChangelogId, published: bool) -> Result<Changelog> {
        let call = self.begin();
        let result = self.repository.set_published(id, published).await;

        call.complete(|state| match &result {
            Ok(changelog) => {
                info!(id = %changelog.id, published = changelog.published, "Publish state changed");
                state.store.replace(changelog.clone());
                state.error = None;
            }
            Err(e) => state.fail(e),
        });

        result
    }

    /// Flips `published` on the entry being edited.
    pub async fn toggle_publish(&self) -> Result<Changelog> {
        let target = {
            let state = self.lock();
            match state.mode {
                Mode::Editing(_) => state.store.selected().map(|c| (c.id, c.published)),
                _ => None,
            }
        };

        match target {
            Some((id, published)) => self.set_published(id, !published).await,
            None => Err(Error::InvalidOperation(
                "no changelog is open for editing".to_string(),
            )),
        }
    }

    /// Deletes `id` once `confirm` agrees. Deleting the entry being edited
    /// returns the dashboard to idle.
    pub async fn delete(&self, id: ChangelogId, confirm: impl Confirm) -> Result<DeleteOutcome> {
        let target = self.lock().store.get(id).cloned();
        if !confirm.confirm(id, target.as_ref()) {
            info!(%id, "Delete cancelled");
            return Ok(DeleteOutcome::Cancelled);
        }

        let call = self.begin();
        let result = self.repository.remove(id).await;

        call.complete(|state| match &result {
            Ok(()) => {
                info!(%id, "Changelog deleted");
                state.store.remove(id);
                state.error = None;
            }
            Err(e) => state.fail(e),
        });

        result.map(|()| DeleteOutcome::Deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{FailOn, MemoryRepository, Operation};
    use uuid::Uuid;

    fn yes(_: ChangelogId, _: Option<&Changelog>) -> bool {
        true
    }

    async fn dashboard_with(
        titles: &[&str],
    ) -> (DashboardController<MemoryRepository>, Vec<Changelog>) {
        let repository = MemoryRepository::new();
        let mut created = Vec::new();
        for title in titles {
            created.push(
                repository
                    .create(ChangelogInput::new("1.0", *title))
                    .await
                    .unwrap(),
            );
        }

        let dashboard = DashboardController::new(repository);
        dashboard.load().await.unwrap();
        (dashboard, created)
    }

    fn assert_selection_matches_list(snapshot: &DashboardSnapshot) {
        if let Some(selected) = &snapshot.selected {
            let listed = snapshot
                .changelogs
                .iter()
                .find(|c| c.id == selected.id)
                .expect("selected entry must be listed");
            assert_eq!(listed, selected);
        }
    }

    #[tokio::test]
    async fn test_starts_idle_and_loads_server_order() {
        let (dashboard, created) = dashboard_with(&["a", "b"]).await;
        let snapshot = dashboard.snapshot();

        assert_eq!(snapshot.mode, Mode::Idle);
        assert_eq!(snapshot.changelogs, vec![created[1].clone(), created[0].clone()]);
        assert!(!snapshot.busy);
        assert!(snapshot.selected.is_none());
    }

    #[tokio::test]
    async fn test_create_moves_to_editing_new_entry() {
        let (dashboard, existing) = dashboard_with(&["old"]).await;

        dashboard.new_changelog();
        assert_eq!(dashboard.mode(), Mode::Creating);

        let created = dashboard
            .submit(ChangelogInput::new("1.0.0", "Launch"))
            .await
            .unwrap();
        let snapshot = dashboard.snapshot();

        assert_eq!(snapshot.mode, Mode::Editing(created.id));
        assert_eq!(snapshot.changelogs, vec![created.clone(), existing[0].clone()]);
        assert_eq!(snapshot.selected, Some(created));
        assert!(snapshot.form.is_none());
    }

    #[tokio::test]
    async fn test_create_failure_keeps_form_and_mode() {
        let (dashboard, _) = dashboard_with(&[]).await;
        dashboard.repository().fail_on(FailOn::Create);
        dashboard.new_changelog();

        let input = ChangelogInput::new("2.0", "Big").with_git_diff("diff --git a/x b/x");
        let err = dashboard.submit(input.clone()).await.unwrap_err();
        let snapshot = dashboard.snapshot();

        assert!(matches!(err, Error::Request { .. }));
        assert_eq!(snapshot.mode, Mode::Creating);
        assert_eq!(snapshot.form, Some(input));
        assert!(snapshot.error.is_some());
        assert!(snapshot.changelogs.is_empty());
        assert!(!snapshot.busy);
    }

    #[tokio::test]
    async fn test_invalid_submit_issues_no_request() {
        let (dashboard, _) = dashboard_with(&[]).await;
        dashboard.new_changelog();
        let before = dashboard.repository().operations().len();

        let err = dashboard
            .submit(ChangelogInput::new("", "x"))
            .await
            .unwrap_err();
        let snapshot = dashboard.snapshot();

        assert!(matches!(err, Error::Validation(_)));
        assert_eq!(dashboard.repository().operations().len(), before);
        assert_eq!(
            snapshot.field_errors.message(changelog_core::Field::Version),
            Some("Version is required")
        );
        assert_eq!(snapshot.form, Some(ChangelogInput::new("", "x")));
    }

    #[tokio::test]
    async fn test_submit_while_idle_is_rejected() {
        let (dashboard, _) = dashboard_with(&[]).await;

        let err = dashboard
            .submit(ChangelogInput::new("1", "t"))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::InvalidOperation(_)));
    }

    #[tokio::test]
    async fn test_select_cancels_creation() {
        let (dashboard, created) = dashboard_with(&["a"]).await;
        dashboard.new_changelog();

        dashboard.select(created[0].id).unwrap();
        let snapshot = dashboard.snapshot();

        assert_eq!(snapshot.mode, Mode::Editing(created[0].id));
        assert!(snapshot.form.is_none());
        assert_eq!(snapshot.selected, Some(created[0].clone()));
    }

    #[tokio::test]
    async fn test_select_unknown_id_changes_nothing() {
        let (dashboard, _) = dashboard_with(&["a"]).await;
        let before = dashboard.snapshot();

        assert!(dashboard.select(Uuid::new_v4()).unwrap_err().is_not_found());
        assert_eq!(dashboard.snapshot(), before);
    }

    #[tokio::test]
    async fn test_update_refreshes_list_and_selection() {
        let (dashboard, created) = dashboard_with(&["a", "b"]).await;
        let target = created[0].id;
        dashboard.select(target).unwrap();

        let updated = dashboard
            .submit(ChangelogInput::new("1.1", "a revised").with_description("more"))
            .await
            .unwrap();
        let snapshot = dashboard.snapshot();

        assert_eq!(snapshot.mode, Mode::Editing(target));
        assert_eq!(snapshot.changelogs[1], updated);
        assert_eq!(snapshot.selected, Some(updated.clone()));
        assert_eq!(updated.generated_content, "# a revised (v1.1)\n\nmore\n");
        assert!(snapshot.form.is_none());
        assert_selection_matches_list(&snapshot);
    }

    #[tokio::test]
    async fn test_update_failure_keeps_prior_data() {
        let (dashboard, created) = dashboard_with(&["a"]).await;
        dashboard.select(created[0].id).unwrap();
        dashboard.repository().fail_on(FailOn::Update);

        let input = ChangelogInput::new("9.9", "typed by user").with_description("long text");
        let err = dashboard.submit(input.clone()).await.unwrap_err();
        let snapshot = dashboard.snapshot();

        assert!(matches!(err, Error::Request { .. }));
        assert_eq!(snapshot.mode, Mode::Editing(created[0].id));
        assert_eq!(snapshot.selected, Some(created[0].clone()));
        assert_eq!(snapshot.form, Some(input.clone()));
        assert!(snapshot.error.unwrap().contains("injected"));

        dashboard.repository().clear_failure();
        let saved = dashboard.submit(input).await.unwrap();
        let snapshot = dashboard.snapshot();

        assert_eq!(saved.title, "typed by user");
        assert!(snapshot.form.is_none());
        assert_eq!(snapshot.selected, Some(saved));
    }

    #[tokio::test]
    async fn test_invalid_edit_keeps_typed_contents() {
        let (dashboard, created) = dashboard_with(&["a"]).await;
        dashboard.select(created[0].id).unwrap();
        let before = dashboard.repository().operations().len();

        let input = ChangelogInput::new("2.0", "  ").with_description("kept");
        let err = dashboard.submit(input.clone()).await.unwrap_err();
        let snapshot = dashboard.snapshot();

        assert!(matches!(err, Error::Validation(_)));
        assert_eq!(dashboard.repository().operations().len(), before);
        assert_eq!(snapshot.form, Some(input));
        assert_eq!(
            snapshot.field_errors.message(changelog_core::Field::Title),
            Some("Title is required")
        );

        dashboard.select(created[0].id).unwrap();
        assert!(dashboard.snapshot().form.is_none());
    }

    #[tokio::test]
    async fn test_toggle_publish_round_trip() {
        let (dashboard, created) = dashboard_with(&["a"]).await;
        dashboard.select(created[0].id).unwrap();

        let published = dashboard.toggle_publish().await.unwrap();
        assert!(published.published);
        assert_eq!(dashboard.selected(), Some(published.clone()));
        assert_selection_matches_list(&dashboard.snapshot());

        let unpublished = dashboard.toggle_publish().await.unwrap();
        assert!(!unpublished.published);
        assert_eq!(unpublished, created[0]);
    }

    #[tokio::test]
    async fn test_toggle_without_selection_is_rejected() {
        let (dashboard, _) = dashboard_with(&["a"]).await;

        assert!(matches!(
            dashboard.toggle_publish().await.unwrap_err(),
            Error::InvalidOperation(_)
        ));
    }

    #[tokio::test]
    async fn test_set_published_is_idempotent() {
        let (dashboard, created) = dashboard_with(&["a"]).await;

        let first = dashboard.set_published(created[0].id, true).await.unwrap();
        let second = dashboard.set_published(created[0].id, true).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(dashboard.changelogs(), vec![second]);
    }

    #[tokio::test]
    async fn test_delete_selected_returns_to_idle() {
        let (dashboard, created) = dashboard_with(&["a", "b"]).await;
        dashboard.select(created[0].id).unwrap();

        let outcome = dashboard.delete(created[0].id, yes).await.unwrap();
        let snapshot = dashboard.snapshot();

        assert_eq!(outcome, DeleteOutcome::Deleted);
        assert_eq!(snapshot.mode, Mode::Idle);
        assert!(snapshot.selected.is_none());
        assert_eq!(snapshot.changelogs, vec![created[1].clone()]);
    }

    #[tokio::test]
    async fn test_delete_other_keeps_selection() {
        let (dashboard, created) = dashboard_with(&["a", "b"]).await;
        dashboard.select(created[0].id).unwrap();

        dashboard.delete(created[1].id, yes).await.unwrap();

        assert_eq!(dashboard.mode(), Mode::Editing(created[0].id));
        assert_eq!(dashboard.selected(), Some(created[0].clone()));
    }

    #[tokio::test]
    async fn test_declined_delete_issues_no_request() {
        let (dashboard, created) = dashboard_with(&["a"]).await;
        let mut prompted = None;

        let outcome = dashboard
            .delete(created[0].id, |_: ChangelogId, c: Option<&Changelog>| {
                prompted = c.map(|c| c.title.clone());
                false
            })
            .await
            .unwrap();

        assert_eq!(outcome, DeleteOutcome::Cancelled);
        assert_eq!(prompted.as_deref(), Some("a"));
        assert!(!dashboard
            .repository()
            .operations()
            .iter()
            .any(|op| matches!(op, Operation::Remove(_))));
        assert_eq!(dashboard.changelogs(), created);
    }

    #[tokio::test]
    async fn test_delete_missing_id_leaves_state() {
        let (dashboard, created) = dashboard_with(&["a"]).await;
        dashboard.select(created[0].id).unwrap();
        let before = dashboard.snapshot();

        let err = dashboard.delete(Uuid::new_v4(), yes).await.unwrap_err();
        let after = dashboard.snapshot();

        assert!(err.is_not_found());
        assert_eq!(after.changelogs, before.changelogs);
        assert_eq!(after.selected, before.selected);
        assert_eq!(after.mode, before.mode);
        assert!(after.error.is_some());
    }

    #[tokio::test]
    async fn test_late_update_reconciles_by_id() {
        let (dashboard, created) = dashboard_with(&["a", "b"]).await;
        let (a, b) = (created[0].clone(), created[1].clone());
        dashboard.select(a.id).unwrap();

        let gate = dashboard.repository().hold();
        let pending = dashboard.submit(ChangelogInput::new("2.0", "a late"));

        let (result, busy_while_pending) = tokio::join!(pending, async {
            tokio::task::yield_now().await;
            let busy = dashboard.is_busy();
            dashboard.select(b.id).unwrap();
            gate.release();
            busy
        });
        let updated = result.unwrap();
        let snapshot = dashboard.snapshot();

        assert!(busy_while_pending);
        assert!(!snapshot.busy);
        assert_eq!(updated.id, a.id);
        assert_eq!(snapshot.mode, Mode::Editing(b.id));
        assert_eq!(snapshot.selected, Some(b));
        assert_eq!(
            snapshot.changelogs.iter().find(|c| c.id == a.id),
            Some(&updated)
        );
    }

    #[tokio::test]
    async fn test_update_after_delete_does_not_resurrect() {
        let (dashboard, created) = dashboard_with(&["a"]).await;
        let a = created[0].clone();
        dashboard.select(a.id).unwrap();

        let gate = dashboard.repository().hold();
        let update = dashboard.update(a.id, ChangelogInput::new("1.1", "a2"));
        let delete = dashboard.delete(a.id, yes);

        let (update_result, delete_result) = tokio::join!(update, async {
            let outcome = tokio::join!(delete, async {
                tokio::task::yield_now().await;
                gate.release();
                gate.release();
            });
            outcome.0
        });

        assert_eq!(delete_result.unwrap(), DeleteOutcome::Deleted);
        match update_result {
            Ok(updated) => assert_eq!(updated.id, a.id),
            Err(e) => assert!(e.is_not_found()),
        }
        assert!(dashboard.changelogs().is_empty());
        assert_eq!(dashboard.mode(), Mode::Idle);
    }

    #[tokio::test]
    async fn test_create_resolving_after_navigation_keeps_new_selection() {
        let (dashboard, created) = dashboard_with(&["a"]).await;
        dashboard.new_changelog();

        let gate = dashboard.repository().hold();
        let pending = dashboard.submit(ChangelogInput::new("3.0", "later"));

        let (result, _) = tokio::join!(pending, async {
            tokio::task::yield_now().await;
            dashboard.select(created[0].id).unwrap();
            gate.release();
        });
        let new_entry = result.unwrap();
        let snapshot = dashboard.snapshot();

        assert_eq!(snapshot.mode, Mode::Editing(created[0].id));
        assert_eq!(snapshot.changelogs[0], new_entry);
        assert_eq!(snapshot.selected, Some(created[0].clone()));
    }

    #[tokio::test]
    async fn test_subscribers_see_changes() {
        let (dashboard, created) = dashboard_with(&["a"]).await;
        let mut updates = dashboard.subscribe();

        dashboard.select(created[0].id).unwrap();

        assert!(updates.has_changed().unwrap());
        assert_eq!(
            updates.borrow_and_update().mode,
            Mode::Editing(created[0].id)
        );
    }
}
