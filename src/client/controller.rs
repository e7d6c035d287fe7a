//! Page controller: drives the view state through user actions.
//!
//! Every mutating action that succeeds is followed by a full list refresh.
//! Delete and edit ask for confirmation first; declining sends nothing.
//! Transport failures become error notices and leave the view untouched.

use crate::client::api::{Lookup, ResourceApi};
use crate::client::render::render_rows;
use crate::client::state::{Mode, ViewState};
use crate::domain::model::ResourceModel;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    pub title: String,
    pub text: Option<String>,
    pub confirm_label: String,
    pub cancel_label: String,
}

impl Confirmation {
    pub fn edit(model: &dyn ResourceModel) -> Self {
        Self {
            title: format!("Edit this {}?", model.singular()),
            text: None,
            confirm_label: "Yes, edit".to_string(),
            cancel_label: "Cancel".to_string(),
        }
    }

    pub fn delete() -> Self {
        Self {
            title: "Are you sure?".to_string(),
            text: Some("This cannot be undone.".to_string()),
            confirm_label: "Yes, delete".to_string(),
            cancel_label: "Cancel".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub text: String,
}

impl Notice {
    pub fn success(title: &str, text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            title: title.to_string(),
            text: text.into(),
        }
    }

    pub fn error(title: &str, text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            title: title.to_string(),
            text: text.into(),
        }
    }
}

/// User-facing dialogs.
#[async_trait]
pub trait Prompter: Send + Sync {
    async fn confirm(&self, confirmation: &Confirmation) -> bool;
    fn notify(&self, notice: Notice);
}

pub struct PageController<A, P> {
    model: Arc<dyn ResourceModel>,
    api: A,
    prompter: P,
    view: ViewState,
}

impl<A: ResourceApi, P: Prompter> PageController<A, P> {
    pub fn new(model: Arc<dyn ResourceModel>, api: A, prompter: P) -> Self {
        let view = ViewState::new(model.as_ref());
        Self {
            model,
            api,
            prompter,
            view,
        }
    }

    pub fn model(&self) -> &Arc<dyn ResourceModel> {
        &self.model
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Returns false if `field` is not part of the form.
    pub fn set_field(&mut self, field: &str, value: impl Into<String>) -> bool {
        self.view.form.set(field, value)
    }

    /// Re-fetches the whole list and re-renders it.
    pub async fn refresh(&mut self) {
        match self.api.get_all().await {
            Ok(records) => {
                debug!(count = records.len(), "List refreshed");
                self.view.rows = render_rows(self.model.as_ref(), &records);
            }
            Err(e) => self.prompter.notify(Notice::error("Could not load the list", e.to_string())),
        }
    }

    /// Creates or updates depending on the current mode.
    pub async fn submit(&mut self) {
        let payload = self.view.form.to_payload(self.model.as_ref());
        let result = match &self.view.mode {
            Mode::Create => self.api.create(&payload).await,
            Mode::Edit(id) => self.api.update(id, &payload).await,
        };
        match result {
            Ok(reply) if reply.ok => {
                self.prompter.notify(Notice::success("Success!", reply.message));
                self.view.reset();
                self.refresh().await;
            }
            Ok(reply) => self.prompter.notify(Notice::error("Error", reply.message)),
            Err(e) => self.prompter.notify(Notice::error("Network error", e.to_string())),
        }
    }

    /// After confirmation, loads the record into the form (edit mode).
    pub async fn edit(&mut self, id: &str) {
        if !self.prompter.confirm(&Confirmation::edit(self.model.as_ref())).await {
            return;
        }
        match self.api.get(id).await {
            Ok(Lookup::Found(record)) => self.view.begin_edit(&record),
            Ok(Lookup::Missing(message)) => self.prompter.notify(Notice::error("Error", message)),
            Err(e) => self.prompter.notify(Notice::error("Network error", e.to_string())),
        }
    }

    /// After confirmation, deletes the record and refreshes the list.
    pub async fn delete(&mut self, id: &str) {
        if !self.prompter.confirm(&Confirmation::delete()).await {
            return;
        }
        match self.api.delete(id).await {
            Ok(reply) if reply.ok => {
                self.prompter.notify(Notice::success("Deleted!", reply.message));
                self.refresh().await;
            }
            Ok(reply) => self.prompter.notify(Notice::error("Error", reply.message)),
            Err(e) => self.prompter.notify(Notice::error("Network error", e.to_string())),
        }
    }

    /// Back to create mode without sending anything.
    pub fn clear(&mut self) {
        self.view.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::api::{ClientError, Reply};
    use crate::domain::model::BookModel;
    use crate::transport::http::types::RecordDocument;
    use serde_json::{json, Value as JsonValue};
    use std::sync::Mutex;

    const ID: &str = "65a1f0c2e4b0a1b2c3d4e5f6";

    #[derive(Clone, Default)]
    struct FakeApi {
        calls: Arc<Mutex<Vec<String>>>,
        records: Arc<Mutex<Vec<RecordDocument>>>,
        offline: bool,
    }

    impl FakeApi {
        fn log(&self, call: String) -> Result<(), ClientError> {
            self.calls.lock().unwrap().push(call);
            if self.offline {
                Err(ClientError::Decode("connection refused".to_string()))
            } else {
                Ok(())
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    fn dune() -> RecordDocument {
        serde_json::from_value(json!({ "_id": ID, "title": "Dune", "author": "Herbert" })).unwrap()
    }

    #[async_trait]
    impl ResourceApi for FakeApi {
        async fn get_all(&self) -> Result<Vec<RecordDocument>, ClientError> {
            self.log("GET getAll".into())?;
            Ok(self.records.lock().unwrap().clone())
        }

        async fn get(&self, id: &str) -> Result<Lookup, ClientError> {
            self.log(format!("GET get/{}", id))?;
            let records = self.records.lock().unwrap();
            Ok(match records.iter().find(|r| r.id == id) {
                Some(r) => Lookup::Found(r.clone()),
                None => Lookup::Missing("No book found".into()),
            })
        }

        async fn create(&self, payload: &JsonValue) -> Result<Reply, ClientError> {
            self.log(format!("POST create {}", payload))?;
            Ok(Reply { ok: true, message: "New book created successfully".into() })
        }

        async fn update(&self, id: &str, payload: &JsonValue) -> Result<Reply, ClientError> {
            self.log(format!("PUT update/{} {}", id, payload))?;
            Ok(Reply { ok: true, message: "Updated successfully".into() })
        }

        async fn delete(&self, id: &str) -> Result<Reply, ClientError> {
            self.log(format!("DELETE delete/{}", id))?;
            Ok(Reply { ok: true, message: "Deleted successfully".into() })
        }
    }

    #[derive(Clone, Default)]
    struct ScriptedPrompter {
        answer: bool,
        asked: Arc<Mutex<Vec<Confirmation>>>,
        notices: Arc<Mutex<Vec<Notice>>>,
    }

    #[async_trait]
    impl Prompter for ScriptedPrompter {
        async fn confirm(&self, confirmation: &Confirmation) -> bool {
            self.asked.lock().unwrap().push(confirmation.clone());
            self.answer
        }

        fn notify(&self, notice: Notice) {
            self.notices.lock().unwrap().push(notice);
        }
    }

    fn page(api: FakeApi, answer: bool) -> (PageController<FakeApi, ScriptedPrompter>, ScriptedPrompter) {
        let prompter = ScriptedPrompter { answer, ..Default::default() };
        (PageController::new(Arc::new(BookModel), api, prompter.clone()), prompter)
    }

    #[tokio::test]
    async fn declined_delete_sends_nothing() {
        let api = FakeApi::default();
        let (mut page, prompter) = page(api.clone(), false);
        page.delete(ID).await;
        assert!(api.calls().is_empty());
        assert_eq!(prompter.asked.lock().unwrap()[0], Confirmation::delete());
    }

    #[tokio::test]
    async fn confirmed_delete_refreshes_the_list() {
        let api = FakeApi::default();
        let (mut page, prompter) = page(api.clone(), true);
        page.delete(ID).await;
        assert_eq!(api.calls(), vec![format!("DELETE delete/{}", ID), "GET getAll".to_string()]);
        let notices = prompter.notices.lock().unwrap();
        assert_eq!(notices[0], Notice::success("Deleted!", "Deleted successfully"));
    }

    #[tokio::test]
    async fn edit_then_submit_issues_an_update_and_returns_to_create_mode() {
        let api = FakeApi::default();
        api.records.lock().unwrap().push(dune());
        let (mut page, _prompter) = page(api.clone(), true);

        page.edit(ID).await;
        assert_eq!(page.view().mode, Mode::Edit(ID.to_string()));
        assert_eq!(page.view().form.get("title"), Some("Dune"));

        page.set_field("title", "Dune Messiah");
        page.submit().await;

        let calls = api.calls();
        assert_eq!(calls[0], format!("GET get/{}", ID));
        assert!(calls[1].starts_with(&format!("PUT update/{} ", ID)));
        assert!(calls[1].contains("\"title\":\"Dune Messiah\""));
        assert_eq!(calls[2], "GET getAll");
        assert_eq!(page.view().mode, Mode::Create);
        assert_eq!(page.view().rows.len(), 1);
    }

    #[tokio::test]
    async fn declined_edit_leaves_state_alone() {
        let api = FakeApi::default();
        api.records.lock().unwrap().push(dune());
        let (mut page, _prompter) = page(api.clone(), false);
        page.edit(ID).await;
        assert_eq!(page.view().mode, Mode::Create);
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn submit_in_create_mode_posts() {
        let api = FakeApi::default();
        let (mut page, prompter) = page(api.clone(), true);
        page.set_field("title", "Dune");
        page.set_field("author", "Herbert");
        page.submit().await;
        let calls = api.calls();
        assert_eq!(calls.len(), 2);
        assert!(calls[0].starts_with("POST create "));
        assert!(calls[0].contains("\"title\":\"Dune\""));
        assert!(calls[0].contains("\"author\":\"Herbert\""));
        assert_eq!(calls[1], "GET getAll");
        assert_eq!(prompter.notices.lock().unwrap()[0].kind, NoticeKind::Success);
        assert_eq!(page.view().form.get("title"), Some(""));
    }

    #[tokio::test]
    async fn network_failure_is_reported_and_state_kept() {
        let api = FakeApi {
            offline: true,
            ..Default::default()
        };
        let (mut page, prompter) = page(api.clone(), true);
        page.set_field("title", "Dune");
        page.submit().await;

        assert_eq!(api.calls().len(), 1);
        assert_eq!(page.view().form.get("title"), Some("Dune"));
        let notices = prompter.notices.lock().unwrap();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].kind, NoticeKind::Error);
        assert_eq!(notices[0].title, "Network error");
    }
}
