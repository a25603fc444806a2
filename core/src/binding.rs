//! Refresh → render → mutate → refresh, for any collection.
//!
//! # Design
//! `Binding<R>` owns what survives between passes for one collection: the
//! rendered container, the create form's field values, the fetch phase and
//! the form's in-flight flag. It never keeps the fetched items; every
//! `refresh` renders straight from the response it just received.
//!
//! Bindings are driven from one cooperative task, so state lives in
//! `Cell`/`RefCell` and no borrow is held across an `.await`.

use std::cell::{Cell, Ref, RefCell};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::command::{ResourceKind, Toggleable};
use crate::error::ApiError;
use crate::http::HttpHost;
use crate::render::{render, ActionsSlot, ContentSlot, ListContainer};
use crate::transport::Transport;
use crate::types::ItemId;

/// Per-collection definition plugged into `Binding`.
pub trait Resource {
    const KIND: ResourceKind;

    type Item: DeserializeOwned;
    type Form: Clone + Default;
    type Payload: Serialize;

    /// Trimmed create payload, or `None` while a required field is blank.
    fn payload(form: &Self::Form) -> Option<Self::Payload>;

    /// Clear the fields that should not be kept after a successful create.
    fn reset_form(form: &mut Self::Form);

    fn build(content: &mut ContentSlot, actions: &mut ActionsSlot, item: &Self::Item);
}

/// Collections whose items can be flipped with a bodiless PATCH.
pub trait Toggle: Resource {
    const TARGET: Toggleable;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing rendered yet.
    Idle,
    Fetching,
    Rendered,
}

/// What happened to a form submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    Submitted,
    /// Blocked: a required field is blank, no file was picked, or the same
    /// form is still in flight. No request was sent.
    ///
    /// The blank check stands in for a form's `required` attribute, and
    /// also rejects whitespace-only values.
    Skipped,
}

/// Raised flag for the lifetime of one form submission.
pub(crate) struct InFlight<'a>(&'a Cell<bool>);

impl<'a> InFlight<'a> {
    /// `None` if the flag is already raised.
    pub(crate) fn begin(flag: &'a Cell<bool>) -> Option<Self> {
        if flag.replace(true) {
            return None;
        }
        Some(Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// One outstanding refresh, counted for the lifetime of the fetch.
struct Fetch<'a>(&'a Cell<usize>);

impl<'a> Fetch<'a> {
    fn begin(count: &'a Cell<usize>) -> Self {
        count.set(count.get() + 1);
        Self(count)
    }
}

impl Drop for Fetch<'_> {
    fn drop(&mut self) {
        self.0.set(self.0.get() - 1);
    }
}

pub struct Binding<R: Resource> {
    view: RefCell<ListContainer>,
    form: RefCell<R::Form>,
    phase: Cell<Phase>,
    /// Refreshes currently awaiting the host.
    fetches: Cell<usize>,
    rendered: Cell<bool>,
    submitting: Cell<bool>,
}

impl<R: Resource> Default for Binding<R> {
    fn default() -> Self {
        Self {
            view: RefCell::new(ListContainer::new()),
            form: RefCell::new(R::Form::default()),
            phase: Cell::new(Phase::Idle),
            fetches: Cell::new(0),
            rendered: Cell::new(false),
            submitting: Cell::new(false),
        }
    }
}

impl<R: Resource> Binding<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kind(&self) -> ResourceKind {
        R::KIND
    }

    /// The container as rendered by the last successful refresh.
    pub fn view(&self) -> Ref<'_, ListContainer> {
        self.view.borrow()
    }

    pub fn phase(&self) -> Phase {
        self.phase.get()
    }

    pub fn form(&self) -> R::Form {
        self.form.borrow().clone()
    }

    /// Apply user input to the form fields.
    pub fn edit_form(&self, edit: impl FnOnce(&mut R::Form)) {
        edit(&mut self.form.borrow_mut());
    }

    /// True while a create is outstanding; hosts disable the submit control.
    pub fn is_submitting(&self) -> bool {
        self.submitting.get()
    }

    /// Fetch the whole collection and rebuild the view from it. On failure
    /// the previous view is kept.
    ///
    /// The phase stays `Fetching` while any refresh of this binding is still
    /// awaiting the host. Once the last one settles it is `Rendered` if a
    /// view was ever built, `Idle` otherwise.
    pub async fn refresh<H: HttpHost>(&self, transport: &Transport<H>) -> Result<(), ApiError> {
        let fetched: Result<Vec<R::Item>, ApiError> = {
            let _fetch = Fetch::begin(&self.fetches);
            self.phase.set(Phase::Fetching);
            transport.fetch_all(R::KIND).await
        };
        let outcome = fetched.map(|items| {
            render(&mut self.view.borrow_mut(), &items, R::build);
            self.rendered.set(true);
            tracing::debug!(resource = %R::KIND, items = items.len(), "rendered");
        });
        self.settle_phase();
        outcome
    }

    fn settle_phase(&self) {
        if self.fetches.get() > 0 {
            return;
        }
        let phase = if self.rendered.get() { Phase::Rendered } else { Phase::Idle };
        self.phase.set(phase);
    }

    /// Submit the create form. The form is reset only after the server
    /// accepted the record; the refresh follows the reset.
    pub async fn create<H: HttpHost>(&self, transport: &Transport<H>) -> Result<Submission, ApiError> {
        let Some(_in_flight) = InFlight::begin(&self.submitting) else {
            return Ok(Submission::Skipped);
        };
        let Some(payload) = R::payload(&self.form.borrow()) else {
            return Ok(Submission::Skipped);
        };
        transport.create::<_, Value>(R::KIND, &payload).await?;
        R::reset_form(&mut self.form.borrow_mut());
        self.refresh(transport).await?;
        Ok(Submission::Submitted)
    }

    pub async fn remove<H: HttpHost>(&self, transport: &Transport<H>, id: ItemId) -> Result<(), ApiError> {
        transport.remove(R::KIND, id).await?;
        self.refresh(transport).await
    }
}

impl<R: Toggle> Binding<R> {
    pub async fn toggle<H: HttpHost>(&self, transport: &Transport<H>, id: ItemId) -> Result<(), ApiError> {
        transport.toggle(R::TARGET, id).await?;
        self.refresh(transport).await
    }
}
