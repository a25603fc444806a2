//! The five bindings and the recognition flow behind one dispatcher.
//!
//! # Design
//! A host registers a single handler per list container (plus one per form)
//! and forwards whatever `Command` the user triggered to `dispatch`. Failed
//! commands are logged and returned; the rendered views stay as they were,
//! so a failure is silent on screen unless the host shows the error.

use std::cell::Ref;

use crate::binding::{Binding, Submission};
use crate::client::ApiClient;
use crate::command::{Command, ResourceKind, Toggleable};
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::HttpHost;
use crate::recognition::RecognitionFlow;
use crate::render::ListContainer;
use crate::resources::{Groceries, Messages, Pantry, Posts, Todos};
use crate::transport::Transport;
use crate::types::ItemId;

pub struct Dashboard<H> {
    transport: Transport<H>,
    messages: Binding<Messages>,
    posts: Binding<Posts>,
    todos: Binding<Todos>,
    groceries: Binding<Groceries>,
    pantry: Binding<Pantry>,
    recognition: RecognitionFlow,
}

impl<H: HttpHost> Dashboard<H> {
    pub fn new(config: &ClientConfig, host: H) -> Result<Self, ApiError> {
        Ok(Self::with_client(ApiClient::from_config(config)?, host))
    }

    pub fn with_client(client: ApiClient, host: H) -> Self {
        Self {
            transport: Transport::new(client, host),
            messages: Binding::new(),
            posts: Binding::new(),
            todos: Binding::new(),
            groceries: Binding::new(),
            pantry: Binding::new(),
            recognition: RecognitionFlow::new(),
        }
    }

    pub fn transport(&self) -> &Transport<H> {
        &self.transport
    }

    pub fn messages(&self) -> &Binding<Messages> {
        &self.messages
    }

    pub fn posts(&self) -> &Binding<Posts> {
        &self.posts
    }

    pub fn todos(&self) -> &Binding<Todos> {
        &self.todos
    }

    pub fn groceries(&self) -> &Binding<Groceries> {
        &self.groceries
    }

    pub fn pantry(&self) -> &Binding<Pantry> {
        &self.pantry
    }

    pub fn recognition(&self) -> &RecognitionFlow {
        &self.recognition
    }

    pub fn view(&self, kind: ResourceKind) -> Ref<'_, ListContainer> {
        match kind {
            ResourceKind::Messages => self.messages.view(),
            ResourceKind::Posts => self.posts.view(),
            ResourceKind::Todos => self.todos.view(),
            ResourceKind::Groceries => self.groceries.view(),
            ResourceKind::Pantry => self.pantry.view(),
        }
    }

    /// Refresh every collection concurrently. Failures are logged and
    /// returned; one failing collection does not stop the others.
    pub async fn initialize(&self) -> Vec<(ResourceKind, ApiError)> {
        let (messages, posts, todos, groceries, pantry) = futures::join!(
            self.messages.refresh(&self.transport),
            self.posts.refresh(&self.transport),
            self.todos.refresh(&self.transport),
            self.groceries.refresh(&self.transport),
            self.pantry.refresh(&self.transport),
        );
        let failures: Vec<(ResourceKind, ApiError)> = ResourceKind::ALL
            .into_iter()
            .zip([messages, posts, todos, groceries, pantry])
            .filter_map(|(kind, result)| result.err().map(|err| (kind, err)))
            .collect();
        for (kind, err) in &failures {
            tracing::warn!(resource = %kind, error = %err, "initial refresh failed");
        }
        failures
    }

    pub async fn refresh(&self, kind: ResourceKind) -> Result<(), ApiError> {
        match kind {
            ResourceKind::Messages => self.messages.refresh(&self.transport).await,
            ResourceKind::Posts => self.posts.refresh(&self.transport).await,
            ResourceKind::Todos => self.todos.refresh(&self.transport).await,
            ResourceKind::Groceries => self.groceries.refresh(&self.transport).await,
            ResourceKind::Pantry => self.pantry.refresh(&self.transport).await,
        }
    }

    /// Run one user action to completion.
    pub async fn dispatch(&self, command: Command) -> Result<Submission, ApiError> {
        let result = match command {
            Command::Submit(kind) => self.submit(kind).await,
            Command::Toggle(kind, id) => self.toggle(kind, id).await.map(|()| Submission::Submitted),
            Command::Remove(kind, id) => self.remove(kind, id).await.map(|()| Submission::Submitted),
            Command::Recognize => Ok(self.recognition.recognize(&self.transport, &self.pantry).await),
        };
        if let Err(err) = &result {
            tracing::warn!(
                resource = %command.resource(),
                command = command.name(),
                error = %err,
                "command failed"
            );
        }
        result
    }

    /// Handle a click on button `button` of entry `entry` in the `kind`
    /// list. Positions that hold no button are ignored.
    pub async fn click(&self, kind: ResourceKind, entry: usize, button: usize) -> Result<Submission, ApiError> {
        let command = self.view(kind).command_at(entry, button);
        match command {
            Some(command) => self.dispatch(command).await,
            None => Ok(Submission::Skipped),
        }
    }

    async fn submit(&self, kind: ResourceKind) -> Result<Submission, ApiError> {
        match kind {
            ResourceKind::Messages => self.messages.create(&self.transport).await,
            ResourceKind::Posts => self.posts.create(&self.transport).await,
            ResourceKind::Todos => self.todos.create(&self.transport).await,
            ResourceKind::Groceries => self.groceries.create(&self.transport).await,
            ResourceKind::Pantry => self.pantry.create(&self.transport).await,
        }
    }

    async fn toggle(&self, kind: Toggleable, id: ItemId) -> Result<(), ApiError> {
        match kind {
            Toggleable::Todos => self.todos.toggle(&self.transport, id).await,
            Toggleable::Groceries => self.groceries.toggle(&self.transport, id).await,
        }
    }

    async fn remove(&self, kind: ResourceKind, id: ItemId) -> Result<(), ApiError> {
        match kind {
            ResourceKind::Messages => self.messages.remove(&self.transport, id).await,
            ResourceKind::Posts => self.posts.remove(&self.transport, id).await,
            ResourceKind::Todos => self.todos.remove(&self.transport, id).await,
            ResourceKind::Groceries => self.groceries.remove(&self.transport, id).await,
            ResourceKind::Pantry => self.pantry.remove(&self.transport, id).await,
        }
    }
}
