//! Client core for the Home Nexus dashboard.
//!
//! # Overview
//! Keeps five lists (messages, posts, todos, groceries, pantry) in sync with
//! the collection API and uploads photos for ingredient recognition. Every
//! mutation is followed by a full refetch and a clear-and-rebuild render, so
//! the views always reflect the server.
//!
//! # Design
//! - `ApiClient` builds `HttpRequest` values and parses `HttpResponse` values
//!   without touching the network (host-does-IO pattern). An `HttpHost`
//!   executes the round-trip; `ReqwestHost` is the production one.
//! - `Transport` pairs the two and exposes `request` plus typed helpers.
//! - `Binding<R>` runs refresh → render → mutate → refresh for one
//!   collection, with the per-collection parts supplied by a `Resource`.
//! - Rendered buttons carry a `Command`; `Dashboard::dispatch` executes it.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod binding;
pub mod client;
pub mod command;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod host;
pub mod http;
pub mod recognition;
pub mod render;
pub mod resources;
pub mod transport;
pub mod types;

pub use binding::{Binding, Phase, Resource, Submission, Toggle};
pub use client::{ApiClient, RequestOptions};
pub use command::{Command, ResourceKind, Toggleable};
pub use config::ClientConfig;
pub use dashboard::Dashboard;
pub use error::ApiError;
pub use host::ReqwestHost;
pub use http::{HttpHost, HttpMethod, HttpRequest, HttpResponse};
pub use recognition::RecognitionFlow;
pub use render::{ListContainer, ListEntry};
pub use transport::Transport;
pub use types::{
    CreateGrocery, CreateIngredient, CreateMessage, CreatePost, CreateTodo, Grocery, ImageFile, Ingredient, ItemId,
    Message, Post, RecognitionResult, Todo,
};
