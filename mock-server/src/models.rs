//! Records and create payloads served by the mock collection API.
//!
//! Field names and defaults follow the wire format the client decodes:
//! integer ids, timezone-less `created_at`, and blank-tolerant optional
//! fields on groceries and pantry ingredients.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A stored row with an integer identity.
pub trait Record: Clone {
    /// `detail` returned when a row of this kind is missing.
    const NOT_FOUND: &'static str;

    fn id(&self) -> i64;
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    pub id: i64,
    pub author: String,
    pub content: String,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: i64,
    pub description: String,
    pub completed: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Grocery {
    pub id: i64,
    pub name: String,
    pub quantity: String,
    pub checked: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Ingredient {
    pub id: i64,
    pub name: String,
    pub amount: String,
    pub location: String,
    pub created_at: NaiveDateTime,
}

impl Record for Message {
    const NOT_FOUND: &'static str = "Message not found";

    fn id(&self) -> i64 {
        self.id
    }
}

impl Record for Post {
    const NOT_FOUND: &'static str = "Post not found";

    fn id(&self) -> i64 {
        self.id
    }
}

impl Record for Todo {
    const NOT_FOUND: &'static str = "Todo item not found";

    fn id(&self) -> i64 {
        self.id
    }
}

impl Record for Grocery {
    const NOT_FOUND: &'static str = "Grocery item not found";

    fn id(&self) -> i64 {
        self.id
    }
}

impl Record for Ingredient {
    const NOT_FOUND: &'static str = "Ingredient not found";

    fn id(&self) -> i64 {
        self.id
    }
}

#[derive(Deserialize)]
pub struct CreateMessage {
    pub author: String,
    pub content: String,
}

#[derive(Deserialize)]
pub struct CreatePost {
    pub title: String,
    pub body: String,
}

#[derive(Deserialize)]
pub struct CreateTodo {
    pub description: String,
}

#[derive(Deserialize)]
pub struct CreateGrocery {
    pub name: String,
    #[serde(default = "default_quantity")]
    pub quantity: String,
}

#[derive(Deserialize)]
pub struct CreateIngredient {
    pub name: String,
    #[serde(default)]
    pub amount: String,
    #[serde(default)]
    pub location: String,
}

fn default_quantity() -> String {
    "1".to_string()
}

/// Body of a successful `POST /api/pantry/recognize`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RecognitionResult {
    pub items: Vec<Ingredient>,
    pub raw_text: String,
}
