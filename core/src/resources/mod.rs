//! The five collection definitions.

mod groceries;
mod messages;
mod pantry;
mod posts;
mod todos;

pub use groceries::{Groceries, GroceryForm};
pub use messages::{MessageForm, Messages};
pub use pantry::{IngredientForm, Pantry};
pub use posts::{PostForm, Posts};
pub use todos::{TodoForm, Todos};

use chrono::NaiveDateTime;

/// Trimmed `value`, or `None` if nothing is left.
fn required(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn format_timestamp(at: &NaiveDateTime) -> String {
    at.format("%Y-%m-%d %H:%M").to_string()
}
