use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartError, DefaultBodyLimit, Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use chrono::Utc;
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;

pub mod config;
pub mod models;
pub mod recognizer;

pub use models::{Grocery, Ingredient, Message, Post, RecognitionResult, Todo};
pub use recognizer::{FixedRecognizer, RecognizedItem, Recognizer, Unconfigured};

use models::{CreateGrocery, CreateIngredient, CreateMessage, CreatePost, CreateTodo, Record};

/// Largest accepted photo upload, multipart framing included.
pub const RECOGNIZE_BODY_LIMIT: usize = 20 * 1024 * 1024;

/// Rows of one resource in insertion order, with its own id sequence.
pub struct Table<T> {
    next_id: i64,
    rows: Vec<T>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            next_id: 1,
            rows: Vec::new(),
        }
    }
}

impl<T: Record> Table<T> {
    pub fn insert(&mut self, make: impl FnOnce(i64) -> T) -> T {
        let row = make(self.next_id);
        self.next_id += 1;
        self.rows.push(row.clone());
        row
    }

    /// Newest first.
    pub fn list(&self) -> Vec<T> {
        self.rows.iter().rev().cloned().collect()
    }

    fn get_mut(&mut self, id: i64) -> Result<&mut T, ApiError> {
        self.rows
            .iter_mut()
            .find(|row| row.id() == id)
            .ok_or_else(|| ApiError::not_found(T::NOT_FOUND))
    }

    fn remove(&mut self, id: i64) -> Result<StatusCode, ApiError> {
        let index = self
            .rows
            .iter()
            .position(|row| row.id() == id)
            .ok_or_else(|| ApiError::not_found(T::NOT_FOUND))?;
        self.rows.remove(index);
        Ok(StatusCode::NO_CONTENT)
    }
}

#[derive(Default)]
pub struct Store {
    pub messages: Table<Message>,
    pub posts: Table<Post>,
    pub todos: Table<Todo>,
    pub groceries: Table<Grocery>,
    pub pantry: Table<Ingredient>,
}

pub type Db = Arc<RwLock<Store>>;

#[derive(Clone)]
pub struct AppState {
    pub store: Db,
    pub recognizer: Arc<dyn Recognizer>,
}

/// Handler failure rendered as `{"detail": ...}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    fn not_found(detail: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            detail: detail.to_string(),
        }
    }

    /// Keeps the extractor's own status, e.g. 413 past the body limit.
    fn multipart(err: MultipartError) -> Self {
        Self {
            status: err.status(),
            detail: err.body_text(),
        }
    }

    fn unprocessable(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            detail: detail.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "detail": self.detail }))).into_response()
    }
}

/// Router with recognition left unconfigured.
pub fn app() -> Router {
    app_with_recognizer(Unconfigured)
}

pub fn app_with_recognizer(recognizer: impl Recognizer + 'static) -> Router {
    let state = AppState {
        store: Db::default(),
        recognizer: Arc::new(recognizer),
    };
    Router::new()
        .route("/api/messages", get(list_messages).post(create_message))
        .route("/api/messages/{id}", delete(delete_message))
        .route("/api/posts", get(list_posts).post(create_post))
        .route("/api/posts/{id}", delete(delete_post))
        .route("/api/todos", get(list_todos).post(create_todo))
        .route("/api/todos/{id}", delete(delete_todo).patch(toggle_todo))
        .route("/api/groceries", get(list_groceries).post(create_grocery))
        .route(
            "/api/groceries/{id}",
            delete(delete_grocery).patch(toggle_grocery),
        )
        .route("/api/pantry", get(list_ingredients).post(create_ingredient))
        .route(
            "/api/pantry/recognize",
            post(recognize_ingredients).layer(DefaultBodyLimit::max(RECOGNIZE_BODY_LIMIT)),
        )
        .route("/api/pantry/{id}", delete(delete_ingredient))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn required(field: &str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::unprocessable(format!("{field} must not be empty")));
    }
    Ok(())
}

// --- messages ---

async fn list_messages(State(state): State<AppState>) -> Json<Vec<Message>> {
    Json(state.store.read().await.messages.list())
}

async fn create_message(
    State(state): State<AppState>,
    Json(input): Json<CreateMessage>,
) -> Result<(StatusCode, Json<Message>), ApiError> {
    required("author", &input.author)?;
    required("content", &input.content)?;
    let message = state.store.write().await.messages.insert(|id| Message {
        id,
        author: input.author,
        content: input.content,
        created_at: Utc::now().naive_utc(),
    });
    Ok((StatusCode::CREATED, Json(message)))
}

async fn delete_message(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.store.write().await.messages.remove(id)
}

// --- posts ---

async fn list_posts(State(state): State<AppState>) -> Json<Vec<Post>> {
    Json(state.store.read().await.posts.list())
}

async fn create_post(
    State(state): State<AppState>,
    Json(input): Json<CreatePost>,
) -> Result<(StatusCode, Json<Post>), ApiError> {
    required("title", &input.title)?;
    required("body", &input.body)?;
    let post = state.store.write().await.posts.insert(|id| Post {
        id,
        title: input.title,
        body: input.body,
        created_at: Utc::now().naive_utc(),
    });
    Ok((StatusCode::CREATED, Json(post)))
}

async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.store.write().await.posts.remove(id)
}

// --- todos ---

async fn list_todos(State(state): State<AppState>) -> Json<Vec<Todo>> {
    Json(state.store.read().await.todos.list())
}

async fn create_todo(
    State(state): State<AppState>,
    Json(input): Json<CreateTodo>,
) -> Result<(StatusCode, Json<Todo>), ApiError> {
    required("description", &input.description)?;
    let todo = state.store.write().await.todos.insert(|id| Todo {
        id,
        description: input.description,
        completed: false,
        created_at: Utc::now().naive_utc(),
    });
    Ok((StatusCode::CREATED, Json(todo)))
}

async fn toggle_todo(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Todo>, ApiError> {
    let mut store = state.store.write().await;
    let todo = store.todos.get_mut(id)?;
    todo.completed = !todo.completed;
    Ok(Json(todo.clone()))
}

async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.store.write().await.todos.remove(id)
}

// --- groceries ---

async fn list_groceries(State(state): State<AppState>) -> Json<Vec<Grocery>> {
    Json(state.store.read().await.groceries.list())
}

async fn create_grocery(
    State(state): State<AppState>,
    Json(input): Json<CreateGrocery>,
) -> Result<(StatusCode, Json<Grocery>), ApiError> {
    required("name", &input.name)?;
    let grocery = state.store.write().await.groceries.insert(|id| Grocery {
        id,
        name: input.name,
        quantity: input.quantity,
        checked: false,
        created_at: Utc::now().naive_utc(),
    });
    Ok((StatusCode::CREATED, Json(grocery)))
}

async fn toggle_grocery(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Grocery>, ApiError> {
    let mut store = state.store.write().await;
    let grocery = store.groceries.get_mut(id)?;
    grocery.checked = !grocery.checked;
    Ok(Json(grocery.clone()))
}

async fn delete_grocery(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.store.write().await.groceries.remove(id)
}

// --- pantry ---

async fn list_ingredients(State(state): State<AppState>) -> Json<Vec<Ingredient>> {
    Json(state.store.read().await.pantry.list())
}

async fn create_ingredient(
    State(state): State<AppState>,
    Json(input): Json<CreateIngredient>,
) -> Result<(StatusCode, Json<Ingredient>), ApiError> {
    required("name", &input.name)?;
    let ingredient = state.store.write().await.pantry.insert(|id| Ingredient {
        id,
        name: input.name,
        amount: input.amount,
        location: input.location,
        created_at: Utc::now().naive_utc(),
    });
    Ok((StatusCode::CREATED, Json(ingredient)))
}

async fn delete_ingredient(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.store.write().await.pantry.remove(id)
}

async fn recognize_ingredients(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<RecognitionResult>, ApiError> {
    let mut image = None;
    while let Some(field) = multipart.next_field().await.map_err(ApiError::multipart)? {
        if field.name() == Some("image") {
            let bytes = field.bytes().await.map_err(ApiError::multipart)?;
            image = Some(bytes);
        }
    }
    let image = image.ok_or_else(|| ApiError::unprocessable("image field is required"))?;

    let recognition = state.recognizer.recognize(&image).map_err(|detail| ApiError {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        detail,
    })?;

    let mut store = state.store.write().await;
    let items = recognition
        .items
        .into_iter()
        .filter_map(|item| {
            let name = item.name.filter(|name| !name.trim().is_empty())?;
            Some(store.pantry.insert(|id| Ingredient {
                id,
                name,
                amount: item.amount.unwrap_or_default(),
                location: item.location.unwrap_or_default(),
                created_at: Utc::now().naive_utc(),
            }))
        })
        .collect();
    tracing::info!(image_bytes = image.len(), "recognized pantry photo");

    Ok(Json(RecognitionResult {
        items,
        raw_text: recognition.raw_text,
    }))
}
