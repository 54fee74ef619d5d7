// crates/todo-contract-harness/tests/helpers/todo_stub.rs
// ============================================================================
// Module: Todo Manager Stub
// Description: In-process Todo Manager stand-in for harness and CLI tests.
// Purpose: Run catalog scenarios, fixtures, and shutdown over real HTTP.
// Dependencies: axum, tokio, serde_json
// ============================================================================

//! ## Overview
//! The stub speaks the observed dialect by default: enveloped lists, `OPTIONS`
//! answered, links keyed by `id`. [`StubOptions::documented`] switches to the
//! documented dialect with seed data: bare bodies, `OPTIONS` refused on todos,
//! undeletable todos, and links keyed by `project_id` or `category_id`.

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::net::TcpListener as StdTcpListener;
use std::sync::Arc;
use std::sync::Mutex;
use std::thread;

use axum::Json;
use axum::Router;
use axum::body::Bytes;
use axum::extract::Path;
use axum::extract::Query;
use axum::extract::Request;
use axum::extract::State;
use axum::http::StatusCode;
use axum::http::header;
use axum::middleware::Next;
use axum::middleware::from_fn_with_state;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::routing::delete;
use axum::routing::get;
use serde_json::Map;
use serde_json::Value;
use serde_json::json;
use tokio::runtime::Builder;
use tokio::sync::oneshot;

// ============================================================================
// SECTION: Types
// ============================================================================

const TODOS: &str = "todos";
const PROJECTS: &str = "projects";
const CATEGORIES: &str = "categories";

/// Knobs for stub behavior.
#[derive(Debug, Clone, Copy, Default)]
pub struct StubOptions {
    /// Answer every item DELETE with 405.
    pub refuse_deletes: bool,
    /// Serve the documented dialect over seed data.
    pub documented: bool,
}

impl StubOptions {
    /// Documented dialect with seed data.
    pub fn documented() -> Self {
        Self {
            refuse_deletes: false,
            documented: true,
        }
    }
}

/// Recorded request line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StubRequest {
    /// HTTP method.
    pub method: String,
    /// Request path.
    pub path: String,
}

/// Relation hanging off a todo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Relation {
    TasksOf,
    Categories,
}

impl Relation {
    const fn name(self) -> &'static str {
        match self {
            Self::TasksOf => "tasksof",
            Self::Categories => "categories",
        }
    }

    const fn target(self) -> &'static str {
        match self {
            Self::TasksOf => PROJECTS,
            Self::Categories => CATEGORIES,
        }
    }

    const fn link_field(self) -> &'static str {
        match self {
            Self::TasksOf => "project_id",
            Self::Categories => "category_id",
        }
    }
}

/// Mutable stub state.
#[derive(Default)]
struct Store {
    next_id: u64,
    resources: BTreeMap<(&'static str, u64), Value>,
    links: BTreeSet<(u64, Relation, u64)>,
    requests: Vec<StubRequest>,
    options: StubOptions,
}

impl Store {
    fn seed(&mut self) {
        for (collection, id, title) in [
            (TODOS, 1, "scan paperwork"),
            (TODOS, 2, "file paperwork"),
            (PROJECTS, 1, "Office Work"),
            (PROJECTS, 2, "Home Work"),
            (CATEGORIES, 1, "Office"),
            (CATEGORIES, 2, "Home"),
        ] {
            self.resources.insert((collection, id), entity(collection, id, title, "", false));
        }
        self.links.insert((1, Relation::TasksOf, 1));
        self.links.insert((1, Relation::Categories, 1));
        self.next_id = 2;
    }

    fn get(&self, collection: &'static str, raw_id: &str) -> Option<(u64, &Value)> {
        let id = raw_id.parse::<u64>().ok()?;
        self.resources.get(&(collection, id)).map(|value| (id, value))
    }

    fn insert(&mut self, collection: &'static str, title: &str, description: &str) -> Value {
        self.next_id += 1;
        let id = self.next_id;
        let created = entity(collection, id, title, description, false);
        self.resources.insert((collection, id), created.clone());
        created
    }

    fn linked(&self, todo: u64, relation: Relation) -> Vec<Value> {
        self.links
            .iter()
            .filter(|(owner, kind, _)| *owner == todo && *kind == relation)
            .filter_map(|(_, _, target)| self.resources.get(&(relation.target(), *target)))
            .cloned()
            .collect()
    }
}

/// Shared state handed to handlers.
#[derive(Clone, Default)]
struct StubState {
    store: Arc<Mutex<Store>>,
}

// ============================================================================
// SECTION: Handle
// ============================================================================

/// Handle for the stub server; stops it on drop.
pub struct TodoStubHandle {
    base_url: String,
    shutdown: Option<oneshot::Sender<()>>,
    join: Option<thread::JoinHandle<()>>,
    state: StubState,
}

impl TodoStubHandle {
    /// Returns the stub base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns captured requests.
    pub fn requests(&self) -> Vec<StubRequest> {
        self.state.store.lock().map_or_else(|_| Vec::new(), |store| store.requests.clone())
    }

    /// Returns the number of live resources of `collection` (`todos`, ...).
    pub fn live(&self, collection: &str) -> usize {
        self.state.store.lock().map_or(0, |store| {
            store.resources.keys().filter(|(kind, _)| *kind == collection).count()
        })
    }

    /// Returns the stored entity, if any.
    pub fn entity(&self, collection: &str, id: u64) -> Option<Value> {
        let store = self.state.store.lock().ok()?;
        store.resources.iter().find(|((kind, key), _)| *kind == collection && *key == id).map(
            |(_, value)| value.clone(),
        )
    }

    /// Returns `(relation, target id)` for every link held by todo `todo`.
    pub fn links_of(&self, todo: u64) -> Vec<(&'static str, u64)> {
        self.state.store.lock().map_or_else(
            |_| Vec::new(),
            |store| {
                store
                    .links
                    .iter()
                    .filter(|(owner, _, _)| *owner == todo)
                    .map(|(_, relation, target)| (relation.name(), *target))
                    .collect()
            },
        )
    }
}

impl Drop for TodoStubHandle {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Some(join) = self.join.take() {
            let _ = join.join();
        }
    }
}

/// Spawns the stub with default behavior.
pub fn spawn_todo_stub() -> Result<TodoStubHandle, String> {
    spawn_todo_stub_with(StubOptions::default())
}

/// Spawns the stub with explicit options.
pub fn spawn_todo_stub_with(options: StubOptions) -> Result<TodoStubHandle, String> {
    let listener =
        StdTcpListener::bind("127.0.0.1:0").map_err(|err| format!("todo stub bind failed: {err}"))?;
    listener
        .set_nonblocking(true)
        .map_err(|err| format!("todo stub listener nonblocking failed: {err}"))?;
    let addr =
        listener.local_addr().map_err(|err| format!("todo stub local addr failed: {err}"))?;
    let base_url = format!("http://{addr}");

    let state = StubState::default();
    if let Ok(mut store) = state.store.lock() {
        store.options = options;
        if options.documented {
            store.seed();
        }
    }
    let app = router(state.clone());
    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let join = thread::spawn(move || {
        let Ok(runtime) = Builder::new_current_thread().enable_all().build() else {
            return;
        };
        runtime.block_on(async move {
            let Ok(listener) = tokio::net::TcpListener::from_std(listener) else {
                return;
            };
            let server = axum::serve(listener, app).with_graceful_shutdown(async move {
                let _ = shutdown_rx.await;
            });
            let _ = server.await;
        });
    });
    Ok(TodoStubHandle {
        base_url,
        shutdown: Some(shutdown_tx),
        join: Some(join),
        state,
    })
}

// ============================================================================
// SECTION: Routes
// ============================================================================

type Filters = Query<BTreeMap<String, String>>;

fn router(state: StubState) -> Router {
    Router::new()
        .route("/", get(|| async { "<html>Todo Manager</html>" }))
        .route("/shutdown", get(|| async { StatusCode::OK }))
        .route(
            "/todos",
            get(|State(state): State<StubState>, Query(filters): Filters| async move {
                list(&state, TODOS, &filters)
            })
            .post(|State(state): State<StubState>, body: Bytes| async move {
                create(&state, TODOS, &body)
            })
            .options(|State(state): State<StubState>| async move { options(&state, TODOS) }),
        )
        .route(
            "/todos/:id",
            get(|State(state): State<StubState>, Path(id): Path<String>| async move {
                fetch(&state, TODOS, &id)
            })
            .put(|State(state): State<StubState>, Path(id): Path<String>, body: Bytes| async move {
                update(&state, TODOS, &id, &body, true)
            })
            .post(|State(state): State<StubState>, Path(id): Path<String>, body: Bytes| async move {
                update(&state, TODOS, &id, &body, false)
            })
            .delete(|State(state): State<StubState>, Path(id): Path<String>| async move {
                remove(&state, TODOS, &id)
            })
            .options(|State(state): State<StubState>| async move { options(&state, TODOS) }),
        )
        .route(
            "/todos/:id/tasksof",
            get(|State(state): State<StubState>, Path(id): Path<String>| async move {
                list_links(&state, &id, Relation::TasksOf)
            })
            .post(|State(state): State<StubState>, Path(id): Path<String>, body: Bytes| async move {
                link(&state, &id, Relation::TasksOf, &body)
            }),
        )
        .route(
            "/todos/:id/tasksof/:target",
            delete(
                |State(state): State<StubState>,
                 Path((id, target)): Path<(String, String)>| async move {
                    unlink(&state, &id, Relation::TasksOf, &target)
                },
            ),
        )
        .route(
            "/todos/:id/categories",
            get(|State(state): State<StubState>, Path(id): Path<String>| async move {
                list_links(&state, &id, Relation::Categories)
            })
            .post(|State(state): State<StubState>, Path(id): Path<String>, body: Bytes| async move {
                link(&state, &id, Relation::Categories, &body)
            }),
        )
        .route(
            "/projects",
            get(|State(state): State<StubState>, Query(filters): Filters| async move {
                list(&state, PROJECTS, &filters)
            })
            .post(|State(state): State<StubState>, body: Bytes| async move {
                create(&state, PROJECTS, &body)
            })
            .options(|State(state): State<StubState>| async move { options(&state, PROJECTS) }),
        )
        .route(
            "/projects/:id",
            get(|State(state): State<StubState>, Path(id): Path<String>| async move {
                fetch(&state, PROJECTS, &id)
            })
            .put(|State(state): State<StubState>, Path(id): Path<String>, body: Bytes| async move {
                update(&state, PROJECTS, &id, &body, true)
            })
            .delete(|State(state): State<StubState>, Path(id): Path<String>| async move {
                remove(&state, PROJECTS, &id)
            })
            .options(|State(state): State<StubState>| async move { options(&state, PROJECTS) }),
        )
        .layer(from_fn_with_state(state.clone(), record))
        .with_state(state)
}

async fn record(State(state): State<StubState>, request: Request, next: Next) -> Response {
    if let Ok(mut store) = state.store.lock() {
        store.requests.push(StubRequest {
            method: request.method().to_string(),
            path: request.uri().path().to_string(),
        });
    }
    next.run(request).await
}

// ============================================================================
// SECTION: Handlers
// ============================================================================

fn entity(collection: &str, id: u64, title: &str, description: &str, done: bool) -> Value {
    let mut value = json!({ "id": id.to_string(), "title": title, "description": description });
    if collection == TODOS {
        value["doneStatus"] = Value::String(done.to_string());
    }
    value
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "errorMessages": [message] }))).into_response()
}

fn poisoned() -> Response {
    StatusCode::INTERNAL_SERVER_ERROR.into_response()
}

fn missing(collection: &str, raw_id: &str) -> Response {
    error(StatusCode::NOT_FOUND, &format!("Could not find an instance with {collection}/{raw_id}"))
}

/// Wraps `items` in the collection envelope unless the dialect is bare.
fn shaped(documented: bool, collection: &str, items: Vec<Value>) -> Response {
    let body = if documented { Value::Array(items) } else { json!({ collection: items }) };
    Json(body).into_response()
}

fn parse_object(body: &[u8]) -> Result<Map<String, Value>, Response> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(error(StatusCode::BAD_REQUEST, "body must be a JSON object")),
        Err(_) => Err(error(StatusCode::BAD_REQUEST, "invalid json")),
    }
}

fn numeric_id(value: &Value) -> Option<u64> {
    value.as_u64().or_else(|| value.as_str().and_then(|text| text.parse().ok()))
}

fn list(
    state: &StubState,
    collection: &'static str,
    filters: &BTreeMap<String, String>,
) -> Response {
    let Ok(store) = state.store.lock() else {
        return poisoned();
    };
    let items: Vec<Value> = store
        .resources
        .iter()
        .filter(|((kind, _), _)| *kind == collection)
        .filter(|(_, value)| {
            filters.get("title").is_none_or(|title| value.get("title") == Some(&json!(title)))
        })
        .map(|(_, value)| value.clone())
        .collect();
    shaped(store.options.documented, collection, items)
}

fn create(state: &StubState, collection: &'static str, body: &[u8]) -> Response {
    let payload = match parse_object(body) {
        Ok(payload) => payload,
        Err(response) => return response,
    };
    let Some(title) = payload.get("title").and_then(Value::as_str) else {
        return error(StatusCode::BAD_REQUEST, "title : field is mandatory");
    };
    let Ok(mut store) = state.store.lock() else {
        return poisoned();
    };
    let description = payload.get("description").and_then(Value::as_str).unwrap_or("");
    (StatusCode::CREATED, Json(store.insert(collection, title, description))).into_response()
}

fn fetch(state: &StubState, collection: &'static str, raw_id: &str) -> Response {
    let Ok(store) = state.store.lock() else {
        return poisoned();
    };
    match store.get(collection, raw_id) {
        Some((_, found)) if store.options.documented => Json(found.clone()).into_response(),
        Some((_, found)) => Json(json!({ collection: [found] })).into_response(),
        None => missing(collection, raw_id),
    }
}

/// PUT replaces every field; POST amends only the fields it carries.
fn update(
    state: &StubState,
    collection: &'static str,
    raw_id: &str,
    body: &[u8],
    replace: bool,
) -> Response {
    let payload = match parse_object(body) {
        Ok(payload) => payload,
        Err(response) => return response,
    };
    if replace && !payload.get("title").is_some_and(Value::is_string) {
        return error(StatusCode::BAD_REQUEST, "title : field is mandatory");
    }
    let Ok(mut store) = state.store.lock() else {
        return poisoned();
    };
    let Some((id, current)) = store.get(collection, raw_id).map(|(id, value)| (id, value.clone()))
    else {
        return missing(collection, raw_id);
    };
    let text = |field: &str| {
        payload
            .get(field)
            .or(if replace { None } else { current.get(field) })
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_string()
    };
    let done = match payload.get("doneStatus") {
        Some(Value::Bool(flag)) => *flag,
        Some(_) | None if replace => false,
        _ => current.get("doneStatus") == Some(&json!("true")),
    };
    let updated = entity(collection, id, &text("title"), &text("description"), done);
    store.resources.insert((collection, id), updated.clone());
    Json(updated).into_response()
}

fn remove(state: &StubState, collection: &'static str, raw_id: &str) -> Response {
    let Ok(mut store) = state.store.lock() else {
        return poisoned();
    };
    if store.options.refuse_deletes || (store.options.documented && collection == TODOS) {
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    }
    let Some(id) = store.get(collection, raw_id).map(|(id, _)| id) else {
        return error(
            StatusCode::NOT_FOUND,
            &format!("Could not find any instances with {collection}/{raw_id}"),
        );
    };
    store.resources.remove(&(collection, id));
    store.links.retain(|(owner, relation, target)| {
        let owned = collection == TODOS && *owner == id;
        let targeted = relation.target() == collection && *target == id;
        !(owned || targeted)
    });
    StatusCode::OK.into_response()
}

fn options(state: &StubState, collection: &'static str) -> Response {
    let documented = state.store.lock().is_ok_and(|store| store.options.documented);
    if documented && collection == TODOS {
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    }
    (StatusCode::OK, [(header::ALLOW, "OPTIONS, GET, HEAD, POST, PUT, DELETE")]).into_response()
}

fn list_links(state: &StubState, raw_id: &str, relation: Relation) -> Response {
    let Ok(store) = state.store.lock() else {
        return poisoned();
    };
    let documented = store.options.documented;
    match store.get(TODOS, raw_id) {
        Some((id, _)) => shaped(documented, relation.target(), store.linked(id, relation)),
        None if documented => missing(TODOS, raw_id),
        None => shaped(false, relation.target(), Vec::new()),
    }
}

/// Links by `id` in both dialects and by the documented link field only in
/// the documented dialect. Observed `POST {}` on `tasksof` creates a project.
fn link(state: &StubState, raw_id: &str, relation: Relation, body: &[u8]) -> Response {
    let payload = match parse_object(body) {
        Ok(payload) => payload,
        Err(response) => return response,
    };
    let Ok(mut store) = state.store.lock() else {
        return poisoned();
    };
    let documented = store.options.documented;
    let Some(todo) = store.get(TODOS, raw_id).map(|(id, _)| id) else {
        return missing(TODOS, raw_id);
    };

    if let Some(target) = payload.get("id").and_then(numeric_id) {
        if store.resources.contains_key(&(relation.target(), target)) {
            store.links.insert((todo, relation, target));
            return (StatusCode::CREATED, Json(json!({}))).into_response();
        }
        return missing(relation.target(), &target.to_string());
    }
    if documented && let Some(raw) = payload.get(relation.link_field()) {
        let Some(target) = numeric_id(raw) else {
            return error(StatusCode::BAD_REQUEST, "link id must be numeric");
        };
        if store.resources.contains_key(&(relation.target(), target)) {
            store.links.insert((todo, relation, target));
        }
        let linked: Vec<Value> = store
            .linked(todo, relation)
            .iter()
            .filter_map(|value| value.get("id").cloned())
            .collect();
        let mut echo = Map::new();
        echo.insert(relation.link_field().to_string(), raw.clone());
        echo.insert(relation.name().to_string(), Value::Array(linked));
        return Json(Value::Object(echo)).into_response();
    }
    if !documented && relation == Relation::TasksOf && payload.is_empty() {
        let project = store.insert(PROJECTS, "", "");
        if let Some(target) = project.get("id").and_then(numeric_id) {
            store.links.insert((todo, relation, target));
        }
        return (StatusCode::CREATED, Json(project)).into_response();
    }
    error(StatusCode::BAD_REQUEST, &format!("{} : field is mandatory", relation.link_field()))
}

fn unlink(state: &StubState, raw_id: &str, relation: Relation, raw_target: &str) -> Response {
    let Ok(mut store) = state.store.lock() else {
        return poisoned();
    };
    let key = raw_id.parse::<u64>().ok().zip(raw_target.parse::<u64>().ok());
    if let Some((todo, target)) = key
        && store.links.remove(&(todo, relation, target))
    {
        return Json(json!({})).into_response();
    }
    let path = format!("todos/{raw_id}/{}/{raw_target}", relation.name());
    error(StatusCode::NOT_FOUND, &format!("Could not find any instances with {path}"))
}
