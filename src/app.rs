use axum::{
    Router,
    extract::FromRef,
    routing::{get, post},
};
use axum_extra::extract::cookie::Key;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;

use crate::admin;
use crate::error::AppError;
use crate::login::{self, SessionStore};
use crate::pages;
use crate::store::{RecordStore, Table, Tables};
use crate::views::Views;

pub struct AppState {
    pub store: RecordStore,
    pub sessions: SessionStore,
    pub views: Views,
    key: Key,
}

impl AppState {
    pub fn new(store: RecordStore, key: Key) -> Result<Self, handlebars::TemplateError> {
        Ok(AppState {
            store,
            sessions: SessionStore::new(),
            views: Views::new()?,
            key,
        })
    }
}

/// Router state wrapper; a local type is needed to implement `FromRef` for `Key`.
#[derive(Clone)]
struct RouterState(Arc<AppState>);

impl FromRef<RouterState> for Arc<AppState> {
    fn from_ref(state: &RouterState) -> Self {
        state.0.clone()
    }
}

impl FromRef<RouterState> for Key {
    fn from_ref(state: &RouterState) -> Self {
        state.0.key.clone()
    }
}

/// Reload every table from the workbook.
///
/// The store does blocking file I/O, so it runs off the async workers.
pub async fn load_tables(state: &AppState) -> Result<Tables, AppError> {
    let store = state.store.clone();
    let tables = tokio::task::spawn_blocking(move || store.load_all()).await??;
    Ok(tables)
}

/// Write `table` back over its sheet in the workbook.
pub async fn save_table(state: &AppState, table: Table) -> Result<(), AppError> {
    let store = state.store.clone();
    tokio::task::spawn_blocking(move || store.overwrite_sheet(&table)).await??;
    Ok(())
}

pub fn router(state: Arc<AppState>, static_dir: &Path) -> Router {
    Router::new()
        .route("/", get(login::serve_login_page))
        .route("/login", post(login::handle_login))
        .route("/logout", get(login::handle_logout))
        .route("/admin", get(admin::list_students))
        .route("/admin/select/:sid", get(admin::select_student))
        .route("/add_student", get(admin::add_student_form))
        .route("/save_student", post(admin::save_student))
        .route("/dashboard", get(pages::dashboard))
        .route("/profile", get(pages::profile))
        .route("/timetable", get(pages::timetable))
        .route("/attendance", get(pages::attendance))
        .route("/attendance/edit/:sid/:date", get(admin::edit_attendance))
        .route("/attendance/update", post(admin::update_attendance))
        .route("/attendance_summary", get(admin::attendance_summary))
        .route("/marks", get(pages::marks))
        .route("/marks/edit/:sid", get(admin::edit_marks))
        .route("/marks/update", post(admin::update_marks))
        .route("/fees", get(pages::fees))
        .route("/fees/edit/:sid", get(admin::edit_fees))
        .route("/fees/update", post(admin::update_fees))
        .route("/assignments", get(pages::assignments))
        .route("/notifications", get(pages::notifications))
        .route("/exams", get(pages::exams))
        .route("/materials", get(pages::materials))
        .route("/library", get(pages::library))
        .route("/placement", get(pages::placement))
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(RouterState(state))
}

pub async fn run(state: Arc<AppState>, bind: SocketAddr, static_dir: &Path) -> std::io::Result<()> {
    let app = router(state, static_dir);

    let listener = TcpListener::bind(bind).await?;
    log::info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await
}
