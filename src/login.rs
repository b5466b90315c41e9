use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use axum::{
    Form,
    extract::{FromRef, FromRequestParts, State},
    http::{StatusCode, request::Parts},
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, Key, SignedCookieJar};
use serde::Deserialize;
use serde_json::json;
use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::{Duration, SystemTime};
use uuid::Uuid;

use crate::app::{AppState, load_tables};
use crate::error::AppError;
use crate::store::{Table, TableKind};

/// Name of the cookie carrying the session id
pub const SESSION_COOKIE: &str = "session";

/// Session lifetime: 24 hours in seconds
const SESSION_DURATION: u64 = 24 * 60 * 60;

/// Role of a logged-in user, taken from the `role` column of `login_users`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Student,
}

impl Role {
    /// Anything other than `admin` is treated as a student.
    pub fn parse(value: &str) -> Self {
        if value.trim() == "admin" {
            Role::Admin
        } else {
            Role::Student
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Student => "student",
        }
    }
}

/// User session data
///
/// Represents an authenticated user session.
#[derive(Debug, Clone)]
pub struct Session {
    /// Role granted at login
    pub role: Role,

    /// Student id linked to the login row, if any
    pub student_id: Option<i64>,

    /// Student an admin is currently viewing as
    pub selected_student: Option<i64>,

    /// Time when the session expires
    pub expires_at: SystemTime,
}

impl Session {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Student whose records the session is looking at.
    ///
    /// Admins see the impersonated student; students see themselves.
    pub fn current_student(&self) -> Option<i64> {
        match self.role {
            Role::Admin => self.selected_student,
            Role::Student => self.student_id,
        }
    }
}

/// Server-side session storage
///
/// Maps session ids (UUID v4, carried in a signed cookie) to sessions.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new user session
    ///
    /// # Arguments
    /// * `role` - The role granted to the session
    /// * `student_id` - The student linked to the login, if any
    ///
    /// # Returns
    /// * `String` - A unique session ID
    pub fn create(&self, role: Role, student_id: Option<i64>) -> String {
        let now = SystemTime::now();
        let session_id = Uuid::new_v4().to_string();
        let session = Session {
            role,
            student_id,
            selected_student: None,
            expires_at: now + Duration::from_secs(SESSION_DURATION),
        };

        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        // Expired sessions are only hidden by `get`; drop them here.
        sessions.retain(|_, existing| existing.expires_at > now);
        sessions.insert(session_id.clone(), session);

        session_id
    }

    /// Validate a session
    ///
    /// # Returns
    /// * `Option<Session>` - The session if it exists and has not expired
    pub fn get(&self, session_id: &str) -> Option<Session> {
        let sessions = self.sessions.read().unwrap_or_else(PoisonError::into_inner);
        sessions
            .get(session_id)
            .filter(|session| session.expires_at > SystemTime::now())
            .cloned()
    }

    /// Set the student an admin session is viewing as.
    ///
    /// Returns false if the session does not exist.
    pub fn select_student(&self, session_id: &str, student_id: i64) -> bool {
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        match sessions.get_mut(session_id) {
            Some(session) => {
                session.selected_student = Some(student_id);
                true
            }
            None => false,
        }
    }

    pub fn remove(&self, session_id: &str) {
        self.sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(session_id);
    }
}

/// The caller's session, resolved from the signed session cookie.
///
/// Holds `None` for anonymous requests and expired or unknown sessions.
#[derive(Debug, Clone)]
pub struct Auth {
    pub session_id: Option<String>,
    pub session: Option<Session>,
}

impl Auth {
    pub fn is_admin(&self) -> bool {
        self.session.as_ref().is_some_and(Session::is_admin)
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.is_some()
    }

    pub fn role(&self) -> Option<Role> {
        self.session.as_ref().map(|session| session.role)
    }

    /// Resolve the student to show, or the redirect to take instead.
    ///
    /// Anonymous callers go to the login page; an admin who has not picked a
    /// student goes back to the student list.
    pub fn current_student(&self) -> Result<i64, Redirect> {
        match &self.session {
            None => Err(Redirect::to("/")),
            Some(session) => session.current_student().ok_or_else(|| Redirect::to("/admin")),
        }
    }
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for Auth
where
    S: Send + Sync,
    Arc<AppState>: FromRef<S>,
    Key: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = SignedCookieJar::<Key>::from_request_parts(parts, state).await?;
        let app = Arc::<AppState>::from_ref(state);

        let session_id = jar.get(SESSION_COOKIE).map(|cookie| cookie.value().to_string());
        let session = session_id.as_deref().and_then(|id| app.sessions.get(id));
        Ok(Auth {
            session_id,
            session,
        })
    }
}

/// Hash a password using Argon2
///
/// Creates a PHC string suitable for the `password` column of `login_users`.
///
/// # Errors
/// * Returns an error if the password hashing fails
pub fn hash_password(password: &str) -> Result<String, String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    match argon2.hash_password(password.as_bytes(), &salt) {
        Ok(hash) => Ok(hash.to_string()),
        Err(_) => Err("Password hashing failed".to_string()),
    }
}

/// Verify a password against a stored hash
///
/// # Returns
/// * `Result<bool, String>` - True if the password matches, false if not, or an error
///
/// # Errors
/// * Returns an error if the hash is in an invalid format
fn verify_password(password: &str, hash: &str) -> Result<bool, String> {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(hash) => hash,
        Err(_) => return Err("Invalid password hash format".to_string()),
    };

    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(_) => Ok(true),
        Err(_) => Ok(false), // Password didn't match
    }
}

/// Check a submitted password against the stored credential.
///
/// Stored values starting with `$argon2` are verified as Argon2 hashes; any
/// other value is compared as plaintext.
pub fn credential_matches(stored: &str, given: &str) -> bool {
    if stored.starts_with("$argon2") {
        verify_password(given, stored).unwrap_or_else(|e| {
            log::warn!("unusable password hash in login_users: {}", e);
            false
        })
    } else {
        stored == given
    }
}

/// Find the login row matching the credentials.
///
/// # Returns
/// * `Option<(Role, Option<i64>)>` - Role and linked student id of the first match
pub fn authenticate(login: &Table, username: &str, password: &str) -> Option<(Role, Option<i64>)> {
    login
        .rows
        .iter()
        .find(|row| {
            Table::cell(row, "username").to_string() == username
                && credential_matches(&Table::cell(row, "password").to_string(), password)
        })
        .map(|row| {
            (
                Role::parse(&Table::cell(row, "role").to_string()),
                Table::cell(row, "student_id").as_i64(),
            )
        })
}

/// Credential data for login
#[derive(Debug, Deserialize)]
pub struct UserCredentials {
    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub password: String,
}

/// Serve the login page
pub async fn serve_login_page(State(state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    state.views.render("login", &json!({ "title": "Login" }))
}

/// Handle user login requests
///
/// Matches the credentials against `login_users`, creates a session and
/// redirects admins to `/admin` and students to `/dashboard`.
///
/// # Returns
/// * `Response` - Redirect on success, `401 Invalid Credentials` otherwise
pub async fn handle_login(
    State(state): State<Arc<AppState>>,
    jar: SignedCookieJar,
    Form(credentials): Form<UserCredentials>,
) -> Result<Response, AppError> {
    let tables = load_tables(&state).await?;

    let Some((role, student_id)) = authenticate(
        tables.get(TableKind::Login),
        &credentials.username,
        &credentials.password,
    ) else {
        log::info!("rejected login for {:?}", credentials.username);
        return Ok((StatusCode::UNAUTHORIZED, "Invalid Credentials").into_response());
    };

    // A fresh session never carries a previous impersonation.
    if let Some(old) = jar.get(SESSION_COOKIE) {
        state.sessions.remove(old.value());
    }
    let session_id = state.sessions.create(role, student_id);
    log::info!("{} logged in as {}", credentials.username, role.as_str());

    let cookie = Cookie::build((SESSION_COOKIE, session_id))
        .path("/")
        .http_only(true);
    let target = match role {
        Role::Admin => "/admin",
        Role::Student => "/dashboard",
    };

    Ok((jar.add(cookie), Redirect::to(target)).into_response())
}

/// Handle user logout
///
/// Drops the server-side session, clears the cookie and redirects to the login page.
pub async fn handle_logout(
    State(state): State<Arc<AppState>>,
    auth: Auth,
    jar: SignedCookieJar,
) -> (SignedCookieJar, Redirect) {
    if let Some(id) = &auth.session_id {
        state.sessions.remove(id);
    }

    (
        jar.remove(Cookie::build(SESSION_COOKIE).path("/")),
        Redirect::to("/"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{CellValue, Row};

    fn login_table() -> Table {
        let mut table = Table::new(
            "login_users",
            vec!["username".into(), "password".into(), "role".into(), "student_id".into()],
        );
        let hashed = hash_password("s3cret").unwrap();
        for (user, pass, role, sid) in [
            ("admin", "admin123".to_string(), "admin", None),
            ("asha", hashed, "student", Some(1)),
            ("ravi", "1234".to_string(), "student", Some(2)),
        ] {
            let mut row = Row::new();
            row.insert("username".into(), CellValue::text(user));
            row.insert("password".into(), CellValue::from(pass));
            row.insert("role".into(), CellValue::text(role));
            if let Some(sid) = sid {
                row.insert("student_id".into(), CellValue::Int(sid));
            }
            table.rows.push(row);
        }
        table
    }

    #[test]
    fn authenticates_plaintext_and_hashed_passwords() {
        let table = login_table();
        assert_eq!(authenticate(&table, "admin", "admin123"), Some((Role::Admin, None)));
        assert_eq!(authenticate(&table, "asha", "s3cret"), Some((Role::Student, Some(1))));
        assert_eq!(authenticate(&table, "asha", "wrong"), None);
        assert_eq!(authenticate(&table, "nobody", "admin123"), None);
    }

    #[test]
    fn numeric_password_cells_compare_as_text() {
        let mut table = login_table();
        table.rows[2].insert("password".into(), CellValue::Int(1234));
        assert_eq!(authenticate(&table, "ravi", "1234"), Some((Role::Student, Some(2))));
    }

    #[test]
    fn session_lifecycle() {
        let store = SessionStore::new();
        let id = store.create(Role::Admin, None);

        let session = store.get(&id).unwrap();
        assert!(session.is_admin());
        assert_eq!(session.current_student(), None);

        assert!(store.select_student(&id, 7));
        assert_eq!(store.get(&id).unwrap().current_student(), Some(7));

        store.remove(&id);
        assert!(store.get(&id).is_none());
        assert!(!store.select_student(&id, 7));
    }

    #[test]
    fn students_see_only_themselves() {
        let session = Session {
            role: Role::Student,
            student_id: Some(3),
            selected_student: Some(9),
            expires_at: SystemTime::now() + Duration::from_secs(60),
        };
        assert_eq!(session.current_student(), Some(3));
    }

    #[test]
    fn current_student_redirects() {
        let anonymous = Auth {
            session_id: None,
            session: None,
        };
        assert!(anonymous.current_student().is_err());

        let admin = Auth {
            session_id: Some("x".into()),
            session: Some(Session {
                role: Role::Admin,
                student_id: None,
                selected_student: None,
                expires_at: SystemTime::now() + Duration::from_secs(60),
            }),
        };
        assert!(admin.current_student().is_err());
        assert!(admin.is_admin());
    }

    #[test]
    fn expired_sessions_are_ignored() {
        let store = SessionStore::new();
        let id = store.create(Role::Student, Some(1));
        store
            .sessions
            .write()
            .unwrap()
            .get_mut(&id)
            .unwrap()
            .expires_at = SystemTime::now() - Duration::from_secs(1);
        assert!(store.get(&id).is_none());
    }

    #[test]
    fn creating_a_session_purges_expired_ones() {
        let store = SessionStore::new();
        let stale = store.create(Role::Student, Some(1));
        let live = store.create(Role::Admin, None);
        store
            .sessions
            .write()
            .unwrap()
            .get_mut(&stale)
            .unwrap()
            .expires_at = SystemTime::now() - Duration::from_secs(1);

        let fresh = store.create(Role::Student, Some(2));
        let sessions = store.sessions.read().unwrap();
        assert!(!sessions.contains_key(&stale));
        assert!(sessions.contains_key(&live));
        assert!(sessions.contains_key(&fresh));
        assert_eq!(sessions.len(), 2);
    }
}
