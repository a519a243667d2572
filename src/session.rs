//! Persisted authentication state.
//!
//! A [`Session`] is loaded from local storage once, written through on every
//! login/register/update, and removed from storage on logout or when the
//! service answers 401. One process-wide instance is reachable through
//! [`install`] / [`global`].

use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};

use crate::api::{AuthResponse, FleetApi};
use crate::logging::{fingerprint, log, obj, v_str, Domain, Level};
use crate::storage::LocalStore;

pub const STORAGE_KEY: &str = "fleetx-auth";
pub const LOGIN_ROUTE: &str = "/login";

const DEMO_TOKEN: &str = "demo-token-12345";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub company_id: String,
    pub company_name: String,
    pub subscription_plan: String,
}

impl User {
    pub fn demo() -> Self {
        Self {
            id: "demo-001".to_string(),
            email: "demo@fleetx.com".to_string(),
            first_name: "Demo".to_string(),
            last_name: "User".to_string(),
            role: "COMPANY_ADMIN".to_string(),
            company_id: "demo-company-001".to_string(),
            company_name: "Demo Trucking Co.".to_string(),
            subscription_plan: "PROFESSIONAL".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionState {
    pub user: Option<User>,
    pub token: Option<String>,
    pub is_authenticated: bool,
}

/// Storage layout: `{"state": {...}, "version": 0}`.
#[derive(Debug, Serialize, Deserialize)]
struct Persisted {
    state: SessionState,
    #[serde(default)]
    version: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Registration {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub company_name: Option<String>,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoginOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl LoginOutcome {
    fn ok() -> Self {
        Self { success: true, message: None }
    }
}

/// Where the client goes when credentials are no longer valid.
pub trait Navigator: Send + Sync {
    fn redirect(&self, route: &str);
}

/// Logs the redirect and does nothing else; used by the command-line front end.
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn redirect(&self, route: &str) {
        log(Level::Info, Domain::Session, "redirect", obj(&[("route", v_str(route))]));
    }
}

pub struct Session {
    store: LocalStore,
    state: Mutex<SessionState>,
    navigator: Box<dyn Navigator>,
}

impl Session {
    /// Load persisted state, or start signed out when none (or unreadable) is stored.
    pub fn open(store: LocalStore, navigator: Box<dyn Navigator>) -> Result<Self> {
        let state = match store.get_item(STORAGE_KEY)? {
            Some(raw) => match serde_json::from_str::<Persisted>(&raw) {
                Ok(p) => p.state,
                Err(err) => {
                    log(
                        Level::Warn,
                        Domain::Session,
                        "stored_state_unreadable",
                        obj(&[("msg", v_str(&err.to_string()))]),
                    );
                    SessionState::default()
                }
            },
            None => SessionState::default(),
        };
        Ok(Self {
            store,
            state: Mutex::new(state),
            navigator,
        })
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        // State is only ever replaced whole, so a poisoned guard still holds a valid value.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn state(&self) -> SessionState {
        self.lock().clone()
    }

    pub fn token(&self) -> Option<String> {
        self.lock().token.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.lock().is_authenticated
    }

    fn replace(&self, next: SessionState) -> Result<()> {
        let raw = serde_json::to_string(&Persisted { state: next.clone(), version: 0 })?;
        self.store.set_item(STORAGE_KEY, &raw)?;
        *self.lock() = next;
        Ok(())
    }

    pub fn is_demo_credentials(email: &str, password: &str) -> bool {
        email == "demo@fleetx.com" || email == "demo" || password == "demo123"
    }

    pub fn demo_login(&self) -> Result<LoginOutcome> {
        self.establish(User::demo(), DEMO_TOKEN.to_string())?;
        Ok(LoginOutcome::ok())
    }

    /// Record an authenticated user and persist it.
    pub fn establish(&self, user: User, token: String) -> Result<()> {
        log(
            Level::Info,
            Domain::Session,
            "login",
            obj(&[("user_id", v_str(&user.id)), ("token_fp", v_str(&fingerprint(&token)))]),
        );
        self.replace(SessionState {
            user: Some(user),
            token: Some(token),
            is_authenticated: true,
        })
    }

    /// Demo credentials sign in locally; anything else goes to the service.
    pub async fn login(&self, api: &dyn FleetApi, email: &str, password: &str) -> Result<LoginOutcome> {
        if Self::is_demo_credentials(email, password) {
            return self.demo_login();
        }
        match api.login(email, password).await {
            Ok(auth) => {
                let (user, token) = auth.into_session(email);
                self.establish(user, token)?;
                Ok(LoginOutcome::ok())
            }
            Err(err) => {
                log(
                    Level::Warn,
                    Domain::Session,
                    "login_failed",
                    obj(&[("msg", v_str(&err.to_string()))]),
                );
                Ok(LoginOutcome {
                    success: false,
                    message: Some(err.server_message().unwrap_or_else(|| "Login failed".to_string())),
                })
            }
        }
    }

    /// Creates a local trial account; registration is not sent to the service.
    pub fn register(&self, data: Registration) -> Result<LoginOutcome> {
        let stamp = chrono::Utc::now().timestamp_millis();
        let user = User {
            id: format!("demo-{}", stamp),
            email: data.email,
            first_name: data.first_name,
            last_name: data.last_name,
            role: "COMPANY_OWNER".to_string(),
            company_id: format!("demo-company-{}", stamp),
            company_name: data
                .company_name
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| "Demo Transport Co.".to_string()),
            subscription_plan: "TRIAL".to_string(),
        };
        self.establish(user, format!("demo-token-{}", stamp))?;
        Ok(LoginOutcome::ok())
    }

    /// Apply `patch` to the signed-in user. No-op when signed out.
    pub fn update_user<F>(&self, patch: F) -> Result<()>
    where
        F: FnOnce(&mut User),
    {
        let mut next = self.state();
        match next.user.as_mut() {
            Some(user) => patch(user),
            None => return Ok(()),
        }
        self.replace(next)
    }

    pub fn logout(&self) -> Result<()> {
        self.store.remove_item(STORAGE_KEY)?;
        *self.lock() = SessionState::default();
        log(Level::Info, Domain::Session, "logout", obj(&[]));
        Ok(())
    }

    /// Drop credentials after the service rejected them, then send the user to login.
    pub fn invalidate(&self) {
        if let Err(err) = self.store.remove_item(STORAGE_KEY) {
            log(
                Level::Error,
                Domain::Session,
                "credential_clear_failed",
                obj(&[("msg", v_str(&err.to_string()))]),
            );
        }
        *self.lock() = SessionState::default();
        log(
            Level::Warn,
            Domain::Session,
            "credentials_invalidated",
            obj(&[("route", json!(LOGIN_ROUTE))]),
        );
        self.navigator.redirect(LOGIN_ROUTE);
    }
}

static GLOBAL: OnceLock<Arc<Session>> = OnceLock::new();

/// Make `session` the process-wide session. Returns it back if one is already installed.
pub fn install(session: Arc<Session>) -> std::result::Result<Arc<Session>, Arc<Session>> {
    GLOBAL.set(session.clone()).map(|_| session)
}

pub fn global() -> Option<Arc<Session>> {
    GLOBAL.get().cloned()
}

impl AuthResponse {
    fn into_session(self, email: &str) -> (User, String) {
        let user = User {
            id: self.user_id,
            email: self.email.unwrap_or_else(|| email.to_string()),
            first_name: self.first_name,
            last_name: self.last_name,
            role: self.role,
            company_id: self.company_id,
            company_name: self.company_name,
            subscription_plan: self.subscription_plan,
        };
        (user, self.token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingNavigator(Arc<AtomicUsize>);

    impl Navigator for CountingNavigator {
        fn redirect(&self, route: &str) {
            assert_eq!(route, LOGIN_ROUTE);
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn session_at(path: &str) -> Session {
        Session::open(LocalStore::open(path).unwrap(), Box::new(LogNavigator)).unwrap()
    }

    #[test]
    fn test_starts_signed_out() {
        let s = Session::open(LocalStore::in_memory().unwrap(), Box::new(LogNavigator)).unwrap();
        assert!(!s.is_authenticated());
        assert_eq!(s.token(), None);
    }

    #[test]
    fn test_demo_login_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.sqlite");
        let path = path.to_str().unwrap();

        session_at(path).demo_login().unwrap();
        let reopened = session_at(path);
        assert!(reopened.is_authenticated());
        assert_eq!(reopened.token().as_deref(), Some(DEMO_TOKEN));
        assert_eq!(reopened.state().user.unwrap().email, "demo@fleetx.com");
    }

    #[test]
    fn test_logout_clears_storage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.sqlite");
        let path = path.to_str().unwrap();

        let s = session_at(path);
        s.demo_login().unwrap();
        s.logout().unwrap();
        assert!(!s.is_authenticated());
        assert!(!session_at(path).is_authenticated());
    }

    #[test]
    fn test_register_creates_trial_owner() {
        let s = Session::open(LocalStore::in_memory().unwrap(), Box::new(LogNavigator)).unwrap();
        s.register(Registration {
            email: "ops@acme.test".to_string(),
            first_name: "Ana".to_string(),
            company_name: Some("  ".to_string()),
            ..Default::default()
        })
        .unwrap();
        let user = s.state().user.unwrap();
        assert_eq!(user.role, "COMPANY_OWNER");
        assert_eq!(user.subscription_plan, "TRIAL");
        assert_eq!(user.company_name, "Demo Transport Co.");
        assert!(s.token().unwrap().starts_with("demo-token-"));
    }

    #[test]
    fn test_update_user_writes_through() {
        let s = Session::open(LocalStore::in_memory().unwrap(), Box::new(LogNavigator)).unwrap();
        s.update_user(|u| u.first_name = "Nobody".to_string()).unwrap();
        assert!(s.state().user.is_none());

        s.demo_login().unwrap();
        s.update_user(|u| u.first_name = "Dana".to_string()).unwrap();
        assert_eq!(s.state().user.unwrap().first_name, "Dana");
    }

    #[test]
    fn test_invalidate_clears_and_redirects_once() {
        let redirects = Arc::new(AtomicUsize::new(0));
        let s = Session::open(
            LocalStore::in_memory().unwrap(),
            Box::new(CountingNavigator(redirects.clone())),
        )
        .unwrap();
        s.demo_login().unwrap();
        s.invalidate();
        assert!(!s.is_authenticated());
        assert_eq!(s.token(), None);
        assert_eq!(redirects.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unreadable_state_starts_signed_out() {
        let store = LocalStore::in_memory().unwrap();
        store.set_item(STORAGE_KEY, "not json").unwrap();
        let s = Session::open(store, Box::new(LogNavigator)).unwrap();
        assert!(!s.is_authenticated());
    }

    #[test]
    fn test_demo_credentials() {
        assert!(Session::is_demo_credentials("demo", "x"));
        assert!(Session::is_demo_credentials("a@b.c", "demo123"));
        assert!(!Session::is_demo_credentials("a@b.c", "secret"));
    }

    // The only test that touches the process-wide slot.
    #[test]
    fn test_install_keeps_first_session() {
        let first = Arc::new(Session::open(LocalStore::in_memory().unwrap(), Box::new(LogNavigator)).unwrap());
        let second = Arc::new(Session::open(LocalStore::in_memory().unwrap(), Box::new(LogNavigator)).unwrap());

        let installed = install(Arc::clone(&first)).ok().unwrap();
        assert!(Arc::ptr_eq(&installed, &first));
        assert!(Arc::ptr_eq(&global().unwrap(), &first));

        let rejected = install(Arc::clone(&second)).err().unwrap();
        assert!(Arc::ptr_eq(&rejected, &second));
        assert!(Arc::ptr_eq(&global().unwrap(), &first));
    }
}
