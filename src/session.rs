//! Bearer token and cached user, mirrored in memory for the UI.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::api::{ApiClient, Transport};
use crate::error::ApiError;
use crate::models::User;
use crate::storage::{KeyValueStore, TOKEN_KEY, USER_KEY};

#[derive(Clone, Debug, PartialEq)]
pub struct SessionState {
    pub user: Option<User>,
    pub loading: bool,
    pub error: String,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            user: None,
            loading: true,
            error: String::new(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SessionStatus<'a> {
    Loading,
    Authenticated(&'a User),
    Anonymous,
}

impl SessionState {
    pub fn status(&self) -> SessionStatus<'_> {
        match (&self.user, self.loading) {
            (_, true) => SessionStatus::Loading,
            (Some(user), false) => SessionStatus::Authenticated(user),
            (None, false) => SessionStatus::Anonymous,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RefreshOutcome {
    Refreshed,
    NoToken,
    Suppressed,
    /// The session was replaced or cleared while the request was in flight.
    Superseded,
    Failed,
}

pub struct SessionStore<T, S> {
    api: Rc<ApiClient<T, S>>,
    state: RefCell<SessionState>,
    refreshing: Cell<bool>,
    epoch: Cell<u64>,
    on_change: Rc<dyn Fn()>,
}

impl<T: Transport, S: KeyValueStore> SessionStore<T, S> {
    pub fn new(api: Rc<ApiClient<T, S>>, on_change: Rc<dyn Fn()>) -> Self {
        Self {
            api,
            state: RefCell::new(SessionState::default()),
            refreshing: Cell::new(false),
            epoch: Cell::new(0),
            on_change,
        }
    }

    pub fn snapshot(&self) -> SessionState {
        self.state.borrow().clone()
    }

    fn store(&self) -> &S {
        self.api.store()
    }

    /// Invalidates any refresh still waiting on the network and frees the guard
    /// for the next one.
    fn bump_epoch(&self) {
        self.epoch.set(self.epoch.get() + 1);
        self.refreshing.set(false);
    }

    fn update(&self, change: impl FnOnce(&mut SessionState)) {
        change(&mut self.state.borrow_mut());
        (self.on_change)();
    }

    /// Restores the cached user, then refreshes it from the backend.
    pub async fn init(&self) -> RefreshOutcome {
        if let Some(raw) = self.store().get(USER_KEY) {
            match serde_json::from_str::<User>(&raw) {
                Ok(user) => self.update(|state| state.user = Some(user)),
                Err(err) => {
                    tracing::warn!(error = %err, "discarding unreadable cached user");
                    self.store().remove(USER_KEY);
                    self.update(|state| state.user = None);
                }
            }
        }
        self.refresh().await
    }

    pub async fn refresh(&self) -> RefreshOutcome {
        let token = self.store().get(TOKEN_KEY).unwrap_or_default();
        if token.is_empty() {
            self.update(|state| {
                state.user = None;
                state.loading = false;
            });
            return RefreshOutcome::NoToken;
        }

        if self.refreshing.replace(true) {
            tracing::debug!("session refresh already in flight");
            return RefreshOutcome::Suppressed;
        }

        self.update(|state| {
            state.loading = true;
            state.error.clear();
        });

        let epoch = self.epoch.get();
        let result = self.api.fetch_current_user(&token).await;
        if self.epoch.get() != epoch {
            tracing::debug!("discarding refresh for a replaced session");
            return RefreshOutcome::Superseded;
        }

        let outcome = match result {
            Ok(user) => {
                self.cache_user(&user);
                tracing::info!(user_id = user.id, "session refreshed");
                self.update(|state| state.user = Some(user));
                RefreshOutcome::Refreshed
            }
            Err(err) => {
                tracing::warn!(error = %err, "session refresh failed");
                self.store().remove(USER_KEY);
                self.update(|state| {
                    state.error = err.to_string();
                    state.user = None;
                });
                RefreshOutcome::Failed
            }
        };

        self.refreshing.set(false);
        self.update(|state| state.loading = false);
        outcome
    }

    /// Stores `token`. With a user from the server the session is ready at once;
    /// otherwise the user is fetched.
    pub async fn set_session(&self, token: &str, user: Option<User>) {
        self.bump_epoch();
        self.store().set(TOKEN_KEY, token);
        match user {
            Some(user) => {
                self.cache_user(&user);
                tracing::info!(user_id = user.id, "session started");
                self.update(|state| {
                    state.user = Some(user);
                    state.error.clear();
                    state.loading = false;
                });
            }
            None => {
                self.refresh().await;
            }
        }
    }

    pub fn clear_session(&self) {
        self.bump_epoch();
        self.store().remove(TOKEN_KEY);
        self.store().remove(USER_KEY);
        tracing::info!("session cleared");
        self.update(|state| {
            state.user = None;
            state.loading = false;
        });
    }

    /// Signs in with an identity-provider credential and returns the signed-in user.
    pub async fn login_with_google(&self, credential: &str) -> Result<User, ApiError> {
        let auth = self.api.login_with_google(credential).await?;
        if auth.access_token.is_empty() {
            return Err(ApiError::Validation(
                "Token não recebido do servidor.".to_string(),
            ));
        }

        self.set_session(&auth.access_token, Some(auth.user.clone()))
            .await;
        self.refresh().await;
        Ok(auth.user)
    }

    fn cache_user(&self, user: &User) {
        match serde_json::to_string(user) {
            Ok(raw) => self.store().set(USER_KEY, &raw),
            Err(err) => tracing::warn!(error = %err, "failed to cache user"),
        }
    }
}
