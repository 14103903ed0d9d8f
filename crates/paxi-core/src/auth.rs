//! Sign-in and sign-up requests with a simulated server round trip.
//!
//! The continuation runs after a fixed delay unless the handle is cancelled
//! or dropped first, so a view that goes away never signs anyone in behind
//! its back.

use std::sync::{Arc, Mutex};

use log::{debug, warn};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::config::CoreConfig;
use crate::store::{AppStore, StoreError, StoreResult};

/// What the auth form submits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthRequest {
    SignIn {
        email: String,
        password: String,
    },
    SignUp {
        name: String,
        email: String,
        password: String,
    },
}

impl AuthRequest {
    /// Presence checks. Credentials themselves are never verified.
    pub fn validate(&self) -> StoreResult<()> {
        match self {
            AuthRequest::SignIn { .. } => Ok(()),
            AuthRequest::SignUp { name, .. } => {
                if name.trim().is_empty() {
                    return Err(StoreError::Validation("name is required".into()));
                }
                Ok(())
            }
        }
    }

    /// Apply immediately.
    pub fn apply(&self, store: &mut AppStore) -> StoreResult<()> {
        match self {
            AuthRequest::SignIn { email, password } => store.login(email, password),
            AuthRequest::SignUp {
                name,
                email,
                password,
            } => store.signup(email, password, name),
        }
    }
}

/// How a deferred request ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    Authenticated,
    Cancelled,
    Failed(String),
}

/// Handle to a pending sign-in. Dropping it cancels the request.
#[derive(Debug)]
pub struct DeferredAuth {
    token: CancellationToken,
    handle: Option<JoinHandle<AuthOutcome>>,
}

impl DeferredAuth {
    /// Validate `request` now and apply it to `store` after the configured
    /// auth latency.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(
        store: Arc<Mutex<AppStore>>,
        request: AuthRequest,
        config: &CoreConfig,
    ) -> StoreResult<Self> {
        Self::spawn_on(&Handle::current(), store, request, config)
    }

    /// Same as [`DeferredAuth::spawn`], on an explicit runtime.
    pub fn spawn_on(
        runtime: &Handle,
        store: Arc<Mutex<AppStore>>,
        request: AuthRequest,
        config: &CoreConfig,
    ) -> StoreResult<Self> {
        request.validate()?;

        let delay = config.auth_latency();
        let token = CancellationToken::new();
        let task_token = token.clone();
        let handle = runtime.spawn(async move {
            tokio::select! {
                biased;
                _ = task_token.cancelled() => AuthOutcome::Cancelled,
                _ = tokio::time::sleep(delay) => {
                    if task_token.is_cancelled() {
                        AuthOutcome::Cancelled
                    } else {
                        apply_now(&store, &request)
                    }
                }
            }
        });

        debug!("Auth request scheduled in {:?}", delay);
        Ok(Self {
            token,
            handle: Some(handle),
        })
    }

    /// Suppress the continuation if it has not run yet.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Token that cancels this request, for callers that hand off the handle.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Wait for the request to finish.
    pub async fn wait(mut self) -> AuthOutcome {
        match self.handle.take() {
            Some(handle) => handle
                .await
                .unwrap_or_else(|e| AuthOutcome::Failed(format!("auth task failed: {}", e))),
            None => AuthOutcome::Cancelled,
        }
    }
}

impl Drop for DeferredAuth {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

fn apply_now(store: &Mutex<AppStore>, request: &AuthRequest) -> AuthOutcome {
    let mut store = match store.lock() {
        Ok(guard) => guard,
        Err(e) => return AuthOutcome::Failed(format!("Lock poisoned: {}", e)),
    };
    match request.apply(&mut store) {
        Ok(()) => AuthOutcome::Authenticated,
        Err(e) => {
            warn!("Deferred auth rejected: {}", e);
            AuthOutcome::Failed(e.to_string())
        }
    }
}
