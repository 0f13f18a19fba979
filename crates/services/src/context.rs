use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

/// Identity of the signed-in user as far as the exam backend is concerned.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthContext {
    user_label: Option<String>,
    token: Option<String>,
}

impl AuthContext {
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            user_label: None,
            token: Some(token.into()),
        }
    }

    #[must_use]
    pub fn user_label(mut self, label: impl Into<String>) -> Self {
        self.user_label = Some(label.into());
        self
    }

    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.user_label.as_deref()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

/// Counts outstanding backend reads so a screen can show a loader.
///
/// Clones share the same counter.
#[derive(Clone, Debug, Default)]
pub struct LoadingTracker {
    in_flight: Arc<AtomicUsize>,
}

impl LoadingTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark one request as started; it ends when the guard drops.
    #[must_use]
    pub fn begin(&self) -> LoadingGuard {
        self.in_flight.fetch_add(1, Ordering::AcqRel);
        LoadingGuard {
            in_flight: Arc::clone(&self.in_flight),
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::Acquire) > 0
    }
}

#[derive(Debug)]
pub struct LoadingGuard {
    in_flight: Arc<AtomicUsize>,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.in_flight.fetch_sub(1, Ordering::AcqRel);
    }
}

/// Per-screen context handed to services at construction.
#[derive(Clone, Debug, Default)]
pub struct SessionContext {
    pub auth: AuthContext,
    pub loading: LoadingTracker,
}

impl SessionContext {
    #[must_use]
    pub fn new(auth: AuthContext) -> Self {
        Self {
            auth,
            loading: LoadingTracker::new(),
        }
    }
}
