use std::fmt;
use std::rc::Rc;

use crate::error::Error;
use crate::provider::SessionProvider;
use crate::session::Session;

/// Explicit carrier of the session provider for a subtree of the application.
///
/// Hosts create one `SessionScope` where their session provider lives and
/// hand clones of it down to every protected region. Nothing is global: a
/// region sees a provider only if one was passed to it.
///
/// Resolving a session from a [`detached`](Self::detached) scope is a wiring
/// bug and fails with [`Error::MissingSessionProvider`]. It never falls back
/// to an empty session.
///
/// # Examples
///
/// ```
/// use access_gate::{Error, Session, SessionScope};
///
/// let scope = SessionScope::new(Session::anonymous());
/// assert!(scope.session().is_ok());
///
/// let detached = SessionScope::detached();
/// assert_eq!(detached.session(), Err(Error::MissingSessionProvider));
/// ```
#[derive(Clone)]
pub struct SessionScope {
    provider: Option<Rc<dyn SessionProvider>>,
}

impl SessionScope {
    /// Creates a scope backed by `provider`.
    pub fn new(provider: impl SessionProvider + 'static) -> Self {
        let provider: Rc<dyn SessionProvider> = Rc::new(provider);
        Self::from_shared(provider)
    }

    /// Creates a scope from an already shared provider.
    pub fn from_shared(provider: Rc<dyn SessionProvider>) -> Self {
        Self {
            provider: Some(provider),
        }
    }

    /// Creates a scope with no provider attached.
    pub fn detached() -> Self {
        Self { provider: None }
    }

    /// Returns true if a provider is attached.
    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    /// Reads the current session from the attached provider.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingSessionProvider`] if the scope is detached.
    pub fn session(&self) -> Result<Session, Error> {
        match &self.provider {
            Some(provider) => Ok(provider.snapshot()),
            None => {
                tracing::error!(
                    target: "access_gate",
                    "access gate evaluated outside a session-providing scope"
                );
                Err(Error::MissingSessionProvider)
            }
        }
    }
}

impl fmt::Debug for SessionScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionScope")
            .field("has_provider", &self.has_provider())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::SessionStore;
    use crate::session::{Role, User, VerificationStatus};

    #[test]
    fn detached_scope_fails_fast() {
        let scope = SessionScope::detached();
        assert!(!scope.has_provider());
        assert_eq!(scope.session(), Err(Error::MissingSessionProvider));
    }

    #[test]
    fn scope_reads_live_provider_state() {
        let store = Rc::new(SessionStore::new());
        let scope = SessionScope::new(Rc::clone(&store));

        assert!(scope.session().unwrap().is_loading);

        store.sign_in(User::new(
            "u-2",
            "Grace",
            Role::Supplier,
            VerificationStatus::Verified,
        ));
        let session = scope.session().unwrap();
        assert!(session.is_authenticated);
        assert!(!session.is_loading);
    }

    #[test]
    fn cloned_scope_shares_provider() {
        let store = Rc::new(SessionStore::with_session(Session::anonymous()));
        let shared: Rc<dyn SessionProvider> = store.clone();
        let scope = SessionScope::from_shared(shared);
        let child = scope.clone();

        store.begin_loading();
        assert!(child.session().unwrap().is_loading);
    }

    #[test]
    fn debug_does_not_dump_session() {
        let scope = SessionScope::new(Session::anonymous());
        assert_eq!(
            format!("{:?}", scope),
            "SessionScope { has_provider: true }"
        );
    }
}
