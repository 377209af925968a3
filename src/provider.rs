//! Session providers.
//!
//! The gate consumes session state through [`SessionProvider`], a read-only
//! capability. Authentication, token storage and profile fetching stay with
//! whatever implements it.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use crate::session::{Session, User};

/// Source of truth for the current session.
///
/// Implementations return a snapshot; the gate never holds on to it.
pub trait SessionProvider {
    /// Returns the current session state.
    fn snapshot(&self) -> Session;
}

impl SessionProvider for Session {
    fn snapshot(&self) -> Session {
        self.clone()
    }
}

impl<P: SessionProvider + ?Sized> SessionProvider for &P {
    fn snapshot(&self) -> Session {
        (**self).snapshot()
    }
}

impl<P: SessionProvider + ?Sized> SessionProvider for Rc<P> {
    fn snapshot(&self) -> Session {
        (**self).snapshot()
    }
}

impl<P: SessionProvider + ?Sized> SessionProvider for Arc<P> {
    fn snapshot(&self) -> Session {
        (**self).snapshot()
    }
}

/// In-memory session provider for a single UI thread.
///
/// `SessionStore` holds the session state a client keeps between renders and
/// exposes the transitions a real provider goes through while checking,
/// signing in and signing out. A fresh store starts out loading, as a client
/// does before its first session check returns.
///
/// # Example
///
/// ```
/// use access_gate::{Role, SessionProvider, SessionStore, User, VerificationStatus};
///
/// let store = SessionStore::new();
/// assert!(store.snapshot().is_loading);
///
/// store.sign_in(User::new("u-1", "Ada", Role::Buyer, VerificationStatus::Verified));
/// let session = store.snapshot();
/// assert!(!session.is_loading);
/// assert!(session.is_authenticated);
/// ```
pub struct SessionStore {
    session: RefCell<Session>,
}

impl SessionStore {
    /// Creates a store whose first session check is still in flight.
    pub fn new() -> Self {
        Self::with_session(Session::loading())
    }

    /// Creates a store seeded with an existing snapshot.
    pub fn with_session(session: Session) -> Self {
        Self {
            session: RefCell::new(session),
        }
    }

    /// Marks a background session check as in flight.
    ///
    /// The current user, if any, is kept; the gate ignores it until loading
    /// finishes.
    pub fn begin_loading(&self) {
        self.session.borrow_mut().is_loading = true;
        tracing::debug!(target: "access_gate::session", "session check started");
    }

    /// Records a successful sign-in and settles the session.
    pub fn sign_in(&self, user: User) {
        tracing::debug!(
            target: "access_gate::session",
            user_id = %user.id,
            user_type = %user.user_type,
            verification = %user.verification_status,
            "session signed in"
        );
        *self.session.borrow_mut() = Session::authenticated(user);
    }

    /// Records a sign-out (or a failed session check) and settles the session.
    pub fn sign_out(&self) {
        tracing::debug!(target: "access_gate::session", "session signed out");
        *self.session.borrow_mut() = Session::anonymous();
    }

    /// Replaces the profile of the signed-in user, e.g. after a refresh.
    ///
    /// Returns `false` and changes nothing if nobody is signed in.
    pub fn update_user(&self, user: User) -> bool {
        let mut session = self.session.borrow_mut();
        if !session.is_authenticated {
            tracing::debug!(
                target: "access_gate::session",
                user_id = %user.id,
                "profile update ignored: no signed-in session"
            );
            return false;
        }

        tracing::debug!(
            target: "access_gate::session",
            user_id = %user.id,
            verification = %user.verification_status,
            "session profile updated"
        );
        session.user = Some(user);
        session.is_loading = false;
        true
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionProvider for SessionStore {
    fn snapshot(&self) -> Session {
        self.session.borrow().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{Role, VerificationStatus};

    fn buyer(status: VerificationStatus) -> User {
        User::new("u-1", "Ada", Role::Buyer, status)
    }

    #[test]
    fn new_store_is_loading() {
        let store = SessionStore::new();
        assert_eq!(store.snapshot(), Session::loading());
    }

    #[test]
    fn sign_in_settles_session() {
        let store = SessionStore::new();
        store.sign_in(buyer(VerificationStatus::Pending));

        let session = store.snapshot();
        assert!(!session.is_loading);
        assert!(session.is_authenticated);
        assert_eq!(session.user.unwrap().id, "u-1");
    }

    #[test]
    fn begin_loading_keeps_user() {
        let store = SessionStore::new();
        store.sign_in(buyer(VerificationStatus::Verified));
        store.begin_loading();

        let session = store.snapshot();
        assert!(session.is_loading);
        assert!(session.user.is_some());
    }

    #[test]
    fn sign_out_clears_user() {
        let store = SessionStore::new();
        store.sign_in(buyer(VerificationStatus::Verified));
        store.sign_out();

        assert_eq!(store.snapshot(), Session::anonymous());
    }

    #[test]
    fn update_user_requires_signed_in_session() {
        let store = SessionStore::with_session(Session::anonymous());
        assert!(!store.update_user(buyer(VerificationStatus::Verified)));
        assert_eq!(store.snapshot(), Session::anonymous());
    }

    #[test]
    fn update_user_replaces_profile() {
        let store = SessionStore::new();
        store.sign_in(buyer(VerificationStatus::Pending));
        store.begin_loading();

        assert!(store.update_user(buyer(VerificationStatus::Verified)));
        let session = store.snapshot();
        assert!(!session.is_loading);
        assert!(session.user.unwrap().is_verified());
    }

    #[test]
    fn fixed_session_and_smart_pointers_provide_snapshots() {
        let session = Session::anonymous();
        assert_eq!(session.snapshot(), session);

        let shared = Rc::new(SessionStore::with_session(Session::anonymous()));
        assert_eq!(shared.snapshot(), Session::anonymous());

        let arc: Arc<Session> = Arc::new(Session::loading());
        assert!(arc.snapshot().is_loading);
    }
}
