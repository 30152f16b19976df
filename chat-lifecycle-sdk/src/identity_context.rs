use log::{info, trace};
use std::sync::{Arc, RwLock};
use tokio::sync::broadcast;

/// Who is signed in right now. Shared by the token and presence managers and fed by the authentication layer.
///
/// Every [sign_in][IdentityContext::sign_in] and [sign_out][IdentityContext::sign_out] is delivered to subscribers as its
/// own change, so a sign-out immediately followed by a sign-in is never collapsed into one.
#[derive(Debug, uniffi::Object)]
pub struct IdentityContext {
    current: RwLock<Option<String>>,
    changes_tx: broadcast::Sender<Option<String>>,
}

#[uniffi::export]
impl IdentityContext {
    #[uniffi::constructor]
    pub fn new() -> Arc<Self> {
        let (changes_tx, _) = broadcast::channel::<Option<String>>(64);
        Arc::new(Self {
            current: RwLock::new(None),
            changes_tx,
        })
    }

    /// The signed in identity's ID, if any.
    pub fn current_identity(&self) -> Option<String> {
        match self.current.read() {
            Ok(current) => current.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Marks `identity_id` as signed in and notifies subscribers.
    pub fn sign_in(&self, identity_id: String) {
        info!("Signed in as {identity_id}");
        self.set(Some(identity_id));
    }

    /// Clears the current identity and notifies subscribers.
    pub fn sign_out(&self) {
        info!("Signed out");
        self.set(None);
    }
}

impl IdentityContext {
    /// Identity changes from this point on.
    pub fn subscribe(&self) -> broadcast::Receiver<Option<String>> {
        self.changes_tx.subscribe()
    }

    fn set(&self, identity: Option<String>) {
        match self.current.write() {
            Ok(mut current) => *current = identity.clone(),
            Err(poisoned) => *poisoned.into_inner() = identity.clone(),
        }

        if self.changes_tx.send(identity).is_err() {
            trace!("No one is listening to identity changes");
        }
    }
}
