//! Session State
//!
//! Token persistence and the session-expired notification. The HTTP layer
//! only publishes `SessionEvent::Expired`; the application shell owns the
//! single listener and decides where to navigate.

use std::sync::{Arc, Mutex};

/// Bearer token persistence
pub trait TokenStore: Send + Sync {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str);
    fn clear(&self);
}

/// Token kept in `window.localStorage`
pub struct BrowserTokenStore {
    key: String,
}

impl BrowserTokenStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok().flatten())
    }
}

impl TokenStore for BrowserTokenStore {
    fn load(&self) -> Option<String> {
        Self::storage()
            .and_then(|s| s.get_item(&self.key).ok().flatten())
            .filter(|t| !t.is_empty())
    }

    fn save(&self, token: &str) {
        if let Some(storage) = Self::storage() {
            if storage.set_item(&self.key, token).is_err() {
                log::warn!("could not persist session token");
            }
        }
    }

    fn clear(&self) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(&self.key);
        }
    }
}

/// In-memory token store
#[cfg(test)]
#[derive(Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

#[cfg(test)]
impl MemoryTokenStore {
    pub fn with_token(token: &str) -> Self {
        Self { token: Mutex::new(Some(token.to_string())) }
    }
}

#[cfg(test)]
impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.token.lock().ok().and_then(|t| t.clone())
    }

    fn save(&self, token: &str) {
        if let Ok(mut slot) = self.token.lock() {
            *slot = Some(token.to_string());
        }
    }

    fn clear(&self) {
        if let Ok(mut slot) = self.token.lock() {
            *slot = None;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// Backend rejected the token
    Expired,
    /// User signed out
    SignedOut,
}

type Listener = Arc<dyn Fn(SessionEvent) + Send + Sync>;

/// Single-listener event bus for session changes
#[derive(Clone, Default)]
pub struct SessionEvents {
    listener: Arc<Mutex<Option<Listener>>>,
}

impl SessionEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the listener, replacing any previous one
    pub fn subscribe(&self, listener: impl Fn(SessionEvent) + Send + Sync + 'static) {
        if let Ok(mut slot) = self.listener.lock() {
            *slot = Some(Arc::new(listener));
        }
    }

    /// Deliver an event; returns false when nobody is listening.
    /// The listener runs after the slot is unlocked, so it may publish or
    /// subscribe again.
    pub fn publish(&self, event: SessionEvent) -> bool {
        let listener = match self.listener.lock() {
            Ok(slot) => slot.clone(),
            Err(_) => return false,
        };
        match listener {
            Some(listener) => {
                listener(event);
                true
            }
            None => {
                log::debug!("session event {:?} dropped, no listener", event);
                false
            }
        }
    }
}

/// Minimum accepted password length
pub const MIN_PASSWORD_LEN: usize = 6;

/// Check a new password and its confirmation before sending
pub fn validate_password_change(new_password: &str, confirmation: &str) -> Result<(), &'static str> {
    if new_password != confirmation {
        return Err("The new passwords do not match");
    }
    if new_password.chars().count() < MIN_PASSWORD_LEN {
        return Err("Password must be at least 6 characters");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_memory_token_store() {
        let store = MemoryTokenStore::default();
        assert_eq!(store.load(), None);
        store.save("abc");
        assert_eq!(store.load().as_deref(), Some("abc"));
        store.clear();
        assert_eq!(store.load(), None);
    }

    #[test]
    fn test_publish_without_listener() {
        let events = SessionEvents::new();
        assert!(!events.publish(SessionEvent::Expired));
    }

    #[test]
    fn test_subscribe_replaces_listener() {
        let events = SessionEvents::new();
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));

        let f = first.clone();
        events.subscribe(move |_| {
            f.fetch_add(1, Ordering::SeqCst);
        });
        let s = second.clone();
        events.subscribe(move |e| {
            assert_eq!(e, SessionEvent::Expired);
            s.fetch_add(1, Ordering::SeqCst);
        });

        // Clones share the same slot
        assert!(events.clone().publish(SessionEvent::Expired));
        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_listener_can_publish_again() {
        let events = SessionEvents::new();
        let seen = Arc::new(AtomicUsize::new(0));

        let inner = events.clone();
        let count = seen.clone();
        events.subscribe(move |event| {
            count.fetch_add(1, Ordering::SeqCst);
            if event == SessionEvent::Expired {
                assert!(inner.publish(SessionEvent::SignedOut));
            }
        });

        assert!(events.publish(SessionEvent::Expired));
        assert_eq!(seen.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_validate_password_change() {
        assert_eq!(validate_password_change("secret1", "secret2"), Err("The new passwords do not match"));
        assert!(validate_password_change("abc", "abc").is_err());
        assert_eq!(validate_password_change("abcdef", "abcdef"), Ok(()));
    }
}
