use std::sync::{Arc, Mutex};

/// OS-reported ambient light/dark preference. Read-only from this crate's
/// point of view and never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SystemAppearance {
    Light,
    Dark,
    #[default]
    Unknown,
}

pub type AppearanceCallback = Box<dyn Fn(SystemAppearance) + Send>;

/// Where the current system appearance comes from, plus a push channel for
/// changes. The host's platform layer decides how `current` is obtained.
pub trait AppearanceSource {
    /// Synchronous snapshot, cheap enough to call at startup.
    fn current(&self) -> SystemAppearance;

    /// Registers `callback` for every subsequent appearance change. The
    /// registration lives as long as the returned guard.
    fn watch(&self, callback: AppearanceCallback) -> AppearanceWatch;
}

#[derive(Default)]
struct HubState {
    current: SystemAppearance,
    next_id: u64,
    watchers: Vec<(u64, AppearanceCallback)>,
}

/// Push-based [`AppearanceSource`] fed by the host: whenever the OS reports
/// an appearance change, the platform layer calls [`AppearanceHub::publish`].
#[derive(Clone, Default)]
pub struct AppearanceHub {
    state: Arc<Mutex<HubState>>,
}

impl AppearanceHub {
    /// Starts at [`SystemAppearance::Unknown`] until the first `publish`.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_initial(appearance: SystemAppearance) -> Self {
        let hub = Self::new();
        hub.state.lock().unwrap().current = appearance;
        hub
    }

    /// Records the new appearance and notifies every registered watcher.
    /// Watchers run synchronously on the caller's thread, in registration
    /// order.
    pub fn publish(&self, appearance: SystemAppearance) {
        let mut state = self.state.lock().unwrap();
        if state.current != appearance {
            tracing::debug!(from = ?state.current, to = ?appearance, "system appearance changed");
        }
        state.current = appearance;
        for (_, callback) in &state.watchers {
            callback(appearance);
        }
    }

    #[cfg(test)]
    pub(crate) fn watcher_count(&self) -> usize {
        self.state.lock().unwrap().watchers.len()
    }
}

impl AppearanceSource for AppearanceHub {
    fn current(&self) -> SystemAppearance {
        self.state.lock().unwrap().current
    }

    fn watch(&self, callback: AppearanceCallback) -> AppearanceWatch {
        let mut state = self.state.lock().unwrap();
        let id = state.next_id;
        state.next_id += 1;
        state.watchers.push((id, callback));

        let hub = Arc::downgrade(&self.state);
        AppearanceWatch::new(move || {
            if let Some(state) = hub.upgrade() {
                state.lock().unwrap().watchers.retain(|(other, _)| *other != id);
            }
        })
    }
}

/// Registration guard returned by [`AppearanceSource::watch`]. Dropping it
/// removes the watcher, so an owning scope cannot leak its subscription.
pub struct AppearanceWatch {
    release: Option<Box<dyn FnOnce() + Send>>,
}

impl AppearanceWatch {
    /// Wraps whatever a source needs to run to undo the registration.
    pub fn new(release: impl FnOnce() + Send + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }
}

impl Drop for AppearanceWatch {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}
