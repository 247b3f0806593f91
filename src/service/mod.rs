mod lifecycle;

pub use lifecycle::Lifecycle;

use std::sync::{Arc, Mutex, Weak};

use tokio::sync::watch;

use crate::appearance::{AppearanceSource, AppearanceWatch, SystemAppearance};
use crate::store::PreferenceStore;
use crate::theme::{self, ResolvedTheme, ThemeMode};

/// Store key for the persisted mode. The value is one of the literals from
/// [`ThemeMode::as_str`].
pub const THEME_MODE_KEY: &str = "theme_mode";

const HANDLE_MISUSE: &str =
    "theme handle used outside a live ThemeService scope; the owning service has been dropped";

/// What consumers render from. Republished on every mode or appearance
/// change, including changes that leave the palette untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeSnapshot {
    pub theme: ResolvedTheme,
    pub is_dark: bool,
}

impl ThemeSnapshot {
    fn resolve(mode: ThemeMode, appearance: SystemAppearance) -> Self {
        let theme = ResolvedTheme::resolve(mode, appearance);
        Self {
            is_dark: theme.is_dark(),
            theme,
        }
    }
}

struct ServiceState {
    mode: ThemeMode,
    appearance: SystemAppearance,
    lifecycle: Lifecycle,
}

struct ServiceInner {
    state: Mutex<ServiceState>,
    snapshot_tx: watch::Sender<ThemeSnapshot>,
    lifecycle_tx: watch::Sender<Lifecycle>,
    store: Arc<dyn PreferenceStore>,
}

impl ServiceInner {
    fn publish(&self, state: &ServiceState) {
        self.snapshot_tx
            .send_replace(ThemeSnapshot::resolve(state.mode, state.appearance));
    }

    fn set_mode(self: &Arc<Self>, mode: ThemeMode) {
        {
            let mut state = self.state.lock().unwrap();
            state.mode = mode;
            self.publish(&state);
        }
        self.spawn_persist(mode);
    }

    fn toggle(self: &Arc<Self>) {
        let mode = {
            let mut state = self.state.lock().unwrap();
            // Flip against the resolved palette, not the stored enum: a
            // service resolving dark under System toggles to explicit Light.
            let next = if theme::is_dark(state.mode, state.appearance) {
                ThemeMode::Light
            } else {
                ThemeMode::Dark
            };
            state.mode = next;
            self.publish(&state);
            next
        };
        self.spawn_persist(mode);
    }

    /// Best-effort write. The in-memory state is already current; a failed
    /// write is logged and never retried.
    fn spawn_persist(&self, mode: ThemeMode) {
        let store = Arc::clone(&self.store);
        tokio::spawn(async move {
            if let Err(err) = store.set_item(THEME_MODE_KEY, mode.as_str()).await {
                tracing::warn!(?err, mode = mode.as_str(), "failed to persist theme mode");
            }
        });
    }
}

/// The one theme authority for a process. Owns the user's mode, follows the
/// ambient appearance while in system mode, loads and saves the persisted
/// preference, and broadcasts the resolved palette.
///
/// Dropping the service releases its appearance watch and invalidates every
/// [`ThemeHandle`] cloned from it.
pub struct ThemeService {
    inner: Arc<ServiceInner>,
    snapshot_rx: watch::Receiver<ThemeSnapshot>,
    lifecycle_rx: watch::Receiver<Lifecycle>,
    _appearance_watch: AppearanceWatch,
}

impl ThemeService {
    /// Seeds state from the live appearance snapshot, registers for
    /// appearance changes, and spawns the stored-preference load. Must be
    /// called within a Tokio runtime.
    ///
    /// Until the load settles, reads answer with the system-mode default
    /// resolved against the appearance observed here.
    pub fn start(store: Arc<dyn PreferenceStore>, source: &dyn AppearanceSource) -> Self {
        let appearance = source.current();
        let (snapshot_tx, snapshot_rx) =
            watch::channel(ThemeSnapshot::resolve(ThemeMode::default(), appearance));
        let (lifecycle_tx, lifecycle_rx) = watch::channel(Lifecycle::default());

        let inner = Arc::new(ServiceInner {
            state: Mutex::new(ServiceState {
                mode: ThemeMode::default(),
                appearance,
                lifecycle: Lifecycle::default(),
            }),
            snapshot_tx,
            lifecycle_tx,
            store,
        });

        let watch_inner = Arc::downgrade(&inner);
        let appearance_watch = source.watch(Box::new(move |appearance| {
            let Some(inner) = watch_inner.upgrade() else {
                return;
            };
            let mut state = inner.state.lock().unwrap();
            state.appearance = appearance;
            inner.publish(&state);
        }));

        tokio::spawn(load_stored_mode(
            Arc::clone(&inner.store),
            Arc::downgrade(&inner),
        ));

        Self {
            inner,
            snapshot_rx,
            lifecycle_rx,
            _appearance_watch: appearance_watch,
        }
    }

    /// Consumer-facing context for this service. Clones are cheap; hand one
    /// to every screen.
    pub fn handle(&self) -> ThemeHandle {
        ThemeHandle {
            inner: Arc::downgrade(&self.inner),
            snapshot_rx: self.snapshot_rx.clone(),
        }
    }

    pub fn snapshot(&self) -> ThemeSnapshot {
        *self.snapshot_rx.borrow()
    }

    pub fn mode(&self) -> ThemeMode {
        self.inner.state.lock().unwrap().mode
    }

    pub fn is_dark(&self) -> bool {
        self.snapshot().is_dark
    }

    pub fn lifecycle(&self) -> Lifecycle {
        *self.lifecycle_rx.borrow()
    }

    /// Resolves once the stored-preference load has settled, successfully
    /// or not.
    pub async fn ready(&self) {
        let mut lifecycle_rx = self.lifecycle_rx.clone();
        while !lifecycle_rx.borrow().is_ready() {
            if lifecycle_rx.changed().await.is_err() {
                return;
            }
        }
    }

    /// A receiver that yields every republished [`ThemeSnapshot`].
    pub fn subscribe(&self) -> watch::Receiver<ThemeSnapshot> {
        self.snapshot_rx.clone()
    }

    pub fn set_mode(&self, mode: ThemeMode) {
        self.inner.set_mode(mode);
    }

    pub fn toggle(&self) {
        self.inner.toggle();
    }
}

async fn load_stored_mode(store: Arc<dyn PreferenceStore>, inner: Weak<ServiceInner>) {
    let loaded = match store.get_item(THEME_MODE_KEY).await {
        Ok(Some(raw)) => match ThemeMode::from_str_value(&raw) {
            Some(mode) => Some(mode),
            None => {
                tracing::warn!(value = raw.as_str(), "ignoring invalid stored theme mode");
                None
            }
        },
        Ok(None) => None,
        Err(err) => {
            tracing::warn!(?err, "failed to load stored theme mode; keeping default");
            None
        }
    };

    // The owning scope may be gone by the time the store answers.
    let Some(inner) = inner.upgrade() else {
        tracing::debug!("theme service dropped before the stored mode load settled");
        return;
    };

    let mut state = inner.state.lock().unwrap();
    if let Some(mode) = loaded {
        state.mode = mode;
    }
    if state.lifecycle.advance() {
        tracing::debug!(mode = ?state.mode, "theme service ready");
        inner.lifecycle_tx.send_replace(state.lifecycle);
    }
    inner.publish(&state);
}

/// Read-and-mutate context cloned out to consuming screens. Every method
/// requires the owning [`ThemeService`] to still be alive; use afterwards is
/// a programming error and panics.
#[derive(Clone)]
pub struct ThemeHandle {
    inner: Weak<ServiceInner>,
    snapshot_rx: watch::Receiver<ThemeSnapshot>,
}

impl ThemeHandle {
    fn inner(&self) -> Arc<ServiceInner> {
        self.inner.upgrade().expect(HANDLE_MISUSE)
    }

    pub fn snapshot(&self) -> ThemeSnapshot {
        let _inner = self.inner();
        *self.snapshot_rx.borrow()
    }

    pub fn theme(&self) -> ResolvedTheme {
        self.snapshot().theme
    }

    pub fn is_dark(&self) -> bool {
        self.snapshot().is_dark
    }

    pub fn mode(&self) -> ThemeMode {
        self.snapshot().theme.mode
    }

    pub fn set_mode(&self, mode: ThemeMode) {
        self.inner().set_mode(mode);
    }

    pub fn toggle(&self) {
        self.inner().toggle();
    }

    pub fn subscribe(&self) -> watch::Receiver<ThemeSnapshot> {
        let _inner = self.inner();
        self.snapshot_rx.clone()
    }
}
