//! Theme preference service for the app: the user's light/dark/system mode,
//! persisted best-effort, resolved against the live system appearance, and
//! broadcast to every consuming screen.
//!
//! Wire it up once at startup and clone handles into the view tree:
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use duotone::{AppearanceHub, JsonFileStore, SystemAppearance, ThemeService};
//!
//! # async fn setup() -> Result<(), duotone::StoreError> {
//! let appearance = AppearanceHub::with_initial(SystemAppearance::Light);
//! let service = ThemeService::start(Arc::new(JsonFileStore::open_default()?), &appearance);
//! service.ready().await;
//!
//! let handle = service.handle();
//! let palette = handle.theme().palette;
//! // ... the platform layer keeps feeding `appearance.publish(...)`.
//! # Ok(())
//! # }
//! ```

pub mod appearance;
pub mod logging;
pub mod palette;
pub mod service;
pub mod store;
pub mod theme;

pub use appearance::{AppearanceHub, AppearanceSource, AppearanceWatch, SystemAppearance};
pub use palette::{Color, Palette, DARK_PALETTE, LIGHT_PALETTE};
pub use service::{Lifecycle, ThemeHandle, ThemeService, ThemeSnapshot, THEME_MODE_KEY};
pub use store::{JsonFileStore, MemoryStore, PreferenceStore, StoreError, StoreResult};
pub use theme::{ResolvedTheme, ThemeMode};
