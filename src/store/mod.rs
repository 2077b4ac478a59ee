//! Client-side stores.
//!
//! The session and business stores write through to a SQLite-backed
//! key-value store ([`KvStore`]) so state survives reloads; the subscription
//! and UI stores are volatile and refilled each session. All four are
//! process-wide singletons shared by every mounted guard. Writes happen on
//! one logical thread between suspension points, so last-writer-wins is the
//! only coordination needed.

mod business;
mod kv;
mod schema;
mod session;
mod subscription;
mod ui;

pub use business::BusinessStore;
pub use kv::KvStore;
pub use session::SessionStore;
pub use subscription::SubscriptionStore;
pub use ui::{Toast, ToastKind, UiStore, UpgradePrompt};
