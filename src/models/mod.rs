//! Domain models for the PocketLedger mobile client core.
//!
//! # Core Concepts
//!
//! ## Persisted state
//!
//! - [`Identity`]: The signed-in user, rehydrated from local storage at boot.
//! - [`Session`]: Identity plus the `authenticated` flag. Only the identity
//!   and the flag are ever persisted; credentials and tokens never touch
//!   local storage.
//! - [`BusinessProfile`]: The tenant the user operates. Absent until
//!   onboarding completes.
//!
//! ## Volatile state
//!
//! These are refetched each session and cleared on logout:
//!
//! - [`SubscriptionState`]: Premium/trial flags driving plan gating.
//! - [`crate::gesture::GestureState`]: Per-view pull-to-refresh state.

mod business;
mod identity;
mod session;
mod subscription;

pub use business::*;
pub use identity::*;
pub use session::*;
pub use subscription::*;
