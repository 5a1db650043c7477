//! `sd-sense` — the sensing and emission strategies.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                       |
//! |---------------|----------------------------------------------------------------|
//! | [`activable`] | `Activable` — activation flag plus activation budget           |
//! | [`handler`]   | `Handler`, `HandlerSet`, `Firing`, `Command`                   |
//! | [`bindings`]  | `StimulusBindings` — listened tokens aligned with handler sets |
//! | [`input`]     | Direct, Periodic, Random, Smell and Vision inputs              |
//! | [`output`]    | Broadcast, Direct, EmitParticle, Presence, PresenceActivation  |
//! | [`kind`]      | `SenseKind` (authoring names), `Sense` (closed strategy enum)  |
//! | [`component`] | `Component` — one attached sense with its runtime state        |
//! | [`particle`]  | `Particle`, `ParticleTemplate`, `SmellField`                   |
//! | [`presence`]  | `PresenceStrategy`, `PresenceToggle`                           |
//! | [`error`]     | `SenseError`, `SenseResult<T>`                                 |
//!
//! # Handler model
//!
//! Handlers never touch the world directly.  A handler receives a
//! [`Firing`] describing who fired and why, and queues [`Command`]s on it.
//! The world applies the queue after the triggering operation finishes, so a
//! handler can never observe or corrupt a half-updated component:
//!
//! ```text
//! receive("Food") → handler(&mut Firing) → [SendDirect{..}, SetActivated{..}]
//!                                                 ↓ (after receive returns)
//!                                          world.flush_commands()
//! ```

pub mod activable;
pub mod bindings;
pub mod component;
pub mod error;
pub mod handler;
pub mod input;
pub mod kind;
pub mod output;
pub mod particle;
pub mod presence;


pub use activable::Activable;
pub use bindings::StimulusBindings;
pub use component::Component;
pub use error::{SenseError, SenseResult};
pub use handler::{Command, Firing, Handler, HandlerSet};
pub use input::{DirectInput, PeriodicInput, RandomInput, SmellInput, TriggerMode, VisionInput};
pub use kind::{Sense, SenseKind};
pub use output::{
    BroadcastOutput, DirectOutput, EmitParticleOutput, PresenceActivationOutput, PresenceOutput,
};
pub use particle::{Particle, ParticleTemplate, SmellField};
pub use presence::{PresenceStrategy, PresenceToggle, ToggleStep};
