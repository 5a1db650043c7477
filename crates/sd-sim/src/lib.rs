//! `sd-sim` — the world context and tick loop of the systemic-design
//! stimulus engine.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                     |
//! |--------------|--------------------------------------------------------------|
//! | [`world`]    | `World` — arenas, routing protocol, component lifecycle      |
//! | [`kinds`]    | `KindSpec` table: singleton slots and per-kind hooks         |
//! | [`sim`]      | `Sim` — the fixed-step tick loop                             |
//! | [`builder`]  | `SimBuilder`                                                 |
//! | [`observer`] | `SimObserver`, `Delivery`, `TickStats`, `DeliveryLog`        |
//! | [`config`]   | `WorldConfig`, TOML loading                                  |
//! | [`error`]    | `SimError`, `SimResult<T>`                                   |
//!
//! # Routing
//!
//! ```text
//! DirectOutput.send_output(i) ─┐
//! Broadcast (children / top-level systems) ─┤
//! PresenceActivation overlap ─┤
//!                             └→ send_direct(target, token)
//!                                  → target's DirectInput: budget → listened? → handlers
//!
//! Presence/PresenceActivation volume ──overlap──→ Vision: listened? → budget → handlers
//! EmitParticle ──particle──overlap──→ Smell: budget → not own → consume → handlers
//! TimerWheel ──→ Periodic / Random (roll) / EmitParticle lanes
//! ```
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use sd_sense::{DirectInput, HandlerSet, Sense, StimulusBindings};
//! use sd_sim::{NoopObserver, SimBuilder, WorldConfig};
//!
//! let mut sim = SimBuilder::new(WorldConfig::default()).build()?;
//! let herd = sim.world.add_system(sim.world.root(), "Herd", "herd")?;
//! let deer = sim.world.add_unit(herd, "Deer")?;
//! let bindings = StimulusBindings::new()
//!     .listen("Danger", HandlerSet::from_fn(|f| f.set_position(f.entity, Vec3::ZERO)));
//! sim.world.attach(deer, Sense::DirectInput(DirectInput::new(bindings)))?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod kinds;
pub mod observer;
pub mod sim;
pub mod world;


pub use builder::SimBuilder;
pub use config::{WorldConfig, load_config, parse_config};
pub use error::{SimError, SimResult};
pub use kinds::{KindSpec, Slot};
pub use observer::{Channel, Delivery, DeliveryLog, NoopObserver, SimObserver, TickStats};
pub use sim::Sim;
pub use world::World;
