//! VibeRacing simulation core
//!
//! Two cars, one figure-eight course, one `step(dt, input)` per frame.
//!
//! Architecture:
//!   track     : lemniscate centerline, finish line, play-area bounds
//!   vehicle   : per-car kinematics and integration
//!   collision : car/car overlap resolution
//!   lap       : finish-line crossing and the lap-ready latch
//!   path_side : over/under branch tracking at the self-crossing
//!   race      : countdown → flag wave → active phase control
//!   input     : player slots and per-frame control intents
//!   simulation: the owning aggregate and its query surface
//!
//! Nothing here touches a window, a clock or an input device; the host
//! samples input, measures elapsed time and draws whatever the queries
//! report.

pub mod collision;
pub mod input;
pub mod lap;
pub mod path_side;
pub mod race;
pub mod simulation;
pub mod track;
pub mod vehicle;

pub use input::{ControlIntents, InputSnapshot, IntentSource, PlayerSlot};
pub use race::RacePhase;
pub use simulation::{CarView, RaceEvent, RaceSnapshot, Simulation, StepReport};
pub use track::{FinishLine, PlayArea, TrackGeometry};
pub use vehicle::Vehicle;
