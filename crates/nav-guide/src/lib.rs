//! `nav-guide` — what to tell the traveler next.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`turn`]        | `TurnKind::classify` (straight / slight / turn / sharp)   |
//! | [`instruction`] | `Guidance` text, `InstructionList` for a whole path       |
//! | [`tracker`]     | `InstructionTracker` (distance quantum + turn proximity)  |
//! | [`device`]      | `DeviceCommand` parsing, wire JSON, duplicate suppression |
//!
//! Everything here is pure and synchronous; the simulation crate decides
//! when to call it.

pub mod device;
pub mod instruction;
pub mod tracker;
pub mod turn;


pub use device::{CommandDedup, DEFAULT_DEVICE_SPEED_PCT, DeviceCommand, TurnDirection};
pub use instruction::{DISTANCE_STEP_M, Guidance, Instruction, InstructionList, Maneuver, full_path_instructions, round_distance};
pub use tracker::{InstructionTracker, TrackerParams};
pub use turn::{Side, TurnKind};
