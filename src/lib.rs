#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod core;

#[cfg(feature = "std")]
pub mod controller;
#[cfg(feature = "std")]
pub mod domain;
#[cfg(feature = "std")]
pub mod interface;
#[cfg(feature = "std")]
mod logging;
#[cfg(feature = "std")]
pub mod notify;
#[cfg(feature = "std")]
pub mod persistence;
pub mod prelude;

pub use crate::core::*;

#[cfg(feature = "std")]
pub use controller::{Command, ControllerHandle, GameController, Snapshot};
#[cfg(feature = "std")]
pub use domain::{GameSummary, MatchRecord, MoveRecord, VictoryNotice};
#[cfg(feature = "std")]
pub use logging::{init_logging, parse_level};
#[cfg(feature = "std")]
pub use notify::{LogNotifier, Notifier};
#[cfg(feature = "std")]
pub use persistence::{read_history, FileRecorder, GameRecorder, MemoryRecorder, NullRecorder};
