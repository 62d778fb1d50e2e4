//! Grid coordination and the view boundary
//!
//! This crate wires the data layer and the selection engine together
//! under one controller, and defines the logical messages exchanged with
//! the browser-rendered view over the bidirectional channel.

pub mod channel;
pub mod config;
pub mod controller;
pub mod messages;
pub mod transform;
pub mod wire;

// Re-export commonly used types
pub use channel::{RecordingChannel, ViewChannel};
pub use config::{AutoFitArea, AutoFitParams, GridConfig, GridStyle, HeaderVisibility};
pub use controller::{ClearMode, GridController};
pub use messages::{InboundMessage, OutboundMessage};
pub use transform::{FilterOperator, Transform};
pub use wire::{WireDataset, WireSchema};
