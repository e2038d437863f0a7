//! Maplist Core Runtime
//!
//! This crate provides the foundational primitives for the maplist widget:
//!
//! - **Event Dispatch**: Unified event handling for scroll, gesture, and
//!   lifecycle notifications
//! - **State Machines**: Typed transition tables for widget interaction states
//! - **Geometry**: Rect and color primitives shared by the surfaces
//!
//! # Example
//!
//! ```rust
//! use maplist_core::fsm::{StateMachine, StateTransitions};
//! use maplist_core::events::event_types::*;
//!
//! #[derive(Clone, Copy, Debug, PartialEq, Eq)]
//! enum Door {
//!     Closed,
//!     Open,
//! }
//!
//! impl StateTransitions for Door {
//!     fn on_event(&self, event: u32) -> Option<Self> {
//!         match (self, event) {
//!             (Door::Closed, EXPAND) => Some(Door::Open),
//!             (Door::Open, COLLAPSE) => Some(Door::Closed),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! let mut fsm = StateMachine::new(Door::Closed);
//! fsm.send(EXPAND);
//! assert_eq!(fsm.current(), Door::Open);
//! ```

pub mod events;
pub mod fsm;
pub mod geometry;

pub use events::{Event, EventData, EventDispatcher, EventType};
pub use fsm::{StateMachine, StateTransitions};
pub use geometry::{Color, Point, Rect};
