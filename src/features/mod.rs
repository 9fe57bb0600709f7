//! Consumers of gesture and hand-position samples. Each feature is plain
//! state with no I/O; timers and polling are driven from the app handler.

pub mod basketball;
pub mod games;
pub mod presentation;
pub mod rps;
pub mod spells;
pub mod whiteboard;
