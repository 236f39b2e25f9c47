//! BluePulse: rolling simulation and presentation engine for synthetic
//! marine-sensor streams.
//!
//! The core is a set of capacity-bounded, time-ordered series buffers fed by
//! two generation paths (bulk sinusoid history, random-walk live ticks), a
//! cooperative periodic scheduler, a historical/forecast partitioner, and a
//! chart-ready presentation adapter. Nothing here touches a UI: consumers
//! pull snapshots and hand the resulting payloads to an external renderer.

pub mod config;
pub mod forecast;
pub mod logging;
pub mod present;
pub mod scheduler;
pub mod series;
pub mod stats;
pub mod store;
pub mod training;
