//! # Core Module
//!
//! Stateless value types exchanged between the caller and the simulation
//! engine. Nothing in this layer touches the filesystem or the engine; these
//! are plain data carriers produced at the capability boundary and owned by
//! the caller once returned.
//!
//! - **Trajectory frames** ([`frame`]) - one timestep of positional data
//! - **Run-input parameters** ([`params`]) - keyed heterogeneous scalars
//! - **Atom selections** ([`selection`]) - opaque engine-evaluated filters

pub mod frame;
pub mod params;
pub mod selection;
