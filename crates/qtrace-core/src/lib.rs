#![warn(missing_docs)]

//! Qtrace-Core is the core package in the qtrace library.
//!
//! It provides the mixed-radix [`Radices`] number system describing a
//! composite Hilbert space, the scalar traits the trace engine is generic
//! over, the [`StateRef`] view accepted by every operation, the [`Ket`]
//! pure state, the shared [`QtraceError`] type and [`TraceOptions`].
mod config;
mod error;
mod quantum;
mod radices;
mod scalar;
mod state;
mod system;

pub mod accel;

pub use config::TraceOptions;
pub use error::QtraceError;
pub use error::Result;
pub use quantum::Ket;
pub use radices::Radices;
pub use scalar::ComplexScalar;
pub use scalar::Entry;
pub use scalar::RealScalar;
pub use state::StateRef;
pub use system::QuditSystem;

////////////////////////////////////////////////////////////////////////
/// Complex number types.
////////////////////////////////////////////////////////////////////////
pub use faer::c32;
pub use faer::c64;
////////////////////////////////////////////////////////////////////////
