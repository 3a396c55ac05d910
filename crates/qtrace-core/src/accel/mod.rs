//! Dense kernels used by the basis-change and state-construction routines.

mod kron;

pub use kron::kron;
pub use kron::kron_add;
pub use kron::kron_new;
