//! sf-solver: sequential-modular flowsheet solver.
//!
//! Devices are evaluated in dependency order. Strongly connected groups
//! (recycle loops) are converged by direct substitution on their tear
//! streams; everything else is a single pass.

pub mod error;
pub mod order;
pub mod solve;

pub use error::{SolverError, SolverResult};
pub use order::{evaluation_order, EvalGroup};
pub use solve::{solve, DeviceDuty, Solution, SolverConfig};
