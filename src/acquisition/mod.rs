//! Acquisition FSM
//!
//! Sequences the staged workflow that turns a profile reference into an
//! inventory ready for display.
//!
//! # State Machine
//!
//! ```text
//! IDLE → RESOLVING_IDENTITY → FETCHING_INVENTORY → ENRICHING_PRICES → FINALIZING → READY
//!               ↓                     ↓                   ↓                ↓
//!                ──────────────────── FAILED(stage) ──────────────────────
//! ```
//!
//! # Invariants
//!
//! 1. **Sequential**: stages never overlap; at most one step is `loading`
//! 2. **Halt on error**: after a step fails no later step leaves `pending`
//! 3. **Identity before success**: the session id is written before stage 0
//!    is marked successful
//! 4. **Single writer**: only the newest run (or reset) may publish

pub mod coordinator;
pub mod error;
pub mod state;
pub mod step;

pub use coordinator::{AcquisitionCoordinator, AcquisitionSnapshot};
pub use error::AcquisitionError;
pub use state::{AcquisitionState, Stage};
pub use step::{LoadingStep, LoadingSteps, StepStatus};
