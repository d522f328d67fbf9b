//! Token budget fitting for sample-chat turns.
//!
//! # Key Components
//!
//! - [`counter`]: Token counting via heuristic estimation, behind a trait so a
//!   model-specific tokenizer can be plugged in
//! - [`fitter`]: Suffix selection that keeps turns atomic

pub mod counter;
pub mod fitter;

pub use counter::{HeuristicTokenCounter, SharedTokenCounter, TokenCounter};
pub use fitter::{fit, fit_with_counter, try_fit, FitResult};
