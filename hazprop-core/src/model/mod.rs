//! Data model for the propagation engine.
//!
//! All inputs are loaded once by the collaborators that read result
//! archives and handed over read-only; the engine never mutates them.

mod path;
mod pmf;
mod source;
mod uncertainty;

pub use path::{LogicTreeHalf, Pattern, RealizationPath};
pub use pmf::Pmf;
pub use source::{SourceId, SourceResult};
pub use uncertainty::Uncertainty;
