//! Terminal presentation layer.
//!
//! View models turn a `PipelineReport` into display-ready values; the
//! presenter writes them out. Nothing here feeds back into the pipeline.

pub mod components;
pub mod input;
pub mod presenter;
pub mod view_models;

pub use input::{InputDefaults, parse_interaction};
pub use presenter::TerminalPresenter;
