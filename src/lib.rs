//! Compiles per-element animation descriptors into renderer filter chains.
//!
//! A scene element carries an ordered list of declarative animations (fade, alpha, rotate,
//! zoom, move). This crate turns that list into the filters an ffmpeg filter graph applies to
//! the element, with every time-dependent option expressed as a piecewise expression of `t`.
//!
//! # Pipeline overview
//!
//! 1. **Collect**: descriptors and named presets join an [`AnimationList`] in order
//! 2. **Build**: each descriptor becomes one or more time-gated [`AniFilter`]s
//! 3. **Merge**: same-type filters are chained into a single expression per family, in the
//!    fixed order rotate → zoom/pan → alpha → overlay, with fades last
//! 4. **Emit**: expressions are rendered and the result is a list of [`FilterSpec`]s
//!
//! Compilation is pure and deterministic; recompute after any descriptor change.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod effects;
mod filters;
mod foundation;

pub use animation::descriptor::{
    AnimationDescriptor, AnimationKind, AnimationSpec, Endpoint, ShowType,
};
pub use animation::ease::{Ease, evaluate};
pub use animation::element::{ElementInfo, ElementKind};
pub use animation::list::AnimationList;
pub use animation::node::{AnimationInput, AnimationNode};
pub use effects::registry::{EffectRegistry, EffectRequest, ParamSet, Preset, map_symbolic};
pub use filters::expr::{BinaryOp, Cond, Expr, Slot, UnaryOp, fmt_num};
pub use filters::{AniFilter, FilterSpec, MergeData, OptionValue};
pub use foundation::error::{WavyteError, WavyteResult};
