use std::collections::BTreeMap;

use smallvec::{SmallVec, smallvec};

use crate::animation::descriptor::AnimationSpec;
use crate::animation::element::ElementInfo;
use crate::filters::{AniFilter, FilterBuilder, gate, gated_filter, window_value};
use crate::foundation::error::WavyteResult;

/// Movement of the element's overlay position; each axis is its own gated expression.
pub(crate) struct OverlayFilter;

impl FilterBuilder for OverlayFilter {
    const NAME: &'static str = "overlay";

    fn build(
        spec: &AnimationSpec,
        element: &ElementInfo,
    ) -> WavyteResult<SmallVec<[AniFilter; 2]>> {
        let ((from_x, from_y), (to_x, to_y)) = spec.point_from_to(element.position())?;
        let (value_x, hold_x) = window_value(spec, from_x, to_x, 1.0)?;
        let (value_y, hold_y) = window_value(spec, from_y, to_y, 1.0)?;

        let filter = gated_filter(
            "overlay",
            Self::NAME,
            "t",
            spec,
            BTreeMap::from([("x".to_string(), hold_x), ("y".to_string(), hold_y)]),
        )
        .option("x", gate(spec, from_x, value_x, hold_x))
        .option("y", gate(spec, from_y, value_y, hold_y));
        Ok(smallvec![filter])
    }
}

#[cfg(test)]
#[path = "../../tests/unit/filters/overlay.rs"]
mod tests;
