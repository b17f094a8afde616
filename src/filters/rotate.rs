use std::collections::BTreeMap;

use smallvec::{SmallVec, smallvec};

use crate::animation::descriptor::AnimationSpec;
use crate::animation::element::ElementInfo;
use crate::filters::{AniFilter, FilterBuilder, gate, gated_filter, window_value};
use crate::foundation::error::WavyteResult;

/// Angles are authored in degrees; the renderer's `rotate` filter takes radians.
fn to_radians(deg: f64) -> f64 {
    // Four decimals keep the rendered expression compact.
    (deg.to_radians() * 10_000.0).round() / 10_000.0
}

/// Rotation about the element center.
pub(crate) struct RotateFilter;

impl FilterBuilder for RotateFilter {
    const NAME: &'static str = "rotate";

    fn build(
        spec: &AnimationSpec,
        _element: &ElementInfo,
    ) -> WavyteResult<SmallVec<[AniFilter; 2]>> {
        let (from, to) = spec.scalar_endpoints()?;
        let (from, to) = (to_radians(from), to_radians(to));
        let (value, hold) = window_value(spec, from, to, std::f64::consts::PI / 180.0)?;

        let mut filter = gated_filter(
            "rotate",
            Self::NAME,
            "t",
            spec,
            BTreeMap::from([("a".to_string(), hold)]),
        )
        .option("a", gate(spec, from, value, hold))
        .option("c", "none");
        if spec.pad {
            // Grow the output so corners are not clipped mid-turn.
            filter = filter
                .option("ow", "hypot(iw,ih)")
                .option("oh", "hypot(iw,ih)");
        }
        Ok(smallvec![filter])
    }
}

#[cfg(test)]
#[path = "../../tests/unit/filters/rotate.rs"]
mod tests;
