use std::collections::BTreeMap;

use smallvec::{SmallVec, smallvec};

use crate::animation::descriptor::AnimationSpec;
use crate::animation::element::ElementInfo;
use crate::filters::{AniFilter, FilterBuilder, gate, gated_filter, window_value};
use crate::foundation::error::{WavyteError, WavyteResult};

/// Input upscale applied before `zoompan`; sampling a larger source removes the jitter
/// `zoompan` shows on small inputs.
pub(crate) const ZOOM_UPSCALE: u32 = 4;

/// Zoom about the element center via `zoompan`. The family emits a single upscale right
/// before its final `zoompan`, however many zoom animations were merged.
pub(crate) struct ZoomFilter;

impl FilterBuilder for ZoomFilter {
    const NAME: &'static str = "zoompan";

    fn build(
        spec: &AnimationSpec,
        element: &ElementInfo,
    ) -> WavyteResult<SmallVec<[AniFilter; 2]>> {
        let (from, to) = spec.scalar_endpoints()?;
        if from < 1.0 || to < 1.0 {
            return Err(WavyteError::invalid_config(format!(
                "zoom scale must be >= 1 (got {from} -> {to})"
            )));
        }
        let (value, hold) = window_value(spec, from, to, 1.0)?;

        let zoompan = gated_filter(
            "zoompan",
            Self::NAME,
            "time",
            spec,
            BTreeMap::from([("z".to_string(), hold)]),
        )
        .option("z", gate(spec, from, value, hold))
        .option("x", "iw/2-(iw/zoom/2)")
        .option("y", "ih/2-(ih/zoom/2)")
        .option("d", 1.0)
        .option("s", format!("{}x{}", element.width, element.height));

        Ok(smallvec![zoompan])
    }

    fn prefilters(_filter: &AniFilter) -> SmallVec<[AniFilter; 1]> {
        let upscale = AniFilter::new("scale", "t")
            .option("w", format!("iw*{ZOOM_UPSCALE}"))
            .option("h", format!("ih*{ZOOM_UPSCALE}"));
        smallvec![upscale]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/filters/zoom.rs"]
mod tests;
