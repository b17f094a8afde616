use std::collections::BTreeMap;

use smallvec::{SmallVec, smallvec};

use crate::animation::descriptor::AnimationSpec;
use crate::animation::element::ElementInfo;
use crate::filters::{AniFilter, FilterBuilder, gate, gated_filter, window_value};
use crate::foundation::error::WavyteResult;

/// Expression-driven opacity (`alpha=...`), fully transparent at 0.
pub(crate) struct AlphaFilter;

impl FilterBuilder for AlphaFilter {
    const NAME: &'static str = "alpha";

    fn build(
        spec: &AnimationSpec,
        _element: &ElementInfo,
    ) -> WavyteResult<SmallVec<[AniFilter; 2]>> {
        let (from, to) = spec.scalar_endpoints()?;
        let (value, hold) = window_value(spec, from, to, 1.0)?;

        let filter = gated_filter(
            "alpha",
            Self::NAME,
            "t",
            spec,
            BTreeMap::from([("alpha".to_string(), hold)]),
        )
        .option("alpha", gate(spec, from, value, hold));
        Ok(smallvec![filter])
    }
}

#[cfg(test)]
#[path = "../../tests/unit/filters/alpha.rs"]
mod tests;
