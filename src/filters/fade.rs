use smallvec::{SmallVec, smallvec};

use crate::animation::descriptor::AnimationSpec;
use crate::animation::element::ElementInfo;
use crate::filters::{AniFilter, FilterBuilder};
use crate::foundation::error::WavyteResult;

/// Renderer-native `fade` on the alpha channel. Never merged; the compiler moves it last.
pub(crate) struct FadeFilter;

impl FilterBuilder for FadeFilter {
    const NAME: &'static str = "fade";

    fn build(
        spec: &AnimationSpec,
        _element: &ElementInfo,
    ) -> WavyteResult<SmallVec<[AniFilter; 2]>> {
        let mut filter = AniFilter::new("fade", "t")
            .option("t", spec.show_type.as_str())
            .option("st", spec.delay)
            .option("d", spec.time)
            .option("alpha", 1.0);
        filter.show_type = Some(spec.show_type);
        filter.name = Some(Self::NAME.to_string());
        Ok(smallvec![filter])
    }
}
