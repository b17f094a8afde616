use crate::animation::descriptor::{AnimationDescriptor, ShowType};
use crate::animation::element::ElementInfo;
use crate::animation::node::{AnimationInput, AnimationNode};
use crate::effects::registry::{EffectRegistry, EffectRequest, map_symbolic};
use crate::filters::alpha::AlphaFilter;
use crate::filters::fade::FadeFilter;
use crate::filters::overlay::OverlayFilter;
use crate::filters::rotate::RotateFilter;
use crate::filters::zoom::ZoomFilter;
use crate::filters::{AniFilter, FilterBuilder, FilterSpec};
use crate::foundation::error::WavyteResult;

/// Ordered animations of one scene element and the compiler that turns them into renderer
/// filters.
///
/// Insertion order is significant: it breaks ties when same-type animations are merged and
/// decides the "last wins" aggregate queries.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationList {
    target: ElementInfo,
    list: Vec<AnimationNode>,
}

impl AnimationList {
    /// Empty list owned by `target`.
    pub fn new(target: ElementInfo) -> Self {
        Self {
            target,
            list: Vec::new(),
        }
    }

    /// List pre-populated through [`AnimationList::add_animate`].
    pub fn with_animations<I, A>(target: ElementInfo, animations: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<AnimationInput>,
    {
        let mut out = Self::new(target);
        out.set_animations(animations);
        out
    }

    /// List built from a JSON array of descriptors.
    pub fn from_json(target: ElementInfo, s: &str) -> WavyteResult<Self> {
        let descriptors: Vec<AnimationDescriptor> = serde_json::from_str(s)?;
        Ok(Self::with_animations(target, descriptors))
    }

    /// Owning element.
    pub fn target(&self) -> &ElementInfo {
        &self.target
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> &[AnimationNode] {
        &self.list
    }

    /// Number of animations.
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Append every animation in order.
    pub fn set_animations<I, A>(&mut self, animations: I)
    where
        I: IntoIterator<Item = A>,
        A: Into<AnimationInput>,
    {
        for ani in animations {
            self.add_animate(ani);
        }
    }

    /// Append one animation, wrapping raw descriptors into nodes.
    ///
    /// Text elements cannot use the renderer-native fade, so `fade`/`show` become `alpha`.
    pub fn add_animate(&mut self, animation: impl Into<AnimationInput>) -> &AnimationNode {
        let mut node = match animation.into() {
            AnimationInput::Raw(conf) => AnimationNode::new(conf),
            AnimationInput::Node(node) => node,
        };
        if self.target.is_text() && matches!(node.conf().kind_name(), Some("fade" | "show")) {
            node.set_to_conf("type", "alpha");
        }
        node.set_parent(&self.target.id);
        self.list.push(node);
        &self.list[self.list.len() - 1]
    }

    /// Expand a named preset into animations. Unknown names are ignored.
    pub fn add_effect(&mut self, registry: &EffectRegistry, request: impl Into<EffectRequest>) {
        let request = request.into();
        let Some(name) = request.name() else {
            tracing::debug!("effect request without a preset name; ignoring");
            return;
        };
        let Some(preset) = registry.lookup(name) else {
            tracing::debug!(preset = name, "unknown effect preset; ignoring");
            return;
        };

        let overrides = request.overrides();
        for params in preset.param_sets() {
            let mut conf = params.clone();
            for (k, v) in &overrides {
                conf.insert(k.clone(), v.clone());
            }
            let mut conf = AnimationDescriptor::from_map(conf);
            resolve_symbolic(&mut conf, &self.target);
            self.add_animate(conf);
        }
    }

    /// Replace symbolic position tokens (`left_out`, `origin`, ...) on every node with points
    /// relative to the owning element.
    pub fn resolve_effect_values(&mut self) {
        for node in &mut self.list {
            resolve_symbolic(node.conf_mut(), &self.target);
        }
    }

    /// Whether any animation has `type == kind`.
    pub fn has_animate(&self, kind: &str) -> bool {
        self.list.iter().any(|n| n.conf().kind_name() == Some(kind))
    }

    /// Whether any zoom animation asks for padding.
    pub fn has_zoompan_pad(&self) -> bool {
        self.list.iter().any(is_padded_zoom)
    }

    /// Larger endpoint of the last padded zoom, or 1 when there is none.
    pub fn get_max_scale(&self) -> f64 {
        self.list
            .iter()
            .rev()
            .filter(|n| is_padded_zoom(n))
            .find_map(AnimationNode::get_from_to)
            .map_or(1.0, |(from, to)| from.max(to))
    }

    /// `time + delay` of the last `out` animation, or 0.
    pub fn get_duration(&self) -> f64 {
        self.list
            .iter()
            .rev()
            .find(|n| n.conf().show_type() == ShowType::Out)
            .map_or(0.0, |n| n.conf().time() + n.conf().delay())
    }

    /// `delay` of the last `in` animation, or 0.
    pub fn get_appear_time(&self) -> f64 {
        self.list
            .iter()
            .rev()
            .find(|n| n.conf().show_type() == ShowType::In)
            .map_or(0.0, |n| n.conf().delay())
    }

    /// Shift every delay back by `appear_time`, clamping at 0.
    pub fn modify_delay_time(&mut self, appear_time: f64) {
        for node in &mut self.list {
            let delay = (node.conf().delay() - appear_time).max(0.0);
            node.set_to_conf("delay", delay);
        }
    }

    /// Compile every animation into renderer filters.
    ///
    /// Stages run in visual composition order: rotate, zoom/pan, alpha, overlay. Each stage
    /// finalizes or merges its family and appends the result after everything else, and
    /// renderer fades are moved to the very end.
    #[tracing::instrument(skip(self), fields(element = %self.target.id, animations = self.list.len()))]
    pub fn concat_filters(&self) -> WavyteResult<Vec<FilterSpec>> {
        let mut filters = self.merge_list_filters()?;
        filters = merge_special_filters::<RotateFilter>(filters)?;
        filters = merge_special_filters::<ZoomFilter>(filters)?;
        filters = merge_special_filters::<AlphaFilter>(filters)?;
        filters = merge_special_filters::<OverlayFilter>(filters)?;
        filters = swap_fade_filter_position(filters);
        tracing::trace!(filters = filters.len(), "filter stages complete");

        filters.into_iter().map(AniFilter::into_filter_spec).collect()
    }

    fn merge_list_filters(&self) -> WavyteResult<Vec<AniFilter>> {
        let mut filters = Vec::with_capacity(self.list.len());
        for node in &self.list {
            filters.extend(node.to_filter(&self.target)?);
        }
        Ok(filters)
    }
}

fn is_padded_zoom(node: &AnimationNode) -> bool {
    matches!(node.conf().kind_name(), Some("zoom" | "zoompan")) && node.conf().flag("pad")
}

fn resolve_symbolic(conf: &mut AnimationDescriptor, target: &ElementInfo) {
    for value in conf.values_mut() {
        if let Some(point) = map_symbolic(value, target) {
            *value = point;
        }
    }
}

/// Pull out the filters of family `B`; finalize a lone one, merge several, and append the
/// family's prefilters plus the result after the untouched rest.
fn merge_special_filters<B: FilterBuilder>(filters: Vec<AniFilter>) -> WavyteResult<Vec<AniFilter>> {
    let (matched, mut rest): (Vec<_>, Vec<_>) =
        filters.into_iter().partition(|f| f.is_named(B::NAME));

    let last = match matched.len() {
        0 => None,
        1 => matched.into_iter().next().map(B::replace),
        n => {
            tracing::debug!(family = B::NAME, count = n, "merging filters");
            B::merge(matched)?
        }
    };
    if let Some(filter) = last {
        rest.extend(B::prefilters(&filter));
        rest.push(filter);
    }
    Ok(rest)
}

fn swap_fade_filter_position(filters: Vec<AniFilter>) -> Vec<AniFilter> {
    let (mut rest, fades): (Vec<_>, Vec<_>) = filters
        .into_iter()
        .partition(|f| !f.is_named(FadeFilter::NAME));
    rest.extend(fades);
    rest
}

#[cfg(test)]
#[path = "../../tests/unit/animation/list.rs"]
mod tests;
