use serde_json::Value;
use smallvec::SmallVec;

use crate::animation::descriptor::{AnimationDescriptor, AnimationKind, AnimationSpec};
use crate::animation::element::ElementInfo;
use crate::filters::alpha::AlphaFilter;
use crate::filters::fade::FadeFilter;
use crate::filters::overlay::OverlayFilter;
use crate::filters::rotate::RotateFilter;
use crate::filters::zoom::ZoomFilter;
use crate::filters::{AniFilter, FilterBuilder};
use crate::foundation::error::WavyteResult;

/// One animation attached to an element.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationNode {
    conf: AnimationDescriptor,
    parent: Option<String>,
}

impl AnimationNode {
    /// Wrap a descriptor; the parent is set when the node joins a list.
    pub fn new(conf: AnimationDescriptor) -> Self {
        Self { conf, parent: None }
    }

    /// Descriptor value for `key`.
    pub fn get_from_conf(&self, key: &str) -> Option<&Value> {
        self.conf.get(key)
    }

    /// Overwrite descriptor value `key`.
    pub fn set_to_conf(&mut self, key: &str, val: impl Into<Value>) {
        self.conf.set(key, val);
    }

    /// Underlying descriptor.
    pub fn conf(&self) -> &AnimationDescriptor {
        &self.conf
    }

    pub(crate) fn conf_mut(&mut self) -> &mut AnimationDescriptor {
        &mut self.conf
    }

    /// Id of the owning element.
    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    pub(crate) fn set_parent(&mut self, id: &str) {
        self.parent = Some(id.to_string());
    }

    /// Resolved scalar endpoints, or `None` when the descriptor is not a valid scalar animation.
    pub fn get_from_to(&self) -> Option<(f64, f64)> {
        self.conf.normalize().ok()?.scalar_endpoints().ok()
    }

    /// Filters implementing this animation, in application order.
    pub fn to_filter(&self, element: &ElementInfo) -> WavyteResult<SmallVec<[AniFilter; 2]>> {
        let spec: AnimationSpec = self.conf.normalize()?;
        match spec.kind {
            AnimationKind::Fade | AnimationKind::Show => FadeFilter::build(&spec, element),
            AnimationKind::Alpha => AlphaFilter::build(&spec, element),
            AnimationKind::Rotate => RotateFilter::build(&spec, element),
            AnimationKind::Zoom => ZoomFilter::build(&spec, element),
            AnimationKind::Move => OverlayFilter::build(&spec, element),
        }
    }
}

/// Either a raw descriptor or a node that has already been built.
#[derive(Clone, Debug, PartialEq)]
pub enum AnimationInput {
    /// Descriptor still to be wrapped.
    Raw(AnimationDescriptor),
    /// Existing node, kept as-is.
    Node(AnimationNode),
}

impl From<AnimationDescriptor> for AnimationInput {
    fn from(d: AnimationDescriptor) -> Self {
        Self::Raw(d)
    }
}

impl From<AnimationNode> for AnimationInput {
    fn from(n: AnimationNode) -> Self {
        Self::Node(n)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/node.rs"]
mod tests;
