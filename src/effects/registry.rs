use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use serde_json::{Map, Value, json};

use crate::animation::element::ElementInfo;
use crate::foundation::error::WavyteResult;

/// One preset parameter set: a partial animation descriptor.
pub type ParamSet = Map<String, Value>;

/// A named preset expands to one descriptor or an ordered group of them.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum Preset {
    /// Several animations applied together (e.g. move + fade).
    Many(Vec<ParamSet>),
    /// A single animation.
    Single(ParamSet),
}

impl Preset {
    /// Parameter sets in application order.
    pub fn param_sets(&self) -> &[ParamSet] {
        match self {
            Self::Many(sets) => sets,
            Self::Single(set) => std::slice::from_ref(set),
        }
    }
}

/// Immutable table of named effect presets, passed explicitly to the compiler.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct EffectRegistry {
    presets: BTreeMap<String, Preset>,
}

impl EffectRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a registry from a JSON object of `name -> preset`.
    pub fn from_json_str(s: &str) -> WavyteResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Load a registry from a JSON preset file.
    pub fn from_path(path: impl AsRef<Path>) -> WavyteResult<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read effect presets from '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    /// Builder-style insertion.
    pub fn with(mut self, name: impl Into<String>, preset: Preset) -> Self {
        self.presets.insert(name.into(), preset);
        self
    }

    /// Preset registered under `name`.
    pub fn lookup(&self, name: &str) -> Option<&Preset> {
        self.presets.get(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.presets.keys().map(String::as_str)
    }

    /// Number of presets.
    pub fn len(&self) -> usize {
        self.presets.len()
    }

    /// Whether the registry has no presets.
    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    /// The stock preset table.
    pub fn builtin() -> Self {
        let mut reg = Self::new();
        let mut single = |name: &str, v: Value| {
            if let Value::Object(set) = v {
                reg.presets.insert(name.to_string(), Preset::Single(set));
            }
        };

        single("fadeIn", json!({"type": "fade", "showType": "in", "time": 1, "delay": 0}));
        single("fadeOut", json!({"type": "fade", "showType": "out", "time": 1, "delay": 0}));
        single("alphaIn", json!({"type": "alpha", "showType": "in", "time": 1, "delay": 0}));
        single("alphaOut", json!({"type": "alpha", "showType": "out", "time": 1, "delay": 0}));
        single(
            "zoomIn",
            json!({"type": "zoom", "showType": "in", "time": 1, "delay": 0, "from": 1.5, "to": 1, "pad": true}),
        );
        single(
            "zoomOut",
            json!({"type": "zoom", "showType": "out", "time": 1, "delay": 0, "from": 1, "to": 1.5, "pad": true}),
        );
        single(
            "zoomingIn",
            json!({"type": "zoom", "showType": "in", "time": 1, "delay": 0, "from": 1, "ing": true, "add": 0.1, "pad": true}),
        );
        single(
            "rotateIn",
            json!({"type": "rotate", "showType": "in", "time": 1, "delay": 0, "from": 180, "to": 0, "ease": "quadOut"}),
        );
        single(
            "rotateOut",
            json!({"type": "rotate", "showType": "out", "time": 1, "delay": 0, "from": 0, "to": 180, "ease": "quadIn"}),
        );
        single(
            "rotatingIn",
            json!({"type": "rotate", "showType": "in", "time": 1, "delay": 0, "from": 0, "ing": true, "add": 90}),
        );

        for (name, show_type, token, ease) in [
            ("moveInLeft", "in", "left_out", "quadOut"),
            ("moveInRight", "in", "right_out", "quadOut"),
            ("moveInUp", "in", "bottom_out", "quadOut"),
            ("moveInDown", "in", "top_out", "quadOut"),
            ("moveOutLeft", "out", "left_out", "quadIn"),
            ("moveOutRight", "out", "right_out", "quadIn"),
            ("moveOutUp", "out", "top_out", "quadIn"),
            ("moveOutDown", "out", "bottom_out", "quadIn"),
        ] {
            let side = if show_type == "in" { "from" } else { "to" };
            let moves = json!({"type": "move", "showType": show_type, "time": 1, "delay": 0, side: token, "ease": ease});
            let fade = json!({"type": "show", "showType": show_type, "time": 1, "delay": 0});
            let sets = [moves, fade]
                .into_iter()
                .filter_map(|v| match v {
                    Value::Object(set) => Some(set),
                    _ => None,
                })
                .collect();
            reg.presets.insert(name.to_string(), Preset::Many(sets));
        }

        reg
    }
}

/// Map a symbolic position token to a concrete `{x, y}` point for `element`.
///
/// `left_out`/`right_out`/`top_out`/`bottom_out` place the element just outside the canvas
/// edge on its own row or column; `origin` is its resting position.
pub fn map_symbolic(value: &Value, element: &ElementInfo) -> Option<Value> {
    let token = value.as_str()?;
    let (x, y) = element.position();
    let (x, y) = match token {
        "left_out" => (-f64::from(element.width), y),
        "right_out" => (f64::from(element.canvas_width), y),
        "top_out" => (x, -f64::from(element.height)),
        "bottom_out" => (x, f64::from(element.canvas_height)),
        "origin" => (x, y),
        _ => return None,
    };
    Some(json!({"x": x, "y": y}))
}

/// What to add: a preset name with optional overrides, or a conf object naming the preset in
/// its `type` field.
#[derive(Clone, Debug, PartialEq)]
pub enum EffectRequest {
    /// `name` plus optional window overrides.
    Named {
        /// Preset name.
        name: String,
        /// Overrides the preset's `time`.
        time: Option<f64>,
        /// Overrides the preset's `delay`.
        delay: Option<f64>,
    },
    /// Conf object; every key except `type` overrides the preset.
    Conf(Map<String, Value>),
}

impl EffectRequest {
    /// Request preset `name` with optional window overrides.
    pub fn named(name: impl Into<String>, time: Option<f64>, delay: Option<f64>) -> Self {
        Self::Named {
            name: name.into(),
            time,
            delay,
        }
    }

    /// Preset name, if the request names one.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Named { name, .. } => Some(name.as_str()),
            Self::Conf(conf) => conf.get("type").and_then(Value::as_str),
        }
    }

    /// Keys bound onto every expanded parameter set.
    pub fn overrides(&self) -> Map<String, Value> {
        let mut out = Map::new();
        match self {
            Self::Named { time, delay, .. } => {
                if let Some(t) = time {
                    out.insert("time".to_string(), json!(t));
                }
                if let Some(d) = delay {
                    out.insert("delay".to_string(), json!(d));
                }
            }
            Self::Conf(conf) => {
                for (k, v) in conf {
                    if k != "type" && !v.is_null() {
                        out.insert(k.clone(), v.clone());
                    }
                }
            }
        }
        out
    }
}

impl From<&str> for EffectRequest {
    fn from(name: &str) -> Self {
        Self::named(name, None, None)
    }
}

impl From<Map<String, Value>> for EffectRequest {
    fn from(conf: Map<String, Value>) -> Self {
        Self::Conf(conf)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/registry.rs"]
mod tests;
