use serde_json::{Map, Value};

use crate::animation::ease::Ease;
use crate::foundation::error::{WavyteError, WavyteResult};

/// Tolerance applied before truncating a duration to centiseconds.
const CENTI_EPSILON: f64 = 1e-6;

/// Whether an animation brings its element into view or takes it away.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShowType {
    /// Entrance animation.
    #[default]
    In,
    /// Exit animation.
    Out,
}

impl ShowType {
    /// Lowercase identifier as used in descriptors and renderer options.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::In => "in",
            Self::Out => "out",
        }
    }

    fn parse(s: &str) -> WavyteResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "in" => Ok(Self::In),
            "out" => Ok(Self::Out),
            other => Err(WavyteError::invalid_config(format!(
                "unknown showType '{other}'"
            ))),
        }
    }
}

/// Animation families understood by the filter builders.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationKind {
    /// Renderer-native fade.
    Fade,
    /// Alias of [`AnimationKind::Fade`].
    Show,
    /// Expression-driven opacity.
    Alpha,
    /// Rotation around the element center.
    Rotate,
    /// Zoom/pan.
    Zoom,
    /// Translation of the element's overlay position.
    Move,
}

impl AnimationKind {
    /// Parse the descriptor `type` field.
    pub fn parse(s: &str) -> WavyteResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fade" => Ok(Self::Fade),
            "show" => Ok(Self::Show),
            "alpha" => Ok(Self::Alpha),
            "rotate" => Ok(Self::Rotate),
            "zoom" | "zoompan" => Ok(Self::Zoom),
            "move" => Ok(Self::Move),
            other => Err(WavyteError::invalid_config(format!(
                "unknown animation type '{other}'"
            ))),
        }
    }

    /// `(baseline, target)` of scalar families: the off-screen value and the resting value.
    pub fn scalar_defaults(self) -> Option<(f64, f64)> {
        match self {
            Self::Fade | Self::Show | Self::Alpha => Some((0.0, 1.0)),
            // Degrees.
            Self::Rotate => Some((180.0, 0.0)),
            Self::Zoom => Some((2.0, 1.0)),
            Self::Move => None,
        }
    }
}

/// Resolved `from`/`to` value of a descriptor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Endpoint {
    /// Scalar (opacity, degrees, scale).
    Scalar(f64),
    /// Position in pixels.
    Point {
        /// Horizontal position.
        x: f64,
        /// Vertical position.
        y: f64,
    },
}

impl Endpoint {
    fn parse(key: &str, v: &Value) -> WavyteResult<Self> {
        match v {
            Value::Number(n) => n
                .as_f64()
                .filter(|f| f.is_finite())
                .map(Self::Scalar)
                .ok_or_else(|| WavyteError::invalid_config(format!("{key} must be finite"))),
            Value::Object(obj) => {
                let x = finite_field(obj, "x")?;
                let y = finite_field(obj, "y")?;
                match (x, y) {
                    (Some(x), Some(y)) => Ok(Self::Point { x, y }),
                    _ => Err(WavyteError::invalid_config(format!(
                        "{key} point must carry numeric x and y"
                    ))),
                }
            }
            Value::String(s) => Err(WavyteError::invalid_config(format!(
                "{key} has unresolved symbolic value '{s}'"
            ))),
            _ => Err(WavyteError::invalid_config(format!(
                "{key} must be a number or an {{x, y}} point"
            ))),
        }
    }
}

/// Raw animation descriptor: a JSON object such as
/// `{"type": "alpha", "showType": "in", "time": 1, "delay": 0, "ease": "quadOut"}`.
///
/// Fields are read leniently here; [`AnimationDescriptor::normalize`] performs validation.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct AnimationDescriptor {
    conf: Map<String, Value>,
}

impl AnimationDescriptor {
    /// Descriptor with the common fields set.
    pub fn new(kind: &str, show_type: ShowType, time: f64, delay: f64) -> Self {
        let mut d = Self::default();
        d.set("type", kind);
        d.set("showType", show_type.as_str());
        d.set("time", time);
        d.set("delay", delay);
        d
    }

    /// Wrap an existing JSON object.
    pub fn from_map(conf: Map<String, Value>) -> Self {
        Self { conf }
    }

    /// Wrap a JSON value, which must be an object.
    pub fn from_value(value: Value) -> WavyteResult<Self> {
        match value {
            Value::Object(conf) => Ok(Self { conf }),
            _ => Err(WavyteError::invalid_config(
                "animation descriptor must be a JSON object",
            )),
        }
    }

    /// Builder-style setter.
    pub fn with(mut self, key: &str, val: impl Into<Value>) -> Self {
        self.set(key, val);
        self
    }

    /// Raw value for `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.conf.get(key)
    }

    /// Overwrite `key`.
    pub fn set(&mut self, key: &str, val: impl Into<Value>) {
        self.conf.insert(key.to_string(), val.into());
    }

    /// Underlying JSON object.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.conf
    }

    pub(crate) fn values_mut(&mut self) -> impl Iterator<Item = &mut Value> {
        self.conf.values_mut()
    }

    /// The `type` field as written.
    pub fn kind_name(&self) -> Option<&str> {
        self.conf.get("type").and_then(Value::as_str)
    }

    /// The `showType` field; absent or unrecognized values read as `in`.
    pub fn show_type(&self) -> ShowType {
        self.conf
            .get("showType")
            .and_then(Value::as_str)
            .and_then(|s| ShowType::parse(s).ok())
            .unwrap_or_default()
    }

    /// Numeric field, if present.
    pub fn number(&self, key: &str) -> Option<f64> {
        self.conf.get(key).and_then(Value::as_f64)
    }

    /// `delay`, defaulting to 0.
    pub fn delay(&self) -> f64 {
        self.number("delay").unwrap_or(0.0)
    }

    /// `time`, defaulting to 0.
    pub fn time(&self) -> f64 {
        self.number("time").unwrap_or(0.0)
    }

    /// Whether `key` holds a truthy value (`true`, non-zero number, non-empty string).
    pub fn flag(&self, key: &str) -> bool {
        match self.conf.get(key) {
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_f64().is_some_and(|v| v != 0.0),
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Array(_) | Value::Object(_)) => true,
            Some(Value::Null) | None => false,
        }
    }

    /// Validate and normalize into an [`AnimationSpec`].
    pub fn normalize(&self) -> WavyteResult<AnimationSpec> {
        let kind = AnimationKind::parse(
            self.kind_name()
                .ok_or_else(|| WavyteError::invalid_config("animation is missing 'type'"))?,
        )?;

        let show_type = match self.conf.get("showType") {
            None | Some(Value::Null) => ShowType::In,
            Some(Value::String(s)) => ShowType::parse(s)?,
            Some(_) => return Err(WavyteError::invalid_config("showType must be a string")),
        };

        let time = finite_field(&self.conf, "time")?
            .ok_or_else(|| WavyteError::invalid_config("animation is missing numeric 'time'"))?;
        // Durations are truncated to centiseconds; the nudge keeps 0.29 from becoming 0.28.
        let time = (time * 100.0 + CENTI_EPSILON).floor() / 100.0;
        if time <= 0.0 {
            return Err(WavyteError::invalid_config(format!(
                "animation time must be > 0 (got {time})"
            )));
        }

        let delay = finite_field(&self.conf, "delay")?.unwrap_or(0.0);

        let ease = match self.conf.get("ease") {
            None | Some(Value::Null) => Ease::Linear,
            Some(Value::String(s)) => s.parse()?,
            Some(_) => return Err(WavyteError::invalid_config("ease must be a string")),
        };

        let from = self
            .conf
            .get("from")
            .filter(|v| !v.is_null())
            .map(|v| Endpoint::parse("from", v))
            .transpose()?;
        let to = self
            .conf
            .get("to")
            .filter(|v| !v.is_null())
            .map(|v| Endpoint::parse("to", v))
            .transpose()?;

        Ok(AnimationSpec {
            kind,
            show_type,
            time,
            delay,
            ease,
            ing: self.flag("ing"),
            add: finite_field(&self.conf, "add")?,
            pad: self.flag("pad"),
            from,
            to,
        })
    }
}

fn finite_field(obj: &Map<String, Value>, key: &str) -> WavyteResult<Option<f64>> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => v
            .as_f64()
            .filter(|f| f.is_finite())
            .map(Some)
            .ok_or_else(|| WavyteError::invalid_config(format!("{key} must be a finite number"))),
    }
}

/// Validated view of an [`AnimationDescriptor`].
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationSpec {
    /// Animation family.
    pub kind: AnimationKind,
    /// Entrance or exit.
    pub show_type: ShowType,
    /// Window length in seconds (> 0).
    pub time: f64,
    /// Window start in seconds.
    pub delay: f64,
    /// Easing curve inside the window.
    pub ease: Ease,
    /// Continuous mode: value grows by `add` per second instead of easing to a target.
    pub ing: bool,
    /// Rate used in continuous mode.
    pub add: Option<f64>,
    /// Whether the element is padded for this animation.
    pub pad: bool,
    /// Explicit start value.
    pub from: Option<Endpoint>,
    /// Explicit end value.
    pub to: Option<Endpoint>,
}

impl AnimationSpec {
    /// End of the active window.
    pub fn end(&self) -> f64 {
        self.delay + self.time
    }

    /// Scalar endpoints. `baseline` is the off-screen value and `target` the resting value:
    /// `in` runs baseline→target, `out` runs target→baseline, explicit values win.
    pub fn scalar_from_to(&self, baseline: f64, target: f64) -> WavyteResult<(f64, f64)> {
        let (default_from, default_to) = match self.show_type {
            ShowType::In => (baseline, target),
            ShowType::Out => (target, baseline),
        };
        Ok((
            scalar_or(self.from, "from", default_from)?,
            scalar_or(self.to, "to", default_to)?,
        ))
    }

    /// Scalar endpoints using this family's defaults.
    pub fn scalar_endpoints(&self) -> WavyteResult<(f64, f64)> {
        let (baseline, target) = self.kind.scalar_defaults().ok_or_else(|| {
            WavyteError::invalid_config(format!("{:?} animations have no scalar value", self.kind))
        })?;
        self.scalar_from_to(baseline, target)
    }

    /// Point endpoints; the missing side defaults to `rest`, the element's own position.
    pub fn point_from_to(&self, rest: (f64, f64)) -> WavyteResult<((f64, f64), (f64, f64))> {
        let from = point_or(self.from, "from", rest)?;
        let to = point_or(self.to, "to", rest)?;
        if self.from.is_none() && self.to.is_none() {
            return Err(WavyteError::invalid_config(
                "move animation needs 'from' or 'to'",
            ));
        }
        Ok((from, to))
    }

    /// The `add` rate, required in continuous mode.
    pub fn require_add(&self) -> WavyteResult<f64> {
        self.add
            .ok_or_else(|| WavyteError::invalid_config("continuous ('ing') animation needs 'add'"))
    }
}

fn scalar_or(v: Option<Endpoint>, key: &str, default: f64) -> WavyteResult<f64> {
    match v {
        None => Ok(default),
        Some(Endpoint::Scalar(s)) => Ok(s),
        Some(Endpoint::Point { .. }) => Err(WavyteError::invalid_config(format!(
            "{key} must be a number for this animation type"
        ))),
    }
}

fn point_or(v: Option<Endpoint>, key: &str, default: (f64, f64)) -> WavyteResult<(f64, f64)> {
    match v {
        None => Ok(default),
        Some(Endpoint::Point { x, y }) => Ok((x, y)),
        Some(Endpoint::Scalar(_)) => Err(WavyteError::invalid_config(format!(
            "{key} must be an {{x, y}} point for move animations"
        ))),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/descriptor.rs"]
mod tests;
