//! Per-family filter builders and the shared merge protocol.
//!
//! Every animated option is built as
//! `if(lt(t,delay), from, if(between(t,delay,delay+time), value, ELSE{to}))`.
//! Chaining two same-type filters splices the successor into the predecessor's `ELSE` slot
//! behind a hold branch `if(lte(t, DELAY), to, ELSE)` whose `DELAY` slot becomes the
//! successor's window start.

use std::collections::BTreeMap;

use smallvec::SmallVec;

use crate::animation::descriptor::{AnimationSpec, ShowType};
use crate::animation::element::ElementInfo;
use crate::foundation::error::{WavyteError, WavyteResult};

pub(crate) mod alpha;
pub(crate) mod expr;
pub(crate) mod fade;
pub(crate) mod overlay;
pub(crate) mod rotate;
pub(crate) mod zoom;

use expr::{Cond, Expr};

/// Windows closer than this are treated as touching, not overlapping.
const WINDOW_EPSILON: f64 = 1e-9;

/// Option value of a filter under construction.
#[derive(Clone, Debug, PartialEq)]
pub enum OptionValue {
    /// Time-dependent expression.
    Expr(Expr),
    /// Plain number.
    Number(f64),
    /// Plain string, passed through verbatim.
    Text(String),
}

impl From<Expr> for OptionValue {
    fn from(e: Expr) -> Self {
        Self::Expr(e)
    }
}

impl From<f64> for OptionValue {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<&str> for OptionValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

/// Window bookkeeping needed to chain a filter behind a predecessor.
#[derive(Clone, Debug, PartialEq)]
pub struct MergeData {
    /// Window length.
    pub time: f64,
    /// Window start.
    pub delay: f64,
    /// Value each animated option holds once the window has passed.
    pub holds: BTreeMap<String, f64>,
}

/// A renderer filter plus the metadata the merge stages act on.
#[derive(Clone, Debug, PartialEq)]
pub struct AniFilter {
    /// Renderer filter name, e.g. `zoompan`.
    pub filter: String,
    /// Renderer options.
    pub options: BTreeMap<String, OptionValue>,
    /// Name of the time variable in this filter's expression context.
    pub time_var: &'static str,
    /// Entrance/exit, absent on merged filters.
    pub show_type: Option<ShowType>,
    /// Merge group; absent on merged filters.
    pub name: Option<String>,
    /// Window data; absent on static filters and merged filters.
    pub merge: Option<MergeData>,
}

impl AniFilter {
    /// Static filter outside any merge group.
    pub fn new(filter: impl Into<String>, time_var: &'static str) -> Self {
        Self {
            filter: filter.into(),
            options: BTreeMap::new(),
            time_var,
            show_type: None,
            name: None,
            merge: None,
        }
    }

    /// Builder-style option setter.
    pub fn option(mut self, key: &str, value: impl Into<OptionValue>) -> Self {
        self.options.insert(key.to_string(), value.into());
        self
    }

    /// Whether this filter belongs to merge group `name`.
    pub fn is_named(&self, name: &str) -> bool {
        self.name.as_deref() == Some(name)
    }

    /// Window covered by this filter, if it is time-gated.
    pub fn window(&self) -> Option<(f64, f64)> {
        self.merge.as_ref().map(|m| (m.delay, m.delay + m.time))
    }

    /// Collapse every remaining else slot into its default so expressions are terminal.
    pub fn finalized(mut self) -> Self {
        for value in self.options.values_mut() {
            if let OptionValue::Expr(e) = value {
                *e = std::mem::replace(e, Expr::Time).collapse_else();
            }
        }
        self
    }

    /// Render options and drop merge metadata.
    pub fn into_filter_spec(self) -> WavyteResult<FilterSpec> {
        let mut options = serde_json::Map::new();
        for (key, value) in self.options {
            let v = match value {
                OptionValue::Expr(e) => serde_json::Value::String(e.render(self.time_var)?),
                OptionValue::Number(n) => serde_json::Number::from_f64(n)
                    .map(serde_json::Value::Number)
                    .ok_or_else(|| {
                        WavyteError::invalid_config(format!("option '{key}' is not finite"))
                    })?,
                OptionValue::Text(s) => serde_json::Value::String(s),
            };
            options.insert(key, v);
        }
        Ok(FilterSpec {
            filter: self.filter,
            options,
        })
    }
}

/// Renderer-ready filter: the only artifact handed to the external filter-graph assembler.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FilterSpec {
    /// Filter name.
    pub filter: String,
    /// Filter options.
    pub options: serde_json::Map<String, serde_json::Value>,
}

impl FilterSpec {
    /// `name=key=value:key=value` with filtergraph-special characters escaped.
    pub fn to_filter_string(&self) -> String {
        let mut out = self.filter.clone();
        for (i, (key, value)) in self.options.iter().enumerate() {
            out.push(if i == 0 { '=' } else { ':' });
            out.push_str(key);
            out.push('=');
            let raw = match value {
                serde_json::Value::String(s) => s.clone(),
                serde_json::Value::Number(n) => match n.as_f64() {
                    Some(f) => expr::fmt_num(f),
                    None => n.to_string(),
                },
                other => other.to_string(),
            };
            for c in raw.chars() {
                if matches!(c, ',' | ':' | ';' | '[' | ']' | '\'' | '\\') {
                    out.push('\\');
                }
                out.push(c);
            }
        }
        out
    }
}

/// One animation family: builds its filters, merges siblings and finalizes singletons.
pub(crate) trait FilterBuilder {
    /// Merge group shared by all filters of this family.
    const NAME: &'static str;

    /// Filters for one normalized descriptor, in application order.
    fn build(spec: &AnimationSpec, element: &ElementInfo)
    -> WavyteResult<SmallVec<[AniFilter; 2]>>;

    /// Chain two or more filters of this family into one; `None` when given nothing.
    fn merge(filters: Vec<AniFilter>) -> WavyteResult<Option<AniFilter>> {
        merge_sequential(Self::NAME, filters)
    }

    /// Finalize a filter that has no siblings.
    fn replace(filter: AniFilter) -> AniFilter {
        filter.finalized()
    }

    /// Static filters emitted once, immediately before the family's final filter.
    fn prefilters(_filter: &AniFilter) -> SmallVec<[AniFilter; 1]> {
        SmallVec::new()
    }
}

/// Value inside the active window plus the value held afterwards.
///
/// Bounded mode eases `from → to`; continuous mode grows by `add * add_scale` per second.
pub(crate) fn window_value(
    spec: &AnimationSpec,
    from: f64,
    to: f64,
    add_scale: f64,
) -> WavyteResult<(Expr, f64)> {
    if spec.ing {
        let rate = spec.require_add()? * add_scale;
        let hold = match spec.to {
            Some(_) => to,
            None => from + rate * spec.time,
        };
        Ok((Expr::linear(from, rate, 1.0, spec.delay), hold))
    } else {
        Ok((
            spec.ease.value_expr(from, to - from, spec.time, spec.delay),
            to,
        ))
    }
}

/// `if(lt(t,delay), from, if(between(t,delay,end), value, ELSE{hold}))`.
pub(crate) fn gate(spec: &AnimationSpec, from: f64, value: Expr, hold: f64) -> Expr {
    Expr::cond(
        Cond::lt(Expr::Time, spec.delay),
        Expr::constant(from),
        Expr::cond(
            Cond::between(Expr::Time, spec.delay, spec.end()),
            value,
            Expr::else_slot(hold),
        ),
    )
}

/// Time-gated filter shell carrying the family's merge metadata.
pub(crate) fn gated_filter(
    filter: &str,
    name: &str,
    time_var: &'static str,
    spec: &AnimationSpec,
    holds: BTreeMap<String, f64>,
) -> AniFilter {
    AniFilter {
        filter: filter.to_string(),
        options: BTreeMap::new(),
        time_var,
        show_type: Some(spec.show_type),
        name: Some(name.to_string()),
        merge: Some(MergeData {
            time: spec.time,
            delay: spec.delay,
            holds,
        }),
    }
}

/// Stable sort placing `in` filters before `out` filters.
pub(crate) fn sort_in_before_out(filters: &mut [AniFilter]) {
    filters.sort_by_key(|f| match f.show_type {
        Some(ShowType::In) | None => 0u8,
        Some(ShowType::Out) => 1u8,
    });
}

/// Chain same-type filters into one nameless composite.
pub(crate) fn merge_sequential(
    name: &str,
    mut filters: Vec<AniFilter>,
) -> WavyteResult<Option<AniFilter>> {
    sort_in_before_out(&mut filters);

    let mut iter = filters.into_iter();
    let Some(mut acc) = iter.next() else {
        return Ok(None);
    };
    let mut prev = acc.merge.take().ok_or_else(|| {
        WavyteError::invalid_config(format!("{name} filter carries no window data"))
    })?;

    for next in iter {
        let next_merge = next.merge.ok_or_else(|| {
            WavyteError::invalid_config(format!("{name} filter carries no window data"))
        })?;
        if next_merge.delay + WINDOW_EPSILON < prev.delay + prev.time {
            return Err(WavyteError::overlapping(format!(
                "{name} window starting at {} begins before the previous window ends at {}",
                next_merge.delay,
                prev.delay + prev.time
            )));
        }

        union_static_options(name, &mut acc.options, &next.options)?;

        for (key, value) in acc.options.iter_mut() {
            let OptionValue::Expr(current) = value else {
                continue;
            };
            let Some(OptionValue::Expr(successor)) = next.options.get(key) else {
                return Err(WavyteError::invalid_config(format!(
                    "{name} filters disagree on animated option '{key}'"
                )));
            };
            let hold = prev.holds.get(key).copied().ok_or_else(|| {
                WavyteError::invalid_config(format!("{name} option '{key}' has no hold value"))
            })?;

            let seam = Expr::cond(
                Cond::lte(Expr::Time, Expr::delay_slot()),
                Expr::constant(hold),
                Expr::else_slot(hold),
            )
            .fill_delay(next_merge.delay)
            .fill_else(successor);

            *current = std::mem::replace(current, Expr::Time).fill_else(&seam);
        }
        prev = next_merge;
    }

    tracing::debug!(group = name, "merged same-type filters");
    let mut merged = acc.finalized();
    merged.name = None;
    merged.show_type = None;
    Ok(Some(merged))
}

/// Carry static options of `next` into the merged filter; a chain must agree on every static
/// option and on which options are animated.
fn union_static_options(
    name: &str,
    acc: &mut BTreeMap<String, OptionValue>,
    next: &BTreeMap<String, OptionValue>,
) -> WavyteResult<()> {
    for (key, value) in next {
        match (acc.get(key), value) {
            (Some(OptionValue::Expr(_)), OptionValue::Expr(_)) => {}
            (None, OptionValue::Expr(_))
            | (Some(OptionValue::Expr(_)), _)
            | (Some(_), OptionValue::Expr(_)) => {
                return Err(WavyteError::invalid_config(format!(
                    "{name} filters disagree on animated option '{key}'"
                )));
            }
            (Some(current), _) if current == value => {}
            (Some(current), _) => {
                return Err(WavyteError::invalid_config(format!(
                    "{name} filters disagree on option '{key}': {current:?} vs {value:?}"
                )));
            }
            (None, _) => {
                acc.insert(key.clone(), value.clone());
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/filters/mod.rs"]
mod tests;
