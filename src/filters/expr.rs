//! Piecewise value expressions over a time variable.
//!
//! Filter builders compose these trees structurally and only render them to the renderer's
//! textual expression syntax once every merge slot has been resolved.

use std::fmt::Write as _;

use crate::foundation::error::{WavyteError, WavyteResult};

/// A value expression over the time variable `t`.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// Numeric literal.
    Const(f64),
    /// The time variable.
    Time,
    /// `from + range * (t - start) / duration`.
    Linear {
        /// Value at `t == start`.
        from: f64,
        /// Change over one `duration`.
        range: f64,
        /// Time the ramp takes to cover `range`.
        duration: f64,
        /// Time at which the ramp starts.
        start: f64,
    },
    /// Single-argument operator or function.
    Unary {
        /// Operator.
        op: UnaryOp,
        /// Operand.
        arg: Box<Expr>,
    },
    /// Two-argument operator or function.
    Binary {
        /// Operator.
        op: BinaryOp,
        /// Left operand.
        left: Box<Expr>,
        /// Right operand.
        right: Box<Expr>,
    },
    /// `if(test, then_branch, else_branch)`.
    Conditional {
        /// Condition; any non-zero result selects `then_branch`.
        test: Box<Cond>,
        /// Value when the condition holds.
        then_branch: Box<Expr>,
        /// Value otherwise.
        else_branch: Box<Expr>,
    },
    /// Merge seam; never present in rendered output.
    Slot(Slot),
}

/// Unary operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryOp {
    /// Arithmetic negation.
    Neg,
    /// Sine (radians).
    Sin,
    /// Cosine (radians).
    Cos,
    /// Square root.
    Sqrt,
}

/// Binary operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    /// Addition.
    Add,
    /// Subtraction.
    Sub,
    /// Multiplication.
    Mul,
    /// Division.
    Div,
    /// Exponentiation, rendered as `pow(l,r)`.
    Pow,
}

/// Conditions used by [`Expr::Conditional`].
#[derive(Clone, Debug, PartialEq)]
pub enum Cond {
    /// `lt(a,b)`.
    Lt(Expr, Expr),
    /// `lte(a,b)`.
    Lte(Expr, Expr),
    /// `between(value,min,max)`, inclusive on both ends.
    Between {
        /// Tested value.
        value: Expr,
        /// Lower bound.
        min: Expr,
        /// Upper bound.
        max: Expr,
    },
}

/// Placeholder positions used while chaining same-type filters.
#[derive(Clone, Debug, PartialEq)]
pub enum Slot {
    /// Fallback branch taken outside the active window. `default` is used when nothing is
    /// spliced in.
    Else {
        /// Terminal value once the slot is collapsed.
        default: Box<Expr>,
    },
    /// Start of the successor's window.
    Delay,
}

impl Slot {
    /// Short slot name used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Else { .. } => "else",
            Self::Delay => "delay",
        }
    }
}

const PREC_ADD: u8 = 1;
const PREC_NEG: u8 = 2;
const PREC_MUL: u8 = 3;
const PREC_ATOM: u8 = 4;

impl Expr {
    /// Numeric literal.
    pub fn constant(v: f64) -> Self {
        Self::Const(v)
    }

    /// Linear ramp `from + range * (t - start) / duration`.
    pub fn linear(from: f64, range: f64, duration: f64, start: f64) -> Self {
        Self::Linear {
            from,
            range,
            duration,
            start,
        }
    }

    /// Conditional expression.
    pub fn cond(test: Cond, then_branch: Expr, else_branch: Expr) -> Self {
        Self::Conditional {
            test: Box::new(test),
            then_branch: Box::new(then_branch),
            else_branch: Box::new(else_branch),
        }
    }

    /// Else slot collapsing to `default`.
    pub fn else_slot(default: impl Into<Expr>) -> Self {
        Self::Slot(Slot::Else {
            default: Box::new(default.into()),
        })
    }

    /// Delay slot.
    pub fn delay_slot() -> Self {
        Self::Slot(Slot::Delay)
    }

    fn binary(op: BinaryOp, left: Expr, right: Expr) -> Self {
        Self::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    fn unary(op: UnaryOp, arg: Expr) -> Self {
        Self::Unary {
            op,
            arg: Box::new(arg),
        }
    }

    /// `pow(self, exp)`.
    pub fn pow(self, exp: impl Into<Expr>) -> Self {
        Self::binary(BinaryOp::Pow, self, exp.into())
    }

    /// `sin(self)`.
    pub fn sin(self) -> Self {
        Self::unary(UnaryOp::Sin, self)
    }

    /// `cos(self)`.
    pub fn cos(self) -> Self {
        Self::unary(UnaryOp::Cos, self)
    }

    /// `sqrt(self)`.
    pub fn sqrt(self) -> Self {
        Self::unary(UnaryOp::Sqrt, self)
    }

    /// Rebuild the tree, replacing every slot with `f(slot)`.
    pub fn map_slots(self, f: &mut impl FnMut(Slot) -> Expr) -> Expr {
        match self {
            Self::Slot(slot) => f(slot),
            Self::Unary { op, arg } => Self::Unary {
                op,
                arg: Box::new(arg.map_slots(f)),
            },
            Self::Binary { op, left, right } => Self::Binary {
                op,
                left: Box::new(left.map_slots(f)),
                right: Box::new(right.map_slots(f)),
            },
            Self::Conditional {
                test,
                then_branch,
                else_branch,
            } => Self::Conditional {
                test: Box::new(test.map_slots(f)),
                then_branch: Box::new(then_branch.map_slots(f)),
                else_branch: Box::new(else_branch.map_slots(f)),
            },
            leaf @ (Self::Const(_) | Self::Time | Self::Linear { .. }) => leaf,
        }
    }

    /// Splice `with` into every else slot, discarding the slot defaults.
    pub fn fill_else(self, with: &Expr) -> Expr {
        self.map_slots(&mut |slot| match slot {
            Slot::Else { .. } => with.clone(),
            other => Expr::Slot(other),
        })
    }

    /// Replace every delay slot with the literal `delay`.
    pub fn fill_delay(self, delay: f64) -> Expr {
        self.map_slots(&mut |slot| match slot {
            Slot::Delay => Expr::Const(delay),
            other => Expr::Slot(other),
        })
    }

    /// Collapse every else slot into its default value.
    pub fn collapse_else(self) -> Expr {
        self.map_slots(&mut |slot| match slot {
            Slot::Else { default } => default.collapse_else(),
            other => Expr::Slot(other),
        })
    }

    /// First unresolved slot, if any.
    pub fn find_slot(&self) -> Option<&Slot> {
        match self {
            Self::Slot(slot) => Some(slot),
            Self::Unary { arg, .. } => arg.find_slot(),
            Self::Binary { left, right, .. } => left.find_slot().or_else(|| right.find_slot()),
            Self::Conditional {
                test,
                then_branch,
                else_branch,
            } => test
                .find_slot()
                .or_else(|| then_branch.find_slot())
                .or_else(|| else_branch.find_slot()),
            Self::Const(_) | Self::Time | Self::Linear { .. } => None,
        }
    }

    /// Evaluate at time `t` using the renderer's expression semantics.
    pub fn eval(&self, t: f64) -> WavyteResult<f64> {
        Ok(match self {
            Self::Const(v) => *v,
            Self::Time => t,
            Self::Linear {
                from,
                range,
                duration,
                start,
            } => from + range * (t - start) / duration,
            Self::Unary { op, arg } => {
                let v = arg.eval(t)?;
                match op {
                    UnaryOp::Neg => -v,
                    UnaryOp::Sin => v.sin(),
                    UnaryOp::Cos => v.cos(),
                    UnaryOp::Sqrt => v.sqrt(),
                }
            }
            Self::Binary { op, left, right } => {
                let (l, r) = (left.eval(t)?, right.eval(t)?);
                match op {
                    BinaryOp::Add => l + r,
                    BinaryOp::Sub => l - r,
                    BinaryOp::Mul => l * r,
                    BinaryOp::Div => l / r,
                    BinaryOp::Pow => l.powf(r),
                }
            }
            Self::Conditional {
                test,
                then_branch,
                else_branch,
            } => {
                if test.eval(t)? {
                    then_branch.eval(t)?
                } else {
                    else_branch.eval(t)?
                }
            }
            Self::Slot(slot) => return Err(WavyteError::UnresolvedSlot(slot.name())),
        })
    }

    /// Render to the renderer's expression syntax, naming the time variable `time_var`.
    pub fn render(&self, time_var: &str) -> WavyteResult<String> {
        let mut out = String::new();
        self.write_expr(&mut out, time_var)?;
        Ok(out)
    }

    fn precedence(&self) -> u8 {
        match self {
            Self::Const(v) if *v < 0.0 => PREC_NEG,
            Self::Linear { .. } => PREC_ADD,
            Self::Unary {
                op: UnaryOp::Neg, ..
            } => PREC_NEG,
            Self::Binary {
                op: BinaryOp::Add | BinaryOp::Sub,
                ..
            } => PREC_ADD,
            Self::Binary {
                op: BinaryOp::Mul | BinaryOp::Div,
                ..
            } => PREC_MUL,
            _ => PREC_ATOM,
        }
    }

    fn write_child(&self, out: &mut String, tv: &str, min_prec: u8) -> WavyteResult<()> {
        if self.precedence() < min_prec {
            out.push('(');
            self.write_expr(out, tv)?;
            out.push(')');
            Ok(())
        } else {
            self.write_expr(out, tv)
        }
    }

    fn write_expr(&self, out: &mut String, tv: &str) -> WavyteResult<()> {
        match self {
            Self::Const(v) => out.push_str(&fmt_num(*v)),
            Self::Time => out.push_str(tv),
            Self::Linear {
                from,
                range,
                duration,
                start,
            } => write_linear(out, tv, *from, *range, *duration, *start),
            Self::Unary { op, arg } => match op {
                UnaryOp::Neg => {
                    out.push('-');
                    arg.write_child(out, tv, PREC_ATOM)?;
                }
                UnaryOp::Sin | UnaryOp::Cos | UnaryOp::Sqrt => {
                    out.push_str(match op {
                        UnaryOp::Sin => "sin(",
                        UnaryOp::Cos => "cos(",
                        _ => "sqrt(",
                    });
                    arg.write_expr(out, tv)?;
                    out.push(')');
                }
            },
            Self::Binary { op, left, right } => match op {
                BinaryOp::Pow => {
                    out.push_str("pow(");
                    left.write_expr(out, tv)?;
                    out.push(',');
                    right.write_expr(out, tv)?;
                    out.push(')');
                }
                BinaryOp::Add | BinaryOp::Sub => {
                    left.write_child(out, tv, PREC_ADD)?;
                    // Fold the sign of a negative literal into the operator.
                    if let Self::Const(c) = right.as_ref()
                        && *c < 0.0
                    {
                        out.push(if *op == BinaryOp::Add { '-' } else { '+' });
                        out.push_str(&fmt_num(-c));
                    } else {
                        out.push(if *op == BinaryOp::Add { '+' } else { '-' });
                        right.write_child(out, tv, PREC_MUL)?;
                    }
                }
                BinaryOp::Mul | BinaryOp::Div => {
                    left.write_child(out, tv, PREC_MUL)?;
                    out.push(if *op == BinaryOp::Mul { '*' } else { '/' });
                    right.write_child(out, tv, PREC_ATOM)?;
                }
            },
            Self::Conditional {
                test,
                then_branch,
                else_branch,
            } => {
                out.push_str("if(");
                test.write_cond(out, tv)?;
                out.push(',');
                then_branch.write_expr(out, tv)?;
                out.push(',');
                else_branch.write_expr(out, tv)?;
                out.push(')');
            }
            Self::Slot(slot) => return Err(WavyteError::UnresolvedSlot(slot.name())),
        }
        Ok(())
    }
}

fn write_linear(out: &mut String, tv: &str, from: f64, range: f64, duration: f64, start: f64) {
    let elapsed = if start == 0.0 {
        tv.to_string()
    } else if start < 0.0 {
        format!("({tv}+{})", fmt_num(-start))
    } else {
        format!("({tv}-{})", fmt_num(start))
    };
    let mut term = if range.abs() == 1.0 {
        elapsed
    } else {
        format!("{}*{elapsed}", fmt_num(range.abs()))
    };
    if duration != 1.0 {
        let _ = write!(term, "/{}", fmt_num(duration));
    }

    if range == 0.0 {
        out.push_str(&fmt_num(from));
    } else if from == 0.0 {
        if range < 0.0 {
            out.push('-');
        }
        out.push_str(&term);
    } else {
        let _ = write!(
            out,
            "{}{}{term}",
            fmt_num(from),
            if range < 0.0 { '-' } else { '+' }
        );
    }
}

impl Cond {
    /// `lt(a,b)`.
    pub fn lt(a: impl Into<Expr>, b: impl Into<Expr>) -> Self {
        Self::Lt(a.into(), b.into())
    }

    /// `lte(a,b)`.
    pub fn lte(a: impl Into<Expr>, b: impl Into<Expr>) -> Self {
        Self::Lte(a.into(), b.into())
    }

    /// `between(value,min,max)`.
    pub fn between(value: impl Into<Expr>, min: impl Into<Expr>, max: impl Into<Expr>) -> Self {
        Self::Between {
            value: value.into(),
            min: min.into(),
            max: max.into(),
        }
    }

    fn map_slots(self, f: &mut impl FnMut(Slot) -> Expr) -> Cond {
        match self {
            Self::Lt(a, b) => Self::Lt(a.map_slots(f), b.map_slots(f)),
            Self::Lte(a, b) => Self::Lte(a.map_slots(f), b.map_slots(f)),
            Self::Between { value, min, max } => Self::Between {
                value: value.map_slots(f),
                min: min.map_slots(f),
                max: max.map_slots(f),
            },
        }
    }

    fn find_slot(&self) -> Option<&Slot> {
        match self {
            Self::Lt(a, b) | Self::Lte(a, b) => a.find_slot().or_else(|| b.find_slot()),
            Self::Between { value, min, max } => value
                .find_slot()
                .or_else(|| min.find_slot())
                .or_else(|| max.find_slot()),
        }
    }

    fn eval(&self, t: f64) -> WavyteResult<bool> {
        Ok(match self {
            Self::Lt(a, b) => a.eval(t)? < b.eval(t)?,
            Self::Lte(a, b) => a.eval(t)? <= b.eval(t)?,
            Self::Between { value, min, max } => {
                let v = value.eval(t)?;
                min.eval(t)? <= v && v <= max.eval(t)?
            }
        })
    }

    fn write_cond(&self, out: &mut String, tv: &str) -> WavyteResult<()> {
        let (name, args): (&str, [Option<&Expr>; 3]) = match self {
            Self::Lt(a, b) => ("lt", [Some(a), Some(b), None]),
            Self::Lte(a, b) => ("lte", [Some(a), Some(b), None]),
            Self::Between { value, min, max } => ("between", [Some(value), Some(min), Some(max)]),
        };
        out.push_str(name);
        out.push('(');
        for (i, arg) in args.into_iter().flatten().enumerate() {
            if i > 0 {
                out.push(',');
            }
            arg.write_expr(out, tv)?;
        }
        out.push(')');
        Ok(())
    }
}

/// Format a number compactly: integers without a fraction, otherwise up to six decimals.
pub fn fmt_num(v: f64) -> String {
    if v == 0.0 {
        return "0".to_string();
    }
    let s = format!("{v:.6}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

impl From<f64> for Expr {
    fn from(v: f64) -> Self {
        Self::Const(v)
    }
}

macro_rules! impl_binary_op {
    ($trait:ident, $method:ident, $op:expr) => {
        impl<R: Into<Expr>> std::ops::$trait<R> for Expr {
            type Output = Expr;

            fn $method(self, rhs: R) -> Expr {
                Expr::binary($op, self, rhs.into())
            }
        }

        impl std::ops::$trait<Expr> for f64 {
            type Output = Expr;

            fn $method(self, rhs: Expr) -> Expr {
                Expr::binary($op, Expr::Const(self), rhs)
            }
        }
    };
}

impl_binary_op!(Add, add, BinaryOp::Add);
impl_binary_op!(Sub, sub, BinaryOp::Sub);
impl_binary_op!(Mul, mul, BinaryOp::Mul);
impl_binary_op!(Div, div, BinaryOp::Div);

impl std::ops::Neg for Expr {
    type Output = Expr;

    fn neg(self) -> Expr {
        Expr::unary(UnaryOp::Neg, self)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/filters/expr.rs"]
mod tests;
