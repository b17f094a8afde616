use super::*;

fn window(delay: f64, time: f64, value: Expr, from: f64, hold: f64) -> Expr {
    Expr::cond(
        Cond::lt(Expr::Time, delay),
        Expr::constant(from),
        Expr::cond(
            Cond::between(Expr::Time, delay, delay + time),
            value,
            Expr::else_slot(hold),
        ),
    )
}

#[test]
fn fmt_num_is_compact() {
    assert_eq!(fmt_num(0.0), "0");
    assert_eq!(fmt_num(-0.0), "0");
    assert_eq!(fmt_num(1.0), "1");
    assert_eq!(fmt_num(0.5), "0.5");
    assert_eq!(fmt_num(-2.25), "-2.25");
    assert_eq!(fmt_num(1.0 / 3.0), "0.333333");
    assert_eq!(fmt_num(std::f64::consts::PI), "3.141593");
    assert_eq!(fmt_num(1e-9), "0");
}

#[test]
fn linear_renders_without_redundant_terms() {
    assert_eq!(Expr::linear(0.0, 1.0, 1.0, 0.0).render("t").unwrap(), "t");
    assert_eq!(Expr::linear(1.0, -1.0, 1.0, 3.0).render("t").unwrap(), "1-(t-3)");
    assert_eq!(Expr::linear(0.0, 0.5, 1.0, 2.0).render("t").unwrap(), "0.5*(t-2)");
    assert_eq!(Expr::linear(2.0, 3.0, 1.0, 0.0).render("t").unwrap(), "2+3*t");
    assert_eq!(Expr::linear(0.0, -2.0, 1.0, 0.0).render("t").unwrap(), "-2*t");
    assert_eq!(Expr::linear(5.0, 0.0, 1.0, 1.0).render("t").unwrap(), "5");
    assert_eq!(
        Expr::linear(0.0, 1.0, 1.0, -1.5).render("time").unwrap(),
        "(time+1.5)"
    );
    assert_eq!(
        Expr::linear(1.0, -1.0, 0.8, 4.2).render("t").unwrap(),
        "1-(t-4.2)/0.8"
    );
}

#[test]
fn linear_keeps_duration_as_divisor() {
    let e = Expr::linear(0.0, 1.0, 3.0, 0.0);
    assert_eq!(e.render("t").unwrap(), "t/3");
    assert_eq!(e.eval(3.0).unwrap(), 1.0);

    let e = Expr::linear(2.0, 6.0, 3.0, 1.0);
    assert_eq!(e.render("t").unwrap(), "2+6*(t-1)/3");
    assert_eq!(e.eval(4.0).unwrap(), 8.0);
}

#[test]
fn operators_parenthesize_by_precedence() {
    assert_eq!(((Expr::Time - 1.0) / 2.0).render("t").unwrap(), "(t-1)/2");
    assert_eq!((-(Expr::Time + 1.0)).render("t").unwrap(), "-(t+1)");
    assert_eq!((Expr::Time + Expr::constant(-2.0)).render("t").unwrap(), "t-2");
    assert_eq!((Expr::Time - Expr::constant(-2.0)).render("t").unwrap(), "t+2");
    assert_eq!((-2.0 * Expr::Time).render("t").unwrap(), "(-2)*t");
    assert_eq!((Expr::Time - (Expr::Time - 1.0)).render("t").unwrap(), "t-(t-1)");
    assert_eq!((Expr::Time + Expr::Time * 2.0).render("t").unwrap(), "t+t*2");
    assert_eq!((Expr::Time / (Expr::Time * 2.0)).render("t").unwrap(), "t/(t*2)");
    assert_eq!((2.0 * Expr::Time.pow(2.0)).render("t").unwrap(), "2*pow(t,2)");
    assert_eq!(
        (1.0 - (Expr::Time * 0.5).cos()).render("t").unwrap(),
        "1-cos(t*0.5)"
    );
}

#[test]
fn conditionals_render_with_time_variable() {
    let e = window(0.0, 1.0, Expr::linear(0.0, 1.0, 1.0, 0.0), 0.0, 1.0).collapse_else();
    assert_eq!(
        e.render("t").unwrap(),
        "if(lt(t,0),0,if(between(t,0,1),t,1))"
    );
    assert_eq!(
        e.render("time").unwrap(),
        "if(lt(time,0),0,if(between(time,0,1),time,1))"
    );
}

#[test]
fn slots_block_render_and_eval() {
    let e = window(0.0, 1.0, Expr::Time, 0.0, 1.0);
    assert_eq!(e.find_slot().map(Slot::name), Some("else"));
    assert!(matches!(
        e.render("t"),
        Err(WavyteError::UnresolvedSlot("else"))
    ));
    assert!(matches!(e.eval(2.0), Err(WavyteError::UnresolvedSlot("else"))));
    // The active branches never touch the slot.
    assert_eq!(e.eval(0.5).unwrap(), 0.5);

    let d = Expr::cond(
        Cond::lte(Expr::Time, Expr::delay_slot()),
        Expr::constant(1.0),
        Expr::constant(0.0),
    );
    assert!(matches!(d.eval(0.0), Err(WavyteError::UnresolvedSlot("delay"))));
    assert_eq!(d.fill_delay(2.0).eval(1.0).unwrap(), 1.0);
}

#[test]
fn collapse_else_uses_defaults() {
    let e = window(1.0, 2.0, Expr::linear(0.0, 1.0, 2.0, 1.0), 0.0, 1.0).collapse_else();
    assert!(e.find_slot().is_none());
    assert_eq!(e.eval(0.0).unwrap(), 0.0);
    assert_eq!(e.eval(2.0).unwrap(), 0.5);
    assert_eq!(e.eval(3.0).unwrap(), 1.0);
    assert_eq!(e.eval(10.0).unwrap(), 1.0);
}

#[test]
fn fill_else_splices_successor() {
    let first = window(0.0, 1.0, Expr::linear(0.0, 1.0, 1.0, 0.0), 0.0, 1.0);
    let second = window(3.0, 1.0, Expr::linear(1.0, -1.0, 1.0, 3.0), 1.0, 0.0);
    let seam = Expr::cond(
        Cond::lte(Expr::Time, Expr::delay_slot()),
        Expr::constant(1.0),
        Expr::else_slot(1.0),
    )
    .fill_delay(3.0)
    .fill_else(&second);

    let merged = first.fill_else(&seam);
    // The successor's own else slot survives the splice.
    assert_eq!(merged.find_slot().map(Slot::name), Some("else"));

    let merged = merged.collapse_else();
    let samples = [
        (0.0, 0.0),
        (0.5, 0.5),
        (1.0, 1.0),
        (2.0, 1.0),
        (3.0, 1.0),
        (3.5, 0.5),
        (4.0, 0.0),
        (9.0, 0.0),
    ];
    for (t, want) in samples {
        assert_eq!(merged.eval(t).unwrap(), want, "t={t}");
    }
}

#[test]
fn between_is_inclusive() {
    let e = Expr::cond(
        Cond::between(Expr::Time, 1.0, 2.0),
        Expr::constant(1.0),
        Expr::constant(0.0),
    );
    assert_eq!(e.eval(1.0).unwrap(), 1.0);
    assert_eq!(e.eval(2.0).unwrap(), 1.0);
    assert_eq!(e.eval(2.0001).unwrap(), 0.0);
}
