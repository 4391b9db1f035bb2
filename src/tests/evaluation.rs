use rust_decimal::Decimal;

use crate::{Context, EvaluationSettings, Node, Number, Scope, Value, error::MathsError, tests::util::sample_range};

fn eval(node: &crate::Node) -> Result<Value, MathsError> {
    node.compile(&Context::standard())?.eval(&Scope::new())
}

#[test]
fn test_compile_range() {
    let sample = sample_range();

    let expr = sample.range.compile(&Context::standard()).unwrap();
    assert_eq!(
        expr.eval(&Scope::new()),
        Ok(matrix![rat!(0), rat!(2), rat!(4), rat!(6), rat!(8), rat!(10)]),
    );
}

#[test]
fn test_range_bounds() {
    // No step counts up in ones
    assert_eq!(eval(&range!(constant!(1), constant!(4))), Ok(matrix![rat!(1), rat!(2), rat!(3), rat!(4)]));

    // The end is only included if it is reached exactly
    assert_eq!(eval(&range!(constant!(0), constant!(5), constant!(2))), Ok(matrix![rat!(0), rat!(2), rat!(4)]));

    // Negative steps count down
    assert_eq!(eval(&range!(constant!(10), constant!(0), constant!(-5))), Ok(matrix![rat!(10), rat!(5), rat!(0)]));

    // Counting away from the end produces nothing
    assert_eq!(eval(&range!(constant!(5), constant!(0))), Ok(matrix![]));
    assert_eq!(eval(&range!(constant!(0), constant!(5), constant!(-1))), Ok(matrix![]));

    // A single value when start and end meet
    assert_eq!(eval(&range!(constant!(3), constant!(3))), Ok(matrix![rat!(3)]));
}

#[test]
fn test_range_decimal_step() {
    // Mixing in a decimal step makes every value a decimal
    let n = range!(constant!(0), constant!(1), crate::Node::constant(dec!(0.25)));
    assert_eq!(
        eval(&n),
        Ok(matrix![dec!(0), dec!(0.25), dec!(0.5), dec!(0.75), dec!(1)]),
    );

    let n = range!(constant!(0), constant!(1), constant!(1));
    let context = Context::standard().with_settings(EvaluationSettings { use_floats: true, ..Default::default() });
    let result = n.compile(&context).unwrap().eval(&Scope::new());
    assert_eq!(result, Ok(matrix![dec!(0), dec!(1)]));
    match result {
        Ok(Value::Matrix(m)) => assert!(m.iter().all(|v| matches!(v, Value::Number(Number::Decimal(_))))),
        other => panic!("expected a matrix, got {:?}", other),
    }
}

#[test]
fn test_range_near_integer_limits() {
    let n = range!(constant!(9223372036854775806), constant!(9223372036854775807));
    assert_eq!(eval(&n), Ok(matrix![rat!(9223372036854775806), rat!(9223372036854775807)]));

    // The value after the last one doesn't fit in an i64, but is still past the end
    let n = range!(constant!(9223372036854775806), constant!(9223372036854775807), constant!(2));
    assert_eq!(eval(&n), Ok(matrix![rat!(9223372036854775806)]));

    let min = Node::constant(Number::from(i64::MIN));
    let n = range!(constant!(-9223372036854775807), min, constant!(-1));
    assert_eq!(eval(&n), Ok(matrix![rat!(-9223372036854775807), Number::from(i64::MIN)]));

    let n = range!(constant!(-9223372036854775807), constant!(9223372036854775807), constant!(9223372036854775807));
    assert_eq!(eval(&n), Ok(matrix![rat!(-9223372036854775807), rat!(0), rat!(9223372036854775807)]));
}

#[test]
fn test_range_overflow() {
    let max = Node::constant(Number::Decimal(Decimal::MAX));

    // Ending exactly on the largest decimal is fine
    assert_eq!(eval(&range!(max, max)), Ok(matrix![Number::Decimal(Decimal::MAX)]));

    let n = range!(constant!(1), max, max);
    assert_eq!(eval(&n), Err(MathsError::Overflow));
}

#[test]
fn test_range_negative_denominator() {
    let n = range!(constant!(10), constant!(8), Node::constant(Number::Rational(1, -1)));
    assert_eq!(eval(&n), Ok(matrix![rat!(10), rat!(9), rat!(8)]));

    let n = range!(constant!(0), Node::constant(Number::Rational(3, -2)), Node::constant(Number::Rational(-1, 2)));
    assert_eq!(eval(&n), Ok(matrix![rat!(0), rat!(-1, 2), rat!(-1), rat!(-3, 2)]));
}

#[test]
fn test_range_zero_denominator() {
    let n = range!(constant!(0), Node::constant(Number::Rational(1, 0)));
    assert_eq!(eval(&n), Err(MathsError::DivisionByZero));

    let context = Context::standard().with_settings(EvaluationSettings { use_floats: true, ..Default::default() });
    assert!(matches!(n.compile(&context), Err(MathsError::DivisionByZero)));
}

#[test]
fn test_zero_step() {
    let n = range!(constant!(0), constant!(10), constant!(0));
    assert_eq!(eval(&n), Err(MathsError::ZeroStep("0:0:10".into())));

    // Reported as written, even when the step comes from a variable
    let n = range!(constant!(0), constant!(10), symbol!(s));
    let result = n.compile(&Context::standard()).unwrap().eval(&Scope::new().with("s", rat!(0)));
    assert_eq!(result, Err(MathsError::ZeroStep("0:s:10".into())));
    assert_eq!(result.unwrap_err().to_string(), "0:s:10 has a step of zero");
}

#[test]
fn test_range_too_large() {
    let context = Context::standard().with_settings(EvaluationSettings { max_range_length: 3, ..Default::default() });
    let expr = range!(constant!(1), constant!(10)).compile(&context).unwrap();
    assert_eq!(expr.eval(&Scope::new()), Err(MathsError::RangeTooLarge { limit: 3 }));

    let expr = range!(constant!(1), constant!(3)).compile(&context).unwrap();
    assert_eq!(expr.eval(&Scope::new()), Ok(matrix![rat!(1), rat!(2), rat!(3)]));
}

#[test]
fn test_symbols() {
    let n = range!(symbol!(a), symbol!(b));
    let expr = n.compile(&Context::standard()).unwrap();

    // Each evaluation starts from scratch
    let scope = Scope::new().with("a", rat!(1)).with("b", rat!(3));
    assert_eq!(expr.eval(&scope), Ok(matrix![rat!(1), rat!(2), rat!(3)]));
    let scope = Scope::new().with("a", rat!(7)).with("b", rat!(8));
    assert_eq!(expr.eval(&scope), Ok(matrix![rat!(7), rat!(8)]));

    let scope = Scope::new().with("a", rat!(1));
    assert_eq!(expr.eval(&scope), Err(MathsError::UndefinedSymbol("b".into())));
}

#[test]
fn test_context_constants() {
    let pi = symbol!(pi);
    assert_eq!(eval(&pi), Ok(Value::Number(Number::Decimal(Decimal::PI))));

    // The scope shadows the context
    let expr = pi.compile(&Context::standard()).unwrap();
    assert_eq!(expr.eval(&Scope::new().with("pi", rat!(3))), Ok(Value::Number(rat!(3))));

    assert_eq!(eval(&symbol!(nope)), Err(MathsError::UndefinedSymbol("nope".into())));
}

#[test]
fn test_non_numeric_bounds() {
    let n = range!(crate::Node::constant("a"), constant!(10));
    assert!(matches!(eval(&n), Err(MathsError::ExpectedNumber(_))));

    let n = range!(constant!(0), crate::Node::symbol("true"));
    assert_eq!(eval(&n), Err(MathsError::ExpectedNumber("true".into())));
}

#[test]
fn test_unknown_function() {
    let sample = sample_range();
    assert!(matches!(
        sample.range.compile(&Context::empty()),
        Err(MathsError::UnknownFunction(name)) if name == "range",
    ));

    // Leaves don't need any functions
    let expr = constant!(4).compile(&Context::empty()).unwrap();
    assert_eq!(expr.eval(&Scope::new()), Ok(Value::Number(rat!(4))));
}

#[test]
fn test_custom_range_function() {
    // Compiled ranges use whichever range function the context provides
    let mut context = Context::standard();
    context.register_function("range", |args, _| Ok(Value::from(args.len() as i64)));

    let expr = range!(constant!(0), constant!(10)).compile(&context).unwrap();
    assert_eq!(expr.eval(&Scope::new()), Ok(Value::Number(rat!(2))));
}

#[test]
fn test_call_range_directly() {
    let context = Context::standard();
    assert_eq!(
        context.call("range", &[Value::from(rat!(1)), Value::from(rat!(2))]),
        Ok(matrix![rat!(1), rat!(2)]),
    );
    assert!(matches!(
        context.call("range", &[Value::from(rat!(1))]),
        Err(MathsError::WrongArgumentCount { got: 1, .. }),
    ));
    assert!(matches!(context.call("nope", &[]), Err(MathsError::UnknownFunction(_))));

    // Called directly, there's no written form of the range to report
    let error = context.call("range", &[Value::from(rat!(0)), Value::from(rat!(1)), Value::from(rat!(0))]);
    assert_eq!(error, Err(MathsError::ZeroStep("range".into())));
    assert_eq!(error.unwrap_err().to_string(), "range has a step of zero");
}
