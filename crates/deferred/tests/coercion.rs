//! Coercion of plain values into constant lambdas.

mod common;

use common::{arg, runtime};
use deferred::{is_lambda, to_lambda, Lambda, Value};

#[test]
fn coercion_is_idempotent() {
    let rt = runtime();
    let samples = vec![
        Value::int(3),
        Value::string("s"),
        Value::Nil,
        Value::list([Value::int(1)]),
        arg(&rt, 0),
        Value::Lambda(Lambda::native(|args| Ok(Value::int(args.len() as i64)))),
    ];
    for value in samples {
        let once = to_lambda(value.clone());
        let twice = to_lambda(to_lambda(value.clone()));
        for x in [Value::int(9), Value::string("x")] {
            assert_eq!(
                twice.call(std::slice::from_ref(&x)).unwrap(),
                once.call(std::slice::from_ref(&x)).unwrap(),
                "{value:?}"
            );
        }
    }
}

#[test]
fn lambdas_are_not_rewrapped() {
    let rt = runtime();
    let x = arg(&rt, 0);
    let coerced = to_lambda(x.clone());
    assert!(coerced.ptr_eq(x.as_lambda().unwrap()));
}

#[test]
fn constants_capture_at_coercion_time() {
    let constant = to_lambda(vec![Value::int(1), Value::int(2)]);
    assert!(is_lambda(&Value::Lambda(constant.clone())));
    assert_eq!(
        constant.call(&[Value::int(5)]).unwrap(),
        Value::list([Value::int(1), Value::int(2)])
    );
}
