//! Quick timing of expression evaluation at different depths.

use std::time::Instant;

use deferred::{fill, protect, Runtime, Value};

fn main() {
    env_logger::init();
    let rt = Runtime::new();
    let x = match rt.var("arg0", &[]) {
        Ok(x) => x,
        Err(e) => {
            log::error!("{e}");
            return;
        }
    };

    println!("=== Nested evaluation ===\n");

    for depth in [10, 100, 1000] {
        let start = Instant::now();
        let mut expr = x.clone();
        for _ in 0..depth {
            expr = match rt.send(&expr, "+", vec![Value::int(1)]) {
                Ok(next) => next,
                Err(e) => {
                    log::error!("building expression failed: {e}");
                    return;
                }
            };
        }
        let build_time = start.elapsed();

        let Some(lambda) = expr.as_lambda() else {
            log::error!("expression is not a lambda: {expr:?}");
            return;
        };
        let start = Instant::now();
        let result = lambda.call(&[Value::int(0)]);
        let call_time = start.elapsed();

        println!("--- depth {depth} ---");
        println!("Build: {build_time:?}");
        println!("Call:  {call_time:?} -> {result:?}\n");
    }

    println!("=== Protected pass-through ===\n");

    let formals: Vec<Value> = (0..1000).map(|_| protect(x.clone())).collect();
    let start = Instant::now();
    let filled = fill(&formals, &[Value::int(1)]);
    println!(
        "fill of 1000 protected formals: {:?} ({} results)",
        start.elapsed(),
        filled.map(|values| values.len()).unwrap_or(0)
    );
}
