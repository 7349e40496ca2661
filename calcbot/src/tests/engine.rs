use crate::symbolic::BackendError;
use crate::{
    CalcError, Engine, EngineConfig, Reply, ResourceLimits, SymbolicBackend,
};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[test]
fn test_assignment_then_use() {
    let mut engine = Engine::new();
    assert_eq!(engine.respond("x = 10"), "Bot: Variable 'x' set to 10.");
    assert_eq!(engine.respond("x + 7"), "Bot: The result is 17.0.");
}

#[test]
fn test_assignment_echoes_value_as_typed() {
    let mut engine = Engine::new();
    assert_eq!(engine.respond("y = 2.50"), "Bot: Variable 'y' set to 2.50.");
    assert_eq!(engine.variables().get("y").unwrap(), 2.5);
}

#[test]
fn test_invalid_assignments_leave_store_untouched() {
    let mut engine = Engine::new();
    assert!(engine.handle("pi = 3").is_error());
    assert!(engine.handle("1x = 3").is_error());
    assert!(engine.handle("z = abc").is_error());
    assert!(engine.handle("z = inf").is_error());
    assert!(engine.variables().is_empty());
}

#[test]
fn test_invalid_number_message() {
    let mut engine = Engine::new();
    assert_eq!(
        engine.respond("z = abc"),
        "Bot: Error - Could not convert 'abc' to a number."
    );
}

#[test]
fn test_get_variables() {
    let mut engine = Engine::new();
    assert_eq!(engine.respond("get_variables"), "Bot: No variables defined.");
    engine.respond("x = 10");
    engine.respond("valid_var = 5");
    assert_eq!(
        engine.respond("get_variables"),
        "Bot: Defined Variables:\n- x: 10.0\n- valid_var: 5.0"
    );
}

#[test]
fn test_natural_language() {
    let mut engine = Engine::new();
    assert_eq!(engine.respond("What is 5 plus 5?"), "Bot: The result is 10.0.");
    assert_eq!(
        engine.respond("What is the square root of 25?"),
        "Bot: The result is 5.0."
    );
    assert_eq!(
        engine.respond("What is 5 to the power of 3?"),
        "Bot: The result is 125.0."
    );
    assert_eq!(
        engine.respond("Calculate the sine of 90 degrees."),
        "Bot: The result is 1.0."
    );
}

#[test]
fn test_suggestions() {
    let mut engine = Engine::new();
    assert_eq!(
        engine.respond("5 + 5 + 5"),
        "Bot: The result is 15.0. Suggested optimization: 5 * 3"
    );
    assert_eq!(
        engine.respond("2 * 2 * 2"),
        "Bot: The result is 8.0. Suggested optimization: 2 ^ 3"
    );
}

#[test]
fn test_errors_render_with_prefix() {
    let mut engine = Engine::new();
    assert_eq!(
        engine.respond("5 / 0"),
        "Bot: Error - Division by zero is not allowed."
    );
    assert_eq!(
        engine.respond("y + 10"),
        "Bot: Error - Undefined variable 'y'. Please assign a value to it first."
    );
    assert_eq!(
        engine.respond("5+"),
        "Bot: Error - Incomplete math expression. Please provide a complete operation."
    );
}

#[test]
fn test_input_size_limit() {
    let config = EngineConfig::default().with_limits(ResourceLimits {
        max_input_bytes: 8,
        ..ResourceLimits::default()
    });
    let mut engine = Engine::with_config(config);
    match engine.handle("1 + 2 + 3 + 4") {
        Reply::Error {
            error: CalcError::ResourceLimitExceeded { limit_name, .. },
        } => assert_eq!(limit_name, "max_input_bytes"),
        other => panic!("Expected resource limit error, got: {:?}", other),
    }
    assert_eq!(engine.respond("1 + 2"), "Bot: The result is 3.0.");
}

fn chain(operand: &str, op: &str, count: usize) -> String {
    vec![operand; count].join(op)
}

fn assert_depth_limited(reply: Reply) {
    match reply {
        Reply::Error {
            error: CalcError::ResourceLimitExceeded { limit_name, .. },
        } => assert_eq!(limit_name, "max_expression_depth"),
        other => panic!("Expected depth limit error, got: {:?}", other),
    }
}

#[test]
fn test_spaced_nested_call_is_rejected() {
    let mut engine = Engine::new();
    assert_eq!(
        engine.respond("sqrt (sqrt(16))"),
        "Bot: Error - Invalid argument 'sqrt(16' for function 'sqrt'. Only numbers or defined variables are allowed."
    );
    assert_eq!(engine.respond("sqrt (16)"), "Bot: The result is 4.0.");
    assert_eq!(engine.respond("sin (90 degrees)"), "Bot: The result is 1.0.");
}

#[test]
fn test_long_operator_chains_are_bounded() {
    let mut engine = Engine::new();
    for op in ["+", "-", "*", "/", "^"] {
        let input = chain("1", op, 1000);
        assert!(input.len() < engine.limits().max_input_bytes);
        assert_depth_limited(engine.handle(&input));
    }
    assert!(engine.variables().is_empty());
}

#[test]
fn test_chain_length_counts_toward_depth() {
    let mut engine = Engine::new();
    assert_eq!(
        engine.respond(&chain("1", "+", 100)),
        "Bot: The result is 100.0. Suggested optimization: 1 * 100"
    );
    assert_depth_limited(engine.handle(&chain("1", "+", 101)));
    assert_depth_limited(engine.handle(&chain("2", " * ", 150)));
}

#[test]
fn test_long_symbolic_chains_are_bounded() {
    let mut engine = Engine::new();
    let too_deep =
        "Bot: Error - Error evaluating calculus expression: expression is nested more than 100 levels deep";

    assert_eq!(
        engine.respond(&format!("d/dx({})", chain("x", "*", 1300))),
        too_deep
    );
    assert_eq!(
        engine.respond(&format!("integrate({})", chain("x", "+", 1300))),
        too_deep
    );
    assert_eq!(
        engine.respond(&format!("integrate {}", chain("x", "^", 1300))),
        too_deep
    );
    assert!(engine
        .respond(&format!("d/dx({})", chain("x", "*", 20)))
        .starts_with("Bot: Derivative: "));
}

#[test]
fn test_symbolic_replies() {
    let mut engine = Engine::new();
    assert_eq!(
        engine.respond("d/dx(x^2 + 3x)"),
        "Bot: Derivative: 2*x + 3"
    );
    assert_eq!(
        engine.respond("det([[1, 2], [3, 4]])"),
        "Bot: Determinant: -2.0"
    );
}

#[test]
fn test_backend_errors_name_the_domain() {
    let mut engine = Engine::new();
    let reply = engine.respond("inv([[1, 2], [2, 4]])");
    assert_eq!(
        reply,
        "Bot: Error - Error evaluating linear algebra expression: matrix is singular"
    );
    let reply = engine.respond("integrate(tan(x), x)");
    assert!(reply.starts_with("Bot: Error - Error evaluating calculus expression:"));
}

struct SlowBackend;

impl SymbolicBackend for SlowBackend {
    fn calculus(&self, _input: &str) -> Result<String, BackendError> {
        thread::sleep(Duration::from_millis(500));
        Ok("Derivative: never".to_string())
    }

    fn linear_algebra(&self, _input: &str) -> Result<String, BackendError> {
        Ok("Determinant: 42".to_string())
    }
}

#[test]
fn test_backend_is_pluggable_and_time_bounded() {
    let config = EngineConfig::default().with_limits(ResourceLimits {
        backend_timeout_ms: 20,
        ..ResourceLimits::default()
    });
    let mut engine = Engine::with_config(config).with_backend(Arc::new(SlowBackend));

    assert_eq!(engine.respond("det([[1]])"), "Bot: Determinant: 42");
    assert_eq!(
        engine.respond("d/dx(x)"),
        "Bot: Error - Error evaluating calculus expression: timed out after 20 ms"
    );
}

#[test]
fn test_telemetry_does_not_change_replies() {
    let mut plain = Engine::new();
    let mut observed = Engine::with_config(EngineConfig::default().with_telemetry(Some(7)));

    for line in ["x = 3", "x * 2", "What is 2 times 3?", "5 / 0", "get_variables"] {
        assert_eq!(plain.respond(line), observed.respond(line));
    }

    let network = observed.telemetry().expect("telemetry enabled");
    assert_eq!(network.current_time(), 2);
    assert!(plain.telemetry().is_none());
}
