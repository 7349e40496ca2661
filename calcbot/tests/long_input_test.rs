use calcbot::{CalcError, Engine, Reply};

const NEAR_LIMIT: usize = 4000;

/// Repeat `unit` until the text is close to `NEAR_LIMIT` bytes
fn fill(prefix: &str, unit: &str, tail: &str, suffix: &str) -> String {
    let mut text = prefix.to_string();
    while text.len() + unit.len() + tail.len() + suffix.len() <= NEAR_LIMIT {
        text.push_str(unit);
    }
    text.push_str(tail);
    text.push_str(suffix);
    text
}

fn nested(open: &str, inner: &str, close: &str) -> String {
    let depth = (NEAR_LIMIT - inner.len()) / (open.len() + close.len());
    format!("{}{}{}", open.repeat(depth), inner, close.repeat(depth))
}

fn long_inputs() -> Vec<String> {
    vec![
        fill("", "1+", "1", ""),
        fill("", "2*", "2", ""),
        fill("", "9-", "9", ""),
        fill("", "8/", "8", ""),
        fill("", "2^", "2", ""),
        fill("", "-", "1", ""),
        fill("", "x + ", "x", ""),
        nested("(", "1", ")"),
        nested("abs(", "1", ")"),
        fill("what is ", "1 plus ", "1", "?"),
        fill("d/dx(", "x*", "x", ")"),
        fill("d/dx(", "x-", "x", ")"),
        fill("integrate(", "x+", "x", ", x)"),
        fill("integrate ", "x^", "x", ""),
        fill("integrate ", "x**", "x", ""),
        fill("d/dx(", "-", "x", ")"),
        nested("d/dx(", "x", ")"),
        nested("integrate(", "x", ")"),
        fill("det([[", "1, ", "1", "]])"),
    ]
}

#[test]
fn test_inputs_near_the_size_limit_get_replies() {
    let mut engine = Engine::new();
    engine.respond("x = 1");

    for input in long_inputs() {
        assert!(
            input.len() <= engine.limits().max_input_bytes,
            "{} bytes",
            input.len()
        );
        let reply = engine.respond(&input);
        assert!(reply.starts_with("Bot: "), "reply: {}", reply);
    }

    assert_eq!(engine.variables().len(), 1);
    assert_eq!(engine.respond("x + 1"), "Bot: The result is 2.0.");
}

#[test]
fn test_deep_inputs_hit_the_depth_limit() {
    let mut engine = Engine::new();
    for input in [fill("", "1+", "1", ""), nested("(", "1", ")"), fill("", "-", "1", "")] {
        match engine.handle(&input) {
            Reply::Error {
                error: CalcError::ResourceLimitExceeded { limit_name, .. },
            } => assert_eq!(limit_name, "max_expression_depth"),
            other => panic!("Expected depth limit error, got: {:?}", other),
        }
    }
}

#[test]
fn test_input_over_the_size_limit_is_rejected_before_parsing() {
    let mut engine = Engine::new();
    let input = "1+".repeat(3000) + "1";
    match engine.handle(&input) {
        Reply::Error {
            error: CalcError::ResourceLimitExceeded { limit_name, .. },
        } => assert_eq!(limit_name, "max_input_bytes"),
        other => panic!("Expected input size error, got: {:?}", other),
    }
}
