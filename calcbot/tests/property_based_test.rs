use calcbot::{
    suggest, CalcError, Engine, FunctionTable, Reply, ResourceLimits, Validator, VariableStore,
};
use proptest::prelude::*;
use std::sync::Arc;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 100,
        ..ProptestConfig::default()
    })]

    #[test]
    fn prop_assignment_round_trip(name in "[a-z][a-z0-9_]{0,8}", value in -1.0e6..1.0e6f64) {
        let table = FunctionTable::standard();
        prop_assume!(!table.is_reserved(&name));

        let mut engine = Engine::new();
        let reply = engine.respond(&format!("{} = {}", name, value));
        prop_assert!(reply.starts_with("Bot: Variable"), "reply: {}", reply);
        prop_assert_eq!(engine.variables().get(&name).unwrap(), value);
    }

    #[test]
    fn prop_addition_matches_f64(a in -1000i32..1000, b in -1000i32..1000) {
        let mut engine = Engine::new();
        let reply = engine.respond(&format!("{} + {}", a, b));
        prop_assert_eq!(reply, format!("Bot: The result is {:.1}.", f64::from(a + b)));
    }

    #[test]
    fn prop_engine_is_deterministic(input in "[0-9a-z+*/^(). -]{1,24}") {
        let mut first = Engine::new();
        let mut second = Engine::new();
        prop_assert_eq!(first.respond(&input), second.respond(&input));
    }

    #[test]
    fn prop_every_reply_has_prefix(input in "\\PC{0,40}") {
        let mut engine = Engine::new();
        prop_assert!(engine.respond(&input).starts_with("Bot: "));
    }

    #[test]
    fn prop_validator_acceptance_implies_parse(input in "[0-9x+*/^() .-]{1,20}") {
        let table = Arc::new(FunctionTable::standard());
        let limits = ResourceLimits::default();
        let validator = Validator::new(Arc::clone(&table), limits.clone());
        let mut store = VariableStore::new();
        store.set("x", 2.0);

        if validator.validate_expression(&input, &store).is_ok() {
            prop_assert!(calcbot::parse(&input, &table, &limits).is_ok());
        }
    }

    #[test]
    fn prop_suggest_never_panics(input in "\\PC{0,40}") {
        let _ = suggest(&input);
    }

    #[test]
    fn prop_repeated_terms_suggest_multiplication(n in 1u32..1000, count in 3usize..8) {
        let term = n.to_string();
        let expression = vec![term.as_str(); count].join(" + ");
        prop_assert_eq!(suggest(&expression), Some(format!("{} * {}", n, count)));
    }

    #[test]
    fn prop_long_chains_hit_depth_limit(
        op in prop::sample::select(vec!["+", "-", "*", "/", "^", " + ", " * "]),
        count in 102usize..1300,
    ) {
        let input = vec!["3"; count].join(op);
        prop_assume!(input.len() <= ResourceLimits::default().max_input_bytes);

        let mut engine = Engine::new();
        match engine.handle(&input) {
            Reply::Error { error: CalcError::ResourceLimitExceeded { limit_name, .. } } => {
                prop_assert_eq!(limit_name, "max_expression_depth");
            }
            other => prop_assert!(false, "unexpected reply: {:?}", other),
        }
    }

    #[test]
    fn prop_long_symbolic_input_never_aborts(
        unit in prop::sample::select(vec!["x*", "x+", "x-", "x^", "(", "-", "sin(x)*"]),
        count in 1usize..1000,
    ) {
        let input = format!("d/dx({}x)", unit.repeat(count));
        prop_assume!(input.len() <= ResourceLimits::default().max_input_bytes);

        let mut engine = Engine::new();
        prop_assert!(engine.respond(&input).starts_with("Bot: "));
    }
}
