use crate::router::{classify, Route};
use crate::symbolic::{call_with_timeout, BackendCall};
use crate::{
    suggest, BuiltinBackend, CalcError, CalcResult, Canonicalizer, EngineConfig, Evaluator,
    FunctionTable, Reply, ResourceLimits, SpikingNetwork, SymbolicBackend, Validator,
    VariableStore,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// The calcbot dialogue engine.
///
/// Owns one session's variables and routes each line of input to the right
/// pipeline. A failed line never changes the session.
pub struct Engine {
    variables: VariableStore,
    validator: Validator,
    canonicalizer: Canonicalizer,
    evaluator: Evaluator,
    backend: Arc<dyn SymbolicBackend>,
    telemetry: Option<SpikingNetwork>,
    limits: ResourceLimits,
}

impl Default for Engine {
    fn default() -> Self {
        Self::with_config(EngineConfig::default())
    }
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with custom limits and telemetry settings
    pub fn with_config(config: EngineConfig) -> Self {
        let table = Arc::new(FunctionTable::standard());
        let limits = config.limits;
        let telemetry = config
            .telemetry
            .enabled
            .then(|| SpikingNetwork::new(config.telemetry.seed));

        Self {
            variables: VariableStore::new(),
            validator: Validator::new(Arc::clone(&table), limits.clone()),
            canonicalizer: Canonicalizer::new(Arc::clone(&table), limits.clone()),
            evaluator: Evaluator::new(table, limits.clone()),
            backend: Arc::new(BuiltinBackend::with_limits(&limits)),
            telemetry,
            limits,
        }
    }

    /// Replace the symbolic backend used for calculus and linear algebra
    pub fn with_backend(mut self, backend: Arc<dyn SymbolicBackend>) -> Self {
        self.backend = backend;
        self
    }

    pub fn limits(&self) -> &ResourceLimits {
        &self.limits
    }

    pub fn variables(&self) -> &VariableStore {
        &self.variables
    }

    pub fn telemetry(&self) -> Option<&SpikingNetwork> {
        self.telemetry.as_ref()
    }

    /// Handle one line and render the reply as text
    pub fn respond(&mut self, line: &str) -> String {
        self.handle(line).to_string()
    }

    /// Handle one line of input
    pub fn handle(&mut self, line: &str) -> Reply {
        match self.route(line) {
            Ok(reply) => reply,
            Err(error) => {
                warn!(input = line.trim(), kind = error.kind(), "rejected input: {}", error);
                Reply::from(error)
            }
        }
    }

    fn route(&mut self, line: &str) -> CalcResult<Reply> {
        if line.len() > self.limits.max_input_bytes {
            return Err(CalcError::ResourceLimitExceeded {
                limit_name: "max_input_bytes".to_string(),
                limit_value: self.limits.max_input_bytes.to_string(),
                actual_value: line.len().to_string(),
                suggestion: "Split the calculation into shorter lines".to_string(),
            });
        }

        let route = classify(line);
        debug!(route = route.label(), "classified input");

        match route {
            Route::ListVariables => Ok(Reply::Variables {
                variables: self.variables.list().to_vec(),
            }),
            Route::Assignment { name, value } => self.assign(name, value),
            Route::NaturalLanguage(sentence) => {
                let expression = self.canonicalizer.normalize(sentence)?;
                self.evaluate(&expression, route.label())
            }
            Route::Calculus(input) => self.call_backend(BackendCall::Calculus, input),
            Route::LinearAlgebra(input) => self.call_backend(BackendCall::LinearAlgebra, input),
            Route::Expression(expression) => self.evaluate(expression, route.label()),
        }
    }

    fn assign(&mut self, name: &str, raw: &str) -> CalcResult<Reply> {
        self.validator.validate_identifier(name)?;
        let value = raw
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| CalcError::InvalidNumber(raw.to_string()))?;

        self.variables.set(name, value);
        info!(name, value, "variable assigned");
        Ok(Reply::Assigned {
            name: name.to_string(),
            value,
            raw: raw.to_string(),
        })
    }

    fn evaluate(&mut self, expression: &str, label: &str) -> CalcResult<Reply> {
        self.validator
            .validate_expression(expression, &self.variables)?;
        let value = self.evaluator.evaluate(expression, &self.variables)?;
        let suggestion = suggest(expression);
        debug!(expression, value, suggestion = ?suggestion, "evaluated");

        if let Some(network) = self.telemetry.as_mut() {
            let stats = network.record_event(label, 1.0);
            debug!(?stats, "telemetry");
        }

        Ok(Reply::Evaluated {
            expression: expression.to_string(),
            value,
            suggestion,
        })
    }

    fn call_backend(&self, call: BackendCall, input: &str) -> CalcResult<Reply> {
        let domain = match call {
            BackendCall::Calculus => "calculus",
            BackendCall::LinearAlgebra => "linear algebra",
        };
        let text = call_with_timeout(
            Arc::clone(&self.backend),
            call,
            input,
            self.limits.backend_timeout_ms,
        )
        .map_err(|e| CalcError::Backend {
            domain: domain.to_string(),
            detail: e.to_string(),
        })?;
        Ok(Reply::Symbolic { text })
    }
}
