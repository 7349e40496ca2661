//! Spike telemetry
//!
//! A small event-driven spiking network that observes the engine. Each
//! distinct event label gets a neuron; every step feeds the input through
//! synapses to all neurons, and synapses that carried a spike are
//! strengthened. Statistics are logged by the engine and never affect a
//! reply.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

const THRESHOLD: f64 = 0.5;
const DECAY: f64 = 0.8;
const STDP_RATE: f64 = 0.1;
/// Number of most recent firing steps kept in the spike history
pub const HISTORY_WINDOW: usize = 1024;

#[derive(Debug, Clone)]
pub struct Neuron {
    label: String,
    potential: f64,
    last_spike_time: Option<u64>,
}

impl Neuron {
    fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            potential: 0.0,
            last_spike_time: None,
        }
    }

    /// Add `input` to the potential; fire and reset on crossing the threshold
    fn integrate(&mut self, input: f64, time: u64) -> bool {
        self.potential += input;
        if self.potential >= THRESHOLD {
            self.potential = 0.0;
            self.last_spike_time = Some(time);
            return true;
        }
        self.potential *= DECAY;
        false
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn potential(&self) -> f64 {
        self.potential
    }

    pub fn last_spike_time(&self) -> Option<u64> {
        self.last_spike_time
    }
}

#[derive(Debug, Clone)]
pub struct Synapse {
    weight: f64,
    last_used_time: Option<u64>,
}

impl Synapse {
    fn new(weight: f64) -> Self {
        Self {
            weight,
            last_used_time: None,
        }
    }

    fn transmit(&self, spike: f64) -> f64 {
        if spike != 0.0 {
            self.weight
        } else {
            0.0
        }
    }

    /// Timing-dependent plasticity: a post-synaptic spike after the
    /// pre-synaptic one strengthens the synapse
    fn adjust_weight(&mut self, pre_spike_time: u64, post_spike_time: u64) {
        let time_diff = post_spike_time as f64 - pre_spike_time as f64;
        self.weight = (self.weight + STDP_RATE * time_diff).clamp(0.0, 1.0);
        self.last_used_time = Some(pre_spike_time.max(post_spike_time));
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }
}

/// Summary of one network step
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepStatistics {
    pub any_spikes: bool,
    pub spike_count: usize,
    pub current_time: u64,
    pub total_neurons: usize,
    pub total_synapses: usize,
}

#[derive(Debug, Clone)]
pub struct SpikingNetwork {
    neurons: Vec<Neuron>,
    index: HashMap<String, usize>,
    /// Outgoing synapses per source neuron, keyed by target neuron
    synapses: HashMap<usize, BTreeMap<usize, Synapse>>,
    spike_history: BTreeMap<u64, usize>,
    current_time: u64,
    rng: StdRng,
}

impl SpikingNetwork {
    /// Create an empty network; `seed` makes synapse weights reproducible
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            neurons: Vec::new(),
            index: HashMap::new(),
            synapses: HashMap::new(),
            spike_history: BTreeMap::new(),
            current_time: 0,
            rng,
        }
    }

    /// Feed a single event into the network
    pub fn record_event(&mut self, label: &str, magnitude: f64) -> StepStatistics {
        self.step(&[(label, magnitude)])
    }

    /// Advance the network by one time step
    ///
    /// Unknown labels get a fresh neuron. Empty labels are ignored.
    pub fn step(&mut self, inputs: &[(&str, f64)]) -> StepStatistics {
        let mut spikes = Vec::new();
        let time = self.current_time;

        for &(label, input) in inputs {
            if label.is_empty() {
                continue;
            }
            let source = self.neuron_for(label);
            let rng = &mut self.rng;
            let outgoing = self.synapses.entry(source).or_default();

            for (target, neuron) in self.neurons.iter_mut().enumerate() {
                let synapse = outgoing
                    .entry(target)
                    .or_insert_with(|| Synapse::new(rng.gen_range(0.1..1.0)));
                let fired = neuron.integrate(synapse.transmit(input), time);
                spikes.push(fired);
                if fired {
                    *self.spike_history.entry(time).or_insert(0) += 1;
                    if input != 0.0 {
                        synapse.adjust_weight(time.saturating_sub(1), time);
                    }
                }
            }
        }

        while self.spike_history.len() > HISTORY_WINDOW {
            self.spike_history.pop_first();
        }

        self.current_time += 1;
        let stats = StepStatistics {
            any_spikes: spikes.iter().any(|fired| *fired),
            spike_count: spikes.iter().filter(|fired| **fired).count(),
            current_time: self.current_time,
            total_neurons: self.neurons.len(),
            total_synapses: self.total_synapses(),
        };
        debug!(?stats, "spiking network step");
        stats
    }

    fn neuron_for(&mut self, label: &str) -> usize {
        if let Some(&index) = self.index.get(label) {
            return index;
        }
        let index = self.neurons.len();
        self.neurons.push(Neuron::new(label));
        self.index.insert(label.to_string(), index);
        debug!(label, total = self.neurons.len(), "added neuron");
        index
    }

    pub fn neurons(&self) -> &[Neuron] {
        &self.neurons
    }

    pub fn synapse(&self, source: usize, target: usize) -> Option<&Synapse> {
        self.synapses.get(&source)?.get(&target)
    }

    pub fn total_synapses(&self) -> usize {
        self.synapses.values().map(BTreeMap::len).sum()
    }

    pub fn current_time(&self) -> u64 {
        self.current_time
    }

    /// Spike counts per time step for the most recent steps that had any
    ///
    /// At most [`HISTORY_WINDOW`] entries are kept.
    pub fn spike_history(&self) -> &BTreeMap<u64, usize> {
        &self.spike_history
    }
}
