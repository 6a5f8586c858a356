/// GR4J model state variables.
///
/// Mutable state that evolves during simulation:
/// - `production_store`: S — soil moisture store level [mm], in [0, x1]
/// - `routing_store`: R — routing store level [mm], in [0, x3]
/// - `uh_memory`: rolling history of routed effective rainfall, newest
///   first; `uh_memory[j]` is the value produced `j + 1` timesteps ago.
///
/// The history length is `floor(2 * x4)`, one less than the UH2 ordinate
/// count, because the current timestep's value enters the convolution
/// directly before it is pushed into the history.
use crate::params::Parameters;

#[derive(Debug, Clone)]
pub struct State {
    pub production_store: f64,
    pub routing_store: f64,
    pub uh_memory: Vec<f64>,
}

impl State {
    /// Create initial state from parameters.
    ///
    /// Standard initialization: production store at half of X1, routing
    /// store at half of X3, rainfall history all zero.
    pub fn initialize(params: &Parameters) -> Self {
        Self {
            production_store: params.x1 / 2.0,
            routing_store: params.x3 / 2.0,
            uh_memory: vec![0.0; (2.0 * params.x4).floor() as usize],
        }
    }

    /// Flatten to `[production_store, routing_store, uh_memory...]`,
    /// length `2 + floor(2 * x4)`.
    pub fn to_vec(&self) -> Vec<f64> {
        let mut arr = Vec::with_capacity(2 + self.uh_memory.len());
        arr.push(self.production_store);
        arr.push(self.routing_store);
        arr.extend_from_slice(&self.uh_memory);
        arr
    }

    /// Reconstruct State from a flat array; the history length is taken
    /// from the slice length.
    pub fn from_slice(arr: &[f64]) -> Result<Self, String> {
        if arr.len() < 2 {
            return Err(format!(
                "expected at least 2 state elements, got {}",
                arr.len()
            ));
        }
        Ok(Self {
            production_store: arr[0],
            routing_store: arr[1],
            uh_memory: arr[2..].to_vec(),
        })
    }
}
