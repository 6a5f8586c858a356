/// Stateful GR4J simulation engine.
///
/// Owns parameters, precomputed unit hydrograph ordinates, and the
/// evolving state, so repeated `run` calls continue a simulation across
/// periods. Invalid parameters put the engine in FAULT mode: `run`
/// then returns an all-infinity series of matching length instead of
/// raising, which lets calibration loops score bad parameter proposals
/// as infinitely poor without special-casing errors. `simulate` is the
/// tagged-result alternative for callers that prefer an explicit `Err`.
use crate::constants::SUPPORTED_RESOLUTIONS;
use crate::forcing::ForcingData;
use crate::outputs::FluxesTimeseries;
use crate::params::Parameters;
use crate::run::step_mut;
use crate::state::State;
use crate::timelag::Lag;
use crate::unit_hydrographs::compute_uh_ordinates;

#[derive(Debug, Clone)]
pub struct Gr4j {
    inner: Option<Configured>,
}

#[derive(Debug, Clone)]
struct Configured {
    params: Parameters,
    uh1_ordinates: Vec<f64>,
    uh2_ordinates: Vec<f64>,
    state: State,
}

impl Gr4j {
    /// Configure from a 4- or 5-element parameter vector.
    ///
    /// An invalid vector (`x1 <= 0`, `x3 <= 0`, `x4 <= 0`, `x5 < 0`, or
    /// wrong length) yields a faulted engine rather than an error.
    pub fn new(x: &[f64]) -> Self {
        match Parameters::from_array(x) {
            Ok(params) => Self::from_params(params),
            Err(_) => Self { inner: None },
        }
    }

    /// Configure from a parameter vector, reporting why it was rejected.
    pub fn try_new(x: &[f64]) -> Result<Self, String> {
        Parameters::from_array(x).map(Self::from_params)
    }

    /// Configure from already-validated parameters.
    ///
    /// Stores at half capacity, rainfall history zeroed, ordinates
    /// computed once.
    pub fn from_params(params: Parameters) -> Self {
        let (uh1_ordinates, uh2_ordinates) = compute_uh_ordinates(params.x4);
        let state = State::initialize(&params);
        Self {
            inner: Some(Configured {
                params,
                uh1_ordinates,
                uh2_ordinates,
                state,
            }),
        }
    }

    /// Reconfigure in place: revalidates, resets stores and history, and
    /// recomputes both ordinate arrays.
    pub fn configure(&mut self, x: &[f64]) {
        *self = Self::new(x);
    }

    /// `true` when the engine holds no valid configuration.
    pub fn is_fault(&self) -> bool {
        self.inner.is_none()
    }

    /// Current parameters, if configured.
    pub fn params(&self) -> Option<&Parameters> {
        self.inner.as_ref().map(|cfg| &cfg.params)
    }

    /// Current state, if configured.
    pub fn state(&self) -> Option<&State> {
        self.inner.as_ref().map(|cfg| &cfg.state)
    }

    /// Replace the state, e.g. restored from external persistence.
    pub fn set_state(&mut self, state: State) -> Result<(), String> {
        let cfg = self
            .inner
            .as_mut()
            .ok_or_else(|| "engine is in fault mode".to_string())?;
        if state.uh_memory.len() != cfg.uh2_ordinates.len() - 1 {
            return Err(format!(
                "state history length {} does not match x4 = {} (expected {})",
                state.uh_memory.len(),
                cfg.params.x4,
                cfg.uh2_ordinates.len() - 1
            ));
        }
        cfg.state = state;
        Ok(())
    }

    /// Reset stores to half capacity and zero the rainfall history,
    /// keeping the current parameters.
    pub fn reset(&mut self) {
        if let Some(cfg) = self.inner.as_mut() {
            cfg.state = State::initialize(&cfg.params);
        }
    }

    /// Simulate streamflow for the given forcing series.
    ///
    /// Sentinel protocol: in FAULT mode, returns `f64::INFINITY` at every
    /// index with no state mutation. Otherwise mutates stores and history
    /// in place — state persists across calls, so consecutive `run`s
    /// continue one simulation — and deposits each timestep's total flow
    /// through the fractional outlet delay.
    pub fn run(&mut self, precip: &[f64], pet: &[f64]) -> Vec<f64> {
        assert_eq!(
            precip.len(),
            pet.len(),
            "precip and pet must have the same length"
        );

        let n = precip.len();

        let Some(cfg) = self.inner.as_mut() else {
            return vec![f64::INFINITY; n];
        };

        let lag = Lag::new(cfg.params.x5);
        let mut flow = vec![0.0; n];

        for t in 0..n {
            let fluxes = step_mut(
                &mut cfg.state,
                &cfg.params,
                precip[t],
                pet[t],
                &cfg.uh1_ordinates,
                &cfg.uh2_ordinates,
            );
            lag.deposit(&mut flow, t, fluxes.qt);
        }

        flow
    }

    /// Checked simulation over validated forcing, returning the full flux
    /// diagnostics. Same state-mutation semantics as `run`.
    pub fn simulate(&mut self, forcing: &ForcingData) -> Result<FluxesTimeseries, String> {
        let cfg = self
            .inner
            .as_mut()
            .ok_or_else(|| "invalid parameters: engine is in fault mode".to_string())?;

        if !SUPPORTED_RESOLUTIONS.contains(&forcing.resolution) {
            return Err(format!(
                "unsupported forcing resolution {:?}: GR4J is a daily model",
                forcing.resolution
            ));
        }

        let n = forcing.len();
        let mut outputs = FluxesTimeseries::with_capacity(n);

        for t in 0..n {
            let fluxes = step_mut(
                &mut cfg.state,
                &cfg.params,
                forcing.precip[t],
                forcing.pet[t],
                &cfg.uh1_ordinates,
                &cfg.uh2_ordinates,
            );
            outputs.push(&fluxes);
        }

        outputs.streamflow = Lag::new(cfg.params.x5).route(&outputs.qt);

        Ok(outputs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forcing::Resolution;
    use crate::run;
    use approx::assert_relative_eq;

    const X: [f64; 4] = [350.0, 0.0, 90.0, 1.7];

    #[test]
    fn valid_configuration() {
        let engine = Gr4j::new(&X);
        assert!(!engine.is_fault());
        assert_eq!(engine.params().unwrap().x5, 0.0);
        assert_eq!(engine.state().unwrap().uh_memory.len(), 3);
    }

    #[test]
    fn invalid_parameters_fault_without_panic() {
        for bad in [
            vec![-350.0, 0.0, 90.0, 1.7],
            vec![350.0, 0.0, 0.0, 1.7],
            vec![350.0, 0.0, 90.0, -1.0],
            vec![350.0, 0.0, 90.0, 1.7, -0.5],
            vec![350.0, 0.0],
        ] {
            let engine = Gr4j::new(&bad);
            assert!(engine.is_fault(), "expected fault for {bad:?}");
        }
    }

    #[test]
    fn fault_run_returns_all_infinity() {
        let mut engine = Gr4j::new(&[0.0, 0.0, 90.0, 1.7]);
        let flow = engine.run(&[1.0, 2.0, 3.0], &[0.5, 0.5, 0.5]);
        assert_eq!(flow.len(), 3);
        assert!(flow.iter().all(|&q| q == f64::INFINITY));
    }

    #[test]
    fn fault_simulate_returns_err() {
        let mut engine = Gr4j::new(&[0.0, 0.0, 90.0, 1.7]);
        let forcing =
            ForcingData::new(vec![1.0, 2.0], vec![0.5, 0.5], Resolution::Daily).unwrap();
        assert!(engine.simulate(&forcing).is_err());
    }

    #[test]
    fn try_new_reports_reason() {
        let err = Gr4j::try_new(&[0.0, 0.0, 90.0, 1.7]).unwrap_err();
        assert!(err.contains("x1"));
    }

    #[test]
    fn zero_length_run_no_fault() {
        let mut engine = Gr4j::new(&X);
        let flow = engine.run(&[], &[]);
        assert!(flow.is_empty());
        assert!(!engine.is_fault());
    }

    #[test]
    fn run_matches_free_function() {
        let precip = [10.0, 5.0, 0.0, 15.0, 2.0, 8.0];
        let pet = [3.0, 4.0, 5.0, 2.0, 3.5, 4.0];

        let mut engine = Gr4j::new(&X);
        let flow = engine.run(&precip, &pet);

        let params = Parameters::from_array(&X).unwrap();
        let reference = run::run(&params, &precip, &pet, None);

        assert_eq!(flow, reference.streamflow);
    }

    #[test]
    fn determinism_across_fresh_engines() {
        let precip = [10.0, 5.0, 0.0, 15.0, 2.0];
        let pet = [3.0, 4.0, 5.0, 2.0, 3.5];

        let a = Gr4j::new(&[350.0, -1.0, 90.0, 1.7, 0.5]).run(&precip, &pet);
        let b = Gr4j::new(&[350.0, -1.0, 90.0, 1.7, 0.5]).run(&precip, &pet);
        assert_eq!(a, b);
    }

    #[test]
    fn state_persists_across_runs() {
        let precip = [10.0, 5.0, 0.0, 15.0, 2.0, 8.0];
        let pet = [3.0, 4.0, 5.0, 2.0, 3.5, 4.0];

        let mut continuous = Gr4j::new(&X);
        let full = continuous.run(&precip, &pet);

        let mut chunked = Gr4j::new(&X);
        let first = chunked.run(&precip[..3], &pet[..3]);
        let second = chunked.run(&precip[3..], &pet[3..]);

        for t in 0..3 {
            assert_relative_eq!(first[t], full[t], max_relative = 1e-12);
            assert_relative_eq!(second[t], full[t + 3], max_relative = 1e-12);
        }
    }

    #[test]
    fn reconfigure_resets_state() {
        let precip = [10.0, 5.0, 0.0];
        let pet = [3.0, 4.0, 5.0];

        let mut engine = Gr4j::new(&X);
        let first = engine.run(&precip, &pet);
        engine.configure(&X);
        let second = engine.run(&precip, &pet);
        assert_eq!(first, second);
    }

    #[test]
    fn reset_restores_initial_stores() {
        let mut engine = Gr4j::new(&X);
        let _ = engine.run(&[10.0, 5.0], &[3.0, 4.0]);
        assert_ne!(engine.state().unwrap().production_store, 175.0);
        engine.reset();
        assert_eq!(engine.state().unwrap().production_store, 175.0);
        assert_eq!(engine.state().unwrap().routing_store, 45.0);
    }

    #[test]
    fn set_state_rejects_wrong_history_length() {
        let mut engine = Gr4j::new(&X);
        let bad = State {
            production_store: 100.0,
            routing_store: 30.0,
            uh_memory: vec![0.0; 9],
        };
        assert!(engine.set_state(bad).is_err());
    }

    #[test]
    fn set_state_roundtrip() {
        let mut engine = Gr4j::new(&X);
        let _ = engine.run(&[10.0, 5.0], &[3.0, 4.0]);
        let saved = engine.state().unwrap().to_vec();

        let mut restored = Gr4j::new(&X);
        restored
            .set_state(State::from_slice(&saved).unwrap())
            .unwrap();

        let a = engine.run(&[2.0, 7.0], &[3.0, 1.0]);
        let b = restored.run(&[2.0, 7.0], &[3.0, 1.0]);
        assert_eq!(a, b);
    }

    #[test]
    fn simulate_matches_run_flow() {
        let precip = vec![10.0, 5.0, 0.0, 15.0, 2.0];
        let pet = vec![3.0, 4.0, 5.0, 2.0, 3.5];

        let mut a = Gr4j::new(&[350.0, 0.5, 90.0, 1.7, 1.5]);
        let flow = a.run(&precip, &pet);

        let mut b = Gr4j::new(&[350.0, 0.5, 90.0, 1.7, 1.5]);
        let forcing = ForcingData::new(precip, pet, Resolution::Daily).unwrap();
        let ts = b.simulate(&forcing).unwrap();

        assert_eq!(flow, ts.streamflow);
    }

    #[test]
    fn simulate_rejects_non_daily_forcing() {
        let mut engine = Gr4j::new(&X);
        let forcing =
            ForcingData::new(vec![80.0, 70.0], vec![20.0, 25.0], Resolution::Monthly).unwrap();
        assert!(engine.simulate(&forcing).unwrap_err().contains("daily"));
    }

    #[test]
    fn fault_run_leaves_no_state() {
        let mut engine = Gr4j::new(&[350.0, 0.0, 90.0, 0.0]);
        let _ = engine.run(&[10.0], &[3.0]);
        assert!(engine.state().is_none());
    }
}
