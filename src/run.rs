/// GR4J model orchestration functions.
///
/// - `step_mut()`: Execute a single timestep in place → Fluxes
/// - `step()`: Pure single timestep → (State, Fluxes)
/// - `run()`: Execute over a timeseries → FluxesTimeseries
use crate::constants::{DIRECT_SHARE, ROUTED_SHARE};
use crate::outputs::{Fluxes, FluxesTimeseries};
use crate::params::Parameters;
use crate::processes;
use crate::state::State;
use crate::timelag::Lag;
use crate::unit_hydrographs::{compute_uh_ordinates, convolve, push_history};

/// Execute one timestep, mutating `state` in place.
///
/// This is the hot-loop entry: no allocation, flat slice reads only.
/// The ordinate slices must come from `compute_uh_ordinates(params.x4)`
/// and `state.uh_memory` must be one shorter than `uh2_ordinates`.
pub fn step_mut(
    state: &mut State,
    params: &Parameters,
    precip: f64,
    pet: f64,
    uh1_ordinates: &[f64],
    uh2_ordinates: &[f64],
) -> Fluxes {
    // 1. Production store: intake or evaporative loss
    let (prod_after_ps, actual_et, net_rainfall, rainfall_excess) =
        processes::production_store_update(precip, pet, state.production_store, params.x1);

    // 2. Percolation
    let (prod_after_perc, percolation) = processes::percolation(prod_after_ps, params.x1);

    // 3. Effective rainfall available for routing
    let effective_rainfall = percolation + rainfall_excess;

    // 4. Unit hydrograph convolution over current value + rolling history
    let (q9_raw, q1_raw) = convolve(
        uh1_ordinates,
        uh2_ordinates,
        &state.uh_memory,
        effective_rainfall,
    );
    let q9 = ROUTED_SHARE * q9_raw;
    let q1 = DIRECT_SHARE * q1_raw;

    // 5. Groundwater exchange and routing store
    let exchange = processes::groundwater_exchange(state.routing_store, params.x2, params.x3);
    let (new_routing_store, qr, actual_exchange_routing) =
        processes::routing_store_update(state.routing_store, q9, exchange, params.x3);

    // 6. Direct branch
    let (qd, actual_exchange_direct) = processes::direct_branch(q1, exchange);

    // 7. Age the rainfall history
    push_history(&mut state.uh_memory, effective_rainfall);
    state.production_store = prod_after_perc;
    state.routing_store = new_routing_store;

    Fluxes {
        pet,
        precip,
        production_store: prod_after_perc,
        net_rainfall,
        storage_infiltration: net_rainfall - rainfall_excess,
        actual_et,
        percolation,
        effective_rainfall,
        q9,
        q1,
        routing_store: new_routing_store,
        exchange,
        actual_exchange_routing,
        actual_exchange_direct,
        qr,
        qd,
        qt: qr + qd,
    }
}

/// Execute one timestep of the GR4J model without mutating the input.
///
/// Clones the state, so prefer `step_mut` inside long loops.
pub fn step(
    state: &State,
    params: &Parameters,
    precip: f64,
    pet: f64,
    uh1_ordinates: &[f64],
    uh2_ordinates: &[f64],
) -> (State, Fluxes) {
    let mut new_state = state.clone();
    let fluxes = step_mut(
        &mut new_state,
        params,
        precip,
        pet,
        uh1_ordinates,
        uh2_ordinates,
    );
    (new_state, fluxes)
}

/// Run the GR4J model over a timeseries.
///
/// Computes UH ordinates once from `params.x4`, loops the recurrence, and
/// finally applies the fractional outlet delay (`params.x5`) to produce
/// the delayed `streamflow` series. If no initial state is provided, uses
/// `State::initialize(params)`.
pub fn run(
    params: &Parameters,
    precip: &[f64],
    pet: &[f64],
    initial_state: Option<&State>,
) -> FluxesTimeseries {
    assert_eq!(
        precip.len(),
        pet.len(),
        "precip and pet must have the same length"
    );

    let n = precip.len();

    let (uh1_ordinates, uh2_ordinates) = compute_uh_ordinates(params.x4);

    let mut state = match initial_state {
        Some(s) => {
            assert_eq!(
                s.uh_memory.len(),
                uh2_ordinates.len() - 1,
                "state history length does not match x4"
            );
            s.clone()
        }
        None => State::initialize(params),
    };

    let mut outputs = FluxesTimeseries::with_capacity(n);

    for t in 0..n {
        let fluxes = step_mut(
            &mut state,
            params,
            precip[t],
            pet[t],
            &uh1_ordinates,
            &uh2_ordinates,
        );
        outputs.push(&fluxes);
    }

    outputs.streamflow = Lag::new(params.x5).route(&outputs.qt);

    outputs
}
