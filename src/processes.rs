/// GR4J core process functions.
///
/// Pure functions implementing the closed-form store equations for each
/// step of the recurrence. All inputs and outputs are f64.
use crate::constants::{EXCHANGE_POWER, PERC_CONSTANT};

/// Update the production store based on precipitation and evapotranspiration.
///
/// Handles two cases:
/// - Case 1: P < E (evapotranspiration dominant) — evaporative loss,
///   clamped so the store never goes negative.
/// - Case 2: P >= E (rainfall dominant) — tanh intake; when P == E the
///   net rainfall is zero and the store is left untouched.
///
/// Returns (new_store, actual_et, net_rainfall_pn, rainfall_excess).
/// `rainfall_excess` is the part of net rainfall not absorbed by the
/// store (PN - PS); effective rainfall for routing adds percolation to it.
pub fn production_store_update(
    precip: f64,
    pet: f64,
    production_store: f64,
    x1: f64,
) -> (f64, f64, f64, f64) {
    let store_ratio = production_store / x1;

    if precip < pet {
        // Case 1: Evapotranspiration dominant (P < E)
        let net_evap = pet - precip;
        let tanh_ws = (net_evap / x1).tanh();

        let numerator = (2.0 - store_ratio) * tanh_ws;
        let denominator = 1.0 + (1.0 - store_ratio) * tanh_ws;
        let evap_from_store = production_store * numerator / denominator;

        let actual_et = evap_from_store + precip;

        // Loss side is clamped; the intake formula never overfills.
        let new_store = (production_store - evap_from_store).max(0.0);

        (new_store, actual_et, 0.0, 0.0)
    } else {
        // Case 2: Rainfall dominant (P >= E)
        let net_rainfall_pn = precip - pet;
        let tanh_ws = (net_rainfall_pn / x1).tanh();

        let numerator = (1.0 - store_ratio * store_ratio) * tanh_ws;
        let denominator = 1.0 + store_ratio * tanh_ws;
        let storage_infiltration = x1 * numerator / denominator;

        let rainfall_excess = net_rainfall_pn - storage_infiltration;
        let new_store = production_store + storage_infiltration;

        (new_store, pet, net_rainfall_pn, rainfall_excess)
    }
}

/// Compute percolation from the production store.
///
/// Perc = S * (1 - (1 + (S/X1)^4 / (9/4)^4)^(-1/4))
///
/// The formula keeps percolation strictly below the store content, so the
/// store stays non-negative without clamping.
///
/// Returns (new_store, percolation_amount).
pub fn percolation(production_store: f64, x1: f64) -> (f64, f64) {
    let store_ratio = production_store / x1;
    let store_ratio_4 = store_ratio * store_ratio * store_ratio * store_ratio;
    let percolation_amount =
        production_store * (1.0 - (1.0 + store_ratio_4 / PERC_CONSTANT).powf(-0.25));

    let new_store = production_store - percolation_amount;

    (new_store, percolation_amount)
}

/// Compute potential groundwater exchange.
///
/// F = X2 * (R/X3)^3.5 — signed: positive imports water, negative exports.
pub fn groundwater_exchange(routing_store: f64, x2: f64, x3: f64) -> f64 {
    x2 * (routing_store / x3).powf(EXCHANGE_POWER)
}

/// Update the routing store and compute outflow.
///
/// Receives the UH1 output plus exchange, floors the store at zero, and
/// drains it through the non-linear law QR = R * (1 - (1 + (R/X3)^4)^(-1/4)).
///
/// Returns (new_store, outflow_qr, actual_exchange).
pub fn routing_store_update(
    routing_store: f64,
    uh1_output: f64,
    exchange: f64,
    x3: f64,
) -> (f64, f64, f64) {
    let store_after_inflow = routing_store + uh1_output + exchange;

    let (actual_exchange, store) = if store_after_inflow > 0.0 {
        (exchange, store_after_inflow)
    } else {
        (-(routing_store + uh1_output), 0.0)
    };

    let store_ratio = store / x3;
    let store_ratio_4 = store_ratio * store_ratio * store_ratio * store_ratio;
    let outflow_qr = store * (1.0 - (1.0 + store_ratio_4).powf(-0.25));

    let new_store = store - outflow_qr;

    (new_store, outflow_qr, actual_exchange)
}

/// Compute direct branch outflow.
///
/// The exchange term also applies to the bypass flow and can drive it
/// negative before clamping: QD = max(uh2_output + F, 0).
///
/// Returns (outflow_qd, actual_exchange).
pub fn direct_branch(uh2_output: f64, exchange: f64) -> (f64, f64) {
    let combined = uh2_output + exchange;

    if combined > 0.0 {
        (combined, exchange)
    } else {
        (0.0, -uh2_output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // -- Production store update --

    #[test]
    fn rainfall_dominant_increases_store() {
        let (new_store, _et, _pn, _excess) = production_store_update(10.0, 3.0, 175.0, 350.0);
        assert!(new_store > 175.0);
    }

    #[test]
    fn evap_dominant_decreases_store() {
        let (new_store, _et, _pn, _excess) = production_store_update(2.0, 5.0, 175.0, 350.0);
        assert!(new_store < 175.0);
    }

    #[test]
    fn rainfall_dominant_net_rainfall() {
        let (_s, et, pn, excess) = production_store_update(10.0, 3.0, 175.0, 350.0);
        assert_relative_eq!(pn, 7.0, max_relative = 1e-12);
        assert_eq!(et, 3.0);
        assert!(excess > 0.0 && excess < pn);
    }

    #[test]
    fn evap_dominant_no_excess() {
        let (_s, _et, pn, excess) = production_store_update(2.0, 5.0, 175.0, 350.0);
        assert_eq!(pn, 0.0);
        assert_eq!(excess, 0.0);
    }

    #[test]
    fn equal_inputs_leave_store_unchanged() {
        let (new_store, et, pn, excess) = production_store_update(4.0, 4.0, 175.0, 350.0);
        assert_eq!(new_store, 175.0);
        assert_eq!(et, 4.0);
        assert_eq!(pn, 0.0);
        assert_eq!(excess, 0.0);
    }

    #[test]
    fn evap_from_empty_store_clamps_at_zero() {
        let (new_store, _et, _pn, _excess) = production_store_update(0.0, 50.0, 0.0, 350.0);
        assert_eq!(new_store, 0.0);
    }

    #[test]
    fn full_store_absorbs_nothing() {
        // store at capacity: intake factor (1 - (S/X1)^2) is zero
        let (new_store, _et, pn, excess) = production_store_update(10.0, 0.0, 350.0, 350.0);
        assert_relative_eq!(new_store, 350.0, max_relative = 1e-12);
        assert_relative_eq!(excess, pn, max_relative = 1e-12);
    }

    // -- Percolation --

    #[test]
    fn percolation_decreases_store() {
        let (new_store, perc) = percolation(175.0, 350.0);
        assert!(perc > 0.0);
        assert!(new_store < 175.0);
        assert!(new_store > 0.0);
    }

    #[test]
    fn percolation_conserves_mass() {
        let (new_store, perc) = percolation(175.0, 350.0);
        assert_relative_eq!(new_store + perc, 175.0, max_relative = 1e-12);
    }

    #[test]
    fn percolation_zero_for_empty_store() {
        let (new_store, perc) = percolation(0.0, 350.0);
        assert_eq!(new_store, 0.0);
        assert_eq!(perc, 0.0);
    }

    #[test]
    fn percolation_stays_small_for_low_store() {
        // (S/(2.25*X1))^4 is tiny for a nearly empty store
        let (_new_store, perc) = percolation(1.0, 350.0);
        assert!(perc < 1e-8);
    }

    // -- Groundwater exchange --

    #[test]
    fn exchange_zero_when_x2_zero() {
        assert_eq!(groundwater_exchange(45.0, 0.0, 90.0), 0.0);
    }

    #[test]
    fn exchange_sign_follows_x2() {
        assert!(groundwater_exchange(45.0, 2.0, 90.0) > 0.0);
        assert!(groundwater_exchange(45.0, -2.0, 90.0) < 0.0);
    }

    #[test]
    fn exchange_known_value() {
        // (45/90)^3.5 = 2^-3.5
        let f = groundwater_exchange(45.0, 1.0, 90.0);
        assert_relative_eq!(f, 2.0_f64.powf(-3.5), max_relative = 1e-12);
    }

    #[test]
    fn exchange_grows_with_store_level() {
        let low = groundwater_exchange(10.0, 1.0, 90.0);
        let high = groundwater_exchange(80.0, 1.0, 90.0);
        assert!(high > low);
    }

    // -- Routing store update --

    #[test]
    fn routing_store_drains_nonlinearly() {
        let (new_store, qr, _aexch) = routing_store_update(45.0, 5.0, 0.0, 90.0);
        assert!(qr > 0.0);
        assert_relative_eq!(new_store + qr, 50.0, max_relative = 1e-12);
    }

    #[test]
    fn routing_store_floors_at_zero() {
        let (new_store, qr, aexch) = routing_store_update(5.0, 1.0, -100.0, 90.0);
        assert_eq!(new_store, 0.0);
        assert_eq!(qr, 0.0);
        assert_relative_eq!(aexch, -6.0, max_relative = 1e-12);
    }

    #[test]
    fn routing_outflow_below_content() {
        let (new_store, _qr, _aexch) = routing_store_update(89.0, 20.0, 0.0, 90.0);
        assert!(new_store > 0.0);
    }

    // -- Direct branch --

    #[test]
    fn direct_branch_adds_exchange() {
        let (qd, aexch) = direct_branch(5.0, 1.0);
        assert_relative_eq!(qd, 6.0, max_relative = 1e-12);
        assert_eq!(aexch, 1.0);
    }

    #[test]
    fn direct_branch_clamped_at_zero() {
        let (qd, aexch) = direct_branch(3.0, -5.0);
        assert_eq!(qd, 0.0);
        assert_relative_eq!(aexch, -3.0, max_relative = 1e-12);
    }
}
