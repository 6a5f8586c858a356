//! Hydrological metrics for calibration objectives.
//!
//! All metrics take observed and simulated slices and return a scalar
//! score. A simulated series containing non-finite values — the FAULT
//! sentinel returned for invalid parameter proposals — scores the worst
//! possible value instead of propagating NaN, so bad proposals rank
//! strictly behind every valid one in a calibration loop.

/// Nash-Sutcliffe Efficiency. Range: (-inf, 1], 1 = perfect.
pub fn nse(observed: &[f64], simulated: &[f64]) -> f64 {
    if simulated.iter().any(|v| !v.is_finite()) {
        return f64::NEG_INFINITY;
    }
    let n = observed.len();
    let mean_obs: f64 = observed.iter().sum::<f64>() / n as f64;
    let numerator: f64 = observed
        .iter()
        .zip(simulated)
        .map(|(o, s)| (o - s).powi(2))
        .sum();
    let denominator: f64 = observed.iter().map(|o| (o - mean_obs).powi(2)).sum();
    if denominator == 0.0 {
        return f64::NEG_INFINITY;
    }
    1.0 - numerator / denominator
}

/// Log-transformed NSE. Uses log(x + 0.01) to avoid log(0).
pub fn log_nse(observed: &[f64], simulated: &[f64]) -> f64 {
    if simulated.iter().any(|v| !v.is_finite()) {
        return f64::NEG_INFINITY;
    }
    let log_obs: Vec<f64> = observed.iter().map(|o| (o + 0.01).ln()).collect();
    let log_sim: Vec<f64> = simulated.iter().map(|s| (s + 0.01).ln()).collect();
    nse(&log_obs, &log_sim)
}

/// Kling-Gupta Efficiency. Range: (-inf, 1], 1 = perfect.
pub fn kge(observed: &[f64], simulated: &[f64]) -> f64 {
    if simulated.iter().any(|v| !v.is_finite()) {
        return f64::NEG_INFINITY;
    }
    let n = observed.len() as f64;
    let mean_o = observed.iter().sum::<f64>() / n;
    let mean_s = simulated.iter().sum::<f64>() / n;
    let std_o = (observed.iter().map(|o| (o - mean_o).powi(2)).sum::<f64>() / n).sqrt();
    let std_s = (simulated.iter().map(|s| (s - mean_s).powi(2)).sum::<f64>() / n).sqrt();

    let r = if std_o == 0.0 || std_s == 0.0 {
        0.0
    } else {
        observed
            .iter()
            .zip(simulated)
            .map(|(o, s)| (o - mean_o) * (s - mean_s))
            .sum::<f64>()
            / (n * std_o * std_s)
    };
    let alpha = if std_o == 0.0 { 0.0 } else { std_s / std_o };
    let beta = if mean_o == 0.0 { 0.0 } else { mean_s / mean_o };

    1.0 - ((r - 1.0).powi(2) + (alpha - 1.0).powi(2) + (beta - 1.0).powi(2)).sqrt()
}

/// Root Mean Square Error. Range: [0, inf), 0 = perfect.
pub fn rmse(observed: &[f64], simulated: &[f64]) -> f64 {
    if simulated.iter().any(|v| !v.is_finite()) {
        return f64::INFINITY;
    }
    let n = observed.len() as f64;
    let mse: f64 = observed
        .iter()
        .zip(simulated)
        .map(|(o, s)| (o - s).powi(2))
        .sum::<f64>()
        / n;
    mse.sqrt()
}
