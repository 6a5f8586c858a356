/// GR4J unit hydrograph functions.
///
/// Implements the S-curve based unit hydrographs (UH1 and UH2) used for
/// temporal distribution of effective rainfall, and the convolution over
/// the rolling rainfall history.
///
/// UH1 spreads over `floor(x4) + 1` days, UH2 over `floor(2 * x4) + 1`.
use crate::constants::D;

/// UH1 S-curve value at time `t`.
fn sh1(t: f64, x4: f64) -> f64 {
    if t <= 0.0 {
        0.0
    } else if t < x4 {
        (t / x4).powf(D)
    } else {
        1.0
    }
}

/// UH2 S-curve value at time `t`.
fn sh2(t: f64, x4: f64) -> f64 {
    if t <= 0.0 {
        0.0
    } else if t < x4 {
        0.5 * (t / x4).powf(D)
    } else if t < 2.0 * x4 {
        1.0 - 0.5 * (2.0 - t / x4).powf(D)
    } else {
        1.0
    }
}

/// Compute unit hydrograph ordinates for UH1 and UH2.
///
/// Ordinates are first differences of the S-curves sampled at integers:
/// `uh[i] = SH(i + 1) - SH(i)`. Each array sums to 1 for any `x4 > 0`,
/// so the hydrographs conserve mass. Lengths are `floor(x4) + 1` and
/// `floor(2 * x4) + 1`.
pub fn compute_uh_ordinates(x4: f64) -> (Vec<f64>, Vec<f64>) {
    let l = x4.floor() as usize + 1;
    let m = (2.0 * x4).floor() as usize + 1;

    let mut uh1_ordinates = vec![0.0; l];
    let mut uh2_ordinates = vec![0.0; m];

    for i in 0..l {
        let fi = i as f64;
        uh1_ordinates[i] = sh1(fi + 1.0, x4) - sh1(fi, x4);
    }

    for i in 0..m {
        let fi = i as f64;
        uh2_ordinates[i] = sh2(fi + 1.0, x4) - sh2(fi, x4);
    }

    (uh1_ordinates, uh2_ordinates)
}

/// Convolve the current effective rainfall and the rolling history with
/// both unit hydrographs in a single pass.
///
/// Index 0 of each hydrograph weights the current timestep's value `pr`;
/// index `i >= 1` weights `memory[i - 1]`, the value produced `i`
/// timesteps ago. UH1 only accumulates while `i < uh1.len()`.
///
/// Returns the raw (unscaled) `(q9, q1)` pair.
pub fn convolve(
    uh1_ordinates: &[f64],
    uh2_ordinates: &[f64],
    memory: &[f64],
    pr: f64,
) -> (f64, f64) {
    let mut q9 = 0.0;
    let mut q1 = 0.0;

    for i in 0..uh2_ordinates.len() {
        let pr_i = if i == 0 { pr } else { memory[i - 1] };
        if i < uh1_ordinates.len() {
            q9 += uh1_ordinates[i] * pr_i;
        }
        q1 += uh2_ordinates[i] * pr_i;
    }

    (q9, q1)
}

/// Age the rolling history by one timestep and record `pr` as the newest
/// value. No-op when the history is empty (`x4 < 0.5`).
pub fn push_history(memory: &mut [f64], pr: f64) {
    if memory.is_empty() {
        return;
    }
    let n = memory.len();
    memory.copy_within(0..n - 1, 1);
    memory[0] = pr;
}
