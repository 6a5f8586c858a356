/// GR4J numerical constants and model contract.
///
/// Centralises all fixed values used throughout the model. Values follow
/// the original GR4J formulation (Perrin et al., 2003).
use crate::forcing::Resolution;

// -- Routing split fractions --

/// Fraction of effective rainfall routed through UH1 into the routing store.
pub const ROUTED_SHARE: f64 = 0.9;

/// Fraction of effective rainfall routed through UH2 past the store.
pub const DIRECT_SHARE: f64 = 0.1;

// -- Unit hydrograph parameters --

/// S-curve exponent.
pub const D: f64 = 2.5;

// -- Percolation constant --

/// Percolation constant: (9/4)^4.
pub const PERC_CONSTANT: f64 = 25.62890625;

// -- Groundwater exchange --

/// Exponent of the routing-store filling ratio in the exchange term.
pub const EXCHANGE_POWER: f64 = 3.5;

// -- Model contract constants --

/// Parameter names in order.
pub const PARAM_NAMES: &[&str] = &["x1", "x2", "x3", "x4", "x5"];

/// Supported temporal resolutions for forcing data.
pub const SUPPORTED_RESOLUTIONS: &[Resolution] = &[Resolution::Daily];

// -- Parameter bounds --

/// Parameter bounds for calibration: (min, max).
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

/// Production store capacity [mm].
pub const X1_BOUNDS: Bounds = Bounds {
    min: 1.0,
    max: 2500.0,
};

/// Groundwater exchange coefficient [mm/day].
pub const X2_BOUNDS: Bounds = Bounds {
    min: -5.0,
    max: 5.0,
};

/// Routing store capacity [mm].
pub const X3_BOUNDS: Bounds = Bounds {
    min: 1.0,
    max: 1000.0,
};

/// Unit hydrograph time base [days].
pub const X4_BOUNDS: Bounds = Bounds {
    min: 0.5,
    max: 10.0,
};

/// Outlet delay [days].
pub const X5_BOUNDS: Bounds = Bounds {
    min: 0.0,
    max: 10.0,
};
