//! GR4J model flux outputs.
//!
//! Two levels: `Fluxes` holds a single timestep, `FluxesTimeseries` holds
//! the full simulation (Vec of each field).
//!
//! `qt` is the flow generated at a timestep (QR + QD) before the outlet
//! delay; `streamflow` is the delayed series and is filled by `run()`
//! after the timestep loop, so `push()` leaves it untouched.

/// Single-timestep fluxes — returned by `step()`.
#[derive(Debug, Clone, Copy)]
pub struct Fluxes {
    pub pet: f64,                    // potential ET [mm/day]
    pub precip: f64,                 // precipitation [mm/day]
    pub production_store: f64,       // store level after timestep [mm]
    pub net_rainfall: f64,           // PN [mm/day]
    pub storage_infiltration: f64,   // PS [mm/day]
    pub actual_et: f64,              // AE [mm/day]
    pub percolation: f64,            // PERC [mm/day]
    pub effective_rainfall: f64,     // PR = PERC + PN - PS [mm/day]
    pub q9: f64,                     // UH1 output, 0.9-scaled [mm/day]
    pub q1: f64,                     // UH2 output, 0.1-scaled [mm/day]
    pub routing_store: f64,          // store level after timestep [mm]
    pub exchange: f64,               // potential exchange F [mm/day]
    pub actual_exchange_routing: f64,
    pub actual_exchange_direct: f64,
    pub qr: f64,                     // routing store outflow [mm/day]
    pub qd: f64,                     // direct branch outflow [mm/day]
    pub qt: f64,                     // QR + QD, before outlet delay [mm/day]
}

/// Full timeseries of fluxes — returned by `run()`.
#[derive(Debug)]
pub struct FluxesTimeseries {
    pub pet: Vec<f64>,
    pub precip: Vec<f64>,
    pub production_store: Vec<f64>,
    pub net_rainfall: Vec<f64>,
    pub storage_infiltration: Vec<f64>,
    pub actual_et: Vec<f64>,
    pub percolation: Vec<f64>,
    pub effective_rainfall: Vec<f64>,
    pub q9: Vec<f64>,
    pub q1: Vec<f64>,
    pub routing_store: Vec<f64>,
    pub exchange: Vec<f64>,
    pub actual_exchange_routing: Vec<f64>,
    pub actual_exchange_direct: Vec<f64>,
    pub qr: Vec<f64>,
    pub qd: Vec<f64>,
    pub qt: Vec<f64>,
    /// Flow at the outlet after the fractional delay split.
    pub streamflow: Vec<f64>,
}

impl FluxesTimeseries {
    /// Pre-allocate all vectors for `n` timesteps.
    pub fn with_capacity(n: usize) -> Self {
        Self {
            pet: Vec::with_capacity(n),
            precip: Vec::with_capacity(n),
            production_store: Vec::with_capacity(n),
            net_rainfall: Vec::with_capacity(n),
            storage_infiltration: Vec::with_capacity(n),
            actual_et: Vec::with_capacity(n),
            percolation: Vec::with_capacity(n),
            effective_rainfall: Vec::with_capacity(n),
            q9: Vec::with_capacity(n),
            q1: Vec::with_capacity(n),
            routing_store: Vec::with_capacity(n),
            exchange: Vec::with_capacity(n),
            actual_exchange_routing: Vec::with_capacity(n),
            actual_exchange_direct: Vec::with_capacity(n),
            qr: Vec::with_capacity(n),
            qd: Vec::with_capacity(n),
            qt: Vec::with_capacity(n),
            streamflow: Vec::with_capacity(n),
        }
    }

    /// Push a single timestep's fluxes into the timeseries.
    pub fn push(&mut self, f: &Fluxes) {
        self.pet.push(f.pet);
        self.precip.push(f.precip);
        self.production_store.push(f.production_store);
        self.net_rainfall.push(f.net_rainfall);
        self.storage_infiltration.push(f.storage_infiltration);
        self.actual_et.push(f.actual_et);
        self.percolation.push(f.percolation);
        self.effective_rainfall.push(f.effective_rainfall);
        self.q9.push(f.q9);
        self.q1.push(f.q1);
        self.routing_store.push(f.routing_store);
        self.exchange.push(f.exchange);
        self.actual_exchange_routing.push(f.actual_exchange_routing);
        self.actual_exchange_direct.push(f.actual_exchange_direct);
        self.qr.push(f.qr);
        self.qd.push(f.qd);
        self.qt.push(f.qt);
    }

    /// Number of timesteps.
    pub fn len(&self) -> usize {
        self.qt.len()
    }

    /// Returns `true` if there are no timesteps.
    pub fn is_empty(&self) -> bool {
        self.qt.is_empty()
    }
}
