use gr4j::forcing::ForcingData;
use gr4j::params::Parameters;
use gr4j::run;

fn main() {
    let p = Parameters::new(350.0, 0.0, 90.0, 1.7, 0.0).unwrap();

    // Two weeks of daily forcing data (mm/day)
    let precip = [
        0.0, 0.0, 12.5, 25.0, 3.1, 0.0, 0.0, 8.4, 17.9, 0.0, 0.0, 0.0, 4.2, 0.0,
    ];
    let pet = [
        2.1, 2.3, 1.8, 1.5, 2.0, 2.6, 2.8, 2.2, 1.7, 2.4, 2.7, 2.9, 2.5, 2.6,
    ];

    // Validate once, then run the model
    let forcing = ForcingData::daily(precip.to_vec(), pet.to_vec()).unwrap();
    let result = run::run(&p, &forcing.precip, &forcing.pet, None);

    // Print results
    println!("Day | Precip |  PET  | Q (streamflow) | Prod Store | Rout Store");
    println!("----|--------|-------|----------------|------------|----------");
    for t in 0..result.len() {
        println!(
            " {:>2} | {:>6.1} | {:>5.1} | {:>14.3} | {:>10.2} | {:>10.2}",
            t + 1,
            result.precip[t],
            result.pet[t],
            result.streamflow[t],
            result.production_store[t],
            result.routing_store[t],
        );
    }

    // Water balance check
    let total_p: f64 = result.precip.iter().sum();
    let total_q: f64 = result.streamflow.iter().sum();
    let total_ae: f64 = result.actual_et.iter().sum();
    println!(
        "\nTotals: P={:.1}, Q={:.1}, AE={:.1}",
        total_p, total_q, total_ae
    );
}
