extern crate stap;

use stap::{
    simulate_targets, Antenna, ArrayGeometry, BarrageJammer, ClutterRing, PulseTiming, Radar,
    RangePulse, SmiEstimator, Storable, Target, Units, Waveform,
};

use std::path::Path;

fn main() {
    let mut geometry = ArrayGeometry::new(8, 0.015, 10.0e9).expect("geometry");
    geometry.set_wavelength(0.03).expect("wavelength");

    let radar = Radar::new(
        geometry,
        PulseTiming::new(1000.0, 16).expect("timing"),
        Antenna::uniform_array(20.0.db().ratio(), 2.0),
        1.0e3,
        3.0.db().ratio(),
        Radar::noise_power_from_temperature(3.0.db().ratio(), 1.0e6),
        1.0e6,
    )
    .expect("radar");

    let r_ua = radar.range_unambiguous().expect("prf set");
    println!(
        "unambiguous range {:.1} km, velocity {:.2} m/s",
        r_ua / 1.0e3,
        radar.velocity_unambiguous().expect("prf set")
    );

    let targets = vec![
        Target {
            position: [0.3 * r_ua, 1.0e3, 0.0],
            velocity: [-120.0, 0.0, 0.0],
            rcs: 5.0,
        },
        Target {
            position: [1.5 * r_ua, 0.0, 0.0],
            velocity: [0.0, 0.0, 0.0],
            rcs: 10.0,
        },
    ];

    for (snr, range) in radar
        .snr(&targets)
        .expect("snr")
        .iter()
        .zip(radar.true_range(&targets).iter())
    {
        println!("target at {:.1} km: snr {:.1} dB", range / 1.0e3, snr.db().value());
    }

    let waveform = Waveform::lfm(10.0e-6, 1.0e6, 0.5e6).expect("waveform");
    let tx = RangePulse::new(radar.pulse_matrix(&waveform).expect("pulse matrix"));
    let rx = simulate_targets(&radar, &waveform, &targets, &tx).expect("echo simulation");

    let (compressed, _range_axis) = radar
        .matched_filter_response(&waveform, &rx)
        .expect("pulse compression");
    let (range_doppler, velocity_axis) = radar
        .doppler_processing(compressed, 1)
        .expect("doppler processing");

    println!(
        "range-doppler map {:?}, velocity axis [{:.2}, {:.2}]",
        range_doppler.size(),
        velocity_axis[0],
        velocity_axis[velocity_axis.len() - 1]
    );

    range_doppler
        .to_file(Path::new("range_doppler.json"))
        .expect("could not write to file");

    let clutter = ClutterRing::new(32, 0.5 * r_ua, 0.0, 40.0.db());
    let jammer = BarrageJammer::new(0.4, 0.0, 2.0 * r_ua, 1.0e-4).expect("jammer");

    let estimator = SmiEstimator::new(1024);
    let covariance = estimator
        .estimate(&radar, &clutter, &[&jammer])
        .expect("covariance estimation");
    println!(
        "interference covariance {:?}, trace {:.3e} W",
        covariance.dim(),
        (0..covariance.nrows()).map(|i| covariance[[i, i]].re).sum::<f64>()
    );
}
