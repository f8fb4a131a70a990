use crate::common::{CpxMatrix, CpxVector, RangePulse, Real, Units, SPEED_OF_LIGHT};
use crate::error::{StapError, StapResult};
use crate::geometry::{add_scaled, Target};
use crate::processing::{Reshape1d, Reshape2d};
use crate::radar::Radar;
use crate::waveform::Waveform;

use ndarray::s;
use num::complex::Complex64;
use num::traits::FloatConst;

/// Inject delayed, Doppler-shifted, amplitude-scaled target echoes into
/// an L×M fast-time/pulse grid.
///
/// The pulse loop is sequential: target positions advance by
/// `velocity·pri` after every pulse, visible or not, so a target beyond
/// the unambiguous range shows up only once enough pulse intervals have
/// elapsed for its return to arrive. Only whole-sample delays are
/// modeled; delayed samples past the fast-time window are lost. The
/// caller's targets are cloned, never mutated.
pub fn simulate_targets(
    radar: &Radar,
    waveform: &Waveform,
    targets: &[Target],
    data: &RangePulse<CpxMatrix>,
) -> StapResult<RangePulse<CpxMatrix>> {
    let (l, m) = data.size();
    if m != radar.nof_pulses() {
        return Err(StapError::DimensionMismatch {
            expected: radar.nof_pulses(),
            actual: m,
        });
    }
    let r_ua = radar.range_unambiguous()?;
    let pri = radar.timing.pri();

    let mut moving: Vec<Target> = targets.to_vec();
    let mut out = CpxMatrix::zeros((l, m));

    for pulse in 1..=m {
        let range_true = radar.true_range(&moving);
        let range_meas = radar.measured_range(&moving)?;
        let doppler_meas = radar.measured_doppler(&moving)?;
        let power = radar.received_power(&moving)?;

        for (t, _) in moving.iter().enumerate() {
            // time-of-flight gate for ambiguous returns
            if range_true[t] >= r_ua * pulse as Real {
                continue;
            }
            let delay =
                (2.0 * range_meas[t] / SPEED_OF_LIGHT * waveform.samp_rate).round() as usize;
            if delay >= l {
                continue;
            }
            let phasor = Complex64::from_polar(
                power[t].value().sqrt(),
                2.0 * Real::PI() * doppler_meas[t] * pri * pulse as Real,
            );

            let column = data.matrix.column(pulse - 1);
            let echo = column.slice(s![..l - delay]).map(|&c| c * phasor);
            let mut target_bins = out.slice_mut(s![delay.., pulse - 1]);
            target_bins += &echo;
        }

        for target in moving.iter_mut() {
            target.position = add_scaled(&target.position, &target.velocity, pri);
        }
    }

    Ok(RangePulse::new(out))
}

/// Flat-sequence front end: a length L·M burst is reshaped column-wise
/// into an L×M grid, simulated, and flattened back.
pub fn simulate_targets_flat(
    radar: &Radar,
    waveform: &Waveform,
    targets: &[Target],
    data: &CpxVector,
) -> StapResult<CpxVector> {
    let m = radar.nof_pulses();
    if m == 0 || data.len() % m != 0 {
        return Err(StapError::DimensionMismatch {
            expected: m,
            actual: data.len(),
        });
    }
    let grid = RangePulse::new(data.to_owned().to_pulse_grid(data.len() / m));
    Ok(simulate_targets(radar, waveform, targets, &grid)?
        .matrix
        .to_1d())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::radar::test_radar;
    use approx::assert_relative_eq;

    fn test_waveform() -> Waveform {
        Waveform::lfm(10.0e-6, 1.0e6, 0.5e6).unwrap()
    }

    fn stationary_at(range: Real) -> Target {
        Target {
            position: [range, 0.0, 0.0],
            velocity: [0.0; 3],
            rcs: 1.0,
        }
    }

    fn column_energy(matrix: &CpxMatrix, i: usize) -> Real {
        matrix.column(i).map(|c| c.norm_sqr()).sum()
    }

    #[test]
    fn echo_lands_at_the_aliased_delay() {
        let radar = test_radar();
        let wf = test_waveform();
        let r_ua = radar.range_unambiguous().unwrap();
        let targets = vec![stationary_at(0.25 * r_ua)];

        let tx = RangePulse::new(radar.pulse_matrix(&wf).unwrap());
        let rx = simulate_targets(&radar, &wf, &targets, &tx).unwrap();

        // 0.25·r_ua is a quarter of the pri in delay: 250 samples
        assert_eq!(rx.size(), (1000, 16));
        for i in 0..16 {
            let column = rx.matrix.column(i);
            assert_eq!(column[249], Complex64::from(0.0));
            assert!(column[250].norm() > 0.0);
            assert!(column.slice(s![..250]).iter().all(|c| c.norm() == 0.0));
        }
    }

    #[test]
    fn target_beyond_unambiguous_range_is_gated_until_its_echo_arrives() {
        let radar = test_radar();
        let wf = test_waveform();
        let r_ua = radar.range_unambiguous().unwrap();
        let targets = vec![stationary_at(1.5 * r_ua)];

        let tx = RangePulse::new(radar.pulse_matrix(&wf).unwrap());
        let rx = simulate_targets(&radar, &wf, &targets, &tx).unwrap();

        // invisible in pulse 1, aliased to half the window from pulse 2 on
        assert_eq!(column_energy(&rx.matrix, 0), 0.0);
        for i in 1..16 {
            assert!(column_energy(&rx.matrix, i) > 0.0);
            assert!(rx.matrix.column(i).slice(s![..500]).iter().all(|c| c.norm() == 0.0));
            assert!(rx.matrix[[500, i]].norm() > 0.0);
        }
    }

    #[test]
    fn echoes_superpose() {
        let radar = test_radar();
        let wf = test_waveform();
        let r_ua = radar.range_unambiguous().unwrap();
        let a = vec![stationary_at(0.2 * r_ua)];
        let b = vec![stationary_at(0.6 * r_ua)];
        let both = vec![a[0].clone(), b[0].clone()];

        let tx = RangePulse::new(radar.pulse_matrix(&wf).unwrap());
        let rx_a = simulate_targets(&radar, &wf, &a, &tx).unwrap();
        let rx_b = simulate_targets(&radar, &wf, &b, &tx).unwrap();
        let rx_both = simulate_targets(&radar, &wf, &both, &tx).unwrap();

        let sum = rx_a.matrix + rx_b.matrix;
        for (got, expected) in rx_both.matrix.iter().zip(sum.iter()) {
            assert_relative_eq!(got.re, expected.re, epsilon = 1e-20, max_relative = 1e-10);
            assert_relative_eq!(got.im, expected.im, epsilon = 1e-20, max_relative = 1e-10);
        }
    }

    #[test]
    fn moving_target_advances_between_pulses() {
        let radar = test_radar();
        let wf = test_waveform();
        let r_ua = radar.range_unambiguous().unwrap();
        // receding fast enough to shift one sample per pulse:
        // one sample is c/(2·fs) = 149.85 m of range per pri (1 ms)
        let step = SPEED_OF_LIGHT / (2.0 * wf.samp_rate);
        let targets = vec![Target {
            position: [0.1 * r_ua, 0.0, 0.0],
            velocity: [step / radar.timing.pri(), 0.0, 0.0],
            rcs: 1.0,
        }];

        let tx = RangePulse::new(radar.pulse_matrix(&wf).unwrap());
        let rx = simulate_targets(&radar, &wf, &targets, &tx).unwrap();

        // pulse 1 at bin 100, pulse 2 at 101, ...
        for i in 0..16 {
            assert!(rx.matrix[[100 + i, i]].norm() > 0.0);
            assert!(rx.matrix.column(i).slice(s![..100 + i]).iter().all(|c| c.norm() == 0.0));
        }
    }

    #[test]
    fn caller_targets_are_not_mutated() {
        let radar = test_radar();
        let wf = test_waveform();
        let targets = vec![Target {
            position: [1.0e4, 0.0, 0.0],
            velocity: [300.0, 0.0, 0.0],
            rcs: 1.0,
        }];
        let tx = RangePulse::new(radar.pulse_matrix(&wf).unwrap());
        let _ = simulate_targets(&radar, &wf, &targets, &tx).unwrap();
        assert_eq!(targets[0].position, [1.0e4, 0.0, 0.0]);
    }

    #[test]
    fn flat_input_yields_flat_output_of_same_length() {
        let radar = test_radar();
        let wf = test_waveform();
        let targets = vec![stationary_at(0.25 * radar.range_unambiguous().unwrap())];

        let burst = radar.pulse_burst_waveform(&wf).unwrap();
        let flat = simulate_targets_flat(&radar, &wf, &targets, &burst).unwrap();
        assert_eq!(flat.len(), burst.len());

        let grid = RangePulse::new(radar.pulse_matrix(&wf).unwrap());
        let rx = simulate_targets(&radar, &wf, &targets, &grid).unwrap();
        for (got, expected) in flat.iter().zip(rx.matrix.to_1d().iter()) {
            assert_eq!(got, expected);
        }
    }
}
