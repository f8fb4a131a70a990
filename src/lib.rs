mod ambiguity;
mod antenna;
mod common;
mod covariance;
mod echo;
mod error;
mod geometry;
mod power;
mod processing;
mod pulsetrain;
mod radar;
mod steering;
mod timing;
mod waveform;

pub use antenna::{Antenna, ArrayAntenna, CosinePattern, GainPattern, SingleElement};
pub use common::*;
pub use covariance::{BarrageJammer, Clutter, ClutterRing, Jammer, JammerKind, SmiEstimator};
pub use echo::{simulate_targets, simulate_targets_flat};
pub use error::{StapError, StapResult};
pub use geometry::{cart_to_spherical, ArrayGeometry, Target, Vec3};
pub use processing::{Reshape1d, Reshape2d};
pub use radar::Radar;
pub use steering::kron;
pub use timing::PulseTiming;
pub use waveform::Waveform;
