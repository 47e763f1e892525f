//! Beam profile fitting module

mod fit;

pub use fit::{fit_profile, ProfileFit};
