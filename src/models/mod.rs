mod azimuth;
mod topology;

pub use azimuth::*;
pub use topology::*;
