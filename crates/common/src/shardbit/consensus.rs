mod params;

pub use bitcoin::consensus::encode::{Encodable, serialize};
pub use params::Params;
