pub use bitcoin::hashes::{Hash, sha256d::Hash as Sha256Hash};
