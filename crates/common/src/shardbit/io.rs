pub use bitcoin::io::{Error, Write};
