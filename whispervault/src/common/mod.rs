pub mod algorithm;
pub mod constants;

pub use algorithm::{AlgorithmParseError, EncryptionAlgorithm};
