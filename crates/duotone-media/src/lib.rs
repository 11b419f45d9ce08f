pub mod decoder;
pub mod encoder;
pub mod error;
pub mod preview;
pub mod processor;
pub mod upload;
pub mod worker;
