pub mod clock;
pub mod error;
pub mod grades;
pub mod repository;
pub mod session;
pub mod wire;

// Re-export common error type
pub use error::BelayError;
