// Daily market observations
pub mod market;

// Feature layout shared with the model artifact
pub mod ml;

// Pipeline request / report value objects
pub mod forecast;

// Port interfaces
pub mod ports;

// Market data integrity checks
pub mod validation;

// Domain-specific error types
pub mod errors;
