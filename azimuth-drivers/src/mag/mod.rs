//! Magnetometer drivers

pub mod qmc5883l;

pub use qmc5883l::{Qmc5883l, Qmc5883lError};
