//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in azimuth-core for the sensors the wrist compass ships with:
//!
//! - QMC5883L 3-axis magnetometer (heading sensor)

#![no_std]
#![deny(unsafe_code)]

pub mod mag;
