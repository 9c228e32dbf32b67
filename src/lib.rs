#![cfg_attr(not(test), no_std)]

pub mod battery;
pub mod calendar;
pub mod config;
pub mod face;
pub mod serial;
