//! some utilities shared by modules

pub mod distance;
