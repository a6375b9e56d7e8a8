//! 2017: the duet register machine and its coprocessor variant

pub mod day_18;
pub mod day_23;
