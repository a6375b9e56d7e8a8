//! Building blocks shared between solutions

pub mod duet;
