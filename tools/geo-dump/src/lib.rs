//! # geo-dump
//!
//! Loads a detector description through the geometry provider and prints
//! the sorted geometry and its channel map.

pub mod report;
