//! # IO Module
//!
//! Interfaces that expose the domain to the outside world. Only REST for now.

pub mod rest;
