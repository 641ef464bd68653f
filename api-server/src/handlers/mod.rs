//! HTTP handlers

pub mod health;
pub mod locations;
pub mod analysis;
pub mod history;
pub mod sensors;
pub mod system;
pub mod model;
pub mod stream;
