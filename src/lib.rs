pub mod charts;
pub mod config;
pub mod fetch;
pub mod infra;
pub mod letters;
pub mod normalize;
pub mod output;
pub mod roster;
pub mod services;
