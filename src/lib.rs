pub mod config;
pub mod output;
pub mod report;
pub mod results;
pub mod roster;
pub mod scoring;
pub mod season;
pub mod teams;
