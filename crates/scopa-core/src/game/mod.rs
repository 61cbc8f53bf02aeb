pub mod capture;
pub mod controller;
pub mod round;
pub mod scoring;
pub mod state;
pub mod turn;
