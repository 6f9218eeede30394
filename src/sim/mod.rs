pub mod clock;
pub mod event;
pub mod ports;
pub mod runner;
pub mod session;
pub mod step;
