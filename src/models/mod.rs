pub mod consumer_request;
pub mod contract;
pub mod event;
pub mod outsourcing;
pub mod session;
pub mod solar_panel;
pub mod task;
pub mod user;
pub mod vehicle;
