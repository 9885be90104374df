pub mod gateway;
pub mod preview;
pub mod service;
