pub mod history;
pub mod ports;
pub mod queue;
pub mod request;
