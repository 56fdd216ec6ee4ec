// Domain layer - Dashboard state and the models it is built from
pub mod dashboard;
pub mod inventory;
pub mod live_buffer;
pub mod telemetry;
pub mod topology;
