// Application layer - Session lifecycle and the ports it drives
pub mod dashboard_service;
pub mod noc_api;
pub mod realtime_feed;
pub mod session;
