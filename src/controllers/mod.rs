pub mod auth_controller;
pub mod record_controller;
pub mod transfer_controller;
pub mod vehicle_controller;
