pub mod receipt_routes;
pub mod system_routes;
