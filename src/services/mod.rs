pub mod points_service;
pub mod receipt_service;
