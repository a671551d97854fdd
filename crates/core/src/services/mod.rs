pub mod analytics_service;
pub mod validation_service;
