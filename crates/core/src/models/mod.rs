pub mod analytics;
pub mod investment;
pub mod settings;
