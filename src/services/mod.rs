pub mod catalog_service;
pub mod chart_service;
pub mod form_service;
pub mod submission_service;
