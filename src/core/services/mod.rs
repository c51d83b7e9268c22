pub mod review_service;
pub mod tracking_service;
