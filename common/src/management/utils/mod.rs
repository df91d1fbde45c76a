pub mod disease_details;
pub mod prediction;
pub mod processing_error;
pub mod status_record;
pub mod task;
pub mod task_id;
