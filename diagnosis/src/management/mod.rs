pub mod disease_lookup;
pub mod image_processor;
pub mod management;
pub mod predictor;
pub mod result_store;
pub mod submission_gateway;
pub mod task_queue;
pub mod worker;

pub use common::management::*;
