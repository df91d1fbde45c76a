use crate::management::image_processor::ImageProcessor;
use crate::management::utils::task_id::TaskId;
use actix_web::{get, web, HttpResponse, Responder, Scope};
use serde_json::json;

pub fn initialize() -> Scope {
    web::scope("/result")
        .service(get_result)
}

#[get("/{image_id}")]
async fn get_result(processor: web::Data<ImageProcessor>, image_id: web::Path<String>) -> impl Responder {
    let record = match image_id.parse::<TaskId>() {
        Ok(task_id) => processor.poll(&task_id).await,
        Err(_) => None,
    };
    match record {
        Some(record) => HttpResponse::Ok().json(record),
        None => HttpResponse::NotFound().json(json!({"error": "Image not found"})),
    }
}
