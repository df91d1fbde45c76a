use crate::management::image_processor::ImageProcessor;
use crate::utils::config::Config;
use crate::utils::logging::*;
use actix_multipart::{Field, Multipart};
use actix_web::http::header::ContentDisposition;
use actix_web::{post, web, HttpResponse, Responder, Scope};
use futures::{StreamExt, TryStreamExt};
use sanitize_filename::sanitize;
use serde_json::json;
use std::path::Path;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

pub fn initialize() -> Scope {
    web::scope("/upload")
        .service(upload_file)
}

#[post("")]
async fn upload_file(processor: web::Data<ImageProcessor>, config: web::Data<Config>, mut payload: Multipart) -> impl Responder {
    while let Ok(Some(mut field)) = payload.try_next().await {
        let content_disposition = match field.content_disposition() {
            Some(content_disposition) => content_disposition.clone(),
            None => return HttpResponse::BadRequest().json(json!({"error": "No file part"})),
        };
        if content_disposition.get_name() != Some("file") {
            continue;
        }
        let file_name = match get_file_name(&content_disposition) {
            Some(file_name) => file_name,
            None => return HttpResponse::BadRequest().json(json!({"error": "No selected file"})),
        };
        // Same-named uploads must not overwrite each other while still queued.
        let file_path = Path::new(&config.upload_folder).join(format!("{}_{}", Uuid::new_v4(), file_name));
        if let Err(err) = create_file(&file_path, &mut field).await {
            logging_error!(IOEntry::WriteFileError(file_path.display(), err));
            return HttpResponse::InternalServerError().finish();
        }
        let image_id = processor.submit(file_path.to_string_lossy()).await;
        return HttpResponse::Ok().json(json!({
            "message": "File uploaded successfully",
            "image_id": image_id,
        }));
    }
    HttpResponse::BadRequest().json(json!({"error": "No file part"}))
}

fn get_file_name(content_disposition: &ContentDisposition) -> Option<String> {
    let file_name = sanitize(content_disposition.get_filename()?);
    if file_name.is_empty() {
        None
    } else {
        Some(file_name)
    }
}

async fn create_file(file_path: &Path, field: &mut Field) -> Result<(), String> {
    let mut file = File::create(file_path).await.map_err(|err| err.to_string())?;
    while let Some(chunk) = field.next().await {
        let data = chunk.map_err(|err| err.to_string())?;
        file.write_all(&data).await.map_err(|err| err.to_string())?;
    }
    file.flush().await.map_err(|err| err.to_string())
}
