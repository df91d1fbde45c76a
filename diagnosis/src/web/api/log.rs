use crate::management::utils::task_id::TaskId;
use crate::utils::logging::Logger;
use actix_web::{get, web, HttpResponse, Responder, Scope};
use chrono::{DateTime, Local, NaiveDateTime, TimeZone};

pub fn initialize() -> Scope {
    web::scope("/log")
        .service(system_log)
        .service(system_log_since)
        .service(task_log)
        .service(task_log_since)
}

#[get("/system_log")]
async fn system_log() -> impl Responder {
    let logs = Logger::get_system_logs().await;
    HttpResponse::Ok().body(Logger::format_logs(&logs))
}

#[get("/system_log/since/{since}")]
async fn system_log_since(since: web::Path<String>) -> impl Responder {
    match parse_datetime(&since) {
        Some(since) => {
            let logs = Logger::get_system_logs_since(since).await;
            HttpResponse::Ok().body(Logger::format_logs(&logs))
        }
        None => HttpResponse::BadRequest().body("Invalid datetime format."),
    }
}

#[get("/{task_id}")]
async fn task_log(task_id: web::Path<String>) -> impl Responder {
    let logs = match task_id.parse::<TaskId>() {
        Ok(task_id) => Logger::get_task_logs(task_id.uuid()).await,
        Err(_) => None,
    };
    match logs {
        Some(logs) => HttpResponse::Ok().body(Logger::format_logs(&logs)),
        None => HttpResponse::BadRequest().body("Task not found."),
    }
}

#[get("/{task_id}/since/{since}")]
async fn task_log_since(argument: web::Path<(String, String)>) -> impl Responder {
    let (task_id, since) = argument.into_inner();
    let since = match parse_datetime(&since) {
        Some(since) => since,
        None => return HttpResponse::BadRequest().body("Invalid datetime format."),
    };
    let logs = match task_id.parse::<TaskId>() {
        Ok(task_id) => Logger::get_task_logs_since(task_id.uuid(), since).await,
        Err(_) => None,
    };
    match logs {
        Some(logs) => HttpResponse::Ok().body(Logger::format_logs(&logs)),
        None => HttpResponse::BadRequest().body("Task not found."),
    }
}

fn parse_datetime(datetime: &str) -> Option<DateTime<Local>> {
    let naive_date_time = NaiveDateTime::parse_from_str(datetime, "%Y-%m-%d-%H-%M-%S").ok()?;
    Local.from_local_datetime(&naive_date_time).single()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_dash_separated_datetime() {
        let since = parse_datetime("2024-05-01-13-45-00").unwrap();
        assert_eq!(since.format("%Y/%m/%d %H:%M:%S").to_string(), "2024/05/01 13:45:00");
        assert!(parse_datetime("2024/05/01 13:45:00").is_none());
    }
}
