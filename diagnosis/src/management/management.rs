use crate::management::disease_lookup::SqliteDiseaseLookup;
use crate::management::image_processor::ImageProcessor;
use crate::management::predictor::ScriptPredictor;
use crate::utils::config::Config;
use crate::utils::logging::*;
use crate::web::api::{default, log, result, upload};
use actix_web::web::{self, route};
use actix_web::{App, HttpServer};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::fs;
use tokio::time::sleep;

pub struct Management {
    config: Config,
    processor: web::Data<ImageProcessor>,
}

impl Management {
    /// Prepares the upload folder and the disease database, then starts the image processor.
    /// Returns `None` when either is unusable; the reason has already been logged.
    pub async fn new() -> Option<Self> {
        logging_information!(SystemEntry::Initializing);
        let config = Config::now().await;
        let upload_folder = Path::new(&config.upload_folder);
        if let Err(err) = fs::create_dir_all(upload_folder).await {
            logging_emergency!(IOEntry::CreateDirectoryError(upload_folder.display(), err));
            return None;
        }
        let lookup = match SqliteDiseaseLookup::open(Path::new(&config.database_path)) {
            Ok(lookup) => lookup,
            Err(err) => {
                logging_emergency!(DatabaseEntry::OpenError(config.database_path.clone(), err.to_string()));
                return None;
            }
        };
        logging_information!(DatabaseEntry::Opened(config.database_path.clone()));
        let predictor = ScriptPredictor::new(config.python_interpreter.clone(), config.predictor_script.clone());
        let processor = ImageProcessor::start(Arc::new(predictor), Arc::new(lookup));
        logging_information!(SystemEntry::InitializeComplete);
        Some(Self {
            config,
            processor: web::Data::new(processor),
        })
    }

    pub async fn run(&self) {
        let http_server = loop {
            let processor = self.processor.clone();
            let config = web::Data::new(self.config.clone());
            let http_server = HttpServer::new(move || {
                let cors = actix_cors::Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600);
                App::new()
                    .wrap(cors)
                    .app_data(processor.clone())
                    .app_data(config.clone())
                    .service(upload::initialize())
                    .service(result::initialize())
                    .service(log::initialize())
                    .default_service(route().to(default::default_route))
            })
            .bind(format!("0.0.0.0:{}", self.config.http_server_bind_port));
            match http_server {
                Ok(http_server) => break http_server,
                Err(err) => {
                    logging_critical!(SystemEntry::BindPortError(err));
                    sleep(Duration::from_secs(self.config.bind_retry_duration)).await;
                    continue;
                }
            }
        };
        logging_information!(SystemEntry::WebReady);
        logging_information!(SystemEntry::Online);
        if let Err(err) = http_server.run().await {
            logging_emergency!(SystemEntry::WebPanic(err));
        }
    }

    pub async fn terminate(&self) {
        logging_information!(SystemEntry::Terminating);
        self.processor.terminate().await;
        logging_information!(SystemEntry::TerminateComplete);
    }
}
