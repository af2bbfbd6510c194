mod config;
mod services;

use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use clap::Parser;
use config::HostConfig;
use env_logger::Env;
use include_dir::{include_dir, Dir};
use log::{info, warn};
use mime_guess::from_path;
use std::thread;
use std::time::Duration;

static STATIC_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/static/dist");

/// Maps a request path onto a file of the embedded bundle.
fn asset_path(request_path: &str) -> &str {
    let path = request_path.trim_start_matches('/');
    if path.is_empty() {
        "index.html"
    } else {
        path
    }
}

async fn serve_embedded(req: HttpRequest) -> HttpResponse {
    let file_path = asset_path(req.path());

    match STATIC_DIR.get_file(file_path) {
        Some(file) => {
            let mime = from_path(file_path).first_or_octet_stream();
            HttpResponse::Ok()
                .content_type(mime.as_ref())
                .body(file.contents().to_vec())
        }
        None => match STATIC_DIR.get_file("index.html") {
            Some(index) => HttpResponse::Ok()
                .content_type("text/html; charset=utf-8")
                .body(index.contents().to_vec()),
            None => HttpResponse::NotFound()
                .body("Frontend bundle not found; run `trunk build` in frontend/ and rebuild"),
        },
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let config = HostConfig::parse();
    env_logger::init_from_env(Env::default().default_filter_or("info"));
    let url = config.url();

    if STATIC_DIR.get_file("index.html").is_none() {
        warn!("no embedded frontend bundle; only the API routes will answer");
    }

    if !config.no_browser {
        let url = url.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(500));
            if let Err(err) = webbrowser::open(&url) {
                warn!("could not open a browser: {}", err);
            }
        });
    }

    let ui_config = web::Data::new(config.ui_config());
    info!("Server running at {}", url);
    info!("Ingestion backend: {}", ui_config.api_base_url);

    HttpServer::new(move || {
        App::new()
            .app_data(ui_config.clone())
            .service(services::ui_config::configure_routes())
            .default_service(web::route().to(serve_embedded))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
