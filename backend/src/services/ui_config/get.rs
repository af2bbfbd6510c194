use actix_web::{web, HttpResponse, Responder};
use common::config::UiConfig;

pub async fn process(config: web::Data<UiConfig>) -> impl Responder {
    HttpResponse::Ok().json(config.get_ref())
}
