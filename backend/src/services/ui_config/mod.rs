//! Publishes the settings the browser application needs at start-up, so that
//! the backend address can be changed without rebuilding the bundle.

mod get;

use actix_web::web::{get, scope};
use actix_web::Scope;
use common::config::UI_CONFIG_PATH;

/// Registers `GET /api/ui-config`. Expects a `web::Data<UiConfig>` in the app.
pub fn configure_routes() -> Scope {
    scope(UI_CONFIG_PATH).route("", get().to(get::process))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, web, App};
    use common::config::UiConfig;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    #[actix_web::test]
    async fn serves_configured_base_url() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(UiConfig::new("http://ingest:8081/api/ingestion")))
                .service(configure_routes()),
        )
        .await;

        let req = test::TestRequest::get().uri(UI_CONFIG_PATH).to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, json!({ "apiBaseUrl": "http://ingest:8081/api/ingestion" }));
    }

    #[actix_web::test]
    async fn rejects_other_methods() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(UiConfig::default()))
                .service(configure_routes()),
        )
        .await;

        let req = test::TestRequest::post().uri(UI_CONFIG_PATH).to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_client_error());
    }
}
