//! HTTP client for the ingestion backend.
//!
//! Every call takes a [`RequestContext`] carrying the base URL and the bearer
//! token, sends one request, and hands the status and body to the parsers in
//! `common::responses`. Transport failures become [`ApiError::Network`].

use common::config::{UiConfig, UI_CONFIG_PATH};
use common::error::ApiError;
use common::model::connection::ConnectionConfig;
use common::model::schema::TableSchema;
use common::requests::{
    columns_query, parts, Endpoint, ExportRequest, IngestRequest, LoginRequest, PreviewRequest,
    RequestContext, PREVIEW_LIMIT,
};
use common::responses::{self, LoginResponse};
use gloo_net::http::{Request, RequestBuilder, Response};
use serde_json::{Map, Value};
use wasm_bindgen::JsValue;
use web_sys::FormData;

fn network(err: impl std::fmt::Display) -> ApiError {
    ApiError::Network(err.to_string())
}

fn js_error(err: JsValue) -> ApiError {
    ApiError::Network(err.as_string().unwrap_or_else(|| format!("{:?}", err)))
}

/// Attaches the bearer token, if any.
fn authorize(builder: RequestBuilder, ctx: &RequestContext) -> RequestBuilder {
    match ctx.authorization() {
        Some(value) => builder.header("Authorization", &value),
        None => builder,
    }
}

fn post(ctx: &RequestContext, endpoint: Endpoint) -> RequestBuilder {
    authorize(Request::post(&ctx.url(endpoint)), ctx)
}

async fn send(request: Request) -> Result<Response, ApiError> {
    let url = request.url();
    let response = request.send().await.map_err(network)?;
    log::debug!("{} answered {}", url, response.status());
    Ok(response)
}

/// Sends `request` and returns the status with the body text.
async fn exchange(request: Request) -> Result<(u16, String), ApiError> {
    let response = send(request).await?;
    let status = response.status();
    let body = response.text().await.map_err(network)?;
    Ok((status, body))
}

/// Host-provided settings. Falls back to the defaults when the host does not
/// answer, e.g. when the bundle is served by `trunk serve`.
pub async fn load_ui_config() -> UiConfig {
    let response = match Request::get(UI_CONFIG_PATH).send().await {
        Ok(response) if response.ok() => response,
        Ok(response) => {
            log::info!("no ui config from host ({}), using defaults", response.status());
            return UiConfig::default();
        }
        Err(err) => {
            log::info!("no ui config from host ({}), using defaults", err);
            return UiConfig::default();
        }
    };
    match response.json::<UiConfig>().await {
        Ok(config) => UiConfig::new(config.api_base_url),
        Err(err) => {
            log::warn!("malformed ui config: {}", err);
            UiConfig::default()
        }
    }
}

pub async fn test_connection(
    ctx: &RequestContext,
    config: &ConnectionConfig,
) -> Result<(), ApiError> {
    let request = post(ctx, Endpoint::TestConnection)
        .json(config)
        .map_err(network)?;
    let (status, body) = exchange(request).await?;
    responses::parse_test_connection(status, &body)
}

pub async fn list_tables(
    ctx: &RequestContext,
    config: &ConnectionConfig,
) -> Result<Vec<String>, ApiError> {
    let request = post(ctx, Endpoint::Tables).json(config).map_err(network)?;
    let (status, body) = exchange(request).await?;
    responses::parse_tables(status, &body)
}

pub async fn describe_table(
    ctx: &RequestContext,
    config: &ConnectionConfig,
    table_name: &str,
) -> Result<TableSchema, ApiError> {
    let request = post(ctx, Endpoint::Columns)
        .query(columns_query(table_name))
        .json(config)
        .map_err(network)?;
    let (status, body) = exchange(request).await?;
    responses::parse_columns(status, &body)
}

pub async fn preview_rows(
    ctx: &RequestContext,
    request: &PreviewRequest,
) -> Result<Vec<Map<String, Value>>, ApiError> {
    let limit = PREVIEW_LIMIT.to_string();
    let request = post(ctx, Endpoint::Preview)
        .query([("limit", limit.as_str())])
        .json(request)
        .map_err(network)?;
    let (status, body) = exchange(request).await?;
    responses::parse_preview(status, &body)
}

fn ingest_form(request: &IngestRequest) -> Result<FormData, ApiError> {
    let config = request
        .config_json()
        .map_err(|err| ApiError::Decode(err.to_string()))?;
    let columns = request
        .columns_json()
        .map_err(|err| ApiError::Decode(err.to_string()))?;
    let file: web_sys::Blob =
        gloo_file::Blob::new_with_options(request.file_bytes.as_slice(), Some("text/csv")).into();

    let form = FormData::new().map_err(js_error)?;
    form.append_with_str(parts::CONFIG, &config).map_err(js_error)?;
    form.append_with_str(parts::TABLE_NAME, &request.table_name)
        .map_err(js_error)?;
    form.append_with_str(parts::COLUMNS, &columns).map_err(js_error)?;
    form.append_with_str(parts::DELIMITER, &request.delimiter.to_string())
        .map_err(js_error)?;
    form.append_with_blob_and_filename(parts::FILE, &file, &request.file_name)
        .map_err(js_error)?;
    Ok(form)
}

/// Uploads the file as multipart form data. Returns the ingested record count.
pub async fn ingest(ctx: &RequestContext, request: &IngestRequest) -> Result<u64, ApiError> {
    let form = ingest_form(request)?;
    let request = post(ctx, Endpoint::Ingest).body(form).map_err(network)?;
    let (status, body) = exchange(request).await?;
    responses::parse_ingest(status, &body)
}

/// Runs the export and returns the raw bytes of the produced file.
pub async fn export(ctx: &RequestContext, request: &ExportRequest) -> Result<Vec<u8>, ApiError> {
    let request = post(ctx, Endpoint::Export).json(request).map_err(network)?;
    let response = send(request).await?;
    let status = response.status();
    let bytes = response.binary().await.map_err(network)?;
    if responses::is_success(status) {
        Ok(bytes)
    } else {
        Err(responses::rejection(status, &String::from_utf8_lossy(&bytes)))
    }
}

pub async fn login(
    ctx: &RequestContext,
    request: &LoginRequest,
) -> Result<LoginResponse, ApiError> {
    let request = Request::post(&ctx.url(Endpoint::Login))
        .json(request)
        .map_err(network)?;
    let (status, body) = exchange(request).await?;
    responses::parse_login(status, &body)
}
