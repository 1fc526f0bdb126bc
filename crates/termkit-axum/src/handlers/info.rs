//! Hub status endpoint.

use axum::Json;
use axum::extract::State;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use qrcode::QrCode;
use qrcode::render::svg;
use serde::Serialize;

use crate::error::HttpError;
use crate::net;
use crate::state::AppState;

/// Edge length in pixels of the rendered share code.
const QR_SIZE: u32 = 200;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InfoResponse {
    pub url: String,
    pub local_url: String,
    /// `data:` URL of an SVG QR code encoding `url`.
    pub qr_code: String,
    pub connected_clients: usize,
    pub uploaded_files: usize,
}

pub async fn get(State(state): State<AppState>) -> Result<Json<InfoResponse>, HttpError> {
    let uploaded_files = state.uploads.count().await?;
    let url = net::network_url(state.port);
    let qr_code = qr_data_url(&url)?;
    Ok(Json(InfoResponse {
        url,
        local_url: net::local_url(state.port),
        qr_code,
        connected_clients: state.sse.subscriber_count(),
        uploaded_files,
    }))
}

/// Render `text` as a QR code and wrap the SVG in a base64 `data:` URL.
pub fn qr_data_url(text: &str) -> Result<String, HttpError> {
    let code = QrCode::new(text.as_bytes())
        .map_err(|e| HttpError::Internal(format!("Failed to generate QR code: {e}")))?;
    let image = code
        .render::<svg::Color>()
        .min_dimensions(QR_SIZE, QR_SIZE)
        .build();
    Ok(format!(
        "data:image/svg+xml;base64,{}",
        STANDARD.encode(image)
    ))
}
