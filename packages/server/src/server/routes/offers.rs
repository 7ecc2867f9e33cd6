use axum::{
    extract::{Multipart, State},
    Json,
};

use crate::common::AppError;
use crate::domains::offers::actions;
use crate::domains::offers::models::Offer;
use crate::server::app::AppState;

/// POST /offers — multipart upload of an offer image plus caption.
///
/// Expects a `file` part (the image) and an optional `caption` text part.
pub async fn upload_offer(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Offer>, AppError> {
    let mut filename: Option<String> = None;
    let mut bytes: Option<Vec<u8>> = None;
    let mut caption = String::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidArgument(format!("malformed multipart body: {e}")))?
    {
        let name = field.name().map(|s| s.to_string());
        match name.as_deref() {
            Some("file") => {
                filename = field.file_name().map(|s| s.to_string());
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::InvalidArgument(format!("unreadable upload: {e}")))?;
                bytes = Some(data.to_vec());
            }
            Some("caption") => {
                caption = field
                    .text()
                    .await
                    .map_err(|e| AppError::InvalidArgument(format!("unreadable caption: {e}")))?;
            }
            _ => {}
        }
    }

    let filename =
        filename.ok_or_else(|| AppError::InvalidArgument("missing file part".to_string()))?;
    let bytes =
        bytes.ok_or_else(|| AppError::InvalidArgument("missing file part".to_string()))?;

    let offer = actions::store_offer(&filename, &caption, &bytes, &state.deps).await?;
    Ok(Json(offer))
}

/// GET /offers — all uploaded offers.
pub async fn list_offers(State(state): State<AppState>) -> Result<Json<Vec<Offer>>, AppError> {
    let offers = actions::list_offers(&state.deps).await?;
    Ok(Json(offers))
}
