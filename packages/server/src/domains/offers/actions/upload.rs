//! Offer upload: persist the image bytes under the upload directory and
//! record the offer row pointing at the served path.

use anyhow::Context;
use tracing::info;

use crate::common::AppError;
use crate::domains::offers::models::Offer;
use crate::kernel::ServerDeps;

/// Store an uploaded offer image and its caption.
///
/// Files keep the name they were uploaded with, so a re-upload under the
/// same name overwrites the previous image. Path separators are rejected so
/// a crafted filename cannot escape the upload directory.
pub async fn store_offer(
    filename: &str,
    caption: &str,
    bytes: &[u8],
    deps: &ServerDeps,
) -> Result<Offer, AppError> {
    if filename.is_empty() || filename.contains('/') || filename.contains("..") {
        return Err(AppError::InvalidArgument(
            "invalid upload filename".to_string(),
        ));
    }

    let path = deps.upload_dir.join(filename);
    tokio::fs::write(&path, bytes)
        .await
        .with_context(|| format!("failed to store upload at {}", path.display()))?;

    let url = format!("/uploads/{filename}");
    let offer = Offer::insert(filename, caption, &url, &deps.db_pool).await?;

    info!(offer_id = %offer.id, filename = %filename, "Offer uploaded");
    Ok(offer)
}

/// All offers. Empty store yields an empty list.
pub async fn list_offers(deps: &ServerDeps) -> Result<Vec<Offer>, AppError> {
    Ok(Offer::find_all(&deps.db_pool).await?)
}
