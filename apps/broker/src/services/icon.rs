use base64::Engine;
use image::imageops::FilterType;
use image::{GenericImageView, ImageFormat};
use notifier_model::Notification;
use tracing::{instrument, warn};

const TARGET_EDGE: u32 = 48;

/// Resolves `icon_href` into `icon_data`, fetching, decoding, downscaling
/// (never upscaling) to fit within 48x48 preserving aspect ratio, and
/// re-encoding as base64 PNG.
///
/// Any failure along the way is logged and `icon_href` is dropped either
/// way, since the broker must never propagate an unresolved href downstream;
/// icon normalization is a convenience, not something that should block
/// delivery.
#[instrument(skip(client, notification), fields(source = %notification.source))]
pub async fn normalize_icon_href(client: &reqwest::Client, notification: &mut Notification) {
    if notification.icon_data.is_some() {
        return;
    }
    let Some(href) = notification.icon_href.clone() else {
        return;
    };

    match fetch_and_normalize(client, &href).await {
        Ok(encoded) => {
            notification.icon_data = Some(encoded);
        }
        Err(reason) => {
            warn!(href = %href, reason, "icon normalization failed, dropping icon_href");
        }
    }
    notification.icon_href = None;
}

async fn fetch_and_normalize(client: &reqwest::Client, href: &str) -> Result<String, String> {
    let response = client
        .get(href)
        .send()
        .await
        .map_err(|e| format!("fetch failed: {e}"))?;
    let bytes = response
        .bytes()
        .await
        .map_err(|e| format!("failed to read body: {e}"))?;

    let image = image::load_from_memory(&bytes).map_err(|e| format!("decode failed: {e}"))?;

    let (width, height) = (image.width(), image.height());
    let resized = if width > TARGET_EDGE || height > TARGET_EDGE {
        image.resize(TARGET_EDGE, TARGET_EDGE, FilterType::Lanczos3)
    } else {
        image
    };

    let mut buffer = Vec::new();
    resized
        .write_to(&mut std::io::Cursor::new(&mut buffer), ImageFormat::Png)
        .map_err(|e| format!("encode failed: {e}"))?;

    Ok(base64::engine::general_purpose::STANDARD.encode(buffer))
}
