//! Frame download and GIF assembly for the radar composite.

use crate::radar::error::RadarError;
use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, DynamicImage, Frame};
use log::{info, warn};
use reqwest::Client;
use std::path::Path;
use tokio::task;

/// Downloads and decodes every frame, skipping individual failures.
///
/// Partial success is acceptable; the caller decides what zero frames mean.
pub(crate) async fn download_frames(client: &Client, urls: &[String]) -> Vec<DynamicImage> {
    let mut frames = Vec::with_capacity(urls.len());
    for url in urls {
        match download_frame(client, url).await {
            Ok(frame) => frames.push(frame),
            Err(e) => warn!("Skipping radar frame {url}: {e}"),
        }
    }
    frames
}

async fn download_frame(client: &Client, url: &str) -> Result<DynamicImage, RadarError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| RadarError::NetworkRequest(url.to_string(), e))?;

    let response = match response.error_for_status() {
        Ok(resp) => resp,
        Err(e) => {
            return Err(if let Some(status) = e.status() {
                RadarError::HttpStatus {
                    url: url.to_string(),
                    status,
                    source: e,
                }
            } else {
                RadarError::NetworkRequest(url.to_string(), e)
            });
        }
    };

    let bytes = response
        .bytes()
        .await
        .map_err(|e| RadarError::NetworkRequest(url.to_string(), e))?;

    let url_owned = url.to_string();
    task::spawn_blocking(move || {
        image::load_from_memory(&bytes).map_err(|source| RadarError::ImageDecode {
            url: url_owned,
            source,
        })
    })
    .await?
}

/// Encodes frames into a looping GIF. Every frame displays for
/// `frame_duration_ms` except the last, which holds for `final_hold_ms` so a
/// viewer can tell where the loop restarts.
pub(crate) fn encode_gif(
    frames: &[DynamicImage],
    frame_duration_ms: u32,
    final_hold_ms: u32,
) -> Result<Vec<u8>, RadarError> {
    let mut buffer = Vec::new();
    {
        let mut encoder = GifEncoder::new(&mut buffer);
        encoder
            .set_repeat(Repeat::Infinite)
            .map_err(RadarError::GifEncode)?;

        let last = frames.len().saturating_sub(1);
        for (index, image) in frames.iter().enumerate() {
            let delay_ms = if index == last {
                final_hold_ms
            } else {
                frame_duration_ms
            };
            let frame = Frame::from_parts(
                image.to_rgba8(),
                0,
                0,
                Delay::from_numer_denom_ms(delay_ms, 1),
            );
            encoder.encode_frame(frame).map_err(RadarError::GifEncode)?;
        }
    }
    Ok(buffer)
}

/// Writes the composite animation to `output_path`, overwriting in place.
///
/// No-op on an empty frame set: the previous composite, if any, stays.
/// Returns the encoded bytes when a file was written.
pub(crate) fn composite(
    frames: &[DynamicImage],
    output_path: &Path,
    frame_duration_ms: u32,
    final_hold_ms: u32,
) -> Result<Option<Vec<u8>>, RadarError> {
    if frames.is_empty() {
        warn!("No radar frames to composite; previous animation left in place");
        return Ok(None);
    }

    let bytes = encode_gif(frames, frame_duration_ms, final_hold_ms)?;
    std::fs::write(output_path, &bytes).map_err(|source| RadarError::OutputIo {
        path: output_path.to_path_buf(),
        source,
    })?;
    info!(
        "Radar animation written to {} ({} frames, {} ms final hold)",
        output_path.display(),
        frames.len(),
        final_hold_ms
    );
    Ok(Some(bytes))
}
