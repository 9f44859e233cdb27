//! Thin typed wrappers around the browser APIs the view needs.
//!
//! Everything is rendered from Rust, so the bridge is limited to network
//! fetches, the wall clock, animation frames and DOM measurements.

use anyhow::anyhow;
use chm_data::loader::Fetch;
use chm_viz::Viewport;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

/// Used before the window can be measured.
const FALLBACK_VIEWPORT: (f64, f64) = (1280.0, 800.0);

/// Fetches sources relative to the page with `window.fetch`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpFetch;

impl Fetch for HttpFetch {
    async fn fetch_text(&self, location: &str) -> anyhow::Result<String> {
        let window = web_sys::window().ok_or_else(|| anyhow!("no window"))?;
        let resp_val = JsFuture::from(window.fetch_with_str(location))
            .await
            .map_err(|e| anyhow!("fetch error: {e:?}"))?;
        let resp: Response = resp_val
            .dyn_into()
            .map_err(|_| anyhow!("not a Response"))?;
        if !resp.ok() {
            anyhow::bail!("HTTP {} for {}", resp.status(), location);
        }
        let text = JsFuture::from(resp.text().map_err(|e| anyhow!("{e:?}"))?)
            .await
            .map_err(|e| anyhow!("{e:?}"))?;
        text.as_string()
            .ok_or_else(|| anyhow!("body of {} is not text", location))
    }
}

/// Current window size in CSS pixels.
pub fn viewport() -> Viewport {
    let size = web_sys::window().and_then(|w| {
        let width = w.inner_width().ok()?.as_f64()?;
        let height = w.inner_height().ok()?.as_f64()?;
        Some((width, height))
    });
    let (width, height) = size.unwrap_or(FALLBACK_VIEWPORT);
    Viewport::new(width, height)
}

/// Milliseconds since the epoch; the clock every tween is scheduled on.
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// Resolve on the next animation frame and return the clock at that point.
pub async fn next_frame() -> f64 {
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        if let Some(window) = web_sys::window() {
            if window.request_animation_frame(&resolve).is_err() {
                log::warn!("[CHM] requestAnimationFrame failed");
            }
        }
    });
    if let Err(e) = JsFuture::from(promise).await {
        log::warn!("[CHM] animation frame rejected: {:?}", e);
    }
    now_ms()
}

/// Rendered width of the element with `id`, if it is mounted.
pub fn element_width(id: &str) -> Option<f64> {
    web_sys::window()?
        .document()?
        .get_element_by_id(id)
        .map(|el| el.get_bounding_client_rect().width())
}
