pub mod clock;
pub mod config;
pub mod grid;
pub mod input;
pub mod layout;
pub mod measure;
pub mod merge;
pub mod model;
pub mod svg;
pub mod window;

use wasm_bindgen::prelude::*;

use clock::{Clock, FixedClock};
use input::{BoardRequest, InputError};
use layout::{BoardEngine, BoardError, BoardLayout};
use svg::SvgRenderer;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Board(#[from] BoardError),
    #[error("Failed to encode layout: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Decode a JSON board request and lay it out.
///
/// A `now` pinned in the request takes precedence over `clock`.
pub fn layout_request(json: &str, clock: &dyn Clock) -> Result<BoardLayout, Error> {
    let request = BoardRequest::from_json(json)?;
    let window = request.window()?;
    let events = request.events()?;
    let pinned = request.pinned_now()?.map(FixedClock);
    let clock: &dyn Clock = match &pinned {
        Some(fixed) => fixed,
        None => clock,
    };

    let layout = BoardEngine::new(request.config)?.compose(
        &request.resources,
        &events,
        &request.overlays,
        &window,
        clock,
    )?;
    Ok(layout)
}

#[cfg(target_arch = "wasm32")]
fn browser_clock() -> FixedClock {
    use chrono::NaiveDate;

    let now = js_sys::Date::new_0();
    let instant = NaiveDate::from_ymd_opt(now.get_full_year() as i32, now.get_month() + 1, now.get_date())
        .and_then(|d| d.and_hms_opt(now.get_hours(), now.get_minutes(), now.get_seconds()))
        .unwrap_or_default();
    FixedClock(instant)
}

#[cfg(not(target_arch = "wasm32"))]
fn browser_clock() -> clock::SystemClock {
    clock::SystemClock
}

/// Initialize panic hook for better error messages in WASM
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();
}

/// Lay out a board request and return the layout as JSON
#[wasm_bindgen(js_name = "scheduleToLayout")]
pub fn schedule_to_layout(json: &str) -> Result<String, String> {
    let layout = layout_request(json, &browser_clock()).map_err(|e| e.to_string())?;
    serde_json::to_string(&layout).map_err(|e| Error::from(e).to_string())
}

/// Render a board request to SVG
#[wasm_bindgen(js_name = "scheduleToSvg")]
pub fn schedule_to_svg(json: &str) -> Result<String, String> {
    let layout = layout_request(json, &browser_clock()).map_err(|e| e.to_string())?;
    Ok(SvgRenderer::default().render(&layout))
}
