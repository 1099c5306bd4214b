// Handlers: version, upload, series, aggregate, intervals, ticks.
// Range queries select samples either by index (start/end, inclusive) or by
// elapsed seconds (startSeconds/endSeconds); indices win when both are given.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use super::AppState;
use crate::aggregation::{self, AggregationInterval};
use crate::csv_repo;
use crate::models::TimeScale;
use crate::scale;
use crate::series::Series;
use crate::timefmt;
use crate::version::{NAME, VERSION};

/// GET /version — returns service name and version (from Cargo.toml at build time).
pub(super) async fn version_handler() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "name": NAME,
        "version": VERSION,
    }))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RangeQuery {
    start: Option<usize>,
    end: Option<usize>,
    start_seconds: Option<i64>,
    end_seconds: Option<i64>,
}

fn select_range(series: &Series, range: &RangeQuery) -> Series {
    let start = range
        .start
        .or_else(|| range.start_seconds.map(|s| series.index_at_seconds(s)))
        .unwrap_or(0);
    let end = range
        .end
        .or_else(|| range.end_seconds.map(|s| series.index_at_seconds(s)))
        .unwrap_or_else(|| series.len().saturating_sub(1));
    series.slice(start, end)
}

fn no_data() -> Response {
    (
        StatusCode::NOT_FOUND,
        axum::Json(serde_json::json!({ "error": "no data uploaded" })),
    )
        .into_response()
}

/// POST /api/upload — CSV body; replaces any previously stored series.
pub(super) async fn upload_handler(State(state): State<AppState>, body: String) -> Response {
    let samples = match csv_repo::parse_csv(&body) {
        Ok(samples) => samples,
        Err(e) => {
            tracing::warn!(error = %e, "csv upload rejected");
            return (
                StatusCode::BAD_REQUEST,
                axum::Json(serde_json::json!({ "error": e.to_string() })),
            )
                .into_response();
        }
    };

    let series = Series::new(samples);
    let record_count = series.len();
    let total_seconds = series.total_seconds();
    let recommended = scale::recommended_interval(total_seconds as f64);

    *state.series.write().await = Some(series);
    tracing::info!(records = record_count, total_seconds, "csv upload stored");

    axum::Json(serde_json::json!({
        "recordCount": record_count,
        "totalSeconds": total_seconds,
        "recommendedInterval": recommended.as_str(),
    }))
    .into_response()
}

/// GET /api/series — raw samples of the selected range plus summary.
pub(super) async fn series_handler(
    State(state): State<AppState>,
    Query(range): Query<RangeQuery>,
) -> Response {
    let guard = state.series.read().await;
    let Some(series) = guard.as_ref() else {
        return no_data();
    };
    let view = select_range(series, &range);

    axum::Json(serde_json::json!({
        "summary": view.summary(),
        "samples": view.samples(),
    }))
    .into_response()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct AggregateQuery {
    interval: AggregationInterval,
    start: Option<usize>,
    end: Option<usize>,
    start_seconds: Option<i64>,
    end_seconds: Option<i64>,
}

impl AggregateQuery {
    fn range(&self) -> RangeQuery {
        RangeQuery {
            start: self.start,
            end: self.end,
            start_seconds: self.start_seconds,
            end_seconds: self.end_seconds,
        }
    }
}

/// GET /api/aggregate?interval=5min — aggregated records for the range.
pub(super) async fn aggregate_handler(
    State(state): State<AppState>,
    Query(query): Query<AggregateQuery>,
) -> Response {
    let guard = state.series.read().await;
    let Some(series) = guard.as_ref() else {
        return no_data();
    };
    let view = select_range(series, &query.range());

    let records = aggregation::aggregate_with_policy(
        view.samples(),
        query.interval,
        state.config.charting.nan_policy,
    );
    axum::Json(records).into_response()
}

/// GET /api/intervals — intervals usable for the range's duration, plus the
/// recommended default. The set is duration-dependent; selector UIs must read
/// it from here rather than hardcoding the ladder.
pub(super) async fn intervals_handler(
    State(state): State<AppState>,
    Query(range): Query<RangeQuery>,
) -> Response {
    let guard = state.series.read().await;
    let Some(series) = guard.as_ref() else {
        return no_data();
    };
    let view = select_range(series, &range);
    let total_seconds = view.total_seconds() as f64;

    let available: Vec<serde_json::Value> = scale::available_intervals(total_seconds)
        .iter()
        .map(|interval| {
            serde_json::json!({
                "name": interval.as_str(),
                "label": interval.label(),
                "seconds": interval.seconds(),
            })
        })
        .collect();

    axum::Json(serde_json::json!({
        "available": available,
        "recommended": scale::recommended_interval(total_seconds).as_str(),
    }))
    .into_response()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct TicksQuery {
    start: Option<usize>,
    end: Option<usize>,
    start_seconds: Option<i64>,
    end_seconds: Option<i64>,
    max_ticks: Option<usize>,
    /// Pinned axis scale; auto-detected from duration when absent.
    scale: Option<TimeScale>,
}

impl TicksQuery {
    fn range(&self) -> RangeQuery {
        RangeQuery {
            start: self.start,
            end: self.end,
            start_seconds: self.start_seconds,
            end_seconds: self.end_seconds,
        }
    }
}

/// GET /api/ticks — label stride, effective time scale, and tick labels for
/// the range.
pub(super) async fn ticks_handler(
    State(state): State<AppState>,
    Query(query): Query<TicksQuery>,
) -> Response {
    let guard = state.series.read().await;
    let Some(series) = guard.as_ref() else {
        return no_data();
    };
    let view = select_range(series, &query.range());
    let total_seconds = view.total_seconds();

    let max_ticks = query.max_ticks.unwrap_or(state.config.charting.max_ticks);
    let stride = scale::tick_interval(view.len(), total_seconds as f64, max_ticks);
    let effective_scale = query
        .scale
        .unwrap_or_else(|| scale::time_scale(total_seconds as f64));

    let ticks: Vec<serde_json::Value> = view
        .samples()
        .iter()
        .step_by(stride)
        .map(|sample| {
            let label = match query.scale {
                Some(pinned) => timefmt::format_scaled_label(sample.elapsed_seconds, pinned),
                None => timefmt::format_tick_label(sample.elapsed_seconds, total_seconds),
            };
            serde_json::json!({
                "index": sample.index,
                "seconds": sample.elapsed_seconds,
                "label": label,
            })
        })
        .collect();

    axum::Json(serde_json::json!({
        "tickInterval": stride,
        "timeScale": effective_scale,
        "ticks": ticks,
    }))
    .into_response()
}
