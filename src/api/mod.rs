use axum::{
    Router,
    extract::{
        Json, Query,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{HeaderValue, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::config::{PARAMETER_BOUNDS, ParameterBounds, ScenarioArgs, build_inputs};
use crate::core::{Inputs, ScenarioResult, StrategyKind, YearSnapshot, run_comparison};

const INDEX_HTML: &str = include_str!("../../web/index.html");
const STYLES_CSS: &str = include_str!("../../web/styles.css");
const APP_JS: &str = include_str!("../../web/app.js");

/// Query or JSON body of `/api/simulate`. Missing fields fall back to the defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct SimulatePayload {
    deposit_years: Option<u32>,
    growth_years: Option<u32>,
    annual_deposit: Option<f64>,
    savings_rate: Option<f64>,
    growth_rate: Option<f64>,
    inflation_rate: Option<f64>,
    phase1_target: Option<f64>,
    phase1_years: Option<u32>,
    phase2_target: Option<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioResponse {
    strategy: StrategyKind,
    label: &'static str,
    total_deposits: f64,
    final_nominal: f64,
    final_real: f64,
    years: Vec<YearSnapshot>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulateResponse {
    inflation_rate: f64,
    scenarios: Vec<ScenarioResponse>,
}

#[derive(Debug, Serialize)]
struct ParametersResponse {
    parameters: &'static [ParameterBounds],
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = Router::new()
        .route("/", get(index_handler))
        .route("/index.html", get(index_handler))
        .route("/styles.css", get(styles_handler))
        .route("/app.js", get(app_js_handler))
        .route("/api/parameters", get(parameters_handler))
        .route(
            "/api/simulate",
            get(simulate_get_handler).post(simulate_post_handler),
        )
        .fallback(not_found_handler);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "dashboard listening");

    axum::serve(listener, app).await
}

async fn index_handler() -> impl IntoResponse {
    with_cache_control(Html(INDEX_HTML))
}

async fn styles_handler() -> impl IntoResponse {
    with_cache_control((
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        STYLES_CSS,
    ))
}

async fn app_js_handler() -> impl IntoResponse {
    with_cache_control((
        [(
            header::CONTENT_TYPE,
            "application/javascript; charset=utf-8",
        )],
        APP_JS,
    ))
}

async fn parameters_handler() -> Response {
    json_response(
        StatusCode::OK,
        ParametersResponse {
            parameters: &PARAMETER_BOUNDS,
        },
    )
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn simulate_get_handler(
    payload: Result<Query<SimulatePayload>, QueryRejection>,
) -> Response {
    match payload {
        Ok(Query(payload)) => simulate(payload),
        Err(rejection) => reject_payload(&rejection.body_text()),
    }
}

async fn simulate_post_handler(
    payload: Result<Json<SimulatePayload>, JsonRejection>,
) -> Response {
    match payload {
        Ok(Json(payload)) => simulate(payload),
        Err(rejection) => reject_payload(&rejection.body_text()),
    }
}

fn reject_payload(msg: &str) -> Response {
    tracing::warn!("malformed simulate request: {msg}");
    error_response(StatusCode::BAD_REQUEST, msg)
}

fn simulate(payload: SimulatePayload) -> Response {
    let inputs = match inputs_from_payload(payload) {
        Ok(inputs) => inputs,
        Err(msg) => {
            tracing::warn!("rejected simulate request: {msg}");
            return error_response(StatusCode::BAD_REQUEST, &msg);
        }
    };

    tracing::debug!(
        deposit_years = inputs.deposit_years,
        growth_years = inputs.growth_years,
        "simulate request"
    );
    let results = run_comparison(&inputs);
    json_response(StatusCode::OK, build_simulate_response(&inputs, results))
}

fn with_cache_control<R: IntoResponse>(response: R) -> Response {
    let mut response = response.into_response();
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    response
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    with_cache_control((status, Json(body)))
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

#[cfg(test)]
fn inputs_from_json(json: &str) -> Result<Inputs, String> {
    let payload = serde_json::from_str::<SimulatePayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    inputs_from_payload(payload)
}

fn inputs_from_payload(payload: SimulatePayload) -> Result<Inputs, String> {
    let mut args = ScenarioArgs::default();

    if let Some(v) = payload.deposit_years {
        args.deposit_years = v;
    }
    if let Some(v) = payload.growth_years {
        args.growth_years = v;
    }
    if let Some(v) = payload.annual_deposit {
        args.annual_deposit = v;
    }
    if let Some(v) = payload.savings_rate {
        args.savings_rate = v;
    }
    if let Some(v) = payload.growth_rate {
        args.growth_rate = v;
    }
    if let Some(v) = payload.inflation_rate {
        args.inflation_rate = v;
    }
    if let Some(v) = payload.phase1_target {
        args.phase1_target = v;
    }
    if let Some(v) = payload.phase1_years {
        args.phase1_years = v;
    }
    if let Some(v) = payload.phase2_target {
        args.phase2_target = v;
    }

    build_inputs(args).map_err(|e| e.to_string())
}

/// Response body shared by the HTTP API and `run --format json`.
pub fn build_simulate_response(inputs: &Inputs, results: Vec<ScenarioResult>) -> SimulateResponse {
    let scenarios = results
        .into_iter()
        .map(|result| ScenarioResponse {
            strategy: result.strategy,
            label: result.strategy.label(),
            total_deposits: result.total_deposits(),
            final_nominal: result.final_nominal(),
            final_real: result.final_real(),
            years: result.years,
        })
        .collect();

    SimulateResponse {
        inflation_rate: inputs.inflation_rate,
        scenarios,
    }
}
