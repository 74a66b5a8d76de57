//! REST API for the container loading calculator.
//!
//! Provides HTTP endpoints for the dashboard's loading form.
//! Uses Axum as the web framework and supports CORS.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::{
    Router,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
#[allow(unused_imports)]
use serde_json::json;
use std::sync::OnceLock;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use utoipa::{OpenApi, ToSchema};

use crate::config::{ApiConfig, PlannerConfig};
use crate::model::{
    Arrangement, BoxDimensions, ContainerDims, Extent, StandardContainer, ValidationError,
};
use crate::optimizer::{ContainerComparison, LoadPlan, compare_standard_containers, plan_loading};

/// Shared, immutable handler state.
#[derive(Clone, Debug, Default)]
pub struct ApiState {
    planner_config: PlannerConfig,
}

impl ApiState {
    pub fn new(planner_config: PlannerConfig) -> Self {
        Self { planner_config }
    }
}

static OPENAPI_DOC: OnceLock<utoipa::openapi::OpenApi> = OnceLock::new();

const SWAGGER_UI_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
    <head>
        <meta charset="utf-8" />
        <title>load-planner API Docs</title>
        <link
            rel="stylesheet"
            href="https://unpkg.com/swagger-ui-dist@5.17.14/swagger-ui.css"
            integrity="sha384-wxLW6kwyHktdDGr6Pv1zgm/VGJh99lfUbzSn6HNHBENZlCN7W602k9VkGdxuFvPn"
            crossorigin="anonymous"
        />
    </head>
    <body>
        <div id="swagger-ui"></div>
        <script
            src="https://unpkg.com/swagger-ui-dist@5.17.14/swagger-ui-bundle.js"
            integrity="sha384-wmyclcVGX/WhUkdkATwhaK1X1JtiNrr2EoYJ+diV3vj4v6OC5yCeSu+yW13SYJep"
            crossorigin="anonymous"
        ></script>
        <script>
            window.onload = function () {
                window.ui = SwaggerUIBundle({
                    url: "/docs/openapi.json",
                    dom_id: "#swagger-ui",
                });
            };
        </script>
    </body>
</html>"##;

fn openapi_doc() -> &'static utoipa::openapi::OpenApi {
    OPENAPI_DOC.get_or_init(ApiDoc::openapi)
}

/// Request structure for the arrangement endpoint.
///
/// `container` is a preset key (`20ft`, `40ft`, `40ft-hc`, `45ft-hc`) or
/// `custom`, in which case `custom_container` must carry the dimensions.
#[derive(Deserialize, Clone, ToSchema)]
#[schema(
    example = json!({
        "box": { "length": 40.0, "width": 30.0, "height": 25.0, "unit": "cm" },
        "container": "custom",
        "custom_container": { "length": 8.5, "width": 2.8, "height": 3.2 }
    })
)]
pub struct ArrangementRequest {
    #[serde(rename = "box")]
    pub box_dims: BoxDimensions,
    pub container: String,
    #[serde(default)]
    pub custom_container: Option<ContainerDims>,
    /// Overrides the server's unit policy for this request.
    #[serde(default)]
    #[schema(nullable = true)]
    pub strict_units: Option<bool>,
}

/// Request structure for comparing one box across all presets.
#[derive(Deserialize, Clone, ToSchema)]
#[schema(
    example = json!({
        "box": { "length": 60.0, "width": 40.0, "height": 40.0, "unit": "cm" }
    })
)]
pub struct CompareRequest {
    #[serde(rename = "box")]
    pub box_dims: BoxDimensions,
    #[serde(default)]
    #[schema(nullable = true)]
    pub strict_units: Option<bool>,
}

/// Ranked arrangements for one box and container.
///
/// An empty `arrangements` list is not an error; `reason_code` and `reason`
/// then explain why nothing fits.
#[derive(Serialize, ToSchema)]
pub struct ArrangementResponse {
    pub container: Option<ContainerDims>,
    pub arrangements: Vec<Arrangement>,
    pub best: Option<Arrangement>,
    pub reason_code: Option<String>,
    pub reason: Option<String>,
}

impl ArrangementResponse {
    pub fn from_load_plan(plan: LoadPlan) -> Self {
        let LoadPlan {
            container,
            arrangements,
            no_fit,
        } = plan;

        Self {
            container,
            best: arrangements.first().copied(),
            arrangements,
            reason_code: no_fit.map(|reason| reason.code().to_string()),
            reason: no_fit.map(|reason| reason.to_string()),
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct CompareResponse {
    pub comparisons: Vec<ComparisonEntry>,
}

/// Best arrangement of the box in one standard container.
#[derive(Serialize, ToSchema)]
pub struct ComparisonEntry {
    pub key: String,
    pub label: String,
    pub dims: ContainerDims,
    pub best: Option<Arrangement>,
    pub admissible_orientations: usize,
}

impl From<ContainerComparison> for ComparisonEntry {
    fn from(comparison: ContainerComparison) -> Self {
        let preset = comparison.container;
        Self {
            key: preset.key().to_string(),
            label: preset.label().to_string(),
            dims: preset.dims(),
            best: comparison.best,
            admissible_orientations: comparison.admissible_orientations,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct ContainerPreset {
    pub key: String,
    pub label: String,
    pub dims: ContainerDims,
}

#[derive(Serialize, ToSchema)]
pub struct ContainersResponse {
    pub containers: Vec<ContainerPreset>,
}

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Serialize, ToSchema)]
struct ErrorResponse {
    error: String,
    details: String,
}

impl ErrorResponse {
    fn new(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: details.into(),
        }
    }
}

fn error_response(
    status: StatusCode,
    error: impl Into<String>,
    details: impl Into<String>,
) -> Response {
    (status, Json(ErrorResponse::new(error, details))).into_response()
}

fn json_deserialize_error(err: JsonRejection) -> Response {
    error_response(
        StatusCode::UNPROCESSABLE_ENTITY,
        "Invalid JSON data",
        err.to_string(),
    )
}

fn validation_error(err: ValidationError) -> Response {
    error_response(
        StatusCode::UNPROCESSABLE_ENTITY,
        "Invalid input data",
        err.to_string(),
    )
}

/// Applies the unit policy: in strict mode unknown unit tags are rejected.
fn check_units(
    box_dims: &BoxDimensions,
    strict_override: Option<bool>,
    config: &PlannerConfig,
) -> Result<(), ValidationError> {
    if strict_override.unwrap_or(config.strict_units()) {
        box_dims.to_meters_strict()?;
    }
    Ok(())
}

#[derive(OpenApi)]
#[openapi(
    paths(handle_arrangements, handle_compare, handle_containers, handle_health),
    components(
        schemas(
            ArrangementRequest,
            ArrangementResponse,
            CompareRequest,
            CompareResponse,
            ComparisonEntry,
            ContainersResponse,
            ContainerPreset,
            HealthResponse,
            ErrorResponse,
            BoxDimensions,
            ContainerDims,
            Arrangement,
            Extent
        )
    ),
    tags((name = "loading", description = "Container loading calculations"))
)]
struct ApiDoc;

/// Builds the application router.
pub fn router(state: ApiState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    Router::new()
        .route("/arrangements", post(handle_arrangements))
        .route("/arrangements/compare", post(handle_compare))
        .route("/containers", get(handle_containers))
        .route("/health", get(handle_health))
        .route("/docs/openapi.json", get(serve_openapi_json))
        .route("/docs", get(serve_openapi_ui))
        .layer(cors)
        .with_state(state)
}

/// Binds the configured address and serves until the server stops.
pub async fn start_api_server(
    config: ApiConfig,
    planner_config: PlannerConfig,
) -> std::io::Result<()> {
    let app = router(ApiState::new(planner_config));

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!(
        "🚀 Server running on http://{}:{}",
        config.display_host(),
        config.port()
    );
    if config.binds_to_all_interfaces() {
        info!("💡 Local access: http://localhost:{}", config.port());
    }
    info!("📦 API endpoints: POST /arrangements, POST /arrangements/compare, GET /containers");
    info!("📑 Documentation: GET /docs, GET /docs/openapi.json");

    axum::serve(listener, app).await
}

/// Handler for POST /arrangements.
///
/// Ranks every admissible orientation of the box in the selected container.
#[utoipa::path(
    post,
    path = "/arrangements",
    request_body = ArrangementRequest,
    responses(
        (status = 200, description = "Ranked arrangements, possibly empty", body = ArrangementResponse),
        (
            status = UNPROCESSABLE_ENTITY,
            description = "Malformed request or unknown unit in strict mode",
            body = ErrorResponse
        )
    ),
    tag = "loading"
)]
async fn handle_arrangements(
    State(state): State<ApiState>,
    payload: Result<Json<ArrangementRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(err) => return json_deserialize_error(err),
    };

    if let Err(err) = check_units(&request.box_dims, request.strict_units, &state.planner_config)
    {
        return validation_error(err);
    }

    info!(
        "📥 New arrangement request: container '{}', box {}x{}x{} {}",
        request.container,
        request.box_dims.length,
        request.box_dims.width,
        request.box_dims.height,
        request.box_dims.length_unit()
    );

    let plan = plan_loading(
        &request.box_dims,
        &request.container,
        request.custom_container.as_ref(),
    );
    match (plan.best(), plan.no_fit) {
        (Some(best), _) => info!(
            "📦 Result: {} orientations, best {} boxes ({:.1}%)",
            plan.arrangements.len(),
            best.total_boxes,
            best.efficiency
        ),
        (None, reason) => info!(
            "📦 Result: no arrangement ({})",
            reason.map(|r| r.code()).unwrap_or("unknown")
        ),
    }

    (StatusCode::OK, Json(ArrangementResponse::from_load_plan(plan))).into_response()
}

/// Handler for POST /arrangements/compare.
///
/// Reports the best arrangement of the box in every standard container.
#[utoipa::path(
    post,
    path = "/arrangements/compare",
    request_body = CompareRequest,
    responses(
        (status = 200, description = "Best arrangement per standard container", body = CompareResponse),
        (
            status = UNPROCESSABLE_ENTITY,
            description = "Malformed request or unknown unit in strict mode",
            body = ErrorResponse
        )
    ),
    tag = "loading"
)]
async fn handle_compare(
    State(state): State<ApiState>,
    payload: Result<Json<CompareRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(err) => return json_deserialize_error(err),
    };

    if let Err(err) = check_units(&request.box_dims, request.strict_units, &state.planner_config)
    {
        return validation_error(err);
    }

    info!("📥 New comparison request across standard containers");
    let comparisons = compare_standard_containers(&request.box_dims)
        .into_iter()
        .map(ComparisonEntry::from)
        .collect();

    (StatusCode::OK, Json(CompareResponse { comparisons })).into_response()
}

/// Handler for GET /containers: the standard container catalog.
#[utoipa::path(
    get,
    path = "/containers",
    responses((status = 200, description = "Standard container presets", body = ContainersResponse)),
    tag = "loading"
)]
async fn handle_containers() -> Json<ContainersResponse> {
    let containers = StandardContainer::ALL
        .into_iter()
        .map(|preset| ContainerPreset {
            key: preset.key().to_string(),
            label: preset.label().to_string(),
            dims: preset.dims(),
        })
        .collect();
    Json(ContainersResponse { containers })
}

#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up", body = HealthResponse)),
    tag = "loading"
)]
async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn serve_openapi_json() -> impl IntoResponse {
    Json(openapi_doc())
}

async fn serve_openapi_ui() -> impl IntoResponse {
    Html(SWAGGER_UI_HTML)
}
