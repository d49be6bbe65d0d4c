//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::FromRef,
    middleware,
    routing::{get, post, put},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::events::SharedEventBus;
use crate::application::services::{AlertService, PositionSimulator, TruckService};
use crate::domain::RepositoryProvider;
use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::interfaces::http::common::{ApiResponse, PaginatedResponse, PaginationParams};
use crate::interfaces::http::middleware::{auth_middleware, AuthState};
use crate::interfaces::http::modules::{
    alerts, auth, dashboard, fleet, health, metrics, monitoring, request_id, trucks,
};
use crate::interfaces::ws::{ws_notifications_handler, NotificationState, SharedClientRegistry};

/// Unified state for all fleet data routes (trucks + alerts + reference
/// data + dashboard + monitoring). Axum extracts the specific handler
/// state via `FromRef`.
#[derive(Clone)]
pub struct FleetUnifiedState {
    pub repos: Arc<dyn RepositoryProvider>,
    pub truck_service: Arc<TruckService>,
    pub alert_service: Arc<AlertService>,
    pub simulator: Option<Arc<PositionSimulator>>,
    pub clients: SharedClientRegistry,
    pub event_bus: SharedEventBus,
    pub auth: AuthState,
}

// -- FromRef implementations so each handler keeps its own State<T> extractor --

impl FromRef<FleetUnifiedState> for trucks::TrucksState {
    fn from_ref(s: &FleetUnifiedState) -> Self {
        trucks::TrucksState {
            service: Arc::clone(&s.truck_service),
        }
    }
}

impl FromRef<FleetUnifiedState> for alerts::AlertsState {
    fn from_ref(s: &FleetUnifiedState) -> Self {
        alerts::AlertsState {
            service: Arc::clone(&s.alert_service),
        }
    }
}

impl FromRef<FleetUnifiedState> for fleet::FleetState {
    fn from_ref(s: &FleetUnifiedState) -> Self {
        fleet::FleetState {
            repos: Arc::clone(&s.repos),
        }
    }
}

impl FromRef<FleetUnifiedState> for dashboard::DashboardState {
    fn from_ref(s: &FleetUnifiedState) -> Self {
        dashboard::DashboardState {
            service: Arc::clone(&s.truck_service),
        }
    }
}

impl FromRef<FleetUnifiedState> for monitoring::MonitoringState {
    fn from_ref(s: &FleetUnifiedState) -> Self {
        monitoring::MonitoringState {
            simulator: s.simulator.clone(),
            clients: s.clients.clone(),
            event_bus: s.event_bus.clone(),
        }
    }
}

impl FromRef<FleetUnifiedState> for AuthState {
    fn from_ref(s: &FleetUnifiedState) -> Self {
        s.auth.clone()
    }
}

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT Bearer token"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Auth
        auth::login,
        auth::register,
        auth::get_current_user,
        auth::change_password,
        // Trucks
        trucks::list_trucks,
        trucks::create_truck,
        trucks::get_truck,
        trucks::update_truck,
        trucks::set_truck_status,
        trucks::delete_truck,
        // Tires
        trucks::list_tires,
        trucks::get_tire,
        trucks::put_tire,
        // History
        trucks::truck_history,
        // Alerts
        alerts::list_alerts,
        alerts::create_alert,
        alerts::get_alert,
        alerts::resolve_alert,
        // Fleet reference data
        fleet::list_groups,
        fleet::list_models,
        fleet::list_drivers,
        // Dashboard
        dashboard::dashboard_stats,
        // Monitoring
        monitoring::get_simulator_stats,
        monitoring::get_gateway_stats,
    ),
    components(
        schemas(
            // Common
            ApiResponse<String>,
            PaginatedResponse<trucks::TruckDto>,
            PaginatedResponse<alerts::AlertDto>,
            PaginationParams,
            // Auth
            auth::LoginRequest,
            auth::LoginResponse,
            auth::RegisterRequest,
            auth::UserInfo,
            auth::ChangePasswordRequest,
            // Trucks
            trucks::TruckDto,
            trucks::TruckDetailDto,
            trucks::TireReadingDto,
            trucks::LocationSampleDto,
            trucks::CreateTruckRequest,
            trucks::UpdateTruckRequest,
            trucks::SetStatusRequest,
            trucks::RecordTireReadingRequest,
            // Alerts
            alerts::AlertDto,
            alerts::CreateAlertRequest,
            // Fleet reference data
            fleet::FleetGroupDto,
            fleet::TruckModelDto,
            fleet::DriverDto,
            // Dashboard
            dashboard::DashboardStatsDto,
            dashboard::OpenAlertCountsDto,
            // Monitoring
            monitoring::SimulatorStatsDto,
            monitoring::GatewayStatsDto,
            // Health
            health::HealthResponse,
            health::ComponentHealth,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Server health check endpoints"),
        (name = "Authentication", description = "User authentication: login (JWT), registration, password change"),
        (name = "Trucks", description = "Truck CRUD, status transitions and location history"),
        (name = "Tires", description = "Per-slot tire pressure and temperature readings (slots 1-6)"),
        (name = "Alerts", description = "Alert lifecycle: creation, listing, idempotent resolution"),
        (name = "Fleet", description = "Reference data: fleet groups, truck models, drivers"),
        (name = "Dashboard", description = "Aggregate fleet statistics for the dashboard"),
        (name = "Monitoring", description = "Runtime stats: telemetry simulator and WebSocket gateway"),
        (name = "WebSocket Notifications", description = "Real-time event streaming via WebSocket. Connect to `ws://host:port/api/v1/notifications/ws` with a bearer token (header or `?token=` query param), then subscribe to channels: `truck-updates`, `alerts`."),
    ),
    info(
        title = "Texnouz Fleet Telemetry API",
        version = "1.0.0",
        description = "REST API for the truck fleet telemetry backend",
        license(name = "MIT"),
        contact(name = "Texnouz", email = "support@texnouz.com")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
#[allow(clippy::too_many_arguments)]
pub fn create_api_router(
    repos: Arc<dyn RepositoryProvider>,
    truck_service: Arc<TruckService>,
    alert_service: Arc<AlertService>,
    simulator: Option<Arc<PositionSimulator>>,
    db: DatabaseConnection,
    jwt_config: JwtConfig,
    event_bus: SharedEventBus,
    clients: SharedClientRegistry,
    prometheus_handle: PrometheusHandle,
    started_at: Arc<Instant>,
) -> Router {
    let middleware_state = AuthState {
        jwt_config: jwt_config.clone(),
    };

    // ── Unified state for ALL fleet data routes ────────────────────
    let unified = FleetUnifiedState {
        repos,
        truck_service,
        alert_service,
        simulator,
        clients: clients.clone(),
        event_bus: event_bus.clone(),
        auth: middleware_state.clone(),
    };

    // A SINGLE router for every /api/v1/trucks/* route so Axum's
    // `matchit` sees every parametric segment in one tree.
    let truck_routes = Router::new()
        .route("/", get(trucks::list_trucks).post(trucks::create_truck))
        .route(
            "/{truck_id}",
            get(trucks::get_truck)
                .put(trucks::update_truck)
                .delete(trucks::delete_truck),
        )
        .route("/{truck_id}/status", put(trucks::set_truck_status))
        // --- Tires ---
        .route("/{truck_id}/tires", get(trucks::list_tires))
        .route(
            "/{truck_id}/tires/{slot}",
            get(trucks::get_tire).put(trucks::put_tire),
        )
        // --- Location history ---
        .route("/{truck_id}/history", get(trucks::truck_history))
        // auth middleware + unified state
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(unified.clone());

    // Alert routes (protected)
    let alert_routes = Router::new()
        .route("/", get(alerts::list_alerts).post(alerts::create_alert))
        .route("/{alert_id}", get(alerts::get_alert))
        .route("/{alert_id}/resolve", post(alerts::resolve_alert))
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(unified.clone());

    // Fleet reference data routes (protected)
    let fleet_routes = Router::new()
        .route("/groups", get(fleet::list_groups))
        .route("/models", get(fleet::list_models))
        .route("/drivers", get(fleet::list_drivers))
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(unified.clone());

    // Dashboard routes (protected)
    let dashboard_routes = Router::new()
        .route("/stats", get(dashboard::dashboard_stats))
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(unified.clone());

    // Monitoring routes (protected)
    let monitoring_routes = Router::new()
        .route("/simulator", get(monitoring::get_simulator_stats))
        .route("/gateway", get(monitoring::get_gateway_stats))
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(unified);

    // ── Other states / routers ─────────────────────────────────────

    let auth_state = auth::AuthHandlerState {
        db: db.clone(),
        jwt_config: jwt_config.clone(),
    };

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Auth routes (public)
    let auth_routes = Router::new()
        .route("/login", post(auth::login))
        .route("/register", post(auth::register))
        .with_state(auth_state.clone());

    // Auth routes (protected)
    let auth_protected_routes = Router::new()
        .route("/me", get(auth::get_current_user))
        .route("/change-password", put(auth::change_password))
        .layer(middleware::from_fn_with_state(
            middleware_state,
            auth_middleware,
        ))
        .with_state(auth_state);

    // Health route (public)
    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .with_state(health::HealthState {
            db,
            clients: clients.clone(),
            started_at,
        });

    // Prometheus scrape route (public)
    let metrics_routes = Router::new()
        .route("/metrics", get(metrics::prometheus_metrics))
        .with_state(metrics::MetricsState {
            handle: prometheus_handle,
        });

    // Notification WebSocket routes (bearer check happens in the handshake)
    let notification_state = NotificationState {
        event_bus,
        clients,
        jwt_config,
    };
    let notification_routes = Router::new()
        .route("/ws", get(ws_notifications_handler))
        .with_state(notification_state);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    // Build router
    Router::new()
        // Swagger UI
        .merge(swagger_routes)
        // Health + metrics
        .merge(health_routes)
        .merge(metrics_routes)
        // Auth
        .nest("/api/v1/auth", auth_routes)
        .nest("/api/v1/auth", auth_protected_routes)
        // Trucks (tires + history live under the same tree)
        .nest("/api/v1/trucks", truck_routes)
        // Alerts
        .nest("/api/v1/alerts", alert_routes)
        // Fleet reference data
        .nest("/api/v1/fleet", fleet_routes)
        // Dashboard
        .nest("/api/v1/dashboard", dashboard_routes)
        // Monitoring
        .nest("/api/v1/monitoring", monitoring_routes)
        // Notifications WebSocket
        .nest("/api/v1/notifications", notification_routes)
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(metrics::http_metrics_middleware))
        .layer(middleware::from_fn(request_id::request_id_middleware))
}
