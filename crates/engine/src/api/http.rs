//! HTTP routes.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use orderly_domain::{
    ActivityLevel, ChainAlternative, CandidateResult, Coordinates, CostPreference, DomainError,
    ItineraryId, Page, PageRequest, RestaurantSuggestion, StopCount, StopDuration, SuggestionId,
    SuggestionRequest, TripRequest,
};
use serde::{Deserialize, Serialize};

use crate::app::App;
use crate::infrastructure::ports::RepoError;
use crate::use_cases::itinerary::ItineraryError;
use crate::use_cases::suggestion::SuggestError;

const WELCOME: &str = "Welcome to Orderly! Your API is running smoothly.";

const NO_SUGGESTION: &str = "We couldn't find a suitable restaurant that meets our quality \
     standards, even with a broader search. Please try different criteria.";

const NO_ITINERARY: &str = "Failed to generate a valid road trip plan. Please try again.";

const ITINERARY_FIELDS_REQUIRED: &str = "All fields (start, end, numberOfStops, stopDuration, \
     activity, costPreference, startCords, endCords) are required.";

const ITINERARY_INVALID_TAG: &str = "Invalid value for one of the input fields.";

const URL_REQUIRED: &str = "URL is required in the request body.";

/// Create all HTTP routes, served at the root and again under `/api`.
pub fn routes() -> Router<Arc<App>> {
    endpoints().nest("/api", endpoints())
}

fn endpoints() -> Router<Arc<App>> {
    Router::new()
        .route("/", get(welcome))
        .route("/health", get(health))
        .route("/suggest", post(suggest))
        .route("/suggestions", get(list_suggestions))
        .route("/itinerary", post(plan_itinerary))
        .route("/itineraries", get(list_itineraries))
        .route("/check-website", post(check_website))
}

async fn welcome() -> &'static str {
    WELCOME
}

async fn health() -> &'static str {
    "OK"
}

// =============================================================================
// Suggestions
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SuggestBody {
    lat: Option<f64>,
    lng: Option<f64>,
    dining_preference: Option<String>,
    distance: Option<String>,
    budget: Option<OneOrMany>,
    cuisine: Option<String>,
    email: Option<String>,
    include_chains: Option<bool>,
}

/// Budget arrives as a single tag or a list of tags.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    fn into_vec(self) -> Vec<String> {
        match self {
            Self::One(tag) => vec![tag],
            Self::Many(tags) => tags,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SuggestResponse {
    success: bool,
    restaurant: RestaurantSuggestion,
    #[serde(skip_serializing_if = "Option::is_none")]
    chain_alternatives: Option<Vec<ChainAlternative>>,
    suggestion_id: Option<SuggestionId>,
    persisted: bool,
}

async fn suggest(
    State(app): State<Arc<App>>,
    body: Result<Json<SuggestBody>, JsonRejection>,
) -> Result<Json<SuggestResponse>, ApiError> {
    let Json(body) = body?;
    let coordinates = Coordinates::from_parts(body.lat, body.lng)?;
    let request =
        SuggestionRequest::new(coordinates, body.cuisine.unwrap_or_default(), app.clock.now())?
            .with_budget(body.budget.map(OneOrMany::into_vec).unwrap_or_default())
            .with_dining_preference(body.dining_preference)
            .with_distance(body.distance)
            .with_include_chains(body.include_chains.unwrap_or(false))
            .with_email(body.email);

    let outcome = app.use_cases.suggestion.suggest.execute(&request).await?;

    let (restaurant, chain_alternatives) = match outcome.result {
        CandidateResult::Single(restaurant) => (restaurant, None),
        CandidateResult::Composite(composite) => (
            composite.main_suggestion,
            Some(composite.chain_alternatives),
        ),
        CandidateResult::Itinerary(_) => {
            return Err(ApiError::Internal(
                "suggestion run produced an itinerary".to_string(),
            ))
        }
    };

    Ok(Json(SuggestResponse {
        success: true,
        restaurant,
        chain_alternatives,
        suggestion_id: outcome.suggestion_id,
        persisted: outcome.suggestion_id.is_some(),
    }))
}

/// Raw pagination parameters; anything unparseable falls back to defaults.
#[derive(Debug, Default, Deserialize)]
struct ListParams {
    page: Option<String>,
    limit: Option<String>,
    email: Option<String>,
}

impl ListParams {
    fn page_request(&self) -> PageRequest {
        PageRequest::new(
            positive(self.page.as_deref()).unwrap_or(1),
            positive(self.limit.as_deref()).unwrap_or(PageRequest::DEFAULT_PAGE_SIZE),
        )
    }
}

fn positive(raw: Option<&str>) -> Option<u32> {
    raw.and_then(|s| s.trim().parse::<u32>().ok())
        .filter(|n| *n > 0)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ListResponse<T> {
    success: bool,
    data: Vec<T>,
    current_page: u32,
    total_pages: u64,
    total_count: u64,
    has_next_page: bool,
    has_prev_page: bool,
    limit: u32,
}

impl<T> From<Page<T>> for ListResponse<T> {
    fn from(page: Page<T>) -> Self {
        Self {
            success: true,
            current_page: page.request.page(),
            total_pages: page.total_pages(),
            total_count: page.total_count,
            has_next_page: page.has_next(),
            has_prev_page: page.has_prev(),
            limit: page.request.page_size(),
            data: page.items,
        }
    }
}

async fn list_suggestions(
    State(app): State<Arc<App>>,
    Query(params): Query<ListParams>,
) -> Result<Json<ListResponse<orderly_domain::SuggestionRecord>>, ApiError> {
    let page = app
        .use_cases
        .suggestion
        .list
        .execute(params.email.clone(), params.page_request())
        .await?;
    Ok(Json(page.into()))
}

// =============================================================================
// Itineraries
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItineraryBody {
    start: Option<String>,
    end: Option<String>,
    number_of_stops: Option<String>,
    stop_duration: Option<String>,
    activity: Option<String>,
    cost_preference: Option<String>,
    start_cords: Option<CoordsBody>,
    end_cords: Option<CoordsBody>,
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CoordsBody {
    lat: Option<f64>,
    lng: Option<f64>,
}

impl ItineraryBody {
    fn into_trip(self, requested_at: chrono::DateTime<chrono::Utc>) -> Result<TripRequest, ApiError> {
        let required = || ApiError::BadRequest(ITINERARY_FIELDS_REQUIRED.to_string());
        let text = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

        let start = text(self.start).ok_or_else(required)?;
        let end = text(self.end).ok_or_else(required)?;
        let stops = text(self.number_of_stops).ok_or_else(required)?;
        let duration = text(self.stop_duration).ok_or_else(required)?;
        let activity = text(self.activity).ok_or_else(required)?;
        let cost = text(self.cost_preference).ok_or_else(required)?;
        let start_cords = self.start_cords.ok_or_else(required)?;
        let end_cords = self.end_cords.ok_or_else(required)?;

        let invalid = |_: DomainError| ApiError::BadRequest(ITINERARY_INVALID_TAG.to_string());
        let stop_count: StopCount = stops.parse().map_err(invalid)?;
        let stop_duration: StopDuration = duration.parse().map_err(invalid)?;
        let activity: ActivityLevel = activity.parse().map_err(invalid)?;
        let cost: CostPreference = cost.parse().map_err(invalid)?;

        let start_coords = Coordinates::from_parts(start_cords.lat, start_cords.lng)?;
        let end_coords = Coordinates::from_parts(end_cords.lat, end_cords.lng)?;

        Ok(TripRequest::new(
            start,
            end,
            start_coords,
            end_coords,
            stop_count,
            stop_duration,
            activity,
            cost,
            requested_at,
        )?
        .with_email(self.email))
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ItineraryResponse {
    success: bool,
    data: CandidateResult,
    itinerary_id: Option<ItineraryId>,
    persisted: bool,
}

async fn plan_itinerary(
    State(app): State<Arc<App>>,
    body: Result<Json<ItineraryBody>, JsonRejection>,
) -> Result<Json<ItineraryResponse>, ApiError> {
    let Json(body) = body?;
    let trip = body.into_trip(app.clock.now())?;

    let outcome = app.use_cases.itinerary.plan.execute(&trip).await?;

    Ok(Json(ItineraryResponse {
        success: true,
        data: outcome.result,
        itinerary_id: outcome.itinerary_id,
        persisted: outcome.itinerary_id.is_some(),
    }))
}

async fn list_itineraries(
    State(app): State<Arc<App>>,
    Query(params): Query<ListParams>,
) -> Result<Json<ListResponse<orderly_domain::ItineraryRecord>>, ApiError> {
    let page = app
        .use_cases
        .itinerary
        .list
        .execute(params.email.clone(), params.page_request())
        .await?;
    Ok(Json(page.into()))
}

// =============================================================================
// Website liveness
// =============================================================================

#[derive(Debug, Deserialize)]
struct CheckWebsiteBody {
    url: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CheckWebsiteResponse {
    success: bool,
    url: String,
    is_active: bool,
}

async fn check_website(
    State(app): State<Arc<App>>,
    body: Result<Json<CheckWebsiteBody>, JsonRejection>,
) -> Result<Json<CheckWebsiteResponse>, ApiError> {
    let Json(body) = body?;
    let url = body
        .url
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest(URL_REQUIRED.to_string()))?;

    let is_active = app.use_cases.website.execute(&url).await;
    Ok(Json(CheckWebsiteResponse {
        success: true,
        url,
        is_active,
    }))
}

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    /// Generation failed; the message is shown to the caller.
    Upstream(String),
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    success: bool,
    message: &'a str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.as_str()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.as_str()),
            ApiError::Upstream(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.as_str()),
            ApiError::Internal(detail) => {
                tracing::error!(error = %detail, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error")
            }
        };
        (
            status,
            Json(ErrorBody {
                success: false,
                message,
            }),
        )
            .into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Validation(msg) | DomainError::Parse(msg) => ApiError::BadRequest(msg),
            DomainError::InvalidId(msg) => ApiError::BadRequest(msg),
        }
    }
}

impl From<SuggestError> for ApiError {
    fn from(e: SuggestError) -> Self {
        match e {
            SuggestError::Exhausted(_) => ApiError::NotFound(NO_SUGGESTION.to_string()),
        }
    }
}

impl From<ItineraryError> for ApiError {
    fn from(e: ItineraryError) -> Self {
        match e {
            ItineraryError::Exhausted(_) => ApiError::Upstream(NO_ITINERARY.to_string()),
        }
    }
}

impl From<RepoError> for ApiError {
    fn from(e: RepoError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::Request;
    use orderly_domain::ResolvedLocation;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::app::AppDependencies;
    use crate::infrastructure::clock::{FixedClock, TickingClock};
    use crate::infrastructure::ledger::SqliteLedger;
    use crate::infrastructure::ports::{
        BackendId, GenerationBackend, MockGeocoderPort, MockLivenessPort, SuggestionLedger,
    };
    use crate::test_fixtures::backends::{CallLog, ScriptedBackend};
    use crate::test_fixtures::{instant, replies, requests};
    use crate::use_cases::generation::{FallbackController, RelaxationPolicy};

    struct Harness {
        router: Router,
        ledger: Arc<SqliteLedger>,
        log: CallLog,
    }

    struct Script {
        suggestion: Vec<&'static str>,
        itinerary: Vec<String>,
        reachable: bool,
    }

    impl Default for Script {
        fn default() -> Self {
            Self {
                suggestion: Vec::new(),
                itinerary: Vec::new(),
                reachable: true,
            }
        }
    }

    async fn harness(script: Script) -> Harness {
        let log = CallLog::default();

        let mut suggestion_backend = ScriptedBackend::new(BackendId::Gemini, &log);
        for reply in script.suggestion {
            suggestion_backend = suggestion_backend.reply(reply);
        }
        let mut itinerary_backend = ScriptedBackend::new(BackendId::Groq, &log);
        for reply in script.itinerary {
            itinerary_backend = itinerary_backend.reply(reply);
        }

        let controller = |backend: Arc<dyn GenerationBackend>, policy| {
            Arc::new(FallbackController::new(
                vec![backend],
                policy,
                Duration::from_secs(5),
            ))
        };

        let mut geocoder = MockGeocoderPort::new();
        geocoder.expect_reverse().returning(|_| {
            Ok(ResolvedLocation::new(
                Some("New York".into()),
                Some("United States".into()),
            ))
        });
        let mut liveness = MockLivenessPort::new();
        let reachable = script.reachable;
        liveness
            .expect_is_reachable()
            .returning(move |_| reachable);

        let ledger = Arc::new(
            SqliteLedger::in_memory(Arc::new(TickingClock::starting_at(instant())))
                .await
                .unwrap(),
        );

        let app = Arc::new(App::new(AppDependencies {
            suggestion_controller: controller(
                suggestion_backend.shared(),
                RelaxationPolicy::StrictThenRelaxed,
            ),
            itinerary_controller: controller(
                itinerary_backend.shared(),
                RelaxationPolicy::SingleAttempt,
            ),
            geocoder: Arc::new(geocoder),
            liveness: Arc::new(liveness),
            suggestion_ledger: ledger.clone(),
            itinerary_ledger: ledger.clone(),
            clock: Arc::new(FixedClock(instant())),
        }));

        Harness {
            router: routes().with_state(app),
            ledger,
            log,
        }
    }

    async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
        (status, body)
    }

    fn post(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn suggestion_count(ledger: &SqliteLedger) -> u64 {
        SuggestionLedger::list(ledger, None, PageRequest::default())
            .await
            .unwrap()
            .total_count
    }

    fn trip_body() -> Value {
        json!({
            "start": "New York, NY",
            "end": "Boston, MA",
            "numberOfStops": "few",
            "stopDuration": "short",
            "activity": "light",
            "costPreference": "free",
            "startCords": { "lat": 40.7128, "lng": -74.006 },
            "endCords": { "lat": 42.3601, "lng": -71.0589 }
        })
    }

    #[tokio::test]
    async fn suggest_end_to_end() {
        let h = harness(Script {
            suggestion: vec![replies::TRATTORIA],
            ..Default::default()
        })
        .await;

        let (status, body) = send(
            &h.router,
            post("/suggest", json!({ "lat": 40.7, "lng": -74.0, "cuisine": "Italian" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["restaurant"]["name"], "Trattoria X");
        assert_eq!(body["restaurant"]["address"], "1 Main St");
        assert!(!body["suggestionId"].as_str().unwrap().is_empty());
        assert_eq!(body["persisted"], true);
        assert!(body.get("chainAlternatives").is_none());
        assert_eq!(suggestion_count(&h.ledger).await, 1);
        assert_eq!(h.log.len(), 1);
    }

    #[tokio::test]
    async fn missing_cuisine_is_rejected_before_any_backend_call() {
        let h = harness(Script {
            suggestion: vec![replies::TRATTORIA],
            ..Default::default()
        })
        .await;

        let (status, body) =
            send(&h.router, post("/suggest", json!({ "lat": 40.7, "lng": -74.0 }))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert!(h.log.is_empty());
        assert_eq!(suggestion_count(&h.ledger).await, 0);
    }

    #[tokio::test]
    async fn missing_coordinates_are_rejected() {
        let h = harness(Script::default()).await;

        let (status, _) =
            send(&h.router, post("/suggest", json!({ "lat": 40.7, "cuisine": "Thai" }))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(h.log.is_empty());
    }

    #[tokio::test]
    async fn malformed_body_is_bad_request() {
        let h = harness(Script::default()).await;
        let request = Request::builder()
            .method("POST")
            .uri("/suggest")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let (status, body) = send(&h.router, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn exhausted_suggestion_is_not_found() {
        let h = harness(Script {
            suggestion: vec!["I could not find one.", "{\"name\":\"Nameless\"}"],
            ..Default::default()
        })
        .await;

        let (status, body) = send(
            &h.router,
            post("/suggest", json!({ "lat": 40.7, "lng": -74.0, "cuisine": "Italian" })),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], NO_SUGGESTION);
        assert_eq!(h.log.len(), 2);
        assert_eq!(suggestion_count(&h.ledger).await, 0);
    }

    #[tokio::test]
    async fn chains_split_primary_and_alternatives() {
        let h = harness(Script {
            suggestion: vec![replies::COMPOSITE],
            ..Default::default()
        })
        .await;

        let (status, body) = send(
            &h.router,
            post(
                "/api/suggest",
                json!({
                    "lat": 40.7,
                    "lng": -74.0,
                    "cuisine": "Italian",
                    "budget": "$$",
                    "includeChains": true
                }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["restaurant"]["name"], "Trattoria X");
        assert_eq!(body["chainAlternatives"][0]["name"], "Olive Garden");
        assert!(h.log.prompts()[0].contains("- Budget: $$"));
    }

    #[tokio::test]
    async fn suggestions_paginate() {
        let h = harness(Script::default()).await;
        let request = requests::italian_in_new_york();
        let location = ResolvedLocation::unknown();
        for i in 0..25 {
            let result = CandidateResult::Single(RestaurantSuggestion {
                name: format!("R{i}"),
                address: "1 Main St".into(),
                ..Default::default()
            });
            SuggestionLedger::record(h.ledger.as_ref(), &request, &location, &result)
                .await
                .unwrap();
        }

        let (status, body) = send(&h.router, get("/suggestions?page=3&limit=10")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().unwrap().len(), 5);
        assert_eq!(body["currentPage"], 3);
        assert_eq!(body["totalPages"], 3);
        assert_eq!(body["totalCount"], 25);
        assert_eq!(body["hasNextPage"], false);
        assert_eq!(body["hasPrevPage"], true);
        assert_eq!(body["limit"], 10);
        assert_eq!(body["data"][4]["result"]["name"], "R0");
        assert_eq!(body["data"][0]["email"], orderly_domain::ANONYMOUS_EMAIL);
    }

    #[tokio::test]
    async fn unparseable_pagination_uses_defaults() {
        let h = harness(Script::default()).await;

        let (status, body) = send(&h.router, get("/api/suggestions?page=abc&limit=-5")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["currentPage"], 1);
        assert_eq!(body["limit"], 10);
        assert_eq!(body["totalPages"], 0);
        assert_eq!(body["hasNextPage"], false);
    }

    #[tokio::test]
    async fn itinerary_end_to_end() {
        let h = harness(Script {
            itinerary: vec![replies::itinerary(&[("Mystic Seaport", 20), ("Newport", 30)])],
            ..Default::default()
        })
        .await;

        let (status, body) = send(&h.router, post("/itinerary", trip_body())).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["stops"][1]["detour_time_minutes"], 30.0);
        assert_eq!(body["persisted"], true);

        let (_, listed) = send(&h.router, get("/itineraries")).await;
        assert_eq!(listed["totalCount"], 1);
        assert_eq!(listed["data"][0]["requestDetails"]["numberOfStops"], "few");
    }

    #[tokio::test]
    async fn itinerary_rejects_unknown_tag() {
        let h = harness(Script::default()).await;
        let mut body = trip_body();
        body["activity"] = json!("extreme");

        let (status, response) = send(&h.router, post("/itinerary", body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response["message"], ITINERARY_INVALID_TAG);
        assert!(h.log.is_empty());
    }

    #[tokio::test]
    async fn itinerary_requires_every_field() {
        let h = harness(Script::default()).await;
        let mut body = trip_body();
        body.as_object_mut().unwrap().remove("endCords");

        let (status, response) = send(&h.router, post("/itinerary", body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response["message"], ITINERARY_FIELDS_REQUIRED);
    }

    #[tokio::test]
    async fn exhausted_itinerary_is_server_error() {
        let h = harness(Script {
            itinerary: vec![replies::itinerary(&[("Falls", 31)])],
            ..Default::default()
        })
        .await;

        let (status, body) = send(&h.router, post("/itinerary", trip_body())).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], NO_ITINERARY);
        assert_eq!(h.log.len(), 1);
    }

    #[tokio::test]
    async fn check_website_requires_url() {
        let h = harness(Script::default()).await;

        let (status, body) = send(&h.router, post("/check-website", json!({}))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], URL_REQUIRED);
    }

    #[tokio::test]
    async fn check_website_reports_probe_result() {
        let h = harness(Script {
            reachable: false,
            ..Default::default()
        })
        .await;

        let (status, body) = send(
            &h.router,
            post("/check-website", json!({ "url": "https://example.com" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["url"], "https://example.com");
        assert_eq!(body["isActive"], false);
    }

    #[tokio::test]
    async fn banner_and_health() {
        let h = harness(Script::default()).await;

        let (status, body) = send(&h.router, get("/")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, Value::String(WELCOME.to_string()));

        let (status, body) = send(&h.router, get("/api/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, Value::String("OK".to_string()));
    }
}
