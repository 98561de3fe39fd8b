use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer, Result as ActixResult};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::error;
use wander_core::{
    Catalog, Destination, Error as CoreError, Query, Recommendation, Recommender, User,
};

/// Error kinds the REST surface exposes. Every handler funnels failures
/// through [`ApiError::to_response`], so status mapping and logging happen
/// exactly once per request.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request shape problems: 400 with the message in the body.
    #[error("{0}")]
    Validation(String),
    /// Lookup misses on the detail endpoints: 404 with the message.
    #[error("{0}")]
    NotFound(String),
    /// Anything unexpected: logged in full, surfaced as a generic 500.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    fn validation(msg: &str) -> Self {
        Self::Validation(msg.to_string())
    }

    fn to_response(&self) -> HttpResponse {
        match self {
            ApiError::Validation(msg) => {
                HttpResponse::BadRequest().json(json!({ "error": msg }))
            }
            ApiError::NotFound(msg) => HttpResponse::NotFound().json(json!({ "error": msg })),
            ApiError::Internal(detail) => {
                error!("Request failed: {}", detail);
                HttpResponse::InternalServerError().json(json!({ "error": "Internal error" }))
            }
        }
    }
}

/// Catalog misses keep their fixed lookup messages; any other core error
/// reaching this boundary is unexpected.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::DestinationNotFound(_) => {
                Self::NotFound("Destination not found".to_string())
            }
            CoreError::UserNotFound(_) => Self::NotFound("User not found".to_string()),
            other => Self::Internal(other.to_string()),
        }
    }
}

/// Shared handler state: the catalog for lookups plus the recommender
/// built over it.
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub recommender: Recommender,
}

#[derive(Deserialize)]
struct DestinationDetailsParams {
    name: Option<String>,
}

#[derive(Deserialize)]
struct UserDetailsParams {
    id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct DestinationDetails {
    district: String,
    state: String,
    category: String,
    best_time_to_visit: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct UserDetails {
    name: String,
    gender: String,
    location: String,
    travel_preferences: String,
    number_of_adults: u32,
    number_of_children: u32,
}

#[derive(Deserialize)]
struct RecommendationRequest {
    /// "destination", "user", or "custom"
    #[serde(rename = "type")]
    kind: Option<String>,
    destination: Option<String>,
    /// String or number; ids compare as strings either way
    #[serde(rename = "userId")]
    user_id: Option<serde_json::Value>,
    preferences: Option<String>,
    state: Option<String>,
}

#[derive(Serialize)]
struct RecommendationsResponse {
    recommendations: Vec<Recommendation>,
}

#[derive(Serialize)]
struct CatalogOverview<'a> {
    destinations: &'a [Destination],
    users: &'a [User],
    preferences: Vec<String>,
    states: Vec<String>,
}

pub struct RestApi;

impl RestApi {
    pub async fn start(state: AppState, port: u16) -> std::io::Result<()> {
        let state = web::Data::new(state);
        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);

            App::new()
                .wrap(cors)
                .app_data(state.clone())
                .route("/catalog", web::get().to(catalog_overview))
                .route("/destination-details", web::get().to(destination_details))
                .route("/user-details", web::get().to(user_details))
                .route("/recommendations", web::post().to(recommendations))
        })
        .bind(("0.0.0.0", port))?
        .run()
        .await
    }
}

async fn catalog_overview(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    let overview = CatalogOverview {
        destinations: state.catalog.destinations(),
        users: state.catalog.users(),
        preferences: state.catalog.preference_labels(),
        states: state.catalog.states(),
    };
    Ok(HttpResponse::Ok().json(overview))
}

async fn destination_details(
    state: web::Data<AppState>,
    params: web::Query<DestinationDetailsParams>,
) -> ActixResult<HttpResponse> {
    match lookup_destination(&state.catalog, params.name.as_deref()) {
        Ok(details) => Ok(HttpResponse::Ok().json(details)),
        Err(e) => Ok(e.to_response()),
    }
}

async fn user_details(
    state: web::Data<AppState>,
    params: web::Query<UserDetailsParams>,
) -> ActixResult<HttpResponse> {
    match lookup_user(&state.catalog, params.id.as_deref()) {
        Ok(details) => Ok(HttpResponse::Ok().json(details)),
        Err(e) => Ok(e.to_response()),
    }
}

async fn recommendations(
    state: web::Data<AppState>,
    body: Option<web::Json<RecommendationRequest>>,
) -> ActixResult<HttpResponse> {
    let Some(body) = body else {
        return Ok(ApiError::validation("No data provided").to_response());
    };
    match parse_query(&body) {
        Ok(query) => {
            let recommendations = state.recommender.recommend(&query);
            Ok(HttpResponse::Ok().json(RecommendationsResponse { recommendations }))
        }
        Err(e) => Ok(e.to_response()),
    }
}

fn lookup_destination(
    catalog: &Catalog,
    name: Option<&str>,
) -> Result<DestinationDetails, ApiError> {
    let name = non_empty(name)
        .ok_or_else(|| ApiError::validation("Destination name is required"))?;
    let dest = catalog.require_destination(name)?;
    Ok(DestinationDetails {
        district: dest.district.clone(),
        state: dest.state.clone(),
        category: dest.category.clone(),
        best_time_to_visit: dest.best_time_to_visit.clone(),
    })
}

fn lookup_user(catalog: &Catalog, id: Option<&str>) -> Result<UserDetails, ApiError> {
    let id = non_empty(id).ok_or_else(|| ApiError::validation("User ID is required"))?;
    let user = catalog.require_user(id)?;
    Ok(UserDetails {
        name: user.name.clone(),
        gender: user.gender.clone(),
        location: user.location.clone(),
        travel_preferences: user.travel_preferences.clone(),
        number_of_adults: user.number_of_adults,
        number_of_children: user.number_of_children,
    })
}

/// Validate a request body into a typed query. Absent, null, and
/// empty-string fields all count as missing.
fn parse_query(req: &RecommendationRequest) -> Result<Query, ApiError> {
    match req.kind.as_deref() {
        Some("destination") => {
            let name = non_empty(req.destination.as_deref())
                .ok_or_else(|| ApiError::validation("Destination is required"))?;
            Ok(Query::ByDestination {
                name: name.to_string(),
            })
        }
        Some("user") => {
            let user_id = req
                .user_id
                .as_ref()
                .and_then(id_string)
                .ok_or_else(|| ApiError::validation("User ID is required"))?;
            Ok(Query::ByUser { user_id })
        }
        Some("custom") => {
            let preferences = non_empty(req.preferences.as_deref())
                .ok_or_else(|| ApiError::validation("Preferences are required"))?;
            let state = non_empty(req.state.as_deref()).map(str::to_string);
            Ok(Query::ByCustom {
                preferences: preferences.to_string(),
                state,
            })
        }
        _ => Err(ApiError::validation("Invalid search type")),
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn id_string(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::from_records(
            vec![
                Destination {
                    name: "Goa Beaches".to_string(),
                    district: "North Goa".to_string(),
                    state: "Goa".to_string(),
                    category: "Beach, Adventure".to_string(),
                    best_time_to_visit: "Nov-Feb".to_string(),
                    popularity_score: 0.9,
                },
                Destination {
                    name: "Hampi".to_string(),
                    district: "Vijayanagara".to_string(),
                    state: "Karnataka".to_string(),
                    category: "Culture".to_string(),
                    best_time_to_visit: "Oct-Mar".to_string(),
                    popularity_score: 0.8,
                },
            ],
            vec![User {
                user_id: "12".to_string(),
                name: "Asha".to_string(),
                gender: "F".to_string(),
                location: "Pune".to_string(),
                travel_preferences: "Culture".to_string(),
                number_of_adults: 2,
                number_of_children: 1,
            }],
        )
    }

    fn request(body: serde_json::Value) -> RecommendationRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_lookup_destination_requires_name() {
        let catalog = catalog();
        let missing = lookup_destination(&catalog, None).unwrap_err();
        assert_eq!(missing.to_string(), "Destination name is required");
        let empty = lookup_destination(&catalog, Some("")).unwrap_err();
        assert_eq!(empty.to_string(), "Destination name is required");
    }

    #[test]
    fn test_lookup_destination_unknown_is_not_found() {
        let err = lookup_destination(&catalog(), Some("Atlantis")).unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
        assert_eq!(err.to_string(), "Destination not found");
    }

    #[test]
    fn test_lookup_destination_returns_details() {
        let details = lookup_destination(&catalog(), Some("Goa Beaches")).unwrap();
        assert_eq!(details.district, "North Goa");
        assert_eq!(details.state, "Goa");
        assert_eq!(details.category, "Beach, Adventure");
        assert_eq!(details.best_time_to_visit, "Nov-Feb");
    }

    #[test]
    fn test_lookup_user_requires_id() {
        let err = lookup_user(&catalog(), None).unwrap_err();
        assert_eq!(err.to_string(), "User ID is required");
    }

    #[test]
    fn test_lookup_user_returns_details() {
        let details = lookup_user(&catalog(), Some("12")).unwrap();
        assert_eq!(details.name, "Asha");
        assert_eq!(details.number_of_adults, 2);
        assert_eq!(details.number_of_children, 1);
    }

    #[test]
    fn test_lookup_user_unknown_is_not_found() {
        let err = lookup_user(&catalog(), Some("999")).unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
        assert_eq!(err.to_string(), "User not found");
    }

    #[test]
    fn test_parse_query_by_destination() {
        let query = parse_query(&request(
            json!({ "type": "destination", "destination": "Goa Beaches" }),
        ))
        .unwrap();
        assert!(matches!(query, Query::ByDestination { name } if name == "Goa Beaches"));
    }

    #[test]
    fn test_parse_query_destination_field_required() {
        let err = parse_query(&request(json!({ "type": "destination" }))).unwrap_err();
        assert_eq!(err.to_string(), "Destination is required");
        let err =
            parse_query(&request(json!({ "type": "destination", "destination": "" })))
                .unwrap_err();
        assert_eq!(err.to_string(), "Destination is required");
    }

    #[test]
    fn test_parse_query_accepts_string_and_numeric_ids() {
        let query =
            parse_query(&request(json!({ "type": "user", "userId": "12" }))).unwrap();
        assert!(matches!(query, Query::ByUser { user_id } if user_id == "12"));
        let query = parse_query(&request(json!({ "type": "user", "userId": 12 }))).unwrap();
        assert!(matches!(query, Query::ByUser { user_id } if user_id == "12"));
    }

    #[test]
    fn test_parse_query_user_id_required() {
        let err = parse_query(&request(json!({ "type": "user" }))).unwrap_err();
        assert_eq!(err.to_string(), "User ID is required");
        let err =
            parse_query(&request(json!({ "type": "user", "userId": null }))).unwrap_err();
        assert_eq!(err.to_string(), "User ID is required");
    }

    #[test]
    fn test_parse_query_custom_with_optional_state() {
        let query = parse_query(&request(
            json!({ "type": "custom", "preferences": "beach, culture", "state": "Goa" }),
        ))
        .unwrap();
        match query {
            Query::ByCustom { preferences, state } => {
                assert_eq!(preferences, "beach, culture");
                assert_eq!(state.as_deref(), Some("Goa"));
            }
            other => panic!("unexpected query: {other:?}"),
        }

        // Empty state means no filter
        let query = parse_query(&request(
            json!({ "type": "custom", "preferences": "beach", "state": "" }),
        ))
        .unwrap();
        assert!(matches!(query, Query::ByCustom { state: None, .. }));
    }

    #[test]
    fn test_parse_query_rejects_unknown_type() {
        let err = parse_query(&request(json!({ "type": "teleport" }))).unwrap_err();
        assert_eq!(err.to_string(), "Invalid search type");
        let err = parse_query(&request(json!({ "destination": "Goa Beaches" }))).unwrap_err();
        assert_eq!(err.to_string(), "Invalid search type");
    }

    #[test]
    fn test_error_kinds_map_to_statuses() {
        assert_eq!(
            ApiError::validation("bad").to_response().status(),
            actix_web::http::StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::NotFound("missing".to_string()).to_response().status(),
            actix_web::http::StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Internal("boom".to_string()).to_response().status(),
            actix_web::http::StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_core_errors_map_to_api_kinds() {
        let err: ApiError = CoreError::DestinationNotFound("Atlantis".to_string()).into();
        assert!(matches!(err, ApiError::NotFound(_)));
        assert_eq!(err.to_string(), "Destination not found");

        let err: ApiError = CoreError::UserNotFound("999".to_string()).into();
        assert_eq!(err.to_string(), "User not found");

        let err: ApiError = CoreError::Io(std::io::Error::other("disk gone")).into();
        assert!(matches!(err, ApiError::Internal(_)));
    }

    #[test]
    fn test_parsed_query_drives_the_recommender() {
        let recommender = Recommender::new(Arc::new(catalog()));
        let query = parse_query(&request(
            json!({ "type": "custom", "preferences": "Beach" }),
        ))
        .unwrap();
        let results = recommender.recommend(&query);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Goa Beaches");
    }
}
