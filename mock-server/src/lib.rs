//! Fixture server imitating the police data API under `/api`.
//!
//! Every endpoint the client knows returns a small canned payload. Unknown
//! forces and neighbourhoods answer 404 with a plain-text body, malformed
//! dates and missing location parameters answer 400. Each request URI (path
//! and query, as received) is appended to a shared [`RequestLog`] so tests can
//! check the exact wire form.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use axum::{
    extract::{Path, Query, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tracing::debug;

pub const FORCE_ID: &str = "leicestershire";
pub const NEIGHBOURHOOD_ID: &str = "NC04";
pub const CRIME_ID: &str = "590d68b69228a9ff95b675bb4af591b38de561aa03129dc09a03ef34f537588c";

/// URIs received so far, oldest first.
pub type RequestLog = Arc<Mutex<Vec<String>>>;

type Params = Query<HashMap<String, String>>;

pub fn app() -> Router {
    app_with_log(RequestLog::default())
}

pub fn app_with_log(log: RequestLog) -> Router {
    let api = Router::new()
        .route("/crimes-street/all-crime", get(street_crimes))
        .route("/outcomes-at-location", get(street_outcomes))
        .route("/crimes-at-location", get(crimes_at_location))
        .route("/crimes-no-location", get(crimes_no_location))
        .route("/crime-categories", get(crime_categories))
        .route("/crime-last-updated", get(last_updated))
        .route("/outcomes-for-crime/{crime_id}", get(outcomes_for_crime))
        .route("/forces", get(list_forces))
        .route("/forces/{force_id}", get(force_details))
        .route("/forces/{force_id}/people", get(senior_officers))
        .route("/locate-neighbourhood", get(locate_neighbourhood))
        .route("/stops-street", get(stops_street))
        .route("/stops-at-location", get(stops_at_location))
        .route("/stops-no-location", get(stops_by_force))
        .route("/stops-force", get(stops_by_force))
        .route("/{force_id}/neighbourhoods", get(list_neighbourhoods))
        .route("/{force_id}/{neighbourhood_id}", get(neighbourhood))
        .route(
            "/{force_id}/{neighbourhood_id}/{resource}",
            get(neighbourhood_resource),
        );

    Router::new()
        .nest("/api", api)
        .layer(middleware::from_fn_with_state(log, record))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with_log(listener, RequestLog::default()).await
}

pub async fn run_with_log(listener: TcpListener, log: RequestLog) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_log(log)).await
}

async fn record(State(log): State<RequestLog>, request: Request, next: Next) -> Response {
    let uri = request.uri().to_string();
    debug!(%uri, "mock request");
    if let Ok(mut log) = log.lock() {
        log.push(uri);
    }
    next.run(request).await
}

type ApiResult = Result<Json<Value>, (StatusCode, String)>;

fn bad_request(message: &str) -> (StatusCode, String) {
    (StatusCode::BAD_REQUEST, message.to_string())
}

fn not_found() -> (StatusCode, String) {
    (StatusCode::NOT_FOUND, "Not found".to_string())
}

/// The `date` parameter, when present, must be `YYYY-MM`.
fn check_date(params: &HashMap<String, String>) -> Result<String, (StatusCode, String)> {
    match params.get("date") {
        None => Ok("2024-01".to_string()),
        Some(date) => {
            let valid = date.len() == 7
                && date.as_bytes()[4] == b'-'
                && date
                    .chars()
                    .enumerate()
                    .all(|(i, c)| i == 4 || c.is_ascii_digit());
            if valid {
                Ok(date.clone())
            } else {
                Err(bad_request("Invalid date"))
            }
        }
    }
}

fn check_force(force: &str) -> Result<(), (StatusCode, String)> {
    if force == FORCE_ID {
        Ok(())
    } else {
        Err(not_found())
    }
}

fn has_area(params: &HashMap<String, String>) -> bool {
    params.contains_key("poly") || (params.contains_key("lat") && params.contains_key("lng"))
}

fn crime(month: &str) -> Value {
    json!({
        "category": "anti-social-behaviour",
        "location_type": "Force",
        "location": {
            "latitude": "52.640961",
            "street": {"id": 884343, "name": "On or near Wharf Street North"},
            "longitude": "-1.126371"
        },
        "context": "",
        "outcome_status": null,
        "persistent_id": "",
        "id": 54164419,
        "location_subtype": "",
        "month": month
    })
}

fn stop(month: &str) -> Value {
    json!({
        "type": "Person search",
        "involved_person": true,
        "datetime": format!("{month}-15T12:30:00+00:00"),
        "operation": false,
        "location": {
            "latitude": "52.634407",
            "street": {"id": 883407, "name": "On or near Shopping Area"},
            "longitude": "-1.129198"
        },
        "gender": "Male",
        "age_range": "18-24",
        "self_defined_ethnicity": "White - English/Welsh/Scottish/Northern Irish/British",
        "officer_defined_ethnicity": "White",
        "legislation": "Misuse of Drugs Act 1971 (section 23)",
        "object_of_search": "Controlled drugs",
        "outcome": "A no further action disposal",
        "outcome_linked_to_object_of_search": false,
        "removal_of_more_than_outer_clothing": false
    })
}

async fn street_crimes(Query(params): Params) -> ApiResult {
    let month = check_date(&params)?;
    if !has_area(&params) {
        return Err(bad_request("lat/lng or poly required"));
    }
    Ok(Json(json!([crime(&month)])))
}

async fn street_outcomes(Query(params): Params) -> ApiResult {
    let month = check_date(&params)?;
    if !has_area(&params) && !params.contains_key("location_id") {
        return Err(bad_request("location required"));
    }
    Ok(Json(json!([{
        "category": {"code": "under-investigation", "name": "Under investigation"},
        "date": month,
        "person_id": null,
        "crime": crime(&month)
    }])))
}

async fn crimes_at_location(Query(params): Params) -> ApiResult {
    let month = check_date(&params)?;
    let has_point = params.contains_key("lat") && params.contains_key("lng");
    if !has_point && !params.contains_key("location_id") {
        return Err(bad_request("location required"));
    }
    Ok(Json(json!([crime(&month)])))
}

async fn crimes_no_location(Query(params): Params) -> ApiResult {
    let month = check_date(&params)?;
    let (Some(_), Some(force)) = (params.get("category"), params.get("force")) else {
        return Err(bad_request("category and force required"));
    };
    check_force(force)?;
    let mut record = crime(&month);
    record["location"] = Value::Null;
    record["location_type"] = Value::Null;
    Ok(Json(json!([record])))
}

async fn crime_categories(Query(params): Params) -> ApiResult {
    check_date(&params)?;
    Ok(Json(json!([
        {"url": "all-crime", "name": "All crime"},
        {"url": "anti-social-behaviour", "name": "Anti-social behaviour"},
        {"url": "burglary", "name": "Burglary"}
    ])))
}

async fn last_updated() -> Json<Value> {
    Json(json!({"date": "2024-01-01"}))
}

async fn outcomes_for_crime(Path(crime_id): Path<String>) -> ApiResult {
    if crime_id != CRIME_ID {
        return Err(not_found());
    }
    Ok(Json(json!({
        "crime": {
            "category": "violent-crime",
            "persistent_id": CRIME_ID,
            "month": "2024-01"
        },
        "outcomes": [{
            "category": {"code": "under-investigation", "name": "Under investigation"},
            "date": "2024-01",
            "person_id": null
        }]
    })))
}

async fn list_forces() -> Json<Value> {
    Json(json!([
        {"id": "avon-and-somerset", "name": "Avon and Somerset Constabulary"},
        {"id": FORCE_ID, "name": "Leicestershire Police"},
        {"id": "metropolitan", "name": "Metropolitan Police Service"}
    ]))
}

async fn force_details(Path(force_id): Path<String>) -> ApiResult {
    check_force(&force_id)?;
    Ok(Json(json!({
        "id": FORCE_ID,
        "name": "Leicestershire Police",
        "url": "http://www.leics.police.uk/",
        "telephone": "101",
        "engagement_methods": []
    })))
}

async fn senior_officers(Path(force_id): Path<String>) -> ApiResult {
    check_force(&force_id)?;
    Ok(Json(json!([
        {"name": "Rob Nixon", "rank": "Chief Constable", "bio": null, "contact_details": {}}
    ])))
}

async fn list_neighbourhoods(Path(force_id): Path<String>) -> ApiResult {
    check_force(&force_id)?;
    Ok(Json(json!([
        {"id": NEIGHBOURHOOD_ID, "name": "City Centre"},
        {"id": "NC66", "name": "Cultural Quarter"}
    ])))
}

async fn neighbourhood(Path((force_id, neighbourhood_id)): Path<(String, String)>) -> ApiResult {
    check_force(&force_id)?;
    if neighbourhood_id != NEIGHBOURHOOD_ID {
        return Err(not_found());
    }
    Ok(Json(json!({
        "id": NEIGHBOURHOOD_ID,
        "name": "City Centre",
        "centre": {"latitude": "52.6389", "longitude": "-1.13619"},
        "contact_details": {"telephone": "101"}
    })))
}

async fn neighbourhood_resource(
    Path((force_id, neighbourhood_id, resource)): Path<(String, String, String)>,
) -> ApiResult {
    check_force(&force_id)?;
    if neighbourhood_id != NEIGHBOURHOOD_ID {
        return Err(not_found());
    }
    let body = match resource.as_str() {
        "boundary" => json!([
            {"latitude": "52.6394052587", "longitude": "-1.1458618876"},
            {"latitude": "52.6389452755", "longitude": "-1.1457057759"},
            {"latitude": "52.6383706746", "longitude": "-1.1455755443"}
        ]),
        "people" => json!([{"name": "Andy Cooper", "rank": "Sgt", "bio": null}]),
        "events" => json!([{
            "title": "Beat surgery",
            "type": "meeting",
            "start_date": "2024-01-20T14:00:00"
        }]),
        "priorities" => json!([{
            "issue": "Shoplifting",
            "action": null,
            "issue-date": "2024-01-10T00:00:00"
        }]),
        _ => return Err(not_found()),
    };
    Ok(Json(body))
}

async fn locate_neighbourhood(Query(params): Params) -> ApiResult {
    let q = params.get("q").ok_or_else(|| bad_request("q required"))?;
    let valid = q
        .split_once(',')
        .is_some_and(|(lat, lng)| lat.parse::<f64>().is_ok() && lng.parse::<f64>().is_ok());
    if !valid {
        return Err(bad_request("q must be lat,lng"));
    }
    Ok(Json(json!({"force": FORCE_ID, "neighbourhood": NEIGHBOURHOOD_ID})))
}

async fn stops_street(Query(params): Params) -> ApiResult {
    let month = check_date(&params)?;
    if !has_area(&params) {
        return Err(bad_request("lat/lng or poly required"));
    }
    Ok(Json(json!([stop(&month)])))
}

async fn stops_at_location(Query(params): Params) -> ApiResult {
    let month = check_date(&params)?;
    if !params.contains_key("location_id") {
        return Err(bad_request("location_id required"));
    }
    Ok(Json(json!([stop(&month)])))
}

async fn stops_by_force(Query(params): Params) -> Response {
    let month = match check_date(&params) {
        Ok(month) => month,
        Err(err) => return err.into_response(),
    };
    match params.get("force") {
        Some(force) if force == FORCE_ID => Json(json!([stop(&month)])).into_response(),
        Some(_) => not_found().into_response(),
        None => bad_request("force required").into_response(),
    }
}
