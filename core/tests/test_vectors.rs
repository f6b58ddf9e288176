//! Verify request builders against JSON test vectors in `test-vectors/`.
//!
//! Each case names an operation, its inputs (dates given as raw JSON so that
//! non-string values can be exercised), and either the expected path and
//! ordered query pairs or the expected error variant.

use police_core::{ApiError, DateInput, HttpRequest, LocationSpecifier, PoliceClient};
use serde_json::Value;

fn location(spec: &Value) -> LocationSpecifier {
    if let Some(point) = spec.get("point") {
        LocationSpecifier::point(point[0].as_str().unwrap(), point[1].as_str().unwrap()).unwrap()
    } else if let Some(poly) = spec.get("poly") {
        let vertices = poly
            .as_array()
            .unwrap()
            .iter()
            .map(|v| (v[0].as_str().unwrap(), v[1].as_str().unwrap()));
        LocationSpecifier::polygon(vertices).unwrap()
    } else {
        LocationSpecifier::location_id(spec["location_id"].as_str().unwrap())
    }
}

/// Absent date stays `None`; anything present goes through the JSON conversion.
fn date(input: &Value) -> Result<Option<DateInput>, ApiError> {
    input.get("date").map(DateInput::try_from).transpose()
}

fn build(client: &PoliceClient, operation: &str, input: &Value) -> Result<HttpRequest, ApiError> {
    let str_field = |name: &str| input[name].as_str().unwrap();
    let date = date(input)?;
    match operation {
        "street_level_crimes" => client
            .crimes()
            .build_street_level_crimes(&location(&input["location"]), date),
        "street_level_outcomes" => client
            .crimes()
            .build_street_level_outcomes(&location(&input["location"]), date),
        "crimes_at_location" => client
            .crimes()
            .build_crimes_at_location(&location(&input["location"]), date),
        "crimes_no_location" => client.crimes().build_crimes_no_location(
            str_field("category"),
            str_field("force"),
            date,
        ),
        "crime_categories" => client
            .crimes()
            .build_crime_categories(date.expect("crime_categories needs a date")),
        "stops_by_area" => client
            .stop_search()
            .build_by_area(&location(&input["location"]), date),
        "stops_by_location" => client
            .stop_search()
            .build_by_location(str_field("location_id"), date),
        "stops_no_location" => client
            .stop_search()
            .build_no_location(str_field("force"), date),
        "stops_by_force" => client
            .stop_search()
            .build_by_force(str_field("force"), date),
        other => panic!("unknown operation: {other}"),
    }
}

fn error_name(err: &ApiError) -> &'static str {
    match err {
        ApiError::InvalidDateInput(_) => "InvalidDateInput",
        ApiError::InvalidCoordinate(_) => "InvalidCoordinate",
        ApiError::InvalidLocation(_) => "InvalidLocation",
        ApiError::UnsupportedLocation { .. } => "UnsupportedLocation",
        ApiError::RequestFailed { .. } => "RequestFailed",
        ApiError::Transport { .. } => "Transport",
        ApiError::InvalidJson(_) => "InvalidJson",
    }
}

#[test]
fn request_test_vectors() {
    let raw = include_str!("../../test-vectors/requests.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();
    let base_url = vectors["base_url"].as_str().unwrap();
    let client = PoliceClient::new();
    assert_eq!(client.base_url(), base_url);

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let operation = case["operation"].as_str().unwrap();
        let result = build(&client, operation, &case["input"]);

        if let Some(expected_error) = case.get("expected_error") {
            let err = result.expect_err(name);
            assert_eq!(error_name(&err), expected_error.as_str().unwrap(), "{name}: error");
            continue;
        }

        let req = result.unwrap_or_else(|e| panic!("{name}: {e}"));
        let expected = &case["expected_request"];
        assert_eq!(
            req.url,
            format!("{base_url}{}", expected["path"].as_str().unwrap()),
            "{name}: path"
        );

        let expected_query: Vec<(String, String)> = expected["query"]
            .as_array()
            .unwrap()
            .iter()
            .map(|pair| {
                (
                    pair[0].as_str().unwrap().to_string(),
                    pair[1].as_str().unwrap().to_string(),
                )
            })
            .collect();
        assert_eq!(req.query.clone().into_pairs(), expected_query, "{name}: query");
        assert!(
            !req.query.contains_key("date") || case["input"].get("date").is_some(),
            "{name}: date"
        );
    }
}
