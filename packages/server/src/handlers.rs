//! HTTP handler functions for the analytics API.

use actix_web::{HttpResponse, web};
use rights_monitor_analytics::{
    AnalyticsError, get_geo_data, get_overview, get_report_analytics, get_timeline,
    get_violation_counts,
};
use rights_monitor_analytics_models::{FilterParams, GeoParams, OverviewParams, TimelineParams};

use crate::AppState;

/// Maps an analytics failure to an error response.
///
/// Malformed dates are the caller's fault; everything else is reported as
/// an internal error without leaking store details.
fn error_response(context: &str, err: &AnalyticsError) -> HttpResponse {
    match err {
        AnalyticsError::InvalidDate { .. } => {
            log::warn!("Rejected {context} request: {err}");
            HttpResponse::BadRequest().json(serde_json::json!({
                "error": err.to_string()
            }))
        }
        AnalyticsError::Store(_) | AnalyticsError::InvalidIntervalInput { .. } => {
            log::error!("Failed to compute {context}: {err}");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Failed to compute {context}")
            }))
        }
    }
}

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "healthy": true,
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// `GET /api/v1/analytics/violations`
///
/// Violation-type counts for cases matching the filters.
pub async fn violations(
    state: web::Data<AppState>,
    params: web::Query<FilterParams>,
) -> HttpResponse {
    match get_violation_counts(state.store.as_ref(), &params).await {
        Ok(counts) => HttpResponse::Ok().json(counts),
        Err(e) => error_response("violation counts", &e),
    }
}

/// `GET /api/v1/analytics/geodata`
pub async fn geodata(state: web::Data<AppState>, params: web::Query<GeoParams>) -> HttpResponse {
    match get_geo_data(state.store.as_ref(), &params).await {
        Ok(clusters) => HttpResponse::Ok().json(clusters),
        Err(e) => error_response("geo data", &e),
    }
}

/// `GET /api/v1/analytics/timeline`
///
/// Case counts bucketed by `interval` (day, week, month, year). Defaults
/// to monthly buckets over the last year.
pub async fn timeline(
    state: web::Data<AppState>,
    params: web::Query<TimelineParams>,
) -> HttpResponse {
    match get_timeline(state.store.as_ref(), &params).await {
        Ok(points) => HttpResponse::Ok().json(points),
        Err(e) => error_response("timeline", &e),
    }
}

/// `GET /api/v1/analytics/reports`
///
/// Incident report totals by violation label and review status.
pub async fn reports(
    state: web::Data<AppState>,
    params: web::Query<FilterParams>,
) -> HttpResponse {
    match get_report_analytics(state.store.as_ref(), &params).await {
        Ok(summary) => HttpResponse::Ok().json(summary),
        Err(e) => error_response("report analytics", &e),
    }
}

/// `GET /api/v1/analytics/`
pub async fn overview(
    state: web::Data<AppState>,
    params: web::Query<OverviewParams>,
) -> HttpResponse {
    match get_overview(state.store.as_ref(), &params).await {
        Ok(overview) => HttpResponse::Ok().json(overview),
        Err(e) => error_response("overview", &e),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{App, http::StatusCode, test};
    use rights_monitor_store::{
        Collection, RecordStore, StoreError, memory::MemoryStore, snapshot::Snapshot,
    };
    use rights_monitor_store_models::{CaseRecord, Predicate, ReportRecord};

    use crate::{AppState, configure};

    const SNAPSHOT: &str = r#"{
        "cases": [
            {
                "case_id": "C-1",
                "title": "Detention at checkpoint",
                "violation_types": ["arbitrary_detention", "torture"],
                "location": {
                    "country": "Sudan",
                    "region": "Darfur",
                    "coordinates": { "type": "Point", "coordinates": [24.9, 13.6] }
                },
                "date_occurred": "2024-03-10"
            },
            {
                "case_id": "C-2",
                "title": "Village burned",
                "violation_types": ["property_destruction"],
                "location": {
                    "country": "Chad",
                    "coordinates": { "type": "Point", "coordinates": [20.8, 13.8] }
                },
                "date_occurred": "2024-04-02T08:30:00Z"
            }
        ],
        "incident_reports": [
            {
                "report_id": "R-1",
                "incident_details": {
                    "date": "2024-03-11",
                    "location": { "country": "Sudan", "city": "Nyala" },
                    "violation_types": ["torture"]
                }
            }
        ],
        "victims": [
            { "victim_id": "V-1", "type": "victim" },
            { "victim_id": "V-2", "type": "witness" }
        ]
    }"#;

    fn state() -> AppState {
        let snapshot = Snapshot::from_json(SNAPSHOT).unwrap();
        AppState {
            store: Arc::new(MemoryStore::from_snapshot(snapshot)),
        }
    }

    struct BrokenStore;

    #[async_trait::async_trait]
    impl RecordStore for BrokenStore {
        async fn fetch_cases(
            &self,
            _predicate: &Predicate,
        ) -> Result<Vec<CaseRecord>, StoreError> {
            Err(StoreError::Unavailable {
                message: "offline".to_string(),
            })
        }

        async fn fetch_reports(
            &self,
            _predicate: &Predicate,
        ) -> Result<Vec<ReportRecord>, StoreError> {
            Err(StoreError::Unavailable {
                message: "offline".to_string(),
            })
        }

        async fn count(
            &self,
            _collection: Collection,
            _predicate: &Predicate,
        ) -> Result<u64, StoreError> {
            Err(StoreError::Unavailable {
                message: "offline".to_string(),
            })
        }
    }

    async fn get_json(state: AppState, uri: &str) -> (StatusCode, serde_json::Value) {
        let app = test::init_service(
            App::new()
                .app_data(actix_web::web::Data::new(state))
                .configure(configure),
        )
        .await;
        let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        let status = resp.status();
        let body = test::read_body(resp).await;
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[actix_web::test]
    async fn health_reports_version() {
        let (status, body) = get_json(state(), "/api/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["healthy"], true);
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[actix_web::test]
    async fn violations_endpoint_applies_filters() {
        let (status, body) =
            get_json(state(), "/api/v1/analytics/violations?country=Sudan").await;
        assert_eq!(status, StatusCode::OK);
        let counts = body.as_array().unwrap();
        assert_eq!(counts.len(), 2);
        assert!(counts.iter().all(|c| c["count"] == 1));

        let (_, body) = get_json(
            state(),
            "/api/v1/analytics/violations?start_date=2024-04-01",
        )
        .await;
        assert_eq!(body[0]["violation_type"], "property_destruction");
    }

    #[actix_web::test]
    async fn geodata_endpoint_returns_clusters() {
        let (status, body) =
            get_json(state(), "/api/v1/analytics/geodata?violation_type=torture").await;
        assert_eq!(status, StatusCode::OK);
        let clusters = body.as_array().unwrap();
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0]["country"], "Sudan");
        assert_eq!(clusters[0]["region"], "Darfur");
        assert_eq!(clusters[0]["count"], 1);
        assert_eq!(clusters[0]["violation_types"]["arbitrary_detention"], 1);
    }

    #[actix_web::test]
    async fn timeline_endpoint_buckets_by_interval() {
        let (status, body) = get_json(
            state(),
            "/api/v1/analytics/timeline?start_date=2024-01-01&end_date=2024-12-31&interval=month",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let points = body.as_array().unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0]["date"], "2024-03-01");
        assert_eq!(points[1]["date"], "2024-04-01");

        let (status, body) = get_json(
            state(),
            "/api/v1/analytics/timeline?start_date=2024-01-01&end_date=2024-12-31&interval=year",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["date"], "2024-01-01");
        assert_eq!(body[0]["count"], 2);
    }

    #[actix_web::test]
    async fn overview_endpoint_with_optional_sections() {
        let (status, body) = get_json(
            state(),
            "/api/v1/analytics/?include_geo=true&include_timeline=false",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_cases"], 2);
        assert_eq!(body["total_reports"], 1);
        assert_eq!(body["total_victims"], 2);
        assert_eq!(body["geo_data"].as_array().unwrap().len(), 2);
        assert!(body["timeline_data"].is_null());

        let (status, body) = get_json(state(), "/api/v1/analytics?country=Chad").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_cases"], 1);
        assert_eq!(body["total_reports"], 0);
        assert_eq!(body["total_victims"], 2);
    }

    #[actix_web::test]
    async fn reports_endpoint_counts_statuses() {
        let (status, body) =
            get_json(state(), "/api/v1/analytics/reports?country=Sudan").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_reports"], 1);
        assert_eq!(body["by_violation_type"][0]["violation_type"], "torture");
        assert_eq!(body["by_status"]["new"], 1);
        assert_eq!(body["by_status"]["verified"], 0);
        assert_eq!(body["by_status"].as_object().unwrap().len(), 5);

        let (status, body) = get_json(state(), "/api/v1/analytics/reports?country=Chad").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_reports"], 0);
        assert!(body["by_violation_type"].as_array().unwrap().is_empty());
    }

    #[actix_web::test]
    async fn malformed_date_is_a_bad_request() {
        let (status, body) =
            get_json(state(), "/api/v1/analytics/violations?start_date=yesterday").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("yesterday"));
    }

    #[actix_web::test]
    async fn store_failure_is_an_internal_error() {
        let broken = AppState {
            store: Arc::new(BrokenStore),
        };
        let (status, body) = get_json(broken, "/api/v1/analytics/").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Failed to compute overview");
    }
}
