use crate::{error::AppError, AppState};
use analyzer::{FinancialAnalyzer, FinancialSummary, PeriodData};
use axum::{extract::State, Json};
use core_types::{ProductRecord, SaleRecord};
use forecaster::{ForecastEngine, ForecastReport};
use optimizer::{InventoryOptimizer, InventorySummary};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct ForecastRequest {
    pub sales: Vec<SaleRecord>,
}

#[derive(Debug, Deserialize)]
pub struct InventoryRequest {
    pub products: Vec<ProductRecord>,
    /// Caller-filtered trailing demand window (30 days by default).
    pub recent_sales: Vec<SaleRecord>,
}

#[derive(Debug, Deserialize)]
pub struct FinancialsRequest {
    pub current: PeriodData,
    pub previous: PeriodData,
}

/// # POST /api/forecast
/// Fits a daily revenue trend to the posted sales history and returns the
/// projection. A short history comes back 200 with the
/// `insufficient_data` sentinel, not an error.
pub async fn post_forecast(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ForecastRequest>,
) -> Result<Json<ForecastReport>, AppError> {
    let engine = ForecastEngine::new(state.settings.forecast.clone());
    Ok(Json(engine.forecast(&request.sales)?))
}

/// # POST /api/inventory
/// Computes prioritized reorder recommendations from a stock snapshot plus
/// recent sales.
pub async fn post_inventory(
    State(state): State<Arc<AppState>>,
    Json(request): Json<InventoryRequest>,
) -> Result<Json<InventorySummary>, AppError> {
    let engine = InventoryOptimizer::new(state.settings.inventory.clone());
    Ok(Json(engine.optimize(&request.products, &request.recent_sales)?))
}

/// # POST /api/financials
/// Compares the two posted trailing periods.
pub async fn post_financials(
    State(state): State<Arc<AppState>>,
    Json(request): Json<FinancialsRequest>,
) -> Result<Json<FinancialSummary>, AppError> {
    let engine = FinancialAnalyzer::new(state.settings.financial.clone());
    Ok(Json(engine.analyze(&request.current, &request.previous)?))
}

#[cfg(test)]
mod tests {
    use crate::app;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use configuration::Settings;
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn post(uri: &str, payload: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn sale(day: u32, total: &str) -> Value {
        json!({
            "created_at": format!("2024-01-{day:02}T12:00:00Z"),
            "total": total,
            "quantity": 1,
            "product_id": "p-1"
        })
    }

    #[tokio::test]
    async fn health_endpoint_answers_ok() {
        let response = app(Settings::default())
            .oneshot(Request::builder().uri("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn short_history_reports_sentinel_not_error() {
        let payload = json!({ "sales": [sale(1, "100"), sale(2, "100")] });
        let response = app(Settings::default())
            .oneshot(post("/api/forecast", payload))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["model_info"]["type"], "insufficient_data");
        assert_eq!(body["predictions"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn full_history_returns_a_projection() {
        let sales: Vec<Value> = (1..=10).map(|d| sale(d, "100")).collect();
        let response = app(Settings::default())
            .oneshot(post("/api/forecast", json!({ "sales": sales })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["model_info"]["type"], "linear_regression");
        assert_eq!(body["predictions"].as_array().unwrap().len(), 30);
    }

    #[tokio::test]
    async fn invalid_record_maps_to_422_with_error_body() {
        let payload = json!({ "sales": (1..=10).map(|d| sale(d, "-5")).collect::<Vec<_>>() });
        let response = app(Settings::default())
            .oneshot(post("/api/forecast", payload))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        assert_eq!(body["error"], "invalid_input");
        assert!(body["message"].as_str().unwrap().contains("total"));
    }

    #[tokio::test]
    async fn inventory_endpoint_flags_below_minimum_stock() {
        let payload = json!({
            "products": [
                { "id": "low", "name": "Low", "stock": 5, "min_stock": 20, "price": "8" },
                { "id": "fine", "name": "Fine", "stock": 50, "min_stock": 10, "price": "8" }
            ],
            "recent_sales": []
        });
        let response = app(Settings::default())
            .oneshot(post("/api/inventory", payload))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        let recs = body["recommendations"].as_array().unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0]["priority"], "high");
        assert_eq!(recs[0]["recommended_order"], 35);
    }

    #[tokio::test]
    async fn financials_endpoint_compares_periods() {
        let payload = json!({
            "current": {
                "sales": [sale(20, "6000")],
                "purchases": [{ "created_at": "2024-01-20T12:00:00Z", "total": "3000" }]
            },
            "previous": {
                "sales": [sale(1, "6000")],
                "purchases": [{ "created_at": "2024-01-01T12:00:00Z", "total": "3000" }]
            }
        });
        let response = app(Settings::default())
            .oneshot(post("/api/financials", payload))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["cash_runway_days"], 30);
        assert_eq!(body["health_score"], 85);
        assert_eq!(body["insights"][0]["title"], "Excellent profit margin");
    }
}
