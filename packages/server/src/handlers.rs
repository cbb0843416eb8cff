//! HTTP handler functions for the smart spray API.

use actix_web::{HttpResponse, web};
use smart_spray_recommendation::assess_crop_risk;
use smart_spray_server_models::{
    ApiCropRisk, ApiHealth, ApiSprayInputs, ApiSprayRecommendation, SmartSprayRequest,
    WeatherRiskRequest,
};

use crate::AppState;
use crate::error::ApiError;

/// `GET /health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `POST /smart-spray`
///
/// Validates the request, fetches the city's current weather, and runs
/// the recommendation engine. The response merges the recommendation with
/// the reading and the raw inputs.
pub async fn smart_spray(
    state: web::Data<AppState>,
    body: web::Json<SmartSprayRequest>,
) -> Result<HttpResponse, ApiError> {
    let req = body.into_inner();
    let valid = req.validate().inspect_err(|e| {
        log::debug!("Rejected smart-spray request: {e}");
    })?;

    let weather = state
        .weather
        .fetch_weather(&valid.city)
        .await
        .inspect_err(|e| log::error!("Failed to fetch weather for {:?}: {e}", valid.city))?;

    let rec = state.engine.recommend_for(&valid.inputs, &weather);
    log::info!(
        "smart-spray crop={:?} disease={:?} -> {}",
        valid.inputs.crop,
        valid.inputs.disease_name,
        rec.pesticide
    );

    Ok(HttpResponse::Ok().json(ApiSprayRecommendation::new(
        rec,
        weather,
        ApiSprayInputs::from(&req),
    )))
}

/// `POST /weather-risk`
///
/// Assesses the current weather risk for a crop at a city.
pub async fn weather_risk(
    state: web::Data<AppState>,
    body: web::Json<WeatherRiskRequest>,
) -> Result<HttpResponse, ApiError> {
    let (crop, city) = body.into_inner().validate()?;

    let weather = state
        .weather
        .fetch_weather(&city)
        .await
        .inspect_err(|e| log::error!("Failed to fetch weather for {city:?}: {e}"))?;

    let risk = assess_crop_risk(&crop, &weather);
    Ok(HttpResponse::Ok().json(ApiCropRisk::new(crop, risk, weather)))
}
