use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer, Result as ActixResult};
use serde::Deserialize;
use std::sync::Arc;
use sylvan_core::Error;
use sylvan_storage::Aggregator;
use tracing::error;

#[derive(Deserialize)]
struct FetchFeaturesQuery {
    lat: f64,
    lon: f64,
    /// Apply the display-only nitrogen amplification to `soil_tn`
    #[serde(default)]
    amplify_nitrogen: bool,
}

impl FetchFeaturesQuery {
    /// `NaN` and `inf` parse as floats but name no place
    fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }
}

pub struct RestApi;

impl RestApi {
    pub async fn start(aggregator: Arc<Aggregator>, port: u16) -> std::io::Result<()> {
        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);

            App::new()
                .wrap(cors)
                .app_data(web::Data::new(aggregator.clone()))
                .configure(routes)
        })
        .bind(("0.0.0.0", port))?
        .run()
        .await
    }
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health))
        .route("/api/fetch-features", web::get().to(fetch_features))
        .route("/api/cache/stats", web::get().to(cache_stats));
}

async fn health() -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "status": "ok"
    })))
}

async fn fetch_features(
    aggregator: web::Data<Arc<Aggregator>>,
    query: web::Query<FetchFeaturesQuery>,
) -> ActixResult<HttpResponse> {
    if !query.is_finite() {
        let e = Error::InvalidCoordinate {
            lat: query.lat,
            lon: query.lon,
        };
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "error": e.to_string()
        })));
    }

    match aggregator.fetch_features(query.lat, query.lon).await {
        Ok(bundle) if query.amplify_nitrogen => {
            Ok(HttpResponse::Ok().json(bundle.with_amplified_nitrogen()))
        }
        Ok(bundle) => Ok(HttpResponse::Ok().json(bundle)),
        Err(e) => {
            error!(lat = query.lat, lon = query.lon, error = %e, "feature aggregation failed");
            Ok(HttpResponse::InternalServerError().json(serde_json::json!({
                "error": e.to_string()
            })))
        }
    }
}

async fn cache_stats(aggregator: web::Data<Arc<Aggregator>>) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(aggregator.cache_stats()))
}
