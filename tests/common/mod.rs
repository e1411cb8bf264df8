#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use fundingportal::config::Config;
use fundingportal::entities::{funding_opportunity, opportunity_tag, organization, research_area, tag};
use fundingportal::service::CatalogService;
use fundingportal::{create_app, db, AppState};
use http_body_util::BodyExt; // For Response body handling
use sea_orm::{ActiveModelBehavior, ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use serde_json::Value;
use std::sync::Once;
use tower::ServiceExt; // For oneshot

// For initializing tracing once
static INIT: Once = Once::new();

pub fn setup_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt::try_init();
    });
}

/// Fresh, migrated in-memory database.
pub async fn setup_db() -> DatabaseConnection {
    setup_tracing();
    db::connect_and_migrate("sqlite::memory:", 1)
        .await
        .expect("in-memory database should migrate")
}

pub fn app_with(db: DatabaseConnection, demo_fallback: bool) -> Router {
    let config = Config {
        demo_fallback,
        ..Config::default()
    };
    let catalog = CatalogService::new(db).with_demo_fallback(demo_fallback);
    create_app(AppState::new(catalog, config))
}

pub fn app(db: DatabaseConnection) -> Router {
    app_with(db, true)
}

pub async fn send(app: &Router, method: &str, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

pub async fn get(app: &Router, uri: &str) -> Value {
    let (status, json) = send(app, "GET", uri).await;
    assert_eq!(status, StatusCode::OK, "GET {uri} returned {status}: {json}");
    json
}

pub fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub async fn insert_organization(db: &DatabaseConnection, name: &str, country: Option<&str>) -> i32 {
    organization::ActiveModel {
        name: Set(name.to_string()),
        country: Set(country.map(str::to_string)),
        ..organization::ActiveModel::new()
    }
    .insert(db)
    .await
    .unwrap()
    .id
}

pub async fn insert_research_area(db: &DatabaseConnection, name: &str) -> i32 {
    research_area::ActiveModel {
        name: Set(name.to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
    .id
}

pub async fn insert_tag(db: &DatabaseConnection, name: &str) -> i32 {
    tag::ActiveModel {
        name: Set(name.to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
    .id
}

/// Active opportunity with only the required fields set.
pub fn opportunity(title: &str, organization_id: i32) -> funding_opportunity::ActiveModel {
    funding_opportunity::ActiveModel {
        title: Set(title.to_string()),
        organization_id: Set(organization_id),
        ..funding_opportunity::ActiveModel::new()
    }
}

pub async fn insert_opportunity(
    db: &DatabaseConnection,
    model: funding_opportunity::ActiveModel,
    tag_ids: &[i32],
) -> funding_opportunity::Model {
    let inserted = model.insert(db).await.unwrap();
    if !tag_ids.is_empty() {
        let links = tag_ids.iter().map(|tag_id| opportunity_tag::ActiveModel {
            opportunity_id: Set(inserted.id),
            tag_id: Set(*tag_id),
        });
        opportunity_tag::Entity::insert_many(links)
            .exec_without_returning(db)
            .await
            .unwrap();
    }
    inserted
}

pub fn titles(page: &Value) -> Vec<String> {
    page["opportunities"]
        .as_array()
        .expect("opportunities should be an array")
        .iter()
        .map(|o| o["title"].as_str().unwrap_or_default().to_string())
        .collect()
}
