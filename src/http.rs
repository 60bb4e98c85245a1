use crate::broker::{Broker, BrokerError};
use actix_web::{web, HttpResponse};
use log::warn;
use serde::Deserialize;
use std::time::Duration;

/// Fixed body returned when a read finds nothing, matching the wire contract
/// consumers already parse.
pub const NOT_FOUND_BODY: &str = r#"{"error":"404 not found"}"#;

#[derive(Deserialize)]
pub struct PutParams {
    v: Option<String>,
}

#[derive(Deserialize)]
pub struct GetParams {
    timeout: Option<String>,
}

/// `PUT /{key}?v=<value>` — push a value onto the key's queue.
pub async fn put_value(
    broker: web::Data<Broker>,
    path: web::Path<String>,
    params: web::Query<PutParams>,
) -> HttpResponse {
    let key = path.into_inner();
    match params.into_inner().v {
        Some(value) if !value.is_empty() => {
            broker.push(&key, value);
            HttpResponse::Ok().finish()
        }
        _ => {
            warn!("push to {:?} rejected: empty value in query", key);
            HttpResponse::BadRequest().finish()
        }
    }
}

/// `GET /{key}?timeout=<seconds>` — shift a value, long-polling up to
/// `timeout` seconds on an empty queue.
pub async fn get_value(
    broker: web::Data<Broker>,
    path: web::Path<String>,
    params: web::Query<GetParams>,
) -> HttpResponse {
    let key = path.into_inner();
    let timeout = parse_timeout(params.into_inner().timeout.as_deref());

    match broker.shift_wait(&key, timeout).await {
        Ok(value) => HttpResponse::Ok().body(value),
        Err(BrokerError::EmptyQueue) => HttpResponse::NotFound()
            .content_type("application/json")
            .body(NOT_FOUND_BODY),
    }
}

/// Seconds to wait for an empty queue. Absent, unparsable, or negative
/// timeouts all mean "do not wait"; unparsable ones get a warning.
fn parse_timeout(raw: Option<&str>) -> Duration {
    let seconds = match raw {
        None | Some("") => 0,
        Some(raw) => match raw.parse::<i64>() {
            Ok(seconds) => seconds,
            Err(err) => {
                warn!("invalid timeout {:?}: {}", raw, err);
                0
            }
        },
    };
    Duration::from_secs(seconds.max(0) as u64)
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/{key}")
            .route(web::get().to(get_value))
            .route(web::put().to(put_value)),
    );
}
