use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use pollq::http::{self, NOT_FOUND_BODY};
use pollq::Broker;
use std::time::{Duration, Instant};

macro_rules! service {
    ($broker:expr) => {
        test::init_service(App::new().app_data($broker.clone()).configure(http::configure)).await
    };
}

#[actix_web::test]
async fn put_then_get_round_trip() {
    let broker = web::Data::new(Broker::new());
    let app = service!(broker);

    let resp = test::call_service(&app, test::TestRequest::put().uri("/color?v=red").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(test::read_body(resp).await.is_empty());

    let resp = test::call_service(&app, test::TestRequest::get().uri("/color").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(test::read_body(resp).await, "red");
}

#[actix_web::test]
async fn values_come_back_in_push_order() {
    let broker = web::Data::new(Broker::new());
    let app = service!(broker);

    for v in ["first", "second"] {
        let req = test::TestRequest::put().uri(&format!("/jobs?v={v}")).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    }

    let resp = test::call_service(&app, test::TestRequest::get().uri("/jobs").to_request()).await;
    assert_eq!(test::read_body(resp).await, "first");
    let resp = test::call_service(&app, test::TestRequest::get().uri("/jobs").to_request()).await;
    assert_eq!(test::read_body(resp).await, "second");
}

#[actix_web::test]
async fn put_without_value_is_rejected() {
    let broker = web::Data::new(Broker::new());
    let app = service!(broker);

    let resp = test::call_service(&app, test::TestRequest::put().uri("/color").to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = test::call_service(&app, test::TestRequest::put().uri("/color?v=").to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // Nothing was enqueued by the rejected pushes.
    let resp = test::call_service(&app, test::TestRequest::get().uri("/color").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn empty_queue_without_timeout_is_not_found() {
    let broker = web::Data::new(Broker::new());
    let app = service!(broker);

    let started = Instant::now();
    let resp = test::call_service(&app, test::TestRequest::get().uri("/missing").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(test::read_body(resp).await, NOT_FOUND_BODY);
    assert!(started.elapsed() < Duration::from_millis(100));
}

#[actix_web::test]
async fn unparsable_timeout_is_treated_as_no_wait() {
    let broker = web::Data::new(Broker::new());
    let app = service!(broker);

    let started = Instant::now();
    let req = test::TestRequest::get().uri("/jobs?timeout=soon").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(started.elapsed() < Duration::from_millis(100));
}

#[actix_web::test]
async fn long_poll_is_woken_by_push() {
    let broker = web::Data::new(Broker::new());
    let app = service!(broker);

    let producer = broker.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        producer.push("jobs", "late-arrival".to_string());
    });

    let started = Instant::now();
    let req = test::TestRequest::get().uri("/jobs?timeout=5").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(test::read_body(resp).await, "late-arrival");
    // Latency tracks the push, not the full timeout.
    assert!(started.elapsed() < Duration::from_secs(1));
}

#[actix_web::test]
async fn long_poll_times_out_without_push() {
    let broker = web::Data::new(Broker::new());
    let app = service!(broker);

    let started = Instant::now();
    let req = test::TestRequest::get().uri("/jobs?timeout=1").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(test::read_body(resp).await, NOT_FOUND_BODY);
    assert!(started.elapsed() >= Duration::from_secs(1));
}
