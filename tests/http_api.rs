use actix_web::http::{header, StatusCode};
use actix_web::{test, web, App};
use serde_json::{json, Value};
use std::sync::Arc;

use store_backoffice::db::seed_default_positions;
use store_backoffice::handlers;
use store_backoffice::repositories::memory::InMemoryDatabase;
use store_backoffice::repositories::Repositories;
use store_backoffice::state::AppState;
use store_backoffice::storage::InMemoryFileStorage;

const BOUNDARY: &str = "X-STORE-BOUNDARY";

async fn state() -> AppState {
    let repos = Repositories::in_memory(Arc::new(InMemoryDatabase::new()));
    seed_default_positions(repos.positions.as_ref()).await.unwrap();
    AppState::new(repos, Arc::new(InMemoryFileStorage::new("http-bucket")), "http-secret".into())
}

fn multipart_body(data: &Value, file: Option<(&str, &[u8])>) -> Vec<u8> {
    let mut body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"data\"\r\nContent-Type: application/json\r\n\r\n{data}\r\n",
        b = BOUNDARY,
        data = data
    )
    .into_bytes();
    if let Some((name, bytes)) = file {
        body.extend_from_slice(
            format!(
                "--{b}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{name}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
                b = BOUNDARY,
                name = name
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

macro_rules! app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state))
                .configure(handlers::configure),
        )
        .await
    };
}

macro_rules! register {
    ($app:expr, $email:expr) => {{
        let req = test::TestRequest::post()
            .uri("/v1/auth")
            .set_json(json!({
                "email": $email,
                "password": "secret12",
                "action": "create",
                "name": "Owner",
                "storeName": "Corner Shop"
            }))
            .to_request();
        let resp = test::call_service(&$app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        format!("Bearer {}", body["token"].as_str().unwrap())
    }};
}

#[actix_web::test]
async fn requests_without_a_token_are_unauthorized() {
    let app = app!(state().await);

    for uri in ["/v1/staff", "/v1/customer", "/v1/activity-log"] {
        let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "{}", uri);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["error"].is_string());
    }
}

#[actix_web::test]
async fn register_then_login() {
    let app = app!(state().await);
    register!(app, "owner@shop.vn");

    let login = test::TestRequest::post()
        .uri("/v1/auth")
        .set_json(json!({ "email": "owner@shop.vn", "password": "secret12", "action": "login" }))
        .to_request();
    let resp = test::call_service(&app, login).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let wrong = test::TestRequest::post()
        .uri("/v1/auth")
        .set_json(json!({ "email": "owner@shop.vn", "password": "not-it-12", "action": "login" }))
        .to_request();
    assert_eq!(test::call_service(&app, wrong).await.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn customer_group_round_trip_over_json() {
    let app = app!(state().await);
    let token = register!(app, "owner@shop.vn");

    let create = test::TestRequest::post()
        .uri("/v1/customer-group")
        .insert_header((header::AUTHORIZATION, token.clone()))
        .set_json(json!({ "name": "VIP", "description": "regulars" }))
        .to_request();
    let resp = test::call_service(&app, create).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let group: Value = test::read_body_json(resp).await;
    let id = group["id"].as_str().unwrap().to_string();

    let duplicate = test::TestRequest::post()
        .uri("/v1/customer-group")
        .insert_header((header::AUTHORIZATION, token.clone()))
        .set_json(json!({ "name": "VIP" }))
        .to_request();
    assert_eq!(test::call_service(&app, duplicate).await.status(), StatusCode::CONFLICT);

    let rename_to_self = test::TestRequest::patch()
        .uri(&format!("/v1/customer-group/{}", id))
        .insert_header((header::AUTHORIZATION, token.clone()))
        .set_json(json!({ "name": "VIP", "description": "still regulars" }))
        .to_request();
    assert_eq!(test::call_service(&app, rename_to_self).await.status(), StatusCode::OK);

    let list = test::TestRequest::get()
        .uri("/v1/customer-group")
        .insert_header((header::AUTHORIZATION, token))
        .to_request();
    let groups: Value = test::read_body_json(test::call_service(&app, list).await).await;
    assert_eq!(groups.as_array().unwrap().len(), 1);
    assert_eq!(groups[0]["description"], "still regulars");
}

#[actix_web::test]
async fn staff_create_accepts_multipart_with_avatar() {
    let app = app!(state().await);
    let token = register!(app, "owner@shop.vn");

    let data = json!({
        "name": "Nguyen Van A",
        "email": "a@shop.vn",
        "password": "secret1",
        "position": "Cashier",
        "role": "STAFF",
        "cccd": "001203004567",
        "staffSalary": { "salaryType": "Shift-based pay", "salary": 100 }
    });
    let create = test::TestRequest::post()
        .uri("/v1/staff")
        .insert_header((header::AUTHORIZATION, token.clone()))
        .insert_header((
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        ))
        .set_payload(multipart_body(&data, Some(("avatar.png", &b"\x89PNG\r\n\x1a\n"[..]))))
        .to_request();
    let resp = test::call_service(&app, create).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let staff: Value = test::read_body_json(resp).await;
    assert_eq!(staff["position"], "Cashier");
    assert!(staff["avatar"].as_str().unwrap().ends_with("_avatar.png"));
    assert_eq!(staff["staffSalary"]["salaryType"], "Shift-based pay");

    let list = test::TestRequest::get()
        .uri("/v1/staff")
        .insert_header((header::AUTHORIZATION, token.clone()))
        .to_request();
    let staffs: Value = test::read_body_json(test::call_service(&app, list).await).await;
    assert_eq!(staffs.as_array().unwrap().len(), 1);

    let salary = test::TestRequest::get()
        .uri(&format!("/v1/staff/{}/salary", staff["id"].as_str().unwrap()))
        .insert_header((header::AUTHORIZATION, token))
        .to_request();
    let salary: Value = test::read_body_json(test::call_service(&app, salary).await).await;
    assert_eq!(salary["salaryDebt"], 0);
}

#[actix_web::test]
async fn raw_upload_only_takes_images() {
    let app = app!(state().await);
    let token = register!(app, "owner@shop.vn");

    let text = test::TestRequest::post()
        .uri("/v1/file")
        .insert_header((header::AUTHORIZATION, token.clone()))
        .set_payload("plain text".as_bytes().to_vec())
        .to_request();
    assert_eq!(test::call_service(&app, text).await.status(), StatusCode::BAD_REQUEST);

    let png = test::TestRequest::post()
        .uri("/v1/file")
        .insert_header((header::AUTHORIZATION, token.clone()))
        .set_payload(b"\x89PNG\r\n\x1a\n0000".to_vec())
        .to_request();
    let resp = test::call_service(&app, png).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let uploaded: Value = test::read_body_json(resp).await;
    let key = uploaded["key"].as_str().unwrap().to_string();

    let download = test::TestRequest::get()
        .uri(&format!("/v1/file/{}", key))
        .insert_header((header::AUTHORIZATION, token.clone()))
        .to_request();
    let resp = test::call_service(&app, download).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers().get(header::CONTENT_TYPE).unwrap(), "image/png");

    let delete = test::TestRequest::delete()
        .uri(&format!("/v1/file/{}", key))
        .insert_header((header::AUTHORIZATION, token.clone()))
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, delete).await).await;
    assert_eq!(body["message"], format!("{} removed ...", key));

    let missing = test::TestRequest::get()
        .uri(&format!("/v1/file/{}", key))
        .insert_header((header::AUTHORIZATION, token))
        .to_request();
    assert_eq!(test::call_service(&app, missing).await.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn raw_upload_accepts_images_up_to_the_limit() {
    let app = app!(state().await);
    let token = register!(app, "owner@shop.vn");

    let png = |len: usize| {
        let mut bytes = b"\x89PNG\r\n\x1a\n".to_vec();
        bytes.resize(len, 0);
        bytes
    };

    let medium = test::TestRequest::post()
        .uri("/v1/file")
        .insert_header((header::AUTHORIZATION, token.clone()))
        .set_payload(png(300 * 1024))
        .to_request();
    let resp = test::call_service(&app, medium).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let uploaded: Value = test::read_body_json(resp).await;
    assert!(uploaded["key"].as_str().unwrap().ends_with("_upload.png"));

    let oversized = test::TestRequest::post()
        .uri("/v1/file")
        .insert_header((header::AUTHORIZATION, token))
        .set_payload(png(handlers::file::MAX_UPLOAD_BYTES + 1))
        .to_request();
    let resp = test::call_service(&app, oversized).await;
    assert!(resp.status().is_client_error(), "{}", resp.status());
}

#[actix_web::test]
async fn staff_form_rejects_oversized_file_and_skips_unknown_parts() {
    let app = app!(state().await);
    let token = register!(app, "owner@shop.vn");
    let data = |email: &str| {
        json!({
            "name": "Tran Thi B",
            "email": email,
            "password": "secret1",
            "position": "Cashier",
            "role": "STAFF"
        })
    };
    let send = |body: Vec<u8>| {
        test::TestRequest::post()
            .uri("/v1/staff")
            .insert_header((header::AUTHORIZATION, token.clone()))
            .insert_header((
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            ))
            .set_payload(body)
            .to_request()
    };

    let huge = vec![0u8; handlers::file::MAX_UPLOAD_BYTES + 1];
    let oversized = multipart_body(&data("big@shop.vn"), Some(("big.png", &huge[..])));
    let resp = test::call_service(&app, send(oversized)).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let mut body = format!(
        "--{}\r\nContent-Disposition: form-data; name=\"notes\"\r\n\r\n",
        BOUNDARY
    )
    .into_bytes();
    body.extend_from_slice(&huge);
    body.extend_from_slice(b"\r\n");
    body.extend_from_slice(&multipart_body(&data("small@shop.vn"), None));
    let resp = test::call_service(&app, send(body)).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let list = test::TestRequest::get()
        .uri("/v1/staff")
        .insert_header((header::AUTHORIZATION, token.clone()))
        .to_request();
    let staffs: Value = test::read_body_json(test::call_service(&app, list).await).await;
    assert_eq!(staffs.as_array().unwrap().len(), 1);
    assert_eq!(staffs[0]["email"], "small@shop.vn");
}
