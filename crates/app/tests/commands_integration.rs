//! End-to-end command runs against a mock backend

mod support;

use partsdesk_app::cli::{
    Commands, LineSpec, PaymentArg, ProductCommands, QuoteCommands, SaleCommands,
    SupplierCommands, UserCommands,
};
use partsdesk_app::commands;
use partsdesk_app::utils::output::{Exit, Output};
use serde_json::json;
use support::{TestApp, SAMPLE_JWT};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

fn products_body() -> serde_json::Value {
    json!({
        "data": {
            "items": [
                { "id": 1, "nombre": "Bujía", "precio": "55.00", "stock": 40 },
                { "id": 2, "nombre": "Balata", "precio": 320, "stock": 3 },
                { "id": 3, "nombre": "Filtro", "precio": 89.5, "stock": 9 }
            ]
        }
    })
}

async fn run(app: &TestApp, command: Commands) -> Exit {
    commands::run(&app.ctx, command, Output::new(true)).await
}

#[tokio::test]
async fn protected_command_without_credential_redirects_without_network() {
    let app = TestApp::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.server)
        .await;

    let exit = run(&app, Commands::Dashboard).await;

    assert_eq!(exit, Exit::SignedOut);
}

#[tokio::test]
async fn dashboard_renders_when_session_is_valid() {
    let app = TestApp::signed_in().await;
    let bearer = format!("Bearer {SAMPLE_JWT}");
    Mock::given(method("GET"))
        .and(path("/products"))
        .and(header("authorization", bearer.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(products_body()))
        .expect(2)
        .mount(&app.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/sales"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&app.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/quotes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": { "data": [] } })))
        .expect(1)
        .mount(&app.server)
        .await;

    let exit = run(&app, Commands::Dashboard).await;

    assert_eq!(exit, Exit::Success);
    assert_eq!(app.stored_token().await.as_deref(), Some(SAMPLE_JWT));
}

#[tokio::test]
async fn rejected_session_is_purged_and_redirected() {
    let app = TestApp::signed_in().await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&app.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/suppliers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&app.server)
        .await;

    let exit = run(&app, Commands::Suppliers {
        command: SupplierCommands::List { search: None },
    })
    .await;

    assert_eq!(exit, Exit::SignedOut);
    assert!(app.stored_token().await.is_none());
}

#[tokio::test]
async fn login_command_stores_credential() {
    let app = TestApp::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({ "username": "ana", "password": "secreto1" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "data": { "access_token": SAMPLE_JWT } })),
        )
        .mount(&app.server)
        .await;

    let login = Commands::Login { username: "ana".into(), password: "secreto1".into() };
    let exit = run(&app, login).await;

    assert_eq!(exit, Exit::Success);
    assert_eq!(app.stored_token().await.as_deref(), Some(SAMPLE_JWT));
}

#[tokio::test]
async fn failed_login_reports_failure_and_stores_nothing() {
    let app = TestApp::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "Credenciales inválidas" })),
        )
        .mount(&app.server)
        .await;

    let login = Commands::Login { username: "ana".into(), password: "wrong-pass".into() };
    let exit = run(&app, login).await;

    assert_eq!(exit, Exit::Failed);
    assert!(app.stored_token().await.is_none());
}

#[tokio::test]
async fn logout_then_whoami_is_signed_out() {
    let app = TestApp::signed_in().await;

    assert_eq!(run(&app, Commands::Whoami).await, Exit::Success);
    assert_eq!(run(&app, Commands::Logout).await, Exit::Success);
    assert_eq!(run(&app, Commands::Whoami).await, Exit::SignedOut);
}

#[tokio::test]
async fn quote_create_prices_lines_from_catalog() {
    let app = TestApp::signed_in().await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(products_body()))
        .mount(&app.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/products/2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "data": { "id": 2, "nombre": "Balata", "precio": "320.00" } })),
        )
        .mount(&app.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/quotes"))
        .and(body_json(json!({
            "clienteNombre": "Taller Ruiz",
            "clienteEmail": "ruiz@example.com",
            "items": [{ "productId": 2, "cantidad": 2, "precioUnitario": 320.0 }]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "data": { "id": 11, "codigo": "COT-011", "clienteNombre": "Taller Ruiz", "total": "640.00" }
        })))
        .expect(1)
        .mount(&app.server)
        .await;

    let exit = run(&app, Commands::Quotes {
        command: QuoteCommands::Create {
            customer: "Taller Ruiz".into(),
            email: "ruiz@example.com".into(),
            items: vec![LineSpec { product_id: 2, quantity: 2 }],
        },
    })
    .await;

    assert_eq!(exit, Exit::Success);
}

#[tokio::test]
async fn invalid_quote_is_rejected_before_posting() {
    let app = TestApp::signed_in().await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(products_body()))
        .mount(&app.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/products/1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "id": 1, "nombre": "Bujía", "precio": 55 })),
        )
        .mount(&app.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/quotes"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&app.server)
        .await;

    let exit = run(&app, Commands::Quotes {
        command: QuoteCommands::Create {
            customer: "Taller Ruiz".into(),
            email: "not-an-email".into(),
            items: vec![LineSpec { product_id: 1, quantity: 1 }],
        },
    })
    .await;

    assert_eq!(exit, Exit::Failed);
}

#[tokio::test]
async fn sale_create_sends_payment_method() {
    let app = TestApp::signed_in().await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(products_body()))
        .mount(&app.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/products/1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "id": 1, "nombre": "Bujía", "precio": 55 })),
        )
        .mount(&app.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/sales"))
        .and(body_json(json!({
            "clienteNombre": "Mostrador",
            "metodoPago": "TARJETA",
            "items": [{ "productId": 1, "cantidad": 4, "precioUnitario": 55.0 }]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 30, "clienteNombre": "Mostrador", "total": 220, "metodoPago": "TARJETA"
        })))
        .expect(1)
        .mount(&app.server)
        .await;

    let exit = run(&app, Commands::Sales {
        command: SaleCommands::Create {
            customer: "Mostrador".into(),
            email: Some("  ".into()),
            phone: None,
            payment: PaymentArg::Card,
            items: vec![LineSpec { product_id: 1, quantity: 4 }],
        },
    })
    .await;

    assert_eq!(exit, Exit::Success);
}

#[tokio::test]
async fn backend_failure_after_authorization_is_reported() {
    let app = TestApp::signed_in().await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(products_body()))
        .mount(&app.server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/products/2"))
        .respond_with(
            ResponseTemplate::new(409).set_body_json(json!({ "message": "producto con ventas" })),
        )
        .mount(&app.server)
        .await;

    let exit = run(&app, Commands::Products { command: ProductCommands::Delete { id: 2 } }).await;

    assert_eq!(exit, Exit::Failed);
    assert!(app.stored_token().await.is_some());
}

#[tokio::test]
async fn user_deactivation_patches_status() {
    let app = TestApp::signed_in().await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&app.server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/user/5/status"))
        .and(body_json(json!({ "status": false })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "ok" })))
        .expect(1)
        .mount(&app.server)
        .await;

    let exit = run(&app, Commands::Users { command: UserCommands::Deactivate { id: 5 } }).await;

    assert_eq!(exit, Exit::Success);
}

#[tokio::test]
async fn file_session_survives_between_invocations() {
    let server = wiremock::MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "access_token": SAMPLE_JWT })),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .and(header("authorization", format!("Bearer {SAMPLE_JWT}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(2)
        .mount(&server)
        .await;

    let mut config = partsdesk_domain::Config::default();
    config.api.base_url = server.uri();
    config.session.backend = partsdesk_domain::SessionBackend::File;
    config.session.path = Some(dir.path().to_path_buf());

    let first = partsdesk_app::AppContext::new(config.clone()).unwrap();
    let login = Commands::Login { username: "ana".into(), password: "secreto1".into() };
    assert_eq!(commands::run(&first, login, Output::new(true)).await, Exit::Success);
    drop(first);

    let second = partsdesk_app::AppContext::new(config).unwrap();
    let list =
        Commands::Products { command: ProductCommands::List { search: None, low_stock: false } };
    assert_eq!(commands::run(&second, list, Output::new(true)).await, Exit::Success);
}
