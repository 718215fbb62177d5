// This file is part of the product Folio.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

mod common;

use actix_web::{http::StatusCode, test};

#[actix_web::test]
async fn home_renders_for_anonymous_user() {
    let harness = common::TestHarness::new().await;
    let app = test::init_service(common::build_test_app(&harness)).await;

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = String::from_utf8(test::read_body(resp).await.to_vec()).expect("utf8 body");
    assert!(body.contains("Sign in with Google"));
    assert!(body.contains("No portfolios yet."));
    assert!(!body.contains("Signed in as"));
}

#[actix_web::test]
async fn home_renders_table_and_own_record_for_signed_in_user() {
    let harness = common::TestHarness::new().await;
    let app = test::init_service(common::build_test_app(&harness)).await;

    std::fs::write(
        harness.portfolio_path(),
        r#"{
  "u1": {
    "user": "Ada Lovelace",
    "aboutMe": "First programmer",
    "projects": "Analytical Engine",
    "githubContributions": "n/a"
  },
  "u2": {
    "user": "Grace Hopper",
    "aboutMe": "Compiler pioneer",
    "projects": "COBOL",
    "githubContributions": "n/a"
  }
}"#,
    )
    .expect("seed portfolio");

    let session = harness.auth_session("u1", "Ada Lovelace", "ada@example.com");
    let req = test::TestRequest::get()
        .uri("/")
        .cookie(session.cookie.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = String::from_utf8(test::read_body(resp).await.to_vec()).expect("utf8 body");
    assert!(body.contains("Signed in as Ada Lovelace"));
    // Own record prefills the edit form
    assert!(body.contains("First programmer"));
    // The full table is public
    assert!(body.contains("Grace Hopper"));
    assert!(body.contains("Compiler pioneer"));
}

#[actix_web::test]
async fn missing_portfolio_file_renders_an_empty_table() {
    let harness = common::TestHarness::new().await;
    let app = test::init_service(common::build_test_app(&harness)).await;

    std::fs::remove_file(harness.portfolio_path()).expect("remove portfolio");

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = String::from_utf8(test::read_body(resp).await.to_vec()).expect("utf8 body");
    assert!(body.contains("No portfolios yet."));
}

#[actix_web::test]
async fn corrupt_portfolio_file_is_a_500_and_the_process_survives() {
    let harness = common::TestHarness::new().await;
    let app = test::init_service(common::build_test_app(&harness)).await;

    std::fs::write(harness.portfolio_path(), "{ this is not json").expect("corrupt portfolio");

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    // Later requests still work; no auto-repair beyond the empty-file case.
    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[actix_web::test]
async fn unknown_route_renders_404_page() {
    let harness = common::TestHarness::new().await;
    let app = test::init_service(common::build_test_app(&harness)).await;

    let req = test::TestRequest::get().uri("/no-such-page").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
