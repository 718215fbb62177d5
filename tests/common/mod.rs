// This file is part of the product Folio.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

#![allow(dead_code)]

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App, HttpResponse, Result};
use folio::api;
use folio::app_state::AppState;
use folio::config::{
    AppConfig, JwtConfig, LoggingConfig, ProviderConfig, ServerConfig, ValidatedConfig,
};
use folio::iam::middleware::JwtAuthMiddlewareFactory;
use folio::iam::{Identity, JwtService};
use folio::login::{self, OAuthClient};
use folio::portfolio::{self, FilePortfolioStore, PortfolioService};
use folio::public;
use folio::runtime_paths::RuntimePaths;
use folio::util::test_fixtures::TestFixtureRoot;
use std::path::Path;
use std::sync::Arc;

pub const JWT_SECRET: &str = "test-secret";

pub struct TestHarness {
    pub fixture: TestFixtureRoot,
    pub config: Arc<ValidatedConfig>,
    pub runtime_paths: RuntimePaths,
    pub app_state: Arc<AppState>,
    pub jwt_service: Arc<JwtService>,
    pub oauth_client: Arc<OAuthClient>,
    pub portfolio: web::Data<PortfolioService>,
}

pub struct AuthSession {
    pub identity: Identity,
    pub jwt_token: String,
    pub cookie: actix_web::cookie::Cookie<'static>,
}

impl TestHarness {
    pub async fn new() -> Self {
        let fixture = TestFixtureRoot::new_unique("folio-test-suite").expect("fixture root");
        let runtime_paths = fixture.runtime_paths().expect("runtime paths");

        let config = Arc::new(build_config());

        let store = FilePortfolioStore::new(runtime_paths.portfolio_file.clone()).expect("store");
        let portfolio =
            web::Data::new(PortfolioService::new(Arc::new(store)).expect("portfolio service"));

        let jwt_service = Arc::new(JwtService::new(&config));
        let oauth_client = Arc::new(OAuthClient::new(config.provider.clone()));
        let app_state = Arc::new(AppState::new(&config.app.name, runtime_paths.clone()));

        Self {
            fixture,
            config,
            runtime_paths,
            app_state,
            jwt_service,
            oauth_client,
            portfolio,
        }
    }

    pub fn auth_session(&self, id: &str, name: &str, email: &str) -> AuthSession {
        let identity = Identity {
            id: id.to_string(),
            name: name.to_string(),
            email: email.to_string(),
        };
        let token = self.jwt_service.create_token(&identity).expect("jwt token");
        let cookie = self.jwt_service.create_auth_cookie(&token).into_owned();

        AuthSession {
            identity,
            jwt_token: token,
            cookie,
        }
    }

    pub fn portfolio_path(&self) -> &Path {
        &self.runtime_paths.portfolio_file
    }
}

pub fn build_test_app(
    harness: &TestHarness,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::from(harness.config.clone()))
        .app_data(web::Data::from(harness.app_state.clone()))
        .app_data(web::Data::from(harness.jwt_service.clone()))
        .app_data(web::Data::from(harness.oauth_client.clone()))
        .app_data(harness.portfolio.clone())
        .wrap(JwtAuthMiddlewareFactory)
        .configure(login::configure)
        .configure(api::configure)
        .configure(portfolio::configure)
        .configure(public::configure)
        .default_service(web::route().to(test_default_not_found))
}

async fn test_default_not_found(app_state: web::Data<AppState>) -> Result<HttpResponse> {
    folio::public::error::serve_404(
        &app_state.error_renderer,
        Some(app_state.templates.as_ref()),
    )
}

/// A token signed with the harness secret whose expiry is a day in the past.
pub fn expired_token(id: &str, name: &str) -> String {
    use chrono::{Duration, Utc};
    use folio::iam::jwt::Claims;

    let now = Utc::now();
    let claims = Claims {
        sub: id.to_string(),
        name: name.to_string(),
        email: format!("{}@example.com", id),
        iat: (now - Duration::hours(48)).timestamp(),
        exp: (now - Duration::hours(24)).timestamp(),
        iss: "folio".to_string(),
        aud: "folio-users".to_string(),
    };

    jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &jsonwebtoken::EncodingKey::from_secret(JWT_SECRET.as_ref()),
    )
    .expect("expired token")
}

fn build_config() -> ValidatedConfig {
    ValidatedConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
            workers: 1,
        },
        app: AppConfig {
            name: "Folio".to_string(),
            description: "Test instance".to_string(),
        },
        logging: LoggingConfig {
            level: "info".to_string(),
        },
        jwt: JwtConfig {
            secret: JWT_SECRET.to_string(),
            issuer: "folio".to_string(),
            audience: "folio-users".to_string(),
            expiration_hours: 24,
            cookie_name: "jwt".to_string(),
        },
        provider: ProviderConfig {
            client_id: "test-client".to_string(),
            client_secret: "test-client-secret".to_string(),
            redirect_url: "http://127.0.0.1:3000/auth/google/callback".to_string(),
            // Port 9 (discard) is never listening; any exchange attempt
            // fails fast with a connection error.
            auth_url: "http://127.0.0.1:9/authorize".to_string(),
            token_url: "http://127.0.0.1:9/token".to_string(),
            userinfo_url: "http://127.0.0.1:9/userinfo".to_string(),
            scope: "profile email".to_string(),
        },
    }
}
