// This file is part of the product Folio.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use actix_web::rt::System;
use actix_web::{middleware::Logger, web, App, HttpResponse, HttpServer, Result};
use log::{info, LevelFilter};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

mod api;
mod app_state;
mod bootstrap;
mod config;
mod iam;
mod login;
mod portfolio;
mod public;
mod runtime_paths;
mod templates;
mod util;

use app_state::AppState;
use iam::middleware::JwtAuthMiddlewareFactory;
use iam::JwtService;
use login::OAuthClient;
use portfolio::{FilePortfolioStore, PortfolioService};

fn main() {
    let exit_code = run();
    std::process::exit(exit_code);
}

fn run() -> i32 {
    let runtime_root = match parse_args() {
        Ok(root) => root,
        Err(error) => {
            eprintln!("❌ Invalid command line arguments: {}", error);
            eprintln!("❌ Use -C <root> to set the runtime directory.");
            return 1;
        }
    };

    let bootstrap = match bootstrap::bootstrap_runtime(&runtime_root) {
        Ok(result) => result,
        Err(error) => {
            eprintln!("❌ Bootstrap error: {}", error);
            eprintln!("❌ Application cannot start with invalid configuration.");
            return 1;
        }
    };

    if bootstrap.created_config {
        eprintln!("[bootstrap] first run: review config.yaml before exposing the server");
    }

    let result = System::new().block_on(run_server(bootstrap));
    match result {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("❌ Server failed to start: {}", error);
            1
        }
    }
}

fn parse_args() -> Result<PathBuf, String> {
    let mut args = std::env::args().skip(1);
    let mut root = PathBuf::from(".");

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-C" => {
                let value = args
                    .next()
                    .ok_or_else(|| "-C requires a directory argument".to_string())?;
                root = PathBuf::from(value);
            }
            other => return Err(format!("Unknown argument: {}", other)),
        }
    }

    Ok(root)
}

async fn run_server(bootstrap: bootstrap::BootstrapResult) -> std::io::Result<()> {
    let validated_config = Arc::new(bootstrap.validated_config);
    let runtime_paths = bootstrap.runtime_paths;

    // Parse log level from config
    let log_level = match validated_config.logging.level.to_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        _ => LevelFilter::Info,
    };

    // Configure logging with a stable format
    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] {}: {}",
                chrono::Utc::now().format("%Y-%m-%d %H:%M:%S%.3f UTC"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();

    info!("Runtime root: {}", runtime_paths.root.display());
    info!("Portfolio file: {}", runtime_paths.portfolio_file.display());
    if !validated_config.has_provider_credentials() {
        log::warn!(
            "auth.provider credentials are not configured; /auth/google will fail until they are set"
        );
    }

    let store = FilePortfolioStore::new(runtime_paths.portfolio_file.clone())
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    let portfolio = PortfolioService::new(Arc::new(store))
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    info!("✅ Portfolio store initialized successfully");

    let jwt_service = Arc::new(JwtService::new(&validated_config));
    let oauth_client = Arc::new(OAuthClient::new(validated_config.provider.clone()));
    let app_state = Arc::new(AppState::new(
        &validated_config.app.name,
        runtime_paths.clone(),
    ));
    info!(
        "✅ App state initialized with app name: {}",
        validated_config.app.name
    );

    let host = validated_config.server.host.clone();
    let port = validated_config.server.port;
    let workers = validated_config.server.workers;

    let portfolio_data = web::Data::new(portfolio);
    let factory = {
        let validated_config = validated_config.clone();
        let app_state = app_state.clone();
        let jwt_service = jwt_service.clone();
        let oauth_client = oauth_client.clone();
        let portfolio_data = portfolio_data.clone();

        move || {
            App::new()
                .app_data(web::Data::from(validated_config.clone()))
                .app_data(web::Data::from(app_state.clone()))
                .app_data(web::Data::from(jwt_service.clone()))
                .app_data(web::Data::from(oauth_client.clone()))
                .app_data(portfolio_data.clone())
                .wrap(Logger::default())
                .wrap(JwtAuthMiddlewareFactory)
                .configure(login::configure)
                .configure(api::configure)
                .configure(portfolio::configure)
                .configure(public::configure)
                .default_service(web::route().to(default_not_found))
        }
    };

    info!("Server is running on http://{}:{}", host, port);

    HttpServer::new(factory)
        .workers(workers)
        .bind((host.as_str(), port))?
        .run()
        .await
}

async fn default_not_found(app_state: web::Data<AppState>) -> Result<HttpResponse> {
    public::error::serve_404(
        &app_state.error_renderer,
        Some(app_state.templates.as_ref()),
    )
}
