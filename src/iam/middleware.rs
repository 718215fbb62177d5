// This file is part of the product Folio.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::web::Data;
use actix_web::Error;
use actix_web::{HttpMessage, HttpRequest};
use std::future::{ready, Ready};
use std::pin::Pin;
use std::rc::Rc; // Services are per-thread

use super::jwt::JwtService;
use super::types::Identity;

/// Trait to add authentication methods to HttpRequest. The identity lives
/// in per-request extensions, never in ambient state.
pub trait AuthRequest {
    fn identity(&self) -> Option<Identity>;
    fn is_authenticated(&self) -> bool;
}

impl AuthRequest for HttpRequest {
    fn identity(&self) -> Option<Identity> {
        self.extensions().get::<Identity>().cloned()
    }

    fn is_authenticated(&self) -> bool {
        self.identity().is_some()
    }
}

// Session gate: resolves the token cookie into a per-request identity.
// Verification failures are "not authenticated", never request errors.
pub struct JwtAuthMiddlewareFactory;

impl<S, B> Transform<S, ServiceRequest> for JwtAuthMiddlewareFactory
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = Pin<Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let jwt_service_data = req.app_data::<Data<JwtService>>().cloned();
        let service = self.service.clone();

        Box::pin(async move {
            let mut clear_cookie: Option<actix_web::cookie::Cookie> = None;

            if let Some(jwt_service) = jwt_service_data {
                if let Some(cookie) = req.cookie(jwt_service.cookie_name()) {
                    match jwt_service.verify_token(cookie.value()) {
                        Ok(claims) => {
                            req.extensions_mut().insert(claims.identity());
                        }
                        Err(err) => {
                            // Expired or tampered cookie: remove it from the
                            // client and continue anonymously.
                            log::debug!("Session token rejected: {}", err);
                            clear_cookie = Some(jwt_service.create_logout_cookie());
                        }
                    }
                }
            }

            let mut res = service.call(req).await?;

            if let Some(cookie) = clear_cookie {
                res.response_mut().add_cookie(&cookie).map_err(|e| {
                    log::error!("Failed to set clearing cookie: {}", e);
                    actix_web::error::ErrorInternalServerError("Failed to set clearing cookie")
                })?;
            }

            Ok(res)
        })
    }
}
