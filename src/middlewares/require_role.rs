/*!
 * 基于角色的访问控制中间件
 *
 * 必须放在 RequireJWT 之后使用。
 *
 * ```rust,ignore
 * web::post()
 *     .to(create_course)
 *     .wrap(RequireRole::new(&UserRole::Professor))
 * ```
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::info;

use crate::models::{
    ErrorCode,
    users::entities::{User, UserRole},
};

use super::create_error_response;

#[derive(Clone)]
pub struct RequireRole {
    allowed_roles: Vec<UserRole>,
}

impl RequireRole {
    pub fn new(role: &UserRole) -> Self {
        Self {
            allowed_roles: vec![*role],
        }
    }

    /// 任一角色即可
    pub fn new_any(roles: &[&UserRole]) -> Self {
        Self {
            allowed_roles: roles.iter().map(|r| **r).collect(),
        }
    }

    pub fn allows(&self, role: UserRole) -> bool {
        self.allowed_roles.contains(&role)
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireRole
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireRoleMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireRoleMiddleware {
            service: Rc::new(service),
            policy: self.clone(),
        }))
    }
}

pub struct RequireRoleMiddleware<S> {
    service: Rc<S>,
    policy: RequireRole,
}

impl<S, B> Service<ServiceRequest> for RequireRoleMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let policy = self.policy.clone();

        Box::pin(async move {
            let user = req.extensions().get::<User>().map(|u| (u.id, u.role));

            match user {
                Some((_, role)) if policy.allows(role) => {
                    Ok(srv.call(req).await?.map_into_left_body())
                }
                Some((user_id, role)) => {
                    info!(
                        "Access denied for user {} (role: {}). Allowed roles: {:?}",
                        user_id, role, policy.allowed_roles
                    );
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::FORBIDDEN,
                            ErrorCode::PermissionDenied,
                            &format!("This action requires one of: {:?}", policy.allowed_roles),
                        )
                        .map_into_right_body(),
                    ))
                }
                None => {
                    info!("Role check without an authenticated user; RequireJWT must run first");
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::UNAUTHORIZED,
                            ErrorCode::Unauthorized,
                            "Authentication required",
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_policy() {
        let professor_only = RequireRole::new(&UserRole::Professor);
        assert!(professor_only.allows(UserRole::Professor));
        assert!(!professor_only.allows(UserRole::Student));

        let anyone = RequireRole::new_any(UserRole::all_roles());
        assert!(anyone.allows(UserRole::Student));
        assert!(anyone.allows(UserRole::Professor));
    }
}
