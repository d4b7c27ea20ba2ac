use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::models::{
    ApiResponse,
    users::requests::{UserListParams, UserListQuery},
};
use crate::services::common::storage_failure;

pub async fn list_users(
    service: &UserService,
    query: UserListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let (page, size) = query.pagination.normalized();
    let list_query = UserListQuery {
        page: Some(page),
        size: Some(size),
        role: query.role,
        search: query.search,
    };

    match storage.list_users_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "User list retrieved successfully",
        ))),
        Err(e) => Ok(storage_failure("Failed to retrieve user list", e)),
    }
}
