//! 按角色返回导航菜单，切换角色只影响返回的菜单，不修改任何数据

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::ApiResponse;
use crate::models::navigation::{NavigationQuery, NavigationResponse, navigation_for};
use crate::services::common::current_user;

pub struct NavigationService;

impl NavigationService {
    pub fn new_lazy() -> Self {
        Self
    }

    // 默认返回当前用户角色的菜单
    pub async fn get_navigation(
        &self,
        request: &HttpRequest,
        query: NavigationQuery,
    ) -> ActixResult<HttpResponse> {
        let user = match current_user(request) {
            Ok(user) => user,
            Err(resp) => return Ok(resp),
        };

        let role = query.role.unwrap_or(user.role);
        let response = NavigationResponse {
            role,
            items: navigation_for(role),
        };
        Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Navigation retrieved successfully",
        )))
    }
}
