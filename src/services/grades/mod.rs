pub mod create;
pub mod delete;
pub mod list;
pub mod summary;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::ErrorCode;
use crate::models::courses::entities::Course;
use crate::models::grades::entities::Grade;
use crate::models::grades::requests::{CreateGradeRequest, GradeQueryParams, UpdateGradeRequest};
use crate::models::users::entities::User;
use crate::services::common::{load_course_for_instructor, not_found, storage_failure};
use crate::storage::Storage;

pub struct GradeService {
    storage: Option<Arc<dyn Storage>>,
}

impl GradeService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 学生查看自己的成绩，教师查看任教课程的成绩
    pub async fn list_grades(
        &self,
        request: &HttpRequest,
        query: GradeQueryParams,
    ) -> ActixResult<HttpResponse> {
        list::list_grades(self, request, query).await
    }

    pub async fn create_grade(
        &self,
        request: &HttpRequest,
        grade_data: CreateGradeRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_grade(self, request, grade_data).await
    }

    pub async fn update_grade(
        &self,
        request: &HttpRequest,
        grade_id: i64,
        update_data: UpdateGradeRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_grade(self, request, grade_id, update_data).await
    }

    pub async fn delete_grade(&self, request: &HttpRequest, grade_id: i64) -> ActixResult<HttpResponse> {
        delete::delete_grade(self, request, grade_id).await
    }

    // 各课程平均分与 GPA
    pub async fn get_summary(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        summary::get_summary(self, request).await
    }
}

/// 成绩及其课程，要求当前用户是任课教师
async fn load_grade_for_instructor(
    storage: &Arc<dyn Storage>,
    grade_id: i64,
    user: &User,
) -> Result<(Grade, Course), HttpResponse> {
    let grade = match storage.get_grade_by_id(grade_id).await {
        Ok(Some(grade)) => grade,
        Ok(None) => return Err(not_found(ErrorCode::GradeNotFound, "Grade not found")),
        Err(e) => return Err(storage_failure("Failed to load grade", e)),
    };
    let course = load_course_for_instructor(storage, grade.course_id, user).await?;
    Ok((grade, course))
}
