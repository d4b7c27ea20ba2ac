pub mod create;
pub mod delete;
pub mod get;
pub mod grade;
pub mod list;
pub mod submissions;
pub mod submit;
pub mod update;
pub mod views;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::assignments::entities::Assignment;
use crate::models::assignments::requests::{
    AssignmentQueryParams, CreateAssignmentRequest, GradeSubmissionRequest,
    SubmitAssignmentRequest, UpdateAssignmentRequest,
};
use crate::models::courses::entities::Course;
use crate::models::users::entities::User;
use crate::models::ErrorCode;
use crate::services::common::{
    load_course_for_instructor, load_course_for_member, not_found, storage_failure,
};
use crate::storage::Storage;

pub struct AssignmentService {
    storage: Option<Arc<dyn Storage>>,
}

impl AssignmentService {
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

    // 学生看到带状态的作业，教师看到带提交统计的作业
    pub async fn list_assignments(
        &self,
        request: &HttpRequest,
        query: AssignmentQueryParams,
    ) -> ActixResult<HttpResponse> {
        list::list_assignments(self, request, query).await
    }

    pub async fn get_assignment(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_assignment(self, request, assignment_id).await
    }

    // 发布作业并通知选课学生
    pub async fn create_assignment(
        &self,
        request: &HttpRequest,
        assignment_data: CreateAssignmentRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_assignment(self, request, assignment_data).await
    }

    pub async fn update_assignment(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
        update_data: UpdateAssignmentRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_assignment(self, request, assignment_id, update_data).await
    }

    pub async fn delete_assignment(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_assignment(self, request, assignment_id).await
    }

    // 学生提交作业
    pub async fn submit_assignment(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
        submission: SubmitAssignmentRequest,
    ) -> ActixResult<HttpResponse> {
        submit::submit_assignment(self, request, assignment_id, submission).await
    }

    // 教师查看提交列表
    pub async fn list_submissions(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
    ) -> ActixResult<HttpResponse> {
        submissions::list_submissions(self, request, assignment_id).await
    }

    // 教师评分
    pub async fn grade_submission(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
        submission_id: i64,
        grade_data: GradeSubmissionRequest,
    ) -> ActixResult<HttpResponse> {
        grade::grade_submission(self, request, assignment_id, submission_id, grade_data).await
    }
}

async fn load_assignment(
    storage: &Arc<dyn Storage>,
    assignment_id: i64,
) -> Result<Assignment, HttpResponse> {
    match storage.get_assignment_by_id(assignment_id).await {
        Ok(Some(assignment)) => Ok(assignment),
        Ok(None) => Err(not_found(
            ErrorCode::AssignmentNotFound,
            "Assignment not found",
        )),
        Err(e) => Err(storage_failure("Failed to load assignment", e)),
    }
}

/// 作业及其课程，要求当前用户是课程成员
pub(crate) async fn load_assignment_for_member(
    storage: &Arc<dyn Storage>,
    assignment_id: i64,
    user: &User,
) -> Result<(Assignment, Course), HttpResponse> {
    let assignment = load_assignment(storage, assignment_id).await?;
    let course = load_course_for_member(storage, assignment.course_id, user).await?;
    Ok((assignment, course))
}

/// 作业及其课程，要求当前用户是任课教师
pub(crate) async fn load_assignment_for_instructor(
    storage: &Arc<dyn Storage>,
    assignment_id: i64,
    user: &User,
) -> Result<(Assignment, Course), HttpResponse> {
    let assignment = load_assignment(storage, assignment_id).await?;
    let course = load_course_for_instructor(storage, assignment.course_id, user).await?;
    Ok((assignment, course))
}
