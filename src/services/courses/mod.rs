pub mod attendance;
pub mod create;
pub mod delete;
pub mod enrollment;
pub mod get;
pub mod list;
pub mod roster;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::courses::requests::{
    CourseQueryParams, CreateCourseRequest, EnrollStudentRequest, RecordAttendanceRequest,
    UpdateCourseRequest,
};
use crate::storage::Storage;

pub struct CourseService {
    storage: Option<Arc<dyn Storage>>,
}

impl CourseService {
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

    // 学生查看已选课程，教师查看自己任教的课程
    pub async fn list_courses(
        &self,
        request: &HttpRequest,
        query: CourseQueryParams,
    ) -> ActixResult<HttpResponse> {
        list::list_courses(self, request, query).await
    }

    pub async fn get_course(&self, request: &HttpRequest, course_id: i64) -> ActixResult<HttpResponse> {
        get::get_course(self, request, course_id).await
    }

    pub async fn create_course(
        &self,
        request: &HttpRequest,
        course_data: CreateCourseRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_course(self, request, course_data).await
    }

    pub async fn update_course(
        &self,
        request: &HttpRequest,
        course_id: i64,
        update_data: UpdateCourseRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_course(self, request, course_id, update_data).await
    }

    // 删除课程，级联删除作业、提交、成绩、课程聊天室、日历事件与出勤记录
    pub async fn delete_course(
        &self,
        request: &HttpRequest,
        course_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_course(self, request, course_id).await
    }

    // 选课：学生为自己选课，教师为自己的课程添加学生
    pub async fn enroll_student(
        &self,
        request: &HttpRequest,
        course_id: i64,
        enroll_data: EnrollStudentRequest,
    ) -> ActixResult<HttpResponse> {
        enrollment::enroll_student(self, request, course_id, enroll_data).await
    }

    // 退课
    pub async fn drop_student(
        &self,
        request: &HttpRequest,
        course_id: i64,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        enrollment::drop_student(self, request, course_id, student_id).await
    }

    // 教师记录某天的到场学生
    pub async fn record_attendance(
        &self,
        request: &HttpRequest,
        course_id: i64,
        attendance_data: RecordAttendanceRequest,
    ) -> ActixResult<HttpResponse> {
        attendance::record_attendance(self, request, course_id, attendance_data).await
    }

    pub async fn list_attendance(
        &self,
        request: &HttpRequest,
        course_id: i64,
    ) -> ActixResult<HttpResponse> {
        attendance::list_attendance(self, request, course_id).await
    }

    // 学生查看本人出勤
    pub async fn my_attendance(
        &self,
        request: &HttpRequest,
        course_id: i64,
    ) -> ActixResult<HttpResponse> {
        attendance::my_attendance(self, request, course_id).await
    }

    pub async fn get_roster(&self, request: &HttpRequest, course_id: i64) -> ActixResult<HttpResponse> {
        roster::get_roster(self, request, course_id).await
    }
}
