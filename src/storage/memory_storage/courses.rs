//! 课程存储操作

use super::MemoryStorage;
use crate::errors::{CampusError, Result};
use crate::models::{
    common::pagination::paginate,
    courses::{
        entities::Course,
        requests::{CourseListQuery, CreateCourseRequest, UpdateCourseRequest},
        responses::CourseListResponse,
    },
};
use tracing::debug;

fn code_conflict(code: &str) -> CampusError {
    CampusError::conflict(format!("Course code {code} already exists"))
}

impl MemoryStorage {
    /// 创建课程，课程代码不区分大小写唯一
    pub async fn create_course_impl(
        &self,
        instructor_id: i64,
        req: CreateCourseRequest,
    ) -> Result<Course> {
        let code = req.code.trim().to_uppercase();
        let now = chrono::Utc::now();
        self.courses
            .insert_unless(
                |c| c.code.eq_ignore_ascii_case(&code),
                |id| Course {
                    id,
                    code: code.clone(),
                    title: req.title.trim().to_string(),
                    description: req.description,
                    schedule: req.schedule.trim().to_string(),
                    location: req.location,
                    credits: req.credits.unwrap_or(3),
                    semester: req.semester.unwrap_or_default(),
                    instructor_id,
                    students: Vec::new(),
                    created_at: now,
                    updated_at: now,
                },
            )
            .await
            .map_err(|existing| code_conflict(&existing.code))
    }

    /// 列出课程（分页，按课程代码排序）
    pub async fn list_courses_with_pagination_impl(
        &self,
        query: CourseListQuery,
    ) -> Result<CourseListResponse> {
        let search = query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        let mut courses = self
            .courses
            .filter(|c| {
                if let Some(instructor_id) = query.instructor_id
                    && c.instructor_id != instructor_id
                {
                    return false;
                }
                if let Some(student_id) = query.student_id
                    && !c.is_enrolled(student_id)
                {
                    return false;
                }
                match &search {
                    Some(keyword) => {
                        c.code.to_lowercase().contains(keyword)
                            || c.title.to_lowercase().contains(keyword)
                    }
                    None => true,
                }
            })
            .await;
        courses.sort_by(|a, b| a.code.cmp(&b.code));

        let (items, pagination) =
            paginate(courses, query.page.unwrap_or(1), query.size.unwrap_or(10));
        Ok(CourseListResponse { pagination, items })
    }

    /// 更新课程信息
    pub async fn update_course_impl(
        &self,
        course_id: i64,
        update: UpdateCourseRequest,
    ) -> Result<Option<Course>> {
        let code = update.code.map(|c| c.trim().to_uppercase());
        let now = chrono::Utc::now();
        self.courses
            .update_unless(
                course_id,
                |c| code.as_deref().is_some_and(|code| c.code.eq_ignore_ascii_case(code)),
                |c| {
                    if let Some(code) = code.clone() {
                        c.code = code;
                    }
                    if let Some(title) = update.title {
                        c.title = title.trim().to_string();
                    }
                    if let Some(description) = update.description {
                        c.description = Some(description);
                    }
                    if let Some(schedule) = update.schedule {
                        c.schedule = schedule.trim().to_string();
                    }
                    if let Some(location) = update.location {
                        c.location = Some(location);
                    }
                    if let Some(credits) = update.credits {
                        c.credits = credits;
                    }
                    if let Some(semester) = update.semester {
                        c.semester = semester;
                    }
                    c.updated_at = now;
                },
            )
            .await
            .map_err(|existing| code_conflict(&existing.code))
    }

    /// 删除课程
    ///
    /// 同时删除该课程的作业、提交、成绩、聊天室及其消息；
    /// 关联到该课程的笔记保留，只解除关联。
    pub async fn delete_course_impl(&self, course_id: i64) -> Result<bool> {
        if !self.courses.remove(course_id).await {
            return Ok(false);
        }

        let assignment_ids: Vec<i64> = self
            .assignments
            .filter(|a| a.course_id == course_id)
            .await
            .iter()
            .map(|a| a.id)
            .collect();
        let room_ids: Vec<i64> = self
            .chat_rooms
            .filter(|r| r.course_id == Some(course_id))
            .await
            .iter()
            .map(|r| r.id)
            .collect();

        let submissions = self
            .submissions
            .remove_where(|s| assignment_ids.contains(&s.assignment_id))
            .await;
        let assignments = self.assignments.remove_where(|a| a.course_id == course_id).await;
        let grades = self.grades.remove_where(|g| g.course_id == course_id).await;
        let messages = self
            .messages
            .remove_where(|m| room_ids.contains(&m.chat_room_id))
            .await;
        let rooms = self
            .chat_rooms
            .remove_where(|r| r.course_id == Some(course_id))
            .await;
        let notes = self
            .notes
            .update_where(|n| n.course_id == Some(course_id), |n| n.course_id = None)
            .await;
        let events = self
            .calendar_events
            .remove_where(|e| e.course_id == Some(course_id))
            .await;
        let attendance = self.attendance.remove_where(|a| a.course_id == course_id).await;

        debug!(
            "Course {} deleted: {} assignments, {} submissions, {} grades, {} rooms, {} messages, {} events, {} attendance records removed, {} notes detached",
            course_id,
            assignments,
            submissions,
            grades,
            rooms,
            messages,
            events,
            attendance,
            notes
        );
        Ok(true)
    }

    /// 学生选课，课程不存在返回 None
    pub async fn enroll_student_impl(
        &self,
        course_id: i64,
        student_id: i64,
    ) -> Result<Option<Course>> {
        let Some(course) = self.courses.get(course_id).await else {
            return Ok(None);
        };
        if course.is_enrolled(student_id) {
            return Err(CampusError::conflict(format!(
                "Student {student_id} is already enrolled in {}",
                course.code
            )));
        }

        let now = chrono::Utc::now();
        let course = self
            .courses
            .update(course_id, |c| {
                if !c.students.contains(&student_id) {
                    c.students.push(student_id);
                }
                c.updated_at = now;
            })
            .await;
        // 课程聊天室同步加入新成员
        self.chat_rooms
            .update_where(
                |r| r.course_id == Some(course_id) && !r.has_participant(student_id),
                |r| r.participants.push(student_id),
            )
            .await;
        Ok(course)
    }

    /// 学生退课，课程不存在返回 None
    pub async fn drop_student_impl(
        &self,
        course_id: i64,
        student_id: i64,
    ) -> Result<Option<Course>> {
        let Some(course) = self.courses.get(course_id).await else {
            return Ok(None);
        };
        if !course.is_enrolled(student_id) {
            return Err(CampusError::not_found(format!(
                "Student {student_id} is not enrolled in {}",
                course.code
            )));
        }

        let now = chrono::Utc::now();
        let course = self
            .courses
            .update(course_id, |c| {
                c.students.retain(|s| *s != student_id);
                c.updated_at = now;
            })
            .await;
        self.chat_rooms
            .update_where(
                |r| r.course_id == Some(course_id),
                |r| r.participants.retain(|p| *p != student_id),
            )
            .await;
        Ok(course)
    }
}
