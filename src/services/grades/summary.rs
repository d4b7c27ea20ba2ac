use std::collections::BTreeMap;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::GradeService;
use crate::models::ApiResponse;
use crate::models::courses::entities::Course;
use crate::models::grades::entities::{Grade, LetterGrade, average_percentage, round2};
use crate::models::grades::requests::GradeListQuery;
use crate::models::grades::responses::{CourseGradeSummary, GradeSummaryResponse};
use crate::services::common::{current_user, storage_failure};

pub async fn get_summary(
    service: &GradeService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let grades = match storage
        .list_grades(GradeListQuery {
            student_id: Some(user.id),
            ..Default::default()
        })
        .await
    {
        Ok(grades) => grades,
        Err(e) => return Ok(storage_failure("Failed to load grades", e)),
    };
    let courses = match storage.list_user_courses(user.id).await {
        Ok(courses) => courses,
        Err(e) => return Ok(storage_failure("Failed to load courses", e)),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        summarize_grades(&grades, &courses),
        "Grade summary retrieved successfully",
    )))
}

/// 按课程汇总成绩，GPA 按学分加权（4.0 制）
///
/// 课程已不可见（退课）的成绩仍计入总平均分，但不计入 GPA。
pub fn summarize_grades(grades: &[Grade], courses: &[Course]) -> GradeSummaryResponse {
    let mut by_course: BTreeMap<i64, Vec<&Grade>> = BTreeMap::new();
    for grade in grades {
        by_course.entry(grade.course_id).or_default().push(grade);
    }

    let mut summaries = Vec::new();
    for (course_id, course_grades) in by_course {
        let Some(course) = courses.iter().find(|c| c.id == course_id) else {
            continue;
        };
        let Some(average) = average_percentage(course_grades.iter().copied()) else {
            continue;
        };
        summaries.push(CourseGradeSummary {
            course_id,
            course_code: course.code.clone(),
            course_title: course.title.clone(),
            credits: course.credits,
            grade_count: course_grades.len() as i64,
            average_percentage: round2(average),
            letter: LetterGrade::from_percentage(average),
        });
    }

    let total_credits: i32 = summaries.iter().map(|s| s.credits.max(0)).sum();
    let gpa = (total_credits > 0).then(|| {
        let points: f64 = summaries
            .iter()
            .map(|s| s.letter.grade_points() * s.credits.max(0) as f64)
            .sum();
        round2(points / total_credits as f64)
    });

    GradeSummaryResponse {
        courses: summaries,
        gpa,
        overall_percentage: average_percentage(grades).map(round2),
    }
}
