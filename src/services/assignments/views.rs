//! 作业列表视图的组装

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::models::assignments::entities::{Assignment, AssignmentStatus, Submission};
use crate::models::assignments::responses::{ProfessorAssignment, StudentAssignment};
use crate::models::courses::entities::Course;

pub fn student_view(
    assignment: Assignment,
    course_code: &str,
    submission: Option<Submission>,
    now: DateTime<Utc>,
) -> StudentAssignment {
    let status = AssignmentStatus::derive(assignment.due_date, submission.as_ref(), now);
    StudentAssignment {
        assignment,
        course_code: course_code.to_string(),
        status,
        submission,
    }
}

pub fn professor_view(
    assignment: Assignment,
    course: &Course,
    submissions: &[Submission],
) -> ProfessorAssignment {
    let own: Vec<&Submission> = submissions
        .iter()
        .filter(|s| s.assignment_id == assignment.id && course.is_enrolled(s.student_id))
        .collect();
    ProfessorAssignment {
        course_code: course.code.clone(),
        enrolled_count: course.students.len() as i64,
        submitted_count: own.len() as i64,
        graded_count: own.iter().filter(|s| s.is_graded()).count() as i64,
        assignment,
    }
}

/// 一组作业对应的学生视图，作业按传入顺序返回
pub fn student_views(
    assignments: Vec<Assignment>,
    courses: &[Course],
    submissions: Vec<Submission>,
    now: DateTime<Utc>,
) -> Vec<StudentAssignment> {
    let codes: HashMap<i64, &str> = courses.iter().map(|c| (c.id, c.code.as_str())).collect();
    let mut by_assignment: HashMap<i64, Submission> = submissions
        .into_iter()
        .map(|s| (s.assignment_id, s))
        .collect();

    assignments
        .into_iter()
        .map(|a| {
            let code = codes.get(&a.course_id).copied().unwrap_or_default();
            let submission = by_assignment.remove(&a.id);
            student_view(a, code, submission, now)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::assignments::entities::AssignmentType;
    use chrono::Duration;

    fn assignment(id: i64, course_id: i64, due: DateTime<Utc>) -> Assignment {
        Assignment {
            id,
            course_id,
            title: format!("A{id}"),
            description: None,
            assignment_type: AssignmentType::Homework,
            due_date: due,
            max_points: 100.0,
            allow_late_submission: false,
            created_by: 1,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn submission(id: i64, assignment_id: i64, score: Option<f64>) -> Submission {
        Submission {
            id,
            assignment_id,
            student_id: 3,
            content: "work".to_string(),
            attachment_url: None,
            submitted_at: Utc::now() - Duration::days(3),
            score,
            feedback: None,
            graded_at: None,
        }
    }

    fn course() -> Course {
        Course {
            id: 1,
            code: "CS101".to_string(),
            title: "Intro".to_string(),
            description: None,
            schedule: "Mon".to_string(),
            location: None,
            credits: 3,
            semester: String::new(),
            instructor_id: 1,
            students: vec![3, 4, 5],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_student_views_attach_own_submission() {
        let now = Utc::now();
        let views = student_views(
            vec![
                assignment(1, 1, now + Duration::days(1)),
                assignment(2, 1, now - Duration::days(1)),
                assignment(3, 1, now + Duration::days(5)),
            ],
            &[course()],
            vec![submission(10, 1, None), submission(11, 3, Some(90.0))],
            now,
        );
        let statuses: Vec<AssignmentStatus> = views.iter().map(|v| v.status).collect();
        assert_eq!(
            statuses,
            vec![
                AssignmentStatus::Submitted,
                AssignmentStatus::Overdue,
                AssignmentStatus::Graded
            ]
        );
        assert!(views.iter().all(|v| v.course_code == "CS101"));
    }

    #[test]
    fn test_professor_view_counts() {
        let view = professor_view(
            assignment(1, 1, Utc::now()),
            &course(),
            &[
                submission(10, 1, None),
                submission(11, 1, Some(50.0)),
                submission(12, 2, Some(70.0)),
            ],
        );
        assert_eq!(view.enrolled_count, 3);
        assert_eq!(view.submitted_count, 2);
        assert_eq!(view.graded_count, 1);
    }

    #[test]
    fn test_professor_view_skips_dropped_students() {
        let mut course = course();
        course.students.retain(|s| *s != 3);
        let view = professor_view(
            assignment(1, 1, Utc::now()),
            &course,
            &[submission(10, 1, Some(80.0))],
        );
        assert_eq!(view.enrolled_count, 2);
        assert_eq!(view.submitted_count, 0);
        assert_eq!(view.graded_count, 0);
    }
}
