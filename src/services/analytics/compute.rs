//! 课程统计的纯计算部分

use chrono::{DateTime, Utc};

use crate::models::analytics::{AssignmentAnalytics, CourseAnalytics, CourseOverview, LetterCount};
use crate::models::assignments::entities::{Assignment, Submission};
use crate::models::courses::entities::Course;
use crate::models::grades::entities::{Grade, LetterGrade, average_percentage, round2};

fn rate(part: i64, whole: i64) -> f64 {
    if whole <= 0 {
        return 0.0;
    }
    round2(part as f64 / whole as f64 * 100.0)
}

/// 各等级人次，始终包含 A 到 F
pub fn letter_distribution(grades: &[&Grade]) -> Vec<LetterCount> {
    LetterGrade::ALL
        .iter()
        .map(|letter| LetterCount {
            letter: *letter,
            count: grades.iter().filter(|g| g.letter() == *letter).count() as i64,
        })
        .collect()
}

/// 单个作业的提交统计，只计入仍在选课名单中的学生
pub fn assignment_analytics(
    assignment: &Assignment,
    course: &Course,
    submissions: &[Submission],
    now: DateTime<Utc>,
) -> AssignmentAnalytics {
    let enrollment = course.students.len() as i64;
    let mine: Vec<&Submission> = submissions
        .iter()
        .filter(|s| s.assignment_id == assignment.id && course.is_enrolled(s.student_id))
        .collect();
    let submitted = mine.len() as i64;
    let late = mine
        .iter()
        .filter(|s| s.is_late(assignment.due_date))
        .count() as i64;
    let missing = if now > assignment.due_date {
        (enrollment - submitted).max(0)
    } else {
        0
    };
    let scores: Vec<f64> = mine.iter().filter_map(|s| s.score).collect();
    let average_score =
        (!scores.is_empty()).then(|| round2(scores.iter().sum::<f64>() / scores.len() as f64));

    AssignmentAnalytics {
        assignment_id: assignment.id,
        title: assignment.title.clone(),
        due_date: assignment.due_date,
        submitted,
        on_time: submitted - late,
        late,
        missing,
        submission_rate: rate(submitted, enrollment),
        average_score,
    }
}

pub fn course_analytics(
    course: &Course,
    assignments: &[Assignment],
    submissions: &[Submission],
    grades: &[Grade],
    now: DateTime<Utc>,
) -> CourseAnalytics {
    let enrollment = course.students.len() as i64;
    let course_grades: Vec<&Grade> = grades.iter().filter(|g| g.course_id == course.id).collect();

    let mut items: Vec<AssignmentAnalytics> = assignments
        .iter()
        .filter(|a| a.course_id == course.id)
        .map(|a| assignment_analytics(a, course, submissions, now))
        .collect();
    items.sort_by_key(|a| a.due_date);

    CourseAnalytics {
        course_id: course.id,
        course_code: course.code.clone(),
        course_title: course.title.clone(),
        enrollment,
        average_percentage: average_percentage(course_grades.iter().copied()).map(round2),
        letter_distribution: letter_distribution(&course_grades),
        assignments: items,
    }
}

pub fn course_overview(
    course: &Course,
    assignments: &[Assignment],
    submissions: &[Submission],
    grades: &[Grade],
) -> CourseOverview {
    let enrollment = course.students.len() as i64;
    let assignment_ids: Vec<i64> = assignments
        .iter()
        .filter(|a| a.course_id == course.id)
        .map(|a| a.id)
        .collect();
    let submitted = submissions
        .iter()
        .filter(|s| assignment_ids.contains(&s.assignment_id) && course.is_enrolled(s.student_id))
        .count() as i64;
    let assignment_count = assignment_ids.len() as i64;

    CourseOverview {
        course_id: course.id,
        course_code: course.code.clone(),
        course_title: course.title.clone(),
        enrollment,
        assignment_count,
        average_percentage: average_percentage(grades.iter().filter(|g| g.course_id == course.id))
            .map(round2),
        submission_rate: rate(submitted, enrollment * assignment_count),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory_storage::fixtures::FixtureSet;
    use chrono::TimeZone;

    fn fixture_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_rate_handles_empty_denominator() {
        assert_eq!(rate(3, 0), 0.0);
        assert_eq!(rate(1, 3), 33.33);
    }

    #[test]
    fn test_cs101_analytics() {
        let set = FixtureSet::embedded().unwrap();
        let course = set.courses.iter().find(|c| c.code == "CS101").unwrap();
        let analytics = course_analytics(
            course,
            &set.assignments,
            &set.submissions,
            &set.grades,
            fixture_now(),
        );

        assert_eq!(analytics.enrollment, 3);
        assert_eq!(analytics.letter_distribution.len(), 5);
        assert_eq!(analytics.assignments.len(), 3);

        // 作业 1：三人均已提交，其中一人迟交，两份已评分
        let first = &analytics.assignments[0];
        assert_eq!(first.assignment_id, 1);
        assert_eq!(first.submitted, 3);
        assert_eq!(first.late, 1);
        assert_eq!(first.on_time, 2);
        assert_eq!(first.missing, 0);
        assert_eq!(first.submission_rate, 100.0);
        assert_eq!(first.average_score, Some(86.5));

        // 作业 2 已截止，只有一人提交
        let second = &analytics.assignments[1];
        assert_eq!(second.assignment_id, 2);
        assert_eq!(second.missing, 2);

        // 作业 3 尚未截止，未提交不计缺交
        let third = &analytics.assignments[2];
        assert_eq!(third.assignment_id, 3);
        assert_eq!(third.missing, 0);
    }

    #[test]
    fn test_dropped_student_submissions_are_ignored() {
        let set = FixtureSet::embedded().unwrap();
        let mut course = set.courses.iter().find(|c| c.code == "CS101").unwrap().clone();
        // 学生 5 已提交作业 1 后退课
        course.students.retain(|s| *s != 5);

        let analytics = course_analytics(
            &course,
            &set.assignments,
            &set.submissions,
            &set.grades,
            fixture_now(),
        );
        assert_eq!(analytics.enrollment, 2);
        for item in &analytics.assignments {
            assert!(item.submitted <= analytics.enrollment);
            assert!(item.submission_rate <= 100.0);
        }
        let first = &analytics.assignments[0];
        assert_eq!(first.submitted, 2);
        assert_eq!(first.late, 0);
        assert_eq!(first.submission_rate, 100.0);
        assert_eq!(first.average_score, Some(86.5));

        let overview = course_overview(&course, &set.assignments, &set.submissions, &set.grades);
        assert!(overview.submission_rate <= 100.0);
    }

    #[test]
    fn test_overview_of_empty_course() {
        let set = FixtureSet::embedded().unwrap();
        let course = set.courses.iter().find(|c| c.code == "CS350").unwrap();
        let overview = course_overview(course, &set.assignments, &set.submissions, &set.grades);

        assert_eq!(overview.enrollment, 0);
        assert_eq!(overview.assignment_count, 0);
        assert_eq!(overview.average_percentage, None);
        assert_eq!(overview.submission_rate, 0.0);
    }

    #[test]
    fn test_letter_distribution_counts_every_letter() {
        let set = FixtureSet::embedded().unwrap();
        let refs: Vec<&Grade> = set.grades.iter().collect();
        let distribution = letter_distribution(&refs);
        let total: i64 = distribution.iter().map(|l| l.count).sum();
        assert_eq!(total, set.grades.len() as i64);
        assert_eq!(distribution[0].letter, LetterGrade::A);
    }
}
