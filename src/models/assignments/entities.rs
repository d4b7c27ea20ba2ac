use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct Assignment {
    pub id: i64,
    pub course_id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "type")]
    pub assignment_type: AssignmentType,
    pub due_date: DateTime<Utc>,
    #[serde(default = "default_max_points")]
    pub max_points: f64,
    // 截止后是否允许迟交
    #[serde(default)]
    pub allow_late_submission: bool,
    pub created_by: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_max_points() -> f64 {
    100.0
}

// 作业类型
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub enum AssignmentType {
    #[default]
    Homework,
    Project,
    Quiz,
    Exam,
}

/// 学生提交记录，每个 (作业, 学生) 至多一条
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct Submission {
    pub id: i64,
    pub assignment_id: i64,
    pub student_id: i64,
    pub content: String,
    #[serde(default)]
    pub attachment_url: Option<String>,
    pub submitted_at: DateTime<Utc>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub feedback: Option<String>,
    #[serde(default)]
    pub graded_at: Option<DateTime<Utc>>,
}

impl Submission {
    pub fn is_graded(&self) -> bool {
        self.score.is_some()
    }

    pub fn is_late(&self, due_date: DateTime<Utc>) -> bool {
        self.submitted_at > due_date
    }
}

// 作业状态（按学生视角推导，不存储）
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub enum AssignmentStatus {
    Pending,
    Submitted,
    Late,
    Graded,
    Overdue,
}

impl AssignmentStatus {
    /// 根据截止时间、提交情况与当前时间推导状态
    pub fn derive(
        due_date: DateTime<Utc>,
        submission: Option<&Submission>,
        now: DateTime<Utc>,
    ) -> Self {
        match submission {
            Some(s) if s.is_graded() => AssignmentStatus::Graded,
            Some(s) if s.is_late(due_date) => AssignmentStatus::Late,
            Some(_) => AssignmentStatus::Submitted,
            None if now > due_date => AssignmentStatus::Overdue,
            None => AssignmentStatus::Pending,
        }
    }
}

impl std::fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            AssignmentStatus::Pending => "pending",
            AssignmentStatus::Submitted => "submitted",
            AssignmentStatus::Late => "late",
            AssignmentStatus::Graded => "graded",
            AssignmentStatus::Overdue => "overdue",
        };
        write!(f, "{s}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn submission_at(at: DateTime<Utc>) -> Submission {
        Submission {
            id: 1,
            assignment_id: 1,
            student_id: 1,
            content: "answer".to_string(),
            attachment_url: None,
            submitted_at: at,
            score: None,
            feedback: None,
            graded_at: None,
        }
    }

    #[test]
    fn test_type_defaults_to_homework() {
        let assignment: Assignment = serde_json::from_str(
            r#"{"id":1,"course_id":1,"title":"Quiz 1","due_date":"2026-10-01T00:00:00Z",
                "created_by":1,"created_at":"2026-09-01T00:00:00Z","updated_at":"2026-09-01T00:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(assignment.assignment_type, AssignmentType::Homework);

        let json = serde_json::to_value(Assignment {
            assignment_type: AssignmentType::Quiz,
            ..assignment
        })
        .unwrap();
        assert_eq!(json["type"], "quiz");
    }

    #[test]
    fn test_submitted_before_due_is_submitted() {
        let due = Utc::now() + Duration::days(1);
        let sub = submission_at(Utc::now());
        assert_eq!(
            AssignmentStatus::derive(due, Some(&sub), Utc::now()),
            AssignmentStatus::Submitted
        );
    }

    #[test]
    fn test_no_submission_after_due_is_overdue() {
        let due = Utc::now() - Duration::hours(1);
        assert_eq!(
            AssignmentStatus::derive(due, None, Utc::now()),
            AssignmentStatus::Overdue
        );
    }

    #[test]
    fn test_no_submission_before_due_is_pending() {
        let due = Utc::now() + Duration::hours(1);
        assert_eq!(
            AssignmentStatus::derive(due, None, Utc::now()),
            AssignmentStatus::Pending
        );
    }

    #[test]
    fn test_late_and_graded() {
        let due = Utc::now() - Duration::days(2);
        let mut sub = submission_at(Utc::now() - Duration::days(1));
        assert_eq!(
            AssignmentStatus::derive(due, Some(&sub), Utc::now()),
            AssignmentStatus::Late
        );

        sub.score = Some(80.0);
        assert_eq!(
            AssignmentStatus::derive(due, Some(&sub), Utc::now()),
            AssignmentStatus::Graded
        );
    }
}
