//! 作业与提交存储操作

use super::MemoryStorage;
use crate::errors::{CampusError, Result};
use crate::models::assignments::{
    entities::{Assignment, Submission},
    requests::{
        AssignmentListQuery, CreateAssignmentRequest, SubmitAssignmentRequest,
        UpdateAssignmentRequest,
    },
};
use crate::storage::SubmissionListQuery;

impl MemoryStorage {
    /// 创建作业，必须提供截止时间
    pub async fn create_assignment_impl(
        &self,
        created_by: i64,
        req: CreateAssignmentRequest,
    ) -> Result<Assignment> {
        let due_date = req
            .due_date
            .ok_or_else(|| CampusError::validation("Assignment due date is required"))?;

        let now = chrono::Utc::now();
        let assignment = self
            .assignments
            .insert_with(|id| Assignment {
                id,
                course_id: req.course_id,
                title: req.title.trim().to_string(),
                description: req.description,
                assignment_type: req.assignment_type.unwrap_or_default(),
                due_date,
                max_points: req.max_points.unwrap_or(100.0),
                allow_late_submission: req.allow_late_submission,
                created_by,
                created_at: now,
                updated_at: now,
            })
            .await;
        Ok(assignment)
    }

    /// 列出作业，按截止时间升序
    pub async fn list_assignments_impl(
        &self,
        query: AssignmentListQuery,
    ) -> Result<Vec<Assignment>> {
        let mut assignments = self
            .assignments
            .filter(|a| match &query.course_ids {
                Some(ids) => ids.contains(&a.course_id),
                None => true,
            })
            .await;
        assignments.sort_by(|a, b| a.due_date.cmp(&b.due_date).then(a.id.cmp(&b.id)));
        Ok(assignments)
    }

    /// 更新作业
    pub async fn update_assignment_impl(
        &self,
        assignment_id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>> {
        let now = chrono::Utc::now();
        Ok(self
            .assignments
            .update(assignment_id, |a| {
                if let Some(title) = update.title {
                    a.title = title.trim().to_string();
                }
                if let Some(description) = update.description {
                    a.description = Some(description);
                }
                if let Some(assignment_type) = update.assignment_type {
                    a.assignment_type = assignment_type;
                }
                if let Some(due_date) = update.due_date {
                    a.due_date = due_date;
                }
                if let Some(max_points) = update.max_points {
                    a.max_points = max_points;
                }
                if let Some(allow) = update.allow_late_submission {
                    a.allow_late_submission = allow;
                }
                a.updated_at = now;
            })
            .await)
    }

    /// 删除作业，同时删除其提交与关联成绩
    pub async fn delete_assignment_impl(&self, assignment_id: i64) -> Result<bool> {
        if !self.assignments.remove(assignment_id).await {
            return Ok(false);
        }
        self.submissions
            .remove_where(|s| s.assignment_id == assignment_id)
            .await;
        self.grades
            .remove_where(|g| g.assignment_id == Some(assignment_id))
            .await;
        Ok(true)
    }

    /// 提交作业
    ///
    /// 每个 (作业, 学生) 只保留一条提交。重新提交覆盖内容并清空评分。
    pub async fn upsert_submission_impl(
        &self,
        assignment_id: i64,
        student_id: i64,
        req: SubmitAssignmentRequest,
    ) -> Result<Submission> {
        let now = chrono::Utc::now();
        let content = req.content;
        let attachment_url = req.attachment_url;

        let (submission, _) = self
            .submissions
            .upsert(
                |s| s.assignment_id == assignment_id && s.student_id == student_id,
                |s| {
                    s.content = content.clone();
                    s.attachment_url = attachment_url.clone();
                    s.submitted_at = now;
                    s.score = None;
                    s.feedback = None;
                    s.graded_at = None;
                },
                |id| Submission {
                    id,
                    assignment_id,
                    student_id,
                    content: content.clone(),
                    attachment_url: attachment_url.clone(),
                    submitted_at: now,
                    score: None,
                    feedback: None,
                    graded_at: None,
                },
            )
            .await;
        Ok(submission)
    }

    /// 列出提交，按提交时间升序
    pub async fn list_submissions_impl(
        &self,
        query: SubmissionListQuery,
    ) -> Result<Vec<Submission>> {
        let mut submissions = self
            .submissions
            .filter(|s| {
                if let Some(ids) = &query.assignment_ids
                    && !ids.contains(&s.assignment_id)
                {
                    return false;
                }
                query.student_id.is_none_or(|id| s.student_id == id)
            })
            .await;
        submissions.sort_by(|a, b| a.submitted_at.cmp(&b.submitted_at));
        Ok(submissions)
    }

    /// 为提交评分
    pub async fn grade_submission_impl(
        &self,
        submission_id: i64,
        score: f64,
        feedback: Option<String>,
    ) -> Result<Option<Submission>> {
        let now = chrono::Utc::now();
        Ok(self
            .submissions
            .update(submission_id, |s| {
                s.score = Some(score);
                s.feedback = feedback;
                s.graded_at = Some(now);
            })
            .await)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::fixture_storage;
    use crate::models::assignments::entities::AssignmentType;
    use crate::models::assignments::requests::{
        AssignmentListQuery, CreateAssignmentRequest, SubmitAssignmentRequest,
        UpdateAssignmentRequest,
    };
    use crate::storage::SubmissionListQuery;
    use chrono::{Duration, Utc};

    fn submit(content: &str) -> SubmitAssignmentRequest {
        SubmitAssignmentRequest {
            content: content.to_string(),
            attachment_url: None,
        }
    }

    #[tokio::test]
    async fn test_create_assignment_requires_due_date() {
        let storage = fixture_storage();
        let err = storage
            .create_assignment_impl(
                1,
                CreateAssignmentRequest {
                    course_id: 1,
                    title: "Recursion".to_string(),
                    description: None,
                    assignment_type: None,
                    due_date: None,
                    max_points: None,
                    allow_late_submission: false,
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E006");

        let created = storage
            .create_assignment_impl(
                1,
                CreateAssignmentRequest {
                    course_id: 1,
                    title: " Recursion ".to_string(),
                    description: None,
                    assignment_type: Some(AssignmentType::Quiz),
                    due_date: Some(Utc::now() + Duration::days(3)),
                    max_points: None,
                    allow_late_submission: false,
                },
            )
            .await
            .unwrap();
        assert_eq!(created.title, "Recursion");
        assert_eq!(created.max_points, 100.0);
        assert_eq!(created.assignment_type, AssignmentType::Quiz);
    }

    #[tokio::test]
    async fn test_list_assignments_sorted_by_due_date() {
        let storage = fixture_storage();
        let list = storage
            .list_assignments_impl(AssignmentListQuery {
                course_ids: Some(vec![1, 2]),
            })
            .await
            .unwrap();
        assert_eq!(list.len(), 5);
        assert!(list.windows(2).all(|w| w[0].due_date <= w[1].due_date));
        assert!(list.iter().all(|a| a.course_id == 1 || a.course_id == 2));
    }

    #[tokio::test]
    async fn test_resubmission_resets_grading() {
        let storage = fixture_storage();
        // 作业 1 中学生 3 的提交已评分
        let before = storage
            .submissions
            .find(|s| s.assignment_id == 1 && s.student_id == 3)
            .await
            .unwrap();
        assert!(before.is_graded());

        let after = storage
            .upsert_submission_impl(1, 3, submit("second attempt"))
            .await
            .unwrap();
        assert_eq!(after.id, before.id);
        assert_eq!(after.content, "second attempt");
        assert!(!after.is_graded());
        assert!(after.feedback.is_none());
        assert_eq!(
            storage
                .submissions
                .count(|s| s.assignment_id == 1 && s.student_id == 3)
                .await,
            1
        );
    }

    #[tokio::test]
    async fn test_grade_submission_and_list() {
        let storage = fixture_storage();
        let created = storage
            .upsert_submission_impl(5, 6, submit("bst.rs"))
            .await
            .unwrap();
        let graded = storage
            .grade_submission_impl(created.id, 91.0, Some("Nice".to_string()))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(graded.score, Some(91.0));
        assert!(graded.graded_at.is_some());

        let listed = storage
            .list_submissions_impl(SubmissionListQuery {
                assignment_ids: Some(vec![5]),
                student_id: None,
            })
            .await
            .unwrap();
        assert_eq!(listed.len(), 1);
        assert!(
            storage
                .grade_submission_impl(404, 1.0, None)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_update_and_delete_assignment() {
        let storage = fixture_storage();
        let updated = storage
            .update_assignment_impl(
                2,
                UpdateAssignmentRequest {
                    allow_late_submission: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert!(!updated.allow_late_submission);

        assert!(storage.delete_assignment_impl(1).await.unwrap());
        assert_eq!(storage.submissions.count(|s| s.assignment_id == 1).await, 0);
        assert_eq!(storage.grades.count(|g| g.assignment_id == Some(1)).await, 0);
        // 不关联作业的成绩保留
        assert!(storage.grades.get(5).await.is_some());
        assert!(!storage.delete_assignment_impl(1).await.unwrap());
    }
}
