//! 成绩存储操作

use super::MemoryStorage;
use crate::errors::Result;
use crate::models::{
    common::pagination::paginate,
    grades::{
        entities::Grade,
        requests::{CreateGradeRequest, GradeListQuery, UpdateGradeRequest},
        responses::{GradeListResponse, GradeView},
    },
};

impl MemoryStorage {
    /// 录入成绩
    ///
    /// 关联作业时每个 (学生, 作业) 只保留一条成绩，重复录入会覆盖原记录。
    pub async fn upsert_grade_impl(&self, graded_by: i64, req: CreateGradeRequest) -> Result<Grade> {
        let now = chrono::Utc::now();
        let max_score = req.max_score.unwrap_or(100.0);

        let build = |id| Grade {
            id,
            student_id: req.student_id,
            course_id: req.course_id,
            assignment_id: req.assignment_id,
            score: req.score,
            max_score,
            feedback: req.feedback.clone(),
            graded_by,
            graded_at: now,
        };

        let grade = match req.assignment_id {
            Some(assignment_id) => {
                self.grades
                    .upsert(
                        |g| g.student_id == req.student_id && g.assignment_id == Some(assignment_id),
                        |g| {
                            g.score = req.score;
                            g.max_score = max_score;
                            g.feedback = req.feedback.clone();
                            g.graded_by = graded_by;
                            g.graded_at = now;
                        },
                        build,
                    )
                    .await
                    .0
            }
            None => self.grades.insert_with(build).await,
        };
        Ok(grade)
    }

    fn grade_matches(grade: &Grade, query: &GradeListQuery) -> bool {
        if let Some(student_id) = query.student_id
            && grade.student_id != student_id
        {
            return false;
        }
        match &query.course_ids {
            Some(ids) => ids.contains(&grade.course_id),
            None => true,
        }
    }

    /// 列出成绩，按评分时间倒序
    pub async fn list_grades_impl(&self, query: GradeListQuery) -> Result<Vec<Grade>> {
        let mut grades = self
            .grades
            .filter(|g| Self::grade_matches(g, &query))
            .await;
        grades.sort_by(|a, b| b.graded_at.cmp(&a.graded_at).then(b.id.cmp(&a.id)));
        Ok(grades)
    }

    /// 列出成绩（分页）
    pub async fn list_grades_with_pagination_impl(
        &self,
        query: GradeListQuery,
    ) -> Result<GradeListResponse> {
        let page = query.page.unwrap_or(1);
        let size = query.size.unwrap_or(10);
        let grades = self.list_grades_impl(query).await?;

        let (items, pagination) = paginate(grades, page, size);
        Ok(GradeListResponse {
            pagination,
            items: items.into_iter().map(GradeView::from).collect(),
        })
    }

    /// 更新成绩
    pub async fn update_grade_impl(
        &self,
        grade_id: i64,
        update: UpdateGradeRequest,
    ) -> Result<Option<Grade>> {
        let now = chrono::Utc::now();
        Ok(self
            .grades
            .update(grade_id, |g| {
                if let Some(score) = update.score {
                    g.score = score;
                }
                if let Some(max_score) = update.max_score {
                    g.max_score = max_score;
                }
                if let Some(feedback) = update.feedback {
                    g.feedback = Some(feedback);
                }
                g.graded_at = now;
            })
            .await)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::fixture_storage;
    use crate::models::grades::{
        entities::LetterGrade,
        requests::{CreateGradeRequest, GradeListQuery, UpdateGradeRequest},
    };

    fn request(assignment_id: Option<i64>, score: f64) -> CreateGradeRequest {
        CreateGradeRequest {
            student_id: 3,
            course_id: 1,
            assignment_id,
            score,
            max_score: None,
            feedback: None,
        }
    }

    #[tokio::test]
    async fn test_upsert_grade_replaces_assignment_grade() {
        let storage = fixture_storage();
        let before = storage.grades.len().await;

        let grade = storage.upsert_grade_impl(1, request(Some(1), 70.0)).await.unwrap();
        assert_eq!(grade.id, 1);
        assert_eq!(grade.score, 70.0);
        assert_eq!(storage.grades.len().await, before);

        // 不关联作业的成绩总是新增
        storage.upsert_grade_impl(1, request(None, 88.0)).await.unwrap();
        storage.upsert_grade_impl(1, request(None, 91.0)).await.unwrap();
        assert_eq!(storage.grades.len().await, before + 2);
    }

    #[tokio::test]
    async fn test_list_grades_filters_and_orders() {
        let storage = fixture_storage();
        let grades = storage
            .list_grades_impl(GradeListQuery {
                student_id: Some(3),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(grades.len(), 2);
        assert!(grades[0].graded_at >= grades[1].graded_at);

        let page = storage
            .list_grades_with_pagination_impl(GradeListQuery {
                course_ids: Some(vec![3]),
                size: Some(1),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(page.pagination.total, 2);
        assert_eq!(page.pagination.pages, 2);
        assert_eq!(page.items.len(), 1);
    }

    #[tokio::test]
    async fn test_update_grade_recomputes_letter() {
        let storage = fixture_storage();
        let grade = storage
            .update_grade_impl(
                2,
                UpdateGradeRequest {
                    score: Some(91.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(grade.letter(), LetterGrade::A);
        assert_eq!(grade.feedback.as_deref(), Some("Works, but follow the style guide."));
        assert!(
            storage
                .update_grade_impl(404, UpdateGradeRequest::default())
                .await
                .unwrap()
                .is_none()
        );
    }
}
