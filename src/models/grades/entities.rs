use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct Grade {
    pub id: i64,
    pub student_id: i64,
    pub course_id: i64,
    #[serde(default)]
    pub assignment_id: Option<i64>,
    pub score: f64,
    #[serde(default = "default_max_score")]
    pub max_score: f64,
    #[serde(default)]
    pub feedback: Option<String>,
    pub graded_by: i64,
    pub graded_at: DateTime<Utc>,
}

fn default_max_score() -> f64 {
    100.0
}

impl Grade {
    /// 百分制得分
    pub fn percentage(&self) -> f64 {
        if self.max_score <= 0.0 {
            return 0.0;
        }
        self.score / self.max_score * 100.0
    }

    pub fn letter(&self) -> LetterGrade {
        LetterGrade::from_percentage(self.percentage())
    }
}

// 等级成绩
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub enum LetterGrade {
    A,
    B,
    C,
    D,
    F,
}

impl LetterGrade {
    pub const ALL: [LetterGrade; 5] = [
        LetterGrade::A,
        LetterGrade::B,
        LetterGrade::C,
        LetterGrade::D,
        LetterGrade::F,
    ];

    pub fn from_percentage(percentage: f64) -> Self {
        match percentage {
            p if p >= 90.0 => LetterGrade::A,
            p if p >= 80.0 => LetterGrade::B,
            p if p >= 70.0 => LetterGrade::C,
            p if p >= 60.0 => LetterGrade::D,
            _ => LetterGrade::F,
        }
    }

    /// 4.0 绩点
    pub fn grade_points(&self) -> f64 {
        match self {
            LetterGrade::A => 4.0,
            LetterGrade::B => 3.0,
            LetterGrade::C => 2.0,
            LetterGrade::D => 1.0,
            LetterGrade::F => 0.0,
        }
    }
}

impl std::fmt::Display for LetterGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

/// 多条成绩的平均百分比，空列表返回 None
pub fn average_percentage<'a>(grades: impl IntoIterator<Item = &'a Grade>) -> Option<f64> {
    let (sum, count) = grades
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), g| (sum + g.percentage(), count + 1));
    (count > 0).then(|| sum / count as f64)
}

/// 保留两位小数
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grade(score: f64, max_score: f64) -> Grade {
        Grade {
            id: 1,
            student_id: 1,
            course_id: 1,
            assignment_id: None,
            score,
            max_score,
            feedback: None,
            graded_by: 2,
            graded_at: Utc::now(),
        }
    }

    #[test]
    fn test_letter_boundaries() {
        assert_eq!(LetterGrade::from_percentage(90.0), LetterGrade::A);
        assert_eq!(LetterGrade::from_percentage(89.99), LetterGrade::B);
        assert_eq!(LetterGrade::from_percentage(60.0), LetterGrade::D);
        assert_eq!(LetterGrade::from_percentage(12.0), LetterGrade::F);
    }

    #[test]
    fn test_percentage_uses_max_score() {
        assert_eq!(grade(45.0, 50.0).percentage(), 90.0);
        assert_eq!(grade(45.0, 50.0).letter(), LetterGrade::A);
        assert_eq!(grade(5.0, 0.0).percentage(), 0.0);
    }

    #[test]
    fn test_average_percentage() {
        let grades = [grade(80.0, 100.0), grade(45.0, 50.0)];
        assert_eq!(average_percentage(&grades), Some(85.0));
        assert_eq!(average_percentage(&Vec::<Grade>::new()), None);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(83.33333), 83.33);
        assert_eq!(round2(66.666), 66.67);
    }
}
