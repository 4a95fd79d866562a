use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 課程的單一上課時段：星期（1~6）加上節次代號（0~9、X、A~D）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSlot {
    pub weekday: u8,
    pub intervals: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseTeacher {
    pub name: String,
}

/// 課程查詢回傳的課程資料，取回後不再變動
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseRecord {
    pub identifier: String,
    pub name: String,
    pub credits: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teacher: Option<CourseTeacher>,
    #[serde(default)]
    pub schedules: Vec<ScheduleSlot>,
}

/// 已加入某學期的課程：原始課程資料加上顯示別名與屬性標籤
///
/// 匯出格式與原始課程欄位攤平在同一層，alias 與 attributes 直接並列。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrolledCourse {
    #[serde(flatten)]
    pub course: CourseRecord,
    pub alias: String,
    #[serde(default)]
    pub attributes: Vec<String>,
}

impl EnrolledCourse {
    /// 列表與課表都以別名優先顯示
    pub fn display_name(&self) -> &str {
        if self.alias.is_empty() {
            &self.course.name
        } else {
            &self.alias
        }
    }
}

/// 使用者自訂的學分屬性，earned_credits 為已修學分累計
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attribute {
    pub name: String,
    pub earned_credits: f64,
}

/// 匯出 / 匯入用的完整文件（schedules 固定包含全部 14 個學期鍵）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanDocument {
    pub schedules: BTreeMap<String, Vec<EnrolledCourse>>,
    pub all_attributes: Vec<Attribute>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub keyword: String,
    pub time: Vec<Vec<String>>,
    pub time_strict_match: bool,
    pub is_full_year: Option<bool>,
    pub excluded_keywords: Vec<String>,
    pub enroll_methods: Vec<String>,
    pub is_english_taught: bool,
    pub is_distance_learning: bool,
    pub has_changed: bool,
    pub is_additional_course: bool,
    pub no_prerequisite: bool,
    pub is_canceled: bool,
    pub is_intensive: bool,
    pub semester: String,
    pub is_precise: bool,
    pub department: Option<String>,
    pub suggested_grade: String,
    pub department_course_type: Option<String>,
    pub is_compulsory: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub query: SearchQuery,
    pub batch_size: u32,
    pub page_index: u32,
    pub sorting: String,
}

impl SearchRequest {
    /// 除了關鍵字與學期之外，其餘篩選條件一律固定為停用 / 預設值
    pub fn new(semester: &str, keyword: &str, batch_size: u32, sorting: &str) -> Self {
        Self {
            query: SearchQuery {
                keyword: keyword.to_string(),
                time: vec![Vec::new(); 6],
                time_strict_match: false,
                is_full_year: None,
                excluded_keywords: Vec::new(),
                enroll_methods: Vec::new(),
                is_english_taught: false,
                is_distance_learning: false,
                has_changed: false,
                is_additional_course: false,
                no_prerequisite: false,
                is_canceled: false,
                is_intensive: false,
                semester: semester.to_string(),
                is_precise: true,
                department: None,
                suggested_grade: String::new(),
                department_course_type: None,
                is_compulsory: None,
            },
            batch_size,
            page_index: 0,
            sorting: sorting.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub total_count: u64,
    #[serde(default)]
    pub courses: Vec<CourseRecord>,
}
