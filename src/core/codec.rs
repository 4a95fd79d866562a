use crate::core::planner::Planner;
use crate::domain::model::PlanDocument;
use crate::utils::error::{PlannerError, Result};

/// 整份計畫序列化成備份 JSON（縮排兩格，跟原本手動存檔的格式一致）
pub fn serialize(planner: &Planner) -> Result<Vec<u8>> {
    let document = planner.to_document();
    Ok(serde_json::to_vec_pretty(&document)?)
}

/// 從備份 JSON 還原計畫。文件整份解析驗證通過才會產生新狀態，
/// 任何一步失敗呼叫端原有的狀態都不受影響。
pub fn deserialize(data: &[u8], semester_keys: Vec<String>) -> Result<Planner> {
    let value: serde_json::Value = serde_json::from_slice(data)
        .map_err(|e| PlannerError::format(format!("not valid JSON: {}", e)))?;

    let Some(object) = value.as_object() else {
        return Err(PlannerError::format("top level must be an object"));
    };
    for key in ["schedules", "allAttributes"] {
        if !object.contains_key(key) {
            return Err(PlannerError::format(format!("missing required key '{}'", key)));
        }
    }

    let document: PlanDocument = serde_json::from_value(value)
        .map_err(|e| PlannerError::format(format!("malformed document: {}", e)))?;

    for attr in &document.all_attributes {
        if attr.earned_credits < 0.0 {
            return Err(PlannerError::format(format!(
                "attribute '{}' has negative credits",
                attr.name
            )));
        }
    }
    for (semester, courses) in &document.schedules {
        for course in courses {
            if course.course.credits < 0.0 {
                return Err(PlannerError::format(format!(
                    "course '{}' in {} has negative credits",
                    course.course.identifier, semester
                )));
            }
        }
    }

    Ok(Planner::from_document(document, semester_keys))
}
