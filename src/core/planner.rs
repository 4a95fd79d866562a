use crate::domain::model::{Attribute, CourseRecord, EnrolledCourse, PlanDocument};
use crate::utils::error::{PlannerError, Result};
use std::collections::BTreeMap;

/// 整份修課計畫的唯一狀態：學期 → 課程列表，加上屬性學分帳
///
/// 兩個不變量在每次操作後都必須成立：
/// - 課程掛的屬性名稱一定存在於屬性列表（刪除屬性會連鎖清除）
/// - 屬性的 earned_credits 恆等於掛了該屬性的課程學分總和
pub struct Planner {
    semester_keys: Vec<String>,
    schedules: BTreeMap<String, Vec<EnrolledCourse>>,
    attributes: Vec<Attribute>,
}

impl Planner {
    /// 以固定的學期鍵集合建立空計畫，所有學期鍵永遠存在
    pub fn new(semester_keys: Vec<String>) -> Self {
        let schedules = semester_keys
            .iter()
            .map(|k| (k.clone(), Vec::new()))
            .collect();
        Self {
            semester_keys,
            schedules,
            attributes: Vec::new(),
        }
    }

    pub fn semester_keys(&self) -> &[String] {
        &self.semester_keys
    }

    pub fn courses(&self, semester: &str) -> &[EnrolledCourse] {
        self.schedules.get(semester).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// 把查到的課程加進指定學期。別名留空就用課名；屬性名稱未定義的
    /// 直接略過，已定義的依課程學分累加到帳上。
    pub fn add_course(
        &mut self,
        semester: &str,
        course: CourseRecord,
        alias: &str,
        attribute_names: &[String],
    ) -> Result<()> {
        let Some(courses) = self.schedules.get_mut(semester) else {
            return Err(PlannerError::not_found(format!("Semester {}", semester)));
        };

        let mut attributes: Vec<String> = Vec::new();
        for name in attribute_names {
            let defined = self.attributes.iter().any(|a| &a.name == name);
            if defined && !attributes.contains(name) {
                attributes.push(name.clone());
            }
        }

        for attr in self.attributes.iter_mut() {
            if attributes.contains(&attr.name) {
                attr.earned_credits += course.credits;
            }
        }

        let alias = alias.trim();
        let enrolled = EnrolledCourse {
            alias: if alias.is_empty() {
                course.name.clone()
            } else {
                alias.to_string()
            },
            course,
            attributes,
        };

        courses.push(enrolled);
        Ok(())
    }

    /// 依位置移除課程並回補屬性學分（扣到零為止，不會變負數）
    pub fn remove_course(&mut self, semester: &str, index: usize) -> Result<EnrolledCourse> {
        let courses = self
            .schedules
            .get_mut(semester)
            .ok_or_else(|| PlannerError::not_found(format!("Semester {}", semester)))?;

        if index >= courses.len() {
            return Err(PlannerError::not_found(format!(
                "Course #{} in semester {}",
                index, semester
            )));
        }

        let removed = courses.remove(index);
        for attr in self.attributes.iter_mut() {
            if removed.attributes.contains(&attr.name) {
                attr.earned_credits = (attr.earned_credits - removed.course.credits).max(0.0);
            }
        }
        Ok(removed)
    }

    pub fn total_credits(&self, semester: &str) -> f64 {
        self.courses(semester).iter().map(|c| c.course.credits).sum()
    }

    /// 新增屬性。名稱去頭尾空白後為空或已存在都當作沒事，不回報錯誤。
    pub fn define_attribute(&mut self, name: &str) {
        let trimmed = name.trim();
        if trimmed.is_empty() || self.attribute(trimmed).is_some() {
            return;
        }
        self.attributes.push(Attribute {
            name: trimmed.to_string(),
            earned_credits: 0.0,
        });
    }

    /// 刪除屬性並從所有學期的所有課程上清掉這個標籤，累計學分直接捨棄
    pub fn delete_attribute(&mut self, name: &str) {
        self.attributes.retain(|a| a.name != name);
        for courses in self.schedules.values_mut() {
            for course in courses.iter_mut() {
                course.attributes.retain(|a| a != name);
            }
        }
    }

    pub fn to_document(&self) -> PlanDocument {
        PlanDocument {
            schedules: self.schedules.clone(),
            all_attributes: self.attributes.clone(),
        }
    }

    /// 從匯入文件還原。學期鍵以設定檔為準：文件缺的補成空學期、
    /// 多出來的直接丟掉，匯入後鍵集合固定不變。
    pub fn from_document(document: PlanDocument, semester_keys: Vec<String>) -> Self {
        let mut schedules = document.schedules;
        let schedules = semester_keys
            .iter()
            .map(|k| (k.clone(), schedules.remove(k).unwrap_or_default()))
            .collect();
        Self {
            semester_keys,
            schedules,
            attributes: document.all_attributes,
        }
    }
}
