use crate::utils::error::{PlannerError, Result};
use chrono::Datelike;

/// 年級的中文數字，大一到大七
const GRADE_NUMERALS: [&str; 7] = ["一", "二", "三", "四", "五", "六", "七"];

/// 依基準學年展開全部學期鍵，例如 112 起七個學年 → "112-1".."118-2"
pub fn semester_keys(base_year: u16, year_span: u16) -> Vec<String> {
    (base_year..base_year + year_span)
        .flat_map(|y| [format!("{}-1", y), format!("{}-2", y)])
        .collect()
}

/// 學期鍵轉成「一上」「二下」這種顯示文字，超出年級範圍就原樣顯示
pub fn semester_label(base_year: u16, key: &str) -> String {
    let Some((year_str, term_str)) = key.split_once('-') else {
        return key.to_string();
    };
    let Ok(year) = year_str.parse::<u16>() else {
        return key.to_string();
    };
    if year < base_year {
        return key.to_string();
    }
    let grade = (year - base_year + 1) as usize;
    if grade > GRADE_NUMERALS.len() {
        return key.to_string();
    }
    let term = match term_str {
        "1" => "上",
        "2" => "下",
        _ => return key.to_string(),
    };
    format!("{}{}", GRADE_NUMERALS[grade - 1], term)
}

/// 檢查使用者輸入的查詢學期格式（民國年-學期，例如 113-2）
pub fn validate_semester_key(key: &str) -> Result<()> {
    let valid = key
        .split_once('-')
        .map(|(year, term)| {
            !year.is_empty()
                && year.chars().all(|c| c.is_ascii_digit())
                && matches!(term, "1" | "2")
        })
        .unwrap_or(false);

    if valid {
        Ok(())
    } else {
        Err(PlannerError::input(format!(
            "Invalid semester key '{}', expected e.g. 113-2",
            key
        )))
    }
}

/// 以今天日期推出目前學期：8 月起算上學期，2~7 月為前一學年的下學期
pub fn current_semester_key() -> String {
    semester_key_for(chrono::Local::now().date_naive())
}

fn semester_key_for(date: chrono::NaiveDate) -> String {
    let year = date.year();
    let month = date.month();
    if month >= 8 {
        format!("{}-1", year - 1911)
    } else if month == 1 {
        format!("{}-1", year - 1912)
    } else {
        format!("{}-2", year - 1912)
    }
}
