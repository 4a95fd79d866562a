use crate::domain::model::{EnrolledCourse, ScheduleSlot};

/// 課表的固定座標：星期一到六，節次 0~9、X、A~D 共 15 節
pub const WEEKDAYS: [u8; 6] = [1, 2, 3, 4, 5, 6];
pub const INTERVALS: [&str; 15] = [
    "0", "1", "2", "3", "4", "5", "6", "7", "8", "9", "X", "A", "B", "C", "D",
];
const WEEKDAY_LABELS: [&str; 6] = ["一", "二", "三", "四", "五", "六"];

pub fn weekday_label(weekday: u8) -> &'static str {
    WEEKDAYS
        .iter()
        .position(|&d| d == weekday)
        .map(|i| WEEKDAY_LABELS[i])
        .unwrap_or("?")
}

/// 一個學期的週課表。所有 6x15 格子都存在，沒課的格子是空列表。
pub struct TimeGrid {
    cells: Vec<Vec<Vec<String>>>,
}

impl TimeGrid {
    fn empty() -> Self {
        Self {
            cells: vec![vec![Vec::new(); INTERVALS.len()]; WEEKDAYS.len()],
        }
    }

    /// 取 (星期, 節次) 格子裡的課程顯示名稱，座標不在表上回空列表
    pub fn cell(&self, weekday: u8, interval: &str) -> &[String] {
        let day = WEEKDAYS.iter().position(|&d| d == weekday);
        let slot = INTERVALS.iter().position(|&i| i == interval);
        match (day, slot) {
            (Some(d), Some(s)) => &self.cells[d][s],
            _ => &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cells
            .iter()
            .all(|row| row.iter().all(|cell| cell.is_empty()))
    }
}

/// 把一個學期的課程投影成週課表。同一格允許多門課並存（不做衝堂檢查），
/// 格子內的順序就是課程加入的順序。
pub fn project(courses: &[EnrolledCourse]) -> TimeGrid {
    let mut grid = TimeGrid::empty();
    for course in courses {
        for slot in &course.course.schedules {
            let Some(day) = WEEKDAYS.iter().position(|&d| d == slot.weekday) else {
                continue;
            };
            for interval in &slot.intervals {
                if let Some(idx) = INTERVALS.iter().position(|i| i == interval) {
                    grid.cells[day][idx].push(course.display_name().to_string());
                }
            }
        }
    }
    grid
}

/// 沒有任何固定上課時間的課程，不進課表、另外條列
pub fn courses_without_schedule(courses: &[EnrolledCourse]) -> Vec<&EnrolledCourse> {
    courses
        .iter()
        .filter(|c| c.course.schedules.is_empty())
        .collect()
}

/// 時段的顯示文字，例如「一 2,3,4; 三 X」，沒資料顯示「無資料」
pub fn format_schedule(slots: &[ScheduleSlot]) -> String {
    if slots.is_empty() {
        return "無資料".to_string();
    }
    slots
        .iter()
        .map(|s| format!("{} {}", weekday_label(s.weekday), s.intervals.join(",")))
        .collect::<Vec<_>>()
        .join("; ")
}
