use crate::core::codec;
use crate::core::planner::Planner;
use crate::core::semester::validate_semester_key;
use crate::domain::model::CourseRecord;
use crate::domain::ports::{CatalogSearch, Storage};
use crate::utils::error::{PlannerError, Result};

pub const DEFAULT_BACKUP_FILE: &str = "schedule_backup.json";

/// 一次使用流程的狀態機：查詢 → 暫存結果 → 編輯別名 / 勾選屬性 → 加入學期。
/// 暫存區的內容尚未進入計畫，不會被匯出。
pub struct PlannerSession<C: CatalogSearch, S: Storage> {
    planner: Planner,
    catalog: C,
    storage: S,
    staged: Option<CourseRecord>,
    alias: String,
    selected: Vec<String>,
    loading: bool,
}

impl<C: CatalogSearch, S: Storage> PlannerSession<C, S> {
    pub fn new(planner: Planner, catalog: C, storage: S) -> Self {
        Self {
            planner,
            catalog,
            storage,
            staged: None,
            alias: String::new(),
            selected: Vec::new(),
            loading: false,
        }
    }

    pub fn planner(&self) -> &Planner {
        &self.planner
    }

    pub fn planner_mut(&mut self) -> &mut Planner {
        &mut self.planner
    }

    pub fn staged(&self) -> Option<&CourseRecord> {
        self.staged.as_ref()
    }

    pub fn alias(&self) -> &str {
        &self.alias
    }

    pub fn selected_attributes(&self) -> &[String] {
        &self.selected
    }

    /// 查詢課程並暫存第一筆結果，別名預設帶入課名。
    /// 同一時間只允許一個查詢在途中；開始查詢前會先清掉上一筆暫存。
    pub async fn search(&mut self, semester: &str, keyword: &str) -> Result<&CourseRecord> {
        if self.loading {
            return Err(PlannerError::input("a search is already in progress"));
        }

        self.clear_staging();

        if keyword.trim().is_empty() {
            return Err(PlannerError::input("search keyword must not be empty"));
        }
        validate_semester_key(semester)?;

        self.loading = true;
        let result = self.catalog.search(semester, keyword).await;
        self.loading = false;

        let course = result?;
        self.alias = course.name.clone();
        Ok(self.staged.insert(course))
    }

    pub fn set_alias(&mut self, alias: &str) {
        self.alias = alias.to_string();
    }

    /// 勾選 / 取消勾選一個屬性，回傳切換後是否選取
    pub fn toggle_attribute(&mut self, name: &str) -> Result<bool> {
        if self.planner.attribute(name).is_none() {
            return Err(PlannerError::not_found(format!("Attribute '{}'", name)));
        }
        if let Some(pos) = self.selected.iter().position(|n| n == name) {
            self.selected.remove(pos);
            Ok(false)
        } else {
            self.selected.push(name.to_string());
            Ok(true)
        }
    }

    /// 把暫存的課程加入指定學期。失敗時暫存區保持原狀可以重試。
    pub fn commit(&mut self, semester: &str) -> Result<()> {
        let Some(course) = self.staged.clone() else {
            return Err(PlannerError::input("no staged course to add"));
        };
        self.planner
            .add_course(semester, course, &self.alias, &self.selected)?;
        self.clear_staging();
        Ok(())
    }

    pub async fn export(&self, file: &str) -> Result<()> {
        let data = codec::serialize(&self.planner)?;
        self.storage.write_file(file, &data).await?;
        tracing::info!("Exported plan to {}", file);
        Ok(())
    }

    /// 匯入備份檔。整份文件解析驗證成功才會取代現有狀態，
    /// 格式錯誤時原計畫完全不動。
    pub async fn import(&mut self, file: &str) -> Result<()> {
        let data = self.storage.read_file(file).await?;
        let restored = codec::deserialize(&data, self.planner.semester_keys().to_vec())?;
        self.planner = restored;
        tracing::info!("Imported plan from {}", file);
        Ok(())
    }

    fn clear_staging(&mut self) {
        self.staged = None;
        self.alias.clear();
        self.selected.clear();
    }
}
