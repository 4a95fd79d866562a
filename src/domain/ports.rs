use crate::domain::model::CourseRecord;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn catalog_endpoint(&self) -> &str;
    fn data_path(&self) -> &str;
    fn batch_size(&self) -> u32;
    fn sorting(&self) -> &str;
    fn base_year(&self) -> u16;
    fn year_span(&self) -> u16;
}

/// 課程查詢端點。遠端服務負責比對與排序，這裡只取最符合的第一筆，
/// 其餘結果一律捨棄（這是刻意的產品行為，不是實作偷懶）。
#[async_trait]
pub trait CatalogSearch: Send + Sync {
    async fn search(&self, semester: &str, keyword: &str) -> Result<CourseRecord>;
}
