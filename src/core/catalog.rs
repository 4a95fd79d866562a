use crate::domain::model::{CourseRecord, SearchRequest, SearchResponse};
use crate::domain::ports::{CatalogSearch, ConfigProvider};
use crate::utils::error::{PlannerError, Result};
use async_trait::async_trait;
use reqwest::Client;

/// 對遠端課程查詢服務的客戶端。比對與排序都交給遠端，
/// 這裡只取回傳列表的第一筆當作最佳結果。
pub struct CatalogClient<C: ConfigProvider> {
    config: C,
    client: Client,
}

impl<C: ConfigProvider> CatalogClient<C> {
    pub fn new(config: C) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }
}

#[async_trait]
impl<C: ConfigProvider> CatalogSearch for CatalogClient<C> {
    async fn search(&self, semester: &str, keyword: &str) -> Result<CourseRecord> {
        let request = SearchRequest::new(
            semester,
            keyword,
            self.config.batch_size(),
            self.config.sorting(),
        );

        tracing::debug!("Searching catalog at: {}", self.config.catalog_endpoint());
        let response = self
            .client
            .post(self.config.catalog_endpoint())
            .json(&request)
            .send()
            .await?;

        tracing::debug!("Catalog response status: {}", response.status());
        if !response.status().is_success() {
            return Err(PlannerError::HttpStatusError {
                status: response.status().as_u16(),
            });
        }

        let body: SearchResponse = response.json().await?;
        if body.total_count == 0 {
            return Err(PlannerError::not_found(format!("Course '{}'", keyword)));
        }

        body.courses
            .into_iter()
            .next()
            .ok_or_else(|| PlannerError::not_found(format!("Course '{}'", keyword)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    struct MockConfig {
        endpoint: String,
    }

    impl ConfigProvider for MockConfig {
        fn catalog_endpoint(&self) -> &str {
            &self.endpoint
        }

        fn data_path(&self) -> &str {
            "./data"
        }

        fn batch_size(&self) -> u32 {
            30
        }

        fn sorting(&self) -> &str {
            "correlation"
        }

        fn base_year(&self) -> u16 {
            112
        }

        fn year_span(&self) -> u16 {
            7
        }
    }

    fn client_for(server: &MockServer) -> CatalogClient<MockConfig> {
        CatalogClient::new(MockConfig {
            endpoint: server.url("/api/v1/courses/search/dept"),
        })
    }

    #[tokio::test]
    async fn test_search_returns_first_course() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/api/v1/courses/search/dept")
                .json_body_partial(
                    r#"{
                        "query": {
                            "keyword": "資料結構",
                            "semester": "113-1",
                            "isPrecise": true,
                            "timeStrictMatch": false
                        },
                        "batchSize": 30,
                        "pageIndex": 0,
                        "sorting": "correlation"
                    }"#,
                );
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "totalCount": 2,
                    "courses": [
                        {
                            "identifier": "CSIE1212",
                            "name": "資料結構與演算法",
                            "credits": 3.0,
                            "teacher": { "name": "林軒田" },
                            "schedules": [
                                { "weekday": 1, "intervals": ["2", "3"] }
                            ]
                        },
                        {
                            "identifier": "CSIE9999",
                            "name": "不會被取用的第二筆",
                            "credits": 1.0,
                            "schedules": []
                        }
                    ]
                }));
        });

        let course = client_for(&server).search("113-1", "資料結構").await.unwrap();

        api_mock.assert();
        assert_eq!(course.identifier, "CSIE1212");
        assert_eq!(course.credits, 3.0);
        assert_eq!(course.teacher.unwrap().name, "林軒田");
        assert_eq!(course.schedules.len(), 1);
    }

    #[tokio::test]
    async fn test_search_ignores_unknown_response_fields() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/api/v1/courses/search/dept");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "totalCount": 1,
                    "courses": [
                        {
                            "identifier": "GEN5566",
                            "name": "音樂與社會",
                            "credits": 2.0,
                            "serialNumber": "38291",
                            "departmentName": "共同教育中心"
                        }
                    ]
                }));
        });

        let course = client_for(&server).search("113-2", "音樂").await.unwrap();
        assert_eq!(course.identifier, "GEN5566");
        assert!(course.teacher.is_none());
        assert!(course.schedules.is_empty());
    }

    #[tokio::test]
    async fn test_search_zero_results_is_not_found() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST).path("/api/v1/courses/search/dept");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({ "totalCount": 0, "courses": [] }));
        });

        let result = client_for(&server).search("113-1", "不存在的課").await;

        api_mock.assert();
        assert!(matches!(result, Err(PlannerError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_search_http_error_is_transient() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/api/v1/courses/search/dept");
            then.status(503);
        });

        let result = client_for(&server).search("113-1", "資料結構").await;

        match result {
            Err(e) => {
                assert!(e.is_transient());
                assert!(matches!(e, PlannerError::HttpStatusError { status: 503 }));
            }
            Ok(_) => panic!("expected transient error"),
        }
    }
}
