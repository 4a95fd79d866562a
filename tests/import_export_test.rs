use ntu_planner::core::codec;
use ntu_planner::core::semester;
use ntu_planner::domain::model::{CourseRecord, CourseTeacher, ScheduleSlot};
use ntu_planner::domain::ports::Storage;
use ntu_planner::{LocalStorage, Planner};
use tempfile::TempDir;

fn keys() -> Vec<String> {
    semester::semester_keys(112, 7)
}

fn populated_planner() -> Planner {
    let mut planner = Planner::new(keys());
    planner.define_attribute("必修");
    planner.define_attribute("通識");
    planner
        .add_course(
            "113-1",
            CourseRecord {
                identifier: "CSIE1212".to_string(),
                name: "資料結構與演算法".to_string(),
                credits: 3.0,
                teacher: Some(CourseTeacher {
                    name: "林軒田".to_string(),
                }),
                schedules: vec![ScheduleSlot {
                    weekday: 1,
                    intervals: vec!["2".to_string(), "3".to_string()],
                }],
            },
            "資演",
            &["必修".to_string()],
        )
        .unwrap();
    planner
        .add_course(
            "116-2",
            CourseRecord {
                identifier: "GEN5566".to_string(),
                name: "音樂與社會".to_string(),
                credits: 2.0,
                teacher: None,
                schedules: Vec::new(),
            },
            "",
            &["通識".to_string()],
        )
        .unwrap();
    planner
}

#[tokio::test]
async fn test_backup_file_round_trips_through_local_storage() {
    let temp_dir = TempDir::new().unwrap();
    let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());

    let planner = populated_planner();
    let data = codec::serialize(&planner).unwrap();
    storage.write_file("schedule_backup.json", &data).await.unwrap();

    // 備份檔真的落在磁碟上
    let on_disk = temp_dir.path().join("schedule_backup.json");
    assert!(on_disk.exists());

    let read_back = storage.read_file("schedule_backup.json").await.unwrap();
    let restored = codec::deserialize(&read_back, keys()).unwrap();

    assert_eq!(restored.to_document(), planner.to_document());
    assert_eq!(restored.courses("113-1")[0].display_name(), "資演");
    assert_eq!(restored.attribute("通識").unwrap().earned_credits, 2.0);
}

#[test]
fn test_exported_document_shape_matches_backup_format() {
    let planner = populated_planner();
    let data = codec::serialize(&planner).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&data).unwrap();

    // 頂層剛好兩個鍵：schedules 與 allAttributes
    let object = value.as_object().unwrap();
    assert_eq!(object.len(), 2);
    assert_eq!(value["schedules"].as_object().unwrap().len(), 14);

    let attrs = value["allAttributes"].as_array().unwrap();
    assert_eq!(attrs[0]["name"], "必修");
    assert_eq!(attrs[0]["earnedCredits"], 3.0);

    // 課程欄位與別名、屬性攤平在同一層
    let enrolled = &value["schedules"]["113-1"][0];
    assert_eq!(enrolled["identifier"], "CSIE1212");
    assert_eq!(enrolled["alias"], "資演");
    assert_eq!(enrolled["attributes"][0], "必修");
    assert_eq!(enrolled["teacher"]["name"], "林軒田");
}

#[tokio::test]
async fn test_import_missing_all_attributes_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());
    storage
        .write_file("broken.json", br#"{ "schedules": {} }"#)
        .await
        .unwrap();

    let data = storage.read_file("broken.json").await.unwrap();
    let result = codec::deserialize(&data, keys());
    assert!(matches!(
        result,
        Err(ntu_planner::PlannerError::FormatError { .. })
    ));
}

#[test]
fn test_import_accepts_hand_written_backup() {
    // 使用者手改過的最小備份檔也要能載入
    let raw = r#"{
        "schedules": {
            "112-1": [
                {
                    "identifier": "MATH1201",
                    "name": "微積分",
                    "credits": 4,
                    "schedules": [],
                    "alias": "微積分",
                    "attributes": []
                }
            ]
        },
        "allAttributes": []
    }"#
    .as_bytes();

    let planner = codec::deserialize(raw, keys()).unwrap();
    assert_eq!(planner.courses("112-1").len(), 1);
    assert_eq!(planner.total_credits("112-1"), 4.0);
    // 沒列出來的學期補成空的，鍵集合固定 14 個
    assert_eq!(planner.semester_keys().len(), 14);
    assert!(planner.courses("118-2").is_empty());
}
