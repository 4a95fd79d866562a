use clap::Parser;
use ntu_planner::core::session::DEFAULT_BACKUP_FILE;
use ntu_planner::core::{grid, semester};
use ntu_planner::domain::model::{CourseRecord, EnrolledCourse};
use ntu_planner::domain::ports::ConfigProvider;
use ntu_planner::utils::{logger, validation::Validate};
use ntu_planner::{
    CatalogClient, CliConfig, LocalStorage, Planner, PlannerError, PlannerSession,
};
use std::io::Write;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting ntu-planner CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = cli.resolve()?;
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let base_year = config.base_year();
    let semester_keys = semester::semester_keys(base_year, config.year_span());
    let storage = LocalStorage::new(config.data_path().to_string());
    let catalog = CatalogClient::new(config);
    let mut session = PlannerSession::new(Planner::new(semester_keys), catalog, storage);

    let mut current_semester = semester::current_semester_key();
    println!("📚 多學年課表規劃，輸入 help 看指令說明");
    println!("目前查詢學期：{}", current_semester);

    let stdin = std::io::stdin();
    let mut input = String::new();
    loop {
        print!("> ");
        std::io::stdout().flush()?;
        input.clear();
        if stdin.read_line(&mut input)? == 0 {
            break;
        }
        let line = input.trim();
        if line.is_empty() {
            continue;
        }

        let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
        let rest = rest.trim();

        match command {
            "help" => print_help(),
            "quit" | "exit" => break,
            "semester" => {
                match semester::validate_semester_key(rest) {
                    Ok(()) => {
                        current_semester = rest.to_string();
                        println!("查詢學期改為 {}", current_semester);
                    }
                    Err(_) => println!("學期格式不正確，例：113-2"),
                }
            }
            "search" => {
                let outcome = session
                    .search(&current_semester, rest)
                    .await
                    .map(|course| course.clone());
                match outcome {
                    Ok(course) => {
                        println!("找到課程：");
                        render_staged(&course, session.alias(), session.selected_attributes());
                    }
                    Err(PlannerError::InputError { .. }) => {
                        println!("請輸入課程流水號或關鍵字")
                    }
                    Err(e) => report_error(&e),
                }
            }
            "show" => match session.staged() {
                Some(course) => {
                    render_staged(course, session.alias(), session.selected_attributes())
                }
                None => println!("目前沒有暫存的查詢結果"),
            },
            "alias" => {
                if session.staged().is_none() {
                    println!("請先查詢課程");
                } else {
                    session.set_alias(rest);
                    println!("別名改為 {}", rest);
                }
            }
            "tag" => match session.toggle_attribute(rest) {
                Ok(true) => println!("已勾選 {}", rest),
                Ok(false) => println!("已取消 {}", rest),
                Err(_) => println!("沒有這個屬性，請先用 attr 新增"),
            },
            "add" => {
                let target = if rest.is_empty() {
                    current_semester.clone()
                } else {
                    rest.to_string()
                };
                match session.commit(&target) {
                    Ok(()) => println!(
                        "✅ 已加入 {}（{}）",
                        semester::semester_label(base_year, &target),
                        target
                    ),
                    Err(PlannerError::NotFound { .. }) => println!("沒有這個學期：{}", target),
                    Err(e) => report_error(&e),
                }
            }
            "remove" => {
                let mut parts = rest.split_whitespace();
                match (parts.next(), parts.next().and_then(|n| n.parse::<usize>().ok())) {
                    (Some(key), Some(n)) if n >= 1 => {
                        // 列表編號從 1 起算；不存在的位置當作沒事
                        if session.planner_mut().remove_course(key, n - 1).is_ok() {
                            println!("已移除 {} 的第 {} 門課", key, n);
                        }
                    }
                    _ => println!("用法：remove <學期> <編號>"),
                }
            }
            "list" => {
                let key = if rest.is_empty() {
                    current_semester.as_str()
                } else {
                    rest
                };
                render_course_list(session.planner(), base_year, key);
            }
            "grid" => {
                let key = if rest.is_empty() {
                    current_semester.as_str()
                } else {
                    rest
                };
                println!("{} 時間表", semester::semester_label(base_year, key));
                render_grid(session.planner().courses(key));
            }
            "credits" => {
                let key = if rest.is_empty() {
                    current_semester.as_str()
                } else {
                    rest
                };
                println!("總學分：{}", session.planner().total_credits(key));
            }
            "attr" => {
                session.planner_mut().define_attribute(rest);
                render_attributes(session.planner());
            }
            "delattr" => {
                session.planner_mut().delete_attribute(rest);
                render_attributes(session.planner());
            }
            "attrs" => render_attributes(session.planner()),
            "export" => {
                let file = if rest.is_empty() { DEFAULT_BACKUP_FILE } else { rest };
                match session.export(file).await {
                    Ok(()) => println!("✅ 已存檔：{}", file),
                    Err(e) => report_error(&e),
                }
            }
            "import" => {
                let file = if rest.is_empty() { DEFAULT_BACKUP_FILE } else { rest };
                match session.import(file).await {
                    Ok(()) => println!("載入成功"),
                    Err(e) => report_error(&e),
                }
            }
            _ => println!("不認識的指令 {}，輸入 help 看說明", command),
        }
    }

    tracing::info!("Bye");
    Ok(())
}

fn print_help() {
    println!("semester <學期>      設定查詢學期（例：113-2）");
    println!("search <關鍵字>      查詢課程，暫存第一筆結果");
    println!("show                 顯示暫存的課程");
    println!("alias <別名>         設定暫存課程的顯示別名");
    println!("tag <屬性>           勾選 / 取消暫存課程的屬性");
    println!("add [學期]           把暫存課程加入學期（預設目前學期）");
    println!("remove <學期> <編號>  移除該學期列表上的課程");
    println!("list [學期]          課程列表與總學分");
    println!("grid [學期]          週課表");
    println!("credits [學期]       學期總學分");
    println!("attr <名稱>          新增屬性");
    println!("delattr <名稱>       刪除屬性（會從所有課程上清掉）");
    println!("attrs                屬性列表與累計學分");
    println!("export [檔名]        匯出備份 JSON");
    println!("import [檔名]        匯入備份 JSON");
    println!("quit                 離開");
}

fn report_error(e: &PlannerError) {
    tracing::debug!("command failed: {}", e);
    match e {
        PlannerError::NotFound { .. } => println!("查無課程資料"),
        PlannerError::FormatError { .. } => println!("檔案格式不正確"),
        PlannerError::IoError(_) => println!("讀取檔案失敗"),
        e if e.is_transient() => println!("查詢失敗，請稍後再試"),
        e => println!("{}", e),
    }
}

fn render_attributes(planner: &Planner) {
    if planner.attributes().is_empty() {
        println!("尚無屬性，請新增。");
        return;
    }
    for attr in planner.attributes() {
        println!("{} ({})", attr.name, attr.earned_credits);
    }
}

fn render_staged(course: &CourseRecord, alias: &str, selected: &[String]) {
    println!("{}", course.name);
    println!("{}　{} 學分", course.identifier, course.credits);
    let teacher = course
        .teacher
        .as_ref()
        .map(|t| t.name.as_str())
        .unwrap_or("無資料");
    println!(
        "教師：{}　時間：{}",
        teacher,
        grid::format_schedule(&course.schedules)
    );
    println!("別名：{}", alias);
    if !selected.is_empty() {
        println!("已勾選屬性：{}", selected.join("、"));
    }
}

fn render_course_list(planner: &Planner, base_year: u16, key: &str) {
    println!("{} 課程列表", semester::semester_label(base_year, key));
    let courses = planner.courses(key);
    if courses.is_empty() {
        println!("尚未加入任何課程");
        return;
    }
    for (i, c) in courses.iter().enumerate() {
        println!(
            "[{}] {}（{}）{}　{} 學分",
            i + 1,
            c.course.name,
            c.display_name(),
            c.course.identifier,
            c.course.credits
        );
        let teacher = c
            .course
            .teacher
            .as_ref()
            .map(|t| t.name.as_str())
            .unwrap_or("無資料");
        println!(
            "    教師：{}　時間：{}",
            teacher,
            grid::format_schedule(&c.course.schedules)
        );
        if !c.attributes.is_empty() {
            println!("    屬性：{}", c.attributes.join("、"));
        }
    }
    println!("總學分：{}", planner.total_credits(key));
}

fn render_grid(courses: &[EnrolledCourse]) {
    let table = grid::project(courses);
    let header: Vec<String> = std::iter::once("節次".to_string())
        .chain(
            grid::WEEKDAYS
                .iter()
                .map(|&d| grid::weekday_label(d).to_string()),
        )
        .collect();
    println!("{}", header.join(" | "));
    for interval in grid::INTERVALS.iter() {
        let mut row = vec![format!("{:>4}", interval)];
        for &day in grid::WEEKDAYS.iter() {
            row.push(table.cell(day, interval).join("、"));
        }
        println!("{}", row.join(" | "));
    }

    let unscheduled = grid::courses_without_schedule(courses);
    if !unscheduled.is_empty() {
        println!(
            "無時間資料的課程：{}",
            unscheduled
                .iter()
                .map(|c| c.display_name())
                .collect::<Vec<_>>()
                .join("，")
        );
    }
}
