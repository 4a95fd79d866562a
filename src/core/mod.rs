pub mod catalog;
pub mod codec;
pub mod grid;
pub mod planner;
pub mod semester;
pub mod session;

pub use crate::domain::model::{
    Attribute, CourseRecord, EnrolledCourse, PlanDocument, ScheduleSlot,
};
pub use crate::domain::ports::{CatalogSearch, ConfigProvider, Storage};
pub use crate::utils::error::Result;
