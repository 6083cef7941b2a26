pub mod controller;
pub mod data_manager;
pub mod services;
pub mod time;
pub mod utils;

pub use controller::{ChartView, Controller, Notice, SummaryView};
pub use data_manager::{parse_budget_limit, DataManager};
pub use time::{Clock, FixedClock, SystemClock};
