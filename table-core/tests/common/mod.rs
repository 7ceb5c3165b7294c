#![allow(dead_code)]

use simplelog::{Config, LevelFilter, TestLogger};
use table_core::{Column, FixedSide};

/// Route library logs to the test harness output.
pub fn init_logging() {
    let _ = TestLogger::init(LevelFilter::Trace, Config::default());
}

pub fn leaf(id: &str, width: f32) -> Column {
    Column::new(id).id(id).width(width)
}

pub fn group(id: &str, children: Vec<Column>) -> Column {
    children
        .into_iter()
        .fold(Column::new(id).id(id), |group, child| group.child(child))
}

pub fn fixed_leaf(id: &str, width: f32, side: FixedSide) -> Column {
    leaf(id, width).fixed(side)
}
