mod common;

use common::{fixed_leaf, init_logging};
use serde_json::{Value, json};
use table_core::footer::{FixedCounts, compute_sums, decimal_places, is_cell_hidden, sum_column, to_number};
use table_core::{
    Column, FixedColumns, FixedLayout, FixedPosition, FixedSide, FooterBuilder, Pane,
    SummaryCell, TableLayout, TableOptions,
};

fn columns() -> Vec<Column> {
    vec![
        Column::new("Name").id("name").property("name"),
        Column::new("Amount").id("amount").property("amount"),
        Column::new("Price").id("price").property("price"),
        Column::new("Note").id("note").property("note"),
    ]
}

fn rows() -> Vec<Value> {
    vec![
        json!({"name": "a", "amount": "10", "price": 1.25, "note": "x"}),
        json!({"name": "b", "amount": 5, "price": 2.5, "note": "y"}),
    ]
}

// ============================================================================
// Number Coercion
// ============================================================================

#[test]
fn test_to_number() {
    assert!(to_number(None).is_nan());
    assert_eq!(to_number(Some(&json!(null))), 0.0);
    assert_eq!(to_number(Some(&json!(""))), 0.0);
    assert_eq!(to_number(Some(&json!("  12 "))), 12.0);
    assert_eq!(to_number(Some(&json!("1e3"))), 1000.0);
    assert_eq!(to_number(Some(&json!("0x1f"))), 31.0);
    assert_eq!(to_number(Some(&json!(true))), 1.0);
    assert_eq!(to_number(Some(&json!([]))), 0.0);
    assert_eq!(to_number(Some(&json!(["7"]))), 7.0);
    assert_eq!(to_number(Some(&json!("Infinity"))), f64::INFINITY);
    assert!(to_number(Some(&json!("abc"))).is_nan());
    assert!(to_number(Some(&json!("inf"))).is_nan());
    assert!(to_number(Some(&json!({}))).is_nan());
    assert!(to_number(Some(&json!([1, 2]))).is_nan());
}

#[test]
fn test_decimal_places() {
    assert_eq!(decimal_places(10.0), 0);
    assert_eq!(decimal_places(1.25), 2);
    assert_eq!(decimal_places(0.1 + 0.2), 17);
    assert_eq!(decimal_places(1.5e-7), 4);
}

// ============================================================================
// Summation
// ============================================================================

#[test]
fn test_sum_matches_input_precision() {
    let rows = vec![json!({"v": 0.1}), json!({"v": 0.2}), json!({"v": 0.3})];
    assert_eq!(sum_column(&rows, Some("v")), Some(0.6));
}

#[test]
fn test_sum_skips_non_numeric() {
    let rows = vec![json!({"v": 1}), json!({"v": "n/a"}), json!({}), json!({"v": "2.5"})];
    assert_eq!(sum_column(&rows, Some("v")), Some(3.5));
}

#[test]
fn test_sum_without_numbers() {
    let rows = vec![json!({"v": "x"}), json!({})];
    assert_eq!(sum_column(&rows, Some("v")), None);
    assert_eq!(sum_column(&rows, None), None);
}

#[test]
fn test_compute_sums() {
    let sums = compute_sums(&columns(), &rows(), "Total");
    assert_eq!(
        sums,
        vec![
            SummaryCell::Text("Total".to_string()),
            SummaryCell::Number(15.0),
            SummaryCell::Number(3.75),
            SummaryCell::Empty,
        ]
    );
    assert_eq!(sums[2].to_string(), "3.75");
    assert_eq!(sums[3].to_string(), "");
}

// ============================================================================
// Footer Row
// ============================================================================

#[test]
fn test_footer_uses_options() {
    init_logging();
    let options = TableOptions::from_json(&json!({"sumText": "合计"})).unwrap();
    let cols = columns();
    let data = rows();
    let footer = FooterBuilder::new(&cols, &data).options(&options).build();

    assert_eq!(footer.cells.len(), 4);
    assert_eq!(footer.cells[0].content, SummaryCell::Text("合计".to_string()));
    assert_eq!(footer.cells[1].column_id, "amount");
    assert!(footer.has_gutter);
    assert!(footer.cells.iter().all(|c| c.is_leaf && !c.is_fixed && !c.hidden));
}

#[test]
fn test_custom_summary_method() {
    let cols = columns();
    let data = rows();
    let footer = FooterBuilder::new(&cols, &data)
        .summary_method(|columns, rows| {
            vec![SummaryCell::Text(format!("{} rows", rows.len())); columns.len() - 1]
        })
        .build();

    assert_eq!(footer.cells[0].content, SummaryCell::Text("2 rows".to_string()));
    assert_eq!(footer.cells[3].content, SummaryCell::Empty);
}

fn fixed_columns() -> Vec<Column> {
    vec![
        fixed_leaf("l1", 50.0, FixedSide::Left),
        Column::new("m1").id("m1").width(100.0),
        Column::new("m2").id("m2").width(100.0),
        fixed_leaf("r1", 40.0, FixedSide::Right),
    ]
}

#[test]
fn test_fixed_cells_are_positioned() {
    let cols = fixed_columns();
    let layout = TableLayout {
        scroll_y: true,
        gutter_width: 17.0,
    };
    let fixed = FixedLayout::compute(&FixedColumns::split(&cols), Some(&layout)).unwrap();
    let footer = FooterBuilder::new(&cols, &[])
        .layout(layout)
        .fixed_layout(&fixed)
        .build();

    assert!(footer.has_gutter);
    assert_eq!(footer.cells[0].position, Some(FixedPosition::Left(0.0)));
    assert_eq!(footer.cells[3].position, Some(FixedPosition::Right(0.0)));
    assert_eq!(footer.cells[1].position, None);
    assert!(footer.cells[0].is_fixed);
    assert!(!footer.cells[1].is_fixed);
}

#[test]
fn test_gutter_does_not_depend_on_vertical_scroll() {
    let cols = columns();
    let layout = TableLayout {
        scroll_y: false,
        gutter_width: 17.0,
    };
    let footer = FooterBuilder::new(&cols, &[]).layout(layout).build();
    assert!(footer.has_gutter);

    let layout = TableLayout {
        scroll_y: true,
        gutter_width: 0.0,
    };
    let footer = FooterBuilder::new(&cols, &[]).layout(layout).build();
    assert!(!footer.has_gutter);
}

#[test]
fn test_right_fixed_cells_ignore_gutter_patch() {
    let cols = vec![
        Column::new("m1").id("m1").width(100.0),
        fixed_leaf("r1", 40.0, FixedSide::Right),
        fixed_leaf("r2", 60.0, FixedSide::Right),
    ];
    let layout = TableLayout {
        scroll_y: true,
        gutter_width: 17.0,
    };
    let fixed = FixedLayout::compute(&FixedColumns::split(&cols), Some(&layout)).unwrap();
    assert_eq!(fixed.position("r2"), Some(FixedPosition::Right(17.0)));

    let footer = FooterBuilder::new(&cols, &[])
        .layout(layout)
        .fixed_layout(&fixed)
        .build();
    assert_eq!(footer.cells[1].position, Some(FixedPosition::Right(60.0)));
    assert_eq!(footer.cells[2].position, Some(FixedPosition::Right(0.0)));
}

#[test]
fn test_overlay_pane_has_no_gutter() {
    let cols = fixed_columns();
    let layout = TableLayout {
        scroll_y: true,
        gutter_width: 17.0,
    };
    let footer = FooterBuilder::new(&cols, &[])
        .layout(layout)
        .pane(Pane::Left)
        .build();
    assert!(!footer.has_gutter);
}

// ============================================================================
// Pane Visibility
// ============================================================================

fn hidden(pane: Pane) -> Vec<bool> {
    let cols = fixed_columns();
    let counts = FixedCounts::from_columns(&cols);
    cols.iter()
        .enumerate()
        .map(|(i, c)| is_cell_hidden(pane, i, &cols, c, &counts))
        .collect()
}

#[test]
fn test_fixed_counts() {
    let counts = FixedCounts::from_columns(&fixed_columns());
    assert_eq!(counts.columns, 4);
    assert_eq!(counts.left, 1);
    assert_eq!(counts.right, 1);
    assert_eq!(counts.left_leaf, 1);
    assert_eq!(counts.right_leaf, 1);
}

#[test]
fn test_main_pane_hides_fixed_columns() {
    assert_eq!(hidden(Pane::Main), vec![true, false, false, true]);
}

#[test]
fn test_left_pane_shows_left_columns() {
    assert_eq!(hidden(Pane::Left), vec![false, true, true, true]);
}

#[test]
fn test_right_pane_shows_right_columns() {
    assert_eq!(hidden(Pane::Right), vec![true, true, true, false]);
}

#[test]
fn test_builder_marks_hidden_cells() {
    let cols = fixed_columns();
    let footer = FooterBuilder::new(&cols, &[]).pane(Pane::Right).build();
    let flags: Vec<bool> = footer.cells.iter().map(|c| c.hidden).collect();
    assert_eq!(flags, vec![true, true, true, false]);
}
