use std::fs;
use std::path::{Path, PathBuf};

use sales_data_cleaning::CleaningError;
use sales_data_cleaning::config::PipelineConfig;
use sales_data_cleaning::pipeline::Pipeline;
use sales_data_cleaning::report::Stage;
use sales_data_cleaning::types::{DataType, Value};
use tempfile::tempdir;

const EXPECTED_CLEAN: &str = "\
order id,product,region,price,qty
1001,Widget,North,10.5,3
1007,Gadget,South,8.0,0
1008,Widget,East,3.0,2
";

fn config(input: impl Into<PathBuf>, output: &Path) -> PipelineConfig {
    PipelineConfig {
        input_path: input.into(),
        output_path: output.to_path_buf(),
        ..Default::default()
    }
}

#[test]
fn pipeline_cleans_fixture_file() {
    let tmp = tempdir().unwrap();
    let output = tmp.path().join("sales_data_clean.csv");

    let run = Pipeline::new(config("tests/fixtures/sales_data_raw.csv", &output))
        .run()
        .unwrap();

    assert_eq!(fs::read_to_string(&output).unwrap(), EXPECTED_CLEAN);
    assert_eq!(run.dataset.row_count(), 3);

    let price_idx = run.dataset.schema.index_of("price").unwrap();
    let qty_idx = run.dataset.schema.index_of("qty").unwrap();
    assert_eq!(run.dataset.schema.fields[price_idx].data_type, DataType::Float64);
    assert_eq!(run.dataset.schema.fields[qty_idx].data_type, DataType::Int64);
    assert_eq!(run.dataset.rows[0][price_idx], Value::Float64(10.5));
    assert_eq!(run.dataset.rows[0][qty_idx], Value::Int64(3));
}

#[test]
fn report_counts_every_stage() {
    let tmp = tempdir().unwrap();
    let output = tmp.path().join("out.csv");
    let report_path = tmp.path().join("report.json");

    let cfg = PipelineConfig {
        report_path: Some(report_path.clone()),
        ..config("tests/fixtures/sales_data_raw.csv", &output)
    };
    let run = Pipeline::new(cfg).run().unwrap();
    let report = &run.report;

    assert_eq!(report.rows_loaded, 8);
    assert_eq!(report.rows_written, 3);
    assert_eq!(report.rows_dropped(), 5);

    let counts: Vec<(Stage, usize, usize)> = report
        .stages
        .iter()
        .map(|s| (s.stage, s.rows_in, s.rows_out))
        .collect();
    assert_eq!(
        counts,
        vec![
            (Stage::Load, 8, 8),
            (Stage::NormalizeColumns, 8, 8),
            (Stage::TrimText, 8, 8),
            (Stage::DropMissing, 8, 6),
            (Stage::CoerceNumeric, 6, 6),
            (Stage::DropMissingPrice, 6, 5),
            (Stage::DropNegativePrice, 5, 4),
            (Stage::DropNegativeQty, 4, 3),
            (Stage::Write, 3, 3),
        ]
    );

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report_path).unwrap()).unwrap();
    assert_eq!(json["rows_written"], 3);
    assert_eq!(json["stages"][3]["stage"], "drop_missing");
}

#[test]
fn cleaning_the_output_again_is_a_fixed_point() {
    let tmp = tempdir().unwrap();

    for fixture in [
        "sales_data_raw.csv",
        "padded_numbers.csv",
        "padded_na_token.csv",
    ] {
        let first = tmp.path().join(format!("first_{fixture}"));
        let second = tmp.path().join(format!("second_{fixture}"));

        Pipeline::new(config(Path::new("tests/fixtures").join(fixture), &first))
            .run()
            .unwrap();
        let run = Pipeline::new(config(first.clone(), &second)).run().unwrap();

        assert_eq!(
            fs::read_to_string(&first).unwrap(),
            fs::read_to_string(&second).unwrap(),
            "{fixture} changed on a second pass"
        );
        assert_eq!(run.report.rows_dropped(), 0, "{fixture} lost rows on a second pass");
    }
}

#[test]
fn padded_numbers_are_written_in_their_reloaded_form() {
    let tmp = tempdir().unwrap();
    let output = tmp.path().join("out.csv");

    Pipeline::new(config("tests/fixtures/padded_numbers.csv", &output))
        .run()
        .unwrap();
    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "product,discount,price,qty\npen,0.5,1.0,1\npad,3.0,2.0,2\n"
    );
}

#[test]
fn padded_na_token_drops_the_row_on_the_first_pass() {
    let tmp = tempdir().unwrap();
    let output = tmp.path().join("out.csv");

    let run = Pipeline::new(config("tests/fixtures/padded_na_token.csv", &output))
        .run()
        .unwrap();
    assert_eq!(run.report.stage(Stage::DropMissing).map(|s| s.rows_dropped()), Some(1));
    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "product,region,price,qty\npad,East,2.0,2\n"
    );
}

#[test]
fn output_uses_the_input_delimiter() {
    let tmp = tempdir().unwrap();
    let output = tmp.path().join("out.csv");
    let cfg = PipelineConfig {
        delimiter: ';',
        ..config("tests/fixtures/sales_semicolon.csv", &output)
    };

    Pipeline::new(cfg).run().unwrap();
    assert_eq!(fs::read_to_string(&output).unwrap(), "product;price;qty\npad;2.5;1\n");
}

#[test]
fn missing_input_is_an_io_error() {
    let tmp = tempdir().unwrap();
    let output = tmp.path().join("out.csv");

    let err = Pipeline::new(config("tests/fixtures/does_not_exist.csv", &output))
        .run()
        .unwrap_err();
    assert!(matches!(err, CleaningError::Io(_)));
    assert!(!output.exists());
}

#[test]
fn unwritable_output_is_an_io_error() {
    let tmp = tempdir().unwrap();
    let output = tmp.path().join("no_such_dir").join("out.csv");

    let err = Pipeline::new(config("tests/fixtures/sales_data_raw.csv", &output))
        .run()
        .unwrap_err();
    assert!(matches!(err, CleaningError::Io(_)));
}

#[test]
fn column_collision_fails_before_writing() {
    let tmp = tempdir().unwrap();
    let output = tmp.path().join("out.csv");

    let err = Pipeline::new(config("tests/fixtures/colliding_columns.csv", &output))
        .run()
        .unwrap_err();
    assert!(matches!(err, CleaningError::ColumnCollision { ref column, .. } if column == "price"));
    assert!(!output.exists());
}

#[test]
fn missing_qty_column_fails_before_writing() {
    let tmp = tempdir().unwrap();
    let output = tmp.path().join("out.csv");

    let err = Pipeline::new(config("tests/fixtures/missing_qty.csv", &output))
        .run()
        .unwrap_err();
    assert!(err.to_string().contains("missing required column 'qty'"));
    assert!(!output.exists());
}

#[test]
fn malformed_input_is_a_csv_error() {
    let tmp = tempdir().unwrap();
    let output = tmp.path().join("out.csv");

    let err = Pipeline::new(config("tests/fixtures/malformed.csv", &output))
        .run()
        .unwrap_err();
    assert!(matches!(err, CleaningError::Csv(_)));
    assert!(!output.exists());
}
