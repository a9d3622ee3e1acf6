use anyhow::Result;
use csv_quality::config::{Config, OutputConfig};
use csv_quality::pipeline::{load, Pipeline};
use csv_quality::{CsvQualityError, FaultKind};
use std::fs;
use tempfile::tempdir;

const RAW_USERS: &str = "\
name,age,email
  Bob ,-3, X@Y.COM
,5,z@z.com
Ann,30,Ann@Example.org
Cy,abc,
Dee,007,DEE@d.io
";

const TRANSACTIONS: &str = "\
id,name,amount
1,A,10
2,,-5
3,B,abc
4,C,0
5,D,
";

fn config_in(dir: &std::path::Path) -> Config {
    Config {
        output: OutputConfig {
            report_path: dir.join("output/csv_quality_report.json"),
            clean_path: dir.join("output/clean_users.csv"),
            log_dir: dir.join("logs"),
        },
        ..Config::default()
    }
}

#[test]
fn test_clean_file_writes_repaired_rows() -> Result<()> {
    let temp_dir = tempdir()?;
    let input = temp_dir.path().join("raw_users.csv");
    let output = temp_dir.path().join("out/clean_users.csv");
    fs::write(&input, RAW_USERS)?;

    let pipeline = Pipeline::new(Config::default());
    let result = pipeline.clean_file(&input, &output)?;

    assert_eq!(result.retained, 4);
    assert_eq!(result.dropped, 1);
    let written = fs::read_to_string(&output)?;
    assert_eq!(
        written,
        "name,age,email\n  Bob ,UNKNOWN,x@y.com\nAnn,30,ann@example.org\nCy,UNKNOWN,\nDee,7,dee@d.io\n"
    );
    Ok(())
}

#[test]
fn test_cleaned_output_round_trips_through_loader() -> Result<()> {
    let temp_dir = tempdir()?;
    let input = temp_dir.path().join("raw_users.csv");
    let output = temp_dir.path().join("clean_users.csv");
    fs::write(&input, RAW_USERS)?;

    let result = Pipeline::new(Config::default()).clean_file(&input, &output)?;
    let reloaded = load(&output)?;

    assert_eq!(reloaded.columns(), result.columns.as_slice());
    assert_eq!(reloaded.row_count(), result.retained);
    Ok(())
}

#[test]
fn test_report_file_counts_missing_and_invalid() -> Result<()> {
    let temp_dir = tempdir()?;
    let input = temp_dir.path().join("transactions.csv");
    fs::write(&input, TRANSACTIONS)?;

    let report = Pipeline::new(Config::default()).report_file(&input)?;

    assert_eq!(report.row_count, 5);
    assert_eq!(report.columns, vec!["id", "name", "amount"]);
    assert_eq!(report.missing_values.get("name"), Some(1));
    assert_eq!(report.missing_values.get("amount"), Some(1));
    assert_eq!(report.missing_values.get("id"), None);
    // -5 and 0; "abc" and "" are ignored
    assert_eq!(report.invalid_values.get("amount"), Some(2));
    Ok(())
}

#[test]
fn test_run_writes_both_artifacts() -> Result<()> {
    let temp_dir = tempdir()?;
    let input = temp_dir.path().join("raw_users.csv");
    fs::write(&input, RAW_USERS)?;
    let config = config_in(temp_dir.path());

    let result = Pipeline::new(config.clone()).run(&input)?;

    assert_eq!(result.row_count, 5);
    assert_eq!(result.retained_rows, 4);
    assert_eq!(result.dropped_rows, 1);

    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&config.output.report_path)?)?;
    assert_eq!(report["row_count"], 5);
    assert_eq!(report["missing_values"]["name"], 1);
    assert_eq!(report["missing_values"]["email"], 1);
    // No "amount" column in a user file
    assert_eq!(report["invalid_values"], serde_json::json!({}));

    assert_eq!(load(&config.output.clean_path)?.row_count(), 4);
    Ok(())
}

#[test]
fn test_load_fault_writes_nothing() -> Result<()> {
    let temp_dir = tempdir()?;
    let input = temp_dir.path().join("headers_only.csv");
    let output = temp_dir.path().join("clean.csv");
    fs::write(&input, "name,age,email\n")?;

    let err = Pipeline::new(Config::default())
        .clean_file(&input, &output)
        .unwrap_err();

    match err {
        CsvQualityError::Load(load_err) => assert_eq!(load_err.kind(), FaultKind::NoData),
        other => panic!("unexpected error: {other}"),
    }
    assert!(!output.exists());
    Ok(())
}

#[test]
fn test_missing_input_is_not_found_for_every_stage() -> Result<()> {
    let temp_dir = tempdir()?;
    let input = temp_dir.path().join("missing_file.csv");
    let pipeline = Pipeline::new(config_in(temp_dir.path()));

    let faults = [
        pipeline.report_file(&input).unwrap_err(),
        pipeline.clean_file(&input, &temp_dir.path().join("c.csv")).unwrap_err(),
        pipeline.run(&input).unwrap_err(),
    ];
    for err in faults {
        assert!(matches!(err, CsvQualityError::Load(ref e) if e.kind() == FaultKind::NotFound));
    }
    assert!(!pipeline.config().output.report_path.exists());
    Ok(())
}

#[test]
fn test_custom_field_roles() -> Result<()> {
    let temp_dir = tempdir()?;
    let input = temp_dir.path().join("people.csv");
    let output = temp_dir.path().join("people_clean.csv");
    fs::write(&input, "full_name,years,mail\nX,12,A@B.C\n,1,q@q.q\n")?;

    let mut config = Config::default();
    config.clean.required_field = "full_name".into();
    config.clean.numeric_field = "years".into();
    config.clean.normalize_field = "mail".into();

    let result = Pipeline::new(config).clean_file(&input, &output)?;
    assert_eq!(result.retained, 1);
    assert_eq!(fs::read_to_string(&output)?, "full_name,years,mail\nX,12,a@b.c\n");
    Ok(())
}
