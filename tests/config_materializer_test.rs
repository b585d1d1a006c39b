use syncpilot::application::services::materialize_pipeline_config;
use syncpilot::domain::{
    ConfigValue, OceanBaseConfig, PipelineOptions, StarRocksConfig, SyncJobConfig,
};

fn full_source() -> StarRocksConfig {
    StarRocksConfig {
        host: Some("10.0.0.5".to_string()),
        port: Some(ConfigValue::Text("9031".to_string())),
        username: Some("admin".to_string()),
        password: Some("secret".to_string()),
        scan_port: Some(ConfigValue::Number(8040)),
        scan_max_retries: Some(ConfigValue::Number(3)),
        tables: Some("sys.orders".to_string()),
        database: None,
    }
}

fn full_sink() -> OceanBaseConfig {
    OceanBaseConfig {
        host: Some("10.0.0.9".to_string()),
        port: Some(ConfigValue::Text("2883".to_string())),
        username: Some("app@tenant".to_string()),
        password: Some("obsecret".to_string()),
        database: None,
    }
}

#[test]
fn given_full_config_when_materializing_then_document_contains_all_values() {
    let options = PipelineOptions {
        checkpoint_interval: None,
        parallelism: Some(ConfigValue::Text("4".to_string())),
    };

    let document = materialize_pipeline_config(&full_source(), &full_sink(), &options).unwrap();

    assert!(document.contains("jdbc-url: jdbc:mysql://10.0.0.5:9031/sys"));
    assert!(document.contains("scan-url: 10.0.0.5:8040"));
    assert!(document.contains("scan.max-retries: 3"));
    assert!(document.contains("tables: sys.orders"));
    assert!(document.contains("url: jdbc:mysql://10.0.0.9:2883/test"));
    assert!(document.contains("username: app@tenant"));
    assert!(document.contains("parallelism: 4"));
}

#[test]
fn given_empty_sections_when_materializing_then_documented_defaults_apply() {
    let document = materialize_pipeline_config(
        &StarRocksConfig::default(),
        &OceanBaseConfig::default(),
        &PipelineOptions::default(),
    )
    .unwrap();

    assert!(document.contains("jdbc-url: jdbc:mysql://127.0.0.1:9030/sys"));
    assert!(document.contains("scan-url: 127.0.0.1:8030"));
    assert!(document.contains("scan.max-retries: 1"));
    assert!(document.contains("username: root\n"));
    assert!(document.contains("username: root@test"));
    assert!(document.contains("url: jdbc:mysql://127.0.0.1:2881/test"));
    assert!(document.contains("parallelism: 2"));
}

#[test]
fn given_same_inputs_when_materializing_twice_then_documents_are_identical() {
    let options = PipelineOptions::default();

    let first = materialize_pipeline_config(&full_source(), &full_sink(), &options).unwrap();
    let second = materialize_pipeline_config(&full_source(), &full_sink(), &options).unwrap();

    assert_eq!(first, second);
}

#[test]
fn given_interval_in_millis_when_converting_then_whole_seconds_are_kept() {
    let options = PipelineOptions {
        checkpoint_interval: Some(ConfigValue::Text("10000".to_string())),
        parallelism: None,
    };
    assert_eq!(options.checkpoint_interval_secs().unwrap(), 10);

    // Integer division truncates the sub-second remainder.
    let options = PipelineOptions {
        checkpoint_interval: Some(ConfigValue::Number(1500)),
        parallelism: None,
    };
    assert_eq!(options.checkpoint_interval_secs().unwrap(), 1);
}

#[test]
fn given_no_interval_when_converting_then_default_applies() {
    let options = PipelineOptions::default();
    assert_eq!(options.checkpoint_interval_ms().unwrap(), 10_000);
    assert_eq!(options.checkpoint_interval_secs().unwrap(), 10);
}

#[test]
fn given_garbage_interval_when_converting_then_error_names_the_field() {
    let options = PipelineOptions {
        checkpoint_interval: Some(ConfigValue::Text("soon".to_string())),
        parallelism: None,
    };

    let err = options.checkpoint_interval_secs().unwrap_err();
    assert!(err.to_string().contains("checkpointInterval"));
}

#[test]
fn given_payload_missing_a_section_when_validating_then_it_is_rejected() {
    let config: SyncJobConfig = serde_json::from_str(
        r#"{"starrocks": {"host": "127.0.0.1"}, "oceanbase": {"host": "127.0.0.1"}}"#,
    )
    .unwrap();

    let err = config.validated().unwrap_err();
    assert!(err.to_string().contains("flinkOMT"));
}

#[test]
fn given_numeric_and_string_scalars_when_deserializing_then_both_are_accepted() {
    let config: SyncJobConfig = serde_json::from_str(
        r#"{
            "starrocks": {"host": "h", "port": 9030},
            "oceanbase": {"host": "h", "port": "2881"},
            "flinkOMT": {"checkpointInterval": "10000", "parallelism": 2}
        }"#,
    )
    .unwrap();

    let (source, sink, options) = config.validated().unwrap();
    assert_eq!(source.port(), "9030");
    assert_eq!(sink.port(), "2881");
    assert_eq!(options.parallelism().unwrap(), 2);
}
