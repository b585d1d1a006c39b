use crate::domain::{ConfigError, OceanBaseConfig, PipelineOptions, StarRocksConfig};

/// Renders the pipeline definition document consumed by the OMT runner.
///
/// Pure and deterministic: the same inputs always produce the same bytes.
/// Every optional field falls back to its documented default instead of
/// failing when absent.
pub fn materialize_pipeline_config(
    source: &StarRocksConfig,
    sink: &OceanBaseConfig,
    options: &PipelineOptions,
) -> Result<String, ConfigError> {
    let source_jdbc_url = format!("jdbc:mysql://{}:{}/sys", source.host(), source.port());
    let scan_url = format!("{}:{}", source.host(), source.scan_port());
    let sink_url = format!("jdbc:mysql://{}:{}/test", sink.host(), sink.port());
    let parallelism = options.parallelism()?;

    Ok(format!(
        r#"################################################################################

# Description: Sync StarRocks all tables to OceanBase

################################################################################

source:
  type: starrocks
  jdbc-url: {source_jdbc_url}
  username: {source_username}
  password: {source_password}
  scan-url: {scan_url}
  scan.max-retries: {scan_max_retries}
  tables: {tables}

oceanbase:
  url: {sink_url}
  username: {sink_username}
  password: {sink_password}
  schema-name: test

pipeline:
  name: Sync StarRocks Database to OceanBase
  parallelism: {parallelism}
"#,
        source_username = source.username(),
        source_password = source.password(),
        scan_max_retries = source.scan_max_retries(),
        tables = source.tables(),
        sink_username = sink.username(),
        sink_password = sink.password(),
    ))
}
