//! Remote SQLite-compatible backend (Turso).
//!
//! Speaks Turso's HTTP pipeline API: each call POSTs one `execute` request
//! (plus a `close`) to `/v2/pipeline` with the SQL and typed arguments, and
//! decodes the returned rows into the neutral [`Row`] type. The client is
//! created once at startup and reused for the life of the process.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info};

use super::{Database, DbError, ExecResult, Row, SqlValue};

pub struct TursoDb {
    http: reqwest::Client,
    pipeline_url: String,
    auth_token: String,
}

impl TursoDb {
    /// Creates a client for the database at `url` (either `libsql://` or
    /// `https://` form) authenticated with `auth_token`.
    pub fn new(url: &str, auth_token: &str) -> Self {
        let base = url
            .trim_end_matches('/')
            .replacen("libsql://", "https://", 1);

        info!(url = %base, "Using remote database backend");
        Self {
            http: reqwest::Client::new(),
            pipeline_url: format!("{base}/v2/pipeline"),
            auth_token: auth_token.to_string(),
        }
    }

    async fn run(&self, sql: &str, params: &[SqlValue]) -> Result<StmtResult, DbError> {
        debug!(sql, "Executing remote statement");

        let args: Vec<WireValue> = params.iter().map(WireValue::from).collect();
        let body = json!({
            "requests": [
                { "type": "execute", "stmt": { "sql": sql, "args": args } },
                { "type": "close" },
            ]
        });

        let response = self
            .http
            .post(&self.pipeline_url)
            .bearer_auth(&self.auth_token)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        let pipeline: PipelineResponse = response.json().await?;
        let first = pipeline
            .results
            .into_iter()
            .next()
            .ok_or_else(|| DbError::Remote("empty pipeline response".to_string()))?;

        match first {
            PipelineResult::Ok {
                response: HranaResponse::Execute { result },
            } => Ok(result),
            PipelineResult::Ok { .. } => {
                Err(DbError::Remote("unexpected response type".to_string()))
            }
            PipelineResult::Error { error } => Err(DbError::Remote(error.message)),
        }
    }
}

#[async_trait]
impl Database for TursoDb {
    async fn query(&self, sql: &str, params: &[SqlValue]) -> Result<Vec<Row>, DbError> {
        let result = self.run(sql, params).await?;

        let columns: Vec<String> = result
            .cols
            .iter()
            .map(|c| c.name.clone().unwrap_or_default())
            .collect();

        result
            .rows
            .into_iter()
            .map(|cells| {
                let values = cells
                    .into_iter()
                    .map(SqlValue::try_from)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Row::new(columns.clone(), values))
            })
            .collect()
    }

    async fn execute(&self, sql: &str, params: &[SqlValue]) -> Result<ExecResult, DbError> {
        let result = self.run(sql, params).await?;

        let last_insert_id = match result.last_insert_rowid {
            Some(raw) => raw
                .parse()
                .map_err(|_| DbError::Decode(format!("bad last_insert_rowid `{raw}`")))?,
            None => 0,
        };

        Ok(ExecResult {
            rows_affected: result.affected_row_count,
            last_insert_id,
        })
    }
}

/// Wire form of a statement argument or result cell. Integers travel as
/// decimal strings per the pipeline protocol.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum WireValue {
    Null,
    Integer { value: String },
    Float { value: f64 },
    Text { value: String },
    Blob { base64: String },
}

impl From<&SqlValue> for WireValue {
    fn from(value: &SqlValue) -> Self {
        match value {
            SqlValue::Null => WireValue::Null,
            SqlValue::Integer(v) => WireValue::Integer {
                value: v.to_string(),
            },
            SqlValue::Real(v) => WireValue::Float { value: *v },
            SqlValue::Text(v) => WireValue::Text { value: v.clone() },
        }
    }
}

impl TryFrom<WireValue> for SqlValue {
    type Error = DbError;

    fn try_from(value: WireValue) -> Result<Self, DbError> {
        match value {
            WireValue::Null => Ok(SqlValue::Null),
            WireValue::Integer { value } => value
                .parse()
                .map(SqlValue::Integer)
                .map_err(|_| DbError::Decode(format!("bad integer cell `{value}`"))),
            WireValue::Float { value } => Ok(SqlValue::Real(value)),
            WireValue::Text { value } => Ok(SqlValue::Text(value)),
            WireValue::Blob { .. } => {
                Err(DbError::Decode("unexpected blob cell".to_string()))
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct PipelineResponse {
    results: Vec<PipelineResult>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum PipelineResult {
    Ok { response: HranaResponse },
    Error { error: HranaError },
}

#[derive(Debug, Deserialize)]
struct HranaError {
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum HranaResponse {
    Execute { result: StmtResult },
    Close,
}

#[derive(Debug, Deserialize)]
struct StmtResult {
    #[serde(default)]
    cols: Vec<WireCol>,
    #[serde(default)]
    rows: Vec<Vec<WireValue>>,
    #[serde(default)]
    affected_row_count: u64,
    #[serde(default)]
    last_insert_rowid: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireCol {
    name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_values_round_trip_params() {
        let wire = WireValue::from(&SqlValue::Integer(42));
        assert_eq!(
            serde_json::to_value(&wire).unwrap(),
            serde_json::json!({ "type": "integer", "value": "42" })
        );

        let back: SqlValue = wire.try_into().unwrap();
        assert_eq!(back, SqlValue::Integer(42));
    }

    #[test]
    fn decodes_pipeline_rows() {
        let raw = serde_json::json!({
            "results": [{
                "type": "ok",
                "response": {
                    "type": "execute",
                    "result": {
                        "cols": [{ "name": "id" }, { "name": "name" }],
                        "rows": [[
                            { "type": "integer", "value": "3" },
                            { "type": "text", "value": "Negroni" },
                        ]],
                        "affected_row_count": 0,
                        "last_insert_rowid": null,
                    }
                }
            }]
        });

        let parsed: PipelineResponse = serde_json::from_value(raw).unwrap();
        let PipelineResult::Ok {
            response: HranaResponse::Execute { result },
        } = &parsed.results[0]
        else {
            panic!("expected execute result");
        };
        assert_eq!(result.rows.len(), 1);
        assert_eq!(result.cols[1].name.as_deref(), Some("name"));
    }

    #[test]
    fn surfaces_remote_errors() {
        let raw = serde_json::json!({
            "results": [{
                "type": "error",
                "error": { "message": "no such table: cocktails" }
            }]
        });

        let parsed: PipelineResponse = serde_json::from_value(raw).unwrap();
        assert!(matches!(&parsed.results[0], PipelineResult::Error { error } if error.message.contains("no such table")));
    }
}
