//! Routing, boundary validation and status mapping
//!
//! | Route | Success |
//! |---|---|
//! | `POST /mapping` | 201 with the created record |
//! | `POST /mapping/terminate` | 200 with `"status": "terminated"` and the record |
//! | `GET /symbol/{symbol}?date=` | 200 `{symbol, date, identifier}` |
//! | `GET /identifier/{identifier}?date=` | 200 `{identifier, date, symbol}` |
//! | `GET /mappings?begin=&end=` | 200 with an array of records |
//! | `GET /health` | 200 `{"status": "ok"}` |
//!
//! Failures carry `{"code", "message"}` with the stable error code. Unknown
//! routes answer `ERR_ROUTE_NOT_FOUND`, wrong methods `ERR_METHOD_NOT_ALLOWED`.

#![allow(clippy::result_large_err)]

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::{json, Value};
use symbology_core::core_types::schema::FIELD_REQUEST_ID;
use symbology_core::core_types::RequestContext;
use symbology_core::errors::{ExError, ExErrorKind};
use symbology_core::rules::validation::{parse_date, validate_identifier, validate_symbol};
use symbology_core::SnapshotSink;
use symbology_engine::{Engine, EngineCommand, EngineQuery, EngineQueryResult};

/// Transport-independent response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Value,
}

impl HttpResponse {
    fn ok(body: Value) -> Self {
        Self { status: 200, body }
    }

    /// Error response carrying the stable code of `err`
    pub fn from_error(err: &ExError) -> Self {
        let mut body = json!({ "code": err.code(), "message": err.message() });
        if let (Some(request_id), Value::Object(fields)) = (err.request_id(), &mut body) {
            fields.insert(FIELD_REQUEST_ID.to_string(), json!(request_id.as_str()));
        }
        Self {
            status: status_for(err.kind()),
            body,
        }
    }
}

/// HTTP status for an error kind
pub fn status_for(kind: ExErrorKind) -> u16 {
    match kind {
        ExErrorKind::NotFound => 404,
        ExErrorKind::Conflict => 409,
        ExErrorKind::InvalidInput
        | ExErrorKind::InvalidSymbol
        | ExErrorKind::InvalidIdentifier
        | ExErrorKind::InvalidDate
        | ExErrorKind::InvalidInterval => 422,
        ExErrorKind::Concurrency => 503,
        ExErrorKind::InvariantViolation
        | ExErrorKind::Io
        | ExErrorKind::Serialization
        | ExErrorKind::Persistence
        | ExErrorKind::Internal => 500,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Route {
    Health,
    CreateMapping,
    TerminateMapping,
    IdentifierBySymbol(String),
    SymbolByIdentifier(String),
    MappingsBetween,
}

#[derive(Debug, Deserialize)]
struct CreateMappingBody {
    symbol: String,
    identifier: i64,
    start_date: String,
}

#[derive(Debug, Deserialize)]
struct TerminateMappingBody {
    symbol: String,
    end_date: String,
}

fn invalid_input(message: impl Into<String>) -> ExError {
    ExError::new(ExErrorKind::InvalidInput).with_message(message)
}

fn route_not_found(path: &str) -> HttpResponse {
    HttpResponse {
        status: 404,
        body: json!({
            "code": "ERR_ROUTE_NOT_FOUND",
            "message": format!("unknown route: {}", path),
        }),
    }
}

fn malformed_body(err: &serde_json::Error) -> HttpResponse {
    HttpResponse {
        status: 400,
        body: json!({
            "code": ExErrorKind::InvalidInput.code(),
            "message": format!("malformed JSON body: {}", err),
        }),
    }
}

fn method_not_allowed(method: &str, path: &str) -> HttpResponse {
    HttpResponse {
        status: 405,
        body: json!({
            "code": "ERR_METHOD_NOT_ALLOWED",
            "message": format!("method {} not allowed on {}", method, path),
        }),
    }
}

/// Handle one request
///
/// `ctx` carries the method, the path (without query) and the request id;
/// `query` is the raw query string. Syntactically broken JSON bodies are
/// answered with 400; well-formed bodies with missing or mistyped fields
/// are validation failures (422).
pub fn handle<S: SnapshotSink>(
    engine: &Engine<S>,
    ctx: &RequestContext,
    query: &str,
    body: &str,
) -> HttpResponse {
    let route = match parse_route(&ctx.path) {
        Some(route) => route,
        None => return route_not_found(&ctx.path),
    };

    let expected = match route {
        Route::CreateMapping | Route::TerminateMapping => "POST",
        _ => "GET",
    };
    if ctx.method != expected {
        return method_not_allowed(&ctx.method, &ctx.path);
    }

    let body = if expected == "POST" {
        match serde_json::from_str::<Value>(body) {
            Ok(value) => value,
            Err(err) => return malformed_body(&err),
        }
    } else {
        Value::Null
    };

    let params = parse_query_params(query);
    match execute_route(engine, route, &params, body) {
        Ok(response) => response,
        Err(err) => HttpResponse::from_error(&err.with_request_id(ctx.request_id.clone())),
    }
}

fn parse_route(path: &str) -> Option<Route> {
    let trimmed = path.trim_end_matches('/');
    match trimmed {
        "/health" => return Some(Route::Health),
        "/mapping" => return Some(Route::CreateMapping),
        "/mapping/terminate" => return Some(Route::TerminateMapping),
        "/mappings" => return Some(Route::MappingsBetween),
        _ => {}
    }

    if let Some(symbol) = trimmed.strip_prefix("/symbol/") {
        if !symbol.is_empty() && !symbol.contains('/') {
            return Some(Route::IdentifierBySymbol(percent_decode(symbol)));
        }
    }
    if let Some(identifier) = trimmed.strip_prefix("/identifier/") {
        if !identifier.is_empty() && !identifier.contains('/') {
            return Some(Route::SymbolByIdentifier(percent_decode(identifier)));
        }
    }
    None
}

fn execute_route<S: SnapshotSink>(
    engine: &Engine<S>,
    route: Route,
    params: &BTreeMap<String, String>,
    body: Value,
) -> Result<HttpResponse, ExError> {
    match route {
        Route::Health => Ok(HttpResponse::ok(json!({ "status": "ok" }))),

        Route::CreateMapping => {
            let body: CreateMappingBody = parse_body(body)?;
            validate_symbol(&body.symbol)?;
            let identifier = validate_identifier(body.identifier)?;
            let start_date = parse_date(&body.start_date)?;

            let result = engine.apply_engine_command(EngineCommand::MappingCreate {
                symbol: body.symbol,
                identifier,
                start_date,
            })?;
            Ok(HttpResponse {
                status: 201,
                body: record_json(result.record()),
            })
        }

        Route::TerminateMapping => {
            let body: TerminateMappingBody = parse_body(body)?;
            validate_symbol(&body.symbol)?;
            let end_date = parse_date(&body.end_date)?;

            let result = engine.apply_engine_command(EngineCommand::MappingTerminate {
                symbol: body.symbol,
                end_date,
            })?;
            let mut body = record_json(result.record());
            if let Value::Object(fields) = &mut body {
                fields.insert("status".to_string(), json!("terminated"));
            }
            Ok(HttpResponse::ok(body))
        }

        Route::IdentifierBySymbol(symbol) => {
            validate_symbol(&symbol)?;
            let date = parse_date(required(params, "date")?)?;

            match engine.apply_engine_query(EngineQuery::IdentifierBySymbol {
                symbol: symbol.clone(),
                date,
            })? {
                EngineQueryResult::Identifier(identifier) => Ok(HttpResponse::ok(json!({
                    "symbol": symbol,
                    "date": date,
                    "identifier": identifier,
                }))),
                other => Err(unexpected_result(&other)),
            }
        }

        Route::SymbolByIdentifier(raw) => {
            let parsed: i64 = raw.parse().map_err(|_| {
                ExError::new(ExErrorKind::InvalidIdentifier)
                    .with_message(format!("identifier '{}' is not an integer", raw))
            })?;
            let identifier = validate_identifier(parsed)?;
            let date = parse_date(required(params, "date")?)?;

            match engine.apply_engine_query(EngineQuery::SymbolByIdentifier { identifier, date })? {
                EngineQueryResult::Symbol(symbol) => Ok(HttpResponse::ok(json!({
                    "identifier": identifier,
                    "date": date,
                    "symbol": symbol,
                }))),
                other => Err(unexpected_result(&other)),
            }
        }

        Route::MappingsBetween => {
            let begin = parse_date(required(params, "begin")?)?;
            let end = parse_date(required(params, "end")?)?;

            match engine.apply_engine_query(EngineQuery::MappingsBetween { begin, end })? {
                EngineQueryResult::Mappings(records) => Ok(HttpResponse::ok(
                    Value::Array(records.iter().map(record_json).collect()),
                )),
                other => Err(unexpected_result(&other)),
            }
        }
    }
}

fn record_json(record: &symbology_core::MappingRecord) -> Value {
    json!({
        "symbol": record.symbol,
        "identifier": record.identifier,
        "start_date": record.start_date,
        "end_date": record.end_date,
    })
}

fn unexpected_result(result: &EngineQueryResult) -> ExError {
    ExError::new(ExErrorKind::Internal)
        .with_message(format!("unexpected engine result: {:?}", result))
}

fn parse_body<T: serde::de::DeserializeOwned>(body: Value) -> Result<T, ExError> {
    serde_json::from_value(body).map_err(|e| invalid_input(format!("invalid request body: {}", e)))
}

fn required<'a>(params: &'a BTreeMap<String, String>, name: &str) -> Result<&'a str, ExError> {
    params
        .get(name)
        .map(String::as_str)
        .ok_or_else(|| invalid_input(format!("missing query parameter '{}'", name)))
}

fn parse_query_params(query: &str) -> BTreeMap<String, String> {
    let mut out = BTreeMap::new();
    for pair in query.split('&') {
        if pair.is_empty() {
            continue;
        }
        let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
        let key = percent_decode(k);
        if key.is_empty() {
            continue;
        }
        out.insert(key, percent_decode(v));
    }
    out
}

fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0usize;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' if i + 2 < bytes.len() => {
                match (hex_val(bytes[i + 1]), hex_val(bytes[i + 2])) {
                    (Some(h), Some(l)) => {
                        out.push(h * 16 + l);
                        i += 3;
                    }
                    _ => {
                        out.push(b'%');
                        i += 1;
                    }
                }
            }
            byte => {
                out.push(byte);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_val(ch: u8) -> Option<u8> {
    match ch {
        b'0'..=b'9' => Some(ch - b'0'),
        b'a'..=b'f' => Some(ch - b'a' + 10),
        b'A'..=b'F' => Some(ch - b'A' + 10),
        _ => None,
    }
}
