//! JSON-RPC request handling
//!
//! Tools:
//! - convert_all: Convert a value into every unit of a domain
//! - convert: Convert a value between two units
//! - convert_batch: Several independent convert_all calls
//! - list_units: Units of a domain, in display order
//! - list_domains: All registered domains

use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};
use gauge_core::{ConvertError, ErrorReport};
use gauge_units::{
    convert, convert_all, convert_batch, error_report, ConversionRequest, Conversions, UnitRegistry,
};

pub const PROTOCOL_VERSION: &str = "2025-11-25";
pub const SERVER_NAME: &str = "gauge";
pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const PARSE_ERROR: i32 = -32700;
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INVALID_PARAMS: i32 = -32602;

/// Report code for a batch item missing its domain or unit
pub const INVALID_REQUEST: &str = "INVALID_REQUEST";

// MCP Protocol types
#[derive(Debug, Deserialize)]
pub struct McpRequest {
    #[allow(dead_code)]
    pub jsonrpc: String,
    pub id: Option<JsonValue>,
    pub method: String,
    #[serde(default)]
    pub params: Option<JsonValue>,
}

#[derive(Debug, Serialize)]
pub struct McpResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<McpError>,
}

#[derive(Debug, Serialize)]
pub struct McpError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<JsonValue>,
}

impl McpError {
    fn invalid_params(message: impl Into<String>) -> Self {
        McpError { code: INVALID_PARAMS, message: message.into(), data: None }
    }
}

impl McpResponse {
    /// Response for a line that was not valid JSON-RPC
    pub fn parse_error(details: impl std::fmt::Display) -> Self {
        McpResponse {
            jsonrpc: "2.0".to_string(),
            id: None,
            result: None,
            error: Some(McpError {
                code: PARSE_ERROR,
                message: format!("Parse error: {}", details),
                data: None,
            }),
        }
    }
}

pub fn handle_request(registry: &UnitRegistry, request: &McpRequest) -> McpResponse {
    let result = match request.method.as_str() {
        // Lifecycle
        "initialize" => handle_initialize(&request.params),
        "initialized" => Ok(json!({})),
        "ping" => Ok(json!({})),

        // Tools
        "tools/list" => handle_tools_list(),
        "tools/call" => handle_tool_call(registry, &request.params),

        _ => Err(McpError {
            code: METHOD_NOT_FOUND,
            message: format!("Method not found: {}", request.method),
            data: None,
        }),
    };

    match result {
        Ok(r) => McpResponse {
            jsonrpc: "2.0".to_string(),
            id: request.id.clone(),
            result: Some(r),
            error: None,
        },
        Err(e) => McpResponse {
            jsonrpc: "2.0".to_string(),
            id: request.id.clone(),
            result: None,
            error: Some(e),
        },
    }
}

fn handle_initialize(params: &Option<JsonValue>) -> Result<JsonValue, McpError> {
    let client_info = params.as_ref()
        .and_then(|p| p.get("clientInfo"))
        .and_then(|c| c.get("name"))
        .and_then(|n| n.as_str())
        .unwrap_or("unknown");

    // Use client's protocol version for compatibility
    let client_protocol = params.as_ref()
        .and_then(|p| p.get("protocolVersion"))
        .and_then(|v| v.as_str())
        .unwrap_or(PROTOCOL_VERSION);

    tracing::info!(client = client_info, protocol = client_protocol, "client connected");

    Ok(json!({
        "protocolVersion": client_protocol,
        "serverInfo": {
            "name": SERVER_NAME,
            "version": SERVER_VERSION,
            "description": "Measurement unit conversion across length, temperature, currency, fuel economy and more"
        },
        "capabilities": {
            "tools": {
                "listChanged": false
            }
        },
        "instructions": "Use list_domains to discover domains, list_units for the unit ids of a domain, and convert_all to convert a value into every unit of its domain."
    }))
}

fn handle_tools_list() -> Result<JsonValue, McpError> {
    let value_schema = json!({
        "type": ["number", "string", "null"],
        "description": "Value to convert; missing or non-numeric input counts as 0"
    });

    Ok(json!({
        "tools": [
            {
                "name": "convert_all",
                "description": "Convert a value expressed in one unit into every unit of its domain.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "domain": { "type": "string", "description": "Domain key, e.g. \"length\"" },
                        "unit": { "type": "string", "description": "Source unit id, e.g. \"km\"" },
                        "value": value_schema
                    },
                    "required": ["domain", "unit"]
                }
            },
            {
                "name": "convert",
                "description": "Convert a value between two units of the same domain.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "domain": { "type": "string", "description": "Domain key" },
                        "from": { "type": "string", "description": "Source unit id" },
                        "to": { "type": "string", "description": "Target unit id" },
                        "value": value_schema
                    },
                    "required": ["domain", "from", "to"]
                }
            },
            {
                "name": "convert_batch",
                "description": "Run several independent convert_all requests. A failing request does not affect the others.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "requests": {
                            "type": "array",
                            "items": {
                                "type": "object",
                                "properties": {
                                    "domain": { "type": "string" },
                                    "unit": { "type": "string" },
                                    "value": value_schema
                                },
                                "required": ["domain", "unit"]
                            }
                        }
                    },
                    "required": ["requests"]
                }
            },
            {
                "name": "list_units",
                "description": "List the units of a domain in display order.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "domain": { "type": "string", "description": "Domain key" }
                    },
                    "required": ["domain"]
                }
            },
            {
                "name": "list_domains",
                "description": "List all measurement domains.",
                "inputSchema": {
                    "type": "object",
                    "properties": {}
                }
            }
        ]
    }))
}

fn handle_tool_call(registry: &UnitRegistry, params: &Option<JsonValue>) -> Result<JsonValue, McpError> {
    let params = params.as_ref().ok_or_else(|| McpError::invalid_params("Missing params"))?;

    let name = params.get("name")
        .and_then(|v| v.as_str())
        .ok_or_else(|| McpError::invalid_params("Missing tool name"))?;

    let args = params.get("arguments").cloned().unwrap_or(json!({}));

    tracing::debug!(tool = name, "tool call");

    match name {
        "convert_all" => tool_convert_all(registry, args),
        "convert" => tool_convert(registry, args),
        "convert_batch" => tool_convert_batch(registry, args),
        "list_units" => tool_list_units(registry, args),
        "list_domains" => tool_list_domains(registry),
        _ => Err(McpError::invalid_params(format!("Unknown tool: {}", name))),
    }
}

fn tool_convert_all(registry: &UnitRegistry, args: JsonValue) -> Result<JsonValue, McpError> {
    let domain = required_str(&args, "domain")?;
    let unit = required_str(&args, "unit")?;
    let value = coerce_value(args.get("value"));

    match convert_all(registry, domain, unit, value) {
        Ok(conversions) => Ok(json!({
            "content": [{ "type": "text", "text": render_table(&conversions) }],
            "data": conversions
        })),
        Err(e) => Ok(tool_error(registry, &e)),
    }
}

fn tool_convert(registry: &UnitRegistry, args: JsonValue) -> Result<JsonValue, McpError> {
    let domain = required_str(&args, "domain")?;
    let from = required_str(&args, "from")?;
    let to = required_str(&args, "to")?;
    let value = coerce_value(args.get("value"));

    match convert(registry, domain, from, to, value) {
        Ok(result) => Ok(json!({
            "content": [{ "type": "text", "text": format!("{} {} = {} {}", value, from, result, to) }],
            "data": {
                "domain": domain,
                "from": from,
                "to": to,
                "value": value,
                "result": result
            }
        })),
        Err(e) => Ok(tool_error(registry, &e)),
    }
}

fn tool_convert_batch(registry: &UnitRegistry, args: JsonValue) -> Result<JsonValue, McpError> {
    let items = args.get("requests")
        .and_then(|v| v.as_array())
        .ok_or_else(|| McpError::invalid_params("Missing requests"))?;

    // A malformed item is reported in its own slot; the rest still run
    let mut slots: Vec<Option<JsonValue>> = vec![None; items.len()];
    let mut positions = Vec::with_capacity(items.len());
    let mut requests = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        match batch_request(item) {
            Ok(request) => {
                positions.push(index);
                requests.push(request);
            }
            Err(e) => {
                let report = ErrorReport::new(INVALID_REQUEST, e.message);
                slots[index] = Some(json!({ "index": index, "error": report }));
            }
        }
    }

    for (index, result) in positions.into_iter().zip(convert_batch(registry, &requests)) {
        slots[index] = Some(match result {
            Ok(conversions) => json!({ "index": index, "data": conversions }),
            Err(e) => json!({ "index": index, "error": error_report(registry, &e) }),
        });
    }
    let results: Vec<JsonValue> = slots.into_iter().flatten().collect();

    let failed = results.iter().filter(|r| r.get("error").is_some()).count();
    let summary = format!("Converted {} requests ({} failed)", results.len(), failed);

    Ok(json!({
        "content": [{ "type": "text", "text": summary }],
        "results": results
    }))
}

fn batch_request(item: &JsonValue) -> Result<ConversionRequest, McpError> {
    Ok(ConversionRequest::new(
        required_str(item, "domain")?,
        required_str(item, "unit")?,
        coerce_value(item.get("value")),
    ))
}

fn tool_list_units(registry: &UnitRegistry, args: JsonValue) -> Result<JsonValue, McpError> {
    let key = required_str(&args, "domain")?;
    let domain = match registry.domain(key) {
        Ok(d) => d,
        Err(e) => return Ok(tool_error(registry, &e)),
    };

    let units: Vec<JsonValue> = domain
        .units()
        .iter()
        .map(|u| json!({ "id": u.id, "label": u.label }))
        .collect();
    let ids: Vec<&str> = domain.unit_ids().collect();

    Ok(json!({
        "content": [{ "type": "text", "text": ids.join(", ") }],
        "data": {
            "domain": domain.key(),
            "base": domain.base_unit().map(|u| u.id.as_str()),
            "units": units
        }
    }))
}

fn tool_list_domains(registry: &UnitRegistry) -> Result<JsonValue, McpError> {
    let domains: Vec<JsonValue> = registry
        .domains()
        .iter()
        .map(|d| json!({
            "key": d.key(),
            "label": d.label(),
            "kind": d.kind(),
            "base": d.base_unit().map(|u| u.id.as_str()),
            "units": d.units().len()
        }))
        .collect();
    let keys: Vec<&str> = registry.domain_keys().collect();

    Ok(json!({
        "content": [{ "type": "text", "text": keys.join(", ") }],
        "data": domains
    }))
}

fn tool_error(registry: &UnitRegistry, err: &ConvertError) -> JsonValue {
    let report = error_report(registry, err);
    json!({
        "content": [{ "type": "text", "text": format!("Error: {}", report) }],
        "isError": true,
        "error": report
    })
}

fn required_str<'a>(args: &'a JsonValue, field: &str) -> Result<&'a str, McpError> {
    args.get(field)
        .and_then(|v| v.as_str())
        .ok_or_else(|| McpError::invalid_params(format!("Missing {}", field)))
}

/// Missing, null, non-numeric or NaN input becomes 0; numeric strings are parsed
pub fn coerce_value(value: Option<&JsonValue>) -> f64 {
    let parsed = match value {
        Some(JsonValue::Number(n)) => n.as_f64(),
        Some(JsonValue::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match parsed {
        Some(v) if !v.is_nan() => v,
        _ => 0.0,
    }
}

fn render_table(conversions: &Conversions) -> String {
    let mut out = format!(
        "{} {} ({})\n\n| Unit | Value |\n|------|-------|\n",
        conversions.source_value, conversions.source_unit, conversions.domain
    );
    for entry in conversions {
        out.push_str(&format!("| {} | {} |\n", entry.label, entry.value));
    }
    out
}
