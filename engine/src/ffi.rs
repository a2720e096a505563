//! FFI layer for embedding the engine in the portal backend.
//!
//! This module provides C-compatible functions. All data crosses the
//! boundary as JSON strings.
//!
//! # Memory Management
//!
//! - Strings returned by `lotorder_*` functions are allocated by Rust
//! - Caller must free them with `lotorder_string_free`
//!
//! # Error Handling
//!
//! Functions return JSON with either:
//! - `{"ok": <result>}` on success
//! - `{"error": "<message>"}` on failure

use crate::{
    ExportRequest, Lot, LotId, LotNumber, OrderOptions, Orderer, Placement, PlacementSummary,
    Rank, RosterTable, StandardColumns,
};
use serde::Serialize;
use std::ffi::{c_char, CStr, CString};

/// Result wrapper for FFI responses.
#[derive(Serialize)]
#[serde(untagged)]
enum FfiResult<T: Serialize> {
    Ok { ok: T },
    Err { error: String },
}

impl<T: Serialize> FfiResult<T> {
    fn ok(value: T) -> Self {
        FfiResult::Ok { ok: value }
    }

    fn err(message: impl Into<String>) -> Self {
        FfiResult::Err {
            error: message.into(),
        }
    }

    fn to_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|e| format!(r#"{{"error":"serialization failed: {}"}}"#, e))
    }
}

fn error_response(message: impl Into<String>) -> *mut c_char {
    to_c_string(FfiResult::<()>::err(message).to_json())
}

/// Convert a Rust string to a C string pointer.
/// Caller must free with `lotorder_string_free`.
fn to_c_string(s: String) -> *mut c_char {
    match CString::new(s) {
        Ok(cs) => cs.into_raw(),
        Err(_) => {
            let error = c"{\"error\":\"string contained null bytes\"}";
            error.to_owned().into_raw()
        }
    }
}

/// Convert a C string pointer to a Rust string.
/// Returns `Ok(None)` for a null pointer and an error message for invalid UTF-8.
unsafe fn from_c_string(ptr: *const c_char) -> Result<Option<String>, String> {
    if ptr.is_null() {
        return Ok(None);
    }
    CStr::from_ptr(ptr)
        .to_str()
        .map(|s| Some(s.to_string()))
        .map_err(|e| format!("invalid UTF-8: {}", e))
}

/// One placed lot as reported across the boundary.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PlacementView {
    id: LotId,
    team_name: String,
    rank: Rank,
    lot_number: LotNumber,
}

/// Ordering response: ids in order plus per-lot placement detail.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OrderResponse {
    ids: Vec<LotId>,
    placements: Vec<PlacementView>,
    summary: PlacementSummary,
}

impl OrderResponse {
    fn from_placements(placements: &[Placement<'_, serde_json::Value>]) -> Self {
        Self {
            ids: placements.iter().map(|p| p.lot.id.clone()).collect(),
            placements: placements
                .iter()
                .map(|p| PlacementView {
                    id: p.lot.id.clone(),
                    team_name: p.lot.team_name.clone(),
                    rank: p.rank,
                    lot_number: p.lot_number,
                })
                .collect(),
            summary: PlacementSummary::from_placements(placements),
        }
    }
}

// ============================================================================
// Ordering
// ============================================================================

/// Order a lot collection against a canonical list.
///
/// # Arguments
/// - `canonical_json`: JSON array of team names
/// - `lots_json`: JSON array of lots
/// - `options_json`: JSON `OrderOptions`, or null for defaults
///
/// # Returns
/// JSON string: `{"ok": OrderResponse}` or `{"error": "message"}`
///
/// # Safety
/// - Each argument must be a valid null-terminated C string or null
/// - Caller must free the returned string with `lotorder_string_free`
#[no_mangle]
pub unsafe extern "C" fn lotorder_order(
    canonical_json: *const c_char,
    lots_json: *const c_char,
    options_json: *const c_char,
) -> *mut c_char {
    let canonical: Vec<String> = match from_c_string(canonical_json) {
        Ok(Some(s)) => match serde_json::from_str::<Option<Vec<String>>>(&s) {
            Ok(c) => c.unwrap_or_default(),
            Err(e) => return error_response(format!("parse error: {}", e)),
        },
        Ok(None) => Vec::new(),
        Err(message) => return error_response(message),
    };

    let lots: Vec<Lot> = match from_c_string(lots_json) {
        Ok(Some(s)) => match serde_json::from_str::<Option<Vec<Lot>>>(&s) {
            Ok(Some(lots)) => lots,
            Ok(None) => return error_response(crate::Error::MissingLots.to_string()),
            Err(e) => return error_response(format!("parse error: {}", e)),
        },
        Ok(None) => return error_response(crate::Error::MissingLots.to_string()),
        Err(message) => return error_response(message),
    };

    let options: OrderOptions = match from_c_string(options_json) {
        Ok(Some(s)) => match serde_json::from_str(&s) {
            Ok(o) => o,
            Err(e) => return error_response(format!("invalid options: {}", e)),
        },
        Ok(None) => OrderOptions::default(),
        Err(message) => return error_response(message),
    };

    match Orderer::new(options).placements(&canonical, &lots) {
        Ok(placements) => {
            to_c_string(FfiResult::ok(OrderResponse::from_placements(&placements)).to_json())
        }
        Err(e) => error_response(e.to_string()),
    }
}

/// Order the lots of a full export request.
///
/// # Returns
/// JSON string: `{"ok": OrderResponse}` or `{"error": "message"}`
///
/// # Safety
/// - `request_json` must be a valid null-terminated C string or null
/// - Caller must free the returned string with `lotorder_string_free`
#[no_mangle]
pub unsafe extern "C" fn lotorder_order_request(request_json: *const c_char) -> *mut c_char {
    let request = match parse_request(request_json) {
        Ok(r) => r,
        Err(message) => return error_response(message),
    };

    match request.placements() {
        Ok(placements) => {
            to_c_string(FfiResult::ok(OrderResponse::from_placements(&placements)).to_json())
        }
        Err(e) => error_response(e.to_string()),
    }
}

/// Order an export request and project it with the standard columns.
///
/// The host can render its own artifacts from the returned table and stay
/// in lockstep with the export tool.
///
/// # Returns
/// JSON string: `{"ok": RosterTable}` or `{"error": "message"}`
///
/// # Safety
/// - `request_json` must be a valid null-terminated C string or null
/// - Caller must free the returned string with `lotorder_string_free`
#[no_mangle]
pub unsafe extern "C" fn lotorder_roster(request_json: *const c_char) -> *mut c_char {
    let request = match parse_request(request_json) {
        Ok(r) => r,
        Err(message) => return error_response(message),
    };

    match request.order() {
        Ok(ordered) => {
            let table = RosterTable::project(&ordered, &StandardColumns::new());
            to_c_string(FfiResult::ok(table).to_json())
        }
        Err(e) => error_response(e.to_string()),
    }
}

unsafe fn parse_request(request_json: *const c_char) -> Result<ExportRequest, String> {
    let json = from_c_string(request_json)?.ok_or_else(|| "invalid request JSON".to_string())?;
    ExportRequest::from_json(&json).map_err(|e| e.to_string())
}

/// Free a string allocated by the engine.
///
/// # Safety
/// - `s` must be a valid pointer from a `lotorder_*` function
/// - Must not be called twice on the same pointer
#[no_mangle]
pub unsafe extern "C" fn lotorder_string_free(s: *mut c_char) {
    if !s.is_null() {
        drop(CString::from_raw(s));
    }
}

// ============================================================================
// Utilities
// ============================================================================

/// Get the engine version.
///
/// # Returns
/// Static string pointer (do not free)
#[no_mangle]
pub extern "C" fn lotorder_version() -> *const c_char {
    static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr() as *const c_char
}

/// Get the request format version.
#[no_mangle]
pub extern "C" fn lotorder_request_format_version() -> u32 {
    crate::REQUEST_FORMAT_VERSION
}
