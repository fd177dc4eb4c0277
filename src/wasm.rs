use crate::log::init_logger;
use crate::solver::{solve_words, SolveStatus, SolverError, SolverOptions, Statistics};
use crate::word_list::WordList;
use wasm_bindgen::prelude::*;

use serde_wasm_bindgen::to_value;

/// Structured error information for JavaScript consumers
#[derive(serde::Serialize)]
struct WasmError {
    /// Error code (e.g., "W002", "S003")
    code: String,
    /// Display message
    message: String,
    /// Short description of error type
    description: String,
    /// Detailed explanation
    details: String,
    /// Optional helpful suggestion
    #[serde(skip_serializing_if = "Option::is_none")]
    help: Option<String>,
}

impl From<SolverError> for WasmError {
    fn from(e: SolverError) -> Self {
        match &e {
            // report the word problem itself rather than the wrapper
            SolverError::InvalidWord(we) => WasmError {
                code: we.code().to_string(),
                message: we.to_string(),
                description: e.description().to_string(),
                details: e.details().to_string(),
                help: we.help().map(str::to_string),
            },
            _ => WasmError {
                code: e.code().to_string(),
                message: e.to_string(),
                description: e.description().to_string(),
                details: e.details().to_string(),
                help: e.help().map(str::to_string),
            },
        }
    }
}

impl From<WasmError> for JsValue {
    fn from(e: WasmError) -> Self {
        let mut msg = format!("Error {}: {}", e.code, e.message);

        if !e.details.is_empty() {
            msg.push_str(&format!("\n\n{}", e.details));
        }

        if let Some(help) = e.help {
            msg.push_str(&format!("\n\nSuggestion: {help}"));
        }

        js_sys::Error::new(&msg).into()
    }
}

fn internal_error(code: &str, message: String, description: &str, details: &str) -> WasmError {
    WasmError {
        code: code.to_string(),
        message,
        description: description.to_string(),
        details: details.to_string(),
        help: Some("This is an internal error. Please report this issue.".to_string()),
    }
}

/// Initialize logging with the specified debug setting.
///
/// # Arguments
/// * `debug_enabled` - If true, use Debug log level; if false, use Info log level
///
/// This function must be called from JavaScript after the WASM module loads.
#[wasm_bindgen]
pub fn initialize(debug_enabled: bool) {
    console_error_panic_hook::set_once();
    init_logger(debug_enabled);

    log::info!("runegrid {} WASM module initialized", crate::VERSION);
}

#[derive(serde::Serialize)]
struct WasmCell {
    row: usize,
    col: usize,
    letter: char,
}

#[derive(serde::Serialize)]
struct WasmGridResult {
    size: usize,
    cells: Vec<WasmCell>,
    status: String,
    statistics: Statistics,
}

fn status_name(status: &SolveStatus) -> &'static str {
    match status {
        SolveStatus::Solved => "solved",
        SolveStatus::CapacityExhausted => "capacity_exhausted",
        SolveStatus::Cancelled => "cancelled",
        SolveStatus::TimedOut { .. } => "timed_out",
    }
}

/// JS entry: (words: string[], grid_size?: number, max_grid_size?: number)
/// returns `{ size, cells: [{row, col, letter}], status, statistics }`; `cells` is
/// empty unless `status` is `"solved"`.
#[wasm_bindgen]
pub fn generate_grid_wasm(
    words: JsValue,
    grid_size: Option<usize>,
    max_grid_size: Option<usize>,
) -> Result<JsValue, JsValue> {
    let words: Vec<String> = serde_wasm_bindgen::from_value(words).map_err(|e| WasmError {
        code: "WASM001".to_string(),
        message: format!("words must be string[]: {e}"),
        description: "Invalid word list format".to_string(),
        details: "The words parameter must be a JavaScript array of strings.".to_string(),
        help: Some("Ensure you're passing a valid string array, e.g., ['cat', 'car', 'arc']".to_string()),
    })?;

    let defaults = SolverOptions::default();
    let options = SolverOptions {
        grid_size,
        max_grid_size: max_grid_size.unwrap_or(defaults.max_grid_size),
        ..defaults
    };

    let result = solve_words(&words, &options).map_err(WasmError::from)?;

    let (size, cells) = match &result.grid {
        Some(grid) => (
            grid.size(),
            grid.cells().map(|(c, letter)| WasmCell { row: c.row, col: c.col, letter }).collect(),
        ),
        None => (0, Vec::new()),
    };

    let wasm_result = WasmGridResult {
        size,
        cells,
        status: status_name(&result.status).to_string(),
        statistics: result.statistics,
    };

    to_value(&wasm_result).map_err(|e| {
        internal_error(
            "WASM002",
            format!("serialization failed: {e}"),
            "Failed to serialize result",
            "The solver result could not be converted to JavaScript format.",
        )
        .into()
    })
}

/// Parse a newline-separated word list (`word` or `word;score` per line).
///
/// Words with a score below `min_score` and words that are not plain letters are
/// dropped. Returns the surviving, normalized words as a JS string array.
///
/// # Errors
/// Returns a `JsValue` error if the result cannot be converted.
#[wasm_bindgen]
pub fn parse_word_list(text: &str, min_score: i32) -> Result<JsValue, JsValue> {
    let list = WordList::parse_from_str(text, min_score);
    to_value(&list.words).map_err(|e| {
        internal_error(
            "WASM003",
            format!("serialization failed: {e}"),
            "Failed to serialize word list",
            "The word list could not be converted to JavaScript format.",
        )
        .into()
    })
}

/// Generate a debug report users can paste when reporting a problem.
#[wasm_bindgen]
pub fn get_debug_info(words: &str, error_message: &str, max_grid_size: usize) -> String {
    use std::fmt::Write;
    let mut report = String::new();

    // NB: writing to a String never fails
    let _ = writeln!(&mut report, "=== RUNEGRID DEBUG REPORT ===");
    let _ = writeln!(&mut report, "Version: {}", crate::VERSION);
    let _ = writeln!(
        &mut report,
        "Generated: {}",
        js_sys::Date::new_0().to_iso_string().as_string().unwrap_or_else(|| "unknown".to_string())
    );
    let _ = writeln!(&mut report);

    let _ = writeln!(&mut report, "## Error");
    let _ = writeln!(&mut report, "{error_message}");
    let _ = writeln!(&mut report);

    let _ = writeln!(&mut report, "## Input");
    let _ = writeln!(&mut report, "Words: {words}");
    let _ = writeln!(&mut report, "Max Grid Size: {max_grid_size}");
    let _ = writeln!(&mut report);

    let _ = writeln!(&mut report, "## Environment");
    if let Some(window) = web_sys::window() {
        if let Ok(user_agent) = window.navigator().user_agent() {
            let _ = writeln!(&mut report, "User Agent: {user_agent}");
        }
    }
    let _ = writeln!(&mut report);

    let _ = writeln!(&mut report, "=== END DEBUG REPORT ===");

    report
}
