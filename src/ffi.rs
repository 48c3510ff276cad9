//! C-ABI FFI bindings for cross-language integration.
//!
//! Documents and options cross the boundary as JSON; flow blocks come
//! back as JSON.

use std::ffi::{c_char, CStr, CString};
use std::ptr;

use crate::render::{to_json, to_text, JsonFormat};
use crate::{convert_json, ConvertOptions};

/// Result structure returned by FFI functions.
#[repr(C)]
pub struct DocflowResult {
    /// Whether the operation succeeded.
    pub success: bool,
    /// The result data (null if failed). Must be freed with `docflow_free_result`.
    pub data: *mut c_char,
    /// Error message (null if succeeded). Must be freed with `docflow_free_result`.
    pub error: *mut c_char,
}

impl DocflowResult {
    fn success(data: String) -> Self {
        Self {
            success: true,
            data: CString::new(data).unwrap_or_default().into_raw(),
            error: ptr::null_mut(),
        }
    }

    fn error(message: String) -> Self {
        Self {
            success: false,
            data: ptr::null_mut(),
            error: CString::new(message).unwrap_or_default().into_raw(),
        }
    }
}

unsafe fn read_str<'a>(value: *const c_char, name: &str) -> Result<&'a str, String> {
    if value.is_null() {
        return Err(format!("{name} cannot be null"));
    }
    CStr::from_ptr(value)
        .to_str()
        .map_err(|_| format!("Invalid UTF-8 {name}"))
}

unsafe fn read_options(options_json: *const c_char) -> Result<ConvertOptions, String> {
    if options_json.is_null() {
        return Ok(ConvertOptions::default());
    }
    let json = read_str(options_json, "options")?;
    ConvertOptions::from_json(json).map_err(|e| e.to_string())
}

/// Convert a JSON document to flow blocks as JSON.
///
/// # Safety
///
/// `document_json` must be a valid null-terminated UTF-8 string.
/// `options_json` must be null (default options) or a valid null-terminated
/// UTF-8 string.
/// The returned result must be freed with `docflow_free_result`.
#[no_mangle]
pub unsafe extern "C" fn docflow_convert_json(
    document_json: *const c_char,
    options_json: *const c_char,
    pretty: bool,
) -> DocflowResult {
    let document = match read_str(document_json, "document") {
        Ok(s) => s,
        Err(e) => return DocflowResult::error(e),
    };
    let options = match read_options(options_json) {
        Ok(options) => options,
        Err(e) => return DocflowResult::error(e),
    };

    let format = if pretty {
        JsonFormat::Pretty
    } else {
        JsonFormat::Compact
    };

    match convert_json(document, &options).and_then(|result| to_json(&result.blocks, format)) {
        Ok(json) => DocflowResult::success(json),
        Err(e) => DocflowResult::error(e.to_string()),
    }
}

/// Convert a JSON document to plain text.
///
/// # Safety
///
/// `document_json` must be a valid null-terminated UTF-8 string.
/// The returned result must be freed with `docflow_free_result`.
#[no_mangle]
pub unsafe extern "C" fn docflow_to_text(document_json: *const c_char) -> DocflowResult {
    let document = match read_str(document_json, "document") {
        Ok(s) => s,
        Err(e) => return DocflowResult::error(e),
    };

    match convert_json(document, &ConvertOptions::default()) {
        Ok(result) => DocflowResult::success(to_text(&result.blocks)),
        Err(e) => DocflowResult::error(e.to_string()),
    }
}

/// Conversion statistics of a JSON document as JSON.
///
/// # Safety
///
/// `document_json` must be a valid null-terminated UTF-8 string.
/// The returned result must be freed with `docflow_free_result`.
#[no_mangle]
pub unsafe extern "C" fn docflow_stats(document_json: *const c_char) -> DocflowResult {
    let document = match read_str(document_json, "document") {
        Ok(s) => s,
        Err(e) => return DocflowResult::error(e),
    };

    let stats = convert_json(document, &ConvertOptions::default()).and_then(|result| {
        serde_json::to_string_pretty(&result.stats).map_err(crate::Error::from)
    });
    match stats {
        Ok(json) => DocflowResult::success(json),
        Err(e) => DocflowResult::error(e.to_string()),
    }
}

/// Free a result returned by any docflow function.
///
/// # Safety
///
/// The `result` must have been returned by a docflow function.
/// This function should only be called once per result.
#[no_mangle]
pub unsafe extern "C" fn docflow_free_result(result: DocflowResult) {
    if !result.data.is_null() {
        drop(CString::from_raw(result.data));
    }
    if !result.error.is_null() {
        drop(CString::from_raw(result.error));
    }
}

/// Free a string allocated by docflow.
///
/// # Safety
///
/// The `ptr` must have been allocated by docflow.
/// This function should only be called once per pointer.
#[no_mangle]
pub unsafe extern "C" fn docflow_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}

/// Get the version of the docflow library.
///
/// The returned string is statically allocated and should not be freed.
#[no_mangle]
pub extern "C" fn docflow_version() -> *const c_char {
    static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr() as *const c_char
}

#[cfg(test)]
mod tests {
    use super::*;

    unsafe fn take(result: DocflowResult) -> (bool, String) {
        let ptr = if result.success { result.data } else { result.error };
        let text = CStr::from_ptr(ptr).to_string_lossy().into_owned();
        let success = result.success;
        docflow_free_result(result);
        (success, text)
    }

    #[test]
    fn test_convert_json_roundtrip() {
        let document = CString::new(
            r#"{"content": [{"type": "paragraph", "children": [{"type": "text", "text": "Hi"}]}]}"#,
        )
        .unwrap();

        let (success, json) =
            unsafe { take(docflow_convert_json(document.as_ptr(), ptr::null(), false)) };
        assert!(success);
        assert!(json.contains("\"kind\":\"paragraph\""));
    }

    #[test]
    fn test_null_document() {
        let (success, message) =
            unsafe { take(docflow_convert_json(ptr::null(), ptr::null(), true)) };
        assert!(!success);
        assert_eq!(message, "document cannot be null");
    }

    #[test]
    fn test_bad_options() {
        let document = CString::new(r#"{"content": []}"#).unwrap();
        let options = CString::new("[1, 2]").unwrap();
        let (success, _) =
            unsafe { take(docflow_convert_json(document.as_ptr(), options.as_ptr(), true)) };
        assert!(!success);
    }

    #[test]
    fn test_version() {
        let version = unsafe { CStr::from_ptr(docflow_version()) };
        assert_eq!(version.to_str().unwrap(), env!("CARGO_PKG_VERSION"));
    }
}
