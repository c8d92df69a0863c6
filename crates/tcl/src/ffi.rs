//! C ABI exports for calling global functions from foreign code.
//!
//! Every function here operates on the process-wide registry returned by
//! [`crate::global`]. Status-returning functions use `0` for success and `-1`
//! for failure; the failure message is then available from
//! [`tcl_get_last_error`] on the same thread.
//!
//! Strings handed out by this module are owned by the caller and must be
//! released with [`tcl_string_free`].
//!
//! # Example (C)
//!
//! ```c
//! char* out = NULL;
//! if (tcl_func_invoke("testing.HelloWorld", &out) == 0) {
//!     puts(out);
//!     tcl_string_free(out);
//! } else {
//!     fprintf(stderr, "%s\n", tcl_get_last_error());
//! }
//! ```

use std::any::Any;
use std::cell::RefCell;
use std::ffi::{c_char, c_int, CStr, CString};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::ptr;

use tcl_core::{Result, TclError};

use crate::global::global;

/// Handler signature accepted by [`tcl_func_register`].
///
/// The returned string is copied before the call returns; it stays owned by
/// the foreign side. A null return is treated as the empty string.
pub type TclStringCallback = unsafe extern "C" fn() -> *const c_char;

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), "\0");

thread_local! {
    static LAST_ERROR: RefCell<CString> = RefCell::new(CString::default());
}

fn set_last_error(err: &TclError) {
    tracing::debug!(error = %err, "FFI call failed");
    let message = CString::new(err.to_string().replace('\0', " ")).unwrap_or_default();
    LAST_ERROR.with(|slot| *slot.borrow_mut() = message);
}

/// Run `f`, converting a panic into an error so it never unwinds into C.
fn guarded<T>(f: impl FnOnce() -> Result<T>) -> Result<T> {
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(result) => result,
        Err(payload) => Err(TclError::Ffi(format!(
            "panic: {}",
            panic_message(payload.as_ref())
        ))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "unknown panic payload"
    }
}

/// # Safety
/// `name` must be null or point to a NUL-terminated string valid for `'a`.
unsafe fn read_name<'a>(name: *const c_char) -> Result<&'a str> {
    if name.is_null() {
        return Err(TclError::InvalidName("name pointer is null".to_string()));
    }
    CStr::from_ptr(name)
        .to_str()
        .map_err(|e| TclError::InvalidName(format!("name is not valid UTF-8: {}", e)))
}

fn into_c_string(value: String) -> Result<*mut c_char> {
    CString::new(value)
        .map(CString::into_raw)
        .map_err(|e| TclError::Ffi(format!("string contains an interior NUL byte: {}", e)))
}

/// Wrap a foreign callback as a registry handler.
fn foreign_handler(callback: TclStringCallback) -> impl Fn() -> String + Send + Sync + 'static {
    move || {
        // SAFETY: `tcl_func_register` requires the callback to stay valid and
        // to return null or a NUL-terminated string.
        let value = unsafe { callback() };
        if value.is_null() {
            return String::new();
        }
        unsafe { CStr::from_ptr(value) }
            .to_string_lossy()
            .into_owned()
    }
}

fn status(result: Result<()>) -> c_int {
    match result {
        Ok(()) => 0,
        Err(e) => {
            set_last_error(&e);
            -1
        }
    }
}

/// Message of the last failed call on this thread, or an empty string.
///
/// The pointer stays valid until the next failing call on the same thread.
#[no_mangle]
pub extern "C" fn tcl_get_last_error() -> *const c_char {
    LAST_ERROR.with(|slot| slot.borrow().as_ptr())
}

/// Version of this library as a static NUL-terminated string.
#[no_mangle]
pub extern "C" fn tcl_version() -> *const c_char {
    VERSION.as_ptr().cast()
}

/// Invoke the global function `name`, storing its result in `*out`.
///
/// # Safety
/// `name` must be a NUL-terminated string and `out` a valid, writable pointer.
#[no_mangle]
pub unsafe extern "C" fn tcl_func_invoke(name: *const c_char, out: *mut *mut c_char) -> c_int {
    if out.is_null() {
        return status(Err(TclError::Ffi("output pointer is null".to_string())));
    }

    let result = guarded(|| {
        let name = read_name(name)?;
        into_c_string(global().invoke(name)?)
    });

    match result {
        Ok(value) => {
            *out = value;
            0
        }
        Err(e) => {
            set_last_error(&e);
            -1
        }
    }
}

/// Returns 1 if `name` is registered, 0 if not, -1 on invalid input.
///
/// # Safety
/// `name` must be a NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn tcl_func_exists(name: *const c_char) -> c_int {
    match read_name(name) {
        Ok(name) => c_int::from(global().contains(name)),
        Err(e) => {
            set_last_error(&e);
            -1
        }
    }
}

/// Register a foreign handler under `name`.
///
/// A non-zero `allow_override` replaces an existing entry regardless of the
/// configured duplicate policy.
///
/// # Safety
/// `name` must be a NUL-terminated string. `callback` must stay callable for
/// the lifetime of the process and return null or a NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn tcl_func_register(
    name: *const c_char,
    callback: Option<TclStringCallback>,
    allow_override: c_int,
) -> c_int {
    let result = guarded(|| {
        let name = read_name(name)?;
        let callback =
            callback.ok_or_else(|| TclError::Ffi("callback pointer is null".to_string()))?;

        global().register_with_override(name, foreign_handler(callback), allow_override != 0)
    });

    status(result)
}

/// Remove `name`. Returns 1 if it was registered, 0 if not, -1 on error.
///
/// # Safety
/// `name` must be a NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn tcl_func_remove(name: *const c_char) -> c_int {
    match read_name(name).and_then(|name| global().remove(name)) {
        Ok(removed) => c_int::from(removed),
        Err(e) => {
            set_last_error(&e);
            -1
        }
    }
}

/// All registered names as a JSON array string, or null on error.
#[no_mangle]
pub extern "C" fn tcl_func_list_global_names() -> *mut c_char {
    let result = guarded(|| {
        let json = serde_json::to_string(&global().names())?;
        into_c_string(json)
    });

    match result {
        Ok(value) => value,
        Err(e) => {
            set_last_error(&e);
            ptr::null_mut()
        }
    }
}

/// Release a string returned by this library. Null is ignored.
///
/// # Safety
/// `value` must be null or a pointer obtained from this library that has not
/// already been freed.
#[no_mangle]
pub unsafe extern "C" fn tcl_string_free(value: *mut c_char) {
    if !value.is_null() {
        drop(CString::from_raw(value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn last_error() -> String {
        unsafe { CStr::from_ptr(tcl_get_last_error()) }
            .to_string_lossy()
            .into_owned()
    }

    unsafe fn take_string(value: *mut c_char) -> String {
        let owned = CStr::from_ptr(value).to_string_lossy().into_owned();
        tcl_string_free(value);
        owned
    }

    unsafe extern "C" fn foreign_greeting() -> *const c_char {
        b"Hello from C\0".as_ptr().cast()
    }

    unsafe extern "C" fn foreign_null() -> *const c_char {
        ptr::null()
    }

    #[test]
    fn test_invoke_hello_world() {
        let name = CString::new("testing.HelloWorld").unwrap();
        let mut out: *mut c_char = ptr::null_mut();

        let rc = unsafe { tcl_func_invoke(name.as_ptr(), &mut out) };
        assert_eq!(rc, 0);
        assert_eq!(unsafe { take_string(out) }, "Hello, World!");
    }

    #[test]
    fn test_invoke_unknown_sets_last_error() {
        let name = CString::new("testing.DoesNotExist").unwrap();
        let mut out: *mut c_char = ptr::null_mut();

        let rc = unsafe { tcl_func_invoke(name.as_ptr(), &mut out) };
        assert_eq!(rc, -1);
        assert!(out.is_null());
        assert_eq!(
            last_error(),
            "Global function 'testing.DoesNotExist' is not registered"
        );
    }

    #[test]
    fn test_invoke_null_arguments() {
        let mut out: *mut c_char = ptr::null_mut();
        assert_eq!(unsafe { tcl_func_invoke(ptr::null(), &mut out) }, -1);
        assert!(last_error().contains("null"));

        let name = CString::new("testing.HelloWorld").unwrap();
        assert_eq!(unsafe { tcl_func_invoke(name.as_ptr(), ptr::null_mut()) }, -1);
    }

    #[test]
    fn test_exists() {
        let known = CString::new("testing.HelloWorld").unwrap();
        let unknown = CString::new("testing.Nope").unwrap();

        assert_eq!(unsafe { tcl_func_exists(known.as_ptr()) }, 1);
        assert_eq!(unsafe { tcl_func_exists(unknown.as_ptr()) }, 0);
        assert_eq!(unsafe { tcl_func_exists(ptr::null()) }, -1);
    }

    #[test]
    fn test_register_foreign_callback() {
        let name = CString::new("ffi_test.Greeting").unwrap();
        let rc = unsafe { tcl_func_register(name.as_ptr(), Some(foreign_greeting), 0) };
        assert_eq!(rc, 0);

        let mut out: *mut c_char = ptr::null_mut();
        assert_eq!(unsafe { tcl_func_invoke(name.as_ptr(), &mut out) }, 0);
        assert_eq!(unsafe { take_string(out) }, "Hello from C");

        assert_eq!(unsafe { tcl_func_remove(name.as_ptr()) }, 1);
        assert_eq!(unsafe { tcl_func_remove(name.as_ptr()) }, 0);
        assert_eq!(unsafe { tcl_func_exists(name.as_ptr()) }, 0);
    }

    #[test]
    fn test_register_null_result_is_empty_string() {
        let name = CString::new("ffi_test.Null").unwrap();
        assert_eq!(
            unsafe { tcl_func_register(name.as_ptr(), Some(foreign_null), 1) },
            0
        );

        let mut out: *mut c_char = ptr::null_mut();
        assert_eq!(unsafe { tcl_func_invoke(name.as_ptr(), &mut out) }, 0);
        assert_eq!(unsafe { take_string(out) }, "");
    }

    #[test]
    fn test_register_null_callback() {
        let name = CString::new("ffi_test.Missing").unwrap();
        assert_eq!(unsafe { tcl_func_register(name.as_ptr(), None, 0) }, -1);
        assert!(last_error().contains("callback"));
    }

    #[test]
    fn test_panicking_handler_is_reported() {
        global()
            .register("ffi_test.Panics", || panic!("boom"))
            .unwrap();

        let name = CString::new("ffi_test.Panics").unwrap();
        let mut out: *mut c_char = ptr::null_mut();
        assert_eq!(unsafe { tcl_func_invoke(name.as_ptr(), &mut out) }, -1);
        assert!(last_error().contains("boom"));
    }

    #[test]
    fn test_interior_nul_is_reported() {
        global()
            .register("ffi_test.Nul", || "a\0b".to_string())
            .unwrap();

        let name = CString::new("ffi_test.Nul").unwrap();
        let mut out: *mut c_char = ptr::null_mut();
        assert_eq!(unsafe { tcl_func_invoke(name.as_ptr(), &mut out) }, -1);
        assert!(last_error().contains("NUL"));
    }

    #[test]
    fn test_list_global_names() {
        let json = unsafe { take_string(tcl_func_list_global_names()) };
        let names: Vec<String> = serde_json::from_str(&json).unwrap();
        assert!(names.iter().any(|n| n == "testing.HelloWorld"));
    }

    #[test]
    fn test_version() {
        let version = unsafe { CStr::from_ptr(tcl_version()) };
        assert_eq!(version.to_str().unwrap(), env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_free_null_is_noop() {
        unsafe { tcl_string_free(ptr::null_mut()) };
    }
}
