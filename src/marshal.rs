//! String marshalling between Rust and the native library.

use crate::error::{Error, Result};
use crate::native::NativeApi;
use std::ffi::{CStr, CString, c_char};
use std::ptr::NonNull;

/// A NUL-terminated string allocated by the native library.
///
/// Released through the library's `free_string` exactly once, on drop.
pub(crate) struct NativeString<'a> {
    api: &'a NativeApi,
    ptr: NonNull<c_char>,
}

impl<'a> NativeString<'a> {
    /// Takes ownership of a string returned by `api`. Null gives `None`.
    ///
    /// # Safety
    ///
    /// `ptr` must be null or a NUL-terminated buffer allocated by `api` that
    /// the caller owns and has not freed.
    pub(crate) unsafe fn from_raw(api: &'a NativeApi, ptr: *mut c_char) -> Option<Self> {
        NonNull::new(ptr).map(|ptr| Self { api, ptr })
    }

    pub(crate) fn to_string_lossy(&self) -> String {
        // SAFETY: `ptr` is a live NUL-terminated buffer until `drop`.
        unsafe { CStr::from_ptr(self.ptr.as_ptr()) }
            .to_string_lossy()
            .into_owned()
    }
}

impl Drop for NativeString<'_> {
    fn drop(&mut self) {
        unsafe { (self.api.free_string)(self.ptr.as_ptr()) }
    }
}

/// Copies a string that stays owned by the library. Null gives `""`.
///
/// # Safety
///
/// `ptr` must be null or point to a NUL-terminated string that outlives the call.
pub(crate) unsafe fn borrowed_string(ptr: *const c_char) -> String {
    if ptr.is_null() {
        return String::new();
    }
    unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned()
}

/// Converts `text` for a `const char*` parameter.
///
/// The returned buffer frees itself when dropped, so it only has to outlive
/// the native call it is passed to.
pub(crate) fn to_c_string(text: &str) -> Result<CString> {
    CString::new(text).map_err(|e| {
        Error::InvalidArgument(format!(
            "string contains a NUL byte at offset {}",
            e.nul_position()
        ))
    })
}
