use fltk::text::TextBuffer;

/// Read text from an FLTK TextBuffer without leaking the C-allocated copy.
///
/// `TextBuffer::text()` copies FLTK's `malloc()`'d string into a `String`
/// but never frees the original. The code editor reads the whole buffer on
/// every keystroke, so this goes through the FFI and frees the copy itself.
pub fn buffer_text_no_leak(buf: &TextBuffer) -> String {
    unsafe extern "C" {
        fn Fl_Text_Buffer_text(buf: *mut std::ffi::c_void) -> *mut std::ffi::c_char;
        fn free(ptr: *mut std::ffi::c_void);
    }

    // SAFETY: `buf.as_ptr()` is valid while `buf` lives. FLTK returns a
    // malloc'd, NUL-terminated string (or null), which is copied and then
    // released with the matching `free`.
    unsafe {
        let inner = buf.as_ptr() as *mut std::ffi::c_void;
        let ptr = Fl_Text_Buffer_text(inner);
        if ptr.is_null() {
            return String::new();
        }
        let result = std::ffi::CStr::from_ptr(ptr).to_string_lossy().into_owned();
        free(ptr as *mut std::ffi::c_void);
        result
    }
}

/// Replace the buffer contents unless they already match `text`.
///
/// Returns true when the buffer changed. Skipping identical writes keeps the
/// editor's cursor where it is when the controller echoes text back.
pub fn replace_text_if_changed(buf: &mut TextBuffer, text: &str) -> bool {
    if buffer_text_no_leak(buf) == text {
        return false;
    }
    buf.set_text(text);
    true
}
