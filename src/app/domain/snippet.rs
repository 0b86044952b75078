/// Snippet shown when the app starts.
pub const DEFAULT_CODE: &str = r#"// Welcome to CodeSnap for WPS
// Paste your code here to beautify it!

function greet(name) {
  return "Hello, " + name + "!";
}

console.log(greet("PowerPoint"));"#;

/// Rendered instead of an empty buffer so the card is never blank.
pub const EMPTY_PLACEHOLDER: &str = "// Input code to see preview";

/// Text that actually goes onto the card for a given buffer.
pub fn display_code(code: &str) -> &str {
    if code.is_empty() { EMPTY_PLACEHOLDER } else { code }
}
