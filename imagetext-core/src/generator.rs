// Small helpers/constants for interpreting generator selections in config.

pub const GENERATOR_PROVIDER_DEMO: &str = "demo";
pub const GENERATOR_PROVIDER_RUNWARE: &str = "runware";

// Output formats the Runware endpoint accepts. The demo generator ignores the
// format entirely (its URLs come from a stock photo service).
pub const OUTPUT_FORMAT_WEBP: &str = "WEBP";
pub const OUTPUT_FORMAT_PNG: &str = "PNG";
pub const OUTPUT_FORMAT_JPG: &str = "JPG";

pub fn is_runware_selected(provider: &str) -> bool {
    provider == GENERATOR_PROVIDER_RUNWARE
}

pub fn normalize_output_format(format: &str) -> &str {
    // Config files written by older builds used lowercase formats; the API
    // wants them uppercase.
    match format.to_ascii_uppercase().as_str() {
        "PNG" => OUTPUT_FORMAT_PNG,
        "JPG" | "JPEG" => OUTPUT_FORMAT_JPG,
        _ => OUTPUT_FORMAT_WEBP,
    }
}

pub fn accept_extracted_text(text: String) -> Option<String> {
    // A provider that produced only whitespace produced nothing.
    if text.trim().is_empty() { None } else { Some(text) }
}
