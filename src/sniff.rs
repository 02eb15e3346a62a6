//! Image format detection by file signature
//!
//! The codec is byte-agnostic; signature sniffing lives entirely in the I/O
//! glue. Encrypt refuses input with no recognized signature, and decrypt
//! uses the detected format to tell the user what came back out.

/// Returns the conventional file extension for a recognized image
/// signature, or `None` when the bytes match no supported format.
pub fn image_extension(data: &[u8]) -> Option<&'static str> {
    if data.starts_with(b"\x89PNG\r\n\x1a\n") {
        Some("png")
    } else if data.starts_with(&[0xff, 0xd8, 0xff]) {
        Some("jpg")
    } else if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
        Some("gif")
    } else if data.starts_with(b"BM") {
        Some("bmp")
    } else if data.len() >= 12 && data.starts_with(b"RIFF") && data[8..12] == *b"WEBP" {
        Some("webp")
    } else if data.starts_with(b"II*\x00") || data.starts_with(b"MM\x00*") {
        Some("tif")
    } else {
        None
    }
}
