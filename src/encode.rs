//! Base64 transport encoding for uploaded images.

use base64::Engine;
use base64::engine::general_purpose;

/// Encodes raw image bytes for embedding in an API request payload.
pub fn encode_image(bytes: &[u8]) -> String {
    general_purpose::STANDARD.encode(bytes)
}

/// Builds the inline data URI carried in the vision request. The MIME type
/// is always `image/jpeg`, even for PNG uploads; the endpoint decodes the
/// payload regardless of the claimed type.
pub fn image_data_uri(base64_image: &str) -> String {
    format!("data:image/jpeg;base64,{base64_image}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoding_round_trips() {
        let original: Vec<u8> = (0u8..=255).collect();
        let encoded = encode_image(&original);
        let decoded = general_purpose::STANDARD
            .decode(&encoded)
            .expect("decode what we encoded");
        assert_eq!(decoded, original);
    }

    #[test]
    fn encoding_is_deterministic() {
        let bytes = b"\xff\xd8\xff\xe0 not really a jpeg";
        assert_eq!(encode_image(bytes), encode_image(bytes));
    }

    #[test]
    fn data_uri_claims_jpeg() {
        let uri = image_data_uri("aGVsbG8=");
        assert_eq!(uri, "data:image/jpeg;base64,aGVsbG8=");
    }
}
