//! Inline image payloads carried in JSON bodies.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use crate::domain::{Error, ImageUpload};

use super::validation::{FieldName, invalid_encoding_error, invalid_field_error};

/// Base64 file contents plus the file extension the client suggests.
///
/// Example JSON: `{"data":"iVBORw0KGgo=","extension":"png"}`
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImagePayload {
    /// Standard base64 (with padding) of the file bytes.
    pub data: String,
    /// One of `png`, `jpg`, `jpeg`, `gif`, `webp`.
    #[schema(example = "png")]
    pub extension: String,
}

impl ImagePayload {
    /// Decode and validate into an [`ImageUpload`], reporting failures
    /// against `field`.
    pub(crate) fn into_upload(self, field: FieldName) -> Result<ImageUpload, Error> {
        let bytes = STANDARD
            .decode(self.data.trim())
            .map_err(|err| invalid_encoding_error(field, err))?;
        ImageUpload::new(bytes, &self.extension).map_err(|err| invalid_field_error(field, err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ErrorCode, ImageExtension};
    use rstest::rstest;

    const FIELD: FieldName = FieldName::new("image");

    #[rstest]
    fn decodes_valid_payloads() {
        let payload = ImagePayload {
            data: STANDARD.encode([0x89, b'P', b'N', b'G']),
            extension: ".PNG".to_owned(),
        };

        let upload = payload.into_upload(FIELD).expect("valid upload");

        assert_eq!(upload.extension(), ImageExtension::Png);
        assert_eq!(upload.bytes(), &[0x89, b'P', b'N', b'G']);
    }

    #[rstest]
    #[case("!!!not base64!!!", "png", "invalid_encoding")]
    #[case("", "png", "invalid_value")]
    #[case("AAEC", "exe", "invalid_value")]
    fn rejects_bad_payloads(#[case] data: &str, #[case] extension: &str, #[case] code: &str) {
        let payload = ImagePayload {
            data: data.to_owned(),
            extension: extension.to_owned(),
        };

        let error = payload.into_upload(FIELD).expect_err("invalid upload");

        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        assert_eq!(
            error.details().and_then(|d| d.get("code")),
            Some(&serde_json::json!(code))
        );
    }
}
