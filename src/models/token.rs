use serde::{Deserialize, Serialize};

/// The response to a "get video" request.
///
/// `timestamp` (ms since the Unix epoch) and `checksum` are noise for casual
/// inspection; neither is checked when the token comes back.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuardedDescriptor {
    /// `<iv-hex>:<ciphertext-hex>`.
    pub token: String,
    /// Same value as `token`, under the field name older clients read.
    pub encrypted_video_id: String,
    pub timestamp: i64,
    pub checksum: String,
}

/// The request payload for resolving a guarded token.
#[derive(Debug, Default, Deserialize)]
pub struct DecryptRequest {
    #[serde(default, alias = "encryptedVideoId")]
    pub token: Option<String>,
}

/// The response to a successful token resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoResolution {
    pub video_id: String,
}
