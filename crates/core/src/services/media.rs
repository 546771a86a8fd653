//! `media/upload` on the upload host
//!
//! Simple (non-chunked) upload. The payload goes either as a binary
//! `media` part or as a base64 `media_data` field; the API accepts one
//! or the other, never both.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use twitkit_domain::{Media, Result, TwitterError};

use crate::binding::{CallArgs, ServiceBinding};
use crate::descriptor::{EndpointSpec, ParamSpec, ServiceDescriptor};
use crate::factory::Service;

static DESCRIPTOR: ServiceDescriptor = ServiceDescriptor {
    name: "media",
    endpoints: &[EndpointSpec::post(
        "upload",
        "/1.1/media/upload.json",
        &[
            ParamSpec::multipart("media"),
            ParamSpec::multipart("media_data"),
            ParamSpec::multipart("additional_owners"),
        ],
    )
    .on_upload_host()],
};

#[derive(Clone, PartialEq, Eq)]
pub enum MediaPayload {
    /// Raw file content sent as the `media` part
    Bytes { data: Vec<u8>, file_name: Option<String>, content_type: Option<String> },
    /// Base64-encoded content sent as `media_data`
    Base64(String),
}

impl MediaPayload {
    pub fn bytes(data: Vec<u8>, content_type: impl Into<String>) -> Self {
        Self::Bytes { data, file_name: None, content_type: Some(content_type.into()) }
    }

    /// Encode raw content for the `media_data` field.
    pub fn base64_from(data: &[u8]) -> Self {
        Self::Base64(STANDARD.encode(data))
    }

    fn is_empty(&self) -> bool {
        match self {
            Self::Bytes { data, .. } => data.is_empty(),
            Self::Base64(encoded) => encoded.trim().is_empty(),
        }
    }
}

impl std::fmt::Debug for MediaPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bytes { data, file_name, content_type } => f
                .debug_struct("Bytes")
                .field("len", &data.len())
                .field("file_name", file_name)
                .field("content_type", content_type)
                .finish(),
            Self::Base64(encoded) => f.debug_tuple("Base64").field(&encoded.len()).finish(),
        }
    }
}

/// Options for [`MediaService::upload`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaUpload {
    pub payload: MediaPayload,
    /// Users allowed to attach the uploaded media, at most 100
    pub additional_owners: Vec<i64>,
}

impl MediaUpload {
    pub fn new(payload: MediaPayload) -> Self {
        Self { payload, additional_owners: Vec::new() }
    }
}

#[derive(Debug)]
pub struct MediaService {
    binding: ServiceBinding,
}

impl Service for MediaService {
    fn descriptor() -> &'static ServiceDescriptor {
        &DESCRIPTOR
    }

    fn from_binding(binding: ServiceBinding) -> Self {
        Self { binding }
    }
}

impl MediaService {
    /// Upload an image; the returned `media_id` can be attached to a tweet
    /// within `expires_after_secs`.
    ///
    /// # Errors
    /// `InvalidArgument` for an empty payload.
    pub async fn upload(&self, upload: MediaUpload) -> Result<Media> {
        if upload.payload.is_empty() {
            return Err(TwitterError::InvalidArgument("media payload must not be empty".into()));
        }

        let args = match upload.payload {
            MediaPayload::Bytes { data, file_name, content_type } => {
                let file_name = file_name.unwrap_or_else(|| "media".to_string());
                CallArgs::new().file("media", data, Some(file_name), content_type)
            }
            MediaPayload::Base64(encoded) => CallArgs::new().arg("media_data", encoded),
        };
        let owners = (!upload.additional_owners.is_empty()).then(|| {
            upload.additional_owners.iter().map(i64::to_string).collect::<Vec<_>>().join(",")
        });

        self.binding.invoke("upload", args.opt("additional_owners", owners)).await
    }
}
