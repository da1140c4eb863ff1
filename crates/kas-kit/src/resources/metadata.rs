//! Metadata API: JSON metadata hosted by KAS for token URIs.

use serde_json::Value;

use crate::args;
use crate::client::{Call, Encoding, Endpoint, Facade, Field, Param};
use crate::error::Error;
use crate::types::{HttpMethod, MetadataUpload, Service};

pub const UPLOAD_METADATA: Endpoint = Endpoint {
    name: "metadata.upload_metadata",
    service: Service::Metadata,
    method: HttpMethod::Post,
    path: "/metadata",
    params: &[Param::required("metadata"), Param::optional("filename")],
    body_fields: &[
        Field::named("metadata", Encoding::Object),
        Field::named("filename", Encoding::Text),
    ],
    ..Endpoint::BLANK
};

pub(crate) const ENDPOINTS: &[&Endpoint] = &[&UPLOAD_METADATA];

/// Client for the metadata API.
///
/// # Example
///
/// ```rust,no_run
/// use kas_kit::*;
/// use serde_json::json;
///
/// # async fn example(kas: Kas) -> Result<(), Error> {
/// let upload = kas
///     .metadata()?
///     .upload_metadata(json!({ "name": "Sword", "image": "https://example.com/sword.png" }), None)?
///     .await?;
/// println!("hosted at {}", upload.uri);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Metadata {
    facade: Facade,
}

super::impl_resource!(Metadata, Service::Metadata);

impl Metadata {
    /// Upload a JSON object. KAS picks a file name when `filename` is `None`.
    pub fn upload_metadata(
        &self,
        metadata: Value,
        filename: Option<String>,
    ) -> Result<Call<MetadataUpload>, Error> {
        self.facade
            .prepare(&UPLOAD_METADATA, args![metadata, filename])
    }
}
