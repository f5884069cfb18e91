use crate::models::Document;
use crate::services::api_client::{ApiClient, ApiError};
use crate::services::http::FormValue;

/// A file picked by the user, read into memory
#[derive(Debug, Clone, PartialEq)]
pub struct UploadFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DownloadedFile {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Clone)]
pub struct DocumentService {
    api: ApiClient,
}

impl DocumentService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// All documents (admin view)
    pub async fn list_all(&self, limit: u32) -> Result<Vec<Document>, ApiError> {
        let path = format!("/documents?page=1&limit={}", limit);
        self.api.get_data(&path, "Failed to load documents").await
    }

    /// Documents of the signed-in employee
    pub async fn list_own(&self) -> Result<Vec<Document>, ApiError> {
        self.api
            .get_data("/documents/employee", "Failed to load documents")
            .await
    }

    pub async fn upload(&self, file: UploadFile, document_type: &str) -> Result<(), ApiError> {
        let parts = vec![
            (
                "document".to_string(),
                FormValue::File {
                    filename: file.name,
                    content_type: file.content_type,
                    bytes: file.bytes,
                },
            ),
            ("documentType".to_string(), FormValue::Text(document_type.to_string())),
        ];
        self.api
            .post_multipart("/documents/upload", parts, "Failed to upload document")
            .await
            .map(|_| ())
    }

    pub async fn download(&self, id: &str, filename: &str) -> Result<DownloadedFile, ApiError> {
        const FALLBACK: &str = "Failed to download document";
        let path = format!("/documents/download/{}", id);
        let response = self.api.get_raw(&path, FALLBACK).await?;

        // A JSON body on a 2xx download is an error envelope, not the file
        if response.is_json() {
            return Err(ApiError::from_response(&response, FALLBACK));
        }

        Ok(DownloadedFile {
            filename: filename.to_string(),
            content_type: response
                .content_type
                .clone()
                .unwrap_or_else(|| "application/octet-stream".to_string()),
            bytes: response.body,
        })
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let path = format!("/documents/{}", id);
        self.api.delete(&path, "Failed to delete document").await
    }
}
