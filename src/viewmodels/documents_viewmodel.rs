// ============================================================================
// DOCUMENTS VIEWMODEL - list, filter, upload, download, delete
// ============================================================================
// Admins see every document, employees only their own. Rows are transformed
// once at load time so filtering and rendering work on plain strings.
// ============================================================================

use thiserror::Error;

use crate::models::document::format_file_size;
use crate::models::Document;
use crate::services::{ApiError, DocumentService, DownloadedFile, UploadFile};
use crate::state::SessionHandle;
use crate::utils::constants::{MAX_UPLOAD_BYTES, PDF_CONTENT_TYPE};

const ADMIN_PAGE_SIZE: u32 = 50;
pub const CATEGORY_ALL: &str = "all";
pub const CATEGORY_OTHER: &str = "other";

/// Upload categories as `(value, label)`
pub const DOCUMENT_CATEGORIES: [(&str, &str); 7] = [
    ("contracts", "Contracts"),
    ("certificates", "Certificates"),
    ("identification", "Identification"),
    ("tax_documents", "Tax Documents"),
    ("medical", "Medical"),
    ("education", "Education"),
    (CATEGORY_OTHER, "Other"),
];

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DocumentError {
    #[error("Only signed-in employees can upload documents.")]
    UploadNotAllowed,
    #[error("Only PDF files are allowed")]
    NotPdf,
    #[error("File size must be less than 10MB")]
    TooLarge,
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// One row of the documents table
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentRow {
    pub id: String,
    pub name: String,
    pub owner: String,
    pub category: String,
    pub upload_date: String,
    pub size: u64,
}

impl DocumentRow {
    pub fn size_label(&self) -> String {
        format_file_size(self.size)
    }

    fn matches(&self, search: &str, category: &str) -> bool {
        let needle = search.to_lowercase();
        let text_ok = needle.is_empty()
            || self.name.to_lowercase().contains(&needle)
            || self.owner.to_lowercase().contains(&needle);
        let category_ok = category == CATEGORY_ALL || self.category == category;
        text_ok && category_ok
    }
}

/// Category sent with an upload. A custom label only replaces `other`.
pub fn upload_category(selected: &str, custom: &str) -> String {
    let custom = custom.trim();
    if selected == CATEGORY_OTHER && !custom.is_empty() {
        custom.to_string()
    } else {
        selected.to_string()
    }
}

pub fn validate_upload(file: &UploadFile) -> Result<(), DocumentError> {
    if file.content_type != PDF_CONTENT_TYPE {
        return Err(DocumentError::NotPdf);
    }
    if file.size() > MAX_UPLOAD_BYTES {
        return Err(DocumentError::TooLarge);
    }
    Ok(())
}

pub fn filter_rows<'a>(rows: &'a [DocumentRow], search: &str, category: &str) -> Vec<&'a DocumentRow> {
    rows.iter().filter(|row| row.matches(search, category)).collect()
}

#[derive(Clone)]
pub struct DocumentsViewModel {
    service: DocumentService,
    session: SessionHandle,
}

impl DocumentsViewModel {
    pub fn new(service: DocumentService, session: SessionHandle) -> Self {
        Self { service, session }
    }

    /// Employees upload their own documents; admins only review
    pub fn can_upload(&self) -> bool {
        self.session.user().is_some() && !self.session.is_admin()
    }

    pub fn can_delete(&self) -> bool {
        self.session.is_admin()
    }

    fn to_row(&self, doc: Document, is_admin: bool) -> DocumentRow {
        let owner = if is_admin {
            doc.employee
                .as_ref()
                .map(|e| e.display_name())
                .unwrap_or_else(|| "Unknown User".to_string())
        } else {
            self.session
                .user()
                .map(|u| u.full_name())
                .unwrap_or_else(|| "Unknown".to_string())
        };
        DocumentRow {
            name: doc.display_name(),
            upload_date: doc.upload_date(),
            id: doc.id,
            owner,
            category: doc.category,
            size: doc.size,
        }
    }

    /// Empty on failure; the error is only logged
    pub async fn load(&self) -> Vec<DocumentRow> {
        let is_admin = self.session.is_admin();
        let result = if is_admin {
            self.service.list_all(ADMIN_PAGE_SIZE).await
        } else {
            self.service.list_own().await
        };

        match result {
            Ok(docs) => {
                log::info!("📄 [DOCS] {} documents loaded (admin: {})", docs.len(), is_admin);
                docs.into_iter().map(|d| self.to_row(d, is_admin)).collect()
            }
            Err(e) => {
                log::error!("❌ [DOCS] Error loading documents: {}", e);
                Vec::new()
            }
        }
    }

    /// Validates, uploads, then returns the reloaded rows
    pub async fn upload(&self, file: UploadFile, selected: &str, custom: &str) -> Result<Vec<DocumentRow>, DocumentError> {
        if !self.can_upload() {
            return Err(DocumentError::UploadNotAllowed);
        }
        validate_upload(&file)?;

        let category = upload_category(selected, custom);
        log::info!("📤 [DOCS] Uploading {} ({}) as {}", file.name, format_file_size(file.size()), category);
        self.service.upload(file, &category).await?;
        Ok(self.load().await)
    }

    pub async fn download(&self, row: &DocumentRow) -> Result<DownloadedFile, DocumentError> {
        let file = self.service.download(&row.id, &row.name).await?;
        log::info!("📥 [DOCS] Downloaded {} ({} bytes)", file.filename, file.bytes.len());
        Ok(file)
    }

    pub async fn delete(&self, id: &str) -> Result<Vec<DocumentRow>, DocumentError> {
        if !self.can_delete() {
            return Err(DocumentError::Api(ApiError::Rejected {
                status: 403,
                message: "Only administrators can delete documents".to_string(),
            }));
        }
        self.service.delete(id).await?;
        log::info!("🗑️ [DOCS] Deleted {}", id);
        Ok(self.load().await)
    }
}
