use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentOwner {
    #[serde(rename = "_id", default, deserialize_with = "super::string_or_number")]
    pub id: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

impl DocumentOwner {
    pub fn display_name(&self) -> String {
        format!(
            "{} {}",
            self.first_name.as_deref().filter(|s| !s.is_empty()).unwrap_or("Unknown"),
            self.last_name.as_deref().filter(|s| !s.is_empty()).unwrap_or("User"),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(rename = "_id", deserialize_with = "super::string_or_number")]
    pub id: String,
    #[serde(default)]
    pub employee: Option<DocumentOwner>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub category: String,
    #[serde(default)]
    pub original_name: Option<String>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub size: u64,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Document {
    /// Original filename, or a synthetic one
    pub fn display_name(&self) -> String {
        self.original_name
            .clone()
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| format!("Document {}.pdf", self.id))
    }

    /// `YYYY-MM-DD` part of `createdAt`
    pub fn upload_date(&self) -> String {
        self.created_at
            .as_deref()
            .and_then(|d| d.get(..10))
            .unwrap_or_default()
            .to_string()
    }
}

/// Human readable byte size: `0 Bytes`, `512 Bytes`, `1.5 KB`, `2 MB`
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    let exponent = ((bytes as f64).ln() / 1024f64.ln()).floor() as usize;
    let exponent = exponent.min(UNITS.len() - 1);
    let value = bytes as f64 / 1024f64.powi(exponent as i32);
    let rounded = (value * 100.0).round() / 100.0;
    format!("{} {}", rounded, UNITS[exponent])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_sizes() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(512), "512 Bytes");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(10 * 1024 * 1024), "10 MB");
    }

    #[test]
    fn names_fall_back() {
        let doc: Document = serde_json::from_str(
            r#"{"_id":"d1","employee":{"_id":"e1","firstName":"Ann"},"category":"contracts","size":10,"createdAt":"2024-03-04T10:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(doc.display_name(), "Document d1.pdf");
        assert_eq!(doc.upload_date(), "2024-03-04");
        assert_eq!(doc.employee.unwrap().display_name(), "Ann User");
    }
}
