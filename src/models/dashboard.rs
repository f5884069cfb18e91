use serde::{Deserialize, Serialize};

use super::document::DocumentOwner;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardStats {
    pub total_employees: u64,
    pub present_today: u64,
    pub total_salary_paid: f64,
    pub documents_uploaded: u64,
    pub attendance_rate: f64,
    pub avg_salary: f64,
    pub approved_leaves: u64,
    pub pending_leaves: u64,
}

/// `{ data: { stats } }`
#[derive(Debug, Clone, Deserialize)]
pub struct StatsPayload {
    pub stats: DashboardStats,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Leave {
    #[serde(rename = "_id", deserialize_with = "super::string_or_number")]
    pub id: String,
    #[serde(default)]
    pub employee: Option<DocumentOwner>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub leave_type: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub start_date: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub end_date: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub total_days: f64,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub status: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
}

impl Leave {
    pub fn employee_name(&self) -> String {
        self.employee
            .as_ref()
            .map(DocumentOwner::display_name)
            .unwrap_or_else(|| "Unknown User".to_string())
    }

    /// Multi-line summary shown when an admin opens a leave
    pub fn summary(&self) -> String {
        format!(
            "Leave Details:\nEmployee: {}\nType: {}\nDates: {} to {}\nDays: {}\nStatus: {}\nReason: {}",
            self.employee_name(),
            self.leave_type,
            self.start_date,
            self.end_date,
            self.total_days,
            self.status,
            self.reason.as_deref().unwrap_or("-"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_stats_default_to_zero() {
        let stats: DashboardStats =
            serde_json::from_str(r#"{"totalEmployees":12,"attendanceRate":87.5}"#).unwrap();
        assert_eq!(stats.total_employees, 12);
        assert_eq!(stats.attendance_rate, 87.5);
        assert_eq!(stats.pending_leaves, 0);
    }

    #[test]
    fn leave_summary_mentions_employee() {
        let leave: Leave = serde_json::from_str(
            r#"{"_id":"l1","employee":{"_id":"e","firstName":"Ann","lastName":"Lee"},"leaveType":"sick","startDate":"2024-01-01","endDate":"2024-01-02","totalDays":2,"status":"pending","reason":"flu"}"#,
        )
        .unwrap();
        let summary = leave.summary();
        assert!(summary.contains("Employee: Ann Lee"));
        assert!(summary.contains("Reason: flu"));
    }
}
