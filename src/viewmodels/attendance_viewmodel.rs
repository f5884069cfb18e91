// ============================================================================
// ATTENDANCE VIEWMODEL - clock in / clock out
// ============================================================================

use chrono::{NaiveDate, Utc};
use thiserror::Error;

use crate::models::AttendanceRecord;
use crate::services::{ApiError, AttendanceService};
use crate::state::SessionHandle;

const DEFAULT_LOCATION: &str = "Office";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AttendanceError {
    #[error("Please log in to clock in.")]
    NotSignedIn,
    #[error("You are already clocked in for today.")]
    AlreadyClockedIn,
    #[error("You must clock in first before clocking out.")]
    NotClockedIn,
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Records plus the one that belongs to today, if any
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AttendanceSheet {
    pub records: Vec<AttendanceRecord>,
    pub today: Option<AttendanceRecord>,
}

impl AttendanceSheet {
    pub fn new(records: Vec<AttendanceRecord>, today: NaiveDate) -> Self {
        let current = records.iter().find(|r| r.day() == Some(today)).cloned();
        Self {
            records,
            today: current,
        }
    }

    pub fn can_clock_in(&self) -> bool {
        !matches!(&self.today, Some(record) if record.is_open())
    }

    pub fn can_clock_out(&self) -> bool {
        matches!(&self.today, Some(record) if record.is_open())
    }
}

#[derive(Clone)]
pub struct AttendanceViewModel {
    service: AttendanceService,
    session: SessionHandle,
}

impl AttendanceViewModel {
    pub fn new(service: AttendanceService, session: SessionHandle) -> Self {
        Self { service, session }
    }

    /// Never fails: an unreachable backend shows as an empty sheet
    pub async fn load(&self) -> AttendanceSheet {
        self.load_for(Utc::now().date_naive()).await
    }

    pub async fn load_for(&self, today: NaiveDate) -> AttendanceSheet {
        match self.service.list().await {
            Ok(records) => {
                log::info!("🕒 [ATTENDANCE] {} records loaded", records.len());
                AttendanceSheet::new(records, today)
            }
            Err(e) => {
                log::error!("❌ [ATTENDANCE] Error loading records: {}", e);
                AttendanceSheet::default()
            }
        }
    }

    /// Posts the clock-in and returns the reloaded sheet
    pub async fn clock_in(&self, sheet: &AttendanceSheet, today: NaiveDate) -> Result<AttendanceSheet, AttendanceError> {
        if self.session.user().is_none() {
            return Err(AttendanceError::NotSignedIn);
        }
        if !sheet.can_clock_in() {
            return Err(AttendanceError::AlreadyClockedIn);
        }

        self.service.clock_in(DEFAULT_LOCATION).await?;
        log::info!("✅ [ATTENDANCE] Clocked in");
        Ok(self.load_for(today).await)
    }

    pub async fn clock_out(&self, sheet: &AttendanceSheet, today: NaiveDate) -> Result<AttendanceSheet, AttendanceError> {
        if !sheet.can_clock_out() {
            return Err(AttendanceError::NotClockedIn);
        }

        self.service.clock_out("").await?;
        log::info!("✅ [ATTENDANCE] Clocked out");
        Ok(self.load_for(today).await)
    }
}

/// `0` renders as "-", otherwise whole hours and rounded minutes
pub fn format_working_hours(hours: f64) -> String {
    if hours == 0.0 {
        return "-".to_string();
    }
    let h = hours.floor();
    let m = ((hours - h) * 60.0).round();
    format!("{}h {}m", h as i64, m as i64)
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use serde_json::json;

    use super::*;
    use crate::models::{Credential, Role, User};
    use crate::services::testing::{json_response, FakeTransport};
    use crate::services::ApiClient;
    use crate::state::SessionState;
    use crate::utils::storage::{CredentialStore, MemoryStorage};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
    }

    fn viewmodel(transport: &FakeTransport, signed_in: bool) -> AttendanceViewModel {
        let store = CredentialStore::new(Rc::new(MemoryStorage::new()));
        let state = SessionState::new();
        if signed_in {
            let user = User {
                id: "7".to_string(),
                email: "e@x.com".to_string(),
                first_name: "E".to_string(),
                last_name: "X".to_string(),
                role: Role::Employee,
            };
            store.save(&user, &Credential::new("tok")).unwrap();
            state.set_user(Some(user));
        }
        let api = ApiClient::new("http://api.test/api", Rc::new(transport.clone()), store);
        AttendanceViewModel::new(AttendanceService::new(api), state.handle())
    }

    fn records(today_open: bool) -> serde_json::Value {
        let clock_out = if today_open { json!(null) } else { json!("2024-03-05T17:00:00Z") };
        json!({"data": [
            {"_id": "a1", "date": "2024-03-05T00:00:00.000Z", "clockIn": "2024-03-05T09:00:00Z", "clockOut": clock_out, "status": "present", "workingHours": 0},
            {"_id": "a0", "date": "2024-03-04T00:00:00.000Z", "clockIn": "2024-03-04T09:00:00Z", "clockOut": "2024-03-04T17:30:00Z", "status": "present", "workingHours": 8.5}
        ]})
    }

    #[test]
    fn working_hours_format() {
        assert_eq!(format_working_hours(0.0), "-");
        assert_eq!(format_working_hours(8.5), "8h 30m");
        assert_eq!(format_working_hours(7.25), "7h 15m");
        assert_eq!(format_working_hours(1.0), "1h 0m");
    }

    #[tokio::test]
    async fn load_finds_todays_record() {
        let transport = FakeTransport::new();
        transport.push(json_response(200, records(true)));

        let sheet = viewmodel(&transport, true).load_for(today()).await;

        assert_eq!(sheet.records.len(), 2);
        assert_eq!(sheet.today.as_ref().map(|r| r.id.as_str()), Some("a1"));
        assert!(!sheet.can_clock_in());
        assert!(sheet.can_clock_out());
    }

    #[tokio::test]
    async fn load_failure_gives_empty_sheet() {
        let transport = FakeTransport::new();
        transport.push(json_response(500, json!({"error": "boom"})));

        let sheet = viewmodel(&transport, true).load_for(today()).await;

        assert_eq!(sheet, AttendanceSheet::default());
    }

    #[tokio::test]
    async fn clock_in_requires_user_and_no_open_record() {
        let transport = FakeTransport::new();
        let open = AttendanceSheet::new(
            serde_json::from_value::<crate::models::DataEnvelope<Vec<AttendanceRecord>>>(records(true))
                .unwrap()
                .data,
            today(),
        );

        let anonymous = viewmodel(&transport, false);
        assert_eq!(
            anonymous.clock_in(&AttendanceSheet::default(), today()).await,
            Err(AttendanceError::NotSignedIn)
        );

        let vm = viewmodel(&transport, true);
        let err = vm.clock_in(&open, today()).await.unwrap_err();
        assert_eq!(err.to_string(), "You are already clocked in for today.");
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn clock_in_posts_location_and_reloads() {
        let transport = FakeTransport::new();
        transport.push(json_response(201, json!({"data": {}})));
        transport.push(json_response(200, records(true)));
        let vm = viewmodel(&transport, true);

        let sheet = vm.clock_in(&AttendanceSheet::default(), today()).await.unwrap();

        assert!(sheet.can_clock_out());
        let sent = transport.requests();
        assert_eq!(sent[0].url, "http://api.test/api/attendance/clock-in");
        assert_eq!(
            sent[0].body,
            crate::services::http::HttpBody::Json(json!({"location": "Office"}))
        );
        assert_eq!(sent[1].url, "http://api.test/api/attendance");
    }

    #[tokio::test]
    async fn clock_out_needs_open_record_and_surfaces_server_error() {
        let transport = FakeTransport::new();
        transport.push(json_response(400, json!({})));
        let vm = viewmodel(&transport, true);

        assert_eq!(
            vm.clock_out(&AttendanceSheet::default(), today()).await,
            Err(AttendanceError::NotClockedIn)
        );

        let open = AttendanceSheet::new(
            serde_json::from_value::<crate::models::DataEnvelope<Vec<AttendanceRecord>>>(records(true))
                .unwrap()
                .data,
            today(),
        );
        let err = vm.clock_out(&open, today()).await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to clock out");
    }

    #[test]
    fn closed_record_allows_clock_in_again() {
        let closed = AttendanceSheet::new(
            serde_json::from_value::<crate::models::DataEnvelope<Vec<AttendanceRecord>>>(records(false))
                .unwrap()
                .data,
            today(),
        );
        assert!(closed.can_clock_in());
        assert!(!closed.can_clock_out());
    }
}
