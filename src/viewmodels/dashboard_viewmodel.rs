// ============================================================================
// DASHBOARD VIEWMODEL - admin overview
// ============================================================================
// Gated on SessionHandle::is_admin before any request is made. Each panel
// degrades on its own: zeroed stats, empty lists.
// ============================================================================

use crate::models::{DashboardStats, Document, Leave};
use crate::services::{ApiError, DashboardService};
use crate::state::SessionHandle;

const RECENT_LIMIT: u32 = 5;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashboardData {
    pub stats: DashboardStats,
    pub recent_documents: Vec<Document>,
    pub recent_leaves: Vec<Leave>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardView {
    AccessDenied,
    Ready(DashboardData),
}

#[derive(Clone)]
pub struct DashboardViewModel {
    service: DashboardService,
    session: SessionHandle,
}

impl DashboardViewModel {
    pub fn new(service: DashboardService, session: SessionHandle) -> Self {
        Self { service, session }
    }

    pub async fn load(&self) -> DashboardView {
        if !self.session.is_admin() {
            log::warn!("🚫 [DASHBOARD] Access denied for non-admin session");
            return DashboardView::AccessDenied;
        }

        let stats = self.service.stats().await.unwrap_or_else(|e| {
            log::error!("❌ [DASHBOARD] Stats unavailable: {}", e);
            DashboardStats::default()
        });
        let recent_documents = self
            .service
            .recent_documents(RECENT_LIMIT)
            .await
            .unwrap_or_else(|e| {
                log::error!("❌ [DASHBOARD] Recent documents unavailable: {}", e);
                Vec::new()
            });
        let recent_leaves = self
            .service
            .recent_leaves(RECENT_LIMIT)
            .await
            .unwrap_or_else(|e| {
                log::error!("❌ [DASHBOARD] Recent leaves unavailable: {}", e);
                Vec::new()
            });

        log::info!(
            "📊 [DASHBOARD] Loaded: {} employees, {} documents, {} leaves",
            stats.total_employees,
            recent_documents.len(),
            recent_leaves.len()
        );
        DashboardView::Ready(DashboardData {
            stats,
            recent_documents,
            recent_leaves,
        })
    }

    pub async fn leave_details(&self, id: &str) -> Result<Leave, ApiError> {
        if !self.session.is_admin() {
            return Err(ApiError::Rejected {
                status: 403,
                message: "Access denied".to_string(),
            });
        }
        self.service.leave(id).await
    }
}
