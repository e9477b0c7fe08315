use std::collections::BTreeMap;

use serde::Serialize;

use super::applications::{Application, ApplicationStatus};

/// Counts of applications per state plus the overall total. Recomputed
/// from the current application list on every call; nothing is cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    pub total: usize,
    pub by_status: BTreeMap<ApplicationStatus, usize>,
}

impl StatusReport {
    pub fn count(&self, status: ApplicationStatus) -> usize {
        self.by_status.get(&status).copied().unwrap_or(0)
    }
}

/// Pure projection of the application list into per-state counts.
pub fn report_by_status(applications: &[Application]) -> StatusReport {
    let mut by_status = BTreeMap::new();
    for application in applications {
        *by_status.entry(application.status).or_insert(0) += 1;
    }
    StatusReport {
        total: applications.len(),
        by_status,
    }
}
