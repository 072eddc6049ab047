//! HTTP DTOs for the lead endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::{Lead, LeadDraft};
use crate::ports::LeadRow;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Body of `POST /api/leads`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateLeadRequest {
    pub company: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl From<CreateLeadRequest> for LeadDraft {
    fn from(req: CreateLeadRequest) -> Self {
        Self {
            company: req.company,
            name: req.name,
            email: req.email,
            phone: req.phone,
            message: req.message,
        }
    }
}

/// Query parameters for `GET /api/leads`.
#[derive(Debug, Clone, Deserialize)]
pub struct ListLeadsQuery {
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    100
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// One lead echoed back to the caller.
#[derive(Debug, Clone, Serialize)]
pub struct LeadResponse {
    pub id: String,
    pub company: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub created_at: String,
    pub status: String,
}

impl From<&Lead> for LeadResponse {
    fn from(lead: &Lead) -> Self {
        Self {
            id: lead.id.to_string(),
            company: lead.company.clone(),
            name: lead.name.clone(),
            email: lead.email.clone(),
            phone: lead.phone.clone(),
            message: lead.message.clone(),
            created_at: lead.created_at.to_rfc3339(),
            status: lead.status.to_string(),
        }
    }
}

impl From<LeadRow> for LeadResponse {
    fn from(row: LeadRow) -> Self {
        Self {
            id: row.id,
            company: row.company,
            name: row.name,
            email: row.email,
            phone: row.phone,
            message: row.message,
            created_at: row.created_at,
            status: row.status,
        }
    }
}
