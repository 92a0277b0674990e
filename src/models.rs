//! Frontend Models
//!
//! Data structures matching backend resources, validated at the network
//! boundary by serde.

use paged_collection::{ActorContext, Entity, Selectors, Visible};
use serde::{Deserialize, Serialize};

// ========================
// Experiences
// ========================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceStatus {
    #[default]
    Draft,
    Published,
    Archived,
}

/// A bookable home experience
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub id: String,
    pub title: String,
    pub city: String,
    pub price: f64,
    #[serde(default)]
    pub rating: Option<f64>,
    pub host_id: String,
    #[serde(default)]
    pub status: ExperienceStatus,
    #[serde(default)]
    pub description: String,
}

impl Entity for Experience {
    type Id = String;
    fn id(&self) -> String {
        self.id.clone()
    }
}

/// Sort keys the catalogue endpoint accepts, with display labels
pub const EXPERIENCE_SORTS: &[(&str, &str)] = &[
    ("-rating", "Top rated"),
    ("price", "Price: low to high"),
    ("-price", "Price: high to low"),
    ("newest", "Newest"),
];

pub fn experience_stats() -> Selectors<Experience> {
    Selectors::<Experience>::new()
        .average("avg_price", |e| e.price)
        .count("count")
}

// ========================
// Reviews
// ========================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub experience_id: String,
    pub author_id: String,
    #[serde(default)]
    pub author_name: Option<String>,
    pub rating: u8,
    #[serde(default)]
    pub comment: String,
    pub created_at: String,
}

impl Entity for Review {
    type Id = String;
    fn id(&self) -> String {
        self.id.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewDraft {
    pub rating: u8,
    pub comment: String,
}

impl ReviewDraft {
    /// Ratings are whole stars from 1 to 5; blank comments are allowed
    pub fn validate(&self) -> Result<(), String> {
        if !(1..=5).contains(&self.rating) {
            return Err("Rating must be between 1 and 5".to_string());
        }
        if self.comment.chars().count() > 2000 {
            return Err("Comment is limited to 2000 characters".to_string());
        }
        Ok(())
    }
}

pub fn review_stats() -> Selectors<Review> {
    Selectors::<Review>::new()
        .average("avg_rating", |r| f64::from(r.rating))
        .count("count")
}

// ========================
// Host / Guide Applications
// ========================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationKind {
    Host,
    Guide,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Approved => "approved",
            ApplicationStatus::Rejected => "rejected",
        }
    }
}

/// A submitted host or guide application awaiting admin review
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostApplication {
    pub id: String,
    pub applicant_id: String,
    pub applicant_name: String,
    pub kind: ApplicationKind,
    #[serde(default)]
    pub status: ApplicationStatus,
    #[serde(default)]
    pub assigned_admin_id: Option<String>,
    #[serde(default)]
    pub city: String,
    pub submitted_at: String,
}

impl Entity for HostApplication {
    type Id = String;
    fn id(&self) -> String {
        self.id.clone()
    }
}

impl Visible for HostApplication {
    /// Admins see what is assigned to them; applicants see their own
    fn visible_to(&self, actor: &ActorContext) -> bool {
        actor.is(&self.applicant_id)
            || (actor.role.is_admin() && self.assigned_admin_id.as_deref().is_some_and(|id| actor.is(id)))
    }
}

/// Admin decision on an application
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationReview {
    pub status: ApplicationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

pub fn application_stats() -> Selectors<HostApplication> {
    Selectors::<HostApplication>::new()
        .count("count")
        .count_where("pending", |a| a.status == ApplicationStatus::Pending)
        .count_where("approved", |a| a.status == ApplicationStatus::Approved)
        .count_where("guides", |a| a.kind == ApplicationKind::Guide)
}

// ========================
// Wallet Withdrawals
// ========================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WithdrawalStatus {
    #[default]
    Requested,
    Processing,
    Paid,
    Failed,
}

impl WithdrawalStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            WithdrawalStatus::Requested => "requested",
            WithdrawalStatus::Processing => "processing",
            WithdrawalStatus::Paid => "paid",
            WithdrawalStatus::Failed => "failed",
        }
    }

    /// Only requests not yet picked up by the payout run can be cancelled
    pub fn is_cancellable(self) -> bool {
        self == WithdrawalStatus::Requested
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Withdrawal {
    pub id: String,
    pub owner_id: String,
    pub amount: f64,
    #[serde(default)]
    pub fee: f64,
    #[serde(default)]
    pub status: WithdrawalStatus,
    pub requested_at: String,
}

impl Entity for Withdrawal {
    type Id = String;
    fn id(&self) -> String {
        self.id.clone()
    }
}

impl Visible for Withdrawal {
    fn visible_to(&self, actor: &ActorContext) -> bool {
        actor.is(&self.owner_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WithdrawalRequest {
    pub amount: f64,
}

pub fn withdrawal_stats() -> Selectors<Withdrawal> {
    Selectors::<Withdrawal>::new()
        .sum("requested", |w| w.amount)
        .sum("fees", |w| w.fee)
        .sum("net", |w| w.amount - w.fee)
}

/// Two-decimal money display
pub fn format_money(amount: f64) -> String {
    format!("${:.2}", amount)
}
