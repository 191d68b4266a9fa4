//! Schedule access policy.
//!
//! Decides whether a caller may view or edit a given professional's
//! schedule. The caller is first classified into an explicit [`CallerRole`],
//! computed once per request, and the decision is an exhaustive match
//! over that role, so every branch is testable in isolation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::{ProfessionalId, UserId};
use crate::models::schedule::Professional;

/// Who is making the request, as established by the upstream auth gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CallerIdentity {
    /// Non-human caller (API key); granted unrestricted access.
    ServiceCredential { credential_id: Uuid },
    /// Authenticated staff user.
    User {
        user_id: UserId,
        is_admin: bool,
        /// The professional record bound to this user, when one exists.
        /// Staff without a linked record (front desk) see all schedules.
        linked_professional_id: Option<ProfessionalId>,
    },
}

/// The caller's relationship to the target professional's schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallerRole {
    ServiceCredential,
    Admin,
    OwnProfessional,
    OtherProfessional,
    NonProfessionalStaff,
}

/// Classify a caller against a target professional.
///
/// Rules are evaluated in order, first match wins:
/// 1. service credential
/// 2. the target professional is the caller's own record (matched by the
///    professional's `user_id`, even for non-admin callers)
/// 3. administrative staff
/// 4. staff not bound to any professional record (front desk)
/// 5. otherwise, a different professional
pub fn classify_caller(caller: &CallerIdentity, target: &Professional) -> CallerRole {
    match caller {
        CallerIdentity::ServiceCredential { .. } => CallerRole::ServiceCredential,
        CallerIdentity::User {
            user_id,
            is_admin,
            linked_professional_id,
        } => {
            if target.user_id == Some(*user_id) {
                CallerRole::OwnProfessional
            } else if *is_admin {
                CallerRole::Admin
            } else if linked_professional_id.is_none() {
                CallerRole::NonProfessionalStaff
            } else {
                CallerRole::OtherProfessional
            }
        }
    }
}

/// Whether the role may view the target professional's schedule.
pub fn can_view(role: CallerRole) -> bool {
    match role {
        CallerRole::ServiceCredential => true,
        CallerRole::OwnProfessional => true,
        CallerRole::Admin => true,
        CallerRole::NonProfessionalStaff => true,
        CallerRole::OtherProfessional => false,
    }
}

/// Whether the role may edit the target professional's schedule.
///
/// Currently identical to [`can_view`]; kept as a separate entry point so
/// call sites don't change if the rules ever diverge.
pub fn can_edit(role: CallerRole) -> bool {
    can_view(role)
}
