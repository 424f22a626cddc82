//! Role-based authorization and visibility rules
//!
//! Every decision about who may see or change which record lives here. Each
//! function answers one (resource, action) pair and is pure: callers load the
//! facts (requester, target role, record owner) and act on the verdict.

use crate::errors::internal::AccessError;
use crate::types::internal::auth::Requester;
use crate::types::internal::submission::{RecordOwner, SubmissionKind};
use crate::types::Role;

/// Row filter a store applies to a listing query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// No filter
    All,
    /// Rows whose owner is supervised by the given INCHARGE
    SupervisedBy(i32),
    /// Rows owned by the given user
    OwnedBy(i32),
}

/// Which accountability/feedback records the requester may list
pub fn submission_scope(requester: &Requester) -> Scope {
    match requester.role {
        Role::Admin => Scope::All,
        Role::Incharge => Scope::SupervisedBy(requester.id),
        Role::Member => Scope::OwnedBy(requester.id),
    }
}

/// Single-record visibility
///
/// ADMIN sees everything. An INCHARGE sees records of users they supervise.
/// Anyone sees their own records.
pub fn can_view_submission(requester: &Requester, owner: &RecordOwner) -> bool {
    match requester.role {
        Role::Admin => true,
        Role::Incharge if owner.incharge_id == Some(requester.id) => true,
        _ => owner.user_id == requester.id,
    }
}

/// Resolve a fetched record into a visible one
///
/// Absent and invisible records produce the same error.
pub fn authorize_submission_view(
    requester: &Requester,
    kind: SubmissionKind,
    owner: Option<&RecordOwner>,
) -> Result<(), AccessError> {
    match owner {
        Some(owner) if can_view_submission(requester, owner) => Ok(()),
        _ => Err(AccessError::SubmissionNotVisible { kind }),
    }
}

/// Deletion requires visibility and then ADMIN or ownership
///
/// A supervising INCHARGE can read a subordinate's record but not delete it.
/// Missing records are reported as a denial as well.
pub fn authorize_submission_delete(
    requester: &Requester,
    kind: SubmissionKind,
    owner: Option<&RecordOwner>,
) -> Result<(), AccessError> {
    let allowed = owner.is_some_and(|owner| {
        can_view_submission(requester, owner)
            && (requester.role == Role::Admin || owner.user_id == requester.id)
    });

    if allowed {
        Ok(())
    } else {
        Err(AccessError::SubmissionDeleteDenied { kind })
    }
}

/// Account management endpoints are closed to members
pub fn require_user_manager(requester: &Requester) -> Result<(), AccessError> {
    if requester.role.is_manager() {
        Ok(())
    } else {
        Err(AccessError::ManagerRequired)
    }
}

/// Which users the requester may list
pub fn user_list_scope(requester: &Requester) -> Result<Scope, AccessError> {
    match requester.role {
        Role::Admin => Ok(Scope::All),
        Role::Incharge => Ok(Scope::SupervisedBy(requester.id)),
        Role::Member => Err(AccessError::ManagerRequired),
    }
}

/// Creating an account, either directly or as one line of a CSV import
pub fn authorize_user_create(requester: &Requester, new_role: Role) -> Result<(), AccessError> {
    require_user_manager(requester)?;
    if requester.role == Role::Incharge && new_role != Role::Member {
        return Err(AccessError::InchargeCreatesMembersOnly);
    }
    Ok(())
}

/// Editing another user's account
///
/// Checks run in a fixed order: members are rejected before the target is
/// considered, then an INCHARGE is limited to MEMBER targets, then an
/// INCHARGE may not touch `role` at all.
pub fn authorize_user_edit(
    requester: &Requester,
    target_role: Role,
    changes_role: bool,
) -> Result<(), AccessError> {
    match requester.role {
        Role::Admin => Ok(()),
        Role::Member => Err(AccessError::MembersCannotEdit),
        Role::Incharge if target_role != Role::Member => {
            Err(AccessError::InchargeEditsMembersOnly)
        }
        Role::Incharge if changes_role => Err(AccessError::InchargeCannotChangeRoles),
        Role::Incharge => Ok(()),
    }
}

/// Member-only gate for edits, usable before the target has been loaded
pub fn reject_member_edit(requester: &Requester) -> Result<(), AccessError> {
    if requester.role == Role::Member {
        Err(AccessError::MembersCannotEdit)
    } else {
        Ok(())
    }
}

/// Deleting a user account
pub fn authorize_user_delete(requester: &Requester, target_role: Role) -> Result<(), AccessError> {
    require_user_manager(requester)?;
    if requester.role == Role::Incharge && target_role != Role::Member {
        return Err(AccessError::InchargeDeletesMembersOnly);
    }
    Ok(())
}
