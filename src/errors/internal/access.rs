use thiserror::Error;

use crate::types::internal::submission::SubmissionKind;

/// Authorization denials raised by the access policy
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccessError {
    #[error("Insufficient permissions")]
    ManagerRequired,

    #[error("Incharge can only create members")]
    InchargeCreatesMembersOnly,

    #[error("Incharge can only edit member profiles")]
    InchargeEditsMembersOnly,

    #[error("Incharge can only delete members")]
    InchargeDeletesMembersOnly,

    #[error("Incharge cannot change user roles")]
    InchargeCannotChangeRoles,

    #[error("Members cannot edit profiles")]
    MembersCannotEdit,

    #[error("Cannot delete this {}", .kind.noun())]
    SubmissionDeleteDenied { kind: SubmissionKind },

    /// Missing and invisible records are indistinguishable to the caller
    #[error("{} not found or access denied", .kind.title())]
    SubmissionNotVisible { kind: SubmissionKind },
}
