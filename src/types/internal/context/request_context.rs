use std::net::IpAddr;

use poem::Request;
use poem_openapi::auth::Bearer;

use crate::errors::internal::{CredentialError, InternalError};
use crate::providers::TokenProvider;
use crate::types::internal::auth::Requester;
use crate::types::Role;

use super::{request_id::RequestId, request_source::RequestSource};

/// Request context that flows through all layers
///
/// Carries the caller's identity for the lifetime of one request so the
/// access policy never depends on shared mutable session state.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestContext {
    /// IP address of the client making the request
    pub ip_address: Option<IpAddr>,

    /// Unique identifier for this request (for tracing across layers)
    pub request_id: RequestId,

    /// Source of the request (API, CLI, or System)
    pub source: RequestSource,

    /// Authenticated caller, if any
    pub requester: Option<Requester>,
}

impl RequestContext {
    /// Create a RequestContext for CLI operations
    ///
    /// CLI commands run with the operator's authority, equivalent to ADMIN.
    pub fn for_cli(command_name: &str) -> Self {
        Self {
            ip_address: None,
            request_id: RequestId::new(),
            source: RequestSource::CLI,
            requester: Some(Requester::new(0, format!("cli:{}", command_name), Role::Admin)),
        }
    }

    /// Create a RequestContext for system operations
    pub fn for_system(operation_name: &str) -> Self {
        Self {
            ip_address: None,
            request_id: RequestId::new(),
            source: RequestSource::System,
            requester: Some(Requester::new(
                0,
                format!("system:{}", operation_name),
                Role::Admin,
            )),
        }
    }

    /// Unauthenticated API context (login, register)
    pub fn anonymous(req: &Request) -> Self {
        Self {
            ip_address: Self::extract_ip_address(req),
            request_id: RequestId::new(),
            source: RequestSource::API,
            requester: None,
        }
    }

    /// Build an authenticated API context from the bearer token
    ///
    /// Fails with a credential error when the token is invalid or expired.
    pub fn from_request(
        req: &Request,
        bearer: &Bearer,
        token_provider: &TokenProvider,
    ) -> Result<Self, InternalError> {
        let ip_address = Self::extract_ip_address(req);
        let claims = token_provider.validate(&bearer.token)?;

        let ctx = Self {
            ip_address,
            request_id: RequestId::new(),
            source: RequestSource::API,
            requester: Some(Requester::from(&claims)),
        };

        tracing::trace!("Request context created: {:?}", ctx);
        Ok(ctx)
    }

    pub fn with_requester(mut self, requester: Requester) -> Self {
        self.requester = Some(requester);
        self
    }

    /// The authenticated caller, or a credential error for anonymous contexts
    pub fn requester(&self) -> Result<&Requester, InternalError> {
        self.requester
            .as_ref()
            .ok_or(InternalError::Credential(CredentialError::MissingToken))
    }

    /// Extract IP address from request headers
    ///
    /// Checks X-Forwarded-For, X-Real-IP, and falls back to remote address.
    fn extract_ip_address(req: &Request) -> Option<IpAddr> {
        // Check X-Forwarded-For header (proxy/load balancer)
        if let Some(forwarded) = req.header("X-Forwarded-For") {
            if let Some(ip) = forwarded.split(',').next() {
                return ip.trim().parse().ok();
            }
        }

        // Check X-Real-IP header (nginx)
        if let Some(real_ip) = req.header("X-Real-IP") {
            return real_ip.parse().ok();
        }

        req.remote_addr().as_socket_addr().map(|addr| addr.ip())
    }
}
