use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures::future::{Ready, ready};
use serde::Deserialize;
use std::str::FromStr;

use crate::model::employee::Role;

#[derive(Deserialize)]
struct RoleQuery {
    role: Option<String>,
}

/// Caller-asserted role taken from the `?role=` query parameter.
///
/// This is an opaque claim, not proof of identity. Anything that does not
/// parse as a known role is treated as a plain employee; the service
/// decides whether the claim suffices for the operation.
pub struct RoleClaim {
    pub role: Role,
}

impl FromRequest for RoleClaim {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let claimed = web::Query::<RoleQuery>::from_query(req.query_string())
            .map(|q| q.into_inner().role)
            .unwrap_or(None);

        let role = claimed
            .as_deref()
            .and_then(|s| Role::from_str(s).ok())
            .unwrap_or(Role::Employee);

        ready(Ok(RoleClaim { role }))
    }
}
