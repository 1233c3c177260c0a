//! Business logic between the HTTP handlers and the repositories

use chrono::{DateTime, Duration, SubsecRound, Utc};

pub mod auth;
pub mod folder;

pub use auth::AuthService;
pub use folder::FolderService;

/// Current time truncated to the microsecond resolution PostgreSQL keeps
pub(crate) fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// A timestamp strictly later than `previous`, normally the current time
pub(crate) fn advance(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = now();
    if now > previous {
        now
    } else {
        previous + Duration::microseconds(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_is_strictly_monotonic() {
        let future = Utc::now() + Duration::seconds(60);
        let next = advance(future);
        assert!(next > future);
        assert_eq!(next - future, Duration::microseconds(1));

        let past = Utc::now() - Duration::seconds(60);
        assert!(advance(past) > past);
    }
}
