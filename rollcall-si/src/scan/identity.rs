//! Cross-tenant identity resolution
//!
//! Tag uids are cheap hardware identifiers and may be reused by
//! independently administered tenants, so a scan resolves by
//! (uid, presenting tenant) before trusting the tag's own enrollment.

use crate::db;
use rollcall_common::db::models::Person;
use rollcall_common::Result;
use sqlx::SqlitePool;

/// Outcome of resolving a scanned tag against a presenting tenant
#[derive(Debug, Clone)]
pub enum Resolution {
    /// Tag is not enrolled under any tenant
    Unknown,
    /// Tag resolves to this person
    Match(Person),
    /// Tag belongs to a different tenant. Carries the enrollment the tag
    /// actually points at and the owning tenant's display name (when that
    /// tenant still exists) so the presenting tenant can be told whose
    /// member showed up.
    ForeignTenant {
        person: Person,
        owner: Option<String>,
    },
}

/// Resolve a tag uid, reconciling a presented tenant key against the tag's
/// own enrollment.
///
/// Absent `presented_key` means "trust the tag". A presented key that
/// differs from the tag's owner first retries the lookup under the
/// presenting tenant (the same uid may legitimately be enrolled there);
/// only when that fails is the scan a genuine cross-tenant collision.
pub async fn resolve(
    pool: &SqlitePool,
    uid: &str,
    presented_key: Option<&str>,
) -> Result<Resolution> {
    let Some(person) = db::person_by_uid(pool, uid).await? else {
        return Ok(Resolution::Unknown);
    };

    if let Some(key) = presented_key {
        if key != person.api_key {
            if let Some(own) = db::person_by_uid_and_key(pool, uid, key).await? {
                return Ok(Resolution::Match(own));
            }
            let owner = db::tenant_name(pool, &person.api_key).await?;
            return Ok(Resolution::ForeignTenant { person, owner });
        }
    }

    Ok(Resolution::Match(person))
}
