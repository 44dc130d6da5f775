use crate::error::{Result, RolodexError};
use crate::model::{Contact, Record, GROUP_KIND};
use crate::store::{ContactBook, SnapshotBackend};
use uuid::Uuid;

/// Shortest accepted UUID prefix.
pub const MIN_PREFIX_LEN: usize = 4;
const SHORT_ID_LEN: usize = 8;

/// The leading characters of a UUID, as shown in listings.
pub fn short_id(id: &Uuid) -> String {
    id.to_string().chars().take(SHORT_ID_LEN).collect()
}

pub fn resolve_contact<B: SnapshotBackend>(book: &ContactBook<B>, input: &str) -> Result<Uuid> {
    resolve_uuid(Contact::KIND, input, book.records().iter().map(|c| c.id))
}

pub fn resolve_group<B: SnapshotBackend>(book: &ContactBook<B>, input: &str) -> Result<Uuid> {
    resolve_uuid(GROUP_KIND, input, book.groups().iter().map(|g| g.id))
}

pub fn parse_task_id(input: &str) -> Result<u64> {
    input
        .trim()
        .parse()
        .map_err(|_| RolodexError::Api(format!("Task id must be a number, got \"{}\"", input)))
}

/// A full UUID is taken as is (the store reports whether it exists); anything
/// shorter must be the unique prefix of a known id.
fn resolve_uuid<I>(kind: &'static str, input: &str, candidates: I) -> Result<Uuid>
where
    I: Iterator<Item = Uuid>,
{
    let input = input.trim();
    if let Ok(id) = Uuid::parse_str(input) {
        return Ok(id);
    }

    let prefix = input.to_ascii_lowercase();
    let well_formed = prefix.len() >= MIN_PREFIX_LEN
        && prefix.chars().all(|c| c.is_ascii_hexdigit() || c == '-');
    if !well_formed {
        return Err(RolodexError::Api(format!(
            "Id does not match the UUID format: {} (give the full id or at least {} leading characters)",
            input, MIN_PREFIX_LEN
        )));
    }

    let matches: Vec<Uuid> = candidates
        .filter(|id| id.to_string().starts_with(&prefix))
        .collect();
    match matches.as_slice() {
        [] => Err(RolodexError::not_found(kind, input)),
        [id] => Ok(*id),
        _ => Err(RolodexError::Api(format!(
            "Ambiguous {} id prefix {}: matches {} entries",
            kind.to_lowercase(),
            input,
            matches.len()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids() -> Vec<Uuid> {
        vec![
            Uuid::parse_str("aaaa1111-0000-4000-8000-000000000001").unwrap(),
            Uuid::parse_str("aaaa2222-0000-4000-8000-000000000002").unwrap(),
            Uuid::parse_str("bbbb3333-0000-4000-8000-000000000003").unwrap(),
        ]
    }

    #[test]
    fn full_uuid_passes_through_even_if_unknown() {
        let unknown = Uuid::new_v4();
        let resolved = resolve_uuid("Contact", &unknown.to_string(), ids().into_iter()).unwrap();
        assert_eq!(resolved, unknown);
    }

    #[test]
    fn unique_prefix_resolves() {
        let resolved = resolve_uuid("Contact", "BBBB", ids().into_iter()).unwrap();
        assert_eq!(resolved, ids()[2]);
        let resolved = resolve_uuid("Contact", "aaaa2", ids().into_iter()).unwrap();
        assert_eq!(resolved, ids()[1]);
    }

    #[test]
    fn ambiguous_prefix_is_rejected() {
        let err = resolve_uuid("Contact", "aaaa", ids().into_iter()).unwrap_err();
        assert!(err.to_string().contains("Ambiguous contact id prefix"), "{err}");
    }

    #[test]
    fn unknown_prefix_is_not_found() {
        let err = resolve_uuid("Group", "cccc", ids().into_iter()).unwrap_err();
        assert!(matches!(err, RolodexError::NotFound { kind: "Group", .. }));
    }

    #[test]
    fn malformed_ids_are_api_errors() {
        for input in ["aa", "zzzzzz", "not an id"] {
            let err = resolve_uuid("Contact", input, ids().into_iter()).unwrap_err();
            assert!(matches!(err, RolodexError::Api(_)), "{input}");
        }
    }

    #[test]
    fn task_ids_are_numbers() {
        assert_eq!(parse_task_id(" 12 ").unwrap(), 12);
        assert!(matches!(parse_task_id("twelve"), Err(RolodexError::Api(_))));
        assert!(parse_task_id("-1").is_err());
    }

    #[test]
    fn short_id_takes_the_first_block() {
        assert_eq!(short_id(&ids()[0]), "aaaa1111");
    }
}
