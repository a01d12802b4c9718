use crate::areas::database::Database;
use crate::areas::refs::Refs;
use crate::artifacts::branch::{COMMIT_ID_REGEX, REF_ALIASES};
use crate::artifacts::objects::OBJECT_ID_LENGTH;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::TwigError;
use anyhow::Context;

/// A user-supplied reference to a commit.
///
/// Accepted forms:
/// - `HEAD` or its alias `@`: the tip of the current branch
/// - a full 40-character id
/// - an abbreviated id of at least 4 hexadecimal characters
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitRef {
    Head,
    Oid(ObjectId),
    Abbreviated(String),
}

impl CommitRef {
    pub fn try_parse(commit_ref: &str) -> anyhow::Result<CommitRef> {
        if REF_ALIASES.get(commit_ref).is_some() {
            return Ok(CommitRef::Head);
        }

        let is_commit_id = regex::Regex::new(COMMIT_ID_REGEX)
            .with_context(|| format!("invalid commit id regex: {COMMIT_ID_REGEX}"))?
            .is_match(commit_ref);

        match (is_commit_id, commit_ref.len()) {
            (true, OBJECT_ID_LENGTH) => Ok(CommitRef::Oid(ObjectId::try_parse(
                commit_ref.to_string(),
            )?)),
            (true, _) => Ok(CommitRef::Abbreviated(commit_ref.to_ascii_lowercase())),
            (false, _) => Err(TwigError::CommitNotFound(commit_ref.to_string()).into()),
        }
    }

    pub fn resolve(&self, database: &Database, refs: &Refs) -> anyhow::Result<ObjectId> {
        match self {
            CommitRef::Head => refs.read_head(),
            CommitRef::Oid(oid) => {
                Self::validate_oid_is_commit(oid, database)?;
                Ok(oid.clone())
            }
            CommitRef::Abbreviated(prefix) => Self::resolve_prefix(prefix, database),
        }
    }

    fn resolve_prefix(prefix: &str, database: &Database) -> anyhow::Result<ObjectId> {
        let candidates = database
            .find_objects_by_prefix(prefix)?
            .into_iter()
            .filter(|oid| {
                database
                    .object_type(oid)
                    .map(|object_type| object_type == ObjectType::Commit)
                    .unwrap_or(false)
            })
            .collect::<Vec<_>>();

        match candidates.as_slice() {
            [] => Err(TwigError::CommitNotFound(prefix.to_string()).into()),
            [oid] => Ok(oid.clone()),
            _ => Err(TwigError::AmbiguousCommit {
                prefix: prefix.to_string(),
                candidates,
            }
            .into()),
        }
    }

    fn validate_oid_is_commit(oid: &ObjectId, database: &Database) -> anyhow::Result<()> {
        if !database.contains(oid) || database.object_type(oid)? != ObjectType::Commit {
            return Err(TwigError::CommitNotFound(oid.to_string()).into());
        }

        Ok(())
    }
}
