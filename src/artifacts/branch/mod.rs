//! Branch names and commit references
//!
//! - `branch_name`: validated branch names and the symbolic refs pointing at them
//! - `commit_ref`: user-supplied commit references (full ids, abbreviations, `HEAD`)

pub mod branch_name;
pub mod commit_ref;

pub const INVALID_BRANCH_NAME_REGEX: &str =
    r"^\.|\/\.|\.\.|^\/|\/$|\.lock$|@\{|[\x00-\x20\*:\?\[\\~\^\x7f]";
pub const COMMIT_ID_REGEX: &str = r"^[0-9a-fA-F]{4,40}$";
pub const REF_ALIASES: phf::Map<&'static str, &'static str> = phf::phf_map! {
    "@" => "HEAD",
    "HEAD" => "HEAD",
};

/// Branch every repository starts on
pub const DEFAULT_BRANCH: &str = "master";
