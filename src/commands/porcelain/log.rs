use crate::areas::repository::Repository;
use crate::artifacts::log::rev_list::RevList;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::TwigError;
use colored::Colorize;

impl Repository {
    /// First-parent history of the current branch, newest first.
    pub fn log(&self) -> anyhow::Result<()> {
        let head_id = self.refs().read_head()?;

        for entry in RevList::new(self.database(), head_id) {
            let (commit_id, commit) = entry?;
            self.show_commit(&commit_id, &commit)?;
        }

        Ok(())
    }

    /// Every commit ever made, in no particular order.
    pub fn global_log(&self) -> anyhow::Result<()> {
        for commit_id in self.database().list_commits()? {
            let commit = self.database().parse_object_as_commit(&commit_id)?;
            self.show_commit(&commit_id, &commit)?;
        }

        Ok(())
    }

    /// Ids of the commits whose message is exactly `message`.
    pub fn find(&self, message: &str) -> anyhow::Result<Vec<ObjectId>> {
        let mut matches = Vec::new();
        for commit_id in self.database().list_commits()? {
            let commit = self.database().parse_object_as_commit(&commit_id)?;
            if commit.message() == message {
                matches.push(commit_id);
            }
        }

        if matches.is_empty() {
            return Err(TwigError::NoCommitWithMessage(message.to_string()).into());
        }

        for commit_id in &matches {
            writeln!(self.writer(), "{commit_id}")?;
        }

        Ok(matches)
    }

    fn show_commit(&self, commit_id: &ObjectId, commit: &Commit) -> anyhow::Result<()> {
        writeln!(self.writer(), "===")?;
        writeln!(self.writer(), "{}", format!("commit {commit_id}").yellow())?;
        if let (Some(parent), Some(second_parent)) = (commit.parent(), commit.second_parent()) {
            writeln!(
                self.writer(),
                "Merge: {} {}",
                parent.to_short_oid(),
                second_parent.to_short_oid()
            )?;
        }
        writeln!(self.writer(), "Date: {}", commit.readable_timestamp())?;
        writeln!(self.writer(), "{}", commit.message())?;
        writeln!(self.writer())?;

        Ok(())
    }
}
