use crate::areas::database::{CommitCache, Database};
use crate::areas::index::StagingIndex;
use crate::areas::refs::Refs;
use crate::areas::remotes::Remotes;
use crate::areas::workspace::{REPOSITORY_DIR, Workspace};
use crate::artifacts::merge::split_point::SplitPointFinder;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::status::shadow::Shadow;
use crate::errors::TwigError;
use std::cell::{RefCell, RefMut};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

const OBJECTS_DIR: &str = "objects";
const STAGED_OBJECTS_DIR: &str = "staged-objects";
const INDEX_FILE: &str = "index";
const SHADOW_FILE: &str = "shadow";
const REMOTES_DIR: &str = "remotes";

pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    index: Arc<Mutex<StagingIndex>>,
    database: Database,
    workspace: Workspace,
    refs: Refs,
    remotes: Remotes,
}

impl Repository {
    pub fn new(path: &str, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let path = Path::new(path);
        if !path.exists() {
            std::fs::create_dir_all(path)?;
        }
        let path = path.canonicalize()?;
        let twig_path = path.join(REPOSITORY_DIR);

        let index = StagingIndex::new(twig_path.join(INDEX_FILE).into_boxed_path());
        let database = Database::new(
            twig_path.join(OBJECTS_DIR).into_boxed_path(),
            twig_path.join(STAGED_OBJECTS_DIR).into_boxed_path(),
        );
        let workspace = Workspace::new(path.clone().into_boxed_path());
        let refs = Refs::new(twig_path.clone().into_boxed_path());
        let remotes = Remotes::new(twig_path.join(REMOTES_DIR).into_boxed_path());

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            index: Arc::new(Mutex::new(index)),
            database,
            workspace,
            refs,
            remotes,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn twig_path(&self) -> Box<Path> {
        self.path.join(REPOSITORY_DIR).into_boxed_path()
    }

    pub fn shadow_path(&self) -> Box<Path> {
        self.twig_path().join(SHADOW_FILE).into_boxed_path()
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn index(&self) -> Arc<Mutex<StagingIndex>> {
        self.index.clone()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    pub fn remotes(&self) -> &Remotes {
        &self.remotes
    }

    pub fn is_initialized(&self) -> bool {
        self.refs.head_path().is_file()
    }

    pub fn ensure_initialized(&self) -> anyhow::Result<()> {
        if self.is_initialized() {
            Ok(())
        } else {
            Err(TwigError::NotInitialized.into())
        }
    }

    /// The commit the current branch points at.
    pub fn current_commit(&self) -> anyhow::Result<(ObjectId, Commit)> {
        let head_oid = self.refs.read_head()?;
        let commit = self.database.parse_object_as_commit(&head_oid)?;
        Ok((head_oid, commit))
    }

    /// Whether `ancestor` is reachable from the current commit.
    pub fn ancestry_contains(&self, ancestor: &ObjectId) -> anyhow::Result<bool> {
        let head_oid = self.refs.read_head()?;
        let commit_cache = CommitCache::new();
        let finder = SplitPointFinder::new(|oid: &ObjectId| {
            commit_cache.get_or_load_slim_commit(&self.database, oid)
        });

        finder.is_ancestor(ancestor, &head_oid)
    }

    /// Nearest common ancestor of two commits.
    pub fn split_point(
        &self,
        current: &ObjectId,
        other: &ObjectId,
    ) -> anyhow::Result<Option<ObjectId>> {
        let commit_cache = CommitCache::new();
        let finder = SplitPointFinder::new(|oid: &ObjectId| {
            commit_cache.get_or_load_slim_commit(&self.database, oid)
        });

        finder.find_split_point(current, other)
    }

    /// Re-sort the staging buckets against the working directory.
    pub fn reclassify(&self, index: &mut StagingIndex) -> anyhow::Result<()> {
        let working_files = self.workspace.working_snapshot()?;
        index.reclassify(&working_files);
        Ok(())
    }

    /// Save the working directory listing for the next `status`.
    pub fn record_shadow(&self) -> anyhow::Result<()> {
        if !self.is_initialized() {
            return Ok(());
        }

        let shadow = Shadow::new(self.workspace.working_snapshot()?);
        shadow.save(&self.shadow_path())
    }
}
