use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Result;
use bytes::Bytes;
use std::io::{BufRead, Write};
use std::path::PathBuf;

pub trait Packable {
    fn serialize(&self) -> Result<Bytes>;
}

pub trait Unpackable {
    fn deserialize(reader: impl BufRead) -> Result<Self>
    where
        Self: Sized;
}

pub trait Object: Packable {
    fn object_type(&self) -> ObjectType;

    /// Body of the object, without the `<type> <size>\0` header.
    fn body(&self) -> Result<Vec<u8>>;

    fn object_id(&self) -> Result<ObjectId> {
        let content = self.serialize()?;
        Ok(ObjectId::of_bytes(&content))
    }

    fn object_path(&self) -> Result<PathBuf> {
        Ok(self.object_id()?.to_path())
    }
}

/// Frame an object body with its header.
pub(crate) fn frame(object: &impl Object) -> Result<Bytes> {
    let body = object.body()?;

    let mut object_bytes = Vec::with_capacity(body.len() + 16);
    let header = format!("{} {}\0", object.object_type().as_str(), body.len());
    object_bytes.write_all(header.as_bytes())?;
    object_bytes.write_all(&body)?;

    Ok(Bytes::from(object_bytes))
}

#[derive(Debug, Clone)]
pub enum ObjectBox {
    Blob(Box<Blob>),
    Commit(Box<Commit>),
}

impl ObjectBox {
    pub fn object_type(&self) -> ObjectType {
        match self {
            ObjectBox::Blob(_) => ObjectType::Blob,
            ObjectBox::Commit(_) => ObjectType::Commit,
        }
    }
}
