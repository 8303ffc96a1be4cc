#[derive(Debug, PartialEq)]
pub enum CreateTagError {
    /// an error with the database
    DbError,
    /// no namespace with the passed id was found
    NamespaceNotFound,
    /// the name is blank
    InvalidName,
    /// the name is reserved, canonical, or already used by another tag in the namespace
    NameUnavailable,
}

#[derive(Debug, PartialEq)]
pub enum GetTagError {
    /// an error with the database
    DbError,
    /// the tag was not found
    TagNotFound,
}

#[derive(Debug, PartialEq)]
pub enum UpdateTagError {
    /// an error with the database
    DbError,
    /// no tag with that public id can be found in the namespace
    TagNotFound,
    /// only user-created tags can be renamed
    NotUserCreated,
    /// the name is blank
    InvalidName,
    /// the new name is reserved, canonical, or already used by another tag in the namespace
    NameUnavailable,
}

#[derive(Debug, PartialEq)]
pub enum TagRelationError {
    /// an error with the database
    DbError,
    /// no thread with the passed id was found
    ThreadNotFound,
    /// no tag with the passed public id was found in the thread's namespace
    TagNotFound,
    /// users aren't allowed to add this tag to threads
    NotAddable,
    /// users aren't allowed to remove this tag from threads
    NotRemovable,
}

#[derive(Debug, PartialEq)]
pub enum TagCountError {
    /// an error with the database
    DbError,
    /// one of the tags was not found in the namespace
    TagNotFound,
}
