#[derive(Debug, PartialEq)]
pub enum CreateNamespaceError {
    /// an error with the database
    DbError,
}

#[derive(Debug, PartialEq)]
pub enum GetNamespaceError {
    /// an error with the database
    DbError,
    /// the namespace was not found
    NamespaceNotFound,
}

#[derive(Debug, PartialEq)]
pub enum ProvisionTagsError {
    /// an error with the database
    DbError,
    /// no namespace with the passed id was found
    NamespaceNotFound,
}

#[derive(Debug, PartialEq)]
pub enum DeleteNamespaceError {
    /// an error with the database
    DbError,
    /// no namespace with the passed id was found
    NamespaceNotFound,
}
