/// the account-scoped owner of tags and threads
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Namespace {
    pub id: u32,
    pub public_id: String,
}
