/// a message thread. Only the fields needed to own tag associations are tracked here
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Thread {
    pub id: u32,
    pub namespace_id: u32,
    pub subject: String,
}
