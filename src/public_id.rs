use uuid::Uuid;

const BASE36_DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// produces collision-resistant opaque tokens used as the `public_id` of namespaces and user-created tags
pub trait PublicIdGenerator {
    fn generate_public_id(&self) -> String;
}

/// generates public ids from random v4 uuids, rendered in lowercase base 36
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidPublicIds;

impl PublicIdGenerator for UuidPublicIds {
    fn generate_public_id(&self) -> String {
        to_base36(Uuid::new_v4().as_u128())
    }
}

fn to_base36(mut value: u128) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut digits: Vec<u8> = Vec::new();
    while value > 0 {
        digits.push(BASE36_DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    // only ascii digits were pushed
    String::from_utf8_lossy(&digits).into_owned()
}
