use crate::games::SessionRng;
use crate::identifiers::RoomId;

/// Three random bytes as six uppercase hex digits, e.g. `0AF3C9`.
pub fn generate_room_id(rng: &mut SessionRng) -> RoomId {
    let bytes: [u8; 3] = rng.random();
    let id: String = bytes.iter().map(|b| format!("{:02X}", b)).collect();
    RoomId::new(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_id_is_six_uppercase_hex_digits() {
        let mut rng = SessionRng::new(42);
        for _ in 0..100 {
            let id = generate_room_id(&mut rng);
            assert_eq!(id.as_str().len(), 6);
            assert!(id.as_str().chars().all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c)));
        }
    }

    #[test]
    fn test_room_ids_follow_seed() {
        let a = generate_room_id(&mut SessionRng::new(5));
        let b = generate_room_id(&mut SessionRng::new(5));
        assert_eq!(a, b);
    }
}
