#[cfg(test)]
mod tests {
    use crate::api::{EstateId, TreeId};
    use std::str::FromStr;
    use uuid::Uuid;

    #[test]
    fn test_estate_id_new() {
        let raw = Uuid::new_v4();
        let id = EstateId::new(raw);
        assert_eq!(id.value(), raw);
    }

    #[test]
    fn test_estate_id_generate_is_unique() {
        let id1 = EstateId::generate();
        let id2 = EstateId::generate();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_estate_id_display_matches_uuid() {
        let raw = Uuid::parse_str("f0f40954-d0c8-4a1a-9d54-1b4e57e2e236").unwrap();
        let id = EstateId(raw);
        assert_eq!(id.to_string(), "f0f40954-d0c8-4a1a-9d54-1b4e57e2e236");
    }

    #[test]
    fn test_estate_id_from_str() {
        let id = EstateId::from_str("734c8a10-2c10-404b-b41e-ff6e7f1d0a0b").unwrap();
        assert_eq!(id.to_string(), "734c8a10-2c10-404b-b41e-ff6e7f1d0a0b");
        assert!(EstateId::from_str("not-a-uuid").is_err());
    }

    #[test]
    fn test_tree_id_round_trips_through_uuid() {
        let id = TreeId::generate();
        let raw: Uuid = id.into();
        assert_eq!(TreeId::new(raw), id);
    }

    #[test]
    fn test_ids_serialize_as_plain_strings() {
        let id = TreeId::from_str("734c8a10-2c10-404b-b41e-ff6e7f1d0a0b").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"734c8a10-2c10-404b-b41e-ff6e7f1d0a0b\"");

        let back: TreeId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
