pub mod attr;
pub mod code;
pub mod region;
pub mod source;

pub use attr::AttrValue;
pub use code::{RawCode, normalize_code, normalize_raw};
pub use region::{Bbox, RegionFeature, RegionSpec};
pub use source::{SourceCollection, SourceFeature};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_spec_deserializes_from_yaml_shaped_json() {
        let json = r#"{
            "uid": "eco_l3_07",
            "code": "07",
            "scheme": "EPA_US",
            "level": 3,
            "name": "Central California Valley"
        }"#;
        let spec: RegionSpec = serde_json::from_str(json).expect("deserialize spec");
        assert_eq!(spec.uid, "eco_l3_07");
        assert_eq!(normalize_raw(spec.code.as_ref()), "7");
        assert_eq!(spec.level, 3);
        assert!(spec.bounds.is_none());
    }

    #[test]
    fn region_spec_accepts_integer_codes_and_string_levels() {
        let json = r#"{"uid": "r1", "code": 7, "scheme": "EPA_US", "level": "3"}"#;
        let spec: RegionSpec = serde_json::from_str(json).expect("deserialize spec");
        assert_eq!(normalize_raw(spec.code.as_ref()), "7");
        assert_eq!(spec.level, 3);
    }
}
