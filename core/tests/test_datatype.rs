#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use gpucomp_core::{
        datatype::{type_tag, Element, TypeTag},
        types::Status,
    };

    #[test]
    fn all_eight_types_map_to_distinct_tags() {
        let tags = [
            type_tag::<i8>().unwrap(),
            type_tag::<u8>().unwrap(),
            type_tag::<i16>().unwrap(),
            type_tag::<u16>().unwrap(),
            type_tag::<i32>().unwrap(),
            type_tag::<u32>().unwrap(),
            type_tag::<i64>().unwrap(),
            type_tag::<u64>().unwrap(),
        ];
        assert_eq!(tags, TypeTag::ALL);
        let unique: HashSet<_> = tags.iter().collect();
        assert_eq!(unique.len(), 8);
    }

    #[test]
    fn lookup_is_stable() {
        assert_eq!(type_tag::<u32>().unwrap(), type_tag::<u32>().unwrap());
        assert_eq!(TypeTag::UInt as u16, 5);
    }

    #[test]
    fn unsigned_char_maps_to_uchar() {
        assert_eq!(type_tag::<u8>().unwrap(), TypeTag::UChar);
    }

    #[test]
    fn float_is_unsupported() {
        let err = type_tag::<f32>().unwrap_err();
        assert_eq!(err.status(), Some(Status::NotSupported));

        assert!(type_tag::<f64>().is_err());
        assert!(type_tag::<usize>().is_err());
        assert!(type_tag::<String>().is_err());
    }

    #[test]
    fn element_trait_agrees_with_runtime_lookup() {
        fn tag_of<T: Element>() -> TypeTag {
            T::TYPE
        }
        assert_eq!(tag_of::<i8>(), type_tag::<i8>().unwrap());
        assert_eq!(tag_of::<u16>(), type_tag::<u16>().unwrap());
        assert_eq!(tag_of::<i64>(), type_tag::<i64>().unwrap());
    }

    #[test]
    fn element_widths() {
        assert_eq!(TypeTag::Char.size_of(), 1);
        assert_eq!(TypeTag::UShort.size_of(), 2);
        assert_eq!(TypeTag::Int.size_of(), 4);
        assert_eq!(TypeTag::ULongLong.size_of(), 8);
    }

    #[test]
    fn verify_rejects_unknown_raw_tags() {
        assert_eq!(TypeTag::verify(6).unwrap(), TypeTag::LongLong);
        assert_eq!(TypeTag::verify(8).unwrap_err().status(), Some(Status::NotSupported));
    }
}
