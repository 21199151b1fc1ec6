#[cfg(test)]
mod tests {
    use gpucomp_core::types::{check_status, CompressionError, Status};

    #[test]
    fn display_contains_message_and_code() {
        let err = CompressionError::new(7, "bad size");
        let text = err.to_string();
        assert!(text.contains("bad size"));
        assert!(text.contains('7'));
        assert_eq!(text, "bad size : code=7.");
    }

    #[test]
    fn code_is_preserved_verbatim() {
        for code in [0, 7, 10, 11, 12, 1000, 10000, -1, i32::MAX] {
            let err = CompressionError::new(code, "msg");
            assert_eq!(err.code(), code);
            assert!(err.to_string().contains(&code.to_string()));
        }
    }

    #[test]
    fn status_maps_known_codes_only() {
        assert_eq!(CompressionError::new(11, "x").status(), Some(Status::NotSupported));
        assert_eq!(CompressionError::new(7, "x").status(), None);
        assert_eq!(CompressionError::new(11, "x").status_name(), "NotSupported");
        assert_eq!(CompressionError::new(7, "x").status_name(), "0x7");
    }

    #[test]
    fn constructors_pick_expected_status() {
        assert_eq!(CompressionError::invalid_value("a").status(), Some(Status::InvalidValue));
        assert_eq!(CompressionError::not_supported("a").status(), Some(Status::NotSupported));
        assert_eq!(CompressionError::cannot_decompress("a").status(), Some(Status::CannotDecompress));
        assert_eq!(CompressionError::device("a").status(), Some(Status::DeviceError));
        assert_eq!(CompressionError::from_status(Status::Internal, "a").code(), 10000);
    }

    #[test]
    fn message_excludes_code_suffix() {
        let err = CompressionError::from_status(Status::InvalidValue, "temp too small");
        assert_eq!(err.message(), "temp too small");
        assert_eq!(err.to_string(), "temp too small : code=10.");
    }

    #[test]
    fn check_status_success_and_failure() {
        assert!(check_status(Status::Success.code(), "unused").is_ok());

        let err = check_status(Status::CannotDecompress.code(), "launch failed").unwrap_err();
        assert_eq!(err.code(), 12);
        assert_eq!(err.message(), "launch failed");
    }
}
