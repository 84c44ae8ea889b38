//! Basic type mapping between the two dialects.
//!
//! A name that matches no table entry is not a failure for most callers: it
//! is retried as a user-defined type reference and case-converted instead.
//! The only place where `None` is a hard error is a map key, which protobuf
//! requires to be a basic type.

/// Thrift basic type -> protobuf basic type.
pub fn thrift_basic_to_proto(name: &str) -> Option<&'static str> {
    match name {
        "string" => Some("string"),
        "i64" => Some("int64"),
        "i32" => Some("int32"),
        "double" => Some("double"),
        "bool" => Some("bool"),
        "binary" => Some("bytes"),
        _ => None,
    }
}

/// Protobuf basic type -> Thrift basic type. `float` narrows to `double`
/// because Thrift has no 32-bit float; this narrowing does not round-trip.
pub fn proto_basic_to_thrift(name: &str) -> Option<&'static str> {
    match name {
        "string" => Some("string"),
        "int64" => Some("i64"),
        "int32" => Some("i32"),
        "float" | "double" => Some("double"),
        "bool" => Some("bool"),
        "bytes" => Some("binary"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_stable_primitives() {
        for ty in ["string", "i32", "i64", "double", "bool", "binary"] {
            let proto = thrift_basic_to_proto(ty).unwrap();
            assert_eq!(proto_basic_to_thrift(proto), Some(ty));
        }
    }

    #[test]
    fn test_float_narrows_to_double() {
        assert_eq!(proto_basic_to_thrift("float"), Some("double"));
        // The narrowing does not round-trip back to float.
        assert_eq!(thrift_basic_to_proto("double"), Some("double"));
    }

    #[test]
    fn test_user_defined_names_are_not_basic() {
        assert_eq!(thrift_basic_to_proto("UserProfile"), None);
        assert_eq!(proto_basic_to_thrift("UserProfile"), None);
        // Thrift containers are not basic either.
        assert_eq!(thrift_basic_to_proto("set"), None);
    }
}
