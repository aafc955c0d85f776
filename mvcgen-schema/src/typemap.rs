//! Native database type to Java type mapping.
//!
//! Covers the MySQL and PostgreSQL spellings of the standard type families.
//! Nullable columns get the boxed type so that NULL can be represented;
//! non-nullable columns get the primitive where Java has one.

/// Map a native column type to a Java type name.
///
/// Returns `None` for types outside the fixed supported set; the caller
/// turns that into an `UnsupportedColumnType` error with table/column
/// context. There is deliberately no generic fallback: an unknown type must
/// fail the table rather than produce source that does not compile.
pub fn java_type(native_type: &str, nullable: bool) -> Option<&'static str> {
    let normalized = native_type.trim().to_ascii_lowercase();
    let (primitive, boxed) = match normalized.as_str() {
        "tinyint" | "smallint" | "int2" | "smallserial" | "mediumint" | "int" | "integer"
        | "int4" | "serial" => ("int", "Integer"),
        "bigint" | "int8" | "bigserial" => ("long", "Long"),
        "float" | "float4" | "real" => ("float", "Float"),
        "double" | "double precision" | "float8" => ("double", "Double"),
        "decimal" | "numeric" => ("BigDecimal", "BigDecimal"),
        "bit" | "bool" | "boolean" => ("boolean", "Boolean"),
        "char" | "varchar" | "character" | "character varying" | "tinytext" | "text"
        | "mediumtext" | "longtext" | "enum" | "set" | "uuid" => ("String", "String"),
        "date" => ("LocalDate", "LocalDate"),
        "time" | "time without time zone" | "time with time zone" => ("LocalTime", "LocalTime"),
        "datetime" | "timestamp" | "timestamp without time zone"
        | "timestamp with time zone" => ("LocalDateTime", "LocalDateTime"),
        "json" | "jsonb" => ("String", "String"),
        "binary" | "varbinary" | "tinyblob" | "blob" | "mediumblob" | "longblob" | "bytea" => {
            ("byte[]", "byte[]")
        }
        _ => return None,
    };
    Some(if nullable { boxed } else { primitive })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_family() {
        assert_eq!(java_type("int", false), Some("int"));
        assert_eq!(java_type("int", true), Some("Integer"));
        assert_eq!(java_type("bigint", false), Some("long"));
        assert_eq!(java_type("bigint", true), Some("Long"));
        assert_eq!(java_type("smallint", false), Some("int"));
    }

    #[test]
    fn test_postgres_spellings() {
        assert_eq!(java_type("int4", false), Some("int"));
        assert_eq!(java_type("character varying", true), Some("String"));
        assert_eq!(
            java_type("timestamp without time zone", true),
            Some("LocalDateTime")
        );
        assert_eq!(java_type("bytea", false), Some("byte[]"));
    }

    #[test]
    fn test_boxing_only_where_it_matters() {
        // Reference types are the same either way
        assert_eq!(java_type("varchar", false), Some("String"));
        assert_eq!(java_type("varchar", true), Some("String"));
        assert_eq!(java_type("decimal", false), Some("BigDecimal"));
        assert_eq!(java_type("boolean", false), Some("boolean"));
        assert_eq!(java_type("boolean", true), Some("Boolean"));
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(java_type("VARCHAR", false), Some("String"));
        assert_eq!(java_type("DateTime", true), Some("LocalDateTime"));
    }

    #[test]
    fn test_unsupported_types_fail() {
        assert_eq!(java_type("geometry", false), None);
        assert_eq!(java_type("tsvector", true), None);
        assert_eq!(java_type("", false), None);
    }
}
