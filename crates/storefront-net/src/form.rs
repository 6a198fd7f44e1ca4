//! Form body encoding.

use url::form_urlencoded;

/// Encode name/value pairs as an `application/x-www-form-urlencoded` body.
pub fn encode_form(fields: &[(String, String)]) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (name, value) in fields {
        serializer.append_pair(name, value);
    }
    serializer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_form() {
        let fields = vec![
            ("id".to_string(), "12345".to_string()),
            ("quantity".to_string(), "2".to_string()),
        ];
        assert_eq!(encode_form(&fields), "id=12345&quantity=2");
    }

    #[test]
    fn test_encode_form_escapes() {
        let fields = vec![("note".to_string(), "gift & card".to_string())];
        assert_eq!(encode_form(&fields), "note=gift+%26+card");
    }

    #[test]
    fn test_encode_empty_form() {
        assert_eq!(encode_form(&[]), "");
    }
}
