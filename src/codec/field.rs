use thiserror::Error;

const TAG_LEN: usize = 2;
const LENGTH_PREFIX_LEN: usize = 2;

/// Largest value length a two-digit length prefix can declare.
pub const MAX_FIELD_VALUE_LEN: usize = 99;

/// Errors returned by TLV field encoding.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum FieldCodecError {
    /// The tag is not exactly two ASCII digits.
    #[error("field tag `{tag}` must be exactly two ASCII digits")]
    InvalidTag { tag: String },
    /// The value does not fit in a two-digit length prefix.
    #[error("field {tag} value is {len} characters long; the maximum is {max}")]
    FieldTooLong { tag: String, len: usize, max: usize },
    /// The value contains characters outside ASCII.
    #[error("field {tag} value contains non-ASCII characters")]
    NonAsciiValue { tag: String },
}

/// Encodes tag-length-value fields.
pub struct FieldCodec;

impl FieldCodec {
    /// Encodes one field as `tag + len2 + value`.
    ///
    /// Container fields are built by passing an already-encoded field
    /// sequence as `value`.
    ///
    /// # Errors
    ///
    /// Returns an error when `tag` is not two ASCII digits, when `value` is
    /// longer than 99 characters, or when `value` is not ASCII.
    ///
    /// ```
    /// use pixcode::FieldCodec;
    ///
    /// assert_eq!("000201", FieldCodec::encode("00", "01")?);
    ///
    /// let inner = FieldCodec::encode("05", "***")?;
    /// assert_eq!("62070503***", FieldCodec::encode("62", &inner)?);
    /// # Ok::<(), pixcode::FieldCodecError>(())
    /// ```
    pub fn encode(tag: &str, value: &str) -> Result<String, FieldCodecError> {
        let mut field = String::with_capacity(TAG_LEN + LENGTH_PREFIX_LEN + value.len());
        Self::encode_into(&mut field, tag, value)?;
        Ok(field)
    }

    /// Appends one encoded field to `out`.
    ///
    /// `out` is left untouched when encoding fails.
    ///
    /// # Errors
    ///
    /// Same conditions as [`FieldCodec::encode`].
    ///
    /// ```
    /// use pixcode::FieldCodec;
    ///
    /// let mut payload = String::new();
    /// FieldCodec::encode_into(&mut payload, "58", "BR")?;
    /// FieldCodec::encode_into(&mut payload, "53", "986")?;
    /// assert_eq!("5802BR5303986", payload);
    /// # Ok::<(), pixcode::FieldCodecError>(())
    /// ```
    pub fn encode_into(out: &mut String, tag: &str, value: &str) -> Result<(), FieldCodecError> {
        validate_tag(tag)?;
        if !value.is_ascii() {
            return Err(FieldCodecError::NonAsciiValue {
                tag: tag.to_string(),
            });
        }

        // ASCII was checked above, so the byte length equals the character count.
        let len = value.len();
        if len > MAX_FIELD_VALUE_LEN {
            return Err(FieldCodecError::FieldTooLong {
                tag: tag.to_string(),
                len,
                max: MAX_FIELD_VALUE_LEN,
            });
        }

        out.push_str(tag);
        out.push_str(&format!("{len:02}"));
        out.push_str(value);
        Ok(())
    }
}

fn validate_tag(tag: &str) -> Result<(), FieldCodecError> {
    if tag.len() == TAG_LEN && tag.bytes().all(|byte| byte.is_ascii_digit()) {
        return Ok(());
    }
    Err(FieldCodecError::InvalidTag {
        tag: tag.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("", "00")]
    #[case("BR", "02")]
    #[case("br.gov.bcb.pix", "14")]
    fn encode_writes_zero_padded_length(#[case] value: &str, #[case] expected_len: &str) {
        let field = FieldCodec::encode("59", value).expect("short ASCII value should encode");
        assert_eq!(format!("59{expected_len}{value}"), field);
    }

    #[rstest]
    #[case(0)]
    #[case(9)]
    #[case(10)]
    #[case(MAX_FIELD_VALUE_LEN)]
    fn encoded_length_is_value_length_plus_header(#[case] len: usize) {
        let value = "X".repeat(len);
        let field = FieldCodec::encode("01", &value).expect("value within limit should encode");

        assert_eq!(4 + len, field.len());
        let declared = field[2..4]
            .parse::<usize>()
            .expect("length prefix should be decimal");
        assert_eq!(len, declared);
    }

    #[test]
    fn encode_rejects_value_longer_than_two_digits() {
        let value = "X".repeat(MAX_FIELD_VALUE_LEN + 1);
        let result = FieldCodec::encode("26", &value);
        assert_matches!(
            result,
            Err(FieldCodecError::FieldTooLong { ref tag, len: 100, max: MAX_FIELD_VALUE_LEN })
                if tag == "26"
        );
    }

    #[test]
    fn encode_rejects_non_ascii_value() {
        let result = FieldCodec::encode("59", "JOÃO");
        assert_matches!(result, Err(FieldCodecError::NonAsciiValue { ref tag }) if tag == "59");
    }

    #[rstest]
    #[case("5")]
    #[case("123")]
    #[case("A1")]
    fn encode_rejects_malformed_tags(#[case] tag: &str) {
        let result = FieldCodec::encode(tag, "01");
        assert_matches!(result, Err(FieldCodecError::InvalidTag { .. }));
    }

    #[test]
    fn encode_into_leaves_buffer_untouched_on_error() {
        let mut payload = String::from("000201");
        let result = FieldCodec::encode_into(&mut payload, "59", &"X".repeat(120));
        assert_matches!(result, Err(FieldCodecError::FieldTooLong { .. }));
        assert_eq!("000201", payload);
    }

    #[test]
    fn nested_containers_compose_from_inner_fields() {
        let mut inner = String::new();
        FieldCodec::encode_into(&mut inner, "00", "br.gov.bcb.pix")
            .expect("gui sub-field should encode");
        FieldCodec::encode_into(&mut inner, "01", "joao@example.com")
            .expect("key sub-field should encode");
        let container = FieldCodec::encode("26", &inner).expect("container should encode");
        assert_eq!(
            "26380014br.gov.bcb.pix0116joao@example.com",
            container
        );
    }
}
