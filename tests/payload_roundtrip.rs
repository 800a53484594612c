use assert_matches::assert_matches;
use pretty_assertions::assert_eq;
use rstest::rstest;

use pixcode::{
    Amount, ChargeRequest, DecodeError, FieldCodecError, MAX_CITY_CHARS, MAX_NAME_CHARS,
    MerchantCategoryCode, PayloadAssembler, PayloadDecoder, PayloadOptions, checksum_hex,
    encode_payload, normalize_display_text,
};

fn charge(key: &str, name: &str, city: &str, amount: &str) -> ChargeRequest {
    ChargeRequest::builder()
        .key(key)
        .name(name)
        .city(city)
        .amount(amount.parse::<Amount>().expect("test amounts are valid"))
        .build()
}

#[test]
fn email_key_charge_contains_every_fixed_field() -> anyhow::Result<()> {
    let payload = encode_payload(&charge(
        "joao@example.com",
        "João da Silva",
        "São Paulo",
        "50.00",
    ))?;
    let text = payload.as_str();

    assert!(text.starts_with("000201"));
    assert!(text.contains("0014br.gov.bcb.pix0116joao@example.com"));
    assert!(text.contains("52040000"));
    assert!(text.contains("5303986"));
    assert!(text.contains("540550.00"));
    assert!(text.contains("5802BR"));
    assert!(text.contains("5913JOAO DA SILVA"));
    assert!(text.contains("6009SAO PAULO"));
    assert!(text.contains("62070503***"));

    let checksum = payload.checksum();
    assert!(checksum.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_lowercase()));
    assert_eq!(&text[text.len() - 8..text.len() - 4], "6304");
    assert_eq!(checksum, checksum_hex(&text[..text.len() - 4]));
    Ok(())
}

#[rstest]
#[case::half("12.5", "540512.50", "BEB3")]
#[case::whole("50", "540550.00", "73AA")]
#[case::comma("50,00", "540550.00", "73AA")]
fn amount_is_rendered_with_two_decimals(
    #[case] amount: &str,
    #[case] expected_field: &str,
    #[case] expected_checksum: &str,
) -> anyhow::Result<()> {
    let payload = encode_payload(&charge(
        "joao@example.com",
        "Joao da Silva",
        "Sao Paulo",
        amount,
    ))?;

    assert!(payload.as_str().contains(expected_field));
    assert_eq!(expected_checksum, payload.checksum());
    Ok(())
}

#[rstest]
#[case::phone("+5511999998888", "Fulano de Tal", "Brasilia", "1000.00")]
#[case::cpf("12345678900", "Padaria Pão Quente", "Belo Horizonte", "0.99")]
#[case::random_key(
    "123e4567-e12b-12d1-a456-426655440000",
    "Açaí & Cia Comércio de Frutas Ltda",
    "Florianópolis do Sul",
    "0"
)]
fn encoded_payloads_decode_to_normalized_fields(
    #[case] key: &str,
    #[case] name: &str,
    #[case] city: &str,
    #[case] amount: &str,
) -> anyhow::Result<()> {
    let request = charge(key, name, city, amount);
    let payload = encode_payload(&request)?;
    let decoded = PayloadDecoder::decode(payload.as_str())?;

    assert_eq!(key, decoded.key());
    assert_eq!(Some("br.gov.bcb.pix"), decoded.merchant_account_gui());
    assert_eq!(
        normalize_display_text(request.name(), MAX_NAME_CHARS),
        decoded.name()
    );
    assert_eq!(
        normalize_display_text(request.city(), MAX_CITY_CHARS),
        decoded.city()
    );
    assert_eq!(Some(request.amount()), decoded.amount());
    assert!(decoded.name().chars().count() <= MAX_NAME_CHARS);
    assert!(decoded.city().chars().count() <= MAX_CITY_CHARS);
    assert_eq!("986", decoded.currency());
    assert_eq!("BR", decoded.country_code());
    assert_eq!(Some("***"), decoded.reference_label());
    Ok(())
}

#[test]
fn custom_category_and_transaction_id_survive_decoding() -> anyhow::Result<()> {
    let request = ChargeRequest::builder()
        .key("loja@example.com")
        .name("Loja")
        .city("Recife")
        .amount("7.25".parse::<Amount>()?)
        .transaction_id("PEDIDO123")
        .build();
    let options = PayloadOptions::builder()
        .merchant_category_code("5812".parse::<MerchantCategoryCode>()?)
        .build();

    let payload = PayloadAssembler::new(options).encode(&request)?;
    let decoded = PayloadDecoder::decode(payload.as_str())?;

    assert_eq!("5812", decoded.merchant_category_code());
    assert_eq!(Some("PEDIDO123"), decoded.reference_label());
    Ok(())
}

#[test]
fn encoding_is_deterministic() -> anyhow::Result<()> {
    let request = charge("joao@example.com", "João da Silva", "São Paulo", "50");
    assert_eq!(encode_payload(&request)?, encode_payload(&request)?);
    Ok(())
}

#[test]
fn oversized_merchant_account_is_rejected() {
    let request = charge(&"k".repeat(78), "Loja", "Recife", "1");
    assert_matches!(
        encode_payload(&request),
        Err(FieldCodecError::FieldTooLong { tag, len: 100, max: 99 }) if tag == "26"
    );
}

#[test]
fn flipping_any_single_character_breaks_verification() -> anyhow::Result<()> {
    let payload = encode_payload(&charge("joao@example.com", "Joao", "Recife", "3.00"))?;
    let text = payload.as_str();

    let mutable = text
        .char_indices()
        .filter(|(_index, c)| c.is_ascii_alphanumeric());
    for (index, original) in mutable {
        let replacement = if original == 'X' { 'Y' } else { 'X' };
        let mut tampered = text.to_string();
        tampered.replace_range(index..=index, &replacement.to_string());
        assert!(
            PayloadDecoder::decode(&tampered).is_err(),
            "mutation at {index} went undetected"
        );
    }
    Ok(())
}

#[test]
fn lowercase_checksum_digits_still_verify() -> anyhow::Result<()> {
    let payload = "00020126380014br.gov.bcb.pix0116joao@example.com\
                   520400005303986540550.005802BR5913JOAO DA SILVA6009SAO PAULO\
                   62070503***630473aa";
    let decoded = PayloadDecoder::decode(payload)?;
    assert_eq!(0x73AA, decoded.checksum());
    Ok(())
}

#[test]
fn non_hex_checksum_is_rejected() {
    let payload = "00020126380014br.gov.bcb.pix0116joao@example.com\
                   520400005303986540550.005802BR5913JOAO DA SILVA6009SAO PAULO\
                   62070503***6304ZZZZ";
    assert_matches!(
        PayloadDecoder::decode(payload),
        Err(DecodeError::InvalidChecksum { raw }) if raw == "ZZZZ"
    );
}
