use eis_utils::u8s_from_str;

#[test]
fn test_u8s_from_str_is_stable() {
    assert_eq!(u8s_from_str("mongolian_tent:3"), u8s_from_str("mongolian_tent:3"));
    assert_ne!(u8s_from_str("mongolian_tent:3"), u8s_from_str("mongolian_tent:4"));
    assert_eq!(u8s_from_str(""), *blake3::hash(b"").as_bytes());
}
