use chrono::{DateTime, Utc};
use rand::Rng;

/// Symbols a pairing code is drawn from. `0`, `O`, `1` and `I` are left out
/// so codes survive being read aloud or copied by hand.
pub const PAIR_CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";
pub const PAIR_CODE_LENGTH: usize = 8;
pub const MIN_NUMBER_LENGTH: usize = 10;

const AVATAR_BASE_URL: &str = "https://ui-avatars.com/api/";

pub fn generate_pair_code() -> String {
    generate_pair_code_with(&mut rand::rng())
}

/// Samples [`PAIR_CODE_LENGTH`] symbols independently and uniformly from
/// [`PAIR_CODE_ALPHABET`] using the supplied generator.
pub fn generate_pair_code_with<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..PAIR_CODE_LENGTH)
        .map(|_| char::from(PAIR_CODE_ALPHABET[rng.random_range(0..PAIR_CODE_ALPHABET.len())]))
        .collect()
}

pub fn is_pair_code_shaped(code: &str) -> bool {
    code.len() == PAIR_CODE_LENGTH && code.bytes().all(|b| PAIR_CODE_ALPHABET.contains(&b))
}

pub fn is_valid_number(number: &str) -> bool {
    number.chars().count() >= MIN_NUMBER_LENGTH
}

/// Formats a post timestamp the way the admin panel displays it, `YYYY-MM-DD HH:MM`.
pub fn format_post_time(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M").to_string()
}

pub fn avatar_url(user: Option<&str>) -> String {
    let name = user.filter(|u| !u.is_empty()).unwrap_or("User");
    format!("{AVATAR_BASE_URL}?{}", encode_query(&[("name", name), ("background", "random")]))
}

/// Builds a query string with every key and value percent-encoded, so a
/// space becomes `%20` rather than `+`.
pub fn encode_query(params: &[(&str, &str)]) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}
